// src/handlers/players.rs
use log::debug;

use crate::commands::build_command;
use crate::models::command::CommandResult;
use crate::parsers::pinfo::{extract_enrichment, parse_detail, DetailLine};
use crate::parsers::roster::parse_online_list;
use crate::soap::client::ConsoleClient;
use crate::storage::roster::RosterView;

/// Pulls a fresh `account onlinelist` snapshot into the view. Returns how
/// many rows were kept and how many lines were skipped as chatter.
pub async fn refresh_roster(
    client: &ConsoleClient,
    view: &mut RosterView,
) -> Result<(usize, usize), String> {
    let result = client.execute_command("account onlinelist").await;
    if !result.success {
        return Err(result.message);
    }

    let (records, skipped) = parse_online_list(&result.message, view.rules());
    if skipped > 0 {
        debug!("Skipped {} unrecognized roster lines", skipped);
    }
    let kept = records.len();
    view.ingest(records);
    Ok((kept, skipped))
}

/// Fetches `pinfo` for one character. The cleaned-up lines go back to the
/// caller; any level/race enrichment found is merged into the roster first.
pub async fn fetch_detail(
    client: &ConsoleClient,
    view: &mut RosterView,
    name: &str,
) -> Result<Vec<DetailLine>, String> {
    let result = client
        .execute_command(&build_command("pinfo", name, ""))
        .await;
    if !result.success {
        return Err(result.message);
    }

    if let Some(patch) = extract_enrichment(&result.message) {
        if view.apply_enrichment(name, &patch) {
            debug!("Enriched roster entry for {}", name);
        }
    }

    Ok(parse_detail(&result.message))
}

/// Maps an admin action through the command grammar and runs it.
pub async fn run_action(
    client: &ConsoleClient,
    action: &str,
    target: &str,
    extra: &str,
) -> CommandResult {
    let command = build_command(action, target, extra);
    debug!("Action '{}' on {} -> {}", action, target, command);
    client.execute_command(&command).await
}
