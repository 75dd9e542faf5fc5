// src/handlers/dashboard.rs
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::info::ServerStatus;
use crate::parsers::server_info::parse_server_info;
use crate::soap::client::ConsoleClient;

lazy_static! {
    static ref UPTIME_LABEL: Regex = Regex::new(r"(?i)^Server uptime:\s*").unwrap();
}

// An uptime reply that is nothing but the label falls back to the raw
// message instead of showing empty.
fn clean_uptime(message: &str) -> String {
    let stripped = UPTIME_LABEL.replace(message, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        message.to_string()
    } else {
        stripped.to_string()
    }
}

/// One dashboard refresh. `server info` has to succeed or its failure
/// message is handed back; uptime and motd are cosmetic and just stay empty
/// when their commands fail.
pub async fn fetch_status(client: &ConsoleClient) -> Result<ServerStatus, String> {
    let info = client.execute_command("server info").await;
    if !info.success {
        return Err(info.message);
    }

    let mut status = ServerStatus {
        info: parse_server_info(&info.message),
        ..Default::default()
    };

    let uptime = client.execute_command("server uptime").await;
    if uptime.success {
        status.uptime = clean_uptime(&uptime.message);
    } else {
        debug!("server uptime failed: {}", uptime.message);
    }

    let motd = client.execute_command("server motd").await;
    if motd.success {
        status.motd = motd.message;
    } else {
        debug!("server motd failed: {}", motd.message);
    }

    Ok(status)
}
