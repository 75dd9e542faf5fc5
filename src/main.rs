// src/main.rs
mod commands;
mod config;
mod handlers;
mod lookup;
mod models;
mod parsers;
mod soap;
mod storage;

use std::io::Write;

use env_logger::Env;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{split_action_line, COMMAND_GRAMMAR};
use crate::config::{Config, ConnectionConfig};
use crate::handlers::{dashboard, players};
use crate::models::command::CommandResult;
use crate::models::info::ServerStatus;
use crate::parsers::pinfo::DetailLine;
use crate::soap::client::ConsoleClient;
use crate::storage::profiles::{Profile, ProfileFields, ProfileStore};
use crate::storage::roster::{RosterView, SortColumn, TypeFilter};

const NOT_CONNECTED: &str =
    "Not connected. Use :connect <host> <port> <user> <pass> or :profile use <id>.";

#[tokio::main]
async fn main() {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();

    let config = Config::from_env();
    let profiles = ProfileStore::open(&config.profiles_path);
    let mut view = RosterView::new(config.roster_rules());
    let mut client: Option<ConsoleClient> = None;

    info!("Profile store at {}", config.profiles_path);
    println!("worldctl - worldserver console over SOAP");
    println!("Type :help for local commands; anything else goes to the server verbatim.");

    // Credentials in the environment give a session right away.
    if !config.username.is_empty() {
        client = try_connect(config.connection()).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(client.is_some());
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("Failed to read input: {}", err);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(local) = line.strip_prefix(':') {
            if !dispatch(local, &mut client, &mut view, &profiles, &config).await {
                break;
            }
        } else {
            match client.as_ref() {
                Some(c) => print_result(&c.execute_command(line).await),
                None => println!("{}", NOT_CONNECTED),
            }
        }
    }
    println!("Bye.");
}

fn prompt(connected: bool) {
    if connected {
        print!("worldctl> ");
    } else {
        print!("worldctl offline> ");
    }
    let _ = std::io::stdout().flush();
}

/// Probes the endpoint with `server info` before handing the client out, so
/// a typo in the password is caught here and not on the first real command.
async fn try_connect(conn: ConnectionConfig) -> Option<ConsoleClient> {
    println!("Connecting to {}:{} as {}...", conn.host, conn.port, conn.username);
    let candidate = ConsoleClient::new(conn);
    let probe = candidate.test_connection().await;
    if probe.success {
        let version = probe.message.lines().next().unwrap_or("").trim();
        if version.is_empty() {
            println!("Connected.");
        } else {
            println!("Connected: {}", version);
        }
        Some(candidate)
    } else {
        println!("{}", probe.message);
        None
    }
}

fn online(client: &Option<ConsoleClient>) -> Option<&ConsoleClient> {
    if client.is_none() {
        println!("{}", NOT_CONNECTED);
    }
    client.as_ref()
}

/// Handles one `:`-prefixed local command. Returns `false` on quit.
async fn dispatch(
    input: &str,
    client: &mut Option<ConsoleClient>,
    view: &mut RosterView,
    profiles: &ProfileStore,
    config: &Config,
) -> bool {
    let mut parts = input.splitn(2, ' ');
    let verb = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match verb {
        "help" | "h" | "?" => print_help(),
        "quit" | "exit" | "q" => return false,
        "connect" => {
            let fields: Vec<&str> = args.split_whitespace().collect();
            match fields.as_slice() {
                [host, port, username, password] => match port.parse::<u16>() {
                    Ok(port) => {
                        let conn = ConnectionConfig {
                            host: host.to_string(),
                            port,
                            username: username.to_string(),
                            password: password.to_string(),
                        };
                        if let Some(c) = try_connect(conn).await {
                            *client = Some(c);
                            view.clear();
                        }
                    }
                    Err(_) => println!("Port must be a number."),
                },
                _ => println!("Usage: :connect <host> <port> <user> <pass>"),
            }
        }
        "disconnect" => {
            *client = None;
            view.clear();
            println!("Disconnected.");
        }
        "status" | "info" => {
            if let Some(c) = online(client) {
                match dashboard::fetch_status(c).await {
                    Ok(status) => print_status(&status),
                    Err(message) => println!("{}", message),
                }
            }
        }
        "players" | "refresh" => {
            if let Some(c) = online(client) {
                match players::refresh_roster(c, view).await {
                    Ok((kept, skipped)) => {
                        if skipped > 0 {
                            println!("{} players online ({} lines skipped).", kept, skipped);
                        } else {
                            println!("{} players online.", kept);
                        }
                        print_roster(view);
                    }
                    Err(message) => println!("{}", message),
                }
            }
        }
        "search" => {
            view.set_search(args);
            print_roster(view);
        }
        "filter" => match TypeFilter::from_arg(args) {
            Some(filter) => {
                view.set_type_filter(filter);
                print_roster(view);
            }
            None => println!("Usage: :filter <all|real|bots|gm>"),
        },
        "map" => {
            if args.is_empty() || args.eq_ignore_ascii_case("off") {
                view.set_map_filter(None);
                print_roster(view);
            } else {
                match args.parse::<i64>() {
                    Ok(id) => {
                        view.set_map_filter(Some(id));
                        print_roster(view);
                    }
                    Err(_) => println!("Usage: :map <id|off>, ids from :maps"),
                }
            }
        }
        "sort" => match SortColumn::from_arg(args) {
            Some(column) => {
                view.set_sort(column);
                print_roster(view);
            }
            None => println!("Usage: :sort <name|level|race|class|map|zone|account>"),
        },
        "page" => {
            match args {
                "next" => view.next_page(),
                "prev" => view.prev_page(),
                "first" => view.first_page(),
                "last" => view.last_page(),
                _ => match args.parse::<usize>() {
                    Ok(n) => view.set_page(n),
                    Err(_) => {
                        println!("Usage: :page <n|next|prev|first|last>");
                        return true;
                    }
                },
            }
            print_roster(view);
        }
        "pagesize" => match args.parse::<usize>() {
            Ok(n) => {
                view.set_page_size(n);
                print_roster(view);
            }
            Err(_) => println!("Usage: :pagesize <n>, 0 turns paging off"),
        },
        "pinfo" | "detail" => {
            if args.is_empty() {
                println!("Usage: :pinfo <character>");
            } else if let Some(c) = online(client) {
                match players::fetch_detail(c, view, args).await {
                    Ok(lines) => print_detail(&lines),
                    Err(message) => println!("{}", message),
                }
            }
        }
        "do" => run_action_line(client, args).await,
        "kick" | "mute" | "ban" => {
            let action = if verb == "ban" { "ban account" } else { verb };
            run_action_line(client, &format!("{} {}", action, args)).await;
        }
        "actions" => {
            for spec in COMMAND_GRAMMAR {
                println!("  {}", spec.action);
            }
        }
        "stats" => {
            let stats = view.stats();
            println!(
                "{} online: {} real, {} bots, {} accounts.",
                stats.total, stats.real, stats.bots, stats.accounts
            );
        }
        "maps" => {
            let options = view.map_options();
            if options.is_empty() {
                println!("No roster loaded. Run :players first.");
            }
            for (id, name) in options {
                println!("{:>5}  {}", id, name);
            }
        }
        "profiles" => print_profiles(profiles),
        "profile" => profile_verb(args, client, view, profiles, config).await,
        _ => println!("Unknown command :{}. Type :help.", verb),
    }
    true
}

async fn run_action_line(client: &Option<ConsoleClient>, line: &str) {
    let c = match online(client) {
        Some(c) => c,
        None => return,
    };
    match split_action_line(line) {
        Some((action, target, extra)) => {
            print_result(&players::run_action(c, &action, &target, &extra).await)
        }
        None => println!("Usage: :do <action> <target> [extra], actions from :actions"),
    }
}

async fn profile_verb(
    args: &str,
    client: &mut Option<ConsoleClient>,
    view: &mut RosterView,
    profiles: &ProfileStore,
    config: &Config,
) {
    let mut parts = args.splitn(2, ' ');
    let sub = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match sub {
        "save" => {
            // Saves the live connection when there is one, else the env config.
            let conn = match client.as_ref() {
                Some(c) => c.config().clone(),
                None => config.connection(),
            };
            let profile = profiles.add(ProfileFields {
                name: if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                },
                host: Some(conn.host),
                port: Some(conn.port),
                username: Some(conn.username),
                password: Some(conn.password),
            });
            println!("Saved profile '{}' ({}).", profile.name, short_id(&profile.id));
        }
        "use" => {
            if rest.is_empty() {
                println!("Usage: :profile use <id|name>");
                return;
            }
            match find_profile(profiles, rest) {
                Some(p) => {
                    let conn = ConnectionConfig {
                        host: p.host.clone(),
                        port: p.port,
                        username: p.username.clone(),
                        password: p.password.clone(),
                    };
                    if let Some(c) = try_connect(conn).await {
                        profiles.set_active(&p.id);
                        *client = Some(c);
                        view.clear();
                    }
                }
                None => println!("No profile matches '{}'.", rest),
            }
        }
        "rename" => {
            let mut halves = rest.splitn(2, ' ');
            let key = halves.next().unwrap_or("");
            let name = halves.next().unwrap_or("").trim();
            if key.is_empty() || name.is_empty() {
                println!("Usage: :profile rename <id|name> <new name>");
                return;
            }
            match find_profile(profiles, key) {
                Some(p) => {
                    let fields = ProfileFields {
                        name: Some(name.to_string()),
                        ..ProfileFields::default()
                    };
                    if let Some(updated) = profiles.update(&p.id, fields) {
                        println!("Profile renamed to '{}'.", updated.name);
                    }
                }
                None => println!("No profile matches '{}'.", key),
            }
        }
        "del" | "delete" => {
            if rest.is_empty() {
                println!("Usage: :profile del <id|name>");
                return;
            }
            match find_profile(profiles, rest) {
                Some(p) => {
                    profiles.delete(&p.id);
                    println!("Deleted profile '{}'.", p.name);
                }
                None => println!("No profile matches '{}'.", rest),
            }
        }
        _ => println!(
            "Usage: :profile save [name] | use <id|name> | rename <id|name> <name> | del <id|name>"
        ),
    }
}

/// Resolves a profile by full id, exact name, or unique id prefix.
fn find_profile(profiles: &ProfileStore, key: &str) -> Option<Profile> {
    if let Some(p) = profiles.get(key) {
        return Some(p);
    }
    let list = profiles.list();
    if let Some(p) = list.iter().find(|p| p.name == key) {
        return Some(p.clone());
    }
    let mut matches = list.iter().filter(|p| p.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(p), None) => Some(p.clone()),
        _ => None,
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn print_profiles(profiles: &ProfileStore) {
    let list = profiles.list();
    if list.is_empty() {
        println!("No saved profiles. :profile save <name> stores the current connection.");
        return;
    }
    let active = profiles.active_profile_id();
    for p in &list {
        let marker = if active.as_deref() == Some(p.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{} {}  {}  {}:{} ({})",
            marker,
            short_id(&p.id),
            pad(&p.name, 20),
            p.host,
            p.port,
            p.username
        );
    }
}

fn print_result(result: &CommandResult) {
    if result.message.is_empty() {
        println!("(no output)");
    } else {
        println!("{}", result.message);
    }
}

fn print_status(status: &ServerStatus) {
    let info = &status.info;
    if !info.version_line.is_empty() {
        println!("{}", info.version_line);
    }
    if let Some(n) = info.players_online {
        println!("Players online: {}", n);
    }
    if let Some(n) = info.characters_in_world {
        println!("Characters in world: {}", n);
    }
    if let Some(n) = info.connection_peak {
        println!("Connection peak: {}", n);
    }
    for line in &info.extra_lines {
        println!("{}", line);
    }
    if !status.uptime.is_empty() {
        println!("Uptime: {}", status.uptime);
    }
    if !status.motd.is_empty() {
        println!("MOTD: {}", status.motd);
    }
}

fn print_roster(view: &RosterView) {
    let records = view.page_records();
    if records.is_empty() {
        println!("No players match.");
    } else {
        println!(
            "{}  {}  {}  {}  {}  {}  {}  IP",
            pad("Name", 26),
            pad("Lv", 4),
            pad("Race", 10),
            pad("Class", 10),
            pad("Map", 18),
            pad("Zone", 20),
            pad("Account", 14),
        );
        for r in records {
            let mut name = r.name.clone();
            if view.rules().is_gm(r.gm_level) {
                name.push_str(&format!(" [GM{}]", r.gm_level));
            }
            if r.is_bot {
                name.push_str(" [BOT]");
            }
            println!(
                "{}  {}  {}  {}  {}  {}  {}  {}",
                pad(&name, 26),
                pad(&r.level, 4),
                pad(&r.race, 10),
                pad(&r.class_name, 10),
                pad(&r.map_name, 18),
                pad(&r.zone_name, 20),
                pad(&r.account, 14),
                r.ip
            );
        }
    }
    println!(
        "Page {} of {}, {} of {} players.{}",
        view.page(),
        view.page_count(),
        view.filtered_count(),
        view.total(),
        active_filters(view)
    );
}

fn active_filters(view: &RosterView) -> String {
    let state = view.state();
    let mut parts: Vec<String> = Vec::new();
    if !state.search_text.is_empty() {
        parts.push(format!("search \"{}\"", state.search_text));
    }
    if state.type_filter != TypeFilter::All {
        parts.push(format!("type {}", type_label(state.type_filter)));
    }
    if let Some(id) = state.map_filter {
        parts.push(format!("map {}", lookup::map_name(id)));
    }
    if state.sort_column != SortColumn::Name || !state.sort_ascending {
        parts.push(format!(
            "sort {} {}",
            sort_label(state.sort_column),
            if state.sort_ascending { "asc" } else { "desc" }
        ));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(", "))
    }
}

fn type_label(filter: TypeFilter) -> &'static str {
    match filter {
        TypeFilter::All => "all",
        TypeFilter::Real => "real",
        TypeFilter::Bots => "bots",
        TypeFilter::Gm => "gm",
    }
}

fn sort_label(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Name => "name",
        SortColumn::Level => "level",
        SortColumn::Race => "race",
        SortColumn::Class => "class",
        SortColumn::Map => "map",
        SortColumn::Zone => "zone",
        SortColumn::Account => "account",
    }
}

fn print_detail(lines: &[DetailLine]) {
    if lines.is_empty() {
        println!("(no output)");
        return;
    }
    for line in lines {
        match line {
            DetailLine::Field { label, value } => println!("{:>16}: {}", label, value),
            DetailLine::Text(text) => println!("{}", text),
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let cell: String = text.chars().take(width).collect();
    format!("{:<width$}", cell)
}

fn print_help() {
    println!("Local commands:");
    println!("  :connect <host> <port> <user> <pass>  open a console session");
    println!("  :profile use <id|name>                connect with a saved profile");
    println!("  :disconnect                           drop the session and cached roster");
    println!("  :status                               version, counters, uptime, MOTD");
    println!("  :players                              refresh the online roster");
    println!("  :search [text]                        substring filter, empty clears");
    println!("  :filter <all|real|bots|gm>            account class filter");
    println!("  :map <id|off>                         map filter, ids from :maps");
    println!("  :sort <name|level|race|class|map|zone|account>  repeat to flip order");
    println!("  :page <n|next|prev|first|last>");
    println!("  :pagesize <n>                         0 shows everything");
    println!("  :pinfo <character>                    character details");
    println!("  :do <action> <target> [extra]         admin action, see :actions");
    println!("  :kick/:mute/:ban <character> [extra]  common action shortcuts");
    println!("  :stats                                roster totals");
    println!("  :maps                                 map ids in the current roster");
    println!("  :profiles                             saved connections");
    println!("  :profile save [name] | rename <id|name> <name> | del <id|name>");
    println!("  :quit");
    println!("Anything without a leading ':' is sent to the server as-is.");
}
