// src/parsers/server_info.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::info::ServerInfoFields;

lazy_static! {
    static ref PLAYERS_ONLINE: Regex = Regex::new(r"(?i)Connected players:\s*(\d+)").unwrap();
    static ref CHARACTERS_IN_WORLD: Regex =
        Regex::new(r"(?i)Characters in world:\s*(\d+)").unwrap();
    static ref CONNECTION_PEAK: Regex = Regex::new(r"(?i)Connection peak:\s*(\d+)").unwrap();
}

fn counter(re: &Regex, msg: &str) -> Option<i64> {
    re.captures(msg)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_counter_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("connected players")
        || lower.contains("characters in world")
        || lower.contains("connection peak")
}

/// Pulls the known counters out of a `server info` reply. The first
/// non-empty line is taken as the version banner; unrecognized lines are
/// kept so nothing the server said gets silently dropped.
pub fn parse_server_info(msg: &str) -> ServerInfoFields {
    let lines: Vec<&str> = msg
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let version_line = lines.first().copied().unwrap_or("").to_string();
    let extra_lines = lines
        .iter()
        .skip(1)
        .filter(|l| !is_counter_line(l))
        .map(|l| l.to_string())
        .collect();

    ServerInfoFields {
        version_line,
        players_online: counter(&PLAYERS_ONLINE, msg),
        characters_in_world: counter(&CHARACTERS_IN_WORLD, msg),
        connection_peak: counter(&CONNECTION_PEAK, msg),
        extra_lines,
    }
}
