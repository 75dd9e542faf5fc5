// src/parsers/pinfo.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::lookup;
use crate::models::player::{EnrichmentPatch, RaceClass};

lazy_static! {
    // Tree-drawing prefixes some cores put in front of pinfo lines.
    static ref DECORATION: Regex = Regex::new(r"^[¦├─|]+\s*").unwrap();
    static ref LEVEL: Regex = Regex::new(r"(?i)Level:\s*(\d+)").unwrap();
    // Optional gender word, then the race up to the comma, then a single
    // word of class. Two-word classes lose their tail here on purpose; the
    // format has no reliable terminator to widen the capture safely.
    static ref RACE_CLASS: Regex =
        Regex::new(r"(?i)Race:\s*((?:Female|Male)\s+)?(.+?),\s+(\S+)").unwrap();
}

/// One display line of a `pinfo` reply: either a `Label: value` pair or
/// free text that had no usable colon.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLine {
    Field { label: String, value: String },
    Text(String),
}

/// Cleans up a `pinfo` reply for display. Lines may be separated by any run
/// of CR or LF. Decoration prefixes are stripped, blank lines dropped, and
/// a line splits into label/value only when the colon sits past the first
/// character but within the first 30 characters, which keeps IPs and
/// timestamps intact.
pub fn parse_detail(msg: &str) -> Vec<DetailLine> {
    let mut lines = Vec::new();

    for raw in msg.split(['\r', '\n']) {
        let stripped = DECORATION.replace(raw, "");
        let line = stripped.trim();
        if line.is_empty() {
            continue;
        }
        // The window is measured in characters; `find` still hands back a
        // byte offset that is safe to slice on.
        match line.find(':') {
            Some(idx) if idx > 0 && line[..idx].chars().count() < 30 => {
                lines.push(DetailLine::Field {
                    label: line[..idx].trim().to_string(),
                    value: line[idx + 1..].trim().to_string(),
                })
            }
            _ => lines.push(DetailLine::Text(line.to_string())),
        }
    }

    lines
}

/// Extracts the roster enrichment a `pinfo` reply can carry. Returns `None`
/// when neither the level nor the race line is present.
pub fn extract_enrichment(msg: &str) -> Option<EnrichmentPatch> {
    let level = LEVEL.captures(msg).map(|caps| caps[1].to_string());
    let race_class = RACE_CLASS.captures(msg).map(|caps| {
        let race = caps[2].trim().to_string();
        let class_name = caps[3].trim().to_string();
        RaceClass {
            race_id: lookup::race_id_for(&race),
            class_id: lookup::class_id_for(&class_name),
            race,
            class_name,
        }
    });

    if level.is_none() && race_class.is_none() {
        return None;
    }
    Some(EnrichmentPatch { level, race_class })
}
