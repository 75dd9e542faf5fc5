// src/models/player.rs
use serde::{Deserialize, Serialize};

/// One online player as reported by `account onlinelist`, plus the display
/// names derived from the id tables and the fields a later `pinfo` call can
/// fill in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub account: String,
    pub name: String,
    pub ip: String,
    pub map_id: i64,
    pub zone_id: i64,
    pub expansion_id: i64,
    pub gm_level: i64,
    pub is_bot: bool,
    pub map_name: String,
    pub zone_name: String,
    // Enrichment fields, empty/zero until a pinfo reply supplies them.
    pub level: String,
    pub race: String,
    pub class_name: String,
    pub race_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceClass {
    pub race: String,
    pub class_name: String,
    pub race_id: i64,
    pub class_id: i64,
}

/// What a `pinfo` reply contributed. Absent parts leave the record alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentPatch {
    pub level: Option<String>,
    pub race_class: Option<RaceClass>,
}

/// Copies `base` and overwrites only the enrichment fields present in
/// `patch`. Identity fields never change here.
pub fn merge_enrichment(base: &PlayerRecord, patch: &EnrichmentPatch) -> PlayerRecord {
    let mut merged = base.clone();
    if let Some(level) = &patch.level {
        merged.level = level.clone();
    }
    if let Some(rc) = &patch.race_class {
        merged.race = rc.race.clone();
        merged.class_name = rc.class_name.clone();
        merged.race_id = rc.race_id;
        merged.class_id = rc.class_id;
    }
    merged
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterStats {
    pub total: usize,
    pub real: usize,
    pub bots: usize,
    pub accounts: usize,
}
