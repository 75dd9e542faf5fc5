// src/models/info.rs
use serde::{Deserialize, Serialize};

/// Fields pulled out of a `server info` reply. Counters the server did not
/// report stay `None`; lines that matched nothing are kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfoFields {
    pub version_line: String,
    pub players_online: Option<i64>,
    pub characters_in_world: Option<i64>,
    pub connection_peak: Option<i64>,
    pub extra_lines: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    pub info: ServerInfoFields,
    pub uptime: String,
    pub motd: String,
}
