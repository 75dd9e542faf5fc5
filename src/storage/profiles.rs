// src/storage/profiles.rs
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One saved connection, password included. The file lives on the admin's
/// own machine; anyone who can read it can read the worldserver config too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Partial profile input; absent fields keep their current (or default)
/// value.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

// On-disk shape. The field names are part of the file format; renaming them
// would orphan existing profile files.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileData {
    profiles: Vec<Profile>,
    #[serde(rename = "activeProfileId")]
    active_profile_id: Option<String>,
}

/// JSON-file-backed profile store. Every mutation rewrites the whole file;
/// profile counts are tiny and a full rewrite can never leave a partially
/// merged document behind.
pub struct ProfileStore {
    path: PathBuf,
    data: Mutex<ProfileData>,
}

impl ProfileStore {
    /// Opens the store, treating a missing or unreadable file as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(data) => data,
                Err(err) => {
                    warn!("Ignoring unreadable profile file {}: {}", path.display(), err);
                    ProfileData::default()
                }
            },
            Err(_) => ProfileData::default(),
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn list(&self) -> Vec<Profile> {
        self.data.lock().profiles.clone()
    }

    pub fn get(&self, id: &str) -> Option<Profile> {
        self.data.lock().profiles.iter().find(|p| p.id == id).cloned()
    }

    pub fn active_profile_id(&self) -> Option<String> {
        self.data.lock().active_profile_id.clone()
    }

    pub fn add(&self, fields: ProfileFields) -> Profile {
        let host = fields.host.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = fields.port.unwrap_or(7878);
        let name = fields.name.unwrap_or_else(|| format!("{}:{}", host, port));
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            name,
            host,
            port,
            username: fields.username.unwrap_or_default(),
            password: fields.password.unwrap_or_default(),
        };
        let mut data = self.data.lock();
        data.profiles.push(profile.clone());
        self.save(&data);
        profile
    }

    /// Updates only the provided fields. Returns the updated profile, or
    /// `None` when the id is unknown.
    pub fn update(&self, id: &str, fields: ProfileFields) -> Option<Profile> {
        let mut data = self.data.lock();
        let profile = data.profiles.iter_mut().find(|p| p.id == id)?;
        if let Some(name) = fields.name {
            profile.name = name;
        }
        if let Some(host) = fields.host {
            profile.host = host;
        }
        if let Some(port) = fields.port {
            profile.port = port;
        }
        if let Some(username) = fields.username {
            profile.username = username;
        }
        if let Some(password) = fields.password {
            profile.password = password;
        }
        let updated = profile.clone();
        self.save(&data);
        Some(updated)
    }

    pub fn delete(&self, id: &str) {
        let mut data = self.data.lock();
        data.profiles.retain(|p| p.id != id);
        if data.active_profile_id.as_deref() == Some(id) {
            data.active_profile_id = None;
        }
        self.save(&data);
    }

    pub fn set_active(&self, id: &str) {
        let mut data = self.data.lock();
        data.active_profile_id = Some(id.to_string());
        self.save(&data);
    }

    fn save(&self, data: &ProfileData) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    error!("Failed to write profile file {}: {}", self.path.display(), err);
                }
            }
            Err(err) => error!("Failed to serialize profiles: {}", err),
        }
    }
}
