use std::env;

// Connection values for one worldserver SOAP endpoint. Snapshotted when a
// client is built; changing config never touches a live client.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            username: String::new(),
            password: String::new(),
        }
    }
}

// Classification rules applied while parsing the roster. Bot naming differs
// between cores, so the account prefix is configurable.
#[derive(Debug, Clone)]
pub struct RosterRules {
    pub bot_prefix: String,
    pub gm_level_min: i64,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            bot_prefix: "RNDBOT".to_string(),
            gm_level_min: 1,
        }
    }
}

impl RosterRules {
    pub fn is_bot_account(&self, account: &str) -> bool {
        account
            .get(..self.bot_prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(&self.bot_prefix))
    }

    pub fn is_gm(&self, gm_level: i64) -> bool {
        gm_level >= self.gm_level_min
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Default connection
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,

    // Roster classification
    pub bot_prefix: String,
    pub gm_level_min: i64,

    // Profile persistence
    pub profiles_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            username: String::new(),
            password: String::new(),
            bot_prefix: "RNDBOT".to_string(),
            gm_level_min: 1,
            profiles_path: "worldctl-profiles.json".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("WORLDCTL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("WORLDCTL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7878),

            username: env::var("WORLDCTL_USERNAME").unwrap_or_default(),

            password: env::var("WORLDCTL_PASSWORD").unwrap_or_default(),

            bot_prefix: env::var("WORLDCTL_BOT_PREFIX")
                .unwrap_or_else(|_| "RNDBOT".to_string()),

            gm_level_min: env::var("WORLDCTL_GM_LEVEL_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),

            profiles_path: env::var("WORLDCTL_PROFILES")
                .unwrap_or_else(|_| "worldctl-profiles.json".to_string()),
        }
    }

    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn roster_rules(&self) -> RosterRules {
        RosterRules {
            bot_prefix: self.bot_prefix.clone(),
            gm_level_min: self.gm_level_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_connection_values() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7878);
        assert!(config.username.is_empty());
    }

    #[test]
    fn test_bot_prefix_is_case_insensitive() {
        let rules = RosterRules::default();
        assert!(rules.is_bot_account("RNDBOT0001"));
        assert!(rules.is_bot_account("rndbot42"));
        assert!(rules.is_bot_account("RndBot"));
        assert!(!rules.is_bot_account("acct1"));
        assert!(!rules.is_bot_account("RND"));
    }

    #[test]
    fn test_custom_bot_prefix() {
        let rules = RosterRules {
            bot_prefix: "AI_".to_string(),
            gm_level_min: 1,
        };
        assert!(rules.is_bot_account("ai_077"));
        assert!(!rules.is_bot_account("RNDBOT0001"));
    }

    #[test]
    fn test_gm_threshold() {
        let rules = RosterRules::default();
        assert!(!rules.is_gm(0));
        assert!(rules.is_gm(1));
        assert!(rules.is_gm(3));

        let strict = RosterRules {
            bot_prefix: "RNDBOT".to_string(),
            gm_level_min: 2,
        };
        assert!(!strict.is_gm(1));
        assert!(strict.is_gm(2));
    }
}
