// src/soap/client.rs
use std::time::Duration;

use log::{debug, error};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;

use super::{envelope, SoapError};
use crate::config::ConnectionConfig;
use crate::models::command::CommandResult;

pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);
pub const TEST_COMMAND: &str = "server info";

/// Client for the worldserver SOAP console. Holds no connection state; every
/// command is its own POST so a restarted worldserver never leaves a stale
/// pooled socket behind.
pub struct ConsoleClient {
    config: ConnectionConfig,
    timeout: Duration,
}

impl ConsoleClient {
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_timeout(config, COMMAND_TIMEOUT)
    }

    pub fn with_timeout(config: ConnectionConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Runs one console command and folds every failure mode into a
    /// `CommandResult` with a printable message.
    pub async fn execute_command(&self, command: &str) -> CommandResult {
        if command.trim().is_empty() {
            return CommandResult::fail("Cannot execute an empty command.");
        }
        match self.round_trip(command).await {
            Ok(message) => CommandResult::ok(message),
            Err(err) => {
                error!("Command '{}' failed: {}", command, err);
                CommandResult::fail(err.to_string())
            }
        }
    }

    /// Probe used after connecting; `server info` is harmless and proves
    /// both credentials and console access in one round trip.
    pub async fn test_connection(&self) -> CommandResult {
        self.execute_command(TEST_COMMAND).await
    }

    async fn round_trip(&self, command: &str) -> Result<String, SoapError> {
        let body = envelope::build_envelope(command);
        let url = format!("http://{}:{}/", self.config.host, self.config.port);
        debug!("POST {} ({} byte envelope)", url, body.len());

        let response = reqwest::Client::new()
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(CONTENT_TYPE, "application/xml")
            .header(CONTENT_LENGTH, body.len())
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(SoapError::AuthenticationFailed);
        }

        // Faults usually arrive with a 500 status, so the body is decoded
        // for every remaining status code.
        let raw = response
            .text()
            .await
            .map_err(classify_transport_error)?;
        debug!("Response body: {} bytes", raw.len());

        envelope::decode_response(&raw)
    }
}

fn classify_transport_error(err: reqwest::Error) -> SoapError {
    if err.is_timeout() {
        SoapError::Timeout
    } else {
        SoapError::Transport(err.to_string())
    }
}
