// src/soap/mod.rs
pub mod client;
pub mod envelope;

use std::fmt;

// Everything that can go wrong between "send command" and "usable reply
// text". Display strings double as the user-facing failure messages, so
// they stay stable.
#[derive(Debug)]
pub enum SoapError {
    AuthenticationFailed,
    Transport(String),
    Timeout,
    Fault(String),
    UnexpectedResponse(String),
    Decode { raw: String, cause: String },
}

impl fmt::Display for SoapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticationFailed => write!(
                f,
                "Authentication failed - check username/password and SOAP security level."
            ),
            Self::Transport(cause) => write!(f, "Connection failed: {}", cause),
            Self::Timeout => write!(
                f,
                "Connection timed out - is the worldserver running with SOAP enabled?"
            ),
            Self::Fault(faultstring) => write!(f, "{}", faultstring),
            Self::UnexpectedResponse(raw) => write!(f, "Unexpected response:\n{}", raw),
            Self::Decode { raw, cause } => write!(
                f,
                "Failed to parse SOAP response:\n{}\n\nError: {}",
                raw, cause
            ),
        }
    }
}
