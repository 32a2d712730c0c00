// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the pulse client.
///
/// Connection trouble is normally absorbed by the reconnect state machine;
/// these errors surface only from setup paths such as loading configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Core(#[from] pulse_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}\n  hint: see ClientConfig for accepted values")]
    Config(String),
}

/// A specialized Result type for pulse client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
