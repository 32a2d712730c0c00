// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! The endpoint comes from `PULSE_SOCKET_URL` with a local fallback. Retry
//! tuning can optionally be read from a TOML file:
//!
//! ```toml
//! url = "wss://realtime.example.com"
//! max_attempts = 5
//! base_delay_ms = 1000
//! ```
//!
//! When both are present the environment wins for `url`. An `http://` or
//! `https://` endpoint is accepted and rewritten to `ws://` or `wss://`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use pulse_core::BackoffPolicy;

use crate::env;
use crate::error::{ClientError, Result};

/// Connection settings for the realtime client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket endpoint.
    #[serde(default = "default_url")]
    pub url: String,
    /// Reconnect attempts before giving up (default: 5).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first reconnect attempt in milliseconds (default: 1000).
    /// Each further attempt doubles it.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_url() -> String {
    env::DEFAULT_SOCKET_URL.to_string()
}

fn default_max_attempts() -> u32 {
    BackoffPolicy::DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    BackoffPolicy::DEFAULT_BASE_DELAY.as_millis() as u64
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: default_url(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Default settings with the endpoint resolved from the environment.
    pub fn from_env() -> Self {
        ClientConfig {
            url: env::socket_url_or_default(),
            ..ClientConfig::default()
        }
        .normalized()
    }

    /// Parses settings from TOML, filling unset fields with defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = toml::from_str::<ClientConfig>(content)?.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Loads settings from a TOML file, then applies the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?.with_url_override(env::socket_url());
        config.validate()?;
        Ok(config)
    }

    /// Replaces the endpoint if an override is given.
    pub fn with_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        self.normalized()
    }

    /// Trims the endpoint and maps HTTP schemes onto their WebSocket pair.
    pub fn normalized(mut self) -> Self {
        let url = self.url.trim();
        self.url = if let Some(rest) = url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else if let Some(rest) = url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else {
            url.to_string()
        };
        self
    }

    /// Rejects settings the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ClientError::Config("url must not be empty".to_string()));
        }
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(ClientError::Config(format!(
                "url must use ws:// or wss://, got '{}'",
                self.url
            )));
        }
        self.backoff().validate()?;
        Ok(())
    }

    /// The backoff schedule described by these settings.
    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy::new(Duration::from_millis(self.base_delay_ms), self.max_attempts)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
