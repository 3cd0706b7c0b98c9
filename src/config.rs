// src/config.rs
use std::{fmt, net::SocketAddr};

use anyhow::{anyhow, Context};

pub const SECRET_VAR: &str = "GITHUB_WEBHOOK_SECRET";
pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";
pub const MAX_BODY_BYTES_VAR: &str = "WEBHOOK_MAX_BODY_BYTES";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// GitHub caps webhook payloads at 25 MB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Shared secret used to key the delivery MAC. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Returns `None` for an empty value, which counts as unset.
    pub fn new(raw: impl Into<Vec<u8>>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Process configuration, read once at startup and injected into the receiver.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret: Option<Secret>,
    pub listen_addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup so tests never
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_VAR).and_then(Secret::new);

        let listen_addr = lookup(LISTEN_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {LISTEN_ADDR_VAR}"))?;

        let max_body_bytes = match lookup(MAX_BODY_BYTES_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid {MAX_BODY_BYTES_VAR}: {raw:?}"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        if max_body_bytes == 0 {
            return Err(anyhow!("{MAX_BODY_BYTES_VAR} must be greater than zero"));
        }

        Ok(Self {
            secret,
            listen_addr,
            max_body_bytes,
        })
    }
}
