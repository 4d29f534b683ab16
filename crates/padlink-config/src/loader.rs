// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./padlink.toml` > `~/.config/padlink/padlink.toml` > `/etc/padlink/padlink.toml`
//! with environment variable overrides via `PADLINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PadlinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/padlink/padlink.toml`
/// 3. `~/.config/padlink/padlink.toml`
/// 4. `./padlink.toml`
/// 5. `PADLINK_*` environment variables
pub fn load_config() -> Result<PadlinkConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PadlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PadlinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PadlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PadlinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PadlinkConfig::default()))
        .merge(Toml::file("/etc/padlink/padlink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("padlink/padlink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("padlink.toml"))
        .merge(env_provider())
}

/// Top-level config sections that env keys can address.
const SECTIONS: &[&str] = &["app", "storage", "paypal", "subscription"];

/// Environment provider mapping `PADLINK_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `PADLINK_PAYPAL_CLIENT_SECRET` must map to
/// `paypal.client_secret`, not `paypal.client.secret`. Figment hands the
/// key over in its original case, so it is lowercased first.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("PADLINK_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(key)
}
