//! Global system configuration flags gating the feature catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of the platform-wide enablement flags.
///
/// Loaded once per editing session from the single system configuration
/// document. A key that is absent counts as enabled; only an explicit
/// `false` turns a feature off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
}

impl SystemConfig {
    pub fn from_flags<I, K>(flags: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            features: flags.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Builds a snapshot from a raw JSON `features` sub-document.
    ///
    /// Non-boolean entries carry no explicit `false` and are skipped.
    pub fn from_json_flags(flags: &serde_json::Value) -> Self {
        let features = flags
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(key, value)| value.as_bool().map(|b| (key.clone(), b)))
                    .collect()
            })
            .unwrap_or_default();
        Self { features }
    }

    /// Whether `config_key` is globally enabled (permissive by absence).
    pub fn is_enabled(&self, config_key: &str) -> bool {
        self.features.get(config_key) != Some(&false)
    }
}
