//! Feature assignability resolution.
//!
//! A feature is assignable when its own global flag is not explicitly off and
//! every feature it depends on exists in the catalog with its own global flag
//! not explicitly off. The dependency check is a single hop: a dependency that
//! is itself blocked by a further dependency still counts as met as long as
//! its direct flag holds. Persisted plans rely on this, so it must not become
//! a transitive closure.

use serde::Serialize;

use crate::models::{CatalogSnapshot, PlatformFeature};

/// Why a feature is not assignable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BlockReason {
    /// The feature's own flag is explicitly `false`.
    #[serde(rename_all = "camelCase")]
    GloballyDisabled { config_key: String },
    /// A dependency is missing/inactive or its own flag is explicitly `false`.
    DependencyUnmet { dependency: String },
}

/// A catalog feature excluded from the editor, with the first failing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedFeature {
    pub feature_id: String,
    #[serde(flatten)]
    pub reason: BlockReason,
}

/// Assignable features plus the blocked remainder.
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    pub assignable: Vec<&'a PlatformFeature>,
    pub blocked: Vec<BlockedFeature>,
}

/// Returns the reason `feature` is blocked, or `None` when it is assignable.
pub fn block_reason(snapshot: &CatalogSnapshot, feature: &PlatformFeature) -> Option<BlockReason> {
    let flags = snapshot.flags();

    if !flags.is_enabled(&feature.config_key) {
        return Some(BlockReason::GloballyDisabled {
            config_key: feature.config_key.clone(),
        });
    }

    feature
        .depends_on
        .iter()
        .find(|dependency| {
            snapshot
                .find(dependency)
                .map_or(true, |dep| !flags.is_enabled(&dep.config_key))
        })
        .map(|dependency| BlockReason::DependencyUnmet {
            dependency: dependency.clone(),
        })
}

pub fn is_assignable(snapshot: &CatalogSnapshot, feature: &PlatformFeature) -> bool {
    block_reason(snapshot, feature).is_none()
}

/// Features currently assignable to a plan (unordered).
pub fn resolve_assignable(snapshot: &CatalogSnapshot) -> Vec<&PlatformFeature> {
    snapshot
        .features()
        .iter()
        .filter(|feature| is_assignable(snapshot, feature))
        .collect()
}

/// Splits the catalog into assignable and blocked features.
pub fn resolve(snapshot: &CatalogSnapshot) -> Resolution<'_> {
    let mut resolution = Resolution::default();

    for feature in snapshot.features() {
        match block_reason(snapshot, feature) {
            None => resolution.assignable.push(feature),
            Some(reason) => resolution.blocked.push(BlockedFeature {
                feature_id: feature.feature_id.clone(),
                reason,
            }),
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanValueType, PlatformFeatureRecord, SystemConfig};
    use std::collections::HashSet;

    fn feature(id: &str, config_key: &str, depends_on: &[&str]) -> PlatformFeature {
        PlatformFeatureRecord::new(id, config_key, PlanValueType::Boolean)
            .with_plan_key(id)
            .depends_on(depends_on.iter().copied())
            .into()
    }

    fn snapshot(features: Vec<PlatformFeature>, flags: &[(&str, bool)]) -> CatalogSnapshot {
        CatalogSnapshot::new(features, SystemConfig::from_flags(flags.iter().copied()))
    }

    fn ids(features: &[&PlatformFeature]) -> HashSet<String> {
        features.iter().map(|f| f.feature_id.clone()).collect()
    }

    #[test]
    fn test_feature_without_dependencies_follows_own_flag() {
        let catalog = snapshot(
            vec![feature("on", "c_on", &[]), feature("off", "c_off", &[]), feature("unset", "c_unset", &[])],
            &[("c_on", true), ("c_off", false)],
        );

        let assignable = ids(&resolve_assignable(&catalog));
        assert!(assignable.contains("on"));
        assert!(assignable.contains("unset"));
        assert!(!assignable.contains("off"));
    }

    #[test]
    fn test_disabled_flag_excludes_regardless_of_dependencies() {
        let catalog = snapshot(
            vec![feature("base", "c_base", &[]), feature("f1", "c1", &["base"])],
            &[("c1", false)],
        );

        assert_eq!(ids(&resolve_assignable(&catalog)), HashSet::from(["base".to_string()]));
        assert_eq!(
            block_reason(&catalog, catalog.find("f1").unwrap()),
            Some(BlockReason::GloballyDisabled {
                config_key: "c1".to_string()
            })
        );
    }

    #[test]
    fn test_dependency_flag_off_blocks_dependent() {
        let catalog = snapshot(
            vec![feature("messaging", "c_msg", &[]), feature("whatsapp", "c_wa", &["messaging"])],
            &[("c_msg", false), ("c_wa", true)],
        );

        assert!(resolve_assignable(&catalog).is_empty());
        assert_eq!(
            block_reason(&catalog, catalog.find("whatsapp").unwrap()),
            Some(BlockReason::DependencyUnmet {
                dependency: "messaging".to_string()
            })
        );
    }

    #[test]
    fn test_missing_dependency_fails_closed() {
        let catalog = snapshot(vec![feature("f1", "c1", &["ghost"])], &[]);
        assert!(resolve_assignable(&catalog).is_empty());
    }

    #[test]
    fn test_dependency_check_is_single_hop() {
        // A -> B -> C with C's flag off: B is blocked by C, but A only checks
        // B's direct flag and stays assignable.
        let catalog = snapshot(
            vec![
                feature("A", "cA", &["B"]),
                feature("B", "cB", &["C"]),
                feature("C", "cC", &[]),
            ],
            &[("cA", true), ("cB", true), ("cC", false)],
        );

        let assignable = ids(&resolve_assignable(&catalog));
        assert!(assignable.contains("A"));
        assert!(!assignable.contains("B"));
        assert!(!assignable.contains("C"));
    }

    #[test]
    fn test_chain_with_middle_flag_off() {
        let catalog = snapshot(
            vec![
                feature("A", "cA", &["B"]),
                feature("B", "cB", &["C"]),
                feature("C", "cC", &[]),
            ],
            &[("cB", false)],
        );

        let assignable = ids(&resolve_assignable(&catalog));
        assert_eq!(assignable, HashSet::from(["C".to_string()]));
    }

    #[test]
    fn test_cycles_evaluate_independently() {
        let catalog = snapshot(
            vec![feature("x", "cx", &["y"]), feature("y", "cy", &["x"])],
            &[("cx", true), ("cy", true)],
        );
        assert_eq!(resolve_assignable(&catalog).len(), 2);

        let catalog = snapshot(
            vec![feature("x", "cx", &["y"]), feature("y", "cy", &["x"])],
            &[("cx", false)],
        );
        // x is off; y depends on x whose flag is off.
        assert!(resolve_assignable(&catalog).is_empty());
    }

    #[test]
    fn test_resolve_partitions_catalog() {
        let catalog = snapshot(
            vec![
                feature("a", "ca", &[]),
                feature("b", "cb", &[]),
                feature("c", "cc", &["missing"]),
            ],
            &[("cb", false)],
        );

        let resolution = resolve(&catalog);
        assert_eq!(ids(&resolution.assignable), HashSet::from(["a".to_string()]));
        assert_eq!(resolution.blocked.len(), 2);
        assert!(resolution
            .blocked
            .iter()
            .any(|b| b.feature_id == "c" && matches!(b.reason, BlockReason::DependencyUnmet { .. })));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CatalogSnapshot::unavailable();
        assert!(resolve_assignable(&catalog).is_empty());
        assert!(resolve(&catalog).blocked.is_empty());
    }

    #[test]
    fn test_blocked_feature_serialization() {
        let blocked = BlockedFeature {
            feature_id: "whatsapp".to_string(),
            reason: BlockReason::DependencyUnmet {
                dependency: "messaging".to_string(),
            },
        };
        let json = serde_json::to_value(&blocked).unwrap();
        assert_eq!(json["featureId"], "whatsapp");
        assert_eq!(json["reason"], "dependency_unmet");
        assert_eq!(json["dependency"], "messaging");
    }
}
