use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Build outcome for one package in one chroot.
///
/// Matches the wire strings used by build-service monitor dumps
/// (`succeeded`, `failed`, `missing`, `running`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    Succeeded,
    Failed,
    Missing,
    Running,
}

/// Per-chroot build record for a package.
///
/// rebuildstat tries hard to be *tolerant* when reading snapshots:
/// - Unknown fields are ignored.
/// - Optional fields may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChrootRecord {
    pub state: BuildState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_build_log: Option<String>,
}

impl ChrootRecord {
    /// A placeholder record for a chroot the counterpart never built in.
    pub fn missing() -> Self {
        Self {
            state: BuildState::Missing,
            build_id: None,
            url_build_log: None,
        }
    }
}

/// One package's build records for a single generation.
///
/// `chroots` keys are chroot ids (`fedora-38-x86_64`); BTreeMap keeps them
/// unique and the iteration order deterministic. Combined state is always
/// recomputed from `chroots`, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,

    #[serde(default)]
    pub chroots: BTreeMap<String, ChrootRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_build_id: Option<u64>,

    /// Name-version-release of the latest build, when the source knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nvr: Option<String>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chroots: BTreeMap::new(),
            latest_build_id: None,
            nvr: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_state_uses_snake_case_wire_strings() {
        let json = serde_json::to_string(&BuildState::Succeeded).expect("serialize");
        assert_eq!(json, "\"succeeded\"");

        let state: BuildState = serde_json::from_str("\"running\"").expect("deserialize");
        assert_eq!(state, BuildState::Running);
    }

    #[test]
    fn chroot_record_tolerates_absent_optionals() {
        let record: ChrootRecord =
            serde_json::from_str(r#"{ "state": "failed" }"#).expect("deserialize");
        assert_eq!(record.state, BuildState::Failed);
        assert!(record.build_id.is_none());
        assert!(record.url_build_log.is_none());
    }

    #[test]
    fn package_record_defaults_chroots_to_empty() {
        let pkg: PackageRecord = serde_json::from_str(r#"{ "name": "bash" }"#).expect("deserialize");
        assert_eq!(pkg.name, "bash");
        assert!(pkg.chroots.is_empty());
    }
}
