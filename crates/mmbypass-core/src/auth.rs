//! Client fingerprint block sent with every catalog request.
//!
//! The upstream checks this block against what its own web client sends, so
//! the built-in profile mirrors a desktop browser session. A replacement
//! profile can be loaded from YAML for testing alternate fingerprints.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Experiment flags of the web client, as `(experiment id, variant)` pairs.
const WEB_EXPERIMENTS: [(&str, &str); 64] = [
    ("8", "2"),
    ("55", "2"),
    ("58", "2"),
    ("68", "1"),
    ("69", "2"),
    ("79", "3"),
    ("99", "1"),
    ("107", "2"),
    ("109", "2"),
    ("119", "2"),
    ("120", "2"),
    ("121", "2"),
    ("122", "2"),
    ("132", "2"),
    ("144", "3"),
    ("154", "1"),
    ("173", "1"),
    ("182", "1"),
    ("184", "3"),
    ("186", "2"),
    ("190", "2"),
    ("192", "2"),
    ("194", "3"),
    ("200", "2"),
    ("205", "2"),
    ("209", "1"),
    ("218", "1"),
    ("243", "1"),
    ("249", "3"),
    ("645", "3"),
    ("646", "2"),
    ("775", "2"),
    ("777", "2"),
    ("778", "2"),
    ("790", "3"),
    ("792", "3"),
    ("793", "3"),
    ("805", "2"),
    ("808", "3"),
    ("818", "2"),
    ("826", "2"),
    ("828", "2"),
    ("837", "2"),
    ("842", "2"),
    ("844", "1"),
    ("845", "2"),
    ("852", "1"),
    ("889", "1"),
    ("893", "1"),
    ("897", "1"),
    ("899", "1"),
    ("903", "1"),
    ("945", "1"),
    ("958", "2"),
    ("962", "2"),
    ("1054", "2"),
    ("5779", "2"),
    ("20121", "1"),
    ("43568", "2"),
    ("67319", "2"),
    ("70070", "2"),
    ("80283", "1"),
    ("85160", "2"),
    ("91562", "3"),
];

/// The `auth` object embedded in every upstream payload.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthBlock {
    pub location_id: String,
    pub app_platform: String,
    pub app_version: u32,
    pub experiments: BTreeMap<String, String>,
    pub os: String,
}

impl AuthBlock {
    /// The desktop web client profile.
    #[must_use]
    pub fn web() -> Self {
        Self {
            location_id: "50".to_string(),
            app_platform: "WEB".to_string(),
            app_version: 0,
            experiments: WEB_EXPERIMENTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            os: "UNKNOWN_OS".to_string(),
        }
    }
}

impl Default for AuthBlock {
    fn default() -> Self {
        Self::web()
    }
}

/// Load an auth profile from a YAML file.
///
/// The file uses the same camelCase keys as the wire format.
///
/// # Errors
///
/// Returns [`ConfigError::AuthProfileIo`] if the file cannot be read,
/// [`ConfigError::AuthProfileParse`] if it is not valid YAML for an
/// [`AuthBlock`], and [`ConfigError::AuthProfileInvalid`] if required
/// fields are blank.
pub fn load_auth_profile(path: &Path) -> Result<AuthBlock, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AuthProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: AuthBlock =
        serde_yaml::from_str(&content).map_err(ConfigError::AuthProfileParse)?;

    validate_auth_profile(&profile)?;

    Ok(profile)
}

fn validate_auth_profile(profile: &AuthBlock) -> Result<(), ConfigError> {
    if profile.location_id.trim().is_empty() {
        return Err(ConfigError::AuthProfileInvalid(
            "locationId must not be empty".to_string(),
        ));
    }
    if profile.app_platform.trim().is_empty() {
        return Err(ConfigError::AuthProfileInvalid(
            "appPlatform must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_profile_carries_every_experiment() {
        let auth = AuthBlock::web();
        assert_eq!(auth.experiments.len(), 64);
        assert_eq!(auth.experiments.get("8").map(String::as_str), Some("2"));
        assert_eq!(auth.experiments.get("91562").map(String::as_str), Some("3"));
    }

    #[test]
    fn web_profile_serializes_with_wire_keys() {
        let value = serde_json::to_value(AuthBlock::web()).expect("serialize");
        assert_eq!(value["locationId"], "50");
        assert_eq!(value["appPlatform"], "WEB");
        assert_eq!(value["appVersion"], 0);
        assert_eq!(value["os"], "UNKNOWN_OS");
        assert_eq!(value["experiments"]["20121"], "1");
    }

    #[test]
    fn web_profile_is_stable_across_calls() {
        assert_eq!(AuthBlock::web(), AuthBlock::web());
    }

    #[test]
    fn parses_yaml_profile() {
        let yaml = r#"
locationId: "77"
appPlatform: WEB
appVersion: 3
experiments:
  "8": "1"
os: LINUX
"#;
        let profile: AuthBlock = serde_yaml::from_str(yaml).expect("parse");
        assert!(validate_auth_profile(&profile).is_ok());
        assert_eq!(profile.location_id, "77");
        assert_eq!(profile.app_version, 3);
        assert_eq!(profile.experiments.len(), 1);
    }

    #[test]
    fn rejects_blank_location() {
        let mut profile = AuthBlock::web();
        profile.location_id = "  ".to_string();
        assert!(matches!(
            validate_auth_profile(&profile),
            Err(ConfigError::AuthProfileInvalid(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_auth_profile(Path::new("/nonexistent/auth-profile.yaml"));
        assert!(
            matches!(result, Err(ConfigError::AuthProfileIo { .. })),
            "expected AuthProfileIo, got: {result:?}"
        );
    }
}
