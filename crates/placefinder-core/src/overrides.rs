//! Static override table: known locations mapped to fixed record sets.
//!
//! Loaded from YAML so the pipeline never hardcodes a particular place.
//!
//! ```yaml
//! overrides:
//!   - pattern: kigali
//!     mode: fallback
//!     title: Restaurants in Kigali
//!     records:
//!       - name: Repub Lounge
//!         category_label: african
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::DisplayRecord;
use crate::ConfigError;

/// When an override entry takes effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideMode {
    /// Serve the static records without touching the network.
    #[default]
    Bypass,
    /// Query live services first; serve the static records only if they fail.
    Fallback,
}

impl std::fmt::Display for OverrideMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideMode::Bypass => write!(f, "bypass"),
            OverrideMode::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Case-insensitive substring matched against the query location or filter.
    pub pattern: String,
    #[serde(default)]
    pub mode: OverrideMode,
    #[serde(default)]
    pub title: Option<String>,
    pub records: Vec<DisplayRecord>,
}

impl OverrideEntry {
    /// Returns `true` if any of `candidates` contains the pattern, ignoring case.
    #[must_use]
    pub fn matches<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> bool {
        let pattern = self.pattern.trim().to_lowercase();
        candidates
            .into_iter()
            .any(|c| c.to_lowercase().contains(&pattern))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverridesFile {
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

/// Load and validate an override table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_overrides(path: &Path) -> Result<OverridesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::OverridesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_overrides(&content)
}

/// Parse and validate an override table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_overrides(content: &str) -> Result<OverridesFile, ConfigError> {
    let file: OverridesFile =
        serde_yaml::from_str(content).map_err(ConfigError::OverridesFileParse)?;
    validate_overrides(&file)?;
    Ok(file)
}

fn validate_overrides(file: &OverridesFile) -> Result<(), ConfigError> {
    let mut seen_patterns = HashSet::new();

    for entry in &file.overrides {
        let pattern = entry.pattern.trim().to_lowercase();
        if pattern.is_empty() {
            return Err(ConfigError::Validation(
                "override pattern must be non-empty".to_string(),
            ));
        }

        if !seen_patterns.insert(pattern) {
            return Err(ConfigError::Validation(format!(
                "duplicate override pattern: '{}'",
                entry.pattern
            )));
        }

        if entry.records.is_empty() {
            return Err(ConfigError::Validation(format!(
                "override '{}' has no records",
                entry.pattern
            )));
        }

        if entry.records.iter().any(|r| r.name.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "override '{}' contains a record without a name",
                entry.pattern
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIGALI_YAML: &str = r"
overrides:
  - pattern: Kigali
    mode: fallback
    title: Restaurants in Kigali
    records:
      - name: Repub Lounge
        category_label: african
        formatted_address: KN 3 Ave, Kigali
      - name: Heaven Restaurant
";

    #[test]
    fn parses_entries_and_defaults() {
        let file = parse_overrides(KIGALI_YAML).expect("valid yaml");
        assert_eq!(file.overrides.len(), 1);
        let entry = &file.overrides[0];
        assert_eq!(entry.mode, OverrideMode::Fallback);
        assert_eq!(entry.records.len(), 2);
        assert_eq!(entry.records[1].name, "Heaven Restaurant");
        assert!(entry.records[1].formatted_address.is_empty());
    }

    #[test]
    fn mode_defaults_to_bypass() {
        let yaml = "overrides:\n  - pattern: kigali\n    records:\n      - name: A\n";
        let file = parse_overrides(yaml).unwrap();
        assert_eq!(file.overrides[0].mode, OverrideMode::Bypass);
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let file = parse_overrides(KIGALI_YAML).unwrap();
        let entry = &file.overrides[0];
        assert!(entry.matches(["kigali"]));
        assert!(entry.matches(["Downtown KIGALI, Rwanda"]));
        assert!(entry.matches(["Nairobi", "kigali"]));
        assert!(!entry.matches(["Nairobi"]));
    }

    #[test]
    fn rejects_empty_pattern() {
        let yaml = "overrides:\n  - pattern: '  '\n    records:\n      - name: A\n";
        let err = parse_overrides(yaml).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_duplicate_patterns_ignoring_case() {
        let yaml = "overrides:\n  - pattern: kigali\n    records:\n      - name: A\n  - pattern: KIGALI\n    records:\n      - name: B\n";
        let err = parse_overrides(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate override pattern"));
    }

    #[test]
    fn rejects_entry_without_records() {
        let yaml = "overrides:\n  - pattern: kigali\n    records: []\n";
        let err = parse_overrides(yaml).unwrap_err();
        assert!(err.to_string().contains("has no records"));
    }

    #[test]
    fn rejects_nameless_record() {
        let yaml = "overrides:\n  - pattern: kigali\n    records:\n      - name: ''\n";
        assert!(parse_overrides(yaml).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_overrides(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::OverridesFileIo { .. }));
    }
}
