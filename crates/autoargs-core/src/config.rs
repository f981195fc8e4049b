//! Configuration handling for autoargs
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock NSubstitute behaviour:
//!
//! ```toml
//! library = "NSubstitute"
//! matcher_type = "Arg"
//! matcher_method = "Any"
//! title = "Add wildcard-match arguments"
//! label_max_len = 50
//! line_ending = "crlf"
//! candidate_source = "overload_failure"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutoArgsError, AutoArgsResult};

/// Directory holding the per-project config file.
pub const CONFIG_DIR: &str = ".autoargs";
pub const CONFIG_FILE: &str = "config.toml";

/// Line break appended after a rewritten call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Where overload candidates come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Candidates left by a failed overload resolution.
    #[default]
    OverloadFailure,
    /// Every same-name method on the receiver type.
    MemberGroup,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoArgsConfig {
    /// Substring that must appear in a referenced library's display name
    #[serde(default = "default_library")]
    pub library: String,

    /// Type holding the wildcard matcher (`Arg` in `Arg.Any<T>()`)
    #[serde(default = "default_matcher_type")]
    pub matcher_type: String,

    /// Generic matcher method (`Any` in `Arg.Any<T>()`)
    #[serde(default = "default_matcher_method")]
    pub matcher_method: String,

    /// Title of a single action and of an action group
    #[serde(default = "default_title")]
    pub title: String,

    /// Maximum length of a per-overload label
    #[serde(default = "default_label_max_len")]
    pub label_max_len: usize,

    #[serde(default)]
    pub line_ending: LineEnding,

    #[serde(default)]
    pub candidate_source: CandidateSource,
}

fn default_library() -> String {
    "NSubstitute".to_string()
}

fn default_matcher_type() -> String {
    "Arg".to_string()
}

fn default_matcher_method() -> String {
    "Any".to_string()
}

fn default_title() -> String {
    "Add wildcard-match arguments".to_string()
}

fn default_label_max_len() -> usize {
    50
}

impl Default for AutoArgsConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            matcher_type: default_matcher_type(),
            matcher_method: default_matcher_method(),
            title: default_title(),
            label_max_len: default_label_max_len(),
            line_ending: LineEnding::default(),
            candidate_source: CandidateSource::default(),
        }
    }
}

impl AutoArgsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> AutoArgsResult<Self> {
        toml::from_str(content)
            .map_err(|e| AutoArgsError::config(format!("failed to parse config: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> AutoArgsResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AutoArgsError::config(format!("failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from .autoargs/config.toml in the given project root
    pub fn load_from_project(project_root: &Path) -> AutoArgsResult<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(AutoArgsConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutoArgsConfig::default();
        assert_eq!(config.library, "NSubstitute");
        assert_eq!(config.matcher_type, "Arg");
        assert_eq!(config.matcher_method, "Any");
        assert_eq!(config.title, "Add wildcard-match arguments");
        assert_eq!(config.label_max_len, 50);
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert_eq!(config.candidate_source, CandidateSource::OverloadFailure);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(
            AutoArgsConfig::from_toml_str("").unwrap(),
            AutoArgsConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = AutoArgsConfig::from_toml_str(
            "line_ending = \"lf\"\ncandidate_source = \"member_group\"\nlabel_max_len = 30\n",
        )
        .unwrap();
        assert_eq!(config.line_ending, LineEnding::Lf);
        assert_eq!(config.line_ending.as_str(), "\n");
        assert_eq!(config.candidate_source, CandidateSource::MemberGroup);
        assert_eq!(config.label_max_len, 30);
        assert_eq!(config.library, "NSubstitute");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AutoArgsConfig::from_toml_str("line_ending = \"cr\"").unwrap_err();
        assert!(matches!(err, AutoArgsError::Config { .. }));
    }

    #[test]
    fn test_load_from_project() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            AutoArgsConfig::load_from_project(dir.path()).unwrap(),
            AutoArgsConfig::default()
        );

        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(CONFIG_FILE),
            "library = \"Moq\"\nmatcher_type = \"It\"\nmatcher_method = \"IsAny\"\n",
        )
        .unwrap();

        let config = AutoArgsConfig::load_from_project(dir.path()).unwrap();
        assert_eq!(config.library, "Moq");
        assert_eq!(config.matcher_type, "It");
        assert_eq!(config.matcher_method, "IsAny");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AutoArgsConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
