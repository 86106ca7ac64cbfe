use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::utils::validation::{validate_duochrome_options, validate_snellen_options};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "snellen-wizard.toml";

pub const ENV_LOG_DIR: &str = "SNELLEN_WIZARD_LOG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log_dir: Option<PathBuf>,
    pub options: ChoiceOptions,
}

/// Values offered by the wizard's selects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChoiceOptions {
    pub snellen: Vec<String>,
    pub duochrome: Vec<String>,
}

impl Default for ChoiceOptions {
    fn default() -> Self {
        Self {
            snellen: ["6/60", "6/36", "6/24", "6/18", "6/12", "6/9", "6/6", "6/5"]
                .into_iter()
                .map(String::from)
                .collect(),
            duochrome: ["Red clearer", "Green clearer", "Both equal"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, then apply env
/// overrides and validate the option lists.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let source = match path {
        Some(p) => Some(p),
        None if default_path.is_file() => Some(default_path),
        None => None,
    };
    let mut settings = match source {
        Some(p) => read_settings(p)?,
        None => Settings::default(),
    };

    if let Ok(v) = std::env::var(ENV_LOG_DIR) {
        if !v.trim().is_empty() {
            settings.log_dir = Some(PathBuf::from(v.trim()));
        }
    }

    match source {
        Some(p) => validate_settings(&settings)
            .with_context(|| format!("invalid options in config file {}", p.display()))?,
        None => validate_settings(&settings)?,
    }
    Ok(settings)
}

pub fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn validate_settings(settings: &Settings) -> anyhow::Result<()> {
    validate_snellen_options(&settings.options.snellen)?;
    validate_duochrome_options(&settings.options.duochrome)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(contents.as_bytes()).expect("write config");
        f
    }

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(validate_settings(&s).is_ok());
        assert!(s.options.snellen.contains(&"6/6".to_string()));
        assert_eq!(s.options.duochrome.len(), 3);
        assert_eq!(s.log_dir, None);
    }

    #[test]
    fn file_overrides_options_and_keeps_missing_defaults() {
        let f = write_config(
            r#"
[options]
snellen = ["20/200", "20/40", "20/20"]
"#,
        );
        let s = read_settings(f.path()).expect("parse");
        assert_eq!(s.options.snellen, vec!["20/200", "20/40", "20/20"]);
        assert_eq!(s.options.duochrome, ChoiceOptions::default().duochrome);
        assert!(validate_settings(&s).is_ok());
    }

    #[test]
    fn file_sets_log_dir() {
        let f = write_config("log_dir = \"/tmp/selftest-logs\"\n");
        let s = read_settings(f.path()).expect("parse");
        assert_eq!(s.log_dir, Some(PathBuf::from("/tmp/selftest-logs")));
    }

    #[test]
    fn invalid_snellen_option_is_rejected() {
        let f = write_config(
            r#"
[options]
snellen = ["6/6", "six-six"]
"#,
        );
        let err = load_settings(Some(f.path())).expect_err("invalid option");
        let msg = format!("{:#}", err);
        assert!(msg.contains("six-six"), "{}", msg);
        assert!(msg.contains(&f.path().display().to_string()), "{}", msg);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let f = write_config("colour = \"red\"\n");
        let err = read_settings(f.path()).expect_err("unknown key");
        assert!(format!("{:#}", err).contains("invalid config file"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = load_settings(Some(&tmp.path().join("absent.toml"))).expect_err("absent");
        assert!(err.to_string().contains("failed to read config file"));
    }
}
