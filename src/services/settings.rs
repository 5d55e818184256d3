use crate::domain::models::{DottedPath, Expected, Rule, Settings, SettingsFile};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("setting path '{0}' has an empty segment")]
    EmptySegment(String),
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_toml = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let file = if is_toml {
        parse_toml(&raw).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        parse_yaml(&raw).map_err(|source| SettingsError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    let settings = from_file(file)?;
    tracing::info!(
        path = %path.display(),
        rules = settings.rules.len(),
        exclusions = settings.general.exclude.len(),
        "settings loaded"
    );
    Ok(settings)
}

pub fn parse_yaml(raw: &str) -> Result<SettingsFile, serde_yaml::Error> {
    // An empty document deserializes to unit, not to a mapping.
    if raw.trim().is_empty() {
        return Ok(SettingsFile::default());
    }
    serde_yaml::from_str(raw)
}

pub fn parse_toml(raw: &str) -> Result<SettingsFile, toml::de::Error> {
    toml::from_str(raw)
}

pub fn from_file(file: SettingsFile) -> Result<Settings, SettingsError> {
    let mut rules = Vec::with_capacity(file.query.len());
    for (path, expected) in file.query {
        let parsed = DottedPath::parse(&path).ok_or(SettingsError::EmptySegment(path))?;
        rules.push(Rule {
            path: parsed,
            expected: Expected::from_value(expected),
        });
    }
    Ok(Settings {
        general: file.general,
        rules,
    })
}
