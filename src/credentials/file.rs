//! Reading the shared credentials and config files
//!
//! Both files use the same INI-like shape: `[section]` headers followed by
//! `key = value` lines. Lines starting with `#` or `;` are comments. In the
//! config file, named profiles are written `[profile name]`; they are keyed by
//! `name` here so both files index profiles the same way.

use super::CredentialsConfig;
use crate::{
    constants::credentials::CONFIG_PROFILE_PREFIX,
    error::{Error, Result},
    ioutils::read_optional,
};
use indexmap::IndexMap;
use std::path::Path;

/// Profile name to its key/value pairs, in file order.
pub type Profiles = IndexMap<String, IndexMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedConfigFiles {
    pub credentials_file: Profiles,
    pub config_file: Profiles,
}

#[derive(Debug, PartialEq)]
struct ParseFailure {
    line: usize,
    message: String,
}

fn parse(content: &str) -> std::result::Result<Profiles, ParseFailure> {
    let mut profiles = Profiles::new();
    let mut current: Option<String> = None;

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ParseFailure {
                    line: number + 1,
                    message: format!("malformed section header '{line}'"),
                })?;
            profiles.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseFailure {
                line: number + 1,
                message: format!("expected 'key = value', found '{line}'"),
            });
        };
        let Some(section) = &current else {
            return Err(ParseFailure {
                line: number + 1,
                message: "property outside of a section".to_string(),
            });
        };

        if let Some(properties) = profiles.get_mut(section) {
            properties.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(profiles)
}

/// Parses the content of a shared credentials file.
pub fn parse_profiles(content: &str) -> Result<Profiles> {
    parse(content).map_err(|failure| Error::ConfigParseError {
        path: "<memory>".to_string(),
        line: failure.line,
        message: failure.message,
    })
}

/// Strips the `profile ` prefix used by the config file, leaving `default`
/// and other plain section names untouched.
fn normalize_config_profiles(profiles: Profiles) -> Profiles {
    profiles
        .into_iter()
        .map(|(name, properties)| match name.strip_prefix(CONFIG_PROFILE_PREFIX) {
            Some(stripped) => (stripped.trim().to_string(), properties),
            None => (name, properties),
        })
        .collect()
}

fn load_profiles(path: &Path) -> Result<Profiles> {
    let Some(content) = read_optional(path)? else {
        log::debug!("'{}' does not exist, no profiles loaded", path.display());
        return Ok(Profiles::new());
    };

    parse(&content).map_err(|failure| Error::ConfigParseError {
        path: path.display().to_string(),
        line: failure.line,
        message: failure.message,
    })
}

/// Loads both shared files. A missing file yields no profiles.
pub fn load_shared_config_files(config: &CredentialsConfig) -> Result<SharedConfigFiles> {
    Ok(SharedConfigFiles {
        credentials_file: load_profiles(&config.credentials_file)?,
        config_file: normalize_config_profiles(load_profiles(&config.config_file)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_keys_and_comments() {
        let content = "\
# comment
[default]
aws_access_key_id = AKIA
; another comment
aws_secret_access_key=secret = with equals

[dev]
region = eu-west-1
";
        let profiles = parse_profiles(content).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["default"]["aws_access_key_id"], "AKIA");
        assert_eq!(profiles["default"]["aws_secret_access_key"], "secret = with equals");
        assert_eq!(profiles["dev"]["region"], "eu-west-1");
    }

    #[test]
    fn reports_line_of_malformed_input() {
        let err = parse("[ok]\nno equals sign").unwrap_err();
        assert_eq!(err.line, 2);

        let err = parse("key = value").unwrap_err();
        assert_eq!(err.line, 1);

        let err = parse("[broken").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn repeated_sections_merge() {
        let profiles = parse_profiles("[a]\nx = 1\n[b]\n[a]\ny = 2\n").unwrap();
        assert_eq!(profiles.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(profiles["a"].len(), 2);
    }

    #[test]
    fn config_profiles_drop_prefix() {
        let profiles = parse_profiles("[default]\n[profile dev]\nregion = us-east-1\n").unwrap();
        let normalized = normalize_config_profiles(profiles);
        assert!(normalized.contains_key("default"));
        assert_eq!(normalized["dev"]["region"], "us-east-1");
    }
}
