//! Answer validators for the credentials wizard
//!
//! Each validator returns the message shown to the user when the answer is
//! rejected, matching what [`crate::prompt::InputPrompter::with_validator`]
//! expects.

use regex::Regex;
use std::sync::OnceLock;

fn profile_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s\[\]]+$").expect("profile name pattern is valid"))
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\S+$").expect("key pattern is valid"))
}

/// Profile names become section headers, so they cannot hold brackets or
/// whitespace.
pub fn validate_profile_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Profile name is required".to_string());
    }
    if !profile_name_pattern().is_match(name) {
        return Err(format!("Profile name '{name}' cannot contain whitespace or brackets"));
    }
    Ok(())
}

pub fn validate_access_key(key: &str) -> Result<(), String> {
    validate_key("Access key ID", key)
}

pub fn validate_secret_key(key: &str) -> Result<(), String> {
    validate_key("Secret access key", key)
}

fn validate_key(label: &str, key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err(format!("{label} is required"));
    }
    if !key_pattern().is_match(key) {
        return Err(format!("{label} cannot contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_profile_names() {
        for name in ["default", "dev-account", "team.prod", "sso@org"] {
            assert!(validate_profile_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_bad_profile_names() {
        assert_eq!(validate_profile_name(""), Err("Profile name is required".to_string()));
        assert!(validate_profile_name("my profile").is_err());
        assert!(validate_profile_name("[dev]").is_err());
    }

    #[test]
    fn rejects_blank_or_spaced_keys() {
        assert!(validate_access_key("AKIAEXAMPLE").is_ok());
        assert!(validate_access_key("").is_err());
        assert!(validate_secret_key("abc def").is_err());
        assert!(validate_secret_key("wJalrXUtnFEMI/K7MDENG").is_ok());
    }
}
