//! Shared credentials and config file utilities
//!
//! File locations are resolved once, at the boundary, into a
//! [`CredentialsConfig`]; everything below it works on explicit paths.

use crate::{
    constants::{
        credentials::{ACCESS_KEY_ID, FILE_HEADER, SECRET_ACCESS_KEY},
        DEFAULT_AWS_DIR, DEFAULT_CONFIG_FILENAME, DEFAULT_CREDENTIALS_FILENAME, ENV_CONFIG_FILE,
        ENV_SHARED_CREDENTIALS_FILE,
    },
    error::{Error, Result},
    ioutils::{create_dir_all, write_private},
    validation::{validate_access_key, validate_profile_name, validate_secret_key},
};
use std::path::{Path, PathBuf};

pub mod file;
pub mod wizard;

pub use file::{load_shared_config_files, parse_profiles, Profiles, SharedConfigFiles};
pub use wizard::{credentials_wizard, profile_from_answers};

/// Locations of the shared credentials file and the shared config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsConfig {
    pub credentials_file: PathBuf,
    pub config_file: PathBuf,
}

impl CredentialsConfig {
    pub fn new(credentials_file: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self { credentials_file: credentials_file.into(), config_file: config_file.into() }
    }

    /// Reads the override variables and falls back to `~/.aws/...`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os(ENV_SHARED_CREDENTIALS_FILE).map(PathBuf::from),
            std::env::var_os(ENV_CONFIG_FILE).map(PathBuf::from),
        )
    }

    /// Uses the given paths where present and the default locations otherwise.
    /// The home directory is only looked up when a default is needed.
    pub fn resolve(
        credentials_file: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Result<Self> {
        let default_path = |name: &str| -> Result<PathBuf> {
            let home = dirs::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
            Ok(home.join(DEFAULT_AWS_DIR).join(name))
        };

        let credentials_file = match credentials_file {
            Some(path) => path,
            None => default_path(DEFAULT_CREDENTIALS_FILENAME)?,
        };
        let config_file = match config_file {
            Some(path) => path,
            None => default_path(DEFAULT_CONFIG_FILENAME)?,
        };

        log::debug!(
            "Using credentials file '{}' and config file '{}'",
            credentials_file.display(),
            config_file.display()
        );
        Ok(Self { credentials_file, config_file })
    }
}

/// A profile to write into the shared credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsProfile {
    pub profile_name: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Returns the files of `config` that exist, credentials file first.
pub fn find_existing_credentials_filenames(config: &CredentialsConfig) -> Vec<PathBuf> {
    [&config.credentials_file, &config.config_file]
        .into_iter()
        .filter(|path| path.is_file())
        .cloned()
        .collect()
}

/// Renders the credentials file contents for a single profile.
pub fn render_credentials_file(profile: &CredentialsProfile) -> String {
    format!(
        "{FILE_HEADER}\n[{}]\n{ACCESS_KEY_ID} = {}\n{SECRET_ACCESS_KEY} = {}\n",
        profile.profile_name, profile.access_key, profile.secret_key
    )
}

impl CredentialsProfile {
    /// Rejects values that would not read back unchanged from the file:
    /// empty fields, whitespace (including line breaks) and brackets in the name.
    pub fn validate(&self) -> Result<()> {
        validate_profile_name(&self.profile_name)
            .and_then(|()| validate_access_key(&self.access_key))
            .and_then(|()| validate_secret_key(&self.secret_key))
            .map_err(Error::ValidationError)
    }
}

/// Writes `profile` as the content of the shared credentials file.
///
/// The profile is validated first and nothing is written when it is
/// rejected. The parent directory is created when missing. An existing file
/// is replaced; callers decide beforehand whether that is acceptable.
pub fn generate_credentials_file(
    config: &CredentialsConfig,
    profile: &CredentialsProfile,
) -> Result<()> {
    profile.validate()?;
    write_credentials(&config.credentials_file, &render_credentials_file(profile))?;
    log::info!(
        "Wrote profile '{}' to '{}'",
        profile.profile_name,
        config.credentials_file.display()
    );
    Ok(())
}

fn write_credentials(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    write_private(path, contents)
}
