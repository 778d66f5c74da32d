use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Prompt error: {0}.")]
    DialoguerError(#[from] dialoguer::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    /// `prompt()` was called on a prompter that already ran once.
    #[error("Prompter was already invoked. Create a new prompter to ask again.")]
    AlreadyInvoked,

    /// A link in the prompter chain received a value of an unexpected type.
    #[error("Prompter chain expected a value of type '{expected}'.")]
    PromptTypeMismatch { expected: &'static str },

    #[error("Failed to parse '{path}' at line {line}: {message}.")]
    ConfigParseError { path: String, line: usize, message: String },

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Cannot proceed: tree file '{tree_file}' does not exist.")]
    TreeFileDoesNotExistError { tree_file: String },

    #[error("Cannot proceed: credentials file '{credentials_file}' already exists. Use --force to overwrite it.")]
    CredentialsFileExistsError { credentials_file: String },

    #[error("Cannot determine the home directory. Set AWS_SHARED_CREDENTIALS_FILE and AWS_CONFIG_FILE explicitly.")]
    HomeDirectoryNotFound,
}

/// Convenience type alias for Results with the crate error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
