//! Constants used throughout wizkit

/// Environment variable overriding the shared credentials file location
pub const ENV_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Environment variable overriding the shared config file location
pub const ENV_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

/// Directory (relative to the home directory) holding the shared files
pub const DEFAULT_AWS_DIR: &str = ".aws";

/// Default shared credentials file name
pub const DEFAULT_CREDENTIALS_FILENAME: &str = "credentials";

/// Default shared config file name
pub const DEFAULT_CONFIG_FILENAME: &str = "config";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Shared credentials/config keys
pub mod credentials {
    pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
    pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
    /// Section prefix used by the shared config file (`[profile name]`)
    pub const CONFIG_PROFILE_PREFIX: &str = "profile ";
    pub const FILE_HEADER: &str = "# Amazon Web Services Credentials File used by AWS CLI, SDKs, and tools\n\
# This file was created by wizkit.\n\
#\n\
# Your AWS credentials are represented by access keys associated with IAM users.\n\
# For information about how to create and manage AWS access keys for a user, see:\n\
# https://docs.aws.amazon.com/IAM/latest/UserGuide/id_credentials_access-keys.html\n\
#\n\
# This credential file can store multiple access keys by placing each one in a\n\
# named \"profile\". For information about how to change the access keys in a\n\
# profile or to add a new profile with a different access key, see:\n\
# https://docs.aws.amazon.com/cli/latest/userguide/cli-config-files.html\n";
}

/// Construct tree attribute keys and node metadata
pub mod tree {
    pub const TYPE_ATTRIBUTE: &str = "aws:cdk:cloudformation:type";
    pub const PROPS_ATTRIBUTE: &str = "aws:cdk:cloudformation:props";
    pub const RESOURCE_CHILD: &str = "Resource";
    pub const STATE_MACHINE_TYPE: &str = "AWS::StepFunctions::StateMachine";
    pub const CONSTRUCT_CONTEXT_VALUE: &str = "awsCdkConstructNode";
    pub const STATE_MACHINE_CONTEXT_VALUE: &str = "awsCdkStateMachineNode";
    pub const APP_CONTEXT_VALUE: &str = "awsCdkAppNode";
    /// Construct ids hidden from the tree unless they carry attributes
    pub const HIDDEN_CONSTRUCT_IDS: &[&str] = &["Tree", "Default"];
    pub const ID_SEPARATOR: &str = "/";
}

/// Wizard prompt texts
pub mod prompts {
    pub const PROFILE_NAME: &str = "Profile name";
    pub const ACCESS_KEY: &str = "Access key ID";
    pub const SECRET_KEY: &str = "Secret access key";
    pub const DEFAULT_PROFILE_NAME: &str = "default";
}

/// Answer validation messages and limits
pub mod validation {
    pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";
    /// Invalid answers tolerated before a text prompt gives up
    pub const MAX_ATTEMPTS: usize = 3;
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
