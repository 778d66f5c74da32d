use std::fs::OpenOptions;
use tempfile::TempDir;
use test_log::test;
use wizkit::credentials::{
    find_existing_credentials_filenames, generate_credentials_file, load_shared_config_files,
    parse_profiles, CredentialsConfig, CredentialsProfile,
};
use wizkit::error::Error;

fn config_in(dir: &TempDir) -> CredentialsConfig {
    CredentialsConfig::new(dir.path().join("credentials"), dir.path().join("config"))
}

#[test]
fn finds_nothing_when_no_file_exists() {
    let dir = TempDir::new().unwrap();
    assert!(find_existing_credentials_filenames(&config_in(&dir)).is_empty());
}

#[test]
fn finds_only_the_existing_file() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    std::fs::write(&config.config_file, "[default]\n").unwrap();
    assert_eq!(find_existing_credentials_filenames(&config), vec![config.config_file.clone()]);

    std::fs::remove_file(&config.config_file).unwrap();
    std::fs::write(&config.credentials_file, "[default]\n").unwrap();
    assert_eq!(
        find_existing_credentials_filenames(&config),
        vec![config.credentials_file.clone()]
    );
}

#[test]
fn credentials_file_comes_first() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.config_file, "").unwrap();
    std::fs::write(&config.credentials_file, "").unwrap();

    assert_eq!(
        find_existing_credentials_filenames(&config),
        vec![config.credentials_file.clone(), config.config_file.clone()]
    );
}

#[test]
fn generated_file_round_trips_through_the_parser() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let profile = CredentialsProfile {
        profile_name: "someRandomProfileName".to_string(),
        access_key: "123".to_string(),
        secret_key: "ABC".to_string(),
    };

    generate_credentials_file(&config, &profile).unwrap();

    let content = std::fs::read_to_string(&config.credentials_file).unwrap();
    let profiles = parse_profiles(&content).unwrap();
    let section = &profiles["someRandomProfileName"];
    assert_eq!(section["aws_access_key_id"], "123");
    assert_eq!(section["aws_secret_access_key"], "ABC");

    // still readable and writable by the owner
    OpenOptions::new().read(true).open(&config.credentials_file).unwrap();
    OpenOptions::new().append(true).open(&config.credentials_file).unwrap();
}

#[test]
fn loads_profiles_from_both_files() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(
        &config.credentials_file,
        "[default]\naws_access_key_id = A\naws_secret_access_key = B\n",
    )
    .unwrap();
    std::fs::write(
        &config.config_file,
        "[default]\nregion = us-east-1\n\n[profile dev]\nregion = eu-west-1\n",
    )
    .unwrap();

    let files = load_shared_config_files(&config).unwrap();
    assert_eq!(files.credentials_file["default"]["aws_access_key_id"], "A");
    let names: Vec<&String> = files.config_file.keys().collect();
    assert_eq!(names, vec!["default", "dev"]);
    assert_eq!(files.config_file["dev"]["region"], "eu-west-1");
}

#[test]
fn malformed_file_reports_its_location() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.credentials_file, "[default]\nnot a pair\n").unwrap();

    let err = load_shared_config_files(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 2"), "unexpected message: {message}");
}

#[test]
fn line_breaks_cannot_smuggle_extra_keys() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let profile = CredentialsProfile {
        profile_name: "p".to_string(),
        access_key: "123".to_string(),
        secret_key: "ABC\naws_session_token = evil".to_string(),
    };

    let err = generate_credentials_file(&config, &profile).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert!(!config.credentials_file.exists());
}

#[test]
fn empty_profile_name_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let profile = CredentialsProfile {
        profile_name: String::new(),
        access_key: "123".to_string(),
        secret_key: "ABC".to_string(),
    };

    let err = generate_credentials_file(&config, &profile).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert!(!config.credentials_file.exists());
}

#[test]
fn padded_values_are_rejected_rather_than_trimmed() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let profile = CredentialsProfile {
        profile_name: "p".to_string(),
        access_key: " 123 ".to_string(),
        secret_key: "ABC".to_string(),
    };

    assert!(generate_credentials_file(&config, &profile).is_err());
    assert!(!config.credentials_file.exists());
}
