use super::{
    args::{CreateArgs, CredentialsCommand, TreeArgs},
    render::{render_app, RenderOptions},
    Cli, Commands,
};
use crate::{
    constants::prompts::{ACCESS_KEY, DEFAULT_PROFILE_NAME, PROFILE_NAME, SECRET_KEY},
    credentials::{
        credentials_wizard, find_existing_credentials_filenames, generate_credentials_file,
        load_shared_config_files, profile_from_answers, CredentialsConfig, Profiles,
    },
    error::{Error, Result},
    prompt::{
        automatic_impl::AutomaticPrompter, dialoguer::DialoguerPrompter, ConfirmPrompter,
        ConfirmationConfig, ConfirmationPrompter, Interaction, MultipleChoiceConfig,
        MultipleChoicePrompter, PromptProvider, PromptResult, SingleChoiceConfig,
        SingleChoicePrompter, TextPromptConfig, TextPrompter,
    },
    tree::{
        inspector::include_construct_in_tree, load_tree, AppNode, ConstructTreeEntity,
        InclusionPredicate,
    },
    wizard::WizardOutcome,
};
use std::path::Path;
use std::rc::Rc;

/// Dispatches the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Credentials(command) => {
            let config = CredentialsConfig::resolve(cli.credentials_file, cli.config_file)?;
            match command {
                CredentialsCommand::List => list_credentials(&config),
                CredentialsCommand::Create(args) => create_credentials(&config, args),
            }
        }
        Commands::Tree(args) => print_tree(&args),
    }
}

fn print_profiles(label: &str, path: &Path, profiles: &Profiles) {
    println!("{label}: {}", path.display());
    if profiles.is_empty() {
        println!("  (no profiles)");
    }
    for name in profiles.keys() {
        println!("  {name}");
    }
}

/// Prints the existing shared files and the profiles each declares.
pub fn list_credentials(config: &CredentialsConfig) -> Result<()> {
    let existing = find_existing_credentials_filenames(config);
    if existing.is_empty() {
        println!("No credentials or config file found.");
        return Ok(());
    }

    let files = load_shared_config_files(config)?;
    if config.credentials_file.is_file() {
        print_profiles("Credentials file", &config.credentials_file, &files.credentials_file);
    }
    if config.config_file.is_file() {
        print_profiles("Config file", &config.config_file, &files.config_file);
    }
    Ok(())
}

/// Answers the wizard from the flags alone.
fn scripted_provider(args: &CreateArgs) -> Result<AutomaticPrompter> {
    let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) else {
        return Err(Error::ValidationError(
            "--access-key and --secret-key are required with --non-interactive".to_string(),
        ));
    };
    Ok(AutomaticPrompter::new()
        .with_text_response(ACCESS_KEY, access_key)
        .with_text_response(SECRET_KEY, secret_key))
}

/// Flags fill in their prompts; the rest is asked on the terminal.
fn interactive_provider(args: &CreateArgs) -> Rc<dyn PromptProvider> {
    if args.access_key.is_none() && args.secret_key.is_none() && args.profile.is_none() {
        return Rc::new(DialoguerPrompter::new());
    }
    Rc::new(PrefilledPrompter { args: args.clone(), fallback: DialoguerPrompter::new() })
}

/// Returns the flag values for their prompts and defers everything else.
struct PrefilledPrompter {
    args: CreateArgs,
    fallback: DialoguerPrompter,
}

impl PrefilledPrompter {
    fn prefilled(&self, prompt: &str) -> Option<&String> {
        match prompt {
            PROFILE_NAME => self.args.profile.as_ref(),
            ACCESS_KEY => self.args.access_key.as_ref(),
            SECRET_KEY => self.args.secret_key.as_ref(),
            _ => None,
        }
    }
}

impl TextPrompter for PrefilledPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<PromptResult<String>> {
        match self.prefilled(&config.prompt) {
            Some(value) => Ok(PromptResult::Value(value.clone())),
            None => self.fallback.prompt_text(config),
        }
    }
}

impl SingleChoicePrompter for PrefilledPrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<PromptResult<usize>> {
        self.fallback.prompt_single_choice(config)
    }
}

impl MultipleChoicePrompter for PrefilledPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<PromptResult<Vec<usize>>> {
        self.fallback.prompt_multiple_choice(config)
    }
}

impl ConfirmationPrompter for PrefilledPrompter {
    fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<PromptResult<bool>> {
        self.fallback.prompt_confirmation(config)
    }
}

/// Decides whether an existing credentials file may be replaced.
fn confirm_overwrite(
    config: &CredentialsConfig,
    args: &CreateArgs,
    provider: &Rc<dyn PromptProvider>,
) -> Result<bool> {
    if args.force || !config.credentials_file.exists() {
        return Ok(true);
    }
    if args.non_interactive {
        return Err(Error::CredentialsFileExistsError {
            credentials_file: config.credentials_file.display().to_string(),
        });
    }

    let prompt = format!("Overwrite existing '{}'?", config.credentials_file.display());
    let mut confirm = ConfirmPrompter::new(provider.clone(), &prompt, false).into_prompter();
    Ok(confirm.prompt()?.value().unwrap_or(false))
}

/// Runs the credentials wizard and writes the resulting profile.
pub fn create_credentials(config: &CredentialsConfig, args: CreateArgs) -> Result<()> {
    let provider: Rc<dyn PromptProvider> = if args.non_interactive {
        Rc::new(scripted_provider(&args)?)
    } else {
        interactive_provider(&args)
    };
    create_credentials_with(config, &args, provider)
}

/// Same as [`create_credentials`] with an explicit prompt provider.
pub fn create_credentials_with(
    config: &CredentialsConfig,
    args: &CreateArgs,
    provider: Rc<dyn PromptProvider>,
) -> Result<()> {
    if !confirm_overwrite(config, args, &provider)? {
        println!("Keeping the existing credentials file.");
        return Ok(());
    }

    let default_profile = args.profile.as_deref().unwrap_or(DEFAULT_PROFILE_NAME);
    let answers = match credentials_wizard(provider, default_profile).run()? {
        WizardOutcome::Completed(answers) => answers,
        WizardOutcome::Cancelled => {
            println!("Credentials setup cancelled.");
            return Ok(());
        }
    };

    let profile = profile_from_answers(&answers)?;
    generate_credentials_file(config, &profile)?;
    println!(
        "Profile '{}' saved to {}.",
        profile.profile_name,
        config.credentials_file.display()
    );
    Ok(())
}

/// Prints the construct tree of `args.tree_file`.
pub fn print_tree(args: &TreeArgs) -> Result<()> {
    let tree = load_tree(&args.tree_file)?;
    let label = args
        .tree_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| tree.tree.id.clone());
    let app = AppNode::new(&label, &tree);
    log::debug!("Rendering construct tree '{}' (depth limit {:?})", label, args.depth);

    let show_all = |_: &ConstructTreeEntity| true;
    let include: &InclusionPredicate =
        if args.all { &show_all } else { &include_construct_in_tree };
    let options = RenderOptions { max_depth: args.depth, include };
    print!("{}", render_app(&app, &options));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> CredentialsConfig {
        CredentialsConfig::new(dir.path().join("credentials"), dir.path().join("config"))
    }

    #[test]
    fn non_interactive_requires_both_keys() {
        let args = CreateArgs {
            access_key: Some("AKIA".into()),
            non_interactive: true,
            ..Default::default()
        };
        assert!(matches!(scripted_provider(&args), Err(Error::ValidationError(_))));
    }

    #[test]
    fn non_interactive_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.credentials_file, "[old]\n").unwrap();
        let args = CreateArgs {
            access_key: Some("AKIA".into()),
            secret_key: Some("secret".into()),
            non_interactive: true,
            ..Default::default()
        };

        let err = create_credentials(&config, args).unwrap_err();
        assert!(matches!(err, Error::CredentialsFileExistsError { .. }));
        assert_eq!(std::fs::read_to_string(&config.credentials_file).unwrap(), "[old]\n");
    }

    #[test]
    fn declined_overwrite_keeps_the_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.credentials_file, "[old]\n").unwrap();
        let prompt = format!("Overwrite existing '{}'?", config.credentials_file.display());
        let provider = AutomaticPrompter::new().with_confirmation_response(&prompt, false);

        create_credentials_with(&config, &CreateArgs::default(), Rc::new(provider)).unwrap();
        assert_eq!(std::fs::read_to_string(&config.credentials_file).unwrap(), "[old]\n");
    }

    #[test]
    fn prefilled_flags_skip_their_prompts() {
        let prompter = PrefilledPrompter {
            args: CreateArgs { profile: Some("dev".into()), ..Default::default() },
            fallback: DialoguerPrompter::new(),
        };
        assert_eq!(prompter.prefilled(PROFILE_NAME), Some(&"dev".to_string()));
        assert_eq!(prompter.prefilled(ACCESS_KEY), None);
    }
}
