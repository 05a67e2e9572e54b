//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kashshaf_domain::ModelId;
use kashshaf_llm::openai::DEFAULT_ENDPOINT;
use std::path::PathBuf;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            model,
            endpoint,
            api_key,
            template,
        } => set_profile(config, name, model, endpoint, api_key, template, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for name in config.profile_names() {
        let profile = &config.profiles[name];
        if name == config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile_details(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile_details(profile, "  ");

    Ok(())
}

fn print_profile_details(profile: &Profile, indent: &str) {
    println!("{}Model: {}", indent, profile.model);
    println!("{}Endpoint: {}", indent, profile.endpoint);
    if let Some(key) = profile.masked_api_key() {
        println!("{}API key: {}", indent, key);
    }
    if let Some(template) = &profile.template {
        println!("{}Template: {}", indent, template.display());
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    model: ModelId,
    endpoint: Option<String>,
    api_key: Option<String>,
    template: Option<PathBuf>,
    formatter: &Formatter,
) -> Result<()> {
    let profile = Profile {
        model: model.as_str().to_string(),
        endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        api_key,
        template,
    };

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn temp_config(dir: &tempfile::TempDir) -> Config {
        Config::load_from(dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "fast".to_string(),
            ModelId::Gpt35Turbo,
            None,
            Some("sk-test".to_string()),
            None,
            &formatter,
        )
        .unwrap();

        assert_eq!(config.profiles["fast"].model, "gpt-3.5-turbo");
        assert_eq!(config.profiles["fast"].endpoint, DEFAULT_ENDPOINT);

        switch_profile(&mut config, "fast".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "fast");

        // persisted
        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "fast");
        assert_eq!(reloaded.profiles["fast"].api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(matches!(result, Err(CliError::NotPermitted(_))));
    }

    #[test]
    fn test_delete_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);
        config.set_profile("old".to_string(), Profile::default());

        delete_profile(&mut config, "old".to_string(), &formatter).unwrap();
        assert!(!config.profiles.contains_key("old"));
        assert!(!temp_config(&dir).profiles.contains_key("old"));
    }
}
