//! Template command implementation.

use crate::cli::{TemplateAction, TemplateArgs};
use crate::commands::analyze::load_template;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kashshaf_extractor::PromptTemplate;
use std::fs;
use std::path::Path;

/// Execute the template command.
pub fn execute_template(args: TemplateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        TemplateAction::Show => show_template(config),
        TemplateAction::Init { path, force } => init_template(&path, force, formatter),
    }
}

/// Print the active profile's template, or the built-in one.
fn show_template(config: &Config) -> Result<()> {
    let profile = config.get_active_profile()?;
    let template = load_template(profile.template.as_deref())?;
    print!("{}", template.to_toml()?);
    Ok(())
}

/// Write the built-in template to a file.
fn init_template(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::NotPermitted(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    fs::write(path, PromptTemplate::default().to_toml()?)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default template to {}", path.display()))
    );
    Ok(())
}
