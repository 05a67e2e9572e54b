//! Models command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the models command.
pub fn execute_models(config: &Config, formatter: &Formatter) -> Result<()> {
    let active = config.get_active_profile()?.model_id()?;
    println!("{}", formatter.format_models(active));
    Ok(())
}
