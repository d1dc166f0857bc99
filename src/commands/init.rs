//! Initialize authgate in the current directory

use std::fs;

use authgate::config::AppConfig;
use authgate::output::{OperationResult, OutputMode};
use authgate::paths;

/// Write a default `.authgate.toml`
pub fn init(force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let config_path = paths::project_config();

    if config_path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists). Use --force to overwrite.",
                config_path.display()
            ),
        }
        .render(mode);
        return Ok(());
    }

    let content = format!(
        "# authgate configuration\n\
         # The model API key is read from the GEMINI_API_KEY environment variable.\n\n{}",
        AppConfig::default().to_toml_string()?
    );
    fs::write(&config_path, content)?;

    OperationResult {
        success: true,
        message: format!("Created {}", config_path.display()),
    }
    .render(mode);
    Ok(())
}
