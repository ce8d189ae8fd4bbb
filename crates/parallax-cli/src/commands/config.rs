use std::path::Path;

use anyhow::{bail, Result};

use parallax_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration already exists at {}\nUse --force to overwrite it.",
            config_path.display()
        );
    }

    AppConfig::default().save_to(config_path)?;
    tracing::info!(path = %config_path.display(), "Wrote default configuration");
    println!("Wrote {}", config_path.display());
    Ok(())
}
