use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::Args;
use std::path::PathBuf;

/// Print the effective configuration as TOML
#[derive(Args)]
pub struct ConfigCommand {
    /// Read this file instead of ./token-carry.toml
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = match &self.path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        print!("{}", render_config(&config)?);
        Ok(())
    }
}

pub fn render_config(config: &AppConfig) -> AppResult<String> {
    Ok(toml::to_string_pretty(config)?)
}
