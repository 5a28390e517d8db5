use anyhow::Result;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::error::ShowcaseError;

pub static CONFIG_FILE: &str = "showcase.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discord_token: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub database_url: String,
    /// Base of the public site, used for profile links
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Image shown when a project has no usable preview
    #[serde(default)]
    pub placeholder_image: Option<String>,
    /// Check that derived preview images actually load before showing them
    #[serde(default = "default_true")]
    pub verify_thumbnails: bool,
    /// Reply to chat messages containing project links
    #[serde(default = "default_true")]
    pub link_previews: bool,
}

fn default_prefix() -> String {
    "~".into()
}

fn default_site_url() -> String {
    "http://localhost:8080".into()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn get_config() -> Result<Self> {
        let config: Self = Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("SHOWCASE_"))
            .extract()?;
        if config.discord_token.is_empty() {
            return Err(ShowcaseError::ConfigToken.into());
        }
        Ok(config)
    }

    pub fn placeholder(&self) -> String {
        match &self.placeholder_image {
            Some(url) => url.clone(),
            None => format!("{}/placeholder.svg", self.site_url.trim_end_matches('/')),
        }
    }
}
