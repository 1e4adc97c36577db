use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Defaults for occurrence generation and preview windows
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct GenerationConfig {
    /// Default lookahead window in months for `generate`
    pub lookahead_months: u32,
    /// Default number of occurrences shown by `preview`
    pub preview_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            lookahead_months: 12,
            preview_count: 5,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("fundops.toml"))
            .merge(Env::prefixed("FUNDOPS_"))
            .extract()
    }
}
