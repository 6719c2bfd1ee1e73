// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{MaterialError, Result};
use crate::models::{SourceCatalog, WikiSource};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "WIKI_MATERIAL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub http: HttpConfig,
    pub material: MaterialConfig,
    pub sources: BTreeMap<String, Vec<WikiSource>>,
    pub images: ImagesConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub search_limit: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaterialConfig {
    pub default_language: String,
    pub default_max_chars: usize,
    pub min_chars: usize,
    pub max_chars: usize,
}

impl MaterialConfig {
    pub fn budget_range(&self) -> RangeInclusive<usize> {
        self.min_chars..=self.max_chars
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    pub api_url: String,
    #[serde(default)]
    pub access_key: Option<String>,
    pub orientation: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizConfig {
    pub api_url: String,
    pub max_amount: u32,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| MaterialError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| MaterialError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| MaterialError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(
            "ru".to_string(),
            vec![
                WikiSource::new("wikibooks", "https://ru.wikibooks.org/w/api.php"),
                WikiSource::new("wikipedia", "https://ru.wikipedia.org/w/api.php"),
            ],
        );
        sources.insert(
            "en".to_string(),
            vec![
                WikiSource::new("wikibooks", "https://en.wikibooks.org/w/api.php"),
                WikiSource::new("vikidia", "https://en.vikidia.org/w/api.php"),
                WikiSource::new("wikipedia", "https://en.wikipedia.org/w/api.php"),
            ],
        );

        Self {
            http: HttpConfig {
                user_agent: format!(
                    "wiki_material/{} (educational material bot)",
                    env!("CARGO_PKG_VERSION")
                ),
                search_timeout_secs: 15,
                fetch_timeout_secs: 20,
                search_limit: 5,
                request_timeout_secs: 10,
            },
            material: MaterialConfig {
                default_language: "ru".to_string(),
                default_max_chars: 4000,
                min_chars: 500,
                max_chars: 20000,
            },
            sources,
            images: ImagesConfig {
                api_url: "https://api.unsplash.com/search/photos".to_string(),
                access_key: None,
                orientation: "landscape".to_string(),
            },
            quiz: QuizConfig {
                api_url: "https://opentdb.com/api.php".to_string(),
                max_amount: 50,
            },
        }
    }

    /// Immutable language -> source priority table handed to the cascade.
    pub fn source_catalog(&self) -> SourceCatalog {
        SourceCatalog::new(self.sources.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.http.search_timeout_secs == 0
            || self.http.fetch_timeout_secs == 0
            || self.http.request_timeout_secs == 0
        {
            return Err(MaterialError::Config(
                "HTTP timeouts must be greater than 0".to_string(),
            ));
        }

        if self.material.min_chars == 0 || self.material.min_chars > self.material.max_chars {
            return Err(MaterialError::Config(format!(
                "Invalid character range {}..={}",
                self.material.min_chars, self.material.max_chars
            )));
        }

        if !self
            .material
            .budget_range()
            .contains(&self.material.default_max_chars)
        {
            return Err(MaterialError::Config(format!(
                "default_max_chars {} is outside {}..={}",
                self.material.default_max_chars, self.material.min_chars, self.material.max_chars
            )));
        }

        if !self.sources.contains_key(&self.material.default_language) {
            return Err(MaterialError::Config(format!(
                "No sources configured for default language {}",
                self.material.default_language
            )));
        }

        for (language, sources) in &self.sources {
            if sources.is_empty() {
                return Err(MaterialError::Config(format!(
                    "Source list for {} is empty",
                    language
                )));
            }
            for source in sources {
                Validator::validate_url(&source.api_url).map_err(|e| {
                    MaterialError::Config(format!("Source {} for {}: {}", source.name, language, e))
                })?;
            }
        }

        Ok(())
    }
}
