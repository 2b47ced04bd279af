use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::FactorWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub fraud: FraudSettings,
    #[serde(default)]
    pub campaign: CampaignSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3004 }

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    pub timeout_secs: Option<u64>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            api_key: String::new(),
            embedding_model: default_embedding_model(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

fn default_openai_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_embedding_model() -> String { "text-embedding-ada-002".to_string() }
fn default_chat_model() -> String { "gpt-4".to_string() }
fn default_temperature() -> f32 { 0.2 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub embedding_capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Default factor weights, used when a category supplies no override table
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_category_fit_weight")]
    pub category_fit: f64,
    #[serde(default = "default_location_proximity_weight")]
    pub location_proximity: f64,
    #[serde(default = "default_budget_alignment_weight")]
    pub budget_alignment: f64,
    #[serde(default = "default_reputation_score_weight")]
    pub reputation_score: f64,
    #[serde(default = "default_time_availability_weight")]
    pub time_availability: f64,
    #[serde(default = "default_cultural_fit_weight")]
    pub cultural_fit: f64,
    #[serde(default = "default_privacy_compatibility_weight")]
    pub privacy_compatibility: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            category_fit: default_category_fit_weight(),
            location_proximity: default_location_proximity_weight(),
            budget_alignment: default_budget_alignment_weight(),
            reputation_score: default_reputation_score_weight(),
            time_availability: default_time_availability_weight(),
            cultural_fit: default_cultural_fit_weight(),
            privacy_compatibility: default_privacy_compatibility_weight(),
        }
    }
}

impl From<&WeightsConfig> for FactorWeights {
    fn from(w: &WeightsConfig) -> Self {
        FactorWeights {
            category_fit: w.category_fit,
            location_proximity: w.location_proximity,
            budget_alignment: w.budget_alignment,
            reputation_score: w.reputation_score,
            time_availability: w.time_availability,
            cultural_fit: w.cultural_fit,
            privacy_compatibility: w.privacy_compatibility,
        }
    }
}

fn default_category_fit_weight() -> f64 { 0.25 }
fn default_location_proximity_weight() -> f64 { 0.20 }
fn default_budget_alignment_weight() -> f64 { 0.15 }
fn default_reputation_score_weight() -> f64 { 0.15 }
fn default_time_availability_weight() -> f64 { 0.10 }
fn default_cultural_fit_weight() -> f64 { 0.10 }
fn default_privacy_compatibility_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct FraudSettings {
    #[serde(default = "default_price_floor")]
    pub price_floor: f64,
}

impl Default for FraudSettings {
    fn default() -> Self {
        Self { price_floor: default_price_floor() }
    }
}

fn default_price_floor() -> f64 { 1000.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignSettings {
    #[serde(default = "default_deep_link_base")]
    pub deep_link_base: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self { deep_link_base: default_deep_link_base() }
    }
}

fn default_deep_link_base() -> String { "https://matchos.dz/r".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with AFFINITY__)
    /// 4. OPENAI_API_KEY, LOG_LEVEL and LOG_FORMAT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AFFINITY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AFFINITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("AFFINITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of loaded settings
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        builder = builder.set_override("openai.api_key", api_key)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
