use std::{env, time::Duration};

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_DOG_URL: &str = "https://dog.ceo/api/breeds/image/random";
pub const DEFAULT_TAROT_URL: &str = "https://tarotapi.dev/api/v1/cards/random";
pub const DEFAULT_MODEL_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub weather_url: String,
    pub dog_url: String,
    pub tarot_url: String,
    pub model_base: String,
    pub model: String,
    pub gateway_timeout: Duration,
    pub model_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            dog_url: DEFAULT_DOG_URL.to_string(),
            tarot_url: DEFAULT_TAROT_URL.to_string(),
            model_base: DEFAULT_MODEL_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            gateway_timeout: Duration::from_secs(5),
            model_timeout: Duration::from_secs(60),
        }
    }
}

impl AppConfig {
    /// Endpoint overrides only. API keys are entered per session, never read from the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            weather_url: var_or("WEATHER_API_URL", defaults.weather_url),
            dog_url: var_or("DOG_API_URL", defaults.dog_url),
            tarot_url: var_or("TAROT_API_URL", defaults.tarot_url),
            model_base: var_or("MODEL_API_BASE", defaults.model_base),
            model: var_or("MODEL_NAME", defaults.model),
            gateway_timeout: secs_or("GATEWAY_TIMEOUT_SECS", defaults.gateway_timeout),
            model_timeout: secs_or("MODEL_TIMEOUT_SECS", defaults.model_timeout),
        }
    }
}

fn var_or(name: &str, default: String) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

fn secs_or(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(default)
}
