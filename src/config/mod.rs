use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_CONFERENCE_NAME: &str = "Go Conference";
pub const DEFAULT_CONFERENCE_TICKETS: u32 = 50;
pub const DEFAULT_CONFIRMATION_DELAY_SECS: u64 = 10;
pub const DEFAULT_RUST_LOG: &str = "conference_booking=warn";

// Главная структура конфигурации
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub conference_name: String,
    pub conference_tickets: u32,
    pub confirmation_delay_secs: u64,
    pub rust_log: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("BOOKING_CONFERENCE_TICKETS must be greater than zero")]
    NoTickets,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            conference_name: DEFAULT_CONFERENCE_NAME.to_string(),
            conference_tickets: DEFAULT_CONFERENCE_TICKETS,
            confirmation_delay_secs: DEFAULT_CONFIRMATION_DELAY_SECS,
            rust_log: DEFAULT_RUST_LOG.to_string(),
        }
    }
}

impl Config {
    /// Собирает настройки: значения по умолчанию, затем переменные `BOOKING_*`.
    /// `RUST_LOG` читается без префикса, как его ожидает tracing-subscriber.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("conference_name", DEFAULT_CONFERENCE_NAME)?
            .set_default("conference_tickets", i64::from(DEFAULT_CONFERENCE_TICKETS))?
            .set_default("confirmation_delay_secs", DEFAULT_CONFIRMATION_DELAY_SECS as i64)?
            .set_default("rust_log", DEFAULT_RUST_LOG)?
            .add_source(config::Environment::with_prefix("BOOKING").try_parsing(true))
            .set_override_option("rust_log", env::var("RUST_LOG").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.conference_tickets == 0 {
            return Err(ConfigError::NoTickets);
        }
        Ok(())
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_secs(self.confirmation_delay_secs)
    }
}
