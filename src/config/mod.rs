use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

// Настройки базы данных
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки JWT
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_hours: i64,
}

// Настройки хеширования паролей
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// Верхняя граница срока жизни токена: один год.
pub const MAX_TOKEN_HOURS: i64 = 24 * 365;

fn parsed_in_range<T>(
    name: &'static str,
    default: &str,
    range: std::ops::RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + ToString,
{
    let value: T = parsed_or(name, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid { name, value: value.to_string() })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parsed_or("PORT", "3000")?,
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "event_manager=debug,tower_http=debug".to_string()),
                log_format: parsed_or("LOG_FORMAT", "text")?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                pool_size: parsed_or("DB_POOL_SIZE", "10")?,
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                expires_in_hours: parsed_in_range("JWT_EXPIRES_IN_HOURS", "24", 1..=MAX_TOKEN_HOURS)?,
            },
            password: PasswordConfig {
                bcrypt_cost: parsed_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn invalid_number_reports_variable_and_value() {
        // Переменная с уникальным именем, чтобы не мешать параллельным тестам
        env::set_var("EVENT_MANAGER_TEST_PORT", "not-a-port");
        let err = parsed_or::<u16>("EVENT_MANAGER_TEST_PORT", "3000").unwrap_err();
        assert_eq!(
            err.to_string(),
            "EVENT_MANAGER_TEST_PORT has an invalid value 'not-a-port'"
        );
        env::remove_var("EVENT_MANAGER_TEST_PORT");
    }

    #[test]
    fn token_lifetime_must_be_positive_and_bounded() {
        let name = "EVENT_MANAGER_TEST_TOKEN_HOURS";
        for bad in ["0", "-2", "3000000000"] {
            env::set_var(name, bad);
            let err = parsed_in_range::<i64>(name, "24", 1..=MAX_TOKEN_HOURS).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { ref value, .. } if value == bad),
                "{bad}: {err}"
            );
        }

        env::set_var(name, "48");
        assert_eq!(parsed_in_range::<i64>(name, "24", 1..=MAX_TOKEN_HOURS).unwrap(), 48);
        env::remove_var(name);
    }

    #[test]
    fn missing_variable_falls_back_to_default() {
        let size: u32 = parsed_or("EVENT_MANAGER_TEST_UNSET_VAR", "10").unwrap();
        assert_eq!(size, 10);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            app: AppConfig {
                host: "127.0.0.1".into(),
                port: 3000,
                rust_log: "info".into(),
                log_format: LogFormat::Text,
            },
            database: DatabaseConfig { url: "postgres://localhost/events".into(), pool_size: 1 },
            jwt: JwtConfig { secret: "s".into(), expires_in_hours: 1 },
            password: PasswordConfig { bcrypt_cost: 4 },
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }
}
