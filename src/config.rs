use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub switcher: SwitcherConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Путь к файлу лога. None - лог в stderr.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitcherConfig {
    /// Раскладка по умолчанию для окон без запомненной раскладки.
    /// None - новое окно оставляет текущую раскладку как есть.
    pub default_layout: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaemonConfig {
    pub background: bool,
    /// Путь к lock-файлу единственного экземпляра. None - файл в системном
    /// каталоге временных файлов.
    pub lock_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            default_layout: None,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            background: false,
            lock_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            switcher: SwitcherConfig::default(),
            daemon: DaemonConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SWAY_XKB_"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "full" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек переключателя
        if let Some(layout) = &self.switcher.default_layout {
            if layout.is_empty() {
                anyhow::bail!("default_layout не может быть пустой строкой");
            }
        }

        Ok(())
    }

    /// Путь к lock-файлу с учётом значения по умолчанию.
    pub fn lock_path(&self) -> PathBuf {
        self.daemon
            .lock_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sway-xkb-rust.lock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.switcher.default_layout.is_none());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_default_layout_rejected() {
        let mut config = Config::default();
        config.switcher.default_layout = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extract_from_toml() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                [logging]
                level = "debug"
                format = "full"

                [switcher]
                default_layout = "us"
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.switcher.default_layout.as_deref(), Some("us"));
        // Секция daemon не задана - берётся значение по умолчанию
        assert!(!config.daemon.background);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lock_path_default() {
        let config = Config::default();
        assert!(config
            .lock_path()
            .ends_with("sway-xkb-rust.lock"));
    }
}
