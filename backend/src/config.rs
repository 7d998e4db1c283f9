use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
    pub localization: LocalizationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

/// The `[localization]` config section, turned into a `LocaleCatalog` at
/// startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Culture applied when no provider matches. The empty string is the
    /// invariant culture and is a valid default.
    pub default_culture: String,
    pub default_ui_culture: String,
    pub supported_cultures: Vec<String>,
    pub supported_ui_cultures: Vec<String>,
    pub fallback_to_parent_cultures: bool,
    pub fallback_to_parent_ui_cultures: bool,
    pub apply_to_response_headers: bool,
    /// Provider chain in consultation order. Known names: "route",
    /// "accept-language".
    pub providers: Vec<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file (explicit path first, then well-known
    ///    locations)
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(config_path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let path = config_path
            .map(|p| p.to_string())
            .or_else(Self::find_config_file);
        let mut config = if let Some(path) = path {
            Self::from_toml(&path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,greeting_service=debug")
    /// - APP_DEFAULT_CULTURE: Default culture when no provider matches
    /// - APP_DEFAULT_UI_CULTURE: Default UI culture when no provider matches
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(culture) = std::env::var("APP_DEFAULT_CULTURE") {
            self.localization.default_culture = culture;
            tracing::info!(
                "Override localization.default_culture from env: {}",
                self.localization.default_culture
            );
        }

        if let Ok(culture) = std::env::var("APP_DEFAULT_UI_CULTURE") {
            self.localization.default_ui_culture = culture;
            tracing::info!(
                "Override localization.default_ui_culture from env: {}",
                self.localization.default_ui_culture
            );
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        // Validate server port
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        // Supported lists are ordered and unique (case-insensitive); a
        // duplicate would make list order ambiguous.
        ensure_unique("localization.supported_cultures", &self.localization.supported_cultures)?;
        ensure_unique(
            "localization.supported_ui_cultures",
            &self.localization.supported_ui_cultures,
        )?;

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

fn ensure_unique(section: &str, names: &[String]) -> Result<(), anyhow::Error> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        let lowered = name.to_ascii_lowercase();
        if seen.contains(&lowered) {
            anyhow::bail!("{} contains duplicate entry: {}", section, name);
        }
        seen.push(lowered);
    }
    Ok(())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,greeting_service=debug".to_string(),
            file: Some("logs/greeting-service.log".to_string()),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_culture: "vi".to_string(),
            default_ui_culture: "vi".to_string(),
            supported_cultures: vec!["en".to_string(), "vi".to_string()],
            supported_ui_cultures: vec!["en".to_string(), "vi".to_string()],
            fallback_to_parent_cultures: true,
            fallback_to_parent_ui_cultures: true,
            apply_to_response_headers: true,
            providers: vec!["route".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_supported_culture_rejected() {
        let mut config = Config::default();
        config.localization.supported_cultures = vec!["en".to_string(), "EN".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_cultures"));
    }

    #[test]
    fn test_localization_section_parses() {
        let toml_str = r#"
            [localization]
            default_culture = "en"
            default_ui_culture = "en"
            supported_cultures = ["en", "en-GB", "vi"]
            supported_ui_cultures = ["en", "vi"]
            fallback_to_parent_cultures = false
            fallback_to_parent_ui_cultures = true
            apply_to_response_headers = false
            providers = ["route", "accept-language"]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.localization.default_culture, "en");
        assert_eq!(config.localization.supported_cultures.len(), 3);
        assert!(!config.localization.fallback_to_parent_cultures);
        assert!(!config.localization.apply_to_response_headers);
        assert_eq!(config.localization.providers, vec!["route", "accept-language"]);
        // Untouched sections keep their defaults
        assert_eq!(config.server.port, 8080);
    }
}
