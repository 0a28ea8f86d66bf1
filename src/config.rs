use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::plugins::LocalPlugin;
use crate::services::KNOWN_SERVICES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Deadline for a whole aggregation request, across every backend.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL per known service name. Optional services may be left out.
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
    #[serde(default = "default_backend_timeout_ms")]
    pub backend_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_backend_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    #[serde(default = "default_application_name")]
    pub application_name: String,
    #[serde(default)]
    pub plugins: Vec<LocalPlugin>,
}

const fn default_port() -> u16 {
    8084
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    30_000
}

const fn default_backend_timeout_ms() -> u64 {
    10_000
}

fn default_application_name() -> String {
    "spinnaker".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            urls: BTreeMap::new(),
            backend_timeout_ms: default_backend_timeout_ms(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_backend_timeout_ms(),
        }
    }
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            application_name: default_application_name(),
            plugins: Vec::new(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            services: ServicesConfig::default(),
            tasks: TasksConfig::default(),
            extensions: ExtensionsConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: GatewayConfig = toml::from_str(&content).map_err(|e| {
            GatewayError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Environment variables win over whatever was loaded before.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PLUGIN_GATEWAY_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| GatewayError::config_error("Invalid PLUGIN_GATEWAY_PORT"))?;
        }

        if let Ok(log_level) = std::env::var("PLUGIN_GATEWAY_LOG_LEVEL") {
            self.server.log_level = log_level;
        }

        if let Ok(timeout) = std::env::var("PLUGIN_GATEWAY_REQUEST_TIMEOUT_MS") {
            self.server.request_timeout_ms = timeout.parse().map_err(|_| {
                GatewayError::config_error("Invalid PLUGIN_GATEWAY_REQUEST_TIMEOUT_MS")
            })?;
        }

        if let Ok(timeout) = std::env::var("PLUGIN_GATEWAY_BACKEND_TIMEOUT_MS") {
            self.services.backend_timeout_ms = timeout.parse().map_err(|_| {
                GatewayError::config_error("Invalid PLUGIN_GATEWAY_BACKEND_TIMEOUT_MS")
            })?;
        }

        if let Ok(application) = std::env::var("PLUGIN_GATEWAY_APPLICATION") {
            if !application.trim().is_empty() {
                self.extensions.application_name = application.trim().to_string();
            }
        }

        if let Ok(url) = std::env::var("PLUGIN_GATEWAY_TASKS_URL") {
            if !url.trim().is_empty() {
                self.tasks.base_url = Some(url.trim().to_string());
            }
        }

        for spec in KNOWN_SERVICES {
            let var = format!("PLUGIN_GATEWAY_{}_URL", spec.name.to_uppercase());
            if let Ok(url) = std::env::var(&var) {
                if !url.trim().is_empty() {
                    self.services
                        .urls
                        .insert(spec.name.to_string(), url.trim().to_string());
                }
            }
        }

        Ok(())
    }

    /// Configured service names that match no known service.
    pub fn unknown_service_urls(&self) -> Vec<&str> {
        self.services
            .urls
            .keys()
            .map(String::as_str)
            .filter(|name| !KNOWN_SERVICES.iter().any(|spec| spec.name == *name))
            .collect()
    }

    /// Required backends and the task service must be reachable before we serve.
    pub fn validate(&self) -> Result<()> {
        for name in self.unknown_service_urls() {
            tracing::warn!(service = name, "Ignoring base URL for unknown service");
        }

        let missing: Vec<&str> = KNOWN_SERVICES
            .iter()
            .filter(|spec| spec.is_remote() && !spec.optional)
            .filter(|spec| !self.services.urls.contains_key(spec.name))
            .map(|spec| spec.name)
            .collect();
        if !missing.is_empty() {
            return Err(GatewayError::config_error(format!(
                "Missing base URL for required services: {}",
                missing.join(", ")
            )));
        }

        if self.tasks.base_url.is_none() {
            return Err(GatewayError::config_error("Missing tasks base_url"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: &[&str] = &[
        "PLUGIN_GATEWAY_PORT",
        "PLUGIN_GATEWAY_LOG_LEVEL",
        "PLUGIN_GATEWAY_APPLICATION",
        "PLUGIN_GATEWAY_TASKS_URL",
        "PLUGIN_GATEWAY_ECHO_URL",
        "PLUGIN_GATEWAY_IGOR_URL",
        "PLUGIN_GATEWAY_CLOUDDRIVER_URL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn required_urls() -> BTreeMap<String, String> {
        ["clouddriver", "fiat", "front50", "orca"]
            .into_iter()
            .map(|name| (name.to_string(), format!("http://{}:7002", name)))
            .collect()
    }

    #[test]
    fn parses_toml_with_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [server]
            port = 9000
            log_level = "debug"

            [services.urls]
            clouddriver = "http://clouddriver:7002"

            [tasks]
            base_url = "http://orca:8083"

            [[extensions.plugins]]
            id = "io.armory.gate.banner"
            version = "1.2.0"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_ms, 30_000);
        assert_eq!(config.services.backend_timeout_ms, 10_000);
        assert_eq!(config.extensions.application_name, "spinnaker");
        assert_eq!(config.extensions.plugins.len(), 1);
        assert_eq!(
            config.services.urls.get("clouddriver").map(String::as_str),
            Some("http://clouddriver:7002")
        );
    }

    #[test]
    fn server_section_falls_back_to_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [tasks]
            base_url = "http://orca"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8084);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.request_timeout_ms, 30_000);

        let config: GatewayConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_level, "info");
    }

    #[test]
    fn validate_requires_non_optional_services() {
        let mut config = GatewayConfig::default();
        config.tasks.base_url = Some("http://orca:8083".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("clouddriver"));

        config.services.urls = required_urls();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_requires_tasks_url() {
        let mut config = GatewayConfig::default();
        config.services.urls = required_urls();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reports_unknown_service_urls() {
        let mut config = GatewayConfig::default();
        config.services.urls = required_urls();
        config
            .services
            .urls
            .insert("clouddrivr".to_string(), "http://typo:7002".to_string());
        assert_eq!(config.unknown_service_urls(), vec!["clouddrivr"]);
    }

    #[test]
    #[serial]
    fn env_overlay_applies_service_urls() {
        clear_env();
        std::env::set_var("PLUGIN_GATEWAY_PORT", "9100");
        std::env::set_var("PLUGIN_GATEWAY_APPLICATION", "  plugins  ");
        std::env::set_var("PLUGIN_GATEWAY_TASKS_URL", " http://orca:8083 ");
        std::env::set_var("PLUGIN_GATEWAY_ECHO_URL", " http://echo:8089 ");
        std::env::set_var("PLUGIN_GATEWAY_IGOR_URL", "   ");

        let config = GatewayConfig::from_env();
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.extensions.application_name, "plugins");
        assert_eq!(config.tasks.base_url.as_deref(), Some("http://orca:8083"));
        assert_eq!(
            config.services.urls.get("echo").map(String::as_str),
            Some("http://echo:8089")
        );
        assert!(!config.services.urls.contains_key("igor"));
    }

    #[test]
    #[serial]
    fn env_overlay_wins_over_file_values() {
        clear_env();
        let mut config: GatewayConfig = toml::from_str(
            r#"
            [server]
            log_level = "warn"

            [services.urls]
            clouddriver = "http://from-file:7002"
            "#,
        )
        .unwrap();
        std::env::set_var("PLUGIN_GATEWAY_LOG_LEVEL", "debug");
        std::env::set_var("PLUGIN_GATEWAY_CLOUDDRIVER_URL", "http://from-env:7002");

        let result = config.apply_env();
        clear_env();
        result.unwrap();

        assert_eq!(config.server.log_level, "debug");
        assert_eq!(
            config.services.urls.get("clouddriver").map(String::as_str),
            Some("http://from-env:7002")
        );
    }

    #[test]
    #[serial]
    fn invalid_port_is_a_config_error() {
        clear_env();
        std::env::set_var("PLUGIN_GATEWAY_PORT", "not-a-port");

        let result = GatewayConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(GatewayError::Config(_))));
    }
}
