//! `RouterTabsConfig`: engine settings plus the route tree.
//!
//! Covers:
//! - `load_from` / `save_to` (YAML or JSON by extension, atomic write)
//! - `validate` (unique route types, tab routes carry a type, eager types exist)
//! - `effective_storage_dir` (configured directory or the platform data dir)

use crate::error::ConfigError;
use crate::route::RouteConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterTabsConfig {
    /// Identifier namespacing the persisted tab records
    #[serde(default = "crate::defaults::store_key")]
    pub store_key: String,

    /// Path navigated to when the active tab is closed and no sibling exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_path: Option<String>,

    /// Directory for file-backed tab storage (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Route tree, in match-priority order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterTabsConfig {
    fn default() -> Self {
        Self {
            store_key: crate::defaults::store_key(),
            fallback_path: None,
            storage_dir: None,
            routes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_for(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl RouterTabsConfig {
    /// Parse YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON text.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file (`.yaml`, `.yml` or `.json`).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let format = format_for(path)?;
        log::info!("Loading router-tabs config from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = match format {
            Format::Yaml => Self::from_yaml_str(&contents)?,
            Format::Json => Self::from_json_str(&contents)?,
        };

        log::info!(
            "Loaded {} top-level routes (store key '{}')",
            config.routes.len(),
            config.store_key
        );
        Ok(config)
    }

    /// Save the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let format = format_for(path)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let contents = match format {
            Format::Yaml => serde_yaml_ng::to_string(self)?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &contents).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;

        log::info!("Saved router-tabs config to {:?}", path);
        Ok(())
    }

    /// Check invariants the route tree relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store_key must not be empty".to_string(),
            ));
        }

        let mut types = HashSet::new();
        let mut problems = Vec::new();
        for route in &self.routes {
            route.walk(&mut |r| {
                if let Some(route_type) = &r.route_type
                    && !types.insert(route_type.as_str())
                {
                    problems.push(format!("duplicate route type '{}'", route_type));
                }
                if r.tab && r.route_type.is_none() {
                    problems.push(format!(
                        "route '{}' opens a tab but has no type",
                        r.path.as_deref().unwrap_or("<inherited>")
                    ));
                }
            });
        }

        for route in &self.routes {
            route.walk(&mut |r| {
                for eager in &r.initialize_types_on_add {
                    if !types.contains(eager.as_str()) {
                        problems.push(format!(
                            "initialize_types_on_add names unknown type '{}'",
                            eager
                        ));
                    }
                }
            });
        }

        if let Some(fallback) = &self.fallback_path
            && !fallback.starts_with('/')
        {
            problems.push(format!("fallback_path '{}' must be absolute", fallback));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }

    /// Storage directory to use for file-backed tab stores.
    pub fn effective_storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(crate::defaults::storage_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
store_key: workspace
fallback_path: /
routes:
  - path: /
    type: home
    tab: true
  - path: /users
    children:
      - path: ":id"
        type: user
        tab: true
        initialize_types_on_add: [activity]
        children:
          - path: activity
            type: activity
            tab: true
            force_initialization: true
"#;

    #[test]
    fn test_parse_sample() {
        let config = RouterTabsConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.store_key, "workspace");
        assert_eq!(config.fallback_path.as_deref(), Some("/"));
        assert_eq!(config.routes.len(), 2);

        let user = &config.routes[1].children[0];
        assert_eq!(user.route_type.as_deref(), Some("user"));
        assert!(user.tab);
        assert_eq!(user.initialize_types_on_add, vec!["activity".to_string()]);
        assert!(user.children[0].force_initialization);
    }

    #[test]
    fn test_defaults() {
        let config = RouterTabsConfig::from_yaml_str("routes: []").unwrap();
        assert_eq!(config.store_key, "router-tabs");
        assert!(config.fallback_path.is_none());
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let yaml = r#"
routes:
  - path: /a
    type: same
  - path: /b
    type: same
"#;
        let err = RouterTabsConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_tab_without_type_rejected() {
        let yaml = "routes:\n  - path: /a\n    tab: true\n";
        assert!(matches!(
            RouterTabsConfig::from_yaml_str(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_eager_type_rejected() {
        let yaml = "routes:\n  - path: /a\n    type: a\n    initialize_types_on_add: [ghost]\n";
        assert!(matches!(
            RouterTabsConfig::from_yaml_str(yaml),
            Err(ConfigError::Validation(msg)) if msg.contains("ghost")
        ));
    }

    #[test]
    fn test_relative_fallback_rejected() {
        let yaml = "fallback_path: home\nroutes: []\n";
        assert!(RouterTabsConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            RouterTabsConfig::from_yaml_str("routes: [[["),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = RouterTabsConfig::load_from(Path::new("routes.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_effective_storage_dir_prefers_configured() {
        let config = RouterTabsConfig {
            storage_dir: Some(PathBuf::from("/tmp/tabs")),
            ..RouterTabsConfig::default()
        };
        assert_eq!(config.effective_storage_dir(), PathBuf::from("/tmp/tabs"));
    }
}
