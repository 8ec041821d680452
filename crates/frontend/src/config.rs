use crate::shared::filter_engine::FilterStorage;
use anyhow::bail;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub pagination: PaginationConfig,
    pub saved_filters: SavedFiltersConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaginationConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SavedFiltersConfig {
    pub storage_prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub debounce_ms: u32,
}

impl SavedFiltersConfig {
    /// Storage key of one page's saved filters, e.g. "saved_filters:equipment"
    pub fn storage_key(&self, page_key: &str) -> String {
        format!("{}:{}", self.storage_prefix, page_key)
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[pagination]
page_size = 9

[saved_filters]
storage_prefix = "saved_filters"

[search]
debounce_ms = 300
"#;

/// Local storage key holding an optional TOML override
pub const CONFIG_OVERRIDE_KEY: &str = "dashboard_config";

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.pagination.page_size == 0 {
        bail!("pagination.page_size must be greater than 0");
    }
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. Override stored under `dashboard_config`
/// 2. Falls back to embedded default config
pub fn load_config(storage: &dyn FilterStorage) -> anyhow::Result<Config> {
    match storage.load(CONFIG_OVERRIDE_KEY) {
        Ok(Some(contents)) => match parse_config(&contents) {
            Ok(config) => {
                log::info!("Using configuration override from '{}'", CONFIG_OVERRIDE_KEY);
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring invalid configuration override: {}", e),
        },
        Ok(None) => {}
        Err(e) => log::warn!("Configuration override not read: {}", e),
    }

    parse_config(DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter_engine::MemoryStorage;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.pagination.page_size, 9);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(
            config.saved_filters.storage_key("equipment"),
            "saved_filters:equipment"
        );
    }

    #[test]
    fn test_override_is_used() {
        let storage = MemoryStorage::with_entry(
            CONFIG_OVERRIDE_KEY,
            "[pagination]\npage_size = 25\n[saved_filters]\nstorage_prefix = \"sf\"\n[search]\ndebounce_ms = 0\n",
        );
        let config = load_config(&storage).unwrap();
        assert_eq!(config.pagination.page_size, 25);
        assert_eq!(config.saved_filters.storage_key("leases"), "sf:leases");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let storage = MemoryStorage::with_entry(
            CONFIG_OVERRIDE_KEY,
            "[pagination]\npage_size = 0\n[saved_filters]\nstorage_prefix = \"sf\"\n[search]\ndebounce_ms = 0\n",
        );
        let config = load_config(&storage).unwrap();
        assert_eq!(config.pagination.page_size, 9);

        let storage = MemoryStorage::with_entry(CONFIG_OVERRIDE_KEY, "not toml [");
        assert_eq!(load_config(&storage).unwrap(), parse_config(DEFAULT_CONFIG).unwrap());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(parse_config("[pagination]\npage_size = 0\n[saved_filters]\nstorage_prefix = \"x\"\n[search]\ndebounce_ms = 1\n").is_err());
    }
}
