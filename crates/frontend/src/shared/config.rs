use contracts::system::session::SiteId;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub sites: SitesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Origin of the KPI REST service; empty means same origin as the page
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SitesConfig {
    pub known: Vec<u8>,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""

[sites]
known = [0, 1, 2]
"#;

/// Parse a configuration document
pub fn parse_config(contents: &str) -> Result<ClientConfig, String> {
    let config: ClientConfig =
        toml::from_str(contents).map_err(|e| format!("Invalid configuration: {}", e))?;
    config.sites.known_sites()?;
    Ok(config)
}

/// Load the embedded configuration, applying a base URL override if one is set.
///
/// Overrides that do not look like an http(s) origin are ignored.
pub fn load_config(base_url_override: Option<String>) -> Result<ClientConfig, String> {
    let mut config = parse_config(DEFAULT_CONFIG)?;

    if let Some(raw) = base_url_override {
        let candidate = raw.trim().trim_end_matches('/');
        if candidate.starts_with("http://") || candidate.starts_with("https://") {
            log::info!("Using API base URL override: {}", candidate);
            config.api.base_url = candidate.to_string();
        } else if !candidate.is_empty() {
            log::warn!("Ignoring invalid API base URL override: {}", raw);
        }
    }

    Ok(config)
}

impl SitesConfig {
    /// Configured sites as validated ids, in configuration order
    pub fn known_sites(&self) -> Result<Vec<SiteId>, String> {
        if self.known.is_empty() {
            return Err("At least one site must be configured".to_string());
        }
        self.known.iter().map(|raw| SiteId::new(*raw)).collect()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
            },
            sites: SitesConfig {
                known: SiteId::all().iter().map(SiteId::index).collect(),
            },
        }
    }
}

impl ClientConfig {
    pub fn known_sites(&self) -> Vec<SiteId> {
        // parse_config already validated the list
        self.sites.known_sites().unwrap_or_else(|_| SiteId::all())
    }
}
