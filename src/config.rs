use std::env;
use std::path::PathBuf;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://pro.openbb.co",
    "https://pro.openbb.dev",
    "http://localhost:1420",
];

/// Runtime settings for both backends, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address for the widget/config backend
    pub bind_addr: String,
    /// Listen address for the document backend
    pub documents_bind_addr: String,
    /// Directory holding the entity CSV files
    pub data_dir: PathBuf,
    pub apps_file: PathBuf,
    /// Only the document backend serves widgets.json from disk
    pub widgets_file: PathBuf,
    /// Root of the PDF tree
    pub documents_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7779".to_string(),
            documents_bind_addr: "0.0.0.0:8003".to_string(),
            data_dir: PathBuf::from("."),
            apps_file: PathBuf::from("apps.json"),
            widgets_file: PathBuf::from("widgets.json"),
            documents_dir: PathBuf::from("dummy_pdf"),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load settings, falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        // Load .env (if present) so overrides from file are visible
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("SFS_BIND_ADDR").unwrap_or(defaults.bind_addr),
            documents_bind_addr: non_empty("SFS_DOCUMENTS_BIND_ADDR")
                .unwrap_or(defaults.documents_bind_addr),
            data_dir: non_empty("SFS_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            apps_file: non_empty("SFS_APPS_FILE").map(PathBuf::from).unwrap_or(defaults.apps_file),
            widgets_file: non_empty("SFS_WIDGETS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.widgets_file),
            documents_dir: non_empty("SFS_DOCUMENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.documents_dir),
            cors_origins: non_empty("SFS_CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.bind_addr, "127.0.0.1:7779");
        assert_eq!(config.documents_dir, PathBuf::from("dummy_pdf"));
        assert_eq!(config.cors_origins.len(), 3);
    }

    #[test]
    fn overrides_and_origin_list_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("SFS_DATA_DIR", "/var/lib/sfs"),
            ("SFS_CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("SFS_BIND_ADDR", "   "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/sfs"));
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.bind_addr, "127.0.0.1:7779");
    }
}
