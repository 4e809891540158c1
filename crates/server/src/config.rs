use std::path::PathBuf;

/// HTTP-side settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            template_path: PathBuf::from("templates/index.html"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Read `VIDINFO_BIND`, `VIDINFO_TEMPLATE` and `VIDINFO_STATIC_DIR` through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: lookup("VIDINFO_BIND").unwrap_or(defaults.bind),
            template_path: lookup("VIDINFO_TEMPLATE")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            static_dir: lookup("VIDINFO_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }
}
