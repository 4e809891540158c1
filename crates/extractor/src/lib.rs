#![allow(clippy::collapsible_if)]
pub mod select;
pub mod ytdlp;

use std::path::PathBuf;
use std::time::Duration;

use vidinfo_core::error::GatewayError;
use vidinfo_core::types::RawMetadata;

pub use select::simplify;
pub use ytdlp::YtDlp;

/// Extraction tool configuration.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub ytdlp_path: PathBuf,
    /// Upper bound on one tool invocation. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from("yt-dlp"),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ExtractorConfig {
    /// Read `VIDINFO_YTDLP` and `VIDINFO_FETCH_TIMEOUT_SECS` through `lookup`.
    /// A timeout of 0 disables the bound; unparsable values keep the default.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let ytdlp_path = lookup("VIDINFO_YTDLP")
            .map(PathBuf::from)
            .unwrap_or(defaults.ytdlp_path);
        let timeout_secs =
            lookup("VIDINFO_FETCH_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok());
        let timeout = match timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.timeout,
        };
        Self {
            ytdlp_path,
            timeout,
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }
}

/// Something that can turn a page URL into raw format metadata.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_info(&self, url: &str) -> Result<RawMetadata, GatewayError>;
}
