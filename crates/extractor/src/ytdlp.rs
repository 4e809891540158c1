use std::process::Stdio;
use std::time::Instant;

use tracing::debug;
use vidinfo_core::error::GatewayError;
use vidinfo_core::types::RawMetadata;

use crate::{ExtractorConfig, MetadataSource};

/// Runs `yt-dlp -j --no-warnings -- <url>` once per call.
#[derive(Debug, Clone)]
pub struct YtDlp {
    config: ExtractorConfig,
}

impl YtDlp {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Invoke the tool and return its stdout.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, GatewayError> {
        if url.is_empty() {
            return Err(GatewayError::MissingParameter);
        }

        let tool = &self.config.ytdlp_path;
        let mut cmd = tokio::process::Command::new(tool);
        cmd.args(["-j", "--no-warnings", "--"])
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let started = Instant::now();
        let result = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    GatewayError::Fetch(format!("{} timed out after {limit:?}", tool.display()))
                })?,
            None => cmd.output().await,
        };

        let output = result.map_err(|e| {
            GatewayError::Fetch(format!("spawn {} failed: {e}", tool.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GatewayError::Fetch(format!(
                "{} exited with {}: {}",
                tool.display(),
                output.status,
                stderr.trim()
            )));
        }

        debug!(
            url,
            bytes = output.stdout.len(),
            elapsed = ?started.elapsed(),
            "metadata fetched"
        );
        Ok(output.stdout)
    }
}

#[async_trait::async_trait]
impl MetadataSource for YtDlp {
    async fn fetch_info(&self, url: &str) -> Result<RawMetadata, GatewayError> {
        let bytes = self.fetch(url).await?;
        parse(&bytes)
    }
}

/// Decode tool output. The top-level value must be a JSON object.
pub fn parse(bytes: &[u8]) -> Result<RawMetadata, GatewayError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| GatewayError::Parse(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(GatewayError::Parse("expected a JSON object".into()));
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::Parse(format!("unexpected shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    /// Write an executable shell script standing in for yt-dlp.
    #[cfg(unix)]
    fn script(name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!("vidinfo_{name}_{}.sh", std::process::id()));
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn tool(path: &str) -> YtDlp {
        YtDlp::new(ExtractorConfig {
            ytdlp_path: PathBuf::from(path),
            timeout: Some(Duration::from_secs(10)),
        })
    }

    #[test]
    fn parse_ytdlp_json() {
        let json = br#"{
            "id": "abc",
            "title": "Sunset",
            "thumbnail": "https://i.example/abc.jpg",
            "formats": [
                {
                    "format_id": "18",
                    "url": "https://cdn.example/18.mp4",
                    "resolution": "640x360",
                    "height": 360,
                    "ext": "mp4",
                    "vcodec": "avc1.42001E",
                    "acodec": "mp4a.40.2",
                    "filesize": 1048576
                },
                {
                    "format_id": "251",
                    "url": "https://cdn.example/251.webm",
                    "resolution": "audio only",
                    "height": null,
                    "ext": "webm",
                    "vcodec": "none",
                    "acodec": "opus"
                }
            ]
        }"#;

        let raw = parse(json).unwrap();
        assert_eq!(raw.title, "Sunset");
        assert_eq!(raw.thumbnail, "https://i.example/abc.jpg");
        assert_eq!(raw.formats.len(), 2);
        assert_eq!(raw.formats[0].height, 360);
        assert_eq!(raw.formats[0].filesize, 1_048_576);
        assert_eq!(raw.formats[1].height, 0);
        assert_eq!(raw.formats[1].resolution, "audio only");
    }

    #[test]
    fn odd_numbers_do_not_fail_the_request() {
        let json = br#"{
            "title": "Odd",
            "formats": [
                {
                    "url": "https://cdn.example/a.mp4",
                    "resolution": "640x360",
                    "height": -1,
                    "filesize": 1234.0,
                    "ext": "mp4",
                    "vcodec": "avc1",
                    "acodec": "mp4a"
                }
            ]
        }"#;

        let raw = parse(json).unwrap();
        assert_eq!(raw.formats[0].filesize, 1234);
        let info = crate::simplify(raw);
        assert_eq!(info.files[0].quality, "360p");
        assert_eq!(info.preview_url, "https://cdn.example/a.mp4");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse(b"{\"title\": ").unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
        assert_eq!(err.public_message(), "Error parsing video info");
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(matches!(parse(b"[]"), Err(GatewayError::Parse(_))));
        assert!(matches!(parse(b"\"hello\""), Err(GatewayError::Parse(_))));
    }

    #[test]
    fn parse_rejects_wrong_field_types() {
        let err = parse(br#"{"title": 5}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[test]
    fn parse_empty_object() {
        let raw = parse(b"{}").unwrap();
        assert_eq!(raw, RawMetadata::default());
    }

    #[tokio::test]
    async fn empty_url_fails_before_spawn() {
        let yt = tool("/definitely/not/a/real/yt-dlp");
        let err = yt.fetch("").await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingParameter));
    }

    #[tokio::test]
    async fn missing_binary_is_fetch_error() {
        let yt = tool("/definitely/not/a/real/yt-dlp");
        let err = yt.fetch("https://example.com/v").await.unwrap_err();
        assert!(matches!(err, GatewayError::Fetch(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_fetch_error() {
        let yt = tool("false");
        let err = yt.fetch("https://example.com/v").await.unwrap_err();
        match err {
            GatewayError::Fetch(msg) => assert!(msg.contains("exited with")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_fixed_arguments_then_url() {
        let yt = tool("echo");
        let out = yt.fetch("https://example.com/v").await.unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(line.trim(), "-j --no-warnings -- https://example.com/v");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_output_is_parse_error() {
        let yt = tool("echo");
        let err = yt.fetch_info("https://example.com/v").await.unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_is_kept_in_diagnostic() {
        let path = script("stderr", "echo 'ERROR: vidinfo-stderr-marker' >&2\nexit 3");
        let yt = YtDlp::new(ExtractorConfig {
            ytdlp_path: path,
            timeout: Some(Duration::from_secs(10)),
        });
        match yt.fetch("https://example.com/v").await.unwrap_err() {
            GatewayError::Fetch(msg) => assert!(msg.contains("vidinfo-stderr-marker")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_tool_is_killed_at_timeout() {
        let path = script("hang", "sleep 5");
        let yt = YtDlp::new(ExtractorConfig {
            ytdlp_path: path,
            timeout: Some(Duration::from_millis(200)),
        });

        let started = Instant::now();
        let err = yt.fetch("https://example.com/v").await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(3));
        match err {
            GatewayError::Fetch(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
