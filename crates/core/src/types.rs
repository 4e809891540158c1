use serde::{Deserialize, Deserializer, Serialize};

/// Marker yt-dlp uses for a missing audio or video track.
pub const NO_CODEC: &str = "none";

/// The parts of `yt-dlp -j` output the gateway reads. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formats: Vec<RawFormat>,
}

/// One entry of the `formats` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFormat {
    #[serde(deserialize_with = "null_as_default")]
    pub format_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// `"1280x720"`, or a keyword such as `"audio only"` / `"multiple"`.
    #[serde(deserialize_with = "null_as_default")]
    pub resolution: String,
    /// Zero or negative means unknown.
    #[serde(deserialize_with = "lenient_i64")]
    pub height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ext: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vcodec: String,
    #[serde(deserialize_with = "null_as_default")]
    pub acodec: String,
    /// Bytes, when the tool knows them. Logged, never sent to clients.
    #[serde(deserialize_with = "lenient_u64")]
    pub filesize: u64,
}

impl RawFormat {
    pub fn has_video(&self) -> bool {
        self.vcodec != NO_CODEC
    }

    pub fn has_audio(&self) -> bool {
        self.acodec != NO_CODEC
    }
}

/// Simplified payload returned by `GET /api/video`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub preview_url: String,
    /// First-seen order; `quality` is unique within the list.
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub quality: String,
    pub url: String,
}

/// yt-dlp writes `null` for unknown values; treat it the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer or float; `null` and non-numbers read as 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0))
}

/// Like [`lenient_i64`], with negatives also read as 0.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        })
        .unwrap_or(0))
}
