use std::collections::HashSet;

use tracing::debug;
use vidinfo_core::types::{FileInfo, RawFormat, RawMetadata, VideoInfo};

/// Resolution keyword yt-dlp reports for merged or multi-track formats.
const MULTIPLE: &str = "multiple";

/// Quality used when no format qualifies and the first raw URL is offered instead.
pub const FALLBACK_QUALITY: &str = "Download";

/// A muxed mp4 with both an audio and a video track.
pub fn is_eligible(format: &RawFormat) -> bool {
    format.ext == "mp4" && format.has_video() && format.has_audio()
}

/// Display label for a format, also used as the dedup key.
pub fn quality_label(format: &RawFormat) -> String {
    if format.height > 0 {
        return format!("{}p", format.height);
    }

    if !format.resolution.is_empty() && format.resolution != MULTIPLE {
        let parts: Vec<&str> = format.resolution.split('x').collect();
        if let [_, height] = parts.as_slice() {
            return format!("{height}p");
        }
        return format.resolution.clone();
    }

    "HD".to_string()
}

/// Reduce raw metadata to the client payload.
///
/// Eligible formats are labeled in their original order and the first format
/// per label wins. The preview is the first eligible URL. When nothing is
/// eligible but formats exist, the first raw format is offered as a single
/// `Download` entry.
pub fn simplify(raw: RawMetadata) -> VideoInfo {
    let mut info = VideoInfo {
        title: raw.title,
        thumbnail: raw.thumbnail,
        ..Default::default()
    };

    let mut seen = HashSet::new();
    let mut eligible = 0usize;
    let mut preview_set = false;

    for format in raw.formats.iter().filter(|f| is_eligible(f)) {
        eligible += 1;
        let quality = quality_label(format);

        if seen.insert(quality.clone()) {
            debug!(
                format_id = %format.format_id,
                quality = %quality,
                filesize = format.filesize,
                "format kept"
            );
            info.files.push(FileInfo {
                quality,
                url: format.url.clone(),
            });
        }

        if !preview_set {
            info.preview_url = format.url.clone();
            preview_set = true;
        }
    }

    if eligible == 0 {
        if let Some(first) = raw.formats.first() {
            debug!(
                format_id = %first.format_id,
                filesize = first.filesize,
                "no muxed mp4, offering first format"
            );
            info.preview_url = first.url.clone();
            info.files.push(FileInfo {
                quality: FALLBACK_QUALITY.to_string(),
                url: first.url.clone(),
            });
        }
    }

    debug!(
        formats = raw.formats.len(),
        eligible,
        files = info.files.len(),
        "formats selected"
    );
    info
}
