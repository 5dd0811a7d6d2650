//! Manifest normalization
//!
//! Turns the loosely shaped resolver manifest into the stable structure the
//! client renders: one sanitized title shared by every file name, audio
//! tracks forced to `.mp3`, human-readable labels and size estimates.
//! Everything here is pure.

use crate::models::{DownloadResult, NormalizedMedia, Platform, RawMedia};

/// Longest title stem kept for file names
pub const MAX_TITLE_CHARS: usize = 100;

/// Title used when sanitization leaves nothing behind
pub const FALLBACK_TITLE: &str = "video";

const AUDIO_EXTENSION: &str = "mp3";
const FALLBACK_VIDEO_EXTENSION: &str = "mp4";
const UNKNOWN_VALUE: &str = "?";
const BYTES_PER_MB: u128 = 1024 * 1024;

/// Build the client-facing manifest for one resolution.
///
/// The thumbnail is left empty; callers that have one attach it with
/// [`DownloadResult::with_thumbnail`].
pub fn normalize(raw_title: &str, raw_medias: &[RawMedia], platform: Platform) -> DownloadResult {
    let title = sanitize_title(raw_title);
    let downloads = raw_medias
        .iter()
        .map(|media| normalize_media(&title, media, platform))
        .collect();

    DownloadResult {
        title,
        thumbnail: String::new(),
        platform,
        downloads,
    }
}

/// Keep ASCII word characters, whitespace, `-` and `.`; cap the length;
/// trim. Applying it twice changes nothing.
pub fn sanitize_title(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| is_title_char(*c))
        .take(MAX_TITLE_CHARS)
        .collect();

    match kept.trim_matches(is_title_whitespace) {
        "" => FALLBACK_TITLE.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn is_title_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || is_title_whitespace(c) || c == '-' || c == '.'
}

/// The ECMAScript `\s` set: narrower than [`char::is_whitespace`]
/// (no U+0085) but including the BOM.
fn is_title_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `"<megabytes>MB"` with one decimal, rounded half up, or `"?"`
pub fn format_size(content_length: Option<u64>) -> String {
    match content_length {
        Some(bytes) if bytes > 0 => {
            let tenths = (u128::from(bytes) * 10 + BYTES_PER_MB / 2) / BYTES_PER_MB;
            format!("{}.{}MB", tenths / 10, tenths % 10)
        }
        _ => UNKNOWN_VALUE.to_string(),
    }
}

fn normalize_media(title: &str, media: &RawMedia, platform: Platform) -> NormalizedMedia {
    let ext = corrected_extension(media);

    NormalizedMedia {
        label: build_label(media, &ext, platform),
        url: media.url.clone(),
        media_type: media.media_type.clone(),
        filename: format!("{title}.{ext}"),
        size: format_size(media.content_length),
        ext,
    }
}

// Audio is always delivered as mp3 whatever upstream claims, so a track
// never ends up as "name.mp4.mp3".
fn corrected_extension(media: &RawMedia) -> String {
    if media.is_audio_track() {
        return AUDIO_EXTENSION.to_string();
    }
    media
        .extension
        .clone()
        .unwrap_or_else(|| FALLBACK_VIDEO_EXTENSION.to_string())
}

fn build_label(media: &RawMedia, ext: &str, platform: Platform) -> String {
    if media.is_audio_track() {
        return format!("🎵 Audio ({ext})");
    }

    let quality = media.quality.as_deref().unwrap_or(UNKNOWN_VALUE);
    let mut label = format!("🎬 {quality} ({ext})");

    // Only youtube splits video and audio streams, so only there is the
    // sound indicator meaningful.
    if platform == Platform::Youtube {
        label.push_str(if media.has_sound() { " 🔊" } else { " 🔇" });
    }
    label
}
