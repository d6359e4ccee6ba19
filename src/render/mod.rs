//! Result renderer — turns a [`RequestResult`] into something playable.
//!
//! The service may return either an absolute URL or a root-relative path
//! (`/output/abc.mp4`).  [`resolve_media_url`] normalises both to an absolute
//! address; [`PlaybackSurface`] bundles that address with the fixed playback
//! attributes the view uses.
//!
//! ```
//! use text_to_video::render::resolve_media_url;
//!
//! let base = "http://localhost:5000";
//! assert_eq!(resolve_media_url("/media/out.mp4", base), "http://localhost:5000/media/out.mp4");
//! assert_eq!(resolve_media_url("https://cdn.example.com/v.mp4", base), "https://cdn.example.com/v.mp4");
//! ```

use crate::client::RequestResult;

/// Prefixes that mark a locator as already absolute.
const ABSOLUTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Container type handed to the player.
pub const VIDEO_MIME: &str = "video/mp4";

/// Static notice shown with the surface for when playback is unavailable.
pub const UNSUPPORTED_NOTICE: &str =
    "Dein System kann das Video nicht direkt abspielen. Öffne den Link im Browser.";

/// Resolve `locator` against `base_url` unless it is already absolute.
pub fn resolve_media_url(locator: &str, base_url: &str) -> String {
    let locator = locator.trim();
    if is_absolute(locator) {
        return locator.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if locator.starts_with('/') {
        format!("{base}{locator}")
    } else {
        format!("{base}/{locator}")
    }
}

fn is_absolute(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    ABSOLUTE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

// ---------------------------------------------------------------------------
// PlaybackSurface
// ---------------------------------------------------------------------------

/// Everything the view needs to present one generated video.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSurface {
    /// Absolute address of the video.
    pub src: String,
    pub mime: &'static str,
    /// Show play / copy controls.
    pub controls: bool,
    /// Hand the video to the system player as soon as it arrives.
    pub autoplay: bool,
    pub unsupported_notice: &'static str,
    /// Absolute address of the narration track, when provided.
    pub audio_src: Option<String>,
}

impl PlaybackSurface {
    pub fn for_result(result: &RequestResult, base_url: &str) -> Self {
        Self {
            src: resolve_media_url(&result.media_locator, base_url),
            mime: VIDEO_MIME,
            controls: true,
            autoplay: true,
            unsupported_notice: UNSUPPORTED_NOTICE,
            audio_src: result
                .audio_locator
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .map(|l| resolve_media_url(l, base_url)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000";

    fn result(url: &str) -> RequestResult {
        RequestResult {
            media_locator: url.into(),
            status_message: Some("done".into()),
            cost_indicator: None,
            media_kind: None,
            audio_locator: None,
            service_used: None,
        }
    }

    #[test]
    fn root_relative_locator_gets_base_prefix() {
        assert_eq!(
            resolve_media_url("/media/out.mp4", BASE),
            "http://localhost:5000/media/out.mp4"
        );
    }

    #[test]
    fn absolute_locator_is_unchanged() {
        assert_eq!(
            resolve_media_url("https://cdn.example.com/v.mp4", BASE),
            "https://cdn.example.com/v.mp4"
        );
        assert_eq!(
            resolve_media_url("http://other:9000/x.mp4", BASE),
            "http://other:9000/x.mp4"
        );
    }

    #[test]
    fn bare_relative_locator_gets_a_separator() {
        assert_eq!(
            resolve_media_url("output/a.mp4", "http://localhost:5000/"),
            "http://localhost:5000/output/a.mp4"
        );
    }

    #[test]
    fn surrounding_whitespace_is_dropped_from_locators() {
        assert_eq!(
            resolve_media_url("  https://x/v.mp4 ", BASE),
            "https://x/v.mp4"
        );
        assert_eq!(
            resolve_media_url(" /media/out.mp4\n", BASE),
            "http://localhost:5000/media/out.mp4"
        );
    }

    #[test]
    fn surface_has_fixed_playback_attributes() {
        let surface = PlaybackSurface::for_result(&result("/output/final.mp4"), BASE);
        assert_eq!(surface.src, "http://localhost:5000/output/final.mp4");
        assert_eq!(surface.mime, "video/mp4");
        assert!(surface.controls);
        assert!(surface.autoplay);
        assert!(!surface.unsupported_notice.is_empty());
        assert!(surface.audio_src.is_none());
    }

    #[test]
    fn surface_resolves_audio_track() {
        let mut r = result("/output/final.mp4");
        r.audio_locator = Some("/output/speech.mp3".into());
        let surface = PlaybackSurface::for_result(&r, BASE);
        assert_eq!(
            surface.audio_src.as_deref(),
            Some("http://localhost:5000/output/speech.mp3")
        );
    }
}
