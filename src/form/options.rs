//! Enumerated generation options offered by the form.
//!
//! Every option serialises to the lowercase wire string the generation
//! service expects (`"de"`, `"explainer"`, `"1080p"`, …) and carries a German
//! display label for the UI pickers.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Spoken language of the generated narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
    Es,
    Fr,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::De, Language::En, Language::Es, Language::Fr];

    pub fn label(&self) -> &'static str {
        match self {
            Language::De => "Deutsch",
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::De
    }
}

// ---------------------------------------------------------------------------
// VideoStyle
// ---------------------------------------------------------------------------

/// Presentation style requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStyle {
    Explainer,
    Presentation,
    Tutorial,
    Storytelling,
}

impl VideoStyle {
    pub const ALL: [VideoStyle; 4] = [
        VideoStyle::Explainer,
        VideoStyle::Presentation,
        VideoStyle::Tutorial,
        VideoStyle::Storytelling,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VideoStyle::Explainer => "Erklärvideo",
            VideoStyle::Presentation => "Präsentation",
            VideoStyle::Tutorial => "Tutorial",
            VideoStyle::Storytelling => "Storytelling",
        }
    }
}

impl Default for VideoStyle {
    fn default() -> Self {
        Self::Explainer
    }
}

// ---------------------------------------------------------------------------
// Resolution / Voice
// ---------------------------------------------------------------------------

/// Output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd,
    #[serde(rename = "1080p")]
    FullHd,
}

impl Default for Resolution {
    fn default() -> Self {
        Self::FullHd
    }
}

/// Narration voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Anna,
    Max,
}

impl Default for Voice {
    fn default() -> Self {
        Self::Anna
    }
}

// ---------------------------------------------------------------------------
// AnimationKind
// ---------------------------------------------------------------------------

/// Animation flavour picked above the form.
///
/// Only affects what the UI shows while a request is in flight and in the
/// success banner; it is never sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    /// Words plus effects.
    Combined,
    /// Typewriter text animation.
    Text,
    /// Colour-gradient image animation.
    Image,
    /// Plain animation.
    Basic,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 4] = [
        AnimationKind::Combined,
        AnimationKind::Text,
        AnimationKind::Image,
        AnimationKind::Basic,
    ];

    /// Identifier echoed in the success banner.
    pub fn id(&self) -> &'static str {
        match self {
            AnimationKind::Combined => "combined",
            AnimationKind::Text => "text",
            AnimationKind::Image => "image",
            AnimationKind::Basic => "basic",
        }
    }

    /// Picker label.
    pub fn label(&self) -> &'static str {
        match self {
            AnimationKind::Combined => "Kombiniert (Wörter + Effekte)",
            AnimationKind::Text => "Text Animation (Typewriter)",
            AnimationKind::Image => "Bild Animation (Farbverläufe)",
            AnimationKind::Basic => "Basis Animation (Einfach)",
        }
    }

    /// Caption shown next to the spinner while the request is in flight.
    pub fn progress_caption(&self) -> &'static str {
        match self {
            AnimationKind::Combined => "Erstelle kombinierte Animation...",
            AnimationKind::Text => "Erstelle Text-Animation...",
            AnimationKind::Image => "Erstelle Bild-Animation...",
            AnimationKind::Basic => "Erstelle Basis-Animation...",
        }
    }
}

impl Default for AnimationKind {
    fn default() -> Self {
        Self::Combined
    }
}

// ---------------------------------------------------------------------------
// GenerationOptions
// ---------------------------------------------------------------------------

/// The `options` object sent on the extended flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub language: Language,
    pub style: VideoStyle,
    pub resolution: Resolution,
    pub voice: Voice,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
