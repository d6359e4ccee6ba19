//! Submission form — the input half of the window.
//!
//! [`SubmissionForm`] owns the text buffers the user edits.  It performs no
//! I/O: [`SubmissionForm::submit`] either returns a [`SubmissionPayload`] for
//! the orchestrator or `None` when the submission must be ignored (empty text
//! or a request already in flight).
//!
//! ```
//! use text_to_video::form::{FormMode, SubmissionForm};
//!
//! let mut form = SubmissionForm::new(FormMode::Simple, Default::default());
//! form.text = "  Eine Katze auf dem Mond  ".into();
//! let payload = form.submit(false).unwrap();
//! assert_eq!(payload.primary_text, "Eine Katze auf dem Mond");
//! assert!(form.submit(true).is_none());
//! ```

pub mod options;

pub use options::{AnimationKind, GenerationOptions, Language, Resolution, VideoStyle, Voice};

use serde::{Deserialize, Serialize};

/// Example texts offered as one-click presets.
pub const EXAMPLE_TEXTS: [&str; 4] = [
    "Eine Katze sitzt auf dem Mond und schaut zu den Sternen.",
    "Der Roboter tanzt durch die bunte Regenbogen-Stadt.",
    "Magische Schmetterlinge fliegen durch den verzauberten Wald.",
    "Das Raumschiff gleitet sanft durch die Galaxie.",
];

// ---------------------------------------------------------------------------
// FormMode
// ---------------------------------------------------------------------------

/// Which variant of the form is shown, and therefore which endpoint is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    /// One text field; the text is both narrated and used as the visual
    /// description.
    Simple,
    /// Separate narration and description fields plus language/style pickers.
    Extended,
}

impl Default for FormMode {
    fn default() -> Self {
        Self::Simple
    }
}

// ---------------------------------------------------------------------------
// SubmissionPayload
// ---------------------------------------------------------------------------

/// Fields collected by the form on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    /// Narrated text, trimmed and never empty.
    pub primary_text: String,
    /// Visual description; equals `primary_text` when left blank.
    pub auxiliary_text: String,
    pub options: GenerationOptions,
    pub mode: FormMode,
}

// ---------------------------------------------------------------------------
// SubmissionForm
// ---------------------------------------------------------------------------

/// Locally-owned form buffers.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub mode: FormMode,
    /// Primary text (narration in extended mode).
    pub text: String,
    /// Visual description (extended mode only).
    pub description: String,
    /// Language / style pickers plus the fixed resolution and voice.
    pub options: GenerationOptions,
}

impl SubmissionForm {
    pub fn new(mode: FormMode, options: GenerationOptions) -> Self {
        Self {
            mode,
            text: String::new(),
            description: String::new(),
            options,
        }
    }

    /// `true` when the submit button should be enabled.
    pub fn can_submit(&self, in_flight: bool) -> bool {
        !in_flight && !self.text.trim().is_empty()
    }

    /// Collect the payload, or `None` if the text is blank or a request is
    /// already in flight.
    pub fn submit(&self, in_flight: bool) -> Option<SubmissionPayload> {
        if !self.can_submit(in_flight) {
            return None;
        }

        let primary_text = self.text.trim().to_string();
        let auxiliary_text = match self.mode {
            FormMode::Simple => primary_text.clone(),
            FormMode::Extended => {
                let description = self.description.trim();
                if description.is_empty() {
                    primary_text.clone()
                } else {
                    description.to_string()
                }
            }
        };

        Some(SubmissionPayload {
            primary_text,
            auxiliary_text,
            options: self.options,
            mode: self.mode,
        })
    }

    /// Overwrite the primary buffer with example `index`.  Out-of-range
    /// indices are ignored.
    pub fn insert_example(&mut self, index: usize) {
        if let Some(example) = EXAMPLE_TEXTS.get(index) {
            self.text = (*example).to_string();
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Number of whitespace-delimited, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
