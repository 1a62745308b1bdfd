//! Storyboard scenes.
//!
//! A [`Scene`] owns a contiguous run of [`Cue`]s. Its time bounds are always
//! derived from the cue list, never stored separately, so merging two scenes
//! is just moving cues and re-annotating.

use std::time::Duration;

use crate::cue::Cue;
use crate::lexicon::{Boundary, Emotion, Lexicon};

/// Maximum length of a scene summary, in characters (not bytes).
pub const SUMMARY_MAX_CHARS: usize = 200;

/// One dramatic unit of the storyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// One-based position in the final scene list. Reassigned whenever the
    /// list changes shape.
    pub id: usize,
    /// Cues in arrival order.
    pub cues: Vec<Cue>,
    /// Location hint; empty when nothing was detected.
    pub location: String,
    /// Emotional tone of the combined text.
    pub emotion: Emotion,
    /// Combined text, truncated to [`SUMMARY_MAX_CHARS`].
    pub summary: String,
    /// The boundary that opened this scene. `None` for the first scene.
    pub boundary: Option<Boundary>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            cues: Vec::new(),
            location: String::new(),
            emotion: Emotion::Calm,
            summary: String::new(),
            boundary: None,
        }
    }

    /// Create an empty scene opened by `boundary`.
    pub fn opened_by(id: usize, boundary: Boundary) -> Self {
        Self {
            boundary: Some(boundary),
            ..Self::new(id)
        }
    }

    /// Returns `true` if the scene holds no cues yet.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Number of cues in the scene.
    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    /// Append a cue, extending the scene's end time.
    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Start of the first cue, or zero for an empty scene.
    pub fn start_time(&self) -> Duration {
        self.cues.first().map_or(Duration::ZERO, |cue| cue.start)
    }

    /// End of the last cue, or zero for an empty scene.
    pub fn end_time(&self) -> Duration {
        self.cues.last().map_or(Duration::ZERO, |cue| cue.end)
    }

    /// `end_time - start_time`, saturating at zero for overlapping input.
    pub fn duration(&self) -> Duration {
        self.end_time().saturating_sub(self.start_time())
    }

    /// Source indices of the first and last cue, if any.
    pub fn cue_range(&self) -> Option<(usize, usize)> {
        match (self.cues.first(), self.cues.last()) {
            (Some(first), Some(last)) => Some((first.index, last.index)),
            _ => None,
        }
    }

    /// All cue texts joined by single spaces.
    pub fn combined_text(&self) -> String {
        self.cues
            .iter()
            .map(|cue| cue.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Why the scene was split off, or an empty string for the first scene.
    pub fn boundary_reason(&self) -> String {
        self.boundary.map(|b| b.reason()).unwrap_or_default()
    }

    /// Recompute summary, emotion, and location from the current cues.
    ///
    /// Emotion and summary are always replaced. The location is replaced
    /// only when a new one is detected; an empty detection keeps the old
    /// value.
    pub fn annotate(&mut self, lexicon: &Lexicon) {
        let text = self.combined_text();
        self.summary = truncate_chars(&text, SUMMARY_MAX_CHARS);
        self.emotion = lexicon.detect_emotion(&text);

        let location = lexicon.extract_location(&text);
        if !location.is_empty() {
            self.location = location;
        }
    }

    /// Move every cue of `other` to the end of this scene and re-annotate.
    pub fn absorb(&mut self, other: Scene, lexicon: &Lexicon) {
        self.cues.extend(other.cues);
        self.annotate(lexicon);
    }
}

/// Keep at most `max_chars` characters of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
