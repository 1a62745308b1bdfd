//! Storyboard output.
//!
//! Both output formats are projections of the same [`SceneRecord`] list, so a
//! JSON document and a Markdown report produced from one [`Storyboard`] agree
//! on every field.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use storyboard::{Cue, ReportOptions, SegmentOptions, Storyboarder, StoryboardFormat, report};
//!
//! let engine = Storyboarder::new(SegmentOptions::default())?;
//! let storyboard = engine.build(vec![
//!     Cue::new(1, Duration::ZERO, Duration::from_secs(9), "山顶风很大"),
//! ]);
//!
//! let json = report::to_json(&storyboard);
//! assert_eq!(json["scenes"][0]["duration_seconds"], 9.0);
//!
//! let markdown = report::render(&storyboard, StoryboardFormat::Markdown, &ReportOptions::new())?;
//! assert!(markdown.contains("| 001 | 00:00:00-00:00:09 | 9.0s |"));
//! # Ok::<(), storyboard::StoryboardError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::error::StoryboardError;
use crate::lexicon::Emotion;
use crate::scene::Scene;
use crate::storyboard::Storyboard;

/// Output format for rendered storyboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryboardFormat {
    /// Structured JSON document.
    Json,
    /// Markdown report with a scene table and per-scene details.
    Markdown,
}

impl StoryboardFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            StoryboardFormat::Json => "json",
            StoryboardFormat::Markdown => "md",
        }
    }
}

impl Display for StoryboardFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoryboardFormat::Json => write!(f, "JSON"),
            StoryboardFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

/// Extra context printed in the Markdown front matter.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Transcript the storyboard was built from.
    pub source: Option<String>,
    /// Generation date. Left out when `None`, keeping output reproducible.
    pub generated: Option<NaiveDate>,
}

impl ReportOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the source transcript name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Record the generation date.
    #[must_use]
    pub fn with_generated(mut self, date: NaiveDate) -> Self {
        self.generated = Some(date);
        self
    }
}

/// Flat, render-ready view of one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    /// Final scene id, `1..=N`.
    pub scene_id: usize,
    /// `HH:MM:SS`, truncated to whole seconds.
    pub start_time: String,
    /// `HH:MM:SS`, truncated to whole seconds.
    pub end_time: String,
    /// Seconds, rounded to one decimal.
    pub duration_seconds: f64,
    /// First and last cue index; `(0, 0)` for an empty scene.
    pub cue_range: (usize, usize),
    /// Location hint; empty when none was found.
    pub location: String,
    /// Emotional tone of the whole scene.
    pub emotion: Emotion,
    /// Combined cue text, truncated to [`SUMMARY_MAX_CHARS`](crate::SUMMARY_MAX_CHARS).
    pub summary: String,
    /// `"<category>: <keyword>"`; empty for the opening scene.
    pub boundary_reason: String,
    /// Number of cues in the scene.
    pub cue_count: usize,
}

impl From<&Scene> for SceneRecord {
    fn from(scene: &Scene) -> Self {
        Self {
            scene_id: scene.id,
            start_time: format_clock(scene.start_time()),
            end_time: format_clock(scene.end_time()),
            duration_seconds: round_tenths(scene.duration()),
            cue_range: scene.cue_range().unwrap_or((0, 0)),
            location: scene.location.clone(),
            emotion: scene.emotion,
            summary: scene.summary.clone(),
            boundary_reason: scene.boundary_reason(),
            cue_count: scene.cue_count(),
        }
    }
}

impl SceneRecord {
    fn to_json(&self) -> Value {
        json!({
            "scene_id": self.scene_id,
            "start_time": self.start_time,
            "end_time": self.end_time,
            "duration_seconds": self.duration_seconds,
            "cue_range": [self.cue_range.0, self.cue_range.1],
            "location": self.location,
            "emotion": self.emotion.as_str(),
            "summary": self.summary,
            "boundary_reason": self.boundary_reason,
            "cue_count": self.cue_count,
        })
    }
}

/// Project every scene of `storyboard` into a [`SceneRecord`].
pub fn records(storyboard: &Storyboard) -> Vec<SceneRecord> {
    storyboard.scenes.iter().map(SceneRecord::from).collect()
}

/// Build the structured JSON document for `storyboard`.
pub fn to_json(storyboard: &Storyboard) -> Value {
    let total = storyboard.total_duration();
    let scenes: Vec<Value> = records(storyboard).iter().map(SceneRecord::to_json).collect();

    json!({
        "chapter": storyboard.chapter,
        "total_duration": format_clock(total),
        "total_duration_seconds": round_tenths(total),
        "scene_count": storyboard.scene_count(),
        "scenes": scenes,
    })
}

/// Render `storyboard` as a Markdown report.
pub fn to_markdown(storyboard: &Storyboard, options: &ReportOptions) -> String {
    let records = records(storyboard);
    let mut lines = vec!["---".to_string(), format!("chapter: {}", storyboard.chapter)];

    if let Some(source) = &options.source {
        lines.push(format!("source: {source}"));
    }
    lines.push(format!(
        "total_duration: \"{}\"",
        format_clock(storyboard.total_duration())
    ));
    lines.push(format!("scene_count: {}", records.len()));
    if let Some(date) = options.generated {
        lines.push(format!("generated: {}", date.format("%Y-%m-%d")));
    }

    lines.extend([
        "---".to_string(),
        String::new(),
        format!("# Chapter {} Storyboard", storyboard.chapter),
        String::new(),
        "## Scenes".to_string(),
        String::new(),
        "| Scene | Timecode | Duration | Location | Emotion | Cues |".to_string(),
        "|-------|----------|----------|----------|---------|------|".to_string(),
    ]);

    for record in &records {
        let location = if record.location.is_empty() {
            "-".to_string()
        } else {
            escape_cell(&record.location)
        };
        lines.push(format!(
            "| {:03} | {}-{} | {:.1}s | {} | {} | {}-{} |",
            record.scene_id,
            record.start_time,
            record.end_time,
            record.duration_seconds,
            location,
            record.emotion,
            record.cue_range.0,
            record.cue_range.1,
        ));
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        String::new(),
        "## Scene Details".to_string(),
        String::new(),
    ]);

    for record in &records {
        let boundary = if record.boundary_reason.is_empty() {
            "(opening scene)"
        } else {
            record.boundary_reason.as_str()
        };
        let location = if record.location.is_empty() {
            "TBD"
        } else {
            record.location.as_str()
        };
        let summary = if record.summary.is_empty() {
            "(none)"
        } else {
            record.summary.as_str()
        };

        lines.extend([
            format!("### Scene {:03}", record.scene_id),
            String::new(),
            format!("**Timecode**: {} - {}", record.start_time, record.end_time),
            format!("**Duration**: {:.1}s", record.duration_seconds),
            format!("**Cues**: #{}-{} ({} total)", record.cue_range.0, record.cue_range.1, record.cue_count),
            format!("**Boundary**: {boundary}"),
            String::new(),
            format!("**Location**: {location}"),
            format!("**Emotion**: {}", record.emotion),
            String::new(),
            "**Summary**:".to_string(),
            summary.to_string(),
            String::new(),
            "---".to_string(),
            String::new(),
        ]);
    }

    lines.join("\n")
}

/// Render `storyboard` in `format`.
///
/// # Errors
///
/// Returns [`StoryboardError::JsonError`] if JSON serialization fails.
pub fn render(
    storyboard: &Storyboard,
    format: StoryboardFormat,
    options: &ReportOptions,
) -> Result<String, StoryboardError> {
    match format {
        StoryboardFormat::Json => Ok(serde_json::to_string_pretty(&to_json(storyboard))?),
        StoryboardFormat::Markdown => Ok(to_markdown(storyboard, options)),
    }
}

/// Render `storyboard` and write it to `path`.
///
/// # Errors
///
/// Returns errors from [`render`] or I/O errors when writing the file.
pub fn save<P: AsRef<Path>>(
    path: P,
    storyboard: &Storyboard,
    format: StoryboardFormat,
    options: &ReportOptions,
) -> Result<(), StoryboardError> {
    let content = render(storyboard, format, options)?;
    std::fs::write(path.as_ref(), content)?;
    log::debug!("Wrote {format} storyboard to {}", path.as_ref().display());
    Ok(())
}

/// Format a duration as `HH:MM:SS`, dropping fractional seconds.
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn round_tenths(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 10.0).round() / 10.0
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
