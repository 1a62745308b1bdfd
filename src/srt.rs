//! SubRip (`.srt`) transcript input.
//!
//! Parses SubRip text into an ordered list of [`Cue`]s, preserving source
//! order. Multi-line cue text is folded into a single line joined by spaces,
//! and inline markup (`<i>`, `{\an8}` and friends) is stripped.
//!
//! The segmentation engine trusts cue order. Use [`is_chronological`] to check
//! a parsed file and [`sort_chronologically`] to fix it before segmenting.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use storyboard::srt;
//!
//! let cues = srt::parse("1\n00:00:01,000 --> 00:00:02,500\n<i>你好</i>\n世界\n")?;
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues[0].end, Duration::from_millis(2500));
//! assert_eq!(cues[0].text, "你好 世界");
//! # Ok::<(), storyboard::StoryboardError>(())
//! ```

use std::path::Path;
use std::time::Duration;

use crate::cue::Cue;
use crate::error::StoryboardError;

const TIMING_ARROW: &str = "-->";

/// Parse SubRip text into cues, in source order.
///
/// Accepts a leading UTF-8 BOM, CRLF line endings, runs of blank lines, and
/// either `,` or `.` as the millisecond separator. A block whose counter line
/// is missing gets the previous index plus one. Blocks with no text yield a
/// cue with empty text.
///
/// # Errors
///
/// Returns [`StoryboardError::SubtitleParse`] for a malformed counter or
/// timing line.
pub fn parse(input: &str) -> Result<Vec<Cue>, StoryboardError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut cues = Vec::new();
    let mut lines = input.lines().enumerate().peekable();

    loop {
        // Skip blank lines between blocks.
        while lines.next_if(|(_, line)| line.trim().is_empty()).is_some() {}

        let Some((line_number, first)) = lines.next() else {
            break;
        };
        let first = first.trim();

        let (index, timing_line, timing_number) = if first.contains(TIMING_ARROW) {
            let index = cues.last().map_or(1, |cue: &Cue| cue.index + 1);
            (index, first, line_number)
        } else {
            let index = first.parse::<usize>().map_err(|_| StoryboardError::SubtitleParse {
                line: line_number + 1,
                reason: format!("expected a cue counter, found {first:?}"),
            })?;
            let (timing_number, timing_line) =
                lines.next().ok_or_else(|| StoryboardError::SubtitleParse {
                    line: line_number + 2,
                    reason: format!("cue {index} has no timing line"),
                })?;
            (index, timing_line.trim(), timing_number)
        };

        let (start, end) = parse_timing(timing_line).map_err(|reason| {
            StoryboardError::SubtitleParse {
                line: timing_number + 1,
                reason,
            }
        })?;

        let mut text_lines = Vec::new();
        while let Some((_, line)) = lines.next_if(|(_, line)| !line.trim().is_empty()) {
            let cleaned = strip_markup(line);
            if !cleaned.is_empty() {
                text_lines.push(cleaned);
            }
        }

        cues.push(Cue::new(index, start, end, text_lines.join(" ")));
    }

    log::debug!("Parsed {} subtitle cue(s)", cues.len());
    Ok(cues)
}

/// Read and parse a SubRip file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error from
/// [`parse`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Cue>, StoryboardError> {
    let path = path.as_ref();
    log::debug!("Reading subtitles from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Parse a `start --> end` timing line. Trailing position hints are ignored.
fn parse_timing(line: &str) -> Result<(Duration, Duration), String> {
    let (start, rest) = line
        .split_once(TIMING_ARROW)
        .ok_or_else(|| format!("expected `start --> end`, found {line:?}"))?;
    let end = rest.split_whitespace().next().unwrap_or_default();
    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}

/// Parse a SubRip timestamp (`HH:MM:SS,mmm`, `.` also accepted).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storyboard::srt::parse_timestamp;
///
/// assert_eq!(parse_timestamp("01:02:03,045"), Ok(Duration::from_millis(3_723_045)));
/// assert_eq!(parse_timestamp("00:00:01.5"), Ok(Duration::from_millis(1_500)));
/// assert!(parse_timestamp("1:2").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<Duration, String> {
    let trimmed = value.trim();
    let invalid = || format!("invalid timestamp: {trimmed:?}");

    let parts: Vec<&str> = trimmed.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let (whole_seconds, fraction) = match seconds.split_once([',', '.']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (*seconds, ""),
    };

    let hours = hours.parse::<u64>().map_err(|_| invalid())?;
    let minutes = minutes.parse::<u64>().map_err(|_| invalid())?;
    let whole_seconds = whole_seconds.parse::<u64>().map_err(|_| invalid())?;
    if minutes >= 60 || whole_seconds >= 60 {
        return Err(invalid());
    }

    let millis = if fraction.is_empty() {
        0
    } else {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        // Right-pad to milliseconds; drop anything finer.
        let padded: String = fraction.chars().chain("00".chars()).take(3).collect();
        padded.parse::<u64>().map_err(|_| invalid())?
    };

    let total_millis = hours
        .checked_mul(3600)
        .and_then(|secs| secs.checked_add(minutes * 60 + whole_seconds))
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;
    Ok(Duration::from_millis(total_millis))
}

/// Format a duration as a SubRip timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = duration.subsec_millis();
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Returns `true` if cue start times never decrease.
pub fn is_chronological(cues: &[Cue]) -> bool {
    cues.windows(2).all(|pair| pair[0].start <= pair[1].start)
}

/// Stable-sort cues by start time. Cues sharing a start keep source order.
pub fn sort_chronologically(cues: &mut [Cue]) {
    cues.sort_by_key(|cue| cue.start);
}

/// Remove HTML-style `<...>` tags and ASS `{\...}` override blocks.
fn strip_markup(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut closing: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match closing {
            Some(end) if c == end => closing = None,
            Some(_) => {}
            None if c == '<' => closing = Some('>'),
            None if c == '{' && chars.peek() == Some(&'\\') => closing = Some('}'),
            None => result.push(c),
        }
    }

    result.replace("\\N", " ").replace("\\n", " ").trim().to_string()
}
