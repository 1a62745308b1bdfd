//! Second pass: fold short scenes into their successors.
//!
//! The pass is greedy and forward-only. A scene shorter than the minimum
//! duration keeps absorbing the following scene while the gap between them is
//! within the merge threshold. It never looks backward and is not iterated to
//! a fixed point, so some scenes may remain short.

use std::time::Duration;

use crate::lexicon::Lexicon;
use crate::scene::Scene;

/// Merge short scenes forward and renumber the result `1..=N`.
///
/// The gap between two scenes is `next.start_time - acc.end_time`; overlapping
/// scenes count as a zero gap.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storyboard::{Cue, Lexicon, Scene, merger::merge_short};
///
/// let scenes: Vec<Scene> = [(0, 2), (3, 5)]
///     .into_iter()
///     .enumerate()
///     .map(|(i, (start, end))| {
///         let mut scene = Scene::new(i + 1);
///         scene.push(Cue::new(
///             i + 1,
///             Duration::from_secs(start),
///             Duration::from_secs(end),
///             "风",
///         ));
///         scene
///     })
///     .collect();
///
/// let merged = merge_short(
///     scenes,
///     Duration::from_secs(5),
///     Duration::from_secs(3),
///     &Lexicon::BUILTIN,
/// );
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].cue_count(), 2);
/// ```
pub fn merge_short(
    scenes: Vec<Scene>,
    min_duration: Duration,
    merge_threshold: Duration,
    lexicon: &Lexicon,
) -> Vec<Scene> {
    if scenes.len() <= 1 {
        return renumber(scenes);
    }

    let input_count = scenes.len();
    let mut merged = Vec::with_capacity(input_count);
    let mut scenes = scenes.into_iter();
    let Some(mut acc) = scenes.next() else {
        return merged;
    };

    for next in scenes {
        let gap = next.start_time().saturating_sub(acc.end_time());
        if acc.duration() < min_duration && gap <= merge_threshold {
            log::trace!(
                "Merging scene {} into scene {} (duration {:?}, gap {:?})",
                next.id,
                acc.id,
                acc.duration(),
                gap
            );
            acc.absorb(next, lexicon);
            continue;
        }

        merged.push(std::mem::replace(&mut acc, next));
    }
    merged.push(acc);

    log::debug!(
        "Merge pass reduced {} scene(s) to {}",
        input_count,
        merged.len()
    );
    renumber(merged)
}

/// Assign ids `1..=N` by position.
fn renumber(mut scenes: Vec<Scene>) -> Vec<Scene> {
    for (position, scene) in scenes.iter_mut().enumerate() {
        scene.id = position + 1;
    }
    scenes
}
