//! End-to-end segmentation tests.
//!
//! Covers the documented scenarios plus the structural guarantees every
//! storyboard must satisfy: cue conservation, contiguous ids, chronological
//! scene order, determinism, and an idempotent merge pass.

use std::time::Duration;

use storyboard::{
    BoundaryKind, Cue, Emotion, Lexicon, Scene, SegmentOptions, StoryboardError, Storyboarder,
    build_storyboard, merger::merge_short,
};

fn cue(index: usize, start: f64, end: f64, text: &str) -> Cue {
    Cue::new(
        index,
        Duration::from_secs_f64(start),
        Duration::from_secs_f64(end),
        text,
    )
}

fn single_cue_scene(index: usize, start: f64, end: f64) -> Scene {
    let mut scene = Scene::new(index);
    scene.push(cue(index, start, end, "风很大"));
    scene.annotate(&Lexicon::BUILTIN);
    scene
}

const LINES: &[&str] = &[
    "山顶风很大",
    "他来到一座高山，",
    "第二天清晨",
    "此时，远处传来钟声",
    "她冷笑一声",
    "众人惊恐地后退",
    "他在大殿中踱步",
    "随后两人大笑",
    "与此同时，另一边的城门紧闭",
    "他毅然转身",
    "一切归于平静",
    "剑光一闪",
];

/// Deterministic pseudo-random transcript with gaps, overlaps and keywords.
fn synthetic_transcript(seed: u64, length: usize) -> Vec<Cue> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };

    let mut cursor_ms = 0_u64;
    (1..=length)
        .map(|index| {
            let start = cursor_ms.saturating_sub(next() % 300);
            let end = start + 500 + next() % 4_000;
            cursor_ms = end + next() % 5_000;
            let text = LINES[(next() as usize) % LINES.len()];
            Cue::new(
                index,
                Duration::from_millis(start),
                Duration::from_millis(end),
                text,
            )
        })
        .collect()
}

fn option_grid() -> Vec<SegmentOptions> {
    let mut grid = Vec::new();
    for min_duration in [0.5, 2.0, 5.0, 12.0] {
        for merge_threshold in [0.0, 1.0, 3.0, 10.0] {
            grid.push(
                SegmentOptions::new()
                    .with_min_duration(min_duration)
                    .with_merge_threshold(merge_threshold),
            );
        }
    }
    grid
}

// ── Documented scenarios ───────────────────────────────────────────

#[test]
fn opening_boundary_does_not_split() {
    let cues = vec![
        cue(1, 0.0, 4.0, "他来到一座高山"),
        cue(2, 4.0, 9.0, "山顶风很大"),
    ];
    let scenes = build_storyboard(cues, &SegmentOptions::default()).unwrap();

    assert_eq!(scenes.len(), 1);
    let scene = &scenes[0];
    assert_eq!(scene.id, 1);
    assert_eq!(scene.start_time(), Duration::ZERO);
    assert_eq!(scene.end_time(), Duration::from_secs(9));
    assert!(scene.location.contains("高山"), "location: {}", scene.location);
    assert_eq!(scene.emotion, Emotion::Calm);
    assert_eq!(scene.boundary_reason(), "");
}

#[test]
fn short_scenes_absorb_forward_while_under_minimum() {
    let scenes = vec![
        single_cue_scene(1, 0.0, 1.0),
        single_cue_scene(2, 2.0, 3.0),
        single_cue_scene(3, 4.0, 4.5),
    ];
    let merged = merge_short(
        scenes,
        Duration::from_secs(5),
        Duration::from_secs(3),
        &Lexicon::BUILTIN,
    );

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, 1);
    assert_eq!(merged[0].cue_range(), Some((1, 3)));
    assert_eq!(merged[0].end_time(), Duration::from_millis(4500));
}

#[test]
fn absorption_stops_when_scene_reaches_minimum() {
    // 2s scenes with 1s gaps: the first absorption already yields 5s.
    let scenes = vec![
        single_cue_scene(1, 0.0, 2.0),
        single_cue_scene(2, 3.0, 5.0),
        single_cue_scene(3, 6.0, 8.0),
    ];
    let merged = merge_short(
        scenes,
        Duration::from_secs(5),
        Duration::from_secs(3),
        &Lexicon::BUILTIN,
    );

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].cue_range(), Some((1, 2)));
    assert_eq!(merged[1].cue_range(), Some((3, 3)));
    assert_eq!(merged[1].id, 2);
}

#[test]
fn zero_min_duration_is_rejected() {
    let cues = vec![cue(1, 0.0, 1.0, "风很大")];
    let result = build_storyboard(cues, &SegmentOptions::new().with_min_duration(0.0));
    assert!(matches!(result, Err(StoryboardError::InvalidMinDuration(value)) if value == 0.0));
}

#[test]
fn empty_transcript_yields_no_scenes() {
    let scenes = build_storyboard(Vec::new(), &SegmentOptions::default()).unwrap();
    assert!(scenes.is_empty());
}

#[test]
fn no_boundaries_collapse_into_one_scene() {
    let cues: Vec<Cue> = (1..=20)
        .map(|i| cue(i, (i - 1) as f64 * 3.0, i as f64 * 3.0, "风很大"))
        .collect();
    let scenes = build_storyboard(cues, &SegmentOptions::default()).unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].cue_count(), 20);
}

#[test]
fn boundary_reason_names_highest_priority_category() {
    let cues = vec![
        cue(1, 0.0, 6.0, "山顶风很大"),
        cue(2, 6.0, 12.0, "第二天，他离开了山谷"),
    ];
    let scenes = build_storyboard(cues, &SegmentOptions::default()).unwrap();
    assert_eq!(scenes.len(), 2);
    let boundary = scenes[1].boundary.unwrap();
    assert_eq!(boundary.kind, BoundaryKind::LocationChange);
    assert!(scenes[1].boundary_reason().starts_with("location change"));
}

#[test]
fn a_single_emotional_cue_colours_the_scene() {
    let cues = vec![
        cue(1, 0.0, 2.0, "山顶风很大"),
        cue(2, 2.0, 4.0, "他怒吼一声"),
        cue(3, 4.0, 6.0, "一切归于平静"),
    ];
    let scenes = build_storyboard(cues, &SegmentOptions::default()).unwrap();
    assert_eq!(scenes[0].emotion, Emotion::Anger);
}

// ── Structural guarantees ──────────────────────────────────────────

#[test]
fn cues_are_conserved() {
    for seed in 0..8 {
        let cues = synthetic_transcript(seed, 120);
        let mut expected: Vec<usize> = cues.iter().map(|c| c.index).collect();
        expected.sort_unstable();

        for options in option_grid() {
            let scenes = build_storyboard(cues.clone(), &options).unwrap();
            let mut actual: Vec<usize> = scenes
                .iter()
                .flat_map(|scene| scene.cues.iter().map(|c| c.index))
                .collect();
            actual.sort_unstable();
            assert_eq!(actual, expected, "seed {seed}, {options:?}");
            assert!(scenes.iter().all(|scene| !scene.is_empty()));
        }
    }
}

#[test]
fn ids_are_contiguous_and_scenes_chronological() {
    for seed in 0..8 {
        let mut cues = synthetic_transcript(seed, 80);
        storyboard::srt::sort_chronologically(&mut cues);

        for options in option_grid() {
            let scenes = build_storyboard(cues.clone(), &options).unwrap();
            for (position, scene) in scenes.iter().enumerate() {
                assert_eq!(scene.id, position + 1);
            }
            for pair in scenes.windows(2) {
                assert!(pair[0].start_time() <= pair[1].start_time());
            }
        }
    }
}

#[test]
fn segmentation_is_deterministic() {
    let cues = synthetic_transcript(42, 200);
    let engine = Storyboarder::new(SegmentOptions::default()).unwrap();
    let first = engine.build(cues.clone());
    let second = engine.build(cues);
    assert_eq!(first, second);
}

#[test]
fn merge_pass_is_idempotent() {
    let engine_options = option_grid();
    for seed in 0..8 {
        let cues = synthetic_transcript(seed, 100);
        for options in &engine_options {
            let engine = Storyboarder::new(*options).unwrap();

            // Split on every boundary so the merge pass has real work to do.
            let eager = Storyboarder::new(options.with_min_duration(0.001)).unwrap();
            let raw = eager.segment(cues.clone());

            let once = engine.merge_short(raw);
            let twice = engine.merge_short(once.clone());
            assert_eq!(once, twice, "seed {seed}, {options:?}");
        }
    }
}

#[test]
fn no_scene_reports_negative_duration() {
    let cues = vec![
        Cue::new(1, Duration::from_secs(5), Duration::from_secs(3), "风很大"),
        Cue::new(2, Duration::from_secs(4), Duration::from_secs(4), "风很大"),
    ];
    let scenes = build_storyboard(cues, &SegmentOptions::default()).unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].duration(), Duration::ZERO);
}
