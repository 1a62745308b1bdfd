//! Parallel storyboard building tests.

#![cfg(feature = "rayon")]

use std::time::Duration;

use storyboard::{
    Cue, SegmentOptions, StoryboardError, Storyboarder, build_storyboards_parallel, srt,
};

fn chapter(length: usize, offset: usize) -> Vec<Cue> {
    (0..length)
        .map(|i| {
            let text = if (i + offset) % 4 == 0 { "第二天 风很大" } else { "风很大" };
            Cue::new(
                i + 1,
                Duration::from_secs(i as u64 * 2),
                Duration::from_secs(i as u64 * 2 + 2),
                text,
            )
        })
        .collect()
}

#[test]
fn matches_sequential_output() {
    let transcripts: Vec<Vec<Cue>> = (0..12).map(|n| chapter(30 + n * 7, n)).collect();
    let options = SegmentOptions::default();

    let parallel = build_storyboards_parallel(transcripts.clone(), &options)
        .expect("Failed to build storyboards");

    let engine = Storyboarder::new(options).unwrap();
    for (position, (board, cues)) in parallel.iter().zip(transcripts).enumerate() {
        assert_eq!(board.chapter as usize, position + 1);
        assert_eq!(board.scenes, engine.scenes(cues));
    }
}

#[test]
fn invalid_options_fail_before_work() {
    let result = build_storyboards_parallel(
        vec![chapter(10, 0)],
        &SegmentOptions::new().with_min_duration(0.0),
    );
    assert!(matches!(result, Err(StoryboardError::InvalidMinDuration(_))));
}

#[test]
fn fixture_chapter_builds_in_parallel() {
    let cues = srt::parse_file("tests/fixtures/chapter-01.srt").expect("Failed to parse fixture");
    let boards = build_storyboards_parallel(vec![cues.clone(), cues], &SegmentOptions::default())
        .expect("Failed to build storyboards");
    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].scenes, boards[1].scenes);
    assert_eq!(boards[1].chapter, 2);
}
