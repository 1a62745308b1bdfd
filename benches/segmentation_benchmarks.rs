//! Benchmarks for segmentation, merging, and report rendering.
//!
//! Run with: cargo bench
//! Run with all features: cargo bench --all-features

use std::{hint::black_box, time::Duration};

use criterion::Criterion;
use storyboard::{
    Cue, Lexicon, ReportOptions, SegmentOptions, StoryboardFormat, Storyboarder, report, srt,
};

const LINES: &[&str] = &[
    "山顶风很大，云雾缭绕",
    "他来到一座高山，",
    "第二天清晨，他醒来",
    "此时，远处传来钟声",
    "她冷笑一声",
    "众人惊恐地后退",
    "他在大殿中踱步，",
    "与此同时，另一边的城门紧闭",
];

/// A long chapter: one cue every two seconds, keywords cycling through.
fn synthetic_chapter(length: usize) -> Vec<Cue> {
    (0..length)
        .map(|i| {
            Cue::new(
                i + 1,
                Duration::from_millis(i as u64 * 2_000),
                Duration::from_millis(i as u64 * 2_000 + 1_800),
                LINES[i % LINES.len()],
            )
        })
        .collect()
}

fn benchmark_lexicon(criterion: &mut Criterion) {
    let lexicon = Lexicon::BUILTIN;
    let text = LINES.join(" ");

    criterion.bench_function("detect boundary", |bencher| {
        bencher.iter(|| lexicon.detect_boundary(black_box("她冷笑一声，随后离开"), ""));
    });
    criterion.bench_function("detect emotion", |bencher| {
        bencher.iter(|| lexicon.detect_emotion(black_box(&text)));
    });
    criterion.bench_function("extract location", |bencher| {
        bencher.iter(|| lexicon.extract_location(black_box(&text)));
    });
}

fn benchmark_segmentation(criterion: &mut Criterion) {
    let cues = synthetic_chapter(2_000);
    let engine = Storyboarder::new(SegmentOptions::default()).unwrap();

    criterion.bench_function("segment 2000 cues", |bencher| {
        bencher.iter(|| engine.segment(black_box(cues.clone())));
    });

    let eager = Storyboarder::new(SegmentOptions::new().with_min_duration(0.5)).unwrap();
    let raw = eager.segment(cues.clone());
    criterion.bench_function("merge short scenes", |bencher| {
        bencher.iter(|| engine.merge_short(black_box(raw.clone())));
    });

    criterion.bench_function("build storyboard 2000 cues", |bencher| {
        bencher.iter(|| engine.build(black_box(cues.clone())));
    });
}

fn benchmark_srt_parsing(criterion: &mut Criterion) {
    let text: String = synthetic_chapter(2_000)
        .iter()
        .map(|cue| {
            format!(
                "{}\n{} --> {}\n{}\n\n",
                cue.index,
                srt::format_timestamp(cue.start),
                srt::format_timestamp(cue.end),
                cue.text
            )
        })
        .collect();

    criterion.bench_function("parse srt 2000 cues", |bencher| {
        bencher.iter(|| srt::parse(black_box(&text)).unwrap());
    });
}

fn benchmark_rendering(criterion: &mut Criterion) {
    let engine = Storyboarder::new(SegmentOptions::default()).unwrap();
    let storyboard = engine.build(synthetic_chapter(2_000));
    let options = ReportOptions::new();

    criterion.bench_function("render json", |bencher| {
        bencher.iter(|| report::render(black_box(&storyboard), StoryboardFormat::Json, &options));
    });
    criterion.bench_function("render markdown", |bencher| {
        bencher.iter(|| {
            report::render(black_box(&storyboard), StoryboardFormat::Markdown, &options)
        });
    });
}

#[cfg(feature = "rayon")]
fn benchmark_parallel_chapters(criterion: &mut Criterion) {
    let chapters: Vec<Vec<Cue>> = (0..16).map(|_| synthetic_chapter(1_000)).collect();
    let options = SegmentOptions::default();

    criterion.bench_function("build 16 chapters (rayon)", |bencher| {
        bencher.iter(|| {
            storyboard::build_storyboards_parallel(black_box(chapters.clone()), &options).unwrap()
        });
    });
}

#[cfg(not(feature = "rayon"))]
fn benchmark_parallel_chapters(_criterion: &mut Criterion) {}

criterion::criterion_group!(
    benches,
    benchmark_lexicon,
    benchmark_segmentation,
    benchmark_srt_parsing,
    benchmark_rendering,
    benchmark_parallel_chapters,
);
criterion::criterion_main!(benches);
