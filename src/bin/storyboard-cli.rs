use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use storyboard::{
    Cue, ReportOptions, SegmentOptions, Storyboard, StoryboardFormat, Storyboarder, report, srt,
};

const CLI_AFTER_HELP: &str = "Examples:\n  storyboard convert chapter-01.srt storyboard/chapter-01.json\n  storyboard convert chapter-01.srt out/chapter-01 --format both --chapter 1\n  storyboard inspect chapter-01.srt --min-duration 8\n  storyboard batch chapters/*.srt --out storyboards --progress\n  storyboard completions zsh > _storyboard";

#[derive(Debug, Parser)]
#[command(
    name = "storyboard",
    version,
    about = "Split subtitle transcripts into annotated storyboard scenes",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long, global = true)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long, global = true)]
    overwrite: bool,
}

#[derive(Debug, Args, Clone)]
struct SegmentArgs {
    /// Minimum scene duration in seconds (must be > 0).
    #[arg(long, default_value_t = storyboard::DEFAULT_MIN_DURATION)]
    min_duration: f64,

    /// Largest gap in seconds across which a short scene absorbs the next one.
    #[arg(long, default_value_t = storyboard::DEFAULT_MERGE_THRESHOLD)]
    merge_threshold: f64,

    /// Sort cues by start time before segmenting.
    #[arg(long)]
    sort: bool,
}

impl SegmentArgs {
    fn options(&self) -> SegmentOptions {
        SegmentOptions::new()
            .with_min_duration(self.min_duration)
            .with_merge_threshold(self.merge_threshold)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert one SRT transcript into a storyboard file.
    #[command(
        about = "Convert an SRT transcript to a storyboard",
        after_help = "Examples:\n  storyboard convert input.srt output.json\n  storyboard convert input.srt output --format both --chapter 3"
    )]
    Convert {
        /// Input SRT path.
        input: PathBuf,
        /// Output file path. With `--format both` the extension is replaced.
        output: PathBuf,
        /// Output format: json | markdown | both.
        #[arg(long, default_value = "json")]
        format: String,
        /// Chapter number recorded in the output.
        #[arg(long, default_value_t = 1)]
        chapter: u32,
        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Print the scene list for a transcript without writing files.
    #[command(
        about = "Print scenes for an SRT transcript",
        visible_alias = "show",
        after_help = "Examples:\n  storyboard inspect input.srt\n  storyboard inspect input.srt --json"
    )]
    Inspect {
        /// Input SRT path.
        input: PathBuf,
        /// Output the storyboard as machine-readable JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Convert many transcripts, one chapter each, into an output directory.
    #[command(
        about = "Convert several SRT transcripts",
        after_help = "Chapters are numbered by input order, starting at 1.\n\nExamples:\n  storyboard batch ch01.srt ch02.srt ch03.srt --out boards --format both"
    )]
    Batch {
        /// Input SRT paths, in chapter order.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory.
        #[arg(long)]
        out: PathBuf,
        /// Output format: json | markdown | both.
        #[arg(long, default_value = "json")]
        format: String,
        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_formats(value: &str) -> Option<Vec<StoryboardFormat>> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Some(vec![StoryboardFormat::Json]),
        "markdown" | "md" => Some(vec![StoryboardFormat::Markdown]),
        "both" | "all" => Some(vec![StoryboardFormat::Json, StoryboardFormat::Markdown]),
        _ => None,
    }
}

/// Where each format is written for a `convert` run.
fn output_paths(output: &Path, formats: &[StoryboardFormat]) -> Vec<(StoryboardFormat, PathBuf)> {
    if let [format] = formats {
        return vec![(*format, output.to_path_buf())];
    }
    formats
        .iter()
        .map(|format| (*format, output.with_extension(format.extension())))
        .collect()
}

/// Output paths for each `batch` input, named after the input's file stem.
///
/// Two inputs that would write the same file are rejected up front.
fn batch_targets(
    inputs: &[PathBuf],
    out: &Path,
    formats: &[StoryboardFormat],
) -> Result<Vec<Vec<(StoryboardFormat, PathBuf)>>, String> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(inputs.len());

    for input in inputs {
        let stem = input
            .file_stem()
            .ok_or_else(|| format!("input has no file name: {}", input.display()))?
            .to_string_lossy();
        let paths: Vec<_> = formats
            .iter()
            .map(|format| (*format, out.join(format!("{stem}.{}", format.extension()))))
            .collect();

        for (_, path) in &paths {
            if let Some(previous) = claimed.insert(path.clone(), input) {
                return Err(format!(
                    "{} and {} would both write {}; rename one input",
                    previous.display(),
                    input.display(),
                    path.display()
                ));
            }
        }
        targets.push(paths);
    }
    Ok(targets)
}

fn init_logging(global: &GlobalOptions) {
    let default_level = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn ensure_parent_directory(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn load_cues(input: &Path, sort: bool) -> Result<Vec<Cue>, Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("input file does not exist: {}", input.display()).into());
    }

    let mut cues = srt::parse_file(input)?;
    if !srt::is_chronological(&cues) {
        if sort {
            srt::sort_chronologically(&mut cues);
            log::info!("Sorted cues of {} by start time", input.display());
        } else {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!(
                    "cues in {} are not in chronological order; scene order may be wrong (use --sort)",
                    input.display()
                )
                .yellow()
            );
        }
    }
    Ok(cues)
}

fn report_options(input: &Path) -> ReportOptions {
    ReportOptions::new()
        .with_source(input.display().to_string())
        .with_generated(chrono::Local::now().date_naive())
}

fn write_storyboard(
    storyboard: &Storyboard,
    targets: &[(StoryboardFormat, PathBuf)],
    options: &ReportOptions,
    overwrite: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for (_, path) in targets {
        ensure_writable_path(path, overwrite)?;
    }
    for (format, path) in targets {
        ensure_parent_directory(path)?;
        report::save(path, storyboard, *format, options)?;
    }
    Ok(())
}

fn print_scene_table(storyboard: &Storyboard) {
    println!(
        "{}",
        format!(
            "{:>5}  {:<17}  {:>8}  {:<9}  {:<11}  {}",
            "scene", "timecode", "duration", "emotion", "cues", "location"
        )
        .bold()
    );
    for record in report::records(storyboard) {
        let location = if record.location.is_empty() {
            "-".dimmed().to_string()
        } else {
            record.location.clone()
        };
        println!(
            "{:>5}  {:<17}  {:>7.1}s  {:<9}  {:<11}  {}",
            format!("{:03}", record.scene_id),
            format!("{}-{}", record.start_time, record.end_time),
            record.duration_seconds,
            record.emotion.to_string(),
            format!("{}-{}", record.cue_range.0, record.cue_range.1),
            location,
        );
        if !record.boundary_reason.is_empty() {
            println!("{:>5}  {}", "", record.boundary_reason.cyan());
        }
    }
    println!(
        "{} scene(s), {} cue(s), total {}",
        storyboard.scene_count(),
        storyboard.cue_count(),
        report::format_clock(storyboard.total_duration())
    );
}

#[cfg(feature = "rayon")]
fn build_all(
    transcripts: Vec<Vec<Cue>>,
    options: &SegmentOptions,
) -> Result<Vec<Storyboard>, Box<dyn std::error::Error>> {
    Ok(storyboard::build_storyboards_parallel(transcripts, options)?)
}

#[cfg(not(feature = "rayon"))]
fn build_all(
    transcripts: Vec<Vec<Cue>>,
    options: &SegmentOptions,
) -> Result<Vec<Storyboard>, Box<dyn std::error::Error>> {
    let engine = Storyboarder::new(*options)?;
    Ok(transcripts
        .into_iter()
        .zip(1_u32..)
        .map(|(cues, chapter)| engine.with_chapter(chapter).build(cues))
        .collect())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            chapter,
            segment,
        } => {
            let formats = parse_formats(&format)
                .ok_or(format!("unsupported --format: {format} (json|markdown|both)"))?;
            let engine = Storyboarder::new(segment.options())?.with_chapter(chapter);
            let cues = load_cues(&input, segment.sort)?;
            let cue_count = cues.len();

            let storyboard = engine.build(cues);
            let targets = output_paths(&output, &formats);
            write_storyboard(
                &storyboard,
                &targets,
                &report_options(&input),
                cli.global.overwrite,
            )?;

            if cli.global.verbose {
                eprintln!(
                    "{} cue(s) -> {} scene(s) (min {:.1}s, merge {:.1}s)",
                    cue_count,
                    storyboard.scene_count(),
                    segment.min_duration,
                    segment.merge_threshold
                );
            }
            for (format, path) in &targets {
                println!("{} {} {}", "saved".green().bold(), format, path.display());
            }
        }
        Commands::Inspect {
            input,
            json,
            segment,
        } => {
            let engine = Storyboarder::new(segment.options())?;
            let storyboard = engine.build(load_cues(&input, segment.sort)?);

            if json {
                let payload: Value = report::to_json(&storyboard);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_scene_table(&storyboard);
            }
        }
        Commands::Batch {
            inputs,
            out,
            format,
            segment,
        } => {
            let formats = parse_formats(&format)
                .ok_or(format!("unsupported --format: {format} (json|markdown|both)"))?;
            let options = segment.options();
            options.validate()?;

            let targets = batch_targets(&inputs, &out, &formats)?;
            for (_, path) in targets.iter().flatten() {
                ensure_writable_path(path, cli.global.overwrite)?;
            }

            let transcripts = inputs
                .iter()
                .map(|input| load_cues(input, segment.sort))
                .collect::<Result<Vec<_>, _>>()?;
            let storyboards = build_all(transcripts, &options)?;

            fs::create_dir_all(&out)?;
            let progress_bar = if cli.global.progress {
                let pb = ProgressBar::new(storyboards.len() as u64);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?;
                pb.set_style(style.progress_chars("##-"));
                Some(pb)
            } else {
                None
            };

            let mut written = 0_usize;
            for ((input, storyboard), paths) in inputs.iter().zip(&storyboards).zip(&targets) {
                // Overwrite was checked up front for every target.
                write_storyboard(storyboard, paths, &report_options(input), true)?;
                written += paths.len();

                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }
                if cli.global.verbose {
                    eprintln!(
                        "chapter {}: {} -> {} scene(s)",
                        storyboard.chapter,
                        input.display(),
                        storyboard.scene_count()
                    );
                }
            }

            if let Some(pb) = progress_bar {
                pb.finish_with_message("done");
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Wrote {written} file(s) for {} chapter(s) to {}",
                    storyboards.len(),
                    out.display()
                )
                .green()
            );
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "storyboard", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
