//! Lexical classification of transcript text.
//!
//! Scene boundaries, emotional tone, and location hints are all derived from
//! fixed keyword tables and a handful of ordered regular expressions. The
//! tables are immutable `'static` data bundled into a [`Lexicon`], so any
//! number of engines can share them across threads without locking.
//!
//! Detection is deliberately simple: substring lookups in a fixed priority
//! order, first match wins.
//!
//! # Example
//!
//! ```
//! use storyboard::{BoundaryKind, Emotion, Lexicon};
//!
//! let lexicon = Lexicon::BUILTIN;
//! let boundary = lexicon.detect_boundary("第二天，他来到城门", "").unwrap();
//! assert_eq!(boundary.kind, BoundaryKind::LocationChange);
//! assert_eq!(lexicon.detect_emotion("他冷笑一声"), Emotion::Contempt);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use regex::Regex;

/// Verbs signalling that the narrative moves somewhere else.
pub const LOCATION_CHANGE_WORDS: &[&str] = &[
    "来到", "走进", "走出", "进入", "离开", "回到", "抵达", "踏入", "前往", "返回", "赶到",
    "飞向", "落在", "降落", "出现在", "走入", "步入", "闯入", "冲进", "跑向", "飞往",
];

/// Phrases signalling a jump in narrative time.
pub const TIME_SKIP_WORDS: &[&str] = &[
    "第二天", "第三天", "三天后", "数天后", "一个月后", "数月后", "一年后", "数年后", "百年后",
    "千年后", "万年后", "片刻后", "半晌后", "须臾间", "转眼间", "不久", "天亮", "天黑", "黄昏",
    "清晨", "午时", "夜半", "子时", "日落", "日出", "月上", "月落", "星光下", "随后", "接着",
    "继而", "旋即", "霎时",
];

/// Narrator phrases that cut to another thread of the story.
pub const SCENE_TRANSITION_WORDS: &[&str] = &[
    "此时", "另一边", "与此同时", "就在这时", "不远处", "话分两头", "且说", "却说", "再说",
    "话说", "另一处", "别处", "彼方", "那边厢",
];

/// Trigger keywords per emotion, in scan order.
pub const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Anger,
        &["怒喝", "暴怒", "震怒", "大怒", "咆哮", "怒吼", "愤怒"],
    ),
    (
        Emotion::Contempt,
        &["冷笑", "嘲讽", "讥讽", "嗤笑", "不屑", "轻蔑"],
    ),
    (
        Emotion::Fear,
        &["惊恐", "颤抖", "惧意", "害怕", "恐惧", "战栗"],
    ),
    (Emotion::Joy, &["欣喜", "大笑", "兴奋", "高兴", "欢喜", "喜悦"]),
    (
        Emotion::Sorrow,
        &["悲伤", "泪流", "哽咽", "痛哭", "悲泣", "伤感"],
    ),
    (Emotion::Calm, &["平静", "淡然", "从容", "镇定", "沉着"]),
    (Emotion::Tension, &["紧张", "凝重", "肃然", "严峻", "紧迫"]),
    (
        Emotion::Resolve,
        &["决然", "坚定", "毅然", "果决", "斩钉截铁"],
    ),
    (Emotion::Surprise, &["惊讶", "震惊", "愕然", "吃惊", "诧异"]),
    (Emotion::Pride, &["得意", "自豪", "傲然", "趾高气扬"]),
];

/// Location shapes, tried in order. Each captures the place in group 1.
///
/// Whitespace counts as a clause break alongside CJK punctuation, since a
/// scene's combined text joins its cues with single spaces.
const LOCATION_PATTERNS: &[&str] = &[
    // movement verb + place
    r"(?:来到|进入|走进|踏入)(?:了)?(.{2,10}?)[，。\s]",
    // "in/at" + place
    r"在(.{2,10}?)[，。中里\s]",
    // bare place noun ending in a location suffix
    r"(.{2,6}(?:山|峰|殿|宫|城|门|洞|府|阁|塔|院|场|台|谷|林|海|湖))[，。中里上下内外\s]",
];

static LOCATION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    LOCATION_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("location pattern is a valid regex"))
        .collect()
});

/// Shortest location (in characters) worth reporting.
const MIN_LOCATION_CHARS: usize = 2;

/// Category of a detected scene boundary.
///
/// Variants are declared in priority order: when one text matches several
/// categories, the earliest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoundaryKind {
    /// The characters move to a new place.
    LocationChange,
    /// Narrative time jumps forward.
    TimeSkip,
    /// The narrator cuts to a different thread.
    SceneTransition,
}

impl BoundaryKind {
    /// Human-readable category label used in boundary reasons.
    pub fn label(self) -> &'static str {
        match self {
            BoundaryKind::LocationChange => "location change",
            BoundaryKind::TimeSkip => "time skip",
            BoundaryKind::SceneTransition => "scene transition",
        }
    }
}

impl Display for BoundaryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A detected boundary: which category fired and on which keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Category of the boundary.
    pub kind: BoundaryKind,
    /// Keyword that matched.
    pub keyword: &'static str,
}

impl Boundary {
    /// Reason string combining the category label and the matched keyword,
    /// e.g. `"time skip: 第二天"`.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.kind.label(), self.keyword)
    }
}

/// Emotional tone of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emotion {
    Anger,
    Contempt,
    Fear,
    Joy,
    Sorrow,
    /// Used when no trigger keyword matches.
    #[default]
    Calm,
    Tension,
    Resolve,
    Surprise,
    Pride,
}

impl Emotion {
    /// All labels, in the order the builtin table scans them.
    pub const ALL: [Emotion; 10] = [
        Emotion::Anger,
        Emotion::Contempt,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sorrow,
        Emotion::Calm,
        Emotion::Tension,
        Emotion::Resolve,
        Emotion::Surprise,
        Emotion::Pride,
    ];

    /// Lowercase label, as written to reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Contempt => "contempt",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sorrow => "sorrow",
            Emotion::Calm => "calm",
            Emotion::Tension => "tension",
            Emotion::Resolve => "resolve",
            Emotion::Surprise => "surprise",
            Emotion::Pride => "pride",
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Read-only keyword tables driving boundary and emotion detection.
///
/// A `Lexicon` is a bundle of `'static` slices, so it is `Copy` and freely
/// shareable. [`Lexicon::BUILTIN`] carries the reference tables; custom
/// tables can be supplied for other genres as long as they live for
/// `'static` (typically `const` arrays).
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    /// Location-change verbs (highest boundary priority).
    pub location_change: &'static [&'static str],
    /// Time-skip phrases.
    pub time_skip: &'static [&'static str],
    /// Scene-transition phrases (lowest boundary priority).
    pub scene_transition: &'static [&'static str],
    /// Emotion trigger table, scanned in order.
    pub emotions: &'static [(Emotion, &'static [&'static str])],
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::BUILTIN
    }
}

impl Lexicon {
    /// The reference keyword tables.
    pub const BUILTIN: Lexicon = Lexicon {
        location_change: LOCATION_CHANGE_WORDS,
        time_skip: TIME_SKIP_WORDS,
        scene_transition: SCENE_TRANSITION_WORDS,
        emotions: EMOTION_KEYWORDS,
    };

    /// Boundary tables paired with their category, in priority order.
    fn boundary_tables(&self) -> [(BoundaryKind, &'static [&'static str]); 3] {
        [
            (BoundaryKind::LocationChange, self.location_change),
            (BoundaryKind::TimeSkip, self.time_skip),
            (BoundaryKind::SceneTransition, self.scene_transition),
        ]
    }

    /// Check whether `text` opens a new scene.
    ///
    /// Categories are scanned in [`BoundaryKind`] order and, within a
    /// category, keywords in table order; the first substring hit wins.
    ///
    /// `prev_text` is the preceding cue's text. It is accepted so that
    /// context-sensitive rules can be added later; the current rule only
    /// inspects `text`.
    pub fn detect_boundary(&self, text: &str, _prev_text: &str) -> Option<Boundary> {
        self.boundary_tables()
            .into_iter()
            .find_map(|(kind, words)| {
                words
                    .iter()
                    .find(|word| text.contains(*word))
                    .map(|keyword| Boundary { kind, keyword })
            })
    }

    /// Pick the emotion of `text`, defaulting to [`Emotion::Calm`].
    pub fn detect_emotion(&self, text: &str) -> Emotion {
        self.emotions
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
            .map(|(emotion, _)| *emotion)
            .unwrap_or_default()
    }

    /// Best-effort location hint for `text`, or an empty string.
    ///
    /// The result is a heuristic span, not a parsed place name.
    pub fn extract_location(&self, text: &str) -> String {
        extract_location(text)
    }
}

/// Try the location patterns in order and return the first capture of at
/// least two characters.
pub fn extract_location(text: &str) -> String {
    for regex in LOCATION_REGEXES.iter() {
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        let location = captures.get(1).map_or("", |m| m.as_str()).trim();
        if location.chars().count() >= MIN_LOCATION_CHARS {
            return location.to_string();
        }
    }
    String::new()
}
