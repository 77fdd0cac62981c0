//! Text normalization pipeline for date-filtered transcripts.
//!
//! Normalization is an ordered list of [`Step`]s, each a pure `text -> text`
//! rewrite that runs on the previous step's output. [`PIPELINE`] is the
//! standard order:
//!
//! 1. [`StripHeader`](Step::StripHeader) - export preamble at the start of the text
//! 2. [`StripTimestampLines`](Step::StripTimestampLines) - whole `YYYY-MM-DD HH:MM:SS ...` lines
//! 3. [`ApplyRules`](Step::ApplyRules) - user [`FilterRules`], in declaration order
//! 4. [`RemoveImagePlaceholders`](Step::RemoveImagePlaceholders) - `[图片]`
//! 5. [`CollapseBlankRuns`](Step::CollapseBlankRuns) - at most one blank line in a row
//! 6. [`RemoveNumericIds`](Step::RemoveNumericIds) - `(123456)` decorations
//! 7. [`RemoveMentions`](Step::RemoveMentions) - `@name ` tokens, pairs first
//! 8. [`RemoveStickers`](Step::RemoveStickers) - `[流泪]...`, then any `[...]` token
//! 9. [`DropBlankLines`](Step::DropBlankLines) - empty or whitespace-only lines
//! 10. [`Trim`](Step::Trim) - surrounding whitespace
//!
//! The order is load-bearing. Rules only ever see text whose timestamp lines
//! are already gone. Lines emptied by steps 6-8 are removed by step 9, not
//! collapsed by step 5. Mention pairs are removed before single mentions, and
//! `[流泪]` before the generic bracket rule, since it also consumes the rest
//! of its line.
//!
//! # Example
//!
//! ```
//! use chatdigest::core::{FilterRules, normalize};
//!
//! let text = "2025-03-18 10:08:26 Alice\n(10001)Hello[图片] @Bob hi";
//! assert_eq!(normalize(text, &FilterRules::new()), "Hello hi");
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::rules::FilterRules;

/// Image placeholders inserted by the exporter in place of pictures.
pub const IMAGE_PLACEHOLDERS: &[&str] = &["[图片]"];

/// Sticker placeholder removed before the generic bracket rule.
const STICKER_PLACEHOLDER: &str = "[表情]";

static EXPORT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\A(?:",
        r"消息记录（此消息记录为文本格式，不支持重新导入）\n+",
        r"|={64,}\n消息分组:.*\n={64,}\n消息对象:.*\n={64,}\n+",
        r")+",
    ))
    .unwrap()
});

static TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2} [^\n]+(?:\n|\z)")
        .unwrap()
});

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static NUMERIC_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([0-9]+\)").unwrap());

static MENTION_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[^ \n]+ @[^ \n]+ ").unwrap());

static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[^ \n]+ ").unwrap());

static CRYING_STICKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[流泪\][^\n]*").unwrap());

static BRACKET_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]\n]+\]").unwrap());

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*$\n").unwrap());

/// One rewrite in the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    StripHeader,
    StripTimestampLines,
    ApplyRules,
    RemoveImagePlaceholders,
    CollapseBlankRuns,
    RemoveNumericIds,
    RemoveMentions,
    RemoveStickers,
    DropBlankLines,
    Trim,
}

/// The standard step order used by [`normalize`].
pub const PIPELINE: [Step; 10] = [
    Step::StripHeader,
    Step::StripTimestampLines,
    Step::ApplyRules,
    Step::RemoveImagePlaceholders,
    Step::CollapseBlankRuns,
    Step::RemoveNumericIds,
    Step::RemoveMentions,
    Step::RemoveStickers,
    Step::DropBlankLines,
    Step::Trim,
];

impl Step {
    /// Applies this step to `text`. Only [`Step::ApplyRules`] reads `rules`.
    pub fn apply(self, text: &str, rules: &FilterRules) -> String {
        match self {
            Step::StripHeader => EXPORT_HEADER.replace(text, "").into_owned(),
            Step::StripTimestampLines => TIMESTAMP_LINE.replace_all(text, "").into_owned(),
            Step::ApplyRules => rules.apply(text),
            Step::RemoveImagePlaceholders => IMAGE_PLACEHOLDERS
                .iter()
                .fold(text.to_string(), |acc, token| acc.replace(token, "")),
            Step::CollapseBlankRuns => BLANK_RUN.replace_all(text, "\n\n").into_owned(),
            Step::RemoveNumericIds => NUMERIC_ID.replace_all(text, "").into_owned(),
            Step::RemoveMentions => {
                let text = MENTION_PAIR.replace_all(text, "");
                MENTION.replace_all(&text, "").into_owned()
            }
            Step::RemoveStickers => {
                let text = text.replace(STICKER_PLACEHOLDER, "");
                let text = CRYING_STICKER.replace_all(&text, "");
                BRACKET_TOKEN.replace_all(&text, "").into_owned()
            }
            Step::DropBlankLines => BLANK_LINE.replace_all(text, "").into_owned(),
            Step::Trim => text.trim().to_string(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::StripHeader => "strip-header",
            Step::StripTimestampLines => "strip-timestamp-lines",
            Step::ApplyRules => "apply-rules",
            Step::RemoveImagePlaceholders => "remove-image-placeholders",
            Step::CollapseBlankRuns => "collapse-blank-runs",
            Step::RemoveNumericIds => "remove-numeric-ids",
            Step::RemoveMentions => "remove-mentions",
            Step::RemoveStickers => "remove-stickers",
            Step::DropBlankLines => "drop-blank-lines",
            Step::Trim => "trim",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `steps` over `text` in order.
pub fn run_steps(text: &str, steps: &[Step], rules: &FilterRules) -> String {
    steps.iter().fold(text.to_string(), |acc, step| {
        let out = step.apply(&acc, rules);
        debug!(step = step.name(), before = acc.len(), after = out.len(), "normalize");
        out
    })
}

/// Runs the standard [`PIPELINE`] over `text`.
pub fn normalize(text: &str, rules: &FilterRules) -> String {
    run_steps(text, &PIPELINE, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(step: Step, text: &str) -> String {
        step.apply(text, &FilterRules::new())
    }

    #[test]
    fn test_strip_header_at_start() {
        let header = format!(
            "消息记录（此消息记录为文本格式，不支持重新导入）\n\n{eq}\n消息分组:我的群聊\n{eq}\n消息对象:读书会\n{eq}\n\nbody",
            eq = "=".repeat(64)
        );
        assert_eq!(step(Step::StripHeader, &header), "body");
    }

    #[test]
    fn test_strip_header_only_at_start() {
        let text = "body\n消息记录（此消息记录为文本格式，不支持重新导入）\nmore";
        assert_eq!(step(Step::StripHeader, text), text);
    }

    #[test]
    fn test_strip_timestamp_lines_removes_whole_line() {
        let text = "2025-03-18 10:08:26 Alice(10001)\nHello\n2025-03-18 10:09:00 Bob\n";
        assert_eq!(step(Step::StripTimestampLines, text), "Hello\n");
    }

    #[test]
    fn test_strip_timestamp_line_at_end_of_text() {
        assert_eq!(step(Step::StripTimestampLines, "Hi\n2025-03-18 10:09:00 Bob"), "Hi\n");
    }

    #[test]
    fn test_timestamp_requires_line_start_and_time() {
        let text = "see 2025-03-18 10:08:26 Alice\n2025-03-18 Alice\n";
        assert_eq!(step(Step::StripTimestampLines, text), text);
    }

    #[test]
    fn test_apply_rules_step() {
        let rules = FilterRules::parse("\\d+px\nADVERTISEMENT");
        assert_eq!(
            Step::ApplyRules.apply("ADVERTISEMENT: 12px font", &rules),
            ":  font"
        );
    }

    #[test]
    fn test_remove_image_placeholders() {
        assert_eq!(step(Step::RemoveImagePlaceholders, "a[图片]b[图片]"), "ab");
    }

    #[test]
    fn test_collapse_blank_runs() {
        assert_eq!(step(Step::CollapseBlankRuns, "a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_remove_numeric_ids() {
        assert_eq!(step(Step::RemoveNumericIds, "(10001)Hello (x1) (42)"), "Hello (x1) ");
    }

    #[test]
    fn test_remove_adjacent_mentions() {
        assert_eq!(step(Step::RemoveMentions, "@Alice @Bob see you"), "see you");
        assert_eq!(step(Step::RemoveMentions, "@A @B @C x"), "x");
        assert_eq!(step(Step::RemoveMentions, "hi @Bob there"), "hi there");
    }

    #[test]
    fn test_mention_without_trailing_space_survives() {
        assert_eq!(step(Step::RemoveMentions, "thanks @Bob"), "thanks @Bob");
        assert_eq!(step(Step::RemoveMentions, "@Bob\nnext line"), "@Bob\nnext line");
    }

    #[test]
    fn test_remove_stickers() {
        assert_eq!(step(Step::RemoveStickers, "ok[表情]!"), "ok!");
        assert_eq!(step(Step::RemoveStickers, "no[流泪]so sad\nnext"), "no\nnext");
        assert_eq!(step(Step::RemoveStickers, "[微笑]fine[OK]"), "fine");
        assert_eq!(step(Step::RemoveStickers, "[]kept"), "[]kept");
    }

    #[test]
    fn test_drop_blank_lines() {
        assert_eq!(step(Step::DropBlankLines, "a\n\n  \t\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_trim() {
        assert_eq!(step(Step::Trim, "\n\n  body \n\n"), "body");
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let text = "2025-03-18 10:08:26 Alice\n(10001)Hello[图片] @Bob hi";
        assert_eq!(normalize(text, &FilterRules::new()), "Hello hi");
    }

    #[test]
    fn test_pipeline_with_rules_in_order() {
        let rules = FilterRules::parse("\\d+px\nADVERTISEMENT\n");
        let text = "2025-03-18 10:08:26 Shop(20002)\nADVERTISEMENT banner 300px wide\n\n\n\nreal talk";
        assert_eq!(normalize(text, &rules), "banner  wide\nreal talk");
    }

    #[test]
    fn test_pipeline_idempotent_on_sample() {
        let text = "2025-03-18 10:08:26 A\n(1)@X @Y hey [表情]\n\n\n[流泪]sad\n  \nbye [图片]";
        let once = normalize(text, &FilterRules::new());
        assert_eq!(normalize(&once, &FilterRules::new()), once);
    }

    #[test]
    fn test_mid_line_timestamp_survives() {
        let text = "2025-03-18 10:00:00 A(1)\nmoved to 2025-03-19 09:00:00 Room 4";
        assert_eq!(normalize(text, &FilterRules::new()), "moved to 2025-03-19 09:00:00 Room 4");
    }

    #[test]
    fn test_timestamp_behind_numeric_id_needs_second_pass() {
        // Ids are removed after timestamp lines, so the exposed line is only
        // stripped on the next run.
        let rules = FilterRules::new();
        let once = normalize("(7)2025-03-18 10:00:00 x", &rules);
        assert_eq!(once, "2025-03-18 10:00:00 x");
        assert_eq!(normalize(&once, &rules), "");
    }

    #[test]
    fn test_run_subset_of_steps() {
        let rules = FilterRules::new();
        assert_eq!(
            run_steps("[图片]@Bob hi", &[Step::RemoveImagePlaceholders], &rules),
            "@Bob hi"
        );
        assert_eq!(normalize("[图片]@Bob hi", &rules), "hi");
    }

    #[test]
    fn test_order_of_trim_and_blank_lines_matters() {
        let rules = FilterRules::new();
        let text = "\n\nhello\n  \n";
        assert_eq!(run_steps(text, &[Step::Trim, Step::DropBlankLines], &rules), "hello");
        assert_eq!(run_steps(text, &[Step::DropBlankLines], &rules), "hello\n");
    }

    #[test]
    fn test_pipeline_order_is_documented() {
        let names: Vec<_> = PIPELINE.iter().map(|s| s.name()).collect();
        assert_eq!(names.first(), Some(&"strip-header"));
        assert_eq!(names.last(), Some(&"trim"));
        assert_eq!(names.len(), 10);
    }
}
