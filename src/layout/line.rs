use crate::backend::{FontId, FontMetrics};
use crate::style::{StyledRun, TextStyle};
use crate::units::Pt;

/// One laid-out line: an ordered list of words, each carrying the style
/// it was written in.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<StyledRun>,
}

impl Line {
    /// Sum of the word advances, excluding inter-word spaces.
    pub fn words_width(&self, metrics: &impl FontMetrics) -> Pt {
        self.words
            .iter()
            .map(|w| metrics.text_advance(w.style.font, w.style.size, &w.text))
            .sum()
    }

    /// Natural width of the line: word advances plus one space advance
    /// (of the first word's style) per gap.
    pub fn natural_width(&self, metrics: &impl FontMetrics) -> Pt {
        let spaces = match self.words.first() {
            Some(first) => {
                metrics.space_advance(first.style.font, first.style.size)
                    * (self.words.len().saturating_sub(1) as f32)
            }
            None => Pt::ZERO,
        };
        self.words_width(metrics) + spaces
    }
}

/// Greedily wrap a sequence of styled runs into lines no wider than
/// `max_width`.
///
/// Each run's text is split on whitespace; words are appended to the
/// current line until adding a space plus the next word would exceed the
/// width, at which point the line is committed and a new one started. The
/// first word of a line is always placed, even when it alone exceeds the
/// width — the breaker never produces an empty line.
pub fn break_into_lines(
    runs: &[StyledRun],
    max_width: Pt,
    metrics: &impl FontMetrics,
) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<StyledRun> = Vec::new();
    let mut current_width = Pt::ZERO;

    for run in runs {
        for word in run.text.split_whitespace() {
            let word_width = metrics.text_advance(run.style.font, run.style.size, word);
            let space_width = metrics.space_advance(run.style.font, run.style.size);

            if current.is_empty() {
                current_width = word_width;
            } else if current_width + space_width + word_width > max_width {
                lines.push(Line {
                    words: std::mem::take(&mut current),
                });
                current_width = word_width;
            } else {
                current_width += space_width + word_width;
            }
            current.push(StyledRun::new(word, run.style));
        }
    }

    if !current.is_empty() {
        lines.push(Line { words: current });
    }

    lines
}

/// Wrap single-style text into plain string lines. Used by headings,
/// simple text, and captions, where no per-word styling is needed.
pub fn wrap_plain(
    text: &str,
    font: FontId,
    size: Pt,
    max_width: Pt,
    metrics: &impl FontMetrics,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let test = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if metrics.text_advance(font, size, &test) <= max_width || current.is_empty() {
            current = test;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Wrap text for a table cell, falling back to per-character breaks for
/// words wider than the cell itself: the word is split at the largest
/// prefix that fits, repeatedly, so no line ever overflows the cell.
pub fn wrap_cell(
    text: &str,
    font: FontId,
    size: Pt,
    max_width: Pt,
    metrics: &impl FontMetrics,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        if word.is_empty() {
            continue;
        }
        if metrics.text_advance(font, size, word) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for part in split_word(word, font, size, max_width, metrics) {
                lines.push(part);
            }
            // the last fragment could host following words, but keeping
            // fragments on their own lines matches how cells render
            continue;
        }

        let test = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if metrics.text_advance(font, size, &test) <= max_width {
            current = test;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split an over-wide word at the largest prefixes that fit `max_width`.
/// Always makes progress: a prefix is at least one character long.
fn split_word(
    word: &str,
    font: FontId,
    size: Pt,
    max_width: Pt,
    metrics: &impl FontMetrics,
) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest: Vec<char> = word.chars().collect();

    while !rest.is_empty() {
        let mut take = rest.len();
        while take > 1 {
            let prefix: String = rest[..take].iter().collect();
            if metrics.text_advance(font, size, &prefix) <= max_width {
                break;
            }
            take -= 1;
        }
        parts.push(rest[..take].iter().collect());
        rest.drain(..take);
    }

    parts
}

/// Helper for constructing a run sequence from plain text.
pub fn single_run<S: Into<String>>(text: S, style: TextStyle) -> Vec<StyledRun> {
    vec![StyledRun::new(text, style)]
}
