use serde::{Deserialize, Serialize};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

pub const DEFAULT_WRAP_WIDTH: usize = 62;
pub const TAB_SIZE: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WrapOptions {
    pub enabled: bool,
    pub width: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            width: DEFAULT_WRAP_WIDTH,
        }
    }
}

/// Splits one dialogue text line into escaped string-literal fragments.
///
/// A blank line yields a single empty fragment. Escaping happens after
/// wrapping, so `width` counts source characters rather than the
/// characters of the generated literal.
pub fn fragments(line: &str, wrap: &WrapOptions) -> Vec<String> {
    let line = line.trim_end();
    if line.is_empty() {
        return vec![String::new()];
    }
    if !wrap.enabled {
        return vec![escape(line)];
    }

    let options = Options::new(wrap.width.max(1))
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::HyphenSplitter)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(true);

    textwrap::wrap(&normalize_whitespace(line), options)
        .iter()
        .map(|segment| escape(segment))
        .collect()
}

/// Expands tabs to the next multiple of [`TAB_SIZE`] and turns every
/// other whitespace control character into a plain space, so wrapping
/// only ever sees space-separated words.
pub fn normalize_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let stop = (column / TAB_SIZE + 1) * TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', stop - column));
                column = stop;
            }
            '\r' | '\n' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

pub fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}
