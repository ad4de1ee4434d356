//! User-editable aspect-ratio and resolution lists, and the button-titles script.
//!
//! Both lists are line-oriented text. Lines starting with `#` are comments,
//! text after the first `#` on a value line is that entry's tooltip.
//! Malformed lines are skipped and reported as [`ListWarning`]s rather than
//! failing the whole list.
//!
//! ```
//! use zenaspect::lists;
//!
//! let parsed = lists::parse_aspect_ratios("16:9   # Widescreen\nwide\n");
//! assert_eq!(parsed.entries.len(), 1);
//! assert_eq!(parsed.entries[0].flipped_label, "9:16");
//! assert_eq!(parsed.warnings[0].line, 2);
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::calc::Size;
use crate::ratio::{AspectRatio, RatioError};

/// Written when the aspect-ratio list is missing.
pub const DEFAULT_ASPECT_RATIOS: &str = "\
1:1            # Square
4:3            # Television Photography
3:2            # Photography
8:5            # Widescreen Displays
16:9           # Widescreen Television
21:9           # Ultrawide Cinematography";

/// Written when the resolution list is missing.
pub const DEFAULT_RESOLUTIONS: &str = "\
512, 512, 512     # 512x512
768, 768, 768     # 768x768
1024, 1024, 1024  # 1024x1024
1280, 1280, 1280  # 1280x1280
1536, 1536, 1536  # 1536x1536
2048, 2048, 2048  # 2048x2048";

/// Variable the host front-end reads button tooltips from.
pub const TITLES_SENTINEL: &str = "arsp__ar_button_titles";

const TITLES_HEADER: &str = "// Do not put custom titles here. \
This file is overwritten each time the WebUI is started.\n";

/// One aspect-ratio button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioEntry {
    pub ratio: AspectRatio,
    /// Button text in landscape orientation, e.g. `16:9`.
    pub label: String,
    /// Button text while switched, e.g. `9:16`.
    pub flipped_label: String,
    /// Tooltip, trimmed. Empty if the line had none.
    pub comment: String,
}

/// One fixed-resolution button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionEntry {
    pub label: String,
    pub size: Size,
    pub comment: String,
}

/// Entries parsed from one list, plus a warning per skipped line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListParse<T> {
    pub entries: Vec<T>,
    pub warnings: Vec<ListWarning>,
}

impl<T> Default for ListParse<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// A list line that was skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {reason}: {text:?}")]
pub struct ListWarning {
    /// 1-based line number.
    pub line: usize,
    /// The offending line, as written.
    pub text: String,
    pub reason: ListWarningReason,
}

/// Why a list line was skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListWarningReason {
    #[error("invalid aspect ratio ({0})")]
    Ratio(RatioError),
    /// Resolution rows need exactly `label, width, height`.
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),
    #[error("empty label")]
    EmptyLabel,
    /// Width or height is not a positive integer.
    #[error("width and height must be positive integers")]
    InvalidDimension,
}

/// Parse an aspect-ratio list.
pub fn parse_aspect_ratios(text: &str) -> ListParse<RatioEntry> {
    parse_lines(text, |value, comment| {
        let ratio: AspectRatio = value.parse().map_err(ListWarningReason::Ratio)?;
        let (n, d) = value
            .split_once(':')
            .ok_or(ListWarningReason::Ratio(RatioError::MissingSeparator))?;
        let (n, d) = (n.trim(), d.trim());
        Ok(RatioEntry {
            ratio,
            label: format!("{n}:{d}"),
            flipped_label: format!("{d}:{n}"),
            comment: String::from(comment),
        })
    })
}

/// Parse a resolution list.
pub fn parse_resolutions(text: &str) -> ListParse<ResolutionEntry> {
    parse_lines(text, |value, comment| {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        let &[label, width, height] = fields.as_slice() else {
            return Err(ListWarningReason::FieldCount(fields.len()));
        };
        if label.is_empty() {
            return Err(ListWarningReason::EmptyLabel);
        }
        let size = Size::new(parse_dimension(width)?, parse_dimension(height)?);
        Ok(ResolutionEntry {
            label: String::from(label),
            size,
            comment: String::from(comment),
        })
    })
}

/// Render the button-titles script mapping each button's text to its tooltip.
///
/// Ratio buttons come first, then resolution buttons. Keys carry the leading
/// space the host puts in button text.
pub fn render_titles(ratios: &[RatioEntry], resolutions: &[ResolutionEntry]) -> String {
    let pairs = ratios
        .iter()
        .map(|e| (&e.label, &e.comment))
        .chain(resolutions.iter().map(|e| (&e.label, &e.comment)));

    let mut out = String::from(TITLES_HEADER);
    out.push_str(TITLES_SENTINEL);
    out.push_str(" = {\n");
    for (label, comment) in pairs {
        out.push_str(&format!(
            "    \" {}\" : \"{}\",\n",
            escape_js(label),
            escape_js(comment)
        ));
    }
    out.push('}');
    out
}

fn parse_lines<T>(
    text: &str,
    mut parse_entry: impl FnMut(&str, &str) -> Result<T, ListWarningReason>,
) -> ListParse<T> {
    let mut parsed = ListParse::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (value, comment) = line.split_once('#').unwrap_or((line, ""));
        match parse_entry(value.trim(), comment.trim()) {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => parsed.warnings.push(ListWarning {
                line: idx + 1,
                text: String::from(raw),
                reason,
            }),
        }
    }
    parsed
}

fn parse_dimension(text: &str) -> Result<u32, ListWarningReason> {
    match text.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ListWarningReason::InvalidDimension),
    }
}

fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}
