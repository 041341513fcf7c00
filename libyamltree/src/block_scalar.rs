//! Literal and folded block scalars.
//!
//! The lexer hands over the header (`|`, `>-`, `|2+`, ...) and the untouched
//! block body starting at the line after the header. Reconstruction works
//! line by line:
//!
//! 1. Detect the natural indentation from the first non-blank line.
//! 2. Validate leading blank lines and the explicit indentation indicator.
//! 3. Remove the effective indentation from every line.
//! 4. Chomp trailing line breaks according to the header.

use crate::error::BlockScalarError;

/// Block scalar chomping indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Chomping {
    /// `-` strip all trailing newlines
    Strip,
    /// (default) clip to single trailing newline
    #[default]
    Clip,
    /// `+` keep all trailing newlines
    Keep,
}

/// Indicators read from a block scalar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockHeader {
    pub chomping: Chomping,
    /// Explicit indentation indicator (1-9).
    pub indent: Option<usize>,
}

impl BlockHeader {
    pub(crate) fn parse(text: &str) -> Self {
        // A trailing comment may follow the indicators.
        let indicators = text.split('#').next().unwrap_or_default();
        let chomping = if indicators.contains('-') {
            Chomping::Strip
        } else if indicators.contains('+') {
            Chomping::Keep
        } else {
            Chomping::Clip
        };
        let indent = indicators
            .chars()
            .filter_map(|c| c.to_digit(10))
            .find(|d| *d > 0)
            .map(|d| d as usize);
        Self { chomping, indent }
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_blank(line: &str) -> bool {
    line.trim_start_matches(' ').is_empty()
}

/// Rebuild the string value of a block scalar from its header and raw body.
pub(crate) fn reconstruct(header: &str, raw: &str) -> Result<String, BlockScalarError> {
    let header = BlockHeader::parse(header);
    let lines: Vec<&str> = raw.split('\n').collect();

    let first_content = lines.iter().position(|line| !is_blank(line));
    let leading_blank = &lines[..first_content.unwrap_or(lines.len())];
    let found_indent = match first_content {
        Some(i) => leading_spaces(lines[i]),
        None => leading_blank.iter().map(|line| line.len()).max().unwrap_or(0),
    };

    if leading_blank.iter().any(|line| line.len() > found_indent) {
        return Err(BlockScalarError::TooManySpaces);
    }
    if let Some(indicated) = header.indent {
        if first_content.is_some() && found_indent < indicated {
            return Err(BlockScalarError::LessIndented);
        }
    }
    let indent = header.indent.unwrap_or(found_indent);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| &line[leading_spaces(line).min(indent)..])
        .collect();

    Ok(chomp(&stripped, header.chomping))
}

fn chomp(lines: &[&str], chomping: Chomping) -> String {
    if chomping == Chomping::Keep {
        return lines.join("\n");
    }
    let Some(last) = lines.iter().rposition(|line| !is_blank(line)) else {
        return String::new();
    };
    let mut body = lines[..=last].join("\n");
    if chomping == Chomping::Clip && last + 1 < lines.len() {
        body.push('\n');
    }
    body
}
