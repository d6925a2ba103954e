use std::{ops::Range, str::from_utf8};

use boxfinder_core::Error as CoreError;
use thiserror::Error;
use yansi::{Condition, Paint};

/// An error that happened while resolving the bounding box
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{0}")]
    Resolve(String),

    #[error(transparent)]
    Other(CoreError),
}

/// Convert a [`CoreError`] into a [`ResolveError`] that can be shown to the user
pub trait IntoResolveError {
    fn into_resolve_error(self, raw: Option<&[u8]>) -> ResolveError;
}

/// Returns the byte ranges of the numbers on a line of raw input
fn token_spans(line: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        if matches!(c, ' ' | ',' | '\t') {
            if let Some(s) = start.take() {
                spans.push(s..i);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push(s..line.len());
    }
    spans
}

/// Finds the line of raw input that contains the invalid token and the
/// token's range on this line
fn find_token<'a>(text: &'a str, position: usize, value: &str) -> Option<(&'a str, Range<usize>)> {
    text.lines().find_map(|line| {
        let span = token_spans(line).into_iter().nth(position.checked_sub(1)?)?;
        (&line[span.clone()] == value).then_some((line, span))
    })
}

/// Renders the line of raw input containing an invalid token and marks
/// the token
fn render_invalid_token(raw: &[u8], position: usize, value: &str, msg: &str) -> Option<String> {
    let text = from_utf8(raw).ok()?;
    let (snippet, span) = find_token(text, position, value)?;

    // format message
    let span_len = span.end - span.start;
    let prefix = span.start;
    let center_prefix = ((span_len + 1) / 2).saturating_sub(1);
    let center_suffix = span_len / 2;
    Some(
        format!(
            "Unable to parse coordinates\n\n{}{}{}\n{}{}{}{}\n{}{}{}",
            &snippet[0..prefix],
            &snippet[span.start..span.end].red(),
            &snippet[span.end..],
            " ".repeat(prefix),
            "─".repeat(center_prefix).red(),
            "┬".red(),
            "─".repeat(center_suffix).red(),
            " ".repeat(prefix + center_prefix),
            "╰── ".red(),
            msg.red().bold()
        )
        .whenever(Condition::from(|| {
            Condition::stderr_is_tty() && Condition::clicolor() && Condition::no_color()
        }))
        .to_string(),
    )
}

impl IntoResolveError for CoreError {
    fn into_resolve_error(self, raw: Option<&[u8]>) -> ResolveError {
        if let (CoreError::InvalidToken { position, value }, Some(raw)) = (&self, raw) {
            if let Some(s) = render_invalid_token(raw, *position, value, &self.to_string()) {
                return ResolveError::Resolve(s);
            }
        }
        ResolveError::Other(self)
    }
}
