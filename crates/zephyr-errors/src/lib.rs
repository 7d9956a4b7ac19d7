//! Diagnostics over Zephyr documents, rendered as annotated source snippets.

use std::fmt::Display;
use std::ops::Range;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;
use text_size::{TextLen as _, TextSize};
use zephyr_syntax::TokenStreamError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    message: String,
    label: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short note printed under the highlighted span.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, label: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), label: label.into(), range }
    }

    /// Text at `range` of `document` that no token rule matched.
    pub fn unrecognized_token(document: &str, range: TextRange) -> Self {
        let token = document.get(Range::<usize>::from(range)).unwrap_or_default();
        Self::error(
            format!("unrecognized token `{token}`"),
            "expected a keyword, identifier, number, string, `=` or `;`",
            range,
        )
    }

    /// A token stream rejected by strict tree building, pointing at the
    /// offending token.
    pub fn malformed_token_stream(error: &TokenStreamError) -> Self {
        let label = match error {
            TokenStreamError::OutOfBounds { .. } => "token ends past the end of the document",
            TokenStreamError::SplitsChar { .. } => "token splits a character",
            TokenStreamError::OutOfOrder { .. } => "token is out of order",
            TokenStreamError::Overlapping { .. } => "token overlaps its predecessor",
        };
        Self::error(format!("malformed token stream: {error}"), label, error.range())
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(snap(text, self.range)).label(&self.label))
                .fold(true),
        );
        renderer.render(message)
    }
}

/// Clamps `range` to `text` and widens it to character boundaries.
fn snap(text: &str, range: TextRange) -> Range<usize> {
    let len = text.text_len();
    let mut start = range.start().min(len);
    let mut end = range.end().min(len);

    while !text.is_char_boundary(start.into()) {
        start -= TextSize::new(1);
    }
    while !text.is_char_boundary(end.into()) {
        end += TextSize::new(1);
    }

    start.into()..end.into()
}
