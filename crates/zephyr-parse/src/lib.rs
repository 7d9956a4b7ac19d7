mod highlight;
mod session;
#[cfg(test)]
mod tests;

pub use highlight::{HighlightSpan, diagnostics, highlight, highlight_range};
pub use session::{
    ChangedRange, Input, ParseSession, Parser, PartialParse, TokenizeFn, TreeFragment,
    ZephyrParser,
};
use zephyr_syntax::Tree;

/// Parses `text` with the built-in tokenizer.
pub fn parse(text: &str) -> Tree {
    ZephyrParser::new().parse(text)
}
