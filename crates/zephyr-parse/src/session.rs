//! The request/response shape incremental-parse consumers drive.
//!
//! Consumers hand over the new document along with fragments of the previous
//! tree and the ranges that changed, then call [`PartialParse::advance`] until
//! it yields a tree. Zephyr documents are tokenized and encoded from scratch
//! on every request, so the first `advance` always completes.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use zephyr_syntax::{Token, Tree, TreeBuilder};

/// A document snapshot the parser reads from.
pub trait Input {
    /// Length in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the text in `from..to`.
    fn read(&self, from: usize, to: usize) -> Cow<'_, str>;
}

impl Input for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn read(&self, from: usize, to: usize) -> Cow<'_, str> {
        Cow::Borrowed(&self[from..to])
    }
}

impl Input for String {
    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn read(&self, from: usize, to: usize) -> Cow<'_, str> {
        self.as_str().read(from, to)
    }
}

/// A piece of a previous tree that a consumer offers for reuse.
#[derive(Clone, Debug)]
pub struct TreeFragment {
    pub from: usize,
    pub to: usize,
    /// Shift between the old tree's offsets and the new document's.
    pub offset: isize,
    pub tree: Arc<Tree>,
}

/// A range of the new document that was edited since the previous parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChangedRange {
    pub from: usize,
    pub to: usize,
}

/// An in-progress parse.
pub trait PartialParse {
    /// Does a unit of work; returns the tree once the parse is complete.
    fn advance(&mut self) -> Option<Tree>;

    /// Position up to which the document has been consumed.
    fn parsed_pos(&self) -> usize;

    /// Position the parse will stop at, if bounded.
    fn stopped_at(&self) -> Option<usize>;

    /// Asks the parse to stop once it reaches `pos`.
    fn stop_at(&mut self, pos: usize);
}

pub trait Parser {
    /// Starts a parse of `input`.
    ///
    /// `fragments` and `ranges` describe what can be reused from a previous
    /// tree. Implementations may ignore them and parse from scratch.
    fn create_parse<I: Input + ?Sized>(
        &self,
        input: &I,
        fragments: &[TreeFragment],
        ranges: &[ChangedRange],
    ) -> Box<dyn PartialParse>;

    /// Parses `input` to completion without any reuse.
    fn parse<I: Input + ?Sized>(&self, input: &I) -> Tree {
        let mut parse = self.create_parse(input, &[], &[]);
        loop {
            if let Some(tree) = parse.advance() {
                return tree;
            }
        }
    }
}

/// Turns text into tokens for a [`ZephyrParser`].
pub type TokenizeFn = fn(&str) -> Vec<Token>;

/// Full-reparse parser for Zephyr documents.
#[derive(Clone, Copy)]
pub struct ZephyrParser {
    tokenize: TokenizeFn,
}

impl ZephyrParser {
    pub fn new() -> Self {
        Self { tokenize: zephyr_tokenizer::tokenize }
    }

    /// Uses `tokenize` as the token source instead of the built-in tokenizer.
    pub fn with_tokenizer(tokenize: TokenizeFn) -> Self {
        Self { tokenize }
    }
}

impl Default for ZephyrParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ZephyrParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZephyrParser").finish_non_exhaustive()
    }
}

impl Parser for ZephyrParser {
    /// Prior fragments and changed ranges are accepted for compatibility and
    /// not used: every session rebuilds the whole tree.
    fn create_parse<I: Input + ?Sized>(
        &self,
        input: &I,
        fragments: &[TreeFragment],
        ranges: &[ChangedRange],
    ) -> Box<dyn PartialParse> {
        let document = input.read(0, input.len()).into_owned();
        tracing::debug!(
            len = document.len(),
            fragments = fragments.len(),
            ranges = ranges.len(),
            "starting full parse"
        );
        Box::new(ParseSession::new(document, self.tokenize))
    }
}

enum State {
    Pending,
    Done(Tree),
}

/// Single-shot parse of one document snapshot.
///
/// Reports itself as fully parsed from creation; the first
/// [`advance`](PartialParse::advance) builds and returns the tree.
pub struct ParseSession {
    document: String,
    tokenize: TokenizeFn,
    state: State,
}

impl ParseSession {
    pub fn new(document: String, tokenize: TokenizeFn) -> Self {
        Self { document, tokenize, state: State::Pending }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done(_))
    }
}

impl PartialParse for ParseSession {
    fn advance(&mut self) -> Option<Tree> {
        if let State::Done(tree) = &self.state {
            return Some(tree.clone());
        }

        let tokens = (self.tokenize)(&self.document);
        let tree = TreeBuilder::build(&self.document, &tokens);
        tracing::debug!(tokens = tokens.len(), len = self.document.len(), "parsed document");

        self.state = State::Done(tree.clone());
        Some(tree)
    }

    fn parsed_pos(&self) -> usize {
        self.document.len()
    }

    fn stopped_at(&self) -> Option<usize> {
        Some(self.document.len())
    }

    /// No-op: a parse cannot be interrupted part way.
    fn stop_at(&mut self, pos: usize) {
        tracing::trace!(pos, "ignoring stop_at request");
    }
}

impl fmt::Debug for ParseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseSession")
            .field("len", &self.document.len())
            .field("done", &self.is_done())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;
    use zephyr_syntax::{NodeTypeId, TokenKind};

    use super::*;

    #[test]
    fn single_advance_completes() {
        let parser = ZephyrParser::new();
        let mut parse = parser.create_parse("let x = 1;", &[], &[]);

        assert_eq!(parse.parsed_pos(), 10);
        assert_eq!(parse.stopped_at(), Some(10));

        let tree = parse.advance().expect("first advance must complete");
        assert_eq!(
            tree.buffer(),
            [2, 0, 3, 4, 7, 4, 5, 4, 4, 6, 7, 4, 5, 8, 9, 4, 3, 9, 10, 4, 0, 0, 10, 24]
        );
    }

    #[test]
    fn repeated_advance_returns_same_tree() {
        let mut session =
            ParseSession::new("const a = 'b';".to_owned(), zephyr_tokenizer::tokenize);
        assert!(!session.is_done());

        let first = session.advance().unwrap();
        assert!(session.is_done());
        let second = session.advance().unwrap();
        assert_eq!(first.buffer(), second.buffer());
    }

    #[test]
    fn stop_at_is_ignored() {
        let text = String::from("let a = 1; let b = 2;");
        let mut parse = ZephyrParser::new().create_parse(&text, &[], &[]);

        parse.stop_at(3);
        assert_eq!(parse.stopped_at(), Some(text.len()));

        let tree = parse.advance().unwrap();
        assert_eq!(tree.root().range(), TextRange::up_to(21.into()));
        assert_eq!(tree.root().children().len(), 10);
    }

    #[test]
    fn fragments_and_ranges_are_not_reused() {
        let parser = ZephyrParser::new();
        let old = Arc::new(parser.parse("let x = 1;"));
        let fragments = [TreeFragment { from: 0, to: 10, offset: 0, tree: old }];
        let ranges = [ChangedRange { from: 8, to: 9 }];

        let edited = "let x = 'one';";
        let reused = parser.create_parse(edited, &fragments, &ranges).advance().unwrap();
        let fresh = parser.parse(edited);

        assert_eq!(reused.buffer(), fresh.buffer());
        let value = reused.root().children().nth(3).unwrap();
        assert_eq!(value.node_type().name(), "string");
    }

    #[test]
    fn empty_document() {
        let tree = ZephyrParser::new().parse("");
        assert_eq!(tree.buffer(), [0, 0, 0, 4]);
    }

    #[test]
    fn external_tokenizer() {
        fn everything_is_weird(text: &str) -> Vec<Token> {
            vec![Token::from_raw(u16::MAX, 0, text.len() as u32)]
        }

        let tree = ZephyrParser::with_tokenizer(everything_is_weird).parse("xyz");
        let leaf = tree.root().children().next().unwrap();

        assert_eq!(leaf.node_type().id(), NodeTypeId::UNKNOWN);
        assert_eq!(TokenKind::from_index(u16::MAX), TokenKind::ERROR);
        assert_eq!(tree.root().range(), TextRange::up_to(3.into()));
    }

    #[test]
    fn malformed_external_tokens_are_normalized() {
        fn backwards(_: &str) -> Vec<Token> {
            vec![
                Token::from_raw(TokenKind::NUMBER.index(), 4, 5),
                Token::from_raw(TokenKind::IDENT.index(), 0, 1),
            ]
        }

        let tree = ZephyrParser::with_tokenizer(backwards).parse("a = 1");
        let starts =
            tree.leaves().map(|leaf| u32::from(leaf.range().start())).collect::<Vec<_>>();
        assert_eq!(starts, [0, 4]);
    }
}
