//! Encoding of token streams into flat trees.

use std::borrow::Cow;

use drop_bomb::DropBomb;
use text_size::{TextLen as _, TextRange, TextSize};

use crate::buffer::FlatTreeRecord;
use crate::{NodeTypeRegistry, Token, TokenKind, Tree, UNIT_SIZE};

/// What to do with a token stream that breaks the ordering contract.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TokenPolicy {
    /// Repair spans so the tree is always well formed.
    #[default]
    Normalize,
    /// Refuse to build and report the first offending token.
    Reject,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BuildOptions {
    pub policy: TokenPolicy,
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self { policy: TokenPolicy::Reject }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("token #{index} ({kind:?} at {range:?}) ends past the end of the document ({len:?})")]
    OutOfBounds { index: usize, kind: TokenKind, range: TextRange, len: TextSize },
    #[error("token #{index} ({kind:?} at {range:?}) splits a multi-byte character")]
    SplitsChar { index: usize, kind: TokenKind, range: TextRange },
    #[error("token #{index} ({kind:?} at {range:?}) starts before the previous token at {previous:?}")]
    OutOfOrder { index: usize, kind: TokenKind, range: TextRange, previous: TextRange },
    #[error("token #{index} ({kind:?} at {range:?}) overlaps the previous token at {previous:?}")]
    Overlapping { index: usize, kind: TokenKind, range: TextRange, previous: TextRange },
}

impl TokenStreamError {
    /// Span of the offending token.
    pub fn range(&self) -> TextRange {
        match *self {
            Self::OutOfBounds { range, .. }
            | Self::SplitsChar { range, .. }
            | Self::OutOfOrder { range, .. }
            | Self::Overlapping { range, .. } => range,
        }
    }
}

/// Checks that `tokens` lie inside `text` on character boundaries, sorted by
/// start and disjoint.
pub fn validate(text: &str, tokens: &[Token]) -> Result<(), TokenStreamError> {
    let len = text.text_len();
    let mut previous: Option<TextRange> = None;

    for (index, &Token { kind, range }) in tokens.iter().enumerate() {
        if range.end() > len {
            return Err(TokenStreamError::OutOfBounds { index, kind, range, len });
        }
        let on_boundary = |offset: TextSize| text.is_char_boundary(offset.into());
        if !on_boundary(range.start()) || !on_boundary(range.end()) {
            return Err(TokenStreamError::SplitsChar { index, kind, range });
        }

        if let Some(previous) = previous {
            if range.start() < previous.start() {
                return Err(TokenStreamError::OutOfOrder { index, kind, range, previous });
            }
            if range.start() < previous.end() {
                return Err(TokenStreamError::Overlapping { index, kind, range, previous });
            }
        }

        previous = Some(range);
    }

    Ok(())
}

fn floor_char_boundary(text: &str, mut offset: TextSize) -> TextSize {
    while !text.is_char_boundary(offset.into()) {
        offset -= TextSize::new(1);
    }
    offset
}

/// Repairs a malformed stream: clamp to the document and snap to character
/// boundaries, stable-sort by start, then push each start past the previous end.
fn normalize<'t>(text: &str, tokens: &'t [Token]) -> Cow<'t, [Token]> {
    let len = text.text_len();
    let error = match validate(text, tokens) {
        Ok(()) => return Cow::Borrowed(tokens),
        Err(error) => error,
    };
    tracing::warn!(%error, tokens = tokens.len(), "normalizing malformed token stream");

    let mut tokens = tokens.to_vec();
    for token in &mut tokens {
        let start = floor_char_boundary(text, token.range.start().min(len));
        let end = floor_char_boundary(text, token.range.end().min(len));
        token.range = TextRange::new(start, end);
    }

    tokens.sort_by_key(|token| token.range.start());

    let mut previous_end = TextSize::new(0);
    for token in &mut tokens {
        let start = token.range.start().max(previous_end);
        let end = token.range.end().max(start);
        token.range = TextRange::new(start, end);
        previous_end = end;
    }

    Cow::Owned(tokens)
}

/// Encodes token streams as two-level trees: one leaf per token under a
/// root that spans the whole document.
///
/// Leaves are appended in document order; [`finish`](Self::finish) closes the
/// buffer with the root record. Dropping a builder without finishing it panics.
pub struct TreeBuilder {
    text: Box<str>,
    registry: &'static NodeTypeRegistry,
    buffer: Vec<u32>,
    leaves: u32,
    bomb: DropBomb,
}

impl TreeBuilder {
    pub fn new(text: &str) -> Self {
        Self::with_capacity(text, 0)
    }

    pub fn with_capacity(text: &str, leaves: usize) -> Self {
        Self {
            text: text.into(),
            registry: NodeTypeRegistry::global(),
            buffer: Vec::with_capacity((leaves + 1) * UNIT_SIZE as usize),
            leaves: 0,
            bomb: DropBomb::new("`TreeBuilder::finish()` must be called"),
        }
    }

    /// Appends a leaf for a token of `kind` covering `range`.
    ///
    /// Leaves are written as given; ordering is the caller's responsibility.
    pub fn leaf(&mut self, kind: TokenKind, range: TextRange) {
        let node_type = self.registry.type_for(kind);
        self.buffer.extend(FlatTreeRecord::leaf(node_type.id(), range).encode());
        self.leaves += 1;
    }

    pub fn token(&mut self, token: Token) {
        self.leaf(token.kind, token.range);
    }

    /// Appends the root record and returns the finished tree.
    pub fn finish(self) -> Tree {
        let Self { text, registry, mut buffer, leaves, mut bomb } = self;
        bomb.defuse();

        let root = registry.root_type().id();
        let range = TextRange::up_to(text.text_len());
        let size = leaves * UNIT_SIZE + UNIT_SIZE;
        buffer.extend(FlatTreeRecord::new(root, range, size).encode());

        tracing::trace!(leaves, text_len = u32::from(range.end()), "finished tree");
        Tree::new(registry, buffer.into_boxed_slice(), root, text)
    }

    /// Encodes `tokens` under a root spanning `text`.
    ///
    /// Never fails: a malformed stream is normalized first.
    pub fn build(text: &str, tokens: &[Token]) -> Tree {
        let tokens = normalize(text, tokens);
        Self::from_tokens(text, &tokens)
    }

    /// Like [`build`](Self::build), honoring `options.policy`.
    pub fn try_build(
        text: &str,
        tokens: &[Token],
        options: BuildOptions,
    ) -> Result<Tree, TokenStreamError> {
        match options.policy {
            TokenPolicy::Normalize => Ok(Self::build(text, tokens)),
            TokenPolicy::Reject => {
                validate(text, tokens)?;
                Ok(Self::from_tokens(text, tokens))
            }
        }
    }

    fn from_tokens(text: &str, tokens: &[Token]) -> Tree {
        let mut builder = Self::with_capacity(text, tokens.len());
        for &token in tokens {
            builder.token(token);
        }
        builder.finish()
    }
}
