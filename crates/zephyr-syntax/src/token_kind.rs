use text_size::{TextRange, TextSize};

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum TokenKind {
    CONST_KW,
    LET_KW,
    SEMICOLON,
    ASSIGN,
    NUMBER,
    STRING,
    IDENT,

    /// Text the tokenizer could not classify.
    ERROR,
}

impl TokenKind {
    pub const ALL: [Self; 8] = [
        Self::CONST_KW,
        Self::LET_KW,
        Self::SEMICOLON,
        Self::ASSIGN,
        Self::NUMBER,
        Self::STRING,
        Self::IDENT,
        Self::ERROR,
    ];

    /// Maps a raw tokenizer type index to a kind.
    ///
    /// Indices outside the enum become [`TokenKind::ERROR`].
    pub fn from_index(index: u16) -> Self {
        Self::ALL.get(usize::from(index)).copied().unwrap_or(Self::ERROR)
    }

    pub const fn index(self) -> u16 {
        self as u16
    }

    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::CONST_KW | Self::LET_KW)
    }
}

/// A typed span produced by a tokenizer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Builds a token from the raw `(type, start, end_exclusive)` triple an
    /// external tokenizer reports.
    ///
    /// An inverted span collapses to an empty range at `start`.
    pub fn from_raw(index: u16, start: u32, end: u32) -> Self {
        let start = TextSize::new(start);
        let end = TextSize::new(end).max(start);
        Self::new(TokenKind::from_index(index), TextRange::new(start, end))
    }
}
