//! The closed node-type table.
//!
//! Every token kind with an explicit mapping owns one entry; two synthetic
//! entries cover the root and anything left unmapped. Ids are dense and
//! index directly into the table.

use std::fmt;

use crate::TokenKind;

/// Dense, stable identifier of a [`NodeType`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct NodeTypeId(u16);

impl NodeTypeId {
    pub const ROOT: Self = Self(0);
    pub const UNKNOWN: Self = Self(8);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<NodeTypeId> for u32 {
    fn from(id: NodeTypeId) -> Self {
        Self::from(id.0)
    }
}

/// Highlighting category attached to a node type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StyleTag {
    Keyword,
    Operator,
    Number,
    String,
    VariableName,
}

impl StyleTag {
    /// Returns the tag name highlighters key their themes on.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Operator => "operator",
            Self::Number => "number",
            Self::String => "string",
            Self::VariableName => "variableName",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeType {
    id: NodeTypeId,
    name: &'static str,
    style: Option<StyleTag>,
}

impl NodeType {
    const fn new(id: u16, name: &'static str, style: Option<StyleTag>) -> Self {
        Self { id: NodeTypeId(id), name, style }
    }

    pub const fn id(&self) -> NodeTypeId {
        self.id
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn style(&self) -> Option<StyleTag> {
        self.style
    }

    pub const fn is_root(&self) -> bool {
        self.id.0 == NodeTypeId::ROOT.0
    }

    pub const fn is_unknown(&self) -> bool {
        self.id.0 == NodeTypeId::UNKNOWN.0
    }
}

const NODE_TYPE_COUNT: usize = 9;

/// Read-only registry of all node types.
#[derive(Debug)]
pub struct NodeTypeRegistry {
    types: [NodeType; NODE_TYPE_COUNT],
}

static REGISTRY: NodeTypeRegistry = NodeTypeRegistry {
    types: [
        NodeType::new(0, "topNode", None),
        NodeType::new(1, "const", Some(StyleTag::Keyword)),
        NodeType::new(2, "let", Some(StyleTag::Keyword)),
        NodeType::new(3, "semicolon", None),
        NodeType::new(4, "assign", Some(StyleTag::Operator)),
        NodeType::new(5, "number", Some(StyleTag::Number)),
        NodeType::new(6, "string", Some(StyleTag::String)),
        NodeType::new(7, "identifier", Some(StyleTag::VariableName)),
        NodeType::new(8, "unknown", None),
    ],
};

impl NodeTypeRegistry {
    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Returns the node type for `kind`, falling back to
    /// [`unknown_type`](Self::unknown_type) for unmapped kinds.
    pub fn type_for(&self, kind: TokenKind) -> &NodeType {
        match Self::id_for(kind) {
            Some(id) => &self.types[usize::from(id.0)],
            None => self.unknown_type(),
        }
    }

    const fn id_for(kind: TokenKind) -> Option<NodeTypeId> {
        let raw = match kind {
            TokenKind::CONST_KW => 1,
            TokenKind::LET_KW => 2,
            TokenKind::SEMICOLON => 3,
            TokenKind::ASSIGN => 4,
            TokenKind::NUMBER => 5,
            TokenKind::STRING => 6,
            TokenKind::IDENT => 7,
            TokenKind::ERROR => return None,
        };
        Some(NodeTypeId(raw))
    }

    pub fn root_type(&self) -> &NodeType {
        &self.types[usize::from(NodeTypeId::ROOT.0)]
    }

    pub fn unknown_type(&self) -> &NodeType {
        &self.types[usize::from(NodeTypeId::UNKNOWN.0)]
    }

    pub fn get(&self, id: NodeTypeId) -> Option<&NodeType> {
        self.types.get(usize::from(id.0))
    }

    /// Iterates all node types in id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NodeType> + '_ {
        self.types.iter()
    }
}
