//! Flat, position-addressed syntax tree for Zephyr documents.
//!
//! Tokens are encoded as fixed-width records in a single post-order buffer,
//! closed by one synthetic root record spanning the whole document. The
//! buffer is navigated by skipping subtree sizes, without parent pointers.

mod buffer;
mod builder;
mod node_type;
mod token_kind;
mod tree;

/// Fixed-width record layout of the flat buffer.
pub use buffer::{FlatTreeRecord, UNIT_SIZE};
/// Encoding of token streams into trees.
pub use builder::{BuildOptions, TokenPolicy, TokenStreamError, TreeBuilder, validate};
/// Static node-type table shared by every tree.
pub use node_type::{NodeType, NodeTypeId, NodeTypeRegistry, StyleTag};
/// Lexical token kinds and spans.
pub use token_kind::{Token, TokenKind};
/// Finished trees and navigation handles.
pub use tree::{Children, LeafAtOffset, Records, SyntaxNode, Tree};
