use crate::chunkable::Chunkable;
use crate::group::GroupedNode;
use tree_sitter::{Node, Point, Tree};

/// A unit of a tree-sitter parse as seen by the splitter: either a real
/// syntax node or a fused run of siblings.
#[derive(Debug, Clone)]
pub enum SourceUnit<'tree> {
    Node(Node<'tree>),
    Group(GroupedNode<SourceUnit<'tree>>),
}

impl<'tree> SourceUnit<'tree> {
    /// The root unit of a parsed tree
    pub fn root(tree: &'tree Tree) -> Self {
        Self::Node(tree.root_node())
    }
}

impl<'tree> Chunkable for SourceUnit<'tree> {
    fn start_byte(&self) -> usize {
        match self {
            Self::Node(node) => node.start_byte(),
            Self::Group(group) => group.start_byte(),
        }
    }

    fn end_byte(&self) -> usize {
        match self {
            Self::Node(node) => node.end_byte(),
            Self::Group(group) => group.end_byte(),
        }
    }

    fn start_position(&self) -> Point {
        match self {
            Self::Node(node) => node.start_position(),
            Self::Group(group) => group.start_position(),
        }
    }

    fn end_position(&self) -> Point {
        match self {
            Self::Node(node) => node.end_position(),
            Self::Group(group) => group.end_position(),
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::Node(node) => node.kind(),
            Self::Group(group) => group.kind(),
        }
    }

    fn members(&self) -> Vec<Self> {
        match self {
            Self::Node(node) => {
                let mut cursor = node.walk();
                node.children(&mut cursor).map(Self::Node).collect()
            }
            Self::Group(group) => group.members().to_vec(),
        }
    }

    fn is_fused(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}
