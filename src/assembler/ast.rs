//! This AST describes a parsed 8085 source file.
//!
//! A file is a sequence of statements. A statement is either a label
//! or an instruction; instructions take zero or more comma-delimited
//! operands, each of which is an identifier or an integer.
//! Comments are prefixed with semicolons (;) and are single-line only.
//! Instructions are delimited by newlines.
//!
//! ```nasm
//! start:              ; a label
//!     mvi a, 0ffh     ; an instruction with two operands
//!     dcr a
//!     jnz start
//!     hlt
//! ```
//!
//! Nodes live in an arena owned by the [`SyntaxTree`] and refer to each
//! other by [`NodeId`]. Each node points back at its parent; the root
//! has none. Trees are built bottom-up with a [`TreeBuilder`] and cannot
//! be changed once finished.

use std::ops::Index;

/// Index of a node in its tree's arena.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SyntaxKind {
    Source,

    // Statement
    Instruction,
    Label,

    // Expression
    Identifier,
    Integer,
}

impl SyntaxKind {
    pub fn is_statement(self) -> bool {
        matches!(self, SyntaxKind::Instruction | SyntaxKind::Label)
    }

    pub fn is_expression(self) -> bool {
        matches!(self, SyntaxKind::Identifier | SyntaxKind::Integer)
    }
}

/// An ordered run of sibling nodes.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NodeList {
    nodes: Vec<NodeId>,
}

impl NodeList {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        NodeList { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Source {
    pub statements: NodeList,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub target: NodeId,
    pub operands: NodeList,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Label {
    /// Does not include the ':'.
    pub name: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Identifier {
    pub text: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Integer {
    pub value: u64,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeData {
    Source(Source),
    Instruction(Instruction),
    Label(Label),
    Identifier(Identifier),
    Integer(Integer),
}

impl NodeData {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeData::Source(_)      => SyntaxKind::Source,
            NodeData::Instruction(_) => SyntaxKind::Instruction,
            NodeData::Label(_)       => SyntaxKind::Label,
            NodeData::Identifier(_)  => SyntaxKind::Identifier,
            NodeData::Integer(_)     => SyntaxKind::Integer,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeData::Source(source) => source.statements.nodes().to_vec(),
            NodeData::Instruction(ins) => {
                let mut children = Vec::with_capacity(ins.operands.len() + 1);
                children.push(ins.target);
                children.extend(ins.operands.iter());
                children
            },
            NodeData::Label(label) => vec![label.name],
            NodeData::Identifier(_) |
            NodeData::Integer(_) => Vec::new(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    pub data: NodeData,
    pub position: usize,
    pub length: usize,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind()
    }

    pub fn end(&self) -> usize {
        self.position + self.length
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A finished, immutable tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in creation order, children before their parents.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// The root's statements, or nothing if the root is not a Source.
    pub fn statements(&self) -> &[NodeId] {
        match &self[self.root].data {
            NodeData::Source(source) => source.statements.nodes(),
            _ => &[],
        }
    }

    /// Text of an identifier node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self[id].data {
            NodeData::Identifier(identifier) => Some(&identifier.text),
            _ => None,
        }
    }

    /// Value of an integer node.
    pub fn value(&self, id: NodeId) -> Option<u64> {
        match &self[id].data {
            NodeData::Integer(integer) => Some(integer.value),
            _ => None,
        }
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Builds a tree from the leaves up.
///
/// Creating a node links its direct children to it. Grandchildren were
/// linked when their own parents were created, so linking never recurses.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder { nodes: Vec::new() }
    }

    /// Adds a node and adopts its children.
    ///
    /// # Panics
    ///
    /// If a child already has a parent, or a child is of the wrong family
    /// for its slot (a non-statement under Source, say).
    pub fn create(&mut self, position: usize, length: usize, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let children = data.children();
        self.check_families(&data);

        for child in children {
            let node = &mut self.nodes[child.0];
            assert!(node.parent.is_none(), "node {:?} already has a parent", child);
            node.parent = Some(id);
        }

        self.nodes.push(Node { data, position, length, parent: None });
        id
    }

    fn check_families(&self, data: &NodeData) {
        let kind_of = |id: NodeId| self.nodes[id.0].kind();
        match data {
            NodeData::Source(source) => {
                for id in source.statements.iter() {
                    assert!(kind_of(id).is_statement(), "{:?} is not a statement", kind_of(id));
                }
            },
            NodeData::Instruction(ins) => {
                assert_eq!(kind_of(ins.target), SyntaxKind::Identifier);
                for id in ins.operands.iter() {
                    assert!(kind_of(id).is_expression(), "{:?} is not an expression", kind_of(id));
                }
            },
            NodeData::Label(label) => assert_eq!(kind_of(label.name), SyntaxKind::Identifier),
            NodeData::Identifier(_) |
            NodeData::Integer(_) => {},
        }
    }

    pub fn identifier(&mut self, position: usize, length: usize, text: impl Into<String>) -> NodeId {
        self.create(position, length, NodeData::Identifier(Identifier { text: text.into() }))
    }

    pub fn integer(&mut self, position: usize, length: usize, value: u64) -> NodeId {
        self.create(position, length, NodeData::Integer(Integer { value }))
    }

    pub fn label(&mut self, position: usize, length: usize, name: NodeId) -> NodeId {
        self.create(position, length, NodeData::Label(Label { name }))
    }

    pub fn instruction(&mut self, position: usize, length: usize, target: NodeId, operands: Vec<NodeId>) -> NodeId {
        self.create(position, length, NodeData::Instruction(Instruction {
            target,
            operands: NodeList::new(operands),
        }))
    }

    pub fn source(&mut self, position: usize, length: usize, statements: Vec<NodeId>) -> NodeId {
        self.create(position, length, NodeData::Source(Source { statements: NodeList::new(statements) }))
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        debug_assert!(self.nodes[root.0].parent.is_none());
        SyntaxTree { nodes: self.nodes, root }
    }
}
