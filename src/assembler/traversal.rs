//! Generic walks over a [`SyntaxTree`].
use super::ast::*;

/// One method per node kind. `Output` is whatever the visitor builds.
pub trait Visitor {
    type Output;

    fn visit_source(&mut self, tree: &SyntaxTree, id: NodeId, source: &Source) -> Self::Output;
    fn visit_instruction(&mut self, tree: &SyntaxTree, id: NodeId, instruction: &Instruction) -> Self::Output;
    fn visit_label(&mut self, tree: &SyntaxTree, id: NodeId, label: &Label) -> Self::Output;
    fn visit_identifier(&mut self, tree: &SyntaxTree, id: NodeId, identifier: &Identifier) -> Self::Output;
    fn visit_integer(&mut self, tree: &SyntaxTree, id: NodeId, integer: &Integer) -> Self::Output;
}

/// Calls the visitor method matching the node's kind.
pub fn visit<V: Visitor + ?Sized>(tree: &SyntaxTree, id: NodeId, visitor: &mut V) -> V::Output {
    match &tree[id].data {
        NodeData::Source(source)           => visitor.visit_source(tree, id, source),
        NodeData::Instruction(instruction) => visitor.visit_instruction(tree, id, instruction),
        NodeData::Label(label)             => visitor.visit_label(tree, id, label),
        NodeData::Identifier(identifier)   => visitor.visit_identifier(tree, id, identifier),
        NodeData::Integer(integer)         => visitor.visit_integer(tree, id, integer),
    }
}

/// Immediate children in source order: a Source's statements,
/// an Instruction's target then operands, a Label's name.
pub fn children(tree: &SyntaxTree, id: NodeId) -> Vec<NodeId> {
    tree[id].data.children()
}

/// Walks up from `id`, itself included, and returns the first node
/// satisfying `predicate`.
pub fn ancestor<P>(tree: &SyntaxTree, id: NodeId, predicate: P) -> Option<NodeId>
    where P: Fn(&Node) -> bool
{
    let mut current = Some(id);
    while let Some(id) = current {
        if predicate(&tree[id]) {
            return Some(id);
        }
        current = tree[id].parent();
    }
    None
}
