//! Renders a tree back into source text.
//!
//! Output is normalized: one statement per line, operands separated by
//! `", "`, integers in suffixed hex. Parsing the output again gives a tree
//! with the same shape.
use super::ast::*;
use super::traversal::{visit, Visitor};

#[derive(Copy, Clone, Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(tree: &SyntaxTree) -> String {
        visit(tree, tree.root(), &mut AstPrinter)
    }
}

impl Visitor for AstPrinter {
    type Output = String;

    fn visit_source(&mut self, tree: &SyntaxTree, _: NodeId, source: &Source) -> String {
        source.statements.iter().fold(String::new(), |mut code, id| {
            code.push_str(&visit(tree, id, self));
            code.push('\n');
            code
        })
    }

    fn visit_instruction(&mut self, tree: &SyntaxTree, _: NodeId, instruction: &Instruction) -> String {
        let mut code = visit(tree, instruction.target, self);
        if !instruction.operands.is_empty() {
            let operands: Vec<String> = instruction.operands.iter().map(|id| visit(tree, id, self)).collect();
            code.push(' ');
            code.push_str(&operands.join(", "));
        }
        code
    }

    fn visit_label(&mut self, tree: &SyntaxTree, _: NodeId, label: &Label) -> String {
        format!("{}:", visit(tree, label.name, self))
    }

    fn visit_identifier(&mut self, _: &SyntaxTree, _: NodeId, identifier: &Identifier) -> String {
        identifier.text.clone()
    }

    fn visit_integer(&mut self, _: &SyntaxTree, _: NodeId, integer: &Integer) -> String {
        let hex = format!("{:x}", integer.value);
        if hex.starts_with(|c: char| c.is_ascii_digit()) {
            format!("{}h", hex)
        } else {
            format!("0{}h", hex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::integer;

    #[test]
    fn test_print() {
        let mut b = TreeBuilder::new();
        let main = b.identifier(0, 0, "main");
        let label = b.label(0, 0, main);

        let mov = b.identifier(0, 0, "mov");
        let a = b.identifier(0, 0, "a");
        let bb = b.identifier(0, 0, "b");
        let mov = b.instruction(0, 0, mov, vec![a, bb]);

        let mvi = b.identifier(0, 0, "mvi");
        let a = b.identifier(0, 0, "a");
        let value = b.integer(0, 0, 0x18);
        let mvi_a = b.instruction(0, 0, mvi, vec![a, value]);

        let mvi = b.identifier(0, 0, "mvi");
        let bb = b.identifier(0, 0, "b");
        let value = b.integer(0, 0, 0xff);
        let mvi_b = b.instruction(0, 0, mvi, vec![bb, value]);

        let hlt = b.identifier(0, 0, "hlt");
        let hlt = b.instruction(0, 0, hlt, Vec::new());

        let root = b.source(0, 0, vec![label, mov, mvi_a, mvi_b, hlt]);
        let tree = b.finish(root);

        assert_eq!(AstPrinter::print(&tree), "main:\nmov a, b\nmvi a, 18h\nmvi b, 0ffh\nhlt\n");
    }

    #[test]
    fn test_printed_integers_decode() {
        for &value in &[0u64, 0xb, 0xd, 0xb1, 0x7fff, u64::MAX] {
            let mut b = TreeBuilder::new();
            let id = b.integer(0, 0, value);
            let tree = b.finish(id);
            assert_eq!(integer::decode(&AstPrinter::print(&tree)), Some(value));
        }
    }
}
