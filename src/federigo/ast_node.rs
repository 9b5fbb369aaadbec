use crate::federigo::token::Token;

// A node of the syntax tree. Every child is owned by its parent
#[derive (Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum AstNode {
    BinaryOp {
        operator: Token,
        left: Box<AstNode>,
        right: Box<AstNode>
    },
    NumberLiteral(Token),
    Identifier(Token),
    // A var or let declaration with its initial value
    Assignment {
        is_mutable: bool,
        name: Token,
        declared_type: Token,
        init_expr: Box<AstNode>
    },
    Conditional {
        condition: Box<AstNode>,
        then_block: Box<AstNode>,
        else_block: Option<Box<AstNode>>
    },
    Block(Vec<AstNode>)
}

impl AstNode {
    // The variant name used when printing the tree
    pub fn kind_name(&self) -> &'static str {
        return self.into();
    }

    // The statements of a block, or nothing for any other node
    pub fn statements(&self) -> &[AstNode] {
        match self {
            AstNode::Block(statements) => statements,
            _ => &[]
        }
    }
}
