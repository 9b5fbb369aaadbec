use std::{fmt, string::FromUtf8Error};

use string_builder::Builder;

use crate::federigo::ast_node::AstNode;

#[derive (Debug, Clone, PartialEq)]
pub struct Ast {
    // The root is always a block of the top level statements
    pub root: AstNode
}

impl Ast {
    // Constructor for an ast
    pub fn new(statements: Vec<AstNode>) -> Self {
        return Ast {
            root: AstNode::Block(statements)
        };
    }

    pub fn statements(&self) -> &[AstNode] {
        return self.root.statements();
    }

    fn create_text(&self) -> Result<String, FromUtf8Error> {
        let mut tree_builder: Builder = Builder::default();

        self.create_text_dfs(&mut tree_builder, &self.root, 0);

        return tree_builder.string();
    }

    fn create_text_dfs(&self, builder: &mut Builder, cur_node: &AstNode, level: usize) {
        let indent: String = " ".repeat(level);

        match cur_node {
            AstNode::BinaryOp { operator, left, right } => {
                builder.append(format!("{}{}({})\n", indent, cur_node.kind_name(), operator.text));
                self.create_text_dfs(builder, left, level + 2);
                self.create_text_dfs(builder, right, level + 2);
            },
            AstNode::NumberLiteral(token) | AstNode::Identifier(token) => {
                builder.append(format!("{}{}({})\n", indent, cur_node.kind_name(), token.text));
            },
            AstNode::Assignment { name, init_expr, .. } => {
                builder.append(format!("{}{}({})\n", indent, cur_node.kind_name(), name.text));
                self.create_text_dfs(builder, init_expr, level + 2);
            },
            AstNode::Conditional { condition, then_block, else_block } => {
                // Each part gets its own labelled section
                builder.append(format!("{}{}\n", indent, cur_node.kind_name()));
                builder.append(format!("{}  Condition:\n", indent));
                self.create_text_dfs(builder, condition, level + 4);
                builder.append(format!("{}  IfBlock:\n", indent));
                self.create_text_dfs(builder, then_block, level + 4);
                if let Some(else_block) = else_block {
                    builder.append(format!("{}  ElseBlock:\n", indent));
                    self.create_text_dfs(builder, else_block, level + 4);
                }
            },
            AstNode::Block(statements) => {
                builder.append(format!("{}{}\n", indent, cur_node.kind_name()));
                for statement in statements {
                    self.create_text_dfs(builder, statement, level + 2);
                }
            }
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.create_text().map_err(|_| fmt::Error)?;
        write!(f, "{}", text)
    }
}
