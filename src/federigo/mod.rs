pub mod ast;
pub mod ast_node;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod token;
