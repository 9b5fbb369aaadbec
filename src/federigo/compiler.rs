use string_builder::Builder;
use thiserror::Error;

use crate::util::federigo_log::{self, LogTypes, LogSources};
use crate::federigo::{lexer::{self, LexError}, parser::{Parser, ParseError}};
use crate::federigo::{ast::Ast, token::Token, symbol_table::SymbolTable};

#[derive (Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error ("Lexer error: {0}")]
    Lex(#[from] LexError),
    #[error ("Parser error: {0}")]
    Parse(#[from] ParseError)
}

// Everything produced by a successful compile
#[derive (Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub ast: Ast,
    pub symbol_table: SymbolTable
}

impl Compilation {
    // The token list, one token per line, followed by the tree
    pub fn dump(&self) -> String {
        let mut dump_builder: Builder = Builder::default();
        for token in self.tokens.iter() {
            dump_builder.append(format!("{}\n", token));
        }
        dump_builder.append(self.ast.to_string());
        return dump_builder.string().unwrap_or_default();
    }
}

pub fn compile(source_code: &str) -> Result<Compilation, CompileError> {
    federigo_log::log(LogTypes::Info, LogSources::Federigo, String::from("Compile called"));

    let tokens: Vec<Token> = lexer::lex(source_code)?;

    let mut parser: Parser = Parser::new(&tokens);
    let ast: Ast = parser.parse_program()?;
    let symbol_table: SymbolTable = parser.into_symbol_table();

    federigo_log::log(LogTypes::Info, LogSources::Federigo, format!("Compiled {} top level statements", ast.statements().len()));

    return Ok(Compilation {
        tokens,
        ast,
        symbol_table
    });
}
