use thiserror::Error;

use crate::{federigo::token::{Token, TokenType, Symbols, Keywords}, util::federigo_log::{self, LogTypes, LogSources}};
use crate::federigo::ast::Ast;
use crate::federigo::ast_node::AstNode;
use crate::federigo::symbol_table::{SymbolTable, SymbolValue};

// Raised on the first token that does not fit the grammar
#[derive (Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error ("Invalid token at {:?}; Found {}, but expected {}", .found.position, .found.token_type, .expected)]
    UnexpectedToken {
        expected: TokenType,
        found: Token
    },
    #[error ("Unexpected token at {:?}: {}", .found.position, .found.text)]
    InvalidStatement {
        found: Token
    },
    #[error ("Invalid factor at {:?}; Found {}, but expected open_paren, number or identifier", .found.position, .found.token_type)]
    InvalidFactor {
        found: Token
    },
    #[error ("Nesting too deep at {:?}; at most {} levels of blocks, conditions and parentheses are allowed", .found.position, MAX_NESTING_DEPTH)]
    NestingTooDeep {
        found: Token
    }
}

// Bounds the recursion of blocks, logical chains and parenthesised groups
pub const MAX_NESTING_DEPTH: usize = 256;

const COMPARISON_OPERATORS: [TokenType; 6] = [
    TokenType::Symbol(Symbols::Equals),
    TokenType::Symbol(Symbols::NotEquals),
    TokenType::Symbol(Symbols::Less),
    TokenType::Symbol(Symbols::LessEquals),
    TokenType::Symbol(Symbols::Greater),
    TokenType::Symbol(Symbols::GreaterEquals)
];

const LOGICAL_OPERATORS: [TokenType; 2] = [
    TokenType::Symbol(Symbols::And),
    TokenType::Symbol(Symbols::Or)
];

pub struct Parser<'a> {
    token_stream: &'a [Token],
    cur_token_index: usize,
    // Current number of open blocks, conditions and parenthesised groups
    depth: usize,
    // Handed out for every position past the end of the stream
    eof_token: Token,
    // Records every declaration seen; never consulted while parsing
    symbol_table: SymbolTable
}

impl<'a> Parser<'a> {
    // Constructor for the parser
    pub fn new(token_stream: &'a [Token]) -> Self {
        let (line, col) = token_stream.last().map(|token| token.position).unwrap_or((1, 1));
        return Parser {
            token_stream,
            cur_token_index: 0,
            depth: 0,
            eof_token: Token::new(TokenType::Eof, "", line, col),
            symbol_table: SymbolTable::new()
        };
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        return &self.symbol_table;
    }

    // Consumes the parser, releasing the token stream
    pub fn into_symbol_table(self) -> SymbolTable {
        return self.symbol_table;
    }

    // Calls for a program to be parsed
    pub fn parse_program(&mut self) -> Result<Ast, ParseError> {
        federigo_log::log(LogTypes::Info, LogSources::Parser, String::from("Parsing Program"));

        // Reset the index to be 0
        self.cur_token_index = 0;
        self.depth = 0;

        let mut statements: Vec<AstNode> = Vec::new();
        while self.current_token().token_type != TokenType::Eof {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    federigo_log::log(LogTypes::Error, LogSources::Parser, format!("Parser failed: {}", err));
                    return Err(err);
                }
            }
        }

        return Ok(Ast::new(statements));
    }

    fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let cur_type: TokenType = self.current_token().token_type;
        match cur_type {
            TokenType::Keyword(Keywords::If) => self.parse_if_statement(),
            TokenType::Keyword(Keywords::Var) | TokenType::Keyword(Keywords::Let) => self.parse_declaration(),
            _ => Err(ParseError::InvalidStatement { found: self.current_token().to_owned() })
        }
    }

    fn parse_declaration(&mut self) -> Result<AstNode, ParseError> {
        federigo_log::log(LogTypes::Debug, LogSources::Parser, String::from("Parsing Declaration"));

        // var declares a mutable name and let an immutable one
        let is_mutable: bool = self.current_token().token_type == TokenType::Keyword(Keywords::Var);
        self.advance();

        let name: Token = self.match_token(TokenType::Identifier)?;
        self.match_token(TokenType::Symbol(Symbols::Colon))?;
        let declared_type: Token = self.match_token(TokenType::Type)?;
        self.match_token(TokenType::Symbol(Symbols::Assignment))?;
        let init_expr: AstNode = self.parse_expression()?;
        self.match_token(TokenType::Symbol(Symbols::SemiColon))?;

        self.symbol_table.add(&name.text, &declared_type.text, SymbolValue::Unset, is_mutable);

        return Ok(AstNode::Assignment {
            is_mutable,
            name,
            declared_type,
            init_expr: Box::new(init_expr)
        });
    }

    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        federigo_log::log(LogTypes::Debug, LogSources::Parser, String::from("Parsing If Statement"));

        self.match_token(TokenType::Keyword(Keywords::If))?;
        self.match_token(TokenType::Symbol(Symbols::OpenParen))?;
        let condition: AstNode = self.parse_condition()?;
        self.match_token(TokenType::Symbol(Symbols::CloseParen))?;
        let then_block: AstNode = self.parse_block()?;

        let mut else_block: Option<Box<AstNode>> = None;
        if self.current_token().token_type == TokenType::Keyword(Keywords::Else) {
            self.advance();
            else_block = Some(Box::new(self.parse_block()?));
        }

        return Ok(AstNode::Conditional {
            condition: Box::new(condition),
            then_block: Box::new(then_block),
            else_block
        });
    }

    fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        federigo_log::log(LogTypes::Debug, LogSources::Parser, String::from("Parsing Block"));

        self.enter_nesting()?;
        let block: Result<AstNode, ParseError> = self.parse_block_body();
        self.exit_nesting();
        return block;
    }

    fn parse_block_body(&mut self) -> Result<AstNode, ParseError> {
        self.match_token(TokenType::Symbol(Symbols::OpenCurly))?;

        let mut statements: Vec<AstNode> = Vec::new();
        // Stopping at EOF lets the closing brace check report the missing brace
        while !self.current_token().is_one_of(&[TokenType::Symbol(Symbols::CloseCurly), TokenType::Eof]) {
            statements.push(self.parse_statement()?);
        }

        self.match_token(TokenType::Symbol(Symbols::CloseCurly))?;
        return Ok(AstNode::Block(statements));
    }

    // expression := term { ('+' | '-') term }
    pub fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut node: AstNode = self.parse_term()?;
        while self.current_token().is_one_of(&[TokenType::Symbol(Symbols::Plus), TokenType::Symbol(Symbols::Dash)]) {
            let operator: Token = self.current_token().to_owned();
            self.advance();
            let right: AstNode = self.parse_term()?;
            node = AstNode::BinaryOp { operator, left: Box::new(node), right: Box::new(right) };
        }
        return Ok(node);
    }

    // term := factor { ('*' | '/') factor }
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut node: AstNode = self.parse_factor()?;
        while self.current_token().is_one_of(&[TokenType::Symbol(Symbols::Star), TokenType::Symbol(Symbols::Slash)]) {
            let operator: Token = self.current_token().to_owned();
            self.advance();
            let right: AstNode = self.parse_factor()?;
            node = AstNode::BinaryOp { operator, left: Box::new(node), right: Box::new(right) };
        }
        return Ok(node);
    }

    // factor := '(' expression ')' | NUMBER | IDENTIFIER
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let cur_token: Token = self.current_token().to_owned();
        match cur_token.token_type {
            TokenType::Symbol(Symbols::OpenParen) => {
                self.enter_nesting()?;
                let group: Result<AstNode, ParseError> = self.parse_group();
                self.exit_nesting();
                group
            },
            TokenType::Number => {
                self.advance();
                Ok(AstNode::NumberLiteral(cur_token))
            },
            TokenType::Identifier => {
                self.advance();
                Ok(AstNode::Identifier(cur_token))
            },
            _ => Err(ParseError::InvalidFactor { found: cur_token })
        }
    }

    // '(' expression ')'
    fn parse_group(&mut self) -> Result<AstNode, ParseError> {
        self.advance();
        let node: AstNode = self.parse_expression()?;
        self.match_token(TokenType::Symbol(Symbols::CloseParen))?;
        return Ok(node);
    }

    // A single comparison, or expressions joined by && and ||.
    // Comparisons do not chain, and the right side of a logical operator is a whole
    // condition, so a && b || c groups as a && (b || c)
    pub fn parse_condition(&mut self) -> Result<AstNode, ParseError> {
        self.enter_nesting()?;
        let condition: Result<AstNode, ParseError> = self.parse_condition_chain();
        self.exit_nesting();
        return condition;
    }

    fn parse_condition_chain(&mut self) -> Result<AstNode, ParseError> {
        let mut left: AstNode = self.parse_expression()?;

        if self.current_token().is_one_of(&COMPARISON_OPERATORS) {
            let operator: Token = self.current_token().to_owned();
            self.advance();
            let right: AstNode = self.parse_expression()?;
            return Ok(AstNode::BinaryOp { operator, left: Box::new(left), right: Box::new(right) });
        }

        while self.current_token().is_one_of(&LOGICAL_OPERATORS) {
            let operator: Token = self.current_token().to_owned();
            self.advance();
            let right: AstNode = self.parse_condition()?;
            left = AstNode::BinaryOp { operator, left: Box::new(left), right: Box::new(right) };
        }

        return Ok(left);
    }

    fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { found: self.current_token().to_owned() });
        }
        self.depth += 1;
        return Ok(());
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    // Peeks at the current token without consuming it
    fn current_token(&self) -> &Token {
        return self.token_stream.get(self.cur_token_index).unwrap_or(&self.eof_token);
    }

    fn advance(&mut self) {
        self.cur_token_index += 1;
    }

    // Function to ensure the token is correct, consuming and returning it if so
    fn match_token(&mut self, expected_token: TokenType) -> Result<Token, ParseError> {
        let cur_token: Token = self.current_token().to_owned();
        if cur_token.token_type == expected_token {
            self.advance();
            return Ok(cur_token);
        }

        return Err(ParseError::UnexpectedToken {
            expected: expected_token,
            found: cur_token
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::federigo::lexer;

    fn parse(source_code: &str) -> Result<Ast, ParseError> {
        let token_stream: Vec<Token> = lexer::lex(source_code).unwrap();
        let mut parser: Parser = Parser::new(&token_stream);
        return parser.parse_program();
    }

    #[test]
    fn test_empty_program() {
        let token_stream: Vec<Token> = vec![Token::new(TokenType::Eof, "EOF", 1, 1)];
        let ast: Ast = Parser::new(&token_stream).parse_program().unwrap();
        assert_eq!(ast.root, AstNode::Block(Vec::new()));
    }

    #[test]
    fn test_reading_past_the_end_yields_eof() {
        let mut parser: Parser = Parser::new(&[]);
        assert_eq!(parser.current_token().token_type, TokenType::Eof);
        parser.advance();
        parser.advance();
        assert_eq!(parser.current_token().token_type, TokenType::Eof);
        assert!(parser.parse_program().unwrap().statements().is_empty());
    }

    #[test]
    fn test_precedence_and_left_associativity() {
        let token_stream: Vec<Token> = lexer::lex("1 - 2 - 3 * 4 / x").unwrap();
        let node: AstNode = Parser::new(&token_stream).parse_expression().unwrap();

        // ((1 - 2) - ((3 * 4) / x))
        match node {
            AstNode::BinaryOp { operator, left, right } => {
                assert_eq!(operator.text, "-");
                assert!(matches!(*left, AstNode::BinaryOp { ref operator, .. } if operator.text == "-"));
                match *right {
                    AstNode::BinaryOp { operator, left, right } => {
                        assert_eq!(operator.text, "/");
                        assert!(matches!(*left, AstNode::BinaryOp { ref operator, .. } if operator.text == "*"));
                        assert!(matches!(*right, AstNode::Identifier(ref token) if token.text == "x"));
                    },
                    other => panic!("expected a division, found {:?}", other)
                }
            },
            other => panic!("expected a subtraction, found {:?}", other)
        }
    }

    #[test]
    fn test_parentheses_group() {
        let token_stream: Vec<Token> = lexer::lex("(1 + 2) * 3").unwrap();
        let node: AstNode = Parser::new(&token_stream).parse_expression().unwrap();
        match node {
            AstNode::BinaryOp { operator, left, .. } => {
                assert_eq!(operator.text, "*");
                assert!(matches!(*left, AstNode::BinaryOp { ref operator, .. } if operator.text == "+"));
            },
            other => panic!("expected a multiplication, found {:?}", other)
        }
    }

    #[test]
    fn test_open_paren_then_eof() {
        let token_stream: Vec<Token> = lexer::lex("(").unwrap();
        let err: ParseError = Parser::new(&token_stream).parse_expression().unwrap_err();
        assert!(matches!(err, ParseError::InvalidFactor { ref found } if found.token_type == TokenType::Eof));
    }

    #[test]
    fn test_missing_close_paren() {
        let token_stream: Vec<Token> = lexer::lex("(1").unwrap();
        let err: ParseError = Parser::new(&token_stream).parse_expression().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { expected: TokenType::Symbol(Symbols::CloseParen), ref found } if found.token_type == TokenType::Eof));
    }

    #[test]
    fn test_logical_operators_chain_to_the_right() {
        let token_stream: Vec<Token> = lexer::lex("a && b || c").unwrap();
        let node: AstNode = Parser::new(&token_stream).parse_condition().unwrap();

        // a && (b || c)
        match node {
            AstNode::BinaryOp { operator, left, right } => {
                assert_eq!(operator.text, "&&");
                assert!(matches!(*left, AstNode::Identifier(ref token) if token.text == "a"));
                assert!(matches!(*right, AstNode::BinaryOp { ref operator, .. } if operator.text == "||"));
            },
            other => panic!("expected a logical and, found {:?}", other)
        }
    }

    #[test]
    fn test_comparison_does_not_chain() {
        let token_stream: Vec<Token> = lexer::lex("a < b < c").unwrap();
        let mut parser: Parser = Parser::new(&token_stream);
        let node: AstNode = parser.parse_condition().unwrap();

        assert!(matches!(node, AstNode::BinaryOp { ref operator, .. } if operator.text == "<"));
        // The second comparison is left for the caller
        assert_eq!(parser.current_token().token_type, TokenType::Symbol(Symbols::Less));
    }

    #[test]
    fn test_comparison_ends_the_condition() {
        let err: ParseError = parse("if (a == b && c) { }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { expected: TokenType::Symbol(Symbols::CloseParen), ref found } if found.text == "&&"));
    }

    #[test]
    fn test_unexpected_statement() {
        let err: ParseError = parse("x = 1;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStatement { ref found } if found.text == "x"));
        assert_eq!(err.to_string(), "Unexpected token at (1, 1): x");
    }

    #[test]
    fn test_unterminated_block() {
        let err: ParseError = parse("if (a) { let x: Int = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { expected: TokenType::Symbol(Symbols::CloseCurly), ref found } if found.token_type == TokenType::Eof));
    }

    #[test]
    fn test_declaration_requires_type_name() {
        let err: ParseError = parse("var x: y = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { expected: TokenType::Type, ref found } if found.text == "y"));
        assert_eq!(err.to_string(), "Invalid token at (1, 8); Found identifier, but expected type");
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let token_stream: Vec<Token> = lexer::lex(&"(".repeat(50_000)).unwrap();
        let err: ParseError = Parser::new(&token_stream).parse_expression().unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { ref found } if found.text == "("));

        let source_code: String = format!("let x: Int = {}1{};", "(".repeat(50_000), ")".repeat(50_000));
        let err: ParseError = parse(&source_code).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_long_logical_chain_is_rejected() {
        let source_code: String = format!("if ({}a) {{ }}", "a && ".repeat(50_000));
        assert!(matches!(parse(&source_code).unwrap_err(), ParseError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_deep_blocks_are_rejected() {
        let source_code: String = format!("{}{}", "if (a) { ".repeat(50_000), "}".repeat(50_000));
        let err: ParseError = parse(&source_code).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { ref found } if found.text == "{"));
    }

    #[test]
    fn test_nesting_below_the_limit_parses() {
        let parens: usize = MAX_NESTING_DEPTH - 1;
        let source_code: String = format!("let x: Int = {}1{};", "(".repeat(parens), ")".repeat(parens));
        let ast: Ast = parse(&source_code).unwrap();
        assert!(matches!(ast.statements()[0], AstNode::Assignment { ref init_expr, .. } if matches!(**init_expr, AstNode::NumberLiteral(_))));

        // Depth is released when each group closes, so siblings do not add up
        let siblings: String = format!("let y: Int = {};", vec!["(((1)))"; 500].join(" + "));
        assert!(parse(&siblings).is_ok());
    }

    #[test]
    fn test_declarations_are_recorded() {
        let token_stream: Vec<Token> = lexer::lex("var a: Int = 1; let b: String = a;").unwrap();
        let mut parser: Parser = Parser::new(&token_stream);
        parser.parse_program().unwrap();

        let symbol_table: &SymbolTable = parser.symbol_table();
        assert_eq!(symbol_table.len(), 2);
        assert!(symbol_table.lookup("a").unwrap().is_mutable());
        assert!(!symbol_table.lookup("b").unwrap().is_mutable());
        assert_eq!(symbol_table.lookup("b").unwrap().type_name(), "String");
    }
}
