use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::{federigo::token::{Token, TokenType, Keywords, Symbols, TYPE_NAMES}, util::federigo_log::{self, LogTypes, LogSources}};

// Raised when no rule matches at the cursor
#[derive (Debug, Clone, PartialEq, Error)]
#[error ("unrecognized token near '{remainder}' at ({line}, {column})")]
pub struct LexError {
    // The unmatched source text from the cursor onward
    pub remainder: String,
    // Byte offset of the cursor
    pub position: usize,
    pub line: usize,
    pub column: usize
}

// What to do with the text a rule matched
#[derive (Debug, Clone, Copy, PartialEq)]
enum LexAction {
    Skip,
    LineComment,
    StringLiteral,
    NumberLiteral,
    IdentifierOrKeyword,
    Fixed(Symbols, &'static str)
}

#[derive (Debug)]
struct LexRule {
    pattern: Regex,
    action: LexAction
}

// The fixed symbols in priority order.
// A multi-character symbol must come before any symbol that is its strict prefix,
// since the first matching rule wins regardless of the match length
pub const FIXED_SYMBOLS: [(Symbols, &str); 32] = [
    (Symbols::OpenBracket, "["),
    (Symbols::CloseBracket, "]"),
    (Symbols::OpenCurly, "{"),
    (Symbols::CloseCurly, "}"),
    (Symbols::OpenParen, "("),
    (Symbols::CloseParen, ")"),
    (Symbols::Equals, "=="),
    (Symbols::NotEquals, "!="),
    (Symbols::Assignment, "="),
    (Symbols::Not, "!"),
    (Symbols::LessEquals, "<="),
    (Symbols::Less, "<"),
    (Symbols::GreaterEquals, ">="),
    (Symbols::Greater, ">"),
    (Symbols::Or, "||"),
    (Symbols::And, "&&"),
    (Symbols::DotDot, ".."),
    (Symbols::Dot, "."),
    (Symbols::SemiColon, ";"),
    (Symbols::Colon, ":"),
    (Symbols::NullishAssignment, "??="),
    (Symbols::Question, "?"),
    (Symbols::Comma, ","),
    (Symbols::PlusPlus, "++"),
    (Symbols::MinusMinus, "--"),
    (Symbols::PlusEquals, "+="),
    (Symbols::MinusEquals, "-="),
    (Symbols::Plus, "+"),
    (Symbols::Dash, "-"),
    (Symbols::Slash, "/"),
    (Symbols::Star, "*"),
    (Symbols::Percent, "%")
];

static LEX_RULES: OnceLock<Vec<LexRule>> = OnceLock::new();
static RESERVED_WORDS: OnceLock<HashMap<&'static str, TokenType>> = OnceLock::new();

fn lex_rules() -> &'static [LexRule] {
    return LEX_RULES.get_or_init(|| {
        // Every pattern is anchored so it only matches at the cursor
        let mut rules: Vec<LexRule> = vec![
            // Only ASCII whitespace separates tokens
            LexRule { pattern: Regex::new(r"^[ \t\n\x0B\x0C\r]+").unwrap(), action: LexAction::Skip },
            LexRule { pattern: Regex::new(r"^//[^\n]*\n?").unwrap(), action: LexAction::LineComment },
            LexRule { pattern: Regex::new(r#"^"[^"]*""#).unwrap(), action: LexAction::StringLiteral },
            LexRule { pattern: Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap(), action: LexAction::NumberLiteral },
            LexRule { pattern: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), action: LexAction::IdentifierOrKeyword }
        ];

        for (symbol, text) in FIXED_SYMBOLS {
            rules.push(LexRule {
                pattern: Regex::new(&format!("^{}", regex::escape(text))).unwrap(),
                action: LexAction::Fixed(symbol, text)
            });
        }

        rules
    });
}

// The mapping from reserved spellings to their token types
pub fn reserved_words() -> &'static HashMap<&'static str, TokenType> {
    return RESERVED_WORDS.get_or_init(|| {
        let mut words: HashMap<&'static str, TokenType> = HashMap::new();
        for keyword in Keywords::iter() {
            words.insert(keyword.spelling(), TokenType::Keyword(keyword));
        }
        for type_name in TYPE_NAMES {
            words.insert(type_name, TokenType::Type);
        }
        words
    });
}

// Converts the source code into a token stream that always ends with a single EOF token
pub fn lex(source_code: &str) -> Result<Vec<Token>, LexError> {
    federigo_log::log(LogTypes::Info, LogSources::Lexer, String::from("Lexing program"));

    let mut token_stream: Vec<Token> = Vec::new();

    let mut cursor: usize = 0;
    let mut line_number: usize = 1;
    // Byte offset where the current line begins
    let mut line_start: usize = 0;

    while cursor < source_code.len() {
        let remainder: &str = &source_code[cursor..];
        let col_number: usize = cursor - line_start + 1;

        // The first rule that matches at the cursor wins
        let found = lex_rules()
            .iter()
            .find_map(|rule| rule.pattern.find(remainder).map(|m| (rule.action, m.as_str())));

        let (action, matched) = match found {
            Some(hit) => hit,
            None => {
                let err: LexError = LexError {
                    remainder: String::from(remainder),
                    position: cursor,
                    line: line_number,
                    column: col_number
                };
                federigo_log::log(LogTypes::Error, LogSources::Lexer, err.to_string());
                return Err(err);
            }
        };

        let new_token: Option<Token> = match action {
            LexAction::Skip => None,
            LexAction::LineComment => {
                federigo_log::log(LogTypes::Debug, LogSources::Lexer, format!("Skipping comment at ({}, {})", line_number, col_number));
                None
            },
            LexAction::StringLiteral => Some(Token::new(TokenType::String, matched, line_number, col_number)),
            LexAction::NumberLiteral => Some(Token::new(TokenType::Number, matched, line_number, col_number)),
            LexAction::IdentifierOrKeyword => {
                let token_type: TokenType = reserved_words().get(matched).copied().unwrap_or(TokenType::Identifier);
                Some(Token::new(token_type, matched, line_number, col_number))
            },
            LexAction::Fixed(symbol, text) => Some(Token::new(TokenType::Symbol(symbol), text, line_number, col_number))
        };

        if let Some(token) = new_token {
            federigo_log::log(LogTypes::Debug, LogSources::Lexer, format!("Found {} at {:?}", token, token.position));
            token_stream.push(token);
        }

        // Keep the line count in step with every newline consumed
        for (offset, _) in matched.match_indices('\n') {
            line_number += 1;
            line_start = cursor + offset + 1;
        }
        cursor += matched.len();
    }

    token_stream.push(Token::new(TokenType::Eof, "EOF", line_number, cursor - line_start + 1));
    return Ok(token_stream);
}
