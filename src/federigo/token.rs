use std::fmt;

// Defines a token
#[derive (Debug, Clone, PartialEq)]
pub struct Token {
    // The type of the token
    pub token_type: TokenType,
    // The matched source text, or the canonical spelling for fixed symbols
    pub text: String,
    // The position in the source code the token is located
    pub position: (usize, usize)
}

impl Token {
    // Create a new token with the given information
    pub fn new(token_type_in: TokenType, token_text: &str, line_number: usize, col_number: usize) -> Self {
        return Token {
            token_type: token_type_in,
            text: String::from(token_text),
            position: (line_number, col_number)
        }
    }

    // Checks if the token is any of the given types
    pub fn is_one_of(&self, expected_types: &[TokenType]) -> bool {
        return expected_types.contains(&self.token_type);
    }
}

// Debug rendering: the kind name, plus the payload for identifiers, numbers and strings
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Identifier | TokenType::Number | TokenType::String => write!(f, "{}({})", self.token_type, self.text),
            _ => write!(f, "{}()", self.token_type)
        }
    }
}

// Defines the token types
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Eof,
    Null,
    True,
    False,
    Number,
    String,
    Identifier,
    // Any of the built in type names
    Type,
    Keyword(Keywords),
    Symbol(Symbols)
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Eof => write!(f, "eof"),
            TokenType::Null => write!(f, "null"),
            TokenType::True => write!(f, "true"),
            TokenType::False => write!(f, "false"),
            TokenType::Number => write!(f, "number"),
            TokenType::String => write!(f, "string"),
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::Type => write!(f, "type"),
            TokenType::Keyword(keyword) => write!(f, "{}", keyword),
            TokenType::Symbol(symbol) => write!(f, "{}", symbol)
        }
    }
}

// Defines the reserved keywords
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum (serialize_all = "lowercase")]
pub enum Keywords {
    Var,
    Let,
    Class,
    New,
    From,
    Func,
    If,
    Else,
    Foreach,
    While,
    For,
    Export,
    Typeof,
    In,
    Craig,
    Include,
    Unveil,
    Any
}

impl Keywords {
    // The exact, case-sensitive spelling in source code
    pub fn spelling(&self) -> &'static str {
        match self {
            Keywords::Var => "var",
            Keywords::Let => "let",
            Keywords::Class => "class",
            Keywords::New => "new",
            Keywords::From => "from",
            Keywords::Func => "func",
            Keywords::If => "if",
            Keywords::Else => "else",
            Keywords::Foreach => "foreach",
            Keywords::While => "while",
            Keywords::For => "for",
            Keywords::Export => "export",
            Keywords::Typeof => "typeof",
            Keywords::In => "in",
            Keywords::Craig => "Craig",
            Keywords::Include => "include",
            Keywords::Unveil => "unveil",
            Keywords::Any => "any"
        }
    }
}

// Defines the possible symbols
#[derive (Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum (serialize_all = "snake_case")]
pub enum Symbols {
    OpenBracket, // [
    CloseBracket, // ]
    OpenCurly, // {
    CloseCurly, // }
    OpenParen, // (
    CloseParen, // )
    Assignment, // =
    Equals, // ==
    NotEquals, // !=
    Not, // !
    Less, // <
    LessEquals, // <=
    Greater, // >
    GreaterEquals, // >=
    Or, // ||
    And, // &&
    Dot, // .
    DotDot, // ..
    SemiColon, // ;
    Colon, // :
    Question, // ?
    Comma, // ,
    PlusPlus, // ++
    MinusMinus, // --
    PlusEquals, // +=
    MinusEquals, // -=
    NullishAssignment, // ??=
    Plus, // +
    Dash, // -
    Slash, // /
    Star, // *
    Percent // %
}

// Built in type names all share the generic type kind
pub const TYPE_NAMES: [&str; 4] = ["Int", "String", "Float", "Bool"];
