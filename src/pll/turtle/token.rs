//! Tokens of a turtle statement label
//!
//! A statement is `name [arg, arg, ...]`. Blanks between tokens are skipped.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    /// Command names are letters only.
    #[regex(r"[A-Za-z]+")]
    Word,

    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,

    #[token(",")]
    Comma,
}

/// Tokenize a label into `(token, text)` pairs.
///
/// Text that is not a token comes back as `Err(text)`.
pub fn tokenize(label: &str) -> Vec<Result<(Token, &str), &str>> {
    let mut lexer = Token::lexer(label);
    let mut out = Vec::new();
    while let Some(token) = lexer.next() {
        let text = lexer.slice();
        out.push(token.map(|t| (t, text)).map_err(|_| text));
    }
    out
}
