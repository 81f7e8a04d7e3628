//! Token lexer for Java-like source text
//!
//! First stage of extraction: turns source text into a flat stream of spanned
//! tokens. Comments and whitespace are dropped, string/char/number literal
//! contents are opaque (a single `Literal` token), and everything else is an
//! identifier or a one-character punctuator. The declaration scanner never
//! looks back at raw text except to slice initializer expressions, which is
//! why every token carries its byte span.

use chumsky::prelude::*;
use chumsky::text::ident;

/// Kind of a lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier or keyword; keywords are classified by the scanner
    Ident(String),
    /// Single punctuation or operator character
    Punct(char),
    /// String, char, or number literal; contents are irrelevant to structure
    Literal,
}

/// A token with its byte span in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Token>> {
    let line_comment = just("//").then(none_of("\n").repeated()).ignored();
    let block_comment = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored();
    let trivia = choice((
        one_of(" \t\r\n").ignored(),
        line_comment,
        block_comment,
    ))
    .repeated()
    .ignored();

    let escape = just('\\').then(any()).ignored();
    let string_literal = just('"')
        .then(escape.clone().or(none_of("\\\"").ignored()).repeated())
        .then(just('"'))
        .to(TokenKind::Literal);
    let char_literal = just('\'')
        .then(escape.or(none_of("\\'").ignored()).repeated())
        .then(just('\''))
        .to(TokenKind::Literal);
    let number = any()
        .filter(|c: &char| c.is_ascii_digit())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                .repeated(),
        )
        .to(TokenKind::Literal);

    let word = ident().map(|s: &str| TokenKind::Ident(s.to_string()));
    let punct = any().map(TokenKind::Punct);

    let token = choice((string_literal, char_literal, number, word, punct)).map_with(
        |kind, extra| {
            let span: SimpleSpan = extra.span();
            Token {
                kind,
                start: span.start,
                end: span.end,
            }
        },
    );

    trivia
        .clone()
        .ignore_then(token.then_ignore(trivia).repeated().collect())
        .then_ignore(end())
}

/// Tokenize source text. Lexing is total over well-formed text; anything the
/// lexer cannot make sense of yields an empty stream, which downstream
/// scanning treats as "no declarations found".
pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    match lexer().parse(source).into_result() {
        Ok(tokens) => tokens,
        Err(errors) => {
            tracing::warn!(count = errors.len(), "lexer could not tokenize input");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_idents_and_puncts() {
        let tokens = kinds("class Order {}");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("class".to_string()),
                TokenKind::Ident("Order".to_string()),
                TokenKind::Punct('{'),
                TokenKind::Punct('}'),
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = kinds("a // trailing\n/* block\nspanning */ b");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_literals_are_opaque() {
        let tokens = kinds(r#"x = "a { b ; c" ; y = 'z' ; n = 42"#);
        // braces and semicolons inside the string must not become tokens
        let braces = tokens
            .iter()
            .filter(|k| matches!(k, TokenKind::Punct('{')))
            .count();
        assert_eq!(braces, 0);
        let literals = tokens
            .iter()
            .filter(|k| matches!(k, TokenKind::Literal))
            .count();
        assert_eq!(literals, 3);
    }

    #[test]
    fn test_spans_slice_back_to_source() {
        let source = "private int count = 7;";
        let tokens = tokenize(source);
        let ident = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Ident("count".to_string()))
            .unwrap();
        assert_eq!(&source[ident.start..ident.end], "count");
    }

    #[test]
    fn test_empty_and_trivia_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t// only a comment\n/* and another */").is_empty());
    }

    #[test]
    fn test_generic_closers_stay_separate() {
        let tokens = kinds("Map<String, List<Integer>> map");
        let closers = tokens
            .iter()
            .filter(|k| matches!(k, TokenKind::Punct('>')))
            .count();
        assert_eq!(closers, 2);
    }
}
