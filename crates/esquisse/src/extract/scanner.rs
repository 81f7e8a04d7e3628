//! Declaration scanner over the token stream
//!
//! Second stage of extraction: a hand-written matcher that recognizes type,
//! field, and operation declarations anywhere in the token stream. Matching
//! is deliberately lossy — token runs that do not fit the declaration grammar
//! are skipped, never reported — so partially malformed source still yields
//! every member that does match.

use crate::model::{ClassifierKind, Field, Operation, Parameter, Visibility};

use super::lexer::{Token, TokenKind};

/// A recognized type declaration header
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypeDecl {
    pub name: String,
    pub kind: ClassifierKind,
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
}

/// Scanner over a lexed token stream
pub(crate) struct DeclScanner<'a> {
    tokens: &'a [Token],
    source: &'a str,
}

impl<'a> DeclScanner<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self { tokens, source }
    }

    fn ident(&self, index: usize) -> Option<&str> {
        match self.tokens.get(index).map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn punct(&self, index: usize) -> Option<char> {
        match self.tokens.get(index).map(|t| &t.kind) {
            Some(TokenKind::Punct(c)) => Some(*c),
            _ => None,
        }
    }

    /// First `package a.b.c;` declaration in the stream
    pub fn package_declaration(&self) -> Option<String> {
        for index in 0..self.tokens.len() {
            if self.ident(index) == Some("package") {
                if let Some((name, next)) = self.match_qualified(index + 1) {
                    if self.punct(next) == Some(';') {
                        return Some(name);
                    }
                }
            }
        }
        None
    }

    /// Every type declaration header in the stream, in source order
    pub fn type_declarations(&self) -> Vec<TypeDecl> {
        let mut declarations = Vec::new();
        let mut index = 0;
        while index < self.tokens.len() {
            match self.match_type_declaration(index) {
                Some((declaration, next)) => {
                    declarations.push(declaration);
                    index = next;
                }
                None => index += 1,
            }
        }
        declarations
    }

    /// Every field declaration in the stream, in source order.
    ///
    /// Matching is not scoped to any type's braces: the whole stream is
    /// scanned, and the extractor attaches the result to each type found in
    /// the same block.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut index = 0;
        while index < self.tokens.len() {
            match self.match_field(index) {
                Some((field, next)) => {
                    fields.push(field);
                    index = next;
                }
                None => index += 1,
            }
        }
        fields
    }

    /// Every operation declaration in the stream, in source order
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations = Vec::new();
        let mut index = 0;
        while index < self.tokens.len() {
            match self.match_operation(index) {
                Some((operation, next)) => {
                    operations.push(operation);
                    index = next;
                }
                None => index += 1,
            }
        }
        operations
    }

    /// Match a dotted identifier chain starting at `index`
    fn match_qualified(&self, index: usize) -> Option<(String, usize)> {
        let mut name = self.ident(index)?.to_string();
        let mut next = index + 1;
        while self.punct(next) == Some('.') {
            match self.ident(next + 1) {
                Some(segment) => {
                    name.push('.');
                    name.push_str(segment);
                    next += 2;
                }
                None => break,
            }
        }
        Some((name, next))
    }

    /// Skip a balanced `<...>` group at `index`, if any. `None` means the
    /// group never closes before a declaration boundary.
    fn skip_generic_args(&self, index: usize) -> Option<usize> {
        if self.punct(index) != Some('<') {
            return Some(index);
        }
        let mut depth = 0usize;
        let mut next = index;
        while let Some(token) = self.tokens.get(next) {
            match token.kind {
                TokenKind::Punct('<') => depth += 1,
                TokenKind::Punct('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(next + 1);
                    }
                }
                TokenKind::Punct(';') | TokenKind::Punct('{') => return None,
                _ => {}
            }
            next += 1;
        }
        None
    }

    /// Match a type token: qualified identifier, optional balanced generic
    /// arguments, optional array suffixes. Returns the source text with
    /// whitespace normalized.
    fn match_type_token(&self, index: usize) -> Option<(String, usize)> {
        self.ident(index)?;
        let start = self.tokens[index].start;
        let (_, mut next) = self.match_qualified(index)?;
        next = self.skip_generic_args(next)?;
        while self.punct(next) == Some('[') && self.punct(next + 1) == Some(']') {
            next += 2;
        }
        let end = self.tokens[next - 1].end;
        let text = self.source[start..end]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Some((text, next))
    }

    /// Match a supertype reference: qualified name, generic arguments
    /// dropped from the recorded name
    fn match_supertype(&self, index: usize) -> Option<(String, usize)> {
        let (name, next) = self.match_qualified(index)?;
        let next = self.skip_generic_args(next)?;
        Some((name, next))
    }

    fn match_type_declaration(&self, index: usize) -> Option<(TypeDecl, usize)> {
        let mut next = index;
        let mut is_abstract = false;
        loop {
            match self.ident(next) {
                Some("public") | Some("private") | Some("protected") | Some("static")
                | Some("final") => next += 1,
                Some("abstract") => {
                    is_abstract = true;
                    next += 1;
                }
                _ => break,
            }
        }

        let kind = ClassifierKind::from_keyword(self.ident(next)?)?;
        let name = self.ident(next + 1)?.to_string();
        let mut next = self.skip_generic_args(next + 2)?;

        let mut extends = None;
        if self.ident(next) == Some("extends") {
            let (supertype, after) = self.match_supertype(next + 1)?;
            extends = Some(supertype);
            next = after;
        }

        let mut implements = Vec::new();
        if self.ident(next) == Some("implements") {
            next += 1;
            loop {
                let (interface, after) = self.match_supertype(next)?;
                implements.push(interface);
                next = after;
                if self.punct(next) == Some(',') {
                    next += 1;
                } else {
                    break;
                }
            }
        }

        if self.punct(next) != Some('{') {
            return None;
        }
        Some((
            TypeDecl {
                name,
                kind,
                is_abstract,
                extends,
                implements,
            },
            next + 1,
        ))
    }

    fn match_field(&self, index: usize) -> Option<(Field, usize)> {
        let visibility = Visibility::from_keyword(self.ident(index)?)?;
        let mut next = index + 1;
        let mut is_static = false;
        let mut is_final = false;
        loop {
            match self.ident(next) {
                Some("static") => {
                    is_static = true;
                    next += 1;
                }
                Some("final") => {
                    is_final = true;
                    next += 1;
                }
                _ => break,
            }
        }

        let (type_name, next) = self.match_type_token(next)?;
        let name = self.ident(next)?.to_string();
        let assign = next + 1;

        let build = |default_value: Option<String>| Field {
            name: name.clone(),
            type_name: type_name.clone(),
            default_value,
            visibility,
            is_static,
            is_final,
        };

        match self.punct(assign) {
            Some(';') => Some((build(None), assign + 1)),
            Some('=') => {
                // initializer runs to the first statement terminator,
                // sliced verbatim from the source
                let mut terminator = assign + 1;
                loop {
                    match self.tokens.get(terminator) {
                        Some(token) if token.kind == TokenKind::Punct(';') => break,
                        Some(_) => terminator += 1,
                        None => return None,
                    }
                }
                let raw = self.source[self.tokens[assign].end..self.tokens[terminator].start]
                    .trim()
                    .to_string();
                let default_value = if raw.is_empty() { None } else { Some(raw) };
                Some((build(default_value), terminator + 1))
            }
            _ => None,
        }
    }

    fn match_operation(&self, index: usize) -> Option<(Operation, usize)> {
        let visibility = Visibility::from_keyword(self.ident(index)?)?;
        let mut next = index + 1;
        let mut is_static = false;
        let mut is_abstract = false;
        let mut is_final = false;
        loop {
            match self.ident(next) {
                Some("static") => {
                    is_static = true;
                    next += 1;
                }
                Some("final") => {
                    is_final = true;
                    next += 1;
                }
                Some("abstract") => {
                    is_abstract = true;
                    next += 1;
                }
                _ => break,
            }
        }

        let (return_type, next) = self.match_type_token(next)?;
        let name = self.ident(next)?.to_string();
        let open = next + 1;
        if self.punct(open) != Some('(') {
            return None;
        }

        let mut depth = 0usize;
        let mut close = open;
        loop {
            match self.tokens.get(close)?.kind {
                TokenKind::Punct('(') => depth += 1,
                TokenKind::Punct(')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            close += 1;
        }

        let is_abstract = match self.punct(close + 1) {
            Some('{') => is_abstract,
            // no body: an abstract or interface operation
            Some(';') => true,
            _ => return None,
        };

        let return_type = if return_type == "void" {
            None
        } else {
            Some(return_type)
        };

        let operation = Operation {
            name,
            return_type,
            visibility,
            is_static,
            is_abstract,
            is_final,
            parameters: self.parameters(open + 1, close),
        };
        Some((operation, close + 2))
    }

    /// Parse the parameter list between `lo` and `hi` (exclusive), splitting
    /// on top-level commas. Parameters that do not reduce to a (type, name)
    /// pair are silently omitted.
    fn parameters(&self, lo: usize, hi: usize) -> Vec<Parameter> {
        let mut groups = Vec::new();
        let mut depth = 0usize;
        let mut start = lo;
        for index in lo..hi {
            match self.tokens[index].kind {
                TokenKind::Punct('<') | TokenKind::Punct('(') | TokenKind::Punct('[') => {
                    depth += 1;
                }
                TokenKind::Punct('>') | TokenKind::Punct(')') | TokenKind::Punct(']') => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Punct(',') if depth == 0 => {
                    groups.push((start, index));
                    start = index + 1;
                }
                _ => {}
            }
        }
        if start < hi {
            groups.push((start, hi));
        }

        groups
            .into_iter()
            .filter_map(|(lo, hi)| self.parameter(lo, hi))
            .collect()
    }

    fn parameter(&self, lo: usize, hi: usize) -> Option<Parameter> {
        let mut next = lo;
        // leading annotations, with or without an argument list
        while self.punct(next) == Some('@') {
            self.ident(next + 1)?;
            next += 2;
            if self.punct(next) == Some('(') {
                let mut depth = 0usize;
                while next < hi {
                    match self.tokens[next].kind {
                        TokenKind::Punct('(') => depth += 1,
                        TokenKind::Punct(')') => {
                            depth -= 1;
                            if depth == 0 {
                                next += 1;
                                break;
                            }
                        }
                        _ => {}
                    }
                    next += 1;
                }
            }
        }
        while self.ident(next) == Some("final") {
            next += 1;
        }

        let (type_name, after_type) = self.match_type_token(next)?;
        if after_type >= hi {
            return None;
        }
        let name = self.ident(after_type)?;
        if after_type + 1 != hi {
            return None;
        }
        Some(Parameter::new(name, type_name))
    }
}
