//! In-memory compilation units
//!
//! Sources are handed to the file manager as strings. Each one gets a
//! `string:///` URI built from its package declaration and its first type
//! declaration, which is what the driver reports in diagnostics.

use std::sync::Arc;

use logos::Logos;

use crate::common::consts::{INTERNAL_SEPARATOR, PACKAGE_SEPARATOR, SOURCE_FILE_SUFFIX, SOURCE_URI_SCHEME};
use crate::vfs::file_object::{FileObject, Kind};

/// Tokens needed to find the package and primary type of a unit
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Token {
    #[token("package")]
    Package,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("record")]
    Record,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[regex(r"'([^'\\]|\\.)'")]
    CharLiteral,

    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,
    #[regex(r"[ \t\n\r\f]+", priority = 2)]
    Whitespace,
}

impl Token {
    fn is_trivia(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment | Token::Whitespace)
    }

    fn starts_type_declaration(&self) -> bool {
        matches!(self, Token::Class | Token::Interface | Token::Enum | Token::Record)
    }
}

/// Package and primary type name declared by a unit
#[derive(Debug, Default, PartialEq, Eq)]
struct UnitHeader {
    package: String,
    type_name: Option<String>,
}

fn scan_header(text: &str) -> UnitHeader {
    let mut header = UnitHeader::default();
    let mut lexer = Token::lexer(text);
    let mut tokens = std::iter::from_fn(move || {
        loop {
            let token = lexer.next()?;
            match token {
                Ok(token) if token.is_trivia() => continue,
                Ok(token) => return Some((token, lexer.slice())),
                // Unknown input (operators, numbers) is irrelevant here
                Err(()) => continue,
            }
        }
    })
    .peekable();

    let mut previous = None;
    while let Some((token, _)) = tokens.next() {
        match token {
            Token::Package if header.package.is_empty() && header.type_name.is_none() => {
                let mut segments = Vec::new();
                for (token, slice) in tokens.by_ref() {
                    match token {
                        Token::Identifier => segments.push(slice),
                        Token::Dot => {}
                        _ => break,
                    }
                }
                header.package = segments.join(PACKAGE_SEPARATOR.to_string().as_str());
                previous = Some(Token::Semicolon);
                continue;
            }
            // `Foo.class` literals are not declarations
            t if t.starts_type_declaration() && previous != Some(Token::Dot) => {
                if let Some(&(Token::Identifier, name)) = tokens.peek() {
                    header.type_name = Some(name.to_string());
                    break;
                }
            }
            _ => {}
        }
        previous = Some(token);
    }

    header
}

/// A compilation unit supplied as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    uri: String,
    package: String,
    type_name: Option<String>,
    text: Arc<str>,
}

impl SourceFile {
    /// Wrap `text`; `ordinal` names the unit when no type declaration is found
    pub fn new(text: impl Into<String>, ordinal: usize) -> Self {
        let text: String = text.into();
        let text: Arc<str> = Arc::from(text);
        let header = scan_header(&text);

        let file_stem = match &header.type_name {
            Some(name) => name.clone(),
            None => format!("Source{}", ordinal),
        };
        let mut uri = String::from(SOURCE_URI_SCHEME);
        if !header.package.is_empty() {
            uri.push_str(&header.package.replace(PACKAGE_SEPARATOR, &INTERNAL_SEPARATOR.to_string()));
            uri.push(INTERNAL_SEPARATOR);
        }
        uri.push_str(&file_stem);
        uri.push_str(SOURCE_FILE_SUFFIX);

        Self {
            uri,
            package: header.package,
            type_name: header.type_name,
            text,
        }
    }

    /// Declared package, empty for the unnamed package
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// Name of the first declared type, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Dotted name of the primary type
    pub fn binary_name(&self) -> Option<String> {
        let type_name = self.type_name.as_deref()?;
        if self.package.is_empty() {
            Some(type_name.to_string())
        } else {
            Some(format!("{}{}{}", self.package, PACKAGE_SEPARATOR, type_name))
        }
    }

    pub fn char_content(&self) -> &str {
        &self.text
    }
}

impl FileObject for SourceFile {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn kind(&self) -> Kind {
        Kind::Source
    }
}
