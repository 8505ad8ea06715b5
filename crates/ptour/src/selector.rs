#![forbid(unsafe_code)]

//! Target selectors.
//!
//! A CSS-like subset that is enough to address page regions: one compound
//! selector made of an optional type (`div`, `body`, `*`), at most one `#id`,
//! any number of `.class` and `[attr]` / `[attr=value]` parts. Values may be
//! bare identifiers or single/double quoted. Combinators and selector lists
//! are rejected so that a selector always names one kind of element.
//!
//! Hosts match selectors against their own element model by implementing
//! [`SelectorSubject`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a selector string was rejected. `pos` is a byte offset into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expected a name at {pos}")]
    MissingName { pos: usize },

    #[error("unterminated attribute selector starting at {pos}")]
    UnterminatedAttribute { pos: usize },

    #[error("unterminated quoted value starting at {pos}")]
    UnterminatedQuote { pos: usize },

    #[error("combinators and selector lists are not supported (at {pos})")]
    Combinator { pos: usize },

    #[error("more than one #id at {pos}")]
    DuplicateId { pos: usize },
}

/// One `[name]` or `[name=value]` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatcher {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed, validated selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatcher>,
}

/// What a host element must expose to be matched.
pub trait SelectorSubject {
    /// Element type name, e.g. `div`. Compared case-insensitively.
    fn tag_name(&self) -> &str;
    fn element_id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        let offset = input.len() - input.trim_start().len();
        let mut parser = Parser {
            s: trimmed,
            i: 0,
            offset,
        };
        let mut selector = Selector {
            source: trimmed.to_string(),
            tag: None,
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
        };

        match parser.peek() {
            Some(b'*') => parser.i += 1,
            Some(b) if is_name_byte(b) => {
                let name = parser.take_name()?;
                selector.tag = Some(name.to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some(b) = parser.peek() {
            match b {
                b'#' => {
                    let pos = parser.pos();
                    parser.i += 1;
                    let name = parser.take_name()?;
                    if selector.id.is_some() {
                        return Err(SelectorError::DuplicateId { pos });
                    }
                    selector.id = Some(name);
                }
                b'.' => {
                    parser.i += 1;
                    let name = parser.take_name()?;
                    selector.classes.push(name);
                }
                b'[' => {
                    let attribute = parser.take_attribute()?;
                    selector.attributes.push(attribute);
                }
                b' ' | b'\t' | b'\n' | b'>' | b'+' | b'~' | b',' => {
                    return Err(SelectorError::Combinator { pos: parser.pos() });
                }
                _ => {
                    return Err(SelectorError::UnexpectedChar {
                        ch: parser.peek_char(),
                        pos: parser.pos(),
                    });
                }
            }
        }

        Ok(selector)
    }

    /// The selector text as written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Type constraint, lowercased. `None` for `*` or when omitted.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attributes(&self) -> &[AttributeMatcher] {
        &self.attributes
    }

    /// Whether `subject` satisfies every part of the selector.
    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag
            && !subject.tag_name().eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && subject.element_id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| subject.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (subject.attribute(&attr.name), attr.value.as_deref()) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            }
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

struct Parser<'a> {
    s: &'a str,
    i: usize,
    offset: usize,
}

impl Parser<'_> {
    fn pos(&self) -> usize {
        self.offset + self.i
    }

    fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    fn peek_char(&self) -> char {
        self.s[self.i..].chars().next().unwrap_or('\0')
    }

    fn skip_ws(&mut self) {
        while self.i < self.s.len() && self.s.as_bytes()[self.i].is_ascii_whitespace() {
            self.i += 1;
        }
    }

    fn take_name(&mut self) -> Result<String, SelectorError> {
        let start = self.i;
        while self.peek().is_some_and(is_name_byte) {
            self.i += 1;
        }
        if self.i == start {
            return Err(SelectorError::MissingName { pos: self.pos() });
        }
        Ok(self.s[start..self.i].to_string())
    }

    fn take_attribute(&mut self) -> Result<AttributeMatcher, SelectorError> {
        let open = self.pos();
        self.i += 1;
        self.skip_ws();
        if self.peek().is_none() {
            return Err(SelectorError::UnterminatedAttribute { pos: open });
        }
        let name = self.take_name()?;
        self.skip_ws();

        let value = match self.peek() {
            Some(b']') => None,
            Some(b'=') => {
                self.i += 1;
                self.skip_ws();
                let value = match self.peek() {
                    Some(quote @ (b'\'' | b'"')) => self.take_quoted(quote)?,
                    Some(_) => self.take_name()?,
                    None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
                };
                self.skip_ws();
                Some(value)
            }
            Some(_) => {
                return Err(SelectorError::UnexpectedChar {
                    ch: self.peek_char(),
                    pos: self.pos(),
                });
            }
            None => return Err(SelectorError::UnterminatedAttribute { pos: open }),
        };

        match self.peek() {
            Some(b']') => {
                self.i += 1;
                Ok(AttributeMatcher { name, value })
            }
            Some(_) => Err(SelectorError::UnexpectedChar {
                ch: self.peek_char(),
                pos: self.pos(),
            }),
            None => Err(SelectorError::UnterminatedAttribute { pos: open }),
        }
    }

    fn take_quoted(&mut self, quote: u8) -> Result<String, SelectorError> {
        let open = self.pos();
        self.i += 1;
        let start = self.i;
        while self.i < self.s.len() && self.s.as_bytes()[self.i] != quote {
            self.i += 1;
        }
        if self.i >= self.s.len() {
            return Err(SelectorError::UnterminatedQuote { pos: open });
        }
        let out = self.s[start..self.i].to_string();
        self.i += 1;
        Ok(out)
    }
}
