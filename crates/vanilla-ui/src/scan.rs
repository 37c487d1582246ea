/*
 * scan.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Incremental markup scanner.
//!
//! The scanner tracks just enough of the markup grammar to tell where the
//! next character lands: in text content, inside a start tag, inside an
//! attribute value, or inside a comment or declaration. It is fed one
//! character at a time and keeps its state across calls, so the template
//! builder can ask for the position between literal segments without
//! re-scanning the prefix.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    fn matches(self, ch: char) -> bool {
        match self {
            Quote::Double => ch == '"',
            Quote::Single => ch == '\'',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Content,
    /// Just read `<`.
    TagStart,
    TagName,
    /// Inside a start tag, between attributes.
    TagOpen,
    /// Read `=`, waiting for the value.
    BeforeAttrValue,
    AttrValue(Quote),
    UnquotedAttrValue,
    EndTag,
    /// Just read `<!`.
    MarkupDecl,
    /// Just read `<!-`.
    CommentStart,
    Comment,
    CommentDash,
    CommentEnd,
    /// `<!DOCTYPE ...>`, `<?...>` and other bogus markup.
    Declaration,
}

/// Coarse position of the scanner, as the template builder sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Between nodes.
    Content,
    /// Inside a start tag, outside any attribute value.
    Attribute,
    /// Inside an attribute value, quoted or not.
    AttributeValue,
    /// Inside a comment, declaration or end tag. Nothing placed here
    /// becomes a node.
    Inert,
}

/// What a single [`Scanner::step`] completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// The `>` of a start tag was read. [`Scanner::tag_name`] names the tag.
    StartTagClosed,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    state: LexState,
    tag_name: String,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: LexState::Content,
            tag_name: String::new(),
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Lowercased name of the start tag being read, or the last one read.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn position(&self) -> Position {
        use LexState::*;
        match self.state {
            Content | TagStart => Position::Content,
            TagName | TagOpen => Position::Attribute,
            BeforeAttrValue | AttrValue(_) | UnquotedAttrValue => Position::AttributeValue,
            EndTag | MarkupDecl | CommentStart | Comment | CommentDash | CommentEnd
            | Declaration => Position::Inert,
        }
    }

    pub fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            self.step(ch);
        }
    }

    pub fn step(&mut self, ch: char) -> Transition {
        use LexState::*;
        let mut transition = Transition::None;
        self.state = match self.state {
            Content => {
                if ch == '<' {
                    TagStart
                } else {
                    Content
                }
            }
            TagStart => match ch {
                c if c.is_ascii_alphabetic() => {
                    self.tag_name.clear();
                    self.tag_name.push(c.to_ascii_lowercase());
                    TagName
                }
                '/' => EndTag,
                '!' => MarkupDecl,
                '?' => Declaration,
                '<' => TagStart,
                _ => Content,
            },
            TagName => match ch {
                '>' => {
                    transition = Transition::StartTagClosed;
                    Content
                }
                '/' => TagOpen,
                c if c.is_whitespace() => TagOpen,
                c => {
                    self.tag_name.push(c.to_ascii_lowercase());
                    TagName
                }
            },
            TagOpen => match ch {
                '>' => {
                    transition = Transition::StartTagClosed;
                    Content
                }
                '=' => BeforeAttrValue,
                '"' => AttrValue(Quote::Double),
                '\'' => AttrValue(Quote::Single),
                _ => TagOpen,
            },
            BeforeAttrValue => match ch {
                '"' => AttrValue(Quote::Double),
                '\'' => AttrValue(Quote::Single),
                '>' => {
                    transition = Transition::StartTagClosed;
                    Content
                }
                c if c.is_whitespace() => BeforeAttrValue,
                _ => UnquotedAttrValue,
            },
            AttrValue(quote) => {
                if quote.matches(ch) {
                    TagOpen
                } else {
                    AttrValue(quote)
                }
            }
            UnquotedAttrValue => match ch {
                '>' => {
                    transition = Transition::StartTagClosed;
                    Content
                }
                c if c.is_whitespace() => TagOpen,
                _ => UnquotedAttrValue,
            },
            EndTag => {
                if ch == '>' {
                    Content
                } else {
                    EndTag
                }
            }
            MarkupDecl => match ch {
                '-' => CommentStart,
                '>' => Content,
                _ => Declaration,
            },
            CommentStart => match ch {
                '-' => Comment,
                '>' => Content,
                _ => Declaration,
            },
            Comment => {
                if ch == '-' {
                    CommentDash
                } else {
                    Comment
                }
            }
            CommentDash => {
                if ch == '-' {
                    CommentEnd
                } else {
                    Comment
                }
            }
            CommentEnd => match ch {
                '>' => Content,
                '-' => CommentEnd,
                _ => Comment,
            },
            Declaration => {
                if ch == '>' {
                    Content
                } else {
                    Declaration
                }
            }
        };
        transition
    }
}

/// Position reached after scanning `markup` from the start.
pub fn position_after(markup: &str) -> Position {
    let mut scanner = Scanner::new();
    scanner.feed(markup);
    scanner.position()
}
