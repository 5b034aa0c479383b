use crate::location::{Location, Span};
use crate::tokenizer::Token;
use std::fmt::{self, Display, Formatter};

/// A component value is a preserved token, a simple block or a function.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    Preserved(Token),
    Block(SimpleBlock),
    Function(FunctionValue),
}

impl ComponentValue {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_whitespace())
    }

    pub fn is_comma(&self) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_comma())
    }

    pub fn is_semicolon(&self) -> bool {
        matches!(self, ComponentValue::Preserved(t) if t.is_semicolon())
    }

    /// Location of the first code point this value spans.
    pub fn location(&self) -> Location {
        match self {
            ComponentValue::Preserved(t) => t.location,
            ComponentValue::Block(b) => b.location,
            ComponentValue::Function(f) => f.location,
        }
    }

    /// Location just past the last code point this value spans. For blocks
    /// and functions the closing delimiter is accounted for even when EOF
    /// closed the construct implicitly.
    pub fn end_location(&self) -> Location {
        match self {
            ComponentValue::Preserved(t) => t.location.advanced_over(&t.source),
            ComponentValue::Block(b) => b.end_location(),
            ComponentValue::Function(f) => f.end_location(),
        }
    }
}

impl Display for ComponentValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Preserved(t) => write!(f, "{t}"),
            ComponentValue::Block(b) => write!(f, "{b}"),
            ComponentValue::Function(function) => write!(f, "{function}"),
        }
    }
}

/// A balanced `(...)`, `[...]` or `{...}` run of component values. The
/// closing delimiter is implied by the opening one and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
    /// The opening delimiter: `(`, `[` or `{`
    pub associated: char,
    pub values: Vec<ComponentValue>,
    pub location: Location,
}

impl SimpleBlock {
    pub fn new(associated: char, values: Vec<ComponentValue>, location: Location) -> Self {
        Self {
            associated,
            values,
            location,
        }
    }

    /// The closing delimiter paired with the opening one.
    pub fn closer(&self) -> char {
        closer_for(self.associated)
    }

    pub(crate) fn end_location(&self) -> Location {
        match self.values.last() {
            Some(value) => value.end_location().advanced(1),
            None => self.location.advanced(2),
        }
    }
}

impl Display for SimpleBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.associated)?;
        for value in &self.values {
            write!(f, "{value}")?;
        }
        write!(f, "{}", self.closer())
    }
}

pub fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// A parsed `name(...)` function with its argument component values. The
/// closing paren is consumed but never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    pub name: String,
    pub components: Vec<ComponentValue>,
    pub location: Location,
}

impl FunctionValue {
    pub fn new(name: String, components: Vec<ComponentValue>, location: Location) -> Self {
        Self {
            name,
            components,
            location,
        }
    }

    pub(crate) fn end_location(&self) -> Location {
        match self.components.last() {
            Some(value) => value.end_location().advanced(1),
            None => self.location.advanced_over(&self.name).advanced(2),
        }
    }
}

impl Display for FunctionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for value in &self.components {
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

/// A rule whose prelude is followed by a `{}` block. At the stylesheet level
/// these are reinterpreted as style rules in CSS mode.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub block: SimpleBlock,
    pub span: Option<Span>,
}

/// A rule starting with an at-keyword: a name, a prelude and an optional
/// `{}` block.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The at-keyword name, without the leading `@`
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    pub block: Option<SimpleBlock>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Qualified(QualifiedRule),
    At(AtRule),
}

/// The generic syntax tree for a stylesheet: a list of rules plus the parse
/// errors that were recovered from along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub parsing_errors: Vec<String>,
}

/// Flattens a run of component values back to source text. Whitespace prints
/// as a single space and comments are gone, so the result is normalized
/// rather than byte-identical.
pub fn stringify(values: &[ComponentValue]) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str(&value.to_string());
    }
    out
}

/// Splits component values on top-level commas. Commas nested inside blocks
/// or functions do not split.
pub fn split_on_commas(values: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    values.split(ComponentValue::is_comma).collect()
}
