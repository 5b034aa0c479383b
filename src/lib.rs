//! A CSS parser implementing the tokenizer and tree construction of the
//! [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/)
//! specification, plus a CSS-stylesheet mode that reinterprets qualified
//! rules as style rules and feeds at-rules through registered handlers.

use crate::css::AtRuleHandler;
use crate::location::Location;
use crate::node::Stylesheet;
use crate::parser::ComponentStream;
use crate::parser_config::ParserConfig;
use crate::stream::CharStream;
use crate::stylesheet::CssStylesheet;
use crate::tokenizer::{Token, Tokenizer};
use std::collections::HashMap;
use thiserror::Error as ThisError;

pub mod css;
pub mod handler;
pub mod location;
pub mod node;
mod parser;
pub mod parser_config;
pub mod stream;
pub mod stylesheet;
pub mod tokenizer;
mod unicode;
pub mod walker;

/// Errors that abort a parse. Recoverable anomalies never surface here;
/// they end up in the stylesheet's `parsing_errors` list instead.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("parse error: {0} at {1:?}")]
    Parse(String, Location),
    #[error("escaped code points in an unquoted url are not supported at {0:?}")]
    UnsupportedUrlEscape(Location),
    #[error("source position is unavailable while a sub-stream is active")]
    PositionUnavailable,
}

/// The CSS parser. It owns the tokenizer over the caller's character
/// stream, the stack of replayed sub-streams, and the at-rule handler
/// registry used in CSS-stylesheet mode.
///
/// A parser instance holds mutable cursor state, so parallel parses need
/// independent instances.
pub struct CssParser<'stream> {
    /// The tokenizer feeding the parser
    pub tokenizer: Tokenizer<'stream>,
    /// Stack of replayed component-value inputs; empty while reading the
    /// tokenizer directly
    substreams: Vec<ComponentStream>,
    /// At-rule handlers keyed by lowercased keyword
    handlers: HashMap<String, AtRuleHandler>,
    /// The parser configuration as given
    config: ParserConfig,
    /// Recovered parse errors, handed over to the returned stylesheet
    parsing_errors: Vec<String>,
}

impl<'stream> CssParser<'stream> {
    /// Creates a parser over the given stream with the `@import` and
    /// `@keyframes` handlers preinstalled.
    pub fn new(stream: &'stream mut CharStream, config: ParserConfig) -> Self {
        let location = config.location;
        let mut parser = Self {
            tokenizer: Tokenizer::new(stream, location),
            substreams: Vec::new(),
            handlers: HashMap::new(),
            config,
            parsing_errors: Vec::new(),
        };

        parser.register_at_rule_handler("import", handler::import::parse_import_rule);
        parser.register_at_rule_handler("keyframes", handler::keyframes::parse_keyframes_rule);

        parser
    }

    /// Parses the whole input as a generic CSS Syntax 3 stylesheet.
    pub fn parse_stylesheet_tree(&mut self) -> Result<Stylesheet, Error> {
        log::trace!("parse_stylesheet source={:?}", self.config.source);

        let rules = self.consume_list_of_rules(true)?;

        Ok(Stylesheet {
            rules,
            parsing_errors: std::mem::take(&mut self.parsing_errors),
        })
    }

    /// The current source position of the tokenizer. Fails while a
    /// sub-stream is active: replayed values no longer correspond to the
    /// source cursor.
    pub fn current_location(&self) -> Result<Location, Error> {
        if !self.substreams.is_empty() {
            return Err(Error::PositionUnavailable);
        }

        Ok(self.tokenizer.current_location())
    }

    /// Parses a generic stylesheet out of `data`, in one call.
    pub fn parse_stylesheet(data: &str, config: ParserConfig) -> Result<Stylesheet, Error> {
        let mut stream = CharStream::new();
        stream.read_from_str(data);

        let mut parser = CssParser::new(&mut stream, config);
        parser.parse_stylesheet_tree()
    }

    /// Parses `data` in CSS-stylesheet mode with the default handlers, in
    /// one call.
    pub fn parse_css_stylesheet(data: &str, config: ParserConfig) -> Result<CssStylesheet, Error> {
        let mut stream = CharStream::new();
        stream.read_from_str(data);

        let mut parser = CssParser::new(&mut stream, config);
        parser.parse_css()
    }
}

/// Materializes the whole token stream for the given source. The trailing
/// EOF token is not included.
pub fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let mut stream = CharStream::new();
    stream.read_from_str(text);

    let mut tokenizer = Tokenizer::new(&mut stream, Location::default());
    let mut tokens = Vec::new();

    loop {
        let token = tokenizer.consume()?;
        if token.is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

/// Parses a generic CSS Syntax 3 stylesheet with the default configuration.
pub fn parse_stylesheet(text: &str) -> Result<Stylesheet, Error> {
    CssParser::parse_stylesheet(text, ParserConfig::default())
}

/// Parses in CSS-stylesheet mode with the default configuration and
/// handlers.
pub fn parse_css_stylesheet(text: &str) -> Result<CssStylesheet, Error> {
    CssParser::parse_css_stylesheet(text, ParserConfig::default())
}
