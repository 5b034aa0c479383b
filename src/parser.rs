use crate::location::{Location, Span};
use crate::node::ComponentValue;
use crate::tokenizer::TokenType;
use crate::{CssParser, Error};

mod at_rule;
mod declaration;
mod rule;
mod stylesheet;
mod value;

/// An already-parsed run of component values replayed as the parser's input.
/// Used when a block's contents are re-parsed as declarations or nested
/// rules.
pub(crate) struct ComponentStream {
    values: std::vec::IntoIter<ComponentValue>,
}

impl ComponentStream {
    fn new(values: Vec<ComponentValue>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    fn next(&mut self) -> Option<ComponentValue> {
        self.values.next()
    }
}

impl CssParser<'_> {
    /// Produces the next input for the rule consumers: the next value of the
    /// active sub-stream, or the next token wrapped as a preserved value.
    /// `None` means the current input source is exhausted.
    pub(crate) fn next_input(&mut self) -> Result<Option<ComponentValue>, Error> {
        if let Some(stream) = self.substreams.last_mut() {
            return Ok(stream.next());
        }

        let token = self.tokenizer.consume()?;
        match token.token_type {
            TokenType::Eof => Ok(None),
            TokenType::BadString(_) => {
                self.record_parse_error(format!("bad string at {:?}", token.location));
                Ok(Some(ComponentValue::Preserved(token)))
            }
            TokenType::BadUrl(_) => {
                self.record_parse_error(format!("bad url at {:?}", token.location));
                Ok(Some(ComponentValue::Preserved(token)))
            }
            _ => Ok(Some(ComponentValue::Preserved(token))),
        }
    }

    /// Runs `action` with the parser's input replaced by the given component
    /// values. The previous input source is restored on every exit path,
    /// including when `action` fails.
    pub(crate) fn with_substream<T>(
        &mut self,
        values: Vec<ComponentValue>,
        action: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.substreams.push(ComponentStream::new(values));
        let result = action(self);
        self.substreams.pop();
        result
    }

    pub(crate) fn record_parse_error(&mut self, message: String) {
        log::warn!("{message}");
        self.parsing_errors.push(message);
    }

    pub(crate) fn maybe_span(&self, start: Location, end: Location) -> Option<Span> {
        self.config.track_positions.then(|| Span::new(start, end))
    }
}
