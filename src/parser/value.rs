use crate::node::{closer_for, ComponentValue, FunctionValue, SimpleBlock};
use crate::location::Location;
use crate::tokenizer::TokenType;
use crate::{CssParser, Error};

impl CssParser<'_> {
    /// 5.4.7. [Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    ///
    /// An opening `{`, `[` or `(` token becomes a simple block, a function
    /// token becomes a function value, anything else is preserved as-is.
    /// Already-formed blocks and functions pass through unchanged.
    pub(crate) fn consume_component_value(
        &mut self,
        input: ComponentValue,
    ) -> Result<ComponentValue, Error> {
        match input {
            ComponentValue::Preserved(t) => {
                let loc = t.location;
                match t.token_type {
                    TokenType::LCurly => {
                        Ok(ComponentValue::Block(self.consume_simple_block('{', loc)?))
                    }
                    TokenType::LBracket => {
                        Ok(ComponentValue::Block(self.consume_simple_block('[', loc)?))
                    }
                    TokenType::LParen => {
                        Ok(ComponentValue::Block(self.consume_simple_block('(', loc)?))
                    }
                    TokenType::Function(name) => Ok(ComponentValue::Function(
                        self.consume_function(name, loc)?,
                    )),
                    _ => Ok(ComponentValue::Preserved(t)),
                }
            }
            other => Ok(other),
        }
    }

    /// 5.4.8. [Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    ///
    /// Consumes until the paired closing delimiter. EOF closes the block
    /// implicitly, without an error.
    pub(crate) fn consume_simple_block(
        &mut self,
        open: char,
        location: Location,
    ) -> Result<SimpleBlock, Error> {
        log::trace!("consume_simple_block '{open}'");

        let closer = closer_for(open);
        let mut values = Vec::new();

        loop {
            let Some(input) = self.next_input()? else {
                break;
            };

            if let ComponentValue::Preserved(t) = &input {
                let closes = match t.token_type {
                    TokenType::RCurly => closer == '}',
                    TokenType::RBracket => closer == ']',
                    TokenType::RParen => closer == ')',
                    _ => false,
                };
                if closes {
                    break;
                }
            }

            let value = self.consume_component_value(input)?;
            values.push(value);
        }

        Ok(SimpleBlock::new(open, values, location))
    }

    /// 5.4.9. [Consume a function](https://www.w3.org/TR/css-syntax-3/#consume-function)
    ///
    /// Consumes until the closing paren, which is not stored. EOF closes the
    /// function implicitly.
    pub(crate) fn consume_function(
        &mut self,
        name: String,
        location: Location,
    ) -> Result<FunctionValue, Error> {
        log::trace!("consume_function '{name}'");

        let mut components = Vec::new();

        loop {
            let Some(input) = self.next_input()? else {
                break;
            };

            if let ComponentValue::Preserved(t) = &input {
                if matches!(t.token_type, TokenType::RParen) {
                    break;
                }
            }

            let value = self.consume_component_value(input)?;
            components.push(value);
        }

        Ok(FunctionValue::new(name, components, location))
    }
}
