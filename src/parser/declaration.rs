use crate::node::{stringify, ComponentValue};
use crate::stylesheet::{Declaration, DeclarationListItem};
use crate::tokenizer::TokenType;
use crate::{CssParser, Error};

impl CssParser<'_> {
    /// 5.4.4. [Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Runs over the current input source until it is exhausted. At-rules
    /// are kept in the list as-is; anything that is neither an ident nor an
    /// at-keyword is a parse error and gets discarded up to the next `;`.
    pub(crate) fn consume_list_of_declarations(
        &mut self,
    ) -> Result<Vec<DeclarationListItem>, Error> {
        log::trace!("consume_list_of_declarations");

        let mut items = Vec::new();

        loop {
            let Some(input) = self.next_input()? else {
                break;
            };

            match input {
                cv if cv.is_whitespace() || cv.is_semicolon() => {}
                ComponentValue::Preserved(t) if t.is_at_keyword() => {
                    let at_rule = self.consume_at_rule(t)?;
                    items.push(DeclarationListItem::AtRule(at_rule));
                }
                ComponentValue::Preserved(t) if t.is_ident() => {
                    let mut values = vec![ComponentValue::Preserved(t)];
                    loop {
                        let Some(next) = self.next_input()? else {
                            break;
                        };
                        if next.is_semicolon() {
                            break;
                        }
                        values.push(self.consume_component_value(next)?);
                    }

                    if let Some(declaration) = self.consume_declaration(&values) {
                        items.push(DeclarationListItem::Declaration(declaration));
                    }
                }
                other => {
                    self.record_parse_error(format!(
                        "unexpected '{}' in declaration list at {:?}",
                        other,
                        other.location()
                    ));
                    loop {
                        let Some(next) = self.next_input()? else {
                            break;
                        };
                        if next.is_semicolon() {
                            break;
                        }
                        self.consume_component_value(next)?;
                    }
                }
            }
        }

        Ok(items)
    }

    /// 5.4.6. [Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    ///
    /// Operates on the owned run of component values collected up to a `;`.
    /// The leading ident is the property name; a missing `:` is a parse
    /// error that drops the whole declaration. A trailing `!important`
    /// (ASCII case-insensitive) is stripped off and flagged.
    pub(crate) fn consume_declaration(
        &mut self,
        values: &[ComponentValue],
    ) -> Option<Declaration> {
        log::trace!("consume_declaration");

        let Some(ComponentValue::Preserved(property_token)) = values.first() else {
            return None;
        };
        let TokenType::Ident(property) = &property_token.token_type else {
            return None;
        };

        let mut index = 1;
        while values.get(index).is_some_and(ComponentValue::is_whitespace) {
            index += 1;
        }

        match values.get(index) {
            Some(ComponentValue::Preserved(t)) if t.is_colon() => index += 1,
            _ => {
                self.record_parse_error(format!(
                    "declaration '{property}' is missing ':' at {:?}",
                    property_token.location
                ));
                return None;
            }
        }

        let mut value_items = &values[index..];
        while value_items.last().is_some_and(ComponentValue::is_whitespace) {
            value_items = &value_items[..value_items.len() - 1];
        }

        let mut important = false;
        if is_important_ident(value_items.last()) {
            let mut bang = value_items.len() - 1;
            while bang > 0 && value_items[bang - 1].is_whitespace() {
                bang -= 1;
            }
            if bang > 0 && matches!(&value_items[bang - 1], ComponentValue::Preserved(t) if t.is_delim('!'))
            {
                important = true;
                value_items = &value_items[..bang - 1];
                while value_items.last().is_some_and(ComponentValue::is_whitespace) {
                    value_items = &value_items[..value_items.len() - 1];
                }
            }
        }

        let end = value_items
            .last()
            .map_or_else(|| property_token.location, ComponentValue::end_location);
        let position = self.maybe_span(property_token.location, end);

        Some(Declaration {
            property: property.clone(),
            value: stringify(value_items).trim().to_string(),
            important,
            position,
        })
    }
}

fn is_important_ident(value: Option<&ComponentValue>) -> bool {
    matches!(
        value,
        Some(ComponentValue::Preserved(t))
            if matches!(&t.token_type, TokenType::Ident(v) if v.eq_ignore_ascii_case("important"))
    )
}
