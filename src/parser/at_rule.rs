use crate::node::{AtRule, ComponentValue};
use crate::tokenizer::{Token, TokenType};
use crate::{CssParser, Error};

impl CssParser<'_> {
    /// 5.4.2. [Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// `seed` is the at-keyword token the caller already read. A semicolon
    /// ends the rule without a block; a `{` token or an already-formed `{}`
    /// block becomes the body; EOF ends the rule as-is.
    pub(crate) fn consume_at_rule(&mut self, seed: Token) -> Result<AtRule, Error> {
        log::trace!("consume_at_rule");

        let TokenType::AtKeyword(name) = seed.token_type else {
            return Err(Error::Parse(
                "expected an at-keyword".to_string(),
                seed.location,
            ));
        };

        let start = seed.location;
        let mut end = seed.location.advanced_over(&seed.source);
        let mut prelude = Vec::new();
        let mut block = None;

        loop {
            let Some(input) = self.next_input()? else {
                break;
            };

            match input {
                cv if cv.is_semicolon() => {
                    end = cv.end_location();
                    break;
                }
                ComponentValue::Preserved(t) if matches!(t.token_type, TokenType::LCurly) => {
                    let b = self.consume_simple_block('{', t.location)?;
                    end = b.end_location();
                    block = Some(b);
                    break;
                }
                ComponentValue::Block(b) if b.associated == '{' => {
                    end = b.end_location();
                    block = Some(b);
                    break;
                }
                other => {
                    let value = self.consume_component_value(other)?;
                    end = value.end_location();
                    prelude.push(value);
                }
            }
        }

        let span = self.maybe_span(start, end);

        Ok(AtRule {
            name,
            prelude,
            block,
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{stringify, Rule};
    use crate::parse_stylesheet;

    fn only_at_rule(input: &str) -> crate::node::AtRule {
        let sheet = parse_stylesheet(input).unwrap();
        assert_eq!(sheet.rules.len(), 1, "input: {input}");
        match sheet.rules.into_iter().next().unwrap() {
            Rule::At(rule) => rule,
            Rule::Qualified(_) => panic!("expected an at-rule"),
        }
    }

    #[test]
    fn at_rule_with_semicolon_has_no_block() {
        let rule = only_at_rule("@import url(app.css);");

        assert_eq!(rule.name, "import");
        assert!(rule.block.is_none());
        assert_eq!(stringify(&rule.prelude).trim(), "url(app.css)");
    }

    #[test]
    fn at_rule_with_block() {
        let rule = only_at_rule("@media screen and (max-width: 200px) { a { color: red; } }");

        assert_eq!(rule.name, "media");
        assert!(rule.block.is_some());
        assert_eq!(
            stringify(&rule.prelude).trim(),
            "screen and (max-width: 200px)"
        );
    }

    #[test]
    fn at_rule_ends_at_eof() {
        let rule = only_at_rule("@charset \"utf-8\"");

        assert_eq!(rule.name, "charset");
        assert!(rule.block.is_none());
        assert_eq!(stringify(&rule.prelude).trim(), "\"utf-8\"");
    }
}
