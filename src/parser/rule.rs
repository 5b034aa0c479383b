use crate::node::{ComponentValue, QualifiedRule};
use crate::tokenizer::TokenType;
use crate::{CssParser, Error};

impl CssParser<'_> {
    /// 5.4.3. [Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    ///
    /// `seed` is the input the caller already read; component values are
    /// collected into the prelude until a `{` token or an already-formed
    /// `{}` block supplies the body. EOF before the body is a parse error
    /// and yields `None`.
    pub(crate) fn consume_qualified_rule(
        &mut self,
        seed: ComponentValue,
    ) -> Result<Option<QualifiedRule>, Error> {
        log::trace!("consume_qualified_rule");

        let start = seed.location();
        let mut prelude = Vec::new();
        let mut input = seed;

        loop {
            match input {
                ComponentValue::Preserved(t) if matches!(t.token_type, TokenType::LCurly) => {
                    let block = self.consume_simple_block('{', t.location)?;
                    let span = self.maybe_span(start, block.end_location());
                    return Ok(Some(QualifiedRule {
                        prelude,
                        block,
                        span,
                    }));
                }
                ComponentValue::Block(block) if block.associated == '{' => {
                    let span = self.maybe_span(start, block.end_location());
                    return Ok(Some(QualifiedRule {
                        prelude,
                        block,
                        span,
                    }));
                }
                other => {
                    let value = self.consume_component_value(other)?;
                    prelude.push(value);
                }
            }

            match self.next_input()? {
                Some(next) => input = next,
                None => {
                    self.record_parse_error(format!(
                        "qualified rule without a block at {start:?}"
                    ));
                    return Ok(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_stylesheet;
    use crate::walker::Walker;

    #[test]
    fn parse_rule_tree() {
        let sheet = parse_stylesheet("body { color: red }").unwrap();
        let walker = Walker::new(&sheet);

        assert_eq!(
            walker.walk_to_string(),
            "[Stylesheet (1)]\n  [Rule]\n    [Ident] body\n    [Block] {\n      [Ident] color\n      [Colon]\n      [Ident] red\n"
        );
    }

    #[test]
    fn rule_without_block_is_dropped() {
        let sheet = parse_stylesheet("a { color: red; } h1, h2").unwrap();

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.parsing_errors.len(), 1);
        assert!(sheet.parsing_errors[0].contains("without a block"));
    }
}
