use crate::node::{ComponentValue, Rule};
use crate::tokenizer::TokenType;
use crate::{CssParser, Error};

impl CssParser<'_> {
    /// 5.4.1. [Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// At the top level CDO/CDC tokens and unmatched closing delimiters are
    /// discarded; in nested lists CDO/CDC seed a qualified rule and a `}`
    /// terminates the list. A qualified rule that fails to produce a block
    /// is dropped as a parse error.
    pub(crate) fn consume_list_of_rules(&mut self, top_level: bool) -> Result<Vec<Rule>, Error> {
        log::trace!("consume_list_of_rules top_level={top_level}");

        let mut rules = Vec::new();

        loop {
            let Some(input) = self.next_input()? else {
                break;
            };

            match input {
                cv if cv.is_whitespace() => {}
                ComponentValue::Preserved(t)
                    if matches!(t.token_type, TokenType::Cdo | TokenType::Cdc) =>
                {
                    if top_level {
                        continue;
                    }
                    let seed = ComponentValue::Preserved(t);
                    if let Some(rule) = self.consume_qualified_rule(seed)? {
                        rules.push(Rule::Qualified(rule));
                    }
                }
                ComponentValue::Preserved(t) if t.is_at_keyword() => {
                    let at_rule = self.consume_at_rule(t)?;
                    rules.push(Rule::At(at_rule));
                }
                ComponentValue::Preserved(t)
                    if top_level
                        && matches!(
                            t.token_type,
                            TokenType::RCurly | TokenType::RBracket | TokenType::RParen
                        ) =>
                {
                    log::trace!("discarding unmatched '{}' at the top level", t.source);
                }
                ComponentValue::Preserved(t) if matches!(t.token_type, TokenType::RCurly) => {
                    // end of the enclosing block
                    break;
                }
                other => {
                    if let Some(rule) = self.consume_qualified_rule(other)? {
                        rules.push(Rule::Qualified(rule));
                    }
                }
            }
        }

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Rule;
    use crate::parse_stylesheet;
    use crate::walker::Walker;

    #[test]
    fn parse_two_rules() {
        let sheet = parse_stylesheet("h1 { top: 1px; } @media print {}").unwrap();

        assert_eq!(sheet.rules.len(), 2);
        assert!(matches!(sheet.rules[0], Rule::Qualified(_)));
        assert!(matches!(sheet.rules[1], Rule::At(_)));
    }

    #[test]
    fn cdo_and_cdc_are_discarded_at_top_level() {
        let sheet = parse_stylesheet("<!-- a { color: red; } -->").unwrap();

        assert_eq!(sheet.rules.len(), 1);
        assert!(sheet.parsing_errors.is_empty());

        let walker = Walker::new(&sheet);
        assert!(walker.walk_to_string().contains("[Ident] a"));
    }

    #[test]
    fn unmatched_closers_are_discarded_at_top_level() {
        let sheet = parse_stylesheet("} ] a { color: red; }").unwrap();

        assert_eq!(sheet.rules.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_stylesheet() {
        let sheet = parse_stylesheet("   /* only a comment */  ").unwrap();

        assert!(sheet.rules.is_empty());
        assert!(sheet.parsing_errors.is_empty());
    }
}
