use crate::node::{split_on_commas, stringify, QualifiedRule, Rule};
use crate::stylesheet::{CssRule, CssStylesheet, StyleRule};
use crate::{CssParser, Error};

/// Parses one kind of at-rule into a CSS rule. Returning `Ok(None)` drops
/// the rule without failing the parse.
pub type AtRuleParseFn =
    for<'a, 'stream> fn(&'a mut CssParser<'stream>, &'a crate::node::AtRule) -> Result<Option<CssRule>, Error>;

/// A registered at-rule handler: the keyword it answers to plus the parse
/// function. Handlers live in an owned map keyed by the keyword, so a
/// duplicate registration simply replaces the earlier one.
pub struct AtRuleHandler {
    pub keyword: String,
    pub parse: AtRuleParseFn,
}

impl<'stream> CssParser<'stream> {
    /// Installs a handler for the given at-rule keyword. Keywords are
    /// matched ASCII case-insensitively; registering the same keyword again
    /// overwrites the earlier handler.
    pub fn register_at_rule_handler(&mut self, keyword: &str, parse: AtRuleParseFn) {
        let keyword = keyword.to_ascii_lowercase();
        self.handlers
            .insert(keyword.clone(), AtRuleHandler { keyword, parse });
    }

    /// Parses the source in CSS-stylesheet mode: every top-level qualified
    /// rule is reinterpreted as a style rule and every at-rule goes through
    /// its registered handler. At-rules without a handler are discarded.
    pub fn parse_css(&mut self) -> Result<CssStylesheet, Error> {
        log::trace!("parse_css source={:?}", self.config.source);

        let rules = self.consume_list_of_rules(true)?;

        let mut css_rules = Vec::new();
        for rule in rules {
            match rule {
                Rule::Qualified(qualified) => {
                    let style_rule = self.interpret_style_rule(qualified)?;
                    css_rules.push(CssRule::Style(style_rule));
                }
                Rule::At(at_rule) => {
                    let parse = self
                        .handlers
                        .get(&at_rule.name.to_ascii_lowercase())
                        .map(|handler| handler.parse);

                    match parse {
                        Some(parse) => {
                            if let Some(css_rule) = parse(self, &at_rule)? {
                                css_rules.push(css_rule);
                            }
                        }
                        None => {
                            log::trace!("no handler for '@{}', rule discarded", at_rule.name);
                        }
                    }
                }
            }
        }

        Ok(CssStylesheet {
            rules: css_rules,
            parsing_errors: std::mem::take(&mut self.parsing_errors),
        })
    }

    /// Reinterprets a qualified rule as a style rule: the prelude splits on
    /// top-level commas into selector strings and the block's contents are
    /// re-parsed as a declaration list through a sub-stream.
    pub(crate) fn interpret_style_rule(
        &mut self,
        rule: QualifiedRule,
    ) -> Result<StyleRule, Error> {
        log::trace!("interpret_style_rule");

        let selectors = split_on_commas(&rule.prelude)
            .iter()
            .map(|group| stringify(group).trim().to_string())
            .filter(|selector| !selector.is_empty())
            .collect();

        let declarations = self.with_substream(rule.block.values, |parser| {
            parser.consume_list_of_declarations()
        })?;

        Ok(StyleRule {
            selectors,
            declarations,
            position: rule.span,
        })
    }
}
