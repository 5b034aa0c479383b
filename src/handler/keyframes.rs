use crate::node::{split_on_commas, stringify, AtRule, Rule};
use crate::stylesheet::{CssRule, DeclarationListItem, Keyframe, KeyframesRule};
use crate::{CssParser, Error};

/// Handles `@keyframes`: the stringified prelude is the animation name and
/// every qualified rule inside the block becomes one keyframe. Anything
/// else inside the block is discarded.
pub fn parse_keyframes_rule(
    parser: &mut CssParser,
    at_rule: &AtRule,
) -> Result<Option<CssRule>, Error> {
    log::trace!("parse_keyframes_rule");

    let name = stringify(&at_rule.prelude).trim().to_string();

    let Some(block) = &at_rule.block else {
        parser.record_parse_error(format!("@keyframes '{name}' has no block"));
        return Ok(None);
    };

    let inner_rules =
        parser.with_substream(block.values.clone(), |p| p.consume_list_of_rules(false))?;

    let mut keyframes = Vec::new();
    for rule in inner_rules {
        let Rule::Qualified(inner) = rule else {
            continue;
        };

        let values = split_on_commas(&inner.prelude)
            .iter()
            .map(|group| stringify(group).trim().to_string())
            .collect();

        let declarations = parser
            .with_substream(inner.block.values, |p| p.consume_list_of_declarations())?
            .into_iter()
            .filter_map(|item| match item {
                DeclarationListItem::Declaration(declaration) => Some(declaration),
                DeclarationListItem::AtRule(_) => None,
            })
            .collect();

        keyframes.push(Keyframe {
            values,
            declarations,
        });
    }

    Ok(Some(CssRule::Keyframes(KeyframesRule {
        name,
        keyframes,
        position: at_rule.span,
    })))
}
