use crate::location::Span;
use crate::node::{stringify, AtRule};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A stylesheet in CSS mode: style rules plus whatever the registered
/// at-rule handlers produced, along with the parse errors that were
/// recovered from. Serializes to the "rework" CSS AST shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssStylesheet {
    pub rules: Vec<CssRule>,
    #[serde(rename = "parsingErrors")]
    pub parsing_errors: Vec<String>,
}

impl CssStylesheet {
    /// The rework-shaped JSON form of the stylesheet.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("failed to serialize stylesheet")
    }
}

/// A rule of the CSS-mode tree. Handlers may produce any of the at-rule
/// forms; unhandled at-rules never make it into the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CssRule {
    #[serde(rename = "rule")]
    Style(StyleRule),
    #[serde(rename = "import")]
    Import(ImportRule),
    #[serde(rename = "keyframes")]
    Keyframes(KeyframesRule),
}

/// A qualified rule reinterpreted as selectors plus a declaration list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<DeclarationListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Span>,
}

/// An entry of a style rule's declaration list: either a declaration or a
/// nested at-rule kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationListItem {
    Declaration(Declaration),
    AtRule(AtRule),
}

/// A single `property: value` declaration. The value is the trimmed,
/// re-stringified run of component values, with any `!important` stripped
/// into the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
    pub position: Option<Span>,
}

/// Produced by the `@import` handler. The import target is the stringified
/// prelude, quotes and all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRule {
    pub import: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Span>,
}

/// Produced by the `@keyframes` handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyframesRule {
    pub name: String,
    pub keyframes: Vec<Keyframe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Span>,
}

/// One keyframe: the comma-split selector strings (`0%`, `from`, ...) and
/// the declarations of its block.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub values: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Serialize for Declaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "declaration")?;
        map.serialize_entry("property", &self.property)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("important", &self.important)?;
        if let Some(position) = &self.position {
            map.serialize_entry("position", position)?;
        }
        map.end()
    }
}

impl Serialize for DeclarationListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DeclarationListItem::Declaration(declaration) => declaration.serialize(serializer),
            DeclarationListItem::AtRule(at_rule) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "at-rule")?;
                map.serialize_entry("name", &at_rule.name)?;
                map.serialize_entry("prelude", stringify(&at_rule.prelude).trim())?;
                if let Some(position) = &at_rule.span {
                    map.serialize_entry("position", position)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Keyframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "keyframe")?;
        map.serialize_entry("values", &self.values)?;
        map.serialize_entry("declarations", &self.declarations)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declaration_serializes_with_type_tag() {
        let declaration = Declaration {
            property: "color".to_string(),
            value: "red".to_string(),
            important: false,
            position: None,
        };

        assert_eq!(
            serde_json::to_value(&declaration).unwrap(),
            json!({
                "type": "declaration",
                "property": "color",
                "value": "red",
                "important": false,
            })
        );
    }

    #[test]
    fn rules_serialize_with_rework_tags() {
        let import = CssRule::Import(ImportRule {
            import: "url(app.css)".to_string(),
            position: None,
        });

        assert_eq!(
            serde_json::to_value(&import).unwrap(),
            json!({ "type": "import", "import": "url(app.css)" })
        );

        let keyframes = CssRule::Keyframes(KeyframesRule {
            name: "spin".to_string(),
            keyframes: vec![Keyframe {
                values: vec!["from".to_string()],
                declarations: Vec::new(),
            }],
            position: None,
        });

        assert_eq!(
            serde_json::to_value(&keyframes).unwrap(),
            json!({
                "type": "keyframes",
                "name": "spin",
                "keyframes": [
                    { "type": "keyframe", "values": ["from"], "declarations": [] },
                ],
            })
        );
    }
}
