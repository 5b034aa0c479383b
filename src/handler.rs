//! The at-rule handlers that ship with the parser. Each handler follows the
//! [`crate::css::AtRuleParseFn`] signature and is preinstalled by
//! [`crate::CssParser::new`].

pub mod import;
pub mod keyframes;
