use crate::node::{ComponentValue, Rule, SimpleBlock, Stylesheet};
use crate::tokenizer::TokenType;
use std::io::Write;

/// The walker prints the generic syntax tree as an indented outline, which
/// keeps parser tests readable.
pub struct Walker<'a> {
    root: &'a Stylesheet,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Stylesheet) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = walk_stylesheet(self.root, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = walk_stylesheet(self.root, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn walk_stylesheet(sheet: &Stylesheet, f: &mut dyn Write) -> Result<(), std::io::Error> {
    writeln!(f, "[Stylesheet ({})]", sheet.rules.len())?;

    for rule in &sheet.rules {
        match rule {
            Rule::Qualified(rule) => {
                writeln!(f, "  [Rule]")?;
                for value in &rule.prelude {
                    walk_value(value, 2, f)?;
                }
                walk_block(&rule.block, 2, f)?;
            }
            Rule::At(rule) => {
                writeln!(f, "  [AtRule] name: {}", rule.name)?;
                for value in &rule.prelude {
                    walk_value(value, 2, f)?;
                }
                if let Some(block) = &rule.block {
                    walk_block(block, 2, f)?;
                }
            }
        }
    }

    Ok(())
}

fn walk_block(block: &SimpleBlock, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = "  ".repeat(depth);

    writeln!(f, "{}[Block] {}", prefix, block.associated)?;
    for value in &block.values {
        walk_value(value, depth + 1, f)?;
    }

    Ok(())
}

fn walk_value(value: &ComponentValue, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = "  ".repeat(depth);

    match value {
        ComponentValue::Preserved(token) => match &token.token_type {
            // whitespace is noise in the outline
            TokenType::Whitespace => {}
            TokenType::Ident(value) => writeln!(f, "{prefix}[Ident] {value}")?,
            TokenType::AtKeyword(value) => writeln!(f, "{prefix}[AtKeyword] {value}")?,
            TokenType::Hash(value) => writeln!(f, "{prefix}[Hash] {value}")?,
            TokenType::QuotedString(value) => writeln!(f, "{prefix}[String] {value}")?,
            TokenType::BadString(value) => writeln!(f, "{prefix}[BadString] {value}")?,
            TokenType::Url(value) => writeln!(f, "{prefix}[Url] {value}")?,
            TokenType::BadUrl(value) => writeln!(f, "{prefix}[BadUrl] {value}")?,
            TokenType::Number => writeln!(f, "{prefix}[Number] {}", token.source)?,
            TokenType::Percentage => writeln!(f, "{prefix}[Percentage] {}", token.source)?,
            TokenType::Dimension => writeln!(f, "{prefix}[Dimension] {}", token.source)?,
            TokenType::Delim(c) => writeln!(f, "{prefix}[Delim] {c}")?,
            TokenType::MatchOp(op) => writeln!(f, "{prefix}[MatchOp] {op}")?,
            TokenType::UnicodeRange { start, end } => {
                writeln!(f, "{prefix}[UnicodeRange] U+{start:X}-U+{end:X}")?;
            }
            TokenType::Colon => writeln!(f, "{prefix}[Colon]")?,
            TokenType::Semicolon => writeln!(f, "{prefix}[Semicolon]")?,
            TokenType::Comma => writeln!(f, "{prefix}[Comma]")?,
            TokenType::Cdo => writeln!(f, "{prefix}[CDO]")?,
            TokenType::Cdc => writeln!(f, "{prefix}[CDC]")?,
            _ => writeln!(f, "{prefix}[Token] {}", token.source)?,
        },
        ComponentValue::Block(block) => walk_block(block, depth, f)?,
        ComponentValue::Function(function) => {
            writeln!(f, "{prefix}[Function] {}", function.name)?;
            for component in &function.components {
                walk_value(component, depth + 1, f)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_stylesheet;

    #[test]
    fn walk_at_rule_outline() {
        let sheet = parse_stylesheet("@media screen { a { top: 1px } }").unwrap();
        let walker = Walker::new(&sheet);

        let output = walker.walk_to_string();
        assert!(output.starts_with("[Stylesheet (1)]\n  [AtRule] name: media\n"));
        assert!(output.contains("    [Ident] screen\n"));
        assert!(output.contains("    [Block] {\n"));
        assert!(output.contains("[Dimension] 1px\n"));
    }
}
