use crate::node::{stringify, AtRule};
use crate::stylesheet::{CssRule, ImportRule};
use crate::{CssParser, Error};

/// Handles `@import`: the stringified, trimmed prelude is kept verbatim as
/// the import target. A media-query fragment after the url rides along
/// inside the string.
pub fn parse_import_rule(
    _parser: &mut CssParser,
    at_rule: &AtRule,
) -> Result<Option<CssRule>, Error> {
    log::trace!("parse_import_rule");

    let import = stringify(&at_rule.prelude).trim().to_string();

    Ok(Some(CssRule::Import(ImportRule {
        import,
        position: at_rule.span,
    })))
}

#[cfg(test)]
mod tests {
    use crate::parse_css_stylesheet;
    use crate::stylesheet::CssRule;

    fn import_of(input: &str) -> String {
        let sheet = parse_css_stylesheet(input).unwrap();
        match sheet.rules.into_iter().next().unwrap() {
            CssRule::Import(import) => import.import,
            other => panic!("expected an import rule, got {other:?}"),
        }
    }

    #[test]
    fn unquoted_url() {
        assert_eq!(import_of("@import url(~/app.css);"), "url(~/app.css)");
    }

    #[test]
    fn quoted_forms_keep_their_quotes() {
        assert_eq!(import_of("@import \"theme.css\";"), "\"theme.css\"");
        assert_eq!(import_of("@import url(\"theme.css\");"), "url(\"theme.css\")");
    }

    #[test]
    fn media_fragment_rides_along() {
        assert_eq!(
            import_of("@import url(print.css) print and (orientation: landscape);"),
            "url(print.css) print and (orientation: landscape)"
        );
    }
}
