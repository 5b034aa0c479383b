use crate::location::Location;

/// ParserConfig holds the configuration for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Start position of the source inside its original document, for inline
    /// styles that do not begin at 1/1
    pub location: Location,
    /// Optional source filename or url, used in log output only
    pub source: Option<String>,
    /// Attach source spans to rules and declarations
    pub track_positions: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            location: Location::default(),
            source: None,
            track_positions: false,
        }
    }
}
