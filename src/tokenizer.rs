use crate::location::Location;
use crate::stream::{CharStream, Character, Character::Ch};
use crate::unicode::UnicodeChar;
use crate::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    /// An [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    /// A `<function-token>`; the opening `(` is consumed but not part of the name.
    Function(String),
    /// A `<url-token>` from either a quoted or an unquoted `url(...)`.
    Url(String),
    /// A `<bad-url-token>`; always indicates a parse error.
    BadUrl(String),
    /// A `<dimension-token>`; the text lives in the token source.
    Dimension,
    /// A `<percentage-token>`; the token source includes the `%`.
    Percentage,
    /// A `<number-token>`; the numeric value is parsed on demand.
    Number,
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`; always indicates a parse error.
    BadString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram);
    /// a whole run of whitespace collapses into one token.
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram)
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A two-character attribute matcher: `^=`, `$=`, `*=`, `|=` or `~=`.
    MatchOp(String),
    /// A `<unicode-range-token>` covering the inclusive code point range.
    UnicodeRange { start: u32, end: u32 },
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `,` `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    // A `<!--` `<CDO-token>`
    Cdo,
    // A `-->` `<CDC-token>`
    Cdc,
    // A `<EOF-token>`
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// The raw source text the token spanned
    pub source: String,
    /// Location of the token in the stream
    pub location: Location,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, location: Location) -> Token {
        Token {
            token_type,
            source,
            location,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }

    pub fn is_at_keyword(&self) -> bool {
        matches!(self.token_type, TokenType::AtKeyword(_))
    }

    pub fn is_colon(&self) -> bool {
        matches!(self.token_type, TokenType::Colon)
    }

    pub fn is_semicolon(&self) -> bool {
        matches!(self.token_type, TokenType::Semicolon)
    }

    pub fn is_comma(&self) -> bool {
        matches!(self.token_type, TokenType::Comma)
    }

    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }

    /// The numeric value of a number, percentage or dimension token, parsed
    /// from the token source on demand.
    pub fn numeric_value(&self) -> Option<f32> {
        match self.token_type {
            TokenType::Number => self.source.parse().ok(),
            TokenType::Percentage => self.source.strip_suffix('%')?.parse().ok(),
            TokenType::Dimension => {
                let split = number_prefix_len(&self.source);
                self.source[..split].parse().ok()
            }
            _ => None,
        }
    }

    /// The unit of a dimension token, as written in the source.
    pub fn dimension_unit(&self) -> Option<&str> {
        match self.token_type {
            TokenType::Dimension => Some(&self.source[number_prefix_len(&self.source)..]),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Whitespace => write!(f, " "),
            TokenType::Eof => Ok(()),
            _ => write!(f, "{}", self.source),
        }
    }
}

/// Length of the leading `[+-]?(\d+\.\d+|\d+|\.\d+)([eE][+-]?\d+)?` part of a
/// number, percentage or dimension source. The prefix is always ASCII, so the
/// returned byte length is also a valid char boundary.
fn number_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < b.len() && b[i] == b'.' && b[i + 1].is_ascii_digit() {
        i += 2;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            i = j + 1;
            while i < b.len() && b[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    i
}

/// CSS tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
pub struct Tokenizer<'stream> {
    stream: &'stream mut CharStream,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Current position of the stream, relative to 1/1
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer over the given stream that starts on the given
    /// location. This does not have to be 1/1, but can be any location.
    pub fn new(stream: &'stream mut CharStream, location: Location) -> Self {
        Self {
            stream,
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the current location, taking the start location into account
    pub fn current_location(&self) -> Location {
        let column = if self.cur_location.line == 1 {
            self.start_location.column + self.cur_location.column - 1
        } else {
            self.cur_location.column
        };

        Location::new(
            self.start_location.line + self.cur_location.line - 1,
            column,
            self.cur_location.offset,
        )
    }

    /// Returns true when there is nothing left to tokenize
    pub fn eof(&self) -> bool {
        self.stream.eof()
    }

    /// Rewinds the tokenizer back to the start of the stream
    pub fn reset(&mut self) {
        self.stream.reset();
        self.cur_location = Location::default();
    }

    /// Reinitializes the tokenizer over new source text, rewinding all
    /// cursors.
    pub fn init(&mut self, data: &str) {
        self.stream.read_from_str(data);
        self.cur_location = Location::default();
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Comments are consumed and never surface as tokens. Once the stream is
    /// exhausted every call returns an `Eof` token.
    pub fn consume(&mut self) -> Result<Token, Error> {
        self.consume_comments();

        let loc = self.current_location();
        let start = self.stream.tell();

        let token_type = self.consume_token_type()?;

        if token_type == TokenType::Whitespace {
            // merge whitespace runs that are separated only by comments
            loop {
                self.consume_comments();
                if !self.current_char().is_whitespace() {
                    break;
                }
                self.consume_whitespace_run();
            }
        }

        let source = self.stream.slice(start, self.stream.tell());
        let token = Token::new(token_type, source, loc);

        log::trace!("{:?}", token);

        Ok(token)
    }

    fn consume_token_type(&mut self) -> Result<TokenType, Error> {
        let current = self.current_char();

        let t = match current {
            Character::StreamEnd => TokenType::Eof,
            c if c.is_whitespace() => {
                self.consume_whitespace_run();
                TokenType::Whitespace
            }
            Ch('"' | '\'') => self.consume_string_token(),
            Ch(c @ '#') => {
                let next = self.stream.look_ahead(1);
                if matches!(next, Ch(c) if is_name_char(c)) || self.is_escape(1) {
                    // consume '#'
                    self.next_char();
                    TokenType::Hash(self.consume_name())
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
            Ch('(') => {
                self.next_char();
                TokenType::LParen
            }
            Ch(')') => {
                self.next_char();
                TokenType::RParen
            }
            Ch('[') => {
                self.next_char();
                TokenType::LBracket
            }
            Ch(']') => {
                self.next_char();
                TokenType::RBracket
            }
            Ch('{') => {
                self.next_char();
                TokenType::LCurly
            }
            Ch('}') => {
                self.next_char();
                TokenType::RCurly
            }
            Ch(',') => {
                self.next_char();
                TokenType::Comma
            }
            Ch(':') => {
                self.next_char();
                TokenType::Colon
            }
            Ch(';') => {
                self.next_char();
                TokenType::Semicolon
            }
            Ch(c @ ('$' | '*' | '^' | '|' | '~')) => {
                if self.stream.look_ahead(1) == Ch('=') {
                    self.next_char();
                    self.next_char();
                    TokenType::MatchOp(format!("{c}="))
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
            Ch(c @ '@') => {
                // consume '@'
                self.next_char();

                if self.is_name_seq_start(0) {
                    TokenType::AtKeyword(self.consume_name())
                } else {
                    TokenType::Delim(c)
                }
            }
            Ch(c @ '\\') => {
                if self.stream.look_ahead(1) == Ch('\n') {
                    // parse error: a lone backslash before a newline
                    self.next_char();
                    self.next_char();
                    TokenType::Delim(c)
                } else {
                    self.consume_ident_like()?
                }
            }
            Ch(c @ '+') => {
                if self.is_signed_decimal(0) {
                    self.consume_numeric()
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
            Ch('.') => {
                if self.stream.look_ahead(1).is_numeric() {
                    self.consume_numeric()
                } else {
                    self.next_char();
                    TokenType::Delim('.')
                }
            }
            Ch(c @ '-') => {
                if self.is_signed_decimal(0) {
                    self.consume_numeric()
                } else if self.is_name_seq_start(0) {
                    self.consume_ident_like()?
                } else if self.look_ahead_slice(3) == "-->" {
                    self.consume_chars(3);
                    TokenType::Cdc
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
            Ch(c @ '<') => {
                if self.look_ahead_slice(4) == "<!--" {
                    self.consume_chars(4);
                    TokenType::Cdo
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
            Ch('u' | 'U') => {
                let plus = self.stream.look_ahead(1);
                let after = self.stream.look_ahead(2);
                if plus == Ch('+') && (after.is_hex_digit() || after == Ch('?')) {
                    // consume 'U+'
                    self.next_char();
                    self.next_char();
                    self.consume_unicode_range()
                } else {
                    self.consume_ident_like()?
                }
            }
            c if c.is_numeric() => self.consume_numeric(),
            Ch(c) => {
                if self.is_name_seq_start(0) {
                    self.consume_ident_like()?
                } else {
                    self.next_char();
                    TokenType::Delim(c)
                }
            }
        };

        Ok(t)
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#comment-diagram)
    fn consume_comments(&mut self) {
        while self.look_ahead_slice(2) == "/*" {
            // consume '/*'
            self.consume_chars(2);

            while self.look_ahead_slice(2) != "*/" && !self.stream.eof() {
                self.next_char();
            }

            // consume '*/'
            self.consume_chars(2);
        }
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric(&mut self) -> TokenType {
        self.consume_number_repr();

        if self.current_char() == Ch('%') {
            // consume '%'
            self.next_char();
            return TokenType::Percentage;
        }

        if self.is_name_seq_start(0) {
            self.consume_name();
            return TokenType::Dimension;
        }

        TokenType::Number
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Advances over `[+-]?(\d+\.\d+|\d+|\.\d+)([eE][+-]?\d+)?`; the
    /// representation stays in the stream and ends up in the token source.
    fn consume_number_repr(&mut self) {
        if matches!(self.current_char(), Ch('+' | '-')) {
            self.next_char();
        }

        self.consume_digits();

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            self.next_char();
            self.next_char();
            self.consume_digits();
        }

        let c1 = self.current_char();
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('e' | 'E'))
            && (c2.is_numeric() || (matches!(c2, Ch('+' | '-')) && c3.is_numeric()))
        {
            self.next_char();
            self.next_char();
            self.consume_digits();
        }
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns an `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like(&mut self) -> Result<TokenType, Error> {
        let value = self.consume_name();

        if self.current_char() == Ch('(') {
            // consume '('
            self.next_char();

            if value.eq_ignore_ascii_case("url") {
                return self.consume_url();
            }

            return Ok(TokenType::Function(value));
        }

        Ok(TokenType::Ident(value))
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self) -> TokenType {
        let (value, bad) = self.consume_string_value();
        if bad {
            TokenType::BadString(value)
        } else {
            TokenType::QuotedString(value)
        }
    }

    fn consume_string_value(&mut self) -> (String, bool) {
        // consume the opening (') or (")
        let ending = self.next_char();
        let mut value = String::new();

        loop {
            let current = self.current_char();

            // eof is a parse error, but still yields the string so far
            if current == ending || current == Character::StreamEnd {
                // consume the closing quote
                self.next_char();
                return (value, false);
            }

            // an unescaped newline ends the string as a bad-string; the
            // newline itself is not consumed
            if current == Ch('\n') {
                return (value, true);
            }

            // escaped newline: line continuation
            if current == Ch('\\') && self.stream.look_ahead(1) == Ch('\n') {
                self.next_char();
                self.next_char();
                continue;
            }

            if self.is_escape(0) {
                value.push(self.consume_escaped_char());
                continue;
            }

            value.push(self.next_char().into());
        }
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// Expects `url(` to have been consumed already. Returns either a
    /// `<url-token>` or a `<bad-url-token>`. An escape inside an unquoted url
    /// is not supported and aborts the parse.
    fn consume_url(&mut self) -> Result<TokenType, Error> {
        self.consume_whitespace_run();

        if matches!(self.current_char(), Ch('"' | '\'')) {
            let (value, bad) = self.consume_string_value();
            if bad {
                self.consume_bad_url_remnants();
                return Ok(TokenType::BadUrl(value));
            }

            self.consume_whitespace_run();
            return Ok(match self.current_char() {
                Ch(')') => {
                    self.next_char();
                    TokenType::Url(value)
                }
                // eof closes the url implicitly
                Character::StreamEnd => TokenType::Url(value),
                _ => {
                    self.consume_bad_url_remnants();
                    TokenType::BadUrl(value)
                }
            });
        }

        let mut url = String::new();

        loop {
            match self.current_char() {
                Ch(')') => {
                    self.next_char();
                    break;
                }
                Character::StreamEnd => break,
                c if c.is_whitespace() => {
                    self.consume_whitespace_run();
                    match self.current_char() {
                        Ch(')') => {
                            self.next_char();
                            break;
                        }
                        Character::StreamEnd => break,
                        _ => {
                            self.consume_bad_url_remnants();
                            return Ok(TokenType::BadUrl(url));
                        }
                    }
                }
                Ch('\\') => {
                    return Err(Error::UnsupportedUrlEscape(self.current_location()));
                }
                Ch(c) if c == '"' || c == '\'' || c == '(' || is_non_printable(c) => {
                    self.consume_bad_url_remnants();
                    return Ok(TokenType::BadUrl(url));
                }
                Ch(c) => {
                    url.push(c);
                    self.next_char();
                }
            }
        }

        Ok(TokenType::Url(url))
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough of the input stream to reach a recovery point where
    /// normal tokenizing can resume.
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.current_char() {
                Ch(')') => {
                    self.next_char();
                    break;
                }
                Character::StreamEnd => break,
                Ch('\\') if self.is_escape(0) => {
                    self.consume_escaped_char();
                }
                _ => {
                    self.next_char();
                }
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// `\0`, surrogates and values past U+10FFFF all decode to the
    /// replacement character.
    fn consume_escaped_char(&mut self) -> char {
        // consume '\'
        self.next_char();

        let current = self.current_char();

        // eof: parse error
        if current == Character::StreamEnd {
            return UnicodeChar::REPLACEMENT_CHARACTER;
        }

        if !current.is_hex_digit() {
            // any other code point is taken literally
            return self.next_char().into();
        }

        let mut digits = String::new();
        while self.current_char().is_hex_digit() && digits.len() < 6 {
            digits.push(self.next_char().into());
        }

        // a single whitespace code point after the hex digits is swallowed
        if self.current_char().is_whitespace() {
            self.next_char();
        }

        let as_u32 = u32::from_str_radix(&digits, 16).expect("hex digits only");

        match char::from_u32(as_u32) {
            Some(c) if c != UnicodeChar::NULL => c,
            _ => UnicodeChar::REPLACEMENT_CHARACTER,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// The caller must ensure the stream starts with a name; escapes are
    /// decoded here, exactly once.
    fn consume_name(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.current_char() == Ch('\\') && self.is_escape(0) {
                value.push(self.consume_escaped_char());
                continue;
            }

            match self.current_char() {
                Ch(c) if is_name_char(c) => {
                    value.push(c);
                    self.next_char();
                }
                _ => break,
            }
        }

        value
    }

    /// Consume a unicode-range after `U+` has been consumed: up to six hex
    /// digits, then up to `6 - count` question marks, then an optional
    /// `-hex` end range.
    fn consume_unicode_range(&mut self) -> TokenType {
        let mut hex = String::new();

        while self.current_char().is_hex_digit() && hex.len() < 6 {
            hex.push(self.next_char().into());
        }

        let mut questions = false;
        while self.current_char() == Ch('?') && hex.len() < 6 {
            hex.push(self.next_char().into());
            questions = true;
        }

        if questions {
            let start = u32::from_str_radix(&hex.replace('?', "0"), 16).expect("hex digits only");
            let end = u32::from_str_radix(&hex.replace('?', "F"), 16).expect("hex digits only");
            return TokenType::UnicodeRange { start, end };
        }

        let start = u32::from_str_radix(&hex, 16).expect("hex digits only");

        if self.current_char() == Ch('-') && self.stream.look_ahead(1).is_hex_digit() {
            // consume '-'
            self.next_char();

            let mut end_hex = String::new();
            while self.current_char().is_hex_digit() && end_hex.len() < 6 {
                end_hex.push(self.next_char().into());
            }

            let end = u32::from_str_radix(&end_hex, 16).expect("hex digits only");
            return TokenType::UnicodeRange { start, end };
        }

        TokenType::UnicodeRange { start, end: start }
    }

    fn consume_digits(&mut self) {
        while self.current_char().is_numeric() {
            self.next_char();
        }
    }

    fn consume_chars(&mut self, mut len: usize) {
        while len > 0 {
            self.next_char();
            len -= 1;
        }
    }

    fn consume_whitespace_run(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_escape(&self, start: usize) -> bool {
        self.stream.look_ahead(start) == Ch('\\')
            && self.stream.look_ahead(start + 1) != Ch('\n')
    }

    /// Checks whether the stream starts a name:
    /// `-?([A-Za-z_]|non-ASCII|escape)`. A leading `--` is not a name start,
    /// which lets `-->` fall through to CDC.
    fn is_name_seq_start(&self, start: usize) -> bool {
        match self.stream.look_ahead(start) {
            Ch('-') => {
                matches!(self.stream.look_ahead(start + 1), Ch(c) if is_name_start(c))
                    || self.is_escape(start + 1)
            }
            Ch('\\') => self.is_escape(start),
            Ch(c) => is_name_start(c),
            Character::StreamEnd => false,
        }
    }

    /// e.g. `+1`, `-1`, `+.1`, `-0.01`
    fn is_signed_decimal(&self, start: usize) -> bool {
        let current = self.stream.look_ahead(start);
        let next = self.stream.look_ahead(start + 1);
        let last = self.stream.look_ahead(start + 2);

        matches!(current, Ch('+' | '-'))
            && ((next == Ch('.') && last.is_numeric()) || next.is_numeric())
    }

    fn current_char(&self) -> Character {
        self.stream.look_ahead(0)
    }

    fn next_char(&mut self) -> Character {
        let c = self.stream.read_and_next();

        if let Ch(ch) = c {
            self.cur_location.offset += 1;
            if ch == '\n' {
                self.cur_location.line += 1;
                self.cur_location.column = 1;
            } else {
                self.cur_location.column += 1;
            }
        }

        c
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                Character::StreamEnd => break,
            }
        }

        s
    }
}

/// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// [non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
fn is_non_printable(c: char) -> bool {
    (UnicodeChar::NULL..=UnicodeChar::BACKSPACE).contains(&c)
        || (UnicodeChar::SHIFT_OUT..=UnicodeChar::INFORMATION_SEPARATOR_ONE).contains(&c)
        || c == UnicodeChar::TAB
        || c == UnicodeChar::DELETE
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_token_types {
        ($input:expr, $expected:expr) => {
            let mut stream = CharStream::new();
            stream.read_from_str($input);
            let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

            for expected in $expected {
                let token = tokenizer.consume().unwrap();
                assert_eq!(token.token_type, expected, "input: {:?}", $input);
            }
        };
    }

    fn all_tokens(input: &str) -> Vec<Token> {
        let mut stream = CharStream::new();
        stream.read_from_str(input);
        let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.consume().unwrap();
            if token.is_eof() {
                return tokens;
            }
            tokens.push(token);
        }
    }

    #[test]
    fn tokenize_style_rule() {
        assert_token_types!(
            "Button { background: red; }",
            [
                TokenType::Ident("Button".into()),
                TokenType::Whitespace,
                TokenType::LCurly,
                TokenType::Whitespace,
                TokenType::Ident("background".into()),
                TokenType::Colon,
                TokenType::Whitespace,
                TokenType::Ident("red".into()),
                TokenType::Semicolon,
                TokenType::Whitespace,
                TokenType::RCurly,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_import_and_url() {
        assert_token_types!(
            "@import url(~/app.css); Button { color: orange; }",
            [
                TokenType::AtKeyword("import".into()),
                TokenType::Whitespace,
                TokenType::Url("~/app.css".into()),
                TokenType::Semicolon,
                TokenType::Whitespace,
                TokenType::Ident("Button".into()),
                TokenType::Whitespace,
                TokenType::LCurly,
                TokenType::Whitespace,
                TokenType::Ident("color".into()),
                TokenType::Colon,
                TokenType::Whitespace,
                TokenType::Ident("orange".into()),
                TokenType::Semicolon,
                TokenType::Whitespace,
                TokenType::RCurly,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn tokenize_numeric_forms() {
        let tokens = all_tokens("Button { width: .0; height: 100%; font-size: 10em; }");

        let numeric: Vec<&Token> = tokens
            .iter()
            .filter(|t| {
                matches!(
                    t.token_type,
                    TokenType::Number | TokenType::Percentage | TokenType::Dimension
                )
            })
            .collect();

        assert_eq!(numeric.len(), 3);

        assert_eq!(numeric[0].token_type, TokenType::Number);
        assert_eq!(numeric[0].source, ".0");
        assert_eq!(numeric[0].numeric_value(), Some(0.0));

        assert_eq!(numeric[1].token_type, TokenType::Percentage);
        assert_eq!(numeric[1].source, "100%");
        assert_eq!(numeric[1].numeric_value(), Some(100.0));

        assert_eq!(numeric[2].token_type, TokenType::Dimension);
        assert_eq!(numeric[2].source, "10em");
        assert_eq!(numeric[2].numeric_value(), Some(10.0));
        assert_eq!(numeric[2].dimension_unit(), Some("em"));
    }

    #[test]
    fn tokenize_number_exponents() {
        for (input, value) in [
            ("1e+1", 1e+1_f32),
            ("1e1", 1e1),
            ("1e-1", 1e-1),
            ("-9.10", -9.10),
            ("0.0001", 0.0001),
            ("+34", 34.0),
        ] {
            let tokens = all_tokens(input);
            assert_eq!(tokens.len(), 1, "input: {input}");
            assert_eq!(tokens[0].token_type, TokenType::Number);
            assert_eq!(tokens[0].numeric_value(), Some(value));
        }

        // 'e' not followed by an exponent begins the dimension unit
        let tokens = all_tokens("10em5");
        assert_eq!(tokens[0].token_type, TokenType::Dimension);
        assert_eq!(tokens[0].dimension_unit(), Some("em5"));
    }

    #[test]
    fn tokenize_unicode_ranges() {
        assert_token_types!(
            "unicode-range: U+0025-00FF, U+4??;",
            [
                TokenType::Ident("unicode-range".into()),
                TokenType::Colon,
                TokenType::Whitespace,
                TokenType::UnicodeRange {
                    start: 0x25,
                    end: 0xFF,
                },
                TokenType::Comma,
                TokenType::Whitespace,
                TokenType::UnicodeRange {
                    start: 0x400,
                    end: 0x4FF,
                },
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );

        assert_token_types!(
            "U+26",
            [TokenType::UnicodeRange {
                start: 0x26,
                end: 0x26,
            }]
        );
    }

    #[test]
    fn tokenize_escapes() {
        assert_token_types!(
            "\\42utton { color: red; }",
            [
                TokenType::Ident("Button".into()),
                TokenType::Whitespace,
                TokenType::LCurly,
            ]
        );

        // hex escape with a trailing whitespace separator
        assert_token_types!("\\26 B", [TokenType::Ident("&B".into())]);

        // out-of-range and null escapes decode to the replacement character
        assert_token_types!("\\110000 x", [TokenType::Ident("\u{FFFD}x".into())]);
        assert_token_types!("\\0 x", [TokenType::Ident("\u{FFFD}x".into())]);

        // non-hex escapes are taken literally
        assert_token_types!("\\:hover", [TokenType::Ident(":hover".into())]);
    }

    #[test]
    fn tokenize_match_operators() {
        assert_token_types!(
            "^= $= *= |= ~=",
            [
                TokenType::MatchOp("^=".into()),
                TokenType::Whitespace,
                TokenType::MatchOp("$=".into()),
                TokenType::Whitespace,
                TokenType::MatchOp("*=".into()),
                TokenType::Whitespace,
                TokenType::MatchOp("|=".into()),
                TokenType::Whitespace,
                TokenType::MatchOp("~=".into()),
                TokenType::Eof,
            ]
        );

        assert_token_types!(
            "* ~",
            [
                TokenType::Delim('*'),
                TokenType::Whitespace,
                TokenType::Delim('~'),
            ]
        );
    }

    #[test]
    fn tokenize_strings() {
        assert_token_types!(
            "\"double quotes\" 'single quotes' \"\"",
            [
                TokenType::QuotedString("double quotes".into()),
                TokenType::Whitespace,
                TokenType::QuotedString("single quotes".into()),
                TokenType::Whitespace,
                TokenType::QuotedString("".into()),
            ]
        );

        assert_token_types!(
            "content: \"me \\26  you\";",
            [
                TokenType::Ident("content".into()),
                TokenType::Colon,
                TokenType::Whitespace,
                TokenType::QuotedString("me & you".into()),
                TokenType::Semicolon,
            ]
        );

        // escaped newline is a line continuation
        assert_token_types!("\"a\\\nb\"", [TokenType::QuotedString("ab".into())]);

        // eof terminates the string without an error
        assert_token_types!("\"eof", [TokenType::QuotedString("eof".into())]);

        // an unescaped newline turns the string into a bad-string; the
        // newline itself is left in the stream
        assert_token_types!(
            "'line\nnewline'",
            [
                TokenType::BadString("line".into()),
                TokenType::Whitespace,
                TokenType::Ident("newline".into()),
                TokenType::QuotedString("".into()),
            ]
        );
    }

    #[test]
    fn tokenize_urls() {
        let urls = [
            ("url(https://example.org/)", TokenType::Url("https://example.org/".into())),
            ("url(  spaced.css   )", TokenType::Url("spaced.css".into())),
            ("url(\"quoted.css\")", TokenType::Url("quoted.css".into())),
            ("url( 'quoted.css' )", TokenType::Url("quoted.css".into())),
            ("URL(upper.css)", TokenType::Url("upper.css".into())),
            ("url(eof", TokenType::Url("eof".into())),
            ("url(a b)", TokenType::BadUrl("a".into())),
            ("url(a\u{0000}b)", TokenType::BadUrl("a".into())),
            ("url(a(b)", TokenType::BadUrl("a".into())),
        ];

        for (input, expected) in urls {
            let mut stream = CharStream::new();
            stream.read_from_str(input);
            let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

            assert_eq!(tokenizer.consume().unwrap().token_type, expected, "input: {input}");
            assert!(tokenizer.consume().unwrap().is_eof(), "input: {input}");
        }
    }

    #[test]
    fn unquoted_url_escape_is_fatal() {
        let mut stream = CharStream::new();
        stream.read_from_str("url(a\\62 c)");
        let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

        assert!(matches!(
            tokenizer.consume(),
            Err(Error::UnsupportedUrlEscape(_))
        ));
    }

    #[test]
    fn tokenize_cdo_and_cdc() {
        assert_token_types!(
            "<!-- --> <!- ->",
            [
                TokenType::Cdo,
                TokenType::Whitespace,
                TokenType::Cdc,
                TokenType::Whitespace,
                TokenType::Delim('<'),
                TokenType::Delim('!'),
                TokenType::Delim('-'),
                TokenType::Whitespace,
                TokenType::Delim('-'),
                TokenType::Delim('>'),
            ]
        );
    }

    #[test]
    fn tokenize_at_keywords() {
        assert_token_types!(
            "@media @-Media @_media @0media @.media",
            [
                TokenType::AtKeyword("media".into()),
                TokenType::Whitespace,
                TokenType::AtKeyword("-Media".into()),
                TokenType::Whitespace,
                TokenType::AtKeyword("_media".into()),
                TokenType::Whitespace,
                // `@0media` => [@, 0media]
                TokenType::Delim('@'),
                TokenType::Dimension,
                TokenType::Whitespace,
                // `@.media` => [@, ., media]
                TokenType::Delim('@'),
                TokenType::Delim('.'),
                TokenType::Ident("media".into()),
            ]
        );
    }

    #[test]
    fn tokenize_hashes() {
        assert_token_types!(
            "#header #00F #FFFF00 # x",
            [
                TokenType::Hash("header".into()),
                TokenType::Whitespace,
                TokenType::Hash("00F".into()),
                TokenType::Whitespace,
                TokenType::Hash("FFFF00".into()),
                TokenType::Whitespace,
                TokenType::Delim('#'),
                TokenType::Whitespace,
                TokenType::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn tokenize_functions() {
        assert_token_types!(
            "rgba(255, 50%, 0)",
            [
                TokenType::Function("rgba".into()),
                TokenType::Number,
                TokenType::Comma,
                TokenType::Whitespace,
                TokenType::Percentage,
                TokenType::Comma,
                TokenType::Whitespace,
                TokenType::Number,
                TokenType::RParen,
            ]
        );

        // a name followed by whitespace before '(' stays an ident
        assert_token_types!(
            "rgba ()",
            [
                TokenType::Ident("rgba".into()),
                TokenType::Whitespace,
                TokenType::LParen,
                TokenType::RParen,
            ]
        );
    }

    #[test]
    fn whitespace_collapses_across_comments() {
        let tokens = all_tokens("a /* note */ b");
        let types: Vec<&TokenType> = tokens.iter().map(|t| &t.token_type).collect();

        assert_eq!(
            types,
            [
                &TokenType::Ident("a".into()),
                &TokenType::Whitespace,
                &TokenType::Ident("b".into()),
            ]
        );

        // comments alone vanish entirely
        assert!(all_tokens("/* one *//* two */").is_empty());
        assert_token_types!("a/*x*/b", [
            TokenType::Ident("a".into()),
            TokenType::Ident("b".into()),
        ]);
    }

    #[test]
    fn no_adjacent_whitespace_tokens() {
        let tokens = all_tokens("a \t\r\n /* c */ \u{000C} b /*d*/ /*e*/ c");
        for pair in tokens.windows(2) {
            assert!(!(pair[0].is_whitespace() && pair[1].is_whitespace()));
        }
    }

    #[test]
    fn token_sources_reconstruct_input() {
        let input = "Button{color:#fff;margin:-1px .5em}@media screen{a[href^=\"x\"]{}}";
        let concatenated: String = all_tokens(input).iter().map(|t| t.source.clone()).collect();

        assert_eq!(concatenated, input);
    }

    #[test]
    fn token_locations() {
        let tokens = all_tokens("ab cd\n  ef");

        assert_eq!(tokens[0].location, Location::new(1, 1, 0));
        assert_eq!(tokens[2].location, Location::new(1, 4, 3));
        assert_eq!(tokens[4].location, Location::new(2, 3, 8));
    }

    #[test]
    fn tokenizer_resets() {
        let mut stream = CharStream::new();
        stream.read_from_str("a b");
        let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

        while !tokenizer.consume().unwrap().is_eof() {}

        tokenizer.reset();
        let token = tokenizer.consume().unwrap();
        assert_eq!(token.token_type, TokenType::Ident("a".into()));
        assert_eq!(token.location, Location::new(1, 1, 0));
    }

    #[test]
    fn tokenizer_is_reusable_across_inputs() {
        let mut stream = CharStream::new();
        stream.read_from_str("a");
        let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

        assert_eq!(
            tokenizer.consume().unwrap().token_type,
            TokenType::Ident("a".into())
        );

        tokenizer.init("12px");
        let token = tokenizer.consume().unwrap();
        assert_eq!(token.token_type, TokenType::Dimension);
        assert_eq!(token.location, Location::new(1, 1, 0));
    }

    #[test]
    fn start_location_offsets_positions() {
        let mut stream = CharStream::new();
        stream.read_from_str("a\nb");
        let mut tokenizer = Tokenizer::new(&mut stream, Location::new(10, 5, 0));

        assert_eq!(tokenizer.consume().unwrap().location, Location::new(10, 5, 0));
        // whitespace, then 'b' on the next physical line: the inline column
        // offset no longer applies
        tokenizer.consume().unwrap();
        assert_eq!(tokenizer.consume().unwrap().location, Location::new(11, 1, 2));
    }
}
