//! Grammar token table.
//!
//! Parser generators report expected input by internal token name (`SQE`, `PE`, ...). This
//! table maps those names, and the literal characters themselves, to the delimiter they stand
//! for, so the classifier and the fix engine can talk about `]` instead of `SQE`.

/// A bracket, brace, parenthesis or quote character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `[`
    OpenSquare,
    /// `]`
    CloseSquare,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `<`
    OpenAngle,
    /// `>`
    CloseAngle,
    /// `"`
    DoubleQuote,
    /// `'`
    SingleQuote,
    /// `` ` ``
    Backtick,
}

impl Delimiter {
    /// The literal character.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenSquare => "[",
            Self::CloseSquare => "]",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::OpenAngle => "<",
            Self::CloseAngle => ">",
            Self::DoubleQuote => "\"",
            Self::SingleQuote => "'",
            Self::Backtick => "`",
        }
    }

    /// Human-readable name used in fix titles.
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenSquare => "opening bracket",
            Self::CloseSquare => "closing bracket",
            Self::OpenParen => "opening parenthesis",
            Self::CloseParen => "closing parenthesis",
            Self::OpenBrace => "opening brace",
            Self::CloseBrace => "closing brace",
            Self::OpenAngle => "opening angle bracket",
            Self::CloseAngle => "closing angle bracket",
            Self::DoubleQuote | Self::SingleQuote | Self::Backtick => "quote",
        }
    }
}

const TOKEN_TABLE: &[(&str, Delimiter)] = &[
    // Jison token names (Mermaid grammars).
    ("SQS", Delimiter::OpenSquare),
    ("SQE", Delimiter::CloseSquare),
    ("PS", Delimiter::OpenParen),
    ("PE", Delimiter::CloseParen),
    ("DIAMOND_START", Delimiter::OpenBrace),
    ("DIAMOND_STOP", Delimiter::CloseBrace),
    ("TAGSTART", Delimiter::OpenAngle),
    ("TAGEND", Delimiter::CloseAngle),
    ("QUOTE", Delimiter::DoubleQuote),
    // Generic lexer names.
    ("LBRACKET", Delimiter::OpenSquare),
    ("RBRACKET", Delimiter::CloseSquare),
    ("LPAREN", Delimiter::OpenParen),
    ("RPAREN", Delimiter::CloseParen),
    ("LBRACE", Delimiter::OpenBrace),
    ("RBRACE", Delimiter::CloseBrace),
    ("LEFT_BRACE", Delimiter::OpenBrace),
    ("RIGHT_BRACE", Delimiter::CloseBrace),
    // Literal characters.
    ("[", Delimiter::OpenSquare),
    ("]", Delimiter::CloseSquare),
    ("(", Delimiter::OpenParen),
    (")", Delimiter::CloseParen),
    ("{", Delimiter::OpenBrace),
    ("}", Delimiter::CloseBrace),
    ("<", Delimiter::OpenAngle),
    (">", Delimiter::CloseAngle),
    ("\"", Delimiter::DoubleQuote),
    ("'", Delimiter::SingleQuote),
    ("`", Delimiter::Backtick),
];

/// Resolve a token name or literal to a delimiter.
pub fn delimiter_for_token(token: &str) -> Option<Delimiter> {
    let token = token.trim();
    TOKEN_TABLE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, delimiter)| *delimiter)
}

/// Render a token for humans: mapped delimiters become their literal character.
pub fn display_token(token: &str) -> &str {
    delimiter_for_token(token).map_or(token, |d| d.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_names() {
        assert_eq!(delimiter_for_token("SQE"), Some(Delimiter::CloseSquare));
        assert_eq!(delimiter_for_token("PE"), Some(Delimiter::CloseParen));
        assert_eq!(delimiter_for_token("DIAMOND_STOP"), Some(Delimiter::CloseBrace));
        assert_eq!(delimiter_for_token(" } "), Some(Delimiter::CloseBrace));
        assert_eq!(delimiter_for_token("EOF"), None);
    }

    #[test]
    fn test_display_token() {
        assert_eq!(display_token("SQE"), "]");
        assert_eq!(display_token("NODE_STRING"), "NODE_STRING");

        let owned = String::from(" RPAREN ");
        let shown: &str = display_token(&owned);
        assert_eq!(shown, ")");
        let owned = String::from("NODE_STRING");
        assert_eq!(display_token(&owned), owned.as_str());
    }
}
