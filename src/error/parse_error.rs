#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries `position`, the index of the offending token in the
/// token stream. Source files carry no richer location information.
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    UnexpectedToken {
        /// What the parser expected at this point.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// Index of the token in the stream.
        position: usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// Index just past the last token.
        position: usize,
    },
    /// The lexer hit a character it has no rule for.
    UnknownSymbol {
        /// The rejected source fragment.
        symbol:   String,
        /// Index the token would have had.
        position: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// Index the token would have had.
        position: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    position, } => {
                write!(f,
                       "Parse error at token {position}: expected {expected}, found {found}.")
            },

            Self::UnexpectedEndOfInput { position } => {
                write!(f, "Parse error at token {position}: unexpected end of input.")
            },

            Self::UnknownSymbol { symbol, position } => {
                write!(f, "Parse error at token {position}: unknown symbol '{symbol}'.")
            },

            Self::UnterminatedString { position } => {
                write!(f, "Parse error at token {position}: unterminated string literal.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
