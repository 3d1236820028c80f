use std::fmt;

/// Stage of fill-sheet parsing that rejected the input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Bad characters, color literals or numbers.
    Lexical,
    /// Well-formed tokens in an order the grammar does not accept.
    Syntax,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseErrorKind::Lexical => "lexical",
            ParseErrorKind::Syntax => "syntax",
        })
    }
}

/// Error from [`parse_sheet`](crate::parse_sheet) and the single-value parsers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn lexical(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { kind: ParseErrorKind::Lexical, message: msg.into(), line, col }
    }

    pub(crate) fn syntax(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { kind: ParseErrorKind::Syntax, message: msg.into(), line, col }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fill {} error at {}:{}: {}", self.kind, self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}
