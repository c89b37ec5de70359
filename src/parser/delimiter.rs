/// Field separator for a whole CSV text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// Pick the separator from a single line, normally the header.
///
/// Comma wins whenever one is present, then tab; anything else falls back
/// to comma.
pub fn detect_delimiter(line: &str) -> Delimiter {
    if line.contains(',') {
        Delimiter::Comma
    } else if line.contains('\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}
