use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Malformed pointer expression '{text}': {reason}")]
    MalformedExpression { text: String, reason: String },

    #[error("Malformed pointer list entry on line {line}: {source}")]
    MalformedListEntry {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        Error::MalformedExpression {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from a pointer expression that could not be parsed
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedExpression { .. } | Error::MalformedListEntry { .. }
        )
    }

    /// The expression text that failed to parse
    pub fn text(&self) -> &str {
        match self {
            Error::MalformedExpression { text, .. } => text,
            Error::MalformedListEntry { source, .. } => source.text(),
        }
    }
}
