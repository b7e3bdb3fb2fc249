//! Error codes for resolution diagnostics.

use std::fmt;

/// Error codes for categorizing resolution diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid annotation.
    ///
    /// A recognized annotation carries data that is not a string.
    E100,

    /// Unresolvable path.
    ///
    /// A path carries a resource's logical id but matches no classification
    /// rule.
    E101,

    /// Ambiguous logical id.
    ///
    /// Several paths carry the same logical id. The lexicographically first
    /// one that classifies is used.
    E102,

    /// Missing stack artifact.
    ///
    /// The manifest has no artifact for the stack being resolved.
    E103,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        };
        write!(f, "{code}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
    }
}
