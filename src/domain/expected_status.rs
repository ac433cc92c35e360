use serde::{Deserialize, Serialize};
use std::fmt;

const PERMANENT_CODES: [u16; 2] = [301, 308];
const TEMPORARY_CODES: [u16; 2] = [302, 307];

/// The HTTP status code(s) a redirect is allowed to answer with.
///
/// Serialized as a bare integer (`301`) or as an array of acceptable
/// codes (`[301, 308]`), so both shapes can appear in a redirect list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedStatus {
    Code(u16),
    AnyOf(Vec<u16>),
}

impl ExpectedStatus {
    /// Expands a `permanent` flag into the codes a server may legitimately use.
    ///
    /// # Examples
    ///
    /// ```
    /// use redirect_checker::domain::ExpectedStatus;
    ///
    /// let status = ExpectedStatus::from_permanent(true);
    /// assert!(status.accepts(301));
    /// assert!(status.accepts(308));
    /// assert!(!status.accepts(302));
    /// ```
    pub fn from_permanent(permanent: bool) -> Self {
        if permanent {
            Self::AnyOf(PERMANENT_CODES.to_vec())
        } else {
            Self::AnyOf(TEMPORARY_CODES.to_vec())
        }
    }

    pub fn codes(&self) -> &[u16] {
        match self {
            Self::Code(code) => std::slice::from_ref(code),
            Self::AnyOf(codes) => codes,
        }
    }

    pub fn accepts(&self, code: u16) -> bool {
        self.codes().contains(&code)
    }
}

impl From<u16> for ExpectedStatus {
    fn from(code: u16) -> Self {
        Self::Code(code)
    }
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::AnyOf(codes) => {
                let codes: Vec<String> = codes.iter().map(u16::to_string).collect();
                write!(f, "[{}]", codes.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_code_accepts_only_itself() {
        let status = ExpectedStatus::Code(301);
        assert!(status.accepts(301));
        assert!(!status.accepts(308));
        assert_eq!(status.codes(), &[301]);
    }

    #[test]
    fn temporary_flag_expands_to_302_and_307() {
        let status = ExpectedStatus::from_permanent(false);
        assert_eq!(status.codes(), &[302, 307]);
        assert!(!status.accepts(301));
    }

    #[test]
    fn deserializes_integer_and_array() {
        let single: ExpectedStatus = serde_json::from_str("302").unwrap();
        assert_eq!(single, ExpectedStatus::Code(302));

        let set: ExpectedStatus = serde_json::from_str("[301, 308]").unwrap();
        assert_eq!(set, ExpectedStatus::AnyOf(vec![301, 308]));
    }

    #[test]
    fn display_matches_json_shape() {
        assert_eq!(ExpectedStatus::Code(301).to_string(), "301");
        assert_eq!(ExpectedStatus::from_permanent(true).to_string(), "[301, 308]");
    }
}
