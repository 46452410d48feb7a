//! Three-valued truth

use std::fmt;

use serde::Serialize;

/// Kleene truth value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Truth {
    True,
    False,
    /// Not determinable from the answers given so far
    Unknown,
}

impl Truth {
    /// Conjunction over an iterator: any False wins, then any Unknown.
    ///
    /// Short-circuits on the first False.
    pub fn all<I: IntoIterator<Item = Truth>>(iter: I) -> Truth {
        let mut result = Truth::True;
        for truth in iter {
            match truth {
                Truth::False => return Truth::False,
                Truth::Unknown => result = Truth::Unknown,
                Truth::True => {}
            }
        }
        result
    }

    /// Disjunction over an iterator: any True wins, then any Unknown.
    ///
    /// Short-circuits on the first True.
    pub fn any<I: IntoIterator<Item = Truth>>(iter: I) -> Truth {
        let mut result = Truth::False;
        for truth in iter {
            match truth {
                Truth::True => return Truth::True,
                Truth::Unknown => result = Truth::Unknown,
                Truth::False => {}
            }
        }
        result
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Truth::Unknown)
    }

    /// The boolean value, if decided
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Truth::True => Some(true),
            Truth::False => Some(false),
            Truth::Unknown => None,
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => write!(f, "TRUE"),
            Truth::False => write!(f, "FALSE"),
            Truth::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_table() {
        assert_eq!(Truth::all([Truth::True, Truth::True]), Truth::True);
        assert_eq!(Truth::all([Truth::True, Truth::Unknown]), Truth::Unknown);
        assert_eq!(Truth::all([Truth::Unknown, Truth::False]), Truth::False);
        assert_eq!(Truth::all(std::iter::empty()), Truth::True);
    }

    #[test]
    fn test_any_table() {
        assert_eq!(Truth::any([Truth::False, Truth::False]), Truth::False);
        assert_eq!(Truth::any([Truth::False, Truth::Unknown]), Truth::Unknown);
        assert_eq!(Truth::any([Truth::Unknown, Truth::True]), Truth::True);
        assert_eq!(Truth::any(std::iter::empty()), Truth::False);
    }

    #[test]
    fn test_decided() {
        assert!(Truth::True.is_decided());
        assert!(Truth::False.is_decided());
        assert!(!Truth::Unknown.is_decided());
        assert_eq!(Truth::from(true).as_bool(), Some(true));
        assert_eq!(Truth::Unknown.as_bool(), None);
    }
}
