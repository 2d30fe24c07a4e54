use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned integer ids. They travel as bare JSON numbers and print as the
/// number alone, so they can be dropped straight into URL paths.
macro_rules! server_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                    raw: s.trim().to_string(),
                })
            }
        }
    };
}

server_id!(
    /// Id of a quiz question.
    QuestionId
);
server_id!(
    /// Id of an answer choice.
    AnswerId
);
server_id!(
    /// Id of a user account.
    UserId
);

impl QuestionId {
    /// Recorded for a question advanced past without any selection.
    pub const UNSET: Self = Self(0);

    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

/// A typed id could not be read from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid {}", self.raw, self.kind)
    }
}

impl std::error::Error for ParseIdError {}
