//! Group kinds.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What a group collects. Fixed at most once, from `Undefined` to one of the others.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Undefined,
    Repos,
    Users,
}

impl Kind {
    pub fn is_defined(self) -> bool {
        self != Kind::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use yare::parameterized;

    #[parameterized(
        undefined = { Kind::Undefined, "undefined" },
        repos = { Kind::Repos, "repos" },
        users = { Kind::Users, "users" },
    )]
    fn test_kind_string_forms(kind: Kind, text: &str) {
        assert_eq!(kind.to_string(), text);
        assert_eq!(kind.as_ref(), text);
        assert_eq!(Kind::from_str(text).unwrap(), kind);
        assert_eq!(serde_json::to_value(kind).unwrap(), serde_json::json!(text));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Kind::from_str("teams").is_err());
    }

    #[test]
    fn test_default_is_undefined() {
        assert_eq!(Kind::default(), Kind::Undefined);
        assert!(!Kind::default().is_defined());
        assert!(Kind::Users.is_defined());
    }
}
