//! Group entities.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use super::comment::Comment;
use super::kind::Kind;
use super::members::{RepoOrGroup, UserOrGroup};

/// The reserved group name every repo header and rule may use without declaring it.
pub const ALL: &str = "@all";

/// How a group came to exist in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Written as `@name = ...` in this model.
    Declared,
    /// Created by a reference before (or without) any declaration.
    Placeholder,
    /// A local view of a group declared in a parent model.
    Inherited,
    /// The synthesized `@all`.
    Reserved,
}

/// A named collection of either repos or users.
///
/// `members` keeps the tokens as written; the typed lists are filled once the
/// kind is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) members: Vec<String>,
    pub(crate) kind: Kind,
    pub(crate) origin: Origin,
    pub(crate) repos: Vec<RepoOrGroup>,
    pub(crate) users: Vec<UserOrGroup>,
    pub(crate) comment: Comment,
}

impl Group {
    pub(crate) fn new(name: impl Into<String>, origin: Origin) -> Self {
        Group {
            name: name.into(),
            members: Vec::new(),
            kind: Kind::Undefined,
            origin,
            repos: Vec::new(),
            users: Vec::new(),
            comment: Comment::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member tokens in declaration order, as written.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// Resolved members of a repo group; empty for any other kind.
    pub fn repos(&self) -> &[RepoOrGroup] {
        &self.repos
    }

    /// Resolved members of a user group; empty for any other kind.
    pub fn users(&self) -> &[UserOrGroup] {
        &self.users
    }

    pub fn is_declared(&self) -> bool {
        self.origin == Origin::Declared
    }

    /// Declared groups, and inherited ones, already carry their members.
    pub(crate) fn has_members(&self) -> bool {
        !self.members.is_empty()
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "group '{}' ({}): {}", self.name, self.kind, self.members.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group_is_undefined_and_empty() {
        let group = Group::new("@devs", Origin::Placeholder);
        assert_eq!(group.name(), "@devs");
        assert_eq!(group.kind(), Kind::Undefined);
        assert!(!group.has_members());
        assert!(!group.is_declared());
        assert!(group.repos().is_empty());
        assert!(group.users().is_empty());
    }

    #[test]
    fn test_group_display() {
        let mut group = Group::new("@devs", Origin::Declared);
        group.members = vec!["alice".into(), "bob".into()];
        group.kind = Kind::Users;
        assert_eq!(group.to_string(), "group '@devs' (users): alice, bob");
    }

    #[test]
    fn test_origin_serialization() {
        assert_eq!(
            serde_json::to_value(Origin::Inherited).unwrap(),
            serde_json::json!("inherited")
        );
    }
}
