//! Either-a-leaf-or-a-group references.

use super::entity_id::{GroupId, RepoId, UserId};

/// A repo header token: one repo, or a whole repo group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoOrGroup {
    Repo(RepoId),
    Group(GroupId),
}

/// A rule target: one user, or a whole user group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOrGroup {
    User(UserId),
    Group(GroupId),
}

impl RepoOrGroup {
    pub fn group(self) -> Option<GroupId> {
        match self {
            RepoOrGroup::Group(id) => Some(id),
            RepoOrGroup::Repo(_) => None,
        }
    }
}

impl UserOrGroup {
    pub fn group(self) -> Option<GroupId> {
        match self {
            UserOrGroup::Group(id) => Some(id),
            UserOrGroup::User(_) => None,
        }
    }
}
