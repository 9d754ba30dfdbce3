//! Typed arena indices for entities owned by a `Model`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::marker::PhantomData;

/// Marker type for Groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupMarker {}

/// Marker type for Repos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepoMarker {}

/// Marker type for Users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserMarker {}

/// Marker type for Configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigMarker {}

/// An index into one of the model's arenas, with zero runtime cost over `usize`.
///
/// Ids are only meaningful for the `Model` that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> EntityId<T> {
    pub(crate) fn new(index: usize) -> Self {
        EntityId {
            index,
            _marker: PhantomData,
        }
    }

    /// Position in the owning arena.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Display for EntityId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.index)
    }
}

/// A Group's arena id.
pub type GroupId = EntityId<GroupMarker>;

/// A Repo's arena id.
pub type RepoId = EntityId<RepoMarker>;

/// A User's arena id.
pub type UserId = EntityId<UserMarker>;

/// A Config's arena id.
pub type ConfigId = EntityId<ConfigMarker>;
