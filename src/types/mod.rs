//! Entity types of the configuration graph.
//!
//! Every entity is owned by a `Model` and addressed by a typed `EntityId`.
//! Names keep their written form: groups are always `@`-prefixed, repos and
//! users never are.

mod comment;
mod config;
mod entity_id;
mod group;
mod kind;
mod members;
mod project;
mod user;

pub use comment::Comment;
pub use config::{Config, Description, Rule, VREF_NAME, VREF_SUBCONF_PREFIX};
pub use entity_id::{
    ConfigId, ConfigMarker, EntityId, GroupId, GroupMarker, RepoId, RepoMarker, UserId, UserMarker,
};
pub use group::{ALL, Group, Origin};
pub use kind::Kind;
pub use members::{RepoOrGroup, UserOrGroup};
pub use project::{Project, ProjectDiagnostic};
pub use user::{Repo, User};
