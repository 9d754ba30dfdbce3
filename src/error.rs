//! Parse, resolution and project errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use thiserror::Error;

use crate::types::Kind;

/// The line an error was detected on: 1-based number and trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRef {
    pub number: usize,
    pub text: String,
}

impl LineRef {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        LineRef {
            number,
            text: text.into(),
        }
    }
}

impl Display for LineRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "line {} ('{}')", self.number, self.text)
    }
}

/// What a `ConfError::Duplicate` was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Duplicated {
    GroupName,
    GroupMember,
    RepoToken,
}

impl Display for Duplicated {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Duplicated::GroupName => write!(f, "group name"),
            Duplicated::GroupMember => write!(f, "group element name"),
            Duplicated::RepoToken => write!(f, "repo element name"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("Parse Error: {expected} at {at}")]
    Grammar { at: LineRef, expected: String },

    #[error("Parse Error: Duplicate {what} '{name}' at {at}")]
    Duplicate {
        at: LineRef,
        what: Duplicated,
        name: String,
    },

    #[error("Parse Error: group '{group}' is a {existing} group, not a {requested} one, at {at}")]
    KindConflict {
        at: LineRef,
        group: String,
        existing: Kind,
        requested: Kind,
    },

    #[error("Parse Error: repo group name '{name}' undefined at {at}")]
    UndefinedReference { at: LineRef, name: String },

    #[error("Parse Error: No more than one desc per config, {at}")]
    SecondDescription { at: LineRef },

    #[error("Parse Error: Invalid subconf at {at}: {reason}")]
    Subconf { at: LineRef, reason: String },

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfError {
    /// The offending line, for every error detected while reading lines.
    pub fn line(&self) -> Option<&LineRef> {
        match self {
            ConfError::Grammar { at, .. }
            | ConfError::Duplicate { at, .. }
            | ConfError::KindConflict { at, .. }
            | ConfError::UndefinedReference { at, .. }
            | ConfError::SecondDescription { at }
            | ConfError::Subconf { at, .. } => Some(at),
            ConfError::Structural(_) | ConfError::Io(_) => None,
        }
    }
}

/// Whole-file invariants of the root admin configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum StructuralError {
    #[error("There must be one and only gitolite-admin repo config")]
    AdminConfigCount,

    #[error("There must be at least one rule for gitolite-admin repo config")]
    AdminConfigWithoutRules,

    #[error(
        "First rule for gitolite-admin repo config must be 'RW+', empty param, instead of '{access}'-'{param}'"
    )]
    FirstAdminRule { access: String, param: String },

    #[error("First rule for gitolite-admin repo config must have at least one user or group of users")]
    FirstAdminRuleWithoutTargets,
}

/// A name-resolution failure raised by the model, before it is tied to a line.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum ResolutionError {
    #[error("group '{group}' is a {existing} group, not a {requested} one")]
    KindConflict {
        group: String,
        existing: Kind,
        requested: Kind,
    },

    #[error("Duplicate group name '{0}'")]
    DuplicateGroup(String),

    #[error("Duplicate group element name '{0}'")]
    DuplicateMember(String),

    #[error("repo group name '{0}' undefined")]
    UndefinedGroup(String),

    #[error("group name '{0}' is reserved")]
    ReservedGroup(String),
}

impl ResolutionError {
    pub fn at(self, at: LineRef) -> ConfError {
        match self {
            ResolutionError::KindConflict {
                group,
                existing,
                requested,
            } => ConfError::KindConflict {
                at,
                group,
                existing,
                requested,
            },
            ResolutionError::DuplicateGroup(name) => ConfError::Duplicate {
                at,
                what: Duplicated::GroupName,
                name,
            },
            ResolutionError::DuplicateMember(name) => ConfError::Duplicate {
                at,
                what: Duplicated::GroupMember,
                name,
            },
            ResolutionError::UndefinedGroup(name) => ConfError::UndefinedReference { at, name },
            ResolutionError::ReservedGroup(name) => ConfError::Grammar {
                at,
                expected: format!("group name other than reserved '{name}'"),
            },
        }
    }
}

/// Failure to add a project to a model programmatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("project '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid project name '{0}'")]
    InvalidName(String),

    #[error("a project needs at least one {0}")]
    Empty(&'static str),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}
