//! Leaf entities: users and repos.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// A user named in a rule or in a user group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct User {
    name: String,
}

impl User {
    pub fn new<T: Into<String>>(name: T) -> Self {
        User { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "user '{}'", self.name)
    }
}

/// A repository named in a repo header or in a repo group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Repo {
    name: String,
}

impl Repo {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Repo { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Repo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "repo '{}'", self.name)
    }
}
