//! Projects recognized in the admin config, and why candidates were dropped.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::Serialize;

/// A confirmed project: its admins, its repo group `@name`, and the users
/// granted read access to the repos of that group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub(crate) name: String,
    pub(crate) admins: Vec<String>,
    pub(crate) members: Vec<String>,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn admins(&self) -> &[String] {
        &self.admins
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// The repo group carrying the project's repos.
    pub fn group_name(&self) -> String {
        format!("@{}", self.name)
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "project {}, admins: {}, members: {}",
            self.name,
            self.admins.iter().join(", "),
            self.members.iter().join(", ")
        )
    }
}

/// Why a candidate project was discarded. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ProjectDiagnostic {
    /// A `VREF/NAME/conf/subs/<name>` rule without an open naked `RW` rule.
    NoCandidate { name: String },
    /// The admins of a pattern rule differ from the candidate's.
    AdminMismatch {
        name: String,
        access: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// The closing rule came before any naming rule.
    NoName,
    /// No matched subconf file is named after the project.
    NoSubconf { name: String },
    /// `@name` is not declared.
    NoRepoGroup { name: String },
    /// `@name` exists but collects users.
    NotRepoGroup { name: String },
}

impl Display for ProjectDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ProjectDiagnostic::NoCandidate { name } => {
                write!(f, "Ignore project name '{name}': no RW rule before")
            }
            ProjectDiagnostic::AdminMismatch {
                name,
                access,
                expected,
                found,
            } => write!(
                f,
                "Ignore project name '{name}': admin mismatch on '{access}' ({} vs. {})",
                expected.iter().join(", "),
                found.iter().join(", ")
            ),
            ProjectDiagnostic::NoName => write!(f, "Ignore project with no name"),
            ProjectDiagnostic::NoSubconf { name } => {
                write!(f, "Ignore project name '{name}': no subconf found")
            }
            ProjectDiagnostic::NoRepoGroup { name } => {
                write!(f, "Ignore project name '{name}': no repo group '@{name}'")
            }
            ProjectDiagnostic::NotRepoGroup { name } => {
                write!(f, "Ignore project name '{name}': '@{name}' is a users group")
            }
        }
    }
}
