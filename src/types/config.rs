//! Repo configuration blocks and their access rules.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::comment::Comment;
use super::members::{RepoOrGroup, UserOrGroup};

/// The access parameter that closes a project pattern.
pub const VREF_NAME: &str = "VREF/NAME/";

/// The access parameter prefix that names a project.
pub const VREF_SUBCONF_PREFIX: &str = "VREF/NAME/conf/subs/";

/// One access line: `ACCESS [PARAM] = targets...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) access: String,
    pub(crate) param: String,
    pub(crate) targets: Vec<UserOrGroup>,
    pub(crate) comment: Comment,
}

impl Rule {
    pub(crate) fn new(access: impl Into<String>, param: impl Into<String>, comment: Comment) -> Self {
        Rule {
            access: access.into(),
            param: param.into(),
            targets: Vec::new(),
            comment,
        }
    }

    /// `R`, `RW`, `RW+`, `-`, ...
    pub fn access(&self) -> &str {
        &self.access
    }

    /// Refspec or VREF path; empty when the rule has none.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Resolved users and groups, deduplicated, in written order.
    pub fn targets(&self) -> &[UserOrGroup] {
        &self.targets
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// `RW` without a parameter.
    pub fn is_naked_rw(&self) -> bool {
        self.access == "RW" && self.param.is_empty()
    }

    /// The project name carried by a `VREF/NAME/conf/subs/<name>` parameter.
    pub fn subconf_name(&self) -> Option<&str> {
        self.param.strip_prefix(VREF_SUBCONF_PREFIX)
    }

    pub fn grants_read(&self) -> bool {
        self.access.starts_with('R')
    }

    pub(crate) fn push_target(&mut self, target: UserOrGroup) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.param.is_empty() {
            write!(f, "rule '{}'", self.access)
        } else {
            write!(f, "rule '{} {}'", self.access, self.param)
        }
    }
}

/// A config's `desc = ...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub(crate) text: String,
    pub(crate) comment: Comment,
}

impl Description {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }
}

/// The block introduced by one `repo ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) repos: Vec<RepoOrGroup>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) desc: Option<Description>,
    pub(crate) comment: Comment,
}

impl Config {
    pub(crate) fn new(comment: Comment) -> Self {
        Config {
            repos: Vec::new(),
            rules: Vec::new(),
            desc: None,
            comment,
        }
    }

    /// Header tokens, resolved, in written order.
    pub fn repos(&self) -> &[RepoOrGroup] {
        &self.repos
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn desc(&self) -> Option<&Description> {
        self.desc.as_ref()
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// Sets the description; false when the config already has one.
    pub(crate) fn set_desc(&mut self, text: impl Into<String>, comment: Comment) -> bool {
        if self.desc.is_some() {
            return false;
        }
        self.desc = Some(Description {
            text: text.into(),
            comment,
        });
        true
    }
}
