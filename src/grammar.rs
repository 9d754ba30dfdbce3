//! Line shapes of the configuration language.
//!
//! Every function takes one line with surrounding whitespace already removed.

use once_cell::sync::Lazy;
use regex::Regex;

const TOKENS: &str = r"@?[a-zA-Z0-9._-]+(?:\s+@?[a-zA-Z0-9._-]+)*";

static SUBCONF_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^subconf\s+"(.+)"$"#).expect("subconf pattern is valid"));

static DECLARATION_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:@|repo\s)").expect("declaration pattern is valid"));

static GROUP_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(@[a-zA-Z0-9_-]+)\s*=\s*({TOKENS})\s*(#.*)?$"))
        .expect("group pattern is valid")
});

static REPO_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^repo\s+({TOKENS})\s*(#.*)?$")).expect("repo pattern is valid")
});

static DESC_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^desc\s*=\s*(\S.*)$").expect("desc pattern is valid"));

static RULE_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([^@=#]+?)\s*=\s*({TOKENS})\s*(#.*)?$")).expect("rule pattern is valid")
});

static ACCESS_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([RW+-]+)(?:\s+([a-zA-Z0-9_./-]+))?$").expect("access pattern is valid")
});

static GROUP_NAME_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("name pattern is valid"));

/// Blank, or starting with `#`.
pub(crate) fn is_comment_or_blank(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// A `subconf` directive: `Some(Ok(glob))` when well formed, `Some(Err(()))`
/// for any other line starting with `subconf`.
pub(crate) fn subconf(line: &str) -> Option<Result<&str, ()>> {
    if !line.starts_with("subconf") {
        return None;
    }
    Some(
        SUBCONF_RX
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(()),
    )
}

/// Starts a group (`@...`) or a repo header (`repo ...`).
pub(crate) fn starts_declaration(line: &str) -> bool {
    DECLARATION_RX.is_match(line)
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct GroupLine<'a> {
    pub name: &'a str,
    pub members: Vec<&'a str>,
    pub comment: Option<&'a str>,
}

pub(crate) fn group_decl(line: &str) -> Option<GroupLine<'_>> {
    let caps = GROUP_RX.captures(line)?;
    Some(GroupLine {
        name: caps.get(1)?.as_str(),
        members: caps.get(2)?.as_str().split_whitespace().collect(),
        comment: caps.get(3).map(|m| m.as_str()),
    })
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RepoLine<'a> {
    pub tokens: Vec<&'a str>,
    pub comment: Option<&'a str>,
}

pub(crate) fn repo_decl(line: &str) -> Option<RepoLine<'_>> {
    let caps = REPO_RX.captures(line)?;
    Some(RepoLine {
        tokens: caps.get(1)?.as_str().split_whitespace().collect(),
        comment: caps.get(2).map(|m| m.as_str()),
    })
}

/// The text of a `desc = ...` line.
pub(crate) fn desc(line: &str) -> Option<&str> {
    DESC_RX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RuleLine<'a> {
    pub access: &'a str,
    pub param: &'a str,
    pub targets: Vec<&'a str>,
    pub comment: Option<&'a str>,
}

/// An access rule. `Some(Err(prefix))` when the line has the shape
/// `... = targets` but the part before `=` is not `ACCESS [PARAM]`.
pub(crate) fn rule(line: &str) -> Option<Result<RuleLine<'_>, &str>> {
    let caps = RULE_RX.captures(line)?;
    let prefix = caps.get(1)?.as_str().trim();
    let targets = caps.get(2)?.as_str().split_whitespace().collect();
    let comment = caps.get(3).map(|m| m.as_str());
    let Some(access) = ACCESS_RX.captures(prefix) else {
        return Some(Err(prefix));
    };
    Some(Ok(RuleLine {
        access: access.get(1)?.as_str(),
        param: access.get(2).map_or("", |m| m.as_str()),
        targets,
        comment,
    }))
}

/// A bare identifier usable after `@`.
pub(crate) fn is_group_name(name: &str) -> bool {
    GROUP_NAME_RX.is_match(name)
}
