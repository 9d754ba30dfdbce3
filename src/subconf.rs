//! Subconf include patterns.
//!
//! A `subconf "<glob>"` line names sibling files contributing further configs.
//! The glob is compiled into an unanchored regex with every `*` rewritten to
//! `.*`; nothing else is escaped. Walking the filesystem is left to the caller,
//! which matches relative paths against the compiled set.

use regex::Regex;

/// Compiled include pattern
#[derive(Debug, Clone)]
pub struct SubconfPattern {
    glob: String,
    regex: Regex,
}

impl SubconfPattern {
    /// The glob as written in the directive.
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// The compiled pattern text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Ordered set of include patterns, deduplicated by compiled pattern text.
#[derive(Debug, Clone, Default)]
pub struct SubconfPatterns {
    patterns: Vec<SubconfPattern>,
}

impl SubconfPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a glob. Returns false when an identical pattern is
    /// already registered.
    pub fn add(&mut self, glob: &str) -> Result<bool, regex::Error> {
        let regex = Regex::new(&glob.replace('*', ".*"))?;
        if self.patterns.iter().any(|p| p.as_str() == regex.as_str()) {
            return Ok(false);
        }
        self.patterns.push(SubconfPattern {
            glob: glob.to_string(),
            regex,
        });
        Ok(true)
    }

    /// Check if a path matches any pattern
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(path))
    }

    /// First pattern matching a path, as compiled text.
    pub fn find_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(path))
            .map(SubconfPattern::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubconfPattern> {
        self.patterns.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

impl<'a> IntoIterator for &'a SubconfPatterns {
    type Item = &'a SubconfPattern;
    type IntoIter = std::slice::Iter<'a, SubconfPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// File name of a subconf path without directories or extension:
/// `conf/subs/proj.conf` gives `proj`.
pub fn subconf_basename(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}
