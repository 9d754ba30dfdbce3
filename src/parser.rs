//! The line state machine building a `Model`.
//!
//! ```text
//! SkipCommentsAndBlank -> DeclExpected -> GroupDecl -> SkipCommentsAndBlank
//!                                      -> RepoDecl  -> RuleBlock -> SkipCommentsAndBlank
//! ```
//!
//! Lines are fed one at a time. A state that does not recognize a line may
//! hand it on to the next state, so every line is consumed exactly once.
//! Parsing stops at the first error; the partially built model stays
//! reachable through [`Parser::model`].

use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ConfError, Duplicated, LineRef};
use crate::grammar::{self, RuleLine};
use crate::model::Model;
use crate::options::ParserOptions;
use crate::types::{Comment, ConfigId, Kind, Rule, VREF_SUBCONF_PREFIX};
use crate::validate::validate_admin_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipCommentsAndBlank,
    DeclExpected,
    GroupDecl,
    RepoDecl,
    RuleBlock(ConfigId),
}

/// Parse context for one file: the model being built, the comment lines
/// waiting for the next element, and the line cursor.
#[derive(Debug)]
pub struct Parser {
    model: Model,
    options: ParserOptions,
    nested: bool,
    state: State,
    pending: Comment,
    line: usize,
    text: String,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Parser {
            model: Model::new(),
            options,
            nested: false,
            state: State::SkipCommentsAndBlank,
            pending: Comment::new(),
            line: 0,
            text: String::new(),
        }
    }

    /// A parser for a subconf file, resolving unknown groups through `parent`.
    pub fn nested(parent: Arc<Model>) -> Self {
        Parser {
            model: Model::with_parent(parent),
            nested: true,
            ..Parser::new(ParserOptions::lenient())
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Number of lines fed so far.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn parse_str(&mut self, text: &str) -> Result<(), ConfError> {
        for line in text.lines() {
            self.feed(line)?;
        }
        self.finish()
    }

    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<(), ConfError> {
        for line in reader.lines() {
            self.feed(&line?)?;
        }
        self.finish()
    }

    /// Consume one line.
    pub fn feed(&mut self, raw: &str) -> Result<(), ConfError> {
        self.line += 1;
        let text = raw.trim();
        self.text.clear();
        self.text.push_str(text);

        loop {
            match self.state {
                State::SkipCommentsAndBlank => {
                    if self.comment_or_subconf(text)? {
                        return Ok(());
                    }
                    self.state = State::DeclExpected;
                }
                State::DeclExpected => {
                    if !grammar::starts_declaration(text) {
                        return Err(self.grammar_error("group or repo expected"));
                    }
                    self.state = if text.starts_with('@') {
                        State::GroupDecl
                    } else {
                        State::RepoDecl
                    };
                }
                State::GroupDecl => return self.group_decl(text),
                State::RepoDecl => return self.repo_decl(text),
                State::RuleBlock(config) => {
                    if self.rule_block_line(config, text)? {
                        return Ok(());
                    }
                    self.state = State::SkipCommentsAndBlank;
                }
            }
        }
    }

    /// Close the input: keep trailing comments, then check the admin config
    /// of a top-level file.
    pub fn finish(&mut self) -> Result<(), ConfError> {
        self.model.trailing = self.pending.take();
        if self.model.is_empty() {
            return Err(ConfError::Grammar {
                at: LineRef::new(self.line.max(1), self.text.clone()),
                expected: "comment, group or repo expected".to_string(),
            });
        }
        info!(
            event = "Parse",
            phase = "Complete",
            lines = self.line,
            groups = self.model.group_count(),
            configs = self.model.config_count(),
            repos = self.model.repo_count(),
            users = self.model.user_count(),
            nested = self.nested
        );
        if !self.nested && self.options.check_admin_config {
            validate_admin_config(&self.model)?;
        }
        Ok(())
    }

    fn line_ref(&self) -> LineRef {
        LineRef::new(self.line, self.text.clone())
    }

    fn grammar_error(&self, expected: impl Into<String>) -> ConfError {
        ConfError::Grammar {
            at: self.line_ref(),
            expected: expected.into(),
        }
    }

    fn comment_or_subconf(&mut self, text: &str) -> Result<bool, ConfError> {
        if grammar::is_comment_or_blank(text) {
            self.pending.push_line(text);
            return Ok(true);
        }
        match grammar::subconf(text) {
            Some(Ok(glob)) => {
                let added = self.model.subconfs.add(glob).map_err(|e| ConfError::Subconf {
                    at: self.line_ref(),
                    reason: e.to_string(),
                })?;
                debug!(event = "Parse", phase = "Subconf", line = self.line, glob = glob, added = added);
                self.pending.push_line(text);
                Ok(true)
            }
            Some(Err(())) => Err(ConfError::Subconf {
                at: self.line_ref(),
                reason: "expected subconf \"<glob>\"".to_string(),
            }),
            None => Ok(false),
        }
    }

    fn group_decl(&mut self, text: &str) -> Result<(), ConfError> {
        let Some(decl) = grammar::group_decl(text) else {
            return Err(self.grammar_error("Incorrect group declaration"));
        };
        let mut comment = self.pending.take();
        if let Some(same_line) = decl.comment {
            comment.set_same_line(same_line);
        }
        let members = decl.members.iter().map(|m| m.to_string()).collect();
        self.model
            .declare_group(decl.name, members, comment)
            .map_err(|e| e.at(self.line_ref()))?;
        debug!(
            event = "Parse",
            phase = "Group",
            line = self.line,
            group = %decl.name,
            members = decl.members.len()
        );
        self.state = State::SkipCommentsAndBlank;
        Ok(())
    }

    fn repo_decl(&mut self, text: &str) -> Result<(), ConfError> {
        let Some(decl) = grammar::repo_decl(text) else {
            return Err(self.grammar_error("Incorrect repo declaration"));
        };
        for (i, token) in decl.tokens.iter().enumerate() {
            if decl.tokens[..i].contains(token) {
                return Err(ConfError::Duplicate {
                    at: self.line_ref(),
                    what: Duplicated::RepoToken,
                    name: token.to_string(),
                });
            }
        }
        let mut comment = self.pending.take();
        if let Some(same_line) = decl.comment {
            comment.set_same_line(same_line);
        }
        let config = self
            .model
            .add_config(&decl.tokens, comment)
            .map_err(|e| e.at(self.line_ref()))?;
        debug!(
            event = "Parse",
            phase = "Repo",
            line = self.line,
            config = %config,
            repos = ?decl.tokens
        );
        self.state = State::RuleBlock(config);
        Ok(())
    }

    /// True when the line belongs to the rule block.
    fn rule_block_line(&mut self, config: ConfigId, text: &str) -> Result<bool, ConfError> {
        if let Some(desc) = grammar::desc(text) {
            let comment = self.pending.take();
            if !self.model.config_mut(config).set_desc(desc, comment) {
                return Err(ConfError::SecondDescription { at: self.line_ref() });
            }
            debug!(event = "Parse", phase = "Desc", line = self.line, config = %config);
            return Ok(true);
        }
        if grammar::is_comment_or_blank(text) {
            self.pending.push_line(text);
            return Ok(true);
        }
        match grammar::rule(text) {
            Some(Ok(rule)) => {
                self.add_rule(config, rule)?;
                Ok(true)
            }
            Some(Err(prefix)) => Err(self.grammar_error(format!("Incorrect access rule '{prefix}'"))),
            None if self.model.get_config(config).rules().is_empty() => {
                Err(self.grammar_error("At least one access rule expected"))
            }
            None => Ok(false),
        }
    }

    fn add_rule(&mut self, config: ConfigId, line: RuleLine<'_>) -> Result<(), ConfError> {
        let mut comment = self.pending.take();
        if let Some(same_line) = line.comment {
            comment.set_same_line(same_line);
        }
        let rule = Rule::new(line.access, line.param, comment);
        self.model
            .add_rule(config, rule, &line.targets)
            .map_err(|e| e.at(self.line_ref()))?;
        debug!(
            event = "Parse",
            phase = "Rule",
            line = self.line,
            access = line.access,
            param = line.param
        );

        // A project-naming parameter also declares its repo group.
        #[allow(clippy::collapsible_if)] // https://github.com/rust-lang/rust/issues/53667
        if let Some(name) = line.param.strip_prefix(VREF_SUBCONF_PREFIX) {
            if grammar::is_group_name(name) {
                let group = format!("@{name}");
                self.model
                    .resolve_group_ref(&group, Kind::Repos, true)
                    .map_err(|e| e.at(self.line_ref()))?;
                debug!(event = "Parse", phase = "ProjectGroup", line = self.line, group = %group);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
