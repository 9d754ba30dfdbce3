//! Canonical text rendering of a `Model`.
//!
//! Elements come out in declaration order, each preceded by its comment
//! lines, followed by the model's trailing comment. Inside a config, access
//! and parameter columns are padded to the widest of that config so rules
//! line up:
//!
//! ```text
//! repo gitolite-admin
//!     desc  = admin repo
//!     RW+             = admin
//!     RW   VREF/NAME/ = @devs
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;

use crate::model::{Element, Model};
use crate::types::{Comment, Config, Group};

const INDENT: &str = "    ";
const MIN_ACCESS_WIDTH: usize = 4;

/// Borrowing view rendering a model in canonical form.
pub struct Printer<'m> {
    model: &'m Model,
}

impl<'m> Printer<'m> {
    pub fn new(model: &'m Model) -> Self {
        Printer { model }
    }

    fn group(&self, f: &mut Formatter<'_>, group: &Group) -> FmtResult {
        write_comment_lines(f, group.comment(), "")?;
        writeln!(
            f,
            "{} = {}{}",
            group.name(),
            group.members().iter().join(" "),
            same_line(group.comment())
        )
    }

    fn config(&self, f: &mut Formatter<'_>, config: &Config) -> FmtResult {
        write_comment_lines(f, config.comment(), "")?;
        writeln!(
            f,
            "repo {}{}",
            config
                .repos()
                .iter()
                .map(|r| self.model.repo_or_group_name(*r))
                .join(" "),
            same_line(config.comment())
        )?;

        let aw = config
            .rules()
            .iter()
            .map(|r| r.access().len())
            .fold(MIN_ACCESS_WIDTH, usize::max)
            + 1;
        let pw = config
            .rules()
            .iter()
            .map(|r| r.param().len())
            .max()
            .unwrap_or(0);

        if let Some(desc) = config.desc() {
            write_comment_lines(f, desc.comment(), INDENT)?;
            writeln!(f, "{INDENT}{:<aw$} = {}", "desc", desc.text())?;
        }
        for rule in config.rules() {
            write_comment_lines(f, rule.comment(), INDENT)?;
            writeln!(
                f,
                "{INDENT}{:<aw$}{:<pw$} = {}{}",
                rule.access(),
                rule.param(),
                rule.targets()
                    .iter()
                    .map(|t| self.model.user_or_group_name(*t))
                    .join(" "),
                same_line(rule.comment())
            )?;
        }
        Ok(())
    }
}

impl Display for Printer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for element in self.model.elements() {
            match *element {
                Element::Group(id) => self.group(f, self.model.get_group(id))?,
                Element::Config(id) => self.config(f, self.model.get_config(id))?,
            }
        }
        write_comment_lines(f, self.model.trailing_comment(), "")
    }
}

fn write_comment_lines(f: &mut Formatter<'_>, comment: &Comment, indent: &str) -> FmtResult {
    for line in comment.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{line}")?;
        }
    }
    Ok(())
}

fn same_line(comment: &Comment) -> String {
    comment
        .same_line()
        .map(|text| format!(" {text}"))
        .unwrap_or_default()
}

impl Model {
    /// The canonical text of this model.
    pub fn print(&self) -> String {
        Printer::new(self).to_string()
    }
}
