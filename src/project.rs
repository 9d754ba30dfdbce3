//! Project inference over the admin config.
//!
//! A project is written as three consecutive rules of the `gitolite-admin`
//! config, all granted to the same admins:
//!
//! ```text
//! RW                            = admins...
//! RW   VREF/NAME/conf/subs/NAME = admins...
//! -    VREF/NAME/               = admins...
//! ```
//!
//! It is confirmed when a subconf file named `NAME` was matched and `@NAME`
//! is a repo group. Broken patterns never fail: they produce diagnostics.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ProjectError, ResolutionError, StructuralError};
use crate::grammar::is_group_name;
use crate::model::{Element, Model};
use crate::subconf::subconf_basename;
use crate::types::{
    Comment, ConfigId, GroupId, Kind, Project, ProjectDiagnostic, RepoOrGroup, Rule, VREF_NAME,
    VREF_SUBCONF_PREFIX,
};
use crate::validate::ADMIN_REPO;

/// Subconf files matched by the caller's file walker: relative path to parsed model.
pub type SubconfMatches = BTreeMap<String, Model>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub projects: Vec<Project>,
    pub diagnostics: Vec<ProjectDiagnostic>,
}

impl ProjectReport {
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name() == name)
    }
}

/// The shape of one admin rule, as far as the pattern cares.
struct AdminRule {
    access: String,
    param: String,
    admins: Vec<String>,
}

#[derive(Debug)]
struct Candidate {
    name: String,
    admins: Vec<String>,
}

fn same_admins(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().collect::<HashSet<_>>() == b.iter().collect::<HashSet<_>>()
}

struct Inference<'m> {
    model: &'m mut Model,
    subconfs: &'m SubconfMatches,
    report: ProjectReport,
}

impl Inference<'_> {
    fn discard(&mut self, diagnostic: ProjectDiagnostic) {
        warn!(event = "Project", phase = "Discarded", reason = %diagnostic);
        self.report.diagnostics.push(diagnostic);
    }

    fn scan(&mut self, rules: Vec<AdminRule>) {
        let mut candidate: Option<Candidate> = None;
        for rule in rules {
            if rule.access == "RW" && rule.param.is_empty() {
                candidate = Some(Candidate {
                    name: String::new(),
                    admins: rule.admins,
                });
                continue;
            }
            if rule.access == "RW" {
                if let Some(name) = rule.param.strip_prefix(VREF_SUBCONF_PREFIX) {
                    match candidate.take() {
                        None => self.discard(ProjectDiagnostic::NoCandidate { name: name.to_string() }),
                        Some(open) if !same_admins(&open.admins, &rule.admins) => {
                            self.discard(ProjectDiagnostic::AdminMismatch {
                                name: name.to_string(),
                                access: rule.access.clone(),
                                expected: open.admins,
                                found: rule.admins,
                            });
                        }
                        Some(mut open) => {
                            open.name = name.to_string();
                            candidate = Some(open);
                        }
                    }
                    continue;
                }
            }
            if rule.access == "-" && rule.param == VREF_NAME {
                if let Some(open) = candidate.take() {
                    self.close(open, rule);
                }
                continue;
            }
            candidate = None;
        }
    }

    fn close(&mut self, candidate: Candidate, rule: AdminRule) {
        if candidate.name.is_empty() {
            return self.discard(ProjectDiagnostic::NoName);
        }
        if !same_admins(&candidate.admins, &rule.admins) {
            return self.discard(ProjectDiagnostic::AdminMismatch {
                name: candidate.name,
                access: rule.access,
                expected: candidate.admins,
                found: rule.admins,
            });
        }
        let has_subconf = self
            .subconfs
            .keys()
            .any(|path| subconf_basename(path) == candidate.name);
        if !has_subconf {
            return self.discard(ProjectDiagnostic::NoSubconf { name: candidate.name });
        }
        let group = match self.repo_group(&candidate.name) {
            Ok(group) => group,
            Err(diagnostic) => return self.discard(diagnostic),
        };

        let members = self.read_members(group, &candidate.admins);
        let project = Project {
            name: candidate.name,
            admins: candidate.admins,
            members,
        };
        info!(
            event = "Project",
            phase = "Confirmed",
            project = %project.name,
            admins = ?project.admins,
            members = ?project.members
        );
        self.report.projects.push(project);
    }

    fn repo_group(&mut self, name: &str) -> Result<GroupId, ProjectDiagnostic> {
        if !is_group_name(name) {
            return Err(ProjectDiagnostic::NoRepoGroup { name: name.to_string() });
        }
        self.model
            .resolve_group_ref(&format!("@{name}"), Kind::Repos, false)
            .map_err(|e| match e {
                ResolutionError::KindConflict { .. } => ProjectDiagnostic::NotRepoGroup {
                    name: name.to_string(),
                },
                _ => ProjectDiagnostic::NoRepoGroup { name: name.to_string() },
            })
    }

    /// Users reading any repo of the group, admins excluded.
    fn read_members(&self, group: GroupId, admins: &[String]) -> Vec<String> {
        let model = &*self.model;
        let mut members: Vec<String> = Vec::new();
        for repo in model.flatten_repos(RepoOrGroup::Group(group)) {
            let name = model.get_repo(repo).name();
            for rule in model.rules_for_repo(name) {
                if !rule.grants_read() {
                    continue;
                }
                for principal in model.principal_names(rule.targets()) {
                    if !admins.contains(&principal) && !members.contains(&principal) {
                        members.push(principal);
                    }
                }
            }
        }
        members
    }
}

/// Recognize projects in the admin config(s) of `model`.
///
/// Confirming a project fixes `@name` as a repo group, hence `&mut`.
pub fn infer_projects(model: &mut Model, subconfs: &SubconfMatches) -> ProjectReport {
    let rules: Vec<Vec<AdminRule>> = model
        .configs_for_repo(ADMIN_REPO)
        .into_iter()
        .map(|config| {
            config
                .rules()
                .iter()
                .map(|rule| AdminRule {
                    access: rule.access().to_string(),
                    param: rule.param().to_string(),
                    admins: model.principal_names(rule.targets()),
                })
                .collect()
        })
        .collect();

    let mut inference = Inference {
        model,
        subconfs,
        report: ProjectReport::default(),
    };
    for config_rules in rules {
        inference.scan(config_rules);
    }
    inference.report
}

impl Model {
    pub fn projects(&mut self, subconfs: &SubconfMatches) -> ProjectReport {
        infer_projects(self, subconfs)
    }

    fn admin_config(&self) -> Result<ConfigId, StructuralError> {
        match self.config_ids_for_repo(ADMIN_REPO).as_slice() {
            [id] => Ok(*id),
            _ => Err(StructuralError::AdminConfigCount),
        }
    }

    /// Declare `@name = repos...` and append the project pattern for `admins`
    /// to the admin config. The model is left untouched when this fails.
    pub fn add_project(&mut self, name: &str, admins: &[&str], repos: &[&str]) -> Result<(), ProjectError> {
        if !is_group_name(name) {
            return Err(ProjectError::InvalidName(name.to_string()));
        }
        if admins.is_empty() {
            return Err(ProjectError::Empty("admin"));
        }
        if repos.is_empty() {
            return Err(ProjectError::Empty("repo"));
        }
        let config = self.admin_config()?;
        let group = format!("@{name}");
        let named = self
            .get_config(config)
            .rules()
            .iter()
            .any(|rule| rule.subconf_name() == Some(name));
        if named || self.lookup_group(&group).is_some() {
            return Err(ProjectError::AlreadyExists(name.to_string()));
        }

        let before = self.clone();
        let result = self.write_project(config, name, &group, admins, repos);
        if result.is_err() {
            *self = before;
        }
        result
    }

    fn write_project(
        &mut self,
        config: ConfigId,
        name: &str,
        group: &str,
        admins: &[&str],
        repos: &[&str],
    ) -> Result<(), ProjectError> {
        let id = self.declare_group(
            group,
            repos.iter().map(|r| r.to_string()).collect(),
            Comment::from_lines([format!("# project '{name}'")]),
        )?;
        self.fix_kind(id, Kind::Repos)?;

        // Keep the declaration ahead of the admin config that names it.
        if let Some(at) = self.elements.iter().position(|e| *e == Element::Config(config)) {
            if let Some(declared) = self.elements.pop() {
                self.elements.insert(at, declared);
            }
        }

        let pattern = [
            Rule::new("RW", "", Comment::new()),
            Rule::new("RW", format!("{VREF_SUBCONF_PREFIX}{name}"), Comment::new()),
            Rule::new("-", VREF_NAME, Comment::new()),
        ];
        for rule in pattern {
            self.add_rule(config, rule, admins)?;
        }
        info!(event = "Project", phase = "Added", project = %name, admins = ?admins, repos = ?repos);
        Ok(())
    }
}
