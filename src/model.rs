//! The configuration graph.
//!
//! A `Model` owns every group, repo, user and config read from one file, in
//! arenas addressed by typed ids. Nested models (subconf files) keep an
//! `Arc` to their parent and only ever read from it: parent groups used in a
//! nested file are copied locally as `Origin::Inherited` groups.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::subconf::SubconfPatterns;
use crate::types::{
    Comment, Config, ConfigId, Group, GroupId, Kind, Origin, Repo, RepoId, RepoOrGroup, Rule,
    User, UserId, UserOrGroup,
};

/// A top-level element, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Group(GroupId),
    Config(ConfigId),
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) groups: Vec<Group>,
    pub(crate) repos: Vec<Repo>,
    pub(crate) users: Vec<User>,
    pub(crate) configs: Vec<Config>,
    pub(crate) elements: Vec<Element>,
    pub(crate) group_index: HashMap<String, GroupId>,
    pub(crate) repo_index: HashMap<String, RepoId>,
    pub(crate) user_index: HashMap<String, UserId>,
    /// Bare and `@` member tokens to the groups listing them.
    pub(crate) member_index: HashMap<String, Vec<GroupId>>,
    /// Bare names written directly in a repo header.
    pub(crate) used_as_repo: HashSet<String>,
    /// Bare names written directly as rule targets.
    pub(crate) used_as_user: HashSet<String>,
    pub(crate) all_repos: Option<GroupId>,
    pub(crate) all_users: Option<GroupId>,
    pub(crate) subconfs: SubconfPatterns,
    pub(crate) trailing: Comment,
    pub(crate) parent: Option<Arc<Model>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty model resolving unknown group names through `parent`.
    pub fn with_parent(parent: Arc<Model>) -> Self {
        Model {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn parent(&self) -> Option<&Model> {
        self.parent.as_deref()
    }

    /// No group or config has been declared.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Local groups, declared or created by use. `@all` and inherited copies are not listed.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups
            .iter()
            .filter(|g| matches!(g.origin, Origin::Declared | Origin::Placeholder))
    }

    pub fn repos(&self) -> impl Iterator<Item = &Repo> {
        self.repos.iter()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn configs(&self) -> impl Iterator<Item = &Config> {
        self.configs.iter()
    }

    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    pub fn repo_group_count(&self) -> usize {
        self.groups().filter(|g| g.kind == Kind::Repos).count()
    }

    pub fn user_group_count(&self) -> usize {
        self.groups().filter(|g| g.kind == Kind::Users).count()
    }

    pub fn repo_count(&self) -> usize {
        self.repos.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    pub fn subconf_patterns(&self) -> &SubconfPatterns {
        &self.subconfs
    }

    /// Comment and blank lines following the last element.
    pub fn trailing_comment(&self) -> &Comment {
        &self.trailing
    }

    /// A local group by name, including inherited copies.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|id| &self.groups[id.index()])
    }

    /// A group by name, falling back to the parent chain.
    pub fn lookup_group(&self, name: &str) -> Option<&Group> {
        self.group(name)
            .or_else(|| self.parent().and_then(|p| p.lookup_group(name)))
    }

    pub fn repo(&self, name: &str) -> Option<&Repo> {
        self.repo_index.get(name).map(|id| &self.repos[id.index()])
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.user_index.get(name).map(|id| &self.users[id.index()])
    }

    pub fn get_group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    pub fn get_repo(&self, id: RepoId) -> &Repo {
        &self.repos[id.index()]
    }

    pub fn get_user(&self, id: UserId) -> &User {
        &self.users[id.index()]
    }

    pub fn get_config(&self, id: ConfigId) -> &Config {
        &self.configs[id.index()]
    }

    pub fn repo_or_group_name(&self, item: RepoOrGroup) -> &str {
        match item {
            RepoOrGroup::Repo(id) => self.get_repo(id).name(),
            RepoOrGroup::Group(id) => self.get_group(id).name(),
        }
    }

    pub fn user_or_group_name(&self, item: UserOrGroup) -> &str {
        match item {
            UserOrGroup::User(id) => self.get_user(id).name(),
            UserOrGroup::Group(id) => self.get_group(id).name(),
        }
    }

    /// Transitive repos of a header token, deduplicated, in first-seen order.
    pub fn flatten_repos(&self, item: RepoOrGroup) -> Vec<RepoId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        self.collect_repos(item, &mut visited, &mut out);
        out
    }

    fn collect_repos(&self, item: RepoOrGroup, visited: &mut HashSet<GroupId>, out: &mut Vec<RepoId>) {
        match item {
            RepoOrGroup::Repo(id) => {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
            RepoOrGroup::Group(id) => {
                if visited.insert(id) {
                    for member in &self.get_group(id).repos {
                        self.collect_repos(*member, visited, out);
                    }
                }
            }
        }
    }

    /// Transitive users of a rule target, deduplicated, in first-seen order.
    pub fn flatten_users(&self, item: UserOrGroup) -> Vec<UserId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        self.collect_users(item, &mut visited, &mut out);
        out
    }

    fn collect_users(&self, item: UserOrGroup, visited: &mut HashSet<GroupId>, out: &mut Vec<UserId>) {
        match item {
            UserOrGroup::User(id) => {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
            UserOrGroup::Group(id) => {
                if visited.insert(id) {
                    for member in &self.get_group(id).users {
                        self.collect_users(*member, visited, out);
                    }
                }
            }
        }
    }

    /// Users first, else group: each target contributes its transitive user
    /// names, or its own `@name` when it resolves to no user at all.
    pub fn principal_names(&self, targets: &[UserOrGroup]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for target in targets {
            let users = self.flatten_users(*target);
            let found: Vec<&str> = if users.is_empty() {
                vec![self.user_or_group_name(*target)]
            } else {
                users.iter().map(|id| self.get_user(*id).name()).collect()
            };
            for name in found {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    fn config_covers(&self, config: &Config, repo: &str) -> bool {
        config.repos.iter().any(|item| match item {
            RepoOrGroup::Repo(id) => self.get_repo(*id).name() == repo,
            RepoOrGroup::Group(_) => self
                .flatten_repos(*item)
                .iter()
                .any(|id| self.get_repo(*id).name() == repo),
        })
    }

    /// Ids of the configs whose header names `repo`, directly or through a group.
    pub fn config_ids_for_repo(&self, repo: &str) -> Vec<ConfigId> {
        self.configs
            .iter()
            .enumerate()
            .filter(|(_, config)| self.config_covers(config, repo))
            .map(|(index, _)| ConfigId::new(index))
            .collect()
    }

    pub fn configs_for_repo(&self, repo: &str) -> Vec<&Config> {
        self.configs
            .iter()
            .filter(|config| self.config_covers(config, repo))
            .collect()
    }

    /// Every rule applying to `repo`, config by config, in written order.
    pub fn rules_for_repo(&self, repo: &str) -> Vec<&Rule> {
        self.configs_for_repo(repo)
            .into_iter()
            .flat_map(|config| config.rules.iter())
            .collect()
    }

    /// A structural projection of the model, free of comments and ids.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            groups: self
                .groups()
                .map(|g| GroupSummary {
                    name: g.name.clone(),
                    kind: g.kind,
                    members: g.members.clone(),
                })
                .collect(),
            configs: self
                .configs
                .iter()
                .map(|c| ConfigSummary {
                    repos: c
                        .repos
                        .iter()
                        .map(|r| self.repo_or_group_name(*r).to_string())
                        .collect(),
                    desc: c.desc.as_ref().map(|d| d.text.clone()),
                    rules: c
                        .rules
                        .iter()
                        .map(|r| RuleSummary {
                            access: r.access.clone(),
                            param: r.param.clone(),
                            targets: r
                                .targets
                                .iter()
                                .map(|t| self.user_or_group_name(*t).to_string())
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            repos: self.repos.iter().map(|r| r.name().to_string()).collect(),
            users: self.users.iter().map(|u| u.name().to_string()).collect(),
        }
    }
}

/// Names, kinds and rule order of a model. Two models are structurally equal
/// when their summaries are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub groups: Vec<GroupSummary>,
    pub configs: Vec<ConfigSummary>,
    pub repos: Vec<String>,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub kind: Kind,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub repos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub access: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub param: String,
    pub targets: Vec<String>,
}
