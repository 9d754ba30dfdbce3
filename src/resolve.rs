//! Name registration and lazy kind resolution.
//!
//! A group's kind is unknown until it is first used: in a repo header it
//! becomes a repo group, as a rule target a user group. The kind changes at
//! most once. Fixing it resolves the group's member tokens into typed
//! entities, and forces nested `@group` members to the same kind.
//!
//! Bare names count too. A name written in a repo header fixes every group
//! listing it as `Repos`; a name written as a rule target fixes them as
//! `Users`. Those uses are remembered, so a group declared after them is
//! classified on declaration.

use tracing::debug;

use crate::error::ResolutionError;
use crate::model::{Element, Model};
use crate::types::{
    ALL, Comment, Config, ConfigId, Group, GroupId, Kind, Origin, Repo, RepoId, RepoOrGroup, Rule,
    User, UserId, UserOrGroup,
};

impl Model {
    pub(crate) fn intern_repo(&mut self, name: &str) -> RepoId {
        if let Some(id) = self.repo_index.get(name) {
            return *id;
        }
        let id = RepoId::new(self.repos.len());
        self.repos.push(Repo::new(name));
        self.repo_index.insert(name.to_string(), id);
        id
    }

    pub(crate) fn intern_user(&mut self, name: &str) -> UserId {
        if let Some(id) = self.user_index.get(name) {
            return *id;
        }
        let id = UserId::new(self.users.len());
        self.users.push(User::new(name));
        self.user_index.insert(name.to_string(), id);
        id
    }

    fn insert_group(&mut self, group: Group) -> GroupId {
        let id = GroupId::new(self.groups.len());
        if group.origin != Origin::Reserved {
            self.group_index.insert(group.name.clone(), id);
        }
        self.groups.push(group);
        id
    }

    fn inherited_group(&self, name: &str) -> Option<&Group> {
        self.parent().and_then(|p| p.lookup_group(name))
    }

    /// The synthesized `@all` for one role. Repo and user `@all` never conflict.
    fn reserved_all(&mut self, kind: Kind) -> GroupId {
        let slot = match kind {
            Kind::Users => self.all_users,
            _ => self.all_repos,
        };
        if let Some(id) = slot {
            return id;
        }
        let mut group = Group::new(ALL, Origin::Reserved);
        group.kind = kind;
        let id = self.insert_group(group);
        match kind {
            Kind::Users => self.all_users = Some(id),
            _ => self.all_repos = Some(id),
        }
        id
    }

    /// Fix a group's kind, resolving its members. Fixing it again to the same
    /// kind is a no-op, which also stops recursion through member cycles.
    pub(crate) fn fix_kind(&mut self, id: GroupId, kind: Kind) -> Result<(), ResolutionError> {
        let group = &mut self.groups[id.index()];
        if group.kind == kind {
            return Ok(());
        }
        if group.kind.is_defined() {
            return Err(ResolutionError::KindConflict {
                group: group.name.clone(),
                existing: group.kind,
                requested: kind,
            });
        }
        group.kind = kind;
        debug!(event = "Resolve", phase = "Kind", group = %group.name, kind = %kind);
        self.resolve_members(id)
    }

    fn resolve_members(&mut self, id: GroupId) -> Result<(), ResolutionError> {
        let kind = self.groups[id.index()].kind;
        let members = self.groups[id.index()].members.clone();
        for token in &members {
            match kind {
                Kind::Repos => {
                    let item = if token.starts_with('@') {
                        RepoOrGroup::Group(self.resolve_group_ref(token, Kind::Repos, true)?)
                    } else {
                        RepoOrGroup::Repo(self.intern_repo(token))
                    };
                    let repos = &mut self.groups[id.index()].repos;
                    if !repos.contains(&item) {
                        repos.push(item);
                    }
                }
                Kind::Users => {
                    let item = if token.starts_with('@') {
                        UserOrGroup::Group(self.resolve_group_ref(token, Kind::Users, true)?)
                    } else {
                        UserOrGroup::User(self.intern_user(token))
                    };
                    let users = &mut self.groups[id.index()].users;
                    if !users.contains(&item) {
                        users.push(item);
                    }
                }
                Kind::Undefined => return Ok(()),
            }
        }
        Ok(())
    }

    /// Find `name` and force it to `kind`.
    ///
    /// Unknown names come from the parent chain first, as a local inherited
    /// copy. Failing that they become placeholders when `create` is set, and
    /// are undefined references otherwise.
    pub(crate) fn resolve_group_ref(
        &mut self,
        name: &str,
        kind: Kind,
        create: bool,
    ) -> Result<GroupId, ResolutionError> {
        if name == ALL {
            return Ok(self.reserved_all(kind));
        }
        if let Some(id) = self.group_index.get(name).copied() {
            self.fix_kind(id, kind)?;
            return Ok(id);
        }
        let inherited = self
            .inherited_group(name)
            .map(|g| (g.kind, g.members.clone(), g.comment.clone()));
        if let Some((existing, members, comment)) = inherited {
            if existing.is_defined() && existing != kind {
                return Err(ResolutionError::KindConflict {
                    group: name.to_string(),
                    existing,
                    requested: kind,
                });
            }
            let mut group = Group::new(name, Origin::Inherited);
            group.members = members;
            group.comment = comment;
            let id = self.insert_group(group);
            debug!(event = "Resolve", phase = "Inherit", group = %name);
            self.fix_kind(id, kind)?;
            return Ok(id);
        }
        if !create {
            return Err(ResolutionError::UndefinedGroup(name.to_string()));
        }
        let id = self.insert_group(Group::new(name, Origin::Placeholder));
        debug!(event = "Resolve", phase = "Placeholder", group = %name);
        self.fix_kind(id, kind)?;
        Ok(id)
    }

    /// Register `@name = members...`.
    ///
    /// A name may be declared once across the model and its parents; a prior
    /// placeholder (created by use, without members) is completed in place.
    pub(crate) fn declare_group(
        &mut self,
        name: &str,
        members: Vec<String>,
        comment: Comment,
    ) -> Result<GroupId, ResolutionError> {
        if name == ALL {
            return Err(ResolutionError::ReservedGroup(name.to_string()));
        }
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(ResolutionError::DuplicateMember(member.clone()));
            }
        }
        let id = match self.group_index.get(name).copied() {
            Some(id) if self.groups[id.index()].has_members() => {
                return Err(ResolutionError::DuplicateGroup(name.to_string()));
            }
            Some(id) => id,
            None => {
                if self.inherited_group(name).is_some_and(Group::has_members) {
                    return Err(ResolutionError::DuplicateGroup(name.to_string()));
                }
                self.insert_group(Group::new(name, Origin::Declared))
            }
        };

        for member in &members {
            let listed = self.member_index.entry(member.clone()).or_default();
            if !listed.contains(&id) {
                listed.push(id);
            }
        }
        let as_repo = members.iter().any(|m| self.used_as_repo.contains(m));
        let as_user = members.iter().any(|m| self.used_as_user.contains(m));

        let group = &mut self.groups[id.index()];
        group.members = members;
        group.comment = comment;
        group.origin = Origin::Declared;
        self.elements.push(Element::Group(id));

        if self.groups[id.index()].kind.is_defined() {
            self.resolve_members(id)?;
        }
        if as_repo {
            self.fix_kind(id, Kind::Repos)?;
        }
        if as_user {
            self.fix_kind(id, Kind::Users)?;
        }
        Ok(id)
    }

    fn use_bare_name(&mut self, name: &str, kind: Kind) -> Result<(), ResolutionError> {
        match kind {
            Kind::Repos => self.used_as_repo.insert(name.to_string()),
            _ => self.used_as_user.insert(name.to_string()),
        };
        let listing = self.member_index.get(name).cloned().unwrap_or_default();
        for id in listing {
            self.fix_kind(id, kind)?;
        }
        Ok(())
    }

    /// Resolve one repo header token. Header groups must already exist.
    pub(crate) fn header_token(&mut self, token: &str) -> Result<RepoOrGroup, ResolutionError> {
        if token.starts_with('@') {
            return Ok(RepoOrGroup::Group(self.resolve_group_ref(token, Kind::Repos, false)?));
        }
        self.use_bare_name(token, Kind::Repos)?;
        Ok(RepoOrGroup::Repo(self.intern_repo(token)))
    }

    /// Resolve one rule target. Unknown groups become user placeholders.
    pub(crate) fn rule_target(&mut self, token: &str) -> Result<UserOrGroup, ResolutionError> {
        if token.starts_with('@') {
            return Ok(UserOrGroup::Group(self.resolve_group_ref(token, Kind::Users, true)?));
        }
        self.use_bare_name(token, Kind::Users)?;
        Ok(UserOrGroup::User(self.intern_user(token)))
    }

    /// Register `repo tokens...` as a new config.
    pub(crate) fn add_config(
        &mut self,
        tokens: &[&str],
        comment: Comment,
    ) -> Result<ConfigId, ResolutionError> {
        let mut config = Config::new(comment);
        for token in tokens {
            let item = self.header_token(token)?;
            config.repos.push(item);
        }
        let id = ConfigId::new(self.configs.len());
        self.configs.push(config);
        self.elements.push(Element::Config(id));
        Ok(id)
    }

    pub(crate) fn config_mut(&mut self, id: ConfigId) -> &mut Config {
        &mut self.configs[id.index()]
    }

    /// Resolve a rule's targets and append it to a config.
    pub(crate) fn add_rule(
        &mut self,
        config: ConfigId,
        mut rule: Rule,
        targets: &[&str],
    ) -> Result<(), ResolutionError> {
        for token in targets {
            let target = self.rule_target(token)?;
            rule.push_target(target);
        }
        self.config_mut(config).rules.push(rule);
        Ok(())
    }
}
