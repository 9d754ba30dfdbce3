//! Who can read what.

use std::collections::BTreeMap;

use crate::model::Model;
use crate::types::RepoOrGroup;

impl Model {
    /// Principal name to the repos it can read.
    ///
    /// Every rule whose access contains `R` grants its principals (users, or
    /// groups resolving to no user) the config's header tokens, plus the
    /// transitive repos of header groups. Lists keep first-seen order.
    pub fn read_access(&self) -> BTreeMap<String, Vec<String>> {
        let mut access: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for config in self.configs() {
            let mut repos: Vec<&str> = Vec::new();
            for item in config.repos() {
                repos.push(self.repo_or_group_name(*item));
                if let RepoOrGroup::Group(_) = item {
                    repos.extend(
                        self.flatten_repos(*item)
                            .into_iter()
                            .map(|id| self.get_repo(id).name()),
                    );
                }
            }

            for rule in config.rules().iter().filter(|r| r.access().contains('R')) {
                for principal in self.principal_names(rule.targets()) {
                    let readable = access.entry(principal).or_default();
                    for repo in &repos {
                        if !readable.iter().any(|r| r == repo) {
                            readable.push(repo.to_string());
                        }
                    }
                }
            }
        }
        access
    }
}
