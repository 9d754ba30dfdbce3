//! Whole-file invariants of a root admin configuration.

use crate::error::StructuralError;
use crate::model::Model;

pub const ADMIN_REPO: &str = "gitolite-admin";

/// Exactly one config for `gitolite-admin`, with at least one rule, the first
/// being `RW+` without parameter and with at least one target.
pub fn validate_admin_config(model: &Model) -> Result<(), StructuralError> {
    let configs = model.configs_for_repo(ADMIN_REPO);
    let [config] = configs.as_slice() else {
        return Err(StructuralError::AdminConfigCount);
    };
    let Some(first) = config.rules().first() else {
        return Err(StructuralError::AdminConfigWithoutRules);
    };
    if first.access() != "RW+" || !first.param().is_empty() {
        return Err(StructuralError::FirstAdminRule {
            access: first.access().to_string(),
            param: first.param().to_string(),
        });
    }
    if !first.has_targets() {
        return Err(StructuralError::FirstAdminRuleWithoutTargets);
    }
    Ok(())
}
