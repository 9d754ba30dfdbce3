// src/lib.rs
//! Read, reformat and audit gitolite access-control configurations.
//!
//! ```rust
//! use gitolite_core::{parse, Kind};
//!
//! let text = "@g = r1 r2\nrepo gitolite-admin\n    RW+   = admin\nrepo @g\n    RW+   = u1\n";
//! let model = parse(text).unwrap();
//! assert_eq!(model.group("@g").unwrap().kind(), Kind::Repos);
//! assert_eq!(model.rules_for_repo("r1").len(), 1);
//! assert_eq!(model.print(), text);
//! ```
pub use error::{
    ConfError, Duplicated, LineRef, ProjectError, ResolutionError, StructuralError,
};
pub use loader::{parse, parse_nested, parse_reader, parse_with};
pub use model::{ConfigSummary, Element, GroupSummary, Model, ModelSummary, RuleSummary};
pub use options::ParserOptions;
pub use parser::Parser;
pub use printer::Printer;
pub use project::{ProjectReport, SubconfMatches, infer_projects};
pub use subconf::{SubconfPattern, SubconfPatterns, subconf_basename};
pub use types::*;
pub use validate::{ADMIN_REPO, validate_admin_config};

mod audit;
mod error;
mod grammar;
mod loader;
mod model;
mod options;
mod parser;
mod printer;
mod project;
mod resolve;
mod subconf;
mod types;
mod validate;
