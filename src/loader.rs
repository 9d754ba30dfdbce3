//! Entry points turning configuration text into a `Model`.

use std::io::BufRead;
use std::sync::Arc;

use crate::error::ConfError;
use crate::model::Model;
use crate::options::ParserOptions;
use crate::parser::Parser;

/// Parse a complete admin configuration, checking the `gitolite-admin` config.
///
/// Example:
/// ```rust
/// use gitolite_core::parse;
/// let text = "repo gitolite-admin\n    RW+ = admin\n";
/// let model = parse(text).unwrap();
/// assert_eq!(model.config_count(), 1);
/// assert_eq!(model.rules_for_repo("gitolite-admin").len(), 1);
/// ```
pub fn parse(text: &str) -> Result<Model, ConfError> {
    parse_with(text, &ParserOptions::default())
}

pub fn parse_with(text: &str, options: &ParserOptions) -> Result<Model, ConfError> {
    let mut parser = Parser::new(options.clone());
    parser.parse_str(text)?;
    Ok(parser.into_model())
}

/// Parse from any buffered reader; read failures surface as `ConfError::Io`.
pub fn parse_reader<R: BufRead>(reader: R, options: &ParserOptions) -> Result<Model, ConfError> {
    let mut parser = Parser::new(options.clone());
    parser.parse_reader(reader)?;
    Ok(parser.into_model())
}

/// Parse a subconf file bound to its parent model.
///
/// The nested file may use the parent's groups but not redeclare them, and
/// is never checked for an admin config.
pub fn parse_nested(text: &str, parent: Arc<Model>) -> Result<Model, ConfError> {
    let mut parser = Parser::nested(parent);
    parser.parse_str(text)?;
    Ok(parser.into_model())
}
