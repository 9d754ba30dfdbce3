use std::sync::Arc;

use super::*;
use crate::error::StructuralError;
use crate::types::{Kind, Origin};
use crate::{parse, parse_nested, parse_with};
use yare::parameterized;

mod errors;
mod logging;

const ADMIN: &str = "repo gitolite-admin\n    RW+ = admin\n";

const FULL: &str = r#"
# gitolite configuration

subconf "subs/*.conf"

@admins = alice bob
@web = site blog

repo gitolite-admin
    RW+ = @admins

repo @web tools # public
    desc = web things
    RW+ master = @admins
    R = @all
    RW VREF/NAME/conf/subs/proj = carol
"#;

#[derive(Clone)]
struct SharedLogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

struct SharedLogWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(Arc::clone(&self.0))
    }
}

impl std::io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn lenient(text: &str) -> Model {
    parse_with(text, &ParserOptions::lenient()).expect("fragment should parse")
}

fn parse_error(text: &str) -> ConfError {
    parse_with(text, &ParserOptions::lenient()).expect_err("fragment should fail")
}

fn names(model: &Model, items: &[crate::types::UserOrGroup]) -> Vec<String> {
    items
        .iter()
        .map(|t| model.user_or_group_name(*t).to_string())
        .collect()
}

#[test]
fn test_full_configuration() {
    let model = parse(FULL).unwrap();

    assert_eq!(model.config_count(), 2);
    assert_eq!(model.group_count(), 3);
    assert_eq!(model.repo_group_count(), 2);
    assert_eq!(model.user_group_count(), 1);
    assert_eq!(model.repo_count(), 4);
    assert_eq!(model.user_count(), 3);
    assert_eq!(model.subconf_patterns().len(), 1);
    assert!(model.subconf_patterns().matches("conf/subs/proj.conf"));

    let web = model.configs_for_repo("blog");
    assert_eq!(web.len(), 1);
    assert_eq!(web[0].desc().map(|d| d.text()), Some("web things"));
    assert_eq!(web[0].comment().same_line(), Some("# public"));

    let rules = model.rules_for_repo("site");
    let shapes: Vec<(&str, &str)> = rules.iter().map(|r| (r.access(), r.param())).collect();
    assert_eq!(
        shapes,
        vec![
            ("RW+", "master"),
            ("R", ""),
            ("RW", "VREF/NAME/conf/subs/proj"),
        ]
    );
    assert_eq!(names(&model, rules[1].targets()), vec!["@all"]);
    assert_eq!(model.group("@proj").map(|g| g.kind()), Some(Kind::Repos));
}

#[test]
fn test_full_configuration_summary() {
    let model = parse(FULL).unwrap();
    insta::assert_json_snapshot!(model.summary(), @r#"
    {
      "groups": [
        {
          "name": "@admins",
          "kind": "users",
          "members": [
            "alice",
            "bob"
          ]
        },
        {
          "name": "@web",
          "kind": "repos",
          "members": [
            "site",
            "blog"
          ]
        },
        {
          "name": "@proj",
          "kind": "repos",
          "members": []
        }
      ],
      "configs": [
        {
          "repos": [
            "gitolite-admin"
          ],
          "rules": [
            {
              "access": "RW+",
              "targets": [
                "@admins"
              ]
            }
          ]
        },
        {
          "repos": [
            "@web",
            "tools"
          ],
          "desc": "web things",
          "rules": [
            {
              "access": "RW+",
              "param": "master",
              "targets": [
                "@admins"
              ]
            },
            {
              "access": "R",
              "targets": [
                "@all"
              ]
            },
            {
              "access": "RW",
              "param": "VREF/NAME/conf/subs/proj",
              "targets": [
                "carol"
              ]
            }
          ]
        }
      ],
      "repos": [
        "gitolite-admin",
        "site",
        "blog",
        "tools"
      ],
      "users": [
        "alice",
        "bob",
        "carol"
      ]
    }
    "#);
}

#[test]
fn test_scenario_group_of_repos() {
    let model = lenient("@g = r1 r2\nrepo @g\n  RW+ = u1");

    assert_eq!(model.group_count(), 1);
    let group = model.group("@g").unwrap();
    assert_eq!(group.kind(), Kind::Repos);
    assert_eq!(group.members(), &["r1", "r2"]);
    assert_eq!(model.repo_count(), 2);
    assert_eq!(model.config_count(), 1);

    let rules = model.rules_for_repo("r1");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].access(), "RW+");
    assert_eq!(rules[0].param(), "");
    assert_eq!(names(&model, rules[0].targets()), vec!["u1"]);
}

#[test]
fn test_parser_keeps_partial_model_after_error() {
    let mut parser = Parser::new(ParserOptions::lenient());
    let err = parser
        .parse_str("@devs = alice\nrepo r\n    RW = @devs\nrepo @devs\n")
        .unwrap_err();
    assert!(matches!(err, ConfError::KindConflict { .. }));
    assert_eq!(parser.line_number(), 4);
    let model = parser.into_model();
    assert_eq!(model.config_count(), 1);
    assert_eq!(model.group("@devs").unwrap().kind(), Kind::Users);
}

#[test]
fn test_feed_line_by_line() {
    let mut parser = Parser::new(ParserOptions::default());
    for line in ADMIN.lines() {
        parser.feed(line).unwrap();
    }
    parser.finish().unwrap();
    assert_eq!(parser.model().config_count(), 1);
}

#[test]
fn test_admin_config_checked_by_default() {
    let err = parse("repo other\n    RW = u\n").unwrap_err();
    assert!(matches!(
        err,
        ConfError::Structural(StructuralError::AdminConfigCount)
    ));
    assert_eq!(
        err.to_string(),
        "There must be one and only gitolite-admin repo config"
    );

    let err = parse("repo gitolite-admin\n    R = u\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "First rule for gitolite-admin repo config must be 'RW+', empty param, instead of 'R'-''"
    );
}

#[test]
fn test_nested_parse() {
    let parent = Arc::new(parse(FULL).unwrap());
    let child = parse_nested(
        "repo proj-a proj-b\n    RW = @admins\n    R = dave\n",
        Arc::clone(&parent),
    )
    .unwrap();

    let admins = child.group("@admins").unwrap();
    assert_eq!(admins.origin(), Origin::Inherited);
    assert_eq!(admins.users().len(), 2);
    assert_eq!(child.group_count(), 0);
    assert_eq!(child.print(), "repo proj-a proj-b\n    RW    = @admins\n    R     = dave\n");
}

#[test]
fn test_nested_parse_cannot_redeclare_parent_group() {
    let parent = Arc::new(parse(FULL).unwrap());
    let err = parse_nested("@web = other\nrepo @web\n    R = x\n", parent).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse Error: Duplicate group name '@web' at line 1 ('@web = other')"
    );
}

#[parameterized(
    unix = { "repo gitolite-admin\n    RW+ = admin\n" },
    windows = { "repo gitolite-admin\r\n    RW+ = admin\r\n" },
    no_final_newline = { "repo gitolite-admin\n    RW+ = admin" },
    tabs = { "repo\tgitolite-admin\n\tRW+\t=\tadmin\n" },
)]
fn test_line_endings(text: &str) {
    let model = parse(text).unwrap();
    assert_eq!(model.print(), "repo gitolite-admin\n    RW+   = admin\n");
}
