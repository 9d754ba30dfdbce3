use super::*;

#[parameterized(
    not_a_declaration = { "foo bar", 1, "Parse Error: group or repo expected at line 1 ('foo bar')" },
    bare_repo_keyword = { "# c\nrepo", 2, "Parse Error: group or repo expected at line 2 ('repo')" },
    group_without_members = { "@g =", 1, "Parse Error: Incorrect group declaration at line 1 ('@g =')" },
    group_bad_member = { "@g = a,b", 1, "Parse Error: Incorrect group declaration at line 1 ('@g = a,b')" },
    repo_bad_token = { "repo a,b", 1, "Parse Error: Incorrect repo declaration at line 1 ('repo a,b')" },
    bad_access = { "repo r\n    RX = u", 2, "Parse Error: Incorrect access rule 'RX' at line 2 ('RX = u')" },
    bad_param = { "repo r\n    RW a:b = u", 2, "Parse Error: Incorrect access rule 'RW a:b' at line 2 ('RW a:b = u')" },
    no_rule = { "repo r\nfoo", 2, "Parse Error: At least one access rule expected at line 2 ('foo')" },
    no_rule_before_group = { "repo r\n@g = a", 2, "Parse Error: At least one access rule expected at line 2 ('@g = a')" },
    reserved_group = { "@all = a", 1, "Parse Error: group name other than reserved '@all' at line 1 ('@all = a')" },
)]
fn test_grammar_errors(text: &str, line: usize, message: &str) {
    let err = parse_error(text);
    assert!(matches!(err, ConfError::Grammar { .. }), "{err:?}");
    assert_eq!(err.line().map(|l| l.number), Some(line));
    assert_eq!(err.to_string(), message);
}

#[parameterized(
    empty = { "", "Parse Error: comment, group or repo expected at line 1 ('')" },
    comments_only = { "# nothing\n\n# here", "Parse Error: comment, group or repo expected at line 3 ('# here')" },
)]
fn test_nothing_declared(text: &str, message: &str) {
    assert_eq!(parse_error(text).to_string(), message);
}

#[test]
fn test_undefined_header_group() {
    let err = parse_error("repo r\n    RW = u\n\nrepo @undefined\n    RW = u\n");
    assert!(matches!(
        err,
        ConfError::UndefinedReference { ref name, .. } if name == "@undefined"
    ));
    assert_eq!(err.line().map(|l| l.number), Some(4));
    assert_eq!(
        err.to_string(),
        "Parse Error: repo group name '@undefined' undefined at line 4 ('repo @undefined')"
    );
}

#[parameterized(
    group_name = { "@g = a\n@g = b", Duplicated::GroupName, "@g", 2 },
    group_member = { "@g = a b a", Duplicated::GroupMember, "a", 1 },
    repo_token = { "repo a b a\n    R = u", Duplicated::RepoToken, "a", 1 },
)]
fn test_duplicates(text: &str, expected: Duplicated, duplicate: &str, line: usize) {
    match parse_error(text) {
        ConfError::Duplicate { at, what, name } => {
            assert_eq!(what, expected);
            assert_eq!(name, duplicate);
            assert_eq!(at.number, line);
        }
        other => panic!("expected a duplicate error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_messages() {
    assert_eq!(
        parse_error("@g = a b a").to_string(),
        "Parse Error: Duplicate group element name 'a' at line 1 ('@g = a b a')"
    );
    assert_eq!(
        parse_error("repo a b a").to_string(),
        "Parse Error: Duplicate repo element name 'a' at line 1 ('repo a b a')"
    );
}

#[test]
fn test_second_description() {
    let err = parse_error("repo r\n    desc = one\n    RW = u\n    desc = two\n");
    assert!(matches!(err, ConfError::SecondDescription { .. }));
    assert_eq!(
        err.to_string(),
        "Parse Error: No more than one desc per config, line 4 ('desc = two')"
    );
}

#[test]
fn test_kind_conflict_on_rule_target() {
    let err = parse_error("@g = a\nrepo @g\n    RW = u\nrepo r\n    RW = @g\n");
    assert!(matches!(
        err,
        ConfError::KindConflict {
            existing: Kind::Repos,
            requested: Kind::Users,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Parse Error: group '@g' is a repos group, not a users one, at line 5 ('RW = @g')"
    );
}

#[test]
fn test_kind_conflict_through_nested_group() {
    // @outer becomes a user group and drags @inner along
    let err = parse_error("@inner = x\n@outer = @inner y\nrepo @inner\n    R = u\nrepo r\n    R = @outer\n");
    assert!(matches!(
        err,
        ConfError::KindConflict { ref group, .. } if group == "@inner"
    ));
    assert_eq!(err.line().map(|l| l.number), Some(6));
}

#[parameterized(
    unquoted = { "subconf subs/*.conf" },
    missing_glob = { "subconf" },
    empty_glob = { "subconf \"\"" },
)]
fn test_malformed_subconf(text: &str) {
    let err = parse_error(text);
    assert!(matches!(err, ConfError::Subconf { .. }), "{err:?}");
    assert!(err.to_string().contains("expected subconf \"<glob>\""));
}

#[test]
fn test_subconf_glob_not_a_pattern() {
    let err = parse_error("subconf \"subs/[.conf\"\nrepo r\n    R = u\n");
    assert!(matches!(err, ConfError::Subconf { .. }));
    assert_eq!(err.line().map(|l| l.number), Some(1));
}

#[test]
fn test_project_param_conflicting_with_user_group() {
    let err = parse_error("repo r\n    R = @proj\n    RW VREF/NAME/conf/subs/proj = u\n");
    assert!(matches!(
        err,
        ConfError::KindConflict { ref group, existing: Kind::Users, .. } if group == "@proj"
    ));
    assert_eq!(err.line().map(|l| l.number), Some(3));
}
