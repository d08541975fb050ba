use cmdroute::{tokenize, OptGroup, OptSet, OptSpec};
use expect_test::expect;

use crate::opt;

fn set() -> OptSet {
    let mut set = OptSet::new();
    set.add(OptSpec::builder().short('v').long("verbose").description("Verbose").build().unwrap()).unwrap();
    set.add(OptSpec::builder().long("opt1").description("Option 1").value().build().unwrap()).unwrap();
    set.add(OptSpec::builder().short('p').long("pair").description("A pair").values(2).build().unwrap())
        .unwrap();
    set.add(
        OptSpec::builder()
            .short('D')
            .description("Define")
            .value()
            .value_separator('=')
            .build()
            .unwrap(),
    )
    .unwrap();
    set.add(OptSpec::builder().long("level").description("Level").value().optional_value().build().unwrap())
        .unwrap();
    set
}

fn split(args: &str) -> Vec<String> {
    args.split_ascii_whitespace().map(str::to_string).collect()
}

#[test]
fn flags_and_positionals_are_separated() {
    let line = tokenize(&set(), split("build --opt1 value src dst")).unwrap();
    assert_eq!(line.positionals(), ["build", "src", "dst"]);
    assert_eq!(line.flag_values("opt1"), ["value"]);
}

#[test]
fn flags_are_addressable_by_short_and_long_name() {
    let line = tokenize(&set(), split("-v")).unwrap();
    assert!(line.has_flag("v"));
    assert!(line.has_flag("verbose"));
    assert!(!line.has_flag("opt1"));
}

#[test]
fn inline_values_and_separators() {
    let line = tokenize(&set(), split("--opt1=inline")).unwrap();
    assert_eq!(line.flag_value("opt1"), Some("inline"));

    let line = tokenize(&set(), split("-D key=value")).unwrap();
    assert_eq!(line.flag_values("D"), ["key", "value"]);
}

#[test]
fn repeated_flags_accumulate_values() {
    let line = tokenize(&set(), split("--opt1 a --opt1 b")).unwrap();
    assert_eq!(line.flag_values("opt1"), ["a", "b"]);
    assert_eq!(line.flag_keys().collect::<Vec<_>>(), ["opt1"]);
}

#[test]
fn multi_value_flags_claim_following_tokens() {
    let line = tokenize(&set(), split("--pair a b rest")).unwrap();
    assert_eq!(line.flag_values("pair"), ["a", "b"]);
    assert_eq!(line.positionals(), ["rest"]);
}

#[test]
fn double_dash_ends_flag_processing() {
    let line = tokenize(&set(), split("-v -- --opt1 -v")).unwrap();
    assert_eq!(line.positionals(), ["--opt1", "-v"]);
    assert!(line.has_flag("verbose"));
}

#[test]
fn lone_dash_is_positional() {
    let line = tokenize(&set(), split("cat -")).unwrap();
    assert_eq!(line.positionals(), ["cat", "-"]);
}

#[test]
fn optional_value_flag_tolerates_no_value() {
    let line = tokenize(&set(), split("--level -v")).unwrap();
    assert!(line.has_flag("level"));
    assert!(line.flag_values("level").is_empty());
}

#[test]
fn unknown_flag_fails() {
    let err = tokenize(&set(), split("--nope")).unwrap_err();
    expect![[r#"unexpected flag: `--nope`"#]].assert_eq(&err.to_string());

    let err = tokenize(&set(), split("-x")).unwrap_err();
    expect![[r#"unexpected flag: `-x`"#]].assert_eq(&err.to_string());
}

#[test]
fn missing_value_fails() {
    let err = tokenize(&set(), split("--opt1 -v")).unwrap_err();
    expect![[r#"expected a value for `--opt1`"#]].assert_eq(&err.to_string());

    let err = tokenize(&set(), split("--opt1")).unwrap_err();
    expect![[r#"expected a value for `--opt1`"#]].assert_eq(&err.to_string());
}

#[test]
fn value_on_a_bare_switch_fails() {
    let err = tokenize(&set(), split("--verbose=yes")).unwrap_err();
    expect![[r#"flag does not take a value: `--verbose`"#]].assert_eq(&err.to_string());
}

#[test]
fn option_groups_are_mutually_exclusive() {
    let mut set = OptSet::new();
    set.add_group(OptGroup::new(vec![opt("json"), opt("yaml")]));
    let line = tokenize(&set, split("--json")).unwrap();
    assert!(line.has_flag("json"));

    let err = tokenize(&set, split("--json --yaml")).unwrap_err();
    expect![[r#"flags `json` and `yaml` cannot be used together"#]].assert_eq(&err.to_string());
}
