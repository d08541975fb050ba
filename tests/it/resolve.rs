use cmdroute::{resolve, Arg, Descriptor, OptSpec, ParsedLine, RouteDesc};
use expect_test::expect;

use crate::{cmd, worked_example};

fn positionals(tokens: &[&str]) -> ParsedLine {
    let mut line = ParsedLine::new();
    for token in tokens {
        line.add_positional(*token);
    }
    line
}

#[test]
fn routing_reaches_a_leaf_command() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(cmd("a", "A").build().unwrap())
        .sub(cmd("b", "B").build().unwrap())
        .build()
        .unwrap()
        .into();
    let res = resolve(&root, &positionals(&["a"]), false).unwrap();
    assert_eq!(res.route.path().len(), 1);
    assert_eq!(res.route.command().unwrap().name(), "a");
    assert_eq!(res.route.full_path(), "tool a");
    assert!(res.bindings.is_empty());
}

#[test]
fn matching_is_exact_and_case_sensitive() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(cmd("status", "Status").build().unwrap())
        .build()
        .unwrap()
        .into();
    let err = resolve(&root, &positionals(&["stat"]), false).unwrap_err();
    expect![[r#"unknown command: `stat`"#]].assert_eq(&err.to_string());
    let err = resolve(&root, &positionals(&["STATUS"]), false).unwrap_err();
    expect![[r#"unknown command: `STATUS`"#]].assert_eq(&err.to_string());
}

#[test]
fn exhausted_tokens_leave_the_command_absent() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(RouteDesc::builder("remote").description("Remotes").sub(cmd("add", "Add").build().unwrap()).build().unwrap())
        .build()
        .unwrap()
        .into();
    let res = resolve(&root, &positionals(&["remote"]), false).unwrap();
    assert!(res.route.command().is_none());
    assert_eq!(res.route.path().len(), 2);
    assert_eq!(res.route.full_path(), "tool remote <CMD>");
}

#[test]
fn required_argument_with_optional_tail() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(
            cmd("run", "Run")
                .arg(Arg::builder("REQ").description("Required").required().build().unwrap())
                .arg(Arg::builder("OPT").description("Optional").unlimited().build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
        .into();
    let res = resolve(&root, &positionals(&["run", "x"]), false).unwrap();
    assert_eq!(res.bindings.get("REQ").unwrap(), ["x"]);
    assert!(res.bindings.get("OPT").unwrap().is_empty());

    let err = resolve(&root, &positionals(&["run"]), false).unwrap_err();
    expect![[r#"argument is required: `REQ`"#]].assert_eq(&err.to_string());
}

#[test]
fn worked_example_binding() {
    let root: Descriptor = worked_example().into();
    let res = resolve(&root, &positionals(&["run", "arg1", "arg2a", "arg2b"]), false).unwrap();
    assert_eq!(res.bindings.get("ARG1").unwrap(), ["arg1"]);
    assert_eq!(res.bindings.get("ARG2").unwrap(), ["arg2a", "arg2b"]);
    assert!(res.bindings.get("ARG3").unwrap().is_empty());

    let res = resolve(
        &root,
        &positionals(&["run", "arg1", "arg2a", "arg2b", "arg3a", "arg3b", "arg3c"]),
        false,
    )
    .unwrap();
    assert_eq!(res.bindings.get("ARG3").unwrap(), ["arg3a", "arg3b", "arg3c"]);
}

#[test]
fn fixed_multiplicity_underflow_fails() {
    let root: Descriptor = worked_example().into();
    let err = resolve(&root, &positionals(&["run", "arg1", "arg2a"]), false).unwrap_err();
    expect![[r#"argument has too few values: `ARG2` (expected 2)"#]].assert_eq(&err.to_string());
}

#[test]
fn leftover_tokens_fail_as_unhandled() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(
            cmd("run", "Run")
                .arg(Arg::builder("ONLY").description("Only").required().build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
        .into();
    let err = resolve(&root, &positionals(&["run", "x", "extra"]), false).unwrap_err();
    expect![[r#"unhandled argument: `extra`"#]].assert_eq(&err.to_string());
}

#[test]
fn greedy_claiming_never_backtracks() {
    // A takes exactly two tokens even though B is then starved.
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(
            cmd("run", "Run")
                .arg(Arg::builder("A").description("A").required().multiplicity(2).build().unwrap())
                .arg(Arg::builder("B").description("B").required().build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
        .into();
    let err = resolve(&root, &positionals(&["run", "x", "y"]), false).unwrap_err();
    expect![[r#"argument is required: `B`"#]].assert_eq(&err.to_string());
}

#[test]
fn optional_fixed_argument_may_be_absent_but_not_partial() {
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(
            cmd("run", "Run")
                .arg(Arg::builder("PAIR").description("Pair").multiplicity(2).build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
        .into();
    let res = resolve(&root, &positionals(&["run"]), false).unwrap();
    assert!(res.bindings.get("PAIR").unwrap().is_empty());

    let err = resolve(&root, &positionals(&["run", "only-one"]), false).unwrap_err();
    expect![[r#"argument has too few values: `PAIR` (expected 2)"#]].assert_eq(&err.to_string());
}

#[test]
fn missing_required_options_are_collected() {
    let token = OptSpec::builder().long("token").description("Token").value().required().build().unwrap();
    let user = OptSpec::builder().long("user").description("User").value().required().build().unwrap();
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .sub(cmd("push", "Push").opt(token).opt(user).build().unwrap())
        .build()
        .unwrap()
        .into();
    let err = resolve(&root, &positionals(&["push"]), false).unwrap_err();
    expect![[r#"missing required options: `token`, `user`"#]].assert_eq(&err.to_string());
}

#[test]
fn required_options_are_checked_on_the_deepest_route_when_no_command() {
    let token = OptSpec::builder().long("token").description("Token").value().required().build().unwrap();
    let root: Descriptor = RouteDesc::builder("tool")
        .description("A tool")
        .opt(token)
        .sub(cmd("run", "Run").build().unwrap())
        .build()
        .unwrap()
        .into();
    let err = resolve(&root, &positionals(&[]), false).unwrap_err();
    expect![[r#"missing required options: `token`"#]].assert_eq(&err.to_string());
}

#[test]
fn skip_binding_resolves_the_route_only() {
    let root: Descriptor = worked_example().into();
    // no arguments at all, which would otherwise fail on `ARG1`
    let res = resolve(&root, &positionals(&["run"]), true).unwrap();
    assert_eq!(res.route.command().unwrap().name(), "run");
    assert!(res.bindings.is_empty());
}

#[test]
fn resolution_is_idempotent() {
    let root: Descriptor = worked_example().into();
    let line = positionals(&["run", "arg1", "arg2a", "arg2b", "tail"]);
    let first = resolve(&root, &line, false).unwrap();
    let second = resolve(&root, &line, false).unwrap();
    assert_eq!(first.route.full_path(), second.route.full_path());
    assert_eq!(first.bindings, second.bindings);
}
