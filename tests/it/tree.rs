use cmdroute::{Arg, DeclError, RouteDesc};
use expect_test::expect;

use crate::{arg, cmd};

#[test]
fn declared_order_is_preserved() {
    let route = RouteDesc::builder("tool")
        .description("A tool")
        .sub(cmd("b", "B").build().unwrap())
        .sub(cmd("a", "A").build().unwrap())
        .sub(RouteDesc::builder("c").description("C").sub(cmd("d", "D").build().unwrap()).build().unwrap())
        .build()
        .unwrap();
    let names: Vec<&str> = route.sub_commands().iter().map(|it| it.name()).collect();
    assert_eq!(names, ["b", "a", "c"]);

    let command = cmd("run", "Run")
        .arg(Arg::builder("X").description("X").required().build().unwrap())
        .arg(Arg::builder("Y").description("Y").required().build().unwrap())
        .arg(arg("Z"))
        .build()
        .unwrap();
    let names: Vec<&str> = command.args().iter().map(|it| it.name()).collect();
    assert_eq!(names, ["X", "Y", "Z"]);
}

#[test]
fn duplicate_sub_command_is_rejected() {
    let err = RouteDesc::builder("tool")
        .description("A tool")
        .sub(cmd("run", "Run").build().unwrap())
        .sub(cmd("run", "Run again").build().unwrap())
        .build()
        .unwrap_err();
    expect![[r#"sub-command `run` already exists for route `tool`"#]].assert_eq(&err.to_string());
}

#[test]
fn empty_route_is_rejected() {
    let err = RouteDesc::builder("tool").description("A tool").build().unwrap_err();
    expect![[r#"route `tool` must have at least one sub-command"#]].assert_eq(&err.to_string());
}

#[test]
fn duplicate_argument_is_rejected() {
    let err = cmd("run", "Run")
        .arg(Arg::builder("FILE").description("A file").required().build().unwrap())
        .arg(Arg::builder("FILE").description("Same file").required().build().unwrap())
        .build()
        .unwrap_err();
    expect![[r#"argument `FILE` already exists for command `run`"#]].assert_eq(&err.to_string());
}

#[test]
fn argument_after_optional_is_rejected() {
    let err = cmd("run", "Run")
        .arg(arg("OPT"))
        .arg(Arg::builder("REQ").description("Required").required().build().unwrap())
        .build()
        .unwrap_err();
    expect![[r#"argument `REQ` cannot come after optional argument `OPT` for command `run`"#]]
        .assert_eq(&err.to_string());
}

#[test]
fn argument_after_unlimited_is_rejected() {
    let err = cmd("run", "Run")
        .arg(Arg::builder("REST").description("Rest").required().unlimited().build().unwrap())
        .arg(arg("MORE"))
        .build()
        .unwrap_err();
    expect![[
        r#"argument `MORE` cannot come after argument `REST` with unlimited values for command `run`"#
    ]]
    .assert_eq(&err.to_string());
}

#[test]
fn zero_multiplicity_is_rejected() {
    let err = Arg::builder("FILE").description("A file").multiplicity(0).build().unwrap_err();
    assert_eq!(err, DeclError::InvalidMultiplicity("FILE".to_string()));
}

#[test]
fn description_is_required() {
    let err = Arg::builder("FILE").build().unwrap_err();
    expect![[r#"description is required for `FILE`"#]].assert_eq(&err.to_string());

    let err = RouteDesc::builder("tool").sub(cmd("run", "Run").build().unwrap()).build().unwrap_err();
    expect![[r#"description is required for `tool`"#]].assert_eq(&err.to_string());
}

#[test]
fn factory_is_required() {
    let err = cmdroute::CmdDesc::builder("run").description("Run").build().unwrap_err();
    expect![[r#"factory is required for command `run`"#]].assert_eq(&err.to_string());
}
