//! Route resolution and argument binding.
//!
//! Walks the descriptor tree against the positional tokens of a parsed
//! line to find the command the user invoked, then binds the remaining
//! tokens to that command's declared arguments.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::tokenize::ParsedLine;
use crate::tree::{CmdDesc, Descriptor, RouteDesc};
use crate::{Arg, Multiplicity, ParseError, Result};

/// The resolved path to a command: the routes descended through, plus
/// the command itself when the input reached one.
///
/// A command-absent route is not an error at this level. Exhausting the
/// positional tokens inside a route is a valid outcome, so that usage
/// help can be shown for partial paths; whether a command was required
/// is the caller's call.
#[derive(Debug, Clone)]
pub struct CommandRoute<'a> {
    path: Vec<&'a RouteDesc>,
    command: Option<&'a CmdDesc>,
}

impl<'a> CommandRoute<'a> {
    /// Routes descended through, root first. Empty when the tree root is
    /// itself a command.
    pub fn path(&self) -> &[&'a RouteDesc] {
        &self.path
    }

    pub fn command(&self) -> Option<&'a CmdDesc> {
        self.command
    }

    /// Deepest descriptor reached: the command if present, otherwise the
    /// last route.
    pub fn active(&self) -> Option<&'a dyn Active> {
        if let Some(cmd) = self.command {
            return Some(cmd as &dyn Active);
        }
        self.path.last().map(|route| *route as &dyn Active)
    }

    /// Full path as entered, with a `<CMD>` placeholder when no command
    /// was reached, e.g. `my-cli remote add` or `my-cli remote <CMD>`.
    pub fn full_path(&self) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(|it| it.name()).collect();
        parts.push(self.command.map_or("<CMD>", |cmd| cmd.name()));
        parts.join(" ")
    }
}

impl fmt::Display for CommandRoute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// The slice of descriptor surface the post-resolution checks and the
/// usage pages care about, shared by routes and commands.
pub trait Active {
    fn description(&self) -> &str;
    fn options(&self) -> &[crate::OptSpec];
}

impl Active for RouteDesc {
    fn description(&self) -> &str {
        RouteDesc::description(self)
    }
    fn options(&self) -> &[crate::OptSpec] {
        RouteDesc::options(self)
    }
}

impl Active for CmdDesc {
    fn description(&self) -> &str {
        CmdDesc::description(self)
    }
    fn options(&self) -> &[crate::OptSpec] {
        CmdDesc::options(self)
    }
}

/// Values bound to a command's arguments for one invocation, keyed by
/// argument name. Lives outside the tree: the tree only declares shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Vec<String>>,
}

impl Bindings {
    /// Values bound to the argument, in input order. `None` for a name
    /// that was never declared (or when no command was resolved).
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: &str, values: Vec<String>) {
        self.values.insert(name.to_string(), values);
    }
}

/// Outcome of resolving one parsed line against a tree.
#[derive(Debug)]
pub struct Resolution<'a> {
    pub route: CommandRoute<'a>,
    pub bindings: Bindings,
}

/// Resolve the command route for a parsed line and bind the leftover
/// positional tokens to the command's arguments.
///
/// With `skip_binding` (usage help was requested) only the route is
/// resolved, as far as the input allows; required-option validation and
/// argument binding are both skipped so an incomplete invocation can
/// still get its help page.
pub fn resolve<'a>(
    root: &'a Descriptor,
    line: &ParsedLine,
    skip_binding: bool,
) -> Result<Resolution<'a>, ParseError> {
    let (route, consumed) = walk(root, line.positionals())?;
    debug!(route = %route.full_path(), consumed, skip_binding, "resolved command route");
    let mut bindings = Bindings::default();
    if !skip_binding {
        validate_options(&route, line)?;
        if let Some(cmd) = route.command() {
            bindings = bind(cmd, &line.positionals()[consumed..])?;
        }
    }
    Ok(Resolution { route, bindings })
}

/// Descend the tree, consuming one positional token per route level.
/// Returns the route together with the number of tokens consumed, which
/// marks the boundary between routing and argument binding.
fn walk<'a>(root: &'a Descriptor, tokens: &[String]) -> Result<(CommandRoute<'a>, usize), ParseError> {
    let mut path = Vec::new();
    let mut command = None;
    let mut cursor = 0;
    let mut current = root;
    loop {
        match current {
            Descriptor::Route(route) => {
                path.push(route);
                let token = match tokens.get(cursor) {
                    Some(token) => token,
                    // all positionals were used up by the route path
                    None => break,
                };
                match route.sub_command(token) {
                    Some(sub) => {
                        cursor += 1;
                        current = sub;
                    }
                    None => return Err(ParseError::UnknownCommand(token.clone())),
                }
            }
            Descriptor::Command(cmd) => {
                command = Some(cmd);
                break;
            }
        }
    }
    Ok((CommandRoute { path, command }, cursor))
}

/// Check the options declared directly on the active descriptor; every
/// missing required option is collected so they fail as one error.
fn validate_options(route: &CommandRoute<'_>, line: &ParsedLine) -> Result<(), ParseError> {
    let Some(active) = route.active() else {
        return Ok(());
    };
    let missing: Vec<String> = active
        .options()
        .iter()
        .filter(|opt| opt.is_required() && !line.has_flag(&opt.key()))
        .map(|opt| opt.key())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParseError::MissingOptions(missing))
    }
}

/// Bind positional tokens to the command's arguments in declaration
/// order. Claiming is strictly greedy left-to-right with no
/// backtracking: a fixed-multiplicity argument takes up to its count
/// even if that starves a later required argument, which then surfaces
/// as its own error.
fn bind(cmd: &CmdDesc, tokens: &[String]) -> Result<Bindings, ParseError> {
    let mut bindings = Bindings::default();
    let mut cursor = 0;
    for arg in cmd.args() {
        let take = match arg.multiplicity() {
            Multiplicity::Unlimited => tokens.len() - cursor,
            Multiplicity::Fixed(count) => count.min(tokens.len() - cursor),
        };
        let claimed = tokens[cursor..cursor + take].to_vec();
        cursor += take;
        validate_claim(arg, &claimed)?;
        bindings.insert(arg.name(), claimed);
    }
    if cursor < tokens.len() {
        return Err(ParseError::UnhandledArgument(tokens[cursor].clone()));
    }
    Ok(bindings)
}

fn validate_claim(arg: &Arg, claimed: &[String]) -> Result<(), ParseError> {
    if arg.is_required() && claimed.is_empty() {
        return Err(ParseError::ArgumentRequired(arg.name().to_string()));
    }
    if let Multiplicity::Fixed(count) = arg.multiplicity() {
        // an empty claim on an optional argument means "not provided"
        if claimed.is_empty() && !arg.is_required() {
            return Ok(());
        }
        if claimed.len() < count {
            return Err(ParseError::TooFewValues { name: arg.name().to_string(), expected: count });
        }
        // structurally impossible given the claiming rule; a violation
        // is a binder defect, not a user input error
        assert!(
            claimed.len() <= count,
            "argument `{}` has too many values (expected {})",
            arg.name(),
            count
        );
    }
    Ok(())
}
