use std::sync::Arc;

use crate::error::{CommandError, ParseError};
use crate::resolve::{Bindings, CommandRoute};
use crate::tokenize::ParsedLine;
use crate::Result;

/// An executable command, the endpoint of a resolved route.
///
/// `validate` runs before `execute` and is the place to reject input the
/// binder cannot check (cross-argument constraints, value formats); it
/// fails with a [`ParseError`] so bad input and execution failures stay
/// distinct classes. The default implementation accepts everything.
pub trait Command {
    fn validate(&self, ctx: &Context<'_>) -> Result<(), ParseError> {
        let _ = ctx;
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>) -> Result<(), CommandError>;
}

/// Produces the [`Command`] instance for a command descriptor.
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// Adapter turning a plain closure into a [`Command`].
pub(crate) struct FnCommand<F>(pub(crate) Arc<F>);

impl<F> Command for FnCommand<F>
where
    F: Fn(&Context<'_>) -> Result<(), CommandError> + Send + Sync,
{
    fn execute(&self, ctx: &Context<'_>) -> Result<(), CommandError> {
        (self.0)(ctx)
    }
}

/// Everything a command sees at execution time: the parsed flags, the
/// resolved route, and the values bound to its arguments.
#[derive(Debug)]
pub struct Context<'a> {
    line: &'a ParsedLine,
    route: CommandRoute<'a>,
    bindings: Bindings,
}

impl<'a> Context<'a> {
    pub fn new(line: &'a ParsedLine, route: CommandRoute<'a>, bindings: Bindings) -> Context<'a> {
        Context { line, route, bindings }
    }

    pub fn route(&self) -> &CommandRoute<'a> {
        &self.route
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.line.has_flag(name)
    }

    /// First value of the flag, if present.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.line.flag_value(name)
    }

    /// All values of the flag, empty when absent.
    pub fn flag_values(&self, name: &str) -> &[String] {
        self.line.flag_values(name)
    }

    /// Values bound to the argument, in input order.
    ///
    /// # Panics
    ///
    /// Panics when `name` was never declared on the resolved command;
    /// that is a typo in the command's own code, not bad input.
    pub fn arg_values(&self, name: &str) -> &[String] {
        match self.bindings.get(name) {
            Some(values) => values,
            None => panic!("argument not declared: `{name}`"),
        }
    }

    /// First bound value of the argument, if any.
    pub fn arg_value(&self, name: &str) -> Option<&str> {
        self.arg_values(name).first().map(String::as_str)
    }

    /// First bound value of the argument, or `default`.
    pub fn arg_value_or<'s>(&'s self, name: &str, default: &'s str) -> &'s str {
        self.arg_value(name).unwrap_or(default)
    }
}
