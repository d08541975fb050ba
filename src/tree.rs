use std::fmt;
use std::sync::Arc;

use crate::context::{Command, CommandFactory, FnCommand};
use crate::error::CommandError;
use crate::opt::{OptGroup, OptSpec};
use crate::{Arg, Context, DeclError, Multiplicity, Result};

/// One node of the declarative command tree: either a named group of
/// sub-commands or an executable leaf.
///
/// The tree is built once at startup, validated eagerly, and is fully
/// immutable afterwards. Resolving input against it produces borrowed
/// routes and a standalone value binding, so a single tree can be
/// resolved against any number of times, including concurrently.
#[derive(Debug)]
pub enum Descriptor {
    Route(RouteDesc),
    Command(CmdDesc),
}

impl Descriptor {
    pub fn name(&self) -> &str {
        match self {
            Descriptor::Route(route) => route.name(),
            Descriptor::Command(cmd) => cmd.name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Descriptor::Route(route) => route.description(),
            Descriptor::Command(cmd) => cmd.description(),
        }
    }

    pub fn options(&self) -> &[OptSpec] {
        match self {
            Descriptor::Route(route) => route.options(),
            Descriptor::Command(cmd) => cmd.options(),
        }
    }

    pub fn option_groups(&self) -> &[OptGroup] {
        match self {
            Descriptor::Route(route) => route.option_groups(),
            Descriptor::Command(cmd) => cmd.option_groups(),
        }
    }

    pub fn as_route(&self) -> Option<&RouteDesc> {
        match self {
            Descriptor::Route(route) => Some(route),
            Descriptor::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<&CmdDesc> {
        match self {
            Descriptor::Route(_) => None,
            Descriptor::Command(cmd) => Some(cmd),
        }
    }
}

impl From<RouteDesc> for Descriptor {
    fn from(route: RouteDesc) -> Descriptor {
        Descriptor::Route(route)
    }
}

impl From<CmdDesc> for Descriptor {
    fn from(cmd: CmdDesc) -> Descriptor {
        Descriptor::Command(cmd)
    }
}

/// A named group of sub-commands. Sub-command names are unique within
/// the route and keep their insertion order.
///
/// ```no_run
/// # use cmdroute::{CmdDesc, RouteDesc};
/// # fn cmd() -> CmdDesc { unimplemented!() }
/// let route = RouteDesc::builder("remote")
///     .description("Manage tracked remotes")
///     .sub(cmd())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct RouteDesc {
    name: String,
    description: String,
    options: Vec<OptSpec>,
    option_groups: Vec<OptGroup>,
    sub_commands: Vec<Descriptor>,
}

impl RouteDesc {
    pub fn builder(name: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
            option_groups: Vec::new(),
            sub_commands: Vec::new(),
            err: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[OptSpec] {
        &self.options
    }

    pub fn option_groups(&self) -> &[OptGroup] {
        &self.option_groups
    }

    /// Sub-commands in declaration order. Never empty.
    pub fn sub_commands(&self) -> &[Descriptor] {
        &self.sub_commands
    }

    /// Exact, case-sensitive lookup by name.
    pub fn sub_command(&self, name: &str) -> Option<&Descriptor> {
        self.sub_commands.iter().find(|it| it.name() == name)
    }
}

pub struct RouteBuilder {
    name: String,
    description: String,
    options: Vec<OptSpec>,
    option_groups: Vec<OptGroup>,
    sub_commands: Vec<Descriptor>,
    err: Option<DeclError>,
}

impl RouteBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn opt(mut self, opt: OptSpec) -> Self {
        self.options.push(opt);
        self
    }

    pub fn opt_group(mut self, group: OptGroup) -> Self {
        self.option_groups.push(group);
        self
    }

    /// Add a sub-command, either a further route or a command leaf.
    pub fn sub(mut self, sub: impl Into<Descriptor>) -> Self {
        let sub = sub.into();
        if self.err.is_none() && self.sub_commands.iter().any(|it| it.name() == sub.name()) {
            self.err = Some(DeclError::DuplicateSubCommand {
                route: self.name.clone(),
                name: sub.name().to_string(),
            });
        }
        self.sub_commands.push(sub);
        self
    }

    pub fn build(self) -> Result<RouteDesc, DeclError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        if self.description.is_empty() {
            return Err(DeclError::MissingDescription(self.name));
        }
        if self.sub_commands.is_empty() {
            return Err(DeclError::EmptyRoute(self.name));
        }
        Ok(RouteDesc {
            name: self.name,
            description: self.description,
            options: self.options,
            option_groups: self.option_groups,
            sub_commands: self.sub_commands,
        })
    }
}

/// An executable leaf of the tree: a named command with an ordered list
/// of positional arguments and a factory producing its [`Command`].
pub struct CmdDesc {
    name: String,
    description: String,
    options: Vec<OptSpec>,
    option_groups: Vec<OptGroup>,
    args: Vec<Arg>,
    factory: CommandFactory,
}

impl CmdDesc {
    pub fn builder(name: impl Into<String>) -> CmdBuilder {
        CmdBuilder {
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
            option_groups: Vec::new(),
            args: Vec::new(),
            factory: None,
            err: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[OptSpec] {
        &self.options
    }

    pub fn option_groups(&self) -> &[OptGroup] {
        &self.option_groups
    }

    /// Arguments in declaration order, which is also binding order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn create(&self) -> Box<dyn Command> {
        (self.factory)()
    }
}

impl fmt::Debug for CmdDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdDesc")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

pub struct CmdBuilder {
    name: String,
    description: String,
    options: Vec<OptSpec>,
    option_groups: Vec<OptGroup>,
    args: Vec<Arg>,
    factory: Option<CommandFactory>,
    err: Option<DeclError>,
}

impl CmdBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn opt(mut self, opt: OptSpec) -> Self {
        self.options.push(opt);
        self
    }

    pub fn opt_group(mut self, group: OptGroup) -> Self {
        self.option_groups.push(group);
        self
    }

    /// Add a positional argument. Declaration order is binding order, and
    /// it is constrained: names are unique per command, an optional
    /// argument closes the list, and so does an unlimited one.
    pub fn arg(mut self, arg: Arg) -> Self {
        if self.err.is_none() {
            self.err = self.check_arg(&arg).err();
        }
        self.args.push(arg);
        self
    }

    fn check_arg(&self, arg: &Arg) -> Result<(), DeclError> {
        if self.args.iter().any(|it| it.name() == arg.name()) {
            return Err(DeclError::DuplicateArgument {
                command: self.name.clone(),
                argument: arg.name().to_string(),
            });
        }
        if let Some(last) = self.args.last() {
            if !last.is_required() {
                return Err(DeclError::ArgumentAfterOptional {
                    command: self.name.clone(),
                    argument: arg.name().to_string(),
                    optional: last.name().to_string(),
                });
            }
            if last.multiplicity() == Multiplicity::Unlimited {
                return Err(DeclError::ArgumentAfterUnlimited {
                    command: self.name.clone(),
                    argument: arg.name().to_string(),
                    unlimited: last.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Set the factory producing the [`Command`] instance.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Command> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Shortcut for commands that are a single function: wraps the
    /// closure into a [`Command`] with a no-op validation step.
    pub fn handler<F>(self, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        self.factory(move || Box::new(FnCommand(Arc::clone(&handler))) as Box<dyn Command>)
    }

    pub fn build(self) -> Result<CmdDesc, DeclError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        if self.description.is_empty() {
            return Err(DeclError::MissingDescription(self.name));
        }
        let factory = match self.factory {
            Some(factory) => factory,
            None => return Err(DeclError::MissingFactory(self.name)),
        };
        Ok(CmdDesc {
            name: self.name,
            description: self.description,
            options: self.options,
            option_groups: self.option_groups,
            args: self.args,
            factory,
        })
    }
}
