//! The end-to-end driver: aggregate once, then tokenize, resolve, bind
//! and execute per invocation.

use crate::aggregate::{aggregate, OptSet};
use crate::context::Context;
use crate::error::{DeclError, Error, ParseError};
use crate::opt::OptSpec;
use crate::tokenize::tokenize;
use crate::tree::Descriptor;
use crate::{help, resolve, Result};

/// A fully declared CLI: the descriptor tree plus the global option set
/// aggregated from it.
///
/// ```no_run
/// # use cmdroute::{Cli, CmdDesc};
/// # fn descriptor() -> CmdDesc { unimplemented!() }
/// fn main() {
///     let cli = Cli::builder().root(descriptor()).build().unwrap();
///     cli.main();
/// }
/// ```
pub struct Cli {
    root: Descriptor,
    opts: OptSet,
    help_opt: OptSpec,
    auto_help: bool,
}

/// What a successful invocation produced.
#[derive(Debug)]
pub enum Outcome {
    /// Help was requested; the rendered page for the resolved position.
    Help(String),
    /// A command was resolved and executed.
    Done,
}

impl Cli {
    pub fn builder() -> CliBuilder {
        CliBuilder { root: None, help_opt: None, auto_help: true }
    }

    /// The aggregated global option set, e.g. for feeding an external
    /// tokenizer.
    pub fn options(&self) -> &OptSet {
        &self.opts
    }

    pub fn root(&self) -> &Descriptor {
        &self.root
    }

    /// Run one invocation. `args` are the raw arguments without the
    /// program name.
    pub fn run<I, S>(&self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let line = tokenize(&self.opts, args).map_err(Error::Parse)?;
        let help_requested = line.has_flag(&self.help_name());
        let resolution = resolve::resolve(&self.root, &line, help_requested).map_err(Error::Parse)?;
        if help_requested {
            let help_opt = self.auto_help.then_some(&self.help_opt);
            return Ok(Outcome::Help(help::usage(&resolution.route, help_opt)));
        }
        let cmd = resolution
            .route
            .command()
            .ok_or_else(|| ParseError::CommandRequired(resolution.route.full_path()))?;
        let ctx = Context::new(&line, resolution.route.clone(), resolution.bindings);
        let command = cmd.create();
        command.validate(&ctx).map_err(Error::Parse)?;
        command.execute(&ctx).map_err(Error::Command)?;
        Ok(Outcome::Done)
    }

    /// Process entry point: reads the environment arguments, prints help
    /// pages to stdout and errors to stderr, and exits non-zero on any
    /// failure. Use [`Cli::run`] everywhere else, tests included.
    pub fn main(&self) {
        match self.run(std::env::args().skip(1)) {
            Ok(Outcome::Help(page)) => print!("{page}"),
            Ok(Outcome::Done) => {}
            Err(err) => {
                eprintln!("ERROR: {err}");
                std::process::exit(1);
            }
        }
    }

    fn help_name(&self) -> String {
        match self.help_opt.long() {
            Some(long) => long.to_string(),
            None => self.help_opt.key(),
        }
    }
}

pub struct CliBuilder {
    root: Option<Descriptor>,
    help_opt: Option<OptSpec>,
    auto_help: bool,
}

impl CliBuilder {
    /// Set the root of the tree: a route for the multi-command case, or
    /// a single command.
    pub fn root(mut self, root: impl Into<Descriptor>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Replace the default `-h, --help` option.
    pub fn help_option(mut self, opt: OptSpec) -> Self {
        self.help_opt = Some(opt);
        self
    }

    /// Do not add the help option to the global set automatically. Help
    /// is then only available where the tree declares the option itself.
    pub fn no_auto_help(mut self) -> Self {
        self.auto_help = false;
        self
    }

    /// Validate the declaration and aggregate the global option set.
    pub fn build(self) -> Result<Cli, DeclError> {
        let root = self.root.ok_or(DeclError::MissingRoot)?;
        let help_opt = match self.help_opt {
            Some(opt) => opt,
            None => default_help_option()?,
        };
        let mut opts = aggregate(&root)?;
        if self.auto_help && opts.find(&help_opt.key()).is_none() {
            opts.add(help_opt.normalized())?;
        }
        Ok(Cli { root, opts, help_opt, auto_help: self.auto_help })
    }
}

fn default_help_option() -> Result<OptSpec, DeclError> {
    OptSpec::builder().short('h').long("help").description("Show this help").build()
}
