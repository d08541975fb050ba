//! Hierarchical command routing and positional argument binding for
//! "git-style" command line tools.
//!
//! A tool declares an immutable tree of routes (named groups of
//! sub-commands) and commands (executable leaves with ordered positional
//! arguments). Per invocation, the raw arguments are tokenized against
//! the option set aggregated from the whole tree, the positional tokens
//! are walked down the tree to find the command, and the leftover tokens
//! are bound to that command's arguments under strict multiplicity
//! rules. Anything that cannot be reconciled with the declared shape
//! fails with a structured error the moment it is detected.
//!
//! ```no_run
//! use cmdroute::{Arg, Cli, CmdDesc, Context, OptSpec, RouteDesc};
//!
//! fn tree() -> Result<RouteDesc, cmdroute::DeclError> {
//!     let add = CmdDesc::builder("add")
//!         .description("Track a new remote")
//!         .opt(OptSpec::builder().short('f').long("fetch").description("Fetch after adding").build()?)
//!         .arg(Arg::builder("NAME").description("Remote name").required().build()?)
//!         .arg(Arg::builder("URL").description("Remote URL").required().build()?)
//!         .handler(|ctx: &Context<'_>| {
//!             println!("adding {} -> {}", ctx.arg_values("NAME")[0], ctx.arg_values("URL")[0]);
//!             Ok(())
//!         })
//!         .build()?;
//!     RouteDesc::builder("my-cli")
//!         .description("My command line tool")
//!         .sub(RouteDesc::builder("remote").description("Manage remotes").sub(add).build()?)
//!         .build()
//! }
//!
//! fn main() {
//!     let cli = Cli::builder().root(tree().unwrap()).build().unwrap();
//!     cli.main();
//! }
//! ```

mod aggregate;
mod arg;
mod cli;
mod context;
mod error;
mod opt;
mod resolve;
mod tokenize;
mod tree;

pub mod help;

pub use crate::aggregate::{aggregate, OptSet};
pub use crate::arg::{Arg, ArgBuilder, Multiplicity};
pub use crate::cli::{Cli, CliBuilder, Outcome};
pub use crate::context::{Command, CommandFactory, Context};
pub use crate::error::{CommandError, DeclError, Error, ParseError};
pub use crate::opt::{OptGroup, OptSpec, OptSpecBuilder};
pub use crate::resolve::{resolve, Active, Bindings, CommandRoute, Resolution};
pub use crate::tokenize::{tokenize, ParsedLine};
pub use crate::tree::{CmdBuilder, CmdDesc, Descriptor, RouteBuilder, RouteDesc};

pub type Result<T, E = Error> = std::result::Result<T, E>;
