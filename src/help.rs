//! Usage page rendering for routes and commands.
//!
//! Pages are rendered for the position the route resolution reached, so
//! `tool -h`, `tool route -h` and `tool route cmd -h` each get their own
//! page. Routes list their sub-commands, commands list their arguments.

use crate::arg::{Arg, Multiplicity};
use crate::opt::OptSpec;
use crate::resolve::CommandRoute;

const WIDTH: usize = 74;
const LEFT_PAD: usize = 1;
const DESC_PAD: usize = 3;

/// Render the usage page for the descriptor the route resolved to.
///
/// `help_opt` is the auto-added help option, listed on every page when
/// configured; pass `None` when auto-add is disabled.
pub fn usage(route: &CommandRoute<'_>, help_opt: Option<&OptSpec>) -> String {
    let Some(active) = route.active() else {
        return String::new();
    };
    let mut options: Vec<&OptSpec> = active.options().iter().collect();
    if let Some(help_opt) = help_opt {
        if !options.iter().any(|it| it.key() == help_opt.key()) {
            options.push(help_opt);
        }
    }

    let mut out = String::new();
    out.push_str("usage: ");
    out.push_str(&route.full_path());
    if !options.is_empty() {
        out.push_str(" [OPTIONS]");
    }
    if let Some(cmd) = route.command() {
        for arg in cmd.args() {
            out.push(' ');
            out.push_str(&arg_syntax(arg));
        }
    }
    out.push('\n');

    out.push('\n');
    out.push_str(active.description());
    out.push('\n');

    if !options.is_empty() {
        out.push_str("\nOptions:\n");
        let labels: Vec<String> = options.iter().map(|it| it.label()).collect();
        let max = labels.iter().map(String::len).max().unwrap_or(0);
        for (opt, label) in options.iter().zip(&labels) {
            entry(&mut out, label, max, opt.description());
        }
    }

    match route.command() {
        Some(cmd) => {
            if !cmd.args().is_empty() {
                out.push_str("\nArguments:\n");
                named_entries(&mut out, cmd.args().iter().map(|it| (it.name(), it.description())));
            }
        }
        None => {
            if let Some(last) = route.path().last() {
                out.push_str("\nCommands:\n");
                named_entries(
                    &mut out,
                    last.sub_commands().iter().map(|it| (it.name(), it.description())),
                );
            }
        }
    }
    out
}

/// Positional syntax of one argument: `<ARG>`, `[<ARG>...]`, `<ARG>{2}`.
pub fn arg_syntax(arg: &Arg) -> String {
    let mut syntax = String::new();
    if !arg.is_required() {
        syntax.push('[');
    }
    syntax.push('<');
    syntax.push_str(arg.name());
    syntax.push('>');
    match arg.multiplicity() {
        Multiplicity::Unlimited => syntax.push_str("..."),
        Multiplicity::Fixed(count) if count > 1 => {
            syntax.push('{');
            syntax.push_str(&count.to_string());
            syntax.push('}');
        }
        Multiplicity::Fixed(_) => {}
    }
    if !arg.is_required() {
        syntax.push(']');
    }
    syntax
}

fn named_entries<'n>(out: &mut String, items: impl Iterator<Item = (&'n str, &'n str)> + Clone) {
    let max = items.clone().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, description) in items {
        entry(out, name, max, description);
    }
}

/// One aligned entry: padded label column, then the description wrapped
/// with a hanging indent.
fn entry(out: &mut String, label: &str, label_width: usize, description: &str) {
    let column = format!("{:pad$}{:<width$}{:gap$}", "", label, "", pad = LEFT_PAD, width = label_width, gap = DESC_PAD);
    let hang = column.len();
    out.push_str(&column);
    let mut col = hang;
    for word in description.split_whitespace() {
        if col > hang {
            if col + 1 + word.len() > WIDTH {
                out.push('\n');
                for _ in 0..hang {
                    out.push(' ');
                }
                col = hang;
            } else {
                out.push(' ');
                col += 1;
            }
        }
        out.push_str(word);
        col += word.len();
    }
    // trailing spaces would survive an empty description otherwise
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
