//! Default tokenizer: splits raw arguments into a flag map and a leftover
//! positional list against the global option set.
//!
//! [`resolve`](crate::resolve) only consumes a [`ParsedLine`], so any
//! external tokenizer producing one can stand in for this module.

use std::collections::HashMap;

use crate::aggregate::OptSet;
use crate::opt::OptSpec;
use crate::{ParseError, Result};

/// The tokenizer's output: parsed flags, addressable by short or long
/// name, plus the positional tokens left over after flag extraction.
#[derive(Debug, Clone, Default)]
pub struct ParsedLine {
    entries: Vec<FlagValues>,
    by_name: HashMap<String, usize>,
    positionals: Vec<String>,
}

#[derive(Debug, Clone)]
struct FlagValues {
    key: String,
    values: Vec<String>,
}

impl ParsedLine {
    pub fn new() -> ParsedLine {
        ParsedLine::default()
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All values collected for the flag, in order of appearance.
    /// Empty when the flag is absent or takes no value.
    pub fn flag_values(&self, name: &str) -> &[String] {
        match self.by_name.get(name) {
            Some(&idx) => &self.entries[idx].values,
            None => &[],
        }
    }

    /// First value of the flag, if any.
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        self.flag_values(name).first().map(String::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn add_positional(&mut self, token: impl Into<String>) {
        self.positionals.push(token.into());
    }

    /// Record an occurrence of `spec` with the given values. Repeated
    /// occurrences accumulate values on one entry, addressable under
    /// both the short and the long name.
    pub fn add_flag(&mut self, spec: &OptSpec, values: Vec<String>) {
        let key = spec.key();
        match self.by_name.get(&key) {
            Some(&idx) => self.entries[idx].values.extend(values),
            None => {
                let idx = self.entries.len();
                self.entries.push(FlagValues { key: key.clone(), values });
                if let Some(short) = spec.short() {
                    self.by_name.insert(short.to_string(), idx);
                }
                if let Some(long) = spec.long() {
                    self.by_name.insert(long.to_string(), idx);
                }
            }
        }
    }

    /// Keys of all flags present, in order of first appearance.
    pub fn flag_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|it| it.key.as_str())
    }
}

/// Parse raw arguments (without the program name) against the global
/// option set.
///
/// Flags may appear before, between, and after positional tokens.
/// Recognized shapes: `--long`, `--long=value`, `-s`, `-s=value`, and a
/// bare `--` ending flag processing. Short flag clustering (`-abc`) is
/// not supported.
pub fn tokenize<I, S>(opts: &OptSet, args: I) -> Result<ParsedLine, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut rargs: Vec<String> = args.into_iter().map(Into::into).collect();
    rargs.reverse();
    let mut line = ParsedLine::new();
    let mut only_positionals = false;
    while let Some(token) = rargs.pop() {
        if only_positionals || !is_flag_token(&token) {
            line.add_positional(token);
            continue;
        }
        if token == "--" {
            only_positionals = true;
            continue;
        }
        let (name, inline) = split_inline(&token);
        let spec = lookup(opts, name)?;
        let mut values = Vec::new();
        if spec.value_count() == 0 {
            if inline.is_some() {
                return Err(ParseError::UnexpectedValue(name.to_string()));
            }
        } else if let Some(inline) = inline {
            push_values(spec, inline, &mut values);
        } else {
            while values.len() < spec.value_count() {
                let next_is_value = matches!(rargs.last(), Some(next) if !is_flag_token(next));
                if !next_is_value {
                    break;
                }
                let next = rargs.pop().unwrap_or_default();
                push_values(spec, &next, &mut values);
            }
            if values.is_empty() && !spec.has_optional_value() {
                return Err(ParseError::ExpectedValue(name.to_string()));
            }
        }
        line.add_flag(spec, values);
    }
    check_groups(opts, &line)?;
    Ok(line)
}

/// A lone `-` is a conventional stdin placeholder, not a flag.
fn is_flag_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn split_inline(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    }
}

fn lookup<'a>(opts: &'a OptSet, name: &str) -> Result<&'a OptSpec, ParseError> {
    let found = match name.strip_prefix("--") {
        Some(long) => opts.find_long(long),
        None => opts.find_short(&name[1..]),
    };
    found.ok_or_else(|| ParseError::UnexpectedFlag(name.to_string()))
}

fn push_values(spec: &OptSpec, token: &str, values: &mut Vec<String>) {
    match spec.value_separator() {
        Some(sep) => values.extend(token.split(sep).map(str::to_string)),
        None => values.push(token.to_string()),
    }
}

/// At most one member of each declared option group may be present.
fn check_groups(opts: &OptSet, line: &ParsedLine) -> Result<(), ParseError> {
    for group in opts.groups() {
        let mut selected: Option<&OptSpec> = None;
        for member in group.options() {
            if !line.has_flag(&member.key()) {
                continue;
            }
            if let Some(first) = selected {
                return Err(ParseError::MutuallyExclusive(first.key(), member.key()));
            }
            selected = Some(member);
        }
    }
    Ok(())
}
