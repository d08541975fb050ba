use crate::{DeclError, Result};

/// A named flag recognized by the tokenizer, scoped to the route or
/// command it is declared on.
///
/// ```
/// # use cmdroute::OptSpec;
/// let verbose = OptSpec::builder()
///     .short('v')
///     .long("verbose")
///     .description("Show verbose output")
///     .build()
///     .unwrap();
/// assert_eq!(verbose.key(), "v");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptSpec {
    short: Option<char>,
    long: Option<String>,
    description: String,
    required: bool,
    value_count: usize,
    value_name: Option<String>,
    optional_value: bool,
    value_separator: Option<char>,
}

impl OptSpec {
    pub fn builder() -> OptSpecBuilder {
        OptSpecBuilder {
            short: None,
            long: None,
            description: String::new(),
            required: false,
            value_count: 0,
            value_name: None,
            optional_value: false,
            value_separator: None,
        }
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// How many values the flag claims from the command line. Zero for a
    /// bare switch.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn has_optional_value(&self) -> bool {
        self.optional_value
    }

    pub fn value_separator(&self) -> Option<char> {
        self.value_separator
    }

    /// Canonical name of the flag: the short name if there is one, the
    /// long name otherwise. Used for flag lookup and in error reports.
    pub fn key(&self) -> String {
        match self.short {
            Some(short) => short.to_string(),
            None => self.long.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.matches_short(name) || self.matches_long(name)
    }

    pub(crate) fn matches_short(&self, name: &str) -> bool {
        match self.short {
            Some(short) => {
                let mut chars = name.chars();
                chars.next() == Some(short) && chars.next().is_none()
            }
            None => false,
        }
    }

    pub(crate) fn matches_long(&self, name: &str) -> bool {
        self.long.as_deref() == Some(name)
    }

    /// Copy with the required flag cleared, for the global option set:
    /// requiredness is enforced post-resolution, once the active
    /// descriptor is known.
    pub(crate) fn normalized(&self) -> OptSpec {
        let mut copy = self.clone();
        copy.required = false;
        copy
    }

    /// Render for diagnostics and usage pages, e.g. `-h, --help` or
    /// `    --opt1 <value>`.
    pub(crate) fn label(&self) -> String {
        let mut label = String::new();
        match (self.short, self.long.as_deref()) {
            (Some(short), Some(long)) => {
                label.push('-');
                label.push(short);
                label.push_str(", --");
                label.push_str(long);
            }
            (Some(short), None) => {
                label.push('-');
                label.push(short);
            }
            (None, Some(long)) => {
                label.push_str("    --");
                label.push_str(long);
            }
            (None, None) => {}
        }
        if self.value_count > 0 {
            label.push_str(" <");
            label.push_str(self.value_name.as_deref().unwrap_or("value"));
            label.push('>');
        }
        label
    }
}

pub struct OptSpecBuilder {
    short: Option<char>,
    long: Option<String>,
    description: String,
    required: bool,
    value_count: usize,
    value_name: Option<String>,
    optional_value: bool,
    value_separator: Option<char>,
}

impl OptSpecBuilder {
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The flag takes exactly one value.
    pub fn value(self) -> Self {
        self.values(1)
    }

    /// The flag takes exactly `count` values.
    pub fn values(mut self, count: usize) -> Self {
        self.value_count = count;
        self
    }

    /// Name of the value in usage pages, e.g. `FILE`.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    /// The flag may appear without a value even though it takes one.
    pub fn optional_value(mut self) -> Self {
        self.optional_value = true;
        self
    }

    /// A single token is split into several values at `sep`,
    /// e.g. `--set a=b` with separator `=`.
    pub fn value_separator(mut self, sep: char) -> Self {
        self.value_separator = Some(sep);
        self
    }

    pub fn build(self) -> Result<OptSpec, DeclError> {
        if self.short.is_none() && self.long.is_none() {
            return Err(DeclError::UnnamedOption);
        }
        Ok(OptSpec {
            short: self.short,
            long: self.long,
            description: self.description,
            required: self.required,
            value_count: self.value_count,
            value_name: self.value_name,
            optional_value: self.optional_value,
            value_separator: self.value_separator,
        })
    }
}

/// A set of mutually exclusive options: at most one of them may appear
/// on a single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptGroup {
    options: Vec<OptSpec>,
}

impl OptGroup {
    pub fn new(options: Vec<OptSpec>) -> OptGroup {
        OptGroup { options }
    }

    pub fn options(&self) -> &[OptSpec] {
        &self.options
    }
}
