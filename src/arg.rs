use crate::{DeclError, Result};

/// How many positional values an argument claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// Exactly this many values. Always at least one.
    Fixed(usize),
    /// All remaining positional tokens.
    Unlimited,
}

/// A declared positional parameter slot of a command.
///
/// Arguments only describe shape; the values bound to them during
/// resolution live in a [`Bindings`](crate::Bindings) produced per
/// invocation, so the tree itself stays immutable.
///
/// ```
/// # use cmdroute::Arg;
/// let file = Arg::builder("FILE")
///     .description("The input file")
///     .required()
///     .build()
///     .unwrap();
/// assert!(file.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    name: String,
    description: String,
    required: bool,
    multiplicity: Multiplicity,
}

impl Arg {
    /// Start declaring an argument. The name identifies the argument and
    /// must be unique within its command.
    pub fn builder(name: impl Into<String>) -> ArgBuilder {
        ArgBuilder {
            name: name.into(),
            description: String::new(),
            required: false,
            multiplicity: Multiplicity::Fixed(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }
}

pub struct ArgBuilder {
    name: String,
    description: String,
    required: bool,
    multiplicity: Multiplicity,
}

impl ArgBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Exact number of values this argument takes (default: 1).
    pub fn multiplicity(mut self, count: usize) -> Self {
        self.multiplicity = Multiplicity::Fixed(count);
        self
    }

    /// The argument consumes all remaining positional tokens.
    pub fn unlimited(mut self) -> Self {
        self.multiplicity = Multiplicity::Unlimited;
        self
    }

    pub fn build(self) -> Result<Arg, DeclError> {
        if self.description.is_empty() {
            return Err(DeclError::MissingDescription(self.name));
        }
        if self.multiplicity == Multiplicity::Fixed(0) {
            return Err(DeclError::InvalidMultiplicity(self.name));
        }
        Ok(Arg {
            name: self.name,
            description: self.description,
            required: self.required,
            multiplicity: self.multiplicity,
        })
    }
}
