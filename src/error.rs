use thiserror::Error;

/// Error raised while declaring the descriptor tree.
///
/// These indicate a bug in the CLI's own declaration code, not bad user
/// input. They surface from `build()` so a malformed tree can never be
/// resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("sub-command `{name}` already exists for route `{route}`")]
    DuplicateSubCommand { route: String, name: String },

    #[error("route `{0}` must have at least one sub-command")]
    EmptyRoute(String),

    #[error("argument `{argument}` already exists for command `{command}`")]
    DuplicateArgument { command: String, argument: String },

    #[error("argument `{argument}` cannot come after optional argument `{optional}` for command `{command}`")]
    ArgumentAfterOptional { command: String, argument: String, optional: String },

    #[error("argument `{argument}` cannot come after argument `{unlimited}` with unlimited values for command `{command}`")]
    ArgumentAfterUnlimited { command: String, argument: String, unlimited: String },

    #[error("multiplicity must be positive for argument `{0}`")]
    InvalidMultiplicity(String),

    #[error("description is required for `{0}`")]
    MissingDescription(String),

    #[error("factory is required for command `{0}`")]
    MissingFactory(String),

    #[error("option must have a short or a long name")]
    UnnamedOption,

    #[error("a root route or command is required")]
    MissingRoot,

    /// Two nodes of the tree declare the same flag name with different
    /// shapes. Both definitions are carried for diagnosis.
    #[error("conflicting option definitions, different {field}: new {new}, existing {existing}")]
    OptionConflict { field: &'static str, new: String, existing: String },
}

/// Error raised while reconciling user input with the declared tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: `{0}`")]
    UnknownCommand(String),

    /// All missing required options of the active descriptor, collected
    /// into one failure.
    #[error("missing required options: {}", join_names(.0))]
    MissingOptions(Vec<String>),

    #[error("argument is required: `{0}`")]
    ArgumentRequired(String),

    #[error("argument has too few values: `{name}` (expected {expected})")]
    TooFewValues { name: String, expected: usize },

    #[error("unhandled argument: `{0}`")]
    UnhandledArgument(String),

    #[error("command is required for route: {0}")]
    CommandRequired(String),

    #[error("unexpected flag: `{0}`")]
    UnexpectedFlag(String),

    #[error("expected a value for `{0}`")]
    ExpectedValue(String),

    #[error("flag does not take a value: `{0}`")]
    UnexpectedValue(String),

    #[error("flags `{0}` and `{1}` cannot be used together")]
    MutuallyExclusive(String, String),

    /// Free-form input error, for command-level `validate` hooks.
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    pub fn msg(msg: impl Into<String>) -> ParseError {
        ParseError::Custom(msg.into())
    }
}

fn join_names(names: &[String]) -> String {
    let names: Vec<String> = names.iter().map(|it| format!("`{it}`")).collect();
    names.join(", ")
}

/// Failure raised by a command's own execution logic.
///
/// The resolver and binder never produce or reinterpret these.
#[derive(Debug, Error)]
#[error("{msg}")]
pub struct CommandError {
    msg: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CommandError {
    pub fn msg(msg: impl Into<String>) -> CommandError {
        CommandError { msg: msg.into(), source: None }
    }

    pub fn with_source(
        msg: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> CommandError {
        CommandError { msg: msg.into(), source: Some(source.into()) }
    }
}

/// Top-level error of a full invocation, keeping the parse class and the
/// execution class apart so the entry point can map them to distinct
/// displays.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl Error {
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

