use pointer_path_types::CoercionType;
use thiserror::Error;

/// Result type alias using PointerError
pub type Result<T> = std::result::Result<T, PointerError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Compile time
    MalformedPath,

    // Traversal/Mutation
    MissingParent,
    InvalidOperation,

    // Adapter
    UnsupportedCoercion,

    // Spec verification
    SpecValidation,

    // Configuration
    InvalidConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedPath => "ERR_MALFORMED_PATH",
            ExErrorKind::MissingParent => "ERR_MISSING_PARENT",
            ExErrorKind::InvalidOperation => "ERR_INVALID_OPERATION",
            ExErrorKind::UnsupportedCoercion => "ERR_UNSUPPORTED_COERCION",
            ExErrorKind::SpecValidation => "ERR_SPEC_VALIDATION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the path and
/// spec context needed to debug a failed traversal or verification.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    spec: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            spec: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add spec context
    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn spec(&self) -> Option<&str> {
        self.spec.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: '{}')", path)?;
        }
        if let Some(spec) = &self.spec {
            write!(f, " (spec: {})", spec)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for pointer compilation, traversal and spec verification
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointerError {
    /// Path string could not be parsed; only raised at compile time
    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    /// A transform target's parent container does not exist
    #[error("Parent is missing for path '{path}'")]
    MissingParent { path: String },

    /// An operation's structural assumption does not hold
    #[error("Invalid operation on '{path}': {reason}")]
    InvalidOperation { path: String, reason: String },

    /// The adapter cannot turn the external value into the requested type
    #[error("Unsupported coercion requested from {value} to {target}")]
    UnsupportedCoercion { value: String, target: CoercionType },

    /// A spec references a path that does not compile
    #[error("{spec} has invalid pointer: {source}")]
    SpecValidation {
        spec: String,
        #[source]
        source: Box<PointerError>,
    },

    /// Engine configuration could not be loaded or is out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl PointerError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        PointerError::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(path: impl ToString, reason: impl Into<String>) -> Self {
        PointerError::InvalidOperation {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Map to the canonical kind without building a full `ExError`
    pub fn kind(&self) -> ExErrorKind {
        match self {
            PointerError::MalformedPath { .. } => ExErrorKind::MalformedPath,
            PointerError::MissingParent { .. } => ExErrorKind::MissingParent,
            PointerError::InvalidOperation { .. } => ExErrorKind::InvalidOperation,
            PointerError::UnsupportedCoercion { .. } => ExErrorKind::UnsupportedCoercion,
            PointerError::SpecValidation { .. } => ExErrorKind::SpecValidation,
            PointerError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
        }
    }
}

impl From<PointerError> for ExError {
    fn from(err: PointerError) -> Self {
        match err {
            PointerError::MalformedPath { path, reason } => ExError::new(ExErrorKind::MalformedPath)
                .with_op("compile")
                .with_path(path)
                .with_message(reason),

            PointerError::MissingParent { path } => ExError::new(ExErrorKind::MissingParent)
                .with_op("apply")
                .with_path(path)
                .with_message("Parent container does not exist"),

            PointerError::InvalidOperation { path, reason } => {
                ExError::new(ExErrorKind::InvalidOperation)
                    .with_path(path)
                    .with_message(reason)
            }

            PointerError::UnsupportedCoercion { value, target } => {
                ExError::new(ExErrorKind::UnsupportedCoercion)
                    .with_op("coerce")
                    .with_message(format!("Cannot coerce {} to {}", value, target))
            }

            PointerError::SpecValidation { spec, source } => {
                ExError::new(ExErrorKind::SpecValidation)
                    .with_op("verify")
                    .with_spec(spec)
                    .with_message("Spec has invalid pointer")
                    .with_source(ExError::from(*source))
            }

            PointerError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(reason),
        }
    }
}
