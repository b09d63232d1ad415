use std::fmt;

/// Recipe expansion or configuration validation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two (possibly quality-expanded) recipes ended up sharing a name.
    DuplicateRecipeName(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateRecipeName(name) => {
                write!(f, "duplicate recipe name after expansion: {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A clamp was asked to enforce `min > max`. Only reachable through a
/// programming error; production configurations never trigger it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(pub String);

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}

/// Top-level failure mode for building an [`crate::engine::Engine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Config(ConfigError),
    Invariant(InvariantError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "{e}"),
            EngineError::Invariant(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<InvariantError> for EngineError {
    fn from(e: InvariantError) -> Self {
        EngineError::Invariant(e)
    }
}

/// Clamps `val` into `[min, max]`, matching the Python controller's
/// `_Clamp`. Returns [`InvariantError`] if `min > max`, which would mean
/// the caller passed bad constants rather than bad configuration data.
pub fn clamp(val: f64, min: f64, max: f64) -> Result<f64, InvariantError> {
    if min > max {
        return Err(InvariantError(format!("clamp bounds inverted: min={min} max={max}")));
    }
    Ok(if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    })
}
