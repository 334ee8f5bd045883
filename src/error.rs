/// Errors raised while reading an oracle from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
  /// Fewer lines than the format needs, or a header line is missing.
  #[error("oracle text too short: expected at least {expected} lines, got {got}")]
  InputTooShort { expected: usize, got: usize },

  /// A line that doesn't fit the format, or counts that disagree. `line` is 1-based.
  #[error("malformed oracle at line {line}: {message}")]
  Format { line: usize, message: String },

  /// The actions don't build exactly one tree. `step` is the 0-based action index.
  #[error("actions don't form a tree at step {step}: {message}")]
  Structure { step: usize, message: String },
}

impl OracleError {
  pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
    Self::Format {
      line,
      message: message.into(),
    }
  }

  pub(crate) fn structure(step: usize, message: impl Into<String>) -> Self {
    Self::Structure {
      step,
      message: message.into(),
    }
  }
}

/// Errors raised by vocabulary lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
  #[error("item {0} is not in the store")]
  MissingItem(String),

  #[error("id {id} is out of range for a store of {len} items")]
  OutOfRange { id: usize, len: usize },
}

/// An action line that matches none of the action forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an action: {0:?}")]
pub struct ParseActionError(pub String);
