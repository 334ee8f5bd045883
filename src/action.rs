use std::fmt;
use std::str::FromStr;

use crate::error::ParseActionError;

/// One move of the shift-reduce transition system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  /// Open a constituent with this nonterminal label.
  NT(String),
  /// Consume the next known terminal (discriminative oracles only).
  Shift,
  /// Produce this terminal (generative oracles only).
  Gen(String),
  /// Close the most recently opened constituent.
  Reduce,
}

impl Action {
  pub fn nt(label: impl Into<String>) -> Self {
    Self::NT(label.into())
  }

  pub fn generate(word: impl Into<String>) -> Self {
    Self::Gen(word.into())
  }

  /// Whether this action consumes or produces a terminal
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Shift | Self::Gen(_))
  }

  pub fn label(&self) -> Option<&str> {
    match self {
      Self::NT(label) => Some(label),
      _ => None,
    }
  }

  /// The entry this action occupies in an action vocabulary.
  pub fn key(&self) -> ActionKey {
    match self {
      Self::NT(label) => ActionKey::NT(label.clone()),
      Self::Shift => ActionKey::Shift,
      Self::Gen(_) => ActionKey::Gen,
      Self::Reduce => ActionKey::Reduce,
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NT(label) => write!(f, "NT({})", label),
      Self::Shift => write!(f, "SHIFT"),
      Self::Gen(word) => write!(f, "GEN({})", word),
      Self::Reduce => write!(f, "REDUCE"),
    }
  }
}

impl FromStr for Action {
  type Err = ParseActionError;

  /// Decodes the canonical form written by `Display`. Payloads are single tokens
  /// without brackets or whitespace.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    regex_static!(NT_ACTION, r"^NT\(([^\s()]+)\)$");
    regex_static!(GEN_ACTION, r"^GEN\(([^\s()]+)\)$");

    match s {
      "SHIFT" => return Ok(Self::Shift),
      "REDUCE" => return Ok(Self::Reduce),
      _ => {}
    }

    if let Some(caps) = NT_ACTION.captures(s) {
      Ok(Self::NT(caps[1].to_string()))
    } else if let Some(caps) = GEN_ACTION.captures(s) {
      Ok(Self::Gen(caps[1].to_string()))
    } else {
      Err(ParseActionError(s.to_string()))
    }
  }
}

/// An action as a vocabulary entry. Nonterminals keep their label; generated
/// words collapse into a single `Gen` entry since words have their own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
  NT(String),
  Shift,
  Gen,
  Reduce,
}

impl From<&Action> for ActionKey {
  fn from(action: &Action) -> Self {
    action.key()
  }
}

impl fmt::Display for ActionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NT(label) => write!(f, "NT({})", label),
      Self::Shift => write!(f, "SHIFT"),
      Self::Gen => write!(f, "GEN"),
      Self::Reduce => write!(f, "REDUCE"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_codec() {
    let actions = vec![
      (Action::nt("S"), "NT(S)"),
      (Action::Shift, "SHIFT"),
      (Action::Reduce, "REDUCE"),
      (Action::generate("John"), "GEN(John)"),
      (Action::nt("-NONE-"), "NT(-NONE-)"),
      (Action::generate("'s"), "GEN('s)"),
    ];

    for (action, text) in actions {
      assert_eq!(action.to_string(), text);
      assert_eq!(text.parse::<Action>(), Ok(action));
    }
  }

  #[test]
  fn test_rejects_malformed() {
    for text in [
      "",
      "shift",
      "SHIFT ",
      " REDUCE",
      "NT()",
      "NT(S",
      "NT(S))",
      "NT(NP VP)",
      "GEN(a(b)",
      "GEN",
      "NT",
      "REDUCE(S)",
    ] {
      assert_eq!(
        text.parse::<Action>(),
        Err(ParseActionError(text.to_string())),
        "{:?} should not decode",
        text
      );
    }
  }

  #[test]
  fn test_keys() {
    assert_eq!(Action::nt("NP").key(), ActionKey::NT("NP".to_string()));
    assert_ne!(Action::nt("NP").key(), Action::nt("VP").key());
    assert_eq!(Action::generate("John").key(), Action::generate("Mary").key());
    assert_eq!(ActionKey::from(&Action::Shift), ActionKey::Shift);
    assert_eq!(ActionKey::Gen.to_string(), "GEN");
    assert!(Action::Shift.is_terminal());
    assert!(!Action::nt("S").is_terminal());
    assert_eq!(Action::nt("S").label(), Some("S"));
  }
}
