//! Oracles: the shift-reduce action sequence that builds a given constituency tree.
//!
//! A discriminative oracle ([`DiscOracle`]) assumes the words are known and only
//! `SHIFT`s them; a generative oracle ([`GenOracle`]) emits every word itself
//! with `GEN(word)`. Both can be derived from a [`SynTree`], written to and read
//! from a line-oriented text form, and turned back into the tree they describe.
//!
//! Discriminative text form:
//!
//! ```text
//! John loves Mary
//! NNP VBZ NNP
//! NT(S)
//! NT(NP)
//! SHIFT
//! REDUCE
//! ...
//! ```
//!
//! The generative form drops the words line, since the words are carried by the
//! `GEN` actions.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::action::Action;
use crate::error::OracleError;
use crate::syntree::{Constituent, SynTree, Word};
use crate::utils::tokens;

/// What every oracle offers, whichever way it treats terminals.
pub trait Oracle: fmt::Debug + fmt::Display {
  fn actions(&self) -> &[Action];

  /// One tag per terminal, left to right
  fn pos_tags(&self) -> &[String];

  /// One word per terminal, aligned with `pos_tags`
  fn words(&self) -> &[String];

  /// The line-oriented text form, which reads back into an equal oracle.
  fn to_text(&self) -> String {
    self.to_string()
  }

  /// Number of terminals
  fn len(&self) -> usize {
    self.pos_tags().len()
  }

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Runs the actions as a stack program and returns the tree they build.
  fn to_tree(&self) -> Result<SynTree, OracleError> {
    build_tree(self.actions(), self.pos_tags(), self.words())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscOracle {
  actions: Vec<Action>,
  pos_tags: Vec<String>,
  words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOracle {
  actions: Vec<Action>,
  pos_tags: Vec<String>,
  words: Vec<String>,
}

impl DiscOracle {
  pub fn from_tree(tree: &SynTree) -> Self {
    let d = Derivation::run(tree, |_| Action::Shift);
    trace!(terminals = d.words.len(), actions = d.actions.len(), "derived discriminative oracle");
    Self {
      actions: d.actions,
      pos_tags: d.pos_tags,
      words: d.words,
    }
  }
}

impl GenOracle {
  pub fn from_tree(tree: &SynTree) -> Self {
    let d = Derivation::run(tree, |w| Action::Gen(w.word.clone()));
    trace!(terminals = d.words.len(), actions = d.actions.len(), "derived generative oracle");
    Self {
      actions: d.actions,
      pos_tags: d.pos_tags,
      words: d.words,
    }
  }
}

impl Oracle for DiscOracle {
  fn actions(&self) -> &[Action] {
    &self.actions
  }

  fn pos_tags(&self) -> &[String] {
    &self.pos_tags
  }

  fn words(&self) -> &[String] {
    &self.words
  }
}

impl Oracle for GenOracle {
  fn actions(&self) -> &[Action] {
    &self.actions
  }

  fn pos_tags(&self) -> &[String] {
    &self.pos_tags
  }

  fn words(&self) -> &[String] {
    &self.words
  }
}

/// Output of the pre-order walk shared by both oracle kinds
struct Derivation {
  actions: Vec<Action>,
  pos_tags: Vec<String>,
  words: Vec<String>,
}

impl Derivation {
  /// Walks `tree` depth-first, left to right. Branches become `NT(label) ... REDUCE`,
  /// terminals become whatever `on_leaf` returns.
  fn run<F>(tree: &SynTree, on_leaf: F) -> Self
  where
    F: Fn(&Word) -> Action,
  {
    let mut d = Self {
      actions: Vec::new(),
      pos_tags: Vec::new(),
      words: Vec::new(),
    };
    d.visit(tree, &on_leaf);
    d
  }

  fn visit<F>(&mut self, tree: &SynTree, on_leaf: &F)
  where
    F: Fn(&Word) -> Action,
  {
    match tree {
      SynTree::Branch(c, children) => {
        self.actions.push(Action::NT(c.label.clone()));
        for child in children.iter() {
          self.visit(child, on_leaf);
        }
        self.actions.push(Action::Reduce);
      }
      SynTree::Leaf(w) => {
        self.pos_tags.push(w.tag.clone());
        self.words.push(w.word.clone());
        self.actions.push(on_leaf(w));
      }
    }
  }
}

impl FromStr for DiscOracle {
  type Err = OracleError;

  /// Reads a words line, a tags line and one action per line. `GEN` actions aren't allowed.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (header, body) = split_header(s, 2)?;

    let words = tokens(header[0]);
    if words.is_empty() {
      return Err(OracleError::format(1, "no words"));
    }
    let pos_tags = tokens(header[1]);
    if pos_tags.len() != words.len() {
      // "a b\nNT(S)\nSHIFT\n..." is missing its tags line, not carrying one tag "NT(S)"
      if header[1].trim().parse::<Action>().is_ok() {
        return Err(OracleError::InputTooShort {
          expected: 3,
          got: 2,
        });
      }
      return Err(OracleError::format(
        2,
        format!("{} tags for {} words", pos_tags.len(), words.len()),
      ));
    }

    let actions = parse_actions(&body, |a| !matches!(a, Action::Gen(_)), "discriminative")?;
    check_structure(&actions, pos_tags.len())?;
    trace!(terminals = words.len(), actions = actions.len(), "read discriminative oracle");

    Ok(Self {
      actions: actions.into_iter().map(|(_, a)| a).collect(),
      pos_tags,
      words,
    })
  }
}

impl FromStr for GenOracle {
  type Err = OracleError;

  /// Reads a tags line and one action per line. Words are taken from the `GEN` actions;
  /// `SHIFT` isn't allowed.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (header, body) = split_header(s, 1)?;

    let pos_tags = tokens(header[0]);
    if pos_tags.is_empty() {
      return Err(OracleError::format(1, "no tags"));
    }

    let actions = parse_actions(&body, |a| !matches!(a, Action::Shift), "generative")?;
    check_structure(&actions, pos_tags.len())?;
    trace!(terminals = pos_tags.len(), actions = actions.len(), "read generative oracle");

    let actions = actions.into_iter().map(|(_, a)| a).collect::<Vec<_>>();
    let words = actions
      .iter()
      .filter_map(|a| match a {
        Action::Gen(w) => Some(w.clone()),
        _ => None,
      })
      .collect();

    Ok(Self {
      actions,
      pos_tags,
      words,
    })
  }
}

impl fmt::Display for DiscOracle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n{}", self.words.join(" "), self.pos_tags.join(" "))?;
    for action in self.actions.iter() {
      write!(f, "\n{}", action)?;
    }
    Ok(())
  }
}

impl fmt::Display for GenOracle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.pos_tags.join(" "))?;
    for action in self.actions.iter() {
      write!(f, "\n{}", action)?;
    }
    Ok(())
  }
}

/// Splits oracle text into `header_len` header lines and the numbered action lines after them.
/// Header lines are taken literally, even when they look like actions.
fn split_header(s: &str, header_len: usize) -> Result<(Vec<&str>, Vec<(usize, &str)>), OracleError> {
  let mut lines = s.lines().collect::<Vec<_>>();
  while lines.last().is_some_and(|l| l.trim().is_empty()) {
    lines.pop();
  }

  if lines.len() <= header_len {
    return Err(OracleError::InputTooShort {
      expected: header_len + 1,
      got: lines.len(),
    });
  }

  let body = lines
    .iter()
    .enumerate()
    .skip(header_len)
    .map(|(idx, l)| (idx + 1, *l))
    .collect();
  lines.truncate(header_len);
  Ok((lines, body))
}

/// Decodes numbered action lines, rejecting actions `allowed` refuses.
fn parse_actions(
  lines: &[(usize, &str)],
  allowed: impl Fn(&Action) -> bool,
  kind: &str,
) -> Result<Vec<(usize, Action)>, OracleError> {
  lines
    .iter()
    .map(|&(line, text)| {
      let action = text
        .trim()
        .parse::<Action>()
        .map_err(|e| OracleError::format(line, e.to_string()))?;
      if allowed(&action) {
        Ok((line, action))
      } else {
        Err(OracleError::format(
          line,
          format!("{} is not allowed in a {} oracle", action, kind),
        ))
      }
    })
    .collect()
}

/// Checks that the actions form a balanced stack program over exactly `terminals` terminals.
fn check_structure(actions: &[(usize, Action)], terminals: usize) -> Result<(), OracleError> {
  // children seen so far by each open constituent
  let mut open: Vec<usize> = Vec::new();
  let mut seen = 0;
  let mut last_line = 0;

  for (line, action) in actions.iter() {
    last_line = *line;
    match action {
      Action::NT(_) => {
        if let Some(count) = open.last_mut() {
          *count += 1;
        }
        open.push(0);
      }
      Action::Shift | Action::Gen(_) => {
        seen += 1;
        if seen > terminals {
          return Err(OracleError::format(
            *line,
            format!("more terminals than the {} declared tags", terminals),
          ));
        }
        if let Some(count) = open.last_mut() {
          *count += 1;
        }
      }
      Action::Reduce => match open.pop() {
        None => return Err(OracleError::format(*line, "REDUCE with no open constituent")),
        Some(0) => return Err(OracleError::format(*line, "REDUCE of an empty constituent")),
        Some(_) => {}
      },
    }
  }

  if !open.is_empty() {
    Err(OracleError::format(
      last_line,
      format!("{} constituents never reduced", open.len()),
    ))
  } else if seen != terminals {
    Err(OracleError::format(
      last_line,
      format!("{} terminals for {} declared tags", seen, terminals),
    ))
  } else {
    Ok(())
  }
}

enum StackItem {
  Open(String, usize),
  Done(SynTree),
}

fn build_tree(actions: &[Action], pos_tags: &[String], words: &[String]) -> Result<SynTree, OracleError> {
  let mut stack = Vec::new();
  let mut next = 0;

  for (step, action) in actions.iter().enumerate() {
    match action {
      Action::NT(label) => stack.push(StackItem::Open(label.clone(), next)),
      Action::Shift | Action::Gen(_) => {
        let (tag, word) = match (pos_tags.get(next), words.get(next)) {
          (Some(tag), Some(word)) => (tag, word),
          _ => return Err(OracleError::structure(step, "ran out of terminals")),
        };
        stack.push(StackItem::Done(SynTree::Leaf(Word::new(
          tag.clone(),
          word.clone(),
          next,
        ))));
        next += 1;
      }
      Action::Reduce => {
        let mut children = Vec::new();
        let (label, start) = loop {
          match stack.pop() {
            Some(StackItem::Done(tree)) => children.push(tree),
            Some(StackItem::Open(label, start)) => break (label, start),
            None => return Err(OracleError::structure(step, "REDUCE with no open constituent")),
          }
        };
        if children.is_empty() {
          return Err(OracleError::structure(step, "REDUCE of an empty constituent"));
        }
        children.reverse();
        stack.push(StackItem::Done(SynTree::Branch(
          Constituent::new(label, (start, next)),
          children,
        )));
      }
    }
  }

  match (stack.pop(), stack.is_empty()) {
    (Some(StackItem::Done(tree)), true) => Ok(tree),
    (None, _) => Err(OracleError::structure(actions.len(), "no actions")),
    _ => Err(OracleError::structure(
      actions.len(),
      "actions don't build a single tree",
    )),
  }
}
