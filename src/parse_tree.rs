/// Simple recursive-descent reading of bracketed (treebank-style) trees
use std::str::FromStr;

use regex::Regex;

use crate::syntree::{Constituent, SynTree, Word};
use crate::Err;

impl FromStr for SynTree {
  type Err = Err;

  /// Reads exactly one bracketed tree, e.g. `(S (NP (NNP John)) (VP (VBZ sleeps)))`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = skip_whitespace(s);
    let (tree, s) = parse_tree(s, &mut 0)?;
    let s = skip_whitespace(s);
    if s.is_empty() {
      Ok(tree)
    } else {
      Err(format!("trailing input after tree: {}", excerpt(s)).into())
    }
  }
}

/// Reads every bracketed tree in `s`, in order. Trees may be separated by any whitespace.
pub fn read_trees(s: &str) -> Result<Vec<SynTree>, Err> {
  let mut trees = Vec::new();
  let mut rem = skip_whitespace(s);
  while !rem.is_empty() {
    let (tree, s) =
      parse_tree(rem, &mut 0).map_err(|e| -> Err { format!("tree {}: {}", trees.len(), e).into() })?;
    trees.push(tree);
    rem = skip_whitespace(s);
  }
  Ok(trees)
}

type Infallible<'a, T> = (T, &'a str);
type ParseResult<'a, T> = Result<(T, &'a str), Err>;

/// Start of the remaining input, for error messages
fn excerpt(s: &str) -> &str {
  match s.char_indices().nth(24) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

/// Try to consume a regex, returning None if it doesn't match
fn optional_re<'a>(re: &'static Regex, s: &'a str) -> Infallible<'a, Option<&'a str>> {
  match re.find(s) {
    Some(m) if m.start() == 0 => (Some(m.as_str()), &s[m.end()..]),
    _ => (None, s),
  }
}

/// Try to consume a char, returning None if it doesn't match
fn optional_char(c: char, s: &str) -> Infallible<'_, Option<char>> {
  match s.strip_prefix(c) {
    Some(rest) => (Some(c), rest),
    None => (None, s),
  }
}

/// Try to consume a char, failing if it doesn't match
fn needed_char(c: char, s: &str) -> ParseResult<'_, char> {
  if let (Some(c), rest) = optional_char(c, s) {
    Ok((c, rest))
  } else if s.is_empty() {
    Err(format!("expected {} at end of input", c).into())
  } else {
    Err(format!("couldn't match {} at {}", c, excerpt(s)).into())
  }
}

/// Skips 0 or more \s characters
fn skip_whitespace(s: &str) -> &str {
  regex_static!(WHITESPACE, r"^\s+");
  optional_re(&*WHITESPACE, s).1
}

/// A label, tag or word: anything up to whitespace or a bracket
fn optional_token(s: &str) -> Infallible<'_, Option<&str>> {
  regex_static!(TOKEN, r"^[^\s()]+");
  optional_re(&*TOKEN, s)
}

/// Parses one bracket. `next` is the position the next terminal will get.
fn parse_tree<'a>(s: &'a str, next: &mut usize) -> ParseResult<'a, SynTree> {
  let (_, s) = needed_char('(', s)?;
  let s = skip_whitespace(s);
  let (label, s) = optional_token(s);
  let s = skip_whitespace(s);

  if let Some(tag) = label {
    if let (Some(word), s) = optional_token(s) {
      let s = skip_whitespace(s);
      let (_, s) =
        needed_char(')', s).map_err(|e| -> Err { format!("terminal ({} {}: {}", tag, word, e).into() })?;
      let leaf = Word::new(tag, word, *next);
      *next += 1;
      return Ok((SynTree::Leaf(leaf), s));
    }
  }

  let start = *next;
  let mut children = Vec::new();
  let mut rem = s;
  loop {
    rem = skip_whitespace(rem);
    if let (Some(_), s) = optional_char(')', rem) {
      rem = s;
      break;
    }
    let (child, s) = parse_tree(rem, next).map_err(|e| -> Err {
      format!("in ({}: {}", label.unwrap_or(""), e).into()
    })?;
    children.push(child);
    rem = s;
  }

  match label {
    _ if children.is_empty() => Err(format!("empty bracket ({})", label.unwrap_or("")).into()),
    Some(label) => Ok((
      SynTree::Branch(Constituent::new(label, (start, *next)), children),
      rem,
    )),
    // treebanks wrap each sentence in an unlabeled bracket: ( (S ...) )
    None if children.len() == 1 => Ok((children.remove(0), rem)),
    None => Err(format!("unlabeled bracket with {} children", children.len()).into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_read_tree() {
    let t: SynTree = "(S (NP (NNP John)) (VP (VBZ loves) (NP (NNP Mary))))"
      .parse()
      .unwrap();

    let (s, children) = t.get_branch().unwrap();
    assert_eq!(s.label, "S");
    assert_eq!(s.span, (0, 3));
    assert_eq!(children.len(), 2);

    let (vp, _) = children[1].get_branch().unwrap();
    assert_eq!(vp.label, "VP");
    assert_eq!(vp.span, (1, 3));

    let leaves = t.leaves();
    assert_eq!(leaves[2], &Word::new("NNP", "Mary", 2));
  }

  #[test]
  fn test_display_reads_back() {
    let src = "(S (NP (DT the) (NN dog)) (VP (VBD barked)) (. .))";
    let t: SynTree = src.parse().unwrap();
    assert_eq!(t.to_string(), src);
    assert_eq!(t.to_string().parse::<SynTree>().unwrap(), t);
    assert_eq!(format!("{:#}", t).parse::<SynTree>().unwrap(), t);
  }

  #[test]
  fn test_outer_bracket_collapses() {
    let wrapped: SynTree = "( (S (NP (PRP it)) (VP (VBZ works))) )".parse().unwrap();
    let bare: SynTree = "(S (NP (PRP it)) (VP (VBZ works)))".parse().unwrap();
    assert_eq!(wrapped, bare);
  }

  #[test]
  fn test_whitespace_is_free() {
    let t: SynTree = "\n(S\n  (NP (NNP John))\n\t(VP (VBZ sleeps)) )\n".parse().unwrap();
    assert_eq!(t.to_string(), "(S (NP (NNP John)) (VP (VBZ sleeps)))");
  }

  #[test]
  fn test_malformed_trees() {
    for src in [
      "",
      "(S (NP (NNP John))",
      "(S (NP (NNP John)))) ",
      "(S (NP (NNP John)) extra)",
      "(S)",
      "( (NP (NNP a)) (NP (NNP b)) )",
      "(NNP John Mary)",
      "NNP John",
    ] {
      assert!(src.parse::<SynTree>().is_err(), "should not read {:?}", src);
    }
  }

  #[test]
  fn test_read_trees() {
    let trees = read_trees(
      "(S (NP (NNP John)) (VP (VBZ loves) (NP (NNP Mary))))\n\n(S (NP (NNP Mary)) (VP (VBZ sleeps)))\n",
    )
    .unwrap();
    assert_eq!(trees.len(), 2);
    // positions restart for every tree
    assert_eq!(trees[1].leaves()[0].span, (0, 1));

    let err = read_trees("(S (NN a))\n(S (NN b)").unwrap_err();
    assert!(err.to_string().starts_with("tree 1:"), "{}", err);
  }
}
