use std::fmt;

/// A phrase node: its nonterminal label and the terminals it covers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Constituent {
  pub label: String,
  pub span: (usize, usize),
}

impl Constituent {
  pub fn new(label: impl Into<String>, span: (usize, usize)) -> Self {
    Self {
      label: label.into(),
      span,
    }
  }
}

/// A tagged terminal. The span always covers exactly one position.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Word {
  pub tag: String,
  pub word: String,
  pub span: (usize, usize),
}

impl Word {
  pub fn new(tag: impl Into<String>, word: impl Into<String>, position: usize) -> Self {
    Self {
      tag: tag.into(),
      word: word.into(),
      span: (position, position + 1),
    }
  }
}

impl fmt::Display for Word {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({} {})", self.tag, self.word)
  }
}

/// A constituency tree. Branches own their children; leaves are tagged words.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SynTree {
  Branch(Constituent, Vec<SynTree>),
  Leaf(Word),
}

impl SynTree {
  pub fn is_leaf(&self) -> bool {
    matches!(self, Self::Leaf(_))
  }

  pub fn is_branch(&self) -> bool {
    matches!(self, Self::Branch(_, _))
  }

  pub fn get_leaf(&self) -> Option<&Word> {
    match self {
      Self::Leaf(w) => Some(w),
      _ => None,
    }
  }

  pub fn get_branch(&self) -> Option<(&Constituent, &Vec<SynTree>)> {
    match self {
      Self::Branch(c, cs) => Some((c, cs)),
      _ => None,
    }
  }

  /// Terminal span covered by this subtree.
  pub fn span(&self) -> (usize, usize) {
    match self {
      Self::Branch(c, _) => c.span,
      Self::Leaf(w) => w.span,
    }
  }

  /// Number of terminals under this subtree.
  pub fn len(&self) -> usize {
    let (start, end) = self.span();
    end.saturating_sub(start)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Terminals in left-to-right order.
  pub fn leaves(&self) -> Vec<&Word> {
    let mut leaves = Vec::new();
    self.collect_leaves(&mut leaves);
    leaves
  }

  fn collect_leaves<'a>(&'a self, into: &mut Vec<&'a Word>) {
    match self {
      Self::Leaf(w) => into.push(w),
      Self::Branch(_, children) => {
        for child in children.iter() {
          child.collect_leaves(into);
        }
      }
    }
  }
}

/// `{}` prints the single-line bracketed form, `{:#}` an indented one.
impl fmt::Display for SynTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Leaf(w) => write!(f, "{}", w),
      Self::Branch(c, ts) if f.alternate() => {
        write!(f, "({}", c.label)?;
        if ts.len() == 1 && ts[0].is_leaf() {
          write!(f, " {})", ts[0])
        } else {
          for t in ts.iter() {
            let fmt = format!("{:#}", t);
            for line in fmt.lines() {
              write!(f, "\n  {}", line)?;
            }
          }
          write!(f, ")")
        }
      }
      Self::Branch(c, ts) => {
        write!(f, "({}", c.label)?;
        for t in ts.iter() {
          write!(f, " {}", t)?;
        }
        write!(f, ")")
      }
    }
  }
}
