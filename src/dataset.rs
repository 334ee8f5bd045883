use std::ops::Index;
use std::rc::Rc;

use tracing::debug;

use crate::action::ActionKey;
use crate::error::LookupError;
use crate::itemstore::ItemStore;
use crate::oracle::Oracle;
use crate::syntree::SynTree;

/// A corpus of oracles and the vocabularies observed in it.
///
/// Vocabularies are filled in a single pass over the oracles in the order given,
/// and within an oracle: its words, its tags, then its actions. The same list
/// always yields the same ids.
#[derive(Debug)]
pub struct OracleDataset<O>
where
  O: Oracle + ?Sized,
{
  oracles: Vec<Rc<O>>,
  pub word2id: ItemStore<String>,
  pub pos2id: ItemStore<String>,
  pub nt2id: ItemStore<String>,
  pub action2id: ItemStore<ActionKey>,
}

/// One oracle as vocabulary ids, ready for a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOracle {
  pub word_ids: Vec<usize>,
  pub pos_ids: Vec<usize>,
  pub action_ids: Vec<usize>,
}

impl<O> OracleDataset<O>
where
  O: Oracle + ?Sized,
{
  pub fn new(oracles: Vec<Rc<O>>) -> Self {
    let mut word2id = ItemStore::new();
    let mut pos2id = ItemStore::new();
    let mut nt2id = ItemStore::new();
    let mut action2id = ItemStore::new();

    for oracle in oracles.iter() {
      for word in oracle.words() {
        word2id.insert(word.clone());
      }
      for tag in oracle.pos_tags() {
        pos2id.insert(tag.clone());
      }
      for action in oracle.actions() {
        if let Some(label) = action.label() {
          nt2id.insert(label.to_string());
        }
        action2id.insert(action.key());
      }
    }

    debug!(
      oracles = oracles.len(),
      words = word2id.len(),
      pos_tags = pos2id.len(),
      nonterminals = nt2id.len(),
      actions = action2id.len(),
      "built oracle vocabularies"
    );

    Self {
      oracles,
      word2id,
      pos2id,
      nt2id,
      action2id,
    }
  }

  pub fn len(&self) -> usize {
    self.oracles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.oracles.is_empty()
  }

  /// The oracle at `idx`, the same `Rc` that was handed in
  pub fn get(&self, idx: usize) -> Option<&Rc<O>> {
    self.oracles.get(idx)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Rc<O>> {
    self.oracles.iter()
  }

  /// Maps the oracle at `idx` onto vocabulary ids.
  pub fn encode(&self, idx: usize) -> Result<EncodedOracle, LookupError> {
    let oracle = self.oracles.get(idx).ok_or(LookupError::OutOfRange {
      id: idx,
      len: self.len(),
    })?;
    Ok(EncodedOracle {
      word_ids: ids(&self.word2id, oracle.words())?,
      pos_ids: ids(&self.pos2id, oracle.pos_tags())?,
      action_ids: oracle
        .actions()
        .iter()
        .map(|a| self.action2id.id_of(&a.key()))
        .collect::<Result<_, _>>()?,
    })
  }
}

impl<O> OracleDataset<O>
where
  O: Oracle,
{
  /// Derives an oracle from every tree with `derive`, then builds the dataset.
  pub fn from_trees<'a, I>(trees: I, derive: fn(&SynTree) -> O) -> Self
  where
    I: IntoIterator<Item = &'a SynTree>,
  {
    Self::new(trees.into_iter().map(|t| Rc::new(derive(t))).collect())
  }
}

fn ids(store: &ItemStore<String>, items: &[String]) -> Result<Vec<usize>, LookupError> {
  items.iter().map(|item| store.id_of(item.as_str())).collect()
}

impl<O> Index<usize> for OracleDataset<O>
where
  O: Oracle + ?Sized,
{
  type Output = Rc<O>;

  fn index(&self, idx: usize) -> &Self::Output {
    &self.oracles[idx]
  }
}

impl<'a, O> IntoIterator for &'a OracleDataset<O>
where
  O: Oracle + ?Sized,
{
  type Item = &'a Rc<O>;
  type IntoIter = std::slice::Iter<'a, Rc<O>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
