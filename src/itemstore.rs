use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::LookupError;

/// A bidirectional, insertion-ordered vocabulary. Every distinct item gets
/// the next free id, starting from 0, so ids are dense and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStore<T>
where
  T: Eq + Hash,
{
  items: Vec<T>,
  ids: HashMap<T, usize>,
}

impl<T> Default for ItemStore<T>
where
  T: Eq + Hash,
{
  fn default() -> Self {
    Self {
      items: Vec::new(),
      ids: HashMap::new(),
    }
  }
}

impl<T> ItemStore<T>
where
  T: Eq + Hash + Clone,
{
  pub fn new() -> Self {
    Default::default()
  }

  /// Adds `item` if it's new. Returns its id either way.
  pub fn insert(&mut self, item: T) -> usize {
    if let Some(&id) = self.ids.get(&item) {
      return id;
    }
    let id = self.items.len();
    self.items.push(item.clone());
    self.ids.insert(item, id);
    id
  }

  pub fn get_id<Q>(&self, item: &Q) -> Option<usize>
  where
    T: Borrow<Q>,
    Q: Eq + Hash + ?Sized,
  {
    self.ids.get(item).copied()
  }

  pub fn id_of<Q>(&self, item: &Q) -> Result<usize, LookupError>
  where
    T: Borrow<Q>,
    Q: Eq + Hash + fmt::Debug + ?Sized,
  {
    self
      .get_id(item)
      .ok_or_else(|| LookupError::MissingItem(format!("{:?}", item)))
  }

  pub fn get_item(&self, id: usize) -> Option<&T> {
    self.items.get(id)
  }

  pub fn item_at(&self, id: usize) -> Result<&T, LookupError> {
    self.get_item(id).ok_or(LookupError::OutOfRange {
      id,
      len: self.len(),
    })
  }

  pub fn contains<Q>(&self, item: &Q) -> bool
  where
    T: Borrow<Q>,
    Q: Eq + Hash + ?Sized,
  {
    self.ids.contains_key(item)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Items in id order
  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.items.iter()
  }
}

impl<'a, T> IntoIterator for &'a ItemStore<T>
where
  T: Eq + Hash + Clone,
{
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T> FromIterator<T> for ItemStore<T>
where
  T: Eq + Hash + Clone,
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut store = Self::new();
    for item in iter {
      store.insert(item);
    }
    store
  }
}
