//! Child storage strategies for trie nodes.

use std::collections::hash_map;
use std::iter::Enumerate;
use std::slice;

use ahash::AHashMap;

use crate::error::{ArboretumError, Result};
use crate::trie::config::{Alphabet, ChildStorage};
use crate::trie::node::TrieNode;

#[derive(Debug)]
pub(crate) enum Children {
    Sparse(AHashMap<char, TrieNode>),
    /// Slots are allocated on the first child and released with the last.
    Dense {
        alphabet: Alphabet,
        slots: Vec<Option<TrieNode>>,
    },
}

impl Children {
    pub(crate) fn new(storage: &ChildStorage) -> Self {
        match storage {
            ChildStorage::Sparse => Children::Sparse(AHashMap::new()),
            ChildStorage::Dense(alphabet) => Children::Dense {
                alphabet: *alphabet,
                slots: Vec::new(),
            },
        }
    }

    /// Empty storage of the same strategy, for a new child node.
    fn empty_like(&self) -> Self {
        match self {
            Children::Sparse(_) => Children::Sparse(AHashMap::new()),
            Children::Dense { alphabet, .. } => Children::Dense {
                alphabet: *alphabet,
                slots: Vec::new(),
            },
        }
    }

    pub(crate) fn get(&self, symbol: char) -> Option<&TrieNode> {
        match self {
            Children::Sparse(map) => map.get(&symbol),
            Children::Dense { alphabet, slots } => {
                slots.get(alphabet.slot(symbol)?).and_then(Option::as_ref)
            }
        }
    }

    pub(crate) fn get_mut(&mut self, symbol: char) -> Option<&mut TrieNode> {
        match self {
            Children::Sparse(map) => map.get_mut(&symbol),
            Children::Dense { alphabet, slots } => {
                slots.get_mut(alphabet.slot(symbol)?).and_then(Option::as_mut)
            }
        }
    }

    /// The child under `symbol`, created if missing. The flag reports
    /// whether it was created.
    pub(crate) fn get_or_insert(&mut self, symbol: char) -> Result<(&mut TrieNode, bool)> {
        let blank = self.empty_like();
        match self {
            Children::Sparse(map) => {
                let mut created = false;
                let child = map.entry(symbol).or_insert_with(|| {
                    created = true;
                    TrieNode::new(blank)
                });
                Ok((child, created))
            }
            Children::Dense { alphabet, slots } => {
                let slot = alphabet
                    .slot(symbol)
                    .ok_or_else(|| outside_alphabet(symbol, alphabet))?;
                if slots.is_empty() {
                    slots.resize_with(alphabet.size(), || None);
                }
                let entry = &mut slots[slot];
                let created = entry.is_none();
                Ok((entry.get_or_insert_with(|| TrieNode::new(blank)), created))
            }
        }
    }

    pub(crate) fn remove(&mut self, symbol: char) -> Option<TrieNode> {
        match self {
            Children::Sparse(map) => map.remove(&symbol),
            Children::Dense { alphabet, slots } => {
                let removed = slots.get_mut(alphabet.slot(symbol)?)?.take();
                if slots.iter().all(Option::is_none) {
                    *slots = Vec::new();
                }
                removed
            }
        }
    }

    /// Move every child into `out`, leaving this storage empty.
    pub(crate) fn drain_into(&mut self, out: &mut Vec<TrieNode>) {
        match self {
            Children::Sparse(map) => out.extend(map.drain().map(|(_, child)| child)),
            Children::Dense { slots, .. } => out.extend(slots.drain(..).flatten()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Children::Sparse(map) => map.len(),
            Children::Dense { slots, .. } => slots.iter().filter(|slot| slot.is_some()).count(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Children::Sparse(map) => map.is_empty(),
            Children::Dense { slots, .. } => slots.iter().all(Option::is_none),
        }
    }

    /// Children in unspecified order.
    pub(crate) fn iter(&self) -> ChildIter<'_> {
        match self {
            Children::Sparse(map) => ChildIter::Sparse(map.iter()),
            Children::Dense { alphabet, slots } => ChildIter::Dense {
                alphabet: *alphabet,
                slots: slots.iter().enumerate(),
            },
        }
    }

    /// Children in ascending symbol order.
    pub(crate) fn sorted(&self) -> Vec<(char, &TrieNode)> {
        let mut children: Vec<(char, &TrieNode)> = self.iter().collect();
        if matches!(self, Children::Sparse(_)) {
            children.sort_unstable_by_key(|(symbol, _)| *symbol);
        }
        children
    }
}

fn outside_alphabet(symbol: char, alphabet: &Alphabet) -> ArboretumError {
    ArboretumError::invalid_argument(format!(
        "symbol {symbol:?} is outside the alphabet {:?}..={:?}",
        alphabet.first(),
        alphabet.last()
    ))
}

pub(crate) enum ChildIter<'a> {
    Sparse(hash_map::Iter<'a, char, TrieNode>),
    Dense {
        alphabet: Alphabet,
        slots: Enumerate<slice::Iter<'a, Option<TrieNode>>>,
    },
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = (char, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ChildIter::Sparse(iter) => iter.next().map(|(symbol, node)| (*symbol, node)),
            ChildIter::Dense { alphabet, slots } => {
                for (slot, child) in slots.by_ref() {
                    if let Some(child) = child
                        && let Some(symbol) = alphabet.symbol(slot)
                    {
                        return Some((symbol, child));
                    }
                }
                None
            }
        }
    }
}
