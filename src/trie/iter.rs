//! Lazy enumeration of stored sequences below a prefix.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::iter::FusedIterator;
use std::vec;

use crate::trie::node::TrieNode;

/// A stored sequence returned by prefix enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Completion {
    /// The full stored sequence, prefix included.
    pub sequence: String,
    /// Its weight; zero in unweighted tries.
    pub weight: u64,
}

impl Completion {
    /// Create a new completion.
    pub fn new<S: Into<String>>(sequence: S, weight: u64) -> Self {
        Completion {
            sequence: sequence.into(),
            weight,
        }
    }
}

/// Iterator over completions, produced by
/// [`TrieIndex::collect`](crate::trie::TrieIndex::collect) and
/// [`TrieIndex::iter`](crate::trie::TrieIndex::iter).
///
/// Single pass: once exhausted it stays exhausted. Calling `collect` again
/// starts a fresh traversal.
pub struct Completions<'a> {
    inner: Source<'a>,
    remaining: usize,
}

enum Source<'a> {
    /// Lexicographic pre-order walk, streamed.
    Walk(Walk<'a>),
    /// Weight-ranked results, selected up front.
    Ranked(vec::IntoIter<Completion>),
}

impl<'a> Completions<'a> {
    pub(crate) fn empty() -> Self {
        Completions {
            inner: Source::Ranked(Vec::new().into_iter()),
            remaining: 0,
        }
    }

    /// Stream sequences under `start` in lexicographic order.
    pub(crate) fn lexicographic(start: &'a TrieNode, prefix: &str, limit: usize) -> Self {
        Completions {
            inner: Source::Walk(Walk::new(start, prefix)),
            remaining: limit,
        }
    }

    /// Select the `limit` heaviest sequences under `start`, ties broken
    /// lexicographically.
    pub(crate) fn ranked(start: &'a TrieNode, prefix: &str, limit: usize) -> Self {
        if limit == 0 {
            return Completions::empty();
        }

        // `limit` may be `usize::MAX`; the heap grows with the matches instead.
        let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::new();
        for completion in Walk::new(start, prefix) {
            heap.push(Reverse(Ranked(completion)));
            if heap.len() > limit {
                heap.pop();
            }
        }

        // Ascending `Reverse<Ranked>` is best-first.
        let best: Vec<Completion> = heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(completion))| completion)
            .collect();

        Completions {
            remaining: best.len(),
            inner: Source::Ranked(best.into_iter()),
        }
    }
}

impl Iterator for Completions<'_> {
    type Item = Completion;

    fn next(&mut self) -> Option<Completion> {
        if self.remaining == 0 {
            return None;
        }
        let next = match &mut self.inner {
            Source::Walk(walk) => walk.next(),
            Source::Ranked(ranked) => ranked.next(),
        };
        match next {
            Some(completion) => {
                self.remaining -= 1;
                Some(completion)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }
}

impl FusedIterator for Completions<'_> {}

/// Depth-first pre-order walk with an explicit stack. Children are pushed
/// in descending symbol order so they pop in ascending order, and a node is
/// emitted before its descendants.
///
/// All entries share one path buffer; each records the byte length of its
/// parent's path, so the buffer is truncated back to it on pop.
struct Walk<'a> {
    path: String,
    stack: Vec<(usize, Option<char>, &'a TrieNode)>,
}

impl<'a> Walk<'a> {
    fn new(start: &'a TrieNode, prefix: &str) -> Self {
        Walk {
            path: prefix.to_string(),
            stack: vec![(prefix.len(), None, start)],
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Completion;

    fn next(&mut self) -> Option<Completion> {
        while let Some((parent_len, symbol, node)) = self.stack.pop() {
            self.path.truncate(parent_len);
            if let Some(symbol) = symbol {
                self.path.push(symbol);
            }
            let len = self.path.len();
            for (symbol, child) in node.children.sorted().into_iter().rev() {
                self.stack.push((len, Some(symbol), child));
            }
            if node.terminal {
                return Some(Completion {
                    sequence: self.path.clone(),
                    weight: node.weight,
                });
            }
        }
        None
    }
}

/// Orders completions so that "greater" means "ranks earlier": heavier
/// first, then lexicographically smaller.
#[derive(PartialEq, Eq)]
struct Ranked(Completion);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .weight
            .cmp(&other.0.weight)
            .then_with(|| other.0.sequence.cmp(&self.0.sequence))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
