//! Trie nodes.

use crate::trie::children::Children;

/// One trie node. Owns its children exclusively.
///
/// Dropping a node recurses once per level below it; owners tear long
/// chains down with [`TrieNode::dismantle`] first.
#[derive(Debug)]
pub(crate) struct TrieNode {
    pub(crate) children: Children,
    /// A stored sequence ends here.
    pub(crate) terminal: bool,
    /// Weight of the sequence ending here; zero when not terminal.
    pub(crate) weight: u64,
}

impl TrieNode {
    pub(crate) fn new(children: Children) -> Self {
        TrieNode {
            children,
            terminal: false,
            weight: 0,
        }
    }

    /// Neither terminal nor a parent: nothing stored passes through here.
    pub(crate) fn is_dead_end(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }

    /// Detach every descendant with an explicit work stack so that the
    /// remaining drops are one level deep.
    pub(crate) fn dismantle(&mut self) {
        let mut pending = Vec::new();
        self.children.drain_into(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.children.drain_into(&mut pending);
        }
    }
}
