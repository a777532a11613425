//! The trie index.

use std::fmt;

use log::debug;

use crate::error::{ArboretumError, Result};
use crate::trie::children::Children;
use crate::trie::config::{ChildStorage, TrieConfig, WeightPolicy};
use crate::trie::iter::Completions;
use crate::trie::node::TrieNode;

/// A prefix tree over `char` sequences.
///
/// Mutations take `&mut self`; concurrent readers sharing `&TrieIndex` are
/// safe because lookups never touch the structure.
pub struct TrieIndex {
    root: TrieNode,
    config: TrieConfig,
    /// Stored sequences.
    len: usize,
    /// Nodes below the root.
    nodes: usize,
}

impl TrieIndex {
    /// Create an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Create an empty trie with a custom configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        TrieIndex {
            root: TrieNode::new(Children::new(&config.child_storage)),
            config,
            len: 0,
            nodes: 0,
        }
    }

    /// The configuration this trie was built with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Store `sequence`. Returns `true` if it was not already stored.
    ///
    /// Inserting an existing sequence changes nothing. The empty sequence
    /// marks the root itself as terminal.
    pub fn insert(&mut self, sequence: &str) -> Result<bool> {
        self.insert_with(sequence, None)
    }

    /// Store `sequence` with `weight`, combining with an existing weight
    /// according to the configured [`WeightPolicy`].
    ///
    /// Fails with [`ArboretumError::UnsupportedOperation`] on an unweighted
    /// trie.
    pub fn insert_weighted(&mut self, sequence: &str, weight: u64) -> Result<bool> {
        if !self.config.weight_policy.is_weighted() {
            return Err(ArboretumError::unsupported(
                "weighted insert into an unweighted trie",
            ));
        }
        self.insert_with(sequence, Some(weight))
    }

    fn insert_with(&mut self, sequence: &str, weight: Option<u64>) -> Result<bool> {
        // Reject before creating any node so a failed insert leaves no partial path.
        if let ChildStorage::Dense(alphabet) = &self.config.child_storage
            && let Some(symbol) = sequence.chars().find(|c| !alphabet.contains(*c))
        {
            return Err(ArboretumError::invalid_argument(format!(
                "symbol {symbol:?} in {sequence:?} is outside the alphabet {:?}..={:?}",
                alphabet.first(),
                alphabet.last()
            )));
        }

        let mut node = &mut self.root;
        let mut created = 0;
        for symbol in sequence.chars() {
            let (child, is_new) = node.children.get_or_insert(symbol)?;
            if is_new {
                created += 1;
            }
            node = child;
        }
        self.nodes += created;

        let inserted = !node.terminal;
        node.terminal = true;
        if let Some(weight) = weight {
            match self.config.weight_policy {
                WeightPolicy::Accumulate => node.weight = node.weight.saturating_add(weight),
                WeightPolicy::Overwrite => node.weight = weight,
                WeightPolicy::Unweighted => {}
            }
        }

        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    fn find(&self, sequence: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for symbol in sequence.chars() {
            node = node.children.get(symbol)?;
        }
        Some(node)
    }

    /// Whether `sequence` itself is stored.
    pub fn contains(&self, sequence: &str) -> bool {
        self.find(sequence).is_some_and(|node| node.terminal)
    }

    /// Whether any stored sequence starts with `prefix`.
    ///
    /// Unlike [`contains`](Self::contains) this ignores the terminal flag of
    /// the node `prefix` leads to.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        // Every node below the root leads to a terminal; the root does only
        // when something is stored.
        self.find(prefix)
            .is_some_and(|node| node.terminal || !node.children.is_empty())
    }

    /// The weight of `sequence`, if stored.
    pub fn weight(&self, sequence: &str) -> Option<u64> {
        self.find(sequence)
            .filter(|node| node.terminal)
            .map(|node| node.weight)
    }

    /// Up to `limit` stored sequences starting with `prefix`.
    ///
    /// Unweighted tries stream matches in lexicographic order. Weighted tries
    /// return the `limit` heaviest matches, ties broken lexicographically.
    pub fn collect(&self, prefix: &str, limit: usize) -> Completions<'_> {
        let Some(start) = self.find(prefix) else {
            return Completions::empty();
        };
        if self.config.weight_policy.is_weighted() {
            Completions::ranked(start, prefix, limit)
        } else {
            Completions::lexicographic(start, prefix, limit)
        }
    }

    /// Every stored sequence in lexicographic order.
    pub fn iter(&self) -> Completions<'_> {
        Completions::lexicographic(&self.root, "", usize::MAX)
    }

    /// Whether some stored sequence matches `pattern`, where the configured
    /// wildcard symbol matches exactly one arbitrary symbol.
    ///
    /// Stops at the first full match.
    pub fn search_wildcard(&self, pattern: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        self.matches_from(&self.root, &pattern)
    }

    fn matches_from(&self, node: &TrieNode, pattern: &[char]) -> bool {
        let Some((&symbol, rest)) = pattern.split_first() else {
            return node.terminal;
        };
        if symbol == self.config.wildcard {
            node.children
                .iter()
                .any(|(_, child)| self.matches_from(child, rest))
        } else {
            node.children
                .get(symbol)
                .is_some_and(|child| self.matches_from(child, rest))
        }
    }

    /// Every stored sequence matching `pattern`, in lexicographic order.
    pub fn wildcard_matches(&self, pattern: &str) -> Vec<String> {
        let pattern: Vec<char> = pattern.chars().collect();
        let mut path = String::new();
        let mut out = Vec::new();
        self.collect_matches(&self.root, &pattern, &mut path, &mut out);
        out
    }

    fn collect_matches(
        &self,
        node: &TrieNode,
        pattern: &[char],
        path: &mut String,
        out: &mut Vec<String>,
    ) {
        let Some((&symbol, rest)) = pattern.split_first() else {
            if node.terminal {
                out.push(path.clone());
            }
            return;
        };

        if symbol == self.config.wildcard {
            for (next, child) in node.children.sorted() {
                path.push(next);
                self.collect_matches(child, rest, path, out);
                path.pop();
            }
        } else if let Some(child) = node.children.get(symbol) {
            path.push(symbol);
            self.collect_matches(child, rest, path, out);
            path.pop();
        }
    }

    /// Stored sequences that are prefixes of `text`, shortest first.
    pub fn prefixes_of(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut node = &self.root;
        if node.terminal {
            out.push(String::new());
        }
        for (offset, symbol) in text.char_indices() {
            match node.children.get(symbol) {
                Some(child) => node = child,
                None => break,
            }
            if node.terminal {
                out.push(text[..offset + symbol.len_utf8()].to_string());
            }
        }
        out
    }

    /// The longest stored sequence that is a prefix of `text`.
    pub fn longest_prefix_of(&self, text: &str) -> Option<String> {
        let mut node = &self.root;
        let mut end = node.terminal.then_some(0);
        for (offset, symbol) in text.char_indices() {
            match node.children.get(symbol) {
                Some(child) => node = child,
                None => break,
            }
            if node.terminal {
                end = Some(offset + symbol.len_utf8());
            }
        }
        end.map(|end| text[..end].to_string())
    }

    /// Remove `sequence`. Returns `false` if it was not stored.
    ///
    /// Nodes left on no path to a stored sequence are pruned, stopping at
    /// the nearest ancestor another sequence still needs.
    pub fn remove(&mut self, sequence: &str) -> bool {
        let symbols: Vec<char> = sequence.chars().collect();
        let Some(cut) = self.removal_cut(&symbols) else {
            return false;
        };

        let stop = cut.map_or(symbols.len(), |depth| depth - 1);
        let mut node = &mut self.root;
        for &symbol in &symbols[..stop] {
            match node.children.get_mut(symbol) {
                Some(child) => node = child,
                None => return false,
            }
        }

        let mut pruned = 0;
        match cut {
            None => {
                node.terminal = false;
                node.weight = 0;
            }
            Some(depth) => {
                if let Some(mut chain) = node.children.remove(symbols[depth - 1]) {
                    chain.dismantle();
                }
                pruned = symbols.len() - depth + 1;
            }
        }

        self.len -= 1;
        self.nodes -= pruned;
        if pruned > 0 {
            debug!("pruned {pruned} trie nodes after removing {sequence:?}");
        }
        true
    }

    /// Where removing `symbols` cuts the trie: `None` if the sequence is not
    /// stored, `Some(None)` if only its terminal flag clears, or
    /// `Some(Some(depth))` if the nodes from `depth` (1-based) to the end of
    /// the path become dead ends.
    fn removal_cut(&self, symbols: &[char]) -> Option<Option<usize>> {
        let mut node = &self.root;
        let mut cut = None;
        for (depth, &symbol) in symbols.iter().enumerate() {
            if depth > 0 {
                if node.terminal || node.children.len() > 1 {
                    cut = None;
                } else if cut.is_none() {
                    cut = Some(depth);
                }
            }
            node = node.children.get(symbol)?;
        }

        if !node.terminal {
            return None;
        }
        if symbols.is_empty() || !node.children.is_empty() {
            return Some(None);
        }
        Some(Some(cut.unwrap_or(symbols.len())))
    }

    /// Number of stored sequences.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Remove every sequence.
    pub fn clear(&mut self) {
        self.root.dismantle();
        self.root = TrieNode::new(Children::new(&self.config.child_storage));
        self.len = 0;
        self.nodes = 0;
    }

    /// Verify the structural invariants: no dead-end node below the root,
    /// weights only on terminal nodes, and the cached counters matching the
    /// structure.
    ///
    /// # Panics
    ///
    /// Panics on the first violation found.
    pub fn check_invariants(&self) {
        let mut terminals = 0;
        let mut nodes = 0;
        let mut pending = vec![(&self.root, true)];
        while let Some((node, is_root)) = pending.pop() {
            assert!(
                is_root || !node.is_dead_end(),
                "trie invariant violated: dead-end node left unpruned"
            );
            assert!(
                node.terminal || node.weight == 0,
                "trie invariant violated: weight on a non-terminal node"
            );
            if node.terminal {
                terminals += 1;
            }
            for (_, child) in node.children.iter() {
                nodes += 1;
                pending.push((child, false));
            }
        }

        assert_eq!(
            terminals, self.len,
            "trie invariant violated: {terminals} terminal nodes but len is {}",
            self.len
        );
        assert_eq!(
            nodes, self.nodes,
            "trie invariant violated: {nodes} nodes but node_count is {}",
            self.nodes
        );
    }
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TrieIndex {
    /// Rebuilds the copy by replaying every stored sequence, which keeps
    /// cloning free of per-level recursion.
    fn clone(&self) -> Self {
        let mut copy = TrieIndex::with_config(self.config.clone());
        for completion in self.iter() {
            let stored = copy.insert_with(&completion.sequence, Some(completion.weight));
            debug_assert!(stored.is_ok(), "replaying a stored sequence cannot fail");
        }
        copy
    }
}

impl Drop for TrieIndex {
    fn drop(&mut self) {
        self.root.dismantle();
    }
}

impl fmt::Debug for TrieIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieIndex")
            .field("len", &self.len)
            .field("nodes", &self.nodes)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::config::Alphabet;
    use crate::trie::iter::Completion;

    fn configs() -> Vec<TrieConfig> {
        vec![TrieConfig::default(), TrieConfig::dense(Alphabet::lowercase())]
    }

    fn sequences(completions: Completions<'_>) -> Vec<String> {
        completions.map(|c| c.sequence).collect()
    }

    #[test]
    fn test_contains_vs_has_prefix() {
        for config in configs() {
            let mut trie = TrieIndex::with_config(config);
            for word in ["apple", "app", "application"] {
                assert!(trie.insert(word).unwrap());
            }

            assert!(trie.contains("app"));
            assert!(!trie.contains("appl"));
            assert!(trie.has_prefix("appl"));
            assert!(trie.has_prefix("applic"));
            assert!(!trie.has_prefix("applz"));
            assert!(!trie.has_prefix("applications"));
            assert_eq!(trie.len(), 3);
            trie.check_invariants();
        }
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut trie = TrieIndex::new();
        assert!(trie.insert("tea").unwrap());
        let nodes = trie.node_count();
        assert!(!trie.insert("tea").unwrap());
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.node_count(), nodes);
    }

    #[test]
    fn test_empty_sequence() {
        let mut trie = TrieIndex::new();
        assert!(!trie.contains(""));
        assert!(!trie.has_prefix(""));

        trie.insert("").unwrap();
        assert!(trie.contains(""));
        assert!(trie.has_prefix(""));
        assert_eq!(trie.node_count(), 0);
        assert_eq!(sequences(trie.iter()), vec![""]);

        assert!(trie.remove(""));
        assert!(!trie.contains(""));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_collect_lexicographic_with_limit() {
        for config in configs() {
            let mut trie = TrieIndex::with_config(config);
            for word in ["card", "care", "car", "cat", "dog", "cart"] {
                trie.insert(word).unwrap();
            }

            assert_eq!(
                sequences(trie.collect("car", 10)),
                vec!["car", "card", "care", "cart"]
            );
            assert_eq!(sequences(trie.collect("ca", 2)), vec!["car", "card"]);
            assert!(sequences(trie.collect("cow", 5)).is_empty());
            assert!(sequences(trie.collect("ca", 0)).is_empty());
        }
    }

    #[test]
    fn test_collect_ranked_by_weight() {
        let mut trie = TrieIndex::with_config(TrieConfig::weighted(WeightPolicy::Accumulate));
        trie.insert_weighted("hello", 5).unwrap();
        trie.insert_weighted("help", 9).unwrap();
        trie.insert_weighted("helium", 5).unwrap();
        trie.insert_weighted("hero", 1).unwrap();
        trie.insert_weighted("hello", 1).unwrap();

        let top: Vec<Completion> = trie.collect("he", 3).collect();
        assert_eq!(
            top,
            vec![
                Completion::new("help", 9),
                Completion::new("hello", 6),
                Completion::new("helium", 5),
            ]
        );
        assert_eq!(trie.weight("hello"), Some(6));
        assert_eq!(trie.weight("hel"), None);
    }

    #[test]
    fn test_weight_policies() {
        let mut overwrite = TrieIndex::with_config(TrieConfig::weighted(WeightPolicy::Overwrite));
        overwrite.insert_weighted("k", 4).unwrap();
        overwrite.insert_weighted("k", 2).unwrap();
        assert_eq!(overwrite.weight("k"), Some(2));

        let mut unweighted = TrieIndex::new();
        assert!(matches!(
            unweighted.insert_weighted("k", 1),
            Err(ArboretumError::UnsupportedOperation(_))
        ));
        assert!(unweighted.is_empty());
    }

    #[test]
    fn test_search_wildcard() {
        for config in configs() {
            let mut trie = TrieIndex::with_config(config);
            for word in ["bad", "dad", "mad"] {
                trie.insert(word).unwrap();
            }
            assert!(!trie.search_wildcard("pad"));
            assert!(trie.search_wildcard("bad"));
            assert!(trie.search_wildcard(".ad"));
            assert!(trie.search_wildcard("b.."));
            assert!(trie.search_wildcard("..."));
            assert!(!trie.search_wildcard(".."));
            assert!(!trie.search_wildcard("...."));
            assert_eq!(trie.wildcard_matches(".ad"), vec!["bad", "dad", "mad"]);
            assert_eq!(trie.wildcard_matches("m.d"), vec!["mad"]);
        }
    }

    #[test]
    fn test_custom_wildcard_symbol() {
        let config = TrieConfig {
            wildcard: '?',
            ..Default::default()
        };
        let mut trie = TrieIndex::with_config(config);
        trie.insert("a.c").unwrap();
        trie.insert("abc").unwrap();
        assert_eq!(trie.wildcard_matches("a?c"), vec!["a.c", "abc"]);
        assert_eq!(trie.wildcard_matches("a.c"), vec!["a.c"]);
    }

    #[test]
    fn test_remove_prunes_dead_ends() {
        for config in configs() {
            let mut trie = TrieIndex::with_config(config);
            trie.insert("app").unwrap();
            trie.insert("apple").unwrap();
            assert_eq!(trie.node_count(), 5);

            assert!(trie.remove("apple"));
            assert_eq!(trie.node_count(), 3);
            assert!(trie.contains("app"));
            assert!(!trie.has_prefix("appl"));
            trie.check_invariants();

            assert!(!trie.remove("apple"));
            assert!(!trie.remove("ap"));

            assert!(trie.remove("app"));
            assert_eq!(trie.node_count(), 0);
            assert!(trie.is_empty());
            trie.check_invariants();
        }
    }

    #[test]
    fn test_remove_keeps_shared_branch() {
        let mut trie = TrieIndex::new();
        trie.insert("team").unwrap();
        trie.insert("tea").unwrap();
        trie.insert("ten").unwrap();

        assert!(trie.remove("tea"));
        assert!(trie.contains("team"));
        assert!(trie.contains("ten"));
        assert_eq!(trie.node_count(), 5);

        assert!(trie.remove("team"));
        assert_eq!(trie.node_count(), 3);
        assert!(trie.has_prefix("te"));
        assert!(!trie.has_prefix("tea"));
        trie.check_invariants();
    }

    #[test]
    fn test_dense_rejects_without_partial_path() {
        let mut trie = TrieIndex::with_config(TrieConfig::dense(Alphabet::lowercase()));
        trie.insert("ok").unwrap();
        assert!(matches!(
            trie.insert("okAY"),
            Err(ArboretumError::InvalidArgument(_))
        ));
        assert_eq!(trie.node_count(), 2);
        assert!(!trie.contains("okAY"));
        trie.check_invariants();
    }

    #[test]
    fn test_prefixes_of() {
        let mut trie = TrieIndex::new();
        for word in ["a", "an", "ant", "antelope", "b"] {
            trie.insert(word).unwrap();
        }
        assert_eq!(trie.prefixes_of("antenna"), vec!["a", "an", "ant"]);
        assert_eq!(trie.longest_prefix_of("antenna"), Some("ant".to_string()));
        assert_eq!(trie.longest_prefix_of("zebra"), None);
        assert!(trie.prefixes_of("").is_empty());
    }

    #[test]
    fn test_unicode_sequences() {
        let mut trie = TrieIndex::new();
        trie.insert("naïve").unwrap();
        trie.insert("naïf").unwrap();
        assert!(trie.has_prefix("naï"));
        assert_eq!(sequences(trie.collect("na", 5)), vec!["naïf", "naïve"]);
        assert_eq!(trie.longest_prefix_of("naïveté"), Some("naïve".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut trie = TrieIndex::new();
        trie.insert("x").unwrap();
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        assert!(!trie.has_prefix("x"));
    }

    #[test]
    fn test_collect_unbounded_limit_on_weighted_trie() {
        let mut trie = TrieIndex::with_config(TrieConfig::weighted(WeightPolicy::Overwrite));
        trie.insert_weighted("ant", 2).unwrap();
        trie.insert_weighted("anvil", 7).unwrap();
        trie.insert_weighted("bee", 1).unwrap();

        assert_eq!(sequences(trie.collect("", usize::MAX)), vec!["anvil", "ant", "bee"]);
        assert_eq!(sequences(trie.collect("an", usize::MAX / 2)), vec!["anvil", "ant"]);
    }

    #[test]
    fn test_very_long_sequence() {
        let long = "a".repeat(300_000);
        let mut trie = TrieIndex::with_config(TrieConfig::weighted(WeightPolicy::Accumulate));
        trie.insert_weighted(&long, 3).unwrap();
        trie.insert("ab").unwrap();
        assert!(trie.contains(&long));
        assert_eq!(trie.node_count(), 300_001);
        trie.check_invariants();

        let copy = trie.clone();
        assert_eq!(copy.weight(&long), Some(3));
        assert_eq!(copy.node_count(), trie.node_count());
        drop(copy);

        assert!(trie.remove(&long));
        assert!(!trie.contains(&long));
        assert_eq!(trie.node_count(), 2);
        assert!(trie.contains("ab"));
        trie.check_invariants();

        trie.insert(&long).unwrap();
        trie.clear();
        assert!(trie.is_empty());

        trie.insert(&long).unwrap();
        drop(trie);
    }

    #[test]
    fn test_remove_middle_of_chain() {
        let mut trie = TrieIndex::new();
        for word in ["a", "abc", "abcde"] {
            trie.insert(word).unwrap();
        }

        assert!(trie.remove("abc"));
        assert_eq!(trie.node_count(), 5);
        assert!(trie.remove("abcde"));
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.remove("ab"));
        trie.check_invariants();
        assert_eq!(sequences(trie.iter()), vec!["a"]);
    }
}
