//! Construction-time configuration for [`TrieIndex`](crate::trie::TrieIndex).

use serde::{Deserialize, Serialize};

use crate::error::{ArboretumError, Result};

/// A contiguous range of `char`s usable with dense child storage.
///
/// Deserialization goes through [`Alphabet::new`], so reversed or oversized
/// bounds are rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AlphabetBounds")]
pub struct Alphabet {
    first: char,
    last: char,
}

/// Unchecked wire form of [`Alphabet`].
#[derive(Deserialize)]
struct AlphabetBounds {
    first: char,
    last: char,
}

impl TryFrom<AlphabetBounds> for Alphabet {
    type Error = ArboretumError;

    fn try_from(bounds: AlphabetBounds) -> Result<Self> {
        Alphabet::new(bounds.first, bounds.last)
    }
}

impl Alphabet {
    /// Largest alphabet accepted by [`Alphabet::new`]. Every dense node
    /// with children allocates one slot per symbol.
    pub const MAX_SIZE: usize = 1024;

    /// Create the alphabet `first..=last`.
    pub fn new(first: char, last: char) -> Result<Self> {
        if first > last {
            return Err(ArboretumError::invalid_argument(format!(
                "alphabet bounds {first:?}..={last:?} are reversed"
            )));
        }
        let alphabet = Alphabet { first, last };
        if alphabet.size() > Self::MAX_SIZE {
            return Err(ArboretumError::invalid_argument(format!(
                "alphabet of {} symbols exceeds the dense limit of {}",
                alphabet.size(),
                Self::MAX_SIZE
            )));
        }
        Ok(alphabet)
    }

    /// `'a'..='z'`.
    pub fn lowercase() -> Self {
        Alphabet {
            first: 'a',
            last: 'z',
        }
    }

    /// `'0'..='9'`.
    pub fn digits() -> Self {
        Alphabet {
            first: '0',
            last: '9',
        }
    }

    /// First symbol.
    pub fn first(&self) -> char {
        self.first
    }

    /// Last symbol.
    pub fn last(&self) -> char {
        self.last
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        (self.last as usize + 1).saturating_sub(self.first as usize)
    }

    /// Whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.first <= symbol && symbol <= self.last
    }

    /// Slot index of `symbol`.
    pub fn slot(&self, symbol: char) -> Option<usize> {
        self.contains(symbol)
            .then(|| symbol as usize - self.first as usize)
    }

    /// Symbol stored in `slot`.
    pub fn symbol(&self, slot: usize) -> Option<char> {
        if slot >= self.size() {
            return None;
        }
        char::from_u32(self.first as u32 + slot as u32)
    }
}

/// How each trie node stores its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildStorage {
    /// A hash map per node. Accepts any `char`.
    #[default]
    Sparse,
    /// A slot array per node indexed by symbol. Faster, but only symbols in
    /// the alphabet can be inserted.
    Dense(Alphabet),
}

/// What a weighted insert does to a sequence that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightPolicy {
    /// Weights are not tracked; completions come back in lexicographic order.
    #[default]
    Unweighted,
    /// Add the new weight to the stored one (saturating).
    Accumulate,
    /// Replace the stored weight.
    Overwrite,
}

impl WeightPolicy {
    /// Whether completions are ranked by weight.
    pub fn is_weighted(self) -> bool {
        !matches!(self, WeightPolicy::Unweighted)
    }
}

/// Configuration for a [`TrieIndex`](crate::trie::TrieIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieConfig {
    /// Child storage strategy.
    pub child_storage: ChildStorage,
    /// Duplicate-insert behavior for weights.
    pub weight_policy: WeightPolicy,
    /// Pattern symbol matching any single symbol in wildcard searches.
    pub wildcard: char,
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            child_storage: ChildStorage::Sparse,
            weight_policy: WeightPolicy::Unweighted,
            wildcard: '.',
        }
    }
}

impl TrieConfig {
    /// Default configuration with dense storage over `alphabet`.
    pub fn dense(alphabet: Alphabet) -> Self {
        TrieConfig {
            child_storage: ChildStorage::Dense(alphabet),
            ..Default::default()
        }
    }

    /// Default configuration with the given weight policy.
    pub fn weighted(weight_policy: WeightPolicy) -> Self {
        TrieConfig {
            weight_policy,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_slots() {
        let alphabet = Alphabet::lowercase();
        assert_eq!(alphabet.size(), 26);
        assert_eq!(alphabet.slot('a'), Some(0));
        assert_eq!(alphabet.slot('z'), Some(25));
        assert_eq!(alphabet.slot('A'), None);
        assert_eq!(alphabet.symbol(2), Some('c'));
        assert_eq!(alphabet.symbol(26), None);
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(Alphabet::new('z', 'a').is_err());
        assert!(Alphabet::new('\0', char::MAX).is_err());
        let custom = Alphabet::new('A', 'Z').unwrap();
        assert_eq!(custom.size(), 26);
        assert_eq!(Alphabet::digits().slot('7'), Some(7));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = TrieConfig {
            child_storage: ChildStorage::Dense(Alphabet::lowercase()),
            weight_policy: WeightPolicy::Accumulate,
            wildcard: '?',
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TrieConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_alphabet_deserialization_is_validated() {
        let alphabet: Alphabet = serde_json::from_str(r#"{"first":"a","last":"f"}"#).unwrap();
        assert_eq!(alphabet.size(), 6);

        assert!(serde_json::from_str::<Alphabet>(r#"{"first":"z","last":"a"}"#).is_err());
        assert!(serde_json::from_str::<Alphabet>(r#"{"first":"a","last":"\u4e00"}"#).is_err());

        let reversed = r#"{"child_storage":{"dense":{"first":"z","last":"a"}}}"#;
        assert!(serde_json::from_str::<TrieConfig>(reversed).is_err());
        let oversized = r#"{"child_storage":{"dense":{"first":"\u0000","last":"\udbff\udfff"}}}"#;
        assert!(serde_json::from_str::<TrieConfig>(oversized).is_err());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: TrieConfig = serde_json::from_str(r#"{"weight_policy":"overwrite"}"#).unwrap();
        assert_eq!(config.weight_policy, WeightPolicy::Overwrite);
        assert_eq!(config.child_storage, ChildStorage::Sparse);
        assert_eq!(config.wildcard, '.');
    }
}
