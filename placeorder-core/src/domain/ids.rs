use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a take-profit row.
///
/// Assigned once when the row is created and never reused within a list,
/// so two rows with the same profit value stay distinguishable for removal
/// and error association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrancheId(pub u64);

impl From<u64> for TrancheId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrancheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_hash_prefixed() {
        assert_eq!(TrancheId(7).to_string(), "#7");
    }

    #[test]
    fn ordering_follows_sequence() {
        assert!(TrancheId::from(1) < TrancheId::from(2));
    }
}
