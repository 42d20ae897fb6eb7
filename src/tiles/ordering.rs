use std::collections::{BTreeSet, HashMap};

/// Curated sequence that keeps terrain ahead of structures in the atlas.
const DEFAULT_ORDER: &[&str] = &[
    // Grass
    "grass00", "grass01",
    // Water
    "water00", "water01", "water02", "water03", "water04", "water05", "water06",
    "water07", "water08", "water09", "water10", "water11", "water12", "water13",
    // Road
    "road00", "road01", "road02", "road03", "road04", "road05", "road06",
    "road07", "road08", "road09", "road10", "road11", "road12",
    // Structures and props
    "earth", "floor01", "wall", "tree", "hut", "table01",
    "stone", "sand", "lava", "ice", "bridge", "door", "chest", "sign",
];

// ── CanonicalOrder ────────────────────────────────────────────────────────────

/// Preferred tile sequence that fixes TileID assignment.
///
/// Names listed here sort by their position; any other discovered name sorts
/// after all of them, lexicographically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalOrder {
    names: Vec<String>,
    rank: HashMap<String, usize>,
}

impl CanonicalOrder {
    /// Build from an explicit sequence. A repeated name keeps its first index.
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut rank = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            rank.entry(name.clone()).or_insert(i);
        }
        Self { names, rank }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of `name` in the canonical sequence, if listed.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.rank.get(name).copied()
    }

    /// Deterministic permutation of `discovered`; index in the result is the TileID.
    pub fn order(&self, discovered: &BTreeSet<String>) -> Vec<String> {
        let fallback = self.names.len();
        let mut ordered: Vec<&String> = discovered.iter().collect();
        // Unlisted names share the fallback rank; the name breaks the tie.
        ordered.sort_by(|a, b| {
            let ka = (self.rank(a).unwrap_or(fallback), a.as_str());
            let kb = (self.rank(b).unwrap_or(fallback), b.as_str());
            ka.cmp(&kb)
        });
        ordered.into_iter().cloned().collect()
    }
}

impl Default for CanonicalOrder {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER.iter().copied())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonical_names_first_then_unknowns_lexicographically() {
        let order = CanonicalOrder::new(["grass00", "road00", "wall"]);
        let out = order.order(&set(&["wall", "grass00", "zzzztile"]));
        assert_eq!(out, vec!["grass00", "wall", "zzzztile"]);
    }

    #[test]
    fn unknown_names_sort_after_every_canonical_name() {
        let order = CanonicalOrder::new(["wall"]);
        let out = order.order(&set(&["aaa", "wall", "bbb"]));
        assert_eq!(out, vec!["wall", "aaa", "bbb"]);
    }

    #[test]
    fn order_is_deterministic() {
        let order = CanonicalOrder::default();
        let input = set(&["sign", "mushroom", "grass01", "water03", "apple", "grass00"]);
        let first = order.order(&input);
        let second = order.order(&input);
        assert_eq!(first, second);
        assert_eq!(first, vec!["grass00", "grass01", "water03", "sign", "apple", "mushroom"]);
    }

    #[test]
    fn empty_input_gives_empty_order() {
        assert!(CanonicalOrder::default().order(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn repeated_canonical_entry_keeps_first_index() {
        let order = CanonicalOrder::new(["b", "a", "b"]);
        assert_eq!(order.rank("b"), Some(0));
        assert_eq!(order.order(&set(&["a", "b"])), vec!["b", "a"]);
    }

    #[test]
    fn default_sequence_starts_with_grass_and_ends_with_sign() {
        let order = CanonicalOrder::default();
        assert_eq!(order.names().first().map(String::as_str), Some("grass00"));
        assert_eq!(order.names().last().map(String::as_str), Some("sign"));
        assert_eq!(order.names().len(), 43);
    }
}
