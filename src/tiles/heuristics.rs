// ── TileMetadata ──────────────────────────────────────────────────────────────

/// Per-tile facts derived from the file name alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMetadata {
    pub name: String,
    /// Whether the tile blocks movement.
    pub collision: bool,
    /// Human-readable phrase written to the config and properties artifacts.
    pub description: String,
}

// ── Default tables ────────────────────────────────────────────────────────────

const BLOCKING: &[&str] = &[
    "wall", "tree", "hut", "table", "stone", "lava", "door", "chest", "water",
];

const PASSABLE: &[&str] = &[
    "grass", "road", "earth", "floor", "sand", "ice", "bridge", "sign",
];

const PHRASES: &[(&str, &str)] = &[
    ("grass", "Grass tile"),
    ("water", "Water tile"),
    ("road", "Road tile"),
    ("wall", "Solid wall"),
    ("tree", "Tree obstacle"),
    ("hut", "Building"),
    ("table", "Table object"),
    ("stone", "Rock formation"),
    ("earth", "Earth tile"),
    ("floor", "Floor tile"),
    ("sand", "Sandy ground"),
    ("lava", "Hot lava"),
    ("ice", "Slippery ice"),
    ("bridge", "Bridge"),
    ("door", "Door"),
    ("chest", "Treasure chest"),
    ("sign", "Sign post"),
];

// ── NameRules ─────────────────────────────────────────────────────────────────

/// Ordered substring rules mapping a tile name to collision and description.
///
/// Matching is case-insensitive. The blocking set is consulted before the
/// passable set, so a name matching both (`"waterfloor"`) is solid. Phrases
/// are scanned in table order and the first keyword found wins.
///
/// Keywords are stored lowercased; [`NameRules::new`] lowercases its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRules {
    blocking: Vec<String>,
    passable: Vec<String>,
    phrases: Vec<(String, String)>,
}

impl NameRules {
    pub fn new<B, P, K, V>(blocking: B, passable: P, phrases: impl IntoIterator<Item = (K, V)>) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            blocking: blocking.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            passable: passable.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            phrases: phrases
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Collision flag for `name`; `false` when no keyword matches.
    pub fn collision(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        if self.blocking.iter().any(|k| lower.contains(k.as_str())) {
            return true;
        }
        if self.passable.iter().any(|k| lower.contains(k.as_str())) {
            return false;
        }
        false
    }

    /// Canned phrase of the first matching keyword, else `"<name> tile"`.
    pub fn description(&self, name: &str) -> String {
        let lower = name.to_lowercase();
        self.phrases
            .iter()
            .find(|(k, _)| lower.contains(k.as_str()))
            .map(|(_, phrase)| phrase.clone())
            .unwrap_or_else(|| format!("{name} tile"))
    }

    pub fn classify(&self, name: &str) -> TileMetadata {
        TileMetadata {
            name: name.to_string(),
            collision: self.collision(name),
            description: self.description(name),
        }
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::new(BLOCKING, PASSABLE, PHRASES.iter().copied())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
