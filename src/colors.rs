// ===============================
// src/colors.rs
// ===============================
use ahash::AHashMap as HashMap;

pub const PALETTE: [&str; 10] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F",
    "#EDC948", "#B07AA1", "#FF9DA7", "#9C755F", "#BAB0AC",
];

/// Append-only name -> color map. A name keeps its color until `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryColors {
    map: HashMap<String, &'static str>,
    next_index: usize,
}

impl CategoryColors {
    /// Assigns palette colors to unseen names in input order; returns how many were new.
    pub fn assign<'a, I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut added = 0;
        for name in names {
            if self.map.contains_key(name) {
                continue;
            }
            let color = PALETTE[self.next_index % PALETTE.len()];
            self.map.insert(name.to_string(), color);
            self.next_index += 1;
            added += 1;
        }
        added
    }

    pub fn color_of(&self, name: &str) -> Option<&'static str> {
        self.map.get(name).copied()
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn reset(&mut self) {
        self.map.clear();
        self.next_index = 0;
    }
}
