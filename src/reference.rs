use std::collections::BTreeMap;

/// Iron content per 100 g of product, mg. Immutable once constructed; the
/// process-wide instance is injected through `AppState` so tests can swap in
/// substitute tables.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    iron_per_100g: BTreeMap<String, f64>,
}

impl ReferenceTable {
    pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            iron_per_100g: entries.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            [
                ("Almonds", 3.7),
                ("Apple", 0.1),
                ("Beef", 2.7),
                ("Beef Liver", 6.2),
                ("Buckwheat", 6.7),
                ("Chicken", 1.3),
                ("Dark Chocolate", 11.9),
                ("Kidney Beans", 5.1),
                ("Lentils", 3.3),
                ("Oats", 4.3),
                ("Pumpkin Seeds", 8.8),
                ("Quinoa", 4.6),
                ("Soybeans", 15.7),
                ("Spinach", 2.7),
                ("Tofu", 5.4),
                ("White Beans", 3.7),
            ]
            .map(|(name, mg)| (name.to_string(), mg)),
        )
    }

    /// Total lookup: unrecognized products contribute no iron rather than
    /// failing.
    pub fn lookup(&self, name: &str) -> f64 {
        self.iron_per_100g.get(name).copied().unwrap_or(0.0)
    }

    /// Entries in stable sorted order, so selection choices render the same
    /// way on every request.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iron_per_100g.iter().map(|(name, mg)| (name.as_str(), *mg))
    }
}
