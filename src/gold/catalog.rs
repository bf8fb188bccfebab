//! Shop catalog: the ordered list of upgrades the player can buy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Static definition of a shop entry, as it appears in config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDef {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub yield_increase: u64,
    #[serde(default)]
    pub icon: String,
}

impl EntryDef {
    fn new(id: &str, name: &str, price: u64, yield_increase: u64, icon: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            yield_increase,
            icon: icon.into(),
        }
    }
}

/// The built-in shop table, in display (= progression) order.
pub fn default_entries() -> Vec<EntryDef> {
    vec![
        EntryDef::new("miner", "Miner", 15, 1, "⛏"),
        EntryDef::new("excavator", "Excavator", 75, 2, "⚒"),
        EntryDef::new("shovel", "Shovel", 625, 5, "♠"),
        EntryDef::new("cart", "Cart", 2_000, 10, "▤"),
        EntryDef::new("crane", "Crane", 12_500, 20, "⊥"),
        EntryDef::new("factory", "Factory", 80_000, 50, "⌂"),
        EntryDef::new("gold_mine", "Gold Mine", 300_000, 100, "◆"),
    ]
}

/// Upper bound on catalog size. Buy actions are `BUY_ENTRY_BASE + index` in a `u16`.
pub const MAX_CATALOG_ENTRIES: usize = 100;

/// Check a list of definitions before building a catalog from it.
pub fn validate_entries(defs: &[EntryDef]) -> Result<(), ConfigError> {
    if defs.is_empty() {
        return Err(ConfigError::Validation {
            message: "catalog must contain at least one entry".into(),
        });
    }
    if defs.len() > MAX_CATALOG_ENTRIES {
        return Err(ConfigError::Validation {
            message: format!(
                "catalog has {} entries, at most {} are allowed",
                defs.len(),
                MAX_CATALOG_ENTRIES
            ),
        });
    }
    let mut seen = HashSet::new();
    for def in defs {
        if def.id.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: format!("catalog entry '{}' has an empty id", def.name),
            });
        }
        if !seen.insert(def.id.as_str()) {
            return Err(ConfigError::Validation {
                message: format!("duplicate catalog id '{}'", def.id),
            });
        }
        if def.price == 0 {
            return Err(ConfigError::Validation {
                message: format!("catalog entry '{}' must have a positive price", def.id),
            });
        }
        if def.yield_increase == 0 {
            return Err(ConfigError::Validation {
                message: format!(
                    "catalog entry '{}' must have a positive yield increase",
                    def.id
                ),
            });
        }
    }
    Ok(())
}

/// A purchasable upgrade plus how many of it the player owns.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub def: EntryDef,
    pub owned: u64,
}

impl CatalogEntry {
    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Price of the next unit. Constant regardless of `owned`.
    pub fn price(&self) -> u64 {
        self.def.price
    }

    pub fn yield_increase(&self) -> u64 {
        self.def.yield_increase
    }

    pub fn icon(&self) -> &str {
        &self.def.icon
    }

    /// Total yield this entry contributes across all owned units.
    pub fn total_yield(&self) -> u64 {
        self.owned.saturating_mul(self.def.yield_increase)
    }
}

/// Fixed, ordered shop. Only `owned` counts change at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from validated definitions.
    pub fn from_defs(defs: Vec<EntryDef>) -> Result<Self, ConfigError> {
        validate_entries(&defs)?;
        Ok(Self {
            entries: defs
                .into_iter()
                .map(|def| CatalogEntry { def, owned: 0 })
                .collect(),
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.def.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|e| e.def.id == id)
    }

    pub fn total_owned(&self) -> u64 {
        self.entries.iter().map(|e| e.owned).sum()
    }

    pub(crate) fn clear_owned(&mut self) {
        for entry in &mut self.entries {
            entry.owned = 0;
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: default_entries()
                .into_iter()
                .map(|def| CatalogEntry { def, owned: 0 })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gold::actions::BUY_ENTRY_BASE;

    #[test]
    fn default_catalog_has_seven_entries_in_order() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            ["Miner", "Excavator", "Shovel", "Cart", "Crane", "Factory", "Gold Mine"]
        );
    }

    #[test]
    fn default_prices_and_yields() {
        let catalog = Catalog::default();
        let table: Vec<(u64, u64)> = catalog
            .entries()
            .iter()
            .map(|e| (e.price(), e.yield_increase()))
            .collect();
        assert_eq!(
            table,
            [
                (15, 1),
                (75, 2),
                (625, 5),
                (2_000, 10),
                (12_500, 20),
                (80_000, 50),
                (300_000, 100),
            ]
        );
    }

    #[test]
    fn default_prices_strictly_increase() {
        let catalog = Catalog::default();
        for pair in catalog.entries().windows(2) {
            assert!(pair[0].price() < pair[1].price());
            assert!(pair[0].yield_increase() < pair[1].yield_increase());
        }
    }

    #[test]
    fn default_entries_pass_validation() {
        assert!(validate_entries(&default_entries()).is_ok());
    }

    #[test]
    fn all_start_unowned() {
        let catalog = Catalog::default();
        assert!(catalog.entries().iter().all(|e| e.owned == 0));
        assert_eq!(catalog.total_owned(), 0);
    }

    #[test]
    fn lookup_by_id_and_index() {
        let catalog = Catalog::default();
        assert_eq!(catalog.find("gold_mine").map(|e| e.price()), Some(300_000));
        assert_eq!(catalog.get(0).map(|e| e.id()), Some("miner"));
        assert!(catalog.find("dragon").is_none());
        assert!(catalog.get(7).is_none());
    }

    #[test]
    fn price_does_not_escalate_with_owned() {
        let mut catalog = Catalog::default();
        let miner = catalog.find_mut("miner").unwrap();
        miner.owned = 40;
        assert_eq!(miner.price(), 15);
        assert_eq!(miner.total_yield(), 40);
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(
            Catalog::from_defs(Vec::new()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn rejects_zero_price_and_zero_yield() {
        let free = vec![EntryDef::new("free", "Free", 0, 1, "")];
        assert!(Catalog::from_defs(free).is_err());

        let useless = vec![EntryDef::new("useless", "Useless", 10, 0, "")];
        assert!(Catalog::from_defs(useless).is_err());
    }

    #[test]
    fn rejects_oversized_catalog() {
        let defs = |n: usize| -> Vec<EntryDef> {
            (0..n)
                .map(|i| EntryDef::new(&format!("e{i}"), "Entry", 1, 1, ""))
                .collect()
        };
        assert!(Catalog::from_defs(defs(MAX_CATALOG_ENTRIES)).is_ok());
        let err = Catalog::from_defs(defs(MAX_CATALOG_ENTRIES + 1)).unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(usize::from(BUY_ENTRY_BASE) + MAX_CATALOG_ENTRIES <= usize::from(u16::MAX));
    }

    #[test]
    fn rejects_duplicate_and_blank_ids() {
        let dup = vec![
            EntryDef::new("a", "A", 1, 1, ""),
            EntryDef::new("a", "A again", 2, 2, ""),
        ];
        let err = Catalog::from_defs(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let blank = vec![EntryDef::new("  ", "Blank", 1, 1, "")];
        assert!(Catalog::from_defs(blank).is_err());
    }

    #[test]
    fn clear_owned_resets_counts() {
        let mut catalog = Catalog::default();
        catalog.find_mut("cart").unwrap().owned = 3;
        catalog.clear_owned();
        assert_eq!(catalog.total_owned(), 0);
    }
}
