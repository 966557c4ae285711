use indexmap::IndexMap;
use tracing::warn;

use crate::core::dataset::VariationInfo;

/// Explicit identifier-to-name mapping built from a dataset's variation list.
///
/// Identifiers are the keys used in raw records. Unknown identifiers display
/// as themselves; nothing is inferred from positions or numeric shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariationCatalog {
    names: IndexMap<String, String>,
}

impl VariationCatalog {
    #[must_use]
    pub fn from_variations(variations: &[VariationInfo]) -> Self {
        let mut names = IndexMap::with_capacity(variations.len());
        for variation in variations {
            let identifier = variation.identifier();
            if names.contains_key(&identifier) {
                warn!(%identifier, "duplicate variation identifier ignored");
                continue;
            }
            names.insert(identifier, variation.name.clone());
        }
        Self { names }
    }

    /// All identifiers in lexicographic order.
    #[must_use]
    pub fn sorted_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.names.keys().cloned().collect();
        identifiers.sort_unstable();
        identifiers
    }

    #[must_use]
    pub fn display_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.names
            .get(identifier)
            .map_or(identifier, String::as_str)
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.names.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::VariationId;

    #[test]
    fn names_come_only_from_the_variation_list() {
        let catalog = VariationCatalog::from_variations(&[
            VariationInfo::named("Original").with_id(VariationId::Number(0)),
            VariationInfo::named("Variation A").with_id(VariationId::Number(10001)),
        ]);

        assert_eq!(catalog.display_name("0"), "Original");
        assert_eq!(catalog.display_name("10001"), "Variation A");
        assert_eq!(catalog.display_name("10002"), "10002");
        assert_eq!(catalog.sorted_identifiers(), vec!["0", "10001"]);
    }
}
