//! Cart Keys
//!
//! A cart line is identified by its product together with the chosen option
//! of each variation type. Selections are ordered maps keyed by variation type,
//! so the same choice always yields the same key regardless of the order the
//! caller supplied it in.

use std::{
    collections::BTreeMap,
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

use crate::domain::products::records::{OptionId, ProductId, VariationTypeId};

/// Variation type to chosen option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSelection(BTreeMap<VariationTypeId, OptionId>);

impl OptionSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variation_type: VariationTypeId, option: OptionId) -> Option<OptionId> {
        self.0.insert(variation_type, option)
    }

    #[must_use]
    pub fn get(&self, variation_type: VariationTypeId) -> Option<OptionId> {
        self.0.get(&variation_type).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Chosen options in variation type order.
    #[must_use]
    pub fn option_ids(&self) -> Vec<OptionId> {
        self.0.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariationTypeId, OptionId)> + '_ {
        self.0.iter().map(|(variation_type, option)| (*variation_type, *option))
    }

    /// Parse the canonical JSON object form, e.g. `{"1":5,"2":9}`.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a JSON object of integer ids.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Canonical JSON object form, e.g. `{"1":5,"2":9}`.
impl Display for OptionSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // integer keys and values always serialize
        let json = serde_json::to_string(&self.0).map_err(|_error| FmtError)?;

        f.write_str(&json)
    }
}

impl FromIterator<(VariationTypeId, OptionId)> for OptionSelection {
    fn from_iter<I: IntoIterator<Item = (VariationTypeId, OptionId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CartKey {
    pub product: ProductId,
    pub selection: OptionSelection,
}

impl CartKey {
    #[must_use]
    pub fn new(product: ProductId, selection: OptionSelection) -> Self {
        Self { product, selection }
    }
}

/// `{product id}_{canonical selection}`, the guest cookie map key.
impl Display for CartKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}_{}", self.product, self.selection)
    }
}
