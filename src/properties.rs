//! Per-element reference data and validation of the reference table.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::element::ElementSymbol;
use crate::error::{NeutronError, Result};

/// Physical properties of one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementProperties {
    /// Standard atomic weight.
    pub atomic_weight: f64,
    /// Neutron cross section, barn.
    pub cross_section: f64,
    /// Neutron mass absorption, m²/kg.
    pub mass_absorption: f64,
}

/// One row of the elemental reference sheet.
///
/// Field names follow the spreadsheet column headers so that rows read by an
/// external loader deserialize directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    #[serde(rename = "Symbol")]
    pub symbol: ElementSymbol,
    #[serde(rename = "Atomic weight")]
    pub atomic_weight: f64,
    #[serde(rename = "Neutron Cross Section")]
    pub cross_section: f64,
    #[serde(rename = "Neutron Mass Absorption")]
    pub mass_absorption: f64,
}

impl ElementRecord {
    fn properties(&self) -> ElementProperties {
        ElementProperties {
            atomic_weight: self.atomic_weight,
            cross_section: self.cross_section,
            mass_absorption: self.mass_absorption,
        }
    }
}

/// Elemental reference table keyed by symbol.
#[derive(Clone, Debug, Default)]
pub struct PropertyTable {
    entries: HashMap<ElementSymbol, ElementProperties>,
}

impl PropertyTable {
    /// Builds a table from reference rows, rejecting duplicates and non-finite values.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = ElementRecord>,
    {
        let mut entries = HashMap::new();
        for record in records {
            for (property, value) in [
                ("atomic weight", record.atomic_weight),
                ("neutron cross section", record.cross_section),
                ("neutron mass absorption", record.mass_absorption),
            ] {
                if !value.is_finite() {
                    return Err(NeutronError::NonFiniteProperty {
                        symbol: record.symbol.to_string(),
                        property,
                    });
                }
            }

            let properties = record.properties();
            if entries.insert(record.symbol.clone(), properties).is_some() {
                return Err(NeutronError::DuplicateElement {
                    symbol: record.symbol.into(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Looks up the properties of `symbol`; `None` when the table has no such row.
    pub fn get(&self, symbol: &str) -> Option<&ElementProperties> {
        self.entries.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Set of symbols accepted by [`is_valid_formula`](crate::formula::is_valid_formula).
    pub fn valid_symbols(&self) -> HashSet<ElementSymbol> {
        self.entries.keys().cloned().collect()
    }

    /// Number of elements in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
