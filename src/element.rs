//! Element symbols as they appear in formulas and in the reference table.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NeutronError, Result};

/// A chemical element symbol: one uppercase ASCII letter followed by lowercase letters.
///
/// Whether the symbol names a real element is decided by membership in a
/// [`PropertyTable`](crate::properties::PropertyTable), not by this type.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementSymbol(String);

impl ElementSymbol {
    /// Validates the shape of `symbol` and wraps it.
    pub fn new<S: Into<String>>(symbol: S) -> Result<Self> {
        let symbol = symbol.into();
        if is_symbol_shape(&symbol) {
            Ok(Self(symbol))
        } else {
            Err(NeutronError::InvalidSymbol { symbol })
        }
    }

    /// Wraps text the formula scanner has already matched against the symbol grammar.
    pub(crate) fn from_scanned(symbol: &str) -> Self {
        Self(symbol.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_symbol_shape(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_lowercase()),
        _ => false,
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementSymbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ElementSymbol {
    type Error = NeutronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ElementSymbol> for String {
    fn from(value: ElementSymbol) -> Self {
        value.0
    }
}
