//! Chemical formula parsing into element / stoichiometric-index pairs.
//!
//! A formula is a plain concatenation of element tokens such as `Gd10RuCd3` or
//! `Gd0.985Zr0.015`. Each token is an element symbol (`[A-Z][a-z]*`) followed by an
//! optional decimal index; a missing index counts as `1`. Grouping notation
//! (parentheses, hydrate dots, charges) is not part of the grammar.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::element::ElementSymbol;
use crate::error::{NeutronError, Result};
use crate::options::ParseMode;

// `[0-9]` rather than `\d`: the latter matches non-ASCII digits in Unicode mode.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]*)([0-9]*\.?[0-9]*)").expect("element token pattern compiles")
});

/// Element counts of a single formula.
///
/// Keys are unique: repeated occurrences of an element are summed into one entry.
/// Equality compares the element counts only, not the text they were parsed from.
#[derive(Clone, Debug, Default)]
pub struct ParsedFormula {
    source: String,
    counts: BTreeMap<ElementSymbol, f64>,
}

impl PartialEq for ParsedFormula {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl ParsedFormula {
    /// The formula text as passed to [`parse`].
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Stoichiometric index of `symbol`, if the formula mentions it.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.counts.get(symbol).copied()
    }

    /// Iterates over `(symbol, index)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementSymbol, f64)> {
        self.counts.iter().map(|(symbol, count)| (symbol, *count))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &ElementSymbol> {
        self.counts.keys()
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all stoichiometric indices (total atoms per formula unit).
    pub fn total_index(&self) -> f64 {
        self.counts.values().sum()
    }

    fn accumulate(&mut self, symbol: &str, count: f64) {
        match self.counts.entry(ElementSymbol::from_scanned(symbol)) {
            btree_map::Entry::Occupied(mut entry) => *entry.get_mut() += count,
            btree_map::Entry::Vacant(entry) => {
                entry.insert(count);
            }
        }
    }
}

/// Writes the formula back in canonical form: symbols in order, indices of `1` omitted.
impl fmt::Display for ParsedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            if count == 1.0 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}{count}")?;
            }
        }
        Ok(())
    }
}

/// Parses `formula` in [`ParseMode::Strict`].
///
/// An empty string yields an empty [`ParsedFormula`]. Surrounding whitespace is ignored.
///
/// ```
/// use compound_neutronics::formula::parse;
///
/// let parsed = parse("GdGd2").unwrap();
/// assert_eq!(parsed.get("Gd"), Some(3.0));
/// ```
pub fn parse(formula: &str) -> Result<ParsedFormula> {
    parse_with_mode(formula, ParseMode::Strict)
}

/// Parses `formula`, enforcing the token grammar according to `mode`.
pub fn parse_with_mode(formula: &str, mode: ParseMode) -> Result<ParsedFormula> {
    let cleaned = formula.trim();
    let mut parsed = ParsedFormula {
        source: formula.to_string(),
        counts: BTreeMap::new(),
    };
    let mut cursor = 0usize;

    for caps in TOKEN_REGEX.captures_iter(cleaned) {
        let (Some(whole), Some(symbol), Some(index)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        if whole.start() != cursor {
            skip_gap(cleaned, cursor, whole.start(), mode)?;
        }
        cursor = whole.end();

        let count = resolve_index(cleaned, symbol.as_str(), index.as_str())?;
        parsed.accumulate(symbol.as_str(), count);
    }

    if cursor != cleaned.len() {
        skip_gap(cleaned, cursor, cleaned.len(), mode)?;
    }

    Ok(parsed)
}

fn skip_gap(formula: &str, start: usize, end: usize, mode: ParseMode) -> Result<()> {
    match mode {
        ParseMode::Strict => {
            let found = formula[start..].chars().next().unwrap_or_default();
            Err(NeutronError::parse(formula, start, found))
        }
        ParseMode::Lenient => {
            debug!(
                "skipping unmatched `{}` in formula `{}`",
                &formula[start..end],
                formula
            );
            Ok(())
        }
    }
}

fn resolve_index(formula: &str, symbol: &str, index: &str) -> Result<f64> {
    if index.is_empty() {
        return Ok(1.0);
    }
    index
        .parse::<f64>()
        .map_err(|_| NeutronError::InvalidIndex {
            formula: formula.to_string(),
            symbol: symbol.to_string(),
            index: index.to_string(),
        })
}

/// Returns whether every element of `formula` is in `valid_symbols`.
///
/// Formulas that fail to parse are reported as invalid.
pub fn is_valid_formula(formula: &str, valid_symbols: &HashSet<ElementSymbol>) -> bool {
    parse_covered(formula, valid_symbols, ParseMode::Strict).is_some()
}

/// Parses `formula` and keeps it only if every element is in `valid_symbols`.
pub(crate) fn parse_covered(
    formula: &str,
    valid_symbols: &HashSet<ElementSymbol>,
    mode: ParseMode,
) -> Option<ParsedFormula> {
    match parse_with_mode(formula, mode) {
        Ok(parsed) if parsed.symbols().all(|symbol| valid_symbols.contains(symbol)) => {
            Some(parsed)
        }
        Ok(_) => {
            debug!("formula `{formula}` has elements outside the reference table");
            None
        }
        Err(err) => {
            debug!("treating formula as invalid: {err}");
            None
        }
    }
}
