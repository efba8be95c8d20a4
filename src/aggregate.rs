//! Compound-level neutron properties as weighted averages of elemental values.
//!
//! Two weighting bases are used and must not be interchanged:
//!
//! - the neutron cross section is averaged over **atomic fractions**
//!   (`index / total index`), and
//! - the neutron mass absorption is averaged over **mass fractions**
//!   (`index * atomic weight / total mass`).
//!
//! Elements missing from the reference table contribute `0` to every lookup. They
//! are listed in [`CompoundAggregate::missing`] rather than failing.

use std::collections::BTreeMap;

use crate::element::ElementSymbol;
use crate::error::{NeutronError, Result};
use crate::formula::ParsedFormula;
use crate::options::ZeroTotalPolicy;
use crate::properties::{ElementProperties, PropertyTable};

/// A compound-level property together with each element's share of it.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundAggregate {
    /// Sum of all contributions.
    pub total: f64,
    /// Weighted contribution of each element to `total`.
    pub contributions: BTreeMap<ElementSymbol, f64>,
    /// Elements of the formula that the reference table does not know.
    pub missing: Vec<ElementSymbol>,
}

impl CompoundAggregate {
    fn from_weighted<F>(
        parsed: &ParsedFormula,
        table: &PropertyTable,
        weights: &BTreeMap<ElementSymbol, f64>,
        denominator: f64,
        property: F,
    ) -> Self
    where
        F: Fn(&ElementProperties) -> f64,
    {
        let mut contributions = BTreeMap::new();
        let mut missing = Vec::new();
        let mut total = 0.0_f64;

        for symbol in parsed.symbols() {
            let value = match table.get(symbol.as_str()) {
                Some(properties) => property(properties),
                None => {
                    missing.push(symbol.clone());
                    0.0
                }
            };
            let fraction = weights.get(symbol).copied().unwrap_or(0.0) / denominator;
            let contribution = fraction * value;
            contributions.insert(symbol.clone(), contribution);
            total += contribution;
        }

        // A zero basis only gets here under `ZeroTotalPolicy::Propagate`; an empty
        // formula performs no division, so the NaN is set explicitly.
        if denominator == 0.0 {
            total = f64::NAN;
        }

        Self {
            total,
            contributions,
            missing,
        }
    }

    /// Contribution of a single element, if it is part of the formula.
    pub fn contribution(&self, symbol: &str) -> Option<f64> {
        self.contributions.get(symbol).copied()
    }
}

/// Atomic-fraction weighted neutron cross section, rejecting formulas with no atoms.
pub fn aggregate_cross_section(
    parsed: &ParsedFormula,
    table: &PropertyTable,
) -> Result<CompoundAggregate> {
    aggregate_cross_section_with(parsed, table, ZeroTotalPolicy::Reject)
}

/// Atomic-fraction weighted neutron cross section under an explicit zero-total policy.
pub fn aggregate_cross_section_with(
    parsed: &ParsedFormula,
    table: &PropertyTable,
    zero_total: ZeroTotalPolicy,
) -> Result<CompoundAggregate> {
    let atoms: BTreeMap<ElementSymbol, f64> = parsed
        .iter()
        .map(|(symbol, count)| (symbol.clone(), count))
        .collect();
    let total_atoms = parsed.total_index();
    check_total(parsed, total_atoms, "atoms", zero_total)?;

    Ok(CompoundAggregate::from_weighted(
        parsed,
        table,
        &atoms,
        total_atoms,
        |properties| properties.cross_section,
    ))
}

/// Mass-fraction weighted neutron mass absorption, rejecting formulas with no mass.
pub fn aggregate_mass_absorption(
    parsed: &ParsedFormula,
    table: &PropertyTable,
) -> Result<CompoundAggregate> {
    aggregate_mass_absorption_with(parsed, table, ZeroTotalPolicy::Reject)
}

/// Mass-fraction weighted neutron mass absorption under an explicit zero-total policy.
pub fn aggregate_mass_absorption_with(
    parsed: &ParsedFormula,
    table: &PropertyTable,
    zero_total: ZeroTotalPolicy,
) -> Result<CompoundAggregate> {
    let masses: BTreeMap<ElementSymbol, f64> = parsed
        .iter()
        .map(|(symbol, count)| {
            let weight = table
                .get(symbol.as_str())
                .map_or(0.0, |properties| properties.atomic_weight);
            (symbol.clone(), count * weight)
        })
        .collect();
    let total_mass: f64 = masses.values().sum();
    check_total(parsed, total_mass, "mass", zero_total)?;

    Ok(CompoundAggregate::from_weighted(
        parsed,
        table,
        &masses,
        total_mass,
        |properties| properties.mass_absorption,
    ))
}

fn check_total(
    parsed: &ParsedFormula,
    total: f64,
    basis: &'static str,
    zero_total: ZeroTotalPolicy,
) -> Result<()> {
    if total == 0.0 && zero_total == ZeroTotalPolicy::Reject {
        return Err(NeutronError::degenerate(parsed.source(), basis));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::formula::parse;
    use crate::properties::ElementRecord;

    fn water_table() -> PropertyTable {
        PropertyTable::from_records(vec![
            ElementRecord {
                symbol: ElementSymbol::new("H").unwrap(),
                atomic_weight: 1.0,
                cross_section: 0.33,
                mass_absorption: 0.02,
            },
            ElementRecord {
                symbol: ElementSymbol::new("O").unwrap(),
                atomic_weight: 16.0,
                cross_section: 0.0001,
                mass_absorption: 0.0001,
            },
        ])
        .unwrap()
    }

    #[test]
    fn cross_section_uses_atomic_fractions() {
        let parsed = parse("H2O").unwrap();
        let aggregate = aggregate_cross_section(&parsed, &water_table()).unwrap();

        assert_relative_eq!(aggregate.contribution("H").unwrap(), 2.0 / 3.0 * 0.33);
        assert_relative_eq!(aggregate.contribution("O").unwrap(), 1.0 / 3.0 * 0.0001);
        assert_relative_eq!(aggregate.total, 0.220_033_333_333, epsilon = 1e-9);
        assert!(aggregate.missing.is_empty());
    }

    #[test]
    fn mass_absorption_uses_mass_fractions() {
        let parsed = parse("H2O").unwrap();
        let aggregate = aggregate_mass_absorption(&parsed, &water_table()).unwrap();

        let expected = 2.0 / 18.0 * 0.02 + 16.0 / 18.0 * 0.0001;
        assert_relative_eq!(aggregate.total, expected, epsilon = 1e-12);
        assert_relative_eq!(aggregate.total, 0.002_311, epsilon = 1e-6);
    }

    #[test]
    fn single_element_returns_reference_value() {
        let parsed = parse("O3").unwrap();
        let table = water_table();
        let cross = aggregate_cross_section(&parsed, &table).unwrap();
        let absorption = aggregate_mass_absorption(&parsed, &table).unwrap();
        assert_relative_eq!(cross.total, 0.0001);
        assert_relative_eq!(absorption.total, 0.0001);
    }

    #[test]
    fn unknown_element_contributes_zero_and_is_reported() {
        let parsed = parse("H2Xx").unwrap();
        let aggregate = aggregate_cross_section(&parsed, &water_table()).unwrap();

        assert_relative_eq!(aggregate.total, 2.0 / 3.0 * 0.33);
        assert_eq!(aggregate.contribution("Xx"), Some(0.0));
        assert_eq!(aggregate.missing, vec![ElementSymbol::new("Xx").unwrap()]);

        // No atomic weight either, so all mass sits on hydrogen.
        let absorption = aggregate_mass_absorption(&parsed, &water_table()).unwrap();
        assert_relative_eq!(absorption.total, 0.02);
    }

    #[test]
    fn empty_formula_is_rejected_by_default() {
        let parsed = parse("").unwrap();
        let table = water_table();
        assert!(matches!(
            aggregate_cross_section(&parsed, &table),
            Err(NeutronError::DegenerateFormula { basis: "atoms", .. })
        ));
        assert!(matches!(
            aggregate_mass_absorption(&parsed, &table),
            Err(NeutronError::DegenerateFormula { basis: "mass", .. })
        ));
    }

    #[test]
    fn zero_mass_propagates_nan_when_allowed() {
        let parsed = parse("Xx2").unwrap();
        let aggregate =
            aggregate_mass_absorption_with(&parsed, &water_table(), ZeroTotalPolicy::Propagate)
                .unwrap();
        assert!(aggregate.total.is_nan());
    }

    #[test]
    fn empty_formula_is_nan_when_allowed() {
        let parsed = parse("").unwrap();
        let table = water_table();
        let cross =
            aggregate_cross_section_with(&parsed, &table, ZeroTotalPolicy::Propagate).unwrap();
        let absorption =
            aggregate_mass_absorption_with(&parsed, &table, ZeroTotalPolicy::Propagate).unwrap();
        assert!(cross.total.is_nan());
        assert!(absorption.total.is_nan());
        assert!(cross.contributions.is_empty());
    }

    #[test]
    fn degenerate_error_reports_formula_as_written() {
        let parsed = parse("RuGd0").unwrap();
        let table = PropertyTable::from_records(vec![ElementRecord {
            symbol: ElementSymbol::new("Ru").unwrap(),
            atomic_weight: 0.0,
            cross_section: 2.56,
            mass_absorption: 0.01,
        }])
        .unwrap();
        match aggregate_mass_absorption(&parsed, &table) {
            Err(NeutronError::DegenerateFormula { formula, basis }) => {
                assert_eq!(formula, "RuGd0");
                assert_eq!(basis, "mass");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
