//! Batch evaluation of formula lists against a reference table.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    aggregate_cross_section_with, aggregate_mass_absorption_with, CompoundAggregate,
};
use crate::element::ElementSymbol;
use crate::error::Result;
use crate::formula::{parse_covered, parse_with_mode, ParsedFormula};
use crate::options::AnalysisOptions;
use crate::properties::PropertyTable;

/// Compound-level values of one formula, ready for plotting or export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    #[serde(rename = "Formula")]
    pub formula: String,
    /// Atomic-fraction weighted neutron cross section, barn.
    #[serde(rename = "Neutron cross section")]
    pub cross_section: f64,
    /// Mass-fraction weighted neutron mass absorption, m²/kg.
    #[serde(rename = "Neutron mass absorption")]
    pub mass_absorption: f64,
}

/// Both aggregates of one formula, including per-element contributions.
#[derive(Clone, Debug)]
pub struct CompoundAnalysis {
    /// Formula as supplied by the caller.
    pub formula: String,
    pub parsed: ParsedFormula,
    pub cross_section: CompoundAggregate,
    pub mass_absorption: CompoundAggregate,
}

impl CompoundAnalysis {
    /// Drops the contribution breakdown.
    pub fn record(&self) -> CompoundRecord {
        CompoundRecord {
            formula: self.formula.clone(),
            cross_section: self.cross_section.total,
            mass_absorption: self.mass_absorption.total,
        }
    }
}

/// Parses `formula` and computes both aggregates.
///
/// Unknown elements do not fail the call; see [`CompoundAggregate::missing`].
pub fn analyze_formula(
    formula: &str,
    table: &PropertyTable,
    options: &AnalysisOptions,
) -> Result<CompoundAnalysis> {
    let parsed = parse_with_mode(formula, options.parse_mode)?;
    analyze_parsed(parsed, table, options)
}

fn analyze_parsed(
    parsed: ParsedFormula,
    table: &PropertyTable,
    options: &AnalysisOptions,
) -> Result<CompoundAnalysis> {
    let cross_section = aggregate_cross_section_with(&parsed, table, options.zero_total)?;
    let mass_absorption = aggregate_mass_absorption_with(&parsed, table, options.zero_total)?;

    // Both passes see the same unknown elements; report them once.
    if !cross_section.missing.is_empty() {
        let names: Vec<&str> = cross_section
            .missing
            .iter()
            .map(ElementSymbol::as_str)
            .collect();
        warn!(
            "no reference data for {} in `{}`; treating their properties as 0",
            names.join(", "),
            parsed.source()
        );
    }

    Ok(CompoundAnalysis {
        formula: parsed.source().to_string(),
        parsed,
        cross_section,
        mass_absorption,
    })
}

/// Parses every formula once and keeps those whose elements are all in `table`.
fn covered_formulas<S>(
    formulas: &[S],
    table: &PropertyTable,
    options: &AnalysisOptions,
) -> Vec<ParsedFormula>
where
    S: AsRef<str> + Sync,
{
    let valid = table.valid_symbols();
    let keep = |formula: &S| parse_covered(formula.as_ref(), &valid, options.parse_mode);

    if options.parallel {
        formulas.par_iter().filter_map(keep).collect()
    } else {
        formulas.iter().filter_map(keep).collect()
    }
}

/// Keeps the formulas whose every element is present in `table`, in input order.
pub fn filter_valid_formulas<S>(
    formulas: &[S],
    table: &PropertyTable,
    options: &AnalysisOptions,
) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    covered_formulas(formulas, table, options)
        .into_iter()
        .map(|parsed| parsed.source().to_string())
        .collect()
}

/// Computes a [`CompoundRecord`] for every valid formula, in input order.
///
/// Formulas with unknown elements or grammar errors are dropped silently (logged at
/// `debug`). Valid formulas whose weighting basis sums to zero are dropped with a
/// warning when the zero-total policy rejects them, and come back as NaN otherwise.
pub fn compound_records<S>(
    formulas: &[S],
    table: &PropertyTable,
    options: &AnalysisOptions,
) -> Vec<CompoundRecord>
where
    S: AsRef<str> + Sync,
{
    let covered = covered_formulas(formulas, table, options);
    let evaluate = |parsed: ParsedFormula| match analyze_parsed(parsed, table, options) {
        Ok(analysis) => Some(analysis.record()),
        Err(err) => {
            warn!("dropping formula: {err}");
            None
        }
    };

    let records: Vec<CompoundRecord> = if options.parallel {
        covered.into_par_iter().filter_map(evaluate).collect()
    } else {
        covered.into_iter().filter_map(evaluate).collect()
    };

    info!(
        "computed {} compound records from {} formulas ({} dropped)",
        records.len(),
        formulas.len(),
        formulas.len() - records.len()
    );
    records
}
