//! Selection and classification policies applied to compound records before plotting.
//!
//! These are data-level counterparts of the scatter views: which records fall in a
//! view window, which named group a formula belongs to, and a classification by the
//! total stoichiometric index. Rendering and colors are left to the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::batch::CompoundRecord;
use crate::error::Result;
use crate::formula::ParsedFormula;

const GADOLINIUM_GROUPS: &str = include_str!("../data/gadolinium_groups.json");

/// Rectangular window on the (cross section, mass absorption) plane.
///
/// Every bound is exclusive and optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyWindow {
    pub min_cross_section: Option<f64>,
    pub max_cross_section: Option<f64>,
    pub min_mass_absorption: Option<f64>,
    pub max_mass_absorption: Option<f64>,
}

impl PropertyWindow {
    /// Accepts every record.
    pub fn overview() -> Self {
        Self::default()
    }

    /// Strong absorbers: cross section above 31000 barn, mass absorption above 5 m²/kg.
    pub fn high_absorbers() -> Self {
        Self {
            min_cross_section: Some(31_000.0),
            min_mass_absorption: Some(5.0),
            ..Self::default()
        }
    }

    /// Upper tail of the strong absorbers, cross section above 34500 barn.
    pub fn zoom() -> Self {
        Self {
            min_cross_section: Some(34_500.0),
            min_mass_absorption: Some(5.0),
            ..Self::default()
        }
    }

    /// The zoom window capped at 50500 barn, used for the grouped view.
    pub fn grouped_zoom() -> Self {
        Self {
            max_cross_section: Some(50_500.0),
            ..Self::zoom()
        }
    }

    pub fn contains(&self, record: &CompoundRecord) -> bool {
        above(record.cross_section, self.min_cross_section)
            && below(record.cross_section, self.max_cross_section)
            && above(record.mass_absorption, self.min_mass_absorption)
            && below(record.mass_absorption, self.max_mass_absorption)
    }

    /// Records inside the window, in their original order.
    pub fn select<'a>(&self, records: &'a [CompoundRecord]) -> Vec<&'a CompoundRecord> {
        records.iter().filter(|record| self.contains(record)).collect()
    }
}

fn above(value: f64, bound: Option<f64>) -> bool {
    bound.map_or(true, |bound| value > bound)
}

fn below(value: f64, bound: Option<f64>) -> bool {
    bound.map_or(true, |bound| value < bound)
}

/// A named set of formulas, matched literally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundGroup {
    pub name: String,
    pub formulas: HashSet<String>,
}

/// Ordered named groups; a formula belongs to the first group that lists it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundGroups {
    pub groups: Vec<CompoundGroup>,
}

impl CompoundGroups {
    /// Reads a grouping configuration of the form
    /// `{"groups": [{"name": "...", "formulas": ["...", ...]}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Bundled grouping of gadolinium alloys: solid solutions, element inclusions,
    /// GdM3 binaries, ternaries and other binaries.
    pub fn gadolinium_alloys() -> Result<Self> {
        Self::from_json(GADOLINIUM_GROUPS)
    }

    /// Name of the first group listing `formula`.
    pub fn group_of(&self, formula: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.formulas.contains(formula))
            .map(|group| group.name.as_str())
    }

    /// Pairs each record with its group name, `None` for ungrouped formulas.
    pub fn classify<'a>(
        &'a self,
        records: &'a [CompoundRecord],
    ) -> Vec<(&'a CompoundRecord, Option<&'a str>)> {
        records
            .iter()
            .map(|record| (record, self.group_of(&record.formula)))
            .collect()
    }
}

/// Classification of a formula by its total stoichiometric index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSumClass {
    /// Indices sum to 1: a pure element or a normalized solid solution.
    Single,
    /// Indices sum to 14, e.g. `Gd10RuCd3`.
    Fourteen,
    Other,
}

impl IndexSumClass {
    const TOLERANCE: f64 = 1e-9;

    pub fn of(parsed: &ParsedFormula) -> Self {
        let total = parsed.total_index();
        if (total - 1.0).abs() < Self::TOLERANCE {
            Self::Single
        } else if (total - 14.0).abs() < Self::TOLERANCE {
            Self::Fourteen
        } else {
            Self::Other
        }
    }
}
