//! Neutron cross section and mass absorption of compounds from elemental reference data.
//!
//! Given chemical formulas such as `Gd10RuCd3` and a table of per-element properties
//! (atomic weight, neutron cross section, neutron mass absorption), this crate
//!
//! - parses formulas into element / stoichiometric-index pairs (`formula` module),
//! - validates reference rows into a lookup table (`properties` module),
//! - computes the atomic-fraction weighted cross section and the mass-fraction
//!   weighted mass absorption of each compound (`aggregate` module),
//! - evaluates whole formula lists, dropping formulas the table cannot cover
//!   (`batch` module), and
//! - selects and classifies the resulting records for exploratory scatter views
//!   (`selection` module).
//!
//! Reading spreadsheets and drawing plots are left to the caller; rows deserialize
//! directly into [`ElementRecord`] and results serialize from [`CompoundRecord`].
//!
//! # Quick start
//!
//! ```
//! use compound_neutronics::{compound_records, AnalysisOptions, ElementRecord, PropertyTable};
//! use compound_neutronics::element::ElementSymbol;
//!
//! let table = PropertyTable::from_records(vec![
//!     ElementRecord {
//!         symbol: ElementSymbol::new("H").unwrap(),
//!         atomic_weight: 1.0,
//!         cross_section: 0.33,
//!         mass_absorption: 0.02,
//!     },
//!     ElementRecord {
//!         symbol: ElementSymbol::new("O").unwrap(),
//!         atomic_weight: 16.0,
//!         cross_section: 0.0001,
//!         mass_absorption: 0.0001,
//!     },
//! ])
//! .expect("valid reference table");
//!
//! let records = compound_records(&["H2O", "NaCl"], &table, &AnalysisOptions::default());
//! assert_eq!(records.len(), 1);
//! assert!((records[0].cross_section - 0.220_033).abs() < 1e-6);
//! ```

pub mod aggregate;
pub mod batch;
pub mod element;
pub mod error;
pub mod formula;
pub mod options;
pub mod properties;
pub mod selection;

pub use aggregate::{aggregate_cross_section, aggregate_mass_absorption, CompoundAggregate};
pub use batch::{
    analyze_formula, compound_records, filter_valid_formulas, CompoundAnalysis, CompoundRecord,
};
pub use error::{NeutronError, Result};
pub use formula::{is_valid_formula, parse, ParsedFormula};
pub use options::{AnalysisOptions, ParseMode, ZeroTotalPolicy};
pub use properties::{ElementProperties, ElementRecord, PropertyTable};
