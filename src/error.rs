use thiserror::Error;

/// Unified error type for `compound_neutronics` operations.
#[derive(Debug, Error)]
pub enum NeutronError {
    /// Raised when a formula does not match the element-token grammar.
    #[error("cannot parse formula `{formula}`: unexpected `{found}` at byte {position}")]
    Parse {
        /// The formula as supplied by the caller.
        formula: String,
        /// Byte offset of the first character not covered by a token.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Raised when a stoichiometric suffix matches the digit pattern but is not a number.
    #[error("invalid stoichiometric index `{index}` for `{symbol}` in formula `{formula}`")]
    InvalidIndex {
        formula: String,
        symbol: String,
        index: String,
    },

    /// Raised when reference data carries a symbol that is not `[A-Z][a-z]*`.
    #[error("`{symbol}` is not a valid element symbol")]
    InvalidSymbol { symbol: String },

    /// Raised when the reference table lists the same element twice.
    #[error("element `{symbol}` appears more than once in the reference table")]
    DuplicateElement { symbol: String },

    /// Raised when reference data contains NaN or infinite values.
    #[error("{property} of `{symbol}` must be finite")]
    NonFiniteProperty {
        symbol: String,
        /// Which column held the bad value.
        property: &'static str,
    },

    /// Raised when the weighting basis of a formula sums to zero.
    #[error("formula `{formula}` has zero total {basis}; fractions are undefined")]
    DegenerateFormula {
        /// The formula as supplied by the caller.
        formula: String,
        /// `"atoms"` or `"mass"`.
        basis: &'static str,
    },

    /// Raised when a grouping configuration cannot be deserialized.
    #[error("invalid compound grouping configuration: {0}")]
    GroupConfig(#[from] serde_json::Error),
}

impl NeutronError {
    /// Helper to format a [`Parse`](NeutronError::Parse) error.
    pub fn parse(formula: &str, position: usize, found: char) -> Self {
        Self::Parse {
            formula: formula.to_string(),
            position,
            found,
        }
    }

    /// Helper to raise when a total atom count or total mass is zero.
    pub fn degenerate(formula: &str, basis: &'static str) -> Self {
        Self::DegenerateFormula {
            formula: formula.to_string(),
            basis,
        }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, NeutronError>;
