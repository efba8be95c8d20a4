//! Configuration for parsing strictness, zero-total handling and batch execution.

/// How the formula scanner treats characters that no element token covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Every character must belong to a `Symbol[index]` token; anything else is a parse error.
    #[default]
    Strict,
    /// Collect every token found and skip the characters in between.
    Lenient,
}

/// What the aggregators do when the weighting basis (atoms or mass) sums to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroTotalPolicy {
    /// Return [`NeutronError::DegenerateFormula`](crate::error::NeutronError::DegenerateFormula).
    #[default]
    Reject,
    /// Return NaN totals, including for formulas with no elements at all.
    Propagate,
}

/// Aggregated configuration used by the aggregators and the batch pipeline.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Grammar enforcement for formula strings.
    pub parse_mode: ParseMode,
    /// Handling of formulas with zero total atoms or zero total mass.
    pub zero_total: ZeroTotalPolicy,
    /// Whether batch operations fan out over the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            zero_total: ZeroTotalPolicy::Reject,
            parallel: true,
        }
    }
}

impl AnalysisOptions {
    /// Override the parse mode while preserving other defaults.
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Override the zero-total policy while preserving other defaults.
    pub fn with_zero_total(mut self, zero_total: ZeroTotalPolicy) -> Self {
        self.zero_total = zero_total;
        self
    }

    /// Enable or disable parallel batch evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
