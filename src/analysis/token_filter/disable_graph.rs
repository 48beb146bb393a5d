//! Flattens a token graph.
//!
//! Multi-position tokens (for example a one-word synonym standing for a
//! two-word phrase) are forced to span a single position, so consumers that
//! cannot handle graphs see a plain stream.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct DisableGraphFilter;

impl DisableGraphFilter {
    pub fn new() -> Self {
        DisableGraphFilter
    }
}

impl Filter for DisableGraphFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| token.with_position_length(1))))
    }

    fn name(&self) -> &'static str {
        "disable_graph"
    }
}
