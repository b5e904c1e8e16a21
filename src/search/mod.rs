//! Search Module
//!
//! Web search via the Serper API: a single POST per query returning ranked
//! organic results, which become the citation list for the summary.

pub mod serper;

pub use serper::{SearchError, SerperClient};
