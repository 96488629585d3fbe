//! Vote-ledger and result-cache services.
//!
//! The services own the cache contract: the result reader follows the
//! cache-aside pattern against the single result key, and the vote writer
//! invalidates that key as an explicit post-commit step. Dependencies are
//! injected, so both sides are testable with in-memory fakes.

mod results;
mod votes;

pub use results::ResultCache;
pub use votes::VoteService;
