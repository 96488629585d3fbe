//! Core domain for the lunchvote project: menu and vote ledger contracts,
//! the daily winner calculation, and the result cache contract.

pub mod cache;
pub mod lunch;
pub mod storage;
