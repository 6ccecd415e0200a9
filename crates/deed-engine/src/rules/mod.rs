//! Consistency rules
//!
//! Each rule is a pure function over raw field text and yields at most one
//! [`RuleFailure`](crate::error::RuleFailure). Rules share no state and can run
//! in any order; the orchestrator fixes the order so reports are stable.

pub mod amounts;
pub mod chronology;
pub mod jurisdiction;
