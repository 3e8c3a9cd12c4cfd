//! Combinatorial enumeration for neighbourhood exploration.

mod power_set;

pub use power_set::SubsetEnumerator;
