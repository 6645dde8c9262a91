//! Enemy behaviour for ASCENSION.
//!
//! Implements enemy motion state machines, the blue elite's patrol and
//! aimed fire, and archetype-driven spawn profiles.

pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
