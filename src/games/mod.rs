//! Game implementations.

pub mod skirmish;
