//! Helper functions shared across content types

mod date;

pub use date::*;
