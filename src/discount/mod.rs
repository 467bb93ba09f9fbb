//! Discount rules and the cascade that applies them in order

pub mod cascade;
pub mod rule;

pub use cascade::*;
pub use rule::*;
