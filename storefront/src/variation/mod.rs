//! Variation Resolver Module
//!
//! Maps the shopper's option selection to the variation that drives the
//! displayed price, SKU and stock status. Matching runs through ranked
//! tiers and never comes back empty-handed unless the catalog is empty.

pub mod combo;
mod resolver;

pub use resolver::*;
