//! WMS Core - Core types for the warehouse record grid
//!
//! This crate provides the types every other WMS crate depends on:
//!
//! - `Value` - A typed cell value (text, number, currency, date, boolean)
//! - `Record` - An ordered field-to-value mapping
//! - `GridRecord` - Trait for anything the grid can display as a row
//! - `FieldKind` / `FieldSpec` - Field descriptors with total comparators
//! - `GridError` - Errors raised while configuring a grid or loading records

mod error;
mod field;
mod types;

pub use error::*;
pub use field::*;
pub use types::*;
