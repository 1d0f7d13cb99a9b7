//! Interactive record grid
//!
//! One engine behind every record-listing table of the warehouse dashboard:
//! free-text search, per-field filters, single-key sorting, row selection,
//! confirm-before-commit edit and delete, timed notifications, quantity
//! steppers and paging. Renderers read a [`GridView`] and send intents back
//! as method calls on [`RecordGrid`].
//!
//! # Examples
//!
//! ```
//! use wms_grid::{fixtures, RecordGrid};
//! use wms_settings::GridSettings;
//!
//! let mut grid = RecordGrid::new(
//!     fixtures::invoices(),
//!     fixtures::invoice_config(),
//!     &GridSettings::default(),
//! )
//! .expect("valid config");
//!
//! grid.set_search_term("paypal");
//! assert_eq!(grid.visible_rows().len(), 3);
//! ```

mod config;
mod events;
pub mod filter_types;
pub mod fixtures;
mod grid;
mod notification;

pub use config::*;
pub use events::*;
pub use filter_types::*;
pub use grid::*;
pub use notification::*;
