//! Filter-and-derive core for an interactive football player dashboard.
//!
//! The crate loads a tabular player dataset once, evaluates the sidebar's
//! constraint set against it, and derives the exact data slice each chart
//! needs. Rendering and widget wiring belong to the embedding presentation
//! layer; everything here is plain data in, plain data out.
//!
//! Pipeline: [`data::loader`] → [`data::filter`] → [`views`], tied together
//! by [`state::DashboardState`].

pub mod data;
pub mod state;
pub mod views;

pub use data::filter::{filtered_indices, Filters, RangeFilter};
pub use data::loader::{load_file, LoadError};
pub use data::model::{NumericColumn, Player, PlayerTable};
pub use state::DashboardState;
