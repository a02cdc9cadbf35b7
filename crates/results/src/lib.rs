//! Row model and table definitions for railway match results.
//!
//! Pure presentation-model crate: decodes backend rows, derives display
//! values, and builds widget-independent table views. No CLI or IO
//! dependencies.

pub mod classify;
pub mod format;
pub mod links;
pub mod model;
pub mod table;
pub mod tables;
pub mod view;

pub use model::{MatchKind, ResultKind, RouteId, RoutenameKind};
pub use table::{Cell, Grid, TableSpec};
pub use view::GridView;
