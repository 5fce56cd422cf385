//! Topic navigation feature: filter box, selection and breadcrumbs.

mod state;

pub use state::{Crumb, Selection, TopicsState};
