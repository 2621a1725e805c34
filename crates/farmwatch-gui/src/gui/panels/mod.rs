//! UI panel rendering for the Farmwatch GUI.
//!
//! Each panel is implemented as methods on [`super::app::DashboardApp`],
//! split into separate files for maintainability.

pub(crate) mod charts;
mod report;
