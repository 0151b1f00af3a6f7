//! gradelens-core — Grade analytics and risk assessment engine.
//!
//! Pure calculation routines that turn raw per-quarter scores and graded
//! assessments into grades-to-date, statuses, class statistics, trends,
//! predictions and risk assessments. Nothing in the computation modules
//! performs I/O; `parser`, `config` and `report` handle files at the edges.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod risk;
pub mod statistics;
pub mod traits;
pub mod trend;
