//! Domain logic for the teacher planning backend.
//!
//! Everything here is free of database and HTTP concerns: catalogs of
//! enumerated choices, identifier validation, the weight budget and export
//! gate for evaluation plans, and the PDF report generator.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod report;
pub mod text;
pub mod types;
pub mod weights;
