//! Session middleware extractors.
//!
//! - [`auth::TeacherSession`] -- Resolves the cedula cookie to a registered teacher.

pub mod auth;
