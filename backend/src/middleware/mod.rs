//! Request middleware.
//!
//! Purpose: dependencies that apply to many routes at once. [`Trace`] runs
//! for the whole application; [`RequireAdmin`] runs for a whole scope.

pub mod require_admin;
pub mod trace;

pub use require_admin::RequireAdmin;
pub use trace::Trace;
