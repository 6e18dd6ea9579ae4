//! Preference domain module.
//!
//! Preferences are free-form user instructions stored independently of
//! sessions and folded into every prompt.

mod model;

pub use model::Preference;
