//! HiGHS backend for [`intcover_lp::LpEngine`].
//!
//! [`ffi`] wraps the `highs` crate's row-oriented problem builder; [`engine`]
//! lowers an [`intcover_lp::LpModel`] into it and maps the result back.

pub mod engine;
pub mod ffi;
mod status;

pub use engine::HighsEngine;
pub use ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, highs_version};
