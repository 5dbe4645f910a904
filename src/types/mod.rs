//! Common types used throughout the B2 integration.
//!
//! This module defines the bucket type enum and the upload request passed
//! down to the raw upload URL.

mod common;
mod requests;

pub use common::*;
pub use requests::*;
