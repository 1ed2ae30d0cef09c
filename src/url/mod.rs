//! Link resolution and validation
//!
//! This module turns raw `href` values into absolute URLs and decides whether
//! a string is a well-formed absolute HTTP(S) URL. Neither operation fails:
//! malformed input is passed through or rejected, never raised as an error.

mod resolve;
mod validate;

pub use resolve::resolve_relative;
pub use validate::is_valid_absolute_url;
