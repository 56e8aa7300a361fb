//!
//! The scenario step groups.
//!

pub mod bond;
pub mod issuer;
