//! # Punchclock Security
//!
//! Decoding of the OAuth/OpenID identity tokens users log in with.

pub mod jwt;

pub use jwt::*;
