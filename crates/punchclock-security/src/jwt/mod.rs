//! JWT identity token handling.

mod claims;
mod identity_decoder;

pub use claims::*;
pub use identity_decoder::*;
