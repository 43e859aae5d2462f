//! Domain models for the interaction checker.

mod connectivity;
mod drug;
mod interaction;

pub use connectivity::*;
pub use drug::*;
pub use interaction::*;
