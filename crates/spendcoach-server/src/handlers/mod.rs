//! API route handlers

mod coach;
mod data;
mod insights;

pub use coach::*;
pub use data::*;
pub use insights::*;
