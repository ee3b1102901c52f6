//! Application state module

mod controller;
pub(crate) mod forms;
mod photos;

pub use controller::*;
pub use forms::*;
pub use photos::*;
