//! Generation - building kitchens from layouts

mod kitchen;

pub use kitchen::*;
