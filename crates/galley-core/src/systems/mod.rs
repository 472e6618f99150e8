//! Systems - logic that operates on components

mod chopping;
mod cleaning;
mod cooking;
mod delivery;
mod interaction;
mod orders;

pub use chopping::*;
pub use cleaning::*;
pub use cooking::*;
pub use delivery::*;
pub use interaction::*;
pub use orders::*;
