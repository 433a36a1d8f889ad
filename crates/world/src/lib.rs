//! The classic chunk generation core: seeded noise terrain, structure
//! placement, and liquid-face lighting.

mod classify;
mod generator;
mod height;
mod lighting;
mod seed;
mod smooth;
mod structures;
mod volume;

pub use classify::*;
pub use generator::*;
pub use height::*;
pub use lighting::*;
pub use seed::*;
pub use smooth::*;
pub use structures::*;
pub use volume::*;
