pub mod constants;
pub mod components;
pub mod physics;
pub mod tuning;

pub use constants::*;
pub use components::*;
pub use physics::*;
pub use tuning::*;
