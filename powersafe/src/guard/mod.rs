//! Mode-driven mount arbitration.

mod core;
mod mode;
mod state;

pub use self::core::Guard;
pub use mode::Mode;
pub use state::GuardStatus;
