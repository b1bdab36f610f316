//! Scoped acquire/release handles.
//!
//! Each handle records whether its request was granted and, if so, releases
//! it exactly once when dropped. Moving a handle moves that obligation with
//! it; `transfer()` does the same for handles that cannot be moved out of
//! their current place.

mod mount;
mod write;

pub use mount::Mount;
pub use write::WriteTransaction;
