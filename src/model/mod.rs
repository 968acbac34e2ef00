//! Pure data structures: the per-event actor states, their results, and the event record.

pub mod event;
pub mod lock;
pub mod reason;
pub mod seat;

pub use event::*;
pub use lock::*;
pub use reason::*;
pub use seat::*;
