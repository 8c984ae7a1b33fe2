//! Cycle execution: admission control and the round-robin pass.
//!
//! ```text
//! cycle request → CycleGuard (busy? debounced?) → snapshot active lists
//!              → RouteCycleEngine (in use? counts? cursor) → assignments
//! ```
//!
//! - **ChangeDebouncer**: blocks cycling for a fixed window after enable toggles
//! - **CycleGuard**: single-flight busy flag, released on drop
//! - **RouteCycleEngine**: pure round-robin over snapshots, owns the cursor

mod debounce;
mod engine;
mod guard;

pub use debounce::ChangeDebouncer;
pub use engine::{Assignment, RouteCycleEngine};
pub use guard::{CycleGuard, CyclePermit};
