//! # route-cycle
//!
//! **Note:** This crate is under active development. The API may change before 1.0.
//!
//! Round-robin route cycling for AV control bridges.
//!
//! `route-cycle` keeps two fixed banks of 32 slots, sources and destinations.
//! The bridge toggles slots in and out of use and writes per-slot route
//! values; on request, every enabled destination is handed the value of the
//! next enabled source in strict round-robin order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use route_cycle::{RouteCycle, FeedbackEvent};
//!
//! let device = RouteCycle::builder("route-cycle-1", "Lobby Cycle")
//!     .on_feedback(|event| match event {
//!         FeedbackEvent::Value { bank, index, value } => bridge.set_analog(bank, index, value),
//!         other => tracing::debug!(?other, "feedback"),
//!     })
//!     .build()?;
//!
//! device.set_in_use(true);
//! device.on_source_value_write(2, 5)?;
//! device.on_source_enable_toggle(2)?;
//! device.on_destination_enable_toggle(0)?;
//!
//! // After the debounce window has passed
//! device.on_cycle_requested();
//! ```
//!
//! ## Architecture
//!
//! - **Banks**: each bank owns its slots and the compact list of enabled
//!   entries, behind its own lock
//! - **Debounce**: any enable toggle blocks cycling for
//!   [`DEBOUNCE_WINDOW`]
//! - **Guard**: only one cycle pass runs at a time; the busy check and the
//!   debounce check are a single atomic step
//! - **Engine**: computes the pass on snapshots of both active lists, then
//!   the results are written back through the destination bank
//!
//! Refused cycles are not errors. They leave state untouched and surface as
//! a notification message plus pulse on the feedback channel.

#![warn(missing_docs)]
// unwrap/expect allowed in tests only
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
// These doc lints are too strict for internal implementation details
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]

pub mod bank;
mod builder;
mod config;
pub mod cycle;
mod device;
mod error;
mod event;
mod notify;

pub use bank::{ActiveEntry, BankKind, Slot, BANK_SIZE};
pub use builder::{RouteCycle, RouteCycleBuilder};
pub use config::{RouteCycleConfig, DEBOUNCE_WINDOW};
pub use cycle::Assignment;
pub use device::RouteCycleDevice;
pub use error::{CycleRejection, RouteCycleError};
pub use event::{feedback_callback, FeedbackCallback, FeedbackEvent};
