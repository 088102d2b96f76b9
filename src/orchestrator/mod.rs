//! Application-level orchestration.
//!
//! Owns submission lifecycle control (start/settle) and emits events for
//! presentation layers. Front-ends send commands; the controller guarantees
//! exactly one settle event per accepted submission.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
