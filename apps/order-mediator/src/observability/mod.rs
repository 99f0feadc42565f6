//! Observability module for structured logging.
//!
//! The mediator only emits `tracing` events; the host decides where they
//! go. [`init_logging`] installs a `tracing-subscriber` formatter for hosts
//! that have no subscriber of their own.
//!
//! # Key Spans
//!
//! - `order.submit` - Sizing and forwarding of one order intent

mod logging;

pub use logging::{ObservabilityError, init_logging};
