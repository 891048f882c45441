//! ipwatch watches the host's external IP address and records how long
//! each address was held.
//!
//! Layout follows ports-and-adapters: `domain` holds the change-detection
//! state machine and the port traits, `infrastructure` the HTTP probe and
//! the record sinks, `application` the configuration and the poll cycle,
//! `presentation` the CLI.

#![warn(clippy::unwrap_used, clippy::expect_used)]

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
