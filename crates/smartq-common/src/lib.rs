//! ---
//! sq_section: "01-core-functionality"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Shared primitives and utilities for the SmartQ runtime."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
//! Shared primitives for the SmartQ workspace.
//! This crate exposes configuration loading and logging setup consumed by the
//! simulation library and the `smartq` binary.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, ArrivalConfig, InputConfig, LoadedAppConfig, LoggingConfig, NegativeDeltaPolicy,
    OutputConfig,
};
pub use logging::{init_tracing, LogFormat};
