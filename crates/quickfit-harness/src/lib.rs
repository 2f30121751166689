//! Driving shell for the quick-fit allocator simulator.
//!
//! This crate provides:
//! - Interactive session: the menu-driven request/response loop
//! - Script replay: run a JSON operation script, emit a JSON outcome report

#![forbid(unsafe_code)]

pub mod script;
pub mod session;

pub use script::{OpRecord, ReplayReport, Script, ScriptError, ScriptOp};
