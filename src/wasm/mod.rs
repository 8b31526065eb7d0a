//! WebAssembly bindings for the sim6502 simulator.
//!
//! This module provides JavaScript-callable interfaces to the processor,
//! assembler and Intel HEX loader, so a browser front end can assemble,
//! load and single-step programs.

pub mod api;

pub use api::Simulator;
