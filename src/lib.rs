// THEORY:
// This file is the main entry point for the `wave_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API that will be exposed to external consumers (like a kiosk
// application feeding it camera frames).
//
// The primary goal is to export the `WavePipeline` and its associated data
// structures (`WaveConfig`, `TickOutcome`, `WaveState`) as the clean,
// high-level interface for the entire detection engine, with
// `SharedPipeline` as the handle for concurrent transports. The internal
// modules (`core_modules`) are encapsulated and hidden from the end-user,
// providing a clean separation of concerns.

pub mod core_modules;
pub mod error;
pub mod kiosk;
pub mod pipeline;
pub mod shared_pipeline;
