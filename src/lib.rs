// THEORY:
// This file is the main entry point for the `pixel_census` library crate. It
// exposes the `CensusPipeline` and its configuration as the high-level interface,
// together with the individual stages under `core_modules` for callers that want
// to drive them separately (for example with their own `PixelGrid`).
//
// Stages, in dependency order:
// - `pixel_grid`:       bounds plus per-coordinate 16-bit color lookup
// - `decoder_registry`: content sniffing and codec dispatch
// - `color_key`:        16-bit RGBA sample -> canonical 6-hex-digit RGB key
// - `aggregator`:       row-major scan into a `FrequencyTable`
// - `report`:           count-descending listing and summary totals

pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use error::{CensusError, Result};
pub use pipeline::{CensusConfig, CensusPipeline};
