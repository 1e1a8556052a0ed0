pub mod aggregator;
pub mod color_key;
pub mod decoder_registry;
pub mod frequency_table;
pub mod pixel_grid;
pub mod report;

#[cfg(test)]
pub(crate) mod utils;
