// THEORY:
// The `pipeline` module is the top-level API of the crate. It wires the stages
// together into one linear pass and owns everything a run needs: the decoder
// registry and the tunable configuration.
//
//     bytes -> DecoderRegistry -> DecodedGrid -> aggregate -> FrequencyTable -> render -> Report
//
// There is no state machine and no partial result. A decode failure returns
// before the aggregator is ever called, and the grid is dropped as soon as the
// table is built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::core_modules::aggregator::aggregator;
use crate::core_modules::decoder_registry::DecoderRegistry;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::report::{self, Report};
use crate::error::{CensusError, Result};

// Re-export key data structures for the public API.
pub use crate::core_modules::color_key::ColorKey;
pub use crate::core_modules::decoder_registry::DecodeLimits;
pub use crate::core_modules::frequency_table::FrequencyTable;
pub use crate::core_modules::report::TieBreak;

/// Configuration for the CensusPipeline.
#[derive(Debug, Clone, Default)]
pub struct CensusConfig {
    /// Order of colors that share a count.
    pub tie_break: TieBreak,
    /// Ceilings handed to the codecs while decoding.
    pub limits: DecodeLimits,
}

/// The main, top-level struct: one registry, one configuration, any number of runs.
pub struct CensusPipeline {
    registry: DecoderRegistry,
    config: CensusConfig,
}

impl CensusPipeline {
    /// A pipeline over the default GIF, PNG and JPEG decoders.
    pub fn new(config: CensusConfig) -> Self {
        Self::with_registry(DecoderRegistry::with_default_formats(), config)
    }

    /// A pipeline over a caller-built registry. The configured limits replace the registry's.
    pub fn with_registry(mut registry: DecoderRegistry, config: CensusConfig) -> Self {
        registry.set_limits(config.limits);
        Self { registry, config }
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CensusConfig {
        &self.config
    }

    /// Opens `path` and runs the whole census over it. The file is closed on every exit path.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CensusError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened '{}'", path.display());
        self.process_reader(BufReader::new(file))
    }

    /// Decodes the stream, counts every pixel and renders the report.
    pub fn process_reader<R: Read>(&self, reader: R) -> Result<Report> {
        let (grid, format) = self.registry.decode(reader)?;
        let bounds = grid.bounds();

        let table = aggregator::aggregate(&grid);
        drop(grid);

        let report = report::render_with(&table, bounds.width(), bounds.height(), self.config.tie_break)
            .with_format(format);
        if !report.is_consistent() {
            warn!(
                "counted {} pixels in a {}x{} image",
                report.total_count, report.width, report.height
            );
        }
        debug!(
            "{} image {}x{}: {} distinct colors",
            format,
            report.width,
            report.height,
            report.distinct_colors()
        );
        Ok(report)
    }

    /// Same as `process_reader` over an in-memory buffer.
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<Report> {
        self.process_reader(bytes)
    }
}
