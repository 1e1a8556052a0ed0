// THEORY:
// The `DecoderRegistry` is the dispatch layer between raw bytes and a `PixelGrid`.
// It decides which codec to run by looking at the content itself, never at the
// file name, so a PNG saved as `photo.jpg` still decodes as PNG.
//
// Key architectural principles:
// 1.  **Explicit Registry**: The set of known formats is an ordinary value built once
//     at startup and handed to the pipeline. There is no process-wide table that
//     codecs register themselves into.
// 2.  **Signature Sniffing**: Each `FormatEntry` lists one or more magic-byte
//     prefixes. A `?` byte in a prefix matches anything. Entries are consulted in
//     registration order and the first match wins.
// 3.  **Two Failure Modes**: When nothing matches, the stream is an
//     `UnsupportedFormat`. When a signature matches but the codec rejects the rest
//     of the data, it is `CorruptData`. The two are never conflated.
// 4.  **Open for Extension**: Adding a format means registering a name, its
//     signatures and two plain functions. The aggregator never changes.

use std::io::{Cursor, Read};

use image::{DynamicImage, ImageFormat, ImageReader, ImageResult, Limits};
use log::debug;

use crate::core_modules::pixel_grid::DecodedGrid;
use crate::error::{CensusError, Result};

pub type FormatName = &'static str;
pub type DecodeFn = fn(&[u8], Limits) -> ImageResult<DynamicImage>;
pub type ProbeFn = fn(&[u8]) -> ImageResult<(u32, u32)>;

const WILDCARD: u8 = b'?';
const HEAD_PREVIEW_LEN: usize = 8;

/// A magic-byte prefix. `?` matches any single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub &'static [u8]);

impl Signature {
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.len() >= self.0.len()
            && self
                .0
                .iter()
                .zip(bytes)
                .all(|(&expected, &actual)| expected == WILDCARD || expected == actual)
    }
}

/// Everything the registry needs to recognise and decode one format.
#[derive(Debug, Clone)]
pub struct FormatEntry {
    pub name: FormatName,
    pub signatures: Vec<Signature>,
    pub decode: DecodeFn,
    pub probe: ProbeFn,
}

impl FormatEntry {
    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.signatures.iter().any(|signature| signature.matches(bytes))
    }
}

/// Resource ceilings applied while decoding. `None` disables a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_image_width: Option<u32>,
    pub max_image_height: Option<u32>,
    /// Maximum bytes a codec may allocate for one image.
    pub max_alloc: Option<u64>,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        let defaults = Limits::default();
        Self {
            max_image_width: defaults.max_image_width,
            max_image_height: defaults.max_image_height,
            max_alloc: defaults.max_alloc,
        }
    }
}

impl DecodeLimits {
    pub fn unlimited() -> Self {
        Self {
            max_image_width: None,
            max_image_height: None,
            max_alloc: None,
        }
    }

    fn to_image_limits(self) -> Limits {
        let mut limits = Limits::no_limits();
        limits.max_image_width = self.max_image_width;
        limits.max_image_height = self.max_image_height;
        limits.max_alloc = self.max_alloc;
        limits
    }
}

/// Ordered collection of known formats plus the limits used when decoding them.
#[derive(Debug, Clone, Default)]
pub struct DecoderRegistry {
    entries: Vec<FormatEntry>,
    limits: DecodeLimits,
}

impl DecoderRegistry {
    /// An empty registry. Every stream is unsupported until formats are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// GIF, PNG and JPEG, consulted in that order.
    pub fn with_default_formats() -> Self {
        let mut registry = Self::new();
        registry.register(FormatEntry {
            name: "gif",
            signatures: vec![Signature(b"GIF87a"), Signature(b"GIF89a")],
            decode: decode_gif,
            probe: probe_gif,
        });
        registry.register(FormatEntry {
            name: "png",
            signatures: vec![Signature(b"\x89PNG\r\n\x1a\n")],
            decode: decode_png,
            probe: probe_png,
        });
        registry.register(FormatEntry {
            name: "jpeg",
            signatures: vec![Signature(b"\xFF\xD8")],
            decode: decode_jpeg,
            probe: probe_jpeg,
        });
        registry
    }

    pub fn register(&mut self, entry: FormatEntry) {
        debug!("registering image format '{}'", entry.name);
        self.entries.push(entry);
    }

    pub fn set_limits(&mut self, limits: DecodeLimits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    pub fn formats(&self) -> impl Iterator<Item = FormatName> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// The first registered entry whose signature matches the start of `bytes`.
    pub fn sniff(&self, bytes: &[u8]) -> Option<&FormatEntry> {
        self.entries.iter().find(|entry| entry.matches(bytes))
    }

    /// Reads the stream to completion, then decodes it.
    pub fn decode<R: Read>(&self, mut reader: R) -> Result<(DecodedGrid, FormatName)> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode_bytes(&bytes)
    }

    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<(DecodedGrid, FormatName)> {
        let entry = self.recognise(bytes)?;
        let image = (entry.decode)(bytes, self.limits.to_image_limits()).map_err(|source| {
            CensusError::CorruptData {
                format: entry.name,
                source,
            }
        })?;
        debug!(
            "decoded {} image {}x{} ({:?})",
            entry.name,
            image.width(),
            image.height(),
            image.color()
        );
        Ok((DecodedGrid::new(image), entry.name))
    }

    /// Reads only the header: format name and dimensions, no pixel data.
    pub fn probe(&self, bytes: &[u8]) -> Result<(FormatName, u32, u32)> {
        let entry = self.recognise(bytes)?;
        let (width, height) = (entry.probe)(bytes).map_err(|source| CensusError::CorruptData {
            format: entry.name,
            source,
        })?;
        Ok((entry.name, width, height))
    }

    fn recognise(&self, bytes: &[u8]) -> Result<&FormatEntry> {
        let entry = self.sniff(bytes).ok_or_else(|| CensusError::UnsupportedFormat {
            head: bytes[..bytes.len().min(HEAD_PREVIEW_LEN)].to_vec(),
        })?;
        debug!("content sniffed as '{}'", entry.name);
        Ok(entry)
    }
}

fn decode_with(bytes: &[u8], format: ImageFormat, limits: Limits) -> ImageResult<DynamicImage> {
    let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
    reader.limits(limits);
    reader.decode()
}

fn probe_with(bytes: &[u8], format: ImageFormat) -> ImageResult<(u32, u32)> {
    ImageReader::with_format(Cursor::new(bytes), format).into_dimensions()
}

fn decode_gif(bytes: &[u8], limits: Limits) -> ImageResult<DynamicImage> {
    decode_with(bytes, ImageFormat::Gif, limits)
}

fn decode_png(bytes: &[u8], limits: Limits) -> ImageResult<DynamicImage> {
    decode_with(bytes, ImageFormat::Png, limits)
}

fn decode_jpeg(bytes: &[u8], limits: Limits) -> ImageResult<DynamicImage> {
    decode_with(bytes, ImageFormat::Jpeg, limits)
}

fn probe_gif(bytes: &[u8]) -> ImageResult<(u32, u32)> {
    probe_with(bytes, ImageFormat::Gif)
}

fn probe_png(bytes: &[u8]) -> ImageResult<(u32, u32)> {
    probe_with(bytes, ImageFormat::Png)
}

fn probe_jpeg(bytes: &[u8]) -> ImageResult<(u32, u32)> {
    probe_with(bytes, ImageFormat::Jpeg)
}
