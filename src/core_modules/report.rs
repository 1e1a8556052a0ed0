// THEORY:
// The `Report` is the final, read-only product of a run. It takes the unordered
// `FrequencyTable` and imposes the only order the user ever sees: count
// descending, with a documented tie-break so equal counts print the same way on
// every run.
//
// Key architectural principles:
// 1.  **Deterministic Order**: Hash-map iteration order is never observable. Ties
//     are broken on the color key (ascending by default), so two runs over the
//     same image print identical output.
// 2.  **Pure Rendering**: `render` cannot fail and does not touch the table. The
//     text form is produced separately by `write_to`, so callers can inspect the
//     entries without parsing output.
// 3.  **Self-Check**: The report keeps the dimensions next to the total so the
//     `width * height == total` invariant can be verified after the fact.

use std::fmt;
use std::io::{self, Write};

use crate::core_modules::color_key::ColorKey;
use crate::core_modules::decoder_registry::FormatName;
use crate::core_modules::frequency_table::{Count, FrequencyTable};

/// How entries with equal counts are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// `000000` before `FFFFFF`.
    #[default]
    KeyAscending,
    KeyDescending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Colors and their counts, count descending.
    pub entries: Vec<(ColorKey, Count)>,
    pub width: u32,
    pub height: u32,
    pub total_count: Count,
    /// Name of the decoder that produced the pixels, when known.
    pub format: Option<FormatName>,
}

/// Orders `table` by count descending, ties by key ascending.
pub fn render(table: &FrequencyTable, width: u32, height: u32) -> Report {
    render_with(table, width, height, TieBreak::default())
}

pub fn render_with(table: &FrequencyTable, width: u32, height: u32, tie_break: TieBreak) -> Report {
    let mut entries: Vec<(ColorKey, Count)> = table.iter().collect();
    entries.sort_unstable_by(|(key_a, count_a), (key_b, count_b)| {
        count_b.cmp(count_a).then_with(|| match tie_break {
            TieBreak::KeyAscending => key_a.packed().cmp(&key_b.packed()),
            TieBreak::KeyDescending => key_b.packed().cmp(&key_a.packed()),
        })
    });

    Report {
        entries,
        width,
        height,
        total_count: table.total_count(),
        format: None,
    }
}

impl Report {
    pub fn with_format(mut self, format: FormatName) -> Self {
        self.format = Some(format);
        self
    }

    /// Number of distinct colors.
    pub fn distinct_colors(&self) -> usize {
        self.entries.len()
    }

    /// True when the counts add up to exactly one per pixel.
    pub fn is_consistent(&self) -> bool {
        self.total_count == self.width as Count * self.height as Count
    }

    /// Writes the dimensions, the frequency table and the total.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dimensions: width={}, height={}", self.width, self.height)?;
        writeln!(f)?;
        writeln!(f, "Pixel color frequencies:")?;
        for (key, count) in &self.entries {
            writeln!(f, "{key} :  {count}")?;
        }
        writeln!(f)?;
        writeln!(f, "Total number tiles: {}", self.total_count)
    }
}
