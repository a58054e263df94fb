//! Reporting view of a frequency table.
//!
//! A [`FrequencyReport`] is a detached snapshot: the rows an entropy coder
//! (or a person) reads once the analysis pass is over. With the `serde`
//! feature it serializes to JSON for a downstream code-construction stage.

use crate::table::FrequencyTable;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One `(pattern, width, count)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReportRow {
    /// Pattern as an MSB-first bit string.
    pub pattern: String,
    /// Packed pattern bytes.
    pub packed: Vec<u8>,
    /// Pattern width in bits.
    pub width: u16,
    /// Number of observations.
    pub count: u32,
}

/// Snapshot of a frequency table in ascending pattern order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrequencyReport {
    /// Configured chunk width in bits.
    pub width: u16,
    /// Total observations.
    pub total: u64,
    /// Number of distinct patterns.
    pub distinct: usize,
    /// Shannon entropy in bits per chunk.
    pub entropy: f64,
    /// Rows in ascending pattern order.
    pub rows: Vec<ReportRow>,
}

impl FrequencyReport {
    /// Build a report from `table`, recorded with `width`-bit chunks.
    pub fn from_table(table: &FrequencyTable, width: u16) -> Self {
        let rows = table
            .entries()
            .map(|entry| ReportRow {
                pattern: entry.chunk().to_string(),
                packed: entry.pattern().to_vec(),
                width: entry.width(),
                count: entry.count(),
            })
            .collect();

        Self {
            width,
            total: table.total(),
            distinct: table.len(),
            entropy: table.entropy(),
            rows,
        }
    }

    /// Entropy-bound size of the input in bits, `total * entropy`.
    pub fn entropy_bound_bits(&self) -> f64 {
        self.total as f64 * self.entropy
    }
}

impl fmt::Display for FrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} chunks of {} bits, {} distinct, entropy {:.4} bits/chunk",
            self.total, self.width, self.distinct, self.entropy
        )?;
        for row in &self.rows {
            writeln!(f, "{:>w$}  {}", row.pattern, row.count, w = self.width as usize)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for value in [0xB0, 0x20, 0x40, 0xF0, 0x20] {
            table.add_or_increment(&[value], 4).unwrap();
        }
        table
    }

    #[test]
    fn test_rows_in_pattern_order() {
        let report = FrequencyReport::from_table(&sample(), 4);
        assert_eq!(report.total, 5);
        assert_eq!(report.distinct, 4);

        let rows: Vec<(&str, u32)> = report
            .rows
            .iter()
            .map(|r| (r.pattern.as_str(), r.count))
            .collect();
        assert_eq!(
            rows,
            vec![("0010", 2), ("0100", 1), ("1011", 1), ("1111", 1)]
        );
        assert_eq!(report.rows[0].packed, vec![0x20]);
    }

    #[test]
    fn test_display() {
        let text = FrequencyReport::from_table(&sample(), 4).to_string();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("5 chunks of 4 bits, 4 distinct"));
        assert_eq!(lines.next(), Some("0010  2"));
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_entropy_bound() {
        let report = FrequencyReport::from_table(&FrequencyTable::new(), 8);
        assert_eq!(report.entropy_bound_bits(), 0.0);
        assert!(report.rows.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_json() {
        let report = FrequencyReport::from_table(&sample(), 4);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["distinct"], 4);
        assert_eq!(json["rows"][0]["pattern"], "0010");
        assert_eq!(json["rows"][0]["count"], 2);
    }
}
