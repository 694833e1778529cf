//! Hotel report export and import
//!
//! Text format, one block per occupied room in ascending order:
//!
//! ```text
//! Total Occupants: 2
//! ==============================
//! Room: 6
//!  - Route: 1
//!  - Sequence: 1
//!  - Round: 1
//!
//! Room: 12
//!  ...
//! ```
//!
//! Destinations ending in `.json` receive a serde_json snapshot instead.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hotel::{HilbertHotel, PrimePair};
use crate::models::{Guest, Tag};

const TOTAL_PREFIX: &str = "Total Occupants: ";
const ROOM_PREFIX: &str = "Room: ";
const ROUTE_PREFIX: &str = " - Route: ";
const SEQUENCE_PREFIX: &str = " - Sequence: ";
const ROUND_PREFIX: &str = " - Round: ";
const SEPARATOR_WIDTH: usize = 30;

/// Output format for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    /// Pick the format from a destination's extension
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Text,
        }
    }
}

/// Write the text report for `hotel`
pub fn write_report<W: Write>(hotel: &HilbertHotel, writer: &mut W) -> std::io::Result<()> {
    let occupants = hotel.occupants();
    writeln!(writer, "{}{}", TOTAL_PREFIX, occupants.len())?;
    writeln!(writer, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    for (room, guest) in &occupants {
        writeln!(writer, "{}{}", ROOM_PREFIX, room)?;
        writeln!(writer, "{}{}", ROUTE_PREFIX, guest.channel)?;
        writeln!(writer, "{}{}", SEQUENCE_PREFIX, guest.sequence)?;
        writeln!(writer, "{}{}", ROUND_PREFIX, guest.round)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Save `hotel` to `path`, as text or JSON depending on the extension
///
/// Any failure to create or write the file is returned as
/// [`Error::Export`]; the hotel itself is never modified.
pub fn export_to_path(hotel: &HilbertHotel, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::for_path(path);
    let export_error = |source| Error::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(export_error)?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Text => write_report(hotel, &mut writer).map_err(export_error)?,
        ExportFormat::Json => {
            let json = serde_json::to_vec_pretty(&HotelSnapshot::capture(hotel))?;
            writer.write_all(&json).map_err(export_error)?
        }
    }
    writer.flush().map_err(export_error)?;

    tracing::info!(path = %path.display(), occupants = hotel.len(), ?format, "Saved hotel data");
    Ok(format)
}

/// A text report read back from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total: usize,
    /// Rooms in file order
    pub occupants: Vec<(BigUint, Guest)>,
}

/// Parse a text report produced by [`write_report`]
pub fn read_report<R: BufRead>(reader: R) -> Result<Report> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::Report("empty report".into()))?;
    let total: usize = parse_field(&header, TOTAL_PREFIX)?;

    match lines.next().transpose()? {
        Some(sep) if !sep.is_empty() && sep.chars().all(|c| c == '=') => {}
        other => {
            return Err(Error::Report(format!(
                "expected separator line, got {:?}",
                other
            )))
        }
    }

    let mut occupants = Vec::with_capacity(total);
    while let Some(line) = lines.next().transpose()? {
        if line.trim().is_empty() {
            continue;
        }
        let room: BigUint = parse_field(&line, ROOM_PREFIX)?;
        let channel: Tag = parse_field(&next_line(&mut lines)?, ROUTE_PREFIX)?;
        let sequence: Tag = parse_field(&next_line(&mut lines)?, SEQUENCE_PREFIX)?;
        let round: u64 = parse_field(&next_line(&mut lines)?, ROUND_PREFIX)?;
        occupants.push((room, Guest::new(channel, sequence, round)));
    }

    if occupants.len() != total {
        return Err(Error::Report(format!(
            "header declares {} occupants but {} rooms were listed",
            total,
            occupants.len()
        )));
    }

    Ok(Report { total, occupants })
}

fn next_line<I>(lines: &mut I) -> Result<String>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::Report("report ends inside a room block".into()))
}

fn parse_field<T>(line: &str, prefix: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = line
        .strip_prefix(prefix)
        .ok_or_else(|| Error::Report(format!("expected '{}', got '{}'", prefix.trim(), line)))?;
    value
        .trim()
        .parse()
        .map_err(|e| Error::Report(format!("bad value in '{}': {}", line, e)))
}

/// A room entry in the JSON snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEntry {
    /// Decimal room number
    pub room: String,
    #[serde(flatten)]
    pub guest: Guest,
}

/// Full engine state as written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSnapshot {
    pub total_occupants: usize,
    pub primes: PrimePair,
    pub pending: BTreeMap<u32, u32>,
    pub rounds: BTreeMap<Tag, u64>,
    pub rooms: Vec<RoomEntry>,
}

impl HotelSnapshot {
    pub fn capture(hotel: &HilbertHotel) -> Self {
        let rooms: Vec<RoomEntry> = hotel
            .occupants()
            .into_iter()
            .map(|(room, guest)| RoomEntry {
                room: room.to_string(),
                guest,
            })
            .collect();

        Self {
            total_occupants: rooms.len(),
            primes: hotel.primes(),
            pending: hotel.pending().clone(),
            rounds: hotel.rounds().iter().map(|(&tag, &round)| (tag, round)).collect(),
            rooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample_hotel() -> HilbertHotel {
        let mut hotel = HilbertHotel::new();
        hotel.enqueue(1, 2).unwrap();
        hotel.enqueue(2, 1).unwrap();
        hotel.assign_pending().unwrap();
        hotel
            .add(BigUint::from(7u32), Tag::Manual, Tag::Manual)
            .unwrap();
        hotel
    }

    #[test]
    fn test_report_layout() {
        let hotel = sample_hotel();
        let mut buf = Vec::new();
        write_report(&hotel, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "\
Total Occupants: 4
==============================
Room: 6
 - Route: 1
 - Sequence: 1
 - Round: 1

Room: 7
 - Route: Manual
 - Sequence: Manual
 - Round: 1

Room: 12
 - Route: 1
 - Sequence: 2
 - Round: 1

Room: 18
 - Route: 2
 - Sequence: 1
 - Round: 1

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_report() {
        let mut buf = Vec::new();
        write_report(&HilbertHotel::new(), &mut buf).unwrap();
        let report = read_report(Cursor::new(buf)).unwrap();
        assert_eq!(report.total, 0);
        assert!(report.occupants.is_empty());
    }

    #[test]
    fn test_export_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotel_data.txt");
        let hotel = sample_hotel();

        let format = export_to_path(&hotel, &path).unwrap();
        assert_eq!(format, ExportFormat::Text);

        let file = std::io::BufReader::new(File::open(&path).unwrap());
        let report = read_report(file).unwrap();
        assert_eq!(report.total, hotel.len());
        assert_eq!(report.occupants, hotel.occupants());
    }

    #[test]
    fn test_export_to_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("hotel.txt");
        let hotel = sample_hotel();

        let err = export_to_path(&hotel, &path).unwrap_err();
        assert!(matches!(err, Error::Export { .. }));
        assert_eq!(hotel.len(), 4);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_carries_path() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }

        let mut hotel = HilbertHotel::new();
        hotel.enqueue(1, 100).unwrap();
        hotel.enqueue(2, 100).unwrap();
        hotel.assign_pending().unwrap();

        let dir = tempdir().unwrap();
        for name in ["hotel.txt", "hotel.json"] {
            let path = dir.path().join(name);
            std::os::unix::fs::symlink(full, &path).unwrap();

            match export_to_path(&hotel, &path) {
                Err(Error::Export { path: failed, .. }) => assert_eq!(failed, path),
                other => panic!("expected an export error for {}, got {:?}", name, other),
            }
        }
        assert_eq!(hotel.len(), 200);
    }

    #[test]
    fn test_json_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotel.json");
        let mut hotel = sample_hotel();
        hotel.enqueue(3, 2).unwrap();

        assert_eq!(export_to_path(&hotel, &path).unwrap(), ExportFormat::Json);

        let content = std::fs::read_to_string(&path).unwrap();
        let snapshot: HotelSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(snapshot, HotelSnapshot::capture(&hotel));
        assert_eq!(snapshot.total_occupants, 4);
        assert_eq!(snapshot.rooms[1].room, "7");
        assert_eq!(snapshot.rooms[1].guest, Guest::manual(1));
        assert_eq!(snapshot.pending.get(&3), Some(&2));
        assert_eq!(snapshot.rounds.get(&Tag::Manual), Some(&1));
        assert_eq!(snapshot.primes, PrimePair::new(3, 5).unwrap());
    }

    #[test]
    fn test_read_rejects_count_mismatch() {
        let text = "Total Occupants: 2\n==========\nRoom: 6\n - Route: 1\n - Sequence: 1\n - Round: 1\n\n";
        let err = read_report(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::Report(_)));
    }

    #[test]
    fn test_read_rejects_truncated_block() {
        let text = "Total Occupants: 1\n==========\nRoom: 6\n - Route: 1\n";
        assert!(matches!(
            read_report(Cursor::new(text)),
            Err(Error::Report(_))
        ));
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(ExportFormat::for_path(Path::new("a.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::for_path(Path::new("a.txt")), ExportFormat::Text);
        assert_eq!(ExportFormat::for_path(Path::new("report")), ExportFormat::Text);
    }
}
