//! Block lookup table.
//!
//! The lookup file maps each track block to its station, platform and travel
//! direction. It is loaded once at startup and only read afterwards.

mod reader;

pub use reader::{parse_entry, read_lookup, read_lookup_file, LookupFile};

use serde::Serialize;
use std::fmt;

/// Travel direction of a block, as numbered in the lookup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Direction `1`: speeds are positive.
    Forward = 1,
    /// Direction `2`: speeds are negated.
    Reverse = 2,
}

impl Direction {
    /// Parse the literal `"1"` or `"2"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Direction::Forward),
            "2" => Some(Direction::Reverse),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Apply the direction sign to a speed magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            Direction::Forward => magnitude,
            Direction::Reverse => -magnitude,
        }
    }
}

/// One row of the lookup file.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLookupEntry {
    pub id: String,
    pub location: String,
    pub block: String,
    /// `L` or `R`.
    pub direction_letter: String,
    pub direction_code: String,
    pub direction: Direction,
    /// Empty unless the block is a platform block.
    pub platform: String,
    pub station_code: String,
    pub block_length_raw: String,
    pub block_length_m: f64,
    pub from_station: String,
    pub to_station: String,
    /// `B_<block number:04><letter>`.
    pub sort_key: String,
}

impl BlockLookupEntry {
    pub fn is_platform(&self) -> bool {
        !self.platform.is_empty()
    }

    /// Fields copied onto a telemetry sample that matches this block.
    pub fn join_fields(&self) -> JoinFields {
        JoinFields {
            station_code: self.station_code.clone(),
            platform: self.platform.clone(),
            from_station: self.from_station.clone(),
            to_station: self.to_station.clone(),
            direction_code: self.direction_code.clone(),
            direction: self.direction,
            is_platform: self.is_platform(),
        }
    }
}

impl fmt::Display for BlockLookupEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} dir={}{} platform={:?} station={} length={}m {} -> {}",
            self.id,
            self.sort_key,
            self.location,
            self.direction_letter,
            self.direction.number(),
            self.platform,
            self.station_code,
            self.block_length_m,
            self.from_station,
            self.to_station
        )
    }
}

/// Station data a telemetry sample picks up from its lookup entry.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinFields {
    pub station_code: String,
    pub platform: String,
    pub from_station: String,
    pub to_station: String,
    pub direction_code: String,
    pub direction: Direction,
    pub is_platform: bool,
}

/// The loaded lookup table, in file order.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<BlockLookupEntry>,
}

impl LookupTable {
    pub fn new(entries: Vec<BlockLookupEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[BlockLookupEntry] {
        &self.entries
    }

    /// First entry whose block id equals `block` exactly.
    pub fn find(&self, block: &str) -> Option<&BlockLookupEntry> {
        self.entries.iter().find(|entry| entry.block == block)
    }
}
