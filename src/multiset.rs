//! Duplicate-aware view of a point set.
//!
//! GPS receivers often report the same coordinate many times in a row. A
//! [`PointMultiset`] collapses exact duplicates into one entry with an
//! occurrence count, keeping the per-occurrence classification flags so a
//! renderer can size and color one glyph per location.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::point::{Point, PointKey};

/// One distinct location and every occurrence of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultisetEntry {
    /// The location.
    pub point: Point,
    /// Input indices of every occurrence, ascending.
    pub occurrences: Vec<usize>,
    /// Classification of each occurrence, parallel to `occurrences`.
    pub flags: Vec<bool>,
}

impl MultisetEntry {
    /// Number of occurrences.
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    /// True when every occurrence is flagged.
    pub fn all_flagged(&self) -> bool {
        self.flags.iter().all(|&f| f)
    }
}

/// Points grouped by exact coordinates, in first-occurrence order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PointMultiset {
    entries: Vec<MultisetEntry>,
    #[serde(skip)]
    index: HashMap<PointKey, usize>,
    total: usize,
}

impl PointMultiset {
    /// Group `points`, flagging every occurrence `false`.
    pub fn from_points(points: &[Point]) -> Self {
        let mut set = Self::default();
        for (i, &p) in points.iter().enumerate() {
            set.insert(i, p, false);
        }
        set
    }

    /// Group `points` with one classification flag per point.
    pub fn with_flags(points: &[Point], flags: &[bool]) -> Result<Self> {
        if points.len() != flags.len() {
            return Err(Error::LengthMismatch {
                expected: points.len(),
                found: flags.len(),
            });
        }
        let mut set = Self::default();
        for (i, (&p, &flag)) in points.iter().zip(flags).enumerate() {
            set.insert(i, p, flag);
        }
        Ok(set)
    }

    fn insert(&mut self, idx: usize, point: Point, flag: bool) {
        let slot = *self.index.entry(point.key()).or_insert_with(|| {
            self.entries.push(MultisetEntry {
                point,
                occurrences: Vec::new(),
                flags: Vec::new(),
            });
            self.entries.len() - 1
        });
        let entry = &mut self.entries[slot];
        entry.occurrences.push(idx);
        entry.flags.push(flag);
        self.total += 1;
    }

    /// Distinct locations in first-occurrence order.
    pub fn entries(&self) -> &[MultisetEntry] {
        &self.entries
    }

    /// Entry for an exact location.
    pub fn get(&self, point: Point) -> Option<&MultisetEntry> {
        self.index.get(&point.key()).map(|&i| &self.entries[i])
    }

    /// Occurrence count of an exact location (0 when absent).
    pub fn count(&self, point: Point) -> usize {
        self.get(point).map_or(0, MultisetEntry::count)
    }

    /// Number of distinct locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no points were inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of points, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }
}
