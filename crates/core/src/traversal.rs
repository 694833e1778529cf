//! Diagonal traversal of the (channel, sequence) grid
//!
//! Layer `k` covers every pair whose larger coordinate is `k`. The column
//! pass visits `(k, 1) ..= (k, k)`, then the row pass visits
//! `(1, k) .. (k - 1, k)`, skipping the corner already seen. Walking
//! layers in increasing order reaches every cell of the infinite grid
//! after finitely many steps.

use std::collections::BTreeMap;

/// A (channel, sequence) cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub channel: u32,
    pub sequence: u32,
}

impl Cell {
    pub fn new(channel: u32, sequence: u32) -> Self {
        Self { channel, sequence }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Column,
    Row,
    Done,
}

/// Iterator over the cells of one diagonal layer, in visiting order
#[derive(Debug, Clone)]
pub struct DiagonalLayer {
    k: u32,
    index: u32,
    pass: Pass,
}

impl DiagonalLayer {
    /// Cells of layer `k` (1-based). Layer 0 is empty.
    pub fn new(k: u32) -> Self {
        Self {
            k,
            index: 1,
            pass: if k == 0 { Pass::Done } else { Pass::Column },
        }
    }
}

impl Iterator for DiagonalLayer {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            match self.pass {
                Pass::Column => {
                    if self.index <= self.k {
                        let cell = Cell::new(self.k, self.index);
                        self.index += 1;
                        return Some(cell);
                    }
                    self.pass = Pass::Row;
                    self.index = 1;
                }
                Pass::Row => {
                    if self.index < self.k {
                        let cell = Cell::new(self.index, self.k);
                        self.index += 1;
                        return Some(cell);
                    }
                    self.pass = Pass::Done;
                }
                Pass::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.pass {
            Pass::Column => (self.k - self.index + 1) + self.k.saturating_sub(1),
            Pass::Row => self.k.saturating_sub(self.index),
            Pass::Done => 0,
        } as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DiagonalLayer {}

/// Cells of layer `k` that are still pending in `queue`, in visiting order
///
/// `queue` maps channel to queued guest count. A cell is pending when its
/// sequence does not exceed the channel's count. The result is the same
/// as filtering [`DiagonalLayer`], without walking cells of channels that
/// have nothing queued.
pub fn pending_cells(k: u32, queue: &BTreeMap<u32, u32>) -> impl Iterator<Item = Cell> + '_ {
    let column_rows = match k {
        0 => 0,
        _ => queue.get(&k).map_or(0, |&count| count.min(k)),
    };
    let column = (1..=column_rows).map(move |row| Cell::new(k, row));

    let row = queue
        .range(..k)
        .filter(move |&(_, &count)| count >= k)
        .map(move |(&channel, _)| Cell::new(channel, k));

    column.chain(row)
}
