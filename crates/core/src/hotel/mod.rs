//! The hotel engine
//!
//! Owns the room registry, the pending queue, the per-channel round
//! counters and the prime bases. Guests are queued per channel and placed
//! in one batch by [`HilbertHotel::assign_pending`].

mod footprint;
mod prime_pair;

use std::collections::{BTreeMap, HashMap, HashSet};

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::instrument;

use crate::config::HotelConfig;
use crate::error::{Error, Result};
use crate::invariants::assert_hotel_invariants;
use crate::models::{Guest, Tag};
use crate::sort::heap_sort;
use crate::traversal::{pending_cells, Cell};

pub use footprint::Footprint;
pub use prime_pair::PrimePair;

/// A guest placed by an assignment batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub room: BigUint,
    pub guest: Guest,
    /// Nominal room that was already taken, if probing was needed
    pub probed_from: Option<BigUint>,
}

/// Outcome of one assignment batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Placements in processing order
    pub assignments: Vec<Assignment>,
    /// Guests that were queued when the batch started
    pub requested: u64,
    /// Set when the layer cap stopped the batch early
    pub aborted: bool,
    /// Bases used for this batch
    pub primes: PrimePair,
}

impl BatchReport {
    pub fn assigned(&self) -> u64 {
        self.assignments.len() as u64
    }

    /// Queued guests dropped without a room
    pub fn unassigned(&self) -> u64 {
        self.requested - self.assigned()
    }

    pub fn collisions(&self) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.probed_from.is_some())
            .count()
    }
}

/// Hilbert's hotel: an unbounded set of numbered rooms
#[derive(Debug, Clone, Default)]
pub struct HilbertHotel {
    rooms: HashMap<BigUint, Guest>,
    pending: BTreeMap<u32, u32>,
    rounds: HashMap<Tag, u64>,
    primes: PrimePair,
}

impl HilbertHotel {
    /// Create an empty hotel with bases (2, 3)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty hotel with the given bases
    pub fn with_primes(primes: PrimePair) -> Self {
        Self {
            primes,
            ..Self::default()
        }
    }

    /// Create an empty hotel from configuration
    pub fn from_config(config: &HotelConfig) -> Result<Self> {
        let [first, second] = config.initial_primes;
        Ok(Self::with_primes(PrimePair::new(first, second)?))
    }

    /// Queue `count` guests arriving on `channel`
    ///
    /// Returns the channel's new queued total. Nothing is allocated until
    /// the next call to [`assign_pending`](Self::assign_pending).
    #[instrument(skip(self))]
    pub fn enqueue(&mut self, channel: u32, count: u32) -> Result<u32> {
        if channel < 1 {
            return Err(Error::InvalidInput(
                "Route ID must be 1 or greater".into(),
            ));
        }
        if count < 1 {
            return Err(Error::InvalidInput(
                "Number of guests must be at least 1".into(),
            ));
        }

        let queued = self.pending.get(&channel).copied().unwrap_or(0);
        let total = queued.checked_add(count).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Route {} cannot queue more than {} guests",
                channel,
                u32::MAX
            ))
        })?;
        self.pending.insert(channel, total);

        tracing::debug!(channel, count, queued = total, "Queued guest group");
        Ok(total)
    }

    /// Queued counts by channel
    pub fn pending(&self) -> &BTreeMap<u32, u32> {
        &self.pending
    }

    /// Total guests waiting for a room
    pub fn pending_total(&self) -> u64 {
        self.pending.values().map(|&count| u64::from(count)).sum()
    }

    /// Assign every queued guest to a room
    ///
    /// Cells are visited layer by layer (see [`crate::traversal`]). Each
    /// guest's nominal room is `first^sequence * second^channel`; taken
    /// rooms are resolved by quadratic probing. Afterwards the prime bases
    /// advance and the queue is cleared. Returns `None` if nothing was
    /// queued.
    #[instrument(skip(self), fields(primes = %self.primes))]
    pub fn assign_pending(&mut self) -> Option<BatchReport> {
        self.assign_within(layer_cap)
    }

    /// Run one batch, abandoning it once the layer exceeds
    /// `cap(requested, highest_channel)`
    fn assign_within(&mut self, cap: fn(u64, u32) -> u64) -> Option<BatchReport> {
        if self.pending.is_empty() {
            tracing::info!("No pending guests to assign");
            return None;
        }

        // The queue is cleared by every batch, aborted or not
        let queue = std::mem::take(&mut self.pending);
        let requested: u64 = queue.values().map(|&count| u64::from(count)).sum();
        let highest_channel = queue.keys().next_back().copied().unwrap_or(0);
        let layer_cap = cap(requested, highest_channel);
        let primes = self.primes;

        let mut advanced_channels = HashSet::new();
        let mut assignments = Vec::new();
        let mut assigned: u64 = 0;
        let mut aborted = false;
        let mut k: u64 = 1;

        while assigned < requested {
            let Ok(layer) = u32::try_from(k) else {
                aborted = true;
                break;
            };

            for cell in pending_cells(layer, &queue) {
                if assigned >= requested {
                    break;
                }

                let channel = Tag::Numbered(cell.channel);
                let round = if advanced_channels.insert(cell.channel) {
                    self.advance_round(channel)
                } else {
                    self.round(&channel)
                };

                let assignment = self.place(primes, cell, round);
                assignments.push(assignment);
                assigned += 1;
            }

            k += 1;
            if assigned < requested && k > layer_cap {
                tracing::warn!(
                    layer = k,
                    cap = layer_cap,
                    assigned,
                    requested,
                    "Assignment loop terminated early"
                );
                aborted = true;
                break;
            }
        }

        self.primes = primes.advanced();
        assert_hotel_invariants(self);

        tracing::info!(
            requested,
            assigned,
            aborted,
            next_primes = %self.primes,
            "Finished assigning pending guests"
        );

        Some(BatchReport {
            assignments,
            requested,
            aborted,
            primes,
        })
    }

    /// Bind one grid cell to a vacant room
    fn place(&mut self, primes: PrimePair, cell: Cell, round: u64) -> Assignment {
        let guest = Guest::numbered(cell.channel, cell.sequence, round);
        let nominal = primes.room_for(cell);

        let (room, probed_from) = if self.rooms.contains_key(&nominal) {
            tracing::debug!(room = %nominal, "Room occupied, probing for a vacancy");
            let room = self.probe(&nominal);
            tracing::debug!(room = %room, %guest, "Found vacant room");
            (room, Some(nominal))
        } else {
            (nominal, None)
        };

        tracing::debug!(room = %room, %guest, "Assigning guest");
        self.rooms.insert(room.clone(), guest);

        Assignment {
            room,
            guest,
            probed_from,
        }
    }

    /// First vacant room among `origin + i^2` for `i = 1, 2, ...`
    ///
    /// Offsets strictly increase and the registry is finite, so this
    /// terminates.
    fn probe(&self, origin: &BigUint) -> BigUint {
        let mut step: u64 = 1;
        loop {
            let candidate = origin + BigUint::from(step).pow(2);
            if !self.rooms.contains_key(&candidate) {
                return candidate;
            }
            step += 1;
        }
    }

    /// Bump a channel's round counter and return the new round
    fn advance_round(&mut self, channel: Tag) -> u64 {
        let round = self.rounds.entry(channel).or_insert(0);
        *round += 1;
        *round
    }

    /// Place a guest in a specific room by hand
    ///
    /// Fails without touching the registry if the room is taken.
    #[instrument(skip(self, room), fields(room = %room))]
    pub fn add(&mut self, room: BigUint, channel: Tag, sequence: Tag) -> Result<Guest> {
        if room.is_zero() {
            return Err(Error::InvalidInput(
                "Room number must be at least 1".into(),
            ));
        }
        if let Some(occupant) = self.rooms.get(&room) {
            return Err(Error::Occupied {
                room,
                occupant: *occupant,
            });
        }

        let round = self.advance_round(channel);
        let guest = Guest::new(channel, sequence, round);
        self.rooms.insert(room, guest);
        assert_hotel_invariants(self);

        tracing::info!(%guest, "Added guest by hand");
        Ok(guest)
    }

    /// Remove the guest in `room`, if any
    #[instrument(skip(self, room), fields(room = %room))]
    pub fn remove(&mut self, room: &BigUint) -> Option<Guest> {
        let removed = self.rooms.remove(room);
        match &removed {
            Some(guest) => tracing::info!(%guest, "Removed guest"),
            None => tracing::debug!("Room is not occupied"),
        }
        removed
    }

    /// Look up the guest in `room`
    pub fn search(&self, room: &BigUint) -> Option<&Guest> {
        self.rooms.get(room)
    }

    /// Occupied room numbers, ascending
    pub fn sorted_room_numbers(&self) -> Vec<BigUint> {
        let mut rooms: Vec<BigUint> = self.rooms.keys().cloned().collect();
        heap_sort(&mut rooms);
        rooms
    }

    /// Occupied rooms with their guests, ascending by room
    pub fn occupants(&self) -> Vec<(BigUint, Guest)> {
        self.sorted_room_numbers()
            .into_iter()
            .filter_map(|room| {
                let guest = *self.rooms.get(&room)?;
                Some((room, guest))
            })
            .collect()
    }

    /// Number of occupied rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Bases for the next batch
    pub fn primes(&self) -> PrimePair {
        self.primes
    }

    /// Current round of a channel (0 if it never took part)
    pub fn round(&self, channel: &Tag) -> u64 {
        self.rounds.get(channel).copied().unwrap_or(0)
    }

    /// All round counters
    pub fn rounds(&self) -> &HashMap<Tag, u64> {
        &self.rounds
    }

    pub(crate) fn rooms(&self) -> &HashMap<BigUint, Guest> {
        &self.rooms
    }
}

/// Highest layer a batch may reach before it is abandoned
///
/// Every queued cell lies within layer `max(highest_channel, count)`, so
/// a well-formed queue never reaches the cap.
fn layer_cap(requested: u64, highest_channel: u32) -> u64 {
    requested.max(u64::from(highest_channel)).saturating_mul(2)
}
