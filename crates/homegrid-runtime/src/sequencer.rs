#![forbid(unsafe_code)]

//! Deadline-ordered timer sequencing with generation tokens.
//!
//! The host model is cooperative and single-threaded: timer callbacks fire in
//! schedule order but may be arbitrarily late. The [`Sequencer`] is a plain
//! deadline queue the shell drains on each tick; it never spawns threads and
//! never blocks. Each entry carries the [`Generation`] that was live when it
//! was scheduled, so a later step can be dropped when the sequence it belongs
//! to has been superseded — cancellation without a cancel API.
//!
//! # Invariants
//!
//! 1. Entries fire in `(deadline, insertion order)` order; two entries with
//!    the same deadline fire in the order they were scheduled.
//! 2. `poll()` never returns an entry whose deadline is in the future.
//! 3. The queue assumes nothing about how late `poll()` is called; a late
//!    poll drains every entry that has come due in the interim, in order.
//!
//! # Failure Modes
//!
//! None — scheduling into the past simply makes the entry due on the next
//! poll (used for "one tick later" re-anchoring).

use web_time::{Duration, Instant};

/// Monotonic version counter for a transition sequence.
///
/// Every new forward or reverse sequence bumps the live generation; delayed
/// steps scheduled under an older generation no longer apply when they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The initial generation.
    pub const ZERO: Self = Self(0);

    /// Advance to the next generation, returning the new value.
    pub fn bump(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A due entry returned by [`Sequencer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<M> {
    /// The generation captured when the entry was scheduled.
    pub generation: Generation,
    /// The message to apply.
    pub msg: M,
}

#[derive(Debug)]
struct Entry<M> {
    due: Instant,
    /// Insertion order; keeps same-deadline entries FIFO.
    seq: u64,
    generation: Generation,
    msg: M,
}

/// A single-threaded deadline queue for chained phase transitions.
#[derive(Debug)]
pub struct Sequencer<M> {
    entries: Vec<Entry<M>>,
    next_seq: u64,
}

impl<M> Sequencer<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `msg` to fire `delay` after `now`, tagged with `generation`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, generation: Generation, msg: M) {
        let due = now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        // Insert sorted by (due, seq); stable for equal deadlines.
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(
            pos,
            Entry {
                due,
                seq,
                generation,
                msg,
            },
        );
    }

    /// Schedule `msg` for the next tick (a zero-delay deadline).
    pub fn schedule_next_tick(&mut self, now: Instant, generation: Generation, msg: M) {
        self.schedule(now, Duration::ZERO, generation, msg);
    }

    /// Drain every entry due at or before `now`, in firing order.
    pub fn poll(&mut self, now: Instant) -> Vec<Fired<M>> {
        let due_count = self.entries.partition_point(|e| e.due <= now);
        let mut fired: Vec<_> = self.entries.drain(..due_count).collect();
        // partition_point keeps (due) order; enforce seq order among equals.
        fired.sort_by_key(|e| (e.due, e.seq));
        fired
            .into_iter()
            .map(|e| Fired {
                generation: e.generation,
                msg: e.msg,
            })
            .collect()
    }

    /// Deadline of the soonest pending entry, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.first().map(|e| e.due)
    }

    /// Number of pending entries.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<M> Default for Sequencer<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn generation_bump_is_monotonic() {
        let mut g = Generation::ZERO;
        let g1 = g.bump();
        let g2 = g.bump();
        assert!(g2 > g1);
        assert_eq!(g, g2);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(100), Generation::ZERO, "a");
        assert!(seq.poll(now + ms(50)).is_empty());
        assert_eq!(seq.pending(), 1);
    }

    #[test]
    fn fires_in_deadline_order() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(300), Generation::ZERO, "late");
        seq.schedule(now, ms(100), Generation::ZERO, "early");
        let fired = seq.poll(now + ms(400));
        let msgs: Vec<_> = fired.iter().map(|f| f.msg).collect();
        assert_eq!(msgs, ["early", "late"]);
    }

    #[test]
    fn equal_deadlines_fire_fifo() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(100), Generation::ZERO, 1);
        seq.schedule(now, ms(100), Generation::ZERO, 2);
        seq.schedule(now, ms(100), Generation::ZERO, 3);
        let fired = seq.poll(now + ms(100));
        let msgs: Vec<_> = fired.iter().map(|f| f.msg).collect();
        assert_eq!(msgs, [1, 2, 3]);
    }

    #[test]
    fn same_delay_different_instants_keep_relative_order() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(100), Generation::ZERO, "first");
        seq.schedule(now + ms(10), ms(100), Generation::ZERO, "second");
        let fired = seq.poll(now + ms(500));
        let msgs: Vec<_> = fired.iter().map(|f| f.msg).collect();
        assert_eq!(msgs, ["first", "second"]);
    }

    #[test]
    fn late_poll_drains_everything_due() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(16), Generation::ZERO, "paint");
        seq.schedule(now, ms(600), Generation::ZERO, "settle");
        // Host was busy; one very late poll sees both, in order.
        let fired = seq.poll(now + ms(5_000));
        let msgs: Vec<_> = fired.iter().map(|f| f.msg).collect();
        assert_eq!(msgs, ["paint", "settle"]);
        assert!(seq.is_empty());
    }

    #[test]
    fn next_tick_is_due_immediately() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule_next_tick(now, Generation::ZERO, "re-anchor");
        assert_eq!(seq.poll(now).len(), 1);
    }

    #[test]
    fn entries_carry_their_generation() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        let mut live = Generation::ZERO;
        let stale = live.bump();
        seq.schedule(now, ms(10), stale, "old");
        let fresh = live.bump();
        seq.schedule(now, ms(10), fresh, "new");
        let fired = seq.poll(now + ms(10));
        assert_eq!(fired[0].generation, stale);
        assert_eq!(fired[1].generation, fresh);
    }

    #[test]
    fn clear_drops_pending() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(10), Generation::ZERO, ());
        seq.clear();
        assert!(seq.poll(now + ms(10)).is_empty());
    }

    #[test]
    fn next_due_is_soonest() {
        let now = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(now, ms(300), Generation::ZERO, ());
        seq.schedule(now, ms(100), Generation::ZERO, ());
        assert_eq!(seq.next_due(), Some(now + ms(100)));
    }
}
