//! Scheduled-event queue.
//!
//! Deferred work (wave spawns, staggered enemy spawns, skill expiry, dash
//! recharge, the game-over reveal) is queued against a wall-clock deadline and
//! drained once per engine tick. Clearing the queue cancels everything, which
//! is what restart and return-to-menu rely on.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ascension_core::enums::{SlotKey, SpawnPausePolicy};
use ascension_core::types::WallClockMs;

/// Deferred engine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Spawn the next wave and reschedule itself.
    SpawnWave,
    /// One staggered enemy of a wave.
    SpawnEnemy,
    /// Deactivate the skill in `slot` if it is still the same activation.
    ExpireSkill { slot: SlotKey, activation: u64 },
    /// End the post-level-up spawn reduction.
    ClearSpawnReduction,
    /// Periodic dash charge reconciliation.
    RechargeDash,
    /// End of the death animation.
    ShowGameOver,
}

impl ScheduledEvent {
    /// Events governed by the spawn pause policy.
    pub fn is_spawn(&self) -> bool {
        matches!(
            self,
            ScheduledEvent::SpawnWave
                | ScheduledEvent::SpawnEnemy
                | ScheduledEvent::ClearSpawnReduction
        )
    }

    /// Whether this event must wait while a level-up choice pauses the world.
    pub fn held_while_paused(&self, policy: SpawnPausePolicy) -> bool {
        match self {
            ScheduledEvent::ExpireSkill { .. } => true,
            _ if self.is_spawn() => policy == SpawnPausePolicy::Freeze,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due_ms: WallClockMs,
    sequence: u64,
    event: ScheduledEvent,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.sequence).cmp(&(other.due_ms, other.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of events ordered by deadline, then by insertion order.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_sequence: u64,
    held: Vec<Entry>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once the clock reaches `due_ms`.
    pub fn schedule(&mut self, due_ms: WallClockMs, event: ScheduledEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(Entry {
            due_ms,
            sequence,
            event,
        }));
    }

    /// Queue `event` to fire `delay_ms` after `now`.
    pub fn schedule_in(&mut self, now: WallClockMs, delay_ms: u64, event: ScheduledEvent) {
        self.schedule(now.saturating_add(delay_ms), event);
    }

    /// Pop the earliest event due at `now` that `hold` does not hold back.
    /// Held events stay queued with their original deadline and order.
    pub fn pop_due(
        &mut self,
        now: WallClockMs,
        hold: impl Fn(&ScheduledEvent) -> bool,
    ) -> Option<ScheduledEvent> {
        let mut found = None;
        while let Some(Reverse(entry)) = self.heap.peek().copied() {
            if entry.due_ms > now {
                break;
            }
            self.heap.pop();
            if hold(&entry.event) {
                self.held.push(entry);
            } else {
                found = Some(entry.event);
                break;
            }
        }
        for entry in self.held.drain(..) {
            self.heap.push(Reverse(entry));
        }
        found
    }

    /// Push back the deadline of every matching event by `delay_ms`.
    pub fn delay_where(&mut self, delay_ms: u64, mut predicate: impl FnMut(&ScheduledEvent) -> bool) {
        if delay_ms == 0 {
            return;
        }
        let entries: Vec<Entry> = self.heap.drain().map(|Reverse(entry)| entry).collect();
        for mut entry in entries {
            if predicate(&entry.event) {
                entry.due_ms = entry.due_ms.saturating_add(delay_ms);
            }
            self.heap.push(Reverse(entry));
        }
    }

    /// Deadline of the earliest queued event matching `predicate`.
    pub fn next_due(&self, predicate: impl Fn(&ScheduledEvent) -> bool) -> Option<WallClockMs> {
        self.heap
            .iter()
            .filter(|Reverse(entry)| predicate(&entry.event))
            .map(|Reverse(entry)| entry.due_ms)
            .min()
    }

    /// Number of queued events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&ScheduledEvent) -> bool) -> usize {
        self.heap
            .iter()
            .filter(|Reverse(entry)| predicate(&entry.event))
            .count()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_deadline_then_insertion_order() {
        let mut queue = EventQueue::new();
        queue.schedule(200, ScheduledEvent::SpawnWave);
        queue.schedule(100, ScheduledEvent::SpawnEnemy);
        queue.schedule(100, ScheduledEvent::RechargeDash);

        assert_eq!(queue.pop_due(50, |_| false), None);
        assert_eq!(queue.pop_due(150, |_| false), Some(ScheduledEvent::SpawnEnemy));
        assert_eq!(queue.pop_due(150, |_| false), Some(ScheduledEvent::RechargeDash));
        assert_eq!(queue.pop_due(150, |_| false), None);
        assert_eq!(queue.pop_due(200, |_| false), Some(ScheduledEvent::SpawnWave));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_held_events_stay_queued() {
        let mut queue = EventQueue::new();
        let expire = ScheduledEvent::ExpireSkill {
            slot: SlotKey::Q,
            activation: 1,
        };
        queue.schedule(10, expire);
        queue.schedule(20, ScheduledEvent::RechargeDash);

        let hold = |e: &ScheduledEvent| e.held_while_paused(SpawnPausePolicy::KeepRunning);
        assert_eq!(queue.pop_due(30, hold), Some(ScheduledEvent::RechargeDash));
        assert_eq!(queue.pop_due(30, hold), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(30, |_| false), Some(expire));
    }

    #[test]
    fn test_pause_policy() {
        let keep = SpawnPausePolicy::KeepRunning;
        let freeze = SpawnPausePolicy::Freeze;
        assert!(!ScheduledEvent::SpawnWave.held_while_paused(keep));
        assert!(ScheduledEvent::SpawnWave.held_while_paused(freeze));
        assert!(ScheduledEvent::SpawnEnemy.held_while_paused(freeze));
        assert!(!ScheduledEvent::RechargeDash.held_while_paused(freeze));
        assert!(!ScheduledEvent::ShowGameOver.held_while_paused(freeze));
    }

    #[test]
    fn test_delay_where_shifts_only_matching() {
        let mut queue = EventQueue::new();
        queue.schedule(100, ScheduledEvent::SpawnWave);
        queue.schedule(100, ScheduledEvent::RechargeDash);
        queue.delay_where(500, ScheduledEvent::is_spawn);

        assert_eq!(queue.next_due(ScheduledEvent::is_spawn), Some(600));
        assert_eq!(
            queue.next_due(|e| *e == ScheduledEvent::RechargeDash),
            Some(100)
        );
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut queue = EventQueue::new();
        queue.schedule(0, ScheduledEvent::SpawnWave);
        queue.schedule(5, ScheduledEvent::ShowGameOver);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_due(u64::MAX, |_| false), None);
    }
}
