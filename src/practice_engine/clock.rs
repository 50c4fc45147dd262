//! Virtual-time timer slots owned by a session.
//!
//! A session needs at most two timers at once:
//!
//! | Slot     | Kind      | Used for |
//! |----------|-----------|----------|
//! | `Ticker` | periodic  | the 3-2-1 countdown and the per-second answer timer |
//! | `Reveal` | one-shot  | showing the next row of a running-total question |
//!
//! Each slot holds at most one armed timer; arming replaces whatever was
//! there. Every armed timer gets a fresh token, and the question index it was
//! armed for travels with each [`TimerEvent`], so a late event can always be
//! recognised as stale and dropped.
//!
//! Time is virtual: the owner moves it forward with [`SessionClock::pop_due`]
//! and [`SessionClock::advance_to`]. Real-time drivers sleep until
//! [`SessionClock::next_deadline`] and then advance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerSlot {
    Ticker,
    Reveal,
}

/// One firing of an armed timer, carrying the identity it was armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub slot: TimerSlot,
    pub token: u64,
    /// Question index the timer was armed for; `None` for the pre-start countdown.
    pub question: Option<usize>,
    /// Virtual time the event is due at.
    pub due: Duration,
}

#[derive(Debug, Clone)]
struct Armed {
    token: u64,
    question: Option<usize>,
    /// `None` once a one-shot has fired.
    due: Option<Duration>,
    period: Option<Duration>,
}

impl Armed {
    fn event(&self, slot: TimerSlot) -> Option<TimerEvent> {
        self.due.map(|due| TimerEvent { slot, token: self.token, question: self.question, due })
    }
}

#[derive(Debug, Default)]
pub struct SessionClock {
    now: Duration,
    next_token: u64,
    ticker: Option<Armed>,
    reveal: Option<Armed>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    fn slot_mut(&mut self, slot: TimerSlot) -> &mut Option<Armed> {
        match slot {
            TimerSlot::Ticker => &mut self.ticker,
            TimerSlot::Reveal => &mut self.reveal,
        }
    }

    fn slot(&self, slot: TimerSlot) -> Option<&Armed> {
        match slot {
            TimerSlot::Ticker => self.ticker.as_ref(),
            TimerSlot::Reveal => self.reveal.as_ref(),
        }
    }

    fn arm(&mut self, slot: TimerSlot, delay: Duration, period: Option<Duration>, question: Option<usize>) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        let due = Some(self.now + delay);
        *self.slot_mut(slot) = Some(Armed { token, question, due, period });
        token
    }

    /// Arm the periodic ticker, first firing one `period` from now.
    pub fn arm_ticker(&mut self, period: Duration, question: Option<usize>) -> u64 {
        self.arm(TimerSlot::Ticker, period, Some(period), question)
    }

    /// Arm the one-shot reveal timer.
    pub fn arm_reveal(&mut self, delay: Duration, question: Option<usize>) -> u64 {
        self.arm(TimerSlot::Reveal, delay, None, question)
    }

    pub fn cancel_ticker(&mut self) {
        self.ticker = None;
    }

    pub fn cancel_reveal(&mut self) {
        self.reveal = None;
    }

    pub fn cancel_all(&mut self) {
        self.ticker = None;
        self.reveal = None;
    }

    /// Number of timers that can still fire.
    pub fn live_count(&self) -> usize {
        [&self.ticker, &self.reveal]
            .iter()
            .filter(|armed| armed.as_ref().is_some_and(|a| a.due.is_some()))
            .count()
    }

    /// True while the timer that produced `event` is still armed in its slot and
    /// `event` has not fired yet.
    pub fn is_live(&self, event: &TimerEvent) -> bool {
        self.slot(event.slot)
            .is_some_and(|armed| armed.token == event.token && armed.due == Some(event.due))
    }

    /// Absolute virtual time of the earliest pending event.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending().into_iter().map(|e| e.due).min()
    }

    /// Every event that would fire next, one per live slot.
    pub fn pending(&self) -> Vec<TimerEvent> {
        let mut events: Vec<TimerEvent> = [TimerSlot::Ticker, TimerSlot::Reveal]
            .into_iter()
            .filter_map(|slot| self.slot(slot).and_then(|armed| armed.event(slot)))
            .collect();
        events.sort_by_key(|e| e.due);
        events
    }

    /// Consume `event` if it is still live: moves time up to its due time and
    /// reschedules a periodic timer or spends a one-shot. Stale events return `false`.
    pub fn take(&mut self, event: &TimerEvent) -> bool {
        if !self.is_live(event) {
            return false;
        }
        self.now = self.now.max(event.due);
        if let Some(armed) = self.slot_mut(event.slot).as_mut() {
            armed.due = armed.period.map(|period| event.due + period);
        }
        true
    }

    /// Pop the earliest event due at or before `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerEvent> {
        let next = self.pending().into_iter().find(|e| e.due <= until)?;
        self.take(&next);
        Some(next)
    }

    /// Move time forward without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
