// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Effect scheduling state.
//!
//! At most one effect timer is live. Starting or cancelling an effect aborts
//! the previous timer task and bumps a generation counter; a timer only fires
//! while its generation is current, so a task that is already running when
//! it gets aborted cannot dispatch a stale tick.

use tokio::task::JoinHandle;

/// The effect currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveEffect {
    index: usize,
    tick: u64,
}

/// Tracks the active effect, its tick counter and its timer task.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    active: Option<ActiveEffect>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancels any running effect and makes `index` active at tick 0.
    ///
    /// Returns the generation the new timer must present when firing.
    pub(crate) fn begin(&mut self, index: usize) -> u64 {
        self.cancel();
        self.active = Some(ActiveEffect { index, tick: 0 });
        self.generation
    }

    /// Hands over the timer task of the current generation.
    pub(crate) fn attach(&mut self, timer: JoinHandle<()>) {
        if let Some(stale) = self.timer.replace(timer) {
            stale.abort();
        }
    }

    /// Stops the active effect and its timer.
    ///
    /// Returns the index of the effect that was active.
    pub(crate) fn cancel(&mut self) -> Option<usize> {
        self.generation = self.generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.active.take().map(|active| active.index)
    }

    /// Returns `true` while a timer of `generation` may still fire.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.active.is_some() && self.generation == generation
    }

    /// Returns the active effect and the tick to render, then advances the
    /// tick counter.
    pub(crate) fn advance(&mut self) -> Option<(usize, u64)> {
        let active = self.active.as_mut()?;
        let tick = active.tick;
        active.tick = active.tick.saturating_add(1);
        Some((active.index, tick))
    }

    pub(crate) fn active_index(&self) -> Option<usize> {
        self.active.map(|active| active.index)
    }

    /// Returns the tick the next fire will render.
    pub(crate) fn current_tick(&self) -> Option<u64> {
        self.active.map(|active| active.tick)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_scheduler_has_nothing_to_advance() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.advance(), None);
        assert_eq!(scheduler.active_index(), None);
        assert_eq!(scheduler.current_tick(), None);
    }

    #[test]
    fn advance_counts_from_zero() {
        let mut scheduler = Scheduler::new();
        scheduler.begin(3);

        assert_eq!(scheduler.advance(), Some((3, 0)));
        assert_eq!(scheduler.advance(), Some((3, 1)));
        assert_eq!(scheduler.current_tick(), Some(2));
    }

    #[test]
    fn begin_resets_tick_and_invalidates_old_generation() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.begin(1);
        scheduler.advance();
        scheduler.advance();

        let second = scheduler.begin(2);

        assert_ne!(first, second);
        assert!(!scheduler.is_current(first));
        assert!(scheduler.is_current(second));
        assert_eq!(scheduler.current_tick(), Some(0));
        assert_eq!(scheduler.active_index(), Some(2));
    }

    #[test]
    fn cancel_returns_previous_index() {
        let mut scheduler = Scheduler::new();
        let generation = scheduler.begin(4);

        assert_eq!(scheduler.cancel(), Some(4));
        assert!(!scheduler.is_current(generation));
        assert_eq!(scheduler.cancel(), None);
    }

    #[tokio::test]
    async fn begin_aborts_attached_timer() {
        let mut scheduler = Scheduler::new();
        scheduler.begin(0);
        scheduler.attach(tokio::spawn(std::future::pending::<()>()));

        scheduler.begin(1);
        assert!(scheduler.timer.is_none());
    }
}
