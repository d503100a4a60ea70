//! Timeline orchestration
//!
//! A [`Timeline`] plays many scalar animations against one shared clock.
//! Entries are placed at signed millisecond offsets, so steps can overlap
//! (a progress bar starting half a second before the logo reveal ends) or
//! run strictly in sequence. Looping supports plain repeat and alternate
//! (yoyo) modes; a completion callback fires exactly once per run.

use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;

new_key_type! {
    /// Handle to one entry inside a timeline
    pub struct TimelineEntryId;
}

/// One scalar animation placed on the timeline clock
#[derive(Clone, Copy, Debug)]
struct TimelineEntry {
    offset_ms: i32,
    duration_ms: u32,
    from: f32,
    to: f32,
    easing: Easing,
}

/// An ordered sequence of scalar animations on a shared clock
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    /// Registration order; the tie-break for simultaneous starts
    insertion_order: Vec<TimelineEntryId>,
    time_ms: f32,
    playing: bool,
    /// Current playback direction
    reversed: bool,
    /// Extra iterations after the first (-1 = infinite)
    loop_count: i32,
    loops_done: i32,
    /// Reverse direction on each loop instead of jumping back to 0
    alternate: bool,
    playback_rate: f32,
    completed: bool,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            insertion_order: Vec::new(),
            time_ms: 0.0,
            playing: false,
            reversed: false,
            loop_count: 0,
            loops_done: 0,
            alternate: false,
            playback_rate: 1.0,
            completed: false,
            on_complete: None,
        }
    }

    /// Add a linear entry at `offset_ms` from timeline start
    pub fn add(&mut self, offset_ms: i32, duration_ms: u32, from: f32, to: f32) -> TimelineEntryId {
        self.add_with_easing(offset_ms, duration_ms, from, to, Easing::Linear)
    }

    /// Add an entry with a specific easing curve
    pub fn add_with_easing(
        &mut self,
        offset_ms: i32,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        let id = self.entries.insert(TimelineEntry {
            offset_ms,
            duration_ms,
            from,
            to,
            easing,
        });
        self.insertion_order.push(id);
        id
    }

    /// Begin a staggered group of identical entries
    pub fn stagger(&mut self, count: usize) -> StaggerBuilder<'_> {
        StaggerBuilder {
            timeline: self,
            count,
            start_ms: 0,
            every_ms: 200,
            duration_ms: 600,
            from: 0.0,
            to: 1.0,
            easing: Easing::EaseOut,
        }
    }

    /// Timeline length: the furthest entry end, in ms
    pub fn end_ms(&self) -> f32 {
        self.entries
            .values()
            .map(|e| (e.offset_ms + e.duration_ms as i32) as f32)
            .fold(0.0, f32::max)
    }

    /// Extra iterations after the first; -1 loops forever
    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    /// Reverse direction each loop (yoyo) instead of snapping back
    pub fn set_alternate(&mut self, enabled: bool) {
        self.alternate = enabled;
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate;
    }

    /// Register the completion callback; fires once when the final
    /// iteration finishes (never for infinite loops)
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Reset to time 0 and start playing forward
    pub fn start(&mut self) {
        self.time_ms = 0.0;
        self.reversed = false;
        self.loops_done = 0;
        self.completed = false;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Halt the clock without resetting it
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        if !self.completed {
            self.playing = true;
        }
    }

    /// Flip the playback direction
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
        self.playing = true;
        self.completed = false;
    }

    /// Jump the clock to `time_ms`, clamped to the timeline's span
    pub fn seek(&mut self, time_ms: f32) {
        self.time_ms = time_ms.clamp(0.0, self.end_ms());
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Overall progress in [0, 1]
    pub fn progress(&self) -> f32 {
        let end = self.end_ms();
        if end <= 0.0 {
            return 1.0;
        }
        (self.time_ms / end).clamp(0.0, 1.0)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entry ids in registration order
    pub fn entry_ids(&self) -> Vec<TimelineEntryId> {
        self.insertion_order.clone()
    }

    /// Current value of one entry; `from` before it starts, `to` after it ends
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        let local = self.entry_local_progress(entry);
        Some(entry.from + (entry.to - entry.from) * entry.easing.apply(local))
    }

    /// Linear progress of one entry in [0, 1]
    pub fn entry_progress(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id).map(|e| self.entry_local_progress(e))
    }

    fn entry_local_progress(&self, entry: &TimelineEntry) -> f32 {
        if entry.duration_ms == 0 {
            return if self.time_ms >= entry.offset_ms as f32 {
                1.0
            } else {
                0.0
            };
        }
        ((self.time_ms - entry.offset_ms as f32) / entry.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance the shared clock by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let delta = dt_ms * self.playback_rate;
        if self.reversed {
            self.time_ms -= delta;
        } else {
            self.time_ms += delta;
        }

        let end = self.end_ms();

        if !self.reversed && self.time_ms >= end {
            if self.has_loops_remaining() {
                self.loops_done += 1;
                if self.alternate {
                    self.reversed = true;
                    self.time_ms = end - (self.time_ms - end);
                } else {
                    self.time_ms -= end.max(1.0);
                }
            } else {
                self.time_ms = end;
                self.playing = false;
                self.fire_complete();
            }
        } else if self.reversed && self.time_ms <= 0.0 {
            if self.alternate && self.has_loops_remaining() {
                self.loops_done += 1;
                self.reversed = false;
                self.time_ms = -self.time_ms;
            } else {
                self.time_ms = 0.0;
                self.playing = false;
            }
        }
    }

    fn has_loops_remaining(&self) -> bool {
        self.loop_count < 0 || self.loops_done < self.loop_count
    }

    fn fire_complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a staggered group of identical timeline entries
///
/// Entries are added in slice order, each starting `every` ms after the
/// previous one - document order is the caller's element order.
pub struct StaggerBuilder<'a> {
    timeline: &'a mut Timeline,
    count: usize,
    start_ms: i32,
    every_ms: u32,
    duration_ms: u32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl StaggerBuilder<'_> {
    /// Offset of the first entry from timeline start
    pub fn start_at(mut self, offset_ms: i32) -> Self {
        self.start_ms = offset_ms;
        self
    }

    /// Delay between successive entry starts
    pub fn every(mut self, step_ms: u32) -> Self {
        self.every_ms = step_ms;
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn values(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Add all entries, returning their ids in stagger order
    pub fn add(self) -> Vec<TimelineEntryId> {
        (0..self.count)
            .map(|i| {
                self.timeline.add_with_easing(
                    self.start_ms + (i as u32 * self.every_ms) as i32,
                    self.duration_ms,
                    self.from,
                    self.to,
                    self.easing,
                )
            })
            .collect()
    }
}
