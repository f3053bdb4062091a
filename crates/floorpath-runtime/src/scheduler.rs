#![forbid(unsafe_code)]

//! Frame-driven reveal scheduler for runs.
//!
//! Each played run gets its own state machine:
//!
//! ```text
//! Idle ──play──▶ Animating ──(reveal complete)──▶ Finished
//!                    │                               │
//!                 cancel                          cancel
//!                    ▼                               │
//!                Cancelled ◀─────────────────────────┘
//!                    │
//!          (next tick or reap: path removed, state dropped)
//! ```
//!
//! Hosts call [`AnimationScheduler::tick`] once per frame. A tick first reaps
//! cancelled animations (removing their paths from the surface), then
//! advances the live ones and appends newly revealed points. Runs animate
//! independently; two runs on the same floor are not synchronised.
//!
//! # Invariants
//!
//! 1. At most one animation per [`RunId`] is resident; playing a run again
//!    cancels and reaps the previous one before drawing.
//! 2. A cancelled animation never extends its path again.
//! 3. After a reap, a cancelled animation has no path on the surface and no
//!    state in the scheduler.
//! 4. A finished animation keeps its full path until cancelled.

use std::fmt;
use std::time::Duration;

use floorpath_core::animation::{Animation, EasingFn, PathReveal};
use floorpath_core::config::AnimationConfig;
use floorpath_core::{FloorIndex, PathStyle, Run, RunId};

use crate::cancellation::{CancellationSource, CancellationToken};
use crate::surface::PresentationSurface;

/// Reveal parameters shared by every animation of a scheduler.
#[derive(Debug, Clone, Copy)]
pub struct RevealSettings {
    pub duration: Duration,
    pub subdivisions: usize,
    pub easing: EasingFn,
}

impl From<&AnimationConfig> for RevealSettings {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            duration: config.duration(),
            subdivisions: config.subdivisions,
            easing: config.easing.function(),
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

/// Opaque handle to one played animation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating,
    Finished,
    Cancelled,
}

/// Snapshot of one animation's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    pub run: RunId,
    pub floor: FloorIndex,
    pub cancelled: bool,
    pub finished: bool,
}

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Animations still revealing after this frame.
    pub animating: usize,
    pub finished: usize,
    pub cancelled: usize,
}

struct Slot {
    handle: AnimationHandle,
    run: RunId,
    floor: FloorIndex,
    reveal: PathReveal,
    source: CancellationSource,
    phase: AnimationPhase,
}

impl Slot {
    fn cancel(&mut self) {
        self.source.cancel();
        self.phase = AnimationPhase::Cancelled;
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("handle", &self.handle)
            .field("run", &self.run)
            .field("floor", &self.floor)
            .field("phase", &self.phase)
            .field("revealed", &self.reveal.revealed_count())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct AnimationScheduler {
    settings: RevealSettings,
    next_handle: u64,
    slots: Vec<Slot>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(settings: RevealSettings) -> Self {
        Self {
            settings,
            next_handle: 0,
            slots: Vec::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Start revealing `run` from its first point.
    pub fn play<S: PresentationSurface>(
        &mut self,
        run: &Run,
        style: &PathStyle,
        surface: &mut S,
    ) -> AnimationHandle {
        if self.slots.iter().any(|s| s.run == run.id) {
            for slot in self.slots.iter_mut().filter(|s| s.run == run.id) {
                slot.cancel();
            }
            self.reap(surface);
        }

        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;

        let mut slot = Slot {
            handle,
            run: run.id,
            floor: run.floor,
            reveal: PathReveal::new(
                &run.points,
                self.settings.subdivisions,
                self.settings.duration,
                self.settings.easing,
            ),
            source: CancellationSource::new(),
            phase: AnimationPhase::Idle,
        };

        match slot.reveal.points().first() {
            Some(&first) => {
                surface.begin_path(run.id, style, first);
                slot.phase = AnimationPhase::Animating;
            }
            None => slot.phase = AnimationPhase::Finished,
        }

        tracing::debug!(
            target: "floorpath.anim",
            handle = handle.0,
            run = %run.id,
            floor = %run.floor,
            points = slot.reveal.points().len(),
            "animation started"
        );
        self.slots.push(slot);
        handle
    }

    /// Request cancellation; the path is removed on the next tick or reap.
    ///
    /// The phase reads [`AnimationPhase::Cancelled`] until then. Returns
    /// `false` for unknown (already reaped) handles.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        match self.slots.iter_mut().find(|s| s.handle == handle) {
            Some(slot) => {
                slot.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every animation of `floor`. Returns how many were flagged.
    pub fn cancel_floor(&mut self, floor: FloorIndex) -> usize {
        let mut count = 0;
        for slot in self.slots.iter_mut().filter(|s| s.floor == floor) {
            slot.cancel();
            count += 1;
        }
        count
    }

    /// Cancel every animation, in flight or finished.
    pub fn cancel_all(&mut self) -> usize {
        for slot in &mut self.slots {
            slot.cancel();
        }
        self.slots.len()
    }

    /// A token observing `handle`'s cancellation, for hosts that hang their
    /// own per-path work (labels, tooltips) off a reveal.
    #[must_use]
    pub fn token(&self, handle: AnimationHandle) -> Option<CancellationToken> {
        self.slots
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.source.token())
    }

    /// Remove the paths of cancelled animations and drop their state.
    pub fn reap<S: PresentationSurface>(&mut self, surface: &mut S) -> usize {
        let before = self.slots.len();
        self.slots.retain_mut(|slot| {
            if slot.phase != AnimationPhase::Cancelled {
                return true;
            }
            surface.remove_path(slot.run);
            tracing::debug!(
                target: "floorpath.anim",
                handle = slot.handle.0,
                run = %slot.run,
                floor = %slot.floor,
                revealed = slot.reveal.revealed_count(),
                "animation cancelled; path removed"
            );
            false
        });
        before - self.slots.len()
    }

    /// One frame: reap cancelled animations, then advance the rest by `dt`.
    pub fn tick<S: PresentationSurface>(&mut self, dt: Duration, surface: &mut S) -> TickReport {
        let mut report = TickReport {
            cancelled: self.reap(surface),
            ..TickReport::default()
        };

        for slot in &mut self.slots {
            if slot.phase != AnimationPhase::Animating {
                continue;
            }
            let fresh = slot.reveal.advance(dt);
            if !fresh.is_empty() {
                surface.extend_path(slot.run, fresh);
            }
            if slot.reveal.is_complete() {
                slot.phase = AnimationPhase::Finished;
                report.finished += 1;
                tracing::debug!(
                    target: "floorpath.anim",
                    handle = slot.handle.0,
                    run = %slot.run,
                    floor = %slot.floor,
                    "animation finished"
                );
            } else {
                report.animating += 1;
            }
        }
        report
    }

    #[must_use]
    pub fn state(&self, handle: AnimationHandle) -> Option<AnimationState> {
        self.slots
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| AnimationState {
                run: s.run,
                floor: s.floor,
                cancelled: s.phase == AnimationPhase::Cancelled,
                finished: s.phase == AnimationPhase::Finished,
            })
    }

    #[must_use]
    pub fn phase(&self, handle: AnimationHandle) -> Option<AnimationPhase> {
        self.slots
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.phase)
    }

    /// Linear elapsed fraction of an animation's reveal.
    #[must_use]
    pub fn progress(&self, handle: AnimationHandle) -> Option<f32> {
        self.slots
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.reveal.elapsed_fraction())
    }

    /// Handles of resident animations on `floor`.
    pub fn handles_on(&self, floor: FloorIndex) -> impl Iterator<Item = AnimationHandle> + '_ {
        self.slots
            .iter()
            .filter(move |s| s.floor == floor)
            .map(|s| s.handle)
    }

    #[must_use]
    pub fn animating(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.phase == AnimationPhase::Animating)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(RevealSettings::default())
    }
}
