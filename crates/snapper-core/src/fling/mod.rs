//! Snapping fling driver.
//!
//! A fling is resolved to a target item when it starts, then animated frame
//! by frame: an inertial decay while the target is still far away, then a
//! spring that lands exactly on the target's snap offset. The host calls
//! [`SnapperFlingBehavior::on_frame`] once per frame, or lets
//! [`SnapperFlingBehavior::perform_fling`] drive the frames from a
//! [`FrameClock`].

mod session;

use std::cell::{Cell, RefCell};

use snapper_animation::decay_distance;

use crate::config::SnapperConfig;
use crate::error::SnapperError;
use crate::frame_clock::FrameClock;
use crate::geometry::SnapGeometry;
use crate::layout::{LayoutSource, ScrollSink};
use crate::resolver::{FlingDirection, TargetIndexResolver};
use session::{Exit, FlingSession, Tick};

/// Where a [`SnapperFlingBehavior`] is in its fling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlingPhase {
    #[default]
    Idle,
    /// Picking the target item.
    Resolving,
    Decay,
    Spring,
    /// The last fling was cancelled before it finished. The next
    /// [`SnapperFlingBehavior::on_frame`] reports it finished and goes idle.
    Cancelled,
}

impl FlingPhase {
    pub fn is_animating(self) -> bool {
        matches!(self, FlingPhase::Decay | FlingPhase::Spring)
    }
}

/// Result of starting a fling or advancing it by a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlingStatus {
    Running,
    /// The fling is over. The residual velocity is what the fling did not
    /// use, for the host to hand on (e.g. to an overscroll effect).
    Finished { residual_velocity: f32 },
}

impl FlingStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, FlingStatus::Finished { .. })
    }

    pub fn residual_velocity(&self) -> Option<f32> {
        match self {
            FlingStatus::Running => None,
            FlingStatus::Finished { residual_velocity } => Some(*residual_velocity),
        }
    }
}

/// Turns fling velocities into animations that come to rest on an item.
///
/// Single threaded. At most one fling runs at a time; starting a new one
/// cancels the previous.
pub struct SnapperFlingBehavior {
    config: SnapperConfig,
    phase: Cell<FlingPhase>,
    animation_target: Cell<Option<usize>>,
    /// Velocity of the running session at its last completed frame. Read by
    /// `cancel` while the session is out for a tick.
    last_velocity: Cell<f32>,
    session: RefCell<Option<FlingSession>>,
}

impl SnapperFlingBehavior {
    pub fn new(config: SnapperConfig) -> Result<Self, SnapperError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Cell::new(FlingPhase::Idle),
            animation_target: Cell::new(None),
            last_velocity: Cell::new(0.0),
            session: RefCell::new(None),
        })
    }

    pub fn config(&self) -> &SnapperConfig {
        &self.config
    }

    pub fn phase(&self) -> FlingPhase {
        self.phase.get()
    }

    pub fn is_running(&self) -> bool {
        self.phase.get().is_animating()
    }

    /// Index the running fling will settle on, if a fling is running.
    pub fn animation_target(&self) -> Option<usize> {
        self.animation_target.get()
    }

    /// Resolves the target for `initial_velocity` and prepares the animation.
    ///
    /// Nothing is scrolled until the first [`on_frame`](Self::on_frame).
    /// Returns [`FlingStatus::Finished`] right away when there is nothing to
    /// animate: no scroll range in the fling direction, nothing laid out, or
    /// already resting on the target.
    pub fn start_fling<L>(
        &self,
        layout: &L,
        initial_velocity: f32,
    ) -> Result<FlingStatus, SnapperError>
    where
        L: LayoutSource + ?Sized,
    {
        self.cancel();
        log::debug!("perform fling. initial velocity: {initial_velocity}");
        self.phase.set(FlingPhase::Resolving);

        let snapshot = layout.snapshot();
        let geometry = SnapGeometry::new(&snapshot, self.config.snap_offset.as_ref());
        let direction = FlingDirection::of(initial_velocity);

        let has_range = match direction {
            FlingDirection::Forward => geometry.can_scroll_toward_end(),
            FlingDirection::Backward => geometry.can_scroll_toward_start(),
            FlingDirection::None => {
                geometry.can_scroll_toward_start() || geometry.can_scroll_toward_end()
            }
        };
        if !has_range {
            log::debug!("no scroll range in fling direction, skipping fling");
            return Ok(self.finish_idle(initial_velocity));
        }
        let Some(current) = geometry.current_item() else {
            log::debug!("no current item, skipping fling");
            return Ok(self.finish_idle(initial_velocity));
        };

        let max_fling_distance = (self.config.maximum_fling_distance)(&geometry);
        if !(max_fling_distance > 0.0) {
            self.phase.set(FlingPhase::Idle);
            return Err(SnapperError::InvalidMaxFlingDistance(max_fling_distance));
        }

        let decay_spec = self.config.decay_spec.as_ref();
        let decay = |velocity: f32| decay_distance(decay_spec, velocity);
        let resolver = TargetIndexResolver::new(&geometry, self.config.tuning);
        let Some(mut target_index) = resolver.resolve(initial_velocity, decay, max_fling_distance)
        else {
            return Ok(self.finish_idle(initial_velocity));
        };

        if let Some(snap_index) = &self.config.snap_index {
            let start_index = if initial_velocity < 0.0 {
                current.index + 1
            } else {
                current.index
            };
            target_index = snap_index(&geometry, start_index, target_index);
            let item_count = geometry.total_item_count();
            if target_index >= item_count {
                self.phase.set(FlingPhase::Idle);
                return Err(SnapperError::TargetIndexOutOfRange {
                    index: target_index,
                    item_count,
                });
            }
        }

        if geometry.distance_to_index_snap(target_index) == 0 {
            log::debug!("already snapped to {target_index}, skipping fling");
            let residual = residual_at_rest(&geometry, initial_velocity);
            return Ok(self.finish_idle(residual));
        }

        let reaches_next_snap = initial_velocity.abs() >= self.config.tuning.min_fling_velocity
            && match direction {
                FlingDirection::Forward => {
                    decay(initial_velocity)
                        >= geometry.distance_to_index_snap(current.index + 1) as f32
                }
                FlingDirection::Backward => {
                    decay(initial_velocity) <= geometry.distance_to_index_snap(current.index) as f32
                }
                FlingDirection::None => false,
            };
        let target_ahead = match direction {
            FlingDirection::Forward => target_index > current.index,
            FlingDirection::Backward => target_index <= current.index,
            FlingDirection::None => false,
        };

        let session = if reaches_next_snap && target_ahead {
            FlingSession::decay(&self.config, initial_velocity, current.index, target_index)
        } else {
            FlingSession::spring(
                &self.config,
                &geometry,
                initial_velocity,
                current.index,
                target_index,
            )
        };
        self.animation_target.set(Some(target_index));
        self.phase.set(session.phase());
        self.last_velocity.set(session.residual_velocity());
        *self.session.borrow_mut() = Some(session);
        Ok(FlingStatus::Running)
    }

    /// Advances the running fling to `frame_time_nanos`.
    pub fn on_frame<L, S>(&self, layout: &L, sink: &S, frame_time_nanos: u64) -> FlingStatus
    where
        L: LayoutSource + ?Sized,
        S: ScrollSink + ?Sized,
    {
        let _guard = ResetOnUnwind(self);
        // The session is moved out while the sink runs so that the sink may
        // cancel or restart the fling.
        let Some(mut session) = self.session.borrow_mut().take() else {
            return self.finish_idle(0.0);
        };
        let tick = session.tick(&self.config, layout, sink, frame_time_nanos);

        if self.session.borrow().is_some() {
            return FlingStatus::Running;
        }
        if self.phase.get() == FlingPhase::Cancelled {
            return self.finish_idle(session.residual_velocity());
        }

        match tick {
            Tick::Running => {
                self.phase.set(session.phase());
                self.last_velocity.set(session.residual_velocity());
                *self.session.borrow_mut() = Some(session);
                FlingStatus::Running
            }
            Tick::Finished(exit) => FlingStatus::Finished {
                residual_velocity: self.complete(layout, &session, exit),
            },
        }
    }

    /// Runs a whole fling, taking frame times from `clock`, and returns the
    /// velocity that was not consumed.
    pub fn perform_fling<L, S, C>(
        &self,
        layout: &L,
        sink: &S,
        initial_velocity: f32,
        clock: &mut C,
    ) -> Result<f32, SnapperError>
    where
        L: LayoutSource + ?Sized,
        S: ScrollSink + ?Sized,
        C: FrameClock + ?Sized,
    {
        let _guard = ResetOnUnwind(self);
        let mut status = self.start_fling(layout, initial_velocity)?;
        loop {
            if let FlingStatus::Finished { residual_velocity } = status {
                return Ok(residual_velocity);
            }
            status = self.on_frame(layout, sink, clock.next_frame_nanos());
        }
    }

    /// Stops the running fling where it is. Returns its velocity at the last
    /// frame, or `None` if nothing was running.
    ///
    /// The phase is [`FlingPhase::Cancelled`] until the next frame or fling.
    pub fn cancel(&self) -> Option<f32> {
        let session = self.session.borrow_mut().take();
        if session.is_none() && !self.phase.get().is_animating() {
            return None;
        }
        let residual = session.map_or(self.last_velocity.get(), |session| {
            session.residual_velocity()
        });
        log::debug!("fling cancelled. residual velocity: {residual}");
        self.phase.set(FlingPhase::Cancelled);
        self.animation_target.set(None);
        Some(residual)
    }

    fn finish_idle(&self, residual_velocity: f32) -> FlingStatus {
        self.phase.set(FlingPhase::Idle);
        self.animation_target.set(None);
        self.last_velocity.set(0.0);
        FlingStatus::Finished { residual_velocity }
    }

    fn complete<L>(&self, layout: &L, session: &FlingSession, exit: Exit) -> f32
    where
        L: LayoutSource + ?Sized,
    {
        let residual = match exit {
            Exit::EdgeReached => session.residual_velocity(),
            Exit::Settled | Exit::SnappedBack | Exit::LayoutLost => {
                let snapshot = layout.snapshot();
                let geometry = SnapGeometry::new(&snapshot, self.config.snap_offset.as_ref());
                residual_at_rest(&geometry, session.residual_velocity())
            }
        };
        log::debug!(
            "fling finished ({exit:?}). target: {}, scrolled: {}, residual velocity: {residual}",
            session.target_index(),
            session.scrolled()
        );
        self.finish_idle(residual);
        residual
    }
}

impl std::fmt::Debug for SnapperFlingBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapperFlingBehavior")
            .field("config", &self.config)
            .field("phase", &self.phase.get())
            .field("animation_target", &self.animation_target.get())
            .finish()
    }
}

/// Velocity left over at rest is only handed back when it points at an edge
/// the list cannot scroll past.
fn residual_at_rest(geometry: &SnapGeometry<'_>, velocity: f32) -> f32 {
    let at_edge = match FlingDirection::of(velocity) {
        FlingDirection::Forward => !geometry.can_scroll_toward_end(),
        FlingDirection::Backward => !geometry.can_scroll_toward_start(),
        FlingDirection::None => false,
    };
    if at_edge {
        velocity
    } else {
        0.0
    }
}

/// Leaves the behavior idle if a sink or layout callback panics mid-fling.
struct ResetOnUnwind<'a>(&'a SnapperFlingBehavior);

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        if let Ok(mut session) = self.0.session.try_borrow_mut() {
            session.take();
        }
        self.0.finish_idle(0.0);
    }
}

#[cfg(test)]
#[path = "../tests/fling_tests.rs"]
mod tests;
