//! Frame time sources for driving a fling to completion.

/// Supplies monotonically increasing frame times in nanoseconds.
pub trait FrameClock {
    fn next_frame_nanos(&mut self) -> u64;
}

impl<F: FnMut() -> u64> FrameClock for F {
    fn next_frame_nanos(&mut self) -> u64 {
        self()
    }
}

/// A clock that advances by a fixed step on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStepFrameClock {
    now_nanos: u64,
    step_nanos: u64,
}

impl FixedStepFrameClock {
    /// One frame at 60 fps.
    pub const FRAME_60_FPS_NANOS: u64 = 16_666_667;

    pub fn new(start_nanos: u64, step_nanos: u64) -> Self {
        Self {
            now_nanos: start_nanos,
            step_nanos: step_nanos.max(1),
        }
    }

    pub fn at_60_fps() -> Self {
        Self::new(0, Self::FRAME_60_FPS_NANOS)
    }

    /// Time of the next frame that will be handed out.
    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }
}

impl Default for FixedStepFrameClock {
    fn default() -> Self {
        Self::at_60_fps()
    }
}

impl FrameClock for FixedStepFrameClock {
    fn next_frame_nanos(&mut self) -> u64 {
        let now = self.now_nanos;
        self.now_nanos = now.saturating_add(self.step_nanos);
        now
    }
}
