//! Cooperative animation state for the demos.
//!
//! Nothing here owns a timer. The caller's loop measures elapsed time and
//! hands it to `tick`; each value decides how many fixed-size steps that
//! corresponds to and updates itself accordingly.

use std::time::Duration;

use crate::{
    geometry::RotationState,
    sorting::{record, Frame, Recording, SortAlgorithm},
};

/// Turns arbitrary elapsed time into whole fixed-length ticks.
#[derive(Debug, Clone)]
pub struct StepClock {
    interval: Duration,
    pending: Duration,
}

impl StepClock {
    /// Zero intervals are bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
    }

    /// Accumulates `delta` and returns how many whole intervals are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.pending += delta;
        let interval = self.interval.as_nanos();
        let pending = self.pending.as_nanos();
        let ticks = pending / interval;
        let remainder = pending % interval;
        // Below one interval, so it fits in u64.
        self.pending = Duration::from_nanos(remainder as u64);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

/// Steps through a [`Recording`] one frame per clock tick.
#[derive(Debug, Clone)]
pub struct SortPlayer {
    recording: Recording,
    step: usize,
    running: bool,
    clock: StepClock,
}

impl SortPlayer {
    pub fn new(recording: Recording, interval: Duration) -> Self {
        Self {
            recording,
            step: 0,
            running: false,
            clock: StepClock::new(interval),
        }
    }

    /// Records `array` with `algorithm` and wraps the result in a paused player.
    pub fn from_array(array: &[i64], algorithm: SortAlgorithm, interval: Duration) -> Self {
        Self::new(record(array, algorithm), interval)
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &Frame {
        self.recording.frame(self.step).unwrap_or_else(|| self.recording.last())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.step + 1 >= self.recording.len()
    }

    /// Starts or resumes playback. A finished recording stays paused.
    pub fn play(&mut self) {
        self.running = !self.is_finished();
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.clock.reset();
    }

    /// Replaces the recording wholesale and rewinds to the first frame.
    pub fn reset(&mut self, recording: Recording) {
        self.recording = recording;
        self.step = 0;
        self.running = false;
        self.clock.reset();
    }

    /// Advances by the number of elapsed intervals. Returns `true` when the
    /// visible frame changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }

        let ticks = self.clock.advance(delta) as usize;
        let last = self.recording.len().saturating_sub(1);
        let before = self.step;
        self.step = (self.step + ticks).min(last);

        if self.step >= last {
            self.running = false;
            tracing::debug!(steps = self.step, "sort playback finished");
        }

        self.step != before
    }
}

/// Per-tick rotation increments from the graphics demo.
pub const DEFAULT_SPIN: RotationState = RotationState::new(0.01, 0.02, 0.005);

/// Rotation that optionally advances by a fixed increment every tick.
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    rotation: RotationState,
    increment: RotationState,
    running: bool,
}

impl Default for SpinAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN)
    }
}

impl SpinAnimation {
    pub fn new(increment: RotationState) -> Self {
        Self {
            rotation: RotationState::default(),
            increment,
            running: false,
        }
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Direct user input, such as a slider drag.
    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stops the animation and returns to the unrotated pose.
    pub fn reset(&mut self) {
        self.rotation = RotationState::default();
        self.running = false;
    }

    /// Applies one increment when running. Returns `true` if the rotation
    /// changed and a new frame should be rendered.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.rotation.advance(&self.increment);
        }
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn clock_carries_remainders() {
        let mut clock = StepClock::new(HALF_SECOND);
        assert_eq!(clock.advance(Duration::from_millis(300)), 0);
        assert_eq!(clock.advance(Duration::from_millis(300)), 1);
        assert_eq!(clock.advance(Duration::from_millis(1300)), 2);
        assert_eq!(clock.advance(Duration::from_millis(200)), 1);
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(499)), 0);
    }

    #[test]
    fn long_gaps_are_counted_in_one_step() {
        let mut clock = StepClock::new(Duration::ZERO);
        let day = Duration::from_secs(86_400);
        assert_eq!(clock.advance(day + Duration::from_micros(700)), 86_400_000);
        assert_eq!(clock.advance(Duration::from_micros(300)), 1);

        let mut huge = StepClock::new(Duration::from_millis(1));
        assert_eq!(huge.advance(Duration::from_secs(u64::MAX / 2)), u32::MAX);
    }

    #[test]
    fn zero_interval_is_bumped() {
        let clock = StepClock::new(Duration::ZERO);
        assert_eq!(clock.interval(), Duration::from_millis(1));
    }

    #[test]
    fn player_only_moves_while_running() {
        let mut player = SortPlayer::from_array(&[3, 2, 1], SortAlgorithm::BubbleSort, HALF_SECOND);
        assert!(!player.tick(HALF_SECOND));
        assert_eq!(player.step(), 0);

        player.play();
        assert!(player.tick(HALF_SECOND));
        assert_eq!(player.step(), 1);

        player.pause();
        assert!(!player.tick(HALF_SECOND * 4));
        assert_eq!(player.step(), 1);
    }

    #[test]
    fn player_stops_on_last_frame() {
        let mut player = SortPlayer::from_array(&[4, 1, 3, 2], SortAlgorithm::QuickSort, HALF_SECOND);
        player.play();
        player.tick(HALF_SECOND * 1000);

        assert!(player.is_finished());
        assert!(!player.is_running());
        assert_eq!(player.current(), player.recording().last());
        assert_eq!(player.current().array, vec![1, 2, 3, 4]);

        player.play();
        assert!(!player.is_running());
    }

    #[test]
    fn reset_replaces_recording() {
        let mut player = SortPlayer::from_array(&[2, 1], SortAlgorithm::BubbleSort, HALF_SECOND);
        player.play();
        player.tick(HALF_SECOND);

        player.reset(record(&[9, 8, 7], SortAlgorithm::MergeSort));
        assert_eq!(player.step(), 0);
        assert!(!player.is_running());
        assert_eq!(player.current().array, vec![9, 8, 7]);
    }

    #[test]
    fn single_frame_recording_is_already_finished() {
        let mut player = SortPlayer::from_array(&[], SortAlgorithm::QuickSort, HALF_SECOND);
        player.play();
        assert!(!player.is_running());
        assert!(player.current().array.is_empty());
    }

    #[test]
    fn spin_advances_only_when_toggled_on() {
        let mut spin = SpinAnimation::default();
        assert!(!spin.tick());
        assert_eq!(*spin.rotation(), RotationState::default());

        assert!(spin.toggle());
        for _ in 0..100 {
            spin.tick();
        }
        let rotation = *spin.rotation();
        assert!((rotation.x - 1.0).abs() < 1e-9);
        assert!((rotation.y - 2.0).abs() < 1e-9);
        assert!((rotation.z - 0.5).abs() < 1e-9);

        spin.reset();
        assert!(!spin.is_running());
        assert_eq!(*spin.rotation(), RotationState::default());
    }
}
