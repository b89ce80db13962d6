use std::time::Instant;

pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

/// Per-frame clock for the redraw loop with a once-a-second FPS average
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    frames_since_update: u32,
    fps_timer: f32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            frames_since_update: 0,
            fps_timer: 0.0,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();
        self.last_frame_time = now;
        self.record(delta);

        let info = FrameInfo {
            number: self.frame_number,
            time,
            delta,
        };
        self.frame_number += 1;
        info
    }

    fn record(&mut self, delta: f32) {
        self.frames_since_update += 1;
        self.fps_timer += delta;

        if self.fps_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames_since_update as f32 / self.fps_timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frames_since_update = 0;
            self.fps_timer = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();

        assert_eq!(frame.number, 0);
        assert!(frame.delta >= 0.009);
        assert!(frame.time >= frame.delta);
        assert_eq!(clock.frame_number(), 1);
    }

    #[test]
    fn fps_averages_over_interval() {
        let mut clock = FrameClock::new();
        for _ in 0..30 {
            clock.record(0.02);
        }
        assert_eq!(clock.fps(), 0.0);

        // Crosses the one second mark at frame 50 or 51 depending on rounding
        for _ in 0..21 {
            clock.record(0.02);
        }
        assert!((clock.fps() - 50.0).abs() < 0.5);
    }
}
