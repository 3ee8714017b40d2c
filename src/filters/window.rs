/// Accumulates readings until a fixed count is reached, then emits their
/// arithmetic mean and starts over empty.
pub struct SampleWindow {
    samples: u16,
    sum: f32,
    count: u16,
}

impl SampleWindow {
    pub fn new(samples: u16) -> Self {
        debug_assert!(samples >= 1);
        Self {
            samples,
            sum: 0.0,
            count: 0,
        }
    }

    /// Folds one reading into the window. Returns `Some(mean)` on the
    /// reading that completes the window, `None` otherwise.
    pub fn fold(&mut self, value: f32) -> Option<f32> {
        self.count += 1;
        self.sum += value;
        if self.count < self.samples {
            return None;
        }
        let mean = self.sum / self.samples as f32;
        self.count = 0;
        self.sum = 0.0;
        Some(mean)
    }

    /// Readings accumulated since the last completed window.
    pub fn fill_count(&self) -> u16 {
        self.count
    }
}
