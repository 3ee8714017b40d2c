/// Monotonic millisecond clock supplied by the embedding environment.
///
/// The epoch is arbitrary; only differences matter. Elapsed time is
/// computed with wrapping subtraction, so the counter may wrap once
/// between two polls without stalling the meter.
pub trait Clock {
    /// Milliseconds since start.
    fn now_ms(&mut self) -> u32;
}
