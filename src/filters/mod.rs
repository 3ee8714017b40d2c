pub mod tolerance;
pub mod window;

pub use tolerance::ToleranceGate;
pub use window::SampleWindow;

// f32::abs lives in std, not core
pub(crate) fn abs(x: f32) -> f32 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}
