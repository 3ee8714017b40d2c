/// Receives the new value when a monitored voltage changes.
///
/// Implemented for any `FnMut(f32)` closure. At most one listener of each
/// kind is registered on a meter at a time; it runs synchronously inside
/// [`crate::Voltmeter::poll`], so a listener that blocks stalls all
/// subsequent polling.
pub trait ChangeListener {
    fn on_voltage(&mut self, volts: f32);
}

impl<F: FnMut(f32)> ChangeListener for F {
    fn on_voltage(&mut self, volts: f32) {
        self(volts)
    }
}
