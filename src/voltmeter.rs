use embedded_hal::adc::{Channel, OneShot};
use heapless::String;
use nb::block;

use crate::clock::Clock;
use crate::filters::{SampleWindow, ToleranceGate};
use crate::format::format_voltage;
use crate::listener::ChangeListener;

/// Calibration and timing parameters for a [`Voltmeter`].
///
/// The defaults describe a 10-bit converter at a 5 V reference behind a
/// 90 kΩ / 10 kΩ divider, sampling at most once per millisecond with no
/// smoothing.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Upper divider resistor in ohms.
    pub r1_ohms: f32,
    /// Lower divider resistor in ohms. Must be positive.
    pub r2_ohms: f32,
    /// Minimum elapsed time between two raw reads in milliseconds.
    pub sample_interval_ms: u32,
    /// Additive correction applied to every converted reading, in volts.
    pub error_correction_volts: f32,
    /// Readings folded into one average. Must be at least 1; a window of
    /// one sample turns every accepted reading into a new average.
    pub window_samples: u16,
    /// Highest raw value the converter produces (1023 for a 10-bit ADC).
    pub adc_full_scale: f32,
    /// Voltage the converter reads at full scale, in volts.
    pub reference_voltage: f32,
    /// Smallest movement of the window mean that counts as a new average,
    /// in volts.
    pub average_tolerance_volts: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            r1_ohms: 90_000.0,
            r2_ohms: 10_000.0,
            sample_interval_ms: 1,
            error_correction_volts: 0.0,
            window_samples: 1,
            adc_full_scale: 1023.0,
            reference_voltage: 5.0,
            average_tolerance_volts: 0.1,
        }
    }
}

/// Polled voltmeter for one analog channel behind a voltage divider.
///
/// Owns the pin and all measurement state; the ADC peripheral and the
/// millisecond clock are borrowed per call. Drive it by calling [`poll`]
/// in the main loop, or pull readings through [`read_voltage`] /
/// [`read_average`], which poll on demand.
///
/// Listeners are plain mutable borrows: the meter never owns or frees its
/// observers, and registering a new listener replaces the previous one.
///
/// [`poll`]: Voltmeter::poll
/// [`read_voltage`]: Voltmeter::read_voltage
/// [`read_average`]: Voltmeter::read_average
pub struct Voltmeter<'a, P> {
    pin: P,
    divider_ratio: f32,
    error_correction: f32,
    sample_interval_ms: u32,
    last_sample_ms: u32,
    adc_full_scale: f32,
    reference_voltage: f32,
    last_raw: u16,
    voltage: f32,
    window: SampleWindow,
    average: ToleranceGate,
    on_change: Option<&'a mut dyn ChangeListener>,
    on_average_change: Option<&'a mut dyn ChangeListener>,
}

impl<'a, P> Voltmeter<'a, P> {
    /// Creates a meter for `pin` with the given calibration.
    ///
    /// # Panics
    ///
    /// Panics when `config.r2_ohms` is not positive (the divider ratio
    /// would be undefined) or when `config.window_samples` is zero.
    pub fn new(pin: P, config: Config) -> Self {
        assert!(config.r2_ohms > 0.0, "R2 must be positive");
        assert!(config.window_samples >= 1, "window needs at least one sample");

        Self {
            pin,
            divider_ratio: (config.r1_ohms + config.r2_ohms) / config.r2_ohms,
            error_correction: config.error_correction_volts,
            sample_interval_ms: config.sample_interval_ms,
            last_sample_ms: 0,
            adc_full_scale: config.adc_full_scale,
            reference_voltage: config.reference_voltage,
            last_raw: 0,
            voltage: 0.0,
            window: SampleWindow::new(config.window_samples),
            average: ToleranceGate::new(config.average_tolerance_volts),
            on_change: None,
            on_average_change: None,
        }
    }

    /// Takes one rate-gated measurement step.
    ///
    /// Returns without touching the ADC unless more than the configured
    /// sample interval has elapsed since the last raw read. A passed gate
    /// reads one sample, converts it through the divider ratio, updates
    /// the instantaneous voltage when the raw count changed, and folds the
    /// instantaneous voltage into the averaging window either way — an
    /// unchanged input still weighs into the average over time. Listeners
    /// fire inline, before `poll` returns.
    pub fn poll<ADC, A>(&mut self, adc: &mut A, clock: &mut impl Clock)
    where
        P: Channel<ADC>,
        A: OneShot<ADC, u16, P>,
    {
        let now = clock.now_ms();
        if now.wrapping_sub(self.last_sample_ms) <= self.sample_interval_ms {
            return;
        }

        let raw = match block!(adc.read(&mut self.pin)) {
            Ok(raw) => raw,
            Err(_) => {
                // missed sample; not retried until the next gated poll
                self.last_sample_ms = now;
                return;
            }
        };

        let measured = raw as f32 * self.reference_voltage / self.adc_full_scale;
        let real = measured * self.divider_ratio + self.error_correction;

        // dedup at raw-count granularity: nothing below one ADC count is
        // ever reported as a change
        if raw != self.last_raw {
            self.last_raw = raw;
            self.voltage = real;
            if let Some(listener) = self.on_change.as_mut() {
                listener.on_voltage(real);
            }
        }

        if let Some(mean) = self.window.fold(self.voltage) {
            if let Some(average) = self.average.pass(mean) {
                if let Some(listener) = self.on_average_change.as_mut() {
                    listener.on_voltage(average);
                }
            }
        }

        self.last_sample_ms = now;
    }

    /// Polls once, then returns the instantaneous voltage.
    pub fn read_voltage<ADC, A>(&mut self, adc: &mut A, clock: &mut impl Clock) -> f32
    where
        P: Channel<ADC>,
        A: OneShot<ADC, u16, P>,
    {
        self.poll(adc, clock);
        self.voltage
    }

    /// Polls once, then returns the averaged voltage.
    pub fn read_average<ADC, A>(&mut self, adc: &mut A, clock: &mut impl Clock) -> f32
    where
        P: Channel<ADC>,
        A: OneShot<ADC, u16, P>,
    {
        self.poll(adc, clock);
        self.average.accepted()
    }

    /// Last converted instantaneous voltage, without polling.
    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    /// Last accepted window average, without polling.
    pub fn average(&self) -> f32 {
        self.average.accepted()
    }

    /// Instantaneous voltage rendered with two decimal places.
    pub fn voltage_text(&self) -> String<16> {
        format_voltage(self.voltage)
    }

    /// Averaged voltage rendered with two decimal places.
    pub fn average_text(&self) -> String<16> {
        format_voltage(self.average.accepted())
    }

    /// Registers the listener invoked when the instantaneous voltage
    /// changes, replacing any previous one.
    pub fn set_change_listener(&mut self, listener: &'a mut dyn ChangeListener) {
        self.on_change = Some(listener);
    }

    /// Registers the listener invoked when the window average moves by at
    /// least the configured tolerance, replacing any previous one.
    pub fn set_average_change_listener(&mut self, listener: &'a mut dyn ChangeListener) {
        self.on_average_change = Some(listener);
    }

    pub fn clear_change_listener(&mut self) {
        self.on_change = None;
    }

    pub fn clear_average_change_listener(&mut self) {
        self.on_average_change = None;
    }

    /// Consumes the meter and hands the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}
