//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! Wraps any `embedded_hal::spi::SpiBus` / `embedded_hal::digital::OutputPin`
//! pair so it satisfies the Lychnos transport traits. This is the usual
//! integration path on platforms with an embedded-hal implementation;
//! chip-specific HALs only implement the Lychnos traits directly when they
//! need runtime reconfiguration of the bus.

use core::convert::Infallible;

use crate::gpio::OutputPin;
use crate::spi::{SpiBus, SpiConfig};

/// Adapter implementing [`SpiBus`] over an `embedded_hal::spi::SpiBus`
///
/// embedded-hal buses fix frequency, bit order and mode when the
/// peripheral is constructed, so [`SpiBus::configure`] is a no-op here.
/// The caller is responsible for constructing the bus with parameters the
/// target device accepts.
pub struct SpiAdapter<T> {
    bus: T,
}

impl<T> SpiAdapter<T> {
    /// Wrap an embedded-hal SPI bus
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn release(self) -> T {
        self.bus
    }
}

impl<T> SpiBus for SpiAdapter<T>
where
    T: embedded_hal::spi::SpiBus<u8>,
{
    type Error = T::Error;

    fn configure(&mut self, _config: &SpiConfig) -> Result<(), Self::Error> {
        // Parameters were fixed when the peripheral was built
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        // The framed transaction ends when chip select rises, so the bytes
        // must be on the wire before this call returns
        self.bus.flush()
    }
}

/// Adapter implementing [`OutputPin`] over an `embedded_hal` output pin
///
/// Restricted to infallible pins (every mainstream HAL's GPIO error type
/// is [`Infallible`]); the Lychnos pin trait has no error channel. The
/// driven level is shadowed so [`OutputPin::is_set_high`] can answer
/// without a readback capability.
pub struct PinAdapter<T> {
    pin: T,
    state: bool,
}

impl<T> PinAdapter<T> {
    /// Wrap an embedded-hal output pin, assuming it currently drives low
    pub fn new(pin: T) -> Self {
        Self { pin, state: false }
    }

    /// Release the wrapped pin
    pub fn release(self) -> T {
        self.pin
    }
}

impl<T> OutputPin for PinAdapter<T>
where
    T: embedded_hal::digital::OutputPin + embedded_hal::digital::ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.state = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.state = false;
    }

    fn is_set_high(&self) -> bool {
        self.state
    }
}
