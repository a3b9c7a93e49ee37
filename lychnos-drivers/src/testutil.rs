//! Recording transport mocks shared by the driver tests
//!
//! A `RecordingSpi`/`RecordingCs` pair shares one [`BusState`] through a
//! `RefCell`, so tests can assert that every write happened inside a
//! chip-select frame and inspect the exact words on the wire.

use core::cell::RefCell;

use heapless::Vec;
use lychnos_hal::{OutputPin, SpiBus, SpiConfig};

/// One framed transaction's bytes
pub(crate) type Frame = Vec<u8, 64>;

/// Everything observed on the mocked bus
#[derive(Default)]
pub(crate) struct BusState {
    /// Chip select currently asserted
    pub(crate) cs_low: bool,
    /// Completed writes, in order
    pub(crate) frames: Vec<Frame, 32>,
    /// Configurations applied via `SpiBus::configure`
    pub(crate) configs: Vec<SpiConfig, 4>,
    /// Writes attempted while chip select was released
    pub(crate) writes_outside_frame: usize,
    /// Make every write fail
    pub(crate) fail_writes: bool,
}

pub(crate) struct RecordingSpi<'s>(pub(crate) &'s RefCell<BusState>);

impl SpiBus for RecordingSpi<'_> {
    type Error = ();

    fn configure(&mut self, config: &SpiConfig) -> Result<(), ()> {
        let _ = self.0.borrow_mut().configs.push(*config);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), ()> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(());
        }
        if !state.cs_low {
            state.writes_outside_frame += 1;
            return Err(());
        }
        let mut frame = Frame::new();
        let _ = frame.extend_from_slice(data);
        let _ = state.frames.push(frame);
        Ok(())
    }
}

pub(crate) struct RecordingCs<'s>(pub(crate) &'s RefCell<BusState>);

impl OutputPin for RecordingCs<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().cs_low = false;
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().cs_low = true;
    }

    fn is_set_high(&self) -> bool {
        !self.0.borrow().cs_low
    }
}

/// The `index`-th big-endian 16-bit word of a frame
pub(crate) fn word_at(frame: &[u8], index: usize) -> u16 {
    u16::from_be_bytes([frame[2 * index], frame[2 * index + 1]])
}
