//! MAX7219/MAX7221 LED display controller driver
//!
//! Each chip drives one 8x8 LED matrix (or 8 seven-segment digits) and
//! passes every 16-bit word it receives on to the next chip in the daisy
//! chain; a chip latches the word in front of it when chip select rises.
//! Configuration commands are therefore broadcast by repeating the same
//! word once per chip, and a row refresh sends one word per chip inside a
//! single chip-select frame.
//!
//! The driver keeps the display image in a [`FrameBuffer`] and only
//! touches the bus when asked: mutate the buffer through
//! [`Max7219::framebuffer_mut`], then call [`Max7219::display`] (or
//! [`Max7219::display_row`]) to push it out. The chips never answer back;
//! every command is fire-and-forget.

use heapless::Vec;

use lychnos_core::framebuffer::{FrameBuffer, MAX_CHAIN, ROWS};
use lychnos_hal::{OutputPin, SpiBus, SpiConfig};

/// Register addresses as defined in the datasheet
pub mod reg {
    /// No-op, shifts through the chain without effect
    pub const NOOP: u8 = 0x00;
    /// First digit register; rows 0-7 live at 0x01-0x08
    pub const DIGIT0: u8 = 0x01;
    /// Per-digit BCD Code B decode enable mask
    pub const DECODE_MODE: u8 = 0x09;
    /// Brightness level, 0x00-0x0F
    pub const INTENSITY: u8 = 0x0A;
    /// Index of the last scanned digit line
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// 0 = shutdown (blank, low power), 1 = normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// While set, every LED is lit regardless of the digit registers
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Maximum brightness level
pub const MAX_INTENSITY: u8 = 0x0F;

/// Maximum scan limit (all 8 digit lines scanned)
pub const MAX_SCAN_LIMIT: u8 = 7;

/// Bytes in the longest possible frame: one 16-bit word per chip
const FRAME_CAPACITY: usize = MAX_CHAIN as usize * 2;

/// Build a 16-bit command word: register address high, data low
pub const fn command_word(register: u8, data: u8) -> u16 {
    ((register as u16) << 8) | data as u16
}

/// Command word carrying one chip's byte for a pixel row
///
/// Row addresses are offset by one because register 0 is the no-op.
pub const fn row_word(row: u8, data: u8) -> u16 {
    command_word(reg::DIGIT0 + row, data)
}

/// Invert the bit order of a byte
pub const fn reverse_bits(mut b: u8) -> u8 {
    b = (b & 0xF0) >> 4 | (b & 0x0F) << 4;
    b = (b & 0xCC) >> 2 | (b & 0x33) << 2;
    b = (b & 0xAA) >> 1 | (b & 0x55) << 1;
    b
}

/// Mounting corrections applied at transmission time
///
/// Modules are sold with every combination of mirrored segment wiring and
/// reversed chaining; these flags compensate without touching the
/// framebuffer's coordinate system. Fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Reverse the bit order of every transmitted byte (columns mirrored
    /// within each module)
    pub reverse_segment_bits: bool,
    /// Transmit chips in reverse chain order (modules chained right to
    /// left)
    pub reverse_chain: bool,
    /// Invert the row address (modules mounted upside down)
    pub invert_rows: bool,
}

/// Driver configuration, immutable after construction
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Max7219Config {
    /// Bus framing parameters, applied during [`Max7219::init`]
    pub spi: SpiConfig,
    /// Mounting corrections
    pub orientation: Orientation,
}

/// Driver for a chain of MAX7219/MAX7221 controllers
///
/// Owns the bus handle, the chip-select pin and the framebuffer. The
/// chain length is the framebuffer's; the two cannot disagree.
pub struct Max7219<'a, SPI, CS> {
    spi: SPI,
    cs: CS,
    config: Max7219Config,
    frame: FrameBuffer<'a>,
    // Last commanded chip state; the chips cannot be read back
    enabled: bool,
    test_mode: bool,
    #[cfg(feature = "graphics")]
    auto_flush: bool,
}

impl<'a, SPI, CS> Max7219<'a, SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver over a bound framebuffer and a transport pair
    ///
    /// Chip select is released immediately; no bus traffic happens until
    /// [`Max7219::init`].
    pub fn new(spi: SPI, mut cs: CS, frame: FrameBuffer<'a>, config: Max7219Config) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            config,
            frame,
            enabled: false,
            test_mode: false,
            #[cfg(feature = "graphics")]
            auto_flush: false,
        }
    }

    /// Bring the chain to a known, blanked state
    ///
    /// Applies the bus parameters, then shuts the chips down before the
    /// remaining configuration so bring-up garbage is never visible:
    /// shutdown, minimum intensity, test mode off, decoding off, all rows
    /// scanned. The framebuffer was already zeroed when it was bound.
    /// Call [`Max7219::set_enabled`] afterwards to light the display.
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        self.spi.configure(&self.config.spi)?;
        self.set_enabled(false)?;
        self.set_intensity(0)?;
        self.set_display_test(false)?;
        self.set_decode_mode(0)?;
        self.set_scan_limit(MAX_SCAN_LIMIT)?;
        Ok(())
    }

    /// Enable or shut down every chip in the chain
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SPI::Error> {
        self.broadcast(command_word(reg::SHUTDOWN, enabled as u8))?;
        self.enabled = enabled;
        Ok(())
    }

    /// Last commanded enable state
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enter or leave display test mode
    ///
    /// Test mode force-lights every LED until explicitly cleared; the
    /// digit registers are untouched and reappear on exit.
    pub fn set_display_test(&mut self, test: bool) -> Result<(), SPI::Error> {
        self.broadcast(command_word(reg::DISPLAY_TEST, test as u8))?;
        self.test_mode = test;
        Ok(())
    }

    /// Last commanded test-mode state
    pub fn is_display_test(&self) -> bool {
        self.test_mode
    }

    /// Set the brightness of every chip
    ///
    /// Levels above [`MAX_INTENSITY`] clamp to the maximum.
    pub fn set_intensity(&mut self, level: u8) -> Result<(), SPI::Error> {
        self.broadcast(command_word(reg::INTENSITY, level.min(MAX_INTENSITY)))
    }

    /// Scan only digit lines `0..=limit`
    ///
    /// Clamps to [`MAX_SCAN_LIMIT`]. Beware: with a limit of 2 or less the
    /// drive current concentrates on fewer lines, and R_SET must keep the
    /// per-segment current inside the datasheet table.
    pub fn set_scan_limit(&mut self, limit: u8) -> Result<(), SPI::Error> {
        self.broadcast(command_word(reg::SCAN_LIMIT, limit.min(MAX_SCAN_LIMIT)))
    }

    /// Set the per-digit BCD Code B decode mask
    ///
    /// Each set bit enables the chip's built-in character decoder for that
    /// digit; see `lychnos_core::bcd` for the character values. Matrix
    /// displays want the mask at zero.
    pub fn set_decode_mode(&mut self, mask: u8) -> Result<(), SPI::Error> {
        self.broadcast(command_word(reg::DECODE_MODE, mask))
    }

    /// Push one framebuffer row to the chain in a single framed
    /// transaction
    ///
    /// Transmission order must match the physical chain order, so the
    /// orientation flags are applied here: chip order per
    /// [`Orientation::reverse_chain`], per-byte bit reversal per
    /// [`Orientation::reverse_segment_bits`], and the row address per
    /// [`Orientation::invert_rows`]. Rows past the last are ignored.
    pub fn display_row(&mut self, row: u8) -> Result<(), SPI::Error> {
        if row >= ROWS {
            return Ok(());
        }
        let orientation = self.config.orientation;
        let address_row = if orientation.invert_rows { 7 - row } else { row };

        let mut words: Vec<u8, FRAME_CAPACITY> = Vec::new();
        let row_data = self.frame.row_bytes(row);
        let n = row_data.len();
        for position in 0..n {
            let chip = if orientation.reverse_chain {
                n - 1 - position
            } else {
                position
            };
            let mut data = row_data[chip];
            if orientation.reverse_segment_bits {
                data = reverse_bits(data);
            }
            // Capacity covers the longest supported chain
            let _ = words.extend_from_slice(&row_word(address_row, data).to_be_bytes());
        }
        self.transmit(&words)
    }

    /// Flush the whole framebuffer
    ///
    /// A full refresh is eight separate framed transactions, one per row.
    pub fn display(&mut self) -> Result<(), SPI::Error> {
        for row in 0..ROWS {
            self.display_row(row)?;
        }
        Ok(())
    }

    /// The display image
    pub fn framebuffer(&self) -> &FrameBuffer<'a> {
        &self.frame
    }

    /// Mutable access to the display image; call [`Max7219::display`] to
    /// make changes visible
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<'a> {
        &mut self.frame
    }

    /// Number of chips in the chain
    pub fn chain_len(&self) -> u8 {
        self.frame.chain_len()
    }

    /// Set or clear a pixel in the buffer (does not transmit)
    pub fn set_pixel(&mut self, x: u16, y: u8, enabled: bool) {
        self.frame.set_pixel(x, y, enabled);
    }

    /// Read a pixel from the buffer
    pub fn get_pixel(&self, x: u16, y: u8) -> bool {
        self.frame.get_pixel(x, y)
    }

    /// Blank the buffer (does not transmit)
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Tear the driver down, returning the transport pair and the buffer
    pub fn release(self) -> (SPI, CS, FrameBuffer<'a>) {
        (self.spi, self.cs, self.frame)
    }

    /// Refresh automatically after every adapter draw call
    ///
    /// Off by default: drawing marks the buffer and the caller flushes
    /// explicitly.
    #[cfg(feature = "graphics")]
    pub fn set_auto_flush(&mut self, enabled: bool) {
        self.auto_flush = enabled;
    }

    /// Whether adapter draw calls flush automatically
    #[cfg(feature = "graphics")]
    pub fn auto_flush(&self) -> bool {
        self.auto_flush
    }

    /// Transmit one identical command word per chip in a single frame
    ///
    /// This is how global commands reach a daisy chain: every chip shifts
    /// the stream along and latches its own copy on the chip-select edge.
    fn broadcast(&mut self, word: u16) -> Result<(), SPI::Error> {
        let mut words: Vec<u8, FRAME_CAPACITY> = Vec::new();
        for _ in 0..self.frame.chain_len() {
            let _ = words.extend_from_slice(&word.to_be_bytes());
        }
        self.transmit(&words)
    }

    /// Chip-select framing around a single bus write
    ///
    /// Chip select is released even when the write fails, so a bus error
    /// cannot leave the chain half-latched into the next transaction.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), SPI::Error> {
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result
    }
}
