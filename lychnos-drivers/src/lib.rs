//! Hardware driver implementations
//!
//! Concrete drivers for the display controllers the Lychnos stack
//! supports, written against the transport traits in `lychnos-hal` and
//! the framebuffer model in `lychnos-core`:
//!
//! - [`max7219`] - MAX7219/MAX7221 chained LED matrix and 7-segment
//!   controllers
//! - [`graphics`] - embedded-graphics adapter for the drivers above
//!   (feature `graphics`)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(feature = "graphics")]
pub mod graphics;
pub mod max7219;

#[cfg(test)]
mod testutil;
