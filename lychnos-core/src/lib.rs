//! Board-agnostic display model for chained MAX7219-family controllers
//!
//! This crate contains the pure in-memory side of the Lychnos driver
//! stack, with no dependency on any bus or pin:
//!
//! - [`framebuffer::FrameBuffer`] - the byte grid mirroring the physical
//!   display, with pixel/column/row/digit accessors and scrolling
//! - [`bcd`] - character constants for the chips' built-in 7-segment
//!   decoder
//!
//! Transmission of the buffer to hardware lives in `lychnos-drivers`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod bcd;
pub mod framebuffer;

pub use framebuffer::{BufferError, FrameBuffer, ScrollDirection};
