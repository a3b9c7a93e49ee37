//! Lychnos Hardware Abstraction Layer
//!
//! This crate defines the transport traits the Lychnos display drivers are
//! written against. Chip-specific HALs (or the `embedded-hal` adapters in
//! [`compat`]) implement them, so the same driver code runs on any
//! platform that can clock out bytes and wiggle a chip-select line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lychnos-drivers (MAX7219 encoder)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lychnos-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ platform HAL  │       │ compat (any   │
//! │ impls         │       │ embedded-hal) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - Write-only synchronous serial bus
//! - [`gpio::OutputPin`] - Chip-select line

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "embedded-hal")]
pub mod compat;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{BitOrder, Mode, Phase, Polarity, SpiBus, SpiConfig};
