//! Hardware-independent rendering core for the slate touch status panel.
//!
//! This crate contains the entire on-device rendering stack: the
//! run-length-encoded pixel cache with per-row dirty tracking, the display
//! adapters that bridge widget drawing to either a real panel driver or the
//! cache, and the retained-mode widget/layout framework that renders live
//! status panels and routes touch input.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for simulators and tests).
//! Peripheral wiring — buttons, relays, radios, network stacks — lives
//! outside this crate and only talks to it through widget values and
//! callbacks.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod cache;
pub mod display;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
