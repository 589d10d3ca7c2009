//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the UI:
//! - 2D math types (vectors, rectangles, colours)
//! - Arena handle types
//! - Frame timing and cooldowns
//! - Logging setup

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
