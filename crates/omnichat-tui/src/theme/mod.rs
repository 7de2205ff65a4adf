//! Centralized theme system for the simulator chrome.
//!
//! This module provides:
//! - `palette` — Raw color constants and conversion of theme tokens
//! - `styles` — Semantic style builder functions
//! - `icons` — Glyphs for theme icons and widget icons

pub mod icons;
pub mod palette;
pub mod styles;
