// src/ui/mod.rs
//! Rendering for the code editor screen
//!
//! This module provides:
//! - Core drawing trait with dirty tracking
//! - Colour themes for monochrome and RGB displays
//! - The code editor view (hex digits plus cursor marker)

pub mod code_view;
pub mod core;

// Re-export commonly used items
pub use code_view::CodeView;
pub use self::core::{Drawable, Theme};
