//! Hardware-independent core library for wiegand-emu
//!
//! This crate contains all platform-agnostic logic for the handheld credential
//! code editor: the 6-digit code model, the field editor state machine, key
//! mapping, the shared application loop, the transmitting indicator, and
//! rendering onto any `embedded-graphics` draw target.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app;
pub mod blink;
pub mod code;
pub mod config;
pub mod editor;
pub mod framebuffer;
pub mod indicator;
pub mod input;
pub mod ui;

pub use app::{Control, EditorApp};
pub use code::{CODE_LEN, CardCode, CodeParseError, DigitIndex, Nibble};
pub use editor::{EditorCommand, EmulationState, FieldEditor, Snapshot};
pub use indicator::{IndicatorCommand, IndicatorSink};
pub use input::{InputEvent, InputKey, InputType, KeyAction};
