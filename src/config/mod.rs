//! Configuration management for stereobars.
//!
//! Display geometry, timing and colours are read from an optional TOML file in
//! the user's config directory. Anything not set there falls back to the
//! constants in `crate::constants`.

pub mod file;

pub use file::VisualizerConfig;
