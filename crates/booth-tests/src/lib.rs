//! Integration tests for booth crates.
//!
//! End-to-end checks across cube parsing, fitting, layer building, file
//! formats and the reference surface.
