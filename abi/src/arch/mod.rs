//! Architecture-specific definitions.
//!
//! Only 32-bit protected-mode x86 is supported. The definitions are plain
//! data and are compiled on every host so that layout tests can run under
//! `cargo test`.

pub mod x86;

pub use x86::*;
