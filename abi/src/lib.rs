//! HssOS hardware ABI types
//!
//! This crate provides the canonical definitions for every binary layout the
//! trap core shares with the processor or with hand-written entry code:
//! - Gate descriptors and the table descriptor loaded by `lidt`
//! - The trap frame built by the exception trampolines
//! - The fixed table of the 32 CPU exception vectors
//! - The `LineSink` trait the dispatcher writes its diagnostics through
//!
//! Nothing here touches hardware, so the whole crate builds and tests on the
//! host. All shared layouts are `#[repr(C)]` and size-checked at compile time.

#![no_std]
#![forbid(unsafe_code)]

pub mod arch;
pub mod trap_traits;

pub use arch::*;
pub use trap_traits::LineSink;
