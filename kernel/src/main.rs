#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]
#![forbid(unsafe_op_in_unsafe_fn)]

#[cfg(all(target_os = "none", target_arch = "x86"))]
mod entry;

// Hosted builds (workspace `cargo test`) only need the crate to link.
#[cfg(not(target_os = "none"))]
fn main() {}
