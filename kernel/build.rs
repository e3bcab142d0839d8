use std::env;

fn main() {
    println!("cargo:rerun-if-changed=linker.ld");
    // Only the freestanding build is linked with the kernel layout.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        let dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
        println!("cargo:rustc-link-arg-bin=kernel=-T{dir}/linker.ld");
    }
}
