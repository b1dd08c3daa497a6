//! This build script copies the `memory.x` file from the crate root into
//! a directory where the linker can always find it at build time, and passes
//! the linker scripts of the firmware binary.
//!
//! Host builds (`cargo test`) do not enable the `embedded` feature and skip all of this.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stdout)]

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        memory_x();
    }
    println!("cargo:rerun-if-changed=build.rs");
}

/// Put `memory.x` in our output directory and ensure it's on the linker search path.
fn memory_x() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // only re-run when `memory.x` changes, not on every file in the project
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
