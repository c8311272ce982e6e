use std::env;
use std::path::PathBuf;

/// Generate `userlist_ffi.h` from the `extern "C"` surface into `OUT_DIR`.
/// Hosts copy it from there; the source tree is never written.
fn main() {
    println!("cargo:rerun-if-changed=src");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR or OUT_DIR not set; skipping header generation");
        return;
    };
    let header = PathBuf::from(out_dir).join("userlist_ffi.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("USERLIST_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(header);
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}
