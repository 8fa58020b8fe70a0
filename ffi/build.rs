use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let out = crate_dir.join("include").join("contacts.h");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CONTACTS_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            // write_to_file panics on IO errors, so the directory is checked first.
            if let Err(e) = std::fs::create_dir_all(crate_dir.join("include")) {
                println!("cargo:warning=cannot create include/: {e}");
            } else if bindings.write_to_file(&out) {
                println!("cargo:warning=regenerated {}", out.display());
            }
        }
        Err(e) => println!("cargo:warning=cbindgen skipped: {e}"),
    }
}
