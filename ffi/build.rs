use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) = (std::env::var("CARGO_MANIFEST_DIR"), std::env::var("OUT_DIR")) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR or OUT_DIR unset; skipping C header");
        return;
    };
    let header = PathBuf::from(out_dir).join("pdv_ffi.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("PDV_FFI_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header);
            println!("cargo:rustc-env=PDV_FFI_HEADER={}", header.display());
        }
        Err(err) => println!("cargo:warning=could not generate C header: {err}"),
    }
}
