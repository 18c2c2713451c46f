use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let out = crate_dir.join("include").join("posty.h");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("POSTY_H")
        .generate()
    {
        Ok(bindings) => {
            if let Some(dir) = out.parent() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    println!("cargo:warning=cannot create {}: {e}", dir.display());
                }
            }
            bindings.write_to_file(out);
        }
        Err(e) => println!("cargo:warning=cbindgen failed, header not regenerated: {e}"),
    }
}
