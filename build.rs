use std::env;
use std::path::{Path, PathBuf};

const ROOT_HINT_ENV: &str = "FIND_WALLET_ROOT_HINT";
// Bundled files the library resolves against the recorded root.
const BUNDLED_FILES: [&str; 2] = [
    "data/wallet_catalog.json",
    "schema/wallet_catalog.schema.json",
];

fn main() {
    println!("cargo:rerun-if-env-changed={ROOT_HINT_ENV}");

    let Some(root) = env::var(ROOT_HINT_ENV)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .or_else(|| env::var("CARGO_MANIFEST_DIR").ok())
        .map(|raw| canonical_root(&raw))
    else {
        return;
    };

    for relative in BUNDLED_FILES {
        let bundled = root.join(relative);
        println!("cargo:rerun-if-changed={}", bundled.display());
        if !bundled.is_file() {
            println!(
                "cargo:warning=bundled file {} is missing under {}",
                bundled.display(),
                root.display()
            );
        }
    }

    println!("cargo:rustc-env={ROOT_HINT_ENV}={}", root.display());
}

fn canonical_root(raw: &str) -> PathBuf {
    let candidate = Path::new(raw.trim()).to_path_buf();
    candidate.canonicalize().unwrap_or(candidate)
}
