//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `koodle_core` linkage and
//!   storage bootstrap.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("koodle_core version={}", koodle_core::core_version());

    match koodle_core::db::open_db_in_memory() {
        Ok(_) => println!("koodle_core storage-check=ok"),
        Err(err) => {
            eprintln!("koodle_core storage-check=failed error={err}");
            std::process::exit(1);
        }
    }
}
