//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpilot_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("taskpilot_core version={}", taskpilot_core::core_version());

    match taskpilot_core::db::open_db_in_memory() {
        Ok(_) => println!(
            "schema version={}",
            taskpilot_core::db::migrations::latest_version()
        ),
        Err(err) => {
            eprintln!("db bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
