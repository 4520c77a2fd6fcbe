//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kanban_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());
}
