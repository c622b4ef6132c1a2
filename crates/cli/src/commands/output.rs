//! Console progress output.
//!
//! Banners and per-item status lines go to stdout; diagnostics go through
//! `tracing` to stderr.

const RULE_WIDTH: usize = 50;

/// Print a section header framed by rules.
pub fn print_section_header(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("{}", title);
    println!("{}\n", rule);
}

/// Print the final outcome of an operation.
pub fn print_outcome(success: bool, message: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let marker = if success { "✅" } else { "❌" };
    println!("\n{}", rule);
    println!("{} {}", marker, message);
    println!("{}", rule);
}

/// Print one status line for an item.
pub fn print_status(success: bool, message: &str) {
    let marker = if success { "✅" } else { "❌" };
    println!("   {} {}", marker, message);
}

/// Print a warning line for an item.
pub fn print_warning(message: &str) {
    println!("   ⚠️  {}", message);
}
