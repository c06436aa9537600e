//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Cyan: hints, commands
//! - Bold: headers, important values
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;
use std::io::{self, Write as IoWrite};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ deployment submitted to ECS`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ parameter '/prod/db' (for DB) does not exist in Parameter Store`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message (cyan) to stderr, next to the error it explains.
pub fn error_hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a hint message (cyan).
///
/// Example: `→ follow the rollout: aws ecs describe-services ...`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print a bold section header followed by a rule.
///
/// Example:
/// ```text
/// Summary
/// ────────────────────────────────────────────────────────
/// ```
pub fn section(title: &str) {
    println!();
    if colors_enabled() {
        println!("{}", style(title).bold());
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", title);
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  secrets          3`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value.to_string()).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Start a progress line in the format `Label... `.
///
/// Call `progress_done()` to finish the line.
pub fn progress(label: &str) {
    if colors_enabled() {
        print!("{}... ", style(label).dim());
    } else {
        print!("{}... ", label);
    }
    let _ = io::stdout().flush();
}

/// Finish a progress line with success/failure indicator.
pub fn progress_done(success: bool) {
    if colors_enabled() {
        if success {
            println!("{}", style("ok").green());
        } else {
            println!("{}", style("failed").red());
        }
    } else {
        println!("{}", if success { "ok" } else { "failed" });
    }
}

/// Print machine-readable output verbatim.
pub fn data(content: &str) {
    println!("{}", content);
}
