//! Terminal rendering of findings

use colored::Colorize;
use ratchet_core::{Finding, FindingLevel};

/// Print `findings`: errors and warnings to stderr, infos to stdout.
pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        match finding.level {
            FindingLevel::Error => eprintln!("{}", format!("✖ {}", finding.message).red()),
            FindingLevel::Warning => eprintln!("{}", format!("⚠ {}", finding.message).yellow()),
            FindingLevel::Info => println!("{}", finding.message),
        }
    }
}

pub fn print_success(message: &str) {
    println!("{}", format!("✔ {}", message).green());
}
