//! Stats command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use ratchet_core::{Config, rule_stats};

use super::resolve_root;
use crate::error::Result;

/// Run the stats command
pub fn run_stats(cwd: &Path, json: bool, root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root, cwd);
    let config = Config::load(&root)?;

    let Some(stats) = rule_stats(&root, &config)? else {
        println!("{}", "No record file found.".yellow());
        println!();
        println!("Run {} to create one.", "ratchet check".cyan());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Warnings by rule".bold());
    println!();
    for (rule, stat) in stats.iter() {
        let count = if stat.count == 0 {
            stat.count.to_string().green()
        } else {
            stat.count.to_string().yellow()
        };
        println!("  {} {}", rule.cyan(), count);
        for file in &stat.files {
            println!("    {}", file.dimmed());
        }
    }

    Ok(())
}
