//! Files command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use ratchet_core::file_stats;

use super::resolve_root;
use crate::error::Result;

/// Run the files command
pub fn run_files(cwd: &Path, json: bool, root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root, cwd);

    let Some(files) = file_stats(&root)? else {
        println!("{}", "No record file found.".yellow());
        println!();
        println!("Run {} to create one.", "ratchet check".cyan());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    println!("{}", "Warnings by file".bold());
    println!();
    if files.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for (path, rules) in files.iter() {
        println!("  {} {}", path.cyan(), files.total(path).to_string().yellow());
        for (rule, count) in rules {
            println!("    {} {}", rule.dimmed(), count);
        }
    }

    Ok(())
}
