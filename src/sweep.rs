use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::fsutil::{delete, subdirectories, DeleteFailure};

// Matched case-insensitively against the start of the folder name, so
// "Covers (Front)" is caught but "Re-Covers" is not.
const AUTO_DELETE_PREFIXES: [&str; 4] = ["covers", "cover", "artwork", "scans"];
const AUTO_SKIP_PREFIXES: [&str; 9] = [
    "disc 1", "disc 2", "disc 3", "cd1", "cd2", "cd3", "cd 1", "cd 2", "cd 3",
];

#[derive(Debug, PartialEq)]
pub enum Verdict {
    Delete,
    Keep,
}

/// Decides the fate of a candidate folder that matched no automatic rule.
/// The console implementation blocks on stdin; tests script the answers.
pub trait Decider {
    fn decide(&mut self, folder: &str) -> Verdict;
}

pub struct ConsoleDecider;

impl Decider for ConsoleDecider {
    fn decide(&mut self, folder: &str) -> Verdict {
        print!(
            "has folder >>>> {} <<<<, delete? enter to skip, 'y' for yes: ",
            folder
        );
        io::stdout().flush().ok();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return Verdict::Keep;
        }
        if answer.trim().eq_ignore_ascii_case("y") {
            Verdict::Delete
        } else {
            Verdict::Keep
        }
    }
}

enum Rule {
    AutoDelete,
    AutoSkip,
    Ask,
}

fn classify(folder: &str) -> Rule {
    let lowered = folder.to_lowercase();
    if AUTO_DELETE_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return Rule::AutoDelete;
    }
    if AUTO_SKIP_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return Rule::AutoSkip;
    }
    return Rule::Ask;
}

#[derive(Debug, Default)]
pub struct SweepStats {
    pub deleted: usize,
    pub kept: usize,
    pub prompted: usize,
    pub failures: Vec<DeleteFailure>,
}

/// Cleanup pass over a band/album hierarchy: exactly two levels down from
/// `root`, every immediate subfolder of every album gets a delete/keep
/// verdict. Delete failures are collected, never fatal to the pass.
pub fn sweep(root: &Path, decider: &mut dyn Decider, dry_run: bool) -> Result<SweepStats> {
    let mut stats = SweepStats::default();

    for band in subdirectories(root)? {
        println!("{} {}", "band".cyan(), band.file_name().unwrap_or_default().to_string_lossy());
        for album in subdirectories(&band)? {
            println!("  {} {}", "album".cyan(), album.file_name().unwrap_or_default().to_string_lossy());
            for candidate in subdirectories(&album)? {
                let name = candidate
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned();

                let verdict = match classify(&name) {
                    Rule::AutoDelete => {
                        println!("    {} {}", "auto deleting".red(), name);
                        Verdict::Delete
                    }
                    Rule::AutoSkip => {
                        println!("    {} {}", "auto skipping".yellow(), name);
                        Verdict::Keep
                    }
                    Rule::Ask => {
                        stats.prompted += 1;
                        decider.decide(&name)
                    }
                };

                match verdict {
                    Verdict::Delete => {
                        if dry_run {
                            println!("    would delete {}", candidate.display());
                            stats.deleted += 1;
                        } else if let Some(failure) = delete(&candidate, false) {
                            stats.failures.push(failure);
                        } else {
                            stats.deleted += 1;
                        }
                    }
                    Verdict::Keep => stats.kept += 1,
                }
            }
        }
    }

    return Ok(stats);
}
