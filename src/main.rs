use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::process;

mod config;
mod error;
mod fsutil;
mod mirror;
mod sweep;
mod validate;

use validate::Rule;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete junk folders (covers, artwork) from album directories
    Sweep(SweepArgs),
    /// Copy albums to a backup root, skipping already-mirrored ones
    Mirror(MirrorArgs),
    /// Sweep the library, then mirror it
    Run(MirrorArgs),
}

#[derive(Args)]
struct SweepArgs {
    #[arg(short, long)]
    dry_run: bool,
    /// Library root; remembered from the last run when omitted
    path: Option<String>,
}

#[derive(Args)]
struct MirrorArgs {
    #[arg(short, long)]
    dry_run: bool,
    /// Library root; remembered from the last run when omitted
    path: Option<String>,
    /// Destination root; remembered from the last run when omitted
    destination: Option<String>,
}

fn resolve_root(label: &str, arg: Option<String>, remembered: Option<String>) -> String {
    let value = arg.or(remembered).unwrap_or_default();
    if let Some(error) = validate::validate(&value, &[Rule::NotEmpty, Rule::PathExists]) {
        eprintln!("{} root: {}", label, error);
        process::exit(1);
    }
    return value;
}

fn run_sweep(root: &str, dry_run: bool) {
    let mut decider = sweep::ConsoleDecider;
    match sweep::sweep(Path::new(root), &mut decider, dry_run) {
        Ok(stats) => {
            for failure in &stats.failures {
                eprintln!("could not delete {}: {}", failure.path.display(), failure.reason);
            }
            println!(
                "swept: {} deleted, {} kept, {} prompted, {} failed",
                stats.deleted,
                stats.kept,
                stats.prompted,
                stats.failures.len()
            );
        }
        Err(err) => {
            eprintln!("sweep failed: {}", err);
            process::exit(1);
        }
    }
}

fn run_mirror(root: &str, destination: &str, dry_run: bool) {
    match mirror::mirror(Path::new(root), Path::new(destination), dry_run) {
        Ok(stats) => println!(
            "mirrored: {} copied, {} replaced, {} up to date, {} failed",
            stats.copied,
            stats.replaced,
            stats.skipped,
            stats.failed.len()
        ),
        Err(err) => {
            eprintln!("mirror failed: {}", err);
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config_path = Path::new(config::CONFIG_FILE);
    let mut cfg = config::load(config_path);

    match cli.command {
        Commands::Sweep(args) => {
            let root = resolve_root("library", args.path, cfg.library_root.clone());
            cfg.library_root = Some(root.clone());
            config::remember(config_path, &cfg, args.dry_run);
            run_sweep(&root, args.dry_run);
        }
        Commands::Mirror(args) => {
            let root = resolve_root("library", args.path, cfg.library_root.clone());
            let destination =
                resolve_root("destination", args.destination, cfg.mirror_root.clone());
            cfg.library_root = Some(root.clone());
            cfg.mirror_root = Some(destination.clone());
            config::remember(config_path, &cfg, args.dry_run);
            run_mirror(&root, &destination, args.dry_run);
        }
        Commands::Run(args) => {
            let root = resolve_root("library", args.path, cfg.library_root.clone());
            let destination =
                resolve_root("destination", args.destination, cfg.mirror_root.clone());
            cfg.library_root = Some(root.clone());
            cfg.mirror_root = Some(destination.clone());
            config::remember(config_path, &cfg, args.dry_run);
            run_sweep(&root, args.dry_run);
            run_mirror(&root, &destination, args.dry_run);
        }
    }
}
