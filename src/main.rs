//! # chatdigest CLI
//!
//! Cleans one transcript (`-f`) or every transcript in a directory.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;

use chatdigest::ChatdigestError;
use chatdigest::cli::{CleanArgs, init_tracing};
use chatdigest::config::CleanConfig;
use chatdigest::core::{CleanReport, clean_directory, clean_file};

fn main() {
    let args = CleanArgs::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CleanArgs) -> Result<(), ChatdigestError> {
    let config = args.to_config();

    println!("📦 chatdigest v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🧹 Rules:   {}", config.rules_path.display());
    if let Some(ref range) = config.date_range {
        println!("📅 Date:    {}", range);
    }

    match &args.file {
        Some(file) => run_single(file, &config),
        None => run_batch(&args.directory, &config),
    }
}

fn run_single(file: &Path, config: &CleanConfig) -> Result<(), ChatdigestError> {
    println!("📂 Input:   {}", file.display());
    println!();

    let start = Instant::now();
    let report = clean_file(file, config)?;
    print_report(&report);
    println!("   Time:      {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_batch(dir: &Path, config: &CleanConfig) -> Result<(), ChatdigestError> {
    println!("📂 Directory: {}", dir.display());
    if config.output.is_some() {
        println!("⚠️  --output is ignored in directory mode");
    }
    println!();

    let start = Instant::now();
    let batch = clean_directory(dir, config)?;
    if batch.total() == 0 {
        println!("⚠️  No transcripts found in {}", dir.display());
    }

    for report in &batch.completed {
        print_report(report);
        println!();
    }
    for (path, error) in &batch.failures {
        println!("❌ {}: {}", path.display(), error);
    }

    println!(
        "🎉 Batch complete: {}/{} files cleaned ({:.2}s)",
        batch.succeeded(),
        batch.total(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_report(report: &CleanReport) {
    println!("✅ Done! Output saved to {}", report.output.display());
    println!("📊 Summary:");
    println!("   Source:    {}", report.input.display());
    println!("   Range:     {}", report.range);
    println!("   Rules:     {}", report.rule_count);
    println!("   Original:  {} lines", report.stats.original_lines);
    println!("   Cleaned:   {} lines", report.stats.cleaned_lines);
    println!("   Reduction: {:.1}%", report.stats.reduction_percent());
}
