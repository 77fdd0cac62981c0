//! # chatdigest-summarize CLI
//!
//! Sends cleaned transcripts to the selected providers and writes one
//! Markdown report per transcript.

use std::process;
use std::time::Instant;

use clap::Parser;

use chatdigest::ChatdigestError;
use chatdigest::cli::{SummarizeArgs, init_tracing};
use chatdigest::config::ApiConfig;
use chatdigest::summarize::{
    Conclusion, HttpSummarizer, Provider, generate_conclusion, process_all,
};

fn main() {
    let args = SummarizeArgs::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &SummarizeArgs) -> Result<(), ChatdigestError> {
    let providers = args.providers();

    let mut api = ApiConfig::load(&args.config)?;
    if let Some(ref model) = args.model {
        api.set_model(Provider::SiliconFlow, model.as_str());
    }
    // No request is sent unless every selected provider can authenticate.
    api.ensure_keys(&providers)?;

    let names: Vec<String> = providers.iter().map(ToString::to_string).collect();
    println!("📦 chatdigest-summarize v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🤖 Providers: {}", names.join(", "));
    println!("💾 Output:    {}", args.output_dir.display());
    if args.system_prompt.is_some() {
        println!("📝 Custom system prompt");
    }

    let summarizers = HttpSummarizer::from_config(&api, &providers, &args.prompts());
    let start = Instant::now();

    if let Some(ref file) = args.file {
        println!("📂 Input:     {}", file.display());
        println!();
        match generate_conclusion(file, &args.output_dir, &summarizers)? {
            Some(conclusion) => print_conclusion(&conclusion),
            None => {
                return Err(ChatdigestError::NoSummary { path: file.clone() });
            }
        }
    } else {
        println!("📂 Input:     {}", args.input_dir.display());
        println!();
        let batch = process_all(&args.input_dir, &args.output_dir, &summarizers)?;
        if batch.total() == 0 {
            println!("⚠️  No cleaned_* files found in {}", args.input_dir.display());
        }
        for conclusion in &batch.completed {
            print_conclusion(conclusion);
        }
        for (path, error) in &batch.failures {
            println!("❌ {}: {}", path.display(), error);
        }
        println!(
            "🎉 Batch complete: {}/{} files summarized",
            batch.succeeded(),
            batch.total()
        );
    }

    println!("⚡ Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn print_conclusion(conclusion: &Conclusion) {
    println!(
        "✅ {} -> {}",
        conclusion.input.display(),
        conclusion.output.display()
    );
    for (provider, error) in &conclusion.failed {
        println!("   ⚠️  {} skipped: {}", provider, error);
    }
}
