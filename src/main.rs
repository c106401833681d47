// Telco Synth - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/telco-synth > cdrs.jsonl
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/telco-synth --config tunisia.json --cdr-count 50000 --output-format csv -o cdrs.csv
// ```

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use telco_synth::output::write_records;
use telco_synth::simulation::{LoggingConfig, SynthesisOrchestrator, SynthesisStatistics};
use telco_synth::types::config::CliArgs;
use telco_synth::types::SynthesisConfig;
use tracing::{error, info};

fn main() {
    if let Err(e) = run() {
        error!("telco-synth failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let json = SynthesisConfig::default()
            .print_json()
            .context("Failed to serialize default configuration")?;
        println!("{}", json);
        return Ok(());
    }

    // Initialize logging based on CLI flags; the guard flushes file writers on drop
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::init_quiet()
    };
    let _logging_guard =
        logging_result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Telco Synth");

    // Load configuration from CLI arguments and optional config file
    let config =
        SynthesisConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no data will be generated.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let mut orchestrator =
        SynthesisOrchestrator::new(config.clone()).context("Failed to create orchestrator")?;

    eprintln!("Generating reference data...");
    orchestrator.initialize().context("Failed to generate reference data")?;

    if let Some(path) = &config.reference_output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create reference output file '{}'", path))?;
        let written = orchestrator
            .write_reference_snapshot(BufWriter::new(file))
            .context("Failed to write reference snapshot")?;
        eprintln!("Reference snapshot ({} records) written to: {}", written, path);
    }

    eprintln!(
        "Generating {} CDRs over a {}-minute window...",
        config.cdr.count, config.cdr.window_minutes
    );
    let records = orchestrator
        .generate_cdrs(config.cdr.count, config.cdr.window_minutes)
        .context("CDR generation failed")?;

    let format = config
        .get_output_format()
        .map_err(|e| anyhow::anyhow!("Invalid output format: {}", e))?;
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path))?;
            write_records(BufWriter::new(file), &records, format)
                .with_context(|| format!("Failed to write CDRs to '{}'", path))?;
            eprintln!("CDRs written to: {}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_records(&mut handle, &records, format).context("Failed to write CDRs")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    print_final_statistics(orchestrator.get_statistics());

    info!("Telco Synth completed successfully");
    Ok(())
}

/// Print startup banner
fn print_startup_banner(config: &SynthesisConfig) {
    eprintln!("Telco Synth");
    eprintln!("===========");
    eprintln!("Synthetic mobile network reference data and CDR generator");
    eprintln!();
    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SynthesisConfig) {
    eprintln!("Configuration:");
    eprintln!("  Country: {}", config.geography.country);
    eprintln!(
        "  Bounding Box: lat [{}, {}], lon [{}, {}]",
        config.geography.latitude[0],
        config.geography.latitude[1],
        config.geography.longitude[0],
        config.geography.longitude[1]
    );
    for (network_type, grid) in &config.geography.grids {
        eprintln!("  {} Grid: {}x{}", network_type, grid.rows, grid.cols);
    }
    for (subscriber_type, plan) in &config.identity.subscribers {
        eprintln!("  {} Subscribers: {}", subscriber_type, plan.count);
    }
    eprintln!("  Bearers: {}", config.bearers.count);
    eprintln!("  CDR Count: {}", config.cdr.count);
    eprintln!("  Window: {} minutes", config.cdr.window_minutes);
    if let Some(reference_time) = config.cdr.reference_time {
        eprintln!("  Reference Time: {}", reference_time.to_rfc3339());
    }
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}

/// Print final statistics
fn print_final_statistics(statistics: &SynthesisStatistics) {
    eprintln!();
    eprintln!("Synthesis Complete!");
    eprintln!("===================");
    eprintln!("{}", statistics);
}
