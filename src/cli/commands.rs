use std::path::PathBuf;

use chrono::Local;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::settings::Settings;
use crate::error::Result;
use crate::models::DataFreshness;
use crate::processors::RecordAssembler;
use crate::readers::{PageFetcher, PageReader};
use crate::utils::constants::HISTORY_DATE_FORMAT;
use crate::utils::ProgressReporter;
use crate::writers::{ApiWriter, HistoryStore, MapWriter};

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    let mut settings = Settings::load()?;
    if let Some(path) = cli.data_file {
        settings.output_file = path;
    }

    match cli.command {
        Commands::Scrape { dry_run } => scrape(&settings, dry_run).await,
        Commands::Info => info(&settings),
        Commands::Map { output } => map(&settings, output),
        Commands::Api { output_dir } => api(&settings, output_dir),
        Commands::Animations => animations(&settings),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "iceberg_tracker=debug"
    } else {
        "iceberg_tracker=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn scrape(settings: &Settings, dry_run: bool) -> Result<()> {
    println!("Collecting latest iceberg data...");
    let progress = ProgressReporter::new_spinner("Fetching iceberg listing...", false);

    let fetcher = PageFetcher::new(settings)?;
    let body = fetcher.fetch().await?;

    progress.set_message("Parsing page...");
    let page = PageReader::new().parse(&body)?;

    let assembler = RecordAssembler::new(page.revised);
    let (records, skipped) = assembler.assemble_all(&page.observations);

    for record in &records {
        if !settings.is_within_bounds(record.latitude, record.longitude) {
            warn!(
                iceberg = %record.name,
                latitude = record.latitude,
                longitude = record.longitude,
                "position outside the configured Antarctic band"
            );
        }
    }

    let date_key = page.revised.format(HISTORY_DATE_FORMAT).to_string();
    progress.finish_with_message(&format!(
        "Parsed {} icebergs revised {}",
        records.len(),
        date_key
    ));

    if skipped > 0 {
        println!("Skipped {} unparsable rows", skipped);
    }

    if dry_run {
        println!("Dry run - nothing written");
        for record in &records {
            println!(
                "  {:<8} {:>10.4} {:>10.4}  observed {}",
                record.name.to_uppercase(),
                record.latitude,
                record.longitude,
                record.recent_observation
            );
        }
        return Ok(());
    }

    let store = HistoryStore::from_settings(settings);
    let count = records.len();
    let history = store.record_snapshot(&date_key, records)?;

    println!(
        "Saved {} icebergs for {} to {}",
        count,
        date_key,
        store.path().display()
    );
    println!(
        "History now spans {} collection dates ({} records)",
        history.date_count(),
        history.total_records()
    );

    Ok(())
}

fn info(settings: &Settings) -> Result<()> {
    let store = HistoryStore::from_settings(settings);
    let history = store.load()?;

    if history.is_empty() {
        println!("No data collected yet. Run 'iceberg-tracker scrape' first.");
        return Ok(());
    }

    let latest = history
        .latest_date()
        .unwrap_or_else(|| "Unknown".to_string());
    let current = history.get(&latest).map(<[_]>::len).unwrap_or(0);
    let unique = history.unique_icebergs();

    println!("Antarctic Iceberg Data Summary:");
    println!("   - {} data collection dates", history.date_count());
    println!("   - {} current icebergs", current);
    println!("   - {} unique icebergs tracked", unique.len());
    println!("   - {} total records", history.total_records());
    println!("   - Latest data collection: {}", latest);

    if let Some((_, records)) = history.latest_snapshot() {
        let most_recent = records
            .iter()
            .map(|record| record.recent_observation.as_str())
            .filter(|observation| !observation.is_empty())
            .max();
        if let Some(observation) = most_recent {
            println!("   - Most recent iceberg observation: {}", observation);
        }
    }

    let freshness = history.freshness(Local::now().date_naive());
    println!("   - Data status: {}", freshness);
    if matches!(freshness, DataFreshness::Outdated(_)) {
        println!("   - Note: NASA SCP updates 1-2x per week (Mon/Fri typically)");
    }

    Ok(())
}

fn map(settings: &Settings, output: Option<PathBuf>) -> Result<()> {
    let store = HistoryStore::from_settings(settings);
    let history = store.load()?;

    if history.is_empty() {
        println!("No data collected yet. Run 'iceberg-tracker scrape' first.");
        return Ok(());
    }

    let output_file = output.unwrap_or_else(|| settings.map_file.clone());
    let writer = MapWriter::new(&output_file);
    writer.generate(&history)?;

    println!("Interactive map generated: {}", output_file.display());
    println!(
        "Open {} in your browser to view the map",
        output_file.display()
    );

    Ok(())
}

fn api(settings: &Settings, output_dir: Option<PathBuf>) -> Result<()> {
    let store = HistoryStore::from_settings(settings);
    let history = store.load()?;

    if history.is_empty() {
        println!("No data collected yet. Run 'iceberg-tracker scrape' first.");
        return Ok(());
    }

    let output_dir = output_dir.unwrap_or_else(|| settings.api_directory.clone());
    let writer = ApiWriter::new(&output_dir);
    let written = writer.write_endpoints(&history)?;

    println!("API endpoints created:");
    for path in &written {
        println!("  - {}", path.display());
    }
    println!(
        "  - Total unique icebergs: {}",
        history.unique_icebergs().len()
    );
    println!("  - Total records: {}", history.total_records());

    Ok(())
}

fn animations(settings: &Settings) -> Result<()> {
    let store = HistoryStore::from_settings(settings);
    let history = store.load()?;

    if history.is_empty() {
        println!("No data collected yet. Run 'iceberg-tracker scrape' first.");
        return Ok(());
    }

    let Some((date, records)) = history.latest_snapshot() else {
        println!("No current iceberg data available.");
        return Ok(());
    };

    println!("Iceberg Movement Animations:");
    println!("Data from: {}", date);
    println!("Note: Animations show historical movement patterns from NASA SCP");
    println!();

    for record in records {
        if record.name.is_empty() {
            continue;
        }
        let coords = format!("{}, {}", record.dms_latitude, record.dms_longitude);
        println!(
            "  {:<8} | {:<20} | {}",
            record.name.to_uppercase(),
            coords,
            record.animation_url(&settings.animation_base_url)
        );
    }

    println!();
    println!("Animation files show iceberg drift patterns over time.");
    println!("Copy URLs to view GIF animations of iceberg movement.");

    Ok(())
}
