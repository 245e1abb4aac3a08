use std::path::{Path, PathBuf};

use tracing::Level;

use crate::analyzers::{DataQualityReport, GroupCount, StationAnalyzer, YearCount};
use crate::cli::args::{Cli, Commands, FilterArgs};
use crate::error::Result;
use crate::models::{FilteredDataset, StationDataset};
use crate::processors::{DatasetLoader, StationFilter};
use crate::utils::filename::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvExporter;

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Inspect {
            source,
            sample,
            json,
            filters,
        } => inspect(&source, sample, json, &filters),

        Commands::Export {
            source,
            output,
            filters,
        } => export(&source, output, &filters),
    }
}

fn inspect(source: &Path, sample: usize, json: bool, filters: &FilterArgs) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading station metadata...", json);
    let mut loader = DatasetLoader::new();
    let dataset = loader.load(source)?;
    progress.set_message("Computing aggregations...");

    let criteria = filters.to_criteria();
    let filtered = StationFilter::new().apply(&dataset, &criteria);

    let analyzer = StationAnalyzer::new();
    let aggregation = analyzer.aggregate(&filtered);
    let quality = analyzer.missing_value_rates(&dataset);
    progress.finish_and_clear();

    if json {
        let payload = serde_json::json!({
            "source": source.display().to_string(),
            "records": dataset.len(),
            "matched_records": filtered.len(),
            "missing_columns": dataset.schema().missing_columns(),
            "domains": {
                "municipalities": dataset.distinct_municipalities(),
                "area_classes": dataset.distinct_area_classes(),
                "statuses": dataset.observed_statuses(),
                "year_bounds": dataset.year_bounds(),
                "altitude_bounds": dataset.altitude_bounds(),
            },
            "aggregation": aggregation,
            "data_quality": quality,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Source: {}", source.display());
    println!("Records: {}", dataset.len());
    print_schema_warning(&dataset);
    print_domains(&dataset);

    if filtered.is_empty() {
        println!("\nNo station matches the selected filters.");
        return Ok(());
    }

    println!("\n{}", aggregation.summary());

    print_groups("Stations by status", &aggregation.status_counts);
    print_groups(
        "Stations by area classification",
        &aggregation.area_class_counts,
    );
    print_groups("Top municipalities", &aggregation.top_municipalities);
    print_years(&aggregation.stations_by_start_year);
    print_quality(&quality);

    if sample > 0 {
        print_sample(&filtered, sample);
    }

    Ok(())
}

fn export(source: &Path, output: Option<PathBuf>, filters: &FilterArgs) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading station metadata...", false);
    let mut loader = DatasetLoader::new();
    let dataset = loader.load(source)?;
    progress.finish_with_message(&format!("Loaded {} records", dataset.len()));

    print_schema_warning(&dataset);

    let criteria = filters.to_criteria();
    let filtered = StationFilter::new().apply(&dataset, &criteria);

    if filtered.is_empty() {
        println!("No station matches the selected filters.");
        return Ok(());
    }

    let output = output.unwrap_or_else(generate_default_export_filename);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    CsvExporter::new().write_records(filtered.records(), &output)?;
    println!("Wrote {} records to {}", filtered.len(), output.display());

    Ok(())
}

fn print_schema_warning(dataset: &StationDataset) {
    if !dataset.schema().is_complete() {
        println!(
            "Warning: missing columns in file: {}",
            dataset.schema().missing_columns().join(", ")
        );
    }
}

fn print_domains(dataset: &StationDataset) {
    let statuses: Vec<String> = dataset
        .observed_statuses()
        .iter()
        .map(|status| status.to_string())
        .collect();
    let statuses = if statuses.is_empty() {
        "-".to_string()
    } else {
        statuses.join("/")
    };

    println!(
        "Domains: {} municipalities, {} area classes, statuses {}",
        dataset.distinct_municipalities().len(),
        dataset.distinct_area_classes().len(),
        statuses
    );
    if let Some((min, max)) = dataset.year_bounds() {
        println!("Start years observed: {}-{}", min, max);
    }
    if let Some((min, max)) = dataset.altitude_bounds() {
        println!("Altitude observed: {:.0}-{:.0} m", min, max);
    }
}

fn print_groups(title: &str, groups: &[GroupCount]) {
    if groups.is_empty() {
        return;
    }

    println!("\n{}:", title);
    for group in groups {
        println!("  {:<32} {}", group.label, group.count);
    }
}

fn print_years(series: &[YearCount]) {
    if series.is_empty() {
        return;
    }

    println!("\nStations by start year of activity:");
    for entry in series {
        println!("  {} {}", entry.year, entry.count);
    }
}

fn print_quality(report: &DataQualityReport) {
    if report.columns.is_empty() {
        return;
    }

    println!("\nMissing value rates (full dataset):");
    for column in &report.columns {
        println!("  {:<20} {:.1}%", column.column, column.missing_rate * 100.0);
    }
}

fn print_sample(filtered: &FilteredDataset, limit: usize) {
    println!("\nSample records (showing up to {}):", limit);
    for (position, record) in filtered.records().iter().take(limit).enumerate() {
        let name = record.name.as_deref().unwrap_or("(unnamed)");
        let municipality = record.municipality.as_deref().unwrap_or("-");
        let begin = record
            .activity_begin
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let area = record.area_class_simple.as_deref().unwrap_or("-");

        println!(
            "{}. {} ({}) | {} | since {} | {}",
            position + 1,
            name,
            municipality,
            record.status,
            begin,
            area
        );
    }
}
