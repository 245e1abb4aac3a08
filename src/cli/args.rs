use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{FilterCriteria, StationStatus};

#[derive(Parser)]
#[command(name = "aq-stations")]
#[command(about = "Air quality monitoring station metadata engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a source and report aggregated indicators
    Inspect {
        #[arg(
            short,
            long,
            help = "Station metadata source file (.csv or .xls/.xlsx)"
        )]
        source: PathBuf,

        #[arg(
            short = 'n',
            long,
            default_value = "10",
            help = "Number of sample records to display (0 = none)"
        )]
        sample: usize,

        #[arg(long, help = "Emit the aggregation as JSON instead of text")]
        json: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write the filtered dataset to a delimited file
    Export {
        #[arg(
            short,
            long,
            help = "Station metadata source file (.csv or .xls/.xlsx)"
        )]
        source: PathBuf,

        #[arg(
            short,
            long,
            help = "Output file path [default: aq-stations-{YYMMDD}.csv]"
        )]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Filter options shared by every subcommand
#[derive(Args)]
pub struct FilterArgs {
    #[arg(long, help = "Keep only these municipalities (repeatable)")]
    pub municipality: Vec<String>,

    #[arg(
        long = "area-class",
        help = "Keep only these simplified area classes (repeatable)"
    )]
    pub area_class: Vec<String>,

    #[arg(long, help = "Keep only these statuses (repeatable)")]
    pub status: Vec<StationStatus>,

    #[arg(long, help = "Lowest start year of activity kept")]
    pub year_from: Option<i32>,

    #[arg(long, help = "Highest start year of activity kept")]
    pub year_to: Option<i32>,

    #[arg(long, help = "Lowest altitude kept, in metres")]
    pub altitude_min: Option<f64>,

    #[arg(long, help = "Highest altitude kept, in metres")]
    pub altitude_max: Option<f64>,
}

impl FilterArgs {
    /// Build engine criteria, leaving out families with no options given
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut builder = FilterCriteria::builder()
            .municipalities(self.municipality.iter().cloned())
            .area_classes(self.area_class.iter().cloned())
            .statuses(self.status.iter().copied());

        if self.year_from.is_some() || self.year_to.is_some() {
            builder = builder.year_range(
                self.year_from.unwrap_or(i32::MIN),
                self.year_to.unwrap_or(i32::MAX),
            );
        }

        if self.altitude_min.is_some() || self.altitude_max.is_some() {
            builder = builder.altitude_range(
                self.altitude_min.unwrap_or(f64::NEG_INFINITY),
                self.altitude_max.unwrap_or(f64::INFINITY),
            );
        }

        builder.build()
    }
}
