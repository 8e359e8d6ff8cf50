//! DBSCAN hotspot clustering tool
//!
//! Reads geographic points from CSV or JSON, clusters them with DBSCAN over
//! haversine distance, and writes the labelled points plus an optional HTML map.

use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use geo_hotspots::cluster::{EARTH_RADIUS_KM, IndexStrategy, InvalidParameter, Point};
use geo_hotspots::input::{InputFormat, read_points};
use geo_hotspots::render::write_map;
use geo_hotspots::report::ClusterReport;
use geo_hotspots::{ClusterConfig, Error, MapStyle, Palette, cluster_points};

#[cfg(test)]
mod main_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormatArg {
    Auto,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IndexArg {
    Auto,
    Brute,
    Tree,
}

#[derive(Debug, Parser)]
#[command(name = "geo_hotspots")]
#[command(about = "DBSCAN hotspot clustering of geo points", long_about = None)]
struct Args {
    /// Input file with latitude,longitude columns or a {"points": [...]} JSON body, `-` for stdin
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = InputFormatArg::Auto)]
    input_format: InputFormatArg,

    /// Output file with labelled points (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write an HTML map of the clusters to this file
    #[arg(long)]
    map: Option<PathBuf>,

    /// DBSCAN epsilon parameter (clustering radius in km)
    #[arg(short, long, default_value_t = 50.0)]
    eps: f64,

    /// DBSCAN minPoints parameter (minimum points in neighbourhood, itself included)
    #[arg(short = 'm', long, default_value_t = 2)]
    min_points: usize,

    /// Sphere radius in km used to turn eps into an angle
    #[arg(long, default_value_t = EARTH_RADIUS_KM)]
    earth_radius: f64,

    /// Neighbourhood search used by DBSCAN
    #[arg(long, value_enum, default_value_t = IndexArg::Auto)]
    index: IndexArg,

    /// Comma separated marker colors, cycled by cluster id
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// Marker color for noise points
    #[arg(long, default_value = "black")]
    noise_color: String,

    /// Map center as LAT,LON
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [20.5937, 78.9629]
    )]
    center: Vec<f64>,

    #[arg(long, default_value_t = 5)]
    zoom: u8,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            distance_km: self.eps,
            min_points: self.min_points,
            earth_radius_km: self.earth_radius,
            strategy: match self.index {
                IndexArg::Auto => IndexStrategy::Auto,
                IndexArg::Brute => IndexStrategy::BruteForce,
                IndexArg::Tree => IndexStrategy::Tree,
            },
        }
    }

    fn map_style(&self) -> Result<MapStyle, Error> {
        let palette = match &self.palette {
            Some(colors) => Palette::new(colors.clone(), self.noise_color.clone())?,
            None => Palette::default().with_noise_color(self.noise_color.clone()),
        };

        let center = match self.center[..] {
            [latitude, longitude]
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Point::new(latitude, longitude)
            }
            _ => return Err(InvalidParameter::MapCenter(self.center.clone()).into()),
        };

        Ok(MapStyle {
            center,
            zoom: self.zoom,
            palette,
            ..MapStyle::default()
        })
    }

    fn input_format(&self) -> Option<InputFormat> {
        match self.input_format {
            InputFormatArg::Auto => None,
            InputFormatArg::Csv => Some(InputFormat::Csv),
            InputFormatArg::Json => Some(InputFormat::Json),
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Reads, clusters and writes everything `args` asks for
fn run(args: &Args) -> Result<ClusterReport, Error> {
    let config = args.cluster_config();
    // fail on bad parameters before touching the input
    config.epsilon()?;
    let style = args.map_style()?;

    let points = read_points(&args.input, args.input_format())?;
    info!("Read {} points from {:?}", points.len(), args.input);
    if points.is_empty() {
        warn!("No points found in {:?}", args.input);
    }

    info!(
        "Running DBSCAN with eps={:.4} km, minPoints={}",
        config.distance_km, config.min_points
    );
    let labels = cluster_points(&points, &config)?;

    let mut report = ClusterReport::new(&points, &labels);
    info!(
        "Found {} clusters and {} noise points",
        report.clusters_count, report.noise_count
    );

    if let Some(map) = &args.map {
        write_map(map, &points, &labels, &style)?;
        info!("Map written to {:?}", map);
        report = report.with_map_file(Some(map.display().to_string()));
    }

    write_report(&report, args)?;
    Ok(report)
}

fn write_report(report: &ClusterReport, args: &Args) -> Result<(), Error> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Json => {
            report.write_json(&mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        OutputFormat::Csv => report.write_csv(&mut writer)?,
    }

    if let Some(path) = &args.output {
        info!("Labelled points written to {:?}", path);
    }
    Ok(())
}
