use std::io::{self, Read};

use anyhow::{Context, Result};
use boxfinder_core::{output::OutputFormat, InputParams, InputResolver};
use clap::Parser;
use resolve_error::IntoResolveError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod resolve_error;

/// Find the bounding box of coordinates, GeoJSON, shapefiles, places, or
/// a center and a size
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Western bound
    #[arg(long, allow_hyphen_values = true)]
    left: Option<f64>,

    /// Southern bound
    #[arg(long, allow_hyphen_values = true)]
    bottom: Option<f64>,

    /// Eastern bound
    #[arg(long, allow_hyphen_values = true)]
    right: Option<f64>,

    /// Northern bound
    #[arg(long, allow_hyphen_values = true)]
    top: Option<f64>,

    /// Center of the box as `X,Y'
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    center: Option<Vec<f64>>,

    /// Width of the box
    #[arg(long, allow_hyphen_values = true)]
    width: Option<String>,

    /// Height of the box
    #[arg(long, allow_hyphen_values = true)]
    height: Option<String>,

    /// Coordinates or GeoJSON. Use `-' to read from standard input.
    #[arg(long)]
    raw: Option<String>,

    /// A GeoJSON file or shapefile. Can be given multiple times. Use `-' to
    /// read from standard input.
    #[arg(short, long)]
    file: Vec<String>,

    /// The name of a place
    #[arg(long)]
    place: Option<String>,

    /// Grow (or shrink if negative) the box by this amount on all sides
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    buffer: f64,

    /// Output format (plain, comma, wkt, geojson)
    #[arg(long, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Log what is going on
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Converts the arguments into input params. Reads standard input if
    /// raw input should be taken from there.
    fn input_params(self) -> Result<InputParams> {
        let raw = match self.raw.as_deref() {
            Some("-") => {
                let mut buf = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .context("Unable to read raw input from standard input")?;
                Some(buf)
            }
            Some(r) => Some(r.as_bytes().to_vec()),
            None => None,
        };

        Ok(InputParams {
            left: self.left,
            bottom: self.bottom,
            right: self.right,
            top: self.top,
            center: self.center,
            width: self.width.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
            raw,
            file: self.file,
            place: self.place.unwrap_or_default(),
            buffer: self.buffer,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let params = cli.input_params()?;

    let resolver = InputResolver::new();
    let bbox = match resolver.resolve(&params) {
        Ok(bbox) => Ok(bbox),
        Err(err) => Err(err.into_resolve_error(params.raw.as_deref())),
    }?;
    debug!(%bbox, "Resolved bounding box");

    println!("{}", format.format(&bbox));

    Ok(())
}
