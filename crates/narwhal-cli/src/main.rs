use narwhal::{Point, RingPlan, SectorSpec};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Sector(narwhal::Error),
    Config(json5::Error),
    Json(serde_json::Error),
    InvalidStrength(f64),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Sector(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "Config error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::InvalidStrength(s) => write!(f, "strength must be finite, got {s}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Sector(value)
    }
}

impl From<json5::Error> for CliError {
    fn from(value: json5::Error) -> Self {
        Self::Config(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Pack,
    Plan,
}

/// Command-line overrides; `None` keeps the config file (or default) value.
#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    xy: bool,
    verbose: bool,
    out: Option<String>,
    inner: Option<f64>,
    outer: Option<f64>,
    start: Option<f64>,
    end: Option<f64>,
    count: Option<usize>,
    strength: Option<f64>,
}

const DEMO_RADII: [f64; 2] = [100.0, 500.0];
const DEMO_ANGLES: [f64; 2] = [15.0, 60.0];
const DEMO_COUNT: usize = 200;
const DEMO_STRENGTH: f64 = 0.3;

/// Config file contents (JSON5). Missing values fall back to the sector demo: 200 nodes packed
/// between radii 100 and 500, from 15 to 60 degrees, pulled with strength 0.3.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    sector: Option<SectorSpec>,
    count: Option<usize>,
    strength: Option<f64>,
}

#[derive(Debug)]
struct PackConfig {
    sector: SectorSpec,
    count: usize,
    strength: f64,
}

#[derive(Serialize)]
struct PackOut<'a> {
    sector: &'a SectorSpec,
    strength: f64,
    points: &'a [Point],
}

#[derive(Serialize)]
struct XyOut<'a> {
    sector: &'a SectorSpec,
    strength: f64,
    xz: &'a [f64],
    yz: &'a [f64],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanOut<'a> {
    sector: &'a SectorSpec,
    count: usize,
    #[serde(flatten)]
    plan: &'a RingPlan,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [pack] [--pretty] [--xy] [--out <path>] [SECTOR OPTIONS] [<config>|-]\n\
  narwhal-cli plan [--pretty] [--out <path>] [SECTOR OPTIONS] [<config>|-]\n\
\n\
SECTOR OPTIONS:\n\
  --inner <r>  --outer <r>  --start <deg>  --end <deg>  --count <n>  --strength <s>\n\
\n\
NOTES:\n\
  - <config> is a JSON5 file: { sector: { innerRadius, outerRadius, startAngleDeg, endAngleDeg }, count, strength }.\n\
  - Use '-' to read the config from stdin. Without a config the demo sector is used.\n\
  - Options override config values.\n\
  - pack prints target points as JSON; --xy prints parallel xz/yz arrays instead.\n\
  - plan prints the ring fit and per-ring slots as JSON.\n\
  - -v enables debug logging; RUST_LOG takes precedence.\n\
"
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>) -> Result<T, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "pack" => args.command = Command::Pack,
            "plan" => args.command = Command::Plan,
            "--pretty" => args.pretty = true,
            "--xy" => args.xy = true,
            "-v" | "--verbose" => args.verbose = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--inner" => args.inner = Some(parse_value(it.next())?),
            "--outer" => args.outer = Some(parse_value(it.next())?),
            "--start" => args.start = Some(parse_value(it.next())?),
            "--end" => args.end = Some(parse_value(it.next())?),
            "--count" => args.count = Some(parse_value(it.next())?),
            "--strength" => args.strength = Some(parse_value(it.next())?),
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_config(input: Option<&str>) -> Result<FileConfig, CliError> {
    let text = match input {
        None => return Ok(FileConfig::default()),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    Ok(json5::from_str(&text)?)
}

fn resolve(args: &Args) -> Result<PackConfig, CliError> {
    let file = read_config(args.input.as_deref())?;
    let [inner, outer] = file.sector.map_or(DEMO_RADII, |s| s.radii());
    let [start, end] = file.sector.map_or(DEMO_ANGLES, |s| s.angles());
    let sector = SectorSpec::new(
        args.inner.unwrap_or(inner),
        args.outer.unwrap_or(outer),
        args.start.unwrap_or(start),
        args.end.unwrap_or(end),
    )?;
    let strength = args.strength.or(file.strength).unwrap_or(DEMO_STRENGTH);
    if !strength.is_finite() {
        return Err(CliError::InvalidStrength(strength));
    }
    Ok(PackConfig {
        sector,
        count: args.count.or(file.count).unwrap_or(DEMO_COUNT),
        strength,
    })
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut writer: Box<dyn Write> = match out {
        None | Some("-") => Box::new(std::io::stdout().lock()),
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = resolve(&args)?;
    log::info!(
        "packing {} points into radii {:?}, angles {:?}",
        config.count,
        config.sector.radii(),
        config.sector.angles()
    );

    match args.command {
        Command::Pack => {
            let points = narwhal::pack(&config.sector, config.count);
            if args.xy {
                let (xz, yz): (Vec<f64>, Vec<f64>) = points.iter().map(|p| (p.x, p.y)).unzip();
                let out = XyOut {
                    sector: &config.sector,
                    strength: config.strength,
                    xz: &xz,
                    yz: &yz,
                };
                write_json(&out, args.pretty, args.out.as_deref())
            } else {
                let out = PackOut {
                    sector: &config.sector,
                    strength: config.strength,
                    points: &points,
                };
                write_json(&out, args.pretty, args.out.as_deref())
            }
        }
        Command::Plan => {
            let plan = narwhal::plan(&config.sector, config.count);
            log::debug!(
                "{} rings, {} arc points, {} leftover",
                plan.rings.len(),
                plan.arc_points(),
                config.count.saturating_sub(plan.arc_points())
            );
            let out = PlanOut {
                sector: &config.sector,
                count: config.count,
                plan: &plan,
            };
            write_json(&out, args.pretty, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
