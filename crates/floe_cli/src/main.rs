use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use floe_core::model::SeaIceModel;
use floe_core::sampling::GridSpec;
use floe_core::{sweep_bifurcation, write_branches, SecantSettings, SweepSettings};

fn grid_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("t-min")
            .long("t-min")
            .default_value("200")
            .value_parser(value_parser!(f64))
            .help("Lower bound of the temperature domain, K"),
    )
    .arg(
        Arg::new("t-max")
            .long("t-max")
            .default_value("370")
            .value_parser(value_parser!(f64))
            .help("Upper bound of the temperature domain, K"),
    )
    .arg(
        Arg::new("samples")
            .long("samples")
            .default_value("170001")
            .value_parser(value_parser!(usize))
            .help("Number of temperature grid points"),
    )
    .arg(
        Arg::new("output")
            .long("output")
            .short('o')
            .required(true)
            .help("Path of the output file"),
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("floe")
        .version("0.1.0")
        .about("Steady states and bifurcation structure of the sea-ice energy balance")
        .subcommand_required(true)
        .subcommand(grid_args(
            Command::new("curve").about("Sample the baseline dT/dt curve to a CSV file"),
        ))
        .subcommand(
            grid_args(
                Command::new("sweep")
                    .about("Sweep the forcing parameter and write the bifurcation dataset"),
            )
            .arg(
                Arg::new("forcing-min")
                    .long("forcing-min")
                    .default_value("-30")
                    .value_parser(value_parser!(f64))
                    .help("Lower bound of the forcing sweep, W m^-2"),
            )
            .arg(
                Arg::new("forcing-max")
                    .long("forcing-max")
                    .default_value("30")
                    .value_parser(value_parser!(f64))
                    .help("Upper bound of the forcing sweep, W m^-2"),
            )
            .arg(
                Arg::new("steps")
                    .long("steps")
                    .default_value("6001")
                    .value_parser(value_parser!(usize))
                    .help("Number of forcing values across the sweep range"),
            )
            .arg(
                Arg::new("tolerance")
                    .long("tolerance")
                    .default_value("1e-9")
                    .value_parser(value_parser!(f64))
                    .help("Residual tolerance of the secant refiner"),
            )
            .arg(
                Arg::new("max-iterations")
                    .long("max-iterations")
                    .default_value("50")
                    .value_parser(value_parser!(usize))
                    .help("Iteration budget of the secant refiner"),
            ),
        );

    match cli.get_matches().subcommand() {
        Some(("curve", args)) => run_curve(args),
        Some(("sweep", args)) => run_sweep(args),
        _ => unreachable!("subcommand is required"),
    }
}

fn grid_from_args(args: &ArgMatches) -> Result<GridSpec> {
    GridSpec::new(
        *args.get_one::<f64>("t-min").unwrap(),
        *args.get_one::<f64>("t-max").unwrap(),
        *args.get_one::<usize>("samples").unwrap(),
    )
}

fn run_curve(args: &ArgMatches) -> Result<()> {
    let grid = grid_from_args(args)?;
    let path = args.get_one::<String>("output").unwrap();

    let model = SeaIceModel::default();
    let sample = grid.sample(&model, 0.0)?;

    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
    let mut writer = BufWriter::new(file);
    for (i, value) in sample.values.iter().enumerate() {
        writeln!(writer, "{},{}", grid.coord(i), value)?;
    }
    writer.flush()?;

    info!(path = %path, samples = sample.values.len(), "baseline curve written");
    Ok(())
}

fn run_sweep(args: &ArgMatches) -> Result<()> {
    let grid = grid_from_args(args)?;
    let path = args.get_one::<String>("output").unwrap();
    let settings = SweepSettings {
        forcing_min: *args.get_one::<f64>("forcing-min").unwrap(),
        forcing_max: *args.get_one::<f64>("forcing-max").unwrap(),
        steps: *args.get_one::<usize>("steps").unwrap(),
        secant: SecantSettings {
            tolerance: *args.get_one::<f64>("tolerance").unwrap(),
            max_iterations: *args.get_one::<usize>("max-iterations").unwrap(),
        },
    };

    let model = SeaIceModel::default();
    info!(
        forcing_min = settings.forcing_min,
        forcing_max = settings.forcing_max,
        steps = settings.steps,
        "starting bifurcation sweep"
    );
    let dataset = sweep_bifurcation(&model, grid, settings)?;

    let total: usize = dataset.branches.iter().map(|b| b.len()).sum();
    info!(
        branches = dataset.branches.len(),
        boundaries = dataset.boundaries.len(),
        roots = total,
        "sweep complete"
    );

    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
    let mut writer = BufWriter::new(file);
    write_branches(&mut writer, &dataset)?;
    writer.flush()?;

    info!(path = %path, "bifurcation dataset written");
    Ok(())
}
