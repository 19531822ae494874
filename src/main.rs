use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use ndarray_explorer::{explorer, ExplorerConfig};
use std::io::{self, Write};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("ndarray-explorer")
        .version(clap::crate_version!())
        .about("Walks through ndarray creation, math, reshaping, file I/O and performance")
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Directory receiving the sample files [default: current directory]")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("size")
                .short('n')
                .long("size")
                .help("Number of elements in the performance comparison [default: 1,000,000]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for the random arrays. Defaults to a seed from the OS.")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("compress")
                .short('z')
                .long("compress")
                .help("Write the .npz archive with deflate compression")
                .action(ArgAction::SetTrue),
        )
}

fn config_from(matches: &ArgMatches) -> ExplorerConfig {
    let defaults = ExplorerConfig::default();
    ExplorerConfig {
        output_dir: matches
            .get_one::<PathBuf>("output_dir")
            .cloned()
            .unwrap_or(defaults.output_dir),
        perf_size: matches
            .get_one::<usize>("size")
            .copied()
            .unwrap_or(defaults.perf_size),
        seed: matches.get_one::<u64>("seed").copied(),
        compress: matches.get_flag("compress"),
    }
}

fn run<W: Write>(config: &ExplorerConfig, out: &mut W) -> Result<Vec<PathBuf>> {
    explorer::run(config, out).context("explorer run failed")
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("EXPLORER_LOG", "warn"))
        .init();

    let config = config_from(&cli().get_matches());
    log::debug!("configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let files = run(&config, &mut out)?;
    out.flush()?;
    log::info!("wrote {} files", files.len());
    Ok(())
}
