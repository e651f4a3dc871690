mod cli;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use log::LevelFilter;
use malbec_um::Paths;

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = make_paths(&cli)?;

    let result = match &cli.command {
        Commands::Vertlevs {
            case,
            level_type,
            nlevs,
            z_top_of_model,
            first_const_r_rho_lev,
            outfile,
        } => command::vertlevs(
            paths,
            command::vertlevs::VertlevsArgs {
                case,
                level_type: *level_type,
                nlevs: *nlevs,
                z_top_of_model: *z_top_of_model,
                first_const_r_rho_lev: *first_const_r_rho_lev,
                outfile: outfile.as_deref(),
            },
        ),
        Commands::Export { case, outdir } => command::export(paths, case, outdir.as_deref()),
        Commands::Patch {
            case,
            dump,
            index,
            field,
        } => command::patch(paths, case, dump, index, field),
        Commands::Fill { case, dump, field } => command::fill(paths, case, dump, field),
        Commands::PsgConfig { config, output } => command::psg_config(config, output),
    };

    match result {
        Ok(filename) => println!("File saved to `{}`", filename),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn make_paths(cli: &Cli) -> Result<Paths> {
    let defaults = Paths::default_for(&std::env::current_dir()?);

    let mut paths = Paths::new(
        cli.const_dir.clone().unwrap_or(defaults.const_dir),
        cli.data_dir.clone().unwrap_or(defaults.data_dir),
    );
    if let Some(dir) = &cli.start_dump_dir {
        paths = paths.with_start_dump_dir(dir);
    }

    Ok(paths)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
