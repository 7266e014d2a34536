// src/bin/cli.rs
use color_eyre::eyre::{Result, bail};
use umpd_scrape::{cli, log};

fn main() -> Result<()> {
    color_eyre::install()?;

    let inv = match cli::parse_args(std::env::args().skip(1))? {
        cli::Command::Help => {
            eprintln!("{}", cli::HELP);
            return Ok(());
        }
        cli::Command::Run(inv) => inv,
    };

    log::init(Some(&inv.opts.log_path()));

    let failed = cli::run(&inv)?;
    if failed > 0 {
        bail!("{failed} dataset(s) failed");
    }
    Ok(())
}
