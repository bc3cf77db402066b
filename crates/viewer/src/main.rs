use clap::Parser;

use viewer::cli::Cli;
use viewer::runtime::{boot, input, run};

fn main() -> anyhow::Result<()> {
    boot::init_logging();

    let cli = Cli::parse();
    let config = boot::load_config(&cli)?;
    let text = input::read_input(cli.input_path())?;

    let mode = run::RunMode {
        categories: cli.categories,
        stats: cli.stats,
    };
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    run::run(&text, &config, &cli.query(&config), mode, &mut out)?;

    std::io::Write::flush(&mut out)?;
    Ok(())
}
