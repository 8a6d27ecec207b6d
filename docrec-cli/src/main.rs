use clap::Parser;
use docrec_cli::Cli;

fn main() -> anyhow::Result<()> {
    docrec_cli::init_logging();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    docrec_cli::run(&cli, &mut stdout.lock())
}
