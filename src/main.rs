use clap::Parser;
use di_parser::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = run(cli);
    if let Err(e) = &result {
        log::error!("di-parser exited with error: {:#}", e);
    }
    result
}
