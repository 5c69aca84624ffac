use clap::Parser;
use pitboss::config::Config;
use pitboss::run::Series;

/// Table-stakes orchestration for LLM poker agents.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// roster and table configuration
    #[arg(short, long, default_value = "config.json")]
    config: std::path::PathBuf,
    /// override the configured number of hands
    #[arg(short, long)]
    rounds: Option<u64>,
    /// override the configured deck seed
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pitboss::log();
    let args = Args::parse();
    let mut config = Config::load_or_default(&args.config);
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    log::info!(
        "match: {} hands, blinds {}/{}, {} agents",
        config.rounds,
        config.blinds.0,
        config.blinds.1,
        config.agents.len()
    );
    let report = Series::new(&config)?.run().await?;
    println!("{}", report);
    Ok(())
}
