//! Orchestration core for repeated rounds of no-limit hold'em between
//! autonomous agents whose moves come from external decision providers.
//!
//! The rules engine is a collaborator behind the [table::Table] contract;
//! providers are collaborators behind [providers::Provider]. Everything in
//! between — seat rotation, state projection, the move-token grammar,
//! response interpretation with fold fallback, bounded per-agent memory,
//! and the round/match drivers — lives here.
//!
//! ## Modules
//!
//! - [`cards`] — card primitives, decks, streets, hand strength
//! - [`table`] — the rules-engine contract and the default hold'em engine
//! - [`play`] — rotation mapping, token grammar, projection, interpretation
//! - [`players`] — persistent agents and their bounded memory
//! - [`providers`] — decision-provider clients and scripted doubles
//! - [`run`] — round and match orchestrators, records, reporting
pub mod cards;
pub mod config;
pub mod play;
pub mod players;
pub mod providers;
pub mod run;
pub mod table;

/// Stack sizes, bets, and pot totals.
pub type Chips = u32;
/// Seat index around the table (0 = button).
pub type Position = usize;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
