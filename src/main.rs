use clap::Parser;
use live_scoreboard::utils::error::ErrorSeverity;
use live_scoreboard::utils::{logger, validation::Validate};
use live_scoreboard::{
    CliConfig, InMemoryStorage, Match, OutputFormat, ScenarioConfig, ScoreBoard, ScoreBoardError,
    WorldCupScoreBoard,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Loading scenario from: {}", config.scenario);
    tracing::debug!("CLI config: {:?}", config);

    let scenario = match ScenarioConfig::from_file(&config.scenario).and_then(|s| {
        s.validate()?;
        Ok(s)
    }) {
        Ok(scenario) => scenario,
        Err(e) => exit_with(e),
    };

    if config.dry_run {
        println!(
            "Scenario '{}' is valid: {} match(es)",
            scenario.board.name,
            scenario.matches.len()
        );
        return Ok(());
    }

    let store = Arc::new(InMemoryStorage::new());
    let board = WorldCupScoreBoard::new(Arc::clone(&store));

    if let Err(e) = scenario.replay(&board) {
        exit_with(e);
    }

    let summary = board.summary();
    tracing::info!(
        "{} match(es) tracked, {} in progress",
        store.len(),
        summary.len()
    );

    match config.format {
        OutputFormat::Text => print_summary(&scenario.board.name, &summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn print_summary(title: &str, summary: &[Match]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len().max(36)));
    if summary.is_empty() {
        println!("No matches in progress");
        return;
    }
    for (position, m) in summary.iter().enumerate() {
        println!(
            "{}. {:<10} - {:<10} {:>3} - {:<3}",
            position + 1,
            m.home_team(),
            m.away_team(),
            m.score().home,
            m.score().away
        );
    }
}

fn exit_with(e: ScoreBoardError) -> ! {
    tracing::error!(
        "Scenario failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
