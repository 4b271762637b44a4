use bracket_sim::utils::{logger, validation::Validate};
use bracket_sim::{render, CliConfig, LocalStorage, ReportFormat, TournamentError, TournamentRunner};
use clap::Parser;

fn exit_with(e: &TournamentError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Simulation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(&config.log_format, config.verbose);

    tracing::info!("Starting bracket-sim");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if config.monitor {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let runner = TournamentRunner::new(storage, config);

    let outcome = match runner.run() {
        Ok(outcome) => outcome,
        Err(e) => exit_with(&e),
    };

    match render(&outcome.report, ReportFormat::Text) {
        Ok(text) => print!("{}", text),
        Err(e) => exit_with(&e),
    }

    for path in &outcome.written_files {
        tracing::info!("📁 Report saved to: {}", path);
    }
    tracing::info!("✅ Tournament simulation completed successfully!");
}
