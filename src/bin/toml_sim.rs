use bracket_sim::config::toml_config::TomlConfig;
use bracket_sim::core::ConfigProvider;
use bracket_sim::utils::{logger, validation::Validate};
use bracket_sim::{render, LocalStorage, ReportFormat, Roster, TournamentError, TournamentRunner};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-sim")]
#[command(about = "Tournament simulator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tournament.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - show the configuration and roster without simulating
    #[arg(long)]
    dry_run: bool,
}

fn exit_with(e: &TournamentError) -> ! {
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
    let args = Args::parse();

    // 載入 TOML 配置（日誌格式由配置決定，先載入再初始化）
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_format().unwrap_or("text"), args.verbose);
    tracing::info!("🚀 Starting TOML-based tournament simulator");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }
    if let Some(monitor) = args.monitor {
        let monitoring = config
            .monitoring
            .get_or_insert(bracket_sim::config::toml_config::MonitoringConfig {
                enabled: monitor,
                log_format: None,
            });
        monitoring.enabled = monitor;
        tracing::info!("🔧 Monitoring overridden to: {}", monitor);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let storage = LocalStorage::new(config.output_path().to_string());
    let runner = TournamentRunner::new(storage, config);
    display_config_summary(runner.config(), &args);

    let roster = match runner.load_roster() {
        Ok(roster) => roster,
        Err(e) => exit_with(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No matches will be simulated");
        perform_dry_run(&roster);
        return;
    }

    let outcome = match runner.run_with_roster(&roster) {
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Simulation: {}", config.simulation.name);
    if let Some(description) = &config.simulation.description {
        println!("  Description: {}", description);
    }
    println!("  Roster: {}", config.roster_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));

    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(roster: &Roster) {
    println!("🔍 Dry Run Analysis:");
    println!();

    let mut expected_group_matches = 0;
    for (group_name, teams) in &roster.groups {
        let n = teams.len();
        expected_group_matches += n * n.saturating_sub(1) / 2;

        println!("  Group {} ({} teams):", group_name, n);
        for team in teams {
            let ranking = team
                .ranking
                .map(|r| r.to_string())
                .unwrap_or_else(|| "⚠️ missing".to_string());
            println!("    {} (ranking {})", team.name, ranking);
        }
    }

    // 依分組大小預估籤筒數量
    let pot_sizes: Vec<usize> = (0..4)
        .map(|position| roster.groups.values().filter(|teams| teams.len() > position).count())
        .collect();
    let quarter_final_pairs =
        pot_sizes[0].min(pot_sizes[3]) + pot_sizes[1].min(pot_sizes[2]);

    println!();
    println!("⚙️ Expected Structure:");
    println!("  Group matches: {}", expected_group_matches);
    println!(
        "  Pots: {} / {} / {} / {}",
        pot_sizes[0], pot_sizes[1], pot_sizes[2], pot_sizes[3]
    );
    println!("  Quarter-final pairs: {}", quarter_final_pairs);

    if quarter_final_pairs < 4 {
        println!("  ⚠️ Not enough teams for the quarter-finals (need 4 pairs)");
    }

    println!();
    println!("✅ Dry run analysis complete.");
}
