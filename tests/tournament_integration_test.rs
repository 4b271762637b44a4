use anyhow::Result;
use bracket_sim::core::group_stage::simulate_group_stage;
use bracket_sim::core::pots::Pots;
use bracket_sim::core::standings::calculate_standings;
use bracket_sim::utils::error::KnockoutStage;
use bracket_sim::utils::validation::Validate;
use bracket_sim::{
    CliConfig, LocalStorage, Roster, RngSource, TomlConfig, TournamentEngine, TournamentError,
    TournamentRunner,
};
use std::collections::HashSet;
use tempfile::TempDir;

const OLYMPIC_GROUPS: &str = r#"{
    "A": [
        {"Team": "Canada", "ISOCode": "CAN", "FIBARanking": 7},
        {"Team": "Australia", "ISOCode": "AUS", "FIBARanking": 5},
        {"Team": "Greece", "ISOCode": "GRE", "FIBARanking": 14},
        {"Team": "Spain", "ISOCode": "ESP", "FIBARanking": 2}
    ],
    "B": [
        {"Team": "Germany", "ISOCode": "GER", "FIBARanking": 3},
        {"Team": "France", "ISOCode": "FRA", "FIBARanking": 9},
        {"Team": "Brazil", "ISOCode": "BRA", "FIBARanking": 12},
        {"Team": "Japan", "ISOCode": "JPN", "FIBARanking": 26}
    ],
    "C": [
        {"Team": "United States", "ISOCode": "USA", "FIBARanking": 1},
        {"Team": "Serbia", "ISOCode": "SRB", "FIBARanking": 4},
        {"Team": "South Sudan", "ISOCode": "SSD", "FIBARanking": 34},
        {"Team": "Puerto Rico", "ISOCode": "PRI", "FIBARanking": 16}
    ],
    "D": [
        {"Team": "Lithuania", "ISOCode": "LTU", "FIBARanking": 8},
        {"Team": "Slovenia", "ISOCode": "SLO", "FIBARanking": 6},
        {"Team": "Italy", "ISOCode": "ITA", "FIBARanking": 10},
        {"Team": "Latvia", "ISOCode": "LAT", "FIBARanking": 11}
    ]
}"#;

fn olympic_roster() -> Roster {
    Roster::from_json_str(OLYMPIC_GROUPS).unwrap()
}

#[test]
fn test_four_groups_of_four_end_to_end() -> Result<()> {
    let roster = olympic_roster();
    let report = TournamentEngine::new(RngSource::seeded(2024)).run(&roster)?;

    assert_eq!(report.group_results.len(), 4);
    assert!(report.group_results.values().all(|r| r.len() == 6));
    assert_eq!(report.group_match_count(), 24);

    assert_eq!(report.pots.len(), 4);
    assert!(report.pots.iter().all(|pot| pot.teams.len() == 4));

    // 1st x 4th 與 2nd x 3rd 各 4 組
    assert_eq!(report.quarter_final_pairings.len(), 8);
    assert_eq!(report.quarter_finals.results.len(), 8);
    assert_eq!(report.semi_finals.results.len(), 2);

    // 四強只取八強前四位勝者：w1 v w2、w3 v w4
    let winners: Vec<&str> = report.quarter_finals.winners.iter().map(|t| t.name.as_str()).collect();
    let semi_final_teams: Vec<&str> = report
        .semi_finals
        .results
        .iter()
        .flat_map(|r| [r.team_a.as_str(), r.team_b.as_str()])
        .collect();
    assert_eq!(semi_final_teams, winners[..4].to_vec());
    assert_eq!(report.final_match.results.len(), 1);
    assert_eq!(report.third_place.results.len(), 1);

    let gold = report.medals.gold.as_ref().expect("gold awarded");
    let silver = report.medals.silver.as_ref().expect("silver awarded");
    let bronze = report.medals.bronze.as_ref().expect("bronze awarded");
    let medalists: HashSet<&str> = [&gold.name, &silver.name, &bronze.name]
        .into_iter()
        .map(String::as_str)
        .collect();
    assert_eq!(medalists.len(), 3);

    // 決賽雙方就是金銀牌
    let final_record = &report.final_match.results[0];
    assert_eq!(final_record.winner, gold.name);
    assert!([&final_record.team_a, &final_record.team_b].contains(&&silver.name));
    Ok(())
}

#[test]
fn test_pairings_cross_groups_when_possible() -> Result<()> {
    let report = TournamentEngine::new(RngSource::seeded(8)).run(&olympic_roster())?;

    // 每組四隊時永遠找得到不同組的對手
    for pairing in &report.quarter_final_pairings {
        assert!(!pairing.is_same_group(), "same-group pairing: {:?}", pairing);
    }
    Ok(())
}

#[test]
fn test_group_points_add_up() -> Result<()> {
    let roster = olympic_roster();
    let mut rng = RngSource::seeded(3);
    let outcome = simulate_group_stage(&roster, &mut rng)?;
    let standings = calculate_standings(&roster.groups, &outcome.points);

    for entries in standings.values() {
        let total: u32 = entries.iter().map(|e| e.points).sum();
        assert_eq!(total, 3 * 6);
        assert!(entries.windows(2).all(|w| w[0].points >= w[1].points));
        // 每隊三場：最少 3 分、最多 6 分
        assert!(entries.iter().all(|e| (3..=6).contains(&e.points)));
    }
    Ok(())
}

#[test]
fn test_three_team_group_leaves_fourth_pot_short() -> Result<()> {
    let json = r#"{
        "A": [
            {"Team": "A1", "FIBARanking": 1}, {"Team": "A2", "FIBARanking": 2},
            {"Team": "A3", "FIBARanking": 3}, {"Team": "A4", "FIBARanking": 4}
        ],
        "B": [
            {"Team": "B1", "FIBARanking": 5}, {"Team": "B2", "FIBARanking": 6},
            {"Team": "B3", "FIBARanking": 7}, {"Team": "B4", "FIBARanking": 8}
        ],
        "C": [
            {"Team": "C1", "FIBARanking": 9}, {"Team": "C2", "FIBARanking": 10},
            {"Team": "C3", "FIBARanking": 11}
        ]
    }"#;
    let roster = Roster::from_json_str(json)?;

    let mut rng = RngSource::seeded(12);
    let outcome = simulate_group_stage(&roster, &mut rng)?;
    let pots = Pots::from_standings(&calculate_standings(&roster.groups, &outcome.points));
    assert_eq!(pots.first.len(), 3);
    assert_eq!(pots.fourth.len(), 2);
    assert!(pots.fourth.teams.iter().all(|t| t.group != "C"));

    let report = TournamentEngine::new(RngSource::seeded(12)).run(&roster)?;
    assert_eq!(report.group_results["C"].len(), 3);
    // 2 (1st vs 4th) + 3 (2nd vs 3rd)
    assert_eq!(report.quarter_final_pairings.len(), 5);
    assert!(report.medals.gold.is_some());
    assert!(report.medals.bronze.is_some());
    Ok(())
}

#[test]
fn test_insufficient_qualifiers_halts_before_knockout() {
    let json = r#"{
        "A": [{"Team": "A1", "FIBARanking": 1}, {"Team": "A2", "FIBARanking": 2}, {"Team": "A3", "FIBARanking": 3}],
        "B": [{"Team": "B1", "FIBARanking": 4}, {"Team": "B2", "FIBARanking": 5}, {"Team": "B3", "FIBARanking": 6}]
    }"#;
    let roster = Roster::from_json_str(json).unwrap();

    let result = TournamentEngine::new(RngSource::seeded(1)).run(&roster);

    match result {
        Err(err @ TournamentError::InsufficientQualifiers { .. }) => {
            assert_eq!(err.exit_code(), 2);
            if let TournamentError::InsufficientQualifiers { stage, found, .. } = err {
                assert_eq!(stage, KnockoutStage::QuarterFinal);
                assert_eq!(found, 2);
            }
        }
        other => panic!("expected InsufficientQualifiers, got {:?}", other.map(|r| r.medals)),
    }
}

#[test]
fn test_missing_ranking_propagates_with_team_names() {
    let json = r#"{
        "A": [
            {"Team": "Canada", "FIBARanking": 7},
            {"Team": "Mystery"},
            {"Team": "Spain", "FIBARanking": 2}
        ]
    }"#;
    let roster = Roster::from_json_str(json).unwrap();

    let err = TournamentEngine::new(RngSource::seeded(1))
        .run(&roster)
        .unwrap_err();

    match &err {
        TournamentError::MissingRanking {
            team_a,
            team_b,
            missing,
        } => {
            assert_eq!(team_a, "Canada");
            assert_eq!(team_b, "Mystery");
            assert_eq!(missing, &vec!["Mystery".to_string()]);
        }
        other => panic!("expected MissingRanking, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_cli_run_writes_reports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let roster_path = temp_dir.path().join("groups.json");
    std::fs::write(&roster_path, OLYMPIC_GROUPS)?;
    let output_path = temp_dir.path().join("out");

    let config = CliConfig {
        roster: roster_path.to_string_lossy().into_owned(),
        output_path: output_path.to_string_lossy().into_owned(),
        output_formats: vec!["text".to_string(), "json".to_string(), "csv".to_string()],
        seed: Some(5),
        verbose: false,
        monitor: true,
        log_format: "text".to_string(),
    };
    assert!(config.validate().is_ok());

    let storage = LocalStorage::new(config.output_path.clone());
    let outcome = TournamentRunner::new(storage, config).run()?;

    assert_eq!(outcome.written_files.len(), 3);
    let text = std::fs::read_to_string(output_path.join("report.txt"))?;
    assert!(text.contains("Medal Winners:"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path.join("report.json"))?)?;
    assert_eq!(json["group_results"]["A"].as_array().map(Vec::len), Some(6));

    let csv = std::fs::read_to_string(output_path.join("matches.csv"))?;
    assert_eq!(csv.lines().count(), 1 + 24 + 8 + 2 + 1 + 1);
    Ok(())
}

#[test]
fn test_toml_configured_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let roster_path = temp_dir.path().join("groups.json");
    std::fs::write(&roster_path, OLYMPIC_GROUPS)?;
    let output_path = temp_dir.path().join("toml-out");

    let toml_content = format!(
        r#"
[simulation]
name = "olympics"
seed = 99

[roster]
path = "{}"

[output]
path = "{}"
formats = ["csv"]

[output.filenames]
csv = "olympics.csv"
"#,
        roster_path.to_string_lossy().replace('\\', "/"),
        output_path.to_string_lossy().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml_content)?;
    assert!(config.validate().is_ok());

    let storage = LocalStorage::new(config.output.path.clone());
    let runner = TournamentRunner::new(storage, config);
    let first = runner.run()?;
    let second = runner.run()?;

    assert!(output_path.join("olympics.csv").exists());
    assert_eq!(first.report.medals, second.report.medals);
    Ok(())
}
