use crate::app::report::{render, ReportFormat};
use crate::config::roster::JsonFileRoster;
use crate::core::engine::TournamentEngine;
use crate::core::random::RngSource;
use crate::core::{ConfigProvider, RandomSource, Roster, RosterSource, Storage, TournamentReport};
use crate::utils::error::Result;

#[derive(Debug)]
pub struct RunOutcome {
    pub report: TournamentReport,
    pub written_files: Vec<String>,
}

/// 名單 -> 模擬 -> 報表輸出
pub struct TournamentRunner<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> TournamentRunner<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn load_roster(&self) -> Result<Roster> {
        JsonFileRoster::new(self.config.roster_path()).load_roster()
    }

    pub fn run(&self) -> Result<RunOutcome> {
        let roster = self.load_roster()?;
        self.run_with_roster(&roster)
    }

    /// 有設定 seed 時使用可重現的亂數來源
    pub fn run_with_roster(&self, roster: &Roster) -> Result<RunOutcome> {
        match self.config.seed() {
            Some(seed) => {
                tracing::info!("🎲 Using seed {}", seed);
                self.run_with_source(roster, RngSource::seeded(seed))
            }
            None => self.run_with_source(roster, RngSource::thread_local()),
        }
    }

    pub fn run_with_source<R: RandomSource>(&self, roster: &Roster, rng: R) -> Result<RunOutcome> {
        let mut engine = TournamentEngine::new_with_monitoring(rng, self.config.monitoring_enabled());
        let report = engine.run(roster)?;
        let written_files = self.write_reports(&report)?;

        Ok(RunOutcome {
            report,
            written_files,
        })
    }

    fn write_reports(&self, report: &TournamentReport) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(self.config.output_formats().len());

        for format_name in self.config.output_formats() {
            let format: ReportFormat = format_name.parse()?;
            let content = render(report, format)?;
            let filename = self.config.filename_for(format.name());

            tracing::debug!("Writing {} report ({} bytes) to {}", format.name(), content.len(), filename);
            written.push(self.storage.write_file(&filename, content.as_bytes())?);
        }

        Ok(written)
    }
}
