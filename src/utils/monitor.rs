#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub memory_usage_mb: u64,
    pub stage_time: Duration,
    pub elapsed_time: Duration,
}

/// 每個賽事階段的耗時與記憶體統計
#[cfg(feature = "cli")]
pub struct StageMonitor {
    system: System,
    pid: Option<Pid>,
    start_time: Instant,
    last_mark: Instant,
    peak_memory_mb: u64,
    history: Vec<StageStats>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        // 取不到 PID 時只記錄時間
        let pid = sysinfo::get_current_pid().ok();
        let now = Instant::now();

        Self {
            system: System::new(),
            pid,
            start_time: now,
            last_mark: now,
            peak_memory_mb: 0,
            history: Vec::new(),
            enabled,
        }
    }

    fn current_memory_mb(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        self.system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
            .unwrap_or(0)
    }

    /// 記錄一個階段結束
    pub fn mark(&mut self, stage: &str) {
        if !self.enabled {
            return;
        }

        let memory_mb = self.current_memory_mb();
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let stats = StageStats {
            stage: stage.to_string(),
            memory_usage_mb: memory_mb,
            stage_time: now.duration_since(self.last_mark),
            elapsed_time: now.duration_since(self.start_time),
        };
        self.last_mark = now;

        tracing::info!(
            "📊 {} - Memory: {}MB, Peak: {}MB, Stage: {:?}, Total: {:?}",
            stats.stage,
            stats.memory_usage_mb,
            self.peak_memory_mb,
            stats.stage_time,
            stats.elapsed_time
        );
        self.history.push(stats);
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Stages: {}",
                self.start_time.elapsed(),
                self.peak_memory_mb,
                self.history.len()
            );
        }
    }

    pub fn history(&self) -> &[StageStats] {
        &self.history
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct StageMonitor;

#[cfg(not(feature = "cli"))]
impl StageMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn mark(&mut self, _stage: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
