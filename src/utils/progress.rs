/// 固定間隔回報掃描進度
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    label: &'static str,
    total: usize,
    interval: usize,
    done: usize,
}

impl ProgressReporter {
    pub fn new(label: &'static str, total: usize, interval: usize) -> Self {
        Self {
            label,
            total,
            interval: interval.max(1),
            done: 0,
        }
    }

    /// 前進一步，到達間隔時輸出進度。回傳是否有輸出。
    pub fn tick(&mut self) -> bool {
        self.done += 1;
        if self.done % self.interval == 0 {
            tracing::info!("⏳ Progress: {}/{} {} checked", self.done, self.total, self.label);
            true
        } else {
            false
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }
}
