use crate::engines::generation::stats::GenerationStats;
use crate::types::Outcome;
use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats, landed: usize);
    fn on_lander_evaluated(&mut self, lander_num: usize, total: usize, outcome: Outcome);
}

/// Reports progress through the `log` facade
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats, landed: usize) {
        log::info!(
            "Generation {} complete. Best fitness: {:.4}, average: {:.4}, landed: {}",
            stats.generation + 1,
            stats.best_fitness,
            stats.average_fitness,
            landed
        );
    }

    fn on_lander_evaluated(&mut self, lander_num: usize, total: usize, outcome: Outcome) {
        if outcome == Outcome::Landed {
            log::info!("  Lander {}/{} touched down", lander_num, total);
        }
    }
}

// For a render thread polling a channel
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { stats: GenerationStats, landed: usize },
    LanderEvaluated { current: usize, total: usize, outcome: Outcome },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats, landed: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            stats: *stats,
            landed,
        });
    }

    fn on_lander_evaluated(&mut self, lander_num: usize, total: usize, outcome: Outcome) {
        let _ = self.sender.send(ProgressMessage::LanderEvaluated {
            current: lander_num,
            total,
            outcome,
        });
    }
}
