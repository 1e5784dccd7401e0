use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::game::{Score, Winner};

/// Round clock plus running tallies across the rounds of one session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub user_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub best_user_score: u32,
    pub best_ai_score: u32,
}

/// Serializable end-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub rounds: u32,
    pub user_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub best_user_score: u32,
    pub best_ai_score: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            user_wins: 0,
            ai_wins: 0,
            draws: 0,
            best_user_score: 0,
            best_ai_score: 0,
        }
    }

    /// Refresh the cached elapsed time from the wall clock
    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, winner: Winner, score: Score) {
        self.rounds_played += 1;
        match winner {
            Winner::User => self.user_wins += 1,
            Winner::Ai => self.ai_wins += 1,
            Winner::Draw => self.draws += 1,
        }
        self.best_user_score = self.best_user_score.max(score.user);
        self.best_ai_score = self.best_ai_score.max(score.ai);
    }

    /// Countdown for the HUD, saturating at zero
    pub fn time_left(&self, round_duration: Duration) -> Duration {
        round_duration.saturating_sub(self.elapsed_time)
    }

    pub fn format_time(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            rounds: self.rounds_played,
            user_wins: self.user_wins,
            ai_wins: self.ai_wins,
            draws: self.draws,
            best_user_score: self.best_user_score,
            best_ai_score: self.best_ai_score,
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Rounds: {} | User wins: {} | AI wins: {} | Draws: {} | Best scores: user {}, AI {}",
            self.rounds_played,
            self.user_wins,
            self.ai_wins,
            self.draws,
            self.best_user_score,
            self.best_ai_score
        )
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(GameMetrics::format_time(Duration::from_secs(125)), "02:05");
        assert_eq!(GameMetrics::format_time(Duration::ZERO), "00:00");
        assert_eq!(GameMetrics::format_time(Duration::from_millis(59_900)), "00:59");
    }

    #[test]
    fn test_time_left_saturates() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(45);
        assert_eq!(metrics.time_left(Duration::from_secs(60)), Duration::from_secs(15));

        metrics.elapsed_time = Duration::from_secs(75);
        assert_eq!(metrics.time_left(Duration::from_secs(60)), Duration::ZERO);
    }

    #[test]
    fn test_round_tallies() {
        let mut metrics = GameMetrics::new();

        metrics.on_round_over(Winner::User, Score::new(4, 2));
        metrics.on_round_over(Winner::Ai, Score::new(1, 6));
        metrics.on_round_over(Winner::Draw, Score::new(3, 3));

        let summary = metrics.summary();
        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.user_wins, 1);
        assert_eq!(summary.ai_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.best_user_score, 4);
        assert_eq!(summary.best_ai_score, 6);
        assert!(metrics.format_summary().starts_with("Rounds: 3"));
    }

    #[test]
    fn test_round_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_round_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_summary_serializes() {
        let mut metrics = GameMetrics::new();
        metrics.on_round_over(Winner::User, Score::new(2, 1));

        let json = serde_json::to_string(&metrics.summary()).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics.summary());
        assert!(json.contains("\"user_wins\":1"));
    }
}
