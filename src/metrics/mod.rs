pub mod game_metrics;

pub use game_metrics::{GameMetrics, SessionSummary};
