pub mod headless;
pub mod human;

pub use headless::{HeadlessConfig, HeadlessMode};
pub use human::HumanMode;
