//! Shared domain logic for the wish-series demos
//!
//! Every iteration window uses the same three pieces: the character roster
//! (three wishes, one-way fulfilled flags), the hold-to-activate engine
//! behind the press-and-hold iterations, and TOML settings persistence.

pub mod config;
pub mod hold_engine;
pub mod roster;

pub use config::{config_dir, config_path, delete_config, load_config, save_config, ConfigError};
pub use hold_engine::{HoldEngine, HoldEvent, COMPLETION_TICKS, TICK_PERIOD};
pub use roster::{Character, CharacterId, Roster};
