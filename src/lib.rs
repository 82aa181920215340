#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod engine;
pub mod player;
#[cfg(feature = "std")]
pub mod codec;
#[cfg(feature = "std")]
pub mod events;
#[cfg(feature = "std")]
pub mod history;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod runner;
#[cfg(feature = "std")]
pub mod scheduler;

pub use crate::engine::*;
pub use player::*;
#[cfg(feature = "std")]
pub use codec::{decode_snapshot, encode_snapshot};
#[cfg(feature = "std")]
pub use events::{ChannelPresenter, GameOverEvent, LogPresenter, MatchEvent, Presenter, ShotEvent};
#[cfg(feature = "std")]
pub use history::{MatchRecord, MatchRecorder, PlayerStats, RecentMatches};
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
#[cfg(feature = "std")]
pub use runner::{MatchConfig, MatchRunner, RunOutcome};
#[cfg(feature = "std")]
pub use scheduler::{CancelToken, TurnScheduler};
