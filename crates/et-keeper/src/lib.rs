//! `et-keeper` — the elapsed-time accumulator.
//!
//! # Flow
//!
//! ```text
//! caller ─ increment / set ─▶ TimeKeeper
//!                               ① permission gate    (PermissionOracle)
//!                               ② read-modify-write  (CounterStore)
//!                               ③ factor old & new   (et_core::FactoredTime)
//!                               ④ fan-out            (EventBus → TimeObserver*)
//! ```
//!
//! A permission refusal and a no-op change are ordinary results
//! ([`TimeUpdate::Denied`], [`TimeUpdate::Unchanged`]), not errors.  The only
//! error a mutating call can return is a counter-store failure, in which
//! case nothing was persisted and no observer ran.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use et_core::TimeDelta;
//! use et_keeper::{MemoryStore, Role, TimeKeeperBuilder};
//!
//! let mut keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
//!     .observer_fn(|e| println!("{} -> {}", e.old_time, e.new_time))
//!     .build()?;
//! keeper.increment(TimeDelta::hours(6.0))?;
//! ```

pub mod builder;
pub mod bus;
pub mod collab;
pub mod config;
pub mod error;
pub mod event;
pub mod keeper;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::TimeKeeperBuilder;
pub use bus::{EventBus, ObserverId};
pub use collab::{ChatSink, CollaboratorError, CounterStore, MemoryStore, PermissionOracle, Role};
pub use config::KeeperConfig;
pub use error::{KeeperError, KeeperResult};
pub use event::{TimeChangeEvent, TimeUpdate};
pub use keeper::{SharedTimeKeeper, TOTAL_ELAPSED_MINUTES_KEY, TimeKeeper};
pub use observer::{FnObserver, NoopObserver, TimeObserver};
