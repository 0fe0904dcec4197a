//! `et-announce` — posts the time to chat when the clock lands on one of a
//! configured set of times of day.
//!
//! ```rust,ignore
//! let config = AutoTellConfig::from_times(["6:00 AM", "12:00 PM", "6:00 PM"])?;
//! keeper.subscribe(AutoTellTime::new(config, DisplayMode::TwelveHour, chat));
//! ```

pub mod auto_tell;
pub mod error;


pub use auto_tell::{AutoTellConfig, AutoTellTime};
pub use error::{AnnounceError, AnnounceResult};
