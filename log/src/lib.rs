// Copyright (c) 2023-2024, The Seglog Developers
// Some code and concepts from:
// * BitcoinMW: https://github.com/bitcoinmw/bitcoinmw
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Logging crate used by applications embedding seglog. Records are logged at the standard
//! 6 levels through a [`crate::Logger`] handle, which drops records below the configured
//! minimum level or from callers rejected by the whitelist/blacklist, formats what remains
//! as one line, and appends it to standard output or to a [`crate::RotatingFile`].
//!
//! A rotating file is sealed at every local midnight and whenever it grows beyond the
//! configured size. Sealed files (archives) are renamed to `<path>.<YYYY-MM-DD>.<NN>`, can be
//! compressed to a single entry zip file, and are purged by age and count on a background
//! thread so logging never waits for that work. Failures that can't be returned to the
//! caller of a log statement are sent to a [`crate::Report`] implementation, standard error
//! by default.
//!
//! # Examples
//!
//!```
//! use seglog_err::*;
//! use seglog_log::*;
//!
//! fn main() -> Result<(), Error> {
//!     let log = logger!(MinimumLevel(3), IncludeLocation(true))?;
//!
//!     let abc = 123;
//!     info!(log, "v1={},v2={}", abc, "def"); // will show up
//!     debug!(log, "test"); // will not show up
//!     fatal!(log, "always shown unless filtered");
//!
//!     Ok(())
//! }
//!```
//!
//! The output will look something like this:
//!
//! ```text
//! 2024/04/14 17:45:46 lib.rs:25: I: v1=123,v2=def
//! 2024/04/14 17:45:46 lib.rs:27: F: always shown unless filtered
//! ```
//!
//! Logging to a file:
//!
//!```
//! use seglog_err::*;
//! use seglog_log::*;
//!
//! fn main() -> Result<(), Error> {
//!     let dir = std::env::temp_dir().join("seglog_doc_example");
//!     let log = LogBuilder::build_log(LogConfig {
//!         log_path: dir.join("app.log").display().to_string(),
//!         rotation_size_kb: 1024, // seal the active file after 1 MB
//!         max_age_days: 3, // purge archives older than 3 days (plus 2 days of slack)
//!         max_archive_count: 10, // keep at most 10 archives
//!         compress_on_rotate: true, // zip each archive
//!         ..Default::default()
//!     })?;
//!
//!     warn!(log, "disk usage at {}%", 91);
//!
//!     // the level may be changed later. The path can't be.
//!     log.reconfigure(&LogConfig {
//!         log_path: dir.join("app.log").display().to_string(),
//!         minimum_level: LogLevel::Debug,
//!         ..Default::default()
//!     })?;
//!
//!     log.close()?;
//!     std::fs::remove_dir_all(dir)?;
//!     Ok(())
//! }
//!```

mod archive;
mod clock;
mod config;
mod constants;
mod housekeeper;
mod level;
mod log;
mod macros;
mod purge;
mod report;
mod rotate;
mod sink;
mod types;

#[cfg(test)]
mod test_rotate;

pub use crate::types::{
	Archiver, Clock, ConsoleSink, FilterMode, FilterSet, LevelConfig, Location, LogBuilder,
	LogConfig, LogLevel, Logger, ManualClock, PurgeSummary, Report, ReportCollector,
	RetentionPurger, RotatingFile, RotationPolicy, RotationReason, RotationStatus, Sink,
	StderrReporter, SystemClock,
};
pub use seglog_conf::{ConfigOption, ConfigOptionName};
