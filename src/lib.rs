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


//! # Seglog
//!
//! <p align="center"> Leveled logging with self-managing log files.</p>
//!
//! Seglog is a logging library embedded in the process that uses it. Records are logged at
//! the standard 6 levels (fatal, error, warn, info, debug and trace) and gated by a minimum
//! level plus an optional per-caller whitelist or blacklist. Records that pass are written
//! to standard output or to a log file that manages itself:
//!
//! * the active file is sealed at every local midnight and whenever it grows past the
//!   configured size, and renamed to `<path>.<YYYY-MM-DD>.<NN>`.
//! * sealed files can be compressed to zip files on a background thread.
//! * sealed files older than the configured age, or beyond the configured count, are purged
//!   on the same background thread.
//!
//! The crates of this workspace are re-exported here:
//!
//! * [`seglog_err`] - the error type shared by every crate.
//! * [`seglog_conf`] - the option list used to configure a logger.
//! * [`seglog_log`] - the logger, its sinks and the rotation machinery.
//!
//! # Examples
//!
//!```
//! use seglog::*;
//!
//! fn main() -> Result<(), Error> {
//!     let dir = std::env::temp_dir().join("seglog_root_example");
//!     let path = dir.join("app.log").display().to_string();
//!     let log = logger!(
//!         LogFilePath(path),
//!         MinimumLevel(4), // debug
//!         IncludeCallerSuffix(true),
//!         RotationSizeKb(10 * 1024), // seal after 10 MB
//!         MaxArchiveCount(20),
//!         CompressOnRotate(true)
//!     )?;
//!
//!     info!(log, "started with pid {}", std::process::id());
//!     debug!(log, caller: "net::peer"; "connecting to {}", "127.0.0.1:8080");
//!
//!     log.close()?;
//!     std::fs::remove_dir_all(dir)?;
//!     Ok(())
//! }
//!```

pub use seglog_conf::*;
pub use seglog_err::*;
pub use seglog_log::*;
