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


use seglog_deps::arc_swap::ArcSwap;
use seglog_deps::chrono::{DateTime, Local};
use seglog_err::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;

/// Standard 6 log levels. The numeric value orders severity: lower is more severe.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Debug)]
pub enum LogLevel {
	/// Fatal error that usually causes the application to be unusable. Always emitted,
	/// regardless of the minimum level.
	Fatal = 0,
	/// Error that the user must be aware of
	Error = 1,
	/// Warning of something that the user should be aware of, although it may not be an error
	Warn = 2,
	/// Standard information that is usually displayed to the user under most circumstances
	Info = 3,
	/// Debugging information
	Debug = 4,
	/// Very fine grained logging information that should not generally be visible except for
	/// debugging purposes
	Trace = 5,
}

/// How the [`crate::FilterSet`] members are applied to a caller key.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum FilterMode {
	/// Every caller is permitted.
	None,
	/// Only members are permitted.
	Whitelist,
	/// Every caller except the members is permitted.
	Blacklist,
}

/// Caller allow/deny list applied before a record is formatted.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSet {
	pub(crate) mode: FilterMode,
	pub(crate) members: HashSet<String>,
}

/// Severity threshold and line formatting flags.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelConfig {
	/// records less severe than this are dropped ([`crate::LogLevel::Fatal`] excepted)
	pub minimum_level: LogLevel,
	/// append ` [<caller>]` to each line
	pub include_caller_suffix: bool,
	/// prefix each line with the `file:line` of the log statement
	pub include_location: bool,
	/// use the full source path instead of the file name for the location
	pub long_path_style: bool,
}

/// Limits enforced by a [`crate::RotatingFile`].
#[derive(Clone, Debug, PartialEq)]
pub struct RotationPolicy {
	/// the active file is sealed once it holds more than this many bytes
	pub max_size_bytes: u64,
	/// archives older than this (plus two days of slack) are purged
	pub max_age_days: u32,
	/// the most archives retained, 0 for no limit
	pub max_archive_count: u32,
	/// compress each archive into a single entry zip file
	pub compress_on_rotate: bool,
}

/// The configuration record used to build a [`crate::Logger`]. See
/// [`crate::LogConfig::from_options`] for building one from a list of
/// [`crate::ConfigOption`] values.
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
	/// path of the active log file or the literal `"stdout"`
	pub log_path: String,
	pub minimum_level: LogLevel,
	pub include_caller_suffix: bool,
	pub include_location: bool,
	pub long_path_style: bool,
	pub filter_mode: FilterMode,
	pub filter_members: Vec<String>,
	/// 0 or less means 7
	pub max_age_days: i32,
	/// 0 or less means 102400 (100 MB)
	pub rotation_size_kb: i64,
	/// 0 means unlimited
	pub max_archive_count: u32,
	pub compress_on_rotate: bool,
}

/// Source location of a log statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
	pub file: &'static str,
	pub line: u32,
}

/// Why a rotation happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationReason {
	/// the local-time midnight boundary passed
	Time,
	/// the active file grew beyond the size limit, or a rotation was requested
	Size,
}

/// Point in time view of a [`crate::RotatingFile`].
#[derive(Clone, Debug, PartialEq)]
pub struct RotationStatus {
	pub active_path: PathBuf,
	pub current_size: u64,
	pub next_rotation: DateTime<Local>,
	pub sequence: u32,
	/// true while the active file can't be opened and records are held in memory
	pub degraded: bool,
	pub backlog_bytes: usize,
	pub dropped_bytes: u64,
}

/// Result of a [`crate::RetentionPurger::purge`] pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurgeSummary {
	pub deleted: Vec<PathBuf>,
	pub retained: Vec<PathBuf>,
}

/// Append-only destination of formatted log lines.
pub trait Sink: Send + Sync {
	/// Append `bytes`.
	fn write(&self, bytes: &[u8]) -> Result<(), Error>;
	/// Flush anything buffered by the sink.
	fn flush(&self) -> Result<(), Error> {
		Ok(())
	}
	/// Finish background work and release the destination.
	fn close(&self) -> Result<(), Error> {
		self.flush()
	}
	/// Seal the current destination and start a fresh one.
	fn rotate(&self) -> Result<(), Error> {
		Err(err!(ErrKind::Log, "this sink does not rotate"))
	}
	/// Whether a rotation would happen on the next write.
	fn need_rotate(&self) -> Result<bool, Error> {
		Ok(false)
	}
	/// Replace the rotation limits.
	fn set_policy(&self, _policy: &RotationPolicy) -> Result<(), Error> {
		Ok(())
	}
	/// Block until background work queued so far has completed.
	fn sync_housekeeping(&self) -> Result<(), Error> {
		Ok(())
	}
}

/// Fallback channel for failures that must not reach the caller of a log statement.
pub trait Report: Send + Sync {
	fn report(&self, context: &str, error: &Error);
}

/// Source of the current local time.
pub trait Clock: Send + Sync {
	fn now(&self) -> DateTime<Local>;
}

/// The logging handle. Records pass the level/filter gate, are formatted, and are written to
/// the configured [`crate::Sink`]. Share it between threads behind an [`std::sync::Arc`].
pub struct Logger {
	pub(crate) settings: ArcSwap<GateSettings>,
	pub(crate) sink: Arc<dyn Sink>,
	pub(crate) reporter: Arc<dyn Report>,
	pub(crate) clock: Arc<dyn Clock>,
	pub(crate) log_path: String,
	pub(crate) reconfigure_lock: Mutex<()>,
}

/// Builder for [`crate::Logger`] and [`crate::RotatingFile`].
pub struct LogBuilder {}

/// [`crate::Sink`] writing straight to standard output.
pub struct ConsoleSink {}

/// [`crate::Sink`] writing to a file that is rotated by date and size. Sealed files
/// (archives) are named `<path>.<YYYY-MM-DD>.<NN>`, optionally compressed, and purged by age
/// and count in the background.
pub struct RotatingFile {
	pub(crate) state: Mutex<RotatingFileState>,
	pub(crate) clock: Arc<dyn Clock>,
	pub(crate) reporter: Arc<dyn Report>,
	pub(crate) housekeeper: Housekeeper,
}

/// Deletes archives of one log file past the age window, then trims them by count.
#[derive(Clone, Debug, PartialEq)]
pub struct RetentionPurger {
	pub(crate) directory: PathBuf,
	pub(crate) owned_prefix: String,
	pub(crate) active_path: PathBuf,
	pub(crate) max_age_days: u32,
	pub(crate) max_archive_count: u32,
}

/// Compresses an archive into a single-entry zip file.
pub struct Archiver {}

/// [`crate::Report`] writing to standard error.
pub struct StderrReporter {}

/// [`crate::Report`] keeping every report in memory so it can be inspected.
#[derive(Default)]
pub struct ReportCollector {
	pub(crate) reports: RwLock<Vec<String>>,
}

/// [`crate::Clock`] backed by the system clock.
pub struct SystemClock {}

/// [`crate::Clock`] that only moves when told to.
pub struct ManualClock {
	pub(crate) now: RwLock<DateTime<Local>>,
}

// Crate local types

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GateSettings {
	pub(crate) level: LevelConfig,
	pub(crate) filter: FilterSet,
}

pub(crate) struct RotatingFileState {
	pub(crate) active_path: PathBuf,
	pub(crate) file: Option<File>,
	pub(crate) current_size: u64,
	pub(crate) next_rotation: DateTime<Local>,
	pub(crate) sequence: u32,
	pub(crate) policy: RotationPolicy,
	pub(crate) degraded: bool,
	pub(crate) backlog: Vec<u8>,
	pub(crate) dropped: u64,
	pub(crate) closed: bool,
}

pub(crate) enum HousekeeperTask {
	Compress(PathBuf),
	Purge,
	Sync(SyncSender<()>),
}

pub(crate) struct Housekeeper {
	pub(crate) tx: Mutex<Option<SyncSender<HousekeeperTask>>>,
	pub(crate) handle: Mutex<Option<JoinHandle<()>>>,
	pub(crate) pending_purge: Arc<Mutex<Option<(RetentionPurger, DateTime<Local>)>>>,
}
