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


use crate::types::{
	Clock, ConsoleSink, FilterSet, LevelConfig, Location, LogBuilder, LogConfig, LogLevel,
	Logger, Report, RotatingFile, RotationPolicy, Sink, StderrReporter, SystemClock,
};
use seglog_conf::ConfigOption;
use seglog_deps::arc_swap::ArcSwap;
use seglog_err::*;
use std::fmt::Arguments;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

impl LogBuilder {
	/// Build a [`crate::Logger`] from `config`. A `log_path` of `"stdout"` logs to standard
	/// output, anything else is the path of a [`crate::RotatingFile`] whose parent
	/// directories are created as needed. Failures that can't be returned to a caller are
	/// written to standard error.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Configuration`] - if the configuration is invalid.
	///
	/// [`seglog_err::ErrKind::IO`] - if the log file or its directory can't be created.
	pub fn build_log(config: LogConfig) -> Result<Logger, Error> {
		Self::build_log_with(
			config,
			Arc::new(StderrReporter::new()),
			Arc::new(SystemClock::new()),
		)
	}

	/// Same as [`crate::LogBuilder::build_log`] with the configuration built by
	/// [`crate::LogConfig::from_options`].
	pub fn build_log_from_options(options: Vec<ConfigOption>) -> Result<Logger, Error> {
		Self::build_log(LogConfig::from_options(options)?)
	}

	/// Same as [`crate::LogBuilder::build_log`] with the specified reporter and clock.
	pub fn build_log_with(
		config: LogConfig,
		reporter: Arc<dyn Report>,
		clock: Arc<dyn Clock>,
	) -> Result<Logger, Error> {
		let config = config.normalized()?;
		let sink: Arc<dyn Sink> = if config.is_stdout() {
			Arc::new(ConsoleSink::new())
		} else {
			let path = PathBuf::from(&config.log_path);
			if let Some(parent) = path.parent() {
				if !parent.as_os_str().is_empty() {
					map_err!(
						create_dir_all(parent),
						ErrKind::IO,
						format!("could not create log directory '{}'", parent.display())
					)?;
				}
			}
			Arc::new(Self::build_rotating_file(
				path,
				config.rotation_policy(),
				clock.clone(),
				reporter.clone(),
			)?)
		};
		Self::build_log_with_sink(config, sink, reporter, clock)
	}

	/// Build a [`crate::Logger`] writing to `sink`. The `log_path` of `config` is only used
	/// to detect path changes in [`crate::Logger::reconfigure`].
	pub fn build_log_with_sink(
		config: LogConfig,
		sink: Arc<dyn Sink>,
		reporter: Arc<dyn Report>,
		clock: Arc<dyn Clock>,
	) -> Result<Logger, Error> {
		let config = config.normalized()?;
		Ok(Logger {
			settings: ArcSwap::from_pointee(config.gate_settings()),
			sink,
			reporter,
			clock,
			log_path: config.log_path,
			reconfigure_lock: Mutex::new(()),
		})
	}

	/// Open a [`crate::RotatingFile`]. See [`crate::RotatingFile::open`].
	pub fn build_rotating_file(
		path: PathBuf,
		policy: RotationPolicy,
		clock: Arc<dyn Clock>,
		reporter: Arc<dyn Report>,
	) -> Result<RotatingFile, Error> {
		RotatingFile::open(path, policy, clock, reporter)
	}
}

impl Logger {
	/// Log `message` at `level` on behalf of `caller`. Returns true if the record passed the
	/// level and filter gate. Write failures are reported, never returned.
	pub fn emit(&self, level: LogLevel, caller: &str, message: &str) -> bool {
		self.emit_at(level, caller, None, format_args!("{}", message))
	}

	/// Same as [`crate::Logger::emit`] with the source location of the log statement. The
	/// message is only rendered if the record passes the gate.
	pub fn emit_at(
		&self,
		level: LogLevel,
		caller: &str,
		location: Option<Location>,
		message: Arguments<'_>,
	) -> bool {
		let settings = self.settings.load();
		if !settings.accepts(level, caller) {
			return false;
		}

		let line = settings.format_line(level, caller, location, message, self.clock.now());
		if let Err(e) = self.sink.write(line.as_bytes()) {
			self.reporter.report("could not write log record", &e);
		}
		true
	}

	/// Whether a record at `level` from `caller` would pass the gate.
	pub fn enabled(&self, level: LogLevel, caller: &str) -> bool {
		self.settings.load().accepts(level, caller)
	}

	/// Replace the level, filter and rotation settings. A level change is logged at warn as
	/// `old --> new` under the old settings before the swap. Records racing with this call
	/// see either the old or the new settings, never a mix.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Configuration`] - if `config` is invalid or names a different
	/// `log_path`.
	pub fn reconfigure(&self, config: &LogConfig) -> Result<(), Error> {
		let _lock = self.reconfigure_lock.lock()?;
		let config = config.normalized()?;
		if config.log_path != self.log_path {
			return Err(err!(
				ErrKind::Configuration,
				"log_path can't be changed from '{}' to '{}'",
				self.log_path,
				config.log_path
			));
		}

		let settings = config.gate_settings();
		let old = self.settings.load();
		if old.level.minimum_level != settings.level.minimum_level {
			self.emit(
				LogLevel::Warn,
				module_path!(),
				&format!(
					"log level changed {} --> {}",
					old.level.minimum_level, settings.level.minimum_level
				),
			);
		}

		self.sink.set_policy(&config.rotation_policy())?;
		self.settings.store(Arc::new(settings));
		Ok(())
	}

	pub fn level_config(&self) -> LevelConfig {
		self.settings.load().level.clone()
	}

	pub fn filter_set(&self) -> FilterSet {
		self.settings.load().filter.clone()
	}

	/// Seal the active file now.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Log`] - if the logger writes to standard output or the rename
	/// failed.
	pub fn rotate(&self) -> Result<(), Error> {
		self.sink.rotate()
	}

	/// Whether the next write would rotate. Always false for standard output.
	pub fn need_rotate(&self) -> Result<bool, Error> {
		self.sink.need_rotate()
	}

	pub fn flush(&self) -> Result<(), Error> {
		self.sink.flush()
	}

	/// Block until compression and purge tasks queued so far have completed.
	pub fn wait_housekeeping(&self) -> Result<(), Error> {
		self.sink.sync_housekeeping()
	}

	/// Flush and release the sink, waiting for background tasks. Records logged afterwards
	/// are reported as write failures.
	pub fn close(&self) -> Result<(), Error> {
		self.sink.close()
	}
}
