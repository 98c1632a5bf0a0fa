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


use crate::constants::*;
use crate::types::{FilterMode, FilterSet, GateSettings, LevelConfig, Location, LogLevel};
use seglog_deps::chrono::{DateTime, Local};
use seglog_err::*;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt::{Arguments, Display, Formatter, Write};
use std::path::Path;

impl LogLevel {
	/// The single letter written in front of each message.
	pub fn tag(&self) -> char {
		match self {
			LogLevel::Trace => 'T',
			LogLevel::Debug => 'D',
			LogLevel::Info => 'I',
			LogLevel::Warn => 'W',
			LogLevel::Error => 'E',
			LogLevel::Fatal => 'F',
		}
	}
}

impl Display for LogLevel {
	fn fmt(&self, w: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
		match self {
			LogLevel::Trace => write!(w, "TRACE"),
			LogLevel::Debug => write!(w, "DEBUG"),
			LogLevel::Info => write!(w, "INFO"),
			LogLevel::Warn => write!(w, "WARN"),
			LogLevel::Error => write!(w, "ERROR"),
			LogLevel::Fatal => write!(w, "FATAL"),
		}
	}
}

impl TryFrom<u8> for LogLevel {
	type Error = Error;
	fn try_from(value: u8) -> Result<Self, Error> {
		match value {
			0 => Ok(LogLevel::Fatal),
			1 => Ok(LogLevel::Error),
			2 => Ok(LogLevel::Warn),
			3 => Ok(LogLevel::Info),
			4 => Ok(LogLevel::Debug),
			5 => Ok(LogLevel::Trace),
			_ => Err(err!(
				ErrKind::Configuration,
				"log level must be between 0 (fatal) and 5 (trace), found: {}",
				value
			)),
		}
	}
}

impl FilterSet {
	/// Build a filter set. Members are exact caller keys.
	pub fn new<I, S>(mode: FilterMode, members: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			mode,
			members: members.into_iter().map(|m| m.into()).collect(),
		}
	}

	/// A filter set permitting every caller.
	pub fn none() -> Self {
		Self {
			mode: FilterMode::None,
			members: HashSet::new(),
		}
	}

	pub fn mode(&self) -> FilterMode {
		self.mode
	}

	pub fn members(&self) -> &HashSet<String> {
		&self.members
	}

	/// Whether records from `caller` may pass.
	pub fn permits(&self, caller: &str) -> bool {
		match self.mode {
			FilterMode::None => true,
			FilterMode::Whitelist => self.members.contains(caller),
			FilterMode::Blacklist => !self.members.contains(caller),
		}
	}
}

impl Default for LevelConfig {
	fn default() -> Self {
		Self {
			minimum_level: LogLevel::Info,
			include_caller_suffix: false,
			include_location: false,
			long_path_style: false,
		}
	}
}

impl Display for LevelConfig {
	fn fmt(&self, w: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(
			w,
			"level={} caller_suffix={} location={} long_path={}",
			self.minimum_level,
			self.include_caller_suffix,
			self.include_location,
			self.long_path_style
		)
	}
}

impl GateSettings {
	// fatal bypasses the severity check, never the filter
	pub(crate) fn accepts(&self, level: LogLevel, caller: &str) -> bool {
		let severe_enough = level == LogLevel::Fatal || level <= self.level.minimum_level;
		severe_enough && self.filter.permits(caller)
	}

	pub(crate) fn format_line(
		&self,
		level: LogLevel,
		caller: &str,
		location: Option<Location>,
		message: Arguments<'_>,
		now: DateTime<Local>,
	) -> String {
		let mut line = format!("{} ", now.format(TIMESTAMP_FORMAT));

		if self.level.include_location {
			if let Some(location) = location {
				let file = if self.level.long_path_style {
					location.file
				} else {
					short_path(location.file)
				};
				line.push_str(&format!("{}:{}: ", file, location.line));
			}
		}

		line.push(level.tag());
		line.push_str(": ");
		// writing to a String can't fail
		let _ = line.write_fmt(message);

		if self.level.include_caller_suffix {
			line.push_str(&format!(" [{}]", caller));
		}

		line.push('\n');
		line
	}
}

fn short_path(file: &str) -> &str {
	match Path::new(file).file_name() {
		Some(name) => name.to_str().unwrap_or(file),
		None => file,
	}
}
