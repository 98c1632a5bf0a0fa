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
use crate::types::{
	FilterMode, FilterSet, GateSettings, LevelConfig, LogConfig, LogLevel, RotationPolicy,
};
use seglog_conf::{ConfigBuilder, ConfigOption, ConfigOptionName as CN};
use seglog_err::*;
use std::convert::TryFrom;

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			log_path: STDOUT_PATH.to_string(),
			minimum_level: LogLevel::Info,
			include_caller_suffix: false,
			include_location: false,
			long_path_style: false,
			filter_mode: FilterMode::None,
			filter_members: vec![],
			max_age_days: DEFAULT_MAX_AGE_DAYS,
			rotation_size_kb: DEFAULT_ROTATION_SIZE_KB,
			max_archive_count: 0,
			compress_on_rotate: false,
		}
	}
}

impl LogConfig {
	/// Build a configuration from a list of [`crate::ConfigOption`] values. Options that are
	/// not specified keep their [`Default`] values. `FilterMember` may be repeated, every
	/// other option may be specified at most once. Specifying both `Whitelist(true)` and
	/// `Blacklist(true)` is an error.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Configuration`] - if an option is duplicated, the level is out
	/// of range or both filter modes are enabled.
	///
	/// # Examples
	///
	///```
	/// use seglog_err::*;
	/// use seglog_log::*;
	///
	/// fn main() -> Result<(), Error> {
	///     let config = LogConfig::from_options(vec![
	///         ConfigOption::MinimumLevel(4),
	///         ConfigOption::Blacklist(true),
	///         ConfigOption::FilterMember("noisy::module".to_string()),
	///     ])?;
	///
	///     assert_eq!(config.minimum_level, LogLevel::Debug);
	///     assert_eq!(config.filter_mode, FilterMode::Blacklist);
	///     assert_eq!(config.log_path, "stdout");
	///     Ok(())
	/// }
	///```
	pub fn from_options(options: Vec<ConfigOption>) -> Result<Self, Error> {
		let config = ConfigBuilder::build_config(options);
		config.check_config(
			vec![
				CN::LogFilePath,
				CN::MinimumLevel,
				CN::IncludeCallerSuffix,
				CN::IncludeLocation,
				CN::LongPathStyle,
				CN::Whitelist,
				CN::Blacklist,
				CN::FilterMember,
				CN::MaxAgeDays,
				CN::RotationSizeKb,
				CN::MaxArchiveCount,
				CN::CompressOnRotate,
			],
			vec![],
		)?;

		let mut ret = Self::default();

		if let Some(ConfigOption::LogFilePath(log_path)) = config.get(&CN::LogFilePath) {
			ret.log_path = log_path;
		}
		if let Some(ConfigOption::MinimumLevel(level)) = config.get(&CN::MinimumLevel) {
			ret.minimum_level = LogLevel::try_from(level)?;
		}
		ret.include_caller_suffix = match config.get(&CN::IncludeCallerSuffix) {
			Some(ConfigOption::IncludeCallerSuffix(v)) => v,
			_ => ret.include_caller_suffix,
		};
		ret.include_location = match config.get(&CN::IncludeLocation) {
			Some(ConfigOption::IncludeLocation(v)) => v,
			_ => ret.include_location,
		};
		ret.long_path_style = match config.get(&CN::LongPathStyle) {
			Some(ConfigOption::LongPathStyle(v)) => v,
			_ => ret.long_path_style,
		};
		ret.max_age_days = match config.get(&CN::MaxAgeDays) {
			Some(ConfigOption::MaxAgeDays(v)) => v,
			_ => ret.max_age_days,
		};
		ret.rotation_size_kb = match config.get(&CN::RotationSizeKb) {
			Some(ConfigOption::RotationSizeKb(v)) => v,
			_ => ret.rotation_size_kb,
		};
		ret.max_archive_count = match config.get(&CN::MaxArchiveCount) {
			Some(ConfigOption::MaxArchiveCount(v)) => v,
			_ => ret.max_archive_count,
		};
		ret.compress_on_rotate = match config.get(&CN::CompressOnRotate) {
			Some(ConfigOption::CompressOnRotate(v)) => v,
			_ => ret.compress_on_rotate,
		};

		let whitelist = config.get(&CN::Whitelist) == Some(ConfigOption::Whitelist(true));
		let blacklist = config.get(&CN::Blacklist) == Some(ConfigOption::Blacklist(true));
		ret.filter_mode = match (whitelist, blacklist) {
			(true, true) => {
				return Err(err!(
					ErrKind::Configuration,
					"Whitelist and Blacklist may not both be enabled"
				))
			}
			(true, false) => FilterMode::Whitelist,
			(false, true) => FilterMode::Blacklist,
			(false, false) => FilterMode::None,
		};

		for member in config.get_all(&CN::FilterMember) {
			if let ConfigOption::FilterMember(member) = member {
				ret.filter_members.push(member);
			}
		}

		Ok(ret)
	}

	/// Return a copy with out of range limits replaced by their defaults.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Configuration`] - if the log path is empty.
	pub fn normalized(&self) -> Result<Self, Error> {
		if self.log_path.is_empty() {
			return Err(err!(ErrKind::Configuration, "log_path may not be empty"));
		}

		let mut ret = self.clone();
		if ret.max_age_days <= 0 {
			ret.max_age_days = DEFAULT_MAX_AGE_DAYS;
		}
		if ret.rotation_size_kb <= 0 {
			ret.rotation_size_kb = DEFAULT_ROTATION_SIZE_KB;
		}
		Ok(ret)
	}

	/// Whether this configuration logs to standard output instead of a file.
	pub fn is_stdout(&self) -> bool {
		self.log_path == STDOUT_PATH
	}

	/// The severity and formatting part of this configuration.
	pub fn level_config(&self) -> LevelConfig {
		LevelConfig {
			minimum_level: self.minimum_level,
			include_caller_suffix: self.include_caller_suffix,
			include_location: self.include_location,
			long_path_style: self.long_path_style,
		}
	}

	/// The filter part of this configuration.
	pub fn filter_set(&self) -> FilterSet {
		FilterSet::new(self.filter_mode, self.filter_members.iter().cloned())
	}

	/// The rotation limits of this configuration, with defaults applied.
	pub fn rotation_policy(&self) -> RotationPolicy {
		let max_age_days = if self.max_age_days > 0 {
			self.max_age_days
		} else {
			DEFAULT_MAX_AGE_DAYS
		};
		let rotation_size_kb = if self.rotation_size_kb > 0 {
			self.rotation_size_kb
		} else {
			DEFAULT_ROTATION_SIZE_KB
		};
		RotationPolicy {
			max_size_bytes: (rotation_size_kb as u64).saturating_mul(1024),
			max_age_days: max_age_days as u32,
			max_archive_count: self.max_archive_count,
			compress_on_rotate: self.compress_on_rotate,
		}
	}

	pub(crate) fn gate_settings(&self) -> GateSettings {
		GateSettings {
			level: self.level_config(),
			filter: self.filter_set(),
		}
	}
}
