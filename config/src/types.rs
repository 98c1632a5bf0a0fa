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


use seglog_err::Error;
use std::collections::HashMap;

/// A validated view over a list of [`crate::ConfigOption`] values.
pub trait Config {
	/// Return the option with the specified name. If the option was specified more than
	/// once, the last value is returned.
	fn get(&self, name: &ConfigOptionName) -> Option<ConfigOption>;
	/// Return every value specified for the option with the specified name, in the order
	/// they were specified. Used for options that may repeat.
	fn get_all(&self, name: &ConfigOptionName) -> Vec<ConfigOption>;
	/// Check that only `allowed` options were specified, that every `required` option was
	/// specified, and that no option other than a repeatable one was specified more than once.
	fn check_config(
		&self,
		allowed: Vec<ConfigOptionName>,
		required: Vec<ConfigOptionName>,
	) -> Result<(), Error>;
}

/// Names of the configuration options.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum ConfigOptionName {
	LogFilePath,
	MinimumLevel,
	IncludeCallerSuffix,
	IncludeLocation,
	LongPathStyle,
	Whitelist,
	Blacklist,
	FilterMember,
	MaxAgeDays,
	RotationSizeKb,
	MaxArchiveCount,
	CompressOnRotate,
}

/// Configuration options along with their values.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ConfigOption {
	/// path of the active log file, or the literal "stdout"
	LogFilePath(String),
	/// 0 = fatal ... 5 = trace
	MinimumLevel(u8),
	IncludeCallerSuffix(bool),
	IncludeLocation(bool),
	LongPathStyle(bool),
	Whitelist(bool),
	Blacklist(bool),
	/// a caller key of the filter set; may be specified many times
	FilterMember(String),
	MaxAgeDays(i32),
	RotationSizeKb(i64),
	MaxArchiveCount(u32),
	CompressOnRotate(bool),
}

/// Builder for [`crate::Config`] implementations.
pub struct ConfigBuilder {}

#[derive(Clone, Debug)]
pub(crate) struct ConfigImpl {
	pub(crate) configs: Vec<ConfigOption>,
	pub(crate) hash: HashMap<ConfigOptionName, ConfigOption>,
}
