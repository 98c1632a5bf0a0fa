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


use crate::types::ConfigImpl;
use crate::{Config, ConfigBuilder, ConfigOption, ConfigOption::*, ConfigOptionName as CN};
use seglog_err::*;
use std::collections::{HashMap, HashSet};

impl ConfigOption {
	/// The [`crate::ConfigOptionName`] of this option.
	pub fn name(&self) -> CN {
		match self {
			LogFilePath(_) => CN::LogFilePath,
			MinimumLevel(_) => CN::MinimumLevel,
			IncludeCallerSuffix(_) => CN::IncludeCallerSuffix,
			IncludeLocation(_) => CN::IncludeLocation,
			LongPathStyle(_) => CN::LongPathStyle,
			Whitelist(_) => CN::Whitelist,
			Blacklist(_) => CN::Blacklist,
			FilterMember(_) => CN::FilterMember,
			MaxAgeDays(_) => CN::MaxAgeDays,
			RotationSizeKb(_) => CN::RotationSizeKb,
			MaxArchiveCount(_) => CN::MaxArchiveCount,
			CompressOnRotate(_) => CN::CompressOnRotate,
		}
	}
}

impl CN {
	/// Whether this option may be specified more than once.
	pub fn allows_duplicates(&self) -> bool {
		*self == CN::FilterMember
	}
}

impl ConfigBuilder {
	/// Build a [`crate::Config`] from the specified options. No validation is done here, see
	/// [`crate::Config::check_config`].
	pub fn build_config(configs: Vec<ConfigOption>) -> Box<dyn Config> {
		Box::new(ConfigImpl::new(configs))
	}
}

impl Config for ConfigImpl {
	fn get(&self, name: &CN) -> Option<ConfigOption> {
		self.hash.get(name).cloned()
	}

	fn get_all(&self, name: &CN) -> Vec<ConfigOption> {
		self.configs
			.iter()
			.filter(|c| c.name() == *name)
			.cloned()
			.collect()
	}

	fn check_config(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		self.check_config_impl(allowed, required)
	}
}

impl ConfigImpl {
	// create a new config based on the specified input.
	pub(crate) fn new(configs: Vec<ConfigOption>) -> Self {
		// create a hashmap to insert configs for the ability to look them up later.
		let mut hash = HashMap::new();
		for config in &configs {
			hash.insert(config.name(), config.clone());
		}
		Self { configs, hash }
	}

	// check the config: 1.) for duplicates, 2.) for allowed input 3.) for the required input.
	fn check_config_impl(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		let allowed: HashSet<CN> = allowed.into_iter().collect();
		let mut specified = HashSet::new();

		for config in &self.configs {
			let name = config.name();
			if !allowed.contains(&name) {
				return Err(err!(ErrKind::Configuration, "{:?} is not allowed", name));
			}
			if !specified.insert(name) && !name.allows_duplicates() {
				return Err(err!(
					ErrKind::Configuration,
					"{:?} was specified more than once",
					name
				));
			}
		}

		for name in required {
			if !specified.contains(&name) {
				return Err(err!(
					ErrKind::Configuration,
					"{:?} was required and not specified",
					name
				));
			}
		}

		Ok(())
	}
}
