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


//! Configuration crate for seglog. Configurations are expressed as a list of
//! [`crate::ConfigOption`] values which are turned into a [`crate::Config`] by
//! [`crate::ConfigBuilder::build_config`] (or the [`crate::config`] macro). The consumer then
//! validates the list with [`crate::Config::check_config`], naming the options it allows and
//! the ones it requires.
//!
//! # Examples
//!
//!```
//! use seglog_conf::*;
//! use seglog_err::*;
//!
//! fn main() -> Result<(), Error> {
//!     let config = config!(LogFilePath("/tmp/app.log".to_string()), MaxAgeDays(3));
//!     config.check_config(
//!         vec![ConfigOptionName::LogFilePath, ConfigOptionName::MaxAgeDays],
//!         vec![ConfigOptionName::LogFilePath],
//!     )?;
//!     assert_eq!(config.get(&ConfigOptionName::MaxAgeDays), Some(ConfigOption::MaxAgeDays(3)));
//!     Ok(())
//! }
//!```

mod config;
mod macros;
mod types;

pub use crate::types::{Config, ConfigBuilder, ConfigOption, ConfigOptionName};
