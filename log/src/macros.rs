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


/// Log at the specified [`crate::LogLevel`] through a [`crate::Logger`]. The caller key is
/// the calling module's path unless it is given with a `caller: <key>;` prefix, and the
/// location is the `file!()`/`line!()` of the macro call. The remaining arguments are passed
/// to [`std::format_args`] and only rendered if the record passes the level and filter gate.
/// Evaluates to true if it did.
///
/// Usually called through [`crate::trace`], [`crate::debug`], [`crate::info`],
/// [`crate::warn`], [`crate::error`] or [`crate::fatal`].
///
/// # Examples
///```
/// use seglog_err::*;
/// use seglog_log::*;
///
/// fn main() -> Result<(), Error> {
///     let log = LogBuilder::build_log(LogConfig::default())?;
///
///     // the caller key is this module's path
///     log_at!(log, LogLevel::Info, "1 + 1 = {}", 2);
///
///     // an explicit caller key
///     log_at!(log, LogLevel::Warn, caller: "net::peer"; "peer {} disconnected", 7);
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! log_at {
	($logger:expr, $level:expr, caller: $caller:expr; $($values:tt)*) => {{
		$logger.emit_at(
			$level,
			$caller,
			Some($crate::Location {
				file: file!(),
				line: line!(),
			}),
			format_args!($($values)*),
		)
	}};
	($logger:expr, $level:expr, $($values:tt)*) => {{
		$logger.emit_at(
			$level,
			module_path!(),
			Some($crate::Location {
				file: file!(),
				line: line!(),
			}),
			format_args!($($values)*),
		)
	}};
}

/// Log at the [`crate::LogLevel::Trace`] level. See [`crate::log_at`].
///
/// # Examples
///```
/// use seglog_err::*;
/// use seglog_log::*;
///
/// fn main() -> Result<(), Error> {
///     let log = logger!(MinimumLevel(5))?;
///     assert!(trace!(log, "this is a test"));
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! trace {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Trace, $($values)*)
	};
}

/// Log at the [`crate::LogLevel::Debug`] level. See [`crate::log_at`].
#[macro_export]
macro_rules! debug {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Debug, $($values)*)
	};
}

/// Log at the [`crate::LogLevel::Info`] level. See [`crate::log_at`].
///
/// # Examples
///```
/// use seglog_err::*;
/// use seglog_log::*;
///
/// fn main() -> Result<(), Error> {
///     let log = logger!()?;
///     let abc = 123;
///     assert!(info!(log, "v1={},v2={}", abc, "def")); // will show up
///     assert!(!debug!(log, "test")); // will not show up
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! info {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Info, $($values)*)
	};
}

/// Log at the [`crate::LogLevel::Warn`] level. See [`crate::log_at`].
#[macro_export]
macro_rules! warn {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Warn, $($values)*)
	};
}

/// Log at the [`crate::LogLevel::Error`] level. See [`crate::log_at`].
#[macro_export]
macro_rules! error {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Error, $($values)*)
	};
}

/// Log at the [`crate::LogLevel::Fatal`] level. Fatal records pass whatever the minimum
/// level is, but are still subject to the caller filter. See [`crate::log_at`].
#[macro_export]
macro_rules! fatal {
	($logger:expr, $($values:tt)*) => {
		$crate::log_at!($logger, $crate::LogLevel::Fatal, $($values)*)
	};
}

/// Build a [`crate::Logger`] from a list of [`crate::ConfigOption`] values, which may be
/// written without the enum name. See [`crate::LogConfig::from_options`].
///
/// # Examples
///```
/// use seglog_err::*;
/// use seglog_log::*;
///
/// fn main() -> Result<(), Error> {
///     let log = logger!(
///         MinimumLevel(4),
///         IncludeCallerSuffix(true),
///         Blacklist(true),
///         FilterMember("noisy::module".to_string())
///     )?;
///
///     assert!(debug!(log, "shown"));
///     assert!(!debug!(log, caller: "noisy::module"; "filtered"));
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! logger {
	( $( $config:expr ),* ) => {{
		#[allow(unused_imports)]
		use $crate::ConfigOption::*;
		let options: Vec<$crate::ConfigOption> = vec![$($config),*];
		$crate::LogBuilder::build_log_from_options(options)
	}};
}
