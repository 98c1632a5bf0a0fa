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
use crate::types::{PurgeSummary, Report, RetentionPurger, RotationPolicy};
use seglog_deps::chrono::{DateTime, Duration, Local, NaiveDate};
use seglog_err::*;
use std::fs::{read_dir, remove_file};
use std::path::{Path, PathBuf};

impl RetentionPurger {
	/// Create a purger over `directory`. Files whose name starts with `owned_prefix` followed
	/// by a `YYYY-MM-DD` date are archives; `active_path` is never touched.
	pub fn new(
		directory: PathBuf,
		owned_prefix: String,
		active_path: PathBuf,
		max_age_days: u32,
		max_archive_count: u32,
	) -> Self {
		Self {
			directory,
			owned_prefix,
			active_path,
			max_age_days,
			max_archive_count,
		}
	}

	/// Create a purger for the archives of the log file at `active_path`, which are the
	/// files `<name>.<YYYY-MM-DD>.*` next to it.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::IllegalArgument`] - if `active_path` has no usable file name.
	pub fn for_active_file(active_path: &Path, policy: &RotationPolicy) -> Result<Self, Error> {
		let name = match active_path.file_name().and_then(|name| name.to_str()) {
			Some(name) => name,
			None => {
				return Err(err!(
					ErrKind::IllegalArgument,
					"'{}' has no usable file name",
					active_path.display()
				))
			}
		};

		let directory = match active_path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		};

		Ok(Self::new(
			directory,
			format!("{}.", name),
			active_path.to_path_buf(),
			policy.max_age_days,
			policy.max_archive_count,
		))
	}

	/// Delete archives dated on or before `reference - (max_age_days + 2) days`, then, if
	/// more than `max_archive_count` (non zero) remain, delete the oldest until that many
	/// are left. Failures are reported and skipped; the pass itself never fails.
	pub fn purge(&self, reference: DateTime<Local>, reporter: &dyn Report) -> PurgeSummary {
		let mut summary = PurgeSummary::default();
		let cutoff = reference - Duration::days(self.max_age_days as i64 + PURGE_SLACK_DAYS);
		let cutoff = cutoff.format(ARCHIVE_DATE_FORMAT).to_string();

		let entries = match read_dir(&self.directory) {
			Ok(entries) => entries,
			Err(e) => {
				reporter.report(
					&format!("purge could not scan '{}'", self.directory.display()),
					&e.into(),
				);
				return summary;
			}
		};

		let mut candidates = vec![];
		for entry in entries {
			let entry = match entry {
				Ok(entry) => entry,
				Err(e) => {
					reporter.report("purge could not read a directory entry", &e.into());
					continue;
				}
			};

			let path = entry.path();
			if path.is_dir() || self.is_active(&path) {
				continue;
			}

			let date = match entry.file_name().to_str().and_then(|n| self.archive_date(n)) {
				Some(date) => date,
				None => continue,
			};

			// dates are zero padded so the strings order like the dates
			if date.as_str() <= cutoff.as_str() {
				match remove_file(&path) {
					Ok(()) => summary.deleted.push(path),
					Err(e) => reporter.report(
						&format!("purge could not delete '{}'", path.display()),
						&e.into(),
					),
				}
			} else {
				candidates.push(path);
			}
		}

		// names order like their age: date, then sequence index
		candidates.sort();
		let max = self.max_archive_count as usize;
		let excess = if max > 0 && candidates.len() > max {
			candidates.len() - max
		} else {
			0
		};

		for (i, path) in candidates.into_iter().enumerate() {
			if i < excess {
				match remove_file(&path) {
					Ok(()) => summary.deleted.push(path),
					Err(e) => {
						reporter.report(
							&format!("purge could not delete '{}'", path.display()),
							&e.into(),
						);
						summary.retained.push(path);
					}
				}
			} else {
				summary.retained.push(path);
			}
		}

		summary
	}

	fn is_active(&self, path: &Path) -> bool {
		match (path.file_name(), self.active_path.file_name()) {
			(Some(name), Some(active)) => name == active,
			_ => false,
		}
	}

	// the date part of an archive name, None if the name isn't one of our archives
	fn archive_date(&self, name: &str) -> Option<String> {
		let suffix = name.strip_prefix(self.owned_prefix.as_str())?;
		let date = suffix.get(0..ARCHIVE_DATE_LEN)?;
		NaiveDate::parse_from_str(date, ARCHIVE_DATE_FORMAT).ok()?;
		Some(date.to_string())
	}
}
