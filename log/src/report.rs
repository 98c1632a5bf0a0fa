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


use crate::types::{Report, ReportCollector, StderrReporter};
use seglog_deps::colored::Colorize;
use seglog_err::*;

impl StderrReporter {
	pub fn new() -> Self {
		Self {}
	}
}

impl Default for StderrReporter {
	fn default() -> Self {
		Self::new()
	}
}

impl Report for StderrReporter {
	fn report(&self, context: &str, error: &Error) {
		eprintln!("{} {}: {}", "[seglog]".red(), context, error);
	}
}

impl ReportCollector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every report received so far as `"<context>: <error>"`, oldest first.
	pub fn reports(&self) -> Vec<String> {
		match self.reports.read() {
			Ok(reports) => reports.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	pub fn len(&self) -> usize {
		self.reports().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether any report contains `text`.
	pub fn contains(&self, text: &str) -> bool {
		self.reports().iter().any(|r| r.contains(text))
	}
}

impl Report for ReportCollector {
	fn report(&self, context: &str, error: &Error) {
		let line = format!("{}: {}", context, error);
		match self.reports.write() {
			Ok(mut reports) => reports.push(line),
			Err(poisoned) => poisoned.into_inner().push(line),
		}
	}
}
