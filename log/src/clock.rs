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


use crate::types::{Clock, ManualClock, SystemClock};
use seglog_deps::chrono::{DateTime, Duration, Local, TimeZone};
use std::sync::RwLock;

impl SystemClock {
	pub fn new() -> Self {
		Self {}
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Local> {
		Local::now()
	}
}

impl ManualClock {
	/// Create a clock reading `start` until it is moved.
	pub fn new(start: DateTime<Local>) -> Self {
		Self {
			now: RwLock::new(start),
		}
	}

	pub fn set(&self, now: DateTime<Local>) {
		match self.now.write() {
			Ok(mut guard) => *guard = now,
			Err(poisoned) => *poisoned.into_inner() = now,
		}
	}

	pub fn advance(&self, by: Duration) {
		let now = self.now();
		self.set(now + by);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> DateTime<Local> {
		match self.now.read() {
			Ok(guard) => *guard,
			Err(poisoned) => *poisoned.into_inner(),
		}
	}
}

/// The next local midnight strictly after `now`. Where local midnight does not exist (a
/// daylight saving jump at 00:00), 24 hours after `now` is used instead.
pub(crate) fn next_midnight(now: DateTime<Local>) -> DateTime<Local> {
	let midnight = now
		.date_naive()
		.succ_opt()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.and_then(|naive| Local.from_local_datetime(&naive).earliest());

	match midnight {
		Some(midnight) => midnight,
		None => now + Duration::days(1),
	}
}
