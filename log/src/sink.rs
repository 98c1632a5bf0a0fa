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


use crate::types::{ConsoleSink, Sink};
use seglog_err::*;
use std::io::{stdout, Write};

impl ConsoleSink {
	pub fn new() -> Self {
		Self {}
	}
}

impl Default for ConsoleSink {
	fn default() -> Self {
		Self::new()
	}
}

impl Sink for ConsoleSink {
	fn write(&self, bytes: &[u8]) -> Result<(), Error> {
		// hold the lock so a line from another thread can't interleave
		let stdout = stdout();
		let mut stdout = stdout.lock();
		stdout.write_all(bytes)?;
		Ok(())
	}

	fn flush(&self) -> Result<(), Error> {
		stdout().flush()?;
		Ok(())
	}
}
