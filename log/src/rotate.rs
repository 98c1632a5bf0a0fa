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


use crate::clock::next_midnight;
use crate::constants::*;
use crate::types::{
	Clock, Housekeeper, Report, RetentionPurger, RotatingFile, RotatingFileState,
	RotationPolicy, RotationReason, RotationStatus, Sink,
};
use seglog_deps::chrono::{DateTime, Duration, Local};
use seglog_err::*;
use std::fs::{rename, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

impl RotatingFile {
	/// Open (or create) the active file at `path` in append mode. The size of an existing
	/// file counts towards the size limit and the first time rotation happens at the next
	/// local midnight.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::Configuration`] - if `path` is empty.
	///
	/// [`seglog_err::ErrKind::IO`] - if the file can't be opened or the housekeeping thread
	/// can't be started.
	pub fn open(
		path: PathBuf,
		policy: RotationPolicy,
		clock: Arc<dyn Clock>,
		reporter: Arc<dyn Report>,
	) -> Result<Self, Error> {
		if path.as_os_str().is_empty() {
			return Err(err!(ErrKind::Configuration, "log file path may not be empty"));
		}

		let file = map_err!(
			open_append(&path),
			ErrKind::IO,
			format!("could not open log file '{}'", path.display())
		)?;
		let current_size = file.metadata()?.len();
		let next_rotation = next_midnight(clock.now());
		let housekeeper = Housekeeper::start(reporter.clone())?;

		Ok(Self {
			state: Mutex::new(RotatingFileState {
				active_path: path,
				file: Some(file),
				current_size,
				next_rotation,
				sequence: 0,
				policy,
				degraded: false,
				backlog: vec![],
				dropped: 0,
				closed: false,
			}),
			clock,
			reporter,
			housekeeper,
		})
	}

	/// The name a file sealed before `next_rotation` with index `sequence` is renamed to:
	/// `<active>.<YYYY-MM-DD>.<NN>`, dated the day before `next_rotation`.
	pub fn archive_path(
		active_path: &Path,
		next_rotation: DateTime<Local>,
		sequence: u32,
	) -> PathBuf {
		let date = next_rotation - Duration::days(1);
		let mut name = active_path.as_os_str().to_owned();
		name.push(format!(
			".{}.{:02}",
			date.format(ARCHIVE_DATE_FORMAT),
			sequence
		));
		PathBuf::from(name)
	}

	/// Apply the pending rotations: first a time rotation if the next rotation time has
	/// passed, then a size rotation if the active file is over the size limit. Returns true
	/// if a rotation happened.
	pub fn rotate_if_needed(&self) -> Result<bool, Error> {
		let mut state = self.state.lock()?;
		self.check_closed(&state)?;
		Ok(self.rotate_if_needed_locked(&mut state))
	}

	/// Current rotation state.
	pub fn status(&self) -> Result<RotationStatus, Error> {
		let state = self.state.lock()?;
		Ok(RotationStatus {
			active_path: state.active_path.clone(),
			current_size: state.current_size,
			next_rotation: state.next_rotation,
			sequence: state.sequence,
			degraded: state.degraded,
			backlog_bytes: state.backlog.len(),
			dropped_bytes: state.dropped,
		})
	}

	/// The rotation limits in use.
	pub fn policy(&self) -> Result<RotationPolicy, Error> {
		Ok(self.state.lock()?.policy.clone())
	}

	fn check_closed(&self, state: &RotatingFileState) -> Result<(), Error> {
		if state.closed {
			Err(err!(ErrKind::Log, "write after close"))
		} else {
			Ok(())
		}
	}

	fn rotate_if_needed_locked(&self, state: &mut RotatingFileState) -> bool {
		let mut rotated = false;
		if self.clock.now() >= state.next_rotation {
			rotated |= self.rotate_locked(state, RotationReason::Time);
		}
		if state.current_size > state.policy.max_size_bytes {
			rotated |= self.rotate_locked(state, RotationReason::Size);
		}
		rotated
	}

	// seal the active file and start a new one. Returns false if the rename failed, in
	// which case the state is unchanged and appending continues on the old file.
	fn rotate_locked(&self, state: &mut RotatingFileState, reason: RotationReason) -> bool {
		// close the active file
		state.file = None;

		let archive = Self::archive_path(&state.active_path, state.next_rotation, state.sequence);
		if let Err(e) = rename(&state.active_path, &archive) {
			self.reporter.report(
				&format!(
					"could not rename '{}' to '{}'",
					state.active_path.display(),
					archive.display()
				),
				&e.into(),
			);
			self.reopen_locked(state, 1);
			return false;
		}

		match reason {
			RotationReason::Time => {
				state.next_rotation = state.next_rotation + Duration::days(1);
				state.sequence = 0;
			}
			RotationReason::Size => state.sequence += 1,
		}
		state.current_size = 0;
		self.reopen_locked(state, REOPEN_ATTEMPTS);

		if state.policy.compress_on_rotate {
			self.housekeeper.compress(archive, self.reporter.as_ref());
		}

		match RetentionPurger::for_active_file(&state.active_path, &state.policy) {
			Ok(purger) => {
				self.housekeeper
					.purge(purger, state.next_rotation, self.reporter.as_ref())
			}
			Err(e) => self.reporter.report("could not schedule purge", &e),
		}

		true
	}

	// open the active file, writing out any backlog first. On failure the file stays
	// unavailable and records go to the backlog.
	fn reopen_locked(&self, state: &mut RotatingFileState, attempts: usize) -> bool {
		let mut last_error = None;
		for _ in 0..attempts {
			match open_append(&state.active_path) {
				Ok(file) => {
					// the file may not be the one the size was counted against
					if let Ok(metadata) = file.metadata() {
						state.current_size = metadata.len();
					}
					state.file = Some(file);
					state.degraded = false;
					self.flush_backlog_locked(state);
					return true;
				}
				Err(e) => last_error = Some(e),
			}
		}

		if !state.degraded {
			state.degraded = true;
			if let Some(e) = last_error {
				self.reporter.report(
					&format!(
						"active file unavailable '{}'",
						state.active_path.display()
					),
					&e.into(),
				);
			}
		}
		false
	}

	fn flush_backlog_locked(&self, state: &mut RotatingFileState) {
		if state.backlog.is_empty() {
			return;
		}
		let backlog = std::mem::take(&mut state.backlog);
		if let Some(file) = state.file.as_mut() {
			match file.write_all(&backlog) {
				Ok(()) => state.current_size += backlog.len() as u64,
				Err(e) => self.reporter.report("could not write backlog", &e.into()),
			}
		}
	}

	fn append_locked(&self, state: &mut RotatingFileState, bytes: &[u8]) -> Result<(), Error> {
		if state.file.is_none() && !self.reopen_locked(state, 1) {
			self.buffer_locked(state, bytes);
			return Ok(());
		}

		match state.file.as_mut() {
			Some(file) => {
				file.write_all(bytes)?;
				state.current_size += bytes.len() as u64;
				Ok(())
			}
			None => Err(err!(ErrKind::IllegalState, "active file is not open")),
		}
	}

	fn buffer_locked(&self, state: &mut RotatingFileState, bytes: &[u8]) {
		if state.backlog.len() + bytes.len() > BACKLOG_CAPACITY {
			if state.dropped == 0 {
				self.reporter.report(
					"log records dropped",
					&err!(ErrKind::Log, "backlog of {} bytes is full", BACKLOG_CAPACITY),
				);
			}
			state.dropped += bytes.len() as u64;
		} else {
			state.backlog.extend_from_slice(bytes);
		}
	}
}

impl Sink for RotatingFile {
	fn write(&self, bytes: &[u8]) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		self.check_closed(&state)?;
		self.rotate_if_needed_locked(&mut state);
		self.append_locked(&mut state, bytes)
	}

	fn flush(&self) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		if let Some(file) = state.file.as_mut() {
			file.flush()?;
		}
		Ok(())
	}

	/// Flush, release the active file and wait for queued compression and purge tasks.
	/// Writes after this fail with "write after close".
	fn close(&self) -> Result<(), Error> {
		{
			let mut state = self.state.lock()?;
			if !state.closed {
				if state.file.is_none() {
					self.reopen_locked(&mut state, 1);
				}
				if let Some(file) = state.file.as_mut() {
					file.flush()?;
				}
				state.file = None;
				state.closed = true;
			}
		}
		self.housekeeper.shutdown()
	}

	/// Seal the active file now. Accounted like a size rotation.
	fn rotate(&self) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		self.check_closed(&state)?;
		if self.rotate_locked(&mut state, RotationReason::Size) {
			Ok(())
		} else {
			Err(err!(
				ErrKind::Log,
				"could not rotate '{}'",
				state.active_path.display()
			))
		}
	}

	fn need_rotate(&self) -> Result<bool, Error> {
		let state = self.state.lock()?;
		Ok(self.clock.now() >= state.next_rotation
			|| state.current_size > state.policy.max_size_bytes)
	}

	fn set_policy(&self, policy: &RotationPolicy) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		state.policy = policy.clone();
		Ok(())
	}

	fn sync_housekeeping(&self) -> Result<(), Error> {
		self.housekeeper.sync()
	}
}

fn open_append(path: &Path) -> Result<File, std::io::Error> {
	OpenOptions::new().append(true).create(true).open(path)
}
