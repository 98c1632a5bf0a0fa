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
use crate::types::{Archiver, Housekeeper, HousekeeperTask, Report, RetentionPurger};
use seglog_deps::chrono::{DateTime, Local};
use seglog_err::*;
use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::Builder;

impl Housekeeper {
	// start the worker thread. Tasks run one at a time in the order they were queued.
	pub(crate) fn start(reporter: Arc<dyn Report>) -> Result<Self, Error> {
		let (tx, rx) = sync_channel(HOUSEKEEPER_QUEUE_SIZE);
		let pending_purge = Arc::new(Mutex::new(None));
		let pending_purge_clone = pending_purge.clone();

		let handle = Builder::new()
			.name("seglog-housekeeper".to_string())
			.spawn(move || Self::run(rx, pending_purge_clone, reporter))?;

		Ok(Self {
			tx: Mutex::new(Some(tx)),
			handle: Mutex::new(Some(handle)),
			pending_purge,
		})
	}

	fn run(
		rx: Receiver<HousekeeperTask>,
		pending_purge: Arc<Mutex<Option<(RetentionPurger, DateTime<Local>)>>>,
		reporter: Arc<dyn Report>,
	) {
		// ends once every sender is dropped and the queue is drained
		for task in rx {
			match task {
				HousekeeperTask::Compress(path) => {
					if let Err(e) = Archiver::compress(&path) {
						reporter.report(
							&format!("could not compress '{}'", path.display()),
							&e,
						);
					}
				}
				HousekeeperTask::Purge => {
					// take the latest request so a rotation during this pass queues another one
					let pending = match pending_purge.lock() {
						Ok(mut pending) => pending.take(),
						Err(e) => {
							reporter.report("purge skipped", &e.into());
							None
						}
					};
					if let Some((purger, reference)) = pending {
						purger.purge(reference, reporter.as_ref());
					}
				}
				HousekeeperTask::Sync(reply) => {
					let _ = reply.send(());
				}
			}
		}
	}

	pub(crate) fn compress(&self, path: PathBuf, reporter: &dyn Report) {
		self.submit(HousekeeperTask::Compress(path), reporter);
	}

	// at most one purge is queued at a time. A request made while one is queued replaces
	// its purger and reference time.
	pub(crate) fn purge(
		&self,
		purger: RetentionPurger,
		reference: DateTime<Local>,
		reporter: &dyn Report,
	) {
		let queued = match self.pending_purge.lock() {
			Ok(mut pending) => pending.replace((purger, reference)).is_some(),
			Err(e) => {
				reporter.report("purge skipped", &e.into());
				return;
			}
		};
		if queued {
			return;
		}
		if !self.submit(HousekeeperTask::Purge, reporter) {
			if let Ok(mut pending) = self.pending_purge.lock() {
				*pending = None;
			}
		}
	}

	// never blocks: a task that doesn't fit is reported and dropped
	pub(crate) fn submit(&self, task: HousekeeperTask, reporter: &dyn Report) -> bool {
		let tx = match self.sender() {
			Ok(Some(tx)) => tx,
			Ok(None) => {
				reporter.report(
					"housekeeping task dropped",
					&err!(ErrKind::IllegalState, "housekeeper has been shut down"),
				);
				return false;
			}
			Err(e) => {
				reporter.report("housekeeping task dropped", &e);
				return false;
			}
		};

		match tx.try_send(task) {
			Ok(()) => true,
			Err(TrySendError::Full(_)) => {
				reporter.report(
					"housekeeping task dropped",
					&err!(ErrKind::IllegalState, "housekeeping queue full"),
				);
				false
			}
			Err(TrySendError::Disconnected(_)) => {
				reporter.report(
					"housekeeping task dropped",
					&err!(ErrKind::IllegalState, "housekeeping thread has stopped"),
				);
				false
			}
		}
	}

	// wait for every task queued before this call
	pub(crate) fn sync(&self) -> Result<(), Error> {
		let tx = match self.sender()? {
			Some(tx) => tx,
			None => return Ok(()),
		};

		let (reply_tx, reply_rx) = sync_channel(1);
		if tx.send(HousekeeperTask::Sync(reply_tx)).is_err() {
			// the worker is gone, nothing left to wait for
			return Ok(());
		}
		reply_rx.recv()?;
		Ok(())
	}

	// drain the queue and stop the worker
	pub(crate) fn shutdown(&self) -> Result<(), Error> {
		{
			let mut tx = self.tx.lock()?;
			*tx = None;
		}

		let handle = self.handle.lock()?.take();
		if let Some(handle) = handle {
			if handle.join().is_err() {
				return Err(err!(ErrKind::IllegalState, "housekeeping thread panicked"));
			}
		}
		Ok(())
	}

	fn sender(&self) -> Result<Option<SyncSender<HousekeeperTask>>, Error> {
		Ok(self.tx.lock()?.clone())
	}
}

impl Drop for Housekeeper {
	fn drop(&mut self) {
		let _ = self.shutdown();
	}
}
