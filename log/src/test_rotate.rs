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


#[cfg(test)]
mod test {
	use crate::constants::BACKLOG_CAPACITY;
	use crate::types::{Housekeeper, HousekeeperTask};
	use crate::{
		Archiver, Clock, LogBuilder, LogConfig, LogLevel, ManualClock, ReportCollector,
		RetentionPurger, RotatingFile, RotationPolicy, Sink,
	};
	use seglog_deps::chrono::{DateTime, Duration, Local, TimeZone};
	use seglog_deps::zip::ZipArchive;
	use seglog_err::*;
	use seglog_test::*;
	use std::fs::{create_dir_all, read_dir, read_to_string, remove_dir_all, write, File};
	use std::io::Read;
	use std::path::{Path, PathBuf};
	use std::sync::mpsc::sync_channel;
	use std::sync::Arc;

	fn noon() -> DateTime<Local> {
		Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
	}

	fn policy(max_size_bytes: u64) -> RotationPolicy {
		RotationPolicy {
			max_size_bytes,
			max_age_days: 7,
			max_archive_count: 0,
			compress_on_rotate: false,
		}
	}

	fn open(
		path: &Path,
		policy: RotationPolicy,
	) -> Result<(RotatingFile, Arc<ManualClock>, Arc<ReportCollector>), Error> {
		let clock = Arc::new(ManualClock::new(noon()));
		let reporter = Arc::new(ReportCollector::new());
		let file = LogBuilder::build_rotating_file(
			path.to_path_buf(),
			policy,
			clock.clone(),
			reporter.clone(),
		)?;
		Ok((file, clock, reporter))
	}

	// sorted file names in `directory`
	fn names(directory: &Path) -> Result<Vec<String>, Error> {
		let mut ret = vec![];
		for entry in read_dir(directory)? {
			ret.push(entry?.file_name().to_str().unwrap().to_string());
		}
		ret.sort();
		Ok(ret)
	}

	#[test]
	fn test_size_rotation() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, _clock, reporter) = open(&path, policy(100))?;
		let next_rotation = file.status()?.next_rotation;

		let a = [b'a'; 60];
		let b = [b'b'; 60];
		file.write(&a)?;
		file.write(&b)?;
		assert_eq!(file.status()?.current_size, 120);
		assert!(file.need_rotate()?);

		// over the limit, sealed before these bytes land
		file.write(b"cccc")?;
		file.write(&[b'd'; 100])?;
		file.write(b"eeee")?;
		file.sync_housekeeping()?;

		let status = file.status()?;
		assert_eq!(status.sequence, 2);
		assert_eq!(status.current_size, 4);
		assert_eq!(status.next_rotation, next_rotation);

		assert_eq!(
			names(&directory)?,
			vec![
				"app.log",
				"app.log.2024-06-15.00",
				"app.log.2024-06-15.01"
			]
		);
		let first = read_to_string(directory.join("app.log.2024-06-15.00"))?;
		assert_eq!(first.len(), 120);
		assert!(first.starts_with("aaa"));
		assert!(first.ends_with("bbb"));
		let second = read_to_string(directory.join("app.log.2024-06-15.01"))?;
		assert_eq!(second.len(), 104);
		assert_eq!(read_to_string(&path)?, "eeee");
		assert!(reporter.is_empty());

		file.close()?;
		Ok(())
	}

	#[test]
	fn test_oversized_write_sealed_on_request() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, _clock, _reporter) = open(&path, policy(100))?;

		// a single write past the limit lands whole
		file.write(&[b'x'; 101])?;
		assert_eq!(file.status()?.current_size, 101);
		assert!(file.need_rotate()?);

		assert!(file.rotate_if_needed()?);
		assert!(!file.need_rotate()?);
		assert!(!file.rotate_if_needed()?);
		file.sync_housekeeping()?;

		assert_eq!(
			read_to_string(directory.join("app.log.2024-06-15.00"))?.len(),
			101
		);
		assert_eq!(read_to_string(&path)?.len(), 0);
		assert_eq!(file.status()?.sequence, 1);
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_time_rotation() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, clock, reporter) = open(&path, policy(10))?;
		let midnight = Local.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap();
		assert_eq!(file.status()?.next_rotation, midnight);

		// a size rotation first, so the time rotation gets index 01
		file.write(b"0123456789AB")?;
		file.write(b"x")?;
		assert_eq!(file.status()?.sequence, 1);

		clock.set(midnight + Duration::seconds(1));
		assert!(file.need_rotate()?);
		file.write(b"y")?;
		file.sync_housekeeping()?;

		let status = file.status()?;
		assert_eq!(status.sequence, 0);
		assert_eq!(status.current_size, 1);
		assert_eq!(status.next_rotation, midnight + Duration::days(1));

		assert_eq!(
			read_to_string(directory.join("app.log.2024-06-15.00"))?,
			"0123456789AB"
		);
		assert_eq!(read_to_string(directory.join("app.log.2024-06-15.01"))?, "x");
		assert_eq!(read_to_string(&path)?, "y");

		// the next day's size rotation starts at 00 under the new date
		file.write(b"0123456789AB")?;
		file.write(b"z")?;
		file.sync_housekeeping()?;
		assert_eq!(
			read_to_string(directory.join("app.log.2024-06-16.00"))?,
			"y0123456789AB"
		);
		assert!(reporter.is_empty());
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_time_rotation_seals_empty_file() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, clock, _reporter) = open(&path, policy(1024))?;

		clock.advance(Duration::days(1));
		assert!(file.rotate_if_needed()?);
		file.sync_housekeeping()?;

		let archive = directory.join("app.log.2024-06-15.00");
		assert!(archive.exists());
		assert_eq!(read_to_string(archive)?.len(), 0);
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_archive_path() -> Result<(), Error> {
		let next_rotation = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
		assert_eq!(
			RotatingFile::archive_path(Path::new("/var/log/app.log"), next_rotation, 3),
			PathBuf::from("/var/log/app.log.2023-12-31.03")
		);
		assert_eq!(
			RotatingFile::archive_path(Path::new("app.log"), next_rotation, 12),
			PathBuf::from("app.log.2023-12-31.12")
		);
		assert_eq!(
			Archiver::zip_path(Path::new("app.log.2023-12-31.03")),
			PathBuf::from("app.log.2023-12-31.03.zip")
		);
		Ok(())
	}

	#[test]
	fn test_restart_seeds_size() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		write(&path, [b'p'; 80])?;

		let (file, _clock, _reporter) = open(&path, policy(100))?;
		assert_eq!(file.status()?.current_size, 80);

		file.write(&[b'q'; 30])?;
		file.write(b"r")?;
		file.sync_housekeeping()?;

		let archive = read_to_string(directory.join("app.log.2024-06-15.00"))?;
		assert_eq!(archive.len(), 110);
		assert!(archive.starts_with("ppp"));
		assert_eq!(read_to_string(&path)?, "r");
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_purge_age_and_count() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		for name in [
			"app.log",
			"app.log.2024-06-01.00",
			"app.log.2024-06-05.00",
			"app.log.2024-06-06.03.zip",
			"app.log.2024-06-07.00",
			"app.log.2024-06-08.00",
			"app.log.2024-06-10.00",
			"app.log.2024-06-10.01.zip",
			"app.log.2024-06-12.00",
			"app.log.notadate",
			"other.log.2024-01-01.00",
		] {
			write(directory.join(name), b"data")?;
		}
		create_dir_all(directory.join("app.log.2024-01-01.00.d"))?;

		let reporter = ReportCollector::new();
		let purger = RetentionPurger::new(
			directory.clone(),
			"app.log.".to_string(),
			directory.join("app.log"),
			7,
			3,
		);
		let reference = Local.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap();
		let summary = purger.purge(reference, &reporter);

		// cutoff is 2024-06-07, then the oldest are trimmed down to 3
		assert_eq!(summary.deleted.len(), 5);
		assert_eq!(
			summary.retained,
			vec![
				directory.join("app.log.2024-06-10.00"),
				directory.join("app.log.2024-06-10.01.zip"),
				directory.join("app.log.2024-06-12.00"),
			]
		);
		assert_eq!(
			names(&directory)?,
			vec![
				"app.log",
				"app.log.2024-01-01.00.d",
				"app.log.2024-06-10.00",
				"app.log.2024-06-10.01.zip",
				"app.log.2024-06-12.00",
				"app.log.notadate",
				"other.log.2024-01-01.00",
			]
		);
		assert!(reporter.is_empty());

		// unlimited count keeps everything inside the age window
		let purger = RetentionPurger::new(
			directory.clone(),
			"app.log.".to_string(),
			directory.join("app.log"),
			7,
			0,
		);
		let summary = purger.purge(reference, &reporter);
		assert!(summary.deleted.is_empty());
		assert_eq!(summary.retained.len(), 3);
		Ok(())
	}

	#[test]
	fn test_purge_never_deletes_active() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let active = directory.join("app.log.2020-01-01.00");
		write(&active, b"active")?;
		write(directory.join("app.log.2020-01-02.00"), b"old")?;

		let reporter = ReportCollector::new();
		let purger = RetentionPurger::new(
			directory.clone(),
			"app.log.".to_string(),
			active.clone(),
			1,
			1,
		);
		let summary = purger.purge(noon(), &reporter);
		assert_eq!(summary.deleted, vec![directory.join("app.log.2020-01-02.00")]);
		assert!(active.exists());

		// a missing directory is reported, not fatal
		let purger = RetentionPurger::for_active_file(
			&directory.join("missing").join("app.log"),
			&policy(100),
		)?;
		let summary = purger.purge(noon(), &reporter);
		assert!(summary.deleted.is_empty());
		assert!(reporter.contains("purge could not scan"));
		Ok(())
	}

	#[test]
	fn test_queued_purge_uses_latest_request() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		for name in [
			"app.log",
			"app.log.2024-06-10.00",
			"app.log.2024-06-11.00",
			"app.log.2024-06-12.00",
		] {
			write(directory.join(name), b"data")?;
		}
		let purger = |max_archive_count| {
			RetentionPurger::new(
				directory.clone(),
				"app.log.".to_string(),
				directory.join("app.log"),
				30,
				max_archive_count,
			)
		};

		let reporter = Arc::new(ReportCollector::new());
		let housekeeper = Housekeeper::start(reporter.clone())?;

		// the worker blocks replying until we receive
		let (reply_tx, reply_rx) = sync_channel(0);
		assert!(housekeeper.submit(HousekeeperTask::Sync(reply_tx), reporter.as_ref()));

		// both requests arrive while the first is still queued
		housekeeper.purge(purger(0), noon(), reporter.as_ref());
		housekeeper.purge(purger(1), noon(), reporter.as_ref());

		reply_rx.recv()?;
		housekeeper.sync()?;

		assert_eq!(
			names(&directory)?,
			vec!["app.log", "app.log.2024-06-12.00"]
		);
		assert!(reporter.is_empty());
		housekeeper.shutdown()?;
		Ok(())
	}

	#[test]
	fn test_purge_on_rotation() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let mut policy = policy(1024);
		policy.max_archive_count = 2;
		let (file, _clock, reporter) = open(&path, policy)?;

		for i in 0..5 {
			file.write(format!("record {}\n", i).as_bytes())?;
			file.rotate()?;
		}
		file.sync_housekeeping()?;

		assert_eq!(
			names(&directory)?,
			vec![
				"app.log",
				"app.log.2024-06-15.03",
				"app.log.2024-06-15.04"
			]
		);
		assert_eq!(
			read_to_string(directory.join("app.log.2024-06-15.04"))?,
			"record 4\n"
		);
		assert!(reporter.is_empty());
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_compress_on_rotate() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let mut policy = policy(1024);
		policy.compress_on_rotate = true;
		let (file, _clock, reporter) = open(&path, policy)?;

		file.write(b"hello world\n")?;
		file.rotate()?;
		file.sync_housekeeping()?;

		assert_eq!(
			names(&directory)?,
			vec!["app.log", "app.log.2024-06-15.00.zip"]
		);

		let mut archive = ZipArchive::new(File::open(
			directory.join("app.log.2024-06-15.00.zip"),
		)?)?;
		assert_eq!(archive.len(), 1);
		let mut entry = archive.by_index(0)?;
		assert_eq!(entry.name(), "app.log.2024-06-15.00");
		let mut contents = String::new();
		entry.read_to_string(&mut contents)?;
		assert_eq!(contents, "hello world\n");
		assert!(reporter.is_empty());

		file.close()?;
		Ok(())
	}

	#[test]
	fn test_compress_failure() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let mut policy = policy(1024);
		policy.compress_on_rotate = true;
		let (file, _clock, reporter) = open(&path, policy)?;

		// the zip can't be created over a directory
		create_dir_all(directory.join("app.log.2024-06-15.00.zip"))?;
		file.write(b"kept\n")?;
		file.rotate()?;
		file.sync_housekeeping()?;

		assert!(reporter.contains("could not compress"));
		assert_eq!(
			read_to_string(directory.join("app.log.2024-06-15.00"))?,
			"kept\n"
		);
		assert!(directory.join("app.log.2024-06-15.00.zip").is_dir());

		// logging carries on
		file.write(b"more\n")?;
		assert_eq!(read_to_string(&path)?, "more\n");
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_archiver() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let archive = directory.join("app.log.2024-06-15.00");
		let data = "line\n".repeat(1000);
		write(&archive, &data)?;

		let zip_path = Archiver::compress(&archive)?;
		assert_eq!(zip_path, directory.join("app.log.2024-06-15.00.zip"));
		assert!(!archive.exists());
		assert!(zip_path.metadata()?.len() < data.len() as u64);

		let mut zip = ZipArchive::new(File::open(&zip_path)?)?;
		let mut contents = String::new();
		zip.by_name("app.log.2024-06-15.00")?
			.read_to_string(&mut contents)?;
		assert_eq!(contents, data);

		// missing source
		let res = Archiver::compress(&directory.join("missing"));
		assert!(matches!(res.unwrap_err().kind(), ErrorKind::IO(_)));
		assert!(!directory.join("missing.zip").exists());

		// not a regular file
		create_dir_all(directory.join("dir"))?;
		let res = Archiver::compress(&directory.join("dir"));
		assert!(matches!(
			res.unwrap_err().kind(),
			ErrorKind::IllegalArgument(_)
		));
		Ok(())
	}

	#[test]
	fn test_rename_failure() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, _clock, reporter) = open(&path, policy(1024))?;

		// a file can't be renamed over a directory
		create_dir_all(directory.join("app.log.2024-06-15.00").join("x"))?;
		file.write(b"first\n")?;
		assert!(file.rotate().is_err());
		assert!(reporter.contains("could not rename"));

		let status = file.status()?;
		assert_eq!(status.sequence, 0);
		assert_eq!(status.current_size, 6);
		assert!(!status.degraded);

		file.write(b"second\n")?;
		file.sync_housekeeping()?;
		assert_eq!(read_to_string(&path)?, "first\nsecond\n");
		file.close()?;
		Ok(())
	}

	#[test]
	fn test_unavailable_active_file() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory()).join("logs");
		create_dir_all(&directory)?;
		let path = directory.join("app.log");
		let (file, _clock, reporter) = open(&path, policy(1024))?;

		file.write(b"a\n")?;
		remove_dir_all(&directory)?;
		assert!(file.rotate().is_err());
		assert!(reporter.contains("active file unavailable"));
		assert!(file.status()?.degraded);

		// held in memory
		file.write(b"b\n")?;
		let status = file.status()?;
		assert_eq!(status.backlog_bytes, 2);

		// past the backlog capacity, dropped
		file.write(&vec![b'z'; BACKLOG_CAPACITY])?;
		let status = file.status()?;
		assert_eq!(status.backlog_bytes, 2);
		assert_eq!(status.dropped_bytes, BACKLOG_CAPACITY as u64);
		assert!(reporter.contains("log records dropped"));

		// the backlog goes out first once the file can be opened again
		create_dir_all(&directory)?;
		file.write(b"c\n")?;
		let status = file.status()?;
		assert!(!status.degraded);
		assert_eq!(status.backlog_bytes, 0);
		assert_eq!(status.current_size, 4);
		assert_eq!(read_to_string(&path)?, "b\nc\n");

		file.close()?;
		Ok(())
	}

	#[test]
	fn test_close() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, _clock, _reporter) = open(&path, policy(1024))?;

		file.write(b"before\n")?;
		file.close()?;
		let res = file.write(b"after\n");
		assert!(res.unwrap_err().to_string().contains("write after close"));
		assert!(file.rotate().is_err());

		// closing twice is fine
		file.close()?;
		assert_eq!(read_to_string(&path)?, "before\n");
		Ok(())
	}

	#[test]
	fn test_logger_file() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("nested").join("app.log");
		let clock = Arc::new(ManualClock::new(noon()));
		let reporter = Arc::new(ReportCollector::new());
		let log = LogBuilder::build_log_with(
			LogConfig {
				log_path: path.display().to_string(),
				rotation_size_kb: 1,
				..Default::default()
			},
			reporter.clone(),
			clock.clone(),
		)?;

		assert!(!log.need_rotate()?);
		assert!(log.emit(LogLevel::Info, "app", "one"));
		assert!(!log.emit(LogLevel::Debug, "app", "two"));
		log.flush()?;
		assert_eq!(read_to_string(&path)?, "2024/06/15 12:00:00 I: one\n");

		// past midnight the next record lands in a fresh file
		clock.set(Local.with_ymd_and_hms(2024, 6, 16, 9, 30, 0).unwrap());
		assert!(log.need_rotate()?);
		log.emit(LogLevel::Warn, "app", "three");
		log.wait_housekeeping()?;
		assert_eq!(read_to_string(&path)?, "2024/06/16 09:30:00 W: three\n");
		assert_eq!(
			read_to_string(directory.join("nested").join("app.log.2024-06-15.00"))?,
			"2024/06/15 12:00:00 I: one\n"
		);

		log.rotate()?;
		assert!(directory
			.join("nested")
			.join("app.log.2024-06-16.00")
			.exists());

		log.close()?;
		assert!(log.emit(LogLevel::Info, "app", "late"));
		assert!(reporter.contains("write after close"));
		Ok(())
	}

	#[test]
	fn test_reconfigure_policy() -> Result<(), Error> {
		let test_info = test_info!()?;
		let directory = PathBuf::from(test_info.directory());
		let path = directory.join("app.log");
		let (file, clock, reporter) = open(&path, policy(1024 * 1024))?;
		let file = Arc::new(file);
		let config = LogConfig {
			log_path: path.display().to_string(),
			..Default::default()
		};
		let log =
			LogBuilder::build_log_with_sink(config.clone(), file.clone(), reporter, clock.clone())?;
		assert_eq!(clock.now(), noon());

		log.reconfigure(&LogConfig {
			rotation_size_kb: 1,
			max_archive_count: 5,
			compress_on_rotate: true,
			..config
		})?;
		let policy = file.policy()?;
		assert_eq!(policy.max_size_bytes, 1024);
		assert_eq!(policy.max_archive_count, 5);
		assert!(policy.compress_on_rotate);

		for _ in 0..30 {
			log.emit(LogLevel::Info, "app", "0123456789012345678901234567890123456789");
		}
		log.wait_housekeeping()?;
		assert!(directory.join("app.log.2024-06-15.00.zip").exists());
		log.close()?;
		Ok(())
	}
}
