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
use crate::types::Archiver;
use seglog_deps::chrono::{DateTime, Datelike, Local, Timelike};
use seglog_deps::zip::write::FileOptions;
use seglog_deps::zip::{CompressionMethod, DateTime as ZipDateTime, ZipWriter};
use seglog_err::*;
use std::fs::{metadata, remove_file, File, Metadata};
use std::io::{copy, Write};
use std::path::{Path, PathBuf};

impl Archiver {
	/// The path `archive` is compressed to: its name with `.zip` appended.
	pub fn zip_path(archive: &Path) -> PathBuf {
		let mut name = archive.as_os_str().to_owned();
		name.push(ZIP_EXTENSION);
		PathBuf::from(name)
	}

	/// Compress `archive` into `<archive>.zip`, a zip file holding one deflated entry named
	/// after the archive with its modification time and unix permissions. On success the
	/// uncompressed archive is deleted and the zip's path is returned. On failure any partial
	/// zip is removed and the uncompressed archive is left alone.
	///
	/// # Errors
	///
	/// [`seglog_err::ErrKind::IO`] - if the archive can't be read or the zip can't be
	/// written.
	///
	/// [`seglog_err::ErrKind::Archive`] - if the zip encoder fails.
	///
	/// [`seglog_err::ErrKind::IllegalArgument`] - if `archive` is not a regular file.
	pub fn compress(archive: &Path) -> Result<PathBuf, Error> {
		let zip_path = Self::zip_path(archive);

		match Self::write_zip(archive, &zip_path) {
			Ok(()) => {
				remove_file(archive)?;
				Ok(zip_path)
			}
			Err(e) => {
				if zip_path.is_file() {
					let _ = remove_file(&zip_path);
				}
				Err(e)
			}
		}
	}

	fn write_zip(archive: &Path, zip_path: &Path) -> Result<(), Error> {
		let metadata = metadata(archive)?;
		if !metadata.is_file() {
			return Err(err!(
				ErrKind::IllegalArgument,
				"'{}' is not a regular file",
				archive.display()
			));
		}

		let name = match archive.file_name().and_then(|name| name.to_str()) {
			Some(name) => name.to_string(),
			None => {
				return Err(err!(
					ErrKind::IllegalArgument,
					"'{}' has no usable file name",
					archive.display()
				))
			}
		};

		let mut input = File::open(archive)?;
		let output = File::create(zip_path)?;
		let mut writer = ZipWriter::new(output);
		writer.start_file(name, Self::entry_options(&metadata))?;
		copy(&mut input, &mut writer)?;
		let mut output = writer.finish()?;
		output.flush()?;
		Ok(())
	}

	fn entry_options(metadata: &Metadata) -> FileOptions {
		let mut options = FileOptions::default().compression_method(CompressionMethod::Deflated);

		if let Ok(modified) = metadata.modified() {
			let modified: DateTime<Local> = modified.into();
			// zip timestamps can't hold dates before 1980, keep the default in that case
			if let Ok(modified) = ZipDateTime::from_date_and_time(
				modified.year() as u16,
				modified.month() as u8,
				modified.day() as u8,
				modified.hour() as u8,
				modified.minute() as u8,
				modified.second() as u8,
			) {
				options = options.last_modified_time(modified);
			}
		}

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			options = options.unix_permissions(metadata.permissions().mode());
		}

		options
	}
}
