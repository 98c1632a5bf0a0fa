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


// These are local constants used in the logging crate

// the literal log path that selects standard output
pub(crate) const STDOUT_PATH: &str = "stdout";
// used when max_age_days <= 0
pub(crate) const DEFAULT_MAX_AGE_DAYS: i32 = 7;
// used when rotation_size_kb <= 0 (100 MB)
pub(crate) const DEFAULT_ROTATION_SIZE_KB: i64 = 102_400;
// days added to max_age_days before computing the purge cutoff
pub(crate) const PURGE_SLACK_DAYS: i64 = 2;
// date part of an archive name
pub(crate) const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";
// length of a formatted ARCHIVE_DATE_FORMAT
pub(crate) const ARCHIVE_DATE_LEN: usize = 10;
// timestamp at the start of each line
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
// appended to a compressed archive's name
pub(crate) const ZIP_EXTENSION: &str = ".zip";
// attempts to open the fresh active file after a rotation
pub(crate) const REOPEN_ATTEMPTS: usize = 3;
// bytes held in memory while the active file can't be opened
pub(crate) const BACKLOG_CAPACITY: usize = 1024 * 1024;
// pending background tasks per rotating file
pub(crate) const HOUSEKEEPER_QUEUE_SIZE: usize = 16;
