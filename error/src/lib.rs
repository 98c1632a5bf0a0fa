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


//! Error crate for seglog. All fallible functions in the workspace return
//! `Result<T, Error>`. An [`crate::Error`] carries an [`crate::ErrorKind`] which holds a
//! message describing the failure. The [`crate::err`] and [`crate::map_err`] macros build
//! errors from an [`crate::ErrKind`] selector.
//!
//! # Examples
//!
//!```
//! use seglog_err::*;
//!
//! fn check_path(path: &str) -> Result<(), Error> {
//!     if path.is_empty() {
//!         return Err(err!(ErrKind::Configuration, "log path required"));
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Error> {
//!     check_path("/tmp/app.log")?;
//!     let e = check_path("").unwrap_err();
//!     assert_eq!(e.kind(), ErrorKind::Configuration("log path required".to_string()));
//!
//!     // map a foreign error into an Error
//!     let v: Result<u8, Error> = map_err!("300".parse::<u8>(), ErrKind::IllegalArgument, "bad level");
//!     assert!(v.is_err());
//!     Ok(())
//! }
//!```

mod error;
mod macros;
mod public;

pub use crate::public::{ErrKind, Error, ErrorKind};
