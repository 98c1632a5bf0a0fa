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


/// Build an [`crate::Error`] from an [`crate::ErrKind`] and a message. The message may be a
/// format string followed by its arguments.
#[macro_export]
macro_rules! err {
	($kind:expr, $msg:expr, $($param:tt)*) => {{
                use seglog_err::err;
                let msg = &format!($msg, $($param)*)[..];
                err!($kind, msg)
        }};
	($kind:expr, $msg:expr) => {{
		use seglog_err::{ErrKind, ErrorKind, Error};
		let msg = $msg.to_string();
		let error: Error = match $kind {
			ErrKind::IO => ErrorKind::IO(msg).into(),
			ErrKind::Log => ErrorKind::Log(msg).into(),
			ErrKind::Configuration => ErrorKind::Configuration(msg).into(),
			ErrKind::IllegalArgument => ErrorKind::IllegalArgument(msg).into(),
			ErrKind::IllegalState => ErrorKind::IllegalState(msg).into(),
			ErrKind::Poison => ErrorKind::Poison(msg).into(),
			ErrKind::Utf8 => ErrorKind::Utf8(msg).into(),
			ErrKind::Archive => ErrorKind::Archive(msg).into(),
			ErrKind::Test => ErrorKind::Test(msg).into(),
		};
		error
	}};
}

/// Map the error of a [`std::result::Result`] into an [`crate::Error`] of the specified
/// [`crate::ErrKind`], optionally prefixing a message.
#[macro_export]
macro_rules! map_err {
	($in_err:expr, $kind:expr) => {{
		use seglog_err::map_err;
		map_err!($in_err, $kind, "")
	}};
	($in_err:expr, $kind:expr, $msg:expr) => {{
		use seglog_err::{ErrKind, Error, ErrorKind};
		$in_err.map_err(|e| -> Error {
			let msg = format!("{}: {}", $msg, e);
			match $kind {
				ErrKind::IO => ErrorKind::IO(msg).into(),
				ErrKind::Log => ErrorKind::Log(msg).into(),
				ErrKind::Configuration => ErrorKind::Configuration(msg).into(),
				ErrKind::IllegalArgument => ErrorKind::IllegalArgument(msg).into(),
				ErrKind::IllegalState => ErrorKind::IllegalState(msg).into(),
				ErrKind::Poison => ErrorKind::Poison(msg).into(),
				ErrKind::Utf8 => ErrorKind::Utf8(msg).into(),
				ErrKind::Archive => ErrorKind::Archive(msg).into(),
				ErrKind::Test => ErrorKind::Test(msg).into(),
			}
		})
	}};
}
