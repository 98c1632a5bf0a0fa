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

//! Third-party crates used by the seglog workspace. Member crates depend on this crate and
//! reach the ecosystem through its re-exports so that versions are pinned in one place.

pub use arc_swap;
pub use backtrace;
pub use chrono;
pub use colored;
pub use failure;
pub use failure_derive;
pub use zip;
