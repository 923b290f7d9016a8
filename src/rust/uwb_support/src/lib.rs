// Copyright 2022, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides the FiRa session-open parameters and specification (capability)
//! parameters, together with the versioned bundle codec used to persist and exchange them.
//!
//! Both parameter sets are immutable once built. A [`params::Bundle`] is the flat key/value
//! form; `to_bundle()` always writes the current schema version, and `from_bundle()` accepts
//! every supported historical version.

#![warn(missing_docs)]

pub mod error;
pub mod params;

pub(crate) mod utils;

pub use error::{Error, Result, SchemaError, ValidationError};
