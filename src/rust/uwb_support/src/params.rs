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

//! This module provides the FiRa session parameters, the capability parameters and their
//! conversion to and from a [`Bundle`].

pub(super) mod utils;

pub mod bundle;
pub mod fira_open_session_params;
pub mod fira_params;
pub mod fira_specification_params;

mod fira_open_session_codec;

// Re-export params from all of the sub-modules.
pub use bundle::*;
pub use fira_open_session_params::*;
pub use fira_params::*;
pub use fira_specification_params::*;
