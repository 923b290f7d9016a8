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

//! This module defines the error types and the result type for this library.

/// The error raised when a builder refuses to produce a parameter set.
#[non_exhaustive] // Adding new enum fields doesn't break the downstream build.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A field without default value is not set.
    #[error("The required field {0} is not set")]
    MissingRequiredField(&'static str),
    /// A field is set with a value the parameter set cannot represent.
    #[error("The value {value} of {field} is out of range")]
    OutOfRange {
        /// The name of the field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },
    /// The device or destination addresses don't match the MAC address mode.
    #[error("Invalid address config: {0}")]
    InvalidAddress(&'static str),
    /// The STS config and the STS related fields are inconsistent.
    #[error("Invalid STS config: {0}")]
    InvalidStsConfig(&'static str),
    /// The measurement focus ratios don't match the AoA result request mode.
    #[error("Invalid interleaving ratio: {0}")]
    InvalidInterleavingRatio(&'static str),
    /// The range data notification thresholds are not allowed by the notification config.
    #[error("Invalid range data notification config: {0}")]
    InvalidRangeDataNtfConfig(&'static str),
    /// The DL-TDoA related fields are inconsistent with the DT-Tag role.
    #[error("Invalid DL-TDoA config: {0}")]
    InvalidDlTdoaConfig(&'static str),
}

/// The error raised when a bundle cannot be decoded.
#[non_exhaustive] // Adding new enum fields doesn't break the downstream build.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The protocol name of the bundle is missing or doesn't match.
    #[error("Invalid protocol: {0:?}")]
    InvalidProtocol(Option<String>),
    /// The bundle version is not supported.
    #[error("Unsupported bundle version: {0}")]
    UnsupportedVersion(i32),
    /// A required key is absent.
    #[error("The required key {0} is absent")]
    MissingKey(String),
    /// The key is present, but holds another kind of value.
    #[error("The key {key} holds a {found} value, expected {expected}")]
    TypeMismatch {
        /// The key of the entry.
        key: String,
        /// The expected kind of value.
        expected: &'static str,
        /// The actual kind of value.
        found: &'static str,
    },
    /// The value of the key cannot be converted to the field.
    #[error("The key {key} holds an invalid value: {value}")]
    InvalidValue {
        /// The key of the entry.
        key: String,
        /// The rejected value.
        value: String,
    },
    /// The protocol version is not in the "major.minor" format.
    #[error("Malformed protocol version: {0:?}")]
    MalformedProtocolVersion(String),
}

/// The error type for the uwb_support library.
#[non_exhaustive] // Adding new enum fields doesn't break the downstream build.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The parameters violate a FiRa constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The bundle doesn't follow any supported schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// The result type for the uwb_support library.
pub type Result<T> = std::result::Result<T, Error>;
