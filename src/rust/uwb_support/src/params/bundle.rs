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

//! This module defines the Bundle, the flat key/value map used to persist and exchange the
//! parameters, and the version dispatch shared by the decoders.

use std::collections::btree_map::{BTreeMap, Iter};

use log::{debug, error};

use crate::error::{Result, SchemaError};

/// The key of the schema version of the bundle.
pub const KEY_BUNDLE_VERSION: &str = "bundle_version";
/// The key of the protocol the bundle belongs to.
pub const KEY_PROTOCOL_NAME: &str = "protocol_name";
/// The protocol name of all the FiRa bundles.
pub const FIRA_PROTOCOL_NAME: &str = "fira";

/// A value stored in the Bundle.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum BundleValue {
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    String(String),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
    StringArray(Vec<String>),
}

impl BundleValue {
    /// The name of the value kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BundleValue::Int(_) => "int",
            BundleValue::Long(_) => "long",
            BundleValue::Double(_) => "double",
            BundleValue::Bool(_) => "bool",
            BundleValue::String(_) => "string",
            BundleValue::IntArray(_) => "int[]",
            BundleValue::LongArray(_) => "long[]",
            BundleValue::DoubleArray(_) => "double[]",
            BundleValue::BoolArray(_) => "bool[]",
            BundleValue::StringArray(_) => "string[]",
        }
    }
}

/// The flat key/value map. The keys are kept sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle tagged with the FiRa protocol name and the schema version.
    pub(crate) fn with_fira_header(version: i32) -> Self {
        let mut bundle = Self::new();
        bundle.put_string(KEY_PROTOCOL_NAME, FIRA_PROTOCOL_NAME);
        bundle.put_int(KEY_BUNDLE_VERSION, version);
        bundle
    }

    /// Insert the value, return the previous value of the key.
    pub fn put(&mut self, key: &str, value: BundleValue) -> Option<BundleValue> {
        self.entries.insert(key.to_owned(), value)
    }

    /// Insert an int value.
    pub fn put_int(&mut self, key: &str, value: i32) {
        self.put(key, BundleValue::Int(value));
    }

    /// Insert a long value.
    pub fn put_long(&mut self, key: &str, value: i64) {
        self.put(key, BundleValue::Long(value));
    }

    /// Insert a double value.
    pub fn put_double(&mut self, key: &str, value: f64) {
        self.put(key, BundleValue::Double(value));
    }

    /// Insert a bool value.
    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, BundleValue::Bool(value));
    }

    /// Insert a string value.
    pub fn put_string(&mut self, key: &str, value: &str) {
        self.put(key, BundleValue::String(value.to_owned()));
    }

    /// Insert an int array.
    pub fn put_int_array(&mut self, key: &str, value: Vec<i32>) {
        self.put(key, BundleValue::IntArray(value));
    }

    /// Insert a long array.
    pub fn put_long_array(&mut self, key: &str, value: Vec<i64>) {
        self.put(key, BundleValue::LongArray(value));
    }

    /// Remove the key, return its value.
    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    /// The value of the key.
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries in key order.
    pub fn iter(&self) -> Iter<'_, String, BundleValue> {
        self.entries.iter()
    }

    /// The int value of the key. A value of another kind is a TypeMismatch error.
    pub fn get_int(&self, key: &str) -> std::result::Result<Option<i32>, SchemaError> {
        self.get_typed(key, "int", |value| match value {
            BundleValue::Int(v) => Some(*v),
            _ => None,
        })
    }

    /// The long value of the key. A value of another kind is a TypeMismatch error.
    pub fn get_long(&self, key: &str) -> std::result::Result<Option<i64>, SchemaError> {
        self.get_typed(key, "long", |value| match value {
            BundleValue::Long(v) => Some(*v),
            _ => None,
        })
    }

    /// The double value of the key. A value of another kind is a TypeMismatch error.
    pub fn get_double(&self, key: &str) -> std::result::Result<Option<f64>, SchemaError> {
        self.get_typed(key, "double", |value| match value {
            BundleValue::Double(v) => Some(*v),
            _ => None,
        })
    }

    /// The bool value of the key. A value of another kind is a TypeMismatch error.
    pub fn get_bool(&self, key: &str) -> std::result::Result<Option<bool>, SchemaError> {
        self.get_typed(key, "bool", |value| match value {
            BundleValue::Bool(v) => Some(*v),
            _ => None,
        })
    }

    /// The string value of the key. A value of another kind is a TypeMismatch error.
    pub fn get_string(&self, key: &str) -> std::result::Result<Option<&str>, SchemaError> {
        self.get_typed(key, "string", |value| match value {
            BundleValue::String(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// The int array of the key. A value of another kind is a TypeMismatch error.
    pub fn get_int_array(&self, key: &str) -> std::result::Result<Option<&[i32]>, SchemaError> {
        self.get_typed(key, "int[]", |value| match value {
            BundleValue::IntArray(v) => Some(v.as_slice()),
            _ => None,
        })
    }

    /// The long array of the key. A value of another kind is a TypeMismatch error.
    pub fn get_long_array(&self, key: &str) -> std::result::Result<Option<&[i64]>, SchemaError> {
        self.get_typed(key, "long[]", |value| match value {
            BundleValue::LongArray(v) => Some(v.as_slice()),
            _ => None,
        })
    }

    fn get_typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a BundleValue) -> Option<T>,
    ) -> std::result::Result<Option<T>, SchemaError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| {
                error!("The key {} holds a {} value, expected {}", key, value.kind(), expected);
                SchemaError::TypeMismatch { key: key.to_owned(), expected, found: value.kind() }
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Bundle {
    type Item = (&'a String, &'a BundleValue);
    type IntoIter = Iter<'a, String, BundleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The decoder of one schema version.
pub(crate) type Decoder<T> = fn(&Bundle) -> Result<T>;

/// Check the FiRa protocol name, then decode the bundle with the decoder registered for its
/// schema version.
pub(crate) fn decode_versioned<T>(bundle: &Bundle, decoders: &[(i32, Decoder<T>)]) -> Result<T> {
    let protocol_name = bundle.get_string(KEY_PROTOCOL_NAME)?;
    if protocol_name != Some(FIRA_PROTOCOL_NAME) {
        error!("Invalid protocol: {:?}", protocol_name);
        return Err(SchemaError::InvalidProtocol(protocol_name.map(str::to_owned)).into());
    }

    let version = bundle
        .get_int(KEY_BUNDLE_VERSION)?
        .ok_or_else(|| SchemaError::MissingKey(KEY_BUNDLE_VERSION.to_owned()))?;
    let decode = decoders.iter().find(|(v, _)| *v == version).map(|(_, decode)| decode);
    match decode {
        Some(decode) => {
            debug!("Decoding the bundle with version {}", version);
            decode(bundle)
        }
        None => {
            error!("Unsupported bundle version: {}", version);
            Err(SchemaError::UnsupportedVersion(version).into())
        }
    }
}
