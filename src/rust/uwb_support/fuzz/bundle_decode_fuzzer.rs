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

#![no_main]

use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use uwb_support::params::{
    Bundle, BundleValue, DeviceRole, DeviceType, FiraOpenSessionParams,
    FiraOpenSessionParamsBuilder, FiraProtocolVersion, FiraSpecificationParams,
    FiraSpecificationParamsBuilder, MultiNodeMode, UwbAddress,
};

/// The parameter set whose decoder is fed.
#[derive(Arbitrary, Debug)]
enum Target {
    OpenSession,
    Specification,
}

/// The value written over an entry. Doubles are built from integers so the bundles stay
/// comparable.
#[derive(Arbitrary, Debug)]
enum Value {
    Int(i32),
    Long(i64),
    Double(i16),
    Bool(bool),
    String(String),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl From<Value> for BundleValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(v) => BundleValue::Int(v),
            Value::Long(v) => BundleValue::Long(v),
            Value::Double(v) => BundleValue::Double(v.into()),
            Value::Bool(v) => BundleValue::Bool(v),
            Value::String(v) => BundleValue::String(v),
            Value::IntArray(v) => BundleValue::IntArray(v),
            Value::LongArray(v) => BundleValue::LongArray(v),
        }
    }
}

/// The mutations applied to a valid bundle. The index selects one of its keys.
#[derive(Arbitrary, Debug)]
enum Mutation {
    Replace(u8, Value),
    Remove(u8),
}

fn seed_bundle(target: &Target) -> Bundle {
    match target {
        Target::OpenSession => {
            let mut builder = FiraOpenSessionParamsBuilder::new();
            builder
                .protocol_version(FiraProtocolVersion::new(1, 1))
                .session_id(1)
                .device_type(DeviceType::Controller)
                .device_role(DeviceRole::Initiator)
                .multi_node_mode(MultiNodeMode::Unicast)
                .device_address(UwbAddress::Short([1, 2]))
                .dest_address_list(vec![UwbAddress::Short([3, 4])]);
            builder.build().unwrap().to_bundle()
        }
        Target::Specification => {
            let mut builder = FiraSpecificationParamsBuilder::new();
            builder.supported_channels(vec![5, 9]);
            builder.build().to_bundle()
        }
    }
}

fn nth_key(bundle: &Bundle, index: u8) -> Option<String> {
    match bundle.len() {
        0 => None,
        len => bundle.iter().nth(index as usize % len).map(|(key, _)| key.clone()),
    }
}

fn mutate(bundle: &mut Bundle, mutation: Mutation) {
    match mutation {
        Mutation::Replace(index, value) => {
            if let Some(key) = nth_key(bundle, index) {
                bundle.put(&key, value.into());
            }
        }
        Mutation::Remove(index) => {
            if let Some(key) = nth_key(bundle, index) {
                bundle.remove(&key);
            }
        }
    }
}

fuzz_target!(|input: (Target, Vec<Mutation>)| {
    let (target, mutations) = input;
    let mut bundle = seed_bundle(&target);
    for mutation in mutations.into_iter() {
        mutate(&mut bundle, mutation);
    }

    // Whatever the decoder accepts must survive a round trip.
    match target {
        Target::OpenSession => {
            if let Ok(params) = FiraOpenSessionParams::from_bundle(&bundle) {
                let encoded = params.to_bundle();
                let decoded = FiraOpenSessionParams::from_bundle(&encoded).unwrap();
                assert_eq!(decoded, params);
                assert_eq!(decoded.to_bundle(), encoded);
            }
        }
        Target::Specification => {
            if let Ok(params) = FiraSpecificationParams::from_bundle(&bundle) {
                let encoded = params.to_bundle();
                let decoded = FiraSpecificationParams::from_bundle(&encoded).unwrap();
                assert_eq!(decoded.to_bundle(), encoded);
            }
        }
    }
});
