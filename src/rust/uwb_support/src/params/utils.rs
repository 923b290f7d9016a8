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

use log::error;
use num_traits::FromPrimitive;

use crate::error::{SchemaError, ValidationError};
use crate::params::bundle::Bundle;
use crate::params::fira_params::{FiraProtocolVersion, MacAddressMode, UwbAddress};

pub fn validate(value: bool, err: ValidationError) -> Result<(), ValidationError> {
    match value {
        true => Ok(()),
        false => {
            error!("{}", err);
            Err(err)
        }
    }
}

pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or_else(|| {
        error!("The required field {} is not set", field);
        ValidationError::MissingRequiredField(field)
    })
}

/// Narrow the value to u32. All values in [0, 2^32) keep their identity.
pub fn narrow_u32(value: u64, field: &'static str) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| {
        error!("{} should fit in an unsigned 32-bit integer: {}", field, value);
        ValidationError::OutOfRange { field, value }
    })
}

/// Reinterpret the bits of the unsigned value as the signed int stored in the bundle.
pub fn u32_to_bundle_int(value: u32) -> i32 {
    value as i32
}

pub fn bundle_int_to_u32(value: i32) -> u32 {
    value as u32
}

/// Each byte is stored as a sign-extended int.
pub fn bytes_to_int_array(bytes: &[u8]) -> Vec<i32> {
    bytes.iter().map(|b| *b as i8 as i32).collect()
}

pub fn int_array_to_bytes(values: &[i32], key: &str) -> Result<Vec<u8>, SchemaError> {
    values
        .iter()
        .map(|v| i8::try_from(*v).map(|b| b as u8).map_err(|_| invalid_value(key, v)))
        .collect()
}

/// The address is stored as a big-endian long, with the address bytes first and padded with
/// zeros.
pub fn uwb_address_to_long(address: &UwbAddress) -> i64 {
    let mut buf = [0_u8; 8];
    let bytes = address.as_bytes();
    buf[..bytes.len()].copy_from_slice(bytes);
    i64::from_be_bytes(buf)
}

/// The width of the address is given by the MAC address mode, not by the long value.
pub fn long_to_uwb_address(value: i64, mode: MacAddressMode) -> UwbAddress {
    let buf = value.to_be_bytes();
    match mode.address_len() {
        8 => UwbAddress::Extended(buf),
        _ => UwbAddress::Short([buf[0], buf[1]]),
    }
}

pub fn invalid_value(key: &str, value: impl ToString) -> SchemaError {
    let value = value.to_string();
    error!("The key {} holds an invalid value: {}", key, value);
    SchemaError::InvalidValue { key: key.to_owned(), value }
}

pub fn require_key<T>(value: Option<T>, key: &str) -> Result<T, SchemaError> {
    value.ok_or_else(|| {
        error!("The required key {} is absent", key);
        SchemaError::MissingKey(key.to_owned())
    })
}

/// Read the int and convert it to the field type.
pub fn read_int<T: TryFrom<i32>>(bundle: &Bundle, key: &str) -> Result<Option<T>, SchemaError> {
    bundle
        .get_int(key)?
        .map(|v| T::try_from(v).map_err(|_| invalid_value(key, v)))
        .transpose()
}

/// Read the int holding the bits of an unsigned 32-bit value.
pub fn read_u32(bundle: &Bundle, key: &str) -> Result<Option<u32>, SchemaError> {
    Ok(bundle.get_int(key)?.map(bundle_int_to_u32))
}

/// Read the long holding the bits of an unsigned 64-bit value.
pub fn read_u64(bundle: &Bundle, key: &str) -> Result<Option<u64>, SchemaError> {
    Ok(bundle.get_long(key)?.map(|value| value as u64))
}

/// Read the int code of an enum.
pub fn read_enum<T: FromPrimitive>(bundle: &Bundle, key: &str) -> Result<Option<T>, SchemaError> {
    bundle.get_int(key)?.map(|v| T::from_i32(v).ok_or_else(|| invalid_value(key, v))).transpose()
}

pub fn read_bytes(bundle: &Bundle, key: &str) -> Result<Option<Vec<u8>>, SchemaError> {
    bundle.get_int_array(key)?.map(|values| int_array_to_bytes(values, key)).transpose()
}

pub fn read_protocol_version(
    bundle: &Bundle,
    key: &str,
) -> Result<Option<FiraProtocolVersion>, SchemaError> {
    bundle.get_string(key)?.map(str::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::params::fira_params::DeviceRole;
    use crate::utils::init_test_logging;

    #[test]
    fn test_validate() {
        init_test_logging();

        assert_eq!(validate(true, ValidationError::InvalidAddress("foo")), Ok(()));
        assert_eq!(
            validate(false, ValidationError::InvalidAddress("foo")),
            Err(ValidationError::InvalidAddress("foo"))
        );
    }

    #[test]
    fn test_narrow_u32() {
        assert_eq!(narrow_u32(0, "session_id"), Ok(0));
        assert_eq!(narrow_u32(u32::MAX as u64, "session_id"), Ok(u32::MAX));
        assert_eq!(
            narrow_u32(1 << 32, "session_id"),
            Err(ValidationError::OutOfRange { field: "session_id", value: 1 << 32 })
        );
    }

    #[test]
    fn test_convert_u32_bundle_int() {
        assert_eq!(u32_to_bundle_int(4294967295), -1);
        assert_eq!(u32_to_bundle_int(0x8000_0000), i32::MIN);
        assert_eq!(bundle_int_to_u32(-1), 4294967295);
        assert_eq!(bundle_int_to_u32(u32_to_bundle_int(0x1234_5678)), 0x1234_5678);
    }

    #[test]
    fn test_convert_bytes_int_array() {
        let bytes: Vec<u8> = (0..=255).collect();
        let values = bytes_to_int_array(&bytes);
        assert_eq!(values[0x7F], 127);
        assert_eq!(values[0x80], -128);
        assert_eq!(values[0xFF], -1);
        assert_eq!(int_array_to_bytes(&values, "key"), Ok(bytes));

        assert!(int_array_to_bytes(&[128], "key").is_err());
        assert!(int_array_to_bytes(&[-129], "key").is_err());
    }

    #[test]
    fn test_convert_uwb_address_long() {
        let short = UwbAddress::Short([0x12, 0x34]);
        assert_eq!(uwb_address_to_long(&short), 0x1234_0000_0000_0000);
        assert_eq!(
            long_to_uwb_address(0x1234_0000_0000_0000, MacAddressMode::MacAddress2Bytes),
            short
        );

        let extended = UwbAddress::Extended([0xFE, 2, 3, 4, 5, 6, 7, 8]);
        let value = uwb_address_to_long(&extended);
        assert!(value < 0);
        assert_eq!(long_to_uwb_address(value, MacAddressMode::MacAddress8Bytes), extended);

        // The width comes from the mode only.
        assert_eq!(
            long_to_uwb_address(value, MacAddressMode::MacAddress8Bytes2BytesHeader),
            UwbAddress::Short([0xFE, 2])
        );
    }

    #[test]
    fn test_read_helpers() {
        init_test_logging();

        let mut bundle = Bundle::new();
        bundle.put_int("small", 300);
        bundle.put_int("role", 8);
        bundle.put_int("bad_role", 9);
        bundle.put_int("handle", -1);
        bundle.put_long("time", -1);
        bundle.put_string("version", "1.1");
        bundle.put_string("bad_version", "1_1");

        assert_eq!(read_int::<u16>(&bundle, "small"), Ok(Some(300)));
        assert!(read_int::<u8>(&bundle, "small").is_err());
        assert_eq!(read_int::<u8>(&bundle, "absent"), Ok(None));
        assert_eq!(read_enum::<DeviceRole>(&bundle, "role"), Ok(Some(DeviceRole::DtTag)));
        assert_eq!(
            read_enum::<DeviceRole>(&bundle, "bad_role"),
            Err(SchemaError::InvalidValue { key: "bad_role".to_string(), value: "9".to_string() })
        );
        assert_eq!(read_u32(&bundle, "handle"), Ok(Some(u32::MAX)));
        assert_eq!(read_u64(&bundle, "time"), Ok(Some(u64::MAX)));
        assert_eq!(read_u64(&bundle, "absent"), Ok(None));
        assert_eq!(
            read_protocol_version(&bundle, "version"),
            Ok(Some(FiraProtocolVersion::new(1, 1)))
        );
        assert!(read_protocol_version(&bundle, "bad_version").is_err());
        assert_eq!(require_key(Some(1), "key"), Ok(1));
        assert_eq!(
            require_key::<i32>(None, "key"),
            Err(SchemaError::MissingKey("key".to_string()))
        );
    }
}
