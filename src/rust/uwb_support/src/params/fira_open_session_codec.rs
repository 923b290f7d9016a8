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

//! This module converts [`FiraOpenSessionParams`] to and from a [`Bundle`].

use num_traits::FromPrimitive;

use crate::error::{Result, SchemaError};
use crate::params::bundle::{decode_versioned, Bundle, Decoder};
use crate::params::fira_open_session_params::{
    FiraOpenSessionParams, FiraOpenSessionParamsBuilder,
};
use crate::params::fira_params::{
    DeviceRole, DeviceType, MacAddressMode, RangingRoundUsage, ScheduledMode,
};
use crate::params::utils::{
    bytes_to_int_array, invalid_value, long_to_uwb_address, read_bytes, read_enum, read_int,
    read_protocol_version, read_u32, read_u64, require_key, u32_to_bundle_int,
    uwb_address_to_long,
};

const BUNDLE_VERSION_1: i32 = 1;
const BUNDLE_VERSION_CURRENT: i32 = BUNDLE_VERSION_1;

const DECODERS: &[(i32, Decoder<FiraOpenSessionParams>)] =
    &[(BUNDLE_VERSION_1, decode_version_1)];

const KEY_PROTOCOL_VERSION: &str = "protocol_version";
const KEY_SESSION_ID: &str = "session_id";
const KEY_SESSION_TYPE: &str = "session_type";
const KEY_DEVICE_TYPE: &str = "device_type";
const KEY_DEVICE_ROLE: &str = "device_role";
const KEY_RANGING_ROUND_USAGE: &str = "ranging_round_usage";
const KEY_MULTI_NODE_MODE: &str = "multi_node_mode";
const KEY_DEVICE_ADDRESS: &str = "device_address";
const KEY_DEST_ADDRESS_LIST: &str = "dest_address_list";
const KEY_INITIATION_TIME_MS: &str = "initiation_time_ms";
const KEY_ABSOLUTE_INITIATION_TIME_US: &str = "absolute_initiation_time_us";
const KEY_SLOT_DURATION_RSTU: &str = "slot_duration_rstu";
const KEY_SLOTS_PER_RANGING_ROUND: &str = "slots_per_ranging_round";
const KEY_RANGING_INTERVAL_MS: &str = "ranging_interval_ms";
const KEY_BLOCK_STRIDE_LENGTH: &str = "block_stride_length";
const KEY_HOPPING_MODE: &str = "hopping_mode";
const KEY_MAX_RANGING_ROUND_RETRIES: &str = "max_ranging_round_retries";
const KEY_SESSION_PRIORITY: &str = "session_priority";
const KEY_MAC_ADDRESS_MODE: &str = "mac_address_mode";
const KEY_HAS_RANGING_RESULT_REPORT_MESSAGE: &str = "has_result_report_phase";
const KEY_HAS_CONTROL_MESSAGE: &str = "has_control_message";
const KEY_HAS_RANGING_CONTROL_PHASE: &str = "has_ranging_control_phase";
const KEY_MEASUREMENT_REPORT_TYPE: &str = "measurement_report_type";
const KEY_MEASUREMENT_REPORT_PHASE: &str = "measurement_report_phase";
const KEY_IN_BAND_TERMINATION_ATTEMPT_COUNT: &str = "in_band_termination_attempt_count";
const KEY_CHANNEL_NUMBER: &str = "channel_number";
const KEY_PREAMBLE_CODE_INDEX: &str = "preamble_code_index";
const KEY_RFRAME_CONFIG: &str = "rframe_config";
const KEY_PRF_MODE: &str = "prf_mode";
const KEY_CAP_SIZE_RANGE: &str = "cap_size_range";
const KEY_SCHEDULED_MODE: &str = "scheduled_mode";
const KEY_PREAMBLE_DURATION: &str = "preamble_duration";
const KEY_SFD_ID: &str = "sfd_id";
const KEY_STS_SEGMENT_COUNT: &str = "sts_segment_count";
const KEY_STS_LENGTH: &str = "sts_length";
const KEY_PSDU_DATA_RATE: &str = "psdu_data_rate";
const KEY_BPRF_PHR_DATA_RATE: &str = "bprf_phr_data_rate";
const KEY_FCS_TYPE: &str = "fcs_type";
const KEY_IS_TX_ADAPTIVE_PAYLOAD_POWER_ENABLED: &str = "is_tx_adaptive_payload_power_enabled";
const KEY_STS_CONFIG: &str = "sts_config";
const KEY_SUB_SESSION_ID: &str = "sub_session_id";
const KEY_SESSION_KEY: &str = "session_key";
const KEY_SUBSESSION_KEY: &str = "subsession_key";
const KEY_VENDOR_ID: &str = "vendor_id";
const KEY_STATIC_STS_IV: &str = "static_sts_iv";
const KEY_IS_RSSI_REPORTING_ENABLED: &str = "is_rssi_reporting_enabled";
const KEY_IS_DIAGNOSTICS_ENABLED: &str = "is_diagnostics_enabled";
const KEY_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS: &str = "diagrams_frame_reports_fields_flags";
const KEY_ANTENNA_MODE: &str = "antenna_mode";
const KEY_IS_KEY_ROTATION_ENABLED: &str = "is_key_rotation_enabled";
const KEY_KEY_ROTATION_RATE: &str = "key_rotation_rate";
const KEY_AOA_RESULT_REQUEST: &str = "aoa_result_request";
const KEY_RANGE_DATA_NTF_CONFIG: &str = "range_data_ntf_config";
const KEY_RANGE_DATA_NTF_PROXIMITY_NEAR: &str = "range_data_ntf_proximity_near";
const KEY_RANGE_DATA_NTF_PROXIMITY_FAR: &str = "range_data_ntf_proximity_far";
const KEY_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER: &str = "range_data_ntf_aoa_azimuth_lower";
const KEY_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER: &str = "range_data_ntf_aoa_azimuth_upper";
const KEY_RANGE_DATA_NTF_AOA_ELEVATION_LOWER: &str = "range_data_ntf_aoa_elevation_lower";
const KEY_RANGE_DATA_NTF_AOA_ELEVATION_UPPER: &str = "range_data_ntf_aoa_elevation_upper";
const KEY_HAS_TIME_OF_FLIGHT_REPORT: &str = "has_time_of_flight_report";
const KEY_HAS_ANGLE_OF_ARRIVAL_AZIMUTH_REPORT: &str = "has_angle_of_arrival_azimuth_report";
const KEY_HAS_ANGLE_OF_ARRIVAL_ELEVATION_REPORT: &str = "has_angle_of_arrival_elevation_report";
const KEY_HAS_ANGLE_OF_ARRIVAL_FIGURE_OF_MERIT_REPORT: &str =
    "has_angle_of_arrival_figure_of_merit_report";
const KEY_AOA_TYPE: &str = "aoa_type";
const KEY_NUM_OF_MSRMT_FOCUS_ON_RANGE: &str = "num_of_msrmt_focus_on_range";
const KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_AZIMUTH: &str = "num_of_msrmt_focus_on_aoa_azimuth";
const KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_ELEVATION: &str = "num_of_msrmt_focus_on_aoa_elevation";
const KEY_RANGING_ERROR_STREAK_TIMEOUT_MS: &str = "ranging_error_streak_timeout_ms";
const KEY_LINK_LAYER_MODE: &str = "link_layer_mode";
const KEY_DATA_REPETITION_COUNT: &str = "data_repetition_count";
const KEY_RANGING_TIME_STRUCT: &str = "ranging_time_struct";
const KEY_MIN_FRAMES_PER_RR: &str = "min_frames_per_rr";
const KEY_MTU_SIZE: &str = "mtu_size";
const KEY_INTER_FRAME_INTERVAL: &str = "inter_frame_interval";
const KEY_DLTDOA_BLOCK_STRIDING: &str = "dltdoa_block_striding";
const KEY_UL_TDOA_TX_INTERVAL: &str = "ul_tdoa_tx_interval";
const KEY_UL_TDOA_RANDOM_WINDOW: &str = "ul_tdoa_random_window";
const KEY_UL_TDOA_DEVICE_ID_TYPE: &str = "ul_tdoa_device_id_type";
const KEY_UL_TDOA_DEVICE_ID: &str = "ul_tdoa_device_id";
const KEY_UL_TDOA_TX_TIMESTAMP_TYPE: &str = "ul_tdoa_tx_timestamp_type";
const KEY_FILTER_TYPE: &str = "filter_type";
const KEY_MAX_NUMBER_OF_MEASUREMENTS: &str = "max_number_of_measurements";
const KEY_SESSION_DATA_TRANSFER_STATUS_NTF_CONFIG: &str =
    "session_data_transfer_status_ntf_config";
const KEY_REFERENCE_TIME_BASE: &str = "reference_time_base";
const KEY_REFERENCE_SESSION_HANDLE: &str = "reference_session_handle";
const KEY_SESSION_OFFSET_IN_MICRO_SECONDS: &str = "session_offset_in_micro_seconds";
const KEY_APPLICATION_DATA_ENDPOINT: &str = "application_data_endpoint";

// Override the builder value only when the bundle holds the key.
macro_rules! set_if_present {
    ($builder:ident.$setter:ident, $value:expr) => {
        if let Some(value) = $value {
            $builder.$setter(value);
        }
    };
}

impl FiraOpenSessionParams {
    /// Encode the params into a bundle of the current version.
    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::with_fira_header(BUNDLE_VERSION_CURRENT);
        bundle.put_string(KEY_PROTOCOL_VERSION, &self.protocol_version().to_string());
        bundle.put_int(KEY_SESSION_ID, u32_to_bundle_int(*self.session_id()));
        bundle.put_int(KEY_SESSION_TYPE, (*self.session_type()).into());
        bundle.put_int(KEY_DEVICE_TYPE, *self.device_type() as i32);
        bundle.put_int(KEY_DEVICE_ROLE, *self.device_role() as i32);
        bundle.put_int(KEY_RANGING_ROUND_USAGE, *self.ranging_round_usage() as i32);
        bundle.put_int(KEY_MULTI_NODE_MODE, *self.multi_node_mode() as i32);
        // The address is always stored as a long.
        bundle.put_long(KEY_DEVICE_ADDRESS, uwb_address_to_long(self.device_address()));

        if *self.scheduled_mode() != ScheduledMode::ContentionBasedRanging {
            if let Some(dest_address_list) = self.dest_address_list() {
                bundle.put_long_array(
                    KEY_DEST_ADDRESS_LIST,
                    dest_address_list.iter().map(uwb_address_to_long).collect(),
                );
            }
        }

        if *self.ranging_round_usage() == RangingRoundUsage::DlTdoa
            && *self.device_role() == DeviceRole::DtTag
        {
            bundle.put_int(KEY_DLTDOA_BLOCK_STRIDING, (*self.dl_tdoa_block_striding()).into());
        }

        bundle.put_long(KEY_INITIATION_TIME_MS, *self.initiation_time_ms() as i64);
        bundle.put_long(
            KEY_ABSOLUTE_INITIATION_TIME_US,
            *self.absolute_initiation_time_us() as i64,
        );
        bundle.put_int(KEY_SLOT_DURATION_RSTU, (*self.slot_duration_rstu()).into());
        bundle.put_int(KEY_SLOTS_PER_RANGING_ROUND, (*self.slots_per_rr()).into());
        bundle.put_int(KEY_RANGING_INTERVAL_MS, u32_to_bundle_int(*self.ranging_interval_ms()));
        bundle.put_int(KEY_BLOCK_STRIDE_LENGTH, (*self.block_stride_length()).into());
        bundle.put_int(KEY_HOPPING_MODE, (*self.hopping_mode()).into());
        bundle.put_int(KEY_MAX_RANGING_ROUND_RETRIES, (*self.max_ranging_round_retries()).into());
        bundle.put_int(KEY_SESSION_PRIORITY, (*self.session_priority()).into());
        bundle.put_int(KEY_MAC_ADDRESS_MODE, *self.mac_address_mode() as i32);
        bundle.put_bool(
            KEY_HAS_RANGING_RESULT_REPORT_MESSAGE,
            *self.has_ranging_result_report_message(),
        );
        bundle.put_bool(KEY_HAS_CONTROL_MESSAGE, *self.has_control_message());
        bundle.put_bool(KEY_HAS_RANGING_CONTROL_PHASE, *self.has_ranging_control_phase());
        bundle.put_int(KEY_MEASUREMENT_REPORT_TYPE, (*self.measurement_report_type()).into());
        bundle.put_int(KEY_MEASUREMENT_REPORT_PHASE, (*self.measurement_report_phase()).into());
        bundle.put_int(
            KEY_IN_BAND_TERMINATION_ATTEMPT_COUNT,
            (*self.in_band_termination_attempt_count()).into(),
        );
        bundle.put_int(KEY_CHANNEL_NUMBER, *self.channel_number() as i32);
        bundle.put_int(KEY_PREAMBLE_CODE_INDEX, (*self.preamble_code_index()).into());
        bundle.put_int(KEY_RFRAME_CONFIG, *self.rframe_config() as i32);
        bundle.put_int(KEY_PRF_MODE, *self.prf_mode() as i32);
        bundle.put_int(KEY_SCHEDULED_MODE, *self.scheduled_mode() as i32);
        if *self.scheduled_mode() == ScheduledMode::ContentionBasedRanging {
            bundle.put_int_array(KEY_CAP_SIZE_RANGE, bytes_to_int_array(self.cap_size_range()));
        }
        bundle.put_int(KEY_PREAMBLE_DURATION, *self.preamble_duration() as i32);
        bundle.put_int(KEY_SFD_ID, (*self.sfd_id()).into());
        bundle.put_int(KEY_STS_SEGMENT_COUNT, (*self.sts_segment_count()).into());
        bundle.put_int(KEY_STS_LENGTH, *self.sts_length() as i32);
        bundle.put_int(KEY_PSDU_DATA_RATE, *self.psdu_data_rate() as i32);
        bundle.put_int(KEY_BPRF_PHR_DATA_RATE, *self.bprf_phr_data_rate() as i32);
        bundle.put_int(KEY_FCS_TYPE, *self.fcs_type() as i32);
        bundle.put_bool(
            KEY_IS_TX_ADAPTIVE_PAYLOAD_POWER_ENABLED,
            *self.is_tx_adaptive_payload_power_enabled(),
        );
        bundle.put_int(KEY_STS_CONFIG, *self.sts_config() as i32);
        if self.sts_config().is_individual_key() {
            bundle.put_int(KEY_SUB_SESSION_ID, u32_to_bundle_int(*self.sub_session_id()));
        }
        put_bytes_if_present(&mut bundle, KEY_SESSION_KEY, self.session_key());
        put_bytes_if_present(&mut bundle, KEY_SUBSESSION_KEY, self.subsession_key());
        put_bytes_if_present(&mut bundle, KEY_VENDOR_ID, self.vendor_id());
        put_bytes_if_present(&mut bundle, KEY_STATIC_STS_IV, self.static_sts_iv());
        bundle.put_bool(KEY_IS_RSSI_REPORTING_ENABLED, *self.is_rssi_reporting_enabled());
        bundle.put_bool(KEY_IS_DIAGNOSTICS_ENABLED, *self.is_diagnostics_enabled());
        bundle.put_int(
            KEY_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS,
            (*self.diagrams_frame_reports_fields_flags()).into(),
        );
        bundle.put_int(KEY_ANTENNA_MODE, (*self.antenna_mode()).into());
        bundle.put_bool(KEY_IS_KEY_ROTATION_ENABLED, *self.is_key_rotation_enabled());
        bundle.put_int(KEY_KEY_ROTATION_RATE, (*self.key_rotation_rate()).into());
        bundle.put_int(KEY_AOA_RESULT_REQUEST, *self.aoa_result_request() as i32);
        bundle.put_int(KEY_RANGE_DATA_NTF_CONFIG, *self.range_data_ntf_config() as i32);
        bundle.put_int(
            KEY_RANGE_DATA_NTF_PROXIMITY_NEAR,
            u32_to_bundle_int(*self.range_data_ntf_proximity_near_cm()),
        );
        bundle.put_int(
            KEY_RANGE_DATA_NTF_PROXIMITY_FAR,
            u32_to_bundle_int(*self.range_data_ntf_proximity_far_cm()),
        );
        bundle.put_double(
            KEY_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER,
            *self.range_data_ntf_aoa_azimuth_lower(),
        );
        bundle.put_double(
            KEY_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER,
            *self.range_data_ntf_aoa_azimuth_upper(),
        );
        bundle.put_double(
            KEY_RANGE_DATA_NTF_AOA_ELEVATION_LOWER,
            *self.range_data_ntf_aoa_elevation_lower(),
        );
        bundle.put_double(
            KEY_RANGE_DATA_NTF_AOA_ELEVATION_UPPER,
            *self.range_data_ntf_aoa_elevation_upper(),
        );
        bundle.put_bool(KEY_HAS_TIME_OF_FLIGHT_REPORT, *self.has_time_of_flight_report());
        bundle.put_bool(
            KEY_HAS_ANGLE_OF_ARRIVAL_AZIMUTH_REPORT,
            *self.has_angle_of_arrival_azimuth_report(),
        );
        bundle.put_bool(
            KEY_HAS_ANGLE_OF_ARRIVAL_ELEVATION_REPORT,
            *self.has_angle_of_arrival_elevation_report(),
        );
        bundle.put_bool(
            KEY_HAS_ANGLE_OF_ARRIVAL_FIGURE_OF_MERIT_REPORT,
            *self.has_angle_of_arrival_figure_of_merit_report(),
        );
        bundle.put_int(KEY_AOA_TYPE, *self.aoa_type() as i32);
        bundle.put_int(
            KEY_NUM_OF_MSRMT_FOCUS_ON_RANGE,
            (*self.num_of_msrmt_focus_on_range()).into(),
        );
        bundle.put_int(
            KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_AZIMUTH,
            (*self.num_of_msrmt_focus_on_aoa_azimuth()).into(),
        );
        bundle.put_int(
            KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_ELEVATION,
            (*self.num_of_msrmt_focus_on_aoa_elevation()).into(),
        );
        bundle.put_long(
            KEY_RANGING_ERROR_STREAK_TIMEOUT_MS,
            *self.ranging_error_streak_timeout_ms() as i64,
        );
        bundle.put_int(KEY_LINK_LAYER_MODE, (*self.link_layer_mode()).into());
        bundle.put_int(KEY_DATA_REPETITION_COUNT, (*self.data_repetition_count()).into());
        bundle.put_int(KEY_RANGING_TIME_STRUCT, *self.ranging_time_struct() as i32);
        bundle.put_int(KEY_MIN_FRAMES_PER_RR, (*self.min_frames_per_rr()).into());
        bundle.put_int(KEY_MTU_SIZE, (*self.mtu_size()).into());
        bundle.put_int(KEY_INTER_FRAME_INTERVAL, (*self.inter_frame_interval()).into());
        bundle.put_int(KEY_UL_TDOA_TX_INTERVAL, u32_to_bundle_int(*self.ul_tdoa_tx_interval_ms()));
        bundle.put_int(
            KEY_UL_TDOA_RANDOM_WINDOW,
            u32_to_bundle_int(*self.ul_tdoa_random_window_ms()),
        );
        bundle.put_int(KEY_UL_TDOA_DEVICE_ID_TYPE, (*self.ul_tdoa_device_id_type()).into());
        put_bytes_if_present(&mut bundle, KEY_UL_TDOA_DEVICE_ID, self.ul_tdoa_device_id());
        bundle.put_int(KEY_UL_TDOA_TX_TIMESTAMP_TYPE, (*self.ul_tdoa_tx_timestamp_type()).into());
        bundle.put_int(KEY_FILTER_TYPE, *self.filter_type() as i32);
        bundle.put_int(KEY_MAX_NUMBER_OF_MEASUREMENTS, (*self.max_number_of_measurements()).into());
        bundle.put_bool(
            KEY_SESSION_DATA_TRANSFER_STATUS_NTF_CONFIG,
            *self.session_data_transfer_status_ntf_config(),
        );
        if *self.device_type() == DeviceType::Controller {
            bundle.put_int(KEY_REFERENCE_TIME_BASE, (*self.reference_time_base()).into());
            bundle.put_int(
                KEY_REFERENCE_SESSION_HANDLE,
                u32_to_bundle_int(*self.reference_session_handle()),
            );
            bundle.put_int(
                KEY_SESSION_OFFSET_IN_MICRO_SECONDS,
                u32_to_bundle_int(*self.session_offset_in_micro_seconds()),
            );
        }
        bundle.put_int(KEY_APPLICATION_DATA_ENDPOINT, (*self.application_data_endpoint()).into());
        bundle
    }

    /// Decode the params from a bundle written by any supported version. The decoded params are
    /// validated again.
    pub fn from_bundle(bundle: &Bundle) -> Result<Self> {
        decode_versioned(bundle, DECODERS)
    }
}

fn put_bytes_if_present(bundle: &mut Bundle, key: &str, bytes: &Option<Vec<u8>>) {
    if let Some(bytes) = bytes {
        bundle.put_int_array(key, bytes_to_int_array(bytes));
    }
}

/// Read the enum, or the member with code 0 when the key is absent.
fn read_enum_or_zero<T: FromPrimitive>(
    bundle: &Bundle,
    key: &str,
) -> std::result::Result<T, SchemaError> {
    match read_enum(bundle, key)? {
        Some(value) => Ok(value),
        None => require_key(T::from_i32(0), key),
    }
}

fn read_cap_size_range(bundle: &Bundle) -> std::result::Result<Option<[u8; 2]>, SchemaError> {
    read_bytes(bundle, KEY_CAP_SIZE_RANGE)?
        .map(|bytes| {
            <[u8; 2]>::try_from(bytes.as_slice())
                .map_err(|_| invalid_value(KEY_CAP_SIZE_RANGE, format!("{:?}", bytes)))
        })
        .transpose()
}

fn decode_version_1(bundle: &Bundle) -> Result<FiraOpenSessionParams> {
    let mac_address_mode: MacAddressMode = read_enum_or_zero(bundle, KEY_MAC_ADDRESS_MODE)?;
    let device_address = long_to_uwb_address(
        require_key(bundle.get_long(KEY_DEVICE_ADDRESS)?, KEY_DEVICE_ADDRESS)?,
        mac_address_mode,
    );

    let mut builder = FiraOpenSessionParamsBuilder::new();
    builder
        .protocol_version(require_key(
            read_protocol_version(bundle, KEY_PROTOCOL_VERSION)?,
            KEY_PROTOCOL_VERSION,
        )?)
        .session_id(require_key(read_u32(bundle, KEY_SESSION_ID)?, KEY_SESSION_ID)?.into())
        .device_type(require_key(read_enum(bundle, KEY_DEVICE_TYPE)?, KEY_DEVICE_TYPE)?)
        .device_role(require_key(read_enum(bundle, KEY_DEVICE_ROLE)?, KEY_DEVICE_ROLE)?)
        .ranging_round_usage(read_enum_or_zero(bundle, KEY_RANGING_ROUND_USAGE)?)
        .multi_node_mode(require_key(read_enum(bundle, KEY_MULTI_NODE_MODE)?, KEY_MULTI_NODE_MODE)?)
        .device_address(device_address)
        .initiation_time_ms(read_u64(bundle, KEY_INITIATION_TIME_MS)?.unwrap_or_default())
        .absolute_initiation_time_us(
            read_u64(bundle, KEY_ABSOLUTE_INITIATION_TIME_US)?.unwrap_or_default(),
        )
        .slot_duration_rstu(read_int(bundle, KEY_SLOT_DURATION_RSTU)?.unwrap_or_default())
        .slots_per_rr(read_int(bundle, KEY_SLOTS_PER_RANGING_ROUND)?.unwrap_or_default())
        .ranging_interval_ms(read_u32(bundle, KEY_RANGING_INTERVAL_MS)?.unwrap_or_default())
        .block_stride_length(read_int(bundle, KEY_BLOCK_STRIDE_LENGTH)?.unwrap_or_default())
        .hopping_mode(read_int(bundle, KEY_HOPPING_MODE)?.unwrap_or_default())
        .max_ranging_round_retries(
            read_int(bundle, KEY_MAX_RANGING_ROUND_RETRIES)?.unwrap_or_default(),
        )
        .session_priority(read_int(bundle, KEY_SESSION_PRIORITY)?.unwrap_or_default())
        .mac_address_mode(mac_address_mode)
        .has_ranging_result_report_message(
            bundle.get_bool(KEY_HAS_RANGING_RESULT_REPORT_MESSAGE)?.unwrap_or_default(),
        )
        .measurement_report_type(read_int(bundle, KEY_MEASUREMENT_REPORT_TYPE)?.unwrap_or_default())
        .measurement_report_phase(
            read_int(bundle, KEY_MEASUREMENT_REPORT_PHASE)?.unwrap_or_default(),
        )
        .in_band_termination_attempt_count(
            read_int(bundle, KEY_IN_BAND_TERMINATION_ATTEMPT_COUNT)?.unwrap_or_default(),
        )
        .channel_number(read_enum_or_zero(bundle, KEY_CHANNEL_NUMBER)?)
        .preamble_code_index(read_int(bundle, KEY_PREAMBLE_CODE_INDEX)?.unwrap_or_default())
        .rframe_config(read_enum_or_zero(bundle, KEY_RFRAME_CONFIG)?)
        .prf_mode(read_enum_or_zero(bundle, KEY_PRF_MODE)?)
        .preamble_duration(read_enum_or_zero(bundle, KEY_PREAMBLE_DURATION)?)
        .sfd_id(read_int(bundle, KEY_SFD_ID)?.unwrap_or_default())
        .sts_segment_count(read_int(bundle, KEY_STS_SEGMENT_COUNT)?.unwrap_or_default())
        .sts_length(read_enum_or_zero(bundle, KEY_STS_LENGTH)?)
        .psdu_data_rate(read_enum_or_zero(bundle, KEY_PSDU_DATA_RATE)?)
        .bprf_phr_data_rate(read_enum_or_zero(bundle, KEY_BPRF_PHR_DATA_RATE)?)
        .fcs_type(read_enum_or_zero(bundle, KEY_FCS_TYPE)?)
        .is_tx_adaptive_payload_power_enabled(
            bundle.get_bool(KEY_IS_TX_ADAPTIVE_PAYLOAD_POWER_ENABLED)?.unwrap_or_default(),
        )
        .sts_config(read_enum_or_zero(bundle, KEY_STS_CONFIG)?)
        .is_rssi_reporting_enabled(
            bundle.get_bool(KEY_IS_RSSI_REPORTING_ENABLED)?.unwrap_or_default(),
        )
        .is_key_rotation_enabled(bundle.get_bool(KEY_IS_KEY_ROTATION_ENABLED)?.unwrap_or_default())
        .key_rotation_rate(read_int(bundle, KEY_KEY_ROTATION_RATE)?.unwrap_or_default())
        .aoa_result_request(read_enum_or_zero(bundle, KEY_AOA_RESULT_REQUEST)?)
        .range_data_ntf_config(read_enum_or_zero(bundle, KEY_RANGE_DATA_NTF_CONFIG)?)
        .range_data_ntf_proximity_near_cm(
            read_u32(bundle, KEY_RANGE_DATA_NTF_PROXIMITY_NEAR)?.unwrap_or_default(),
        )
        .range_data_ntf_proximity_far_cm(
            read_u32(bundle, KEY_RANGE_DATA_NTF_PROXIMITY_FAR)?.unwrap_or_default(),
        )
        .has_time_of_flight_report(
            bundle.get_bool(KEY_HAS_TIME_OF_FLIGHT_REPORT)?.unwrap_or_default(),
        )
        .has_angle_of_arrival_azimuth_report(
            bundle.get_bool(KEY_HAS_ANGLE_OF_ARRIVAL_AZIMUTH_REPORT)?.unwrap_or_default(),
        )
        .has_angle_of_arrival_elevation_report(
            bundle.get_bool(KEY_HAS_ANGLE_OF_ARRIVAL_ELEVATION_REPORT)?.unwrap_or_default(),
        )
        .has_angle_of_arrival_figure_of_merit_report(
            bundle.get_bool(KEY_HAS_ANGLE_OF_ARRIVAL_FIGURE_OF_MERIT_REPORT)?.unwrap_or_default(),
        )
        .aoa_type(read_enum_or_zero(bundle, KEY_AOA_TYPE)?)
        .num_of_msrmt_focus_on_range(
            read_int(bundle, KEY_NUM_OF_MSRMT_FOCUS_ON_RANGE)?.unwrap_or_default(),
        )
        .num_of_msrmt_focus_on_aoa_azimuth(
            read_int(bundle, KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_AZIMUTH)?.unwrap_or_default(),
        )
        .num_of_msrmt_focus_on_aoa_elevation(
            read_int(bundle, KEY_NUM_OF_MSRMT_FOCUS_ON_AOA_ELEVATION)?.unwrap_or_default(),
        )
        .ul_tdoa_tx_interval_ms(read_u32(bundle, KEY_UL_TDOA_TX_INTERVAL)?.unwrap_or_default())
        .ul_tdoa_random_window_ms(read_u32(bundle, KEY_UL_TDOA_RANDOM_WINDOW)?.unwrap_or_default())
        .ul_tdoa_device_id_type(read_int(bundle, KEY_UL_TDOA_DEVICE_ID_TYPE)?.unwrap_or_default())
        .ul_tdoa_tx_timestamp_type(
            read_int(bundle, KEY_UL_TDOA_TX_TIMESTAMP_TYPE)?.unwrap_or_default(),
        )
        .session_data_transfer_status_ntf_config(
            bundle.get_bool(KEY_SESSION_DATA_TRANSFER_STATUS_NTF_CONFIG)?.unwrap_or_default(),
        )
        .reference_time_base(read_int(bundle, KEY_REFERENCE_TIME_BASE)?.unwrap_or_default())
        .reference_session_handle(
            read_u32(bundle, KEY_REFERENCE_SESSION_HANDLE)?.unwrap_or_default().into(),
        )
        .session_offset_in_micro_seconds(
            read_u32(bundle, KEY_SESSION_OFFSET_IN_MICRO_SECONDS)?.unwrap_or_default(),
        );

    // The keys added after the first release keep their default value when absent.
    set_if_present!(builder.session_type, read_int(bundle, KEY_SESSION_TYPE)?);
    set_if_present!(builder.has_control_message, bundle.get_bool(KEY_HAS_CONTROL_MESSAGE)?);
    set_if_present!(
        builder.has_ranging_control_phase,
        bundle.get_bool(KEY_HAS_RANGING_CONTROL_PHASE)?
    );
    set_if_present!(builder.scheduled_mode, read_enum(bundle, KEY_SCHEDULED_MODE)?);
    set_if_present!(builder.is_diagnostics_enabled, bundle.get_bool(KEY_IS_DIAGNOSTICS_ENABLED)?);
    set_if_present!(
        builder.diagrams_frame_reports_fields_flags,
        read_int(bundle, KEY_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS)?
    );
    set_if_present!(builder.antenna_mode, read_int(bundle, KEY_ANTENNA_MODE)?);
    set_if_present!(
        builder.range_data_ntf_aoa_azimuth_lower,
        bundle.get_double(KEY_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER)?
    );
    set_if_present!(
        builder.range_data_ntf_aoa_azimuth_upper,
        bundle.get_double(KEY_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER)?
    );
    set_if_present!(
        builder.range_data_ntf_aoa_elevation_lower,
        bundle.get_double(KEY_RANGE_DATA_NTF_AOA_ELEVATION_LOWER)?
    );
    set_if_present!(
        builder.range_data_ntf_aoa_elevation_upper,
        bundle.get_double(KEY_RANGE_DATA_NTF_AOA_ELEVATION_UPPER)?
    );
    set_if_present!(
        builder.ranging_error_streak_timeout_ms,
        read_u64(bundle, KEY_RANGING_ERROR_STREAK_TIMEOUT_MS)?
    );
    set_if_present!(builder.link_layer_mode, read_int(bundle, KEY_LINK_LAYER_MODE)?);
    set_if_present!(builder.data_repetition_count, read_int(bundle, KEY_DATA_REPETITION_COUNT)?);
    set_if_present!(builder.ranging_time_struct, read_enum(bundle, KEY_RANGING_TIME_STRUCT)?);
    set_if_present!(builder.min_frames_per_rr, read_int(bundle, KEY_MIN_FRAMES_PER_RR)?);
    set_if_present!(builder.mtu_size, read_int(bundle, KEY_MTU_SIZE)?);
    set_if_present!(builder.inter_frame_interval, read_int(bundle, KEY_INTER_FRAME_INTERVAL)?);
    set_if_present!(builder.filter_type, read_enum(bundle, KEY_FILTER_TYPE)?);
    set_if_present!(
        builder.max_number_of_measurements,
        read_int(bundle, KEY_MAX_NUMBER_OF_MEASUREMENTS)?
    );
    set_if_present!(
        builder.application_data_endpoint,
        read_int(bundle, KEY_APPLICATION_DATA_ENDPOINT)?
    );

    // Conditional and optional keys.
    set_if_present!(builder.cap_size_range, read_cap_size_range(bundle)?);
    set_if_present!(builder.dl_tdoa_block_striding, read_int(bundle, KEY_DLTDOA_BLOCK_STRIDING)?);
    builder.sub_session_id(read_u32(bundle, KEY_SUB_SESSION_ID)?.unwrap_or_default().into());
    set_if_present!(builder.session_key, read_bytes(bundle, KEY_SESSION_KEY)?);
    set_if_present!(builder.subsession_key, read_bytes(bundle, KEY_SUBSESSION_KEY)?);
    set_if_present!(builder.vendor_id, read_bytes(bundle, KEY_VENDOR_ID)?);
    set_if_present!(builder.static_sts_iv, read_bytes(bundle, KEY_STATIC_STS_IV)?);
    set_if_present!(builder.ul_tdoa_device_id, read_bytes(bundle, KEY_UL_TDOA_DEVICE_ID)?);

    if builder.is_time_scheduled_twr_session() {
        if let Some(dest_address_list) = bundle.get_long_array(KEY_DEST_ADDRESS_LIST)? {
            builder.dest_address_list(
                dest_address_list
                    .iter()
                    .map(|address| long_to_uwb_address(*address, mac_address_mode))
                    .collect(),
            );
        }
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::{Error, ValidationError};
    use crate::params::bundle::{BundleValue, KEY_BUNDLE_VERSION, KEY_PROTOCOL_NAME};
    use crate::params::fira_params::{
        AoaResultRequest, AoaType, FilterType, FiraProtocolVersion, MultiNodeMode, PrfMode,
        RangeDataNtfConfig, RangingTimeStruct, RframeConfig, StsConfig, UwbAddress, UwbChannel,
    };
    use crate::utils::init_test_logging;

    fn controlee_params() -> FiraOpenSessionParams {
        FiraOpenSessionParamsBuilder::new()
            .protocol_version(FiraProtocolVersion::new(2, 0))
            .session_id(4294967295)
            .device_type(DeviceType::Controlee)
            .device_role(DeviceRole::Responder)
            .multi_node_mode(MultiNodeMode::OneToMany)
            .mac_address_mode(MacAddressMode::MacAddress8Bytes)
            .device_address(UwbAddress::Extended([0x80, 2, 3, 4, 5, 6, 7, 8]))
            .dest_address_list(vec![
                UwbAddress::Extended([0xFF; 8]),
                UwbAddress::Extended([1, 0, 0, 0, 0, 0, 0, 1]),
            ])
            .initiation_time_ms(1000)
            .absolute_initiation_time_us(u64::MAX)
            .slot_duration_rstu(1200)
            .ranging_interval_ms(0x8000_0001)
            .channel_number(UwbChannel::Channel5)
            .prf_mode(PrfMode::HprfWith249_6MHz)
            .sts_config(StsConfig::ProvisionedForControleeIndividualKey)
            .sub_session_id(0xFFFF_0000)
            .session_key(vec![0x80; 32])
            .subsession_key((0..16).collect())
            .aoa_result_request(AoaResultRequest::ReqAoaResultsInterleaved)
            .num_of_msrmt_focus_on_aoa_azimuth(4)
            .range_data_ntf_config(RangeDataNtfConfig::EnableAoaEdgeTrig)
            .range_data_ntf_aoa_azimuth_lower(-45.5)
            .range_data_ntf_aoa_elevation_upper(12.25)
            .aoa_type(AoaType::Elevation)
            .ranging_error_streak_timeout_ms(0)
            .ul_tdoa_device_id(vec![0xFF, 0x7F, 0x00])
            .filter_type(FilterType::None)
            .build()
            .unwrap()
    }

    fn controller_params() -> FiraOpenSessionParams {
        FiraOpenSessionParamsBuilder::new()
            .protocol_version(FiraProtocolVersion::new(1, 1))
            .session_id(10)
            .device_type(DeviceType::Controller)
            .device_role(DeviceRole::Initiator)
            .multi_node_mode(MultiNodeMode::Unicast)
            .device_address(UwbAddress::Short([0xAB, 0xCD]))
            .scheduled_mode(ScheduledMode::ContentionBasedRanging)
            .cap_size_range([0xF0, 0x05])
            .vendor_id(vec![0xFE, 0xDC])
            .static_sts_iv(vec![0xDF, 0xCE, 0xAB, 0x12, 0x34, 0x56])
            .reference_time_base(1)
            .reference_session_handle(0xFFFF_FFFF)
            .session_offset_in_micro_seconds(300)
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_trip() {
        init_test_logging();

        for params in [controlee_params(), controller_params()] {
            let bundle = params.to_bundle();
            assert_eq!(FiraOpenSessionParams::from_bundle(&bundle).unwrap(), params);
        }
    }

    #[test]
    fn test_encoded_values() {
        let bundle = controlee_params().to_bundle();

        assert_eq!(bundle.get_int(KEY_BUNDLE_VERSION), Ok(Some(1)));
        assert_eq!(bundle.get_string(KEY_PROTOCOL_NAME), Ok(Some("fira")));
        assert_eq!(bundle.get_string(KEY_PROTOCOL_VERSION), Ok(Some("2.0")));
        assert_eq!(bundle.get_int(KEY_SESSION_ID), Ok(Some(-1)));
        assert_eq!(bundle.get_int(KEY_SUB_SESSION_ID), Ok(Some(0xFFFF_0000_u32 as i32)));
        assert_eq!(bundle.get_long(KEY_DEVICE_ADDRESS), Ok(Some(0x8002_0304_0506_0708_u64 as i64)));
        assert_eq!(
            bundle.get_long_array(KEY_DEST_ADDRESS_LIST),
            Ok(Some(&[-1_i64, 0x0100_0000_0000_0001][..]))
        );
        assert_eq!(bundle.get_int_array(KEY_UL_TDOA_DEVICE_ID), Ok(Some(&[-1, 127, 0][..])));
        assert_eq!(bundle.get_int(KEY_AOA_RESULT_REQUEST), Ok(Some(0xF0)));
        assert_eq!(
            bundle.get(KEY_HAS_RANGING_RESULT_REPORT_MESSAGE),
            Some(&BundleValue::Bool(true))
        );
        assert_eq!(bundle.get(KEY_ABSOLUTE_INITIATION_TIME_US), Some(&BundleValue::Long(-1)));
    }

    #[test]
    fn test_conditional_keys() {
        let bundle = controlee_params().to_bundle();
        assert!(bundle.contains_key(KEY_DEST_ADDRESS_LIST));
        assert!(bundle.contains_key(KEY_SUB_SESSION_ID));
        assert!(bundle.contains_key(KEY_SESSION_KEY));
        assert!(bundle.contains_key(KEY_SUBSESSION_KEY));
        assert!(!bundle.contains_key(KEY_CAP_SIZE_RANGE));
        assert!(!bundle.contains_key(KEY_DLTDOA_BLOCK_STRIDING));
        assert!(!bundle.contains_key(KEY_VENDOR_ID));
        assert!(!bundle.contains_key(KEY_STATIC_STS_IV));
        assert!(!bundle.contains_key(KEY_REFERENCE_TIME_BASE));
        assert!(!bundle.contains_key(KEY_REFERENCE_SESSION_HANDLE));
        assert!(!bundle.contains_key(KEY_SESSION_OFFSET_IN_MICRO_SECONDS));

        let bundle = controller_params().to_bundle();
        assert!(!bundle.contains_key(KEY_DEST_ADDRESS_LIST));
        assert!(!bundle.contains_key(KEY_SUB_SESSION_ID));
        assert!(!bundle.contains_key(KEY_SESSION_KEY));
        assert!(!bundle.contains_key(KEY_UL_TDOA_DEVICE_ID));
        assert_eq!(bundle.get_int_array(KEY_CAP_SIZE_RANGE), Ok(Some(&[-16, 5][..])));
        assert_eq!(bundle.get_int(KEY_REFERENCE_TIME_BASE), Ok(Some(1)));
        assert_eq!(bundle.get_int(KEY_REFERENCE_SESSION_HANDLE), Ok(Some(-1)));
        assert_eq!(bundle.get_int(KEY_SESSION_OFFSET_IN_MICRO_SECONDS), Ok(Some(300)));

        let dt_tag_params = controller_params()
            .to_builder()
            .device_type(DeviceType::DtTag)
            .device_role(DeviceRole::DtTag)
            .ranging_round_usage(RangingRoundUsage::DlTdoa)
            .multi_node_mode(MultiNodeMode::OneToMany)
            .rframe_config(RframeConfig::SP1)
            .dl_tdoa_block_striding(7)
            .build()
            .unwrap();
        let bundle = dt_tag_params.to_bundle();
        assert_eq!(bundle.get_int(KEY_DLTDOA_BLOCK_STRIDING), Ok(Some(7)));
        assert_eq!(FiraOpenSessionParams::from_bundle(&bundle).unwrap(), dt_tag_params);
    }

    #[test]
    fn test_conditional_fields_round_trip() {
        init_test_logging();

        let short_dest_list = vec![UwbAddress::Short([0x12, 0x34])];
        let cases: Vec<(&str, bool, FiraOpenSessionParamsBuilder)> = vec![
            (KEY_DEST_ADDRESS_LIST, true, controlee_params().to_builder()),
            (
                KEY_DEST_ADDRESS_LIST,
                false,
                controller_params().to_builder().dest_address_list(short_dest_list.clone()).clone(),
            ),
            (
                KEY_DEST_ADDRESS_LIST,
                false,
                controller_params()
                    .to_builder()
                    .scheduled_mode(ScheduledMode::TimeScheduledRanging)
                    .ranging_round_usage(RangingRoundUsage::DlTdoa)
                    .dest_address_list(short_dest_list.clone())
                    .clone(),
            ),
            (KEY_CAP_SIZE_RANGE, true, controller_params().to_builder()),
            (
                KEY_CAP_SIZE_RANGE,
                false,
                controller_params()
                    .to_builder()
                    .scheduled_mode(ScheduledMode::TimeScheduledRanging)
                    .dest_address_list(short_dest_list)
                    .clone(),
            ),
            (
                KEY_DLTDOA_BLOCK_STRIDING,
                true,
                controller_params()
                    .to_builder()
                    .device_type(DeviceType::DtTag)
                    .device_role(DeviceRole::DtTag)
                    .ranging_round_usage(RangingRoundUsage::DlTdoa)
                    .multi_node_mode(MultiNodeMode::OneToMany)
                    .rframe_config(RframeConfig::SP1)
                    .dl_tdoa_block_striding(3)
                    .clone(),
            ),
            (
                KEY_DLTDOA_BLOCK_STRIDING,
                false,
                controller_params().to_builder().dl_tdoa_block_striding(3).clone(),
            ),
            (KEY_REFERENCE_TIME_BASE, true, controller_params().to_builder()),
            (
                KEY_REFERENCE_TIME_BASE,
                false,
                controller_params()
                    .to_builder()
                    .device_type(DeviceType::Controlee)
                    .device_role(DeviceRole::Responder)
                    .clone(),
            ),
            (KEY_SUB_SESSION_ID, true, controlee_params().to_builder()),
            (KEY_SUB_SESSION_ID, false, controller_params().to_builder().sub_session_id(5).clone()),
        ];

        for (key, is_encoded, builder) in cases {
            let params = builder.build().unwrap();
            let bundle = params.to_bundle();
            assert_eq!(bundle.contains_key(key), is_encoded, "{key}");
            assert_eq!(FiraOpenSessionParams::from_bundle(&bundle).unwrap(), params, "{key}");
        }
    }

    #[test]
    fn test_absent_sub_session_id_reads_as_zero() {
        init_test_logging();

        let mut bundle = controlee_params().to_bundle();
        assert!(bundle.remove(KEY_SUB_SESSION_ID).is_some());
        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params.sub_session_id(), &0);
    }

    #[test]
    fn test_dest_address_list_read_for_twr_only() {
        init_test_logging();

        let mut bundle = controller_params().to_bundle();
        bundle.put_long_array(KEY_DEST_ADDRESS_LIST, vec![0x1234_0000_0000_0000]);
        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params.dest_address_list(), &None);

        bundle.put_int(KEY_SCHEDULED_MODE, ScheduledMode::TimeScheduledRanging as i32);
        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params.dest_address_list(), &Some(vec![UwbAddress::Short([0x12, 0x34])]));
    }

    #[test]
    fn test_legacy_defaults() {
        init_test_logging();

        let mut bundle = controller_params().to_bundle();
        for key in [
            KEY_SESSION_TYPE,
            KEY_HAS_CONTROL_MESSAGE,
            KEY_HAS_RANGING_CONTROL_PHASE,
            KEY_IS_DIAGNOSTICS_ENABLED,
            KEY_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS,
            KEY_ANTENNA_MODE,
            KEY_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER,
            KEY_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER,
            KEY_RANGE_DATA_NTF_AOA_ELEVATION_LOWER,
            KEY_RANGE_DATA_NTF_AOA_ELEVATION_UPPER,
            KEY_RANGING_ERROR_STREAK_TIMEOUT_MS,
            KEY_LINK_LAYER_MODE,
            KEY_DATA_REPETITION_COUNT,
            KEY_RANGING_TIME_STRUCT,
            KEY_MIN_FRAMES_PER_RR,
            KEY_MTU_SIZE,
            KEY_INTER_FRAME_INTERVAL,
            KEY_FILTER_TYPE,
            KEY_MAX_NUMBER_OF_MEASUREMENTS,
            KEY_APPLICATION_DATA_ENDPOINT,
        ] {
            assert!(bundle.remove(key).is_some(), "{key} is not encoded");
        }

        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params, controller_params());
        assert_eq!(params.has_control_message(), &true);
        assert_eq!(params.range_data_ntf_aoa_azimuth_lower(), &-180.0);
        assert_eq!(params.ranging_error_streak_timeout_ms(), &10000);
        assert_eq!(params.ranging_time_struct(), &RangingTimeStruct::BlockBasedScheduling);
        assert_eq!(params.min_frames_per_rr(), &1);
        assert_eq!(params.mtu_size(), &1048);
        assert_eq!(params.filter_type(), &FilterType::Default);

        // Without the key, the scheduled mode is time scheduled and the contention window is
        // not encoded anymore.
        bundle.put_int(KEY_RANGING_ROUND_USAGE, RangingRoundUsage::DlTdoa as i32);
        bundle.remove(KEY_SCHEDULED_MODE);
        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params.scheduled_mode(), &ScheduledMode::TimeScheduledRanging);
        assert!(!params.to_bundle().contains_key(KEY_CAP_SIZE_RANGE));
    }

    #[test]
    fn test_absent_keys_read_as_zero() {
        init_test_logging();

        let mut bundle = controller_params().to_bundle();
        bundle.remove(KEY_SESSION_PRIORITY);
        bundle.remove(KEY_SLOT_DURATION_RSTU);
        bundle.remove(KEY_HAS_TIME_OF_FLIGHT_REPORT);
        bundle.remove(KEY_RFRAME_CONFIG);

        let params = FiraOpenSessionParams::from_bundle(&bundle).unwrap();
        assert_eq!(params.session_priority(), &0);
        assert_eq!(params.slot_duration_rstu(), &0);
        assert_eq!(params.has_time_of_flight_report(), &false);
        assert_eq!(params.rframe_config(), &RframeConfig::SP0);

        // There is no channel with code 0.
        bundle.remove(KEY_CHANNEL_NUMBER);
        assert_eq!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::MissingKey(KEY_CHANNEL_NUMBER.to_string())))
        );
    }

    #[test]
    fn test_missing_required_key() {
        init_test_logging();

        for key in [
            KEY_PROTOCOL_VERSION,
            KEY_SESSION_ID,
            KEY_DEVICE_TYPE,
            KEY_DEVICE_ROLE,
            KEY_MULTI_NODE_MODE,
            KEY_DEVICE_ADDRESS,
        ] {
            let mut bundle = controller_params().to_bundle();
            bundle.remove(key);
            assert_eq!(
                FiraOpenSessionParams::from_bundle(&bundle),
                Err(Error::Schema(SchemaError::MissingKey(key.to_string())))
            );
        }
    }

    #[test]
    fn test_invalid_bundle() {
        init_test_logging();

        let mut bundle = controller_params().to_bundle();
        bundle.put_string(KEY_PROTOCOL_NAME, "ccc");
        assert_eq!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::InvalidProtocol(Some("ccc".to_string()))))
        );

        let mut bundle = controller_params().to_bundle();
        bundle.put_int(KEY_BUNDLE_VERSION, 2);
        assert_eq!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::UnsupportedVersion(2)))
        );

        let mut bundle = controller_params().to_bundle();
        bundle.put_string(KEY_PROTOCOL_VERSION, "1");
        assert_eq!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::MalformedProtocolVersion("1".to_string())))
        );

        let mut bundle = controller_params().to_bundle();
        bundle.put_long(KEY_SESSION_ID, 10);
        assert!(matches!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::TypeMismatch { .. }))
        ));

        let mut bundle = controller_params().to_bundle();
        bundle.put_int(KEY_DEVICE_ROLE, 42);
        assert_eq!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::InvalidValue {
                key: KEY_DEVICE_ROLE.to_string(),
                value: "42".to_string()
            }))
        );

        let mut bundle = controller_params().to_bundle();
        bundle.put_int(KEY_SLOTS_PER_RANGING_ROUND, 256);
        assert!(matches!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::InvalidValue { .. }))
        ));

        let mut bundle = controller_params().to_bundle();
        bundle.put_int_array(KEY_VENDOR_ID, vec![0xFE, 0xDC]);
        assert!(matches!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Schema(SchemaError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_decoded_params_are_validated() {
        init_test_logging();

        let mut bundle = controller_params().to_bundle();
        bundle.put_int_array(KEY_VENDOR_ID, vec![1, 2, 3]);
        assert!(matches!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Validation(ValidationError::InvalidStsConfig(_)))
        ));

        // The mode with 2-byte header is rejected after decoding.
        let mut bundle = controller_params().to_bundle();
        bundle.put_int(KEY_MAC_ADDRESS_MODE, MacAddressMode::MacAddress8Bytes2BytesHeader as i32);
        assert!(matches!(
            FiraOpenSessionParams::from_bundle(&bundle),
            Err(Error::Validation(ValidationError::InvalidAddress(_)))
        ));
    }
}
