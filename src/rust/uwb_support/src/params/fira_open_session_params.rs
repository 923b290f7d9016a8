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

//! This module defines the parameters used to open a FiRa ranging session.

use log::warn;
use zeroize::Zeroize;

use crate::error::ValidationError;
use crate::params::fira_params::{
    AoaResultRequest, AoaType, BprfPhrDataRate, DeviceRole, DeviceType, FilterType,
    FiraProtocolVersion, MacAddressMode, MacFcsType, MultiNodeMode, PreambleDuration, PrfMode,
    PsduDataRate, RangeDataNtfConfig, RangingRoundUsage, RangingTimeStruct, RframeConfig,
    ScheduledMode, SessionHandle, SessionId, StsConfig, StsLength, SubSessionId, UwbAddress,
    UwbChannel,
};
use crate::params::utils::{narrow_u32, required, validate};
use crate::utils::{builder_field, getter_field};

// The default value of each parameters.
const DEFAULT_SESSION_TYPE: u8 = 0;
const DEFAULT_RANGING_ROUND_USAGE: RangingRoundUsage = RangingRoundUsage::DsTwr;
const DEFAULT_INITIATION_TIME_MS: u64 = 0;
const DEFAULT_ABSOLUTE_INITIATION_TIME_US: u64 = 0;
const DEFAULT_SLOT_DURATION_RSTU: u16 = 2400;
const DEFAULT_SLOTS_PER_RR: u8 = 25;
const DEFAULT_RANGING_INTERVAL_MS: u32 = 200;
const DEFAULT_BLOCK_STRIDE_LENGTH: u8 = 0;
const DEFAULT_HOPPING_MODE: u8 = 0;
const DEFAULT_MAX_RANGING_ROUND_RETRIES: u16 = 0;
const DEFAULT_SESSION_PRIORITY: u8 = 50;
const DEFAULT_MAC_ADDRESS_MODE: MacAddressMode = MacAddressMode::MacAddress2Bytes;
const DEFAULT_HAS_RANGING_RESULT_REPORT_MESSAGE: bool = true;
const DEFAULT_HAS_CONTROL_MESSAGE: bool = true;
const DEFAULT_HAS_RANGING_CONTROL_PHASE: bool = false;
const DEFAULT_MEASUREMENT_REPORT_TYPE: u8 = 0;
const DEFAULT_MEASUREMENT_REPORT_PHASE: u8 = 0;
const DEFAULT_IN_BAND_TERMINATION_ATTEMPT_COUNT: u8 = 1;
const DEFAULT_CHANNEL_NUMBER: UwbChannel = UwbChannel::Channel9;
const DEFAULT_PREAMBLE_CODE_INDEX: u8 = 10;
const DEFAULT_RFRAME_CONFIG: RframeConfig = RframeConfig::SP3;
const DEFAULT_PRF_MODE: PrfMode = PrfMode::Bprf;
const DEFAULT_CAP_SIZE_RANGE: [u8; 2] = [24, 5];
const DEFAULT_SCHEDULED_MODE: ScheduledMode = ScheduledMode::TimeScheduledRanging;
const DEFAULT_PREAMBLE_DURATION: PreambleDuration = PreambleDuration::T64Symbols;
const DEFAULT_SFD_ID: u8 = 2;
const DEFAULT_STS_SEGMENT_COUNT: u8 = 1;
const DEFAULT_STS_LENGTH: StsLength = StsLength::Length64;
const DEFAULT_PSDU_DATA_RATE: PsduDataRate = PsduDataRate::Rate6m81;
const DEFAULT_BPRF_PHR_DATA_RATE: BprfPhrDataRate = BprfPhrDataRate::Rate850k;
const DEFAULT_FCS_TYPE: MacFcsType = MacFcsType::Crc16;
const DEFAULT_IS_TX_ADAPTIVE_PAYLOAD_POWER_ENABLED: bool = false;
const DEFAULT_STS_CONFIG: StsConfig = StsConfig::Static;
const DEFAULT_IS_RSSI_REPORTING_ENABLED: bool = false;
const DEFAULT_IS_DIAGNOSTICS_ENABLED: bool = false;
const DEFAULT_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS: u8 = 0;
const DEFAULT_ANTENNA_MODE: u8 = ANTENNA_MODE_OMNI;
const DEFAULT_IS_KEY_ROTATION_ENABLED: bool = false;
const DEFAULT_KEY_ROTATION_RATE: u8 = 0;
const DEFAULT_AOA_RESULT_REQUEST: AoaResultRequest = AoaResultRequest::ReqAoaResults;
const DEFAULT_RANGE_DATA_NTF_CONFIG: RangeDataNtfConfig = RangeDataNtfConfig::Enable;
const DEFAULT_RANGE_DATA_NTF_PROXIMITY_NEAR_CM: u32 = 0;
const DEFAULT_RANGE_DATA_NTF_PROXIMITY_FAR_CM: u32 = 20000;
const DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER: f64 = -180.0;
const DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER: f64 = 180.0;
const DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_LOWER: f64 = -90.0;
const DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_UPPER: f64 = 90.0;
const DEFAULT_HAS_TIME_OF_FLIGHT_REPORT: bool = true;
const DEFAULT_HAS_ANGLE_OF_ARRIVAL_AZIMUTH_REPORT: bool = false;
const DEFAULT_HAS_ANGLE_OF_ARRIVAL_ELEVATION_REPORT: bool = false;
const DEFAULT_HAS_ANGLE_OF_ARRIVAL_FIGURE_OF_MERIT_REPORT: bool = false;
const DEFAULT_AOA_TYPE: AoaType = AoaType::Azimuth;
const DEFAULT_NUM_OF_MSRMT_FOCUS_ON_RANGE: u8 = 0;
const DEFAULT_NUM_OF_MSRMT_FOCUS_ON_AOA_AZIMUTH: u8 = 0;
const DEFAULT_NUM_OF_MSRMT_FOCUS_ON_AOA_ELEVATION: u8 = 0;
const DEFAULT_RANGING_ERROR_STREAK_TIMEOUT_MS: u64 = 10000;
const DEFAULT_LINK_LAYER_MODE: u8 = 0;
const DEFAULT_DATA_REPETITION_COUNT: u8 = 0;
const DEFAULT_RANGING_TIME_STRUCT: RangingTimeStruct = RangingTimeStruct::BlockBasedScheduling;
const DEFAULT_MIN_FRAMES_PER_RR: u8 = 1;
const DEFAULT_MTU_SIZE: u16 = 1048;
const DEFAULT_INTER_FRAME_INTERVAL: u8 = 1;
const DEFAULT_DL_TDOA_BLOCK_STRIDING: u8 = 0;
const DEFAULT_UL_TDOA_TX_INTERVAL_MS: u32 = 2000;
const DEFAULT_UL_TDOA_RANDOM_WINDOW_MS: u32 = 0;
const DEFAULT_UL_TDOA_DEVICE_ID_TYPE: u8 = 0;
const DEFAULT_UL_TDOA_TX_TIMESTAMP_TYPE: u8 = 0;
const DEFAULT_FILTER_TYPE: FilterType = FilterType::Default;
const DEFAULT_MAX_NUMBER_OF_MEASUREMENTS: u16 = 0;
const DEFAULT_SESSION_DATA_TRANSFER_STATUS_NTF_CONFIG: bool = false;
const DEFAULT_REFERENCE_TIME_BASE: u8 = 0;
const DEFAULT_REFERENCE_SESSION_HANDLE: SessionHandle = 0;
const DEFAULT_SESSION_OFFSET_IN_MICRO_SECONDS: u32 = 0;
const DEFAULT_APPLICATION_DATA_ENDPOINT: u8 = 0;

/// The antenna mode that uses the omni-directional antenna for both ranging and AoA.
pub const ANTENNA_MODE_OMNI: u8 = 0;

const VALID_KEY_LENGTHS: [usize; 2] = [16, 32];
const VENDOR_ID_LENGTH: usize = 2;
const STATIC_STS_IV_LENGTH: usize = 6;

/// The parameters needed to open a FiRa ranging session.
///
/// The instance is immutable. Use [`FiraOpenSessionParamsBuilder::from_params`] to derive a new
/// one with some fields overridden.
#[derive(Clone, PartialEq)]
pub struct FiraOpenSessionParams {
    protocol_version: FiraProtocolVersion,
    session_id: SessionId,
    session_type: u8,
    device_type: DeviceType,
    device_role: DeviceRole,
    ranging_round_usage: RangingRoundUsage,
    multi_node_mode: MultiNodeMode,
    device_address: UwbAddress,
    dest_address_list: Option<Vec<UwbAddress>>,
    initiation_time_ms: u64,
    absolute_initiation_time_us: u64,
    slot_duration_rstu: u16,
    slots_per_rr: u8,
    ranging_interval_ms: u32,
    block_stride_length: u8,
    hopping_mode: u8,
    max_ranging_round_retries: u16,
    session_priority: u8,
    mac_address_mode: MacAddressMode,
    has_ranging_result_report_message: bool,
    has_control_message: bool,
    has_ranging_control_phase: bool,
    measurement_report_type: u8,
    measurement_report_phase: u8,
    in_band_termination_attempt_count: u8,
    channel_number: UwbChannel,
    preamble_code_index: u8,
    rframe_config: RframeConfig,
    prf_mode: PrfMode,
    cap_size_range: [u8; 2],
    scheduled_mode: ScheduledMode,
    preamble_duration: PreambleDuration,
    sfd_id: u8,
    sts_segment_count: u8,
    sts_length: StsLength,
    psdu_data_rate: PsduDataRate,
    bprf_phr_data_rate: BprfPhrDataRate,
    fcs_type: MacFcsType,
    is_tx_adaptive_payload_power_enabled: bool,
    sts_config: StsConfig,
    sub_session_id: SubSessionId,
    session_key: Option<Vec<u8>>,
    subsession_key: Option<Vec<u8>>,
    vendor_id: Option<Vec<u8>>,
    static_sts_iv: Option<Vec<u8>>,
    is_rssi_reporting_enabled: bool,
    is_diagnostics_enabled: bool,
    diagrams_frame_reports_fields_flags: u8,
    antenna_mode: u8,
    is_key_rotation_enabled: bool,
    key_rotation_rate: u8,
    aoa_result_request: AoaResultRequest,
    range_data_ntf_config: RangeDataNtfConfig,
    range_data_ntf_proximity_near_cm: u32,
    range_data_ntf_proximity_far_cm: u32,
    range_data_ntf_aoa_azimuth_lower: f64,
    range_data_ntf_aoa_azimuth_upper: f64,
    range_data_ntf_aoa_elevation_lower: f64,
    range_data_ntf_aoa_elevation_upper: f64,
    has_time_of_flight_report: bool,
    has_angle_of_arrival_azimuth_report: bool,
    has_angle_of_arrival_elevation_report: bool,
    has_angle_of_arrival_figure_of_merit_report: bool,
    aoa_type: AoaType,
    num_of_msrmt_focus_on_range: u8,
    num_of_msrmt_focus_on_aoa_azimuth: u8,
    num_of_msrmt_focus_on_aoa_elevation: u8,
    ranging_error_streak_timeout_ms: u64,
    link_layer_mode: u8,
    data_repetition_count: u8,
    ranging_time_struct: RangingTimeStruct,
    min_frames_per_rr: u8,
    mtu_size: u16,
    inter_frame_interval: u8,
    dl_tdoa_block_striding: u8,
    ul_tdoa_tx_interval_ms: u32,
    ul_tdoa_random_window_ms: u32,
    ul_tdoa_device_id_type: u8,
    ul_tdoa_device_id: Option<Vec<u8>>,
    ul_tdoa_tx_timestamp_type: u8,
    filter_type: FilterType,
    max_number_of_measurements: u16,
    session_data_transfer_status_ntf_config: bool,
    reference_time_base: u8,
    reference_session_handle: SessionHandle,
    session_offset_in_micro_seconds: u32,
    application_data_endpoint: u8,
}

/// Explicitly implement Debug trait to prevent logging PII data.
impl std::fmt::Debug for FiraOpenSessionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        static REDACTED_STR: &str = "redacted";

        f.debug_struct("FiraOpenSessionParams")
            .field("protocol_version", &self.protocol_version)
            .field("session_id", &self.session_id)
            .field("session_type", &self.session_type)
            .field("device_type", &self.device_type)
            .field("device_role", &self.device_role)
            .field("ranging_round_usage", &self.ranging_round_usage)
            .field("multi_node_mode", &self.multi_node_mode)
            .field("device_address", &self.device_address)
            .field("dest_address_list", &self.dest_address_list)
            .field("initiation_time_ms", &self.initiation_time_ms)
            .field("absolute_initiation_time_us", &self.absolute_initiation_time_us)
            .field("slot_duration_rstu", &self.slot_duration_rstu)
            .field("slots_per_rr", &self.slots_per_rr)
            .field("ranging_interval_ms", &self.ranging_interval_ms)
            .field("block_stride_length", &self.block_stride_length)
            .field("hopping_mode", &self.hopping_mode)
            .field("max_ranging_round_retries", &self.max_ranging_round_retries)
            .field("session_priority", &self.session_priority)
            .field("mac_address_mode", &self.mac_address_mode)
            .field("has_ranging_result_report_message", &self.has_ranging_result_report_message)
            .field("has_control_message", &self.has_control_message)
            .field("has_ranging_control_phase", &self.has_ranging_control_phase)
            .field("measurement_report_type", &self.measurement_report_type)
            .field("measurement_report_phase", &self.measurement_report_phase)
            .field("in_band_termination_attempt_count", &self.in_band_termination_attempt_count)
            .field("channel_number", &self.channel_number)
            .field("preamble_code_index", &self.preamble_code_index)
            .field("rframe_config", &self.rframe_config)
            .field("prf_mode", &self.prf_mode)
            .field("cap_size_range", &self.cap_size_range)
            .field("scheduled_mode", &self.scheduled_mode)
            .field("preamble_duration", &self.preamble_duration)
            .field("sfd_id", &self.sfd_id)
            .field("sts_segment_count", &self.sts_segment_count)
            .field("sts_length", &self.sts_length)
            .field("psdu_data_rate", &self.psdu_data_rate)
            .field("bprf_phr_data_rate", &self.bprf_phr_data_rate)
            .field("fcs_type", &self.fcs_type)
            .field(
                "is_tx_adaptive_payload_power_enabled",
                &self.is_tx_adaptive_payload_power_enabled,
            )
            .field("sts_config", &self.sts_config)
            .field("sub_session_id", &self.sub_session_id)
            .field("session_key", &REDACTED_STR) // session_key field is PII.
            .field("subsession_key", &REDACTED_STR) // subsession_key field is PII.
            .field("vendor_id", &REDACTED_STR) // vendor_id field is PII.
            .field("static_sts_iv", &REDACTED_STR) // static_sts_iv field is PII.
            .field("is_rssi_reporting_enabled", &self.is_rssi_reporting_enabled)
            .field("is_diagnostics_enabled", &self.is_diagnostics_enabled)
            .field(
                "diagrams_frame_reports_fields_flags",
                &self.diagrams_frame_reports_fields_flags,
            )
            .field("antenna_mode", &self.antenna_mode)
            .field("is_key_rotation_enabled", &self.is_key_rotation_enabled)
            .field("key_rotation_rate", &self.key_rotation_rate)
            .field("aoa_result_request", &self.aoa_result_request)
            .field("range_data_ntf_config", &self.range_data_ntf_config)
            .field("range_data_ntf_proximity_near_cm", &self.range_data_ntf_proximity_near_cm)
            .field("range_data_ntf_proximity_far_cm", &self.range_data_ntf_proximity_far_cm)
            .field("range_data_ntf_aoa_azimuth_lower", &self.range_data_ntf_aoa_azimuth_lower)
            .field("range_data_ntf_aoa_azimuth_upper", &self.range_data_ntf_aoa_azimuth_upper)
            .field("range_data_ntf_aoa_elevation_lower", &self.range_data_ntf_aoa_elevation_lower)
            .field("range_data_ntf_aoa_elevation_upper", &self.range_data_ntf_aoa_elevation_upper)
            .field("has_time_of_flight_report", &self.has_time_of_flight_report)
            .field(
                "has_angle_of_arrival_azimuth_report",
                &self.has_angle_of_arrival_azimuth_report,
            )
            .field(
                "has_angle_of_arrival_elevation_report",
                &self.has_angle_of_arrival_elevation_report,
            )
            .field(
                "has_angle_of_arrival_figure_of_merit_report",
                &self.has_angle_of_arrival_figure_of_merit_report,
            )
            .field("aoa_type", &self.aoa_type)
            .field("num_of_msrmt_focus_on_range", &self.num_of_msrmt_focus_on_range)
            .field("num_of_msrmt_focus_on_aoa_azimuth", &self.num_of_msrmt_focus_on_aoa_azimuth)
            .field(
                "num_of_msrmt_focus_on_aoa_elevation",
                &self.num_of_msrmt_focus_on_aoa_elevation,
            )
            .field("ranging_error_streak_timeout_ms", &self.ranging_error_streak_timeout_ms)
            .field("link_layer_mode", &self.link_layer_mode)
            .field("data_repetition_count", &self.data_repetition_count)
            .field("ranging_time_struct", &self.ranging_time_struct)
            .field("min_frames_per_rr", &self.min_frames_per_rr)
            .field("mtu_size", &self.mtu_size)
            .field("inter_frame_interval", &self.inter_frame_interval)
            .field("dl_tdoa_block_striding", &self.dl_tdoa_block_striding)
            .field("ul_tdoa_tx_interval_ms", &self.ul_tdoa_tx_interval_ms)
            .field("ul_tdoa_random_window_ms", &self.ul_tdoa_random_window_ms)
            .field("ul_tdoa_device_id_type", &self.ul_tdoa_device_id_type)
            .field("ul_tdoa_device_id", &self.ul_tdoa_device_id)
            .field("ul_tdoa_tx_timestamp_type", &self.ul_tdoa_tx_timestamp_type)
            .field("filter_type", &self.filter_type)
            .field("max_number_of_measurements", &self.max_number_of_measurements)
            .field(
                "session_data_transfer_status_ntf_config",
                &self.session_data_transfer_status_ntf_config,
            )
            .field("reference_time_base", &self.reference_time_base)
            .field("reference_session_handle", &self.reference_session_handle)
            .field("session_offset_in_micro_seconds", &self.session_offset_in_micro_seconds)
            .field("application_data_endpoint", &self.application_data_endpoint)
            .finish()
    }
}

fn zeroize_secret(secret: &mut Option<Vec<u8>>) {
    if let Some(bytes) = secret.as_mut() {
        bytes.zeroize();
    }
}

impl Drop for FiraOpenSessionParams {
    fn drop(&mut self) {
        zeroize_secret(&mut self.session_key);
        zeroize_secret(&mut self.subsession_key);
        zeroize_secret(&mut self.vendor_id);
        zeroize_secret(&mut self.static_sts_iv);
    }
}

#[allow(missing_docs)]
impl FiraOpenSessionParams {
    // Generate the getter methods for all the fields.
    getter_field!(protocol_version, FiraProtocolVersion);
    getter_field!(session_id, SessionId);
    getter_field!(session_type, u8);
    getter_field!(device_type, DeviceType);
    getter_field!(device_role, DeviceRole);
    getter_field!(ranging_round_usage, RangingRoundUsage);
    getter_field!(multi_node_mode, MultiNodeMode);
    getter_field!(device_address, UwbAddress);
    getter_field!(dest_address_list, Option<Vec<UwbAddress>>);
    getter_field!(initiation_time_ms, u64);
    getter_field!(absolute_initiation_time_us, u64);
    getter_field!(slot_duration_rstu, u16);
    getter_field!(slots_per_rr, u8);
    getter_field!(ranging_interval_ms, u32);
    getter_field!(block_stride_length, u8);
    getter_field!(hopping_mode, u8);
    getter_field!(max_ranging_round_retries, u16);
    getter_field!(session_priority, u8);
    getter_field!(mac_address_mode, MacAddressMode);
    getter_field!(has_ranging_result_report_message, bool);
    getter_field!(has_control_message, bool);
    getter_field!(has_ranging_control_phase, bool);
    getter_field!(measurement_report_type, u8);
    getter_field!(measurement_report_phase, u8);
    getter_field!(in_band_termination_attempt_count, u8);
    getter_field!(channel_number, UwbChannel);
    getter_field!(preamble_code_index, u8);
    getter_field!(rframe_config, RframeConfig);
    getter_field!(prf_mode, PrfMode);
    getter_field!(cap_size_range, [u8; 2]);
    getter_field!(scheduled_mode, ScheduledMode);
    getter_field!(preamble_duration, PreambleDuration);
    getter_field!(sfd_id, u8);
    getter_field!(sts_segment_count, u8);
    getter_field!(sts_length, StsLength);
    getter_field!(psdu_data_rate, PsduDataRate);
    getter_field!(bprf_phr_data_rate, BprfPhrDataRate);
    getter_field!(fcs_type, MacFcsType);
    getter_field!(is_tx_adaptive_payload_power_enabled, bool);
    getter_field!(sts_config, StsConfig);
    getter_field!(sub_session_id, SubSessionId);
    getter_field!(session_key, Option<Vec<u8>>);
    getter_field!(subsession_key, Option<Vec<u8>>);
    getter_field!(vendor_id, Option<Vec<u8>>);
    getter_field!(static_sts_iv, Option<Vec<u8>>);
    getter_field!(is_rssi_reporting_enabled, bool);
    getter_field!(is_diagnostics_enabled, bool);
    getter_field!(diagrams_frame_reports_fields_flags, u8);
    getter_field!(antenna_mode, u8);
    getter_field!(is_key_rotation_enabled, bool);
    getter_field!(key_rotation_rate, u8);
    getter_field!(aoa_result_request, AoaResultRequest);
    getter_field!(range_data_ntf_config, RangeDataNtfConfig);
    getter_field!(range_data_ntf_proximity_near_cm, u32);
    getter_field!(range_data_ntf_proximity_far_cm, u32);
    getter_field!(range_data_ntf_aoa_azimuth_lower, f64);
    getter_field!(range_data_ntf_aoa_azimuth_upper, f64);
    getter_field!(range_data_ntf_aoa_elevation_lower, f64);
    getter_field!(range_data_ntf_aoa_elevation_upper, f64);
    getter_field!(has_time_of_flight_report, bool);
    getter_field!(has_angle_of_arrival_azimuth_report, bool);
    getter_field!(has_angle_of_arrival_elevation_report, bool);
    getter_field!(has_angle_of_arrival_figure_of_merit_report, bool);
    getter_field!(aoa_type, AoaType);
    getter_field!(num_of_msrmt_focus_on_range, u8);
    getter_field!(num_of_msrmt_focus_on_aoa_azimuth, u8);
    getter_field!(num_of_msrmt_focus_on_aoa_elevation, u8);
    getter_field!(ranging_error_streak_timeout_ms, u64);
    getter_field!(link_layer_mode, u8);
    getter_field!(data_repetition_count, u8);
    getter_field!(ranging_time_struct, RangingTimeStruct);
    getter_field!(min_frames_per_rr, u8);
    getter_field!(mtu_size, u16);
    getter_field!(inter_frame_interval, u8);
    getter_field!(dl_tdoa_block_striding, u8);
    getter_field!(ul_tdoa_tx_interval_ms, u32);
    getter_field!(ul_tdoa_random_window_ms, u32);
    getter_field!(ul_tdoa_device_id_type, u8);
    getter_field!(ul_tdoa_device_id, Option<Vec<u8>>);
    getter_field!(ul_tdoa_tx_timestamp_type, u8);
    getter_field!(filter_type, FilterType);
    getter_field!(max_number_of_measurements, u16);
    getter_field!(session_data_transfer_status_ntf_config, bool);
    getter_field!(reference_time_base, u8);
    getter_field!(reference_session_handle, SessionHandle);
    getter_field!(session_offset_in_micro_seconds, u32);
    getter_field!(application_data_endpoint, u8);

    /// Return true when the session is a time scheduled two-way ranging session.
    pub fn is_time_scheduled_twr_session(&self) -> bool {
        is_time_scheduled_twr(self.scheduled_mode, self.ranging_round_usage)
    }

    /// Create a builder that is pre-filled with the fields of this instance.
    pub fn to_builder(&self) -> FiraOpenSessionParamsBuilder {
        FiraOpenSessionParamsBuilder::from_params(self)
    }
}

fn is_time_scheduled_twr(scheduled_mode: ScheduledMode, usage: RangingRoundUsage) -> bool {
    scheduled_mode == ScheduledMode::TimeScheduledRanging
        && matches!(
            usage,
            RangingRoundUsage::SsTwr
                | RangingRoundUsage::DsTwr
                | RangingRoundUsage::SsTwrNon
                | RangingRoundUsage::DsTwrNon
        )
}

fn is_valid_key_length(key: &[u8]) -> bool {
    VALID_KEY_LENGTHS.contains(&key.len())
}

fn reset_ignored<T: PartialEq + std::fmt::Debug>(field: &str, value: T, default: T) -> T {
    if value != default {
        warn!("{} is ignored by this session, reset to {:?}", field, default);
    }
    default
}

/// The builder of [`FiraOpenSessionParams`].
#[derive(Clone)]
pub struct FiraOpenSessionParamsBuilder {
    protocol_version: Option<FiraProtocolVersion>,
    session_id: Option<u64>,
    session_type: u8,
    device_type: Option<DeviceType>,
    device_role: Option<DeviceRole>,
    ranging_round_usage: RangingRoundUsage,
    multi_node_mode: Option<MultiNodeMode>,
    device_address: Option<UwbAddress>,
    dest_address_list: Option<Vec<UwbAddress>>,
    initiation_time_ms: u64,
    absolute_initiation_time_us: u64,
    slot_duration_rstu: u16,
    slots_per_rr: u8,
    ranging_interval_ms: u32,
    block_stride_length: u8,
    hopping_mode: u8,
    max_ranging_round_retries: u16,
    session_priority: u8,
    mac_address_mode: MacAddressMode,
    has_ranging_result_report_message: bool,
    has_control_message: bool,
    has_ranging_control_phase: bool,
    measurement_report_type: u8,
    measurement_report_phase: u8,
    in_band_termination_attempt_count: u8,
    channel_number: UwbChannel,
    preamble_code_index: u8,
    rframe_config: RframeConfig,
    prf_mode: PrfMode,
    cap_size_range: [u8; 2],
    scheduled_mode: ScheduledMode,
    preamble_duration: PreambleDuration,
    sfd_id: u8,
    sts_segment_count: u8,
    sts_length: StsLength,
    psdu_data_rate: PsduDataRate,
    bprf_phr_data_rate: BprfPhrDataRate,
    fcs_type: MacFcsType,
    is_tx_adaptive_payload_power_enabled: bool,
    sts_config: StsConfig,
    sub_session_id: Option<u64>,
    session_key: Option<Vec<u8>>,
    subsession_key: Option<Vec<u8>>,
    vendor_id: Option<Vec<u8>>,
    static_sts_iv: Option<Vec<u8>>,
    is_rssi_reporting_enabled: bool,
    is_diagnostics_enabled: bool,
    diagrams_frame_reports_fields_flags: u8,
    antenna_mode: u8,
    is_key_rotation_enabled: bool,
    key_rotation_rate: u8,
    aoa_result_request: AoaResultRequest,
    range_data_ntf_config: RangeDataNtfConfig,
    range_data_ntf_proximity_near_cm: u32,
    range_data_ntf_proximity_far_cm: u32,
    range_data_ntf_aoa_azimuth_lower: f64,
    range_data_ntf_aoa_azimuth_upper: f64,
    range_data_ntf_aoa_elevation_lower: f64,
    range_data_ntf_aoa_elevation_upper: f64,
    has_time_of_flight_report: bool,
    has_angle_of_arrival_azimuth_report: bool,
    has_angle_of_arrival_elevation_report: bool,
    has_angle_of_arrival_figure_of_merit_report: bool,
    aoa_type: AoaType,
    num_of_msrmt_focus_on_range: u8,
    num_of_msrmt_focus_on_aoa_azimuth: u8,
    num_of_msrmt_focus_on_aoa_elevation: u8,
    ranging_error_streak_timeout_ms: u64,
    link_layer_mode: u8,
    data_repetition_count: u8,
    ranging_time_struct: RangingTimeStruct,
    min_frames_per_rr: u8,
    mtu_size: u16,
    inter_frame_interval: u8,
    dl_tdoa_block_striding: u8,
    ul_tdoa_tx_interval_ms: u32,
    ul_tdoa_random_window_ms: u32,
    ul_tdoa_device_id_type: u8,
    ul_tdoa_device_id: Option<Vec<u8>>,
    ul_tdoa_tx_timestamp_type: u8,
    filter_type: FilterType,
    max_number_of_measurements: u16,
    session_data_transfer_status_ntf_config: bool,
    reference_time_base: u8,
    reference_session_handle: u64,
    session_offset_in_micro_seconds: u32,
    application_data_endpoint: u8,
}

#[allow(clippy::new_without_default)]
#[allow(missing_docs)]
impl FiraOpenSessionParamsBuilder {
    /// Fill the default value of each field if exists, otherwise put None.
    pub fn new() -> Self {
        Self {
            protocol_version: None,
            session_id: None,
            session_type: DEFAULT_SESSION_TYPE,
            device_type: None,
            device_role: None,
            ranging_round_usage: DEFAULT_RANGING_ROUND_USAGE,
            multi_node_mode: None,
            device_address: None,
            dest_address_list: None,
            initiation_time_ms: DEFAULT_INITIATION_TIME_MS,
            absolute_initiation_time_us: DEFAULT_ABSOLUTE_INITIATION_TIME_US,
            slot_duration_rstu: DEFAULT_SLOT_DURATION_RSTU,
            slots_per_rr: DEFAULT_SLOTS_PER_RR,
            ranging_interval_ms: DEFAULT_RANGING_INTERVAL_MS,
            block_stride_length: DEFAULT_BLOCK_STRIDE_LENGTH,
            hopping_mode: DEFAULT_HOPPING_MODE,
            max_ranging_round_retries: DEFAULT_MAX_RANGING_ROUND_RETRIES,
            session_priority: DEFAULT_SESSION_PRIORITY,
            mac_address_mode: DEFAULT_MAC_ADDRESS_MODE,
            has_ranging_result_report_message: DEFAULT_HAS_RANGING_RESULT_REPORT_MESSAGE,
            has_control_message: DEFAULT_HAS_CONTROL_MESSAGE,
            has_ranging_control_phase: DEFAULT_HAS_RANGING_CONTROL_PHASE,
            measurement_report_type: DEFAULT_MEASUREMENT_REPORT_TYPE,
            measurement_report_phase: DEFAULT_MEASUREMENT_REPORT_PHASE,
            in_band_termination_attempt_count: DEFAULT_IN_BAND_TERMINATION_ATTEMPT_COUNT,
            channel_number: DEFAULT_CHANNEL_NUMBER,
            preamble_code_index: DEFAULT_PREAMBLE_CODE_INDEX,
            rframe_config: DEFAULT_RFRAME_CONFIG,
            prf_mode: DEFAULT_PRF_MODE,
            cap_size_range: DEFAULT_CAP_SIZE_RANGE,
            scheduled_mode: DEFAULT_SCHEDULED_MODE,
            preamble_duration: DEFAULT_PREAMBLE_DURATION,
            sfd_id: DEFAULT_SFD_ID,
            sts_segment_count: DEFAULT_STS_SEGMENT_COUNT,
            sts_length: DEFAULT_STS_LENGTH,
            psdu_data_rate: DEFAULT_PSDU_DATA_RATE,
            bprf_phr_data_rate: DEFAULT_BPRF_PHR_DATA_RATE,
            fcs_type: DEFAULT_FCS_TYPE,
            is_tx_adaptive_payload_power_enabled: DEFAULT_IS_TX_ADAPTIVE_PAYLOAD_POWER_ENABLED,
            sts_config: DEFAULT_STS_CONFIG,
            sub_session_id: None,
            session_key: None,
            subsession_key: None,
            vendor_id: None,
            static_sts_iv: None,
            is_rssi_reporting_enabled: DEFAULT_IS_RSSI_REPORTING_ENABLED,
            is_diagnostics_enabled: DEFAULT_IS_DIAGNOSTICS_ENABLED,
            diagrams_frame_reports_fields_flags: DEFAULT_DIAGRAMS_FRAME_REPORTS_FIELDS_FLAGS,
            antenna_mode: DEFAULT_ANTENNA_MODE,
            is_key_rotation_enabled: DEFAULT_IS_KEY_ROTATION_ENABLED,
            key_rotation_rate: DEFAULT_KEY_ROTATION_RATE,
            aoa_result_request: DEFAULT_AOA_RESULT_REQUEST,
            range_data_ntf_config: DEFAULT_RANGE_DATA_NTF_CONFIG,
            range_data_ntf_proximity_near_cm: DEFAULT_RANGE_DATA_NTF_PROXIMITY_NEAR_CM,
            range_data_ntf_proximity_far_cm: DEFAULT_RANGE_DATA_NTF_PROXIMITY_FAR_CM,
            range_data_ntf_aoa_azimuth_lower: DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER,
            range_data_ntf_aoa_azimuth_upper: DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER,
            range_data_ntf_aoa_elevation_lower: DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_LOWER,
            range_data_ntf_aoa_elevation_upper: DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_UPPER,
            has_time_of_flight_report: DEFAULT_HAS_TIME_OF_FLIGHT_REPORT,
            has_angle_of_arrival_azimuth_report: DEFAULT_HAS_ANGLE_OF_ARRIVAL_AZIMUTH_REPORT,
            has_angle_of_arrival_elevation_report: DEFAULT_HAS_ANGLE_OF_ARRIVAL_ELEVATION_REPORT,
            has_angle_of_arrival_figure_of_merit_report:
                DEFAULT_HAS_ANGLE_OF_ARRIVAL_FIGURE_OF_MERIT_REPORT,
            aoa_type: DEFAULT_AOA_TYPE,
            num_of_msrmt_focus_on_range: DEFAULT_NUM_OF_MSRMT_FOCUS_ON_RANGE,
            num_of_msrmt_focus_on_aoa_azimuth: DEFAULT_NUM_OF_MSRMT_FOCUS_ON_AOA_AZIMUTH,
            num_of_msrmt_focus_on_aoa_elevation: DEFAULT_NUM_OF_MSRMT_FOCUS_ON_AOA_ELEVATION,
            ranging_error_streak_timeout_ms: DEFAULT_RANGING_ERROR_STREAK_TIMEOUT_MS,
            link_layer_mode: DEFAULT_LINK_LAYER_MODE,
            data_repetition_count: DEFAULT_DATA_REPETITION_COUNT,
            ranging_time_struct: DEFAULT_RANGING_TIME_STRUCT,
            min_frames_per_rr: DEFAULT_MIN_FRAMES_PER_RR,
            mtu_size: DEFAULT_MTU_SIZE,
            inter_frame_interval: DEFAULT_INTER_FRAME_INTERVAL,
            dl_tdoa_block_striding: DEFAULT_DL_TDOA_BLOCK_STRIDING,
            ul_tdoa_tx_interval_ms: DEFAULT_UL_TDOA_TX_INTERVAL_MS,
            ul_tdoa_random_window_ms: DEFAULT_UL_TDOA_RANDOM_WINDOW_MS,
            ul_tdoa_device_id_type: DEFAULT_UL_TDOA_DEVICE_ID_TYPE,
            ul_tdoa_device_id: None,
            ul_tdoa_tx_timestamp_type: DEFAULT_UL_TDOA_TX_TIMESTAMP_TYPE,
            filter_type: DEFAULT_FILTER_TYPE,
            max_number_of_measurements: DEFAULT_MAX_NUMBER_OF_MEASUREMENTS,
            session_data_transfer_status_ntf_config:
                DEFAULT_SESSION_DATA_TRANSFER_STATUS_NTF_CONFIG,
            reference_time_base: DEFAULT_REFERENCE_TIME_BASE,
            reference_session_handle: DEFAULT_REFERENCE_SESSION_HANDLE.into(),
            session_offset_in_micro_seconds: DEFAULT_SESSION_OFFSET_IN_MICRO_SECONDS,
            application_data_endpoint: DEFAULT_APPLICATION_DATA_ENDPOINT,
        }
    }

    /// Copy all the fields of the params. The contention window is only copied for a
    /// contention based session.
    pub fn from_params(params: &FiraOpenSessionParams) -> Self {
        let cap_size_range = match params.scheduled_mode {
            ScheduledMode::ContentionBasedRanging => params.cap_size_range,
            _ => DEFAULT_CAP_SIZE_RANGE,
        };

        Self {
            protocol_version: Some(params.protocol_version),
            session_id: Some(params.session_id.into()),
            session_type: params.session_type,
            device_type: Some(params.device_type),
            device_role: Some(params.device_role),
            ranging_round_usage: params.ranging_round_usage,
            multi_node_mode: Some(params.multi_node_mode),
            device_address: Some(params.device_address.clone()),
            dest_address_list: params.dest_address_list.clone(),
            initiation_time_ms: params.initiation_time_ms,
            absolute_initiation_time_us: params.absolute_initiation_time_us,
            slot_duration_rstu: params.slot_duration_rstu,
            slots_per_rr: params.slots_per_rr,
            ranging_interval_ms: params.ranging_interval_ms,
            block_stride_length: params.block_stride_length,
            hopping_mode: params.hopping_mode,
            max_ranging_round_retries: params.max_ranging_round_retries,
            session_priority: params.session_priority,
            mac_address_mode: params.mac_address_mode,
            has_ranging_result_report_message: params.has_ranging_result_report_message,
            has_control_message: params.has_control_message,
            has_ranging_control_phase: params.has_ranging_control_phase,
            measurement_report_type: params.measurement_report_type,
            measurement_report_phase: params.measurement_report_phase,
            in_band_termination_attempt_count: params.in_band_termination_attempt_count,
            channel_number: params.channel_number,
            preamble_code_index: params.preamble_code_index,
            rframe_config: params.rframe_config,
            prf_mode: params.prf_mode,
            cap_size_range,
            scheduled_mode: params.scheduled_mode,
            preamble_duration: params.preamble_duration,
            sfd_id: params.sfd_id,
            sts_segment_count: params.sts_segment_count,
            sts_length: params.sts_length,
            psdu_data_rate: params.psdu_data_rate,
            bprf_phr_data_rate: params.bprf_phr_data_rate,
            fcs_type: params.fcs_type,
            is_tx_adaptive_payload_power_enabled: params.is_tx_adaptive_payload_power_enabled,
            sts_config: params.sts_config,
            sub_session_id: Some(params.sub_session_id.into()),
            session_key: params.session_key.clone(),
            subsession_key: params.subsession_key.clone(),
            vendor_id: params.vendor_id.clone(),
            static_sts_iv: params.static_sts_iv.clone(),
            is_rssi_reporting_enabled: params.is_rssi_reporting_enabled,
            is_diagnostics_enabled: params.is_diagnostics_enabled,
            diagrams_frame_reports_fields_flags: params.diagrams_frame_reports_fields_flags,
            antenna_mode: params.antenna_mode,
            is_key_rotation_enabled: params.is_key_rotation_enabled,
            key_rotation_rate: params.key_rotation_rate,
            aoa_result_request: params.aoa_result_request,
            range_data_ntf_config: params.range_data_ntf_config,
            range_data_ntf_proximity_near_cm: params.range_data_ntf_proximity_near_cm,
            range_data_ntf_proximity_far_cm: params.range_data_ntf_proximity_far_cm,
            range_data_ntf_aoa_azimuth_lower: params.range_data_ntf_aoa_azimuth_lower,
            range_data_ntf_aoa_azimuth_upper: params.range_data_ntf_aoa_azimuth_upper,
            range_data_ntf_aoa_elevation_lower: params.range_data_ntf_aoa_elevation_lower,
            range_data_ntf_aoa_elevation_upper: params.range_data_ntf_aoa_elevation_upper,
            has_time_of_flight_report: params.has_time_of_flight_report,
            has_angle_of_arrival_azimuth_report: params.has_angle_of_arrival_azimuth_report,
            has_angle_of_arrival_elevation_report: params.has_angle_of_arrival_elevation_report,
            has_angle_of_arrival_figure_of_merit_report: params
                .has_angle_of_arrival_figure_of_merit_report,
            aoa_type: params.aoa_type,
            num_of_msrmt_focus_on_range: params.num_of_msrmt_focus_on_range,
            num_of_msrmt_focus_on_aoa_azimuth: params.num_of_msrmt_focus_on_aoa_azimuth,
            num_of_msrmt_focus_on_aoa_elevation: params.num_of_msrmt_focus_on_aoa_elevation,
            ranging_error_streak_timeout_ms: params.ranging_error_streak_timeout_ms,
            link_layer_mode: params.link_layer_mode,
            data_repetition_count: params.data_repetition_count,
            ranging_time_struct: params.ranging_time_struct,
            min_frames_per_rr: params.min_frames_per_rr,
            mtu_size: params.mtu_size,
            inter_frame_interval: params.inter_frame_interval,
            dl_tdoa_block_striding: params.dl_tdoa_block_striding,
            ul_tdoa_tx_interval_ms: params.ul_tdoa_tx_interval_ms,
            ul_tdoa_random_window_ms: params.ul_tdoa_random_window_ms,
            ul_tdoa_device_id_type: params.ul_tdoa_device_id_type,
            ul_tdoa_device_id: params.ul_tdoa_device_id.clone(),
            ul_tdoa_tx_timestamp_type: params.ul_tdoa_tx_timestamp_type,
            filter_type: params.filter_type,
            max_number_of_measurements: params.max_number_of_measurements,
            session_data_transfer_status_ntf_config: params
                .session_data_transfer_status_ntf_config,
            reference_time_base: params.reference_time_base,
            reference_session_handle: params.reference_session_handle.into(),
            session_offset_in_micro_seconds: params.session_offset_in_micro_seconds,
            application_data_endpoint: params.application_data_endpoint,
        }
    }

    /// Validate the fields and build the params. The checks run in a fixed order and the first
    /// violation is returned.
    pub fn build(&self) -> Result<FiraOpenSessionParams, ValidationError> {
        let protocol_version = required(self.protocol_version, "protocol_version")?;
        let session_id = narrow_u32(required(self.session_id, "session_id")?, "session_id")?;
        let device_type = required(self.device_type, "device_type")?;
        let device_role = required(self.device_role, "device_role")?;
        let multi_node_mode = required(self.multi_node_mode, "multi_node_mode")?;
        let device_address = required(self.device_address.clone(), "device_address")?;
        let reference_session_handle =
            narrow_u32(self.reference_session_handle, "reference_session_handle")?;

        self.check_address(&device_address)?;
        let sub_session_id = self.check_sts_config(device_type)?;
        self.check_interleaving_ratio()?;
        self.check_range_data_ntf_config()?;
        self.check_dl_tdoa_parameters(device_role, multi_node_mode)?;
        self.warn_ignored_fields();

        // Fields that only apply to some sessions fall back to their defaults outside of them.
        let dest_address_list = if self.is_time_scheduled_twr_session() {
            self.dest_address_list.clone()
        } else {
            reset_ignored("dest_address_list", self.dest_address_list.clone(), None)
        };
        let cap_size_range = if self.scheduled_mode == ScheduledMode::ContentionBasedRanging {
            self.cap_size_range
        } else {
            reset_ignored("cap_size_range", self.cap_size_range, DEFAULT_CAP_SIZE_RANGE)
        };
        let dl_tdoa_block_striding = if self.ranging_round_usage == RangingRoundUsage::DlTdoa
            && device_role == DeviceRole::DtTag
        {
            self.dl_tdoa_block_striding
        } else {
            reset_ignored(
                "dl_tdoa_block_striding",
                self.dl_tdoa_block_striding,
                DEFAULT_DL_TDOA_BLOCK_STRIDING,
            )
        };
        let (reference_time_base, reference_session_handle, session_offset_in_micro_seconds) =
            if device_type == DeviceType::Controller {
                (
                    self.reference_time_base,
                    reference_session_handle,
                    self.session_offset_in_micro_seconds,
                )
            } else {
                (
                    reset_ignored(
                        "reference_time_base",
                        self.reference_time_base,
                        DEFAULT_REFERENCE_TIME_BASE,
                    ),
                    reset_ignored(
                        "reference_session_handle",
                        reference_session_handle,
                        DEFAULT_REFERENCE_SESSION_HANDLE,
                    ),
                    reset_ignored(
                        "session_offset_in_micro_seconds",
                        self.session_offset_in_micro_seconds,
                        DEFAULT_SESSION_OFFSET_IN_MICRO_SECONDS,
                    ),
                )
            };

        Ok(FiraOpenSessionParams {
            protocol_version,
            session_id,
            session_type: self.session_type,
            device_type,
            device_role,
            ranging_round_usage: self.ranging_round_usage,
            multi_node_mode,
            device_address,
            dest_address_list,
            initiation_time_ms: self.initiation_time_ms,
            absolute_initiation_time_us: self.absolute_initiation_time_us,
            slot_duration_rstu: self.slot_duration_rstu,
            slots_per_rr: self.slots_per_rr,
            ranging_interval_ms: self.ranging_interval_ms,
            block_stride_length: self.block_stride_length,
            hopping_mode: self.hopping_mode,
            max_ranging_round_retries: self.max_ranging_round_retries,
            session_priority: self.session_priority,
            mac_address_mode: self.mac_address_mode,
            has_ranging_result_report_message: self.has_ranging_result_report_message,
            has_control_message: self.has_control_message,
            has_ranging_control_phase: self.has_ranging_control_phase,
            measurement_report_type: self.measurement_report_type,
            measurement_report_phase: self.measurement_report_phase,
            in_band_termination_attempt_count: self.in_band_termination_attempt_count,
            channel_number: self.channel_number,
            preamble_code_index: self.preamble_code_index,
            rframe_config: self.rframe_config,
            prf_mode: self.prf_mode,
            cap_size_range,
            scheduled_mode: self.scheduled_mode,
            preamble_duration: self.preamble_duration,
            sfd_id: self.sfd_id,
            sts_segment_count: self.sts_segment_count,
            sts_length: self.sts_length,
            psdu_data_rate: self.psdu_data_rate,
            bprf_phr_data_rate: self.bprf_phr_data_rate,
            fcs_type: self.fcs_type,
            is_tx_adaptive_payload_power_enabled: self.is_tx_adaptive_payload_power_enabled,
            sts_config: self.sts_config,
            sub_session_id,
            session_key: self.session_key.clone(),
            subsession_key: self.subsession_key.clone(),
            vendor_id: self.vendor_id.clone(),
            static_sts_iv: self.static_sts_iv.clone(),
            is_rssi_reporting_enabled: self.is_rssi_reporting_enabled,
            is_diagnostics_enabled: self.is_diagnostics_enabled,
            diagrams_frame_reports_fields_flags: self.diagrams_frame_reports_fields_flags,
            antenna_mode: self.antenna_mode,
            is_key_rotation_enabled: self.is_key_rotation_enabled,
            key_rotation_rate: self.key_rotation_rate,
            aoa_result_request: self.aoa_result_request,
            range_data_ntf_config: self.range_data_ntf_config,
            range_data_ntf_proximity_near_cm: self.range_data_ntf_proximity_near_cm,
            range_data_ntf_proximity_far_cm: self.range_data_ntf_proximity_far_cm,
            range_data_ntf_aoa_azimuth_lower: self.range_data_ntf_aoa_azimuth_lower,
            range_data_ntf_aoa_azimuth_upper: self.range_data_ntf_aoa_azimuth_upper,
            range_data_ntf_aoa_elevation_lower: self.range_data_ntf_aoa_elevation_lower,
            range_data_ntf_aoa_elevation_upper: self.range_data_ntf_aoa_elevation_upper,
            has_time_of_flight_report: self.has_time_of_flight_report,
            has_angle_of_arrival_azimuth_report: self.has_angle_of_arrival_azimuth_report,
            has_angle_of_arrival_elevation_report: self.has_angle_of_arrival_elevation_report,
            has_angle_of_arrival_figure_of_merit_report: self
                .has_angle_of_arrival_figure_of_merit_report,
            aoa_type: self.aoa_type,
            num_of_msrmt_focus_on_range: self.num_of_msrmt_focus_on_range,
            num_of_msrmt_focus_on_aoa_azimuth: self.num_of_msrmt_focus_on_aoa_azimuth,
            num_of_msrmt_focus_on_aoa_elevation: self.num_of_msrmt_focus_on_aoa_elevation,
            ranging_error_streak_timeout_ms: self.ranging_error_streak_timeout_ms,
            link_layer_mode: self.link_layer_mode,
            data_repetition_count: self.data_repetition_count,
            ranging_time_struct: self.ranging_time_struct,
            min_frames_per_rr: self.min_frames_per_rr,
            mtu_size: self.mtu_size,
            inter_frame_interval: self.inter_frame_interval,
            dl_tdoa_block_striding,
            ul_tdoa_tx_interval_ms: self.ul_tdoa_tx_interval_ms,
            ul_tdoa_random_window_ms: self.ul_tdoa_random_window_ms,
            ul_tdoa_device_id_type: self.ul_tdoa_device_id_type,
            ul_tdoa_device_id: self.ul_tdoa_device_id.clone(),
            ul_tdoa_tx_timestamp_type: self.ul_tdoa_tx_timestamp_type,
            filter_type: self.filter_type,
            max_number_of_measurements: self.max_number_of_measurements,
            session_data_transfer_status_ntf_config: self.session_data_transfer_status_ntf_config,
            reference_time_base,
            reference_session_handle,
            session_offset_in_micro_seconds,
            application_data_endpoint: self.application_data_endpoint,
        })
    }

    /// Return true when the session is a time scheduled two-way ranging session.
    pub fn is_time_scheduled_twr_session(&self) -> bool {
        is_time_scheduled_twr(self.scheduled_mode, self.ranging_round_usage)
    }

    fn check_address(&self, device_address: &UwbAddress) -> Result<(), ValidationError> {
        validate(
            matches!(
                self.mac_address_mode,
                MacAddressMode::MacAddress2Bytes | MacAddressMode::MacAddress8Bytes
            ),
            ValidationError::InvalidAddress("mac_address_mode should be 2 bytes or 8 bytes"),
        )?;

        let address_len = self.mac_address_mode.address_len();
        validate(
            device_address.len() == address_len,
            ValidationError::InvalidAddress("device_address doesn't match mac_address_mode"),
        )?;

        if !self.is_time_scheduled_twr_session() {
            return Ok(());
        }
        if self.sts_config != StsConfig::ProvisionedForControleeIndividualKey {
            validate(
                self.dest_address_list.is_some(),
                ValidationError::InvalidAddress(
                    "dest_address_list is required by a time scheduled TWR session",
                ),
            )?;
        }
        validate(
            self.dest_address_list.iter().flatten().all(|address| address.len() == address_len),
            ValidationError::InvalidAddress("dest_address_list doesn't match mac_address_mode"),
        )
    }

    /// Return the resolved sub-session id.
    fn check_sts_config(&self, device_type: DeviceType) -> Result<SubSessionId, ValidationError> {
        if self.sts_config == StsConfig::Static {
            validate(
                self.vendor_id.as_ref().map_or(false, |id| id.len() == VENDOR_ID_LENGTH),
                ValidationError::InvalidStsConfig("vendor_id should be 2 bytes for static STS"),
            )?;
            validate(
                self.static_sts_iv.as_ref().map_or(false, |iv| iv.len() == STATIC_STS_IV_LENGTH),
                ValidationError::InvalidStsConfig("static_sts_iv should be 6 bytes for static STS"),
            )?;
        }

        let sub_session_id =
            if self.sts_config.is_individual_key() && device_type == DeviceType::Controlee {
                validate(
                    self.sub_session_id.is_some(),
                    ValidationError::InvalidStsConfig(
                        "sub_session_id is required by an individual key controlee",
                    ),
                )?;
                narrow_u32(self.sub_session_id.unwrap_or_default(), "sub_session_id")?
            } else {
                0
            };

        if self.sts_config == StsConfig::Provisioned {
            if let Some(session_key) = self.session_key.as_ref() {
                validate(
                    is_valid_key_length(session_key),
                    ValidationError::InvalidStsConfig("session_key should be 16 or 32 bytes"),
                )?;
            }
        }

        if self.sts_config == StsConfig::ProvisionedForControleeIndividualKey
            && device_type == DeviceType::Controlee
        {
            if let Some(subsession_key) = self.subsession_key.as_ref() {
                validate(
                    self.session_key.as_deref().map_or(false, is_valid_key_length),
                    ValidationError::InvalidStsConfig(
                        "session_key should be 16 or 32 bytes when subsession_key is set",
                    ),
                )?;
                validate(
                    is_valid_key_length(subsession_key),
                    ValidationError::InvalidStsConfig("subsession_key should be 16 or 32 bytes"),
                )?;
            }
        }
        Ok(sub_session_id)
    }

    fn check_interleaving_ratio(&self) -> Result<(), ValidationError> {
        let ratios = [
            self.num_of_msrmt_focus_on_range,
            self.num_of_msrmt_focus_on_aoa_azimuth,
            self.num_of_msrmt_focus_on_aoa_elevation,
        ];
        match self.aoa_result_request {
            AoaResultRequest::ReqAoaResultsInterleaved => validate(
                ratios.iter().any(|ratio| *ratio > 0),
                ValidationError::InvalidInterleavingRatio(
                    "at least one measurement focus ratio should be set when interleaving",
                ),
            ),
            _ => validate(
                ratios.iter().all(|ratio| *ratio == 0),
                ValidationError::InvalidInterleavingRatio(
                    "measurement focus ratios are only allowed when interleaving",
                ),
            ),
        }
    }

    fn check_range_data_ntf_config(&self) -> Result<(), ValidationError> {
        let is_proximity_default = self.range_data_ntf_proximity_near_cm
            == DEFAULT_RANGE_DATA_NTF_PROXIMITY_NEAR_CM
            && self.range_data_ntf_proximity_far_cm == DEFAULT_RANGE_DATA_NTF_PROXIMITY_FAR_CM;
        let is_aoa_default = self.range_data_ntf_aoa_azimuth_lower
            == DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_LOWER
            && self.range_data_ntf_aoa_azimuth_upper == DEFAULT_RANGE_DATA_NTF_AOA_AZIMUTH_UPPER
            && self.range_data_ntf_aoa_elevation_lower
                == DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_LOWER
            && self.range_data_ntf_aoa_elevation_upper
                == DEFAULT_RANGE_DATA_NTF_AOA_ELEVATION_UPPER;

        match self.range_data_ntf_config {
            RangeDataNtfConfig::Enable => Ok(()),
            RangeDataNtfConfig::Disable => validate(
                is_proximity_default && is_aoa_default,
                ValidationError::InvalidRangeDataNtfConfig(
                    "thresholds should stay default when the notification is disabled",
                ),
            ),
            RangeDataNtfConfig::EnableProximityLevelTrig
            | RangeDataNtfConfig::EnableProximityEdgeTrig => validate(
                !is_proximity_default && is_aoa_default,
                ValidationError::InvalidRangeDataNtfConfig(
                    "proximity trigger requires a proximity bound and default AoA bounds",
                ),
            ),
            RangeDataNtfConfig::EnableAoaLevelTrig | RangeDataNtfConfig::EnableAoaEdgeTrig => {
                validate(
                    is_proximity_default && !is_aoa_default,
                    ValidationError::InvalidRangeDataNtfConfig(
                        "AoA trigger requires an AoA bound and default proximity bounds",
                    ),
                )
            }
            RangeDataNtfConfig::EnableProximityAoaLevelTrig
            | RangeDataNtfConfig::EnableProximityAoaEdgeTrig => validate(
                !(is_proximity_default && is_aoa_default),
                ValidationError::InvalidRangeDataNtfConfig(
                    "proximity and AoA trigger requires at least one bound",
                ),
            ),
        }
    }

    fn check_dl_tdoa_parameters(
        &self,
        device_role: DeviceRole,
        multi_node_mode: MultiNodeMode,
    ) -> Result<(), ValidationError> {
        if device_role != DeviceRole::DtTag {
            return Ok(());
        }
        validate(
            self.sts_config == StsConfig::Static
                && multi_node_mode == MultiNodeMode::OneToMany
                && self.rframe_config == RframeConfig::SP1,
            ValidationError::InvalidDlTdoaConfig(
                "DT-Tag requires static STS, one-to-many mode and SP1 rframe",
            ),
        )
    }

    fn warn_ignored_fields(&self) {
        if self.subsession_key.is_some()
            && self.sts_config != StsConfig::ProvisionedForControleeIndividualKey
        {
            warn!("subsession_key is ignored when sts_config is {:?}", self.sts_config);
        }
    }

    // Generate the setter methods for all the fields.
    builder_field!(protocol_version, FiraProtocolVersion, Some);
    builder_field!(session_id, u64, Some);
    builder_field!(session_type, u8);
    builder_field!(device_type, DeviceType, Some);
    builder_field!(device_role, DeviceRole, Some);
    builder_field!(ranging_round_usage, RangingRoundUsage);
    builder_field!(multi_node_mode, MultiNodeMode, Some);
    builder_field!(device_address, UwbAddress, Some);
    builder_field!(dest_address_list, Vec<UwbAddress>, Some);
    builder_field!(initiation_time_ms, u64);
    builder_field!(absolute_initiation_time_us, u64);
    builder_field!(slot_duration_rstu, u16);
    builder_field!(slots_per_rr, u8);
    builder_field!(ranging_interval_ms, u32);
    builder_field!(block_stride_length, u8);
    builder_field!(hopping_mode, u8);
    builder_field!(max_ranging_round_retries, u16);
    builder_field!(session_priority, u8);
    builder_field!(mac_address_mode, MacAddressMode);
    builder_field!(has_ranging_result_report_message, bool);
    builder_field!(has_control_message, bool);
    builder_field!(has_ranging_control_phase, bool);
    builder_field!(measurement_report_type, u8);
    builder_field!(measurement_report_phase, u8);
    builder_field!(in_band_termination_attempt_count, u8);
    builder_field!(channel_number, UwbChannel);
    builder_field!(preamble_code_index, u8);
    builder_field!(rframe_config, RframeConfig);
    builder_field!(prf_mode, PrfMode);
    builder_field!(cap_size_range, [u8; 2]);
    builder_field!(scheduled_mode, ScheduledMode);
    builder_field!(preamble_duration, PreambleDuration);
    builder_field!(sfd_id, u8);
    builder_field!(sts_segment_count, u8);
    builder_field!(sts_length, StsLength);
    builder_field!(psdu_data_rate, PsduDataRate);
    builder_field!(bprf_phr_data_rate, BprfPhrDataRate);
    builder_field!(fcs_type, MacFcsType);
    builder_field!(is_tx_adaptive_payload_power_enabled, bool);
    builder_field!(sts_config, StsConfig);
    builder_field!(sub_session_id, u64, Some);
    builder_field!(session_key, Vec<u8>, Some);
    builder_field!(subsession_key, Vec<u8>, Some);
    builder_field!(vendor_id, Vec<u8>, Some);
    builder_field!(static_sts_iv, Vec<u8>, Some);
    builder_field!(is_rssi_reporting_enabled, bool);
    builder_field!(is_diagnostics_enabled, bool);
    builder_field!(diagrams_frame_reports_fields_flags, u8);
    builder_field!(antenna_mode, u8);
    builder_field!(is_key_rotation_enabled, bool);
    builder_field!(key_rotation_rate, u8);
    builder_field!(aoa_result_request, AoaResultRequest);
    builder_field!(range_data_ntf_config, RangeDataNtfConfig);
    builder_field!(range_data_ntf_proximity_near_cm, u32);
    builder_field!(range_data_ntf_proximity_far_cm, u32);
    builder_field!(range_data_ntf_aoa_azimuth_lower, f64);
    builder_field!(range_data_ntf_aoa_azimuth_upper, f64);
    builder_field!(range_data_ntf_aoa_elevation_lower, f64);
    builder_field!(range_data_ntf_aoa_elevation_upper, f64);
    builder_field!(has_time_of_flight_report, bool);
    builder_field!(has_angle_of_arrival_azimuth_report, bool);
    builder_field!(has_angle_of_arrival_elevation_report, bool);
    builder_field!(has_angle_of_arrival_figure_of_merit_report, bool);
    builder_field!(aoa_type, AoaType);
    builder_field!(num_of_msrmt_focus_on_range, u8);
    builder_field!(num_of_msrmt_focus_on_aoa_azimuth, u8);
    builder_field!(num_of_msrmt_focus_on_aoa_elevation, u8);
    builder_field!(ranging_error_streak_timeout_ms, u64);
    builder_field!(link_layer_mode, u8);
    builder_field!(data_repetition_count, u8);
    builder_field!(ranging_time_struct, RangingTimeStruct);
    builder_field!(min_frames_per_rr, u8);
    builder_field!(mtu_size, u16);
    builder_field!(inter_frame_interval, u8);
    builder_field!(dl_tdoa_block_striding, u8);
    builder_field!(ul_tdoa_tx_interval_ms, u32);
    builder_field!(ul_tdoa_random_window_ms, u32);
    builder_field!(ul_tdoa_device_id_type, u8);
    builder_field!(ul_tdoa_device_id, Vec<u8>, Some);
    builder_field!(ul_tdoa_tx_timestamp_type, u8);
    builder_field!(filter_type, FilterType);
    builder_field!(max_number_of_measurements, u16);
    builder_field!(session_data_transfer_status_ntf_config, bool);
    builder_field!(reference_time_base, u8);
    builder_field!(reference_session_handle, u64);
    builder_field!(session_offset_in_micro_seconds, u32);
    builder_field!(application_data_endpoint, u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::utils::init_test_logging;

    fn controller_builder() -> FiraOpenSessionParamsBuilder {
        let mut builder = FiraOpenSessionParamsBuilder::new();
        builder
            .protocol_version(FiraProtocolVersion::new(1, 1))
            .session_id(1)
            .device_type(DeviceType::Controller)
            .device_role(DeviceRole::Initiator)
            .multi_node_mode(MultiNodeMode::Unicast)
            .device_address(UwbAddress::Short([1, 2]))
            .dest_address_list(vec![UwbAddress::Short([3, 4])])
            .vendor_id(vec![0xFE, 0xDC])
            .static_sts_iv(vec![0xDF, 0xCE, 0xAB, 0x12, 0x34, 0x56]);
        builder
    }

    #[test]
    fn test_ok() {
        init_test_logging();

        let device_address = UwbAddress::Extended([1, 2, 3, 4, 5, 6, 7, 8]);
        let dest_address_list = vec![
            UwbAddress::Extended([2, 2, 3, 4, 5, 6, 7, 8]),
            UwbAddress::Extended([3, 2, 3, 4, 5, 6, 7, 8]),
        ];
        let session_key: Vec<u8> = (0..16).collect();

        let mut builder = FiraOpenSessionParamsBuilder::new();
        builder
            .protocol_version(FiraProtocolVersion::new(2, 0))
            .session_id(0x1234_5678)
            .session_type(0x9F)
            .device_type(DeviceType::Controlee)
            .device_role(DeviceRole::Responder)
            .ranging_round_usage(RangingRoundUsage::SsTwr)
            .multi_node_mode(MultiNodeMode::ManyToMany)
            .device_address(device_address.clone())
            .dest_address_list(dest_address_list.clone())
            .initiation_time_ms(100)
            .absolute_initiation_time_us(20_000_000)
            .slot_duration_rstu(0x0A28)
            .slots_per_rr(10)
            .ranging_interval_ms(100)
            .session_priority(100)
            .mac_address_mode(MacAddressMode::MacAddress8Bytes)
            .channel_number(UwbChannel::Channel10)
            .preamble_code_index(25)
            .rframe_config(RframeConfig::SP1)
            .prf_mode(PrfMode::HprfWith124_8MHz)
            .sfd_id(3)
            .sts_length(StsLength::Length128)
            .psdu_data_rate(PsduDataRate::Rate7m80)
            .fcs_type(MacFcsType::Crc32)
            .sts_config(StsConfig::DynamicForControleeIndividualKey)
            .sub_session_id(24)
            .session_key(session_key.clone())
            .aoa_result_request(AoaResultRequest::ReqAoaResultsInterleaved)
            .num_of_msrmt_focus_on_range(1)
            .num_of_msrmt_focus_on_aoa_azimuth(2)
            .num_of_msrmt_focus_on_aoa_elevation(3)
            .range_data_ntf_config(RangeDataNtfConfig::EnableProximityLevelTrig)
            .range_data_ntf_proximity_near_cm(50)
            .range_data_ntf_proximity_far_cm(200)
            .aoa_type(AoaType::AzimuthAndElevation)
            .ranging_error_streak_timeout_ms(30_000)
            .ul_tdoa_device_id(vec![0x0A, 0x0B])
            .filter_type(FilterType::Application);
        let params = builder.build().unwrap();

        assert_eq!(params.protocol_version(), &FiraProtocolVersion::new(2, 0));
        assert_eq!(params.session_id(), &0x1234_5678);
        assert_eq!(params.session_type(), &0x9F);
        assert_eq!(params.device_type(), &DeviceType::Controlee);
        assert_eq!(params.device_address(), &device_address);
        assert_eq!(params.dest_address_list(), &Some(dest_address_list));
        assert_eq!(params.absolute_initiation_time_us(), &20_000_000);
        assert_eq!(params.sts_config(), &StsConfig::DynamicForControleeIndividualKey);
        assert_eq!(params.sub_session_id(), &24);
        assert_eq!(params.session_key(), &Some(session_key));
        assert_eq!(params.subsession_key(), &None);
        assert_eq!(params.vendor_id(), &None);
        assert_eq!(params.range_data_ntf_proximity_far_cm(), &200);
        assert_eq!(params.ul_tdoa_device_id(), &Some(vec![0x0A, 0x0B]));
        assert!(params.is_time_scheduled_twr_session());

        // The untouched fields keep their default values.
        assert_eq!(params.cap_size_range(), &DEFAULT_CAP_SIZE_RANGE);
        assert_eq!(params.mtu_size(), &DEFAULT_MTU_SIZE);
        assert_eq!(params.ranging_time_struct(), &DEFAULT_RANGING_TIME_STRUCT);
        assert_eq!(params.range_data_ntf_aoa_elevation_upper(), &90.0);

        // Update the value from the original builder.
        let updated_params1 = builder.session_priority(10).build().unwrap();
        assert_eq!(updated_params1.session_priority(), &10);

        // Update the value from the params.
        let updated_params2 = params.to_builder().session_priority(10).build().unwrap();
        assert_eq!(updated_params1, updated_params2);

        let copied_params = FiraOpenSessionParamsBuilder::from_params(&params).build().unwrap();
        assert_eq!(copied_params, params);
    }

    #[test]
    fn test_missing_required_field() {
        let mut builder = controller_builder();
        builder.protocol_version = None;
        assert_eq!(
            builder.build().unwrap_err(),
            ValidationError::MissingRequiredField("protocol_version")
        );

        let mut builder = controller_builder();
        builder.device_address = None;
        assert_eq!(
            builder.build().unwrap_err(),
            ValidationError::MissingRequiredField("device_address")
        );
    }

    #[test]
    fn test_session_id_u32_range() {
        init_test_logging();

        let params = controller_builder().session_id(4294967295).build().unwrap();
        assert_eq!(params.session_id(), &u32::MAX);

        assert_eq!(
            controller_builder().session_id(1 << 32).build().unwrap_err(),
            ValidationError::OutOfRange { field: "session_id", value: 1 << 32 }
        );
        assert!(controller_builder().reference_session_handle(u64::MAX).build().is_err());
    }

    #[test]
    fn test_address_width() {
        init_test_logging();

        // The device address is shorter than the mode.
        let err = controller_builder()
            .mac_address_mode(MacAddressMode::MacAddress8Bytes)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAddress(_)));

        // The mode with 2-byte header is not accepted.
        let err = controller_builder()
            .mac_address_mode(MacAddressMode::MacAddress8Bytes2BytesHeader)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAddress(_)));

        // A destination address is longer than the mode.
        let err = controller_builder()
            .dest_address_list(vec![UwbAddress::Short([3, 4]), UwbAddress::Extended([0; 8])])
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAddress(_)));

        // The destination list is required by a time scheduled TWR session.
        let mut builder = controller_builder();
        builder.dest_address_list = None;
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidAddress(_)));

        // ... but not by a contention based session.
        assert!(builder
            .scheduled_mode(ScheduledMode::ContentionBasedRanging)
            .build()
            .is_ok());

        let params = controller_builder()
            .mac_address_mode(MacAddressMode::MacAddress8Bytes)
            .device_address(UwbAddress::Extended([1; 8]))
            .dest_address_list(vec![UwbAddress::Extended([2; 8]), UwbAddress::Extended([3; 8])])
            .build()
            .unwrap();
        assert_eq!(params.device_address().len(), 8);

        // The list may be omitted with provisioned individual keys, but a given list still has to
        // match the mode.
        let mut builder = controller_builder();
        builder
            .sts_config(StsConfig::ProvisionedForControleeIndividualKey)
            .session_key(vec![0; 16])
            .subsession_key(vec![0; 16]);
        assert!(builder.build().is_ok());
        builder.dest_address_list(vec![UwbAddress::Extended([2; 8])]);
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidAddress(_)));
        builder.dest_address_list = None;
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_static_sts() {
        init_test_logging();

        let mut builder = controller_builder();
        builder.vendor_id = None;
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidStsConfig(_)));

        let err = controller_builder().vendor_id(vec![1, 2, 3]).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStsConfig(_)));

        let err = controller_builder().static_sts_iv(vec![1, 2, 3, 4, 5]).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStsConfig(_)));

        // The static STS fields are not needed by the other STS modes.
        let mut builder = controller_builder();
        builder.vendor_id = None;
        builder.static_sts_iv = None;
        assert!(builder.sts_config(StsConfig::Dynamic).build().is_ok());
    }

    #[test]
    fn test_sub_session_id() {
        init_test_logging();

        let mut builder = controller_builder();
        builder
            .device_type(DeviceType::Controlee)
            .device_role(DeviceRole::Responder)
            .sts_config(StsConfig::DynamicForControleeIndividualKey);
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidStsConfig(_)));

        let params = builder.sub_session_id(4294967295).build().unwrap();
        assert_eq!(params.sub_session_id(), &u32::MAX);

        // The sub-session id is forced to zero when it's not used.
        let params = builder.device_type(DeviceType::Controller).build().unwrap();
        assert_eq!(params.sub_session_id(), &0);
        let params = controller_builder().sub_session_id(5).build().unwrap();
        assert_eq!(params.sub_session_id(), &0);
    }

    #[test]
    fn test_provisioned_keys() {
        init_test_logging();

        let mut builder = controller_builder();
        builder.sts_config(StsConfig::Provisioned);
        assert!(builder.build().is_ok());
        assert!(builder.session_key(vec![0; 32]).build().is_ok());
        let err = builder.session_key(vec![0; 15]).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStsConfig(_)));

        let mut builder = controller_builder();
        builder
            .device_type(DeviceType::Controlee)
            .device_role(DeviceRole::Responder)
            .sts_config(StsConfig::ProvisionedForControleeIndividualKey)
            .sub_session_id(7)
            .subsession_key(vec![0; 16]);
        // The session key is required by the sub-session key.
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidStsConfig(_)));

        assert!(builder.session_key(vec![0; 32]).build().is_ok());
        let err = builder.subsession_key(vec![0; 20]).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStsConfig(_)));
    }

    #[test]
    fn test_interleaving_ratio() {
        init_test_logging();

        // Not interleaved, all ratios zero.
        assert!(controller_builder().build().is_ok());

        // Not interleaved, one ratio set.
        let err = controller_builder().num_of_msrmt_focus_on_aoa_azimuth(1).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInterleavingRatio(_)));

        // Interleaved, all ratios zero.
        let mut builder = controller_builder();
        builder.aoa_result_request(AoaResultRequest::ReqAoaResultsInterleaved);
        let err = builder.build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInterleavingRatio(_)));

        // Interleaved, one ratio set.
        assert!(builder.num_of_msrmt_focus_on_aoa_elevation(2).build().is_ok());
    }

    #[test]
    fn test_range_data_ntf_config() {
        init_test_logging();

        let build_with = |config: RangeDataNtfConfig,
                          near: u32,
                          far: u32,
                          azimuth_lower: f64|
         -> Result<FiraOpenSessionParams, ValidationError> {
            controller_builder()
                .range_data_ntf_config(config)
                .range_data_ntf_proximity_near_cm(near)
                .range_data_ntf_proximity_far_cm(far)
                .range_data_ntf_aoa_azimuth_lower(azimuth_lower)
                .build()
        };

        assert!(build_with(RangeDataNtfConfig::Disable, 0, 20000, -180.0).is_ok());
        assert!(build_with(RangeDataNtfConfig::Disable, 10, 20000, -180.0).is_err());
        assert!(build_with(RangeDataNtfConfig::Disable, 0, 20000, -90.0).is_err());

        assert!(build_with(RangeDataNtfConfig::EnableProximityLevelTrig, 0, 20000, -180.0)
            .is_err());
        assert!(build_with(RangeDataNtfConfig::EnableProximityEdgeTrig, 0, 100, -180.0).is_ok());
        assert!(build_with(RangeDataNtfConfig::EnableProximityLevelTrig, 10, 100, -90.0).is_err());

        assert!(build_with(RangeDataNtfConfig::EnableAoaLevelTrig, 0, 20000, -180.0).is_err());
        assert!(build_with(RangeDataNtfConfig::EnableAoaEdgeTrig, 0, 20000, -90.0).is_ok());
        assert!(build_with(RangeDataNtfConfig::EnableAoaLevelTrig, 10, 20000, -90.0).is_err());

        assert!(build_with(RangeDataNtfConfig::EnableProximityAoaLevelTrig, 0, 20000, -180.0)
            .is_err());
        assert!(build_with(RangeDataNtfConfig::EnableProximityAoaEdgeTrig, 10, 20000, -180.0)
            .is_ok());
        assert!(build_with(RangeDataNtfConfig::EnableProximityAoaLevelTrig, 0, 20000, -90.0)
            .is_ok());

        assert!(build_with(RangeDataNtfConfig::Enable, 10, 100, -90.0).is_ok());

        let err = build_with(RangeDataNtfConfig::Disable, 10, 20000, -180.0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRangeDataNtfConfig(_)));
    }

    #[test]
    fn test_dt_tag() {
        init_test_logging();

        let mut builder = controller_builder();
        builder
            .device_type(DeviceType::DtTag)
            .device_role(DeviceRole::DtTag)
            .ranging_round_usage(RangingRoundUsage::DlTdoa)
            .multi_node_mode(MultiNodeMode::OneToMany)
            .rframe_config(RframeConfig::SP1)
            .dl_tdoa_block_striding(3);
        let params = builder.build().unwrap();
        assert_eq!(params.dl_tdoa_block_striding(), &3);
        assert!(!params.is_time_scheduled_twr_session());

        let err = builder.rframe_config(RframeConfig::SP3).build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDlTdoaConfig(_)));

        builder.rframe_config(RframeConfig::SP1).multi_node_mode(MultiNodeMode::Unicast);
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidDlTdoaConfig(_)));

        builder.multi_node_mode(MultiNodeMode::OneToMany).sts_config(StsConfig::Dynamic);
        assert!(matches!(builder.build().unwrap_err(), ValidationError::InvalidDlTdoaConfig(_)));
    }

    #[test]
    fn test_from_params_cap_size_range() {
        init_test_logging();

        let params = controller_builder()
            .scheduled_mode(ScheduledMode::ContentionBasedRanging)
            .cap_size_range([10, 3])
            .build()
            .unwrap();
        let copied_params = params.to_builder().build().unwrap();
        assert_eq!(copied_params.cap_size_range(), &[10, 3]);

        // The contention window is ignored by a time scheduled session.
        let params = controller_builder().cap_size_range([10, 3]).build().unwrap();
        assert_eq!(params.cap_size_range(), &DEFAULT_CAP_SIZE_RANGE);
        let copied_params = params.to_builder().build().unwrap();
        assert_eq!(copied_params.cap_size_range(), &DEFAULT_CAP_SIZE_RANGE);
    }

    #[test]
    fn test_reset_ignored_fields() {
        init_test_logging();

        // The DL-TDoA striding only applies to a DT-Tag.
        let params = controller_builder().dl_tdoa_block_striding(3).build().unwrap();
        assert_eq!(params.dl_tdoa_block_striding(), &DEFAULT_DL_TDOA_BLOCK_STRIDING);

        // The time base only applies to a controller.
        let mut builder = controller_builder();
        builder
            .reference_time_base(1)
            .reference_session_handle(7)
            .session_offset_in_micro_seconds(300);
        let params = builder.build().unwrap();
        assert_eq!(params.reference_time_base(), &1);
        assert_eq!(params.reference_session_handle(), &7);
        assert_eq!(params.session_offset_in_micro_seconds(), &300);

        let params = builder.device_type(DeviceType::Controlee).build().unwrap();
        assert_eq!(params.reference_time_base(), &DEFAULT_REFERENCE_TIME_BASE);
        assert_eq!(params.reference_session_handle(), &DEFAULT_REFERENCE_SESSION_HANDLE);
        assert_eq!(
            params.session_offset_in_micro_seconds(),
            &DEFAULT_SESSION_OFFSET_IN_MICRO_SECONDS
        );

        // The destination list only applies to a time scheduled TWR session.
        let params = controller_builder()
            .scheduled_mode(ScheduledMode::ContentionBasedRanging)
            .build()
            .unwrap();
        assert_eq!(params.dest_address_list(), &None);
        let params =
            controller_builder().ranging_round_usage(RangingRoundUsage::DlTdoa).build().unwrap();
        assert_eq!(params.dest_address_list(), &None);
        let params = controller_builder().build().unwrap();
        assert_eq!(params.dest_address_list(), &Some(vec![UwbAddress::Short([3, 4])]));
    }

    #[test]
    fn test_redacted_pii_fields() {
        let params = controller_builder().session_key(vec![0xAB; 16]).build().unwrap();
        let format_str = format!("{params:?}");
        assert!(format_str.contains("vendor_id: \"redacted\""));
        assert!(format_str.contains("static_sts_iv: \"redacted\""));
        assert!(format_str.contains("session_key: \"redacted\""));
        assert!(format_str.contains("subsession_key: \"redacted\""));
        assert!(!format_str.contains("171"));
    }
}
