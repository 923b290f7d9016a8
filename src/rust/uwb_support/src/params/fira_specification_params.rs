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

//! This module defines the FiRa capabilities of a UWB subsystem, used to negotiate the session
//! parameters before a session is opened.

use crate::error::{Result, SchemaError};
use crate::params::bundle::{decode_versioned, Bundle, Decoder};
use crate::params::fira_params::{
    AoaCapabilityFlag, BprfParameterSetCapabilityFlag, CapabilityFlag,
    CcConstraintLengthCapabilityFlag, DeviceRoleCapabilityFlag, DeviceType, FiraProtocolVersion,
    FlagSet, HprfParameterSetCapabilityFlag, MultiNodeCapabilityFlag, PrfCapabilityFlag,
    PsduDataRateCapabilityFlag, RangeDataNtfConfigCapabilityFlag, RangingRoundCapabilityFlag,
    RangingTimeStructCapabilityFlag, RframeCapabilityFlag, SchedulingModeCapabilityFlag,
    StsCapabilityFlag,
};
use crate::params::utils::{
    bundle_int_to_u32, invalid_value, read_enum, read_protocol_version, read_u32, require_key,
    u32_to_bundle_int,
};
use crate::utils::{builder_field, flag_builder_field, getter_field};

// The default value of each parameters.
const DEFAULT_PROTOCOL_VERSION: FiraProtocolVersion = FiraProtocolVersion::new(1, 1);
const DEFAULT_MIN_RANGING_INTERVAL_MS: i32 = -1;
const DEFAULT_MIN_SLOT_DURATION_US: i32 = -1;
const DEFAULT_MAX_RANGING_SESSION_NUMBER: u32 = 5;
const DEFAULT_MAX_MESSAGE_SIZE: u32 = 0;
const DEFAULT_MAX_DATA_PACKET_PAYLOAD_SIZE: u32 = 0;
const DEFAULT_DEVICE_TYPE: DeviceType = DeviceType::Controlee;
const DEFAULT_SESSION_KEY_LENGTH: u32 = 0;
const DEFAULT_DT_TAG_MAX_ACTIVE_RR: u32 = 0;
const DEFAULT_UCI_VERSION: u32 = 1;

const BUNDLE_VERSION_1: i32 = 1;
const BUNDLE_VERSION_2: i32 = 2;
const BUNDLE_VERSION_CURRENT: i32 = BUNDLE_VERSION_2;

const DECODERS: &[(i32, Decoder<FiraSpecificationParams>)] =
    &[(BUNDLE_VERSION_1, decode_version_1), (BUNDLE_VERSION_2, decode_version_2)];

const KEY_MIN_PHY_VERSION: &str = "min_phy_version";
const KEY_MAX_PHY_VERSION: &str = "max_phy_version";
const KEY_MIN_MAC_VERSION: &str = "min_mac_version";
const KEY_MAX_MAC_VERSION: &str = "max_mac_version";
const KEY_SUPPORTED_CHANNELS: &str = "channels";
const KEY_AOA_CAPABILITIES: &str = "aoa_capabilities";
const KEY_DEVICE_ROLE_CAPABILITIES: &str = "device_role_capabilities";
const KEY_BLOCK_STRIDING_SUPPORT: &str = "block_striding";
const KEY_HOPPING_PREFERENCE_SUPPORT: &str = "hopping_preference";
const KEY_EXTENDED_MAC_ADDRESS_SUPPORT: &str = "extended_mac_address";
const KEY_NON_DEFERRED_MODE_SUPPORT: &str = "non_deferred_mode";
const KEY_INITIATION_TIME_SUPPORT: &str = "initiation_time";
const KEY_RSSI_REPORTING_SUPPORT: &str = "rssi_reporting";
const KEY_DIAGNOSTICS_SUPPORT: &str = "diagnostics";
const KEY_MIN_RANGING_INTERVAL: &str = "min_ranging_interval";
const KEY_MIN_SLOT_DURATION: &str = "min_slot_duration";
const KEY_MAX_RANGING_SESSION_NUMBER: &str = "max_ranging_session_number";
const KEY_MULTI_NODE_CAPABILITIES: &str = "multi_node_capabilities";
const KEY_RANGING_TIME_STRUCT_CAPABILITIES: &str = "ranging_time_struct_capabilities";
const KEY_SCHEDULING_MODE_CAPABILITIES: &str = "scheduling_mode_capabilities";
const KEY_CC_CONSTRAINT_LENGTH_CAPABILITIES: &str = "cc_constraint_length_capabilities";
const KEY_PRF_CAPABILITIES: &str = "prf_capabilities";
const KEY_RANGING_ROUND_CAPABILITIES: &str = "ranging_round_capabilities";
const KEY_RFRAME_CAPABILITIES: &str = "rframe_capabilities";
const KEY_STS_CAPABILITIES: &str = "sts_capabilities";
const KEY_PSDU_DATA_RATE_CAPABILITIES: &str = "psdu_data_rate_capabilities";
const KEY_BPRF_PARAMETER_SET_CAPABILITIES: &str = "bprf_parameter_set_capabilities";
const KEY_HPRF_PARAMETER_SET_CAPABILITIES: &str = "hprf_parameter_set_capabilities";
const KEY_MAX_MESSAGE_SIZE: &str = "max_message_size";
const KEY_MAX_DATA_PACKET_PAYLOAD_SIZE: &str = "max_data_packet_payload_size";
const KEY_RANGE_DATA_NTF_CONFIG_CAPABILITIES: &str = "range_data_ntf_config_capabilities";
const KEY_DEVICE_TYPE: &str = "device_type";
const KEY_SUSPEND_RANGING_SUPPORT: &str = "suspend_ranging_support";
const KEY_SESSION_KEY_LENGTH: &str = "session_key_length";
const KEY_DT_TAG_MAX_ACTIVE_RR: &str = "dt_tag_max_active_rr";
const KEY_BACKGROUND_RANGING_SUPPORT: &str = "background_ranging_support";
const KEY_DT_TAG_BLOCK_SKIPPING_SUPPORT: &str = "dt_tag_block_skipping";
const KEY_PSDU_LENGTH_SUPPORT: &str = "psdu_length_support";
const KEY_UCI_VERSION: &str = "uci_version";

/// The FiRa capabilities supported by a UWB subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiraSpecificationParams {
    min_phy_version: FiraProtocolVersion,
    max_phy_version: FiraProtocolVersion,
    min_mac_version: FiraProtocolVersion,
    max_mac_version: FiraProtocolVersion,
    supported_channels: Vec<u8>,
    aoa_capabilities: FlagSet<AoaCapabilityFlag>,
    device_role_capabilities: FlagSet<DeviceRoleCapabilityFlag>,
    has_block_striding_support: bool,
    has_hopping_preference_support: bool,
    has_extended_mac_address_support: bool,
    has_non_deferred_mode_support: bool,
    has_initiation_time_support: bool,
    has_rssi_reporting_support: bool,
    has_diagnostics_support: bool,
    min_ranging_interval_ms: i32,
    min_slot_duration_us: i32,
    max_ranging_session_number: u32,
    multi_node_capabilities: FlagSet<MultiNodeCapabilityFlag>,
    ranging_time_struct_capabilities: FlagSet<RangingTimeStructCapabilityFlag>,
    scheduling_mode_capabilities: FlagSet<SchedulingModeCapabilityFlag>,
    cc_constraint_length_capabilities: FlagSet<CcConstraintLengthCapabilityFlag>,
    prf_capabilities: FlagSet<PrfCapabilityFlag>,
    ranging_round_capabilities: FlagSet<RangingRoundCapabilityFlag>,
    rframe_capabilities: FlagSet<RframeCapabilityFlag>,
    sts_capabilities: FlagSet<StsCapabilityFlag>,
    psdu_data_rate_capabilities: FlagSet<PsduDataRateCapabilityFlag>,
    bprf_parameter_set_capabilities: FlagSet<BprfParameterSetCapabilityFlag>,
    hprf_parameter_set_capabilities: FlagSet<HprfParameterSetCapabilityFlag>,
    max_message_size: u32,
    max_data_packet_payload_size: u32,
    range_data_ntf_config_capabilities: FlagSet<RangeDataNtfConfigCapabilityFlag>,
    device_type: DeviceType,
    has_suspend_ranging_support: bool,
    session_key_length: u32,
    dt_tag_max_active_rr: u32,
    has_background_ranging_support: bool,
    has_dt_tag_block_skipping_support: bool,
    has_psdu_length_support: bool,
    uci_version: u32,
}

#[allow(missing_docs)]
impl FiraSpecificationParams {
    // Generate the getter methods for all the fields.
    getter_field!(min_phy_version, FiraProtocolVersion);
    getter_field!(max_phy_version, FiraProtocolVersion);
    getter_field!(min_mac_version, FiraProtocolVersion);
    getter_field!(max_mac_version, FiraProtocolVersion);
    getter_field!(supported_channels, Vec<u8>);
    getter_field!(aoa_capabilities, FlagSet<AoaCapabilityFlag>);
    getter_field!(device_role_capabilities, FlagSet<DeviceRoleCapabilityFlag>);
    getter_field!(has_block_striding_support, bool);
    getter_field!(has_hopping_preference_support, bool);
    getter_field!(has_extended_mac_address_support, bool);
    getter_field!(has_non_deferred_mode_support, bool);
    getter_field!(has_initiation_time_support, bool);
    getter_field!(has_rssi_reporting_support, bool);
    getter_field!(has_diagnostics_support, bool);
    getter_field!(min_ranging_interval_ms, i32);
    getter_field!(min_slot_duration_us, i32);
    getter_field!(max_ranging_session_number, u32);
    getter_field!(multi_node_capabilities, FlagSet<MultiNodeCapabilityFlag>);
    getter_field!(ranging_time_struct_capabilities, FlagSet<RangingTimeStructCapabilityFlag>);
    getter_field!(scheduling_mode_capabilities, FlagSet<SchedulingModeCapabilityFlag>);
    getter_field!(cc_constraint_length_capabilities, FlagSet<CcConstraintLengthCapabilityFlag>);
    getter_field!(prf_capabilities, FlagSet<PrfCapabilityFlag>);
    getter_field!(ranging_round_capabilities, FlagSet<RangingRoundCapabilityFlag>);
    getter_field!(rframe_capabilities, FlagSet<RframeCapabilityFlag>);
    getter_field!(sts_capabilities, FlagSet<StsCapabilityFlag>);
    getter_field!(psdu_data_rate_capabilities, FlagSet<PsduDataRateCapabilityFlag>);
    getter_field!(bprf_parameter_set_capabilities, FlagSet<BprfParameterSetCapabilityFlag>);
    getter_field!(hprf_parameter_set_capabilities, FlagSet<HprfParameterSetCapabilityFlag>);
    getter_field!(max_message_size, u32);
    getter_field!(max_data_packet_payload_size, u32);
    getter_field!(range_data_ntf_config_capabilities, FlagSet<RangeDataNtfConfigCapabilityFlag>);
    getter_field!(device_type, DeviceType);
    getter_field!(has_suspend_ranging_support, bool);
    getter_field!(session_key_length, u32);
    getter_field!(dt_tag_max_active_rr, u32);
    getter_field!(has_background_ranging_support, bool);
    getter_field!(has_dt_tag_block_skipping_support, bool);
    getter_field!(has_psdu_length_support, bool);
    getter_field!(uci_version, u32);

    /// Create a builder that is pre-filled with the fields of this instance.
    pub fn to_builder(&self) -> FiraSpecificationParamsBuilder {
        FiraSpecificationParamsBuilder::from_params(self)
    }

    /// Encode the params into a bundle of the current version.
    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::with_fira_header(BUNDLE_VERSION_CURRENT);
        bundle.put_string(KEY_MIN_PHY_VERSION, &self.min_phy_version.to_string());
        bundle.put_string(KEY_MAX_PHY_VERSION, &self.max_phy_version.to_string());
        bundle.put_string(KEY_MIN_MAC_VERSION, &self.min_mac_version.to_string());
        bundle.put_string(KEY_MAX_MAC_VERSION, &self.max_mac_version.to_string());
        bundle.put_int_array(
            KEY_SUPPORTED_CHANNELS,
            self.supported_channels.iter().map(|channel| i32::from(*channel)).collect(),
        );
        put_flags(&mut bundle, KEY_AOA_CAPABILITIES, &self.aoa_capabilities);
        put_flags(&mut bundle, KEY_DEVICE_ROLE_CAPABILITIES, &self.device_role_capabilities);
        bundle.put_bool(KEY_BLOCK_STRIDING_SUPPORT, self.has_block_striding_support);
        bundle.put_bool(KEY_HOPPING_PREFERENCE_SUPPORT, self.has_hopping_preference_support);
        bundle.put_bool(KEY_EXTENDED_MAC_ADDRESS_SUPPORT, self.has_extended_mac_address_support);
        bundle.put_bool(KEY_NON_DEFERRED_MODE_SUPPORT, self.has_non_deferred_mode_support);
        bundle.put_bool(KEY_INITIATION_TIME_SUPPORT, self.has_initiation_time_support);
        bundle.put_bool(KEY_RSSI_REPORTING_SUPPORT, self.has_rssi_reporting_support);
        bundle.put_bool(KEY_DIAGNOSTICS_SUPPORT, self.has_diagnostics_support);
        bundle.put_int(KEY_MIN_RANGING_INTERVAL, self.min_ranging_interval_ms);
        bundle.put_int(KEY_MIN_SLOT_DURATION, self.min_slot_duration_us);
        bundle.put_int(
            KEY_MAX_RANGING_SESSION_NUMBER,
            u32_to_bundle_int(self.max_ranging_session_number),
        );
        put_flags(&mut bundle, KEY_MULTI_NODE_CAPABILITIES, &self.multi_node_capabilities);
        put_flags(
            &mut bundle,
            KEY_RANGING_TIME_STRUCT_CAPABILITIES,
            &self.ranging_time_struct_capabilities,
        );
        put_flags(
            &mut bundle,
            KEY_SCHEDULING_MODE_CAPABILITIES,
            &self.scheduling_mode_capabilities,
        );
        put_flags(
            &mut bundle,
            KEY_CC_CONSTRAINT_LENGTH_CAPABILITIES,
            &self.cc_constraint_length_capabilities,
        );
        put_flags(&mut bundle, KEY_PRF_CAPABILITIES, &self.prf_capabilities);
        put_flags(&mut bundle, KEY_RANGING_ROUND_CAPABILITIES, &self.ranging_round_capabilities);
        put_flags(&mut bundle, KEY_RFRAME_CAPABILITIES, &self.rframe_capabilities);
        put_flags(&mut bundle, KEY_STS_CAPABILITIES, &self.sts_capabilities);
        put_flags(&mut bundle, KEY_PSDU_DATA_RATE_CAPABILITIES, &self.psdu_data_rate_capabilities);
        put_flags(
            &mut bundle,
            KEY_BPRF_PARAMETER_SET_CAPABILITIES,
            &self.bprf_parameter_set_capabilities,
        );
        // The HPRF parameter sets don't fit in an int.
        bundle.put_long(
            KEY_HPRF_PARAMETER_SET_CAPABILITIES,
            self.hprf_parameter_set_capabilities.to_bits() as i64,
        );
        bundle.put_int(KEY_MAX_MESSAGE_SIZE, u32_to_bundle_int(self.max_message_size));
        bundle.put_int(
            KEY_MAX_DATA_PACKET_PAYLOAD_SIZE,
            u32_to_bundle_int(self.max_data_packet_payload_size),
        );
        put_flags(
            &mut bundle,
            KEY_RANGE_DATA_NTF_CONFIG_CAPABILITIES,
            &self.range_data_ntf_config_capabilities,
        );
        bundle.put_int(KEY_DEVICE_TYPE, self.device_type as i32);
        bundle.put_bool(KEY_SUSPEND_RANGING_SUPPORT, self.has_suspend_ranging_support);
        bundle.put_int(KEY_SESSION_KEY_LENGTH, u32_to_bundle_int(self.session_key_length));
        bundle.put_int(KEY_DT_TAG_MAX_ACTIVE_RR, u32_to_bundle_int(self.dt_tag_max_active_rr));
        bundle.put_bool(KEY_BACKGROUND_RANGING_SUPPORT, self.has_background_ranging_support);
        bundle.put_bool(KEY_DT_TAG_BLOCK_SKIPPING_SUPPORT, self.has_dt_tag_block_skipping_support);
        bundle.put_bool(KEY_PSDU_LENGTH_SUPPORT, self.has_psdu_length_support);
        bundle.put_int(KEY_UCI_VERSION, u32_to_bundle_int(self.uci_version));
        bundle
    }

    /// Decode the params from a bundle written by any supported version.
    pub fn from_bundle(bundle: &Bundle) -> Result<Self> {
        decode_versioned(bundle, DECODERS)
    }
}

/// The builder of [`FiraSpecificationParams`].
///
/// The capability setters add the flags to the current set, so the flags mandated by FiRa are
/// always kept.
#[derive(Debug, Clone)]
pub struct FiraSpecificationParamsBuilder {
    min_phy_version: FiraProtocolVersion,
    max_phy_version: FiraProtocolVersion,
    min_mac_version: FiraProtocolVersion,
    max_mac_version: FiraProtocolVersion,
    supported_channels: Vec<u8>,
    aoa_capabilities: FlagSet<AoaCapabilityFlag>,
    device_role_capabilities: FlagSet<DeviceRoleCapabilityFlag>,
    has_block_striding_support: bool,
    has_hopping_preference_support: bool,
    has_extended_mac_address_support: bool,
    has_non_deferred_mode_support: bool,
    has_initiation_time_support: bool,
    has_rssi_reporting_support: bool,
    has_diagnostics_support: bool,
    min_ranging_interval_ms: i32,
    min_slot_duration_us: i32,
    max_ranging_session_number: u32,
    multi_node_capabilities: FlagSet<MultiNodeCapabilityFlag>,
    ranging_time_struct_capabilities: FlagSet<RangingTimeStructCapabilityFlag>,
    scheduling_mode_capabilities: FlagSet<SchedulingModeCapabilityFlag>,
    cc_constraint_length_capabilities: FlagSet<CcConstraintLengthCapabilityFlag>,
    prf_capabilities: FlagSet<PrfCapabilityFlag>,
    ranging_round_capabilities: FlagSet<RangingRoundCapabilityFlag>,
    rframe_capabilities: FlagSet<RframeCapabilityFlag>,
    sts_capabilities: FlagSet<StsCapabilityFlag>,
    psdu_data_rate_capabilities: FlagSet<PsduDataRateCapabilityFlag>,
    bprf_parameter_set_capabilities: FlagSet<BprfParameterSetCapabilityFlag>,
    hprf_parameter_set_capabilities: FlagSet<HprfParameterSetCapabilityFlag>,
    max_message_size: u32,
    max_data_packet_payload_size: u32,
    range_data_ntf_config_capabilities: FlagSet<RangeDataNtfConfigCapabilityFlag>,
    device_type: DeviceType,
    has_suspend_ranging_support: bool,
    session_key_length: u32,
    dt_tag_max_active_rr: u32,
    has_background_ranging_support: bool,
    has_dt_tag_block_skipping_support: bool,
    has_psdu_length_support: bool,
    uci_version: u32,
}

#[allow(clippy::new_without_default)]
#[allow(missing_docs)]
impl FiraSpecificationParamsBuilder {
    /// Fill the default value of each field. The mandatory capabilities are set.
    pub fn new() -> Self {
        Self {
            min_phy_version: DEFAULT_PROTOCOL_VERSION,
            max_phy_version: DEFAULT_PROTOCOL_VERSION,
            min_mac_version: DEFAULT_PROTOCOL_VERSION,
            max_mac_version: DEFAULT_PROTOCOL_VERSION,
            supported_channels: vec![],
            aoa_capabilities: FlagSet::new(),
            device_role_capabilities: FlagSet::from([
                DeviceRoleCapabilityFlag::HasControllerInitiatorSupport,
                DeviceRoleCapabilityFlag::HasControleeResponderSupport,
            ]),
            has_block_striding_support: false,
            has_hopping_preference_support: false,
            has_extended_mac_address_support: false,
            has_non_deferred_mode_support: false,
            has_initiation_time_support: false,
            has_rssi_reporting_support: false,
            has_diagnostics_support: false,
            min_ranging_interval_ms: DEFAULT_MIN_RANGING_INTERVAL_MS,
            min_slot_duration_us: DEFAULT_MIN_SLOT_DURATION_US,
            max_ranging_session_number: DEFAULT_MAX_RANGING_SESSION_NUMBER,
            multi_node_capabilities: FlagSet::from([MultiNodeCapabilityFlag::HasUnicastSupport]),
            ranging_time_struct_capabilities: FlagSet::from([
                RangingTimeStructCapabilityFlag::HasIntervalBasedSchedulingSupport,
                RangingTimeStructCapabilityFlag::HasBlockBasedSchedulingSupport,
            ]),
            scheduling_mode_capabilities: FlagSet::from([
                SchedulingModeCapabilityFlag::HasContentionBasedRangingSupport,
                SchedulingModeCapabilityFlag::HasTimeScheduledRangingSupport,
            ]),
            cc_constraint_length_capabilities: FlagSet::from([
                CcConstraintLengthCapabilityFlag::HasConstraintLength3Support,
                CcConstraintLengthCapabilityFlag::HasConstraintLength7Support,
            ]),
            prf_capabilities: FlagSet::from([PrfCapabilityFlag::HasBprfSupport]),
            ranging_round_capabilities: FlagSet::from([
                RangingRoundCapabilityFlag::HasDsTwrSupport,
            ]),
            rframe_capabilities: FlagSet::from([RframeCapabilityFlag::HasSp3RframeSupport]),
            sts_capabilities: FlagSet::from([StsCapabilityFlag::HasStaticStsSupport]),
            psdu_data_rate_capabilities: FlagSet::from([
                PsduDataRateCapabilityFlag::Has6m81Support,
            ]),
            bprf_parameter_set_capabilities: FlagSet::new(),
            hprf_parameter_set_capabilities: FlagSet::new(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_data_packet_payload_size: DEFAULT_MAX_DATA_PACKET_PAYLOAD_SIZE,
            range_data_ntf_config_capabilities: FlagSet::new(),
            device_type: DEFAULT_DEVICE_TYPE,
            has_suspend_ranging_support: false,
            session_key_length: DEFAULT_SESSION_KEY_LENGTH,
            dt_tag_max_active_rr: DEFAULT_DT_TAG_MAX_ACTIVE_RR,
            has_background_ranging_support: false,
            has_dt_tag_block_skipping_support: false,
            has_psdu_length_support: false,
            uci_version: DEFAULT_UCI_VERSION,
        }
    }

    pub fn from_params(params: &FiraSpecificationParams) -> Self {
        Self {
            min_phy_version: params.min_phy_version,
            max_phy_version: params.max_phy_version,
            min_mac_version: params.min_mac_version,
            max_mac_version: params.max_mac_version,
            supported_channels: params.supported_channels.clone(),
            aoa_capabilities: params.aoa_capabilities.clone(),
            device_role_capabilities: params.device_role_capabilities.clone(),
            has_block_striding_support: params.has_block_striding_support,
            has_hopping_preference_support: params.has_hopping_preference_support,
            has_extended_mac_address_support: params.has_extended_mac_address_support,
            has_non_deferred_mode_support: params.has_non_deferred_mode_support,
            has_initiation_time_support: params.has_initiation_time_support,
            has_rssi_reporting_support: params.has_rssi_reporting_support,
            has_diagnostics_support: params.has_diagnostics_support,
            min_ranging_interval_ms: params.min_ranging_interval_ms,
            min_slot_duration_us: params.min_slot_duration_us,
            max_ranging_session_number: params.max_ranging_session_number,
            multi_node_capabilities: params.multi_node_capabilities.clone(),
            ranging_time_struct_capabilities: params.ranging_time_struct_capabilities.clone(),
            scheduling_mode_capabilities: params.scheduling_mode_capabilities.clone(),
            cc_constraint_length_capabilities: params.cc_constraint_length_capabilities.clone(),
            prf_capabilities: params.prf_capabilities.clone(),
            ranging_round_capabilities: params.ranging_round_capabilities.clone(),
            rframe_capabilities: params.rframe_capabilities.clone(),
            sts_capabilities: params.sts_capabilities.clone(),
            psdu_data_rate_capabilities: params.psdu_data_rate_capabilities.clone(),
            bprf_parameter_set_capabilities: params.bprf_parameter_set_capabilities.clone(),
            hprf_parameter_set_capabilities: params.hprf_parameter_set_capabilities.clone(),
            max_message_size: params.max_message_size,
            max_data_packet_payload_size: params.max_data_packet_payload_size,
            range_data_ntf_config_capabilities: params.range_data_ntf_config_capabilities.clone(),
            device_type: params.device_type,
            has_suspend_ranging_support: params.has_suspend_ranging_support,
            session_key_length: params.session_key_length,
            dt_tag_max_active_rr: params.dt_tag_max_active_rr,
            has_background_ranging_support: params.has_background_ranging_support,
            has_dt_tag_block_skipping_support: params.has_dt_tag_block_skipping_support,
            has_psdu_length_support: params.has_psdu_length_support,
            uci_version: params.uci_version,
        }
    }

    pub fn build(&self) -> FiraSpecificationParams {
        FiraSpecificationParams {
            min_phy_version: self.min_phy_version,
            max_phy_version: self.max_phy_version,
            min_mac_version: self.min_mac_version,
            max_mac_version: self.max_mac_version,
            supported_channels: self.supported_channels.clone(),
            aoa_capabilities: self.aoa_capabilities.clone(),
            device_role_capabilities: self.device_role_capabilities.clone(),
            has_block_striding_support: self.has_block_striding_support,
            has_hopping_preference_support: self.has_hopping_preference_support,
            has_extended_mac_address_support: self.has_extended_mac_address_support,
            has_non_deferred_mode_support: self.has_non_deferred_mode_support,
            has_initiation_time_support: self.has_initiation_time_support,
            has_rssi_reporting_support: self.has_rssi_reporting_support,
            has_diagnostics_support: self.has_diagnostics_support,
            min_ranging_interval_ms: self.min_ranging_interval_ms,
            min_slot_duration_us: self.min_slot_duration_us,
            max_ranging_session_number: self.max_ranging_session_number,
            multi_node_capabilities: self.multi_node_capabilities.clone(),
            ranging_time_struct_capabilities: self.ranging_time_struct_capabilities.clone(),
            scheduling_mode_capabilities: self.scheduling_mode_capabilities.clone(),
            cc_constraint_length_capabilities: self.cc_constraint_length_capabilities.clone(),
            prf_capabilities: self.prf_capabilities.clone(),
            ranging_round_capabilities: self.ranging_round_capabilities.clone(),
            rframe_capabilities: self.rframe_capabilities.clone(),
            sts_capabilities: self.sts_capabilities.clone(),
            psdu_data_rate_capabilities: self.psdu_data_rate_capabilities.clone(),
            bprf_parameter_set_capabilities: self.bprf_parameter_set_capabilities.clone(),
            hprf_parameter_set_capabilities: self.hprf_parameter_set_capabilities.clone(),
            max_message_size: self.max_message_size,
            max_data_packet_payload_size: self.max_data_packet_payload_size,
            range_data_ntf_config_capabilities: self.range_data_ntf_config_capabilities.clone(),
            device_type: self.device_type,
            has_suspend_ranging_support: self.has_suspend_ranging_support,
            session_key_length: self.session_key_length,
            dt_tag_max_active_rr: self.dt_tag_max_active_rr,
            has_background_ranging_support: self.has_background_ranging_support,
            has_dt_tag_block_skipping_support: self.has_dt_tag_block_skipping_support,
            has_psdu_length_support: self.has_psdu_length_support,
            uci_version: self.uci_version,
        }
    }

    // Generate the setter methods for all the fields.
    builder_field!(min_phy_version, FiraProtocolVersion);
    builder_field!(max_phy_version, FiraProtocolVersion);
    builder_field!(min_mac_version, FiraProtocolVersion);
    builder_field!(max_mac_version, FiraProtocolVersion);
    builder_field!(supported_channels, Vec<u8>);
    flag_builder_field!(aoa_capabilities, AoaCapabilityFlag);
    flag_builder_field!(device_role_capabilities, DeviceRoleCapabilityFlag);
    builder_field!(has_block_striding_support, bool);
    builder_field!(has_hopping_preference_support, bool);
    builder_field!(has_extended_mac_address_support, bool);
    builder_field!(has_non_deferred_mode_support, bool);
    builder_field!(has_initiation_time_support, bool);
    builder_field!(has_rssi_reporting_support, bool);
    builder_field!(has_diagnostics_support, bool);
    builder_field!(min_ranging_interval_ms, i32);
    builder_field!(min_slot_duration_us, i32);
    builder_field!(max_ranging_session_number, u32);
    flag_builder_field!(multi_node_capabilities, MultiNodeCapabilityFlag);
    flag_builder_field!(ranging_time_struct_capabilities, RangingTimeStructCapabilityFlag);
    flag_builder_field!(scheduling_mode_capabilities, SchedulingModeCapabilityFlag);
    flag_builder_field!(cc_constraint_length_capabilities, CcConstraintLengthCapabilityFlag);
    flag_builder_field!(prf_capabilities, PrfCapabilityFlag);
    flag_builder_field!(ranging_round_capabilities, RangingRoundCapabilityFlag);
    flag_builder_field!(rframe_capabilities, RframeCapabilityFlag);
    flag_builder_field!(sts_capabilities, StsCapabilityFlag);
    flag_builder_field!(psdu_data_rate_capabilities, PsduDataRateCapabilityFlag);
    flag_builder_field!(bprf_parameter_set_capabilities, BprfParameterSetCapabilityFlag);
    flag_builder_field!(hprf_parameter_set_capabilities, HprfParameterSetCapabilityFlag);
    builder_field!(max_message_size, u32);
    builder_field!(max_data_packet_payload_size, u32);
    flag_builder_field!(range_data_ntf_config_capabilities, RangeDataNtfConfigCapabilityFlag);
    builder_field!(device_type, DeviceType);
    builder_field!(has_suspend_ranging_support, bool);
    builder_field!(session_key_length, u32);
    builder_field!(dt_tag_max_active_rr, u32);
    builder_field!(has_background_ranging_support, bool);
    builder_field!(has_dt_tag_block_skipping_support, bool);
    builder_field!(has_psdu_length_support, bool);
    builder_field!(uci_version, u32);
}

fn put_flags<F: CapabilityFlag>(bundle: &mut Bundle, key: &str, flags: &FlagSet<F>) {
    bundle.put_int(key, flags.to_bits() as i32);
}

/// Read the flags packed in an int. An absent key reads as no flag.
fn read_flags<F: CapabilityFlag>(
    bundle: &Bundle,
    key: &str,
) -> std::result::Result<FlagSet<F>, SchemaError> {
    Ok(bundle.get_int(key)?.map_or_else(FlagSet::new, |bits| {
        FlagSet::from_bits(bundle_int_to_u32(bits).into())
    }))
}

fn read_channels(bundle: &Bundle) -> std::result::Result<Vec<u8>, SchemaError> {
    require_key(bundle.get_int_array(KEY_SUPPORTED_CHANNELS)?, KEY_SUPPORTED_CHANNELS)?
        .iter()
        .map(|channel| {
            u8::try_from(*channel).map_err(|_| invalid_value(KEY_SUPPORTED_CHANNELS, channel))
        })
        .collect()
}

fn read_version(
    bundle: &Bundle,
    key: &str,
) -> std::result::Result<FiraProtocolVersion, SchemaError> {
    require_key(read_protocol_version(bundle, key)?, key)
}

fn parse_version_1(bundle: &Bundle) -> Result<FiraSpecificationParamsBuilder> {
    let mut builder = FiraSpecificationParamsBuilder::new();
    builder
        .min_phy_version(read_version(bundle, KEY_MIN_PHY_VERSION)?)
        .max_phy_version(read_version(bundle, KEY_MAX_PHY_VERSION)?)
        .min_mac_version(read_version(bundle, KEY_MIN_MAC_VERSION)?)
        .max_mac_version(read_version(bundle, KEY_MAX_MAC_VERSION)?)
        .supported_channels(read_channels(bundle)?)
        .aoa_capabilities(read_flags(bundle, KEY_AOA_CAPABILITIES)?)
        .device_role_capabilities(read_flags(bundle, KEY_DEVICE_ROLE_CAPABILITIES)?)
        .has_block_striding_support(
            bundle.get_bool(KEY_BLOCK_STRIDING_SUPPORT)?.unwrap_or_default(),
        )
        .has_hopping_preference_support(
            bundle.get_bool(KEY_HOPPING_PREFERENCE_SUPPORT)?.unwrap_or_default(),
        )
        .has_extended_mac_address_support(
            bundle.get_bool(KEY_EXTENDED_MAC_ADDRESS_SUPPORT)?.unwrap_or_default(),
        )
        .has_non_deferred_mode_support(
            bundle.get_bool(KEY_NON_DEFERRED_MODE_SUPPORT)?.unwrap_or_default(),
        )
        .has_initiation_time_support(
            bundle.get_bool(KEY_INITIATION_TIME_SUPPORT)?.unwrap_or_default(),
        )
        .min_ranging_interval_ms(
            bundle.get_int(KEY_MIN_RANGING_INTERVAL)?.unwrap_or(DEFAULT_MIN_RANGING_INTERVAL_MS),
        )
        .min_slot_duration_us(
            bundle.get_int(KEY_MIN_SLOT_DURATION)?.unwrap_or(DEFAULT_MIN_SLOT_DURATION_US),
        )
        .multi_node_capabilities(read_flags(bundle, KEY_MULTI_NODE_CAPABILITIES)?)
        .ranging_time_struct_capabilities(
            read_flags(bundle, KEY_RANGING_TIME_STRUCT_CAPABILITIES)?,
        )
        .scheduling_mode_capabilities(read_flags(bundle, KEY_SCHEDULING_MODE_CAPABILITIES)?)
        .cc_constraint_length_capabilities(
            read_flags(bundle, KEY_CC_CONSTRAINT_LENGTH_CAPABILITIES)?,
        )
        .prf_capabilities(read_flags(bundle, KEY_PRF_CAPABILITIES)?)
        .ranging_round_capabilities(read_flags(bundle, KEY_RANGING_ROUND_CAPABILITIES)?)
        .rframe_capabilities(read_flags(bundle, KEY_RFRAME_CAPABILITIES)?)
        .sts_capabilities(read_flags(bundle, KEY_STS_CAPABILITIES)?)
        .psdu_data_rate_capabilities(read_flags(bundle, KEY_PSDU_DATA_RATE_CAPABILITIES)?)
        .bprf_parameter_set_capabilities(
            read_flags(bundle, KEY_BPRF_PARAMETER_SET_CAPABILITIES)?,
        )
        .hprf_parameter_set_capabilities(
            FlagSet::from_bits(
                bundle.get_long(KEY_HPRF_PARAMETER_SET_CAPABILITIES)?.unwrap_or_default() as u64,
            ),
        )
        .max_message_size(read_u32(bundle, KEY_MAX_MESSAGE_SIZE)?.unwrap_or_default())
        .max_data_packet_payload_size(
            read_u32(bundle, KEY_MAX_DATA_PACKET_PAYLOAD_SIZE)?.unwrap_or_default(),
        );

    // These keys were added after the first release.
    if bundle.contains_key(KEY_RANGE_DATA_NTF_CONFIG_CAPABILITIES) {
        builder.range_data_ntf_config_capabilities(
            read_flags(bundle, KEY_RANGE_DATA_NTF_CONFIG_CAPABILITIES)?,
        );
    }
    if let Some(value) = bundle.get_bool(KEY_RSSI_REPORTING_SUPPORT)? {
        builder.has_rssi_reporting_support(value);
    }
    if let Some(value) = bundle.get_bool(KEY_DIAGNOSTICS_SUPPORT)? {
        builder.has_diagnostics_support(value);
    }
    if let Some(value) = read_u32(bundle, KEY_MAX_RANGING_SESSION_NUMBER)? {
        builder.max_ranging_session_number(value);
    }
    Ok(builder)
}

fn parse_version_2(bundle: &Bundle) -> Result<FiraSpecificationParamsBuilder> {
    let mut builder = parse_version_1(bundle)?;
    builder
        .device_type(read_enum(bundle, KEY_DEVICE_TYPE)?.unwrap_or(DEFAULT_DEVICE_TYPE))
        .has_suspend_ranging_support(
            bundle.get_bool(KEY_SUSPEND_RANGING_SUPPORT)?.unwrap_or_default(),
        )
        .session_key_length(
            read_u32(bundle, KEY_SESSION_KEY_LENGTH)?.unwrap_or(DEFAULT_SESSION_KEY_LENGTH),
        )
        .dt_tag_max_active_rr(
            read_u32(bundle, KEY_DT_TAG_MAX_ACTIVE_RR)?.unwrap_or(DEFAULT_DT_TAG_MAX_ACTIVE_RR),
        )
        .has_background_ranging_support(
            bundle.get_bool(KEY_BACKGROUND_RANGING_SUPPORT)?.unwrap_or_default(),
        )
        .has_dt_tag_block_skipping_support(
            bundle.get_bool(KEY_DT_TAG_BLOCK_SKIPPING_SUPPORT)?.unwrap_or_default(),
        )
        .has_psdu_length_support(bundle.get_bool(KEY_PSDU_LENGTH_SUPPORT)?.unwrap_or_default())
        .uci_version(read_u32(bundle, KEY_UCI_VERSION)?.unwrap_or(DEFAULT_UCI_VERSION));
    Ok(builder)
}

fn decode_version_1(bundle: &Bundle) -> Result<FiraSpecificationParams> {
    Ok(parse_version_1(bundle)?.build())
}

fn decode_version_2(bundle: &Bundle) -> Result<FiraSpecificationParams> {
    Ok(parse_version_2(bundle)?.build())
}
