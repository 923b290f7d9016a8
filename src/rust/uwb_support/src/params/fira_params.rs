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

//! This module defines the FiRa catalogs shared by the session and specification parameters:
//! the integer-coded enums, the capability flags, the protocol version and the UWB address.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::SchemaError;

/// The session id, an unsigned 32-bit value.
pub type SessionId = u32;
/// The sub-session id, an unsigned 32-bit value.
pub type SubSessionId = u32;
/// The handle of another session, an unsigned 32-bit value.
pub type SessionHandle = u32;

/// The FiRa protocol version, written as "major.minor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiraProtocolVersion {
    major: u32,
    minor: u32,
}

impl FiraProtocolVersion {
    /// Create a FiraProtocolVersion instance.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The major version.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// The minor version.
    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for FiraProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for FiraProtocolVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SchemaError::MalformedProtocolVersion(s.to_owned());
        let (major, minor) = s.split_once('.').ok_or_else(malformed)?;
        Ok(Self {
            major: major.parse().map_err(|_| malformed())?,
            minor: minor.parse().map_err(|_| malformed())?,
        })
    }
}

/// The UWB address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UwbAddress {
    /// The short MAC address (2 bytes)
    Short([u8; 2]),
    /// The extended MAC address (8 bytes)
    Extended([u8; 8]),
}

impl UwbAddress {
    /// The length of the address in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Always false, an address is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            UwbAddress::Short(addr) => addr,
            UwbAddress::Extended(addr) => addr,
        }
    }
}

impl From<UwbAddress> for Vec<u8> {
    fn from(item: UwbAddress) -> Self {
        item.as_bytes().to_vec()
    }
}

impl TryFrom<&[u8]> for UwbAddress {
    type Error = &'static str;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.len() {
            2 => Ok(UwbAddress::Short([value[0], value[1]])),
            8 => value
                .try_into()
                .map(UwbAddress::Extended)
                .map_err(|_| "Invalid address length"),
            _ => Err("Invalid address length"),
        }
    }
}

/// The device type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum DeviceType {
    /// Controlee
    Controlee = 0,
    /// Controller
    Controller = 1,
    /// DT-Tag of the DL-TDoA topology
    DtTag = 2,
}

/// The device role.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum DeviceRole {
    /// Responder of the session
    Responder = 0,
    /// Initiator of the session
    Initiator = 1,
    /// UT-Synchronization Anchor
    UtSyncAnchor = 2,
    /// UT-Anchor
    UtAnchor = 3,
    /// UT-Tag
    UtTag = 4,
    /// Advertiser
    Advertiser = 5,
    /// Observer
    Observer = 6,
    /// DT-Anchor
    DtAnchor = 7,
    /// DT-Tag
    DtTag = 8,
}

/// The mode of ranging round usage.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RangingRoundUsage {
    /// OWR for UL-TDoA
    UlTdoa = 0,
    /// SS-TWR with Deferred Mode
    SsTwr = 1,
    /// DS-TWR with Deferred Mode (default)
    DsTwr = 2,
    /// SS-TWR with Non-deferred Mode
    SsTwrNon = 3,
    /// DS-TWR with Non-deferred Mode
    DsTwrNon = 4,
    /// OWR for DL-TDoA
    DlTdoa = 5,
    /// OWR for AoA measurement
    OwrAoa = 6,
    /// eSS-TWR with Non-deferred Mode for contention-based ranging
    EssTwrNon = 7,
    /// ADS-TWR for contention-based ranging
    AdsTwr = 8,
}

/// The mode of multi node.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum MultiNodeMode {
    /// Single device to Single device (Unicast)
    Unicast = 0,
    /// One to Many
    OneToMany = 1,
    /// Many to Many
    ManyToMany = 2,
}

/// MAC Addressing mode to be used in UWBS.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum MacAddressMode {
    /// MAC address is 2 bytes and 2 bytes to be used in MAC header (default)
    MacAddress2Bytes = 0,
    /// MAC address is 8 bytes and 2 bytes to be used in MAC header
    MacAddress8Bytes2BytesHeader = 1,
    /// MAC address is 8 bytes and 8 bytes to be used in MAC header
    MacAddress8Bytes = 2,
}

impl MacAddressMode {
    /// The length of the addresses stored with this mode.
    pub fn address_len(&self) -> usize {
        match self {
            MacAddressMode::MacAddress8Bytes => 8,
            _ => 2,
        }
    }
}

/// The UWB channel number. (default = 9)
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum UwbChannel {
    Channel5 = 5,
    Channel6 = 6,
    Channel8 = 8,
    Channel9 = 9,
    Channel10 = 10,
    Channel12 = 12,
    Channel13 = 13,
    Channel14 = 14,
}

/// Rframe config.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RframeConfig {
    /// SP0
    SP0 = 0,
    /// SP1
    SP1 = 1,
    /// SP2
    SP2 = 2,
    /// SP3 (default)
    SP3 = 3,
}

/// This parameter is used to configure the mean PRF.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PrfMode {
    /// 62.4 MHz PRF. BPRF mode (default)
    Bprf = 0,
    /// 124.8 MHz PRF. HPRF mode
    HprfWith124_8MHz = 1,
    /// 249.6 MHz PRF. HPRF mode with data rate 27.2 and 31.2 Mbps
    HprfWith249_6MHz = 2,
}

/// This parameter is used to set the Multinode Ranging Type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ScheduledMode {
    /// Contention-based ranging
    ContentionBasedRanging = 0,
    /// Time scheduled ranging (default)
    TimeScheduledRanging = 1,
    /// Hybrid ranging
    HybridScheduledRanging = 2,
}

/// Preamble duration is same as Preamble Symbol Repetitions (PSR).
///
/// Two configurations are possible. BPRF uses only 64 symbols. HPRF can use both.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PreambleDuration {
    /// 32 symbols
    T32Symbols = 0,
    /// 64 symbols (default)
    T64Symbols = 1,
}

/// The number of symbols in an STS segment.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum StsLength {
    /// 32 symbols
    Length32 = 0,
    /// 64 symbols (default)
    Length64 = 1,
    /// 128 symbols
    Length128 = 2,
}

/// This value configures the data rate.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PsduDataRate {
    /// 6.81 Mbps (default)
    Rate6m81 = 0,
    /// 7.80 Mbps
    Rate7m80 = 1,
    /// 27.2 Mbps
    Rate27m2 = 2,
    /// 31.2 Mbps
    Rate31m2 = 3,
    /// 850Kbps
    Rate850k = 4,
}

/// The data rate for BPRF mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum BprfPhrDataRate {
    /// 850 kbps (default)
    Rate850k = 0,
    /// 6.81 Mbps
    Rate6m81 = 1,
}

/// CRC type in MAC footer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum MacFcsType {
    /// CRC 16 (default)
    Crc16 = 0,
    /// CRC 32
    Crc32 = 1,
}

/// This parameter indicates how the system shall generate the STS.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum StsConfig {
    /// Static STS (default)
    Static = 0,
    /// Dynamic STS
    Dynamic = 1,
    /// Dynamic STS for Responder specific Sub-session Key
    DynamicForControleeIndividualKey = 2,
    /// Provisioned STS
    Provisioned = 3,
    /// Provisioned STS for Responder specific Sub-session Key
    ProvisionedForControleeIndividualKey = 4,
}

impl StsConfig {
    /// Whether the mode derives a sub-session key for each controlee.
    pub fn is_individual_key(&self) -> bool {
        matches!(
            self,
            StsConfig::DynamicForControleeIndividualKey
                | StsConfig::ProvisionedForControleeIndividualKey
        )
    }
}

/// This parameter is used to configure AOA results in the range data notification.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum AoaResultRequest {
    /// Disable AOA
    NoAoaReport = 0,
    /// Enable AOA (default)
    ReqAoaResults = 1,
    /// Enable only AOA Azimuth
    ReqAoaResultsAzimuthOnly = 2,
    /// Enable only AOA Elevation
    ReqAoaResultsElevationOnly = 3,
    /// Enable AOA interleaved
    ReqAoaResultsInterleaved = 0xF0,
}

/// This config is used to enable/disable the range data notification.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RangeDataNtfConfig {
    /// Disable range data notification
    Disable = 0,
    /// Enable range data notification (default)
    Enable = 1,
    /// Enable range data notification while in proximity range
    EnableProximityLevelTrig = 2,
    /// Enable range data notification while in AoA bound
    EnableAoaLevelTrig = 3,
    /// Enable range data notification while in proximity range and AoA bound
    EnableProximityAoaLevelTrig = 4,
    /// Enable range data notification on entering or leaving the proximity range
    EnableProximityEdgeTrig = 5,
    /// Enable range data notification on entering or leaving the AoA bound
    EnableAoaEdgeTrig = 6,
    /// Enable range data notification on entering or leaving the proximity range and AoA bound
    EnableProximityAoaEdgeTrig = 7,
}

/// The type of AoA measurement reported in the session.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum AoaType {
    /// Azimuth only (default)
    Azimuth = 1,
    /// Elevation only
    Elevation = 2,
    /// Azimuth and elevation
    AzimuthAndElevation = 3,
}

/// The type of ranging time scheduling.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RangingTimeStruct {
    /// Interval Based Scheduling
    IntervalBasedScheduling = 0,
    /// Block Based Scheduling (default)
    BlockBasedScheduling = 1,
}

/// The filtering applied to the ranging results of the session.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum FilterType {
    /// No filtering
    None = 0,
    /// The default filter of the platform (default)
    Default = 1,
    /// The filter provided by the application
    Application = 2,
}

/// A capability flag. The discriminant of the flag is its bit position in the packed value.
pub trait CapabilityFlag: Copy + Ord + fmt::Debug + FromPrimitive + ToPrimitive {
    /// The mask of the flag in the packed value.
    fn mask(self) -> u64 {
        self.to_u32().map_or(0, |bit| 1_u64 << bit)
    }
}

/// The set of supported capability flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagSet<F: CapabilityFlag>(BTreeSet<F>);

impl<F: CapabilityFlag> FlagSet<F> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Unpack the flags from the bits. Unknown bits are dropped.
    pub fn from_bits(bits: u64) -> Self {
        (0..u64::BITS).filter(|bit| bits & (1_u64 << bit) != 0).filter_map(F::from_u32).collect()
    }

    /// Pack the flags into bits.
    pub fn to_bits(&self) -> u64 {
        self.0.iter().fold(0, |bits, flag| bits | flag.mask())
    }

    /// Add the flag, return true if the flag was absent.
    pub fn insert(&mut self, flag: F) -> bool {
        self.0.insert(flag)
    }

    /// Whether the flag is in the set.
    pub fn contains(&self, flag: F) -> bool {
        self.0.contains(&flag)
    }

    /// Whether the set is a superset of the other set.
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }

    /// The number of flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the flags in bit order.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.0.iter().copied()
    }
}

impl<F: CapabilityFlag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: CapabilityFlag> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<F: CapabilityFlag> Extend<F> for FlagSet<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<F: CapabilityFlag> IntoIterator for FlagSet<F> {
    type Item = F;
    type IntoIter = std::collections::btree_set::IntoIter<F>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<F: CapabilityFlag, const N: usize> From<[F; N]> for FlagSet<F> {
    fn from(flags: [F; N]) -> Self {
        flags.into_iter().collect()
    }
}

macro_rules! capability_flag {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $bit:expr,)+ }) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive,
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant = $bit,)+
        }

        impl CapabilityFlag for $name {}
    };
}

capability_flag!(
    /// The supported AoA measurements.
    AoaCapabilityFlag {
        /// Azimuth AoA in the range of -90 to 90 degrees
        HasAzimuthSupport = 0,
        /// Elevation AoA
        HasElevationSupport = 1,
        /// Azimuth AoA in the range of -180 to 180 degrees
        HasFullAzimuthSupport = 2,
        /// Figure of merit of the AoA
        HasFomSupport = 3,
        /// Interleaved ranging and AoA measurements
        HasInterleavingSupport = 4,
    }
);

capability_flag!(
    /// The supported device roles.
    DeviceRoleCapabilityFlag {
        /// Controlee as initiator
        HasControleeInitiatorSupport = 0,
        /// Controlee as responder
        HasControleeResponderSupport = 1,
        /// Controller as initiator
        HasControllerInitiatorSupport = 2,
        /// Controller as responder
        HasControllerResponderSupport = 3,
        /// UT-Synchronization Anchor
        HasUtSynchronizationSupport = 4,
        /// UT-Anchor
        HasUtAnchorSupport = 5,
        /// UT-Tag
        HasUtTagSupport = 6,
        /// Advertiser
        HasAdvertiserSupport = 7,
        /// Observer
        HasObserverSupport = 8,
        /// DT-Anchor
        HasDtAnchorSupport = 9,
        /// DT-Tag
        HasDtTagSupport = 10,
    }
);

capability_flag!(
    /// The supported multi node modes.
    MultiNodeCapabilityFlag {
        /// Unicast
        HasUnicastSupport = 0,
        /// One to many
        HasOneToManySupport = 1,
        /// Many to many
        HasManyToManySupport = 2,
    }
);

capability_flag!(
    /// The supported ranging time structures.
    RangingTimeStructCapabilityFlag {
        /// Interval based scheduling
        HasIntervalBasedSchedulingSupport = 0,
        /// Block based scheduling
        HasBlockBasedSchedulingSupport = 1,
    }
);

capability_flag!(
    /// The supported scheduling modes.
    SchedulingModeCapabilityFlag {
        /// Contention based ranging
        HasContentionBasedRangingSupport = 0,
        /// Time scheduled ranging
        HasTimeScheduledRangingSupport = 1,
    }
);

capability_flag!(
    /// The supported convolutional code constraint lengths.
    CcConstraintLengthCapabilityFlag {
        /// K = 3
        HasConstraintLength3Support = 0,
        /// K = 7
        HasConstraintLength7Support = 1,
    }
);

capability_flag!(
    /// The supported PRF modes.
    PrfCapabilityFlag {
        /// BPRF
        HasBprfSupport = 0,
        /// HPRF
        HasHprfSupport = 1,
    }
);

capability_flag!(
    /// The supported ranging round usages.
    RangingRoundCapabilityFlag {
        /// DS-TWR
        HasDsTwrSupport = 0,
        /// SS-TWR
        HasSsTwrSupport = 1,
        /// OWR for UL-TDoA
        HasOwrUlTdoaSupport = 2,
        /// OWR for DL-TDoA
        HasOwrDlTdoaSupport = 3,
        /// OWR for AoA measurement
        HasOwrAoaSupport = 4,
        /// eSS-TWR with Non-deferred Mode
        HasEssTwrSupport = 5,
        /// ADS-TWR
        HasAdsTwrSupport = 6,
    }
);

capability_flag!(
    /// The supported rframe configs.
    RframeCapabilityFlag {
        /// SP0
        HasSp0RframeSupport = 0,
        /// SP1
        HasSp1RframeSupport = 1,
        /// SP2
        HasSp2RframeSupport = 2,
        /// SP3
        HasSp3RframeSupport = 3,
    }
);

capability_flag!(
    /// The supported STS configs.
    StsCapabilityFlag {
        /// Static STS
        HasStaticStsSupport = 0,
        /// Dynamic STS
        HasDynamicStsSupport = 1,
        /// Dynamic STS for controlee individual key
        HasDynamicStsIndividualControleeKeySupport = 2,
        /// Provisioned STS
        HasProvisionedStsSupport = 3,
        /// Provisioned STS for controlee individual key
        HasProvisionedStsIndividualControleeKeySupport = 4,
    }
);

capability_flag!(
    /// The supported PSDU data rates.
    PsduDataRateCapabilityFlag {
        /// 6.81 Mbps
        Has6m81Support = 0,
        /// 7.80 Mbps
        Has7m80Support = 1,
        /// 27.2 Mbps
        Has27m2Support = 2,
        /// 31.2 Mbps
        Has31m2Support = 3,
    }
);

capability_flag!(
    /// The supported BPRF parameter sets.
    BprfParameterSetCapabilityFlag {
        /// SET_1
        HasBprfParameterSet1Support = 0,
        /// SET_2
        HasBprfParameterSet2Support = 1,
        /// SET_3
        HasBprfParameterSet3Support = 2,
        /// SET_4
        HasBprfParameterSet4Support = 3,
        /// SET_5
        HasBprfParameterSet5Support = 4,
        /// SET_6
        HasBprfParameterSet6Support = 5,
    }
);

capability_flag!(
    /// The supported HPRF parameter sets.
    #[allow(missing_docs)]
    HprfParameterSetCapabilityFlag {
        HasHprfParameterSet1Support = 0,
        HasHprfParameterSet2Support = 1,
        HasHprfParameterSet3Support = 2,
        HasHprfParameterSet4Support = 3,
        HasHprfParameterSet5Support = 4,
        HasHprfParameterSet6Support = 5,
        HasHprfParameterSet7Support = 6,
        HasHprfParameterSet8Support = 7,
        HasHprfParameterSet9Support = 8,
        HasHprfParameterSet10Support = 9,
        HasHprfParameterSet11Support = 10,
        HasHprfParameterSet12Support = 11,
        HasHprfParameterSet13Support = 12,
        HasHprfParameterSet14Support = 13,
        HasHprfParameterSet15Support = 14,
        HasHprfParameterSet16Support = 15,
        HasHprfParameterSet17Support = 16,
        HasHprfParameterSet18Support = 17,
        HasHprfParameterSet19Support = 18,
        HasHprfParameterSet20Support = 19,
        HasHprfParameterSet21Support = 20,
        HasHprfParameterSet22Support = 21,
        HasHprfParameterSet23Support = 22,
        HasHprfParameterSet24Support = 23,
        HasHprfParameterSet25Support = 24,
        HasHprfParameterSet26Support = 25,
        HasHprfParameterSet27Support = 26,
        HasHprfParameterSet28Support = 27,
        HasHprfParameterSet29Support = 28,
        HasHprfParameterSet30Support = 29,
        HasHprfParameterSet31Support = 30,
        HasHprfParameterSet32Support = 31,
        HasHprfParameterSet33Support = 32,
        HasHprfParameterSet34Support = 33,
        HasHprfParameterSet35Support = 34,
    }
);

capability_flag!(
    /// The supported range data notification configs.
    RangeDataNtfConfigCapabilityFlag {
        /// Disable
        HasRangeDataNtfConfigDisable = 0,
        /// Enable
        HasRangeDataNtfConfigEnable = 1,
        /// Proximity level trigger
        HasRangeDataNtfConfigEnableProximityLevelTrig = 2,
        /// AoA level trigger
        HasRangeDataNtfConfigEnableAoaLevelTrig = 3,
        /// Proximity and AoA level trigger
        HasRangeDataNtfConfigEnableProximityAoaLevelTrig = 4,
        /// Proximity edge trigger
        HasRangeDataNtfConfigEnableProximityEdgeTrig = 5,
        /// AoA edge trigger
        HasRangeDataNtfConfigEnableAoaEdgeTrig = 6,
        /// Proximity and AoA edge trigger
        HasRangeDataNtfConfigEnableProximityAoaEdgeTrig = 7,
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version() {
        let version: FiraProtocolVersion = "2.0".parse().unwrap();
        assert_eq!(version, FiraProtocolVersion::new(2, 0));
        assert_eq!(version.to_string(), "2.0");
        assert!(version > FiraProtocolVersion::new(1, 1));

        assert_eq!(
            "2".parse::<FiraProtocolVersion>(),
            Err(SchemaError::MalformedProtocolVersion("2".to_string()))
        );
        assert!("2.x".parse::<FiraProtocolVersion>().is_err());
        assert!("-1.0".parse::<FiraProtocolVersion>().is_err());
    }

    #[test]
    fn test_uwb_address() {
        let short = UwbAddress::try_from([0x12_u8, 0x34].as_slice()).unwrap();
        assert_eq!(short, UwbAddress::Short([0x12, 0x34]));
        assert_eq!(short.len(), 2);

        let extended = UwbAddress::try_from([1_u8, 2, 3, 4, 5, 6, 7, 8].as_slice()).unwrap();
        assert_eq!(extended.len(), 8);
        assert_eq!(Vec::<u8>::from(extended), vec![1, 2, 3, 4, 5, 6, 7, 8]);

        assert!(UwbAddress::try_from([1_u8, 2, 3].as_slice()).is_err());
    }

    #[test]
    fn test_flag_set_bits() {
        let flags = FlagSet::from([
            RframeCapabilityFlag::HasSp3RframeSupport,
            RframeCapabilityFlag::HasSp1RframeSupport,
        ]);
        assert_eq!(flags.to_bits(), 0b1010);
        assert_eq!(FlagSet::<RframeCapabilityFlag>::from_bits(0b1010), flags);
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![
                RframeCapabilityFlag::HasSp1RframeSupport,
                RframeCapabilityFlag::HasSp3RframeSupport
            ]
        );

        // Unknown bits are dropped.
        let flags = FlagSet::<PrfCapabilityFlag>::from_bits(0xFF);
        assert_eq!(flags.len(), 2);
        assert_eq!(flags.to_bits(), 0b11);
    }

    #[test]
    fn test_flag_set_above_32_bits() {
        let flags = FlagSet::from([
            HprfParameterSetCapabilityFlag::HasHprfParameterSet1Support,
            HprfParameterSetCapabilityFlag::HasHprfParameterSet35Support,
        ]);
        assert_eq!(flags.to_bits(), (1 << 34) | 1);
        assert_eq!(
            FlagSet::<HprfParameterSetCapabilityFlag>::from_bits(flags.to_bits()),
            flags
        );
    }
}
