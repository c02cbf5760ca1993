use serde::{Deserialize, Serialize};

use crate::protocols::common::hex_bytes;
use crate::protocols::common::writer::LeWriter;
use crate::protocols::scalar::{Color, Label, PowerLevel, Timestamp, WireScalar};

use super::error::MessageError;
use super::layout;
use super::request::EchoRequest;

/// Fixed-length body of a response message.
///
/// Encoding is total apart from failures of the embedded scalar encoders;
/// byte ranges no field covers are zero.
pub trait ResponsePayload {
    const MESSAGE_TYPE: u16;
    const LEN: usize;

    fn encode(&self) -> Result<Vec<u8>, MessageError>;
}

/// Service number advertised for the UDP transport.
pub const SERVICE_UDP: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateService {
    pub service: u8,
    /// Zero while the service is temporarily unavailable.
    pub port: u32,
}

impl ResponsePayload for StateService {
    const MESSAGE_TYPE: u16 = layout::STATE_SERVICE;
    const LEN: usize = layout::state_service::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(Self::LEN);
        writer
            .put_u8(layout::state_service::SERVICE_OFFSET, self.service)
            .put_u32_le(layout::state_service::PORT_RANGE, self.port);
        Ok(writer.finish())
    }
}

fn encode_radio_info(signal: f32, tx: u32, rx: u32) -> Vec<u8> {
    let mut writer = LeWriter::new(layout::radio_info::LEN);
    writer
        .put_u32_le(layout::radio_info::SIGNAL_RANGE, signal.to_bits())
        .put_u32_le(layout::radio_info::TX_RANGE, tx)
        .put_u32_le(layout::radio_info::RX_RANGE, rx);
    writer.finish()
}

fn encode_firmware(build: u64, version: u32) -> Vec<u8> {
    let mut writer = LeWriter::new(layout::firmware::LEN);
    writer
        .put_u64_le(layout::firmware::BUILD_RANGE, build)
        .put_u32_le(layout::firmware::VERSION_RANGE, version);
    writer.finish()
}

/// Host MCU radio statistics. `signal` is in milliwatts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateHostInfo {
    pub signal: f32,
    pub tx: u32,
    pub rx: u32,
}

impl ResponsePayload for StateHostInfo {
    const MESSAGE_TYPE: u16 = layout::STATE_HOST_INFO;
    const LEN: usize = layout::radio_info::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(encode_radio_info(self.signal, self.tx, self.rx))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHostFirmware {
    /// Build time in nanoseconds since the epoch.
    pub build: u64,
    pub version: u32,
}

impl ResponsePayload for StateHostFirmware {
    const MESSAGE_TYPE: u16 = layout::STATE_HOST_FIRMWARE;
    const LEN: usize = layout::firmware::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(encode_firmware(self.build, self.version))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateWifiInfo {
    pub signal: f32,
    pub tx: u32,
    pub rx: u32,
}

impl ResponsePayload for StateWifiInfo {
    const MESSAGE_TYPE: u16 = layout::STATE_WIFI_INFO;
    const LEN: usize = layout::radio_info::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(encode_radio_info(self.signal, self.tx, self.rx))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateWifiFirmware {
    pub build: u64,
    pub version: u32,
}

impl ResponsePayload for StateWifiFirmware {
    const MESSAGE_TYPE: u16 = layout::STATE_WIFI_FIRMWARE;
    const LEN: usize = layout::firmware::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(encode_firmware(self.build, self.version))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePower {
    pub level: PowerLevel,
}

impl ResponsePayload for StatePower {
    const MESSAGE_TYPE: u16 = layout::STATE_POWER;
    const LEN: usize = layout::state_power::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.level.encode()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateLabel {
    pub label: Label,
}

impl ResponsePayload for StateLabel {
    const MESSAGE_TYPE: u16 = layout::STATE_LABEL;
    const LEN: usize = layout::state_label::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.label.encode()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVersion {
    pub vendor: u32,
    pub product: u32,
    pub version: u32,
}

impl ResponsePayload for StateVersion {
    const MESSAGE_TYPE: u16 = layout::STATE_VERSION;
    const LEN: usize = layout::state_version::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(Self::LEN);
        writer
            .put_u32_le(layout::state_version::VENDOR_RANGE, self.vendor)
            .put_u32_le(layout::state_version::PRODUCT_RANGE, self.product)
            .put_u32_le(layout::state_version::VERSION_RANGE, self.version);
        Ok(writer.finish())
    }
}

/// Device clock and run-time counters, all in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInfo {
    pub time: Timestamp,
    pub uptime: u64,
    pub downtime: u64,
}

impl ResponsePayload for StateInfo {
    const MESSAGE_TYPE: u16 = layout::STATE_INFO;
    const LEN: usize = layout::state_info::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(Self::LEN);
        writer
            .put_u64_le(layout::state_info::TIME_RANGE, self.time.to_bits())
            .put_u64_le(layout::state_info::UPTIME_RANGE, self.uptime)
            .put_u64_le(layout::state_info::DOWNTIME_RANGE, self.downtime);
        Ok(writer.finish())
    }
}

fn encode_membership(
    id: &[u8; layout::GROUP_ID_LEN],
    label: &Label,
    updated_at: Timestamp,
) -> Result<Vec<u8>, MessageError> {
    let mut writer = LeWriter::new(layout::membership::LEN);
    writer
        .put_slice(layout::membership::ID_RANGE, id)
        .put_slice(layout::membership::LABEL_RANGE, &label.encode()?)
        .put_slice(layout::membership::UPDATED_AT_RANGE, &updated_at.encode()?);
    Ok(writer.finish())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateLocation {
    #[serde(with = "hex_bytes")]
    pub location: [u8; layout::GROUP_ID_LEN],
    pub label: Label,
    pub updated_at: Timestamp,
}

impl ResponsePayload for StateLocation {
    const MESSAGE_TYPE: u16 = layout::STATE_LOCATION;
    const LEN: usize = layout::membership::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        encode_membership(&self.location, &self.label, self.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateGroup {
    #[serde(with = "hex_bytes")]
    pub group: [u8; layout::GROUP_ID_LEN],
    pub label: Label,
    pub updated_at: Timestamp,
}

impl ResponsePayload for StateGroup {
    const MESSAGE_TYPE: u16 = layout::STATE_GROUP;
    const LEN: usize = layout::membership::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        encode_membership(&self.group, &self.label, self.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    #[serde(with = "hex_bytes")]
    pub payload: [u8; layout::ECHO_PAYLOAD_LEN],
}

impl From<&EchoRequest> for EchoResponse {
    fn from(request: &EchoRequest) -> Self {
        Self {
            payload: request.payload,
        }
    }
}

impl ResponsePayload for EchoResponse {
    const MESSAGE_TYPE: u16 = layout::ECHO_RESPONSE;
    const LEN: usize = layout::echo::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.payload.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    pub color: Color,
    pub power: PowerLevel,
    pub label: Label,
}

impl ResponsePayload for LightState {
    const MESSAGE_TYPE: u16 = layout::LIGHT_STATE;
    const LEN: usize = layout::light_state::LEN;

    // RESERVED_RANGE is left as written by LeWriter::new (zero).
    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        let mut writer = LeWriter::new(Self::LEN);
        writer
            .put_slice(layout::light_state::COLOR_RANGE, &self.color.encode()?)
            .put_slice(layout::light_state::POWER_RANGE, &self.power.encode()?)
            .put_slice(layout::light_state::LABEL_RANGE, &self.label.encode()?);
        Ok(writer.finish())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightStatePower {
    pub level: PowerLevel,
}

impl ResponsePayload for LightStatePower {
    const MESSAGE_TYPE: u16 = layout::LIGHT_STATE_POWER;
    const LEN: usize = layout::light_state_power::LEN;

    fn encode(&self) -> Result<Vec<u8>, MessageError> {
        Ok(self.level.encode()?)
    }
}

/// Response body ready to be framed behind a header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    StateService(StateService),
    StateHostInfo(StateHostInfo),
    StateHostFirmware(StateHostFirmware),
    StateWifiInfo(StateWifiInfo),
    StateWifiFirmware(StateWifiFirmware),
    StatePower(StatePower),
    StateLabel(StateLabel),
    StateVersion(StateVersion),
    StateInfo(StateInfo),
    StateLocation(StateLocation),
    StateGroup(StateGroup),
    EchoResponse(EchoResponse),
    LightState(LightState),
    LightStatePower(LightStatePower),
}

macro_rules! for_each_response {
    ($value:expr, $body:ident => $expr:expr) => {
        match $value {
            Response::StateService($body) => $expr,
            Response::StateHostInfo($body) => $expr,
            Response::StateHostFirmware($body) => $expr,
            Response::StateWifiInfo($body) => $expr,
            Response::StateWifiFirmware($body) => $expr,
            Response::StatePower($body) => $expr,
            Response::StateLabel($body) => $expr,
            Response::StateVersion($body) => $expr,
            Response::StateInfo($body) => $expr,
            Response::StateLocation($body) => $expr,
            Response::StateGroup($body) => $expr,
            Response::EchoResponse($body) => $expr,
            Response::LightState($body) => $expr,
            Response::LightStatePower($body) => $expr,
        }
    };
}

fn message_type_of<T: ResponsePayload>(_: &T) -> u16 {
    T::MESSAGE_TYPE
}

fn len_of<T: ResponsePayload>(_: &T) -> usize {
    T::LEN
}

impl Response {
    pub fn message_type(&self) -> u16 {
        for_each_response!(self, body => message_type_of(body))
    }

    /// Fixed encoded length of this variant.
    pub fn payload_len(&self) -> usize {
        for_each_response!(self, body => len_of(body))
    }

    pub fn encode(&self) -> Result<Vec<u8>, MessageError> {
        for_each_response!(self, body => body.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::message::{Direction, message_direction, message_name};
    use crate::protocols::scalar::ScalarError;

    fn sample_responses() -> Vec<Response> {
        vec![
            Response::StateService(StateService {
                service: SERVICE_UDP,
                port: 56700,
            }),
            Response::StateHostInfo(StateHostInfo {
                signal: 1.5e-6,
                tx: 10,
                rx: 20,
            }),
            Response::StateHostFirmware(StateHostFirmware {
                build: 1_467_178_139_000_000_000,
                version: 0x0002_0001,
            }),
            Response::StateWifiInfo(StateWifiInfo {
                signal: -0.5,
                tx: 1,
                rx: 2,
            }),
            Response::StateWifiFirmware(StateWifiFirmware {
                build: 1,
                version: 2,
            }),
            Response::StatePower(StatePower {
                level: PowerLevel::ENABLED,
            }),
            Response::StateLabel(StateLabel {
                label: Label::new("ROOM"),
            }),
            Response::StateVersion(StateVersion {
                vendor: 1,
                product: 27,
                version: 0,
            }),
            Response::StateInfo(StateInfo {
                time: Timestamp(-5),
                uptime: 3,
                downtime: 4,
            }),
            Response::StateLocation(StateLocation {
                location: [0xA1; 16],
                label: Label::new("Home"),
                updated_at: Timestamp(42),
            }),
            Response::StateGroup(StateGroup {
                group: [0xB2; 16],
                label: Label::new("Kitchen"),
                updated_at: Timestamp(43),
            }),
            Response::EchoResponse(EchoResponse { payload: [9; 64] }),
            Response::LightState(LightState {
                color: Color::white(0xFFFF, 3500),
                power: PowerLevel::ENABLED,
                label: Label::new("Lamp"),
            }),
            Response::LightStatePower(LightStatePower {
                level: PowerLevel::STANDBY,
            }),
        ]
    }

    #[test]
    fn every_variant_encodes_its_fixed_length() {
        let expected = [5, 12, 12, 12, 12, 2, 32, 12, 24, 56, 56, 64, 44, 2];
        let responses = sample_responses();
        assert_eq!(responses.len(), expected.len());
        for (response, len) in responses.iter().zip(expected) {
            let bytes = response.encode().unwrap();
            assert_eq!(bytes.len(), len, "{response:?}");
            assert_eq!(response.payload_len(), len);
        }
    }

    #[test]
    fn message_types_are_named_responses() {
        for response in sample_responses() {
            let code = response.message_type();
            assert!(message_name(code).is_some(), "{code}");
            assert_eq!(message_direction(code), Some(Direction::Response));
        }
    }

    #[test]
    fn state_service_layout() {
        let bytes = StateService {
            service: SERVICE_UDP,
            port: 56700,
        }
        .encode()
        .unwrap();
        assert_eq!(bytes, vec![0x01, 0x7C, 0xDD, 0x00, 0x00]);
    }

    #[test]
    fn host_info_signal_is_float_bits() {
        let bytes = StateHostInfo {
            signal: 1.0,
            tx: 0x0102_0304,
            rx: 0x0A0B_0C0D,
        }
        .encode()
        .unwrap();
        assert_eq!(&bytes[0..4], &1.0f32.to_bits().to_le_bytes());
        assert_eq!(&bytes[4..8], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[8..12], &[0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn wifi_and_host_share_layouts() {
        let host = StateHostFirmware {
            build: 7,
            version: 8,
        };
        let wifi = StateWifiFirmware {
            build: 7,
            version: 8,
        };
        assert_eq!(host.encode().unwrap(), wifi.encode().unwrap());
        let bytes = host.encode().unwrap();
        assert_eq!(&bytes[0..8], &7u64.to_le_bytes());
        assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
    }

    #[test]
    fn state_info_reinterprets_signed_time() {
        let bytes = StateInfo {
            time: Timestamp(-1),
            uptime: 1,
            downtime: 2,
        }
        .encode()
        .unwrap();
        assert_eq!(&bytes[0..8], &[0xFF; 8]);
        assert_eq!(&bytes[8..16], &1u64.to_le_bytes());
        assert_eq!(&bytes[16..24], &2u64.to_le_bytes());
    }

    #[test]
    fn location_and_group_place_label_and_timestamp() {
        let location = StateLocation {
            location: [0xA1; 16],
            label: Label::new("Home"),
            updated_at: Timestamp(0x0102_0304_0506_0708),
        };
        let bytes = location.encode().unwrap();
        assert_eq!(&bytes[0..16], &[0xA1; 16]);
        assert_eq!(&bytes[16..20], b"Home");
        assert!(bytes[20..48].iter().all(|b| *b == 0));
        assert_eq!(
            &bytes[48..56],
            &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );

        let group = StateGroup {
            group: location.location,
            label: location.label.clone(),
            updated_at: location.updated_at,
        };
        assert_eq!(group.encode().unwrap(), bytes);
    }

    #[test]
    fn light_state_reserved_gap_is_zero() {
        for (color, power) in [
            (Color::white(0xFFFF, 9000), PowerLevel::ENABLED),
            (
                Color {
                    hue: 0xFFFF,
                    saturation: 0xFFFF,
                    brightness: 0xFFFF,
                    kelvin: 2500,
                },
                PowerLevel(0xFFFF),
            ),
        ] {
            let bytes = LightState {
                color,
                power,
                label: Label::new("Lamp"),
            }
            .encode()
            .unwrap();
            assert_eq!(&bytes[8..10], &[0, 0]);
            assert_eq!(&bytes[0..8], &color.encode().unwrap()[..]);
            assert_eq!(&bytes[10..12], &power.0.to_le_bytes());
            assert_eq!(&bytes[12..16], b"Lamp");
        }
    }

    #[test]
    fn light_state_propagates_color_failure() {
        let err = LightState {
            color: Color::white(0, 1000),
            power: PowerLevel::ENABLED,
            label: Label::default(),
        }
        .encode()
        .unwrap_err();
        assert!(matches!(
            err,
            MessageError::MalformedScalar(ScalarError::KelvinOutOfRange { kelvin: 1000, .. })
        ));
    }

    #[test]
    fn echo_response_mirrors_request() {
        let request = EchoRequest { payload: [0x5A; 64] };
        let response = EchoResponse::from(&request);
        assert_eq!(response.encode().unwrap(), request.payload.to_vec());
    }

    #[test]
    fn response_json_round_trips() {
        for response in sample_responses() {
            let json = serde_json::to_string(&response).unwrap();
            let back: Response = serde_json::from_str(&json).unwrap();
            assert_eq!(back, response);
        }
    }

    #[test]
    fn group_id_serializes_as_hex() {
        let json = serde_json::to_value(Response::StateGroup(StateGroup {
            group: [0xB2; 16],
            label: Label::new("Kitchen"),
            updated_at: Timestamp(43),
        }))
        .unwrap();
        assert_eq!(json["type"], "state_group");
        assert_eq!(json["group"], "b2".repeat(16));
        assert_eq!(json["label"], "Kitchen");
    }
}
