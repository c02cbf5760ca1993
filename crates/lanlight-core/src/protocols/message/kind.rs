use serde::{Deserialize, Serialize};

use super::error::MessageError;
use super::layout;

/// Request messages that carry a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    SetPower,
    SetLabel,
    EchoRequest,
    LightSetColor,
    LightSetPower,
}

impl RequestKind {
    pub const ALL: [RequestKind; 5] = [
        RequestKind::SetPower,
        RequestKind::SetLabel,
        RequestKind::EchoRequest,
        RequestKind::LightSetColor,
        RequestKind::LightSetPower,
    ];

    pub const fn message_type(self) -> u16 {
        match self {
            RequestKind::SetPower => layout::SET_POWER,
            RequestKind::SetLabel => layout::SET_LABEL,
            RequestKind::EchoRequest => layout::ECHO_REQUEST,
            RequestKind::LightSetColor => layout::LIGHT_SET_COLOR,
            RequestKind::LightSetPower => layout::LIGHT_SET_POWER,
        }
    }

    pub const fn payload_len(self) -> usize {
        match self {
            RequestKind::SetPower => layout::set_power::LEN,
            RequestKind::SetLabel => layout::set_label::LEN,
            RequestKind::EchoRequest => layout::echo::LEN,
            RequestKind::LightSetColor => layout::light_set_color::LEN,
            RequestKind::LightSetPower => layout::light_set_power::LEN,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RequestKind::SetPower => "SetPower",
            RequestKind::SetLabel => "SetLabel",
            RequestKind::EchoRequest => "EchoRequest",
            RequestKind::LightSetColor => "LightSetColor",
            RequestKind::LightSetPower => "LightSetPower",
        }
    }
}

/// Outcome of looking up a request discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Query message with no body.
    Empty,
    Payload(RequestKind),
}

/// Every request discriminator understood by the decoder.
pub const REQUEST_DISPATCH: [(u16, Dispatch); 18] = [
    (layout::GET_SERVICE, Dispatch::Empty),
    (layout::GET_HOST_INFO, Dispatch::Empty),
    (layout::GET_HOST_FIRMWARE, Dispatch::Empty),
    (layout::GET_WIFI_INFO, Dispatch::Empty),
    (layout::GET_WIFI_FIRMWARE, Dispatch::Empty),
    (layout::GET_POWER, Dispatch::Empty),
    (layout::SET_POWER, Dispatch::Payload(RequestKind::SetPower)),
    (layout::GET_LABEL, Dispatch::Empty),
    (layout::SET_LABEL, Dispatch::Payload(RequestKind::SetLabel)),
    (layout::GET_VERSION, Dispatch::Empty),
    (layout::GET_INFO, Dispatch::Empty),
    (layout::GET_LOCATION, Dispatch::Empty),
    (layout::GET_GROUP, Dispatch::Empty),
    (layout::ECHO_REQUEST, Dispatch::Payload(RequestKind::EchoRequest)),
    (layout::LIGHT_GET, Dispatch::Empty),
    (layout::LIGHT_SET_COLOR, Dispatch::Payload(RequestKind::LightSetColor)),
    (layout::LIGHT_GET_POWER, Dispatch::Empty),
    (layout::LIGHT_SET_POWER, Dispatch::Payload(RequestKind::LightSetPower)),
];

/// Map a request discriminator to its body kind.
///
/// `Ok(None)` is a valid query with no body; a code outside the request set
/// is a hard error rather than a skip.
///
/// # Examples
/// ```
/// use lanlight_core::protocols::message::{RequestKind, resolve};
///
/// assert_eq!(resolve(21).unwrap(), Some(RequestKind::SetPower));
/// assert_eq!(resolve(12).unwrap(), None);
/// assert!(resolve(0xFFFF).is_err());
/// ```
pub fn resolve(code: u16) -> Result<Option<RequestKind>, MessageError> {
    match REQUEST_DISPATCH.iter().find(|(known, _)| *known == code) {
        Some((_, Dispatch::Payload(kind))) => Ok(Some(*kind)),
        Some((_, Dispatch::Empty)) => Ok(None),
        None => Err(MessageError::UnsupportedType { code }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Request,
    Response,
}

/// Name and direction of every discriminator this crate knows about.
pub const MESSAGE_TYPES: [(u16, &str, Direction); 32] = [
    (layout::GET_SERVICE, "GetService", Direction::Request),
    (layout::STATE_SERVICE, "StateService", Direction::Response),
    (layout::GET_HOST_INFO, "GetHostInfo", Direction::Request),
    (layout::STATE_HOST_INFO, "StateHostInfo", Direction::Response),
    (layout::GET_HOST_FIRMWARE, "GetHostFirmware", Direction::Request),
    (layout::STATE_HOST_FIRMWARE, "StateHostFirmware", Direction::Response),
    (layout::GET_WIFI_INFO, "GetWifiInfo", Direction::Request),
    (layout::STATE_WIFI_INFO, "StateWifiInfo", Direction::Response),
    (layout::GET_WIFI_FIRMWARE, "GetWifiFirmware", Direction::Request),
    (layout::STATE_WIFI_FIRMWARE, "StateWifiFirmware", Direction::Response),
    (layout::GET_POWER, "GetPower", Direction::Request),
    (layout::SET_POWER, "SetPower", Direction::Request),
    (layout::STATE_POWER, "StatePower", Direction::Response),
    (layout::GET_LABEL, "GetLabel", Direction::Request),
    (layout::SET_LABEL, "SetLabel", Direction::Request),
    (layout::STATE_LABEL, "StateLabel", Direction::Response),
    (layout::GET_VERSION, "GetVersion", Direction::Request),
    (layout::STATE_VERSION, "StateVersion", Direction::Response),
    (layout::GET_INFO, "GetInfo", Direction::Request),
    (layout::STATE_INFO, "StateInfo", Direction::Response),
    (layout::GET_LOCATION, "GetLocation", Direction::Request),
    (layout::STATE_LOCATION, "StateLocation", Direction::Response),
    (layout::GET_GROUP, "GetGroup", Direction::Request),
    (layout::STATE_GROUP, "StateGroup", Direction::Response),
    (layout::ECHO_REQUEST, "EchoRequest", Direction::Request),
    (layout::ECHO_RESPONSE, "EchoResponse", Direction::Response),
    (layout::LIGHT_GET, "LightGet", Direction::Request),
    (layout::LIGHT_SET_COLOR, "LightSetColor", Direction::Request),
    (layout::LIGHT_STATE, "LightState", Direction::Response),
    (layout::LIGHT_GET_POWER, "LightGetPower", Direction::Request),
    (layout::LIGHT_SET_POWER, "LightSetPower", Direction::Request),
    (layout::LIGHT_STATE_POWER, "LightStatePower", Direction::Response),
];

pub fn message_name(code: u16) -> Option<&'static str> {
    MESSAGE_TYPES
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|(_, name, _)| *name)
}

pub fn message_direction(code: u16) -> Option<Direction> {
    MESSAGE_TYPES
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|(_, _, direction)| *direction)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn resolve_reads_queries_and_bodies() {
        assert_eq!(resolve(layout::GET_GROUP).unwrap(), None);
        assert_eq!(resolve(layout::LIGHT_GET_POWER).unwrap(), None);
        assert_eq!(
            resolve(layout::LIGHT_SET_POWER).unwrap(),
            Some(RequestKind::LightSetPower)
        );
        assert_eq!(
            resolve(layout::STATE_SERVICE).unwrap_err(),
            MessageError::UnsupportedType {
                code: layout::STATE_SERVICE
            }
        );
    }

    #[test]
    fn dispatch_table_is_unique_and_complete() {
        let codes: HashSet<u16> = REQUEST_DISPATCH.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes.len(), REQUEST_DISPATCH.len());

        let empty = REQUEST_DISPATCH
            .iter()
            .filter(|(_, dispatch)| *dispatch == Dispatch::Empty)
            .count();
        assert_eq!(empty, 13);

        for kind in RequestKind::ALL {
            let entries = REQUEST_DISPATCH
                .iter()
                .filter(|(_, dispatch)| *dispatch == Dispatch::Payload(kind))
                .collect::<Vec<_>>();
            assert_eq!(entries.len(), 1, "{kind:?}");
            assert_eq!(entries[0].0, kind.message_type());
        }
    }

    #[test]
    fn every_other_code_is_unsupported() {
        let known: HashSet<u16> = REQUEST_DISPATCH.iter().map(|(code, _)| *code).collect();
        for code in 0..=u16::MAX {
            if known.contains(&code) {
                continue;
            }
            assert_eq!(
                resolve(code).unwrap_err(),
                MessageError::UnsupportedType { code }
            );
        }
    }

    #[test]
    fn responses_are_not_decodable_requests() {
        for (code, _, direction) in MESSAGE_TYPES {
            let resolved = resolve(code);
            match direction {
                Direction::Request => assert!(resolved.is_ok(), "{code}"),
                Direction::Response => assert!(resolved.is_err(), "{code}"),
            }
        }
    }

    #[test]
    fn registry_names_are_unique() {
        let names: HashSet<&str> = MESSAGE_TYPES.iter().map(|(_, name, _)| *name).collect();
        assert_eq!(names.len(), MESSAGE_TYPES.len());
        assert_eq!(message_name(117), Some("LightSetPower"));
        assert_eq!(message_direction(107), Some(Direction::Response));
        assert_eq!(message_name(0xFFFF), None);
    }

    #[test]
    fn kind_names_match_registry() {
        for kind in RequestKind::ALL {
            assert_eq!(message_name(kind.message_type()), Some(kind.name()));
        }
    }
}
