//! Message-type discriminators and fixed payload layouts.
//!
//! All ranges are relative to the first payload byte (right after the
//! 36-byte header) and little-endian.

use std::ops::Range;

// Device messages.
pub const GET_SERVICE: u16 = 2;
pub const STATE_SERVICE: u16 = 3;
pub const GET_HOST_INFO: u16 = 12;
pub const STATE_HOST_INFO: u16 = 13;
pub const GET_HOST_FIRMWARE: u16 = 14;
pub const STATE_HOST_FIRMWARE: u16 = 15;
pub const GET_WIFI_INFO: u16 = 16;
pub const STATE_WIFI_INFO: u16 = 17;
pub const GET_WIFI_FIRMWARE: u16 = 18;
pub const STATE_WIFI_FIRMWARE: u16 = 19;
pub const GET_POWER: u16 = 20;
pub const SET_POWER: u16 = 21;
pub const STATE_POWER: u16 = 22;
pub const GET_LABEL: u16 = 23;
pub const SET_LABEL: u16 = 24;
pub const STATE_LABEL: u16 = 25;
pub const GET_VERSION: u16 = 32;
pub const STATE_VERSION: u16 = 33;
pub const GET_INFO: u16 = 34;
pub const STATE_INFO: u16 = 35;
pub const GET_LOCATION: u16 = 48;
pub const STATE_LOCATION: u16 = 50;
pub const GET_GROUP: u16 = 51;
pub const STATE_GROUP: u16 = 53;
pub const ECHO_REQUEST: u16 = 58;
pub const ECHO_RESPONSE: u16 = 59;

// Light messages.
pub const LIGHT_GET: u16 = 101;
pub const LIGHT_SET_COLOR: u16 = 102;
pub const LIGHT_STATE: u16 = 107;
pub const LIGHT_GET_POWER: u16 = 116;
pub const LIGHT_SET_POWER: u16 = 117;
pub const LIGHT_STATE_POWER: u16 = 118;

pub const ECHO_PAYLOAD_LEN: usize = 64;
pub const GROUP_ID_LEN: usize = 16;

pub mod set_power {
    use super::Range;

    pub const LEN: usize = 2;
    pub const LEVEL_RANGE: Range<usize> = 0..2;
}

pub mod set_label {
    use super::Range;

    pub const LEN: usize = 32;
    pub const LABEL_RANGE: Range<usize> = 0..32;
}

pub mod echo {
    use super::Range;

    pub const LEN: usize = super::ECHO_PAYLOAD_LEN;
    pub const PAYLOAD_RANGE: Range<usize> = 0..64;
}

pub mod light_set_color {
    use super::Range;

    pub const LEN: usize = 13;
    pub const RESERVED_OFFSET: usize = 0;
    pub const COLOR_RANGE: Range<usize> = 1..9;
    pub const DURATION_RANGE: Range<usize> = 9..13;
}

pub mod light_set_power {
    use super::Range;

    pub const LEN: usize = 6;
    pub const LEVEL_RANGE: Range<usize> = 0..2;
    pub const DURATION_RANGE: Range<usize> = 2..6;
}

pub mod state_service {
    use super::Range;

    pub const LEN: usize = 5;
    pub const SERVICE_OFFSET: usize = 0;
    pub const PORT_RANGE: Range<usize> = 1..5;
}

/// Shared by StateHostInfo and StateWifiInfo.
pub mod radio_info {
    use super::Range;

    pub const LEN: usize = 12;
    pub const SIGNAL_RANGE: Range<usize> = 0..4;
    pub const TX_RANGE: Range<usize> = 4..8;
    pub const RX_RANGE: Range<usize> = 8..12;
}

/// Shared by StateHostFirmware and StateWifiFirmware.
pub mod firmware {
    use super::Range;

    pub const LEN: usize = 12;
    pub const BUILD_RANGE: Range<usize> = 0..8;
    pub const VERSION_RANGE: Range<usize> = 8..12;
}

pub mod state_power {
    pub const LEN: usize = 2;
}

pub mod state_label {
    pub const LEN: usize = 32;
}

pub mod state_version {
    use super::Range;

    pub const LEN: usize = 12;
    pub const VENDOR_RANGE: Range<usize> = 0..4;
    pub const PRODUCT_RANGE: Range<usize> = 4..8;
    pub const VERSION_RANGE: Range<usize> = 8..12;
}

pub mod state_info {
    use super::Range;

    pub const LEN: usize = 24;
    pub const TIME_RANGE: Range<usize> = 0..8;
    pub const UPTIME_RANGE: Range<usize> = 8..16;
    pub const DOWNTIME_RANGE: Range<usize> = 16..24;
}

/// Shared by StateLocation and StateGroup.
pub mod membership {
    use super::Range;

    pub const LEN: usize = 56;
    pub const ID_RANGE: Range<usize> = 0..16;
    pub const LABEL_RANGE: Range<usize> = 16..48;
    pub const UPDATED_AT_RANGE: Range<usize> = 48..56;
}

pub mod light_state {
    use super::Range;

    pub const LEN: usize = 44;
    pub const COLOR_RANGE: Range<usize> = 0..8;
    /// Reserved by the protocol; always zero on the wire.
    pub const RESERVED_RANGE: Range<usize> = 8..10;
    pub const POWER_RANGE: Range<usize> = 10..12;
    pub const LABEL_RANGE: Range<usize> = 12..44;
}

pub mod light_state_power {
    pub const LEN: usize = 2;
}
