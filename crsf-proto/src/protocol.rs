//! CRSF wire constants.
//!
//! Frame layout: `[address][length][type][payload...][crc]`, where `length`
//! counts every byte after itself (type + payload + crc).

/// CRSF baud rate for ExpressLRS receivers.
pub const CRSF_BAUDRATE: u32 = 420_000;

/// Largest frame the protocol allows, address and length bytes included.
pub const CRSF_MAX_FRAME_SIZE: usize = 64;

/// Number of RC channels in a packed channels frame.
pub const CRSF_NUM_CHANNELS: usize = 16;

/// Offset of the length byte within a frame.
pub const LENGTH_OFFSET: usize = 1;

/// Offset of the frame type byte within a frame.
pub const TYPE_OFFSET: usize = 2;

/// Offset of the first payload byte within a frame.
pub const PAYLOAD_OFFSET: usize = 3;

/// Device addresses (first byte of every frame).
pub mod address {
    pub const BROADCAST: u8 = 0x00;
    pub const USB: u8 = 0x10;
    pub const TBS_CORE_PNP_PRO: u8 = 0x80;
    pub const CURRENT_SENSOR: u8 = 0xC0;
    pub const GPS: u8 = 0xC2;
    pub const TBS_BLACKBOX: u8 = 0xC4;
    /// Receivers address RC channel frames to the flight controller.
    pub const FLIGHT_CONTROLLER: u8 = 0xC8;
    pub const RACE_TAG: u8 = 0xCC;
    pub const RADIO_TRANSMITTER: u8 = 0xEA;
    pub const CRSF_RECEIVER: u8 = 0xEC;
    pub const CRSF_TRANSMITTER: u8 = 0xEE;
}

/// Frame types (third byte of every frame).
pub mod frame_type {
    pub const GPS: u8 = 0x02;
    pub const BATTERY_SENSOR: u8 = 0x08;
    pub const OPENTX_SYNC: u8 = 0x10;
    pub const LINK_STATISTICS: u8 = 0x14;
    pub const RC_CHANNELS_PACKED: u8 = 0x16;
    pub const ATTITUDE: u8 = 0x1E;
    pub const FLIGHT_MODE: u8 = 0x21;
    pub const DEVICE_PING: u8 = 0x28;
    pub const DEVICE_INFO: u8 = 0x29;
    pub const PARAMETER_SETTINGS_ENTRY: u8 = 0x2B;
    pub const PARAMETER_READ: u8 = 0x2C;
    pub const PARAMETER_WRITE: u8 = 0x2D;
    pub const COMMAND: u8 = 0x32;
    pub const RADIO_ID: u8 = 0x3A;
    pub const MSP_REQ: u8 = 0x7A;
    pub const MSP_RESP: u8 = 0x7B;
    pub const MSP_WRITE: u8 = 0x7C;
}
