use std::fs;
use std::path::{Path, PathBuf};

use lanlight_core::protocols::message::{
    EchoRequest, LightSetColor, LightState, MessageError, SERVICE_UDP, SetLabel, SetPower,
    StateService, layout,
};
use lanlight_core::{
    Color, Header, LAN_PORT, Label, PowerLevel, Request, Response, encode_envelope,
    encode_request_envelope,
};

const ETHERTYPE_IPV4: u16 = 0x0800;
const UDP_PROTO: u8 = 17;
const MDNS_PORT: u16 = 5353;

const CLIENT_IP: [u8; 4] = [192, 168, 1, 10];
const CLIENT_PORT: u16 = 50000;
const CLIENT_SOURCE: u32 = 0x0000_2a2a;
const BROADCAST_IP: [u8; 4] = [192, 168, 1, 255];
const DEVICE_A_IP: [u8; 4] = [192, 168, 1, 20];
const DEVICE_B_IP: [u8; 4] = [192, 168, 1, 21];
const DEVICE_A: u64 = 0x0000_d073_d500_0001;
const DEVICE_B: u64 = 0x0000_d073_d500_0002;
const MDNS_IP: [u8; 4] = [192, 168, 1, 30];
const MDNS_GROUP: [u8; 4] = [224, 0, 0, 251];

/// 2023-11-14T22:13:20Z in microseconds.
const BASE_TS_US: u64 = 1_700_000_000_000_000;
const SECOND_US: u64 = 1_000_000;

/// Offset of the kelvin field inside a framed LightSetColor.
const SET_COLOR_KELVIN_OFFSET: usize = 36 + 1 + 6;

struct Datagram {
    src: ([u8; 4], u16),
    dst: ([u8; 4], u16),
    ts_us: u64,
    payload: Vec<u8>,
}

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_capture(&root.join("discovery").join("input.pcapng"), &discovery()?)?;
    write_capture(
        &root.join("light_control").join("input.pcapng"),
        &light_control()?,
    )?;
    Ok(())
}

fn discovery() -> Result<Vec<Datagram>, String> {
    let mut first = Header::new(layout::GET_SERVICE, CLIENT_SOURCE, None);
    first.sequence = 1;
    let mut second = first;
    second.sequence = 2;

    let service = Response::StateService(StateService {
        service: SERVICE_UDP,
        port: LAN_PORT as u32,
    });
    let reply_a = Header::reply_to(&first, layout::STATE_SERVICE, DEVICE_A);
    let reply_b = Header::reply_to(&first, layout::STATE_SERVICE, DEVICE_B);

    Ok(vec![
        to_broadcast(0, request(&first, None)?),
        from_device(DEVICE_A_IP, SECOND_US, response(&reply_a, &service)?),
        from_device(DEVICE_B_IP, SECOND_US, response(&reply_b, &service)?),
        Datagram {
            src: (MDNS_IP, MDNS_PORT),
            dst: (MDNS_GROUP, MDNS_PORT),
            ts_us: 2 * SECOND_US,
            payload: vec![0u8; 12],
        },
        to_broadcast(2 * SECOND_US, request(&second, None)?),
    ])
}

fn light_control() -> Result<Vec<Datagram>, String> {
    let color = Color {
        hue: 21845,
        saturation: 65535,
        brightness: 32768,
        kelvin: 3500,
    };
    let unicast = |message_type: u16, sequence: u8| {
        let mut header = Header::new(message_type, CLIENT_SOURCE, Some(DEVICE_A));
        header.sequence = sequence;
        header
    };
    let set_power = Request::SetPower(SetPower {
        level: PowerLevel::ENABLED,
    });
    let set_color = Request::LightSetColor(LightSetColor {
        color,
        duration: 1000,
    });
    let mut echo = [0u8; layout::ECHO_PAYLOAD_LEN];
    for (idx, byte) in echo.iter_mut().enumerate() {
        *byte = idx as u8;
    }
    let get_label = unicast(layout::GET_LABEL, 4);
    let state = Response::LightState(LightState {
        color,
        power: PowerLevel::ENABLED,
        label: Label::new("Kitchen"),
    });

    let mut truncated = request(&unicast(layout::SET_POWER, 6), Some(&set_power))?;
    truncated.truncate(truncated.len() - 1);

    let mut foreign = unicast(layout::GET_SERVICE, 8);
    foreign.protocol = 0;

    let mut cold = request(&unicast(layout::LIGHT_SET_COLOR, 9), Some(&set_color))?;
    cold[SET_COLOR_KELVIN_OFFSET..SET_COLOR_KELVIN_OFFSET + 2]
        .copy_from_slice(&1000u16.to_le_bytes());

    let payloads = [
        request(&unicast(layout::SET_POWER, 0), Some(&set_power))?,
        request(&unicast(layout::LIGHT_SET_COLOR, 1), Some(&set_color))?,
        request(
            &unicast(layout::SET_LABEL, 2),
            Some(&Request::SetLabel(SetLabel {
                label: Label::new("Kitchen"),
            })),
        )?,
        request(
            &unicast(layout::ECHO_REQUEST, 3),
            Some(&Request::EchoRequest(EchoRequest { payload: echo })),
        )?,
        request(&get_label, None)?,
    ];

    let mut datagrams: Vec<Datagram> = payloads
        .into_iter()
        .enumerate()
        .map(|(idx, payload)| to_device(idx as u64 * SECOND_US, payload))
        .collect();
    datagrams.push(from_device(
        DEVICE_A_IP,
        5 * SECOND_US,
        response(&Header::reply_to(&get_label, layout::LIGHT_STATE, DEVICE_A), &state)?,
    ));
    datagrams.push(to_device(6 * SECOND_US, truncated));
    datagrams.push(to_device(
        7 * SECOND_US,
        request(&unicast(0x7777, 7), None)?,
    ));
    datagrams.push(to_device(8 * SECOND_US, request(&foreign, None)?));
    datagrams.push(to_device(16 * SECOND_US, cold));
    Ok(datagrams)
}

fn request(header: &Header, body: Option<&Request>) -> Result<Vec<u8>, String> {
    encode_request_envelope(header, body).map_err(describe)
}

fn response(header: &Header, body: &Response) -> Result<Vec<u8>, String> {
    encode_envelope(header, body).map_err(describe)
}

fn describe(err: MessageError) -> String {
    format!("failed to encode fixture frame: {err}")
}

fn to_broadcast(ts_us: u64, payload: Vec<u8>) -> Datagram {
    Datagram {
        src: (CLIENT_IP, CLIENT_PORT),
        dst: (BROADCAST_IP, LAN_PORT),
        ts_us,
        payload,
    }
}

fn to_device(ts_us: u64, payload: Vec<u8>) -> Datagram {
    Datagram {
        src: (CLIENT_IP, CLIENT_PORT),
        dst: (DEVICE_A_IP, LAN_PORT),
        ts_us,
        payload,
    }
}

fn from_device(ip: [u8; 4], ts_us: u64, payload: Vec<u8>) -> Datagram {
    Datagram {
        src: (ip, LAN_PORT),
        dst: (CLIENT_IP, CLIENT_PORT),
        ts_us,
        payload,
    }
}

fn write_capture(path: &Path, datagrams: &[Datagram]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }

    let packets: Vec<(u64, Vec<u8>)> = datagrams
        .iter()
        .map(|datagram| (BASE_TS_US + datagram.ts_us, build_ipv4_udp_frame(datagram)))
        .collect();
    write_pcapng(path, &packets)
}

fn build_ipv4_udp_frame(datagram: &Datagram) -> Vec<u8> {
    let (src_ip, src_port) = datagram.src;
    let (dst_ip, dst_port) = datagram.dst;
    let payload = &datagram.payload;

    let mut packet = Vec::new();
    packet.extend_from_slice(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    packet.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, src_ip[3]]);
    packet.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());

    let total_len = 20u16 + 8u16 + (payload.len() as u16);
    let mut ip_header = [0u8; 20];
    ip_header[0] = 0x45;
    ip_header[2..4].copy_from_slice(&total_len.to_be_bytes());
    ip_header[8] = 64;
    ip_header[9] = UDP_PROTO;
    ip_header[12..16].copy_from_slice(&src_ip);
    ip_header[16..20].copy_from_slice(&dst_ip);
    let checksum = ipv4_checksum(&ip_header);
    ip_header[10..12].copy_from_slice(&checksum.to_be_bytes());
    packet.extend_from_slice(&ip_header);

    let udp_len = 8u16 + (payload.len() as u16);
    packet.extend_from_slice(&src_port.to_be_bytes());
    packet.extend_from_slice(&dst_port.to_be_bytes());
    packet.extend_from_slice(&udp_len.to_be_bytes());
    packet.extend_from_slice(&0u16.to_be_bytes());

    packet.extend_from_slice(payload);
    packet
}

fn ipv4_checksum(header: &[u8; 20]) -> u16 {
    let mut sum = 0u32;
    for chunk in header.chunks(2) {
        sum = sum.wrapping_add(u16::from_be_bytes([chunk[0], chunk[1]]) as u32);
    }
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

fn write_pcapng(path: &Path, packets: &[(u64, Vec<u8>)]) -> Result<(), String> {
    let mut output = Vec::new();
    output.extend_from_slice(&pcapng_block(0x0A0D0D0A, &section_header_body()));
    output.extend_from_slice(&pcapng_block(1, &interface_desc_body()));

    for (ts_us, data) in packets {
        output.extend_from_slice(&pcapng_block(6, &enhanced_packet_body(*ts_us, data)));
    }

    fs::write(path, output)
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

fn pcapng_block(block_type: u32, body: &[u8]) -> Vec<u8> {
    let total_len = (8 + body.len() + 4) as u32;
    let mut block = Vec::with_capacity(total_len as usize);
    block.extend_from_slice(&block_type.to_be_bytes());
    block.extend_from_slice(&total_len.to_be_bytes());
    block.extend_from_slice(body);
    block.extend_from_slice(&total_len.to_be_bytes());
    block
}

fn section_header_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0x1A2B3C4Du32.to_be_bytes());
    body.extend_from_slice(&1u16.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&(-1i64).to_be_bytes());
    body
}

fn interface_desc_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&1u16.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&65535u32.to_be_bytes());
    body
}

fn enhanced_packet_body(ts_us: u64, data: &[u8]) -> Vec<u8> {
    let ts_high = (ts_us >> 32) as u32;
    let ts_low = (ts_us & 0xFFFF_FFFF) as u32;
    let cap_len = data.len() as u32;
    let mut body = Vec::new();
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&ts_high.to_be_bytes());
    body.extend_from_slice(&ts_low.to_be_bytes());
    body.extend_from_slice(&cap_len.to_be_bytes());
    body.extend_from_slice(&cap_len.to_be_bytes());
    body.extend_from_slice(data);
    let pad_len = (4 - (data.len() % 4)) % 4;
    body.extend(std::iter::repeat_n(0u8, pad_len));
    body
}
