use std::fs;

use anyhow::Context;
use serde::Serialize;

use lanlight_core::protocols::message::{Direction, message_direction, message_name};
use lanlight_core::{
    Envelope, Header, MessageError, Request, Response, decode_envelope, encode_envelope,
    encode_request_envelope,
};

use crate::error::CliError;
use crate::{EncodeArgs, to_json};

const MAC_LEN: usize = 6;

/// Decoded frame as printed by `lanlight decode`.
#[derive(Debug, Serialize)]
struct DecodedFrame<'a> {
    name: &'static str,
    #[serde(flatten)]
    envelope: &'a Envelope,
}

pub fn cmd_decode(frame: &str, pretty: bool) -> Result<(), CliError> {
    let bytes = parse_hex(frame)?;
    let envelope = decode_envelope(&bytes).map_err(describe_decode_error)?;
    let json = to_json(
        &DecodedFrame {
            name: envelope.message_name(),
            envelope: &envelope,
        },
        pretty,
    )?;
    println!("{json}");
    Ok(())
}

pub fn cmd_encode(args: &EncodeArgs) -> Result<(), CliError> {
    let json = read_payload_arg(&args.payload)?;
    let target = args.target.as_deref().map(parse_mac).transpose()?;
    let mut header = Header::new(0, args.source, target);
    header.sequence = args.sequence;

    let (payload, frame) = if args.request {
        let request: Request = parse_json(&json, "request")?;
        let frame = encode_request_envelope(&header, Some(&request));
        (request.encode(), frame)
    } else {
        let response: Response = parse_json(&json, "response")?;
        (response.encode(), encode_envelope(&header, &response))
    };

    let bytes = if args.payload_only { payload } else { frame };
    let bytes = bytes.map_err(|err| {
        CliError::with_hint(
            format!("encoding failed: {err}"),
            "check field ranges (kelvin must be 2500..=9000)",
        )
    })?;
    println!("{}", hex::encode(bytes));
    Ok(())
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, CliError> {
    serde_json::from_str(json).map_err(|err| {
        CliError::with_hint(
            format!("invalid {what} JSON: {err}"),
            format!("expected an object tagged with \"type\", e.g. {}", example_for(what)),
        )
    })
}

fn example_for(what: &str) -> &'static str {
    if what == "request" {
        r#"{"type":"set_power","level":65535}"#
    } else {
        r#"{"type":"state_power","level":65535}"#
    }
}

fn read_payload_arg(arg: &str) -> Result<String, CliError> {
    match arg.strip_prefix('@') {
        Some(path) => Ok(fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {path}"))?),
        None => Ok(arg.to_string()),
    }
}

fn parse_hex(input: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&digits).map_err(|err| {
        CliError::with_hint(
            format!("invalid hex frame: {err}"),
            "pass the datagram as hex digits, e.g. 240000340000...",
        )
    })
}

/// Parse a MAC in wire order into the header's little-endian target field.
fn parse_mac(input: &str) -> Result<u64, CliError> {
    let digits: String = input.chars().filter(|c| *c != ':' && *c != '-').collect();
    let bytes = hex::decode(&digits)
        .ok()
        .filter(|bytes| bytes.len() == MAC_LEN)
        .ok_or_else(|| {
            CliError::with_hint(
                format!("invalid target MAC '{input}'"),
                "use six hex bytes, e.g. d0:73:d5:00:00:01",
            )
        })?;
    let mut raw = [0u8; 8];
    raw[..MAC_LEN].copy_from_slice(&bytes);
    Ok(u64::from_le_bytes(raw))
}

fn describe_decode_error(err: MessageError) -> CliError {
    let hint = match &err {
        MessageError::UnsupportedType { code } => match message_direction(*code) {
            Some(Direction::Response) => Some(format!(
                "type {code} is the {} response; only requests decode",
                message_name(*code).unwrap_or("unknown")
            )),
            _ => Some("the message type is not part of the request set".to_string()),
        },
        MessageError::Header(_) => Some("frames start with a 36-byte header".to_string()),
        _ => None,
    };
    CliError::new(format!("decode failed: {err}"), hint)
}
