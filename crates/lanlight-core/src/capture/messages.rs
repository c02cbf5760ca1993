use std::collections::BTreeMap;

use crate::protocols::header::HeaderError;
use crate::protocols::message::{Direction, MessageError, message_direction, message_name};
use crate::{Issue, MessageSummary};

/// Upper bound on example contexts kept per issue.
pub(crate) const MAX_ISSUE_EXAMPLES: usize = 3;

pub(crate) const ISSUE_HEADER: &str = "LAN-HEADER";
pub(crate) const ISSUE_TOO_SHORT: &str = "LAN-TOO-SHORT";
pub(crate) const ISSUE_UNSUPPORTED_TYPE: &str = "LAN-UNSUPPORTED-TYPE";
pub(crate) const ISSUE_SCALAR: &str = "LAN-SCALAR";

#[derive(Debug, Default)]
pub(crate) struct MessageTally {
    counts: BTreeMap<u16, u64>,
}

impl MessageTally {
    pub(crate) fn add(&mut self, type_code: u16) {
        *self.counts.entry(type_code).or_default() += 1;
    }

    pub(crate) fn into_summaries(self) -> Vec<MessageSummary> {
        self.counts
            .into_iter()
            .filter_map(|(type_code, count)| {
                Some(MessageSummary {
                    type_code,
                    name: message_name(type_code)?.to_string(),
                    direction: message_direction(type_code)?,
                    count,
                })
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct IssueStats {
    count: u64,
    examples: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct IssueTally {
    issues: BTreeMap<&'static str, IssueStats>,
}

impl IssueTally {
    pub(crate) fn add(&mut self, err: &MessageError, context: String) {
        let id = issue_id(err);
        log::warn!("{id}: {err} ({context})");
        let entry = self.issues.entry(id).or_default();
        entry.count += 1;
        if entry.examples.len() < MAX_ISSUE_EXAMPLES {
            entry.examples.push(context);
        }
    }

    pub(crate) fn into_issues(self) -> Vec<Issue> {
        self.issues
            .into_iter()
            .map(|(id, stats)| Issue {
                id: id.to_string(),
                message: issue_message(id).to_string(),
                count: stats.count,
                examples: stats.examples,
            })
            .collect()
    }
}

/// Outcome of looking at one LAN datagram body.
pub(crate) fn classify(payload: &[u8]) -> Result<u16, MessageError> {
    let header = crate::protocols::header::parse_header(payload)?;
    match message_direction(header.message_type) {
        Some(Direction::Response) => Ok(header.message_type),
        Some(Direction::Request) => {
            let envelope = crate::protocols::message::decode_envelope(payload)?;
            Ok(envelope.message_type())
        }
        None => Err(MessageError::UnsupportedType {
            code: header.message_type,
        }),
    }
}

fn issue_id(err: &MessageError) -> &'static str {
    match err {
        MessageError::Header(HeaderError::TooShort { .. }) => ISSUE_TOO_SHORT,
        MessageError::Header(HeaderError::InvalidProtocol { .. }) => ISSUE_HEADER,
        MessageError::TruncatedBuffer { .. } => ISSUE_TOO_SHORT,
        MessageError::UnsupportedType { .. } => ISSUE_UNSUPPORTED_TYPE,
        MessageError::MalformedScalar(_) => ISSUE_SCALAR,
    }
}

fn issue_message(id: &str) -> &'static str {
    match id {
        ISSUE_HEADER => "Header protocol number is not 1024",
        ISSUE_TOO_SHORT => "Datagram shorter than its header or fixed payload length",
        ISSUE_UNSUPPORTED_TYPE => "Message type is not a known request or response",
        _ => "Payload field failed to decode",
    }
}
