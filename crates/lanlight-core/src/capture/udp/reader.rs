use super::error::UdpError;
use super::layout;

/// View over an IP payload that starts with a UDP header.
pub struct UdpReader<'a> {
    datagram: &'a [u8],
}

impl<'a> UdpReader<'a> {
    pub fn new(datagram: &'a [u8]) -> Self {
        Self { datagram }
    }

    /// Application bytes following the 8-byte UDP header.
    pub fn body(&self) -> Result<&'a [u8], UdpError> {
        self.datagram
            .get(layout::UDP_HEADER_LEN..)
            .ok_or(UdpError::TooShort {
                needed: layout::UDP_HEADER_LEN,
                actual: self.datagram.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::UdpReader;
    use crate::capture::udp::error::UdpError;

    #[test]
    fn body_skips_udp_header() {
        let datagram = [0u8; 44];
        let body = UdpReader::new(&datagram).body().unwrap();
        assert_eq!(body.len(), 36);
    }

    #[test]
    fn body_too_short() {
        let datagram = [0u8; 7];
        let err = UdpReader::new(&datagram).body().unwrap_err();
        assert!(matches!(
            err,
            UdpError::TooShort {
                needed: 8,
                actual: 7
            }
        ));
    }
}
