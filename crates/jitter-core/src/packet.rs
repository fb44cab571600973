//! Packets handed to and returned by the jitter buffer

use bytes::Bytes;

/// One timestamped unit of payload
///
/// `timestamp` and `span` are in the caller's clock units (usually samples)
/// and wrap around like RTP timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JitterBufferPacket {
    /// Encoded payload
    pub data: Bytes,
    /// Start of the packet
    pub timestamp: u32,
    /// Duration covered by the packet
    pub span: u32,
    /// Sequence number, carried through untouched
    pub sequence: u16,
    /// Opaque caller tag, carried through untouched
    pub user_data: u32,
}

impl JitterBufferPacket {
    /// Packet covering `[timestamp, timestamp + span)`
    pub fn new(data: impl Into<Bytes>, timestamp: u32, span: u32) -> Self {
        Self {
            data: data.into(),
            timestamp,
            span,
            sequence: 0,
            user_data: 0,
        }
    }

    /// Set the sequence number
    pub fn with_sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the caller tag
    pub fn with_user_data(mut self, user_data: u32) -> Self {
        self.user_data = user_data;
        self
    }

    /// Timestamp just past the end of the packet
    pub fn end(&self) -> u32 {
        self.timestamp.wrapping_add(self.span)
    }
}

/// Outcome of [`JitterBuffer::get`](crate::JitterBuffer::get)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JitterOutput {
    /// A buffered packet; `start_offset` is how far its start lies past the
    /// playout pointer at the time of the call
    Packet {
        /// The packet, moved out of the buffer
        packet: JitterBufferPacket,
        /// Packet start minus the playout pointer
        start_offset: i32,
    },
    /// Nothing covers the window; the decoder should conceal `span`
    Missing {
        /// Start of the concealed window
        timestamp: u32,
        /// Length to conceal
        span: u32,
    },
    /// The buffer needs to grow; the caller should synthesize `span` of
    /// filler while the playout pointer stays put
    Insertion {
        /// Position of the filler
        timestamp: u32,
        /// Length of filler to produce
        span: u32,
    },
}

impl JitterOutput {
    /// Integer status: 0 for a packet, 1 for a missing window, 2 for an
    /// insertion
    pub fn code(&self) -> i32 {
        match self {
            Self::Packet { .. } => 0,
            Self::Missing { .. } => 1,
            Self::Insertion { .. } => 2,
        }
    }

    /// The packet, if one was returned
    pub fn packet(&self) -> Option<&JitterBufferPacket> {
        match self {
            Self::Packet { packet, .. } => Some(packet),
            _ => None,
        }
    }

    /// Consume the outcome, keeping only a returned packet
    pub fn into_packet(self) -> Option<JitterBufferPacket> {
        match self {
            Self::Packet { packet, .. } => Some(packet),
            _ => None,
        }
    }

    /// Timestamp the outcome refers to
    pub fn timestamp(&self) -> u32 {
        match self {
            Self::Packet { packet, .. } => packet.timestamp,
            Self::Missing { timestamp, .. } | Self::Insertion { timestamp, .. } => *timestamp,
        }
    }

    /// Span the outcome covers
    pub fn span(&self) -> u32 {
        match self {
            Self::Packet { packet, .. } => packet.span,
            Self::Missing { span, .. } | Self::Insertion { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_builder() {
        let packet = JitterBufferPacket::new(vec![1u8, 2, 3], u32::MAX - 10, 160)
            .with_sequence(7)
            .with_user_data(42);
        assert_eq!(packet.sequence, 7);
        assert_eq!(packet.user_data, 42);
        assert_eq!(packet.end(), 149);
        assert_eq!(packet.data.len(), 3);
    }

    #[test]
    fn test_output_accessors() {
        let packet = JitterBufferPacket::new(Bytes::from_static(b"x"), 320, 160);
        let out = JitterOutput::Packet {
            packet: packet.clone(),
            start_offset: 0,
        };
        assert_eq!(out.code(), 0);
        assert_eq!(out.timestamp(), 320);
        assert_eq!(out.packet(), Some(&packet));

        let missing = JitterOutput::Missing {
            timestamp: 480,
            span: 160,
        };
        assert_eq!(missing.code(), 1);
        assert_eq!(missing.span(), 160);
        assert!(missing.into_packet().is_none());
        assert_eq!(
            JitterOutput::Insertion {
                timestamp: 0,
                span: 20
            }
            .code(),
            2
        );
    }
}
