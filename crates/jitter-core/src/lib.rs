//! # Jitter-Core: Adaptive Jitter Buffer
//!
//! Reorders and paces timestamped packets arriving from a network so that
//! a decoder can pull them at a steady rate. The buffering delay adapts to
//! the observed lateness of packets: it grows when too many arrive after
//! their deadline and shrinks when the network is steadier than the delay
//! assumes.
//!
//! ## Features
//!
//! - **Reordering**: packets are played by timestamp, not arrival order
//! - **Loss signaling**: a missing window is reported so the decoder can
//!   conceal it
//! - **Adaptive delay**: late-rate/latency tradeoff estimated over a
//!   sliding window of arrival timings
//! - **Partial packets**: packets need not line up with the output step
//!
//! ## Usage
//!
//! ```rust
//! use jitter_core::{JitterBuffer, JitterBufferPacket, JitterOutput};
//!
//! let mut jb = JitterBuffer::new(160)?;
//! jb.put(JitterBufferPacket::new(vec![0u8; 38], 160, 160));
//! jb.put(JitterBufferPacket::new(vec![0u8; 38], 0, 160));
//!
//! match jb.get(160)? {
//!     JitterOutput::Packet { packet, .. } => assert_eq!(packet.timestamp, 0),
//!     JitterOutput::Missing { .. } => { /* conceal */ }
//!     JitterOutput::Insertion { .. } => { /* play filler */ }
//! }
//! jb.tick();
//! # Ok::<(), jitter_core::JitterError>(())
//! ```
//!
//! The buffer is single-threaded; callers on different threads must share
//! it behind a lock.

#![deny(missing_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod packet;
pub mod timing;

pub use buffer::{JitterBuffer, JitterBufferStats};
pub use config::JitterBufferConfig;
pub use error::{ErrorCategory, JitterError, Result};
pub use packet::{JitterBufferPacket, JitterOutput};

/// Version information for the jitter buffer library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports() {
        let config = JitterBufferConfig::default();
        let jb = JitterBuffer::with_config(config).unwrap();
        assert_eq!(jb.available_count(), 0);
    }
}
