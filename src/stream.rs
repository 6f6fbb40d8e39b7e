//! Per-datagram stream adapter around the codec.
//!
//! UDP delivers whole messages, so there is no framing to do here: each
//! inbound buffer is decoded exactly once and the result is pushed
//! downstream. Both channels hold a single item, so a producer cannot get
//! ahead of a slow consumer by more than one packet.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::codec::PacketCodec;
use crate::packet::Packet;

/// Drives datagrams through a shared [`PacketCodec`], one at a time.
///
/// Datagrams that fail to decode are logged and dropped; a malformed
/// datagram must not stall the stream.
pub struct PacketStream {
    codec: Arc<PacketCodec>,
    datagrams: mpsc::Receiver<Bytes>,
    decoded: mpsc::Sender<Packet>,
}

impl PacketStream {
    /// Builds the adapter and its endpoints: a sender for raw datagrams and
    /// a receiver for decoded packets.
    pub fn new(codec: Arc<PacketCodec>) -> (mpsc::Sender<Bytes>, mpsc::Receiver<Packet>, Self) {
        let (datagram_tx, datagram_rx) = mpsc::channel(1);
        let (decoded_tx, decoded_rx) = mpsc::channel(1);
        let stream = Self {
            codec,
            datagrams: datagram_rx,
            decoded: decoded_tx,
        };
        (datagram_tx, decoded_rx, stream)
    }

    /// Runs until the producer closes its sender or the consumer drops its
    /// receiver.
    pub async fn run(mut self) {
        while let Some(datagram) = self.datagrams.recv().await {
            match self.codec.decode(&datagram) {
                Ok(packet) => {
                    tracing::debug!(xid = packet.xid(), len = datagram.len(), "decoded packet");
                    if self.decoded.send(packet).await.is_err() {
                        tracing::debug!("packet consumer dropped, stopping stream");
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, len = datagram.len(), "dropping undecodable datagram");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn datagram(xid: u32) -> Bytes {
        let mut data = vec![0u8; 240];
        data[0] = 1;
        data[1] = 1;
        data[2] = 6;
        data[4..8].copy_from_slice(&xid.to_be_bytes());
        Bytes::from(data)
    }

    #[tokio::test]
    async fn decodes_datagrams_in_order() {
        let codec = Arc::new(PacketCodec::new());
        let (datagrams, mut decoded, stream) = PacketStream::new(codec);
        tokio::spawn(stream.run());

        assert_ok!(datagrams.send(datagram(1)).await);
        assert_eq!(decoded.recv().await.unwrap().xid(), Some(1));

        assert_ok!(datagrams.send(datagram(2)).await);
        assert_eq!(decoded.recv().await.unwrap().xid(), Some(2));
    }

    #[tokio::test]
    async fn malformed_datagrams_are_dropped() {
        let codec = Arc::new(PacketCodec::new());
        let (datagrams, mut decoded, stream) = PacketStream::new(codec);
        tokio::spawn(stream.run());

        assert_ok!(datagrams.send(Bytes::from_static(&[0u8; 10])).await);
        assert_ok!(datagrams.send(datagram(7)).await);

        // Only the well-formed datagram comes out.
        assert_eq!(decoded.recv().await.unwrap().xid(), Some(7));
    }

    #[tokio::test]
    async fn stream_ends_when_the_producer_hangs_up() {
        let codec = Arc::new(PacketCodec::new());
        let (datagrams, mut decoded, stream) = PacketStream::new(codec);
        let handle = tokio::spawn(stream.run());

        drop(datagrams);
        assert!(decoded.recv().await.is_none());
        assert_ok!(handle.await);
    }
}
