use std::sync::Arc;

use bootwire::config::{Args, MonitorConfig};
use bootwire::{network, BootwireError, PacketCodec, PacketStream};
use bytes::Bytes;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BootwireError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = MonitorConfig::from(args);

    let socket = network::new_tokio_monitor_socket(config.interface.as_deref(), config.port)?;
    tracing::info!(
        port = config.port,
        interface = config.interface.as_deref(),
        "listening for BOOTP/DHCP datagrams"
    );

    let codec = Arc::new(PacketCodec::new());
    let (datagrams, mut decoded, stream) = PacketStream::new(codec);
    tokio::spawn(stream.run());

    tokio::spawn(async move {
        while let Some(packet) = decoded.recv().await {
            tracing::info!(
                op = packet.op(),
                xid = packet.xid(),
                chaddr = packet.chaddr(),
                options = packet.options().len(),
                "packet"
            );
        }
    });

    let mut buf = vec![0u8; config.recv_buffer_size];
    loop {
        let (len, peer) = socket.recv_from(&mut buf).await?;
        tracing::debug!(%peer, len, "datagram received");
        if datagrams
            .send(Bytes::copy_from_slice(&buf[..len]))
            .await
            .is_err()
        {
            break;
        }
    }
    Ok(())
}
