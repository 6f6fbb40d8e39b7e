use std::net::{Ipv4Addr, SocketAddr, UdpSocket as StdUdpSocket};
use std::io;

use socket2::{Domain, Socket, Type};
use thiserror::Error;
use tokio::net::UdpSocket as TokioUdpSocket;

/// Defines all possible errors for socket operations.
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("Failed to create a new socket")]
    CreateSocket(#[source] io::Error),

    #[error("Failed to enable broadcast on socket")]
    SetBroadcast(#[source] io::Error),

    #[error("Failed to set SO_BINDTODEVICE on interface '{interface}'")]
    BindToDevice {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to bind socket to address")]
    BindSocket(#[source] io::Error),

    #[error("Failed to set SO_REUSEADDR on socket")]
    SetReuseAddress(#[source] io::Error),

    #[error("Failed to set socket to non-blocking mode")]
    SetNonBlocking(#[source] io::Error),

    #[error("Failed to convert socket to TokioUdpSocket")]
    ConvertToTokio(#[source] io::Error),

    #[error("Binding to a specific device is not implemented on this platform")]
    NotImplemented,
}

/// Creates a `tokio::net::UdpSocket` suitable for observing DHCP traffic.
///
/// DHCP servers and relays talk over broadcast, so the socket enables
/// `SO_BROADCAST`, and `SO_REUSEADDR` lets the monitor sit next to a
/// running server on the same port. When `interface` is given the socket
/// is pinned to that device with `SO_BINDTODEVICE` (Linux only).
///
/// # Arguments
/// * `interface` - Optional network interface name (e.g., "eth0").
/// * `port` - The port number to bind the socket to.
pub fn new_tokio_monitor_socket(
    interface: Option<&str>,
    port: u16,
) -> Result<TokioUdpSocket, SocketError> {
    // Create a socket2 socket, which allows setting options before binding.
    let socket2 = Socket::new(Domain::IPV4, Type::DGRAM, None).map_err(SocketError::CreateSocket)?;

    socket2
        .set_broadcast(true)
        .map_err(SocketError::SetBroadcast)?;

    socket2
        .set_reuse_address(true)
        .map_err(SocketError::SetReuseAddress)?;

    if let Some(interface) = interface {
        bind_to_device(&socket2, interface)?;
    }

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    socket2.bind(&addr.into()).map_err(SocketError::BindSocket)?;

    let std_socket: StdUdpSocket = socket2.into();
    std_socket
        .set_nonblocking(true)
        .map_err(SocketError::SetNonBlocking)?;
    TokioUdpSocket::from_std(std_socket).map_err(SocketError::ConvertToTokio)
}

/// Set `SO_BINDTODEVICE`. This is an unsafe raw syscall.
/// It is safe here because we use a valid file descriptor and correct
/// parameters.
#[cfg(target_os = "linux")]
fn bind_to_device(socket: &Socket, interface: &str) -> Result<(), SocketError> {
    use std::os::fd::AsRawFd;

    let ret = unsafe {
        libc::setsockopt(
            socket.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_BINDTODEVICE,
            interface.as_ptr() as *const libc::c_void,
            interface.len() as libc::socklen_t,
        )
    };
    if ret < 0 {
        return Err(SocketError::BindToDevice {
            interface: interface.to_string(),
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}

/// Fallback for non-Linux systems where `SO_BINDTODEVICE` is not available.
#[cfg(not(target_os = "linux"))]
fn bind_to_device(_socket: &Socket, _interface: &str) -> Result<(), SocketError> {
    Err(SocketError::NotImplemented)
}
