use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The network interface to listen on (e.g., 'eth0'); all interfaces
    /// when omitted
    #[arg(short, long)]
    pub interface: Option<String>,

    /// The UDP port to observe (67 = server side, 68 = client side)
    #[arg(short, long, default_value_t = 67)]
    pub port: u16,
}

pub struct MonitorConfig {
    pub interface: Option<String>,
    pub port: u16,
    pub recv_buffer_size: usize,
}

impl MonitorConfig {
    pub fn new(interface: Option<String>, port: u16) -> Self {
        Self {
            interface,
            port,
            // Ethernet MTU; a DHCP datagram never legitimately exceeds it.
            recv_buffer_size: 1500,
        }
    }
}

impl From<Args> for MonitorConfig {
    fn from(args: Args) -> Self {
        Self::new(args.interface, args.port)
    }
}
