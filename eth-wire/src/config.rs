//! Protocol constants and per-connection configuration.

/// Short name of the subprotocol, as advertised in the capability list.
pub const PROTOCOL_NAME: &str = "eth";

/// Protocol version implemented by this crate.
pub const PROTOCOL_VERSION: u64 = 63;

/// Number of command ids reserved by this protocol version (0..=16).
pub const CMD_LENGTH: u8 = 17;

/// Default command id offset: ids 0-15 belong to the base p2p protocol.
pub const DEFAULT_CMD_ID_OFFSET: u64 = 16;

/// Network id of the main network.
pub const MAINNET_NETWORK_ID: u64 = 1;

/// Size of an encoded frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

/// Frame sizes are carried in 3 bytes.
pub const MAX_FRAME_SIZE: usize = (1 << 24) - 1;

/// Configuration for one eth connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthConfig {
    /// Network id sent in, and required of, the Status handshake.
    pub network_id: u64,

    /// Offset added to relative command ids, assigned by the multiplexer at
    /// connection setup.
    pub cmd_id_offset: u64,

    /// Largest frame (command id plus payload) this connection will send or
    /// accept.
    pub max_frame_size: usize,

    /// Check body, receipt and node data requests against their ceilings,
    /// not only header requests.
    pub enforce_all_ceilings: bool,
}

impl Default for EthConfig {
    fn default() -> Self {
        Self {
            network_id: MAINNET_NETWORK_ID,
            cmd_id_offset: DEFAULT_CMD_ID_OFFSET,
            max_frame_size: MAX_FRAME_SIZE,
            enforce_all_ceilings: true,
        }
    }
}

impl EthConfig {
    /// Create a new configuration for the given network.
    pub fn new(network_id: u64) -> Self {
        Self {
            network_id,
            ..Default::default()
        }
    }

    /// Set the command id offset.
    pub fn with_cmd_id_offset(mut self, offset: u64) -> Self {
        self.cmd_id_offset = offset;
        self
    }

    /// Set the maximum frame size. Values above [`MAX_FRAME_SIZE`] are clamped.
    pub fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size.min(MAX_FRAME_SIZE);
        self
    }

    /// Enable or disable ceiling checks on hash-list requests.
    pub fn with_enforce_all_ceilings(mut self, enforce: bool) -> Self {
        self.enforce_all_ceilings = enforce;
        self
    }

    /// First absolute command id past this protocol's range.
    pub fn cmd_id_end(&self) -> u64 {
        self.cmd_id_offset + u64::from(CMD_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EthConfig::default();
        assert_eq!(config.network_id, MAINNET_NETWORK_ID);
        assert_eq!(config.cmd_id_offset, DEFAULT_CMD_ID_OFFSET);
        assert_eq!(config.max_frame_size, MAX_FRAME_SIZE);
        assert!(config.enforce_all_ceilings);
        assert_eq!(config.cmd_id_end(), 33);
    }

    #[test]
    fn test_config_builder() {
        let config = EthConfig::new(3)
            .with_cmd_id_offset(32)
            .with_max_frame_size(usize::MAX)
            .with_enforce_all_ceilings(false);

        assert_eq!(config.network_id, 3);
        assert_eq!(config.cmd_id_offset, 32);
        assert_eq!(config.max_frame_size, MAX_FRAME_SIZE);
        assert!(!config.enforce_all_ceilings);
    }
}
