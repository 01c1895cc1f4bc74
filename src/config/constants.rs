//! Configuration constants.
//!
//! Labels, markers and well-known file names shared by the analyzers and the
//! domain metadata aggregator.

/// Marker that opens every PEM block.
pub const PEM_BEGIN_MARKER: &[u8] = b"-----BEGIN ";

/// PEM label of a block that carries elliptic-curve domain parameters only.
/// Key files written by `openssl ecparam -genkey` start with one of these.
pub const EC_PARAMETERS_LABEL: &str = "EC PARAMETERS";

/// Length in bytes of an Ed25519 private key seed (RFC 8410).
pub const ED25519_SEED_LEN: usize = 32;

/// Certificate files and private key file kept per domain by dehydrated.
pub const PRIVATE_KEY_FILE: &str = "privkey.pem";
pub const CERTIFICATE_FILE: &str = "cert.pem";
pub const CHAIN_FILE: &str = "chain.pem";
pub const FULLCHAIN_FILE: &str = "fullchain.pem";

/// Separator used when several per-file failures are folded into one message.
pub const ERROR_SEPARATOR: &str = "; ";
