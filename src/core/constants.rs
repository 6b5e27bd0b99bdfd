//! Protocol constants for NMP.
//!
//! Group and command identifiers are fixed by the protocol and MUST NOT be
//! changed; peers address commands by the (group, id) pair.

use std::time::Duration;

// =============================================================================
// COMMAND GROUPS
// =============================================================================

/// Default command group (echo, console, stats).
pub const GROUP_DEFAULT: u16 = 0;

/// Image management command group.
pub const GROUP_IMAGE: u16 = 1;

// =============================================================================
// COMMAND IDS - DEFAULT GROUP
// =============================================================================

/// Echo command.
pub const DEFAULT_ID_ECHO: u8 = 0;

// =============================================================================
// COMMAND IDS - IMAGE GROUP
// =============================================================================

/// List firmware images.
pub const IMAGE_ID_LIST: u8 = 0;

/// Upload a firmware image.
pub const IMAGE_ID_UPLOAD: u8 = 1;

/// Select the boot image.
pub const IMAGE_ID_BOOT: u8 = 2;

// =============================================================================
// WIRE SIZES
// =============================================================================

/// Envelope header size (op + flags + len + group + seq + id).
pub const HDR_SIZE: usize = 8;

/// Response header size (envelope header + result code byte).
pub const RSP_HDR_SIZE: usize = HDR_SIZE + 1;

/// Fixed size of one image version record (major + minor + revision + build).
pub const IMAGE_VERSION_RECORD_SIZE: usize = 8;

// =============================================================================
// TRANSACTION DEFAULTS
// =============================================================================

/// Default per-attempt response deadline.
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(10);

/// Default total attempts budget for one transaction.
pub const DEFAULT_TX_TRIES: u32 = 1;
