//! # Oneslot Ring
//!
//! A fixed-capacity circular buffer for producer/consumer data flow.
//! Writing to a full buffer silently evicts the oldest unread element;
//! reading an empty one hands back the nil element.
//!
//! ## Architecture Overview
//!
//! - `element`: The values stored in slots (a typed scalar or nil)
//! - `buffer`: The one-slot-open engine, the `RingBuffer` front and a
//!   lock-guarded `SharedRingBuffer`
//! - `config`: Construction and logging options
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use oneslot_ring::RingBuffer;
//!
//! let mut buffer: RingBuffer<i64> = RingBuffer::new(3);
//! for i in 1..=5i64 {
//!     buffer.write(i);
//! }
//!
//! let values: Vec<i64> = buffer.drain().filter_map(|e| e.into_value()).collect();
//! assert_eq!(values, vec![3, 4, 5]);
//! ```

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod element;
pub mod error;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{Drain, OneSlotRing, Ring, RingBuffer, SharedRingBuffer};
pub use config::{BufferKind, ConfigError, LogConfig, RingConfig};
pub use element::Element;
pub use error::{RingBufferError, RingResult};

// ============================================
// LOGGING
// ============================================

use std::io::Write;

/// Installs an `env_logger` backend with timestamped lines.
///
/// The buffer itself only talks to the `log` facade, so calling this is
/// optional. `RUST_LOG` overrides the configured level. Returns false when
/// logging is disabled or a logger was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    if !config.enabled {
        return false;
    }

    env_logger::Builder::new()
        .filter_level(config.effective_level())
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .is_ok()
}

// ============================================
// TESTS
// ============================================
