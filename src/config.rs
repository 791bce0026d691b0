//! # Configuration Module
//!
//! This module holds the construction options for a ring buffer and the
//! (separate) options for logging.
//!
//! ## Plain English Explanation
//!
//! Before a buffer exists you decide three things:
//! - How many elements it can hold
//! - Which full/empty scheme it uses (only "one slot open" exists today)
//! - Whether read or evicted slots are wiped straight away
//!
//! Logging settings live next door but never change what the buffer does.

use log::LevelFilter;
use thiserror::Error;

// ============================================
// BUFFER KIND
// ============================================

/// Which scheme the buffer uses to tell "full" apart from "empty"
///
/// ## Plain English
///
/// There are several textbook ways to do this. Only `OneSlot` is built;
/// the rest are listed so callers can name them, and asking for one
/// is rejected at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Keep one slot permanently empty between the write and read cursors
    #[default]
    OneSlot,

    /// Track the number of stored elements in a counter
    FillCount,

    /// Extra wrap bit on each cursor
    MirrorBit,

    /// Separate read and write counters
    ReadWriteCount,

    /// Unbounded indices reduced modulo capacity
    Absolute,

    /// Remember whether the last operation was a read or a write
    LastOp,
}

impl BufferKind {
    /// Returns true if an engine exists for this kind.
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::OneSlot)
    }
}

// ============================================
// BUFFER CONFIGURATION
// ============================================

/// Capacity used when nothing else is asked for.
pub const DEFAULT_CAPACITY: usize = 16;

/// Construction options for a [`RingBuffer`](crate::RingBuffer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingConfig {
    /// Usable slots. Backing storage is one larger.
    pub capacity: usize,

    /// Full/empty scheme
    pub kind: BufferKind,

    /// Replace read or evicted slots with the nil element right away
    ///
    /// ## Plain English
    /// Makes `dump()` output easy to read, because only live data shows up.
    /// Costs roughly 13-20% throughput, so it is off by default.
    pub clear_on_vacate: bool,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            kind: BufferKind::default(),
            clear_on_vacate: false,
        }
    }
}

impl RingConfig {
    /// Creates a configuration for the given capacity with default options.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the buffer kind.
    pub fn with_kind(mut self, kind: BufferKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enables or disables clear-on-vacate.
    pub fn with_clear_on_vacate(mut self, clear_on_vacate: bool) -> Self {
        self.clear_on_vacate = clear_on_vacate;
        self
    }

    /// Validates the configuration and returns every problem found
    ///
    /// An empty list means the options are usable. Whether `kind` has an
    /// engine is checked separately at construction.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.capacity == 0 {
            errors.push(ConfigError::ZeroCapacity);
        }
        if self.capacity.checked_add(1).is_none() {
            errors.push(ConfigError::CapacityTooLarge(self.capacity));
        }

        errors
    }

    /// Number of backing slots this configuration allocates.
    pub fn slot_count(&self) -> usize {
        self.capacity.saturating_add(1)
    }
}

// ============================================
// LOGGING CONFIGURATION
// ============================================

/// Options for [`init_logging`](crate::init_logging)
///
/// Kept apart from [`RingConfig`]: no buffer operation reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a logger at all
    pub enabled: bool,

    /// Most verbose level that gets printed
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Info,
        }
    }
}

impl LogConfig {
    /// Logging switched off entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            level: LevelFilter::Off,
        }
    }

    /// Logging at the given level.
    pub fn with_level(level: LevelFilter) -> Self {
        Self {
            enabled: true,
            level,
        }
    }

    /// The level actually handed to the backend.
    pub fn effective_level(&self) -> LevelFilter {
        if self.enabled {
            self.level
        } else {
            LevelFilter::Off
        }
    }
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A buffer must hold at least one element
    #[error("Capacity must be at least 1")]
    ZeroCapacity,

    /// Capacity plus the open slot does not fit in `usize`
    #[error("Capacity {0} leaves no room for the open slot")]
    CapacityTooLarge(usize),
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RingConfig::default();

        assert_eq!(config.capacity, 16);
        assert_eq!(config.kind, BufferKind::OneSlot);
        assert!(!config.clear_on_vacate);
        assert!(config.validate().is_empty());
        assert_eq!(config.slot_count(), 17);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = RingConfig::new(0);
        assert_eq!(config.validate(), vec![ConfigError::ZeroCapacity]);

        config.capacity = usize::MAX;
        assert_eq!(
            config.validate(),
            vec![ConfigError::CapacityTooLarge(usize::MAX)]
        );

        config.capacity = 1;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let config = RingConfig::new(4)
            .with_kind(BufferKind::FillCount)
            .with_clear_on_vacate(true);

        assert_eq!(config.capacity, 4);
        assert_eq!(config.kind, BufferKind::FillCount);
        assert!(config.clear_on_vacate);
    }

    #[test]
    fn test_only_one_slot_is_implemented() {
        assert!(BufferKind::OneSlot.is_implemented());
        for kind in [
            BufferKind::FillCount,
            BufferKind::MirrorBit,
            BufferKind::ReadWriteCount,
            BufferKind::Absolute,
            BufferKind::LastOp,
        ] {
            assert!(!kind.is_implemented(), "{:?}", kind);
        }
    }

    #[test]
    fn test_log_config_levels() {
        assert_eq!(LogConfig::default().effective_level(), LevelFilter::Info);
        assert_eq!(LogConfig::disabled().effective_level(), LevelFilter::Off);
        assert_eq!(
            LogConfig::with_level(LevelFilter::Trace).effective_level(),
            LevelFilter::Trace
        );
    }
}
