use std::sync::LazyLock;
use time::UtcOffset;

static SYSTEM_ZONE: LazyLock<UtcOffset> = LazyLock::new(|| {
    UtcOffset::current_local_offset().unwrap_or_else(|e| {
        log::warn!(
            "Could not determine the local time zone offset ({}), falling back to UTC",
            e
        );
        UtcOffset::UTC
    })
});

/// Offset of the local time zone, determined once per process.
pub fn system_zone() -> UtcOffset {
    *SYSTEM_ZONE
}

/// Settings used by the scalar table while reading and writing values.
///
/// `zone` converts date and date-time values to instants when the driver
/// cannot store them natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindConfig {
    pub zone: UtcOffset,
}

impl BindConfig {
    pub const fn new(zone: UtcOffset) -> Self {
        Self { zone }
    }

    pub const fn utc() -> Self {
        Self::new(UtcOffset::UTC)
    }

    pub const fn with_zone(mut self, zone: UtcOffset) -> Self {
        self.zone = zone;
        self
    }
}

impl Default for BindConfig {
    fn default() -> Self {
        Self::new(system_zone())
    }
}
