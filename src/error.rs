/// Errors that can occur while constructing a driver.
///
/// Bus failures during flushing are intentionally not represented here:
/// the flush engine absorbs them via dirty-flag compensation instead of
/// surfacing them to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// More device addresses supplied than the driver's capacity.
    TooManyDevices,
    /// An LED table entry names a device or register offset out of range.
    BadLedLocation,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::TooManyDevices => write!(f, "more device addresses than driver capacity"),
            Error::BadLedLocation => write!(f, "LED table entry out of range"),
        }
    }
}
