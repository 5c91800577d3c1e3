//! In-memory mirrors of one register page kind across all devices, with
//! per-device dirty tracking.
//!
//! A bank holds one `PS`-byte page per physical device and a bitmap with
//! one dirty bit per device. Callers mutate pages freely; the flush engine
//! drains dirty pages to hardware and clears the bits. The dirty bit is the
//! conservative "shadow may differ from hardware" marker: it is only
//! cleared by the flush path, never by a mutation.

use bitmaps::{Bitmap, Bits, BitsImpl};
use heapless::Vec;

use crate::error::Error;

/// Shadow pages for one register page kind.
///
/// `PS` is the page size in bytes, `DC` the device capacity. The live
/// device count is fixed at construction and may be smaller than `DC`.
///
/// Device indices are validated by the driver before they reach this type.
pub(crate) struct ShadowBank<const PS: usize, const DC: usize>
where
    BitsImpl<DC>: Bits,
{
    pages: Vec<[u8; PS], DC>,
    dirty: Bitmap<DC>,
}

impl<const PS: usize, const DC: usize> ShadowBank<PS, DC>
where
    BitsImpl<DC>: Bits,
{
    /// Creates a bank of `count` zeroed pages with no dirty bits set.
    pub(crate) fn new(count: usize) -> Result<Self, Error> {
        let mut pages = Vec::new();
        for _ in 0..count {
            pages.push([0; PS]).map_err(|_| Error::TooManyDevices)?;
        }
        Ok(Self {
            pages,
            dirty: Bitmap::new(),
        })
    }

    pub(crate) fn device_count(&self) -> usize {
        self.pages.len()
    }

    /// Stores `value` at `offset`, marking the device dirty only if the
    /// stored byte actually changed. Returns whether it did.
    pub(crate) fn update(&mut self, device: usize, offset: usize, value: u8) -> bool {
        if self.pages[device][offset] == value {
            return false;
        }
        self.pages[device][offset] = value;
        self.dirty.set(device, true);
        true
    }

    /// Sets or clears the channel bit for `offset` (8 channels per byte)
    /// and marks the device dirty unconditionally, even when the bit
    /// already held the requested value.
    pub(crate) fn set_bit(&mut self, device: usize, offset: usize, enabled: bool) {
        let byte = offset / 8;
        let bit = offset % 8;
        if enabled {
            self.pages[device][byte] |= 1 << bit;
        } else {
            self.pages[device][byte] &= !(1 << bit);
        }
        self.dirty.set(device, true);
    }

    pub(crate) fn byte(&self, device: usize, offset: usize) -> u8 {
        self.pages[device][offset]
    }

    pub(crate) fn page(&self, device: usize) -> &[u8; PS] {
        &self.pages[device]
    }

    pub(crate) fn is_dirty(&self, device: usize) -> bool {
        self.dirty.get(device)
    }

    pub(crate) fn mark_dirty(&mut self, device: usize) {
        self.dirty.set(device, true);
    }

    pub(crate) fn clear_dirty(&mut self, device: usize) {
        self.dirty.set(device, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two 8-byte pages in a 4-device-capacity bank.
    type TestBank = ShadowBank<8, 4>;

    #[test]
    fn new_bank_is_zeroed_and_clean() {
        let bank = TestBank::new(2).unwrap();
        assert_eq!(bank.device_count(), 2);
        assert_eq!(bank.page(0), &[0; 8]);
        assert!(!bank.is_dirty(0));
        assert!(!bank.is_dirty(1));
    }

    #[test]
    fn new_bank_over_capacity_fails() {
        assert!(matches!(TestBank::new(5), Err(Error::TooManyDevices)));
    }

    #[test]
    fn update_marks_dirty_only_on_change() {
        let mut bank = TestBank::new(1).unwrap();

        assert!(bank.update(0, 3, 0x80));
        assert!(bank.is_dirty(0));
        assert_eq!(bank.byte(0, 3), 0x80);

        bank.clear_dirty(0);

        // Same value again: no change, no dirty bit.
        assert!(!bank.update(0, 3, 0x80));
        assert!(!bank.is_dirty(0));
    }

    #[test]
    fn update_dirties_only_the_touched_device() {
        let mut bank = TestBank::new(2).unwrap();
        bank.update(1, 0, 0xFF);
        assert!(!bank.is_dirty(0));
        assert!(bank.is_dirty(1));
        assert_eq!(bank.byte(0, 0), 0);
    }

    #[test]
    fn set_bit_packs_eight_channels_per_byte() {
        let mut bank = TestBank::new(1).unwrap();
        bank.set_bit(0, 0, true);
        bank.set_bit(0, 7, true);
        bank.set_bit(0, 8, true);
        assert_eq!(bank.byte(0, 0), 0b1000_0001);
        assert_eq!(bank.byte(0, 1), 0b0000_0001);

        bank.set_bit(0, 7, false);
        assert_eq!(bank.byte(0, 0), 0b0000_0001);
    }

    #[test]
    fn set_bit_always_marks_dirty() {
        let mut bank = TestBank::new(1).unwrap();
        bank.set_bit(0, 0, true);
        assert!(bank.is_dirty(0));

        bank.clear_dirty(0);

        // Redundant write of the same bit value still dirties.
        bank.set_bit(0, 0, true);
        assert!(bank.is_dirty(0));
    }

    #[test]
    fn clear_dirty_leaves_page_contents() {
        let mut bank = TestBank::new(1).unwrap();
        bank.update(0, 5, 0x42);
        bank.clear_dirty(0);
        assert!(!bank.is_dirty(0));
        assert_eq!(bank.byte(0, 5), 0x42);
    }

    #[test]
    fn mark_dirty_without_mutation() {
        let mut bank = TestBank::new(2).unwrap();
        bank.mark_dirty(1);
        assert!(bank.is_dirty(1));
        assert!(!bank.is_dirty(0));
    }
}
