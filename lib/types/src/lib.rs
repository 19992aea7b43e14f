/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for Register File Emulator Types library.

--*/

mod macros;

/// Bus data word. Wide enough for the largest supported data width; narrower
/// configurations only use the low bits.
pub type BusData = u64;

/// Flat register index presented on `awaddr`/`araddr`
pub type BusAddr = u32;

/// Byte-enable mask, one bit per byte lane
pub type ByteStrobe = u8;

bus_enum!(
    /// Access permission of a single register cell
    #[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
    pub Permission;
    u8;
    {
        /// Readable and writable
        #[default]
        ReadWrite = 0,

        /// Writes are rejected
        ReadOnly = 1,

        /// Reads are rejected and return zero
        WriteOnly = 2,

        /// No access in either direction
        Reserved = 3,
    }
);

impl Permission {
    /// Width of one entry in the packed permission encoding.
    pub const PACKED_BITS: u32 = 2;

    pub fn readable(self) -> bool {
        matches!(self, Permission::ReadWrite | Permission::ReadOnly)
    }

    pub fn writable(self) -> bool {
        matches!(self, Permission::ReadWrite | Permission::WriteOnly)
    }

    /// Decode a packed permission word into a lookup table of `count` entries.
    ///
    /// Entry `i` lives in bits `[2*i + 1 : 2*i]` of `packed`. Entries past the
    /// end of the word decode as zero (`ReadWrite`), like a zero-extended
    /// hardware parameter.
    ///
    /// # Arguments
    ///
    /// * `packed` - Packed 2-bit permission codes, entry 0 in the LSBs
    /// * `count` - Number of entries to decode
    pub fn unpack_table(packed: u128, count: usize) -> Vec<Permission> {
        (0..count)
            .map(|i| {
                let code = (i as u32)
                    .checked_mul(Self::PACKED_BITS)
                    .and_then(|shift| packed.checked_shr(shift))
                    .unwrap_or(0)
                    & 0x3;
                Permission::try_from(code as u8).unwrap_or(Permission::Reserved)
            })
            .collect()
    }

    /// Inverse of [`Permission::unpack_table`]. Only the first 64 entries fit.
    pub fn pack_table(table: &[Permission]) -> u128 {
        table
            .iter()
            .take((u128::BITS / Self::PACKED_BITS) as usize)
            .enumerate()
            .fold(0, |acc, (i, perm)| {
                acc | (u128::from(u8::from(*perm)) << (i as u32 * Self::PACKED_BITS))
            })
    }
}

bus_enum!(
    /// Bus response code driven on `bresp` and `rresp`
    #[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
    pub Resp;
    u8;
    {
        /// Normal access success
        #[default]
        Okay = 0,

        /// Slave error
        SlvErr = 2,
    }
);

impl Resp {
    pub fn is_error(self) -> bool {
        self == Resp::SlvErr
    }
}

bus_enum!(
    /// Width of a register cell in bits
    #[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
    pub DataWidth;
    u32;
    {
        Byte = 8,
        HalfWord = 16,
        #[default]
        Word = 32,
        DoubleWord = 64,
    }
);

impl DataWidth {
    /// Number of byte lanes, which is also the width of the write strobe.
    pub fn lanes(self) -> usize {
        u32::from(self) as usize / 8
    }

    /// Mask selecting the valid bits of a data word.
    pub fn mask(self) -> BusData {
        match self {
            DataWidth::DoubleWord => BusData::MAX,
            _ => (1 << u32::from(self)) - 1,
        }
    }

    /// Mask selecting the valid bits of a write strobe.
    pub fn strobe_mask(self) -> ByteStrobe {
        match self {
            DataWidth::DoubleWord => ByteStrobe::MAX,
            _ => (1 << self.lanes()) - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_reference_table() {
        // cells 0-3 read-write, 4-5 read-only, 6-7 write-only
        let table = Permission::unpack_table(0xA500, 8);
        assert_eq!(
            table,
            vec![
                Permission::ReadWrite,
                Permission::ReadWrite,
                Permission::ReadWrite,
                Permission::ReadWrite,
                Permission::ReadOnly,
                Permission::ReadOnly,
                Permission::WriteOnly,
                Permission::WriteOnly,
            ]
        );
        assert_eq!(Permission::pack_table(&table), 0xA500);
    }

    #[test]
    fn test_unpack_past_end_of_word() {
        let table = Permission::unpack_table(u128::MAX, 66);
        assert_eq!(table[63], Permission::Reserved);
        assert_eq!(table[64], Permission::ReadWrite);
        assert_eq!(table[65], Permission::ReadWrite);
    }

    #[test]
    fn test_permission_directions() {
        assert!(Permission::ReadWrite.readable() && Permission::ReadWrite.writable());
        assert!(Permission::ReadOnly.readable() && !Permission::ReadOnly.writable());
        assert!(!Permission::WriteOnly.readable() && Permission::WriteOnly.writable());
        assert!(!Permission::Reserved.readable() && !Permission::Reserved.writable());
    }

    #[test]
    fn test_resp_codes() {
        assert_eq!(u8::from(Resp::Okay), 0);
        assert_eq!(u8::from(Resp::SlvErr), 2);
        assert_eq!(Resp::try_from(2), Ok(Resp::SlvErr));
        assert_eq!(Resp::try_from(1), Err(1));
        assert_eq!(Resp::SlvErr.to_string(), "SlvErr");
    }

    #[test]
    fn test_data_width_masks() {
        assert_eq!(DataWidth::Byte.mask(), 0xff);
        assert_eq!(DataWidth::Word.mask(), 0xffff_ffff);
        assert_eq!(DataWidth::DoubleWord.mask(), u64::MAX);
        assert_eq!(DataWidth::Word.lanes(), 4);
        assert_eq!(DataWidth::Word.strobe_mask(), 0xf);
        assert_eq!(DataWidth::DoubleWord.strobe_mask(), 0xff);
        assert_eq!(DataWidth::try_from(24), Err(24));
    }
}
