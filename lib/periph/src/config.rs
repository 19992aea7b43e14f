/*++

Licensed under the Apache-2.0 license.

File Name:

    config.rs

Abstract:

    File contains construction-time configuration of the AXI register file.

--*/

use regfile_emu_types::{BusAddr, DataWidth, Permission};
use std::fmt;

/// Size of the fixed status region that follows the data region.
pub const NUM_STATUS_REGS: usize = 4;

/// Offsets within the status region.
pub struct StatusReg;

impl StatusReg {
    pub const MCYCLE: usize = 0;
    pub const MSTATUS: usize = 1;
    pub const MCAUSE: usize = 2;
    pub const MIP: usize = 3;

    /// Hard-wired permissions, indexed by offset
    pub const ACCESS: [Permission; NUM_STATUS_REGS] = [
        Permission::ReadOnly,
        Permission::ReadWrite,
        Permission::ReadOnly,
        Permission::ReadOnly,
    ];

    pub const NAMES: [&'static str; NUM_STATUS_REGS] = ["mcycle", "mstatus", "mcause", "mip"];
}

/// Register file construction arguments. Nothing here can change once the
/// register file is built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RegfileArgs {
    /// Width of every register cell
    pub data_width: DataWidth,

    /// Number of significant bits in `awaddr`/`araddr`
    pub addr_width: u32,

    /// Size of the data region
    pub num_data_regs: usize,

    /// One permission per data register
    pub data_access: Vec<Permission>,

    /// Steps a transaction may stay outstanding before it is abandoned
    pub timeout_limit: u32,
}

impl RegfileArgs {
    pub const DEFAULT_NUM_DATA_REGS: usize = 8;
    pub const DEFAULT_DATA_ACCESS: u128 = 0xA500;
    pub const DEFAULT_TIMEOUT_LIMIT: u32 = 16;

    /// Arguments with the data region permissions decoded from a packed
    /// 2-bit-per-register word. See [`Permission::unpack_table`].
    pub fn with_packed_access(num_data_regs: usize, packed: u128) -> Self {
        Self {
            num_data_regs,
            data_access: Permission::unpack_table(packed, num_data_regs),
            ..Default::default()
        }
    }

    /// Data registers plus status registers
    pub fn total_regs(&self) -> usize {
        self.num_data_regs + NUM_STATUS_REGS
    }

    /// Mask applied to captured addresses
    pub fn addr_mask(&self) -> BusAddr {
        if self.addr_width >= BusAddr::BITS {
            BusAddr::MAX
        } else {
            (1 << self.addr_width) - 1
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addr_width == 0 || self.addr_width > BusAddr::BITS {
            return Err(ConfigError::AddrWidth(self.addr_width));
        }
        if self.timeout_limit == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.data_access.len() != self.num_data_regs {
            return Err(ConfigError::AccessTableLength {
                expected: self.num_data_regs,
                actual: self.data_access.len(),
            });
        }
        if self.total_regs() as u64 > u64::from(self.addr_mask()) + 1 {
            return Err(ConfigError::Unaddressable {
                total_regs: self.total_regs(),
                addr_width: self.addr_width,
            });
        }
        Ok(())
    }
}

impl Default for RegfileArgs {
    fn default() -> Self {
        Self {
            data_width: DataWidth::Word,
            addr_width: BusAddr::BITS,
            num_data_regs: Self::DEFAULT_NUM_DATA_REGS,
            data_access: Permission::unpack_table(
                Self::DEFAULT_DATA_ACCESS,
                Self::DEFAULT_NUM_DATA_REGS,
            ),
            timeout_limit: Self::DEFAULT_TIMEOUT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConfigError {
    /// Address width outside `1..=32`
    AddrWidth(u32),

    /// A zero timeout would abandon every transaction before it starts
    ZeroTimeout,

    /// Permission table does not cover the data region exactly
    AccessTableLength { expected: usize, actual: usize },

    /// Some registers cannot be reached with the configured address width
    Unaddressable { total_regs: usize, addr_width: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::AddrWidth(width) => {
                write!(f, "address width {width} is outside 1..={}", BusAddr::BITS)
            }
            ConfigError::ZeroTimeout => write!(f, "timeout limit must be at least one step"),
            ConfigError::AccessTableLength { expected, actual } => write!(
                f,
                "permission table has {actual} entries but there are {expected} data registers"
            ),
            ConfigError::Unaddressable {
                total_regs,
                addr_width,
            } => write!(
                f,
                "{total_regs} registers do not fit in a {addr_width}-bit address space"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let args = RegfileArgs::default();
        assert_eq!(args.validate(), Ok(()));
        assert_eq!(args.total_regs(), 12);
        assert_eq!(args.addr_mask(), u32::MAX);
        assert_eq!(args.data_access[4], Permission::ReadOnly);
    }

    #[test]
    fn test_packed_access() {
        let args = RegfileArgs::with_packed_access(2, 0b11_10);
        assert_eq!(
            args.data_access,
            vec![Permission::WriteOnly, Permission::Reserved]
        );
        assert_eq!(args.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_addr_width() {
        let args = RegfileArgs {
            addr_width: 0,
            ..Default::default()
        };
        assert_eq!(args.validate(), Err(ConfigError::AddrWidth(0)));

        let args = RegfileArgs {
            addr_width: 33,
            ..Default::default()
        };
        assert_eq!(args.validate(), Err(ConfigError::AddrWidth(33)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let args = RegfileArgs {
            timeout_limit: 0,
            ..Default::default()
        };
        assert_eq!(args.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_short_access_table() {
        let args = RegfileArgs {
            num_data_regs: 9,
            ..Default::default()
        };
        assert_eq!(
            args.validate(),
            Err(ConfigError::AccessTableLength {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_rejects_unaddressable_registers() {
        // 12 registers need 4 address bits
        let args = RegfileArgs {
            addr_width: 3,
            ..Default::default()
        };
        assert_eq!(
            args.validate(),
            Err(ConfigError::Unaddressable {
                total_regs: 12,
                addr_width: 3
            })
        );

        let args = RegfileArgs {
            addr_width: 4,
            ..Default::default()
        };
        assert_eq!(args.addr_mask(), 0xf);
        assert_eq!(args.validate(), Ok(()));
    }
}
