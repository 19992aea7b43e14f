// Licensed under the Apache-2.0 license

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use regfile_emu_periph::RegfileArgs;
use regfile_emu_types::{DataWidth, Permission};
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Transaction script. Read from stdin when omitted
    pub script: Option<PathBuf>,

    /// Number of data registers ahead of the status registers
    #[arg(long, default_value_t = RegfileArgs::DEFAULT_NUM_DATA_REGS)]
    pub num_data_regs: usize,

    /// Packed data register permissions, 2 bits per register, LSB first
    /// (0 = RW, 1 = RO, 2 = WO, 3 = reserved)
    #[arg(long, default_value = "0xA500", value_parser = parse_hex)]
    pub data_access: u128,

    /// Register width
    #[arg(long, value_enum, default_value_t = ArgsDataWidth::Word)]
    pub data_width: ArgsDataWidth,

    /// Significant address bits
    #[arg(long, default_value_t = 32)]
    pub addr_width: u32,

    /// Steps a transaction may stay outstanding before it is abandoned
    #[arg(long, default_value_t = RegfileArgs::DEFAULT_TIMEOUT_LIMIT)]
    pub timeout_limit: u32,

    /// Upper bound of the random delay before accepting a response. Zero
    /// accepts responses immediately
    #[arg(long, default_value_t = 0)]
    pub max_response_delay: u32,

    /// Seed for the response delay
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = ArgsLogLevel::Warn)]
    pub log_level: ArgsLogLevel,
}

impl Args {
    pub fn regfile_args(&self) -> RegfileArgs {
        RegfileArgs {
            data_width: self.data_width.into(),
            addr_width: self.addr_width,
            num_data_regs: self.num_data_regs,
            data_access: Permission::unpack_table(self.data_access, self.num_data_regs),
            timeout_limit: self.timeout_limit,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ArgsDataWidth {
    Byte,
    HalfWord,
    Word,
    DoubleWord,
}

impl From<ArgsDataWidth> for DataWidth {
    fn from(width: ArgsDataWidth) -> Self {
        match width {
            ArgsDataWidth::Byte => DataWidth::Byte,
            ArgsDataWidth::HalfWord => DataWidth::HalfWord,
            ArgsDataWidth::Word => DataWidth::Word,
            ArgsDataWidth::DoubleWord => DataWidth::DoubleWord,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ArgsLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<ArgsLogLevel> for LevelFilter {
    fn from(level: ArgsLogLevel) -> Self {
        match level {
            ArgsLogLevel::Off => LevelFilter::Off,
            ArgsLogLevel::Error => LevelFilter::Error,
            ArgsLogLevel::Warn => LevelFilter::Warn,
            ArgsLogLevel::Info => LevelFilter::Info,
            ArgsLogLevel::Debug => LevelFilter::Debug,
            ArgsLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parse a hexadecimal number with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> Result<u128, ParseIntError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u128::from_str_radix(&digits.replace('_', ""), 16)
}
