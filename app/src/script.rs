/*++

Licensed under the Apache-2.0 license.

File Name:

    script.rs

Abstract:

    File contains the transaction script parser.

--*/

use anyhow::{anyhow, bail, Context, Result};
use regfile_emu_types::{BusAddr, BusData, ByteStrobe};

/// One line of a transaction script.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    /// `write <addr> <data> [strobe]`. A missing strobe enables every lane.
    Write {
        addr: BusAddr,
        data: BusData,
        strobe: Option<ByteStrobe>,
    },

    /// `read <addr>`
    Read { addr: BusAddr },

    /// `idle <steps>`
    Idle(u32),

    /// `reset`
    Reset,
}

/// Parse a script. Blank lines and everything after `#` are ignored.
pub fn parse(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.split('#').next().unwrap_or("").trim();
            (!line.is_empty()).then_some((i + 1, line))
        })
        .map(|(lineno, line)| parse_line(line).with_context(|| format!("line {lineno}: {line}")))
        .collect()
}

fn parse_line(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let op = words.next().unwrap_or("");
    let operands: Vec<&str> = words.collect();
    let cmd = match (op, operands.as_slice()) {
        ("write", [addr, data]) => Command::Write {
            addr: number(addr)?,
            data: number(data)?,
            strobe: None,
        },
        ("write", [addr, data, strobe]) => Command::Write {
            addr: number(addr)?,
            data: number(data)?,
            strobe: Some(number(strobe)?),
        },
        ("read", [addr]) => Command::Read {
            addr: number(addr)?,
        },
        ("idle", [steps]) => Command::Idle(number(steps)?),
        ("reset", []) => Command::Reset,
        ("write" | "read" | "idle" | "reset", _) => {
            bail!("wrong number of operands for {op}")
        }
        _ => bail!("unknown command {op:?}"),
    };
    Ok(cmd)
}

/// Decimal, or hexadecimal with a `0x` prefix.
fn number<T>(s: &str) -> Result<T>
where
    T: TryFrom<u128>,
{
    let s = s.replace('_', "");
    let val = match s.strip_prefix("0x") {
        Some(hex) => u128::from_str_radix(hex, 16),
        None => s.parse::<u128>(),
    }
    .with_context(|| format!("invalid number {s:?}"))?;
    T::try_from(val).map_err(|_| {
        anyhow!(
            "{s} does not fit in {} bits",
            8 * std::mem::size_of::<T>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let text = "\
# mstatus round trip
write 9 0x12345678
read 9

write 0 0xff 0b0001 # bad strobe radix
";
        let err = parse(text).unwrap_err();
        assert!(format!("{err:#}").starts_with("line 5: write 0 0xff 0b0001"));

        let cmds =
            parse("write 9 0x1234_5678\nread 0x9\nwrite 2 0xab 0x2\nidle 10\nreset\n").unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Write {
                    addr: 9,
                    data: 0x1234_5678,
                    strobe: None
                },
                Command::Read { addr: 9 },
                Command::Write {
                    addr: 2,
                    data: 0xab,
                    strobe: Some(0x2)
                },
                Command::Idle(10),
                Command::Reset,
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(parse("\n   \n# nothing\n").unwrap(), vec![]);
        assert_eq!(
            parse("  read 3   # trailing\n").unwrap(),
            vec![Command::Read { addr: 3 }]
        );
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert!(parse("jump 4").is_err());
        assert!(parse("read").is_err());
        assert!(parse("read 1 2").is_err());
        assert!(parse("reset now").is_err());
        assert!(parse("write 1 0x1 0x100").is_err());
        assert!(parse("read 0x1_0000_0000").is_err());
    }
}
