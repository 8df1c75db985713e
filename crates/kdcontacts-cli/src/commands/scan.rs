use super::open_input;
use crate::cli::{ScanArgs, ScanFlag};
use crate::error::Result;
use kdcontacts::core::io::scan::{FlagScan, scan_flags};
use std::io::Write;
use tracing::info;

pub fn run(args: &ScanArgs) -> Result<()> {
    let mut reader = open_input(args.input.as_deref())?;
    let scan = scan_flags(&mut reader)?;
    info!(?scan, "Scanned label columns.");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", flag_value(&scan, args.flag))?;
    Ok(())
}

fn flag_value(scan: &FlagScan, flag: ScanFlag) -> u8 {
    let used = match flag {
        ScanFlag::Altloc => scan.uses_alt_loc,
        ScanFlag::Inscode => scan.uses_insertion_codes,
    };
    u8::from(used)
}
