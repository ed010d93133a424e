//! First code to run after a Multiboot loader jumps into the kernel.
//!
//! Checks the loader's magic, looks for a text-mode display and, if one is
//! found, writes a two-line banner straight into video memory.

#![cfg_attr(not(test), no_std)]

pub mod display;
pub mod multiboot;
pub mod phys;
#[cfg(all(feature = "serial-log", target_arch = "x86_64"))]
pub mod serial;
pub mod text;

#[cfg(test)]
mod testing;

use core::fmt;

use display::DisplayTarget;
use multiboot::BootInfo;
use phys::PhysMemory;

/// Why the banner was not written. Neither is fatal to the rest of boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// The magic value did not come from a Multiboot loader.
    InvalidMagic,
    /// No text-mode display could be found.
    NoDisplay,
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::InvalidMagic => f.write_str("invalid multiboot magic"),
            BootError::NoDisplay => f.write_str("no text-mode display"),
        }
    }
}

/// Parse the boot block, find a display and draw the banner on it.
///
/// On error nothing has been stored to memory.
pub fn run<M: PhysMemory>(mem: &mut M, magic: u32, info_addr: u64) -> Result<DisplayTarget, BootError> {
    let info = BootInfo::parse(&*mem, magic, info_addr)?;
    log::debug!("multiboot flags {:#x}", info.flags());
    if let Some(bounds) = info.memory() {
        log::debug!("memory: {} KiB lower, {} KiB upper", bounds.lower_kib, bounds.upper_kib);
    }
    if let Some(cmdline) = info.cmdline() {
        log::trace!("cmdline at {:#x}", cmdline);
    }

    let target = display::detect(&*mem, &info).ok_or(BootError::NoDisplay)?;
    text::render(mem, &target, &text::BANNER);
    Ok(target)
}
