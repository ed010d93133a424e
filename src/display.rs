//! Text-mode display detection.

use crate::multiboot::{BootInfo, FramebufferKind};
use crate::phys::PhysMemory;

/// Legacy VGA text buffer, 80 columns of 2-byte cells.
pub const VGA_TEXT_BUFFER: u64 = 0xB8000;
pub const VGA_TEXT_PITCH: u32 = 80 * 2;

/// Loader name (NUL included) of a loader known to leave the machine in
/// standard 80x25 VGA text mode without describing a framebuffer.
const QEMU_LOADER_NAME: &[u8; 5] = b"qemu\0";

/// Where text cells live: start of row 0 and the byte distance between rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTarget {
    pub base_address: u64,
    pub row_pitch_bytes: u32,
}

impl DisplayTarget {
    pub const fn new(base_address: u64, row_pitch_bytes: u32) -> Self {
        Self {
            base_address,
            row_pitch_bytes,
        }
    }

    pub fn row_address(&self, row: u32) -> u64 {
        self.base_address
            .wrapping_add(u64::from(row).wrapping_mul(u64::from(self.row_pitch_bytes)))
    }
}

/// Find a usable text-mode display, if there is one.
///
/// A text-mode framebuffer reported by the loader wins outright. Failing
/// that, QEMU's built-in Multiboot loader is recognised by name and assumed
/// to have left the legacy VGA buffer in place.
pub fn detect<M: PhysMemory>(mem: &M, info: &BootInfo) -> Option<DisplayTarget> {
    if let Some(fb) = info.framebuffer() {
        if fb.kind == FramebufferKind::Text {
            log::debug!(
                "text framebuffer at {:#x}, pitch {}, {}x{} cells, {} bpp",
                fb.addr,
                fb.pitch,
                fb.width,
                fb.height,
                fb.bpp
            );
            return Some(DisplayTarget::new(fb.addr, fb.pitch));
        }
        log::debug!(
            "framebuffer is {:?} ({}x{}, {} bpp), not text mode",
            fb.kind,
            fb.width,
            fb.height,
            fb.bpp
        );
    }

    let name_addr = info.boot_loader_name()?;
    let mut name = [0u8; 5];
    mem.read(name_addr, &mut name);
    if &name == QEMU_LOADER_NAME {
        log::debug!("loaded by qemu, assuming VGA text at {:#x}", VGA_TEXT_BUFFER);
        return Some(DisplayTarget::new(VGA_TEXT_BUFFER, VGA_TEXT_PITCH));
    }

    log::debug!("unrecognised loader, no display");
    None
}
