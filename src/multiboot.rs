//! Multiboot (v1) information block.
//!
//! The loader hands us a block whose fields are only meaningful when the
//! matching bit of `flags` is set. Each field group is read once, and only
//! if its bit is set; unset groups come back as `None`.

use bitflags::bitflags;

use crate::phys::PhysMemory;
use crate::BootError;

/// Value a Multiboot loader leaves in `eax` alongside the info block.
pub const MULTIBOOT_BOOTLOADER_MAGIC: u32 = 0x2BAD_B002;

// Byte offsets into the information block
const OFF_FLAGS: u64 = 0;
const OFF_MEM_LOWER: u64 = 4;
const OFF_MEM_UPPER: u64 = 8;
const OFF_CMDLINE: u64 = 16;
const OFF_BOOT_LOADER_NAME: u64 = 64;
const OFF_FB_ADDR: u64 = 88;
const OFF_FB_PITCH: u64 = 96;
const OFF_FB_WIDTH: u64 = 100;
const OFF_FB_HEIGHT: u64 = 104;
const OFF_FB_BPP: u64 = 108;
const OFF_FB_TYPE: u64 = 109;

bitflags! {
    /// Presence bits of the `flags` word that this kernel knows about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InfoFlags: u32 {
        const MEMORY = 1 << 0;
        const CMDLINE = 1 << 2;
        const BOOT_LOADER_NAME = 1 << 9;
        const FRAMEBUFFER = 1 << 12;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferKind {
    Indexed,
    DirectColor,
    Text,
    Unknown(u8),
}

impl From<u8> for FramebufferKind {
    fn from(value: u8) -> Self {
        match value {
            0 => FramebufferKind::Indexed,
            1 => FramebufferKind::DirectColor,
            2 => FramebufferKind::Text,
            other => FramebufferKind::Unknown(other),
        }
    }
}

/// Framebuffer description (flags bit 12). The color-info union that
/// follows `framebuffer_type` in the block is not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferInfo {
    pub addr: u64,
    pub pitch: u32,
    pub width: u32,
    pub height: u32,
    pub bpp: u8,
    pub kind: FramebufferKind,
}

/// Lower and upper memory sizes in KiB (flags bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBounds {
    pub lower_kib: u32,
    pub upper_kib: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootInfo {
    flags: u32,
    memory: Option<MemoryBounds>,
    cmdline: Option<u64>,
    boot_loader_name: Option<u64>,
    framebuffer: Option<FramebufferInfo>,
}

impl BootInfo {
    /// Check `magic` and decode the block at `info_addr`.
    ///
    /// With a wrong magic nothing is read from memory at all, since the
    /// address cannot be trusted to point anywhere.
    pub fn parse<M: PhysMemory>(mem: &M, magic: u32, info_addr: u64) -> Result<Self, BootError> {
        if magic != MULTIBOOT_BOOTLOADER_MAGIC {
            return Err(BootError::InvalidMagic);
        }

        let at = move |off: u64| info_addr.wrapping_add(off);
        let flags = mem.read_u32(at(OFF_FLAGS));
        let present = InfoFlags::from_bits_retain(flags);

        let memory = present.contains(InfoFlags::MEMORY).then(|| MemoryBounds {
            lower_kib: mem.read_u32(at(OFF_MEM_LOWER)),
            upper_kib: mem.read_u32(at(OFF_MEM_UPPER)),
        });

        let cmdline = present
            .contains(InfoFlags::CMDLINE)
            .then(|| u64::from(mem.read_u32(at(OFF_CMDLINE))));

        let boot_loader_name = present
            .contains(InfoFlags::BOOT_LOADER_NAME)
            .then(|| u64::from(mem.read_u32(at(OFF_BOOT_LOADER_NAME))));

        let framebuffer = present.contains(InfoFlags::FRAMEBUFFER).then(|| FramebufferInfo {
            addr: mem.read_u64(at(OFF_FB_ADDR)),
            pitch: mem.read_u32(at(OFF_FB_PITCH)),
            width: mem.read_u32(at(OFF_FB_WIDTH)),
            height: mem.read_u32(at(OFF_FB_HEIGHT)),
            bpp: mem.read_u8(at(OFF_FB_BPP)),
            kind: FramebufferKind::from(mem.read_u8(at(OFF_FB_TYPE))),
        });

        Ok(Self {
            flags,
            memory,
            cmdline,
            boot_loader_name,
            framebuffer,
        })
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn memory(&self) -> Option<MemoryBounds> {
        self.memory
    }

    /// Physical address of the kernel command line string.
    pub fn cmdline(&self) -> Option<u64> {
        self.cmdline
    }

    /// Physical address of the NUL-terminated loader name.
    pub fn boot_loader_name(&self) -> Option<u64> {
        self.boot_loader_name
    }

    pub fn framebuffer(&self) -> Option<&FramebufferInfo> {
        self.framebuffer.as_ref()
    }
}
