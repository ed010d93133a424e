//! Raw access to physical memory handed over by the loader.
//!
//! Every dereference of a loader-supplied address goes through
//! [`PhysMemory`]. The only real implementation, [`IdentityMapped`], turns
//! physical addresses straight into pointers, which is valid only while the
//! early page tables identity-map low memory.

/// Byte-granular access to physical memory.
pub trait PhysMemory {
    /// Fill `buf` with the bytes starting at physical address `addr`.
    fn read(&self, addr: u64, buf: &mut [u8]);

    /// Store a single byte at `addr`. Stores must reach memory in program
    /// order and must never be elided or merged.
    fn store(&mut self, addr: u64, byte: u8);

    fn read_u8(&self, addr: u64) -> u8 {
        let mut b = [0u8; 1];
        self.read(addr, &mut b);
        b[0]
    }

    fn read_u32(&self, addr: u64) -> u32 {
        let mut b = [0u8; 4];
        self.read(addr, &mut b);
        u32::from_le_bytes(b)
    }

    fn read_u64(&self, addr: u64) -> u64 {
        let mut b = [0u8; 8];
        self.read(addr, &mut b);
        u64::from_le_bytes(b)
    }
}

/// Physical memory seen through an identity mapping.
pub struct IdentityMapped {
    _private: (),
}

impl IdentityMapped {
    /// # Safety
    ///
    /// The caller guarantees that, for as long as the returned value is
    /// used, every address passed to it is identity-mapped, readable and
    /// (for stores) writable, and that nothing else accesses that memory
    /// concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PhysMemory for IdentityMapped {
    fn read(&self, addr: u64, buf: &mut [u8]) {
        let src = addr as usize as *const u8;
        for (i, slot) in buf.iter_mut().enumerate() {
            // SAFETY: covered by the contract of `IdentityMapped::new`.
            *slot = unsafe { core::ptr::read_volatile(src.wrapping_add(i)) };
        }
    }

    fn store(&mut self, addr: u64, byte: u8) {
        let dst = addr as usize as *mut u8;
        // SAFETY: covered by the contract of `IdentityMapped::new`.
        unsafe { core::ptr::write_volatile(dst, byte) };
    }
}
