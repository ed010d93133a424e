//! Host-side stand-in for physical memory.

use crate::phys::PhysMemory;

/// Sparse physical memory: a few mapped regions plus a log of every store.
///
/// Reads outside a mapped region panic, so a test fails if the code under
/// test touches memory it has no business reading.
#[derive(Default)]
pub struct FakeMemory {
    regions: Vec<(u64, Vec<u8>)>,
    pub stores: Vec<(u64, u8)>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, addr: u64, bytes: &[u8]) -> &mut Self {
        self.regions.push((addr, bytes.to_vec()));
        self
    }

    /// The byte most recently stored at `addr`, if any.
    pub fn stored_at(&self, addr: u64) -> Option<u8> {
        self.stores
            .iter()
            .rev()
            .find(|(a, _)| *a == addr)
            .map(|(_, b)| *b)
    }

    fn lookup(&self, addr: u64) -> u8 {
        for (base, bytes) in &self.regions {
            if addr >= *base && addr < *base + bytes.len() as u64 {
                return bytes[(addr - base) as usize];
            }
        }
        panic!("read from unmapped physical address {addr:#x}");
    }
}

impl PhysMemory for FakeMemory {
    fn read(&self, addr: u64, buf: &mut [u8]) {
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.lookup(addr.wrapping_add(i as u64));
        }
    }

    fn store(&mut self, addr: u64, byte: u8) {
        self.stores.push((addr, byte));
    }
}

/// Builder for a Multiboot information block laid out at its real offsets.
pub struct InfoBlock {
    bytes: [u8; 116],
}

impl InfoBlock {
    pub fn new(flags: u32) -> Self {
        let mut block = Self { bytes: [0; 116] };
        block.put_u32(0, flags);
        block
    }

    pub fn put_u8(&mut self, off: usize, v: u8) -> &mut Self {
        self.bytes[off] = v;
        self
    }

    pub fn put_u32(&mut self, off: usize, v: u32) -> &mut Self {
        self.bytes[off..off + 4].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_u64(&mut self, off: usize, v: u64) -> &mut Self {
        self.bytes[off..off + 8].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub fn loader_name(&mut self, addr: u32) -> &mut Self {
        self.put_u32(64, addr)
    }

    pub fn framebuffer(&mut self, addr: u64, pitch: u32, kind: u8) -> &mut Self {
        self.put_u64(88, addr).put_u32(96, pitch).put_u8(109, kind)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Memory where every address reads back the same byte. Stores are logged.
pub struct FilledMemory {
    pub fill: u8,
    pub stores: Vec<(u64, u8)>,
}

impl FilledMemory {
    pub fn new(fill: u8) -> Self {
        Self {
            fill,
            stores: Vec::new(),
        }
    }
}

impl PhysMemory for FilledMemory {
    fn read(&self, _addr: u64, buf: &mut [u8]) {
        buf.fill(self.fill);
    }

    fn store(&mut self, addr: u64, byte: u8) {
        self.stores.push((addr, byte));
    }
}
