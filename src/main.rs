#![no_std]
#![no_main]

use core::panic::PanicInfo;

use vgabanner_kernel::phys::IdentityMapped;

/// Called by the startup code once the CPU is in long mode, with the
/// register values the Multiboot loader left behind.
#[no_mangle]
pub extern "C" fn kernel_main(magic: u32, info_addr: usize) {
    #[cfg(feature = "serial-log")]
    vgabanner_kernel::serial::init(log::LevelFilter::Debug);

    // SAFETY: the startup code identity-maps low memory, including the
    // boot block, the loader name and the text buffer, before calling us.
    let mut mem = unsafe { IdentityMapped::new() };

    // There is nowhere to report a failure on screen; hand control back.
    if let Err(err) = vgabanner_kernel::run(&mut mem, magic, info_addr as u64) {
        log::warn!("banner skipped: {}", err);
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    #[cfg(feature = "serial-log")]
    vgabanner_kernel::serial::write_unlocked(format_args!("\nKERNEL PANIC: {}\n", info));
    loop {
        unsafe {
            core::arch::asm!("hlt", options(nomem, nostack));
        }
    }
}
