//! COM1 logger.
//!
//! Early boot has no console of its own; a 16550 UART on port 0x3F8 is
//! the one place diagnostics can go without touching the display.

use core::fmt::{self, Write};

use log::{LevelFilter, Metadata, Record};
use spin::Mutex;
use uart_16550::SerialPort;

const COM1: u16 = 0x3F8;

static SERIAL1: Mutex<Option<SerialPort>> = Mutex::new(None);

struct SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(serial) = SERIAL1.lock().as_mut() {
            let _ = writeln!(serial, "[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Bring up COM1 and route the `log` macros to it.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let mut serial = SERIAL1.lock();
    if serial.is_none() {
        // SAFETY: COM1 is the standard PC serial port and nothing else
        // drives it this early in boot.
        let mut port = unsafe { SerialPort::new(COM1) };
        port.init();
        *serial = Some(port);
    }
    drop(serial);

    // Already registered on a repeat call; keep going and just set the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Write straight to COM1 without waiting on the port lock.
///
/// For the panic path: if the panic happened while the lock was held the
/// message is dropped and `false` is returned, instead of spinning forever.
pub fn write_unlocked(args: fmt::Arguments) -> bool {
    let Some(mut serial) = SERIAL1.try_lock() else {
        return false;
    };
    if let Some(port) = serial.as_mut() {
        let _ = port.write_fmt(args);
    }
    true
}
