//! Deferred kernel logger.
//!
//! The logger is the `log` facade implementation of the firmware: [`crate::boot`] installs it
//! with `log::set_logger`, and every crate logs through the `log` macros. Records are formatted
//! into fixed-size strings and queued in a ring buffer. The queue is drained to the configured
//! [`LogBackend`] by [`Logger::process`], which the application calls from its idle paths. On a
//! fatal error, [`Logger::panic`] switches the logger to synchronous mode: the queue is flushed
//! and every later record goes straight to the backend, so nothing is lost before the system
//! halts or resets.
//!
//! The buffer lock is only ever taken with `try_lock`. A record logged while the buffer is busy
//! (from an exception preempting a writer) is dropped and counted instead of spinning forever.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use heapless::{Deque, String};
use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::{Mutex, Once};

/// Maximum length of a formatted log message. Longer messages are truncated.
pub const K_LOG_MSG_SIZE: usize = 128;

/// Number of records the logger can hold before the oldest ones are dropped.
pub const K_LOG_BUFFER_LEN: usize = 16;

/// One formatted log message.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Uptime when the record was created, in milliseconds.
    pub timestamp: u32,
    pub level: Level,
    /// Module path of the caller.
    pub module: &'static str,
    pub message: String<K_LOG_MSG_SIZE>,
}

impl LogRecord {
    /// Short tag of the record level, as printed by the backends.
    pub fn level_tag(&self) -> &'static str {
        match self.level {
            Level::Error => "err",
            Level::Warn => "wrn",
            Level::Info => "inf",
            Level::Debug => "dbg",
            Level::Trace => "trc",
        }
    }
}

/// Destination of the log records.
///
/// A backend can be called from a fault context: it must not allocate and must not wait on a
/// lock that the faulting code may hold.
pub trait LogBackend: Sync {
    /// Outputs one record.
    fn write(&self, p_record: &LogRecord);

    /// Pushes out anything the backend itself buffers.
    fn flush(&self) {}
}

/// Writer filling a message up to its capacity and silently dropping the rest.
struct Truncating<'a>(&'a mut String<K_LOG_MSG_SIZE>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, p_str: &str) -> fmt::Result {
        for l_c in p_str.chars() {
            if self.0.push(l_c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

pub struct Logger {
    buffer: Mutex<Deque<LogRecord, K_LOG_BUFFER_LEN>>,
    backend: Once<&'static dyn LogBackend>,
    timestamp: Once<fn() -> u32>,
    max_level: AtomicUsize,
    panic_mode: AtomicBool,
    dropped: AtomicU32,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Creates a logger with no backend, accepting records up to [`Level::Info`].
    pub const fn new() -> Self {
        Logger {
            buffer: Mutex::new(Deque::new()),
            backend: Once::new(),
            timestamp: Once::new(),
            max_level: AtomicUsize::new(LevelFilter::Info as usize),
            panic_mode: AtomicBool::new(false),
            dropped: AtomicU32::new(0),
        }
    }

    /// Installs the backend. Only the first call has an effect.
    ///
    /// Records queued before the backend is installed are kept and written on the next
    /// [`Logger::process`].
    pub fn set_backend(&self, p_backend: &'static dyn LogBackend) {
        self.backend.call_once(|| p_backend);
    }

    /// Installs the uptime source used to timestamp records. Only the first call has an effect.
    pub fn set_timestamp(&self, p_source: fn() -> u32) {
        self.timestamp.call_once(|| p_source);
    }

    /// Sets the least severe level that is still recorded.
    pub fn set_level(&self, p_level: LevelFilter) {
        self.max_level.store(p_level as usize, Ordering::Relaxed);
    }

    /// Returns `true` if records of `p_level` are recorded.
    pub fn is_enabled(&self, p_level: Level) -> bool {
        p_level as usize <= self.max_level.load(Ordering::Relaxed)
    }

    /// Returns `true` once [`Logger::panic`] has been called.
    pub fn is_panic_mode(&self) -> bool {
        self.panic_mode.load(Ordering::Acquire)
    }

    /// Number of records dropped since the last report.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of records waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.buffer.try_lock().map_or(0, |l_buffer| l_buffer.len())
    }

    /// Formats a record and queues it, or writes it immediately in panic mode.
    ///
    /// This is the path of [`Log::log`]. The fatal error dispatcher calls it directly so it can
    /// work on a logger that is not the installed one.
    ///
    /// # Parameters
    /// - `p_level`: severity of the record.
    /// - `p_module`: module path of the caller.
    /// - `p_args`: message, as built by `format_args!`.
    pub fn push(&self, p_level: Level, p_module: &'static str, p_args: fmt::Arguments) {
        if !self.is_enabled(p_level) {
            return;
        }

        let mut l_message = String::new();
        // Truncating never fails, only a faulty Display impl can
        let _ = Truncating(&mut l_message).write_fmt(p_args);

        let l_record = LogRecord {
            timestamp: self.timestamp.get().map_or(0, |l_source| l_source()),
            level: p_level,
            module: p_module,
            message: l_message,
        };

        if self.is_panic_mode() {
            self.emit(&l_record);
            return;
        }

        match self.buffer.try_lock() {
            Some(mut l_buffer) => {
                if l_buffer.is_full() {
                    l_buffer.pop_front();
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                let _ = l_buffer.push_back(l_record);
            }
            None => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Writes every queued record to the backend.
    ///
    /// Does nothing while no backend is installed.
    ///
    /// # Returns
    /// - The number of records written, not counting the dropped-records notice.
    pub fn process(&self) -> usize {
        if self.backend.get().is_none() {
            return 0;
        }

        self.report_dropped();

        let mut l_count = 0;
        // The lock is released before writing so a slow backend never holds the buffer
        while let Some(l_record) = self.pop() {
            self.emit(&l_record);
            l_count += 1;
        }
        l_count
    }

    /// Switches to synchronous mode and flushes the buffer.
    ///
    /// Called on the fatal error path. If the buffer is locked by the code that faulted, its
    /// content is left behind rather than waited for.
    pub fn panic(&self) {
        self.panic_mode.store(true, Ordering::Release);
        self.process();

        if let Some(l_backend) = self.backend.get() {
            l_backend.flush();
        }
    }

    fn pop(&self) -> Option<LogRecord> {
        self.buffer.try_lock()?.pop_front()
    }

    fn report_dropped(&self) {
        let l_dropped = self.dropped.swap(0, Ordering::Relaxed);
        if l_dropped == 0 {
            return;
        }

        let mut l_message = String::new();
        let _ = write!(
            Truncating(&mut l_message),
            "--- {} messages dropped ---",
            l_dropped
        );
        self.emit(&LogRecord {
            timestamp: self.timestamp.get().map_or(0, |l_source| l_source()),
            level: Level::Warn,
            module: module_path!(),
            message: l_message,
        });
    }

    fn emit(&self, p_record: &LogRecord) {
        if let Some(l_backend) = self.backend.get() {
            l_backend.write(p_record);
            if self.is_panic_mode() {
                l_backend.flush();
            }
        }
    }
}

impl Log for Logger {
    fn enabled(&self, p_metadata: &Metadata) -> bool {
        self.is_enabled(p_metadata.level())
    }

    fn log(&self, p_record: &Record) {
        self.push(
            p_record.level(),
            p_record.module_path_static().unwrap_or("?"),
            *p_record.args(),
        );
    }

    fn flush(&self) {
        self.process();
    }
}
