use crate::logger::{LogBackend, LogRecord};
use cortex_m_semihosting::hprintln;

/// Log backend printing each record on the debugger console.
pub struct SemihostingBackend;

impl LogBackend for SemihostingBackend {
    fn write(&self, p_record: &LogRecord) {
        hprintln!(
            "[{:>8}] <{}> {}: {}",
            p_record.timestamp,
            p_record.level_tag(),
            p_record.module,
            p_record.message
        );
    }
}
