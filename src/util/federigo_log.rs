use log::{debug, error, info, warn};

// Defines the type of logs
// https://stackoverflow.com/questions/69015213/how-can-i-display-an-enum-in-lowercase
#[derive (Debug, Clone, Copy, PartialEq, strum::Display)]
#[strum (serialize_all = "UPPERCASE")]
pub enum LogTypes {
    Info,
    Warning,
    Error,
    Debug
}

// Defines where the logs can come from
#[derive (Debug, Clone, Copy, PartialEq, strum::Display)]
#[strum (serialize_all = "UPPERCASE")]
pub enum LogSources {
    Federigo,
    Lexer,
    Parser,
    SymbolTable
}

// Function that logs a message with the given type and source
pub fn log(log_type: LogTypes, src: LogSources, msg: String) {
    let line: String = format_log(log_type, src, &msg);

    // Route to the matching level of the log facade
    match log_type {
        LogTypes::Info => info!("{}", line),
        LogTypes::Warning => warn!("{}", line),
        LogTypes::Error => error!("{}", line),
        LogTypes::Debug => debug!("{}", line)
    }
}

fn format_log(log_type: LogTypes, src: LogSources, msg: &str) -> String {
    return format!("[{} - {}]: {}", log_type, src, msg);
}

// Records log lines per thread so tests can inspect what a call logged
#[cfg(test)]
pub mod capture {
    use std::cell::RefCell;

    use log::{LevelFilter, Log, Metadata, Record};

    struct CaptureLogger;

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            return true;
        }

        fn log(&self, record: &Record) {
            CAPTURED.with(|captured| captured.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    // Installs the logger (once per test binary) and clears this thread's lines
    pub fn start() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Debug);
        CAPTURED.with(|captured| captured.borrow_mut().clear());
    }

    pub fn take() -> Vec<String> {
        return CAPTURED.with(|captured| captured.replace(Vec::new()));
    }
}
