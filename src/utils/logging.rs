use std::sync::atomic::{AtomicBool, Ordering};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use once_cell::sync::Lazy;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

/// Default file used when file logging is requested without an explicit path
pub const DEFAULT_LOG_FILE: &str = "queueflow.log";

/// Initializes logging based on environment variables:
/// - QUEUEFLOW_LOGGING: enables/disables logging (true/false)
/// - QUEUEFLOW_LOG_TO_FILE: controls whether logs go to file or stdout (true/false, default false)
/// - QUEUEFLOW_LOG_FILE: path of the log file (default `queueflow.log`)
///
/// To enable logging in tests, run: QUEUEFLOW_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("QUEUEFLOW_LOGGING") {
        Ok(value) => match value.as_str() {
            "true" => {
                ENABLE_LOGGING.store(true, Ordering::SeqCst);
                if env::var("QUEUEFLOW_LOG_TO_FILE").map(|v| v == "true").unwrap_or(false) {
                    let path = env::var("QUEUEFLOW_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
                    open_log_file(&path);
                }
            }
            "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
            other => {
                eprintln!(
                    "QUEUEFLOW_LOGGING must be 'true' or 'false' (got '{}'), logging disabled",
                    other
                );
                ENABLE_LOGGING.store(false, Ordering::SeqCst);
            }
        },
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }
}

/// Returns whether log lines are currently emitted
pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

fn open_log_file(path: &str) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(file);
                LOG_TO_FILE.store(true, Ordering::SeqCst);
            }
        }
        // Fall back to stdout
        Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
    }
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let log_message = format!("  [{}]   {}\n", prefix, message);

    if LOG_TO_FILE.load(Ordering::SeqCst) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                if let Err(e) = file.write_all(log_message.as_bytes()) {
                    eprintln!("Failed to write to log file: {}", e);
                }
                if let Err(e) = file.flush() {
                    eprintln!("Failed to flush log file: {}", e);
                }
                return;
            }
        }
    }
    print!("{}", log_message);
}
