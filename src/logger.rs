use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

/// Writer handed to the tracing subscriber; every event lands in the shared log file.
/// The terminal belongs to the UI, so nothing is ever written to stdout.
pub struct LogFileWriter;

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = LOG_FILE
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        match guard.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = LOG_FILE
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        match guard.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| io::Error::other("log file lock poisoned"))?;
    *guard = Some(file);
    Ok(())
}

/// Points logging at `path`. Safe to call more than once; later calls only swap the file.
pub fn init(path: &Path) -> io::Result<()> {
    open_log_file(path)?;

    let _ = tracing_subscriber::fmt()
        .with_writer(|| LogFileWriter)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    tracing::info!("Logging to {:?}", path);
    Ok(())
}
