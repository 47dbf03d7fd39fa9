use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;

use crate::error::{DeskError, DeskResult};

/// Where log records go. The desktop owns the alternate screen, so writing
/// to stderr would corrupt the display; without a log file records are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Sink,
    File(PathBuf),
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut guard) => guard.write(buf),
                Err(_) => Ok(buf.len()),
            },
            DelegatingInner::Sink(sink) => sink.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut guard) => guard.flush(),
                Err(_) => Ok(()),
            },
            DelegatingInner::Sink(sink) => sink.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    pub fn for_target(target: &LogTarget) -> DeskResult<Self> {
        match target {
            LogTarget::Sink => Ok(Self::default()),
            LogTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| DeskError::Log {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Self {
                    file: Some(Arc::new(Mutex::new(file))),
                })
            }
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. Opening the log file can fail; a
/// subscriber that is already installed is left in place.
pub fn init(target: &LogTarget, level: LevelFilter) -> DeskResult<()> {
    let writer = SubscriberMakeWriter::for_target(target)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
