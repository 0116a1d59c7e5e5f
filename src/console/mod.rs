pub mod session;

pub use session::{ConsoleSession, SessionError, SessionOutcome};

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Общий канал вывода для сессии и фоновых уведомлений.
///
/// Каждая запись берёт замок целиком, так что строки из разных задач не
/// перемешиваются внутри одного сообщения.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn with_writer<T>(&self, f: impl FnOnce(&mut dyn Write) -> io::Result<T>) -> io::Result<T> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(writer.as_mut())
    }

    pub fn line(&self, text: &str) -> io::Result<()> {
        self.with_writer(|w| {
            writeln!(w, "{text}")?;
            w.flush()
        })
    }

    // Несколько строк одним блоком
    pub fn block(&self, lines: &[&str]) -> io::Result<()> {
        self.with_writer(|w| {
            for line in lines {
                writeln!(w, "{line}")?;
            }
            w.flush()
        })
    }

    /// Приглашение без перевода строки.
    pub fn prompt(&self, text: &str) -> io::Result<()> {
        self.with_writer(|w| {
            write!(w, "{text}")?;
            w.flush()
        })
    }
}
