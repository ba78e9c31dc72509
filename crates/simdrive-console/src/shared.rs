//! Renderer handle shared between threads

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ConsoleResult, StatusRenderer};

/// Cloneable handle to one [`StatusRenderer`].
///
/// Writes from different threads are serialized, so a status line is never
/// interleaved with another.
#[derive(Debug)]
pub struct SharedStatusRenderer<W: Write> {
    inner: Arc<Mutex<StatusRenderer<W>>>,
}

impl<W: Write> Clone for SharedStatusRenderer<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> SharedStatusRenderer<W> {
    pub fn new(renderer: StatusRenderer<W>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(renderer)),
        }
    }

    /// # Errors
    ///
    /// Returns the renderer's write error.
    pub fn render_line(&self, text: &str) -> ConsoleResult<()> {
        self.inner.lock().render_line(text)
    }

    /// # Errors
    ///
    /// Returns the renderer's write error.
    pub fn finish(&self) -> ConsoleResult<()> {
        self.inner.lock().finish()
    }

    /// Run `f` with the renderer locked.
    pub fn with_renderer<R>(&self, f: impl FnOnce(&mut StatusRenderer<W>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}
