//! Status line renderer

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{ConsoleResult, CrosstermWidth, DEFAULT_COLUMNS, TerminalWidth};

/// How a renderer should pick its strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererMode {
    /// Width-aware when the terminal reports a width, fallback otherwise.
    #[default]
    Auto,
    WidthAware,
    Fallback,
}

/// Padding strategy, fixed for the lifetime of a renderer.
pub enum RenderStrategy {
    /// Pad every line out to the terminal width.
    WidthAware(Box<dyn TerminalWidth + Send>),
    /// Pad to the longest line rendered so far. Never shrinks.
    Fallback { last_rendered_length: usize },
}

impl RenderStrategy {
    pub fn fallback() -> Self {
        RenderStrategy::Fallback {
            last_rendered_length: 0,
        }
    }

    pub fn is_width_aware(&self) -> bool {
        matches!(self, RenderStrategy::WidthAware(_))
    }
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStrategy::WidthAware(width) => f
                .debug_tuple("WidthAware")
                .field(&width.columns())
                .finish(),
            RenderStrategy::Fallback {
                last_rendered_length,
            } => f
                .debug_struct("Fallback")
                .field("last_rendered_length", last_rendered_length)
                .finish(),
        }
    }
}

/// `'\r'`, then `text`, then spaces up to `width` characters.
///
/// Text already at or beyond `width` is emitted unpadded.
pub fn padded_line(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    let mut line = String::with_capacity(1 + text.len() + padding);
    line.push('\r');
    line.push_str(text);
    line.extend(std::iter::repeat_n(' ', padding));
    line
}

/// Writes a single status line that overwrites itself in place.
#[derive(Debug)]
pub struct StatusRenderer<W: Write> {
    out: W,
    strategy: RenderStrategy,
}

impl<W: Write> StatusRenderer<W> {
    pub fn new(out: W, mode: RendererMode) -> Self {
        match mode {
            RendererMode::Auto => Self::detect(out),
            RendererMode::WidthAware => Self::width_aware(out, CrosstermWidth),
            RendererMode::Fallback => Self::fallback(out),
        }
    }

    /// Pick the strategy by asking the controlling terminal for its width.
    pub fn detect(out: W) -> Self {
        Self::detect_with(out, CrosstermWidth)
    }

    /// Width-aware if `probe` can report a width now, fallback otherwise.
    pub fn detect_with<T>(out: W, probe: T) -> Self
    where
        T: TerminalWidth + Send + 'static,
    {
        match probe.columns() {
            Some(columns) => {
                tracing::debug!(columns, "terminal width available, padding to width");
                Self::width_aware(out, probe)
            }
            None => {
                tracing::warn!("terminal width unavailable, padding to longest line");
                Self::fallback(out)
            }
        }
    }

    pub fn width_aware<T>(out: W, width: T) -> Self
    where
        T: TerminalWidth + Send + 'static,
    {
        Self {
            out,
            strategy: RenderStrategy::WidthAware(Box::new(width)),
        }
    }

    pub fn fallback(out: W) -> Self {
        Self {
            out,
            strategy: RenderStrategy::fallback(),
        }
    }

    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    /// Overwrite the current line with `text` and flush.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`](crate::ConsoleError::Io) if writing or
    /// flushing the output fails.
    pub fn render_line(&mut self, text: &str) -> ConsoleResult<()> {
        let length = text.chars().count();
        let target = match &self.strategy {
            RenderStrategy::WidthAware(width) => {
                usize::from(width.columns().unwrap_or(DEFAULT_COLUMNS))
            }
            RenderStrategy::Fallback {
                last_rendered_length,
            } => (*last_rendered_length).max(length),
        };

        self.out.write_all(padded_line(text, target).as_bytes())?;
        self.out.flush()?;

        if let RenderStrategy::Fallback {
            last_rendered_length,
        } = &mut self.strategy
        {
            *last_rendered_length = target;
        }
        Ok(())
    }

    /// End the status line so later output starts on a fresh line.
    ///
    /// The fallback strategy forgets its padding width, since the new line
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`](crate::ConsoleError::Io) if writing or
    /// flushing the output fails.
    pub fn finish(&mut self) -> ConsoleResult<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        if let RenderStrategy::Fallback {
            last_rendered_length,
        } = &mut self.strategy
        {
            *last_rendered_length = 0;
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn)]

    use super::*;
    use crate::{FixedWidth, UnknownWidth};
    use std::io;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn written(renderer: &StatusRenderer<Vec<u8>>) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(renderer.get_ref())
    }

    #[test]
    fn test_padded_line() {
        assert_eq!(padded_line("abc", 6), "\rabc   ");
        assert_eq!(padded_line("abcdef", 3), "\rabcdef");
        assert_eq!(padded_line("", 2), "\r  ");
    }

    #[test]
    fn test_padded_line_counts_characters() {
        assert_eq!(padded_line("km/h ±", 8), "\rkm/h ±  ");
    }

    #[test]
    fn test_width_aware_pads_to_terminal_width() -> TestResult {
        let mut renderer = StatusRenderer::width_aware(Vec::new(), FixedWidth(20));
        renderer.render_line("twelve chars")?;

        let out = written(&renderer)?;
        let line = out.strip_prefix('\r').ok_or("missing carriage return")?;
        assert_eq!(line.chars().count(), 20);
        assert!(line.starts_with("twelve chars"));
        assert_eq!(line.get(12..), Some("        "));
        assert!(!out.contains('\n'));
        Ok(())
    }

    #[test]
    fn test_width_aware_does_not_truncate_long_text() -> TestResult {
        let mut renderer = StatusRenderer::width_aware(Vec::new(), FixedWidth(4));
        renderer.render_line("longer than four")?;
        assert_eq!(written(&renderer)?, "\rlonger than four");
        Ok(())
    }

    #[test]
    fn test_width_aware_defaults_to_eighty_columns() -> TestResult {
        let mut renderer = StatusRenderer::width_aware(Vec::new(), UnknownWidth);
        renderer.render_line("x")?;
        assert_eq!(written(&renderer)?.chars().count(), 81);
        Ok(())
    }

    #[test]
    fn test_width_aware_does_not_grow_between_lines() -> TestResult {
        let mut renderer = StatusRenderer::width_aware(Vec::new(), FixedWidth(10));
        renderer.render_line("abcdefgh")?;
        renderer.render_line("ab")?;
        assert_eq!(written(&renderer)?, "\rabcdefgh  \rab        ");
        Ok(())
    }

    #[test]
    fn test_fallback_keeps_longest_width() -> TestResult {
        let mut renderer = StatusRenderer::fallback(Vec::new());
        renderer.render_line("abcde")?;
        renderer.render_line("ab")?;
        assert_eq!(written(&renderer)?, "\rabcde\rab   ");
        Ok(())
    }

    #[test]
    fn test_fallback_grows_with_longer_text() -> TestResult {
        let mut renderer = StatusRenderer::fallback(Vec::new());
        renderer.render_line("ab")?;
        renderer.render_line("abcd")?;
        renderer.render_line("a")?;
        assert_eq!(written(&renderer)?, "\rab\rabcd\ra   ");
        assert!(matches!(
            renderer.strategy(),
            RenderStrategy::Fallback {
                last_rendered_length: 4
            }
        ));
        Ok(())
    }

    #[test]
    fn test_fallback_instances_are_independent() -> TestResult {
        let mut wide = StatusRenderer::fallback(Vec::new());
        let mut narrow = StatusRenderer::fallback(Vec::new());
        wide.render_line("a long status line")?;
        narrow.render_line("ab")?;
        assert_eq!(written(&narrow)?, "\rab");
        Ok(())
    }

    #[test]
    fn test_finish_resets_fallback_width() -> TestResult {
        let mut renderer = StatusRenderer::fallback(Vec::new());
        renderer.render_line("abcde")?;
        renderer.finish()?;
        renderer.render_line("ab")?;
        assert_eq!(written(&renderer)?, "\rabcde\n\rab");
        Ok(())
    }

    #[test]
    fn test_detect_with_reported_width() {
        let renderer = StatusRenderer::detect_with(Vec::new(), FixedWidth(100));
        assert!(renderer.strategy().is_width_aware());
    }

    #[test]
    fn test_detect_without_width_falls_back() {
        let renderer = StatusRenderer::detect_with(Vec::new(), UnknownWidth);
        assert!(!renderer.strategy().is_width_aware());
    }

    #[test]
    fn test_new_with_forced_modes() {
        let renderer = StatusRenderer::new(Vec::new(), RendererMode::Fallback);
        assert!(!renderer.strategy().is_width_aware());

        let renderer = StatusRenderer::new(Vec::new(), RendererMode::WidthAware);
        assert!(renderer.strategy().is_width_aware());
    }

    #[test]
    fn test_strategy_debug() {
        let strategy = RenderStrategy::WidthAware(Box::new(FixedWidth(42)));
        assert_eq!(format!("{strategy:?}"), "WidthAware(Some(42))");
        assert_eq!(
            format!("{:?}", RenderStrategy::fallback()),
            "Fallback { last_rendered_length: 0 }"
        );
    }

    #[test]
    fn test_renderer_mode_serde() -> TestResult {
        let mode: RendererMode = serde_json::from_str("\"width_aware\"")?;
        assert_eq!(mode, RendererMode::WidthAware);
        assert_eq!(RendererMode::default(), RendererMode::Auto);
        Ok(())
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut renderer = StatusRenderer::fallback(FailingWriter);
        assert!(renderer.render_line("abc").is_err());
        assert!(matches!(
            renderer.strategy(),
            RenderStrategy::Fallback {
                last_rendered_length: 0
            }
        ));
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_fallback_padding_never_shrinks(
            lines in proptest::collection::vec(".{0,40}", 1..20),
        ) {
            let mut renderer = StatusRenderer::fallback(Vec::new());
            let mut widest = 0usize;
            for text in &lines {
                prop_assert!(renderer.render_line(text).is_ok());
                widest = widest.max(text.chars().count());
                let is_expected = matches!(
                    renderer.strategy(),
                    RenderStrategy::Fallback { last_rendered_length }
                        if *last_rendered_length == widest
                );
                prop_assert!(is_expected);
            }
        }

        #[test]
        fn prop_width_aware_line_is_at_least_terminal_width(
            text in "[a-z ]{0,60}",
            columns in 1u16..120,
        ) {
            let mut renderer = StatusRenderer::width_aware(Vec::new(), FixedWidth(columns));
            prop_assert!(renderer.render_line(&text).is_ok());
            let out = String::from_utf8_lossy(renderer.get_ref()).into_owned();
            let expected = text.chars().count().max(usize::from(columns)) + 1;
            prop_assert_eq!(out.chars().count(), expected);
            prop_assert!(out.starts_with('\r'));
        }
    }
}
