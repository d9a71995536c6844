//! Terminal view: dedicated display thread presenting the meter screen.
//!
//! The thread owns the [`TextCanvas`] and decides when to render: on every
//! redraw request and, with no request pending, once per repaint interval.
//! Each frame is encoded into an [`OutputBuffer`] and written in one go.

use super::output::OutputBuffer;
use crate::actor::TerminalInput;
use crate::display::{RenderOutcome, Renderer, TextCanvas, ViewPort};
use crate::state::SharedState;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Commands sent to the display thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Render and present a fresh frame.
    Redraw,
    /// Exit the display thread.
    Shutdown,
}

/// Geometry and cadence of the view.
#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    /// Canvas width in columns.
    pub width: u16,
    /// Canvas height in rows.
    pub height: u16,
    /// Idle repaint period.
    pub repaint_interval: Duration,
    /// Top-left corner of the canvas on screen.
    pub origin: (u16, u16),
}

/// Display record backed by a terminal (or any writer).
pub struct TerminalView {
    commands: Sender<DisplayCommand>,
    handle: Option<JoinHandle<()>>,
    input: Option<TerminalInput>,
    frames: Arc<AtomicU64>,
}

impl TerminalView {
    /// Spawn the display thread writing frames to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the display thread.
    pub fn spawn<W>(
        writer: W,
        state: SharedState,
        renderer: Renderer,
        config: ViewConfig,
    ) -> io::Result<Self>
    where
        W: Write + Send + 'static,
    {
        // One pending redraw is enough; further requests coalesce.
        let (commands, receiver) = bounded(1);
        let frames = Arc::new(AtomicU64::new(0));

        let handle = {
            let frames = frames.clone();
            thread::Builder::new()
                .name("luxview-display".to_string())
                .spawn(move || {
                    let mut display = Display {
                        writer,
                        state,
                        renderer,
                        canvas: TextCanvas::new(config.width, config.height),
                        output: OutputBuffer::new(),
                        origin: config.origin,
                        frames,
                        first_frame: true,
                    };
                    display.run_loop(&receiver, config.repaint_interval);
                })?
        };

        Ok(Self {
            commands,
            handle: Some(handle),
            input: None,
            frames,
        })
    }

    /// Tie the input thread's lifetime to this view.
    #[must_use]
    pub fn with_input(mut self, input: TerminalInput) -> Self {
        self.input = Some(input);
        self
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(DisplayCommand::Shutdown);
            let _ = handle.join();
            debug!("Display thread stopped after {} frames", self.frames());
        }
        if let Some(mut input) = self.input.take() {
            input.stop();
        }
    }
}

impl ViewPort for TerminalView {
    fn update(&self) {
        // Full means a redraw is already pending.
        let _ = self.commands.try_send(DisplayCommand::Redraw);
    }

    fn release(&mut self) {
        self.shutdown();
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State owned by the display thread.
struct Display<W> {
    writer: W,
    state: SharedState,
    renderer: Renderer,
    canvas: TextCanvas,
    output: OutputBuffer,
    origin: (u16, u16),
    frames: Arc<AtomicU64>,
    first_frame: bool,
}

impl<W: Write> Display<W> {
    fn run_loop(&mut self, receiver: &Receiver<DisplayCommand>, repaint_interval: Duration) {
        self.present();
        loop {
            match receiver.recv_timeout(repaint_interval) {
                Ok(DisplayCommand::Redraw) | Err(RecvTimeoutError::Timeout) => self.present(),
                Ok(DisplayCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn present(&mut self) {
        if self.renderer.render(&mut self.canvas, &self.state) == RenderOutcome::Skipped {
            return;
        }

        self.output.clear();
        if self.first_frame {
            self.output.clear_screen();
        }
        self.output.write_canvas(&self.canvas, self.origin);

        match self.output.flush_to(&mut self.writer) {
            Ok(()) => {
                self.first_frame = false;
                self.frames.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => error!("Failed to present frame: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    const LOCK: Duration = Duration::from_millis(20);

    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedWriter {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn config(repaint: Duration) -> ViewConfig {
        ViewConfig {
            width: 32,
            height: 8,
            repaint_interval: repaint,
            origin: (0, 0),
        }
    }

    fn wait_for(view: &TerminalView, frames: u64) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while view.frames() < frames && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_presents_initial_frame() {
        let writer = SharedWriter::default();
        let state = SharedState::new();
        let mut view = TerminalView::spawn(
            writer.clone(),
            state,
            Renderer::new(LOCK),
            config(Duration::from_secs(3600)),
        )
        .unwrap();

        wait_for(&view, 1);
        view.release();

        let text = writer.text();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.contains("---"));
        assert!(text.contains("[ Send ]"));
    }

    #[test]
    fn test_update_presents_new_value() {
        let writer = SharedWriter::default();
        let state = SharedState::new();
        let mut view = TerminalView::spawn(
            writer.clone(),
            state.clone(),
            Renderer::new(LOCK),
            config(Duration::from_secs(3600)),
        )
        .unwrap();
        wait_for(&view, 1);

        state.acquire(LOCK).unwrap().record(321.5);
        view.update();
        wait_for(&view, 2);
        view.release();

        assert!(writer.text().contains("321.50"));
        assert_eq!(view.frames(), 2);
    }

    #[test]
    fn test_idle_repaint() {
        let writer = SharedWriter::default();
        let mut view = TerminalView::spawn(
            writer,
            SharedState::new(),
            Renderer::new(LOCK),
            config(Duration::from_millis(10)),
        )
        .unwrap();

        wait_for(&view, 3);
        view.release();
        assert!(view.frames() >= 3);
    }

    #[test]
    fn test_no_frames_after_release() {
        let writer = SharedWriter::default();
        let mut view = TerminalView::spawn(
            writer,
            SharedState::new(),
            Renderer::new(LOCK),
            config(Duration::from_millis(5)),
        )
        .unwrap();
        wait_for(&view, 1);

        view.release();
        let frames = view.frames();
        view.update();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(view.frames(), frames);
    }
}
