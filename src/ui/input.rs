/// Keyboard capture.
///
/// A background thread reads terminal key events and posts the name of
/// the latest key-down into a single-slot mailbox. The game loop takes
/// (reads and clears) the slot once per tick, so at most one key is
/// handled per tick and a newer press overwrites an unconsumed one.
///
/// The quit key (and Ctrl+C, which raw mode turns into a key event)
/// stops the game as soon as it is seen, independent of tick timing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long the capture thread blocks on a poll before re-checking
/// the running flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// State shared between the capture thread and the game loop.
pub struct InputSlot {
    last_key: Mutex<Option<String>>,
    running: AtomicBool,
}

impl InputSlot {
    pub fn new() -> Self {
        InputSlot {
            last_key: Mutex::new(None),
            running: AtomicBool::new(true),
        }
    }

    /// Post a key, replacing any unconsumed one.
    pub fn store(&self, key: &str) {
        let mut slot = self.last_key.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(key.to_string());
    }

    /// Read and clear the slot.
    pub fn take(&self) -> Option<String> {
        self.last_key.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Default for InputSlot {
    fn default() -> Self {
        InputSlot::new()
    }
}

/// Record one key-down. Stops the game if it is the quit key.
pub fn observe(slot: &InputSlot, key: &str, quit_key: &str) {
    slot.store(key);
    if key == quit_key {
        log::info!("quit key '{key}' pressed");
        slot.stop();
    }
}

/// Keyboard-style name for a key event, or None for events that are
/// not key-downs or keys without a name.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let name = match key.code {
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "page up".to_string(),
        KeyCode::PageDown => "page down".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().collect(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };
    Some(name)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Handle to the running capture thread.
pub struct InputCapture {
    handle: JoinHandle<()>,
}

impl InputCapture {
    /// Start listening. Fails if the thread cannot be created.
    pub fn spawn(slot: Arc<InputSlot>, quit_key: String) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name("input".into())
            .spawn(move || listen(&slot, &quit_key))?;
        Ok(InputCapture { handle })
    }

    /// Wait for the thread to notice the stop flag and exit.
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("input thread panicked");
        }
    }
}

fn listen(slot: &InputSlot, quit_key: &str) {
    while slot.is_running() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log::error!("input poll failed: {e}");
                slot.stop();
                break;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => {
                if is_ctrl_c(&key) {
                    log::info!("ctrl+c pressed");
                    slot.stop();
                } else if let Some(name) = key_name(&key) {
                    observe(slot, &name, quit_key);
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("input read failed: {e}");
                slot.stop();
            }
        }
    }
    log::debug!("input thread exiting");
}
