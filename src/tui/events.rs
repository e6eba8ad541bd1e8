use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent};
use log::{debug, warn};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal size changed; the next draw picks it up.
    Resize,
    Tick,
}

/// Terminal input on a background thread, interleaved with periodic ticks.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let spawned = thread::Builder::new()
            .name("volant-input".into())
            .spawn(move || pump(tx, tick_rate));
        if let Err(e) = spawned {
            warn!("input thread did not start: {}", e);
        }

        Self { rx }
    }

    /// Blocks until the next event. Fails once the input thread is gone.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

fn pump(tx: mpsc::Sender<Event>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        match poll_once(timeout) {
            Ok(Some(ev)) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("terminal input failed: {}", e);
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if tx.send(Event::Tick).is_err() {
                break;
            }
            last_tick = Instant::now();
        }
    }
    debug!("input thread stopped");
}

fn poll_once(timeout: Duration) -> io::Result<Option<Event>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        CEvent::Key(key) => Some(Event::Key(key)),
        CEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    })
}
