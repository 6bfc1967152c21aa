use std::{
    io,
    sync::mpsc::Sender,
    thread::{self, JoinHandle},
    time::Duration,
};

use ratatui::crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};

/// Payload of every tick. Progress is driven by the tick interval, this is
/// only the heartbeat value.
pub const TICK_INCREMENT: f32 = 0.004;

#[derive(Debug)]
pub enum Event {
    Tick(f32),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Failed(io::Error),
}

/// Emits a tick every `interval` until the receiving side goes away.
pub fn spawn_ticker(tx: Sender<Event>, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(Event::Tick(TICK_INCREMENT)).is_err() {
                break;
            }
        }
    })
}

/// Forwards terminal input into the event channel.
pub fn spawn_input(tx: Sender<Event>) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(event::Event::Mouse(mouse)) => Event::Mouse(mouse),
                Ok(event::Event::Resize(..)) => Event::Resize,
                Ok(_) => continue,
                Err(e) => {
                    let _ = tx.send(Event::Failed(e));
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn ticks_until_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_ticker(tx, Duration::from_millis(1));

        for _ in 0..3 {
            match rx.recv_timeout(Duration::from_secs(1)) {
                Ok(Event::Tick(step)) => assert_eq!(step, TICK_INCREMENT),
                other => panic!("expected a tick, got {other:?}"),
            }
        }

        drop(rx);
        handle.join().expect("ticker thread panicked");
    }
}
