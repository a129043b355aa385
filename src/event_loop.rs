use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler.
#[derive(Debug, Clone)]
pub enum LoopEvent {
    /// An input event from the driver.
    Input(Event),
    /// Once per iteration, before input is drained. `elapsed` is the time
    /// since the previous frame; use it to advance timers and redraw.
    Frame { elapsed: Duration },
}

/// Single-threaded loop that owns input polling for the host.
///
/// Every desktop mutation happens inside the handler, one event at a time,
/// so no operation ever observes another half-applied.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame);
            last_frame = now;
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Frame { elapsed })? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (drags, paste) before the next frame so input
                // never queues up behind rendering.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Input(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn delivers_queued_input_between_frames() {
        let driver = ScriptedDriver::new(vec![key('a'), key('b')]);
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut frames = 0;
        event_loop
            .run(|_, event| {
                match event {
                    LoopEvent::Input(Event::Key(k)) => seen.push(k.code),
                    LoopEvent::Input(_) => {}
                    LoopEvent::Frame { .. } => {
                        frames += 1;
                        if frames > 2 {
                            return Ok(ControlFlow::Quit);
                        }
                    }
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('b')]);
        // Both keys drain in one burst after the first frame.
        assert_eq!(frames, 3);
    }

    #[test]
    fn quit_from_input_stops_immediately() {
        let driver = ScriptedDriver::new(vec![key('q'), key('x')]);
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = 0;
        event_loop
            .run(|_, event| match event {
                LoopEvent::Input(_) => {
                    seen += 1;
                    Ok(ControlFlow::Quit)
                }
                LoopEvent::Frame { .. } => Ok(ControlFlow::Continue),
            })
            .unwrap();
        assert_eq!(seen, 1);
        assert_eq!(event_loop.driver().remaining(), 1);
    }
}
