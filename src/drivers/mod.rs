pub mod console;
mod scripted;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

pub use scripted::ScriptedDriver;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
    /// Take over the input device (raw mode and the like).
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }
    /// Give the input device back. Must be safe after a failed `enter`.
    fn exit(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }

    fn enter(&mut self) -> io::Result<()> {
        (**self).enter()
    }

    fn exit(&mut self) -> io::Result<()> {
        (**self).exit()
    }
}

/// Run `body` with `driver` entered, and exit it on every path, including a
/// failed enter. The first error wins.
pub fn with_session<D, T, F>(driver: &mut D, body: F) -> io::Result<T>
where
    D: InputDriver,
    F: FnOnce(&mut D) -> io::Result<T>,
{
    let result = driver.enter().and_then(|()| body(driver));
    let restored = driver.exit();
    match result {
        Ok(value) => restored.map(|()| value),
        Err(err) => {
            if let Err(exit_err) = restored {
                tracing::warn!(%exit_err, "failed to restore input device");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        fail_enter: bool,
        entered: usize,
        exited: usize,
    }

    impl InputDriver for Recorder {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(false)
        }

        fn read(&mut self) -> io::Result<Event> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"))
        }

        fn enter(&mut self) -> io::Result<()> {
            self.entered += 1;
            if self.fail_enter {
                return Err(io::Error::other("no tty"));
            }
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            self.exited += 1;
            Ok(())
        }
    }

    #[test]
    fn session_exits_after_body_error() {
        let mut driver = Recorder::default();
        let result: io::Result<()> =
            with_session(&mut driver, |_| Err(io::Error::other("terminal setup failed")));
        assert!(result.is_err());
        assert_eq!((driver.entered, driver.exited), (1, 1));
    }

    #[test]
    fn session_exits_after_failed_enter() {
        let mut driver = Recorder {
            fail_enter: true,
            ..Recorder::default()
        };
        let mut ran = false;
        let result = with_session(&mut driver, |_| {
            ran = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(driver.exited, 1);
    }

    #[test]
    fn session_returns_body_value() {
        let mut driver = Recorder::default();
        assert_eq!(with_session(&mut driver, |_| Ok(7)).unwrap(), 7);
        assert_eq!(driver.exited, 1);
    }
}
