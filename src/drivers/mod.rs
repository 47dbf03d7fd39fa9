pub mod console;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

use crate::ui::UiFrame;

/// Source of terminal input. The desktop only ever sees events through this,
/// so tests can script a session without a tty.
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
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
}

/// Screen the desktop paints into.
pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn enter(&mut self) -> io::Result<()> {
        (**self).enter()
    }

    fn exit(&mut self) -> io::Result<()> {
        (**self).exit()
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        (**self).draw(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn drain(mut driver: impl InputDriver) -> Vec<Event> {
        let mut out = Vec::new();
        while driver.poll(Duration::ZERO).unwrap() {
            out.push(driver.read().unwrap());
        }
        out
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        let mut driver = Scripted(VecDeque::from([key.clone()]));
        assert_eq!(drain(&mut driver), vec![key]);
        assert!(driver.read().is_err());
        assert!(driver.set_mouse_capture(false).is_ok());
    }
}
