use std::time::Duration;

use crate::desktop::{Desktop, DesktopCommand};
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::DeskResult;
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `desktop` until it asks to quit. The screen is redrawn on every
/// tick; the output driver is left entered, callers own `exit`.
pub fn run_desktop<D, O>(
    desktop: &mut Desktop,
    input: D,
    output: &mut O,
    poll_interval: Duration,
) -> DeskResult<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(input, poll_interval);
    event_loop
        .driver()
        .set_mouse_capture(desktop.mouse_capture_enabled())?;
    // the initial state was applied above
    let _ = desktop.take_mouse_capture_change();

    event_loop.run(|driver, event| {
        let flow = match event {
            None => {
                output.draw(|mut frame| desktop.draw(&mut frame))?;
                ControlFlow::Continue
            }
            Some(event) => match desktop.handle_event(&event) {
                DesktopCommand::Continue => ControlFlow::Continue,
                DesktopCommand::Quit => ControlFlow::Quit,
            },
        };
        if let Some(enabled) = desktop.take_mouse_capture_change()
            && let Err(err) = driver.set_mouse_capture(enabled)
        {
            tracing::warn!(%err, enabled, "failed to toggle mouse capture");
        }
        Ok(flow)
    })?;
    tracing::info!(windows = desktop.wm().len(), "desktop loop finished");
    Ok(())
}
