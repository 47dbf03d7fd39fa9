use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_desk::apps::AppKind;
use term_desk::desktop::{Desktop, DesktopCommand};
use term_desk::ui::UiFrame;
use term_desk::window::{FloatRect, Size, WindowState, WmPolicy};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 30;

fn desktop() -> Desktop {
    Desktop::new(
        Size::new(WIDTH, HEIGHT),
        WmPolicy::default(),
        Duration::from_millis(500),
    )
}

fn draw(desktop: &mut Desktop) -> Buffer {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut buf = Buffer::empty(area);
    {
        let mut frame = UiFrame::from_parts(area, &mut buf);
        desktop.draw(&mut frame);
    }
    buf
}

fn screen_text(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
        }
        out.push('\n');
    }
    out
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click_at(desktop: &mut Desktop, column: u16, row: u16, at: Instant) -> DesktopCommand {
    let command = desktop.handle_event_at(
        &mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        at,
    );
    desktop.handle_event_at(
        &mouse(MouseEventKind::Up(MouseButton::Left), column, row),
        at,
    );
    command
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

// A 40x12 window at (30,5): controls span columns 60..69 on row 5.
fn open_about(desktop: &mut Desktop) -> u64 {
    desktop.open_app(AppKind::About, Some(FloatRect::new(30, 5, 40, 12)))
}

#[test]
fn close_button_removes_window_and_content() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    draw(&mut desktop);
    assert!(desktop.has_content(id));

    click_at(&mut desktop, 67, 5, Instant::now());
    assert!(desktop.wm().window(id).is_none());
    assert!(!desktop.has_content(id));
    assert_eq!(desktop.wm().active(), None);
}

#[test]
fn title_drag_moves_window() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    draw(&mut desktop);
    let now = Instant::now();
    desktop.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 5), now);
    assert_eq!(desktop.wm().dragging(), Some(id));
    desktop.handle_event_at(&mouse(MouseEventKind::Drag(MouseButton::Left), 45, 9), now);
    desktop.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), 45, 9), now);
    assert_eq!(desktop.wm().dragging(), None);
    assert_eq!(
        desktop.wm().window(id).map(|w| w.rect()),
        Some(FloatRect::new(35, 9, 40, 12))
    );
}

#[test]
fn double_click_on_title_maximizes_and_restores() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    draw(&mut desktop);
    let t0 = Instant::now();
    click_at(&mut desktop, 40, 5, t0);
    click_at(&mut desktop, 40, 5, t0 + Duration::from_millis(100));
    let window = desktop.wm().window(id).expect("window");
    assert_eq!(window.state(), WindowState::Maximized);
    assert_eq!(window.rect(), FloatRect::new(0, 0, WIDTH, HEIGHT - 1));

    // slow clicks are two single clicks
    let t1 = t0 + Duration::from_secs(5);
    click_at(&mut desktop, 20, 0, t1);
    click_at(&mut desktop, 20, 0, t1 + Duration::from_secs(2));
    assert!(desktop.wm().window(id).is_some_and(|w| w.is_maximized()));

    click_at(&mut desktop, 20, 0, t1 + Duration::from_millis(2100));
    assert_eq!(
        desktop.wm().window(id).map(|w| w.rect()),
        Some(FloatRect::new(30, 5, 40, 12))
    );
}

#[test]
fn minimize_button_and_taskbar_round_trip() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    draw(&mut desktop);
    click_at(&mut desktop, 61, 5, Instant::now());
    assert!(desktop.wm().window(id).is_some_and(|w| w.is_minimized()));

    let buf = draw(&mut desktop);
    let text = screen_text(&buf);
    let taskbar = text.lines().nth(HEIGHT as usize - 1).expect("taskbar row");
    assert!(taskbar.contains("[About Me]"), "taskbar was {taskbar:?}");

    // the first taskbar button follows the 9-cell start button and a gap
    click_at(&mut desktop, 12, HEIGHT - 1, Instant::now());
    assert!(desktop.wm().window(id).is_some_and(|w| !w.is_minimized()));
    assert_eq!(desktop.wm().active(), Some(id));

    draw(&mut desktop);
    click_at(&mut desktop, 12, HEIGHT - 1, Instant::now());
    assert!(desktop.wm().window(id).is_some_and(|w| w.is_minimized()));
}

#[test]
fn start_menu_launches_apps_and_exits() {
    let mut desktop = desktop();
    draw(&mut desktop);
    click_at(&mut desktop, 2, HEIGHT - 1, Instant::now());
    assert!(desktop.state().menu_open());

    // eight items plus the frame, anchored above the taskbar
    draw(&mut desktop);
    let top = HEIGHT - 1 - 10;
    click_at(&mut desktop, 3, top + 1, Instant::now());
    assert!(!desktop.state().menu_open());
    assert_eq!(desktop.wm().len(), 1);
    let opened = desktop.wm().windows().next().expect("window");
    assert_eq!(opened.app_kind(), &AppKind::About);

    // keyboard navigation down to Exit
    desktop.handle_event(&key(KeyCode::F(1), KeyModifiers::NONE));
    assert!(desktop.state().menu_open());
    for _ in 0..7 {
        desktop.handle_event(&key(KeyCode::Down, KeyModifiers::NONE));
    }
    assert_eq!(
        desktop.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE)),
        DesktopCommand::Quit
    );
}

#[test]
fn clicking_outside_menu_closes_it_and_still_acts() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    draw(&mut desktop);
    desktop.handle_event(&key(KeyCode::Char('s'), KeyModifiers::ALT));
    assert!(desktop.state().menu_open());
    draw(&mut desktop);
    click_at(&mut desktop, 67, 5, Instant::now());
    assert!(!desktop.state().menu_open());
    assert!(desktop.wm().window(id).is_none());
}

#[test]
fn double_clicking_an_icon_opens_its_app() {
    let mut desktop = desktop();
    draw(&mut desktop);
    let t0 = Instant::now();
    // third icon row: Terminal
    click_at(&mut desktop, 4, 7, t0);
    assert_eq!(desktop.state().selected_icon(), Some(2));
    assert!(desktop.wm().is_empty());
    click_at(&mut desktop, 4, 7, t0 + Duration::from_millis(200));
    let window = desktop.wm().windows().next().expect("opened");
    assert_eq!(window.app_kind(), &AppKind::Terminal);
    assert!(desktop.has_content(window.id()));
}

#[test]
fn keys_reach_the_focused_terminal() {
    let mut desktop = desktop();
    let id = desktop.open_app(AppKind::Terminal, Some(FloatRect::new(2, 2, 60, 12)));
    for c in "echo portfolio".chars() {
        desktop.handle_event(&key(KeyCode::Char(c), KeyModifiers::NONE));
    }
    desktop.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE));
    let text = screen_text(&draw(&mut desktop));
    assert!(text.contains("echo portfolio"));
    assert!(text.lines().any(|l| l.contains("│portfolio")));

    // window shortcuts are not typed into the shell
    desktop.handle_event(&key(KeyCode::Char('w'), KeyModifiers::ALT));
    assert!(desktop.wm().window(id).is_none());
}

#[test]
fn overlapping_windows_paint_in_stacking_order() {
    let mut desktop = desktop();
    let back = desktop.open_app(AppKind::About, Some(FloatRect::new(10, 2, 40, 12)));
    let front = desktop.open_app(
        AppKind::Other("notes".into()),
        Some(FloatRect::new(20, 4, 40, 12)),
    );
    let text = screen_text(&draw(&mut desktop));
    let row4 = text.lines().nth(4).expect("row");
    assert!(row4.contains("notes"), "row was {row4:?}");

    // clicking the back window's exposed content raises it
    click_at(&mut desktop, 12, 8, Instant::now());
    assert_eq!(desktop.wm().active(), Some(back));
    assert_eq!(desktop.wm().stacking_order(), vec![front, back]);
}

#[test]
fn terminal_resize_refits_maximized_windows() {
    let mut desktop = desktop();
    let id = open_about(&mut desktop);
    desktop.handle_event(&key(KeyCode::F(11), KeyModifiers::NONE));
    desktop.handle_event(&Event::Resize(80, 20));
    assert_eq!(
        desktop.wm().window(id).map(|w| w.rect()),
        Some(FloatRect::new(0, 0, 80, 19))
    );
}

#[test]
fn quit_key_ends_the_session() {
    let mut desktop = desktop();
    assert_eq!(
        desktop.handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        DesktopCommand::Quit
    );
}

#[test]
fn unbound_keys_are_typed_into_the_focused_editor() {
    let mut desktop = desktop();
    let id = desktop.open_app(AppKind::Editor, Some(FloatRect::new(2, 2, 60, 12)));
    desktop.handle_event(&key(KeyCode::Char('h'), KeyModifiers::NONE));
    desktop.handle_event(&key(KeyCode::Char('i'), KeyModifiers::NONE));
    let text = screen_text(&draw(&mut desktop));
    let row = text.lines().nth(3).expect("first content row");
    assert!(row.contains("│hi"), "row was {row:?}");

    // bound keys act on the window instead
    desktop.handle_event(&key(KeyCode::Char('m'), KeyModifiers::ALT));
    assert!(desktop.wm().window(id).is_some_and(|w| w.is_minimized()));
}

#[test]
fn f12_toggles_mouse_capture() {
    let mut desktop = desktop();
    assert!(desktop.state().mouse_capture_enabled());
    desktop.handle_event(&key(KeyCode::F(12), KeyModifiers::NONE));
    assert!(!desktop.state().mouse_capture_enabled());
    assert_eq!(desktop.take_mouse_capture_change(), Some(false));
    desktop.handle_event(&key(KeyCode::F(12), KeyModifiers::NONE));
    assert_eq!(desktop.take_mouse_capture_change(), Some(true));
}

#[test]
fn far_away_explicit_geometry_draws_without_panicking() {
    let mut desktop = desktop();
    let id = desktop.open_app(AppKind::About, Some(FloatRect::new(i32::MAX - 5, 0, 30, 10)));
    let text = screen_text(&draw(&mut desktop));
    assert!(desktop.wm().window(id).is_some());
    let taskbar = text.lines().nth(HEIGHT as usize - 1).expect("taskbar row");
    assert!(taskbar.contains("About Me"), "taskbar was {taskbar:?}");
}
