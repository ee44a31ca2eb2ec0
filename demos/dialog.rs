//! Dialog-over-background demo for the overlay compositor.
//!
//! A block of background text fills the screen; pressing `d` toggles a
//! bordered dialog floating on top of it. The dialog shadows only its own
//! authored width, so the background stays visible around it. Esc quits.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use termdom::dom::node::{div, div_with, fixed_spacer, h1, p, span, text, zdiv, Node};
use termdom::dom::props::DivProps;
use termdom::dom::Dom;
use termdom::render::Renderer;
use termdom::style::{Padding, Style};
use termdom::{Key, KeyEvent, WindowSize};

struct App {
    dialog_open: bool,
}

fn background(window: &WindowSize) -> Node {
    let rows = window.height().saturating_sub(2) as usize;
    let mut lines = vec![h1("Background pane"), span("press d to toggle the dialog")];
    for row in 0..rows {
        lines.push(text("~".repeat(40) + &format!(" {row}")));
    }
    div(lines)
}

fn dialog() -> Node {
    div_with(
        DivProps {
            style: Some(
                Style::new()
                    .bordered()
                    .padding(Padding::symmetric(1, 2)),
            ),
            ..Default::default()
        },
        vec![div(vec![
            h1("Dialog"),
            p("The background shows through"),
            p("to the right of this box."),
        ])],
    )
}

fn build_tree(state: &Rc<RefCell<App>>, window: &WindowSize) -> Node {
    let mut layers = vec![background(window)];
    if state.borrow().dialog_open {
        // Offset the dialog a couple of rows down.
        layers.push(div(vec![fixed_spacer(2), dialog()]));
    }
    zdiv(layers)
}

fn draw(rendered: &str) -> io::Result<()> {
    let mut out = io::stdout();
    queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in rendered.split('\n').enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        write!(out, "{line}")?;
    }
    out.flush()
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;

    let state = Rc::new(RefCell::new(App { dialog_open: true }));
    let (cols, rows) = crossterm::terminal::size()?;
    let window = WindowSize::new(cols, rows);
    let renderer = Renderer::new();

    loop {
        let mut dom = Dom::new(build_tree(&state, &window), window.clone());
        let frame =
            renderer.render_to_string(dom.root(), window.width() as usize, window.height() as usize);
        draw(&frame)?;

        match event::read()? {
            Event::Key(key_event) => {
                if let Some(key) = KeyEvent::from_crossterm(key_event) {
                    match key.key {
                        Key::Esc => break,
                        Key::Char('d') => {
                            let mut app = state.borrow_mut();
                            app.dialog_open = !app.dialog_open;
                        }
                        _ => dom.dispatch_key_down(key),
                    }
                }
            }
            Event::Resize(width, height) => dom.dispatch_resize(width, height),
            _ => {}
        }
    }

    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}
