//! Login form demo: two inputs and a button wired through the focus chain.
//!
//! Up/Down moves focus, typing edits the focused input, Enter on the
//! button submits, Esc quits.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use termdom::dom::node::{button, div, div_with, h1, hdiv, input, span, text, Node};
use termdom::dom::props::{ButtonProps, CursorMove, DivProps, InputProps};
use termdom::dom::Dom;
use termdom::render::Renderer;
use termdom::style::{Padding, Style};
use termdom::{KeyEvent, WindowSize};

#[derive(Default)]
struct Field {
    value: String,
    cursor: usize,
}

#[derive(Default)]
struct App {
    username: Field,
    password: Field,
    focus: usize,
    submitted: Option<String>,
}

fn field_node(state: &Rc<RefCell<App>>, label: &str, index: usize) -> Node {
    let (value, cursor, focused) = {
        let app = state.borrow();
        let field = if index == 0 {
            &app.username
        } else {
            &app.password
        };
        (field.value.clone(), field.cursor, app.focus == index)
    };

    let on_change = {
        let state = state.clone();
        Rc::new(move |new_value: String| {
            let mut app = state.borrow_mut();
            let field = if index == 0 {
                &mut app.username
            } else {
                &mut app.password
            };
            field.value = new_value;
        })
    };
    let on_cursor = {
        let state = state.clone();
        Rc::new(move |movement: CursorMove| {
            let mut app = state.borrow_mut();
            let field = if index == 0 {
                &mut app.username
            } else {
                &mut app.password
            };
            let len = field.value.chars().count();
            field.cursor = match movement {
                CursorMove::Seek(position) => position.min(len),
                CursorMove::Delta(delta) => {
                    field.cursor.saturating_add_signed(delta as isize).min(len)
                }
            };
        })
    };

    let shown = if index == 1 {
        "•".repeat(value.chars().count())
    } else {
        value
    };

    hdiv(vec![
        span(format!("{label:>9}: ")),
        input(InputProps {
            value: shown,
            cursor_position: cursor,
            placeholder: format!("enter {}", label.to_lowercase()),
            focused,
            on_change: Some(on_change),
            on_cursor_move: Some(on_cursor),
            ..Default::default()
        }),
    ])
}

fn build_tree(state: &Rc<RefCell<App>>) -> Node {
    let (focus, submitted) = {
        let app = state.borrow();
        (app.focus, app.submitted.clone())
    };

    // Enter on the focused button fires on_click as default behavior.
    let on_click = {
        let state = state.clone();
        Rc::new(move || {
            let mut app = state.borrow_mut();
            app.submitted = Some(app.username.value.clone());
        })
    };

    let mut children = vec![
        h1("Sign in"),
        field_node(state, "Username", 0),
        field_node(state, "Password", 1),
        button(
            "[ Submit ]",
            ButtonProps {
                focused: focus == 2,
                on_click: Some(on_click),
                ..Default::default()
            },
        ),
    ];
    if let Some(user) = submitted {
        children.push(text(format!("welcome, {user}")));
    }
    children.push(span("Up/Down: focus   Esc: quit"));

    div_with(
        DivProps {
            style: Some(Style::new().bordered().padding(Padding::symmetric(0, 1))),
            ..Default::default()
        },
        vec![div(children)],
    )
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

    let state = Rc::new(RefCell::new(App::default()));
    let (cols, rows) = crossterm::terminal::size()?;
    let window = WindowSize::new(cols, rows);
    let renderer = Renderer::new();

    loop {
        let mut dom = Dom::new(build_tree(&state), window.clone());
        // The engine tracks focus moves; mirror them back into app state
        // so the next frame's props agree.
        sync_focus(&state, &dom);
        let frame =
            renderer.render_to_string(dom.root(), window.width() as usize, window.height() as usize);
        draw(&frame)?;

        match event::read()? {
            Event::Key(key_event) => {
                if let Some(key) = KeyEvent::from_crossterm(key_event) {
                    if key.key == termdom::Key::Esc {
                        break;
                    }
                    dom.dispatch_key_down(key);
                    sync_focus(&state, &dom);
                }
            }
            Event::Resize(width, height) => dom.dispatch_resize(width, height),
            _ => {}
        }
    }

    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

fn sync_focus(state: &Rc<RefCell<App>>, dom: &Dom) {
    // Focusables appear in declaration order: username, password, button.
    if let Some(focused) = dom.focused() {
        if let Some(rank) = dom.focusables().iter().position(|&id| id == focused) {
            state.borrow_mut().focus = rank;
        }
    }
}
