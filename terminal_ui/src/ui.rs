use taskboard_shared::{Task, TaskStatus};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::board::{Board, Tab};

const PLACEHOLDER: &str = "O que precisa ser feito?";

pub fn render<B: Backend>(f: &mut Frame<B>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // form
                Constraint::Length(1), // tabs
                Constraint::Min(3),    // list
                Constraint::Length(1), // key help
            ]
            .as_ref(),
        )
        .split(f.size());

    render_form(f, app, chunks[0]);
    render_tabs(f, app.board(), chunks[1]);
    render_tasks(f, app, chunks[2]);
    render_help(f, app, chunks[3]);

    if let Some(message) = app.board().alert() {
        render_alert(f, message);
    }
}

fn render_form<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let editing = app.form.editing;
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if app.form.input().is_empty() && !editing {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.form.input())
    };
    let form = Paragraph::new(Spans::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("To-Do List"),
    );
    f.render_widget(form, area);

    if editing {
        let x = area.x + 1 + app.form.input().chars().count() as u16;
        f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

fn render_tabs<B: Backend>(f: &mut Frame<B>, board: &Board, area: Rect) {
    let mut titles = vec![Spans::from(format!(
        "Tarefas Ativas ({})",
        board.active_tasks().len()
    ))];
    if board.supports_trash() {
        titles.push(Spans::from(format!(
            "Lixeira ({})",
            board.trashed_tasks().len()
        )));
    }
    let selected = match board.tab() {
        Tab::Active => 0,
        Tab::Trashed => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, area);
}

fn render_tasks<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let board = app.board();
    let block = Block::default().borders(Borders::ALL);

    if board.is_loading() {
        let loading = Paragraph::new("Carregando...")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    let tasks = board.visible_tasks();
    if tasks.is_empty() {
        let empty = match board.tab() {
            Tab::Active => "Nenhuma tarefa ativa.",
            Tab::Trashed => "A lixeira está vazia.",
        };
        let empty = Paragraph::new(Span::styled(empty, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = match board.tab() {
        Tab::Active => tasks.iter().map(active_row).collect(),
        Tab::Trashed => tasks.iter().map(trashed_row).collect(),
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Pending => Style::default().fg(Color::Yellow),
        TaskStatus::Doing => Style::default().fg(Color::LightBlue),
        TaskStatus::Done => Style::default().fg(Color::Green),
    }
}

fn active_row(task: &Task) -> ListItem<'static> {
    let title_style = if task.status == TaskStatus::Done {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    ListItem::new(Spans::from(vec![
        Span::styled(format!("[{}] {}", task.id, task.title), title_style),
        Span::raw("  "),
        Span::styled(task.status.label(), status_style(task.status)),
    ]))
}

fn trashed_row(task: &Task) -> ListItem<'static> {
    ListItem::new(Spans::from(Span::styled(
        format!("[{}] {}", task.id, task.title),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
}

fn render_help<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let help = if app.form.editing {
        "Enter adicionar  Esc voltar"
    } else {
        match app.board().tab() {
            Tab::Active if app.board().supports_trash() => {
                "a nova  p/f/c status  d lixeira  Tab abas  R atualizar  q sair"
            }
            Tab::Active => "a nova  p/f/c status  d excluir  R atualizar  q sair",
            Tab::Trashed => "r restaurar  Tab abas  R atualizar  q sair",
        }
    };
    let help = Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray)));
    f.render_widget(help, area);
}

fn render_alert<B: Backend>(f: &mut Frame<B>, message: &str) {
    let area = centered_rect(60, 7, f.size());
    let text = vec![
        Spans::from(message.to_string()),
        Spans::from(""),
        Spans::from(Span::styled(
            "Pressione qualquer tecla",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let alert = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Erro"),
        );
    f.render_widget(Clear, area);
    f.render_widget(alert, area);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `r`.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
