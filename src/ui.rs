use crate::catalog::Catalog;
use crate::item::{Item, ItemKind};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Unsorted,
    Name,
    Price,
    Quantity,
}

impl SortKey {
    pub fn title(&self) -> &str {
        match self {
            SortKey::Unsorted => "catalog order",
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Quantity => "quantity",
        }
    }
}

pub struct App<'a> {
    pub catalog: &'a mut Catalog,
    pub state: TableState,
    pub show_detail: bool,
    pub sort_key: SortKey,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        let mut state = TableState::default();
        if !catalog.is_empty() {
            state.select(Some(0));
        }

        Self {
            catalog,
            state,
            show_detail: false,
            sort_key: SortKey::Unsorted,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.state.selected().and_then(|i| self.catalog.items().get(i))
    }

    /// Re-sort through the catalog so the transaction log records it.
    /// The selection follows the item that was selected before.
    pub fn sort(&mut self, key: SortKey) {
        let selected_id = self.selected_item().map(Item::id);

        match key {
            SortKey::Name => self.catalog.sort_by_name(),
            SortKey::Price => self.catalog.sort_by_price(),
            SortKey::Quantity => self.catalog.sort_by_quantity(),
            SortKey::Unsorted => return,
        }
        self.sort_key = key;

        if let Some(id) = selected_id {
            let index = self.catalog.items().iter().position(|item| item.id() == id);
            self.state.select(index);
        }
    }

    pub fn next(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_SIZE).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(PAGE_SIZE),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.catalog.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.catalog.is_empty() {
            self.state.select(Some(self.catalog.len() - 1));
        }
    }
}

pub fn run_ui(catalog: &mut Catalog) -> Result<()> {
    let mut app = App::new(catalog);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Char('1') => app.sort(SortKey::Name),
                KeyCode::Char('2') => app.sort(SortKey::Price),
                KeyCode::Char('3') => app.sort(SortKey::Quantity),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with totals
            Constraint::Min(0),    // Item table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.catalog.statistics();

    let spans = vec![
        Span::styled(
            "Inventory",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Products: {}", stats.count),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Units: {}", stats.total_quantity),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Value: ₹{}", stats.total_value_display()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Sorted by {}", app.sort_key.title()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn kind_color(item: &Item) -> Color {
    match item.kind() {
        ItemKind::General => Color::White,
        ItemKind::Electronics { .. } => Color::Cyan,
        ItemKind::Grocery { .. } => Color::Green,
    }
}

/// Variant-specific column: measure for general/grocery, brand for electronics.
fn details_cell(item: &Item) -> String {
    match item.kind() {
        ItemKind::General => format!("{:.2} {}", item.weight(), item.unit()),
        ItemKind::Electronics {
            warranty_months,
            brand,
        } => format!("{} ({} mo)", brand, warranty_months),
        ItemKind::Grocery { perishable, .. } => format!(
            "{:.2} {}{}",
            item.weight(),
            item.unit(),
            if *perishable { " *" } else { "" }
        ),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["ID", "Name", "Qty", "Price", "Category", "Details"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.catalog.items().iter().map(|item| {
        let color = kind_color(item);
        let qty_style = if item.quantity() <= 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        let cells = vec![
            Cell::from(item.id().to_string()),
            Cell::from(truncate(item.name(), 30)),
            Cell::from(item.quantity().to_string()).style(qty_style),
            Cell::from(format!("₹{:.2}", item.price())),
            Cell::from(item.category().to_string()).style(Style::default().fg(color)),
            Cell::from(truncate(&details_cell(item), 24)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(32),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(13),
            Constraint::Length(26),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Products "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.catalog.len();

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        key("1/2/3"),
        Span::raw(" Sort name/price/qty | "),
        key("Enter"),
        Span::raw(" Details | "),
        key("↑/↓"),
        Span::raw(" Nav | "),
        key("PgUp/PgDn"),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Back"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let Some(item) = app.selected_item() else {
        let no_selection = Paragraph::new("No product selected").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Product Details "),
        );
        f.render_widget(no_selection, area);
        return;
    };

    let label = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![label("  ID: "), Span::raw(item.id().to_string())]),
        Line::from(""),
        Line::from(vec![label("  Name: "), Span::raw(item.name())]),
        Line::from(""),
        Line::from(vec![
            label("  Category: "),
            Span::styled(item.category(), Style::default().fg(kind_color(item))),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Price: "),
            Span::raw(format!("₹{:.2}", item.price())),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Quantity: "),
            Span::raw(item.quantity().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Stock value: "),
            Span::styled(
                format!("₹{:.2}", item.total_value()),
                Style::default().fg(if item.total_value() < 0.0 {
                    Color::Red
                } else {
                    Color::Green
                }),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Weight: "),
            Span::raw(format!("{:.2} {}", item.weight(), item.unit())),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
    ];

    match item.kind() {
        ItemKind::General => {}
        ItemKind::Electronics {
            warranty_months,
            brand,
        } => {
            content.push(Line::from(vec![label("  Brand: "), Span::raw(brand.as_str())]));
            content.push(Line::from(""));
            content.push(Line::from(vec![
                label("  Warranty: "),
                Span::raw(format!("{} months", warranty_months)),
            ]));
        }
        ItemKind::Grocery {
            expiry_date,
            perishable,
        } => {
            content.push(Line::from(vec![
                label("  Expires: "),
                Span::raw(expiry_date.format("%Y-%m-%d").to_string()),
            ]));
            content.push(Line::from(""));
            content.push(Line::from(vec![
                label("  Storage: "),
                Span::raw(if *perishable {
                    "Perishable"
                } else {
                    "Non-Perishable"
                }),
            ]));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Product Details "),
    );

    f.render_widget(detail_panel, area);
}
