use std::path::{Path, PathBuf};

use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::categorizer::RuleSet;
use crate::chart::ChartView;
use crate::fmt;
use crate::picker::{self, FilePicker, PickerAction};
use crate::reports::summarize;
use crate::table::{Column, ExpenseTable};
use crate::tui::{
    self, centered_rect, View, ViewAction, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE, INFO_STYLE,
    SELECTED_STYLE,
};

pub const NO_DATA: &str = "No data to display";
const COLUMN_SPACING: u16 = 1;

enum Overlay {
    None,
    Picker(FilePicker),
    Chart(ChartView),
    Error(String),
    Info(String),
}

pub struct ExpenseBrowser {
    table: ExpenseTable,
    rules: RuleSet,
    selected: usize,
    visible_count: usize,
    overlay: Overlay,
    status_message: Option<String>,
    table_state: TableState,
    /// Header row y and the x-span of each column, from the last draw.
    header_hit: Option<(u16, Vec<(u16, u16)>)>,
    picker_dir: PathBuf,
}

fn column_widths() -> [Constraint; 4] {
    [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Fill(1),
        Constraint::Length(10),
    ]
}

impl ExpenseBrowser {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_table(rules, ExpenseTable::default())
    }

    pub fn with_table(rules: RuleSet, table: ExpenseTable) -> Self {
        Self {
            table,
            rules,
            selected: 0,
            visible_count: 1,
            overlay: Overlay::None,
            status_message: None,
            table_state: TableState::default(),
            header_hit: None,
            picker_dir: picker::start_dir(),
        }
    }

    pub fn table(&self) -> &ExpenseTable {
        &self.table
    }

    /// Load action. Success replaces the table; failure leaves it untouched
    /// and raises the error modal.
    pub fn load_file(&mut self, path: &Path) {
        match self.table.load(path, &self.rules) {
            Ok(count) => {
                self.selected = 0;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status_message = Some(format!(
                    "Loaded {count} expenses from {name} at {}",
                    Local::now().format("%H:%M:%S")
                ));
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.picker_dir = parent.to_path_buf();
                }
            }
            Err(e) => {
                log::info!("failed to load {}: {e}", path.display());
                self.overlay = Overlay::Error(format!(
                    "Failed to process file. Ensure it is in the correct format.\nError: {e}"
                ));
            }
        }
    }

    /// Chart action. An empty table gets the informational modal instead.
    pub fn show_chart(&mut self) {
        if self.table.is_empty() {
            self.overlay = Overlay::Info(NO_DATA.to_string());
            return;
        }
        self.overlay = Overlay::Chart(ChartView::new(summarize(self.table.rows())));
    }

    pub fn sort(&mut self, column: Column) {
        let descending = self.table.toggle_sort(column);
        self.status_message = Some(format!(
            "Sorted by {} ({})",
            column.title(),
            if descending { "descending" } else { "ascending" }
        ));
    }

    fn open_picker(&mut self) {
        self.overlay = Overlay::Picker(FilePicker::new(self.picker_dir.clone()));
    }

    /// Handle a key event. Modals swallow everything except their dismiss keys.
    pub fn handle_key_event(&mut self, code: KeyCode) -> ViewAction {
        let overlay = std::mem::replace(&mut self.overlay, Overlay::None);
        let next = match overlay {
            Overlay::None => return self.handle_normal_key(code),
            Overlay::Error(_) | Overlay::Info(_)
                if matches!(code, KeyCode::Enter | KeyCode::Esc) =>
            {
                Overlay::None
            }
            modal @ (Overlay::Error(_) | Overlay::Info(_)) => modal,
            Overlay::Chart(_)
                if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c')) =>
            {
                Overlay::None
            }
            chart @ Overlay::Chart(_) => chart,
            Overlay::Picker(mut picker) => match picker.handle_key(code) {
                PickerAction::Continue => Overlay::Picker(picker),
                PickerAction::Cancel => Overlay::None,
                PickerAction::Select(path) => {
                    self.load_file(&path);
                    return ViewAction::Continue;
                }
            },
        };
        self.overlay = next;
        ViewAction::Continue
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> ViewAction {
        self.status_message = None;
        let last = self.table.len().saturating_sub(1);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Char('o') => self.open_picker(),
            KeyCode::Char('c') => self.show_chart(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                if let Some(column) = Column::from_index(idx) {
                    self.sort(column);
                }
            }
            KeyCode::Down => self.selected = (self.selected + 1).min(last),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::PageDown => self.selected = (self.selected + self.visible_count).min(last),
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(self.visible_count),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            _ => {}
        }
        ViewAction::Continue
    }

    /// Header click sorts by the clicked column. Ignored while an overlay is up.
    pub fn handle_click_event(&mut self, x: u16, y: u16) -> ViewAction {
        if !matches!(self.overlay, Overlay::None) {
            return ViewAction::Continue;
        }
        let hit = self.header_hit.as_ref().and_then(|(row, spans)| {
            if *row != y {
                return None;
            }
            spans.iter().position(|(start, end)| x >= *start && x < *end)
        });
        if let Some(column) = hit.and_then(Column::from_index) {
            self.sort(column);
        }
        ViewAction::Continue
    }

    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [title_area, table_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new("Expense Tracker").style(HEADER_STYLE),
            title_area,
        );

        let sort_state = self.table.sort_state();
        let header_cells: Vec<Cell> = Column::ALL
            .iter()
            .map(|c| {
                let marker = match sort_state {
                    Some((col, false)) if col == *c => " \u{25b2}",
                    Some((col, true)) if col == *c => " \u{25bc}",
                    _ => "",
                };
                Cell::from(format!("{}{marker}", c.title()))
            })
            .collect();

        let rows: Vec<Row> = self
            .table
            .rows()
            .iter()
            .map(|e| {
                Row::new(vec![
                    Cell::from(Column::Date.cell(e)),
                    Cell::from(Column::Category.cell(e)),
                    Cell::from(Column::Description.cell(e)),
                    Cell::from(Line::from(tui::amount_span(e.amount)).right_aligned()),
                ])
            })
            .collect();

        let spans: Vec<(u16, u16)> = Layout::horizontal(column_widths())
            .spacing(COLUMN_SPACING)
            .split(table_area)
            .iter()
            .map(|r| (r.x, r.x + r.width))
            .collect();
        self.header_hit = Some((table_area.y, spans));
        self.visible_count = table_area.height.saturating_sub(2).max(1) as usize;

        if self.table.is_empty() {
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(self.table.len() - 1);
            self.table_state.select(Some(self.selected));
        }
        let table = Table::new(rows, column_widths())
            .header(Row::new(header_cells).style(HEADER_STYLE).bottom_margin(1))
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        let status = if self.table.is_empty() {
            "No expenses loaded".to_string()
        } else {
            format!(
                "{} expenses | Total: {}",
                self.table.len(),
                fmt::amount(self.table.total())
            )
        };
        let status = match self.status_message {
            Some(ref msg) => format!("{status} | {msg}"),
            None => status,
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        frame.render_widget(
            Paragraph::new(
                "o:open  c:chart  1-4/click header:sort  \u{2191}/\u{2193}:select  q:quit",
            )
            .style(FOOTER_STYLE),
            keys_area,
        );

        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Picker(picker) => picker.draw(frame, area),
            Overlay::Chart(chart) => chart.draw(frame, area),
            Overlay::Error(msg) => draw_modal(frame, area, " Error ", msg, ERROR_STYLE),
            Overlay::Info(msg) => draw_modal(frame, area, " Info ", msg, INFO_STYLE),
        }
    }
}

fn draw_modal(frame: &mut Frame, area: Rect, title: &str, message: &str, style: Style) {
    let width = area.width.saturating_sub(4).min(64);
    let text_width = width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    for paragraph in message.lines() {
        let (wrapped, _) = tui::wrap_text(paragraph, text_width);
        lines.extend(wrapped.lines().map(|l| Line::from(l.to_string())));
    }
    let height = lines.len() as u16 + 4;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Enter/Esc:dismiss", FOOTER_STYLE)));

    let popup = centered_rect(width, height, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_style(style);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

impl View for ExpenseBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.handle_key_event(code)
    }

    fn handle_click(&mut self, column: u16, row: u16) -> ViewAction {
        self.handle_click_event(column, row)
    }
}
