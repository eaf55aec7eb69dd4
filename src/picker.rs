use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::{centered_rect, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Parent,
    Dir(String),
    File(String),
}

impl Entry {
    fn label(&self) -> String {
        match self {
            Self::Parent => "../".to_string(),
            Self::Dir(name) => format!("{name}/"),
            Self::File(name) => name.clone(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PickerAction {
    Continue,
    Cancel,
    Select(PathBuf),
}

/// Directory browser that only offers subdirectories and `.csv` files.
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    error: Option<String>,
    list_state: ListState,
}

/// Where the picker opens: the working directory, else home.
pub fn start_dir() -> PathBuf {
    std::env::current_dir()
        .ok()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

impl FilePicker {
    pub fn new(dir: PathBuf) -> Self {
        let mut picker = Self {
            dir,
            entries: Vec::new(),
            selected: 0,
            error: None,
            list_state: ListState::default(),
        };
        picker.refresh();
        picker
    }

    fn refresh(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.error = None;
        if self.dir.parent().is_some() {
            self.entries.push(Entry::Parent);
        }

        let read = match std::fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if path.is_dir() {
                dirs.push(name);
            } else if is_csv(&path) {
                files.push(name);
            }
        }
        dirs.sort();
        files.sort();
        self.entries.extend(dirs.into_iter().map(Entry::Dir));
        self.entries.extend(files.into_iter().map(Entry::File));
    }

    fn enter(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent() {
            let parent = parent.to_path_buf();
            self.enter(parent);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> PickerAction {
        match code {
            KeyCode::Esc => return PickerAction::Cancel,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.entries.len().saturating_sub(1),
            KeyCode::Backspace | KeyCode::Left => self.go_up(),
            KeyCode::Enter | KeyCode::Right => match self.entries.get(self.selected).cloned() {
                Some(Entry::Parent) => self.go_up(),
                Some(Entry::Dir(name)) => {
                    let next = self.dir.join(name);
                    self.enter(next);
                }
                Some(Entry::File(name)) => {
                    if code == KeyCode::Enter {
                        return PickerAction::Select(self.dir.join(name));
                    }
                }
                None => {}
            },
            _ => {}
        }
        PickerAction::Continue
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(
            area.width.saturating_sub(10).min(70),
            area.height.saturating_sub(4).min(24),
            area,
        );
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Open CSV ")
            .title_style(HEADER_STYLE);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [dir_area, list_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(self.dir.display().to_string()).style(FOOTER_STYLE),
            dir_area,
        );

        if let Some(ref err) = self.error {
            frame.render_widget(Paragraph::new(Line::from(format!("  {err}"))), list_area);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|e| ListItem::new(e.label()))
                .collect();
            self.list_state.select(Some(self.selected));
            let list = List::new(items).highlight_style(SELECTED_STYLE);
            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }

        frame.render_widget(
            Paragraph::new("\u{2191}/\u{2193}:select  Enter:open  Backspace:up  Esc:cancel")
                .style(FOOTER_STYLE),
            keys_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.csv"), "").unwrap();
        std::fs::write(dir.path().join("A.CSV"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("nested").join("inner.csv"), "").unwrap();
        dir
    }

    #[test]
    fn test_lists_dirs_then_csv_files() {
        let dir = fixture();
        let picker = FilePicker::new(dir.path().to_path_buf());
        assert_eq!(
            picker.entries,
            vec![
                Entry::Parent,
                Entry::Dir("nested".into()),
                Entry::File("A.CSV".into()),
                Entry::File("b.csv".into()),
            ]
        );
    }

    #[test]
    fn test_select_file() {
        let dir = fixture();
        let mut picker = FilePicker::new(dir.path().to_path_buf());
        picker.handle_key(KeyCode::End);
        let action = picker.handle_key(KeyCode::Enter);
        assert_eq!(action, PickerAction::Select(dir.path().join("b.csv")));
    }

    #[test]
    fn test_descend_and_ascend() {
        let dir = fixture();
        let mut picker = FilePicker::new(dir.path().to_path_buf());
        picker.handle_key(KeyCode::Down);
        assert_eq!(picker.handle_key(KeyCode::Enter), PickerAction::Continue);
        assert_eq!(picker.dir, dir.path().join("nested"));
        assert!(picker.entries.contains(&Entry::File("inner.csv".into())));

        picker.handle_key(KeyCode::Backspace);
        assert_eq!(picker.dir, dir.path());
    }

    #[test]
    fn test_escape_cancels() {
        let dir = fixture();
        let mut picker = FilePicker::new(dir.path().to_path_buf());
        assert_eq!(picker.handle_key(KeyCode::Esc), PickerAction::Cancel);
    }

    #[test]
    fn test_missing_dir_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let picker = FilePicker::new(dir.path().join("gone"));
        assert!(picker.error.is_some());
        assert_eq!(picker.entries, vec![Entry::Parent]);
    }
}
