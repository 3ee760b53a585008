use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info};

use super::calendar_service::{
    CalendarDay, WEEKDAYS, generate_calendar, generate_calendar_now,
};
use crate::{app::Mode, components::Component, config::Config, framework::Action};

const CELL_WIDTH: u16 = 4;

/// `data-*` attributes attached to a rendered element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset(BTreeMap<String, String>);

impl Dataset {
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// A rendered region that can be the target of a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub area: Rect,
    pub dataset: Dataset,
}

impl Element {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            dataset: Dataset::default(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.dataset = self.dataset.with(key, value);
        self
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct CalendarStyles {
    day: Style,
    selected: Style,
    weekday: Style,
}

/// Month grid with a single delegated click listener on its root.
///
/// Rendering records every drawn element (root first, then headers and
/// day cells). A click is resolved to the innermost element under the
/// pointer; only day cells carry an `index` marker.
pub struct Calendar {
    calendar_days: Vec<CalendarDay>,
    month_label: String,
    elements: Vec<Element>,
    selected: Option<CalendarDay>,
    styles: CalendarStyles,
}

impl Calendar {
    /// Current month, generated once.
    pub fn new() -> Self {
        Self::with_days(Local::now().date_naive(), generate_calendar_now())
    }

    pub fn for_date(today: NaiveDate) -> Self {
        Self::with_days(today, generate_calendar(today))
    }

    fn with_days(today: NaiveDate, calendar_days: Vec<CalendarDay>) -> Self {
        Self {
            calendar_days,
            month_label: today.format("%B %Y").to_string(),
            elements: Vec::new(),
            selected: None,
            styles: CalendarStyles::default(),
        }
    }

    pub fn calendar_days(&self) -> &[CalendarDay] {
        &self.calendar_days
    }

    pub fn selected(&self) -> Option<CalendarDay> {
        self.selected
    }

    /// The delegated listener: inspects the originating element for an
    /// `index` marker and reports the matching day cell.
    pub fn handler_click_event_delegation(&mut self, target: &Element) -> Option<CalendarDay> {
        let index = target.dataset.get("index")?.parse::<usize>().ok()?;
        let day = self.calendar_days.get(index).copied()?;
        info!("Calendar click: {:?}", day);
        self.selected = Some(day);
        Some(day)
    }

    fn element_at(&self, column: u16, row: u16) -> Option<&Element> {
        let position = Position::new(column, row);
        self.elements
            .iter()
            .rev()
            .find(|element| element.area.contains(position))
    }

    fn day_line(&self, week: &[CalendarDay]) -> Line<'static> {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| {
                let text = match cell.day {
                    Some(day) => format!("{day:>3} "),
                    None => " ".repeat(CELL_WIDTH as usize),
                };
                let style = if self.selected.is_some_and(|s| s.index == cell.index) {
                    self.styles.selected
                } else {
                    self.styles.day
                };
                Span::styled(text, style)
            })
            .collect();
        Line::from(spans)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Calendar {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.styles = CalendarStyles {
            day: config.style(Mode::Home, "day"),
            selected: config.style(Mode::Home, "day_selected"),
            weekday: config.style(Mode::Home, "weekday"),
        };
        Ok(())
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> color_eyre::Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(target) = self.element_at(mouse.column, mouse.row).cloned() else {
            return Ok(None);
        };
        debug!("Calendar::handle_mouse_event - target {:?}", target.dataset);
        match self.handler_click_event_delegation(&target) {
            Some(_) => Ok(Some(Action::Render)),
            None => Ok(None),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.month_label.as_str());
        let inner = block.inner(area);

        let mut elements = vec![Element::new(area)];
        let mut lines = Vec::new();

        let header: Vec<Span> = WEEKDAYS
            .iter()
            .map(|name| Span::styled(format!("{name:>3} "), self.styles.weekday))
            .collect();
        lines.push(Line::from(header));
        let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
        elements.push(Element::new(header_area).with_data("role", "header"));

        for (week_index, week) in self.calendar_days.chunks(7).enumerate() {
            let y = inner.y.saturating_add(1 + week_index as u16);
            for (column, cell) in week.iter().enumerate() {
                if cell.is_blank() {
                    continue;
                }
                let x = inner.x.saturating_add(column as u16 * CELL_WIDTH);
                let cell_area = Rect::new(x, y, CELL_WIDTH, 1).intersection(inner);
                elements.push(Element::new(cell_area).with_data("index", cell.index));
            }
            lines.push(self.day_line(week));
        }

        let footer = match self.selected.and_then(|s| s.day) {
            Some(day) => format!("selected: {day} {}", self.month_label),
            None => "click a day".to_string(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(footer));

        frame.render_widget(Paragraph::new(lines).block(block), area);
        self.elements = elements;
        Ok(())
    }
}
