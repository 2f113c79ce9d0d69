use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
};

use super::app::{ActiveModal, App, Busy, InputMode, View};
use super::category_list::CategoryListView;
use super::category_modal::{CategoryField, CategoryModal};
use super::expense_list::ExpenseListView;
use super::expense_modal::{ExpenseField, ExpenseModal};
use super::form::{FieldError, TextField};
use super::notification::{Notification, NotificationKind};
use crate::models::category::{AVAILABLE_COLORS, parse_hex_color};
use crate::utils::format::{format_amount, format_date};

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(f, app, chunks[0]);
    match app.current_view {
        View::ExpenseList => render_expense_list(f, &app.expense_list, chunks[1]),
        View::CategoryList => render_category_list(f, &app.category_list, chunks[1]),
    }
    render_help_panel(f, app, chunks[2]);

    match &app.modal {
        Some(ActiveModal::Category(modal)) => render_category_modal(f, modal, size),
        Some(ActiveModal::Expense(modal)) => {
            render_expense_modal(f, modal, size);
            if let Some(nested) = &modal.category_modal {
                render_category_modal(f, nested, centered_rect(50, 50, size));
            }
        }
        None => {}
    }

    if app.input_mode == InputMode::Searching {
        render_search_prompt(f, &app.category_list, size);
    }

    if let Some(busy) = app.busy {
        render_busy(f, busy, size);
    }

    if let Some(notification) = app.notifications.latest() {
        render_notification(f, notification, size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .map(|view| Line::from(format!(" {} ", view.title())))
        .collect();
    let selected = View::all()
        .iter()
        .position(|view| *view == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Expense Tracker "))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

pub fn render_expense_list(f: &mut Frame, view: &ExpenseListView, area: Rect) {
    let header = format!(
        " ◀ {} ▶  Total: {} ",
        view.month_label(),
        format_amount(view.month_total()),
    );
    let block = Block::default().title(header).borders(Borders::ALL);

    let groups = view.expenses_by_date();
    if groups.is_empty() {
        let empty = Paragraph::new("No expenses this month. Press a to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut items = Vec::new();
    let mut selected_row = None;
    let mut expense_index = 0;
    for group in &groups {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format_date(group.date),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_amount(group.total())),
                Style::default().fg(Color::DarkGray),
            ),
        ])));
        for expense in &group.expenses {
            if view.selected == Some(expense_index) {
                selected_row = Some(items.len());
            }
            items.push(expense.to_list_item());
            expense_index += 1;
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED).add_modifier(Modifier::BOLD))
        .highlight_symbol("➤ ");

    f.render_stateful_widget(list, area, &mut ListState::default().with_selected(selected_row));
}

pub fn render_category_list(f: &mut Frame, view: &CategoryListView, area: Rect) {
    let mut title = format!(" Categories • Sort: {} ", view.sort_label());
    if !view.search_term.is_empty() {
        title.push_str(&format!("• Search: \"{}\" ", view.search_term));
    }
    let block = Block::default().title(title).borders(Borders::ALL);

    if !view.has_categories() {
        let empty = Paragraph::new("No categories found.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view.categories.iter().map(|c| c.to_list_item()).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED).add_modifier(Modifier::BOLD))
        .highlight_symbol("➤ ");

    f.render_stateful_widget(list, area, &mut view.list_state.clone());
}

fn field_lines<'a>(
    label: &'a str,
    field: &'a TextField,
    focused: bool,
    error: Option<FieldError>,
) -> Vec<Line<'a>> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "▏" } else { "" };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{label:<10}"), style),
        Span::raw(field.value.as_str()),
        Span::styled(cursor, style),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("{:10}{}", "", error),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn footer_line(is_edit: bool) -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled("Enter", key),
        Span::raw(" save • "),
        Span::styled("Tab", key),
        Span::raw(" next field • "),
        Span::styled("Esc", key),
        Span::raw(" cancel"),
    ];
    if is_edit {
        spans.push(Span::raw(" • "));
        spans.push(Span::styled("Del", key));
        spans.push(Span::raw(" delete"));
    }
    Line::from(spans)
}

pub fn render_category_modal(f: &mut Frame, modal: &CategoryModal, area: Rect) {
    let mut text = field_lines(
        "Name",
        &modal.name,
        modal.focus == CategoryField::Name,
        modal.visible_name_error(),
    );
    text.push(Line::from(""));

    let label_style = if modal.focus == CategoryField::Color {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut swatches = vec![Span::styled(format!("{:<10}", "Color"), label_style)];
    for color in AVAILABLE_COLORS {
        let fg = parse_hex_color(color).unwrap_or(Color::White);
        let symbol = if color == modal.color { "[■]" } else { " ■ " };
        swatches.push(Span::styled(symbol, Style::default().fg(fg)));
    }
    text.push(Line::from(swatches));
    text.push(Line::from(""));
    text.push(footer_line(modal.is_edit()));

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(format!(" {} ", modal.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let popup_area = if area.width > 60 { centered_rect(60, 40, area) } else { area };
    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn render_expense_modal(f: &mut Frame, modal: &ExpenseModal, area: Rect) {
    let mut text = field_lines(
        "Name",
        &modal.name,
        modal.focus == ExpenseField::Name,
        modal.visible_error(ExpenseField::Name),
    );

    let category_focused = modal.focus == ExpenseField::Category;
    let label_style = if category_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let category = match &modal.selected_category {
        Some(category) => Span::styled(
            format!("■ {}", category.name),
            Style::default().fg(category.display_color()),
        ),
        None => Span::styled("None", Style::default().fg(Color::DarkGray)),
    };
    let mut category_line = vec![Span::styled(format!("{:<10}", "Category"), label_style), category];
    if category_focused {
        category_line.push(Span::styled(
            "   ←/→ choose • + new • Backspace clear",
            Style::default().fg(Color::DarkGray),
        ));
    }
    text.push(Line::from(category_line));

    text.extend(field_lines(
        "Amount",
        &modal.amount,
        modal.focus == ExpenseField::Amount,
        modal.visible_error(ExpenseField::Amount),
    ));
    text.extend(field_lines(
        "Date",
        &modal.date,
        modal.focus == ExpenseField::Date,
        modal.visible_error(ExpenseField::Date),
    ));
    if let Some(formatted) = modal.formatted_date() {
        text.push(Line::from(Span::styled(
            format!("{:10}{}", "", formatted),
            Style::default().fg(Color::DarkGray),
        )));
    }
    text.push(Line::from(""));
    text.push(footer_line(modal.is_edit()));

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(format!(" {} ", modal.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let popup_area = centered_rect(70, 60, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn render_search_prompt(f: &mut Frame, view: &CategoryListView, area: Rect) {
    let input = Paragraph::new(if view.search_term.is_empty() {
        Line::styled("Type to search categories...", Style::default().fg(Color::DarkGray))
    } else {
        Line::from(view.search_term.as_str())
    })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search (Enter to keep, Esc to clear)")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    let popup_area = centered_rect(60, 10, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}

fn render_busy(f: &mut Frame, busy: Busy, area: Rect) {
    let label = busy.label();
    let width = (label.chars().count() as u16 + 6).min(area.width);
    let height = 3.min(area.height);
    let busy_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let overlay = Paragraph::new(label)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(Clear, busy_area);
    f.render_widget(overlay, busy_area);
}

fn render_notification(f: &mut Frame, notification: &Notification, area: Rect) {
    let color = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Danger => Color::Red,
    };
    let width = (notification.message.chars().count() as u16 + 4).min(area.width);
    let toast_area = Rect::new(area.x + (area.width - width) / 2, area.y, width, 3.min(area.height));

    let toast = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));

    f.render_widget(Clear, toast_area);
    f.render_widget(toast, toast_area);
}

pub fn render_help_panel(f: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled("↑/↓", key),
        Span::raw(" Move • "),
        Span::styled("Enter", key),
        Span::raw(" Edit • "),
        Span::styled("a", key),
        Span::raw(" Add • "),
    ];
    match app.current_view {
        View::ExpenseList => {
            spans.push(Span::styled("←/→", key));
            spans.push(Span::raw(" Month • "));
        }
        View::CategoryList => {
            spans.push(Span::styled("f", key));
            spans.push(Span::raw(" Search • "));
            spans.push(Span::styled("s", key));
            spans.push(Span::raw(" Sort • "));
        }
    }
    spans.extend([
        Span::styled("r", key),
        Span::raw(" Reload • "),
        Span::styled("Tab", key),
        Span::raw(" View • "),
        Span::styled("q", key),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Help "),
        )
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(layout[1])[1]
}
