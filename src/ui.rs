use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, List,
        ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::app::{App, FocusPane, InputMode, OutlinePane, RoadmapPane, Theme, View};
use crate::insights::{ChartKind, DemandChart, SalaryChart, PRESET_TOPICS};
use crate::outline;

/// Parse a line of text and convert **bold** markdown runs to styled spans
fn parse_inline(text: &str, base: Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut current_text = String::new();

    while let Some((_, c)) = chars.next() {
        if c == '*' && chars.peek().map(|(_, c)| *c) == Some('*') {
            // Consume the second *
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), base));
            }

            // Find closing **
            let mut bold_text = String::new();
            let mut found_close = false;

            while let Some((_, c)) = chars.next() {
                if c == '*' && chars.peek().map(|(_, c)| *c) == Some('*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(bold_text, base.add_modifier(Modifier::BOLD)));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, base));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Style one markdown source line for the primary view.
fn markdown_line(line: &str, theme: &Theme) -> Line<'static> {
    if let Some(heading) = outline::scan_headings(line).into_iter().next() {
        let style = match heading.level {
            1 => Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            2 => Style::default()
                .fg(theme.accent_alt)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        };
        let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
        return Line::from(vec![
            Span::raw(indent),
            Span::styled(heading.text, style),
        ]);
    }

    let trimmed = line.trim_start();
    if trimmed.starts_with("```") || trimmed.starts_with('|') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(theme.text_dim),
        ));
    }
    if let Some(rest) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        let indent = " ".repeat(line.len() - trimmed.len());
        let mut spans = vec![
            Span::raw(indent),
            Span::styled("• ", Style::default().fg(theme.accent)),
        ];
        spans.extend(parse_inline(rest, Style::default().fg(theme.text)).spans);
        return Line::from(spans);
    }

    parse_inline(line, Style::default().fg(theme.text))
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_body(app, frame, body_area);
    render_footer(app, frame, footer_area);

    // Popups, in priority order
    if app.input_mode == InputMode::Editing && app.show_suggestions {
        render_suggestions(app, frame, area);
    } else {
        app.suggestions_area = None;
    }
    if app.picker.is_some() {
        render_picker(app, frame, area);
    }
    if app.notice.is_some() {
        render_toast(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let selectors = format!(
        " model:{}  length:{}  exp:{}  chart:{} ",
        app.model,
        app.length,
        app.experience,
        app.chart_kind.label()
    );
    let title = Line::from(vec![
        Span::styled(
            " SkillForge ",
            Style::default().fg(theme.accent).bold(),
        ),
        Span::styled("Roadmap Studio ", Style::default().fg(theme.text)),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.text_dim),
        ),
        Span::styled(selectors, Style::default().fg(theme.text_dim)),
        Span::styled(
            if theme.dark { " dark " } else { " light " },
            Style::default().fg(theme.text_dim),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(theme.header_bg));
    frame.render_widget(header, area);
}

fn render_body(app: &mut App, frame: &mut Frame, area: Rect) {
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(26), Constraint::Min(0)]).areas(area);

    render_sidebar(app, frame, sidebar_area);
    render_main(app, frame, main_area);
}

fn render_sidebar(app: &mut App, frame: &mut Frame, area: Rect) {
    let presets_height = (PRESET_TOPICS.len() as u16 + 2).min(area.height / 2);
    let [history_area, presets_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(presets_height)]).areas(area);

    app.history_area = Some(history_area);
    app.presets_area = Some(presets_area);

    let theme = app.theme;
    let highlight = Style::default()
        .bg(theme.highlight_bg)
        .fg(theme.highlight_fg)
        .add_modifier(Modifier::BOLD);

    // History of past topics, most recent first
    let history_focused = app.focus == FocusPane::History;
    let border = if history_focused {
        theme.border_focus
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" History ({}) ", app.state.sf_history.len()));

    if app.state.sf_history.is_empty() {
        let placeholder = Paragraph::new("No topics yet.\nGenerate one to fill this list.")
            .style(Style::default().fg(theme.text_dim))
            .block(block);
        frame.render_widget(placeholder, history_area);
    } else {
        let items: Vec<ListItem> = app
            .state
            .sf_history
            .iter()
            .map(|topic| ListItem::new(format!(" {} ", topic)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, history_area, &mut app.history_state);
    }

    // Fixed preset topics
    let presets_focused = app.focus == FocusPane::Presets;
    let border = if presets_focused {
        theme.border_focus
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Presets ");
    let items: Vec<ListItem> = PRESET_TOPICS
        .iter()
        .map(|preset| ListItem::new(format!(" {} ", preset)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, presets_area, &mut app.presets_state);
}

fn render_main(app: &mut App, frame: &mut Frame, area: Rect) {
    let charts_height = if area.height > 26 { 12 } else { 10 };
    let [input_area, tabs_area, content_area, charts_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(charts_height),
    ])
    .areas(area);

    render_input(app, frame, input_area);
    render_tabs(app, frame, tabs_area);

    app.content_area = Some(content_area);
    match app.view {
        View::Markdown => render_markdown_view(app, frame, content_area),
        View::Outline => render_outline_view(app, frame, content_area),
    }

    let [demand_area, salary_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(charts_area);
    render_demand_chart(app, frame, demand_area);
    render_salary_panel(app, frame, salary_area);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    app.input_area = Some(area);
    let theme = &app.theme;

    let editing = app.input_mode == InputMode::Editing;
    let border = if editing {
        theme.accent_alt
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Topic ");

    // Horizontal scroll keeps the cursor visible in a narrow input
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.topic_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };
    let visible_text: String = app
        .topic_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(theme.accent))
        .block(block);
    frame.render_widget(input, area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_tabs(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let active = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let inactive = Style::default().fg(theme.text_dim);

    let markdown_label = " Markdown ";
    let outline_label = " Outline ";
    let tabs = Line::from(vec![
        Span::styled(
            markdown_label,
            if app.view == View::Markdown { active } else { inactive },
        ),
        Span::styled("│", Style::default().fg(theme.border)),
        Span::styled(
            outline_label,
            if app.view == View::Outline { active } else { inactive },
        ),
    ]);
    frame.render_widget(Paragraph::new(tabs), area);

    let md_width = markdown_label.len() as u16;
    let ol_width = outline_label.len() as u16;
    app.tab_markdown_area = Some(Rect::new(area.x, area.y, md_width.min(area.width), 1));
    let ol_x = area.x + md_width + 1;
    if ol_x < area.x + area.width {
        let ol_width = ol_width.min(area.width.saturating_sub(md_width + 1));
        app.tab_outline_area = Some(Rect::new(ol_x, area.y, ol_width, 1));
    } else {
        app.tab_outline_area = None;
    }
}

fn render_markdown_view(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == FocusPane::Content;
    let border = if focused { theme.border_focus } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Roadmap ");

    let inner = block.inner(area);
    app.content_height = inner.height;

    let lines: Vec<Line> = if app.loading {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        vec![Line::from(Span::styled(
            format!("Generating roadmap{dots}"),
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        match &app.pane {
            RoadmapPane::Empty => vec![Line::from(Span::styled(
                "Your roadmap will appear here.",
                Style::default().fg(theme.text_dim),
            ))],
            RoadmapPane::Notice(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(theme.text),
            ))],
            RoadmapPane::Failure(failure) => {
                let mut lines = vec![Line::from(Span::styled(
                    format!("❌ {}", failure.message()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))];
                if let Some(url) = &failure.url {
                    lines.push(Line::from(vec![
                        Span::styled("URL: ", Style::default().fg(theme.text_dim)),
                        Span::styled(url.clone(), Style::default().fg(theme.accent)),
                    ]));
                }
                for section in [failure.details_text(), failure.preview_text()]
                    .into_iter()
                    .flatten()
                {
                    lines.push(Line::default());
                    for line in section.lines() {
                        lines.push(Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(theme.text_dim),
                        )));
                    }
                }
                lines
            }
            RoadmapPane::Roadmap => app
                .last_markdown
                .lines()
                .map(|line| markdown_line(line, &theme))
                .collect(),
        }
    };

    app.content_lines = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.markdown_scroll, 0));
    frame.render_widget(paragraph, area);

    render_content_scrollbar(frame, area, app.content_lines, app.content_height, app.markdown_scroll);
}

fn render_outline_view(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == FocusPane::Content;
    let border = if focused { theme.border_focus } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Outline ");

    let inner = block.inner(area);
    app.content_height = inner.height;

    let lines: Vec<Line> = match &app.outline {
        OutlinePane::Tree(nodes) => outline::flatten(nodes)
            .into_iter()
            .map(|(depth, text)| {
                let style = if depth == 0 {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                Line::from(vec![
                    Span::raw("  ".repeat(depth)),
                    Span::styled("• ", Style::default().fg(theme.text_dim)),
                    Span::styled(text, style),
                ])
            })
            .collect(),
        other => vec![Line::from(Span::styled(
            other.placeholder().unwrap_or_default(),
            Style::default().fg(theme.text_dim),
        ))],
    };

    app.content_lines = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.outline_scroll, 0));
    frame.render_widget(paragraph, area);

    render_content_scrollbar(frame, area, app.content_lines, app.content_height, app.outline_scroll);
}

fn render_content_scrollbar(frame: &mut Frame, area: Rect, lines: u16, height: u16, position: u16) {
    if lines > height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut state = ScrollbarState::new(lines as usize).position(position as usize);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut state,
        );
    }
}

fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

fn render_demand_chart(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Demand comparison ({}) ", app.chart_kind.label()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(chart) = app.demand_chart.clone() else {
        let placeholder = Paragraph::new("Generate a roadmap to compare demand.")
            .style(Style::default().fg(theme.text_dim))
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, inner);
        return;
    };

    match app.chart_kind {
        ChartKind::Bar => render_demand_bars(frame, inner, &chart, &theme),
        ChartKind::Line => render_demand_line(frame, inner, &chart, &theme),
        ChartKind::Combo => {
            // The bar+line combo stacks both shapes over the same series
            let [bar_area, line_area] =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(inner);
            render_demand_bars(frame, bar_area, &chart, &theme);
            render_demand_line(frame, line_area, &chart, &theme);
        }
    }
}

fn render_demand_bars(frame: &mut Frame, area: Rect, chart: &DemandChart, theme: &Theme) {
    if area.height == 0 || chart.labels.is_empty() {
        return;
    }
    let bars: Vec<Bar> = chart
        .labels
        .iter()
        .zip(&chart.scores)
        .enumerate()
        .map(|(i, (label, score))| {
            Bar::default()
                .value(*score)
                .text_value(score.to_string())
                .label(Line::from(truncate_label(label, 9)))
                .style(Style::default().fg(theme.series[i % theme.series.len()]))
        })
        .collect();

    let n = chart.labels.len() as u16;
    let bar_width = (area.width.saturating_sub(n.saturating_sub(1)) / n.max(1)).clamp(3, 12);

    let widget = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(120);
    frame.render_widget(widget, area);
}

fn render_demand_line(frame: &mut Frame, area: Rect, chart: &DemandChart, theme: &Theme) {
    if area.height == 0 || chart.labels.len() < 2 {
        return;
    }
    let points = chart.points();
    let dataset = Dataset::default()
        .name("Relative demand")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.series[0]))
        .data(&points);

    let axis_style = Style::default().fg(theme.text_dim);
    let first = truncate_label(&chart.labels[0], 9);
    let last = truncate_label(&chart.labels[chart.labels.len() - 1], 9);

    let widget = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, (chart.labels.len() - 1) as f64])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 120.0])
                .labels(vec![Span::raw("0"), Span::raw("60"), Span::raw("120")]),
        );
    frame.render_widget(widget, area);
}

fn render_salary_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Salary insights (India) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [chart_area, summary_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);

    if let Some(chart) = &app.salary_chart {
        render_salary_bars(frame, chart_area, chart, &theme);
    } else {
        let placeholder = Paragraph::new("Salary comparison appears after generating.")
            .style(Style::default().fg(theme.text_dim))
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, chart_area);
    }

    let summary = Paragraph::new(app.salary_summary.as_str())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, summary_area);
}

fn render_salary_bars(frame: &mut Frame, area: Rect, chart: &SalaryChart, theme: &Theme) {
    if area.height == 0 || chart.labels.is_empty() {
        return;
    }
    let bars: Vec<Bar> = chart
        .labels
        .iter()
        .zip(&chart.lakhs)
        .enumerate()
        .map(|(i, (label, lakhs))| {
            // Tenths of a lakh keep one decimal of bar resolution
            Bar::default()
                .value((lakhs * 10.0).round() as u64)
                .text_value(format!("{lakhs:.1}L"))
                .label(Line::from(truncate_label(label, 9)))
                .style(Style::default().fg(theme.series[i % theme.series.len()]))
        })
        .collect();

    let n = chart.labels.len() as u16;
    let bar_width = (area.width.saturating_sub(n.saturating_sub(1)) / n.max(1)).clamp(3, 12);

    let widget = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(widget, area);
}

fn render_suggestions(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(input_rect) = app.input_area else {
        app.suggestions_area = None;
        return;
    };
    if app.suggestions.is_empty() {
        app.suggestions_area = None;
        return;
    }

    let theme = app.theme;
    let height = (app.suggestions.len() as u16 + 2)
        .min(area.height.saturating_sub(input_rect.y + input_rect.height));
    if height < 3 {
        app.suggestions_area = None;
        return;
    }
    let width = input_rect.width.clamp(20, 44);
    let popup = Rect::new(
        input_rect.x,
        input_rect.y + input_rect.height,
        width.min(area.width.saturating_sub(input_rect.x)),
        height,
    );
    app.suggestions_area = Some(popup);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_alt))
        .title(" Suggestions ");
    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .map(|s| ListItem::new(format!(" {} ", s)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, popup, &mut app.suggestion_state);
}

fn render_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(picker) = app.picker else { return };
    let theme = app.theme;
    let options = picker.options();

    let popup_width = 44.min(area.width.saturating_sub(4));
    let popup_height = (options.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focus))
        .title(format!("{}(Enter to select, Esc to cancel) ", picker.title()));

    let current = app.picker_value(picker).to_string();
    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let style = if *option == current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!(" {} ", option)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, popup_area, &mut app.picker_state);
}

fn render_toast(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = &app.notice else { return };
    let theme = &app.theme;

    let width = (notice.message.chars().count() as u16 + 2).min(area.width.saturating_sub(2));
    let toast_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        1,
    );
    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(Text::from(format!(" {} ", notice.message))).style(
        Style::default()
            .bg(theme.highlight_bg)
            .fg(theme.highlight_fg),
    );
    frame.render_widget(toast, toast_area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg),
        InputMode::Editing => Style::default().bg(theme.accent_alt).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " VIEW ",
        InputMode::Editing => " EDIT ",
    };

    let key_style = Style::default().bg(theme.header_bg).fg(theme.highlight_fg);
    let label_style = Style::default().fg(theme.text_dim);

    let hints: Vec<Span> = if app.picker.is_some() {
        vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" choose ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" cancel ", label_style),
        ]
    } else if app.input_mode == InputMode::Editing {
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" generate ", label_style),
            Span::styled(" ↓ ", key_style),
            Span::styled(" suggestions ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ]
    } else {
        vec![
            Span::styled(" i ", key_style),
            Span::styled(" topic ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" generate ", label_style),
            Span::styled(" 1/2 ", key_style),
            Span::styled(" view ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" focus ", label_style),
            Span::styled(" M/L/E ", key_style),
            Span::styled(" pick ", label_style),
            Span::styled(" c ", key_style),
            Span::styled(" chart ", label_style),
            Span::styled(" t ", key_style),
            Span::styled(" theme ", label_style),
            Span::styled(" s ", key_style),
            Span::styled(" share ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    };

    let footer_content = Line::from(
        std::iter::once(Span::styled(mode_text, mode_style))
            .chain(hints)
            .collect::<Vec<_>>(),
    );
    let footer = Paragraph::new(footer_content);
    frame.render_widget(footer, area);
}
