use crate::app::pipeline::FeedbackLevel;
use crate::app::prevalence::{CHART_TITLE, PREVALENCE, tenths};
use crate::app::product::ProductView;
use crate::app::state::App;
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
};

/// Shown in place of an empty allergen list.
pub const NO_ALLERGENS_LABEL: &str = "Nenhum alérgeno comum declarado";

const BADGE_COLOR: Color = Color::Rgb(229, 58, 64);
const BADGE_OK_COLOR: Color = Color::Rgb(46, 175, 125);

/// Draws the barcode search view: input, feedback, product card, status bar.
pub fn draw_search(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Barcode input
            Constraint::Length(3), // Feedback
            Constraint::Min(1),    // Product
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_input(
        frame,
        layout[0],
        "Código de barras",
        &app.search.input,
        "Digite o código de barras e pressione Enter…",
    );
    draw_feedback(frame, app, layout[1]);

    match &app.search.product {
        Some(p) => draw_product(frame, p, layout[2]),
        None => {
            let empty = Block::default().title("Produto").borders(Borders::ALL);
            frame.render_widget(empty, layout[2]);
        }
    }

    draw_status_bar(frame, app, layout[3], "Enter buscar • Tab telas • Esc sair");
}

/// Draws the allergy prevalence chart with the highlighted entry on top.
pub fn draw_prevalence(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Highlight caption
            Constraint::Min(3),    // Chart
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let caption = match app.prevalence.selected_entry() {
        Some(entry) => Line::from(vec![
            Span::styled(
                entry.label,
                Style::default().fg(rgb(entry.rgb)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {:.1}%", entry.percent)),
        ]),
        None => Line::from(Span::styled(
            "Use ←/→ para destacar uma alergia",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let caption = Paragraph::new(caption)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(caption, layout[0]);

    let bars: Vec<Bar> = PREVALENCE
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let selected = app.prevalence.selected == Some(i);
            let mut style = Style::default().fg(rgb(entry.rgb));
            let mut label_style = Style::default();
            if selected {
                style = style.add_modifier(Modifier::BOLD);
                label_style = label_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            } else if app.prevalence.selected.is_some() {
                style = style.add_modifier(Modifier::DIM);
            }
            Bar::default()
                .label(Line::from(Span::styled(entry.label, label_style)))
                .value(tenths(entry.percent))
                .text_value(format!("{:.1}", entry.percent))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(CHART_TITLE, Style::default().add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, layout[1]);

    draw_status_bar(frame, app, layout[2], "←/→ destacar • Esc voltar • Tab telas");
}

/// Draws the reaction report form.
pub fn draw_report(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Intro
            Constraint::Min(3),    // Report text
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let intro = Paragraph::new("Teve uma reação alérgica? Descreva o que aconteceu.")
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(intro, layout[0]);

    draw_input(
        frame,
        layout[1],
        "Relato de reação",
        &app.report.input,
        "Produto, sintomas, quando ocorreu…",
    );

    draw_status_bar(frame, app, layout[2], "Enter enviar • Esc voltar • Tab telas");
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, value: &str, placeholder: &str) {
    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::raw(value))
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    let input = Paragraph::new(line).block(block).wrap(Wrap { trim: false });
    frame.render_widget(input, area);

    if inner.width > 0 {
        let len = value.chars().count() as u16;
        let x = inner.x.saturating_add(len % inner.width);
        let y = inner
            .y
            .saturating_add(len / inner.width)
            .min(inner.bottom().saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

fn draw_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let widget = match &app.search.feedback {
        Some(feedback) => {
            let color = level_color(feedback.level);
            Paragraph::new(Span::styled(
                feedback.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
        }
        None => Paragraph::new("").block(Block::default().borders(Borders::ALL)),
    };
    frame.render_widget(widget, area);
}

fn draw_product(frame: &mut Frame, p: &ProductView, area: Rect) {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled("Imagem: ", Style::default().fg(Color::DarkGray)),
            Span::styled(p.image_url.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::default(),
        Line::from(Span::styled("Ingredientes", heading)),
        Line::from(p.ingredients.as_str()),
        Line::default(),
        Line::from(Span::styled("Alérgenos", heading)),
        allergen_badges(&p.allergens),
    ];

    // Untrimmed so badge padding survives wrapping.
    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(p.name.as_str(), heading.fg(Color::Yellow)))
            .borders(Borders::ALL),
    );
    frame.render_widget(card, area);
}

fn allergen_badges(allergens: &[String]) -> Line<'_> {
    if allergens.is_empty() {
        return Line::from(badge(NO_ALLERGENS_LABEL, BADGE_OK_COLOR));
    }
    let mut spans = Vec::with_capacity(allergens.len() * 2);
    for a in allergens {
        spans.push(badge(a, BADGE_COLOR));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn badge(label: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, hints: &str) {
    let status_line = Line::from(vec![
        Span::styled(app.status.clone(), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);

    let status = Paragraph::new(status_line).wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn level_color(level: FeedbackLevel) -> Color {
    match level {
        FeedbackLevel::Warning => Color::Yellow,
        FeedbackLevel::Danger => Color::Red,
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}
