//! Gold Clicker rendering: coin panel, shop, and message log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{BUY_ENTRY_BASE, RESET_GAME, TAP_COIN, TOGGLE_THEME};
use super::logic::format_number;
use super::state::{DisplayMode, GoldState};

const COIN_ART: &[&str] = &["╭─────╮", "│  $  │", "╰─────╯"];

/// Coin art while the tap flash is active.
const COIN_PRESSED_ART: &[&str] = &["╭━━━━━╮", "┃ $$$ ┃", "╰━━━━━╯"];

/// Coin panel: 3 rows of art + 4 text rows + 2 borders.
const COIN_PANEL_HEIGHT: u16 = 9;

/// Colours for one display mode.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Palette {
    background: Color,
    text: Color,
    panel: Color,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self {
                background: Color::White,
                text: Color::Black,
                panel: Color::Gray,
                accent: Color::Rgb(184, 134, 11),
                muted: Color::DarkGray,
            },
            DisplayMode::Dark => Self {
                background: Color::Black,
                text: Color::White,
                panel: Color::DarkGray,
                accent: Color::Yellow,
                muted: Color::Gray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    fn border(&self) -> Style {
        Style::default().fg(self.panel)
    }
}

pub fn render(state: &GoldState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let palette = Palette::for_mode(state.display_mode);
    f.render_widget(Block::default().style(palette.base()), area);

    if is_narrow_layout(area.width) {
        let shop = shop_list(state, &palette, true);
        let shop_height = shop.visual_height(area.width.saturating_sub(2)) + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(COIN_PANEL_HEIGHT),
                Constraint::Length(shop_height),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        render_coin_panel(state, &palette, f, chunks[0], click_state);
        render_shop(state, shop, &palette, f, chunks[1], click_state);
        render_log(state, &palette, f, chunks[2]);
        render_footer(&palette, f, chunks[3], click_state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let shop_inner = columns[0].width.saturating_sub(2);
        let mut shop = shop_list(state, &palette, false);
        if shop.visual_height(shop_inner) > state.catalog.len() as u16 {
            shop = shop_list(state, &palette, true);
        }
        let shop_height = shop.visual_height(shop_inner) + 2;

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(COIN_PANEL_HEIGHT),
                Constraint::Min(shop_height),
                Constraint::Length(1),
            ])
            .split(columns[0]);

        render_coin_panel(state, &palette, f, left[0], click_state);
        render_shop(state, shop, &palette, f, left[1], click_state);
        render_footer(&palette, f, left[2], click_state);
        render_log(state, &palette, f, columns[1]);
    }
}

fn render_coin_panel(
    state: &GoldState,
    palette: &Palette,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let flashing = state.tap_flash > 0;
    let (art, coin_style) = if flashing {
        (
            COIN_PRESSED_ART,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    } else {
        (
            COIN_ART,
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )
    };

    let mut cl = ClickableList::new();
    for row in art {
        cl.push_clickable(Line::from(Span::styled(*row, coin_style)), TAP_COIN);
    }
    cl.push(Line::from(Span::styled(
        format!("You have {} coins.", format_number(state.economy.currency)),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        format!("Per click: {}", format_number(state.economy.yield_per_tap)),
        Style::default().fg(palette.text),
    )));
    cl.push_clickable(
        Line::from(Span::styled(
            " [C] Click the coin to earn more! ",
            Style::default().fg(palette.muted),
        )),
        TAP_COIN,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [T] {} ", state.display_mode.toggle_label()),
            Style::default().fg(palette.text).add_modifier(Modifier::UNDERLINED),
        )),
        TOGGLE_THEME,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(" GOLD ");
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Shop rows. `compact` splits each entry over two short rows so phone
/// widths never wrap; both rows buy the entry.
fn shop_list(state: &GoldState, palette: &Palette, compact: bool) -> ClickableList<'static> {
    let mut cl = ClickableList::new();

    for (i, entry) in state.catalog.entries().iter().enumerate() {
        let affordable = state.can_afford_index(i);
        let (name_style, buy_style) = if affordable {
            (
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(palette.muted),
                Style::default().fg(palette.muted),
            )
        };
        let action_id = BUY_ENTRY_BASE + i as u16;

        let key_label = if i < 9 {
            format!(" [{}] ", i + 1)
        } else {
            "     ".to_string()
        };
        let key_span = Span::styled(key_label, Style::default().fg(palette.accent));
        let icon_span = Span::styled(
            format!("{} ", entry.icon()),
            Style::default().fg(palette.accent),
        );
        let buy_span = Span::styled(
            format!("  BUY ({} COINS)", format_number(entry.price())),
            buy_style,
        );
        let owned_text = format!(
            "You own: {} (+{})",
            entry.owned,
            format_number(entry.total_yield())
        );

        if compact {
            let top = Line::from(vec![
                key_span,
                icon_span,
                Span::styled(entry.name().to_string(), name_style),
                buy_span,
            ]);
            let bottom = Line::from(vec![
                Span::raw("     "),
                Span::styled(
                    format!("+{}/click  ", format_number(entry.yield_increase())),
                    name_style,
                ),
                Span::styled(owned_text, Style::default().fg(palette.muted)),
            ]);
            cl.push_clickable(top, action_id);
            cl.push_clickable(bottom, action_id);
        } else {
            let line = Line::from(vec![
                key_span,
                icon_span,
                Span::styled(
                    format!(
                        "{} (Per click: +{})",
                        entry.name(),
                        format_number(entry.yield_increase())
                    ),
                    name_style,
                ),
                Span::styled(
                    format!("  {owned_text}"),
                    Style::default().fg(palette.muted),
                ),
                buy_span,
            ]);
            cl.push_clickable(line, action_id);
        }
    }

    cl
}

fn render_shop(
    state: &GoldState,
    cl: ClickableList<'static>,
    palette: &Palette,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let inner_width = area.width.saturating_sub(2);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, inner_width);
    }

    let border_style = if state.purchase_flash > 0 {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" SHOP ");
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_footer(
    palette: &Palette,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(
            " [R] New game (clears progress) ",
            Style::default().fg(palette.muted),
        )),
        RESET_GAME,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 0, 0, 0);
    }

    f.render_widget(
        Paragraph::new(cl.into_lines()).alignment(Alignment::Center),
        area,
    );
}

fn render_log(state: &GoldState, palette: &Palette, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(" LOG "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
