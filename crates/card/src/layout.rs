//! Stats card layout
//!
//! Turns [`UserStats`] and the synthetic series into a [`CardLayout`]. All
//! geometry comes from fixed margins and sizes; long text is not measured
//! and may overflow its box.

use crate::element::{
    line_height, CardLayout, Color, ElementKind, GradientDirection, Paint, Point, Rect,
    TextAnchor, VisualElement,
};
use crate::{Canvas, ChartKind, LayoutError, Result, Theme};
use ghcard_analyzer::{MonthlySample, UserStats, HEATMAP_CELLS, HEATMAP_SIDE, MONTHS_PER_YEAR};
use tracing::debug;

// Palette
const NAVY_950: Color = Color::hex(0x0f172a);
const SLATE_800: Color = Color::hex(0x1e293b);
const SLATE_300: Color = Color::hex(0xcbd5e1);
const SLATE_400: Color = Color::hex(0x94a3b8);
const EMERALD: Color = Color::hex(0x10b981);
const BLUE: Color = Color::hex(0x3b82f6);
const PURPLE: Color = Color::hex(0x8b5cf6);
const ERROR_RED: Color = Color::hex(0xdc2626);
const PANEL_FILL: Color = Color::rgba(255, 255, 255, 0.05);
const PANEL_BORDER: Color = Color::rgba(255, 255, 255, 0.1);

// Geometry
const PADDING: f32 = 40.0;
const SECTION_GAP: f32 = 40.0;
const TITLE_SIZE: f32 = 42.0;
const SUBTITLE_SIZE: f32 = 18.0;
const SUBTITLE_GAP: f32 = 10.0;
const CARD_COUNT: usize = 3;
const CARD_WIDTH: f32 = 250.0;
const CARD_HEIGHT: f32 = 160.0;
const CARD_PADDING: f32 = 20.0;
const ICON_BOX: f32 = 44.0;
const ICON_SIZE: f32 = 24.0;
const VALUE_SIZE: f32 = 32.0;
const CARD_LABEL_SIZE: f32 = 14.0;
const PANEL_RADIUS: f32 = 12.0;
const PANEL_PADDING: f32 = 20.0;
const PANEL_TITLE_SIZE: f32 = 16.0;
const PANEL_TITLE_GAP: f32 = 12.0;
const AXIS_LABEL_SIZE: f32 = 12.0;
const AXIS_LABEL_GAP: f32 = 6.0;
/// Share of a month slot covered by its bar
const BAR_FILL_RATIO: f32 = 0.6;
const AREA_OPACITY: f32 = 0.25;
const MARKER_RADIUS: f32 = 5.0;
const LINE_WIDTH: f32 = 3.0;
const HEATMAP_CELL: f32 = 28.0;
const HEATMAP_GAP: f32 = 6.0;
const HEATMAP_PANEL_GAP: f32 = 20.0;
const FOOTER_HEIGHT: f32 = 40.0;
const FOOTER_GAP: f32 = 20.0;
const FOOTER_SIZE: f32 = 18.0;

pub const TITLE: &str = "GitHub Activity";
pub const ERROR_CARD_MESSAGE: &str = "Error: User not found";

/// Variant switches for [`build_layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub theme: Theme,
    pub chart: ChartKind,
    /// Row-major cell intensities in `[0, 1]`; `None` leaves the heatmap out
    pub heatmap: Option<Vec<f64>>,
    /// Stars / repositories / followers row along the bottom edge
    pub footer: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            chart: ChartKind::default(),
            heatmap: None,
            footer: true,
        }
    }
}

struct StatCard {
    title: &'static str,
    value: u64,
    icon: &'static str,
    accent: Color,
}

/// Lay out the full stats card.
///
/// `monthly` must hold exactly twelve samples; they are drawn in the order
/// given, which callers keep as January through December.
pub fn build_layout(
    stats: &UserStats,
    monthly: &[MonthlySample],
    options: &LayoutOptions,
    canvas: Canvas,
) -> Result<CardLayout> {
    if monthly.len() != MONTHS_PER_YEAR {
        return Err(LayoutError::SeriesLength {
            expected: MONTHS_PER_YEAR,
            actual: monthly.len(),
        });
    }
    if let Some(cells) = &options.heatmap {
        if cells.len() != HEATMAP_CELLS {
            return Err(LayoutError::HeatmapSize {
                expected: HEATMAP_CELLS,
                actual: cells.len(),
            });
        }
    }

    let width = canvas.width as f32;
    let height = canvas.height as f32;
    let content = Rect::new(PADDING, PADDING, width - 2.0 * PADDING, height - 2.0 * PADDING);

    let (title, title_bottom) = title_block(stats, content);

    let cards_top = title_bottom + SECTION_GAP;
    let cards = stat_cards(stats, content, cards_top);

    let chart_top = cards_top + CARD_HEIGHT + SECTION_GAP;
    let footer_top = content.bottom() - FOOTER_HEIGHT;
    let chart_bottom = if options.footer {
        footer_top - FOOTER_GAP
    } else {
        content.bottom()
    };
    let chart_height = (chart_bottom - chart_top).max(0.0);

    let heatmap_width = 2.0 * PANEL_PADDING
        + HEATMAP_SIDE as f32 * HEATMAP_CELL
        + (HEATMAP_SIDE - 1) as f32 * HEATMAP_GAP;
    let chart_width = match options.heatmap {
        Some(_) => content.width - heatmap_width - HEATMAP_PANEL_GAP,
        None => content.width,
    };
    let chart_area = Rect::new(content.x, chart_top, chart_width.max(0.0), chart_height);

    let mut root = VisualElement::container(Rect::new(0.0, 0.0, width, height))
        .id("background")
        .fill(Paint::LinearGradient {
            direction: GradientDirection::Diagonal,
            stops: vec![NAVY_950, SLATE_800, NAVY_950],
        })
        .child(title)
        .child(cards)
        .child(chart_panel(monthly, options.chart, chart_area));

    if let Some(cells) = &options.heatmap {
        let area = Rect::new(
            chart_area.right() + HEATMAP_PANEL_GAP,
            chart_top,
            heatmap_width,
            chart_height,
        );
        root = root.child(heatmap_panel(cells, area));
    }

    if options.footer {
        let area = Rect::new(content.x, footer_top, content.width, FOOTER_HEIGHT);
        root = root.child(footer_row(stats, area));
    }

    debug!(
        username = %stats.username,
        chart = ?options.chart,
        heatmap = options.heatmap.is_some(),
        footer = options.footer,
        "Built card layout"
    );

    Ok(CardLayout {
        width: canvas.width,
        height: canvas.height,
        theme: options.theme,
        root,
    })
}

/// Solid red card with a single centered message
pub fn build_error_layout(message: &str, canvas: Canvas) -> CardLayout {
    let width = canvas.width as f32;
    let height = canvas.height as f32;
    let font_size = 32.0;

    let text = VisualElement::text(
        ElementKind::Heading,
        0.0,
        (height - line_height(font_size)) / 2.0,
        width,
        message,
        font_size,
        Color::WHITE,
    )
    .id("error-message")
    .weight(700)
    .anchor(TextAnchor::Middle);

    CardLayout {
        width: canvas.width,
        height: canvas.height,
        theme: Theme::default(),
        root: VisualElement::container(Rect::new(0.0, 0.0, width, height))
            .id("background")
            .fill(ERROR_RED)
            .child(text),
    }
}

/// Heatmap cell color for an intensity. The intensities are random filler,
/// not real activity.
pub fn heatmap_fill(intensity: f64, accent: Color) -> Color {
    if intensity > 0.7 {
        accent
    } else if intensity > 0.4 {
        accent.with_alpha(0.6)
    } else if intensity > 0.2 {
        accent.with_alpha(0.3)
    } else {
        Color::rgba(255, 255, 255, 0.05)
    }
}

fn title_block(stats: &UserStats, content: Rect) -> (VisualElement, f32) {
    let heading = VisualElement::text(
        ElementKind::Heading,
        content.x,
        content.y,
        content.width,
        TITLE,
        TITLE_SIZE,
        Color::WHITE,
    )
    .id("title-heading")
    .weight(700)
    .anchor(TextAnchor::Middle)
    .fill(Paint::LinearGradient {
        direction: GradientDirection::Horizontal,
        stops: vec![Color::WHITE, SLATE_300],
    });

    let subtitle = VisualElement::text(
        ElementKind::Paragraph,
        content.x,
        heading.bounds.bottom() + SUBTITLE_GAP,
        content.width,
        format!("A visual journey through @{}'s code contributions", stats.username),
        SUBTITLE_SIZE,
        SLATE_400,
    )
    .id("title-subtitle")
    .anchor(TextAnchor::Middle);

    let bottom = subtitle.bounds.bottom();
    let block = VisualElement::container(Rect::new(
        content.x,
        content.y,
        content.width,
        bottom - content.y,
    ))
    .id("title")
    .child(heading)
    .child(subtitle);

    (block, bottom)
}

fn stat_cards(stats: &UserStats, content: Rect, top: f32) -> VisualElement {
    let cards = [
        StatCard {
            title: "Total Commits",
            value: stats.estimated_total_commits,
            icon: "📈",
            accent: EMERALD,
        },
        StatCard {
            title: "Avg per Month",
            value: stats.estimated_avg_commits_per_month,
            icon: "📅",
            accent: BLUE,
        },
        StatCard {
            title: "Peak Month",
            value: stats.estimated_peak_month_commits,
            icon: "⚡",
            accent: PURPLE,
        },
    ];

    // Space-between: first card flush left, last flush right.
    let gap = (content.width - CARD_COUNT as f32 * CARD_WIDTH) / (CARD_COUNT - 1) as f32;

    let row = VisualElement::container(Rect::new(content.x, top, content.width, CARD_HEIGHT))
        .id("stat-cards");

    row.children(cards.iter().enumerate().map(|(i, card)| {
        let bounds = Rect::new(
            content.x + i as f32 * (CARD_WIDTH + gap),
            top,
            CARD_WIDTH,
            CARD_HEIGHT,
        );
        stat_card(i, card, bounds)
    }))
}

fn stat_card(index: usize, card: &StatCard, bounds: Rect) -> VisualElement {
    let inner = bounds.inset(CARD_PADDING);
    let icon_box = Rect::new(inner.x, inner.y, ICON_BOX, ICON_BOX);
    let id = format!("stat-card-{}", index);

    let icon = VisualElement::text(
        ElementKind::TextLabel,
        icon_box.x,
        icon_box.center_y() - line_height(ICON_SIZE) / 2.0,
        icon_box.width,
        card.icon,
        ICON_SIZE,
        card.accent,
    )
    .id(format!("{}-icon", id))
    .anchor(TextAnchor::Middle);

    let value = VisualElement::text(
        ElementKind::Heading,
        inner.x,
        icon_box.bottom() + 15.0,
        inner.width,
        card.value.to_string(),
        VALUE_SIZE,
        Color::WHITE,
    )
    .id(format!("{}-value", id))
    .weight(700);

    let label = VisualElement::text(
        ElementKind::Paragraph,
        inner.x,
        value.bounds.bottom() + 5.0,
        inner.width,
        card.title,
        CARD_LABEL_SIZE,
        SLATE_400,
    )
    .id(format!("{}-label", id));

    VisualElement::container(bounds)
        .id(id.clone())
        .fill(PANEL_FILL)
        .stroke(PANEL_BORDER, 1.0)
        .radius(PANEL_RADIUS)
        .child(
            // `${color}20` in hex alpha
            VisualElement::rect(icon_box, card.accent.with_alpha(0x20 as f32 / 255.0))
                .id(format!("{}-icon-box", id))
                .radius(8.0),
        )
        .child(icon)
        .child(value)
        .child(label)
}

fn panel(id: &str, title: &str, area: Rect) -> (VisualElement, f32) {
    let title_el = VisualElement::text(
        ElementKind::TextLabel,
        area.x + PANEL_PADDING,
        area.y + PANEL_PADDING,
        (area.width - 2.0 * PANEL_PADDING).max(0.0),
        title,
        PANEL_TITLE_SIZE,
        SLATE_400,
    )
    .id(format!("{}-title", id))
    .weight(600);
    let content_top = title_el.bounds.bottom() + PANEL_TITLE_GAP;

    let el = VisualElement::container(area)
        .id(id)
        .fill(PANEL_FILL)
        .stroke(PANEL_BORDER, 1.0)
        .radius(PANEL_RADIUS)
        .child(title_el);

    (el, content_top)
}

fn chart_panel(monthly: &[MonthlySample], kind: ChartKind, area: Rect) -> VisualElement {
    let (panel, plot_top) = panel("chart", "Monthly Commits", area);

    let baseline =
        area.bottom() - PANEL_PADDING - line_height(AXIS_LABEL_SIZE) - AXIS_LABEL_GAP;
    let plot = Rect::new(
        area.x + PANEL_PADDING,
        plot_top,
        (area.width - 2.0 * PANEL_PADDING).max(0.0),
        (baseline - plot_top).max(0.0),
    );
    let max_bar_height = plot.height;
    let slot = plot.width / monthly.len() as f32;
    let max_commits = monthly.iter().map(|s| s.commits).max().unwrap_or(0);

    let scaled = |commits: u32| -> f32 {
        if max_commits == 0 {
            0.0
        } else {
            (commits as f32 / max_commits as f32) * max_bar_height
        }
    };

    let mut plot_el = VisualElement::container(plot).id("chart-plot").child(
        VisualElement::path(
            vec![
                Point::new(plot.x, plot.bottom()),
                Point::new(plot.right(), plot.bottom()),
            ],
            false,
        )
        .id("chart-axis")
        .stroke(PANEL_BORDER, 1.0),
    );

    match kind {
        ChartKind::Bars => {
            let bar_width = slot * BAR_FILL_RATIO;
            plot_el = plot_el.children(monthly.iter().enumerate().map(|(i, sample)| {
                let h = scaled(sample.commits);
                let x = plot.x + i as f32 * slot + (slot - bar_width) / 2.0;
                VisualElement::rect(
                    Rect::new(x, plot.bottom() - h, bar_width, h),
                    Paint::LinearGradient {
                        direction: GradientDirection::Vertical,
                        stops: vec![PURPLE, BLUE],
                    },
                )
                .id(format!("bar-{}", i))
                .radius(4.0)
            }));
        }
        ChartKind::Area => {
            let points: Vec<Point> = monthly
                .iter()
                .enumerate()
                .map(|(i, sample)| {
                    Point::new(
                        plot.x + (i as f32 + 0.5) * slot,
                        plot.bottom() - scaled(sample.commits),
                    )
                })
                .collect();

            let mut outline = Vec::with_capacity(points.len() + 2);
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                outline.push(Point::new(first.x, plot.bottom()));
                outline.extend(points.iter().copied());
                outline.push(Point::new(last.x, plot.bottom()));
            }

            plot_el = plot_el
                .child(
                    VisualElement::path(outline, true)
                        .id("chart-area")
                        .fill(BLUE)
                        .opacity(AREA_OPACITY),
                )
                .child(
                    VisualElement::path(points.clone(), false)
                        .id("chart-line")
                        .stroke(BLUE, LINE_WIDTH),
                )
                .children(points.iter().enumerate().map(|(i, p)| {
                    VisualElement::marker(*p, MARKER_RADIUS)
                        .id(format!("point-{}", i))
                        .fill(BLUE)
                        .stroke(Color::WHITE, 2.0)
                }));
        }
    }

    // Month axis labels, one per slot
    plot_el = plot_el.children(monthly.iter().enumerate().map(|(i, sample)| {
        VisualElement::text(
            ElementKind::TextLabel,
            plot.x + i as f32 * slot,
            plot.bottom() + AXIS_LABEL_GAP,
            slot,
            sample.label(),
            AXIS_LABEL_SIZE,
            SLATE_400,
        )
        .id(format!("month-{}", i))
        .anchor(TextAnchor::Middle)
    }));

    panel.child(plot_el)
}

fn heatmap_panel(cells: &[f64], area: Rect) -> VisualElement {
    let (panel, grid_top) = panel("heatmap", "Activity", area);
    let grid_left = area.x + PANEL_PADDING;
    let pitch = HEATMAP_CELL + HEATMAP_GAP;

    panel.children(cells.iter().enumerate().map(|(i, &intensity)| {
        let (row, col) = (i / HEATMAP_SIDE, i % HEATMAP_SIDE);
        VisualElement::rect(
            Rect::new(
                grid_left + col as f32 * pitch,
                grid_top + row as f32 * pitch,
                HEATMAP_CELL,
                HEATMAP_CELL,
            ),
            heatmap_fill(intensity, EMERALD),
        )
        .id(format!("heatmap-cell-{}-{}", row, col))
        .radius(4.0)
    }))
}

fn footer_row(stats: &UserStats, area: Rect) -> VisualElement {
    let readouts = [
        ("footer-stars", format!("⭐ {} Stars", stats.total_stars)),
        (
            "footer-repos",
            format!("📦 {} Repositories", stats.public_repo_count),
        ),
        ("footer-followers", format!("👥 {} Followers", stats.followers)),
    ];
    let slot = area.width / readouts.len() as f32;
    let text_top = area.center_y() - line_height(FOOTER_SIZE) / 2.0;

    VisualElement::container(area)
        .id("footer")
        .children(readouts.into_iter().enumerate().map(|(i, (id, text))| {
            VisualElement::text(
                ElementKind::TextLabel,
                area.x + i as f32 * slot,
                text_top,
                slot,
                text,
                FOOTER_SIZE,
                SLATE_300,
            )
            .id(id)
            .anchor(TextAnchor::Middle)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use ghcard_analyzer::aggregate;
    use ghcard_collector::{RawRepo, RawUser};

    const MONTHS: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    fn stats() -> UserStats {
        let user = RawUser {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            followers: 42,
            following: 1,
            public_repos: 10,
        };
        let repos = vec![RawRepo {
            name: "hello".to_string(),
            stargazers_count: 7,
            forks_count: 1,
            language: Some("Rust".to_string()),
            updated_at: None,
        }];
        aggregate(&user, &repos).unwrap()
    }

    fn series(counts: [u32; 12]) -> Vec<MonthlySample> {
        MONTHS
            .iter()
            .zip(counts)
            .map(|(m, c)| MonthlySample::new(*m, c))
            .collect()
    }

    const COUNTS: [u32; 12] = [10, 20, 39, 15, 11, 30, 25, 12, 18, 33, 22, 14];

    fn text_of<'a>(layout: &'a CardLayout, id: &str) -> &'a str {
        layout
            .find(id)
            .and_then(|el| el.text.as_deref())
            .unwrap_or_else(|| panic!("no text element {}", id))
    }

    #[test]
    fn background_fills_canvas_with_dark_gradient() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        assert_eq!((layout.width, layout.height), (1200, 800));
        assert_eq!(layout.root.bounds, Rect::new(0.0, 0.0, 1200.0, 800.0));
        assert_eq!(
            layout.root.style.fill,
            Some(Paint::LinearGradient {
                direction: GradientDirection::Diagonal,
                stops: vec![NAVY_950, SLATE_800, NAVY_950],
            })
        );
    }

    #[test]
    fn title_mentions_user() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        assert_eq!(text_of(&layout, "title-heading"), "GitHub Activity");
        assert!(text_of(&layout, "title-subtitle").contains("@octocat"));
        let heading = layout.find("title-heading").unwrap();
        assert_eq!(heading.style.text_anchor, TextAnchor::Middle);
        assert_eq!(heading.bounds.center_x(), 600.0);
    }

    #[test]
    fn three_cards_in_fixed_order() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        let labels: Vec<&str> = (0..3)
            .map(|i| text_of(&layout, &format!("stat-card-{}-label", i)))
            .collect();
        assert_eq!(labels, ["Total Commits", "Avg per Month", "Peak Month"]);

        let values: Vec<&str> = (0..3)
            .map(|i| text_of(&layout, &format!("stat-card-{}-value", i)))
            .collect();
        assert_eq!(values, ["150", "13", "33"]);

        let accents: Vec<Option<Color>> = (0..3)
            .map(|i| {
                layout
                    .find(&format!("stat-card-{}-icon", i))
                    .and_then(|el| el.style.text_color)
            })
            .collect();
        assert_eq!(accents, [Some(EMERALD), Some(BLUE), Some(PURPLE)]);
    }

    #[test]
    fn cards_are_evenly_spaced_in_one_row() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        let cards: Vec<Rect> = (0..3)
            .map(|i| layout.find(&format!("stat-card-{}", i)).unwrap().bounds)
            .collect();
        assert!(cards.iter().all(|c| c.y == cards[0].y));
        let gap_a = cards[1].x - cards[0].right();
        let gap_b = cards[2].x - cards[1].right();
        assert!((gap_a - gap_b).abs() < 1e-3);
        assert_eq!(cards[0].x, PADDING);
        assert!((cards[2].right() - (1200.0 - PADDING)).abs() < 1e-3);
    }

    #[test]
    fn bar_heights_are_proportional_to_the_busiest_month() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        let plot = layout.find("chart-plot").unwrap().bounds;
        let max_bar_height = plot.height;
        assert!(max_bar_height > 0.0);

        let bars = layout.find_prefixed("bar-");
        assert_eq!(bars.len(), 12);
        for (i, count) in COUNTS.iter().enumerate() {
            let bar = layout.find(&format!("bar-{}", i)).unwrap();
            let expected = (*count as f32 / 39.0) * max_bar_height;
            assert!((bar.bounds.height - expected).abs() < 1e-3, "bar {}", i);
            assert!((bar.bounds.bottom() - plot.bottom()).abs() < 1e-3);
        }
        // The busiest month reaches the full height exactly.
        assert_eq!(layout.find("bar-2").unwrap().bounds.height, max_bar_height);
    }

    #[test]
    fn month_slots_are_equal_and_ordered() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        let plot = layout.find("chart-plot").unwrap().bounds;
        let slot = plot.width / 12.0;
        for i in 0..12 {
            let label = layout.find(&format!("month-{}", i)).unwrap();
            assert_eq!(label.text.as_deref(), Some(&MONTHS[i].name()[..3]));
            assert!((label.bounds.x - (plot.x + i as f32 * slot)).abs() < 1e-3);
            assert!((label.bounds.width - slot).abs() < 1e-3);
        }
    }

    #[test]
    fn all_zero_series_draws_flat_bars() {
        let layout =
            build_layout(&stats(), &series([0; 12]), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        assert!(layout.find_prefixed("bar-").iter().all(|b| b.bounds.height == 0.0));
    }

    #[test]
    fn area_chart_has_line_area_and_markers() {
        let options = LayoutOptions {
            chart: ChartKind::Area,
            ..LayoutOptions::default()
        };
        let layout = build_layout(&stats(), &series(COUNTS), &options, Canvas::CARD).unwrap();

        assert!(layout.find_prefixed("bar-").is_empty());
        let line = layout.find("chart-line").unwrap();
        assert_eq!(line.points.len(), 12);
        assert!(!line.closed);
        let area = layout.find("chart-area").unwrap();
        assert!(area.closed);
        assert_eq!(area.style.opacity, AREA_OPACITY);
        assert_eq!(area.points.len(), 14);

        let plot = layout.find("chart-plot").unwrap().bounds;
        let markers = layout.find_prefixed("point-");
        assert_eq!(markers.len(), 12);
        // Busiest month touches the top of the plot.
        assert!((markers[2].bounds.center_y() - plot.y).abs() < 1e-3);
    }

    #[test]
    fn heatmap_cells_follow_threshold_ladder() {
        let mut cells = vec![0.0; HEATMAP_CELLS];
        cells[0] = 0.9;
        cells[1] = 0.5;
        cells[2] = 0.3;
        cells[3] = 0.1;
        let options = LayoutOptions {
            heatmap: Some(cells),
            ..LayoutOptions::default()
        };
        let layout = build_layout(&stats(), &series(COUNTS), &options, Canvas::CARD).unwrap();

        let fill = |id: &str| layout.find(id).unwrap().style.fill.clone();
        assert_eq!(fill("heatmap-cell-0-0"), Some(Paint::Solid(EMERALD)));
        assert_eq!(fill("heatmap-cell-0-1"), Some(Paint::Solid(EMERALD.with_alpha(0.6))));
        assert_eq!(fill("heatmap-cell-0-2"), Some(Paint::Solid(EMERALD.with_alpha(0.3))));
        assert_eq!(
            fill("heatmap-cell-0-3"),
            Some(Paint::Solid(Color::rgba(255, 255, 255, 0.05)))
        );
        assert_eq!(layout.find_prefixed("heatmap-cell-").len(), 49);

        let panel = layout.find("heatmap").unwrap().bounds;
        let chart = layout.find("chart").unwrap().bounds;
        assert!(chart.right() < panel.x);
        assert!(layout
            .find_prefixed("heatmap-cell-")
            .iter()
            .all(|c| panel.contains(&c.bounds)));
    }

    #[test]
    fn footer_shows_stars_repos_followers() {
        let layout =
            build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
                .unwrap();

        assert_eq!(text_of(&layout, "footer-stars"), "⭐ 7 Stars");
        assert_eq!(text_of(&layout, "footer-repos"), "📦 10 Repositories");
        assert_eq!(text_of(&layout, "footer-followers"), "👥 42 Followers");

        let without = LayoutOptions {
            footer: false,
            ..LayoutOptions::default()
        };
        let layout = build_layout(&stats(), &series(COUNTS), &without, Canvas::CARD).unwrap();
        assert!(layout.find("footer").is_none());
    }

    #[test]
    fn everything_stays_on_canvas() {
        let options = LayoutOptions {
            heatmap: Some(vec![0.5; HEATMAP_CELLS]),
            ..LayoutOptions::default()
        };
        let layout = build_layout(&stats(), &series(COUNTS), &options, Canvas::CARD).unwrap();

        for el in layout.elements() {
            assert!(layout.root.bounds.contains(&el.bounds), "{:?}", el.id);
        }
    }

    #[test]
    fn wrong_series_length_is_rejected() {
        let short = &series(COUNTS)[..11];
        let err = build_layout(&stats(), short, &LayoutOptions::default(), Canvas::CARD)
            .unwrap_err();
        assert_eq!(err, LayoutError::SeriesLength { expected: 12, actual: 11 });

        let options = LayoutOptions {
            heatmap: Some(vec![0.1; 3]),
            ..LayoutOptions::default()
        };
        let err = build_layout(&stats(), &series(COUNTS), &options, Canvas::CARD).unwrap_err();
        assert_eq!(err, LayoutError::HeatmapSize { expected: 49, actual: 3 });
    }

    #[test]
    fn layout_is_deterministic_and_theme_is_inert() {
        let a = build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
            .unwrap();
        let b = build_layout(&stats(), &series(COUNTS), &LayoutOptions::default(), Canvas::CARD)
            .unwrap();
        assert_eq!(a, b);

        let neon = LayoutOptions {
            theme: Theme::Neon,
            ..LayoutOptions::default()
        };
        let c = build_layout(&stats(), &series(COUNTS), &neon, Canvas::CARD).unwrap();
        assert_eq!(c.theme, Theme::Neon);
        assert_eq!(a.root, c.root);
    }

    #[test]
    fn error_card_is_red_and_centered() {
        let layout = build_error_layout(ERROR_CARD_MESSAGE, Canvas::ERROR);

        assert_eq!((layout.width, layout.height), (800, 400));
        assert_eq!(layout.root.style.fill, Some(Paint::Solid(ERROR_RED)));
        let message = layout.find("error-message").unwrap();
        assert_eq!(message.text.as_deref(), Some("Error: User not found"));
        assert_eq!(message.bounds.center_x(), 400.0);
    }
}
