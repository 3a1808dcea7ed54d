use std::collections::HashMap;
use std::f64::consts::TAU;

use serde_json::{Value, json};

use crate::chart_spec::{
    ChartSpec, ColorEncoding, Encodings, FieldEncoding, FieldType, Mark, StrokeDashEncoding,
    TooltipField,
};
use crate::colors::{ColorMap, HexColor, color_of};
use crate::error::ConfigurationError;
use crate::filter::FilteredView;

pub const TABLE_TITLE: &str = "Team Statistics Table";
pub const BAR_TITLE: &str = "Wins by Team";
pub const PIE_TITLE: &str = "Distribution of IPL Titles";
pub const LINE_TITLE: &str = "Matches Played vs Wins";

pub const TABLE_COLUMNS: [&str; 5] = ["Team", "Matches Played", "Wins", "Losses", "Titles"];

const BAR_HEIGHT: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub team: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
    pub color: HexColor,
}

impl TableRow {
    /// Cell text in `TABLE_COLUMNS` order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.team.clone(),
            self.matches_played.to_string(),
            self.wins.to_string(),
            self.losses.to_string(),
            self.titles.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: &'static str,
    pub columns: [&'static str; 5],
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarDatum {
    pub team: String,
    pub wins: u32,
    pub color: HexColor,
}

impl BarDatum {
    pub fn tooltip(&self) -> Vec<(&'static str, String)> {
        vec![("Team", self.team.clone()), ("Wins", self.wins.to_string())]
    }

    fn to_row(&self) -> Value {
        json!({ "Team": self.team, "Wins": self.wins })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub bars: Vec<BarDatum>,
    pub spec: ChartSpec,
}

impl BarView {
    pub fn to_vega_lite(&self) -> Value {
        let rows: Vec<Value> = self.bars.iter().map(BarDatum::to_row).collect();
        self.spec.to_vega_lite(&rows)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub team: String,
    pub titles: u32,
    pub color: HexColor,
    /// Share of all titles in the pie, 0..=1.
    pub fraction: f64,
    /// Angles in radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn tooltip(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Team", self.team.clone()),
            ("Titles", self.titles.to_string()),
        ]
    }

    fn to_row(&self) -> Value {
        json!({ "Team": self.team, "Titles": self.titles })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieView {
    pub slices: Vec<PieSlice>,
    pub spec: ChartSpec,
}

impl PieView {
    pub fn to_vega_lite(&self) -> Value {
        let rows: Vec<Value> = self.slices.iter().map(PieSlice::to_row).collect();
        self.spec.to_vega_lite(&rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesLabel {
    MatchesPlayed,
    Wins,
}

impl SeriesLabel {
    pub const ALL: [SeriesLabel; 2] = [SeriesLabel::MatchesPlayed, SeriesLabel::Wins];

    pub fn label(self) -> &'static str {
        match self {
            SeriesLabel::MatchesPlayed => "Matches Played",
            SeriesLabel::Wins => "Wins",
        }
    }

    /// Dash pattern (on, off) for the series stroke; empty means solid.
    pub fn stroke_dash(self) -> &'static [u32] {
        match self {
            SeriesLabel::MatchesPlayed => &[],
            SeriesLabel::Wins => &[4, 4],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePoint {
    pub team: String,
    pub series: SeriesLabel,
    pub value: u32,
    pub color: HexColor,
}

impl LinePoint {
    pub fn tooltip(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Team", self.team.clone()),
            ("Stat", self.series.label().to_string()),
            ("Value", self.value.to_string()),
        ]
    }

    fn to_row(&self) -> Value {
        json!({ "Team": self.team, "Stat": self.series.label(), "Value": self.value })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub points: Vec<LinePoint>,
    pub spec: ChartSpec,
}

impl LineView {
    pub fn to_vega_lite(&self) -> Value {
        let rows: Vec<Value> = self.points.iter().map(LinePoint::to_row).collect();
        self.spec.to_vega_lite(&rows)
    }

    pub fn series(&self, label: SeriesLabel) -> impl Iterator<Item = &LinePoint> {
        self.points.iter().filter(move |p| p.series == label)
    }

    pub fn max_value(&self) -> u32 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub table: TableView,
    pub bar: BarView,
    pub pie: PieView,
    pub line: LineView,
}

impl DashboardViews {
    pub fn chart_documents(&self) -> Vec<Value> {
        vec![
            self.bar.to_vega_lite(),
            self.pie.to_vega_lite(),
            self.line.to_vega_lite(),
        ]
    }
}

/// Derives all four views from one filtered table. Colors are resolved up front so a
/// missing entry fails the whole pass instead of leaving some views drawn.
pub fn derive_views(
    filtered: &FilteredView,
    colors: &ColorMap,
) -> Result<DashboardViews, ConfigurationError> {
    let resolved = resolve_colors(filtered, colors)?;
    Ok(DashboardViews {
        table: table_view(filtered, &resolved),
        bar: bar_view(filtered, &resolved, colors),
        pie: pie_view(filtered, &resolved, colors),
        line: line_view(filtered, &resolved, colors),
    })
}

fn resolve_colors<'a>(
    filtered: &'a FilteredView,
    colors: &ColorMap,
) -> Result<HashMap<&'a str, HexColor>, ConfigurationError> {
    filtered
        .records()
        .iter()
        .map(|r| color_of(&r.name, colors).map(|c| (r.name.as_str(), c)))
        .collect()
}

fn table_view(filtered: &FilteredView, resolved: &HashMap<&str, HexColor>) -> TableView {
    TableView {
        title: TABLE_TITLE,
        columns: TABLE_COLUMNS,
        rows: filtered
            .records()
            .iter()
            .map(|r| TableRow {
                team: r.name.clone(),
                matches_played: r.matches_played,
                wins: r.wins,
                losses: r.losses,
                titles: r.titles,
                color: resolved[r.name.as_str()],
            })
            .collect(),
    }
}

fn bar_view(
    filtered: &FilteredView,
    resolved: &HashMap<&str, HexColor>,
    colors: &ColorMap,
) -> BarView {
    let mut bars: Vec<BarDatum> = filtered
        .records()
        .iter()
        .map(|r| BarDatum {
            team: r.name.clone(),
            wins: r.wins,
            color: resolved[r.name.as_str()],
        })
        .collect();
    // sort_by is stable: equal wins keep filtered order.
    bars.sort_by(|a, b| b.wins.cmp(&a.wins));

    BarView {
        bars,
        spec: ChartSpec {
            title: BAR_TITLE.to_string(),
            mark: Mark::Bar,
            point: false,
            encoding: Encodings {
                x: Some(FieldEncoding::nominal("Team").sorted("-y")),
                y: Some(FieldEncoding::quantitative("Wins")),
                theta: None,
                color: ColorEncoding::from_color_map("Team", colors),
                stroke_dash: None,
            },
            tooltip: vec![
                TooltipField::new("Team", FieldType::Nominal),
                TooltipField::new("Wins", FieldType::Quantitative),
            ],
            height: Some(BAR_HEIGHT),
        },
    }
}

fn pie_view(
    filtered: &FilteredView,
    resolved: &HashMap<&str, HexColor>,
    colors: &ColorMap,
) -> PieView {
    let with_titles: Vec<_> = filtered.records().iter().filter(|r| r.titles > 0).collect();
    let total: u64 = with_titles.iter().map(|r| u64::from(r.titles)).sum();

    let mut slices = Vec::with_capacity(with_titles.len());
    let mut angle = 0.0;
    for r in with_titles {
        let fraction = f64::from(r.titles) / total as f64;
        let end = angle + fraction * TAU;
        slices.push(PieSlice {
            team: r.name.clone(),
            titles: r.titles,
            color: resolved[r.name.as_str()],
            fraction,
            start_angle: angle,
            end_angle: end,
        });
        angle = end;
    }

    PieView {
        slices,
        spec: ChartSpec {
            title: PIE_TITLE.to_string(),
            mark: Mark::Arc,
            point: false,
            encoding: Encodings {
                x: None,
                y: None,
                theta: Some(FieldEncoding::quantitative("Titles")),
                color: ColorEncoding::from_color_map("Team", colors),
                stroke_dash: None,
            },
            tooltip: vec![
                TooltipField::new("Team", FieldType::Nominal),
                TooltipField::new("Titles", FieldType::Quantitative),
            ],
            height: None,
        },
    }
}

fn line_view(
    filtered: &FilteredView,
    resolved: &HashMap<&str, HexColor>,
    colors: &ColorMap,
) -> LineView {
    let points = filtered
        .records()
        .iter()
        .flat_map(|r| {
            let color = resolved[r.name.as_str()];
            SeriesLabel::ALL.into_iter().map(move |series| LinePoint {
                team: r.name.clone(),
                series,
                value: match series {
                    SeriesLabel::MatchesPlayed => r.matches_played,
                    SeriesLabel::Wins => r.wins,
                },
                color,
            })
        })
        .collect();

    LineView {
        points,
        spec: ChartSpec {
            title: LINE_TITLE.to_string(),
            mark: Mark::Line,
            point: true,
            encoding: Encodings {
                x: Some(FieldEncoding::nominal("Team").titled("Team")),
                y: Some(FieldEncoding::quantitative("Value").titled("Count")),
                theta: None,
                color: ColorEncoding::from_color_map("Team", colors),
                stroke_dash: Some(StrokeDashEncoding {
                    field: "Stat".to_string(),
                    legend_title: "Stat".to_string(),
                    domain: SeriesLabel::ALL.iter().map(|s| s.label().to_string()).collect(),
                    range: SeriesLabel::ALL.iter().map(|s| s.stroke_dash().to_vec()).collect(),
                }),
            },
            tooltip: vec![
                TooltipField::new("Team", FieldType::Nominal),
                TooltipField::new("Stat", FieldType::Nominal),
                TooltipField::new("Value", FieldType::Quantitative),
            ],
            height: None,
        },
    }
}
