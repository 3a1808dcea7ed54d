use std::f64::consts::TAU;

use serde_json::json;

use ipl_dashboard::colors::{ColorMap, color_of};
use ipl_dashboard::dataset::{Dataset, TeamRecord};
use ipl_dashboard::error::ConfigurationError;
use ipl_dashboard::filter::filter_dataset;
use ipl_dashboard::selection::Selection;
use ipl_dashboard::views::{DashboardViews, SeriesLabel, TABLE_COLUMNS, derive_views};

fn views_for(names: &[&str]) -> DashboardViews {
    let dataset = Dataset::ipl();
    let filtered = filter_dataset(&dataset, &Selection::from_names(names.iter().copied()));
    derive_views(&filtered, &ColorMap::ipl()).expect("seed colors cover seed data")
}

#[test]
fn mumbai_and_chennai_table_and_bar_order() {
    let views = views_for(&["Mumbai Indians", "Chennai Super Kings"]);

    let table: Vec<&str> = views.table.rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(table, vec!["Chennai Super Kings", "Mumbai Indians"]);
    assert_eq!(views.table.columns, TABLE_COLUMNS);
    assert_eq!(
        views.table.rows[0].cells(),
        [
            "Chennai Super Kings".to_string(),
            "265".to_string(),
            "148".to_string(),
            "112".to_string(),
            "5".to_string()
        ]
    );

    let bars: Vec<(&str, u32)> = views
        .bar
        .bars
        .iter()
        .map(|b| (b.team.as_str(), b.wins))
        .collect();
    assert_eq!(bars, vec![("Mumbai Indians", 158), ("Chennai Super Kings", 148)]);
    assert_eq!(
        views.bar.bars[0].tooltip(),
        vec![("Team", "Mumbai Indians".to_string()), ("Wins", "158".to_string())]
    );
}

#[test]
fn zero_title_teams_render_no_slices() {
    let dataset = Dataset::new(vec![
        TeamRecord::new("Gujarat Titans", 76, 45, 31, 0),
        TeamRecord::new("Lucknow Super Giants", 76, 38, 36, 0),
    ])
    .unwrap();
    let filtered = filter_dataset(&dataset, &Selection::all(&dataset));
    let views = derive_views(&filtered, &ColorMap::ipl()).unwrap();
    assert!(views.pie.slices.is_empty());
    assert_eq!(views.bar.bars.len(), 2);
}

#[test]
fn seed_gujarat_title_keeps_one_slice() {
    let views = views_for(&["Gujarat Titans", "Lucknow Super Giants"]);
    let teams: Vec<&str> = views.pie.slices.iter().map(|s| s.team.as_str()).collect();
    assert_eq!(teams, vec!["Gujarat Titans"]);
    assert!((views.pie.slices[0].fraction - 1.0).abs() < 1e-12);
}

#[test]
fn empty_selection_renders_empty_views() {
    let views = views_for(&[]);
    assert!(views.table.rows.is_empty());
    assert!(views.bar.bars.is_empty());
    assert!(views.pie.slices.is_empty());
    assert!(views.line.points.is_empty());
    assert_eq!(views.line.max_value(), 0);
}

#[test]
fn full_selection_scenario() {
    let dataset = Dataset::ipl();
    let views = views_for(&dataset.team_names());
    assert_eq!(views.table.rows.len(), 10);
    assert_eq!(views.bar.bars[0].team, "Mumbai Indians");
    assert_eq!(views.bar.bars[0].wins, 158);
    assert!(views.bar.bars.windows(2).all(|w| w[0].wins >= w[1].wins));
}

#[test]
fn pie_omits_zero_titles_and_splits_full_circle() {
    let dataset = Dataset::ipl();
    let views = views_for(&dataset.team_names());

    assert!(views.pie.slices.iter().all(|s| s.titles > 0));
    for team in ["Delhi Capitals", "Punjab Kings", "Royal Challengers Bangalore"] {
        assert!(views.pie.slices.iter().all(|s| s.team != team));
    }

    let total: u32 = views.pie.slices.iter().map(|s| s.titles).sum();
    assert_eq!(total, 17);
    let fractions: f64 = views.pie.slices.iter().map(|s| s.fraction).sum();
    assert!((fractions - 1.0).abs() < 1e-9);

    assert_eq!(views.pie.slices[0].start_angle, 0.0);
    let last = views.pie.slices.last().unwrap();
    assert!((last.end_angle - TAU).abs() < 1e-9);
    assert!(
        views
            .pie
            .slices
            .windows(2)
            .all(|w| (w[0].end_angle - w[1].start_angle).abs() < 1e-12)
    );
}

#[test]
fn pie_titles_past_u32_range_do_not_overflow() {
    let dataset = Dataset::new(vec![
        TeamRecord::new("Alpha", 1, 0, 0, u32::MAX),
        TeamRecord::new("Bravo", 1, 0, 0, 1),
    ])
    .unwrap();
    let colors = ColorMap::from_hex([("Alpha", "#111111"), ("Bravo", "#222222")]).unwrap();
    let filtered = filter_dataset(&dataset, &Selection::all(&dataset));
    let views = derive_views(&filtered, &colors).unwrap();

    assert_eq!(views.pie.slices.len(), 2);
    let fractions: f64 = views.pie.slices.iter().map(|s| s.fraction).sum();
    assert!((fractions - 1.0).abs() < 1e-9);
    assert!(views.pie.slices[0].fraction > 0.999);
    assert!(views.pie.slices[1].fraction > 0.0);
    assert!((views.pie.slices[1].end_angle - TAU).abs() < 1e-9);
}

#[test]
fn bar_ties_keep_filtered_order() {
    let dataset = Dataset::new(vec![
        TeamRecord::new("Alpha", 10, 5, 5, 0),
        TeamRecord::new("Bravo", 10, 7, 3, 0),
        TeamRecord::new("Charlie", 10, 5, 5, 0),
    ])
    .unwrap();
    let colors = ColorMap::from_hex([
        ("Alpha", "#111111"),
        ("Bravo", "#222222"),
        ("Charlie", "#333333"),
    ])
    .unwrap();
    let filtered = filter_dataset(&dataset, &Selection::all(&dataset));
    let views = derive_views(&filtered, &colors).unwrap();
    let order: Vec<&str> = views.bar.bars.iter().map(|b| b.team.as_str()).collect();
    assert_eq!(order, vec!["Bravo", "Alpha", "Charlie"]);
}

#[test]
fn line_view_emits_two_series_per_team() {
    let views = views_for(&["Sunrisers Hyderabad", "Rajasthan Royals"]);
    assert_eq!(views.line.points.len(), 4);

    let first = &views.line.points[0];
    assert_eq!(first.team, "Rajasthan Royals");
    assert_eq!(first.series, SeriesLabel::MatchesPlayed);
    assert_eq!(first.value, 255);
    assert_eq!(
        first.tooltip(),
        vec![
            ("Team", "Rajasthan Royals".to_string()),
            ("Stat", "Matches Played".to_string()),
            ("Value", "255".to_string()),
        ]
    );

    let wins: Vec<u32> = views.line.series(SeriesLabel::Wins).map(|p| p.value).collect();
    assert_eq!(wins, vec![121, 97]);
    assert_eq!(views.line.max_value(), 255);
    assert_ne!(
        SeriesLabel::MatchesPlayed.stroke_dash(),
        SeriesLabel::Wins.stroke_dash()
    );
}

#[test]
fn every_view_uses_the_same_team_color() {
    let colors = ColorMap::ipl();
    let dataset = Dataset::ipl();
    let views = views_for(&dataset.team_names());

    for row in &views.table.rows {
        assert_eq!(row.color, color_of(&row.team, &colors).unwrap());
    }
    for bar in &views.bar.bars {
        assert_eq!(bar.color, color_of(&bar.team, &colors).unwrap());
    }
    for slice in &views.pie.slices {
        assert_eq!(slice.color, color_of(&slice.team, &colors).unwrap());
    }
    for point in &views.line.points {
        assert_eq!(point.color, color_of(&point.team, &colors).unwrap());
    }
}

#[test]
fn missing_color_aborts_the_whole_pass() {
    let dataset = Dataset::new(vec![
        TeamRecord::new("Mumbai Indians", 285, 158, 122, 6),
        TeamRecord::new("Deccan Chargers", 75, 29, 46, 1),
    ])
    .unwrap();
    let filtered = filter_dataset(&dataset, &Selection::all(&dataset));
    let err = derive_views(&filtered, &ColorMap::ipl()).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::MissingColor {
            team: "Deccan Chargers".to_string()
        }
    );

    // Deselecting the uncolored team lets the pass succeed again.
    let filtered = filter_dataset(&dataset, &Selection::from_names(["Mumbai Indians"]));
    assert!(derive_views(&filtered, &ColorMap::ipl()).is_ok());
}

#[test]
fn chart_specs_describe_marks_and_tooltips() {
    let views = views_for(&["Mumbai Indians", "Delhi Capitals"]);

    let bar = views.bar.to_vega_lite();
    assert_eq!(bar["mark"], "bar");
    assert_eq!(bar["title"], "Wins by Team");
    assert_eq!(bar["height"], 400);
    assert_eq!(bar["encoding"]["x"]["sort"], "-y");
    assert_eq!(bar["encoding"]["color"]["scale"]["domain"][5], "Mumbai Indians");
    assert_eq!(bar["encoding"]["color"]["scale"]["range"][5], "#004BA0");
    assert_eq!(bar["data"]["values"][0]["Team"], "Mumbai Indians");
    assert_eq!(views.bar.spec.tooltip_fields(), vec!["Team", "Wins"]);

    let pie = views.pie.to_vega_lite();
    assert_eq!(pie["mark"], "arc");
    assert_eq!(pie["encoding"]["theta"]["field"], "Titles");
    assert_eq!(pie["data"]["values"].as_array().unwrap().len(), 1);
    assert_eq!(views.pie.spec.tooltip_fields(), vec!["Team", "Titles"]);
    assert_eq!(
        views.pie.slices[0].tooltip(),
        vec![("Team", "Mumbai Indians".to_string()), ("Titles", "6".to_string())]
    );

    let line = views.line.to_vega_lite();
    assert_eq!(line["mark"]["type"], "line");
    assert_eq!(line["encoding"]["strokeDash"]["field"], "Stat");
    assert_eq!(
        line["encoding"]["strokeDash"]["scale"]["domain"],
        json!(["Matches Played", "Wins"])
    );
    assert_eq!(
        line["encoding"]["strokeDash"]["scale"]["range"],
        json!([[], [4, 4]])
    );
    assert_eq!(line["data"]["values"].as_array().unwrap().len(), 4);
    assert_eq!(
        views.line.spec.tooltip_fields(),
        vec!["Team", "Stat", "Value"]
    );

    assert_eq!(views.chart_documents().len(), 3);
}
