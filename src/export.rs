use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::views::{DashboardViews, TABLE_COLUMNS};

pub const WORKBOOK_FILE: &str = "ipl_dashboard.xlsx";
pub const CHARTS_FILE: &str = "ipl_charts.json";

pub struct ExportReport {
    pub workbook: PathBuf,
    pub charts: PathBuf,
    pub teams: usize,
    pub bars: usize,
    pub slices: usize,
    pub points: usize,
}

/// Writes the current views into `dir`: a workbook with one sheet per view and a JSON array
/// of the three Vega-Lite chart documents.
pub fn export_views(dir: &Path, views: &DashboardViews) -> Result<ExportReport> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed creating export dir {}", dir.display()))?;

    let workbook_path = dir.join(WORKBOOK_FILE);
    write_workbook(&workbook_path, views)?;

    let charts_path = dir.join(CHARTS_FILE);
    let json = serde_json::to_string_pretty(&views.chart_documents())
        .context("serialize chart specs")?;
    fs::write(&charts_path, json)
        .with_context(|| format!("failed writing {}", charts_path.display()))?;

    Ok(ExportReport {
        workbook: workbook_path,
        charts: charts_path,
        teams: views.table.rows.len(),
        bars: views.bar.bars.len(),
        slices: views.pie.slices.len(),
        points: views.line.points.len(),
    })
}

fn write_workbook(path: &Path, views: &DashboardViews) -> Result<()> {
    let mut teams_rows = vec![TABLE_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>()];
    teams_rows.extend(views.table.rows.iter().map(|row| row.cells().to_vec()));

    let mut wins_rows = vec![vec!["Team".to_string(), "Wins".to_string(), "Color".to_string()]];
    wins_rows.extend(views.bar.bars.iter().map(|bar| {
        vec![bar.team.clone(), bar.wins.to_string(), bar.color.to_string()]
    }));

    let mut titles_rows = vec![vec![
        "Team".to_string(),
        "Titles".to_string(),
        "Share".to_string(),
        "Color".to_string(),
    ]];
    titles_rows.extend(views.pie.slices.iter().map(|slice| {
        vec![
            slice.team.clone(),
            slice.titles.to_string(),
            format!("{:.1}%", slice.fraction * 100.0),
            slice.color.to_string(),
        ]
    }));

    let mut line_rows = vec![vec![
        "Team".to_string(),
        "Stat".to_string(),
        "Value".to_string(),
        "Color".to_string(),
    ]];
    line_rows.extend(views.line.points.iter().map(|point| {
        vec![
            point.team.clone(),
            point.series.label().to_string(),
            point.value.to_string(),
            point.color.to_string(),
        ]
    }));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Teams")?;
        write_rows(sheet, &teams_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Wins")?;
        write_rows(sheet, &wins_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Titles")?;
        write_rows(sheet, &titles_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("MatchesVsWins")?;
        write_rows(sheet, &line_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
