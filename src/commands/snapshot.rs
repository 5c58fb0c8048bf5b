use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::info;

use price_table::{
    config::Config,
    pricing::{
        models::{format_money, COLUMN_TITLES},
        sort_rows, transform_zones, DisplayRow, Parameters, SortState,
    },
    refresh::{HttpZoneSource, ZoneSource},
};

/// Execute the snapshot command
///
/// Fetches once, derives the rows and prints them. Unlike the dashboard there
/// is no next tick, so a fetch failure is returned as an error.
pub async fn execute(
    cfg: &Config,
    params: &Parameters,
    sort: Option<SortState>,
    json: bool,
) -> Result<()> {
    let source = HttpZoneSource::from_config(&cfg.source)?;
    info!("Fetching zones from {}", source.url());

    let zones = source.fetch_zones().await?;
    let mut rows = transform_zones(&zones, params);
    if let Some(sort) = sort {
        sort_rows(&mut rows, sort);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", build_table(&rows, &cfg.display.currency_symbol));
        let (daily, monthly) = rows.iter().fold((0.0, 0.0), |(d, m), row| {
            (d + row.total_cost, m + row.total_monthly_cost)
        });
        println!(
            "{} zones | Sum Total: {} | Sum Monthly: {}",
            rows.len(),
            format_money(&cfg.display.currency_symbol, daily),
            format_money(&cfg.display.currency_symbol, monthly)
        );
    }

    Ok(())
}

fn build_table(rows: &[DisplayRow], currency: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(COLUMN_TITLES.iter().map(|title| Cell::new(title).fg(Color::Cyan)));

    for row in rows {
        let cells = row.cells(currency);
        table.add_row(cells.into_iter().enumerate().map(|(idx, text)| {
            // money columns right-aligned
            if idx >= 2 {
                Cell::new(text).set_alignment(CellAlignment::Right)
            } else {
                Cell::new(text)
            }
        }));
    }

    table
}
