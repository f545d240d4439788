use chrono::Datelike;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::reports::{self, MonthlyReport, MONTH_NAMES};
use crate::session::require_session;
use crate::settings::db_path;
use crate::store::{self, RecordFilter};

fn monthly_table(report: &MonthlyReport) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Організація".to_string()];
    header.extend(MONTH_NAMES.iter().map(|m| m.to_string()));
    header.push("Разом".to_string());
    table.set_header(header);

    for (row, total) in report.rows.iter().zip(&report.org_totals) {
        let mut cells = vec![Cell::new(&row.organization)];
        cells.extend(row.months.iter().map(Cell::new));
        cells.push(Cell::new(total.to_string().bold()));
        table.add_row(cells);
    }

    let mut totals = vec![Cell::new("Разом".bold())];
    totals.extend(
        report
            .month_totals
            .iter()
            .map(|t| Cell::new(t.to_string().bold())),
    );
    totals.push(Cell::new(report.grand_total.to_string().bold()));
    table.add_row(totals);
    table
}

pub fn opened(year: Option<i32>) -> Result<()> {
    require_session()?;
    let year = year.unwrap_or_else(|| chrono::Local::now().year());
    let conn = get_connection(&db_path())?;
    let records = store::select(&conn, &RecordFilter::opened_in_year(year))?;
    let report = reports::build_monthly_report(&records, year);

    println!("Звіт по відкриттю рахунків за {year} рік");
    println!("{}", monthly_table(&report));
    Ok(())
}

pub fn activated() -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let records = store::select(&conn, &RecordFilter::activated())?;
    let report = reports::build_activation_report(&records);

    println!("Активовані рахунки по організаціях");
    println!("{}", monthly_table(&report));
    Ok(())
}

pub fn status() -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let records = store::select(&conn, &RecordFilter::default())?;
    let summary = reports::build_status_summary(&records);

    let mut table = Table::new();
    table.set_header(vec!["Назва організації", "Активні", "Очікує активацію"]);
    for row in &summary.rows {
        table.add_row(vec![
            Cell::new(&row.organization),
            Cell::new(row.active),
            Cell::new(row.pending),
        ]);
    }
    println!("Підсумок по організаціях\n{table}");
    Ok(())
}
