use std::path::PathBuf;

use crate::db::get_connection;
use crate::error::Result;
use crate::export::serialize_csv;
use crate::importer::write_template;
use crate::session::require_session;
use crate::settings::{db_path, get_data_dir};
use crate::store::{self, RecordFilter};

fn default_csv_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("zvit_{date}.csv"))
}

pub fn run(output: Option<String>) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let records = store::select(&conn, &RecordFilter::default())?;

    if records.is_empty() {
        println!("Немає даних для експорту");
        return Ok(());
    }

    let path = output.map(PathBuf::from).unwrap_or_else(default_csv_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serialize_csv(&records))?;
    println!("Експортовано {} записів у {}", records.len(), path.display());
    Ok(())
}

pub fn template(output: Option<String>) -> Result<()> {
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("shablon_import.xlsx"));
    write_template(&path)?;
    println!("Шаблон записано: {}", path.display());
    Ok(())
}
