use std::path::PathBuf;

use colored::Colorize;

use crate::db::get_connection;
use crate::error::Result;
use crate::importer::import_workbook;
use crate::session::require_session;
use crate::settings::db_path;

pub fn run(file: &str) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let result = import_workbook(&conn, &PathBuf::from(file))?;

    println!("Результати імпорту:");
    println!("Всього записів: {}", result.total);
    println!("{} {}", "Успішно імпортовано:".green(), result.success);
    println!("{} {}", "Помилок:".red(), result.errors.len());
    for error in &result.errors {
        eprintln!("  {}", error.red());
    }
    Ok(())
}
