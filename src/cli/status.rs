use colored::Colorize;

use crate::db::get_connection;
use crate::error::Result;
use crate::session;
use crate::settings::{db_path, get_data_dir};

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    println!("Каталог даних: {}", data_dir.display());

    let path = db_path();
    if !path.exists() {
        println!("{}", "База даних не створена. Виконайте: zvit init".yellow());
        return Ok(());
    }

    let conn = get_connection(&path)?;
    let records: i64 = conn.query_row("SELECT count(*) FROM records", [], |r| r.get(0))?;
    let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
    println!("Записів: {records}");
    println!("Користувачів: {users}");

    match session::current_session() {
        Some(s) => println!(
            "{} {} ({})",
            "Поточний користувач:".green(),
            s.email,
            s.role.label()
        ),
        None => println!("{}", "Вхід не виконано".yellow()),
    }
    Ok(())
}
