use std::io::Write;

use zeroize::Zeroizing;

use crate::db::get_connection;
use crate::error::{Result, ZvitError};
use crate::session;
use crate::settings::db_path;

fn open_db() -> Result<rusqlite::Connection> {
    let path = db_path();
    if !path.exists() {
        return Err(ZvitError::Other(
            "База даних не створена. Виконайте: zvit init".to_string(),
        ));
    }
    get_connection(&path)
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn login(email: Option<String>, password: Option<String>) -> Result<()> {
    let conn = open_db()?;

    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?,
    };
    let password = Zeroizing::new(match password {
        Some(p) => p,
        None => rpassword::prompt_password("Пароль: ")?,
    });

    let session = session::sign_in(&conn, &email, &password)?;
    session::save_session(&session)?;
    println!("Успішний вхід: {} ({})", session.email, session.role.label());
    Ok(())
}

pub fn logout() -> Result<()> {
    session::clear_session()?;
    println!("Сесію завершено");
    Ok(())
}
