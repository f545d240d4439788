use comfy_table::{Cell, Table};
use zeroize::Zeroizing;

use crate::db::get_connection;
use crate::error::{Result, ZvitError};
use crate::session::{self, Role};
use crate::settings::db_path;

pub fn add(email: &str, role: Option<&str>, password: Option<String>) -> Result<()> {
    let path = db_path();
    if !path.exists() {
        return Err(ZvitError::Other(
            "База даних не створена. Виконайте: zvit init".to_string(),
        ));
    }
    let conn = get_connection(&path)?;

    // The first user bootstraps the system and is always an administrator;
    // afterwards only a signed-in administrator may add users.
    let bootstrap = session::user_count(&conn)? == 0;
    let role = if bootstrap {
        Role::Administrator
    } else {
        session::require_admin()?;
        match role {
            Some(label) => Role::parse(label)
                .ok_or_else(|| ZvitError::Other(format!("Невідома роль: '{label}'")))?,
            None => Role::Manager,
        }
    };

    let password = Zeroizing::new(match password {
        Some(p) => p,
        None => {
            let first = Zeroizing::new(rpassword::prompt_password("Пароль: ")?);
            let second = Zeroizing::new(rpassword::prompt_password("Підтвердіть пароль: ")?);
            if *first != *second {
                return Err(ZvitError::Auth("Паролі не співпадають".to_string()));
            }
            first.to_string()
        }
    });

    session::add_user(&conn, email, &password, role)?;
    println!("Користувача додано: {email} ({})", role.label());
    if bootstrap {
        println!("Першого користувача призначено адміністратором");
    }
    Ok(())
}

pub fn list() -> Result<()> {
    session::require_admin()?;
    let conn = get_connection(&db_path())?;
    let users = session::list_users(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Email", "Роль"]);
    for user in &users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.email),
            Cell::new(user.role.label()),
        ]);
    }
    println!("Користувачі\n{table}");
    Ok(())
}
