use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings {
            data_dir: shellexpand_path(&dir),
        },
        None => Settings::default(),
    };

    std::fs::create_dir_all(&settings.data_dir)?;
    save_settings(&settings)?;

    let conn = get_connection(&std::path::Path::new(&settings.data_dir).join("zvit.db"))?;
    init_db(&conn)?;

    println!("Базу даних створено: {}/zvit.db", settings.data_dir);
    println!("Додайте першого користувача: zvit users add <email>");
    Ok(())
}
