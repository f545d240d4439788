use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZvitError {
    #[error("Помилка бази даних: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Помилка вводу-виводу: {0}")]
    Io(#[from] std::io::Error),

    #[error("Помилка запису файлу Excel: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Запис не знайдено: id {0}")]
    UnknownRecord(i64),

    #[error("Користувача не знайдено: {0}")]
    UnknownUser(String),

    #[error("{0}")]
    Auth(String),

    #[error("Помилка налаштувань: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ZvitError>;
