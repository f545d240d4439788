use std::io::Write;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::{Result, ZvitError};
use crate::fmt::{display_date, display_date_opt};
use crate::models::{AccountStatus, CardStatus, Documents, NewRecord};
use crate::normalize::normalize_date_str;
use crate::session::require_session;
use crate::settings::db_path;
use crate::store::{self, RecordFilter};

/// Arguments shared by `records add` and `records edit`.
pub struct RecordArgs {
    pub fio: String,
    pub ipn: String,
    pub organization: String,
    pub date_opened: String,
    pub date_first_deposit: Option<String>,
    pub card_status: Option<String>,
    pub contract: bool,
    pub passport: bool,
    pub questionnaire: bool,
    pub comment: Option<String>,
}

fn parse_date_arg(raw: &str, field: &str) -> Result<String> {
    let normalized = normalize_date_str(raw);
    if normalized.is_empty() {
        return Err(ZvitError::Other(format!(
            "Невірний формат дати для {field}: '{raw}' (очікується ДД.ММ.РРРР або РРРР-ММ-ДД)"
        )));
    }
    Ok(normalized)
}

fn draft_from_args(args: RecordArgs) -> Result<NewRecord> {
    let date_opened = parse_date_arg(&args.date_opened, "дати відкриття")?;
    let date_first_deposit = match args.date_first_deposit.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            Some(parse_date_arg(raw, "дати першого зарахування")?)
        }
        _ => None,
    };
    let card_status = match args.card_status.as_deref() {
        Some(label) => CardStatus::parse(label).ok_or_else(|| {
            ZvitError::Other(format!("Невідомий статус карти: '{label}'"))
        })?,
        None => CardStatus::default(),
    };

    Ok(NewRecord {
        fio: args.fio,
        ipn: args.ipn,
        organization: args.organization,
        date_opened,
        date_first_deposit,
        card_status,
        documents: Documents {
            contract: args.contract,
            passport: args.passport,
            questionnaire: args.questionnaire,
        },
        comment: args.comment.unwrap_or_default(),
    })
}

pub fn add(args: RecordArgs) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let record = store::insert(&conn, &draft_from_args(args)?)?;
    println!(
        "Запис успішно додано: id {} ({})",
        record.id,
        record.account_status.label()
    );
    Ok(())
}

pub fn edit(id: i64, args: RecordArgs) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let record = store::update(&conn, id, &draft_from_args(args)?)?;
    println!(
        "Запис успішно оновлено: id {} ({})",
        record.id,
        record.account_status.label()
    );
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    // Surface the unknown-id error before asking for confirmation.
    let record = store::get(&conn, id)?;

    if !yes {
        print!(
            "Ви впевнені, що хочете видалити запис {} ({})? [y/N] ",
            record.id, record.fio
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "так") {
            println!("Видалення скасовано");
            return Ok(());
        }
    }

    store::delete(&conn, id)?;
    println!("Запис успішно видалено");
    Ok(())
}

fn status_cell(status: AccountStatus) -> Cell {
    let label = status.label();
    match status {
        AccountStatus::Active => Cell::new(label.green()),
        AccountStatus::PendingActivation => Cell::new(label.yellow()),
        AccountStatus::Blocked => Cell::new(label.red()),
        AccountStatus::Closed => Cell::new(label),
    }
}

pub fn list(organization: Option<String>) -> Result<()> {
    require_session()?;
    let conn = get_connection(&db_path())?;
    let filter = RecordFilter {
        organization,
        ..RecordFilter::default()
    };
    let records = store::select(&conn, &filter)?;

    if records.is_empty() {
        println!("Дані відсутні. Додайте перший запис.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "ФІО",
        "ІПН",
        "Організація",
        "Дата відкриття",
        "Дата першого зарахування",
        "Статус рахунку",
        "Статус карти",
        "Документи",
        "Коментар",
    ]);
    for record in &records {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.fio),
            Cell::new(&record.ipn),
            Cell::new(&record.organization),
            Cell::new(display_date(&record.date_opened)),
            Cell::new(display_date_opt(record.date_first_deposit.as_deref())),
            status_cell(record.account_status),
            Cell::new(record.card_status.label()),
            Cell::new(record.documents.label()),
            Cell::new(&record.comment),
        ]);
    }
    println!("Звітна таблиця\n{table}");
    Ok(())
}
