use rusqlite::Connection;

use crate::error::{Result, ZvitError};
use crate::models::{AccountStatus, CardStatus, Documents, NewRecord, Record};

/// Filter surface of the record store: equality on id and organization,
/// an opened-date range, and an "activated only" switch. Everything is
/// optional; the empty filter selects the whole table.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub id: Option<i64>,
    pub organization: Option<String>,
    pub opened_between: Option<(String, String)>,
    pub deposit_present: bool,
}

impl RecordFilter {
    pub fn by_id(id: i64) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    pub fn opened_in_year(year: i32) -> Self {
        Self {
            opened_between: Some((format!("{year}-01-01"), format!("{year}-12-31"))),
            ..Self::default()
        }
    }

    pub fn activated() -> Self {
        Self { deposit_present: true, ..Self::default() }
    }
}

const SELECT_COLUMNS: &str = "id, fio, ipn, organization, date_opened, date_first_deposit, \
                              account_status, card_status, contract, passport, questionnaire, comment";

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    let date_first_deposit: Option<String> = row.get(5)?;
    let status_label: String = row.get(6)?;
    let card_label: String = row.get(7)?;
    Ok(Record {
        id: row.get(0)?,
        fio: row.get(1)?,
        ipn: row.get(2)?,
        organization: row.get(3)?,
        date_opened: row.get(4)?,
        // Rows written before the status rule was unified may carry
        // arbitrary text; fall back to re-deriving from the deposit date.
        account_status: AccountStatus::parse(&status_label)
            .unwrap_or_else(|| AccountStatus::derive(date_first_deposit.as_deref())),
        card_status: CardStatus::parse(&card_label).unwrap_or_default(),
        documents: Documents {
            contract: row.get::<_, i64>(8)? != 0,
            passport: row.get::<_, i64>(9)? != 0,
            questionnaire: row.get::<_, i64>(10)? != 0,
        },
        comment: row.get(11)?,
        date_first_deposit,
    })
}

/// Select records, newest first.
pub fn select(conn: &Connection, filter: &RecordFilter) -> Result<Vec<Record>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(id) = filter.id {
        params.push(id.to_string());
        clauses.push(format!("id = ?{}", params.len()));
    }
    if let Some(org) = &filter.organization {
        params.push(org.clone());
        clauses.push(format!("organization = ?{}", params.len()));
    }
    if let Some((from, to)) = &filter.opened_between {
        params.push(from.clone());
        params.push(to.clone());
        clauses.push(format!("date_opened BETWEEN ?{} AND ?{}", params.len() - 1, params.len()));
    }
    if filter.deposit_present {
        clauses.push("date_first_deposit IS NOT NULL".to_string());
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql = format!("SELECT {SELECT_COLUMNS} FROM records{where_clause} ORDER BY id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let param_values: Vec<&dyn rusqlite::types::ToSql> = params
        .iter()
        .map(|p| p as &dyn rusqlite::types::ToSql)
        .collect();
    let rows: Vec<Record> = stmt
        .query_map(param_values.as_slice(), row_to_record)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get(conn: &Connection, id: i64) -> Result<Record> {
    select(conn, &RecordFilter::by_id(id))?
        .into_iter()
        .next()
        .ok_or(ZvitError::UnknownRecord(id))
}

/// Insert one record; the account status is derived from the deposit date.
pub fn insert(conn: &Connection, draft: &NewRecord) -> Result<Record> {
    conn.execute(
        "INSERT INTO records (fio, ipn, organization, date_opened, date_first_deposit, \
         account_status, card_status, contract, passport, questionnaire, comment) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            draft.fio,
            draft.ipn,
            draft.organization,
            draft.date_opened,
            draft.date_first_deposit,
            draft.account_status().label(),
            draft.card_status.label(),
            draft.documents.contract as i64,
            draft.documents.passport as i64,
            draft.documents.questionnaire as i64,
            draft.comment,
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

/// Replace every mutable field of an existing record and re-derive its
/// account status. Last write wins; there is no concurrency check.
pub fn update(conn: &Connection, id: i64, draft: &NewRecord) -> Result<Record> {
    let affected = conn.execute(
        "UPDATE records SET fio = ?1, ipn = ?2, organization = ?3, date_opened = ?4, \
         date_first_deposit = ?5, account_status = ?6, card_status = ?7, \
         contract = ?8, passport = ?9, questionnaire = ?10, comment = ?11 WHERE id = ?12",
        rusqlite::params![
            draft.fio,
            draft.ipn,
            draft.organization,
            draft.date_opened,
            draft.date_first_deposit,
            draft.account_status().label(),
            draft.card_status.label(),
            draft.documents.contract as i64,
            draft.documents.passport as i64,
            draft.documents.questionnaire as i64,
            draft.comment,
            id,
        ],
    )?;
    if affected == 0 {
        return Err(ZvitError::UnknownRecord(id));
    }
    get(conn, id)
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(ZvitError::UnknownRecord(id));
    }
    Ok(())
}
