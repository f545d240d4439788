use std::path::Path;

use calamine::{Data, Reader};
use rusqlite::Connection;

use crate::error::Result;
use crate::models::{CardStatus, Documents, ImportResult, NewRecord};
use crate::normalize::{cell_text, normalize_date_cell, normalize_yes_no_cell};
use crate::store;

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

/// Import columns are recognized by exact header text: the Ukrainian
/// uppercase label or the English lowercase key, first match wins.
/// Unknown columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Fio,
    Ipn,
    Organization,
    DateOpened,
    DateFirstDeposit,
    CardStatus,
    Contract,
    Passport,
    Questionnaire,
    Comment,
}

const HEADER_ALIASES: &[(Column, &str, &str)] = &[
    (Column::Fio, "ФІО", "fio"),
    (Column::Ipn, "ІПН", "ipn"),
    (Column::Organization, "ОРГАНІЗАЦІЯ", "organization"),
    (Column::DateOpened, "ДАТА ВІДКРИТТЯ", "date_opened"),
    (Column::DateFirstDeposit, "ДАТА ПЕРШОГО ЗАРАХУВАННЯ", "date_first_deposit"),
    (Column::CardStatus, "СТАТУС КАРТИ", "card_status"),
    (Column::Contract, "ДОГОВІР", "contract"),
    (Column::Passport, "ПАСПОРТ", "passport"),
    (Column::Questionnaire, "ОПИТУВАЛЬНИК", "questionnaire"),
    (Column::Comment, "КОМЕНТАР", "comment"),
];

fn header_column(label: &str) -> Option<Column> {
    let label = label.trim();
    HEADER_ALIASES
        .iter()
        .find(|(_, uk, en)| label == *uk || label == *en)
        .map(|(col, _, _)| *col)
}

#[derive(Debug, Default)]
struct ColumnMap {
    fio: Option<usize>,
    ipn: Option<usize>,
    organization: Option<usize>,
    date_opened: Option<usize>,
    date_first_deposit: Option<usize>,
    card_status: Option<usize>,
    contract: Option<usize>,
    passport: Option<usize>,
    questionnaire: Option<usize>,
    comment: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> Self {
        let mut map = Self::default();
        for (idx, cell) in header.iter().enumerate() {
            let Data::String(label) = cell else { continue };
            let Some(column) = header_column(label) else { continue };
            let slot = match column {
                Column::Fio => &mut map.fio,
                Column::Ipn => &mut map.ipn,
                Column::Organization => &mut map.organization,
                Column::DateOpened => &mut map.date_opened,
                Column::DateFirstDeposit => &mut map.date_first_deposit,
                Column::CardStatus => &mut map.card_status,
                Column::Contract => &mut map.contract,
                Column::Passport => &mut map.passport,
                Column::Questionnaire => &mut map.questionnaire,
                Column::Comment => &mut map.comment,
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
        map
    }
}

static EMPTY_CELL: Data = Data::Empty;

fn cell<'a>(row: &'a [Data], idx: Option<usize>) -> &'a Data {
    idx.and_then(|i| row.get(i)).unwrap_or(&EMPTY_CELL)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn row_to_draft(row: &[Data], columns: &ColumnMap) -> NewRecord {
    let deposit = normalize_date_cell(cell(row, columns.date_first_deposit));
    NewRecord {
        fio: cell_text(cell(row, columns.fio)),
        ipn: cell_text(cell(row, columns.ipn)),
        organization: cell_text(cell(row, columns.organization)),
        date_opened: normalize_date_cell(cell(row, columns.date_opened)),
        date_first_deposit: if deposit.is_empty() { None } else { Some(deposit) },
        card_status: CardStatus::parse(&cell_text(cell(row, columns.card_status))).unwrap_or_default(),
        documents: Documents {
            contract: normalize_yes_no_cell(cell(row, columns.contract)),
            passport: normalize_yes_no_cell(cell(row, columns.passport)),
            questionnaire: normalize_yes_no_cell(cell(row, columns.questionnaire)),
        },
        comment: cell_text(cell(row, columns.comment)),
    }
}

fn unreadable_file_result() -> ImportResult {
    ImportResult {
        total: 0,
        success: 0,
        errors: vec!["Помилка читання файлу Excel".to_string()],
    }
}

// ---------------------------------------------------------------------------
// import_workbook
// ---------------------------------------------------------------------------

/// Read the first sheet of a workbook and insert one record per valid row.
/// Rows fail independently: a validation or store error is recorded under
/// its 1-based row number and processing continues with the next row. An
/// unreadable file collapses to a single synthetic error result.
pub fn import_workbook(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let Ok(mut workbook) = calamine::open_workbook_auto(path) else {
        return Ok(unreadable_file_result());
    };
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(unreadable_file_result());
    };
    let Ok(range) = workbook.worksheet_range(&sheet_name) else {
        return Ok(unreadable_file_result());
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(ImportResult::default());
    };
    let columns = ColumnMap::from_header(header);

    let mut result = ImportResult::default();
    for row in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        result.total += 1;
        let index = result.total;

        let draft = row_to_draft(row, &columns);
        if draft.fio.is_empty()
            || draft.ipn.is_empty()
            || draft.organization.is_empty()
            || draft.date_opened.is_empty()
        {
            result.errors.push(format!(
                "Рядок {index}: Відсутні обов'язкові поля (ФІО, ІПН, ОРГАНІЗАЦІЯ, ДАТА ВІДКРИТТЯ)"
            ));
            continue;
        }

        match store::insert(conn, &draft) {
            Ok(_) => result.success += 1,
            Err(e) => result.errors.push(format!("Рядок {index}: {e}")),
        }
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Template workbook
// ---------------------------------------------------------------------------

const TEMPLATE_SHEET: &str = "Шаблон";

const TEMPLATE_COLUMNS: [&str; 10] = [
    "ФІО",
    "ІПН",
    "ОРГАНІЗАЦІЯ",
    "ДАТА ВІДКРИТТЯ",
    "ДАТА ПЕРШОГО ЗАРАХУВАННЯ",
    "СТАТУС КАРТИ",
    "ДОГОВІР",
    "ПАСПОРТ",
    "ОПИТУВАЛЬНИК",
    "КОМЕНТАР",
];

const TEMPLATE_ROW: [&str; 10] = [
    "Іванов Іван Іванович",
    "1234567890",
    "ТОВ \"ТЕСТ\"",
    "15.01.2024",
    "20.01.2024",
    "На випуску",
    "так",
    "так",
    "ні",
    "Приклад запису",
];

/// Write a one-row example workbook with the import column names.
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET)?;
    for (col, header) in TEMPLATE_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (col, value) in TEMPLATE_ROW.iter().enumerate() {
        worksheet.write_string(1, col as u16, *value)?;
    }
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::models::AccountStatus;
    use crate::store::RecordFilter;
    use std::path::PathBuf;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn write_sheet(dir: &Path, name: &str, headers: &[&str], rows: &[&[&str]]) -> PathBuf {
        let path = dir.join(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string((r + 1) as u32, col as u16, *value).unwrap();
                }
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    const UK_HEADERS: &[&str] = &[
        "ФІО", "ІПН", "ОРГАНІЗАЦІЯ", "ДАТА ВІДКРИТТЯ", "ДАТА ПЕРШОГО ЗАРАХУВАННЯ",
        "СТАТУС КАРТИ", "ДОГОВІР", "ПАСПОРТ", "ОПИТУВАЛЬНИК", "КОМЕНТАР",
    ];

    #[test]
    fn test_import_valid_rows() {
        let (dir, conn) = test_db();
        let path = write_sheet(dir.path(), "import.xlsx", UK_HEADERS, &[
            &["Іванов Іван", "1111111111", "ТОВ \"А\"", "15.01.2024", "20.01.2024", "Активована", "так", "так", "ні", "перший"],
            &["Петренко Петро", "2222222222", "ТОВ \"Б\"", "16.01.2024", "", "", "ні", "ні", "ні", ""],
        ]);
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.success, 2);
        assert!(result.errors.is_empty());

        let records = store::select(&conn, &RecordFilter::default()).unwrap();
        assert_eq!(records.len(), 2);
        // Newest first: Петренко was inserted last.
        assert_eq!(records[0].fio, "Петренко Петро");
        assert_eq!(records[0].account_status, AccountStatus::PendingActivation);
        assert_eq!(records[0].card_status, CardStatus::Issuing);
        assert_eq!(records[1].date_opened, "2024-01-15");
        assert_eq!(records[1].date_first_deposit.as_deref(), Some("2024-01-20"));
        assert_eq!(records[1].account_status, AccountStatus::Active);
        assert_eq!(records[1].card_status, CardStatus::Activated);
        assert!(records[1].documents.contract);
        assert!(records[1].documents.passport);
        assert!(!records[1].documents.questionnaire);
    }

    #[test]
    fn test_import_missing_required_field_continues() {
        let (dir, conn) = test_db();
        let path = write_sheet(dir.path(), "import.xlsx", UK_HEADERS, &[
            &["Іванов Іван", "1111111111", "ТОВ \"А\"", "15.01.2024", "", "", "", "", "", ""],
            &["Петренко Петро", "2222222222", "", "16.01.2024", "", "", "", "", "", ""],
            &["Сидоренко Семен", "3333333333", "ТОВ \"В\"", "17.01.2024", "", "", "", "", "", ""],
        ]);
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.success, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Рядок 2:"), "got: {}", result.errors[0]);

        let records = store::select(&conn, &RecordFilter::default()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_import_english_headers_and_unknown_columns() {
        let (dir, conn) = test_db();
        let path = write_sheet(
            dir.path(),
            "import.xlsx",
            &["fio", "ipn", "organization", "date_opened", "службова колонка"],
            &[&["Іванов Іван", "1111111111", "ТОВ \"А\"", "2024-01-15", "ігнорується"]],
        );
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.success, 1);
        let records = store::select(&conn, &RecordFilter::default()).unwrap();
        assert_eq!(records[0].date_opened, "2024-01-15");
        assert_eq!(records[0].comment, "");
    }

    #[test]
    fn test_import_store_error_is_row_scoped() {
        let (dir, conn) = test_db();
        // Same tax id and opening date twice: the second insert trips the
        // UNIQUE constraint but the third row still goes through.
        let path = write_sheet(dir.path(), "import.xlsx", UK_HEADERS, &[
            &["Іванов Іван", "1111111111", "ТОВ \"А\"", "15.01.2024", "", "", "", "", "", ""],
            &["Іванов Іван", "1111111111", "ТОВ \"А\"", "15.01.2024", "", "", "", "", "", ""],
            &["Петренко Петро", "2222222222", "ТОВ \"Б\"", "16.01.2024", "", "", "", "", "", ""],
        ]);
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.success, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Рядок 2:"), "got: {}", result.errors[0]);
    }

    #[test]
    fn test_import_excel_serial_dates() {
        let (dir, conn) = test_db();
        let path = dir.path().join("serial.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in ["ФІО", "ІПН", "ОРГАНІЗАЦІЯ", "ДАТА ВІДКРИТТЯ"].iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        worksheet.write_string(1, 0, "Іванов Іван").unwrap();
        worksheet.write_number(1, 1, 1234567890.0).unwrap();
        worksheet.write_string(1, 2, "ТОВ \"А\"").unwrap();
        worksheet.write_number(1, 3, 44211.0).unwrap();
        workbook.save(&path).unwrap();

        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.success, 1, "errors: {:?}", result.errors);
        let records = store::select(&conn, &RecordFilter::default()).unwrap();
        assert_eq!(records[0].date_opened, "2021-01-15");
        assert_eq!(records[0].ipn, "1234567890");
    }

    #[test]
    fn test_import_skips_blank_rows() {
        let (dir, conn) = test_db();
        let path = write_sheet(dir.path(), "import.xlsx", UK_HEADERS, &[
            &["Іванов Іван", "1111111111", "ТОВ \"А\"", "15.01.2024", "", "", "", "", "", ""],
            &["", "", "", "", "", "", "", "", "", ""],
            &["Петренко Петро", "2222222222", "ТОВ \"Б\"", "16.01.2024", "", "", "", "", "", ""],
        ]);
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.success, 2);
    }

    #[test]
    fn test_import_unreadable_file() {
        let (dir, conn) = test_db();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();
        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.success, 0);
        assert_eq!(result.errors, vec!["Помилка читання файлу Excel".to_string()]);
    }

    #[test]
    fn test_template_reimports_cleanly() {
        let (dir, conn) = test_db();
        let path = dir.path().join("shablon_import.xlsx");
        write_template(&path).unwrap();

        let result = import_workbook(&conn, &path).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.success, 1, "errors: {:?}", result.errors);

        let records = store::select(&conn, &RecordFilter::default()).unwrap();
        let record = &records[0];
        assert_eq!(record.fio, "Іванов Іван Іванович");
        assert_eq!(record.date_opened, "2024-01-15");
        assert_eq!(record.date_first_deposit.as_deref(), Some("2024-01-20"));
        assert_eq!(record.account_status, AccountStatus::Active);
        assert!(record.documents.contract);
        assert!(record.documents.passport);
        assert!(!record.documents.questionnaire);
        assert_eq!(record.comment, "Приклад запису");
    }
}
