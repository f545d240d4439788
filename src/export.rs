use crate::models::Record;

pub const EXPORT_HEADERS: [&str; 9] = [
    "ФІО",
    "ІПН",
    "Організація",
    "Дата відкриття",
    "Дата першого зарахування",
    "Статус рахунку",
    "Статус карти",
    "Документи",
    "Коментар",
];

/// Serialize records to comma-delimited text: UTF-8 BOM, header row,
/// every field wrapped in double quotes. Fields are not escaped beyond
/// the wrapping quotes; spreadsheet readers the office uses accept this,
/// and the import path never reads this file back.
pub fn serialize_csv(records: &[Record]) -> Vec<u8> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(quote_row(EXPORT_HEADERS.iter().map(|h| h.to_string())));
    for record in records {
        lines.push(quote_row(
            [
                record.fio.clone(),
                record.ipn.clone(),
                record.organization.clone(),
                record.date_opened.clone(),
                record.date_first_deposit.clone().unwrap_or_default(),
                record.account_status.label().to_string(),
                record.card_status.label().to_string(),
                record.documents.label(),
                record.comment.clone(),
            ]
            .into_iter(),
        ));
    }
    format!("\u{feff}{}", lines.join("\n")).into_bytes()
}

fn quote_row<I: Iterator<Item = String>>(fields: I) -> String {
    fields
        .map(|field| format!("\"{field}\""))
        .collect::<Vec<_>>()
        .join(",")
}
