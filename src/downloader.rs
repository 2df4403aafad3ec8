use crate::record::{AlumniRecord, COLUMNS};

/// Convert records to CSV
///
/// Writes a header row with the sheet's column names followed by one row per
/// record, all thirteen columns. Fields containing commas, quotes or newlines
/// are quoted with inner quotes doubled.
///
/// # Examples
/// ```
/// use alumni::downloader::to_csv;
/// use alumni::loader::sample_records;
///
/// let records = sample_records();
/// let rows: Vec<_> = records.iter().collect();
/// let csv = to_csv(&rows);
/// assert!(csv.starts_with("No,Nama,NPM"));
/// ```
pub fn to_csv(records: &[&AlumniRecord]) -> String {
    let mut csv_content = String::new();

    push_row(&mut csv_content, COLUMNS.iter().copied());
    for record in records {
        let values = record.values();
        push_row(&mut csv_content, values.iter().map(String::as_str));
    }

    csv_content
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, value) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if value.contains(&[',', '"', '\n', '\r'][..]) {
            let escaped = value.replace('"', "\"\"");
            out.push_str(&format!("\"{}\"", escaped));
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

/// Convert records to XLSX
///
/// Produces a single-sheet workbook named `Data` with the same layout as
/// [`to_csv`]. Every cell is written as text so IDs and years keep their form.
#[cfg(feature = "web")]
pub fn to_xlsx(records: &[&AlumniRecord]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Data")?;

    for (c, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, c as u16, *header)?;
    }
    for (r, record) in records.iter().enumerate() {
        for (c, value) in record.values().iter().enumerate() {
            worksheet.write_string((r + 1) as u32, c as u16, value)?;
        }
    }

    workbook.push_worksheet(worksheet);
    workbook.save_to_buffer()
}
