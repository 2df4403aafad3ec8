use crate::currency::{Amount, PREFIX, format_currency, parse_whole};
use crate::error::LoadError;
use crate::notice::Notice;
use crate::record::{AlumniRecord, COLUMNS, RecordSet};
use lazy_static::lazy_static;
use log::{error, info, warn};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref CENTS_SUFFIX: Regex = Regex::new(r",\d{1,2}\s*$").unwrap();
}

/// Warning shown when the source file does not exist.
pub const SAMPLE_WARNING: &str = "File Excel tidak ditemukan. Menggunakan data contoh.";

/// Records produced by [`load_data`] plus the message to show with them.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: RecordSet,
    pub notice: Option<Notice>,
}

/// Load the alumni records from `path`.
///
/// A missing file is not an error: the embedded sample set is returned with a
/// warning. Any read or parse failure yields an empty record set and an error
/// notice, never a partial load.
///
/// # Examples
/// ```no_run
/// use alumni::loader::load_data;
///
/// let outcome = load_data("alumni_data (1).xlsx", "Data ");
/// println!("{} records", outcome.records.len());
/// ```
pub fn load_data(path: impl AsRef<Path>, sheet_name: &str) -> LoadOutcome {
    let path = path.as_ref();

    if !path.exists() {
        warn!("{} not found, using sample data", path.display());
        return LoadOutcome {
            records: sample_records(),
            notice: Some(Notice::warning(SAMPLE_WARNING)),
        };
    }

    match read_records(path, sheet_name) {
        Ok(records) => {
            info!("loaded {} records from {}", records.len(), path.display());
            LoadOutcome {
                records,
                notice: None,
            }
        }
        Err(e) => {
            error!("failed to load {}: {}", path.display(), e);
            LoadOutcome {
                records: RecordSet::default(),
                notice: Some(Notice::error(format!("Error loading data: {}", e))),
            }
        }
    }
}

/// Memoised [`load_data`] results, keyed by path and sheet name.
#[derive(Debug, Default)]
pub struct DataCache {
    entries: HashMap<(PathBuf, String), LoadOutcome>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path, sheet_name: &str) -> &LoadOutcome {
        self.entries
            .entry((path.to_path_buf(), sheet_name.to_string()))
            .or_insert_with(|| load_data(path, sheet_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and normalise every record of the source, choosing the format by
/// file extension.
pub fn read_records(path: &Path, sheet_name: &str) -> Result<RecordSet, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let table = match extension.as_deref() {
        Some("csv") => from_csv(path)?,
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => from_excel(path, sheet_name)?,
        Some(ext) => return Err(LoadError::UnsupportedFormat(ext.to_string())),
        None => return Err(LoadError::UnsupportedFormat(String::new())),
    };

    records_from_table(&table)
}

/// The three embedded records used when no source file exists.
pub fn sample_records() -> RecordSet {
    let rows = [
        (
            "Sari Gita Fitri",
            "1606829390",
            "Implementasi Algoritma Kernel K-Means based Co-clustering untuk Memprediksi Penyakit Kanker Paru-paru",
            "Data Analyst",
            "KI202001",
            "Kimbo",
            "Ruko Harco Mangga Dua, Jakarta",
            8000000,
        ),
        (
            "Natasha Rosaline",
            "1606889793",
            "Fuzzy C-Means Clustering dengan Reduksi Dimensi Deep Autoencoders untuk Pendeteksian Topik pada Data Tekstual Twitter",
            "Senior Analyst Specialist System Infrastructure",
            "BC202049",
            "PT Bank Central Asia Tbk",
            "Menara BCA lantai LG. Jl. MH. Thamrin no. 1 Jakarta Pusat 10310",
            15000000,
        ),
        (
            "Fadel Muhammad",
            "1606824540",
            "Prediksi Insiden DBD di DKI Jakarta Menggunakan Radial Basis Function Neural Network",
            "Data Platform Engineer",
            "BR202070",
            "PT Bank Raya Indonesia",
            "Jl. Jenderal Sudirman Kav.44-46, Jakarta 10210",
            12000000,
        ),
    ];

    let records = rows
        .into_iter()
        .enumerate()
        .map(
            |(i, (name, npm, thesis, job, employee_id, company, address, salary))| AlumniRecord {
                number: i + 1,
                name: name.to_string(),
                student_id: npm.to_string(),
                program: "Matematika".to_string(),
                cohort: "2016".to_string(),
                specialization: "Matematika Komputasi".to_string(),
                thesis_title: thesis.to_string(),
                graduation_year: "2020".to_string(),
                job_title: job.to_string(),
                employee_id: employee_id.to_string(),
                company_name: company.to_string(),
                company_address: address.to_string(),
                average_salary: format_currency(&Amount::Int(salary)),
            },
        )
        .collect();

    RecordSet::new(records)
}

/// Strip `Rp`, an Indonesian cents suffix and grouping punctuation from a
/// pre-formatted salary (`Rp8.000.000,00` -> `8000000`).
pub fn strip_currency(value: &str) -> String {
    let without_prefix = value.replace(PREFIX, "");
    let without_cents = CENTS_SUFFIX.replace(&without_prefix, "");
    without_cents.replace(&['.', ','][..], "")
}

#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawCell {
    fn to_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Int(i) => i.to_string(),
            // IDs and years often arrive as floats; keep them integral.
            RawCell::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", *f as i64)
            }
            RawCell::Float(f) => f.to_string(),
            RawCell::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        }
    }

    fn to_amount(&self) -> Amount {
        match self {
            RawCell::Empty => Amount::Missing,
            RawCell::Text(s) => Amount::Text(s.clone()),
            RawCell::Int(i) => Amount::from(*i),
            RawCell::Float(f) => Amount::Float(*f),
            RawCell::Bool(b) => Amount::Int(i128::from(*b)),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
}

/// Header position of each entry of [`COLUMNS`].
struct ColumnIndex([Option<usize>; 13]);

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let mut positions = [None; 13];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers.iter().position(|h| h.trim() == column);
            if slot.is_none() && column != "No" {
                return Err(LoadError::MissingColumn(column));
            }
        }
        Ok(ColumnIndex(positions))
    }

    fn cell<'a>(&self, row: &'a [RawCell], column: usize) -> &'a RawCell {
        const EMPTY: &RawCell = &RawCell::Empty;
        self.0[column].and_then(|i| row.get(i)).unwrap_or(EMPTY)
    }

    fn text(&self, row: &[RawCell], column: usize) -> String {
        self.cell(row, column).to_text()
    }
}

fn records_from_table(table: &Table) -> Result<RecordSet, LoadError> {
    let columns = ColumnIndex::resolve(&table.headers)?;
    let mut records = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        // Header is sheet row 1.
        let sheet_row = i + 2;

        let number = match columns.cell(row, 0) {
            RawCell::Int(n) if *n > 0 => *n as usize,
            RawCell::Float(f) if *f >= 1.0 => *f as usize,
            RawCell::Text(s) => s.trim().parse().unwrap_or(records.len() + 1),
            _ => records.len() + 1,
        };

        records.push(AlumniRecord {
            number,
            name: columns.text(row, 1),
            student_id: columns.text(row, 2),
            program: columns.text(row, 3),
            cohort: columns.text(row, 4),
            specialization: columns.text(row, 5),
            thesis_title: columns.text(row, 6),
            graduation_year: columns.text(row, 7),
            job_title: columns.text(row, 8),
            employee_id: columns.text(row, 9),
            company_name: columns.text(row, 10),
            company_address: columns.text(row, 11),
            average_salary: normalize_salary(columns.cell(row, 12), sheet_row)?,
        });
    }

    Ok(RecordSet::new(records))
}

fn normalize_salary(cell: &RawCell, sheet_row: usize) -> Result<String, LoadError> {
    match cell {
        RawCell::Text(s) if s.starts_with(PREFIX) => {
            let value = parse_whole(strip_currency(s).trim()).ok_or_else(|| LoadError::Salary {
                row: sheet_row,
                value: s.clone(),
            })?;
            Ok(format_currency(&Amount::Int(value)))
        }
        other => Ok(format_currency(&other.to_amount())),
    }
}

/// Read a CSV file into a table. Every cell is text.
fn from_csv(path: &Path) -> Result<Table, LoadError> {
    let content = fs::read_to_string(path)?;
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = parse_csv(content)?.into_iter();

    let headers = lines.next().ok_or(LoadError::Empty)?;
    let rows = lines
        .map(|fields| {
            fields
                .into_iter()
                .map(|f| {
                    if f.is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(f)
                    }
                })
                .collect()
        })
        .collect();

    Ok(Table { headers, rows })
}

/// Read the named sheet of a workbook into a table.
fn from_excel(path: &Path, sheet_name: &str) -> Result<Table, LoadError> {
    use calamine::{Data, Reader, open_workbook_auto};

    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(LoadError::SheetNotFound(sheet_name.to_string()));
    }
    let range = workbook.worksheet_range(sheet_name)?;

    let convert = |cell: &Data| match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        other => RawCell::Text(other.to_string()),
    };

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or(LoadError::Empty)?
        .iter()
        .map(|cell| convert(cell).to_text())
        .collect();
    let rows = rows.map(|row| row.iter().map(convert).collect()).collect();

    Ok(Table { headers, rows })
}

// Split CSV content into records, honouring quoted fields that contain
// commas, doubled quotes or newlines. A quote only opens a quoted field at the
// start of a field; elsewhere it is a literal character. A quoted field still
// open at the end of the input is an error naming the row it started on.
fn parse_csv(content: &str) -> Result<Vec<Vec<String>>, LoadError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_row = 0;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_row = records.len() + 1;
            }
            ',' if !in_quotes => record.push(std::mem::take(&mut field)),
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::Csv { row: quote_row });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_csv_fields() {
        let rows = parse_csv("a,\"b, c\",\"say \"\"hi\"\"\"\r\n1,\"two\nlines\",3\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["a", "b, c", "say \"hi\""]);
        assert_eq!(rows[1], ["1", "two\nlines", "3"]);
    }

    #[test]
    fn parses_last_line_without_newline() {
        let rows = parse_csv("x,y\n1,").unwrap();
        assert_eq!(rows[1], ["1", ""]);
    }

    #[test]
    fn inner_quote_is_literal() {
        let rows = parse_csv("a,b\nAnalyst 5\" screen,x\nc,d\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], ["Analyst 5\" screen", "x"]);
        assert_eq!(rows[2], ["c", "d"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        match parse_csv("a,b\n1,2\n3,\"open\n4,5\n") {
            Err(LoadError::Csv { row }) => assert_eq!(row, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn strips_formatted_salary() {
        assert_eq!(strip_currency("Rp8.000.000,00"), "8000000");
        assert_eq!(strip_currency("Rp 12.500.000"), " 12500000");
        assert_eq!(strip_currency("Rp1,5"), "1");
    }

    #[test]
    fn float_ids_keep_precision() {
        assert_eq!(RawCell::Float(1606829390.0).to_text(), "1606829390");
        assert_eq!(RawCell::Float(2016.0).to_text(), "2016");
        assert_eq!(RawCell::Float(1.5).to_text(), "1.5");
    }

    #[test]
    fn sample_set_is_preformatted() {
        let sample = sample_records();
        assert_eq!(sample.len(), 3);
        let salaries: Vec<_> = sample.iter().map(|r| r.average_salary.as_str()).collect();
        assert_eq!(salaries, ["Rp8.000.000,00", "Rp15.000.000,00", "Rp12.000.000,00"]);
    }

    #[test]
    fn missing_column_is_reported() {
        let table = Table {
            headers: vec!["Nama".to_string()],
            rows: Vec::new(),
        };
        match records_from_table(&table) {
            Err(LoadError::MissingColumn(column)) => assert_eq!(column, "NPM"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_preformatted_salary_fails_the_load() {
        let mut headers: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.swap(0, 12);
        let mut row = vec![RawCell::Empty; 13];
        row[0] = RawCell::Text("Rp??".to_string());
        row[1] = RawCell::Text("Budi".to_string());
        let table = Table {
            headers,
            rows: vec![row],
        };
        match records_from_table(&table) {
            Err(LoadError::Salary { row, .. }) => assert_eq!(row, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
