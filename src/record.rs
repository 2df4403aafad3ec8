use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column headers of the source sheet, in export order.
pub const COLUMNS: [&str; 13] = [
    "No",
    "Nama",
    "NPM",
    "Program Studi",
    "Angkatan",
    "Peminatan",
    "Judul Skripsi",
    "Tahun Lulus",
    "Pekerjaan",
    "Id Karyawan",
    "Nama Perusahaan",
    "Alamat Perusahaan",
    "Rata-rata Gaji",
];

/// Columns shown in the search result table.
pub const TABLE_COLUMNS: [&str; 6] = [
    "Nama",
    "NPM",
    "Program Studi",
    "Pekerjaan",
    "Nama Perusahaan",
    "Rata-rata Gaji",
];

/// Study programme of the department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "Matematika")]
    Mathematics,
    #[serde(rename = "Statistika")]
    Statistics,
    #[serde(rename = "Ilmu Aktuaria")]
    ActuarialScience,
}

impl Program {
    pub const ALL: [Program; 3] = [
        Program::Mathematics,
        Program::Statistics,
        Program::ActuarialScience,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Program::Mathematics => "Matematika",
            Program::Statistics => "Statistika",
            Program::ActuarialScience => "Ilmu Aktuaria",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.label() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

/// Deserialize an optional programme where an empty string means "any".
pub fn deserialize_optional_program<'de, D>(deserializer: D) -> Result<Option<Program>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(|bad: String| {
            serde::de::Error::custom(format!("unknown program '{}'", bad))
        }),
    }
}

/// One alumnus. Every field is text; the salary is already formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniRecord {
    #[serde(rename = "No")]
    pub number: usize,
    #[serde(rename = "Nama")]
    pub name: String,
    #[serde(rename = "NPM")]
    pub student_id: String,
    #[serde(rename = "Program Studi")]
    pub program: String,
    #[serde(rename = "Angkatan")]
    pub cohort: String,
    #[serde(rename = "Peminatan")]
    pub specialization: String,
    #[serde(rename = "Judul Skripsi")]
    pub thesis_title: String,
    #[serde(rename = "Tahun Lulus")]
    pub graduation_year: String,
    #[serde(rename = "Pekerjaan")]
    pub job_title: String,
    #[serde(rename = "Id Karyawan")]
    pub employee_id: String,
    #[serde(rename = "Nama Perusahaan")]
    pub company_name: String,
    #[serde(rename = "Alamat Perusahaan")]
    pub company_address: String,
    #[serde(rename = "Rata-rata Gaji")]
    pub average_salary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// A titled group of fields for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

fn field(label: &'static str, value: &str) -> Field {
    Field {
        label,
        value: value.to_string(),
    }
}

impl AlumniRecord {
    /// Values in [`COLUMNS`] order.
    pub fn values(&self) -> [String; 13] {
        [
            self.number.to_string(),
            self.name.clone(),
            self.student_id.clone(),
            self.program.clone(),
            self.cohort.clone(),
            self.specialization.clone(),
            self.thesis_title.clone(),
            self.graduation_year.clone(),
            self.job_title.clone(),
            self.employee_id.clone(),
            self.company_name.clone(),
            self.company_address.clone(),
            self.average_salary.clone(),
        ]
    }

    /// Values in [`TABLE_COLUMNS`] order.
    pub fn table_row(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.student_id.as_str(),
            self.program.as_str(),
            self.job_title.as_str(),
            self.company_name.as_str(),
            self.average_salary.as_str(),
        ]
    }

    /// Identity, education and career groups.
    pub fn sections(&self) -> [Section; 3] {
        [
            Section {
                title: "Informasi Alumni",
                fields: vec![field("Nama", &self.name), field("NPM", &self.student_id)],
            },
            Section {
                title: "Riwayat Pendidikan",
                fields: vec![
                    field("Program Studi", &self.program),
                    field("Peminatan", &self.specialization),
                    field("Angkatan", &self.cohort),
                    field("Tahun Lulus", &self.graduation_year),
                    field("Judul Skripsi", &self.thesis_title),
                ],
            },
            Section {
                title: "Informasi Karir",
                fields: vec![
                    field("Pekerjaan", &self.job_title),
                    field("Perusahaan", &self.company_name),
                    field("ID Karyawan", &self.employee_id),
                    field("Alamat Perusahaan", &self.company_address),
                    field("Rata-rata Gaji", &self.average_salary),
                ],
            },
        ]
    }
}

/// The session's records in insertion order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<AlumniRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<AlumniRecord>) -> Self {
        RecordSet { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlumniRecord> {
        self.records.iter()
    }

    /// Sequential number the next appended record receives.
    pub fn next_number(&self) -> usize {
        self.records.len() + 1
    }

    /// Append at the end, overwriting `number` with [`next_number`](Self::next_number).
    pub fn append(&mut self, mut record: AlumniRecord) -> &AlumniRecord {
        record.number = self.next_number();
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a AlumniRecord;
    type IntoIter = std::slice::Iter<'a, AlumniRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(name: &str) -> AlumniRecord {
        AlumniRecord {
            name: name.to_string(),
            ..AlumniRecord::default()
        }
    }

    #[test]
    fn append_numbers_sequentially() {
        let mut set = RecordSet::default();
        set.append(blank("a"));
        let second = set.append(blank("b"));
        assert_eq!(second.number, 2);
        assert_eq!(set.next_number(), 3);
        let names: Vec<_> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn program_labels_round_trip() {
        for program in Program::ALL {
            assert_eq!(program.label().parse::<Program>(), Ok(program));
        }
        assert!("Fisika".parse::<Program>().is_err());
    }

    #[test]
    fn serializes_with_sheet_headers() {
        let json = serde_json::to_value(blank("Sari")).unwrap();
        assert_eq!(json["Nama"], "Sari");
        assert!(json.get("Rata-rata Gaji").is_some());
    }
}
