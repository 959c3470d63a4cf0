//! FILENAME: core/engine/src/ledger.rs
//! PURPOSE: Static ledger reference table (name -> accounting code).
//! CONTEXT: Read-only for the lifetime of the process. Selecting a ledger name
//! on a line item fills in its code from this table; names that are not
//! listed get an empty code.

use serde::Serialize;

/// A fixed accounting category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub name: &'static str,
    pub code: &'static str,
}

const fn entry(name: &'static str, code: &'static str) -> LedgerEntry {
    LedgerEntry { name, code }
}

/// The ledger table, in display order. Reproduced verbatim for export
/// compatibility.
pub static LEDGERS: &[LedgerEntry] = &[
    entry("Conference and Seminar Expense", "E-1008"),
    entry("Research Seminar Series Expense", "E-1014"),
    entry("Event Expenses", "E-1030"),
    entry("Fresher / Farewell Expenses", "E-1032"),
    entry("Orientation Day Expense", "E-1038"),
    entry("ACCA Course Study Expenses", "F-1047"),
    entry("Consumables (Lab Use)", "F-1049"),
    entry("Immersion Programme Expenses", "F-1055"),
    entry("Study Material Expenses", "F-1072"),
    entry("Student Activities/ Project Expenses", "F-1071"),
    entry("Foundation Programme Expense", "F-1058"),
    entry("Adjunct Faculty Charges", "G-1094"),
    entry("Academic Professional/consultancy Fees", "G-1092"),
    entry("Fellowship- Ph.D Student (Full Time)", "H-1118"),
    entry("Accreditation Fees", "J-1162"),
    entry("Conveyance Expense", "J-1169"),
    entry("Guest Refreshment & Travelling Expense", "J-1172"),
    entry("Honorarium & Sitting Fees", "J-1174"),
    entry("Miscellaneous Office Expense", "J-1184"),
    entry("Recruitment Expenses", "J-1193"),
    entry("Stationery & Printing Expenses", "J-1198"),
    entry("Tea & Refreshment Expenses", "J-1201"),
    entry("Institutional Membership Fees", "J-1178"),
    entry("Branding and Promotion", "K-1206"),
    entry("Digital & Social Media Marketing", "K-1207"),
    entry("Domestic Outreach Expenses", "K-1208"),
    entry("Maintenance - Other Equipments", "L-1216"),
    entry("Maintenance of IT Assets", "L-1219"),
    entry("Waste Removal Charges", "L-1222"),
    entry("Software Maintenance Charges", "L-1221"),
    entry("Building Repairs & Maintenance", "L-1224"),
    entry("IT Hardwares & Consumables", "L-1227"),
    entry("Faculty Development Allowance", "M-1231"),
    entry("International Conference & Seminar Expenses - T", "M-1232"),
    entry("National Conference & Seminar Support - T", "M-1235"),
    entry("Employee wellness & recreation", "M-1237"),
    entry("Students' Workshops & Seminars Expense", "N-1242"),
    entry("Student Training / Industrial Visits Expense", "N-1245"),
    entry("Domestic Travel Expenses", "Q-1290"),
    entry("Foreign Travel Expenses", "Q-1291"),
];

/// Looks up a ledger by exact (case-sensitive) name.
pub fn find_ledger(name: &str) -> Option<&'static LedgerEntry> {
    LEDGERS.iter().find(|ledger| ledger.name == name)
}

/// Code for a ledger name, or `None` when the name is not in the table.
pub fn ledger_code_for(name: &str) -> Option<&'static str> {
    find_ledger(name).map(|ledger| ledger.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ledger_code() {
        assert_eq!(ledger_code_for("Conference and Seminar Expense"), Some("E-1008"));
        assert_eq!(ledger_code_for("Foreign Travel Expenses"), Some("Q-1291"));
    }

    #[test]
    fn test_unknown_ledger_has_no_code() {
        assert_eq!(ledger_code_for("Not A Real Ledger"), None);
        assert_eq!(ledger_code_for(""), None);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(ledger_code_for("conference and seminar expense"), None);
        assert_eq!(ledger_code_for(" Event Expenses"), None);
    }

    #[test]
    fn test_table_has_unique_names() {
        assert_eq!(LEDGERS.len(), 40);
        for (i, a) in LEDGERS.iter().enumerate() {
            for b in &LEDGERS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
