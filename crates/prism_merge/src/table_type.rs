//! Catalog type → display taxonomy for `SHOW FULL TABLES`.

/// Map a raw catalog type string to the table type an admin cursor emits:
/// `BASE TABLE` for a table, `VIEW` for a view, `SYSTEM VIEW` for an
/// INFORMATION_SCHEMA table.
///
/// Total function: absent, empty, and unrecognized inputs all classify as
/// `UNKNOWN TABLE TYPE`. An unrecognized catalog type is data to display,
/// not a failure.
pub fn classify_table_type(raw: Option<&str>) -> &'static str {
    match raw {
        None | Some("") => "UNKNOWN TABLE TYPE",
        Some("TABLE") => "BASE TABLE",
        Some("VIEW") => "VIEW",
        Some("INFORMATION_SCHEMA") => "SYSTEM VIEW",
        Some(_) => "UNKNOWN TABLE TYPE",
    }
}
