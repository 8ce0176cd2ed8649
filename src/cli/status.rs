use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("skarbnik.db");

    println!(
        "User:       {}",
        if settings.user_name.is_empty() { "(not set)" } else { &settings.user_name }
    );
    println!(
        "Role:       {}",
        if settings.rola.is_empty() { "(not set)" } else { &settings.rola }
    );
    println!(
        "Unit:       {}",
        settings
            .komorka_organizacyjna_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;

        let rows: i64 = conn.query_row("SELECT count(*) FROM planowanie_budzetu", [], |r| r.get(0))?;
        let segments: i64 = conn.query_row("SELECT count(*) FROM rok_budzetowy", [], |r| r.get(0))?;
        let versions: i64 = conn.query_row(
            "SELECT (SELECT count(*) FROM versioned_string_fields) \
             + (SELECT count(*) FROM versioned_numeric_fields) \
             + (SELECT count(*) FROM versioned_fk_fields)",
            [],
            |r| r.get(0),
        )?;
        let dzialy: i64 = conn.query_row("SELECT count(*) FROM dzialy", [], |r| r.get(0))?;
        let rozdzialy: i64 = conn.query_row("SELECT count(*) FROM rozdzialy", [], |r| r.get(0))?;
        let paragrafy: i64 = conn.query_row("SELECT count(*) FROM paragrafy", [], |r| r.get(0))?;

        println!();
        println!("Rows:          {rows}");
        println!("Segments:      {segments}");
        println!("Versions:      {versions}");
        println!("Catalogs:      {dzialy} działy, {rozdzialy} rozdziały, {paragrafy} paragrafy");
    } else {
        println!();
        println!("Database not found. Run `skarbnik init` to set up.");
    }

    Ok(())
}
