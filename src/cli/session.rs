use colored::Colorize;

use crate::catalog::Catalogs;
use crate::db::get_connection;
use crate::error::{Result, SkarbnikError};
use crate::settings::{db_path, load_settings, save_settings, ROLE_KEYS};

pub fn login(user: &str, rola: &str, komorka: i64) -> Result<()> {
    if !ROLE_KEYS.contains(&rola) {
        return Err(SkarbnikError::Other(format!(
            "Unknown role: {rola} (expected one of: {})",
            ROLE_KEYS.join(", ")
        )));
    }

    // The unit must exist if a database is already set up; before init we
    // take it on faith.
    let path = db_path();
    if path.exists() {
        let conn = get_connection(&path)?;
        let catalogs = Catalogs::load(&conn)?;
        if catalogs.find_komorka(komorka).is_none() && !catalogs.komorki_organizacyjne.is_empty() {
            return Err(SkarbnikError::Other(format!(
                "Unknown organizational unit: {komorka}"
            )));
        }
    }

    let mut settings = load_settings();
    settings.user_name = user.to_string();
    settings.rola = rola.to_string();
    settings.komorka_organizacyjna_id = Some(komorka);
    save_settings(&settings)?;

    println!("{} {user} ({rola}, komórka {komorka})", "Logged in:".green());
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut settings = load_settings();
    if !settings.has_session() {
        println!("No active session.");
        return Ok(());
    }
    settings.clear_session();
    save_settings(&settings)?;
    println!("Logged out.");
    Ok(())
}
