//! Static mapping between the grid's field names and the persisted field
//! names, used in both directions: translating a cell edit into a patch
//! payload key, and turning a stored field name back into a label for
//! history display.

/// Grid field name → persisted field name. Total: unknown names pass through
/// unchanged. Callers that need strictness get it from the store, which
/// rejects field names outside its known classes.
pub fn to_backend_name(ui: &str) -> &str {
    match ui {
        "czescBudzetowa" => "czesc_budzetowa_kod",
        "dzial" => "dzial_kod",
        "rozdzial" => "rozdzial_kod",
        "paragraf" => "paragraf_kod",
        "zrodloFinansowania" => "zrodlo_finansowania_kod",
        "grupaWydatkow" => "grupa_wydatkow_id",
        "kodZadaniowy" => "nazwa_zadania",
        "nazwaProgramu" => "nazwa_projektu",
        "planWI" => "budzet",
        other => other,
    }
}

/// Same translation for yearly-segment fields. The grid historically used
/// both spellings of "limitWydatków", so both are accepted.
pub fn segment_backend_name(ui: &str) -> &str {
    match ui {
        "potrzebyFinansowe" => "potrzeba",
        "limitWydatków" | "limitWydatkow" => "limit",
        "kwotaZawartejUmowy" => "kwota_umowy",
        "numerUmowy" => "numer_umowy",
        other => other,
    }
}

/// Persisted field name → label. Covers fields that are not editable in the
/// grid (task name, justification); falls back to the raw field name.
pub fn display_label(backend: &str) -> &str {
    match backend {
        "czesc_budzetowa_kod" => "Część budżetowa",
        "dzial_kod" => "Dział",
        "rozdzial_kod" => "Rozdział",
        "paragraf_kod" => "Paragraf",
        "zrodlo_finansowania_kod" => "Źródło finansowania",
        "grupa_wydatkow_id" => "Grupa wydatków",
        "komorka_organizacyjna_id" => "Komórka organizacyjna",
        "nazwa_projektu" => "Nazwa programu",
        "budzet" => "Plan WI",
        "nazwa_zadania" => "Nazwa zadania",
        "szczegolowe_uzasadnienie_realizacji" => "Szczegółowe uzasadnienie realizacji",
        "potrzeba" => "Potrzeby finansowe",
        "limit" => "Limit wydatków",
        "kwota_umowy" => "Kwota zawartej umowy",
        "numer_umowy" => "Numer umowy",
        other => other,
    }
}
