use crate::models::ConferenceRecord;

/// Popup body for a record: name, then "location (year)", then the talk title.
///
/// Fields are inserted verbatim. Records are compiled in, never user input.
pub fn popup_html(rec: &ConferenceRecord) -> String {
    format!(
        "<strong>{}</strong><br><em>{} ({})</em><br><br>{}",
        rec.name, rec.location, rec.year, rec.title
    )
}
