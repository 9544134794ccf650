//! Text helpers for addressing and signing emails.

use crate::representatives::Representative;

/// `"Name (Office), Name (Office)"`
#[must_use]
pub fn format_representatives_list(representatives: &[Representative]) -> String {
    representatives
        .iter()
        .map(|rep| format!("{} ({})", rep.name, rep.office))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every email address of every representative, in order.
#[must_use]
pub fn extract_emails(representatives: &[Representative]) -> Vec<String> {
    representatives
        .iter()
        .filter_map(|rep| rep.emails.as_ref())
        .flatten()
        .cloned()
        .collect()
}

/// `"Name, Office"`
#[must_use]
pub fn format_rep_name(rep: &Representative) -> String {
    format!("{}, {}", rep.name, rep.office)
}

#[must_use]
pub fn format_salutation(representatives: &[Representative]) -> String {
    match representatives {
        [] => "Dear Elected Official,".to_string(),
        [rep] => format!("Dear {} {},", rep.office, rep.name),
        _ => "Dear Elected Officials,".to_string(),
    }
}

#[must_use]
pub fn create_email_signature(name: &str, address: &str) -> String {
    format!("\nSincerely,\n{name}\n{address}\n")
}
