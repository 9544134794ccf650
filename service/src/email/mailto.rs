//! `mailto:` links handed to the visitor's mail client.

/// Build `mailto:{to}?subject={subject}&body={body}`.
///
/// Recipients are comma-joined as given. Subject and body are
/// percent-encoded, so line breaks and `&` survive the trip into the mail
/// client. Only `A-Z a-z 0-9 - _ . ~` are left literal.
#[must_use]
pub fn create_mailto_link<S: AsRef<str>>(email_addresses: &[S], subject: &str, body: &str) -> String {
    let to = email_addresses
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "mailto:{to}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
