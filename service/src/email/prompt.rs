//! Prompt construction for the email-drafting model.

use crate::address::Address;
use crate::config::CampaignConfig;
use crate::representatives::Representative;

use super::format::format_representatives_list;

/// System message sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates professional emails \
for constituents to send to their elected officials.";

/// Signature used when the visitor leaves the name blank.
pub const DEFAULT_CONSTITUENT_NAME: &str = "Concerned Constituent";

/// The name the email is signed with.
#[must_use]
pub fn constituent_name(address: &Address) -> &str {
    let name = address.name.trim();
    if name.is_empty() {
        DEFAULT_CONSTITUENT_NAME
    } else {
        name
    }
}

/// Build the user prompt asking for a JSON `{subject, body}` email.
#[must_use]
pub fn build_prompt(
    campaign: &CampaignConfig,
    representatives: &[Representative],
    address: &Address,
    personal_story: Option<&str>,
) -> String {
    let recipients = format_representatives_list(representatives);
    let name = constituent_name(address);
    let location = address.formatted();
    let bill = &campaign.bill_name;
    let short = &campaign.bill_short;

    let story = personal_story
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("\nInclude this personal perspective from the constituent: {s}\n"))
        .unwrap_or_default();

    format!(
        "Write a professional, compelling email opposing {bill}.
The email should be addressed to the following legislators: {recipients}.
The email should be from a constituent named {name} living at: {location}.

Include these key points about {short}:
1. Express strong opposition to {bill}
2. Explain concerns about the bill's potential negative impacts on Arkansas residents
3. Request that the legislator vote no on the bill
4. Thank them for considering your position
{story}
Format the response as a JSON object with 'subject' and 'body' fields.
The subject should be concise and direct.
The body should be 3-4 paragraphs, professionally written, and persuasive.
The email should be signed with the constituent's name ({name}).
Do not include any JSON comments, only return the valid JSON object."
    )
}
