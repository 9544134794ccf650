//! Command-line client: look up legislators for an address and draft an email.
//!
//! ```text
//! speakup --name "Pat Doe" --street "500 Woodlane St" --city "Little Rock" --zip 72201 \
//!     --select "Jane Smith|AR State Senator District 15" --story "I farm in Pulaski County."
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use anyhow::{bail, Context};
use clap::Parser;
use speakup_api::{
    address::{validate_arkansas_address, Address},
    email::{
        create_mailto_link, extract_emails, format_rep_name, format_representatives_list,
        EmailGenerationRequest, EmailGenerationResponse,
    },
    representatives::{Representative, RepresentativesResponse},
};

#[derive(Parser, Debug)]
#[command(name = "speakup", about = "Write to your Arkansas state legislators")]
struct Args {
    /// Base URL of the SpeakUp API server
    #[arg(long, env = "SPEAKUP_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Your name, used to sign the email
    #[arg(long)]
    name: String,

    #[arg(long)]
    street: String,

    #[arg(long)]
    city: String,

    #[arg(long, default_value = "AR")]
    state: String,

    #[arg(long)]
    zip: String,

    /// Representative key ("name|office") to write to; repeat for several.
    /// Defaults to every legislator found.
    #[arg(long = "select", value_name = "KEY")]
    selected: Vec<String>,

    /// Personal story to include in the email
    #[arg(long)]
    story: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let address = Address {
        name: args.name,
        street: args.street,
        city: args.city,
        state: args.state,
        zip: args.zip,
    };
    if let Err(err) = validate_arkansas_address(&address) {
        bail!("{err}");
    }

    let server = args.server.trim_end_matches('/');
    let client = reqwest::Client::new();

    let found: RepresentativesResponse = client
        .post(format!("{server}/api/representatives"))
        .json(&address)
        .send()
        .await
        .context("contacting the SpeakUp server")?
        .json()
        .await
        .context("reading representatives response")?;

    if !found.success {
        bail!(
            "{}",
            found.error.as_deref().unwrap_or("representative lookup failed")
        );
    }

    println!("Address: {}", found.normalized_address);
    println!();
    for rep in &found.representatives {
        println!("  {}", format_rep_name(rep));
        println!("    key:    {}", rep.key());
        if let Some(party) = &rep.party {
            println!("    party:  {party}");
        }
        if let Some(emails) = &rep.emails {
            println!("    emails: {}", emails.join(", "));
        }
    }
    println!();

    let selected = select(found.representatives, &args.selected)?;
    println!("Writing to: {}", format_representatives_list(&selected));

    let drafted: EmailGenerationResponse = client
        .post(format!("{server}/api/generate-email"))
        .json(&EmailGenerationRequest {
            representatives: selected.clone(),
            user_address: address,
            personal_story: args.story,
        })
        .send()
        .await
        .context("contacting the SpeakUp server")?
        .json()
        .await
        .context("reading email response")?;

    if !drafted.success {
        bail!(
            "{}",
            drafted.error.as_deref().unwrap_or("email generation failed")
        );
    }

    println!();
    println!("Subject: {}", drafted.subject);
    println!();
    println!("{}", drafted.body);
    println!();

    let recipients = extract_emails(&selected);
    if recipients.is_empty() {
        println!("None of the selected legislators list an email address.");
    } else {
        println!(
            "{}",
            create_mailto_link(&recipients, &drafted.subject, &drafted.body)
        );
    }

    Ok(())
}

/// Keep the representatives whose key was requested, or all when none were.
fn select(
    representatives: Vec<Representative>,
    keys: &[String],
) -> anyhow::Result<Vec<Representative>> {
    if keys.is_empty() {
        return Ok(representatives);
    }

    if let Some(unknown) = keys
        .iter()
        .find(|key| !representatives.iter().any(|rep| &rep.key() == *key))
    {
        bail!("no representative with key '{unknown}'");
    }

    Ok(representatives
        .into_iter()
        .filter(|rep| keys.contains(&rep.key()))
        .collect())
}
