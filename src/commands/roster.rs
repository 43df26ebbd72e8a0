use poise::serenity_prelude as serenity;
use tracing::info;

use crate::{
    database::StoreError,
    models::{BirthdayEntry, BirthdayRecord, Context, Error, Gender},
    services::birthday_service::BirthdayError,
    utils::datetime::format_month_day,
    utils::messages::{
        build_database_error, build_delete_success, build_invalid_input_error, build_save_success,
        format_error, format_info,
    },
    utils::pronouns::{PronounForm, resolve},
};

/// Gender options offered by the slash commands
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum GenderChoice {
    #[name = "male"]
    Male,
    #[name = "female"]
    Female,
    #[name = "nonbinary"]
    Nonbinary,
    #[name = "other"]
    Other,
}

impl From<GenderChoice> for Gender {
    fn from(choice: GenderChoice) -> Self {
        match choice {
            GenderChoice::Male => Gender::Male,
            GenderChoice::Female => Gender::Female,
            GenderChoice::Nonbinary => Gender::Nonbinary,
            GenderChoice::Other => Gender::Other,
        }
    }
}

fn build_entry(
    name: String,
    month: u32,
    day: u32,
    gender: Option<GenderChoice>,
    user: Option<&serenity::User>,
) -> BirthdayEntry {
    BirthdayEntry::new(name, month, day)
        .with_gender(gender.map(Gender::from))
        .with_external_id(user.map(|u| u.id.to_string()))
}

/// User-facing text for a failed roster change
fn describe_birthday_error(e: &BirthdayError) -> String {
    match e {
        BirthdayError::InvalidName => build_invalid_input_error("name", "a non-empty name"),
        BirthdayError::InvalidMonth(_) => {
            build_invalid_input_error("month", "a number between 1 and 12")
        }
        BirthdayError::InvalidDay(_) => build_invalid_input_error("day", "a number between 1 and 31"),
        BirthdayError::Store(StoreError::AlreadyExists(name)) => format_error(&format!(
            "A birthday for **{}** already exists. Use /update_birthday to change it.",
            name
        )),
        BirthdayError::Store(StoreError::NotFound(name)) => {
            format_error(&format!("No birthday found for **{}**.", name))
        }
        BirthdayError::Store(_) => build_database_error(),
    }
}

/// One-line summary of a stored birthday
fn describe_record(record: &BirthdayRecord) -> String {
    let mut text = format!(
        "🎂 **{}**: {} ({}/{})",
        record.name,
        format_month_day(record.month, record.day),
        resolve(record.gender, PronounForm::Subject),
        resolve(record.gender, PronounForm::Possessive)
    );
    if let Some(user_id) = &record.external_id {
        text.push_str(&format!("\nDiscord user: <@{}>", user_id));
    }
    text
}

/// Add a birthday to the roster
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn add_birthday(
    ctx: Context<'_>,
    #[description = "Name shown in announcements"] name: String,
    #[description = "Birth month (1-12)"]
    #[min = 1]
    #[max = 12]
    month: u32,
    #[description = "Day of the month (1-31)"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Used to pick pronouns (default: they/their)"] gender: Option<GenderChoice>,
    #[description = "Discord user this birthday belongs to"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let entry = build_entry(name, month, day, gender, user.as_ref());
    let name = entry.name.trim().to_string();

    match ctx.data().birthdays.add_birthday(entry).await {
        Ok(()) => {
            info!("{} added birthday for {}", ctx.author().name, name);
            ctx.say(build_save_success(&format!("Birthday for **{}**", name)))
                .await?;
        }
        Err(e) => {
            ctx.say(describe_birthday_error(&e)).await?;
        }
    }

    Ok(())
}

/// Change an existing birthday
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn update_birthday(
    ctx: Context<'_>,
    #[description = "Name of the existing entry"] name: String,
    #[description = "Birth month (1-12)"]
    #[min = 1]
    #[max = 12]
    month: u32,
    #[description = "Day of the month (1-31)"]
    #[min = 1]
    #[max = 31]
    day: u32,
    #[description = "Used to pick pronouns (default: they/their)"] gender: Option<GenderChoice>,
    #[description = "Discord user this birthday belongs to"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let entry = build_entry(name, month, day, gender, user.as_ref());
    let name = entry.name.trim().to_string();

    match ctx.data().birthdays.update_birthday(entry).await {
        Ok(()) => {
            info!("{} updated birthday for {}", ctx.author().name, name);
            ctx.say(build_save_success(&format!("Birthday for **{}**", name)))
                .await?;
        }
        Err(e) => {
            ctx.say(describe_birthday_error(&e)).await?;
        }
    }

    Ok(())
}

/// Remove a birthday from the roster
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn remove_birthday(
    ctx: Context<'_>,
    #[description = "Name of the entry to remove"] name: String,
) -> Result<(), Error> {
    match ctx.data().birthdays.remove_birthday(&name).await {
        Ok(()) => {
            info!("{} removed birthday for {}", ctx.author().name, name.trim());
            ctx.say(build_delete_success(&format!("Birthday for **{}**", name.trim())))
                .await?;
        }
        Err(e) => {
            ctx.say(describe_birthday_error(&e)).await?;
        }
    }

    Ok(())
}

/// Show the stored birthday for a name
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn show_birthday(
    ctx: Context<'_>,
    #[description = "Name to look up"] name: String,
) -> Result<(), Error> {
    let reply = match ctx.data().birthdays.get_birthday(&name).await {
        Ok(Some(record)) => describe_record(&record),
        Ok(None) => format_info(&format!("No birthday found for **{}**.", name.trim())),
        Err(e) => describe_birthday_error(&e),
    };

    ctx.say(reply).await?;
    Ok(())
}
