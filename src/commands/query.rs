use crate::{
    handlers::{QueryCommand, respond},
    models::{Context, Error},
};

async fn reply(ctx: Context<'_>, command: QueryCommand) -> Result<(), Error> {
    let text = respond(&ctx.data().birthdays, command).await;
    ctx.say(text).await?;
    Ok(())
}

/// Show this month's birthdays
#[poise::command(slash_command)]
pub async fn month(ctx: Context<'_>) -> Result<(), Error> {
    reply(ctx, QueryCommand::Month).await
}

/// Show every birthday on the roster
#[poise::command(slash_command)]
pub async fn all(ctx: Context<'_>) -> Result<(), Error> {
    reply(ctx, QueryCommand::All).await
}

/// Show the next upcoming birthday
#[poise::command(slash_command)]
pub async fn next(ctx: Context<'_>) -> Result<(), Error> {
    reply(ctx, QueryCommand::Next).await
}
