use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use poise::serenity_prelude::ChannelId;
use tracing::{error, info};

use crate::constants::NO_BIRTHDAYS_THIS_MONTH;
use crate::gateway::MessageGateway;
use crate::services::birthday_service::BirthdayService;
use crate::utils::message_formatter::build_monthly_digest;

/// What a daily check dispatched
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DailyCheckReport {
    pub monthly_digest_sent: bool,
    pub announcement_sent: bool,
}

/// Run the daily check for the instant the trigger fired.
///
/// On the first of the month the digest goes out before the birthday
/// announcement. A failed send is logged and never stops the other one.
pub async fn run_daily_check(
    birthdays: &BirthdayService,
    gateway: &dyn MessageGateway,
    channel_id: ChannelId,
    fired_at: DateTime<Tz>,
) -> DailyCheckReport {
    let (month, day) = (fired_at.month(), fired_at.day());
    let mut report = DailyCheckReport::default();

    info!("Running daily birthday check for {}/{}", month, day);

    if day == 1 {
        let listing = birthdays.month_listing(month).await;
        let digest = build_monthly_digest(month, &listing, NO_BIRTHDAYS_THIS_MONTH);

        match gateway.send(channel_id, &digest).await {
            Ok(()) => {
                info!("Sent monthly birthday digest to channel {}", channel_id);
                report.monthly_digest_sent = true;
            }
            Err(e) => error!("Error sending monthly birthday message: {}", e),
        }
    }

    let announcement = birthdays.announcement_for(month, day).await;
    if announcement.is_empty() {
        info!("No birthdays found for today");
        return report;
    }

    match gateway.send(channel_id, &announcement).await {
        Ok(()) => {
            info!("Sent birthday announcement to channel {}", channel_id);
            report.announcement_sent = true;
        }
        Err(e) => error!("Error sending birthday message: {}", e),
    }

    report
}
