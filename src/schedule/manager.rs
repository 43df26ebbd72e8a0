use chrono::NaiveTime;
use poise::serenity_prelude::ChannelId;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use super::birthday_tasks::run_daily_check;
use super::types::TriggerSchedule;
use crate::gateway::MessageGateway;
use crate::services::birthday_service::BirthdayService;
use crate::utils::clock::Clock;

/// The daily birthday announcer
///
/// Waits for the trigger time, runs one daily check, then waits exactly
/// 24 hours more. Checks never overlap: the next wait is only armed once
/// the previous check has finished. A late wake-up runs a single check.
pub struct DailyScheduler {
    birthdays: BirthdayService,
    gateway: Arc<dyn MessageGateway>,
    clock: Arc<dyn Clock>,
    channel_id: ChannelId,
    trigger_time: NaiveTime,
}

/// Handle used to stop a running scheduler
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Ask the scheduler to stop. Safe to call more than once.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Stop the scheduler and wait for it to finish any check in progress
    pub async fn stop(self) {
        self.shutdown();
        if let Err(e) = self.task.await {
            warn!("Schedule manager task ended abnormally: {}", e);
        }
    }
}

impl DailyScheduler {
    pub fn new(
        birthdays: BirthdayService,
        gateway: Arc<dyn MessageGateway>,
        clock: Arc<dyn Clock>,
        channel_id: ChannelId,
        trigger_time: NaiveTime,
    ) -> Self {
        Self {
            birthdays,
            gateway,
            clock,
            channel_id,
            trigger_time,
        }
    }

    /// Run until `shutdown` flips to true or its sender is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut schedule = TriggerSchedule::new(self.clock.now(), self.trigger_time);
        info!(
            "Schedule manager started at {}, first birthday check at {}",
            schedule.reference_now(),
            schedule.next_fire_at()
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let wait_duration = schedule.wait_duration(self.clock.now());
            info!(
                "Next birthday check at {} (in {} minutes)",
                schedule.next_fire_at(),
                wait_duration.as_secs() / 60
            );

            tokio::select! {
                _ = sleep(wait_duration) => {
                    let now = self.clock.now();
                    let skipped = schedule.skip_missed(now);
                    if skipped > 0 {
                        warn!("Woke up late, skipped {} missed birthday check(s)", skipped);
                    }
                    // Today's trigger may still be ahead after skipping
                    if schedule.next_fire_at() > now {
                        continue;
                    }
                    run_daily_check(
                        &self.birthdays,
                        self.gateway.as_ref(),
                        self.channel_id,
                        schedule.next_fire_at(),
                    )
                    .await;
                    schedule.advance();
                }
                _ = shutdown.changed() => {
                    // Either a shutdown request or the sender went away
                    if !*shutdown.borrow() {
                        info!("Shutdown channel closed");
                    }
                    break;
                }
            }
        }

        info!("Schedule manager stopped");
    }
}

/// Spawn the scheduler on the runtime and return its handle
pub fn start_schedule_manager(scheduler: DailyScheduler) -> SchedulerHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(scheduler.run(shutdown_rx));
    SchedulerHandle { shutdown_tx, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BirthdayEntry, Gender};
    use crate::testing::{MemoryRoster, RecordingGateway};
    use crate::utils::message_formatter::SentinelRule;
    use chrono::{DateTime, TimeDelta, TimeZone};
    use chrono_tz::Tz;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Wall clock that follows tokio's (paused) time, plus an adjustable jump
    struct PausedClock {
        wall_start: DateTime<Tz>,
        started: Instant,
        jump: Mutex<TimeDelta>,
    }

    impl PausedClock {
        fn starting_at(wall_start: DateTime<Tz>) -> Self {
            Self {
                wall_start,
                started: Instant::now(),
                jump: Mutex::new(TimeDelta::zero()),
            }
        }

        /// Move the wall clock forward without tokio time passing
        fn jump_forward(&self, by: TimeDelta) {
            *self.jump.lock().unwrap() += by;
        }
    }

    impl Clock for PausedClock {
        fn now(&self) -> DateTime<Tz> {
            let elapsed = TimeDelta::from_std(self.started.elapsed()).unwrap();
            self.wall_start + elapsed + *self.jump.lock().unwrap()
        }
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn setup(
        wall_start: DateTime<Tz>,
        roster: MemoryRoster,
    ) -> (DailyScheduler, Arc<RecordingGateway>) {
        let clock: Arc<dyn Clock> = Arc::new(PausedClock::starting_at(wall_start));
        let gateway = Arc::new(RecordingGateway::default());
        let birthdays = BirthdayService::new(Arc::new(roster), clock.clone(), SentinelRule::default());
        let scheduler = DailyScheduler::new(
            birthdays,
            gateway.clone(),
            clock,
            ChannelId::new(7),
            nine(),
        );
        (scheduler, gateway)
    }

    fn three_day_roster() -> MemoryRoster {
        MemoryRoster::with(&[
            BirthdayEntry::new("Alice", 3, 15).with_gender(Some(Gender::Female)),
            BirthdayEntry::new("Bob", 3, 16).with_gender(Some(Gender::Male)),
            BirthdayEntry::new("Carol", 3, 17),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_triggers_make_three_checks_a_day_apart() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap();
        let (scheduler, gateway) = setup(start, three_day_roster());
        let handle = start_schedule_manager(scheduler);

        // 23h to the first trigger, then two more 24h cycles, plus slack
        sleep(Duration::from_secs(23 * 3600 + 2 * 24 * 3600 + 3600)).await;
        handle.stop().await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].text.contains("Alice's birthday"));
        assert!(sent[1].text.contains("Bob's birthday"));
        assert!(sent[2].text.contains("Carol's birthday"));
        for pair in sent.windows(2) {
            let gap = (pair[1].at - pair[0].at).as_secs_f64();
            assert!((gap - 24.0 * 3600.0).abs() < 1.0, "gap was {gap}s");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_check_before_trigger_time() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let (scheduler, gateway) = setup(start, three_day_roster());
        let handle = start_schedule_manager(scheduler);

        sleep(Duration::from_secs(59 * 60)).await;
        assert_eq!(gateway.attempts(), 0);

        sleep(Duration::from_secs(2 * 60)).await;
        assert_eq!(gateway.texts().len(), 1);
        assert!(gateway.texts()[0].contains("Alice's birthday"));

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_wake_on_later_day_runs_only_that_days_check() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap();
        let clock = Arc::new(PausedClock::starting_at(start));
        let gateway = Arc::new(RecordingGateway::default());
        let birthdays = BirthdayService::new(
            Arc::new(three_day_roster()),
            clock.clone(),
            SentinelRule::default(),
        );
        let scheduler =
            DailyScheduler::new(birthdays, gateway.clone(), clock.clone(), ChannelId::new(7), nine());
        let handle = start_schedule_manager(scheduler);

        // Scheduler is sleeping towards 3/15 09:00; the wall clock leaps 23h ahead
        sleep(Duration::from_secs(3600)).await;
        clock.jump_forward(TimeDelta::hours(23));

        // The sleep ends at wall time 3/16 08:00: nothing is posted for 3/15
        sleep(Duration::from_secs(22 * 3600 + 30 * 60)).await;
        assert_eq!(gateway.attempts(), 0);

        // 3/16 09:00 posts Bob, once
        sleep(Duration::from_secs(3600)).await;
        handle.stop().await;
        assert_eq!(gateway.texts().len(), 1);
        assert!(gateway.texts()[0].contains("Bob's birthday"));
        assert!(!gateway.texts()[0].contains("Alice"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_while_waiting_stops_without_checks() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap();
        let (scheduler, gateway) = setup(start, three_day_roster());
        let handle = start_schedule_manager(scheduler);

        sleep(Duration::from_secs(3600)).await;
        handle.shutdown();
        handle.shutdown();
        handle.stop().await;

        assert_eq!(gateway.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_start_is_honoured() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 15, 8, 59, 0).unwrap();
        let (scheduler, gateway) = setup(start, three_day_roster());
        let (shutdown_tx, shutdown_rx) = watch::channel(true);

        scheduler.run(shutdown_rx).await;
        drop(shutdown_tx);

        assert_eq!(gateway.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_stops_scheduler() {
        let start = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap();
        let (scheduler, gateway) = setup(start, three_day_roster());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(scheduler.run(shutdown_rx));
        drop(shutdown_tx);
        task.await.unwrap();

        assert_eq!(gateway.attempts(), 0);
    }
}
