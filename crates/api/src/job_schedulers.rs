use crate::{reminder::send_reminder::SendReminderUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use remindbot_infra::BotContext;
use std::time::Duration;
use tracing::{error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Fires registered dispatches once a minute, starting at the next minute boundary
pub fn start_dispatch_job(ctx: BotContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(fire_due_dispatches(context));
        }
    });
}

/// Takes every due dispatch off the scheduler and delivers it. Taken
/// dispatches are never handed out again, failed deliveries are only logged.
pub async fn fire_due_dispatches(ctx: BotContext) -> usize {
    let due = ctx
        .services
        .dispatch_scheduler
        .take_due(ctx.sys.now())
        .await;
    if due.is_empty() {
        return 0;
    }
    info!("Firing {} due dispatches", due.len());

    let mut delivered = 0;
    for dispatch in due {
        let usecase = SendReminderUseCase {
            event: dispatch.payload,
        };
        match execute(usecase, &ctx).await {
            Ok(_) => delivered += 1,
            Err(e) => error!("Dispatch: {} failed. Error: {:?}", dispatch.name, e),
        }
    }
    delivered
}
