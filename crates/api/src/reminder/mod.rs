mod get_subject_reminders;
pub mod schedule_reminder;
pub mod send_reminder;
#[cfg(test)]
pub(crate) mod test_helpers;

use actix_web::web;
use get_subject_reminders::get_subject_reminders_controller;
use send_reminder::dispatch_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/dispatch",
        web::post().to(dispatch_reminder_controller),
    );
    cfg.route(
        "/reminders/{subject_id}",
        web::get().to(get_subject_reminders_controller),
    );
}
