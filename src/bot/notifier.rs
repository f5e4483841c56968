use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::card::booking_card_html;
use crate::bot::keyboards::booking_card_keyboard;
use crate::bot::roles::RoleStore;
use crate::database::models::Booking;
use crate::utils::logging::log_notify_result;

/// Fans a new booking out to every configured admin.
///
/// Each recipient gets exactly one delivery attempt; a failure is logged and
/// the loop moves on. Nothing here aborts or retries, and no error escapes —
/// the caller runs this on a detached task.
pub async fn notify_admins(bot: &Bot, roles: &RoleStore, booking: &Booking) {
    tracing::info!(
        "NOTIFY: booking {} room '{}' guest '{}'",
        booking.id,
        booking.room_title,
        booking.guest_name
    );

    if let Err(e) = roles.seed_super_admins().await {
        tracing::warn!("Failed to seed configured admins before notify: {}", e);
    }

    let recipients = roles.super_admins();
    if recipients.is_empty() {
        tracing::warn!("NOTIFY: no ADMIN_CHAT_IDS configured, dropping notification");
        return;
    }

    let card = booking_card_html(booking);
    for chat_id in recipients {
        let Ok(id) = chat_id.parse::<i64>() else {
            log_notify_result(chat_id, &booking.id, Some("invalid chat id"));
            continue;
        };

        let result = bot
            .send_message(ChatId(id), card.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(booking_card_keyboard(&booking.id))
            .await;
        match result {
            Ok(_) => log_notify_result(chat_id, &booking.id, None),
            Err(e) => log_notify_result(chat_id, &booking.id, Some(&e.to_string())),
        }
    }
}
