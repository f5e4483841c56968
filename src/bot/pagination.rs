use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, UserId};

use crate::bot::card::booking_card_html;
use crate::bot::keyboards::{booking_card_keyboard, paginator_keyboard};
use crate::bot::roles::RoleStore;
use crate::database::connection::DatabaseManager;
use crate::database::models::Booking;

pub const PAGE_SIZE: i64 = 10;

pub const NOT_ALLOWED_TEXT: &str =
    "You are not allowed to view bookings. Ask admin to add you.";

/// A clamped page window over the bookings collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub total_pages: i64,
    pub offset: i64,
}

/// Out-of-range requests land on the nearest valid page instead of erroring.
pub fn page_window(total: i64, requested: i64) -> PageWindow {
    let total_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page = requested.clamp(1, total_pages);
    PageWindow {
        page,
        total_pages,
        offset: (page - 1) * PAGE_SIZE,
    }
}

/// Message ids of the last rendered bookings page, per chat.
///
/// Injected into the handlers rather than held as a module global; cleared on
/// restart. Rendering a new page takes the previous set, deletes those
/// messages best-effort, and stores the new set — last writer wins.
#[derive(Default)]
pub struct PageTracker {
    inner: Mutex<HashMap<i64, Vec<MessageId>>>,
}

impl PageTracker {
    /// Removes and returns the tracked set for a chat.
    pub fn take(&self, chat_id: ChatId) -> Vec<MessageId> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&chat_id.0)
            .unwrap_or_default()
    }

    pub fn set(&self, chat_id: ChatId, ids: Vec<MessageId>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id.0, ids);
    }

    pub fn tracked_count(&self, chat_id: ChatId) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chat_id.0)
            .map_or(0, Vec::len)
    }
}

/// Deletes every tracked message for the chat, swallowing individual
/// failures: already-deleted or too-old messages must not abort the render.
pub async fn clean_previous(bot: &Bot, pages: &PageTracker, chat_id: ChatId) {
    let ids = pages.take(chat_id);
    for message_id in ids {
        if let Err(e) = bot.delete_message(chat_id, message_id).await {
            tracing::debug!(
                "delete of message {} in chat {} failed: {}",
                message_id.0,
                chat_id.0,
                e
            );
        }
    }
}

/// Opens one page of bookings: authorize, fetch the window, delete the
/// previous page's messages, send the cards and the paginator trailer, and
/// remember the new message ids for the next cleanup.
///
/// Shared by the /bookings command, the inline paginator, and the
/// reply-keyboard shortcut.
pub async fn open_bookings_page(
    bot: &Bot,
    db: &DatabaseManager,
    roles: &RoleStore,
    pages: &PageTracker,
    chat_id: ChatId,
    from: Option<UserId>,
    requested: i64,
) -> ResponseResult<()> {
    let admin = roles.is_admin(from).await.unwrap_or(false);
    let can_view = admin || roles.is_user(from).await.unwrap_or(false);
    if !can_view {
        bot.send_message(chat_id, NOT_ALLOWED_TEXT).await?;
        return Ok(());
    }

    let total = match Booking::count(&db.pool).await {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("Failed to count bookings: {}", e);
            bot.send_message(chat_id, "❌ Failed to load bookings. Try again later.")
                .await?;
            return Ok(());
        }
    };
    let window = page_window(total, requested);

    let items = match Booking::find_page(&db.pool, PAGE_SIZE, window.offset).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch bookings page {}: {}", window.page, e);
            bot.send_message(chat_id, "❌ Failed to load bookings. Try again later.")
                .await?;
            return Ok(());
        }
    };

    // Cleanup strictly precedes this call's render.
    clean_previous(bot, pages, chat_id).await;

    let mut sent: Vec<MessageId> = Vec::with_capacity(items.len() + 1);
    for booking in &items {
        let mut request = bot
            .send_message(chat_id, booking_card_html(booking))
            .parse_mode(ParseMode::Html);
        if admin {
            request = request.reply_markup(booking_card_keyboard(&booking.id));
        }
        let msg = request.await?;
        sent.push(msg.id);
    }

    let trailer = bot
        .send_message(
            chat_id,
            format!(
                "📚 Total bookings: {total}\n📄 Page {}/{} ({PAGE_SIZE} per page)",
                window.page, window.total_pages
            ),
        )
        .reply_markup(paginator_keyboard(window.page, window.total_pages))
        .await?;
    sent.push(trailer.id);

    pages.set(chat_id, sent);
    Ok(())
}
