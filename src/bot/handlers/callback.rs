use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::message::send_help;
use super::HandlerResult;
use crate::bot::card::booking_details_html;
use crate::bot::keyboards::{admin_panel_keyboard, empty_users_keyboard, users_list_keyboard};
use crate::bot::pagination::{clean_previous, open_bookings_page, PageTracker};
use crate::bot::roles::RoleStore;
use crate::bot::state::{ConversationDialogue, ConversationState};
use crate::database::connection::DatabaseManager;
use crate::database::models::{Booking, UserRole};
use crate::utils::logging::log_callback;

pub const ADD_USER_PROMPT: &str = "Send the user's identifier:\n\
• Numeric Telegram ID (e.g. 123456789)  — or —\n\
• Username (e.g. @john_doe or https://t.me/john_doe)\n\
\n\
Note: the user must press /start in this bot once so we can capture their ID.";

pub async fn callback_handler(
    bot: Bot,
    dialogue: ConversationDialogue,
    q: CallbackQuery,
    db: DatabaseManager,
    roles: RoleStore,
    pages: Arc<PageTracker>,
) -> HandlerResult {
    let from_id = Some(q.from.id);
    let chat_id = q.message.as_ref().map(|m| m.chat.id);

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    log_callback(&data, q.from.id.0, chat_id.map_or(0, |c| c.0));

    if data == "panel:bookings" {
        bot.answer_callback_query(q.id).await?;
        if let Some(chat_id) = chat_id {
            open_bookings_page(&bot, &db, &roles, &pages, chat_id, from_id, 1).await?;
        }
    } else if let Some(page) = data.strip_prefix("bookings:page:") {
        bot.answer_callback_query(q.id).await?;
        let requested = page.parse::<i64>().unwrap_or(1);
        if let Some(chat_id) = chat_id {
            open_bookings_page(&bot, &db, &roles, &pages, chat_id, from_id, requested).await?;
        }
    } else if data == "panel:back" {
        bot.answer_callback_query(q.id).await?;
        if !roles.is_admin(from_id).await.unwrap_or(false) {
            return Ok(());
        }
        if let Some(chat_id) = chat_id {
            // Back also cleans up whatever page is still on screen.
            clean_previous(&bot, &pages, chat_id).await;
            bot.send_message(chat_id, "🛠 Admin Panel")
                .reply_markup(admin_panel_keyboard())
                .await?;
        }
    } else if data == "panel:users" {
        if !roles.is_admin(from_id).await.unwrap_or(false) {
            return Ok(());
        }
        bot.answer_callback_query(q.id).await?;
        if let Some(chat_id) = chat_id {
            send_users_list(&bot, chat_id, &db, &roles, false).await?;
        }
    } else if data == "panel:help" {
        bot.answer_callback_query(q.id).await?;
        if let Some(chat_id) = chat_id {
            send_help(&bot, chat_id, from_id, &roles).await?;
        }
    } else if data == "user:add" {
        if !roles.is_admin(from_id).await.unwrap_or(false) {
            return Ok(());
        }
        bot.answer_callback_query(q.id).await?;
        dialogue
            .update(ConversationState::AwaitingUserIdentifier)
            .await?;
        if let Some(chat_id) = chat_id {
            bot.send_message(chat_id, ADD_USER_PROMPT).await?;
        }
    } else if let Some(target) = data.strip_prefix("user:rm:") {
        if !roles.is_admin(from_id).await.unwrap_or(false) {
            return Ok(());
        }
        if target.is_empty() {
            bot.answer_callback_query(q.id).text("Bad payload").await?;
            return Ok(());
        }
        if roles.is_super_admin(target) {
            bot.answer_callback_query(q.id).text("Protected admin").await?;
            return Ok(());
        }
        match UserRole::delete_all_for(&db.pool, target).await {
            Ok(_) => {
                bot.answer_callback_query(q.id).text("Removed").await?;
            }
            Err(e) => {
                tracing::error!("Failed to remove roles for {}: {}", target, e);
                bot.answer_callback_query(q.id)
                    .text("Failed to remove user")
                    .await?;
                return Ok(());
            }
        }
        if let Some(chat_id) = chat_id {
            send_users_list(&bot, chat_id, &db, &roles, true).await?;
        }
    } else if let Some(booking_id) = data.strip_prefix("view:") {
        let can_view = roles.is_admin(from_id).await.unwrap_or(false)
            || roles.is_user(from_id).await.unwrap_or(false);
        if !can_view {
            return Ok(());
        }
        match Booking::find_by_id(&db.pool, booking_id).await {
            Ok(Some(booking)) => {
                bot.answer_callback_query(q.id).await?;
                if let Some(chat_id) = chat_id {
                    bot.send_message(chat_id, booking_details_html(&booking))
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
            }
            Ok(None) => {
                bot.answer_callback_query(q.id).text("Not found").await?;
            }
            Err(e) => {
                tracing::error!("Failed to load booking {}: {}", booking_id, e);
                bot.answer_callback_query(q.id)
                    .text("Failed to load booking")
                    .await?;
            }
        }
    } else {
        // noop and unknown payloads only need the spinner dismissed
        let _ = bot.answer_callback_query(q.id).await;
    }

    Ok(())
}

/// Current users list with management controls, optionally marked updated
/// after an add or a removal.
pub(crate) async fn send_users_list(
    bot: &Bot,
    chat_id: ChatId,
    db: &DatabaseManager,
    roles: &RoleStore,
    updated: bool,
) -> HandlerResult {
    let list = match UserRole::list_all(&db.pool).await {
        Ok(list) => list,
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            bot.send_message(chat_id, "❌ Failed to load users.").await?;
            return Ok(());
        }
    };

    let suffix = if updated { " (updated)" } else { "" };
    if list.is_empty() {
        bot.send_message(chat_id, format!("No users yet.{suffix}"))
            .reply_markup(empty_users_keyboard())
            .await?;
    } else {
        bot.send_message(chat_id, format!("👥 Users{suffix}"))
            .reply_markup(users_list_keyboard(&list, roles.super_admins()))
            .await?;
    }
    Ok(())
}
