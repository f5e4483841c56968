use std::sync::Arc;

use teloxide::prelude::*;

use super::callback::send_users_list;
use super::HandlerResult;
use crate::bot::identifier::{parse_identifier, ParsedIdentifier};
use crate::bot::keyboards::{admin_panel_keyboard, BTN_HELP, BTN_USERS, BTN_VIEW};
use crate::bot::pagination::{open_bookings_page, PageTracker};
use crate::bot::roles::RoleStore;
use crate::bot::state::{ConversationDialogue, ConversationState};
use crate::database::connection::DatabaseManager;
use crate::database::models::{UserProfile, UserRole, ROLE_USER};

pub const INVALID_IDENTIFIER_TEXT: &str =
    "Please send a valid numeric ID or @username / t.me/username.";

/// Non-command text: reply-keyboard shortcuts first, then the add-user
/// conversation when that mode is active. Anything else is ignored.
pub async fn text_handler(
    bot: Bot,
    dialogue: ConversationDialogue,
    state: ConversationState,
    msg: Message,
    db: DatabaseManager,
    roles: RoleStore,
    pages: Arc<PageTracker>,
) -> HandlerResult {
    let Some(text) = msg.text().map(str::to_owned) else {
        return Ok(());
    };
    let from_id = msg.from().map(|u| u.id);
    let chat_id = msg.chat.id;

    match text.as_str() {
        BTN_VIEW => {
            let _ = bot.delete_message(chat_id, msg.id).await;
            open_bookings_page(&bot, &db, &roles, &pages, chat_id, from_id, 1).await?;
        }
        BTN_USERS => {
            if !roles.is_admin(from_id).await.unwrap_or(false) {
                return Ok(());
            }
            let _ = bot.delete_message(chat_id, msg.id).await;
            bot.send_message(chat_id, "🛠 Admin Panel")
                .reply_markup(admin_panel_keyboard())
                .await?;
        }
        BTN_HELP => {
            let _ = bot.delete_message(chat_id, msg.id).await;
            bot.send_message(chat_id, "Commands: /bookings, /panel (admin), /help, /id")
                .await?;
        }
        _ => {
            if state == ConversationState::AwaitingUserIdentifier {
                handle_add_user_input(&bot, &dialogue, chat_id, from_id, &text, &db, &roles)
                    .await?;
            }
        }
    }
    Ok(())
}

/// One message of the add-user flow. The mode stays open on parse failures
/// and unresolvable handles so the admin can retry; it clears on success, on
/// a terminal datastore failure, or when the sender is no longer an admin.
async fn handle_add_user_input(
    bot: &Bot,
    dialogue: &ConversationDialogue,
    chat_id: ChatId,
    from_id: Option<UserId>,
    text: &str,
    db: &DatabaseManager,
    roles: &RoleStore,
) -> HandlerResult {
    if !roles.is_admin(from_id).await.unwrap_or(false) {
        // Admin status lost mid-flow: drop the mode without acting.
        dialogue.exit().await?;
        return Ok(());
    }

    match parse_identifier(text) {
        ParsedIdentifier::NumericId(target) => {
            match UserRole::upsert(&db.pool, &target, ROLE_USER, None).await {
                Ok(()) => {
                    dialogue.exit().await?;
                    bot.send_message(chat_id, format!("✅ Added user {target} as \"user\"."))
                        .await?;
                    send_users_list(bot, chat_id, db, roles, true).await?;
                }
                Err(e) => {
                    tracing::error!("Failed to add user {}: {}", target, e);
                    dialogue.exit().await?;
                    bot.send_message(chat_id, "❌ Unexpected error. Try again later.")
                        .await?;
                }
            }
        }
        ParsedIdentifier::Handle(username) => {
            let profile = match UserProfile::find_by_username(&db.pool, &username).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!("Failed to look up handle @{}: {}", username, e);
                    dialogue.exit().await?;
                    bot.send_message(chat_id, "❌ Unexpected error. Try again later.")
                        .await?;
                    return Ok(());
                }
            };

            let Some(profile) = profile else {
                // Platform constraint, not an error: a handle resolves only
                // after that user has messaged the bot. Keep the mode open.
                bot.send_message(
                    chat_id,
                    format!(
                        "⚠️ I can't resolve @{username} to a chat ID yet.\n\
                         Ask them to open this bot and press /start once.\n\
                         Then try adding again."
                    ),
                )
                .await?;
                return Ok(());
            };

            let target = profile.chat_id;
            match UserRole::upsert(&db.pool, &target, ROLE_USER, Some(&username)).await {
                Ok(()) => {
                    dialogue.exit().await?;
                    bot.send_message(
                        chat_id,
                        format!("✅ Added @{username} (id: {target}) as \"user\"."),
                    )
                    .await?;
                    send_users_list(bot, chat_id, db, roles, true).await?;
                }
                Err(e) => {
                    tracing::error!("Failed to add @{} ({}): {}", username, target, e);
                    dialogue.exit().await?;
                    bot.send_message(chat_id, "❌ Unexpected error. Try again later.")
                        .await?;
                }
            }
        }
        ParsedIdentifier::Unrecognized => {
            bot.send_message(chat_id, INVALID_IDENTIFIER_TEXT).await?;
        }
    }
    Ok(())
}
