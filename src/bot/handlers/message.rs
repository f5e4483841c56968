use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::HandlerResult;
use crate::bot::commands::Command;
use crate::bot::keyboards::{admin_panel_keyboard, main_reply_keyboard};
use crate::bot::pagination::{open_bookings_page, PageTracker};
use crate::bot::roles::RoleStore;
use crate::bot::state::ConversationDialogue;
use crate::database::connection::DatabaseManager;
use crate::database::models::{UserProfile, UserRole};
use crate::utils::logging::{log_command_error, log_command_start};

pub async fn command_handler(
    bot: Bot,
    dialogue: ConversationDialogue,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    roles: RoleStore,
    pages: Arc<PageTracker>,
) -> HandlerResult {
    let from_id = msg.from().map(|u| u.id);
    let user_id = from_id.map_or(0, |u| u.0);

    match cmd {
        Command::Help => {
            log_command_start("/help", user_id, msg.chat.id.0);
            send_help(&bot, msg.chat.id, from_id, &roles).await?;
        }
        Command::Start => {
            log_command_start("/start", user_id, msg.chat.id.0);
            handle_start(&bot, &dialogue, &msg, &db, &roles).await?;
        }
        Command::Id => {
            let from_line = from_id.map_or("unknown".to_string(), |u| u.0.to_string());
            bot.send_message(
                msg.chat.id,
                format!("from.id = {}\nchat.id = {}", from_line, msg.chat.id.0),
            )
            .await?;
        }
        Command::Bookings => {
            log_command_start("/bookings", user_id, msg.chat.id.0);
            open_bookings_page(&bot, &db, &roles, &pages, msg.chat.id, from_id, 1).await?;
        }
        Command::Panel => {
            if roles.is_admin(from_id).await.unwrap_or(false) {
                bot.send_message(msg.chat.id, "🛠 Admin Panel")
                    .reply_markup(admin_panel_keyboard())
                    .await?;
            }
        }
    }
    Ok(())
}

/// Role-tiered help, also used by the panel's Help button.
pub(crate) async fn send_help(
    bot: &Bot,
    chat_id: ChatId,
    from: Option<UserId>,
    roles: &RoleStore,
) -> HandlerResult {
    if roles.is_admin(from).await.unwrap_or(false) {
        bot.send_message(
            chat_id,
            "*Admin commands*\n`/panel` – open admin panel\n`/bookings` – latest bookings",
        )
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    } else if roles.is_user(from).await.unwrap_or(false) {
        bot.send_message(chat_id, "You can view bookings with /bookings")
            .await?;
    } else {
        bot.send_message(chat_id, "Not allowed. Please contact admin.")
            .await?;
    }
    Ok(())
}

async fn handle_start(
    bot: &Bot,
    dialogue: &ConversationDialogue,
    msg: &Message,
    db: &DatabaseManager,
    roles: &RoleStore,
) -> HandlerResult {
    if let Err(e) = start_flow(bot, dialogue, msg, db, roles).await {
        let user_id = msg.from().map_or(0, |u| u.id.0);
        log_command_error("/start", user_id, msg.chat.id.0, &e.to_string());
        bot.send_message(msg.chat.id, "Kutilmagan xatolik. Keyinroq urinib ko‘ring.")
            .await?;
    }
    Ok(())
}

/// /start: seed configured admins, upsert the profile used for handle
/// resolution, refresh cached names, auto-create a user role on first
/// contact, and greet per role.
async fn start_flow(
    bot: &Bot,
    dialogue: &ConversationDialogue,
    msg: &Message,
    db: &DatabaseManager,
    roles: &RoleStore,
) -> anyhow::Result<()> {
    roles.seed_super_admins().await?;

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let uid = user.id.0.to_string();
    let username = user.username.as_deref();
    let first_name = Some(user.first_name.as_str());
    let last_name = user.last_name.as_deref();

    // Profile powers @handle -> chat id resolution; the handle is stored
    // lowercase there while role rows keep the original casing for display.
    UserProfile::upsert(&db.pool, &uid, username, first_name, last_name).await?;
    UserRole::update_names(&db.pool, &uid, username, first_name, last_name).await?;

    if !UserRole::exists_any(&db.pool, &uid).await? {
        UserRole::create_user_with_names(&db.pool, &uid, username, first_name, last_name).await?;
        tracing::info!("Auto-added user with role \"user\": {}", uid);
    }

    // A fresh /start always abandons a pending add-user flow.
    dialogue.exit().await?;

    if roles.is_admin(Some(user.id)).await? {
        bot.send_message(msg.chat.id, "Assalomu alaykum, Admin! 🛠 Panelni ochyapman…")
            .reply_markup(admin_panel_keyboard())
            .await?;
        bot.send_message(msg.chat.id, "Tanlang:")
            .reply_markup(main_reply_keyboard(true))
            .await?;
        return Ok(());
    }

    if roles.is_user(Some(user.id)).await? {
        bot.send_message(
            msg.chat.id,
            "Assalomu alaykum! Siz buyurtmalar ro‘yxatini ko‘rishingiz mumkin.",
        )
        .reply_markup(main_reply_keyboard(false))
        .await?;
        return Ok(());
    }

    // Shouldn't normally happen because of the auto-add above.
    bot.send_message(
        msg.chat.id,
        "Assalomu alaykum!\nSiz hozircha ro‘yxatdan o‘tmagan foydalanuvchisiz.\nIltimos, admin bilan bog‘laning va sizni qo‘shishini so‘rang.",
    )
    .await?;
    Ok(())
}
