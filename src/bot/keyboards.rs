use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

use crate::database::models::{UserRole, ROLE_ADMIN};

/// Reply-keyboard shortcut labels. The text handler matches on these.
pub const BTN_VIEW: &str = "📚 View bookings";
pub const BTN_USERS: &str = "👥 Users";
pub const BTN_HELP: &str = "ℹ️ Help";

pub fn admin_panel_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📚 View bookings", "panel:bookings")],
        vec![InlineKeyboardButton::callback("👥 Users", "panel:users")],
        vec![InlineKeyboardButton::callback("ℹ️ Help", "panel:help")],
    ])
}

pub fn main_reply_keyboard(is_admin: bool) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = if is_admin {
        vec![
            vec![KeyboardButton::new(BTN_VIEW)],
            vec![KeyboardButton::new(BTN_USERS), KeyboardButton::new(BTN_HELP)],
        ]
    } else {
        vec![
            vec![KeyboardButton::new(BTN_VIEW)],
            vec![KeyboardButton::new(BTN_HELP)],
        ]
    };
    KeyboardMarkup::new(rows).resize_keyboard(true)
}

/// One row per assignment; the remove button is withheld for admins in the
/// protected configured set.
pub fn users_list_keyboard(list: &[UserRole], protected: &[String]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::with_capacity(list.len() + 1);
    for u in list {
        let marker = if u.role == ROLE_ADMIN { "⭐" } else { "👤" };
        let name = u
            .username
            .as_deref()
            .map_or_else(|| u.chat_id.clone(), |handle| format!("@{handle}"));
        let removable = !(u.role == ROLE_ADMIN && protected.contains(&u.chat_id));

        let mut row = vec![InlineKeyboardButton::callback(
            format!("{marker} {name}"),
            format!("noop:{}", u.chat_id),
        )];
        if removable {
            row.push(InlineKeyboardButton::callback(
                "❌ Remove",
                format!("user:rm:{}", u.chat_id),
            ));
        }
        rows.push(row);
    }
    rows.push(vec![
        InlineKeyboardButton::callback("➕ Add user", "user:add"),
        InlineKeyboardButton::callback("⬅️ Back", "panel:back"),
    ]);
    InlineKeyboardMarkup::new(rows)
}

pub fn empty_users_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➕ Add user", "user:add")],
        vec![InlineKeyboardButton::callback("⬅️ Back", "panel:back")],
    ])
}

/// Prev/Next collapse to a `noop` placeholder at the boundaries so the
/// layout never shifts.
pub fn paginator_keyboard(page: i64, total_pages: i64) -> InlineKeyboardMarkup {
    let prev = if page > 1 {
        InlineKeyboardButton::callback("◀ Prev", format!("bookings:page:{}", page - 1))
    } else {
        InlineKeyboardButton::callback("·", "noop")
    };
    let next = if page < total_pages {
        InlineKeyboardButton::callback("Next ▶", format!("bookings:page:{}", page + 1))
    } else {
        InlineKeyboardButton::callback("·", "noop")
    };

    InlineKeyboardMarkup::new(vec![
        vec![
            prev,
            InlineKeyboardButton::callback(format!("Page {page}/{total_pages}"), "noop"),
            next,
        ],
        vec![
            InlineKeyboardButton::callback("🔄 Refresh", format!("bookings:page:{page}")),
            InlineKeyboardButton::callback("⬅️ Back", "panel:back"),
        ],
    ])
}

/// Admin-only controls on a booking card.
pub fn booking_card_keyboard(booking_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "👁 Details",
        format!("view:{booking_id}"),
    )]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(chat_id: &str, role: &str, username: Option<&str>) -> UserRole {
        UserRole {
            chat_id: chat_id.to_string(),
            role: role.to_string(),
            username: username.map(String::from),
            first_name: None,
            last_name: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_protected_admin_has_no_remove_button() {
        let list = vec![role("111", "admin", None), role("222", "user", Some("guest"))];
        let protected = vec!["111".to_string()];
        let kb = users_list_keyboard(&list, &protected);

        // label-only row for the protected admin, label + remove for the user
        assert_eq!(kb.inline_keyboard[0].len(), 1);
        assert_eq!(kb.inline_keyboard[1].len(), 2);
    }

    #[test]
    fn test_paginator_boundaries_are_noops() {
        let kb = paginator_keyboard(1, 1);
        assert_eq!(kb.inline_keyboard[0].len(), 3);
        assert_eq!(kb.inline_keyboard[0][0].text, "·");
        assert_eq!(kb.inline_keyboard[0][2].text, "·");

        let kb = paginator_keyboard(2, 3);
        assert_eq!(kb.inline_keyboard[0][0].text, "◀ Prev");
        assert_eq!(kb.inline_keyboard[0][2].text, "Next ▶");
    }
}
