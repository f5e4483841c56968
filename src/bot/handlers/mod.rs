pub mod callback;
pub mod message;
pub mod text;

use std::sync::Arc;

use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};

use crate::bot::pagination::PageTracker;
use crate::bot::roles::RoleStore;
use crate::bot::state::{ConversationDialogue, ConversationState};
use crate::database::connection::DatabaseManager;

/// Errors out of handlers are boxed so telegram failures and storage
/// failures share one type; the dispatcher logs whatever reaches it.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub struct BotHandler {
    pub db: DatabaseManager,
    pub roles: RoleStore,
    pub pages: Arc<PageTracker>,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, roles: RoleStore, pages: Arc<PageTracker>) -> Self {
        Self { db, roles, pages }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let db_cmd = self.db.clone();
        let roles_cmd = self.roles.clone();
        let pages_cmd = self.pages.clone();

        let db_text = self.db.clone();
        let roles_text = self.roles.clone();
        let pages_text = self.pages.clone();

        let db_callback = self.db.clone();
        let roles_callback = self.roles.clone();
        let pages_callback = self.pages.clone();

        dialogue::enter::<Update, InMemStorage<ConversationState>, ConversationState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(
                        move |bot: Bot,
                              dialogue: ConversationDialogue,
                              msg: Message,
                              cmd: crate::bot::commands::Command| {
                            let db = db_cmd.clone();
                            let roles = roles_cmd.clone();
                            let pages = pages_cmd.clone();
                            async move {
                                message::command_handler(bot, dialogue, msg, cmd, db, roles, pages)
                                    .await
                            }
                        },
                    ),
            )
            .branch(Update::filter_message().endpoint(
                move |bot: Bot,
                      dialogue: ConversationDialogue,
                      state: ConversationState,
                      msg: Message| {
                    let db = db_text.clone();
                    let roles = roles_text.clone();
                    let pages = pages_text.clone();
                    async move {
                        text::text_handler(bot, dialogue, state, msg, db, roles, pages).await
                    }
                },
            ))
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, dialogue: ConversationDialogue, q: CallbackQuery| {
                    let db = db_callback.clone();
                    let roles = roles_callback.clone();
                    let pages = pages_callback.clone();
                    async move { callback::callback_handler(bot, dialogue, q, db, roles, pages).await }
                },
            ))
    }
}
