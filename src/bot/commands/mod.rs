use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Hotel booking bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show your numeric Telegram ids")]
    Id,
    #[command(description = "Browse the latest bookings")]
    Bookings,
    #[command(description = "Open the admin panel")]
    Panel,
}
