use anyhow::{anyhow, Result};

/// Checks the intake payload before anything is persisted. A failure here
/// must leave no partial writes behind.
pub fn validate_booking_fields(
    room_title: &str,
    guest_name: &str,
    checkin: &str,
    checkout: &str,
    guests: i64,
) -> Result<()> {
    if room_title.trim().is_empty() {
        return Err(anyhow!("roomTitle is required"));
    }

    if guest_name.trim().is_empty() {
        return Err(anyhow!("guestName is required"));
    }

    if checkin.trim().is_empty() || checkout.trim().is_empty() {
        return Err(anyhow!("checkin and checkout are required"));
    }

    if guests < 1 {
        return Err(anyhow!("guests must be at least 1"));
    }

    Ok(())
}

pub fn validate_total_price(total_price: Option<f64>) -> Result<()> {
    if let Some(price) = total_price {
        if !price.is_finite() || price < 0.0 {
            return Err(anyhow!("totalPrice must be a non-negative number"));
        }
    }
    Ok(())
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Group and supergroup ids are negative; reject values beyond Telegram's
    // known ranges.
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}
