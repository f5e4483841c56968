use crate::database::models::Booking;
use crate::utils::datetime::format_rfc3339;
use crate::utils::html::escape_html;
use crate::utils::markdown::escape_markdown;

/// Placeholder for missing optional fields.
const MISSING: &str = "—";

/// Groups a rounded amount in thousands with spaces, e.g. `1 250 000`.
pub fn group_thousands(total: f64) -> String {
    let whole = total.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a price with thousands grouping and the so'm suffix,
/// e.g. `1 250 000 so'm`.
pub fn format_price(total: f64) -> String {
    format!("{} so'm", group_thousands(total))
}

fn nights_suffix(nights: Option<i64>) -> String {
    match nights {
        Some(1) => " (1 night)".to_string(),
        Some(n) => format!(" ({n} nights)"),
        None => String::new(),
    }
}

fn price_or_missing(total_price: Option<f64>) -> String {
    match total_price {
        Some(p) if p.is_finite() => format_price(p),
        _ => MISSING.to_string(),
    }
}

/// Builds a booking card for `ParseMode::Html`. Total and deterministic:
/// every dynamic value is escaped, missing optionals render as a placeholder.
pub fn booking_card_html(b: &Booking) -> String {
    let room = escape_html(&b.room_title);
    let guest = escape_html(&b.guest_name);
    let dates = format!("{} → {}", escape_html(&b.checkin), escape_html(&b.checkout));
    let nat = b.nationality.as_deref().map_or(MISSING.to_string(), |v| escape_html(v));
    let phone = b.phone.as_deref().map_or(MISSING.to_string(), |v| escape_html(v));
    let price = price_or_missing(b.total_price);
    let created = format_rfc3339(&b.created_at);

    format!(
        "🏨 <b>New Booking</b>\n\
         • <b>Room:</b> {room}\n\
         • <b>Guest:</b> {guest}\n\
         • <b>Guests:</b> {guests}\n\
         • <b>Dates:</b> {dates}{nights}\n\
         • <b>Nationality:</b> {nat}\n\
         • <b>Phone:</b> {phone}\n\
         • <b>Total:</b> {price}\n\
         • <b>Created:</b> {created}",
        guests = b.guests,
        nights = nights_suffix(b.nights),
    )
}

/// The detail view behind a card's button: the card plus status.
pub fn booking_details_html(b: &Booking) -> String {
    format!(
        "{}\n• <b>Status:</b> {}",
        booking_card_html(b),
        escape_html(&b.status)
    )
}

/// MarkdownV2 rendition of a booking, optional lines omitted when absent.
pub fn booking_card_markdown(b: &Booking) -> String {
    let d1 = escape_markdown(&b.checkin);
    let d2 = escape_markdown(&b.checkout);
    let mut lines = vec![
        "🏨 *New Booking*".to_string(),
        format!("• Room: *{}*", escape_markdown(&b.room_title)),
        format!("• Guest: *{}*", escape_markdown(&b.guest_name)),
        format!("• Guests: *{}*", b.guests),
        format!(
            "• Dates: *{d1}* → *{d2}*{}",
            match b.nights {
                Some(n) => format!("  \\({} nights\\)", n),
                None => String::new(),
            }
        ),
    ];
    if let Some(nat) = b.nationality.as_deref() {
        lines.push(format!("• Nationality: *{}*", escape_markdown(nat)));
    }
    if let Some(phone) = b.phone.as_deref() {
        lines.push(format!("• Phone: *{}*", escape_markdown(phone)));
    }
    if let Some(email) = b.email.as_deref() {
        lines.push(format!("• Email: *{}*", escape_markdown(email)));
    }
    if let Some(price) = b.total_price.filter(|p| p.is_finite()) {
        lines.push(format!("• Total: *{}*", escape_markdown(&format_price(price))));
    }
    lines.push(format!("\\#{}", escape_markdown(&b.id)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking {
            id: "b-1".to_string(),
            room_title: "Deluxe <Suite>".to_string(),
            guest_name: "John & Jane".to_string(),
            phone: Some("+998901234567".to_string()),
            email: None,
            nationality: None,
            checkin: "2025-10-16".to_string(),
            checkout: "2025-10-18".to_string(),
            nights: Some(2),
            guests: 2,
            total_price: Some(1_250_000.0),
            status: "new".to_string(),
            created_at: "2025-10-16T19:42:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_price_grouping() {
        assert_eq!(format_price(1_250_000.0), "1 250 000 so'm");
        assert_eq!(format_price(999.0), "999 so'm");
        assert_eq!(format_price(0.0), "0 so'm");
        assert_eq!(format_price(1000.0), "1 000 so'm");
    }

    #[test]
    fn test_html_card_escapes_user_input() {
        let card = booking_card_html(&sample_booking());
        assert!(card.contains("Deluxe &lt;Suite&gt;"));
        assert!(card.contains("John &amp; Jane"));
        assert!(!card.contains("<Suite>"));
    }

    #[test]
    fn test_html_card_placeholders_for_missing_fields() {
        let mut b = sample_booking();
        b.phone = None;
        b.total_price = None;
        let card = booking_card_html(&b);
        assert!(card.contains("• <b>Phone:</b> —"));
        assert!(card.contains("• <b>Total:</b> —"));
        assert!(!card.contains("undefined"));
    }

    #[test]
    fn test_card_is_deterministic() {
        let b = sample_booking();
        assert_eq!(booking_card_html(&b), booking_card_html(&b));
        assert_eq!(booking_card_markdown(&b), booking_card_markdown(&b));
    }

    #[test]
    fn test_dates_rendered_literally() {
        let card = booking_card_html(&sample_booking());
        assert!(card.contains("2025-10-16 → 2025-10-18 (2 nights)"));
        assert!(card.contains("• <b>Created:</b> 16 Oct 2025, 19:42"));
    }

    #[test]
    fn test_markdown_card_escapes_reserved_characters() {
        let card = booking_card_markdown(&sample_booking());
        assert!(card.contains("2025\\-10\\-16"));
        assert!(card.contains("• Guest: *John & Jane*"));
    }

    #[test]
    fn test_markdown_card_omits_absent_optionals() {
        let mut b = sample_booking();
        b.phone = None;
        b.email = None;
        b.nationality = None;
        b.total_price = None;
        let card = booking_card_markdown(&b);
        assert!(!card.contains("Phone"));
        assert!(!card.contains("Email"));
        assert!(!card.contains("Nationality"));
        assert!(!card.contains("Total"));
    }

    #[test]
    fn test_single_night_suffix() {
        let mut b = sample_booking();
        b.nights = Some(1);
        assert!(booking_card_html(&b).contains("(1 night)"));
    }
}
