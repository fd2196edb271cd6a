use crate::models::Order;

pub fn format_rubles(amount: f64) -> String {
  format!("{amount} руб.")
}

/// Plain-text order card shown to admins.
pub fn render_order(order: &Order) -> String {
  format!("📦 Новый заказ!\n\n{}", render_order_details(order))
}

/// Order fields without a header, shared by the admin and courier cards.
pub fn render_order_details(order: &Order) -> String {
  format!(
    "{}\n\n📍 Адрес: {}\n💰 Итого: {}\n🕒 Время: {}",
    order.items,
    order.address,
    format_rubles(order.total),
    order.timestamp
  )
}
