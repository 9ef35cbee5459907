// src/store/seed.rs

// Dados iniciais do salão: cardápio fixo, mesas livres e um histórico
// de desperdício/feedback para o dashboard não nascer vazio.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    feedback::{Feedback, PortionFeedback},
    menu::{MenuCategory, MenuItem},
    table::{Table, TableStatus},
    waste::WasteLog,
};

pub const DEFAULT_TABLE_COUNT: u32 = 12;

pub fn tables(count: u32) -> Vec<Table> {
    (1..=count)
        .map(|id| Table { id, status: TableStatus::Free })
        .collect()
}

pub fn menu_items() -> Vec<MenuItem> {
    let item = |id: u32, name: &str, price: i64, category: MenuCategory| MenuItem {
        id,
        name: name.to_string(),
        price: Decimal::new(price, 0),
        category,
    };

    vec![
        item(1, "Paneer Tikka", 250, MenuCategory::Appetizer),
        item(2, "Chicken Biryani", 450, MenuCategory::MainCourse),
        item(3, "Dal Makhani", 300, MenuCategory::MainCourse),
        item(4, "Garlic Naan", 75, MenuCategory::MainCourse),
        item(5, "Gulab Jamun", 150, MenuCategory::Dessert),
        item(6, "Masala Chai", 100, MenuCategory::Beverage),
        item(7, "Veg Pulao", 350, MenuCategory::MainCourse),
        item(8, "Fish Curry", 500, MenuCategory::MainCourse),
    ]
}

pub fn waste_logs() -> Vec<WasteLog> {
    let log = |id: &str, (y, m, d): (i32, u32, u32), menu_item_id: u32, kg: f64, reason: &str| WasteLog {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        menu_item_id,
        wasted_amount_kg: kg,
        reason: reason.to_string(),
    };

    vec![
        log("w1", (2023, 10, 26), 2, 1.0, "Overproduction"),
        log("w2", (2023, 10, 26), 3, 2.0, "Spoilage"),
        log("w3", (2023, 10, 27), 2, 4.0, "Buffet"),
        log("w4", (2023, 10, 28), 7, 5.0, "Plate waste"),
    ]
}

pub fn feedback() -> Vec<Feedback> {
    let fb = |id: &str, table_id: u32, menu_item_id: u32, taste_rating: u8, portion_feedback: PortionFeedback, comment: &str| Feedback {
        id: id.to_string(),
        table_id,
        menu_item_id,
        taste_rating,
        portion_feedback,
        comment: Some(comment.to_string()),
    };

    vec![
        fb("f1", 2, 2, 4, PortionFeedback::Ok, "The biryani was flavorful, but a bit too spicy for my taste."),
        fb("f2", 5, 2, 3, PortionFeedback::TooLarge, "Huge portion! Could easily serve two people."),
        fb("f3", 7, 3, 5, PortionFeedback::Ok, "Dal Makhani was absolutely perfect. Creamy and delicious."),
    ]
}
