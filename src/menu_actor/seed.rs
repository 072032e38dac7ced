use crate::domain::{Category, MenuItemDraft};

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    calories: u32,
    prep_time: u32,
    is_popular: bool,
) -> (String, MenuItemDraft) {
    let draft = MenuItemDraft {
        id: Some(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        image: format!("https://images.aperativo.mx/menu/{}.jpg", id),
        calories: Some(calories),
        prep_time,
        is_popular,
    };
    (id.to_string(), draft)
}

/// Menu written to an empty collection on startup.
pub fn default_menu() -> Vec<(String, MenuItemDraft)> {
    vec![
        dish("1", "Chilaquiles Verdes", "Totopos bañados en salsa verde con pollo, crema y queso.", 45.0, Category::Breakfast, 650, 10, true),
        dish("2", "Molletes", "Bolillo con frijoles, queso gratinado y pico de gallo.", 35.0, Category::Breakfast, 480, 8, false),
        dish("3", "Torta de Milanesa", "Milanesa de res con aguacate, jitomate y jalapeños.", 55.0, Category::Lunch, 820, 12, true),
        dish("4", "Enchiladas Suizas", "Tres enchiladas de pollo gratinadas con arroz.", 60.0, Category::Lunch, 750, 15, false),
        dish("5", "Papas a la Francesa", "Porción mediana con cátsup y salsa.", 25.0, Category::Snacks, 380, 6, false),
        dish("6", "Sándwich de Jamón", "Pan integral, jamón de pavo y queso panela.", 30.0, Category::Snacks, 320, 5, false),
        dish("7", "Agua de Jamaica", "Agua fresca natural de 500 ml.", 15.0, Category::Drinks, 90, 1, true),
        dish("8", "Café Americano", "Café de Colima recién hecho.", 20.0, Category::Drinks, 5, 2, false),
        dish("9", "Ensalada César", "Lechuga, pollo a la plancha, crutones y aderezo.", 50.0, Category::Healthy, 420, 7, false),
        dish("10", "Bowl de Fruta", "Papaya, melón y piña con granola y miel.", 30.0, Category::Healthy, 260, 4, true),
    ]
}
