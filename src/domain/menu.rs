use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu sections. `All` is only meaningful when browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Breakfast,
    Lunch,
    Snacks,
    Drinks,
    Healthy,
}

impl Category {
    pub const BROWSABLE: [Category; 6] = [
        Category::All,
        Category::Breakfast,
        Category::Lunch,
        Category::Snacks,
        Category::Drinks,
        Category::Healthy,
    ];

    pub fn includes(self, other: Category) -> bool {
        self == Category::All || self == other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::All => "Todos",
            Category::Breakfast => "Desayuno",
            Category::Lunch => "Comida",
            Category::Snacks => "Snacks",
            Category::Drinks => "Bebidas",
            Category::Healthy => "Saludable",
        };
        f.write_str(label)
    }
}

/// A dish offered by the cafeteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub image: String,
    pub calories: Option<u32>,
    /// Minutes.
    pub prep_time: u32,
    pub is_popular: bool,
}

/// Fields of a menu item as edited by staff. Also the creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub image: String,
    pub calories: Option<u32>,
    pub prep_time: u32,
    pub is_popular: bool,
}

impl Default for MenuItemDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: 0.0,
            category: Category::Lunch,
            image: String::new(),
            calories: Some(0),
            prep_time: 5,
            is_popular: false,
        }
    }
}

impl From<&MenuItem> for MenuItemDraft {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: item.category,
            image: item.image.clone(),
            calories: item.calories,
            prep_time: item.prep_time,
            is_popular: item.is_popular,
        }
    }
}

impl MenuItem {
    /// Case-insensitive match on name or description.
    pub fn matches_search(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Browsing filter: category plus free-text search.
pub fn browse<'a>(items: &'a [MenuItem], category: Category, search: &str) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| category.includes(item.category) && item.matches_search(search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: &str, category: Category) -> MenuItem {
        MenuItem {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: description.to_string(),
            price: 30.0,
            category,
            image: String::new(),
            calories: None,
            prep_time: 5,
            is_popular: false,
        }
    }

    #[test]
    fn browse_filters_by_category_and_search() {
        let items = vec![
            item("Chilaquiles", "Verdes con pollo", Category::Breakfast),
            item("Torta", "De jamón", Category::Lunch),
            item("Agua de Jamaica", "Natural", Category::Drinks),
        ];

        assert_eq!(browse(&items, Category::All, "").len(), 3);
        assert_eq!(browse(&items, Category::Lunch, "").len(), 1);
        let found = browse(&items, Category::All, "JAMÓN");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Torta");
        assert!(browse(&items, Category::Drinks, "pollo").is_empty());
    }
}
