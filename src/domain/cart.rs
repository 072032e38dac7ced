use serde::{Deserialize, Serialize};
use crate::domain::MenuItem;

/// A menu item in the cart. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
    pub note: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// In-memory shopping cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit, merging with an existing line for the same item.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { item: item.clone(), quantity: 1, note: None }),
        }
    }

    /// Changes a line's quantity by `delta`. Lines that reach zero are removed.
    pub fn update_quantity(&mut self, item_id: &str, delta: i64) {
        for line in self.lines.iter_mut().filter(|line| line.item.id == item_id) {
            let quantity = (i64::from(line.quantity) + delta).max(0);
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn set_note(&mut self, item_id: &str, note: impl Into<String>) {
        let note = note.into();
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.note = if note.trim().is_empty() { None } else { Some(note) };
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
