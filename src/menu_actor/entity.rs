use crate::actor_framework::Entity;
use crate::domain::{Category, MenuItem, MenuItemDraft};
use super::error::MenuError;

impl Entity for MenuItem {
    type Id = String;
    type CreatePayload = MenuItemDraft;
    type Patch = MenuItemDraft;
    type Action = ();
    type ActionResult = ();
    type Error = MenuError;

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, draft: MenuItemDraft) -> Result<Self, MenuError> {
        validate(&draft)?;
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image: draft.image,
            calories: draft.calories,
            prep_time: draft.prep_time,
            is_popular: draft.is_popular,
        })
    }

    /// Replaces every editable field. The id is fixed.
    fn on_update(&mut self, draft: MenuItemDraft) -> Result<(), MenuError> {
        validate(&draft)?;
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.category = draft.category;
        self.image = draft.image;
        self.calories = draft.calories;
        self.prep_time = draft.prep_time;
        self.is_popular = draft.is_popular;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), MenuError> {
        Ok(())
    }
}

fn validate(draft: &MenuItemDraft) -> Result<(), MenuError> {
    if draft.name.trim().is_empty() {
        return Err(MenuError::ValidationError("Name is required".to_string()));
    }
    if draft.price <= 0.0 || !draft.price.is_finite() {
        return Err(MenuError::ValidationError(format!("Invalid price: {}", draft.price)));
    }
    if draft.category == Category::All {
        return Err(MenuError::ValidationError("Category 'All' cannot hold items".to_string()));
    }
    Ok(())
}
