use tracing::{debug, info, instrument, warn};
use crate::actor_framework::{BatchOp, Query, ResourceClient};
use crate::domain::{browse, Category, MenuItem, MenuItemDraft};
use crate::menu_actor::MenuError;

/// Client for interacting with the MenuItem actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl_client_methods!(MenuClient, MenuItem, MenuError, menu_item);

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Whole menu grouped by category, then by name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MenuItem>, MenuError> {
        debug!("Sending request");
        let query = Query::all().order_by(|a: &MenuItem, b: &MenuItem| {
            (a.category as u8, &a.name).cmp(&(b.category as u8, &b.name))
        });
        Ok(self.inner.query(query).await?)
    }

    #[instrument(skip(self))]
    pub async fn browse(&self, category: Category, search: &str) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.list().await?;
        Ok(browse(&items, category, search).into_iter().cloned().collect())
    }

    /// Creates the item when the draft has no id, otherwise replaces it.
    #[instrument(skip(self, draft), fields(item_name = %draft.name))]
    pub async fn save_item(&self, draft: MenuItemDraft) -> Result<MenuItem, MenuError> {
        let id = match draft.id.clone() {
            Some(id) => {
                let item = self.inner.update(id, draft).await?;
                info!(item_id = %item.id, "Menu item updated");
                return Ok(item);
            }
            None => self.inner.create(draft).await?,
        };
        info!(item_id = %id, "Menu item created");
        self.inner.get(id.clone()).await?.ok_or(MenuError::NotFound(id))
    }

    /// Writes `defaults` in one batch when the menu is empty.
    #[instrument(skip(self, defaults))]
    pub async fn seed_if_empty(&self, defaults: Vec<(String, MenuItemDraft)>) -> Result<usize, MenuError> {
        let existing = self.inner.query(Query::all().limit(1)).await?;
        if !existing.is_empty() {
            debug!("Menu already populated");
            return Ok(0);
        }
        let ops = defaults
            .into_iter()
            .map(|(id, payload)| BatchOp::Insert { id, payload })
            .collect();
        let seeded = self.inner.batch(ops).await?;
        if seeded == 0 {
            warn!("Seeding wrote no menu items");
        }
        info!(seeded, "Menu seeded");
        Ok(seeded)
    }
}
