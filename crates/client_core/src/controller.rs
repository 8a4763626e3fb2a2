//! Pagination/filter state and the command handlers that drive the property list.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Property, PropertyId, PropertyInput},
    protocol::ListQuery,
};
use tracing::{info, warn};

use crate::{
    error::ClientError,
    notify::NotificationCenter,
    render::{render_detail, render_list, DetailView, EditForm, ListView},
    PropertyApi,
};

pub const ITEMS_PER_PAGE: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub location: Option<String>,
    pub max_price: Option<f64>,
    pub min_size: Option<f64>,
}

impl Filters {
    pub fn new(location: Option<String>, max_price: Option<f64>, min_size: Option<f64>) -> Self {
        Self {
            location: location.filter(|value| !value.is_empty()),
            max_price,
            min_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.max_price.is_none() && self.min_size.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub current_page: u32,
    pub items_per_page: u32,
    /// Last value reported by the backend; 0 means no results.
    pub total_pages: u32,
    pub total_elements: u64,
    pub filters: Filters,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 0,
            items_per_page: ITEMS_PER_PAGE,
            total_pages: 0,
            total_elements: 0,
            filters: Filters::default(),
        }
    }
}

impl PageState {
    pub fn can_go_prev(&self) -> bool {
        self.total_pages > 0 && self.current_page > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages - 1
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.current_page,
            size: self.items_per_page,
            location: self.filters.location.clone(),
            price: self.filters.max_price,
            size_property: self.filters.min_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    AtBoundary,
}

/// Blocking confirmation asked before a delete is issued.
#[async_trait]
pub trait ConfirmDelete: Send {
    async fn confirm_delete(&mut self, id: PropertyId) -> bool;
}

#[async_trait]
impl ConfirmDelete for bool {
    async fn confirm_delete(&mut self, _id: PropertyId) -> bool {
        *self
    }
}

/// Edit surface opened by `edit_property`; stays open until an update succeeds or it is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSurface {
    pub form: EditForm,
}

pub struct ListController {
    api: Arc<dyn PropertyApi>,
    state: PageState,
    view: ListView,
    detail: Option<DetailView>,
    edit: Option<EditSurface>,
    notifications: NotificationCenter,
}

impl ListController {
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        Self::with_notifications(api, NotificationCenter::default())
    }

    pub fn with_notifications(
        api: Arc<dyn PropertyApi>,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            api,
            state: PageState::default(),
            view: ListView::default(),
            detail: None,
            edit: None,
            notifications,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn edit_surface(&self) -> Option<&EditSurface> {
        self.edit.as_ref()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn can_go_prev(&self) -> bool {
        self.state.can_go_prev()
    }

    pub fn can_go_next(&self) -> bool {
        self.state.can_go_next()
    }

    /// Fetches the page for the current index and filters. Page counters are
    /// left untouched when the backend answers with an error.
    pub async fn load_page(&mut self) -> Result<(), ClientError> {
        let query = self.state.query();
        match self.api.list_properties(&query).await {
            Ok(page) => {
                self.state.total_pages = page.total_pages;
                self.state.total_elements = page.total_elements;
                self.view = render_list(&page.content, &self.state);
                info!(
                    page = self.state.current_page,
                    total_pages = page.total_pages,
                    total_elements = page.total_elements,
                    items = page.content.len(),
                    "properties: page loaded"
                );
                Ok(())
            }
            Err(err) => {
                warn!(page = query.page, error = %err, "properties: page load failed");
                self.notifications.error("Error getting properties", err.detail());
                Err(err)
            }
        }
    }

    pub async fn apply_filters(
        &mut self,
        location: Option<String>,
        max_price: Option<f64>,
        min_size: Option<f64>,
    ) -> Result<(), ClientError> {
        self.state.filters = Filters::new(location, max_price, min_size);
        self.state.current_page = 0;
        self.load_page().await
    }

    /// Clears every filter. The page index is kept as it was.
    pub async fn clear_filters(&mut self) -> Result<(), ClientError> {
        self.state.filters = Filters::default();
        self.load_page().await
    }

    pub async fn go_to_prev_page(&mut self) -> Result<Navigation, ClientError> {
        if !self.state.can_go_prev() {
            return Ok(Navigation::AtBoundary);
        }
        self.state.current_page -= 1;
        self.load_page().await?;
        Ok(Navigation::Moved)
    }

    pub async fn go_to_next_page(&mut self) -> Result<Navigation, ClientError> {
        if !self.state.can_go_next() {
            return Ok(Navigation::AtBoundary);
        }
        self.state.current_page += 1;
        self.load_page().await?;
        Ok(Navigation::Moved)
    }

    pub async fn create_property(&mut self, input: PropertyInput) -> Result<Property, ClientError> {
        match self.api.create_property(&input).await {
            Ok(created) => {
                info!(property_id = created.id.0, "properties: created");
                self.refresh_after_mutation().await;
                self.notifications.success("Property added successfully!");
                Ok(created)
            }
            Err(err) => {
                self.notifications.error("Error adding property", err.detail());
                Err(err)
            }
        }
    }

    pub async fn update_property(
        &mut self,
        id: PropertyId,
        input: PropertyInput,
    ) -> Result<Property, ClientError> {
        let input = input.with_id(id);
        match self.api.update_property(id, &input).await {
            Ok(updated) => {
                info!(property_id = id.0, "properties: updated");
                self.notifications.success("Property updated successfully!");
                self.refresh_after_mutation().await;
                self.edit = None;
                Ok(updated)
            }
            Err(err) => {
                self.notifications.error("Error updating property", err.detail());
                Err(err)
            }
        }
    }

    /// Submits the open edit surface. Returns `None` when no surface is open.
    pub async fn submit_edit(&mut self) -> Option<Result<Property, ClientError>> {
        let form = self.edit.as_ref()?.form.clone();
        Some(self.update_property(form.id, form.to_input()).await)
    }

    /// Deletes after `confirm` agrees. Returns `Ok(false)` when the user declined.
    pub async fn delete_property(
        &mut self,
        id: PropertyId,
        confirm: &mut dyn ConfirmDelete,
    ) -> Result<bool, ClientError> {
        if !confirm.confirm_delete(id).await {
            return Ok(false);
        }
        match self.api.delete_property(id).await {
            Ok(()) => {
                info!(property_id = id.0, "properties: deleted");
                self.refresh_after_mutation().await;
                self.notifications.success("Property deleted successfully!");
                Ok(true)
            }
            Err(err) => {
                self.notifications.error("Error deleting property", err.detail());
                Err(err)
            }
        }
    }

    pub async fn fetch_property(&self, id: PropertyId) -> Result<Property, ClientError> {
        self.api.get_property(id).await
    }

    pub async fn view_property(&mut self, id: PropertyId) -> Result<&DetailView, ClientError> {
        let property = self.fetch_for_surface(id).await?;
        Ok(self.detail.insert(render_detail(&property)))
    }

    pub async fn edit_property(&mut self, id: PropertyId) -> Result<&EditSurface, ClientError> {
        let property = self.fetch_for_surface(id).await?;
        Ok(self.edit.insert(EditSurface {
            form: EditForm::from(&property),
        }))
    }

    /// Replaces the open edit form's fields, e.g. after the user typed new values.
    pub fn set_edit_form(&mut self, form: EditForm) {
        if let Some(surface) = self.edit.as_mut() {
            surface.form = form;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    async fn fetch_for_surface(&mut self, id: PropertyId) -> Result<Property, ClientError> {
        let result = self.fetch_property(id).await;
        if let Err(err) = &result {
            self.notifications.error("Error getting property", err.detail());
        }
        result
    }

    // A failed refresh already raised its own notification; the mutation itself succeeded.
    async fn refresh_after_mutation(&mut self) {
        let _ = self.load_page().await;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
