//! Page object for the TodoMVC demo.
//!
//! Locator fields are public so specs can assert on the input, the counter
//! and the toggle-all checkbox directly, mirroring how the suite reads the
//! page.

use crate::assertion::expect;
use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::PaseoResult;
use crate::wait::NavigationOptions;

/// Façade over the TodoMVC surface
#[derive(Debug)]
pub struct TodoPage {
    page: Page,
    url: String,
    /// New-todo input
    pub todo_input: Locator,
    /// All rendered list items
    pub todo_list_items: Locator,
    /// "N items left" counter
    pub items_left_label: Locator,
    /// Clear-completed button (rendered only when something is completed)
    pub clear_completed_button: Locator,
    /// Toggle-all checkbox
    pub toggle_all_button: Locator,
    /// Main section (hidden while the list is empty)
    pub main_container: Locator,
    /// Footer (hidden while the list is empty)
    pub footer_container: Locator,
    /// "All" filter link
    pub all_filter_link: Locator,
    /// "Active" filter link
    pub active_filter_link: Locator,
    /// "Completed" filter link
    pub completed_filter_link: Locator,
}

impl TodoPage {
    /// Bind the page object's locators to a page
    #[must_use]
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            todo_input: page.locator(".new-todo"),
            todo_list_items: page.locator(".todo-list li"),
            items_left_label: page.locator(".todo-count"),
            clear_completed_button: page.locator(".clear-completed"),
            toggle_all_button: page.locator(".toggle-all"),
            main_container: page.locator(".main"),
            footer_container: page.locator(".footer"),
            all_filter_link: page.locator("a[href=\"#/\"]"),
            active_filter_link: page.locator("a[href=\"#/active\"]"),
            completed_filter_link: page.locator("a[href=\"#/completed\"]"),
            url: config.todo_url.clone(),
            page,
        }
    }

    /// Underlying page, for reloads in specs
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Load the app
    ///
    /// # Errors
    ///
    /// Propagates navigation failures and timeouts.
    pub async fn goto(&self) -> PaseoResult<()> {
        self.page.goto(&self.url, &NavigationOptions::new()).await
    }

    /// Type a todo into the input and commit with Enter
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn add_todo(&self, text: &str) -> PaseoResult<()> {
        self.todo_input.fill(text).await?;
        self.todo_input.press("Enter").await
    }

    /// Add several todos in order
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn add_todos(&self, texts: &[&str]) -> PaseoResult<()> {
        for text in texts {
            self.add_todo(text).await?;
        }
        Ok(())
    }

    /// Locator for the item at `index`
    #[must_use]
    pub fn todo_item(&self, index: usize) -> Locator {
        self.todo_list_items.nth(index)
    }

    /// Locator for items whose text contains `text`
    #[must_use]
    pub fn todo_item_by_text(&self, text: &str) -> Locator {
        self.todo_list_items.has_text(text)
    }

    /// Mark the item at `index` as completed
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn toggle_complete(&self, index: usize) -> PaseoResult<()> {
        self.todo_item(index).locator(".toggle").check().await
    }

    /// Clear the completed state of the item at `index`
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn toggle_incomplete(&self, index: usize) -> PaseoResult<()> {
        self.todo_item(index).locator(".toggle").uncheck().await
    }

    /// Delete the item at `index` via its hover-revealed destroy button
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn delete_todo(&self, index: usize) -> PaseoResult<()> {
        let todo = self.todo_item(index);
        todo.hover().await?;
        todo.locator(".destroy").click().await
    }

    /// Rewrite the item at `index`, committing with Enter
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn edit_todo(&self, index: usize, new_text: &str) -> PaseoResult<()> {
        let todo = self.todo_item(index);
        todo.dblclick().await?;
        let edit_input = todo.locator(".edit");
        edit_input.fill(new_text).await?;
        edit_input.press("Enter").await
    }

    /// Open the item at `index` for editing, then abandon with Escape
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn cancel_edit(&self, index: usize) -> PaseoResult<()> {
        let todo = self.todo_item(index);
        todo.dblclick().await?;
        todo.locator(".edit").press("Escape").await
    }

    /// Remove all completed items
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn clear_completed(&self) -> PaseoResult<()> {
        self.clear_completed_button.click().await
    }

    /// Mark every item completed
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn toggle_all(&self) -> PaseoResult<()> {
        self.toggle_all_button.check().await
    }

    /// Clear the completed state of every item
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn untoggle_all(&self) -> PaseoResult<()> {
        self.toggle_all_button.uncheck().await
    }

    /// Show all items
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn filter_by_all(&self) -> PaseoResult<()> {
        self.all_filter_link.click().await
    }

    /// Show only active items
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn filter_by_active(&self) -> PaseoResult<()> {
        self.active_filter_link.click().await
    }

    /// Show only completed items
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn filter_by_completed(&self) -> PaseoResult<()> {
        self.completed_filter_link.click().await
    }

    /// Number of rendered items under the current filter
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures.
    pub async fn todo_count(&self) -> PaseoResult<usize> {
        self.todo_list_items.count().await
    }

    /// Raw text of the "items left" counter
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn active_todo_count(&self) -> PaseoResult<String> {
        self.items_left_label.text_content().await
    }

    /// Whether the item at `index` is checked off
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn is_todo_completed(&self, index: usize) -> PaseoResult<bool> {
        self.todo_item(index).locator(".toggle").is_checked().await
    }

    /// Label text of the item at `index`
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub async fn todo_text(&self, index: usize) -> PaseoResult<String> {
        self.todo_item(index).locator("label").text_content().await
    }

    /// Assert the rendered item count
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the count never matches.
    pub async fn verify_todo_count(&self, count: usize) -> PaseoResult<()> {
        expect(&self.todo_list_items).to_have_count(count).await
    }

    /// Assert the label text of the item at `index`
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the text never matches.
    pub async fn verify_todo_text(&self, index: usize, text: &str) -> PaseoResult<()> {
        expect(&self.todo_item(index).locator("label"))
            .to_have_text(text)
            .await
    }

    /// Assert the item at `index` is rendered completed
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the class never appears.
    pub async fn verify_todo_completed(&self, index: usize) -> PaseoResult<()> {
        expect(&self.todo_item(index)).to_have_class("completed").await
    }

    /// Assert the item at `index` is not rendered completed
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the class never clears.
    pub async fn verify_todo_not_completed(&self, index: usize) -> PaseoResult<()> {
        expect(&self.todo_item(index))
            .to_not_have_class("completed")
            .await
    }

    /// Assert the main section is visible
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_main_section_visible(&self) -> PaseoResult<()> {
        expect(&self.main_container).to_be_visible().await
    }

    /// Assert the main section is hidden
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_main_section_hidden(&self) -> PaseoResult<()> {
        expect(&self.main_container).to_be_hidden().await
    }

    /// Assert the footer is visible
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_footer_visible(&self) -> PaseoResult<()> {
        expect(&self.footer_container).to_be_visible().await
    }

    /// Assert the footer is hidden
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_footer_hidden(&self) -> PaseoResult<()> {
        expect(&self.footer_container).to_be_hidden().await
    }

    /// Assert the clear-completed button is visible
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_clear_completed_visible(&self) -> PaseoResult<()> {
        expect(&self.clear_completed_button).to_be_visible().await
    }

    /// Assert the clear-completed button is hidden
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_clear_completed_hidden(&self) -> PaseoResult<()> {
        expect(&self.clear_completed_button).to_be_hidden().await
    }

    /// Assert the "All" filter is highlighted
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_all_filter_selected(&self) -> PaseoResult<()> {
        expect(&self.all_filter_link).to_have_class("selected").await
    }

    /// Assert the "Active" filter is highlighted
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_active_filter_selected(&self) -> PaseoResult<()> {
        expect(&self.active_filter_link).to_have_class("selected").await
    }

    /// Assert the "Completed" filter is highlighted
    ///
    /// # Errors
    ///
    /// Returns `Assertion` on mismatch.
    pub async fn verify_completed_filter_selected(&self) -> PaseoResult<()> {
        expect(&self.completed_filter_link)
            .to_have_class("selected")
            .await
    }
}
