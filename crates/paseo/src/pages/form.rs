//! Page object for the DemoQA practice form.
//!
//! A plain multi-field form with a few composite widgets (react-datepicker,
//! react-select, an autocomplete) and a confirmation modal on successful
//! submission. Locator fields are public so specs can assert on individual
//! inputs directly.

use crate::assertion::expect;
use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::PaseoResult;
use crate::wait::NavigationOptions;

/// Selector of the picture upload input, used through the CDP file API
const UPLOAD_INPUT: &str = "#uploadPicture";

/// Façade over the practice form surface
#[derive(Debug)]
pub struct FormPage {
    page: Page,
    url: String,
    /// First name input (required)
    pub first_name: Locator,
    /// Last name input (required)
    pub last_name: Locator,
    /// Email input
    pub email: Locator,
    /// Label of the male gender radio (required group)
    pub gender_male: Locator,
    /// Mobile number input (required, exactly 10 digits)
    pub mobile: Locator,
    /// Date-of-birth input that opens the picker
    pub date_of_birth_input: Locator,
    /// Subjects autocomplete input
    pub subjects_input: Locator,
    /// Label of the sports hobby checkbox
    pub hobbies_sports: Locator,
    /// Current address textarea
    pub address: Locator,
    /// State dropdown
    pub state_dropdown: Locator,
    /// City dropdown
    pub city_dropdown: Locator,
    /// Submit button
    pub submit_button: Locator,
    /// Confirmation modal title
    pub modal_title: Locator,
    /// Confirmation modal close button
    pub modal_close_button: Locator,
    /// Confirmation modal container
    pub modal_container: Locator,
}

impl FormPage {
    /// Bind the page object's locators to a page
    #[must_use]
    pub fn new(page: Page, config: &SuiteConfig) -> Self {
        Self {
            first_name: page.locator("#firstName"),
            last_name: page.locator("#lastName"),
            email: page.locator("#userEmail"),
            gender_male: page.locator("label[for='gender-radio-1']"),
            mobile: page.locator("#userNumber"),
            date_of_birth_input: page.locator("#dateOfBirthInput"),
            subjects_input: page.locator("#subjectsInput"),
            hobbies_sports: page.locator("label[for='hobbies-checkbox-1']"),
            address: page.locator("#currentAddress"),
            state_dropdown: page.locator("#state"),
            city_dropdown: page.locator("#city"),
            submit_button: page.locator("#submit"),
            modal_title: page.locator("#example-modal-sizes-title-lg"),
            modal_close_button: page.locator("#closeLargeModal"),
            modal_container: page.locator(".modal-content"),
            url: config.form_url.clone(),
            page,
        }
    }

    /// Underlying page, for reloads in specs
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Load the form and wait for the document to be parsed
    ///
    /// # Errors
    ///
    /// Propagates navigation failures and timeouts.
    pub async fn navigate(&self) -> PaseoResult<()> {
        self.page
            .goto(&self.url, &NavigationOptions::dom_content_loaded())
            .await
    }

    /// Fill the four required fields: first name, last name, gender, and a
    /// 10-digit mobile number
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn fill_required_fields(&self) -> PaseoResult<()> {
        self.first_name.fill("Maria").await?;
        self.last_name.fill("Santos").await?;
        self.gender_male.click().await?;
        self.mobile.fill("9876543210").await
    }

    /// Required fields plus email and address
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn fill_all_fields(&self) -> PaseoResult<()> {
        self.fill_required_fields().await?;
        self.email.fill("maria.santos@example.com").await?;
        self.address.fill("12 Uptown Road, Springfield").await
    }

    /// Drive the date picker: year and month selects, then the day cell
    /// (skipping outside-month duplicates)
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn select_date_of_birth(
        &self,
        year: &str,
        month_index: &str,
        day: &str,
    ) -> PaseoResult<()> {
        self.date_of_birth_input.click().await?;
        self.page
            .locator(".react-datepicker__year-select")
            .select_option(year)
            .await?;
        self.page
            .locator(".react-datepicker__month-select")
            .select_option(month_index)
            .await?;
        self.page
            .locator(format!(
                ".react-datepicker__day--0{day}:not(.react-datepicker__day--outside-month)"
            ))
            .first()
            .click()
            .await
    }

    /// Add subjects through the autocomplete, committing each with Enter
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn select_subjects(&self, subjects: &[&str]) -> PaseoResult<()> {
        for subject in subjects {
            self.subjects_input.fill(subject).await?;
            self.subjects_input.press("Enter").await?;
        }
        Ok(())
    }

    /// Pick the first state and first city from the dependent dropdowns
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn select_state_and_city(&self) -> PaseoResult<()> {
        self.state_dropdown.click().await?;
        self.page.locator("#react-select-3-option-0").click().await?;
        self.city_dropdown.click().await?;
        self.page.locator("#react-select-4-option-0").click().await
    }

    /// Populate the picture upload from an in-memory placeholder
    ///
    /// # Errors
    ///
    /// Propagates file and CDP failures.
    pub async fn upload_image(&self) -> PaseoResult<()> {
        self.page
            .set_input_files(UPLOAD_INPUT, "profile.png", b"dummy-image-content")
            .await
    }

    /// Submit the form
    ///
    /// # Errors
    ///
    /// Propagates interaction failures.
    pub async fn submit(&self) -> PaseoResult<()> {
        self.submit_button.scroll_into_view().await?;
        self.submit_button.click().await
    }

    /// Assert the confirmation modal is shown
    ///
    /// # Errors
    ///
    /// Returns `Assertion` when the modal never appears.
    pub async fn expect_modal_visible(&self) -> PaseoResult<()> {
        expect(&self.modal_title).to_be_visible().await
    }

    /// Close the confirmation modal and assert the form is interactable
    /// again
    ///
    /// # Errors
    ///
    /// Propagates interaction and assertion failures.
    pub async fn close_modal_and_expect_closed(&self) -> PaseoResult<()> {
        self.modal_close_button.scroll_into_view().await?;
        self.modal_close_button.click().await?;
        expect(&self.submit_button).to_be_visible().await?;
        expect(&self.submit_button).to_be_enabled().await
    }
}
