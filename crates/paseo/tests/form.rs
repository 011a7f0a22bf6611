//! Practice-form suite.
//!
//! Run with `cargo test --test form -- --ignored` on a machine with a
//! chromium install; point `PASEO_FORM_URL` at a local mirror for
//! determinism.

mod common;

use paseo::pages::FormPage;
use paseo::{expect, Browser, NavigationOptions, PaseoResult};

async fn open() -> PaseoResult<(Browser, FormPage)> {
    let (browser, page, config) = common::session().await?;
    let form = FormPage::new(page, &config);
    form.navigate().await?;
    Ok((browser, form))
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn submits_the_form_with_all_valid_details() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_all_fields().await?;
    form.select_date_of_birth("1998", "5", "20").await?;
    form.select_subjects(&["Maths"]).await?;
    form.hobbies_sports.click().await?;
    form.upload_image().await?;
    form.select_state_and_city().await?;
    form.submit().await?;
    form.expect_modal_visible().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn submits_the_form_with_only_required_fields() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.submit().await?;
    form.expect_modal_visible().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn blocks_submission_when_mandatory_fields_are_missing() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.submit().await?;
    expect(&form.modal_title).to_be_hidden().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn blocks_submission_for_invalid_email_formats() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    for email in ["maria@", "maria.example.com", "maria@com"] {
        form.fill_required_fields().await?;
        form.email.fill(email).await?;
        form.submit().await?;
        expect(&form.modal_title).to_be_hidden().await?;
        form.page()
            .reload(&NavigationOptions::dom_content_loaded())
            .await?;
    }
    Ok(())
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn mobile_field_limits_input_to_ten_characters() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.mobile.fill("123456789012345").await?;
    expect(&form.mobile).to_have_value("1234567890").await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn selects_date_of_birth_with_the_picker() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.select_date_of_birth("1998", "5", "20").await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn selects_subjects_with_the_autocomplete() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.select_subjects(&["Computer Science"]).await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn selects_hobbies_and_submits() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.hobbies_sports.click().await?;
    form.submit().await?;
    form.expect_modal_visible().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn uploads_an_image_and_submits() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.upload_image().await?;
    form.submit().await?;
    form.expect_modal_visible().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn selects_state_and_city_with_the_dropdowns() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.select_state_and_city().await?;
    form.submit().await?;
    form.expect_modal_visible().await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn clears_form_data_after_a_reload() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_all_fields().await?;
    form.page()
        .reload(&NavigationOptions::dom_content_loaded())
        .await?;
    expect(&form.first_name).to_have_value("").await
}

#[tokio::test]
#[ignore = "drives a real browser against demoqa.com"]
async fn closes_the_confirmation_modal_after_submission() -> PaseoResult<()> {
    let (_browser, form) = open().await?;
    form.fill_required_fields().await?;
    form.submit().await?;
    form.expect_modal_visible().await?;
    form.close_modal_and_expect_closed().await
}
