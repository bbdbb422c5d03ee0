//! Scripted runs of the terminal wizard over the bundled data.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use hire_core::WizardStep;
use hire_data::{FixtureAddressLookup, FixtureCatalog};
use hire_ui::{CheckoutSession, TerminalWizard};
use pretty_assertions::assert_eq;

fn session() -> CheckoutSession {
    CheckoutSession::new(
        Arc::new(FixtureAddressLookup::bundled().unwrap()),
        Arc::new(FixtureCatalog::bundled().unwrap()),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn photo_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.jpg", std::process::id()));
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    path
}

async fn run_script(
    session: &mut CheckoutSession,
    script: &str,
) -> (Option<String>, String) {
    run_script_on(session, script, today).await
}

async fn run_script_on(
    session: &mut CheckoutSession,
    script: &str,
    clock: impl Fn() -> NaiveDate + 'static,
) -> (Option<String>, String) {
    let mut wizard = TerminalWizard::new(Cursor::new(script.to_string()), Vec::new())
        .with_clock(clock)
        .with_order_number(42);
    let confirmation = wizard.run(session).await.unwrap();
    let output = String::from_utf8(wizard.into_output()).unwrap();
    (confirmation.map(|c| c.reference), output)
}

#[tokio::test]
async fn scripted_checkout_completes() {
    let photo = photo_file("skip-hire-scripted");
    let script = format!(
        "12 High\n1\n1\n1\n1\n{}\n1\n\n\n\ny\n",
        photo.display()
    );
    let mut session = session();

    let (reference, output) = run_script(&mut session, &script).await;

    assert_eq!(reference.as_deref(), Some("SKP-00042"));
    assert!(output.contains("12 High Street, Lowestoft NR32 1AB"));
    assert!(output.contains("Total:       £333.60"));
    assert!(output.contains("Your reference is #SKP-00042"));
    let _ = std::fs::remove_file(photo);
}

#[tokio::test]
async fn end_of_input_quits() {
    let mut session = session();

    let (reference, output) = run_script(&mut session, "").await;

    assert_eq!(reference, None);
    assert!(output.contains("Goodbye."));
}

#[tokio::test]
async fn guard_message_is_shown_and_step_kept() {
    let mut session = session();

    // Choose an address, then continue without ticking any waste type.
    let (_, output) = run_script(&mut session, "Park Row\n2\n\nquit\n").await;

    assert!(output.contains("Cannot continue yet: select at least one waste type."));
    assert_eq!(session.step(), WizardStep::WasteType);
}

#[tokio::test]
async fn back_returns_to_the_address() {
    let mut session = session();

    let (_, output) = run_script(&mut session, "Park Row\n1\nback\nchange\nquit\n").await;

    assert!(output.contains("Delivering to 1 Park Row, Leeds LS1 5AB."));
    assert_eq!(session.step(), WizardStep::Postcode);
    assert!(session.order().selected_address().is_none());
}

#[tokio::test]
async fn unreadable_photo_asks_again() {
    let mut session = session();
    let script = "12 High\n1\n1\n1\n1\n/no/such/photo.jpg\nquit\n";

    let (_, output) = run_script(&mut session, script).await;

    assert!(output.contains("Could not read /no/such/photo.jpg"));
    assert_eq!(session.step(), WizardStep::PermitCheck);
    assert!(session.order().skip_photo().is_none());
}

#[tokio::test]
async fn invalid_choice_shows_the_step_again() {
    let mut session = session();

    let (_, output) = run_script(&mut session, "Park Row\n1\n9\nquit\n").await;

    assert!(output.contains("There is no option 9."));
    assert!(!output.contains("is not completed yet"));
    assert_eq!(session.step(), WizardStep::WasteType);
}

#[tokio::test]
async fn declined_payment_stays_on_payment() {
    let photo = photo_file("skip-hire-declined");
    let script = format!("12 High\n1\n1\n1\n1\n{}\n1\n\n\n\nn\nquit\n", photo.display());
    let mut session = session();

    let (reference, output) = run_script(&mut session, &script).await;

    assert_eq!(reference, None);
    assert!(output.contains("Payment not taken."));
    assert!(!output.contains("is not completed yet"));
    assert_eq!(session.step(), WizardStep::Payment);
    let _ = std::fs::remove_file(photo);
}

#[tokio::test]
async fn date_step_reads_the_clock_on_each_visit() {
    let photo = photo_file("skip-hire-midnight");
    // Date step, then back from payment to the date step.
    let script = format!("12 High\n1\n1\n1\n1\n{}\n1\nback\nquit\n", photo.display());
    let visits = Arc::new(AtomicUsize::new(0));
    let clock = {
        let visits = Arc::clone(&visits);
        move || {
            // Monday on the first visit, Tuesday after midnight.
            let day = if visits.fetch_add(1, Ordering::SeqCst) == 0 { 3 } else { 4 };
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
        }
    };
    let mut session = session();

    let (_, output) = run_script_on(&mut session, &script, clock).await;

    assert_eq!(visits.load(Ordering::SeqCst), 2);
    assert!(output.contains("Earliest delivery: Tuesday 4 June 2024."));
    assert!(output.contains("Earliest delivery: Wednesday 5 June 2024."));
    assert_eq!(session.step(), WizardStep::ChooseDate);
    assert_eq!(session.order().date(), None);
    let _ = std::fs::remove_file(photo);
}

#[tokio::test]
async fn skip_details_show_the_profile() {
    let mut session = session();

    let (_, output) = run_script(&mut session, "12 High\n1\n1\ni 1\nquit\n").await;

    assert!(output.contains("4 Yard Skip (Small)"));
    assert!(output.contains("Size:         5.9ft × 3.3ft × 3.3ft"));
    assert!(output.contains(
        "Suitable for: General waste, Household clearance, Small garden waste, Small DIY projects"
    ));
}

#[tokio::test]
async fn headingley_address_has_no_skips() {
    let mut session = session();

    let (_, output) = run_script(&mut session, "Otley Road\n1\n1\nquit\n").await;

    assert!(output.contains("No skips are available at this address."));
    assert!(!output.contains("[r]etry"));
}
