//! Line-based front end that walks a [`CheckoutSession`] through the six
//! steps. At any prompt `back` returns to the previous step, `step N`
//! reopens a completed step and `quit` leaves without ordering.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use hire_core::calculations::{PERMIT_FEE, PERMIT_LEAD_WORKING_DAYS, PriceBreakdown, format_gbp};
use hire_core::search::MIN_QUERY_CHARS;
use hire_core::{
    CatalogStatus, HeavyWasteType, OrderConfirmation, PaymentDetails, SkipPhoto, SkipPlacement,
    SkipSort, WasteType, WizardStep,
};
use tracing::{info, warn};

use crate::session::CheckoutSession;
use crate::utils::{long_date, parse_choice, parse_choices, parse_date, short_date};

/// What the customer typed at a prompt.
enum Reply {
    Text(String),
    Back,
    Jump(WizardStep),
    Quit,
}

/// How a step handler finished.
enum Flow {
    Next,
    /// Show the current step again.
    Stay,
    Back,
    Jump(WizardStep),
    Quit,
    Done,
}

/// Unwraps a text reply or returns the navigation it asked for.
macro_rules! text_or_return {
    ($reply:expr) => {
        match $reply {
            Reply::Text(text) => text,
            Reply::Back => return Ok(Flow::Back),
            Reply::Jump(step) => return Ok(Flow::Jump(step)),
            Reply::Quit => return Ok(Flow::Quit),
        }
    };
}

/// Today's date. Read each time the date step is shown.
pub type Clock = Box<dyn Fn() -> NaiveDate>;

pub struct TerminalWizard<R, W> {
    input: R,
    out: W,
    clock: Clock,
    order_number: u32,
}

impl<R: BufRead, W: Write> TerminalWizard<R, W> {
    /// A wizard that reads the local wall clock.
    pub fn new(
        input: R,
        out: W,
    ) -> Self {
        Self {
            input,
            out,
            clock: Box::new(|| Local::now().date_naive()),
            order_number: 1,
        }
    }

    pub fn with_clock(
        mut self,
        clock: impl Fn() -> NaiveDate + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_order_number(
        mut self,
        order_number: u32,
    ) -> Self {
        self.order_number = order_number;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the order is paid for or the customer quits.
    pub async fn run(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Option<OrderConfirmation>> {
        writeln!(self.out, "Skip hire checkout. Type 'back', 'step N' or 'quit' at any prompt.")?;
        loop {
            self.print_progress(session)?;
            let flow = match session.step() {
                WizardStep::Postcode => self.postcode_step(session).await?,
                WizardStep::WasteType => self.waste_step(session)?,
                WizardStep::SelectSkip => self.skip_step(session).await?,
                WizardStep::PermitCheck => self.permit_step(session)?,
                WizardStep::ChooseDate => self.date_step(session)?,
                WizardStep::Payment => self.payment_step(session)?,
            };
            match flow {
                Flow::Next => {
                    if let Err(failure) = session.advance() {
                        writeln!(self.out, "Cannot continue yet: {failure}.")?;
                    }
                }
                Flow::Back => {
                    if session.step() == WizardStep::FIRST {
                        writeln!(self.out, "This is the first step.")?;
                    }
                    session.back();
                }
                Flow::Stay => {}
                Flow::Jump(step) => {
                    if !session.jump_to(step) {
                        writeln!(self.out, "Step {} is not completed yet.", step.number())?;
                    }
                }
                Flow::Quit => {
                    info!("checkout abandoned");
                    writeln!(self.out, "Goodbye.")?;
                    return Ok(None);
                }
                Flow::Done => return Ok(session.confirmation().cloned()),
            }
        }
    }

    fn print_progress(
        &mut self,
        session: &CheckoutSession,
    ) -> Result<()> {
        let bar: Vec<String> = WizardStep::all()
            .iter()
            .map(|step| {
                let mark = if *step == session.step() {
                    '>'
                } else if session.order().is_completed(*step) {
                    '*'
                } else {
                    ' '
                };
                format!("[{mark}{}]", step.number())
            })
            .collect();
        writeln!(self.out)?;
        writeln!(self.out, "{}  {}", bar.join(" "), session.step())?;
        Ok(())
    }

    /// Reads one line. End of input counts as `quit`.
    fn prompt(
        &mut self,
        label: &str,
    ) -> Result<Reply> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading input")? == 0 {
            return Ok(Reply::Quit);
        }
        let line = line.trim().to_string();
        let lower = line.to_lowercase();
        if lower == "back" {
            return Ok(Reply::Back);
        }
        if lower == "quit" || lower == "exit" {
            return Ok(Reply::Quit);
        }
        if let Some(n) = lower.strip_prefix("step ") {
            if let Some(step) = n.trim().parse().ok().and_then(WizardStep::from_number) {
                return Ok(Reply::Jump(step));
            }
        }
        Ok(Reply::Text(line))
    }

    /// Blocking error panel. Returns true to retry, false to go back.
    fn error_panel(
        &mut self,
        message: &str,
    ) -> Result<Option<bool>> {
        writeln!(self.out, "!! {message}")?;
        loop {
            match self.prompt("[r]etry or [b]ack")? {
                Reply::Text(t) if t.eq_ignore_ascii_case("r") => return Ok(Some(true)),
                Reply::Text(t) if t.eq_ignore_ascii_case("b") => return Ok(Some(false)),
                Reply::Back => return Ok(Some(false)),
                Reply::Quit => return Ok(None),
                _ => continue,
            }
        }
    }

    async fn postcode_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        if let Some(address) = session.order().selected_address() {
            let full = address.full_address.clone();
            writeln!(self.out, "Delivering to {full}.")?;
            let reply = text_or_return!(self.prompt("Enter to continue, or 'change'")?);
            if !reply.eq_ignore_ascii_case("change") {
                return Ok(Flow::Next);
            }
            session.clear_address();
        }

        loop {
            let query = text_or_return!(self.prompt("Search for your address")?);
            session.type_query(query, Instant::now());
            if let Some(wait) = session.search().time_until_due(Instant::now()) {
                tokio::time::sleep(wait).await;
            }

            match session.search_now(Instant::now()).await {
                None => {
                    writeln!(self.out, "Type at least {MIN_QUERY_CHARS} characters.")?;
                }
                Some(Err(err)) => match self.error_panel(&format!("Address search failed: {err}"))? {
                    Some(true) => continue,
                    Some(false) => return Ok(Flow::Back),
                    None => return Ok(Flow::Quit),
                },
                Some(Ok(0)) => {
                    writeln!(self.out, "No addresses found. Try a postcode or street.")?;
                }
                Some(Ok(_)) => {
                    for (i, candidate) in session.search().results().iter().enumerate() {
                        writeln!(self.out, "  {}. {}", i + 1, candidate.label())?;
                    }
                    let choice = text_or_return!(self.prompt("Choose an address (Enter to search again)")?);
                    if choice.is_empty() {
                        continue;
                    }
                    match parse_choice(&choice).map(|i| session.choose_address(i)) {
                        Ok(Ok(())) => return Ok(Flow::Next),
                        Ok(Err(err)) => writeln!(self.out, "{err}.")?,
                        Err(err) => writeln!(self.out, "{err}.")?,
                    }
                }
            }
        }
    }

    fn waste_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        for (i, waste) in WasteType::all().iter().enumerate() {
            let mark = if session.order().waste_types().contains(waste) { "x" } else { " " };
            writeln!(self.out, "  [{mark}] {}. {} - {}", i + 1, waste.name(), waste.description())?;
        }
        let keep = !session.order().waste_types().is_empty();
        let label = if keep {
            "Waste types, e.g. 1,3 (Enter keeps the ticked ones)"
        } else {
            "Waste types, e.g. 1,3"
        };
        let reply = text_or_return!(self.prompt(label)?);
        if !(reply.is_empty() && keep) {
            match indices_to(&reply, WasteType::all()) {
                Ok(types) => session.set_waste_types(types),
                Err(message) => {
                    writeln!(self.out, "{message}")?;
                    return Ok(Flow::Stay);
                }
            }
        }

        if session.order().needs_heavy_waste_declaration() {
            writeln!(self.out, "Construction and garden waste may include heavy materials:")?;
            for (i, heavy) in HeavyWasteType::all().iter().enumerate() {
                writeln!(self.out, "  {}. {} - {}", i + 1, heavy.name(), heavy.description())?;
            }
            let reply = text_or_return!(self.prompt("Which heavy waste types are included")?);
            match indices_to(&reply, HeavyWasteType::all()) {
                Ok(types) => {
                    if let Err(err) = session.set_heavy_waste_types(types) {
                        writeln!(self.out, "{err}.")?;
                    }
                }
                Err(message) => writeln!(self.out, "{message}")?,
            }
        }
        Ok(Flow::Next)
    }

    async fn skip_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        let mut status = session.load_catalog().await.clone();
        loop {
            match status {
                CatalogStatus::Ready => break,
                CatalogStatus::Empty => {
                    writeln!(self.out, "No skips are available at this address.")?;
                    return Ok(Flow::Back);
                }
                CatalogStatus::Failed(message) => {
                    match self.error_panel(&format!("Could not load skips: {message}"))? {
                        Some(true) => {
                            if let Some(pending) = session.reload_catalog() {
                                let response = pending.run().await;
                                session.apply_catalog(response);
                            }
                            status = session.catalog().status().clone();
                        }
                        Some(false) => return Ok(Flow::Back),
                        None => return Ok(Flow::Quit),
                    }
                }
                CatalogStatus::Idle | CatalogStatus::Loading => {
                    writeln!(self.out, "Choose a delivery address first.")?;
                    return Ok(Flow::Jump(WizardStep::Postcode));
                }
            }
        }

        loop {
            let placement = session.order().skip_location();
            let heavy = !session.order().heavy_waste_types().is_empty();
            let skips = session.catalog().skips();
            writeln!(self.out, "{} skips, sorted by {}:", skips.len(), session.catalog().sort())?;
            for (i, skip) in skips.iter().enumerate() {
                let price = PriceBreakdown::calculate(skip.price_before_vat, false);
                let notes: Vec<String> = skip
                    .restrictions(placement, heavy)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                let chosen = session.order().selected_skip().is_some_and(|s| s.id == skip.id);
                let profile = skip.profile();
                writeln!(
                    self.out,
                    "  {}{}. {:<16} {:<6} {:>2} day hire  {:>9} inc VAT  {}",
                    if chosen { "*" } else { " " },
                    i + 1,
                    profile.name,
                    profile.size_label.to_string(),
                    skip.hire_period_days,
                    format_gbp(price.total),
                    notes.join("; ")
                )?;
            }

            let reply = text_or_return!(self.prompt("Choose a skip, 'i N' for details, or 's' to sort")?);
            if reply.is_empty() && session.order().selected_skip().is_some() {
                return Ok(Flow::Next);
            }
            if let Some(n) = reply.strip_prefix("i ").or_else(|| reply.strip_prefix("I ")) {
                match parse_choice(n).ok().and_then(|i| skips.get(i)) {
                    Some(skip) => {
                        let profile = skip.profile();
                        writeln!(self.out, "{} ({})", profile.name, profile.size_label)?;
                        writeln!(self.out, "  Size:         {}", profile.dimensions)?;
                        writeln!(self.out, "  {}", profile.description)?;
                        writeln!(self.out, "  Suitable for: {}", profile.suitable_for.join(", "))?;
                    }
                    None => writeln!(self.out, "There is no skip {}.", n.trim())?,
                }
                continue;
            }
            if reply.eq_ignore_ascii_case("s") {
                for (i, sort) in SkipSort::all().iter().enumerate() {
                    writeln!(self.out, "  {}. {}", i + 1, sort)?;
                }
                let choice = text_or_return!(self.prompt("Sort by")?);
                match parse_choice(&choice).ok().and_then(|i| SkipSort::all().get(i)) {
                    Some(sort) => session.set_sort(*sort),
                    None => writeln!(self.out, "Unknown sort order.")?,
                }
                continue;
            }
            match parse_choice(&reply).map(|i| session.choose_skip(i)) {
                Ok(Ok(())) => return Ok(Flow::Next),
                Ok(Err(err)) => writeln!(self.out, "{err}.")?,
                Err(err) => writeln!(self.out, "{err}.")?,
            }
        }
    }

    fn permit_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        let placements = [SkipPlacement::Private, SkipPlacement::Public];
        for (i, placement) in placements.iter().enumerate() {
            writeln!(self.out, "  {}. {} - {}", i + 1, placement.title(), placement.info())?;
        }
        let current = session.order().skip_location();
        let reply = text_or_return!(self.prompt(&format!("Where will the skip stand (Enter for {})", current.title()))?);
        if !reply.is_empty() {
            match parse_choice(&reply).ok().and_then(|i| placements.get(i)) {
                Some(placement) => session.set_placement(*placement),
                None => {
                    writeln!(self.out, "Choose 1 or 2.")?;
                    return Ok(Flow::Stay);
                }
            }
        }
        if session.order().permit_required() {
            writeln!(
                self.out,
                "A council permit is needed: {} is added and delivery moves out by {} working days.",
                format_gbp(PERMIT_FEE),
                PERMIT_LEAD_WORKING_DAYS
            )?;
        }

        loop {
            let label = if session.order().skip_photo().is_some() {
                "Path to a photo of the placement (Enter keeps the current one)"
            } else {
                "Path to a photo of the placement (jpg, png or webp)"
            };
            let path = text_or_return!(self.prompt(label)?);
            if path.is_empty() {
                if session.order().skip_photo().is_some() {
                    return Ok(Flow::Next);
                }
                writeln!(self.out, "A photo is required.")?;
                continue;
            }
            let path = Path::new(&path);
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "photo could not be read");
                    writeln!(
                        self.out,
                        "Could not read {}: {err}. Save the photo to a file and give its path.",
                        path.display()
                    )?;
                    continue;
                }
            };
            match SkipPhoto::from_upload(path, bytes) {
                Ok(photo) => {
                    session.attach_photo(photo);
                    return Ok(Flow::Next);
                }
                Err(err) => writeln!(self.out, "{err}.")?,
            }
        }
    }

    fn date_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        let today = (self.clock)();
        let options = session.delivery_options(today);
        if let Some(minimum) = session.order().minimum_date() {
            writeln!(self.out, "Earliest delivery: {}.", long_date(minimum))?;
        }
        for (i, date) in options.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, short_date(*date))?;
        }
        let keep = session.order().date();
        let label = match keep {
            Some(date) => format!("Choose a date or type YYYY-MM-DD (Enter keeps {})", short_date(date)),
            None => "Choose a date or type YYYY-MM-DD".to_string(),
        };

        loop {
            let reply = text_or_return!(self.prompt(&label)?);
            if reply.is_empty() && keep.is_some() {
                return Ok(Flow::Next);
            }
            let date = match parse_choice(&reply).ok().and_then(|i| options.get(i).copied()) {
                Some(date) => date,
                None => match parse_date(&reply) {
                    Ok(date) => date,
                    Err(err) => {
                        writeln!(self.out, "{err}.")?;
                        continue;
                    }
                },
            };
            match session.choose_date(date, today) {
                Ok(()) => {
                    if let Some(collection) = session.order().collection_date() {
                        writeln!(
                            self.out,
                            "Delivery {}, collection {}.",
                            long_date(date),
                            long_date(collection)
                        )?;
                    }
                    return Ok(Flow::Next);
                }
                Err(err) => writeln!(self.out, "{err}.")?,
            }
        }
    }

    fn payment_step(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<Flow> {
        let order = session.order();
        let (Some(skip), Some(price), Some(delivery), Some(collection)) = (
            order.selected_skip(),
            order.price(),
            order.date(),
            order.collection_date(),
        ) else {
            writeln!(self.out, "The order is incomplete.")?;
            return Ok(Flow::Back);
        };
        writeln!(self.out, "Address:     {}", order.address())?;
        writeln!(self.out, "Skip:        {} ({} day hire)", skip.display_name(), skip.hire_period_days)?;
        writeln!(self.out, "Delivery:    {}", long_date(delivery))?;
        writeln!(self.out, "Collection:  {}", long_date(collection))?;
        writeln!(self.out, "Subtotal:    {}", format_gbp(price.subtotal))?;
        writeln!(self.out, "VAT (20%):   {}", format_gbp(price.vat))?;
        if price.permit_fee > rust_decimal::Decimal::ZERO {
            writeln!(self.out, "Permit fee:  {}", format_gbp(price.permit_fee))?;
        }
        writeln!(self.out, "Total:       {}", format_gbp(price.total))?;

        let mut details = PaymentDetails::default();
        let card = text_or_return!(self.prompt(&format!("Card number (Enter for {})", details.card_number))?);
        if !card.is_empty() {
            details.card_number = card;
        }
        let expiry = text_or_return!(self.prompt(&format!("Expiry (Enter for {})", details.expiry))?);
        if !expiry.is_empty() {
            details.expiry = expiry;
        }
        let cvc = text_or_return!(self.prompt("CVC (Enter for the test code)")?);
        if !cvc.is_empty() {
            details.cvc = cvc;
        }

        let confirm = text_or_return!(self.prompt(&format!("Pay {} now? [y/N]", format_gbp(price.total)))?);
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(self.out, "Payment not taken.")?;
            return Ok(Flow::Stay);
        }

        match session.submit_payment(&details, self.order_number) {
            Ok(confirmation) => {
                let reference = confirmation.reference.clone();
                writeln!(self.out, "Order confirmed. Your reference is #{reference}.")?;
                Ok(Flow::Done)
            }
            Err(err) => {
                writeln!(self.out, "{err}.")?;
                Ok(Flow::Back)
            }
        }
    }
}

/// Maps 1-based choices onto `options`.
fn indices_to<T: Copy>(
    reply: &str,
    options: &[T],
) -> Result<Vec<T>, String> {
    parse_choices(reply)
        .map_err(|e| format!("{e}."))?
        .into_iter()
        .map(|i| {
            options
                .get(i)
                .copied()
                .ok_or_else(|| format!("There is no option {}.", i + 1))
        })
        .collect()
}
