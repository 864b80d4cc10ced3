use log::warn;

use super::booking::{BookingConfirmation, Slot};

/// Shown when the book action fires with a missing slot, name or email.
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields.";

/// Furthest stage the wizard has reached. Panels accumulate up to the form
/// step; confirmation replaces everything and is terminal for the session
/// (starting over takes a full reload).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Date,
    Slots,
    Form,
    Confirm,
}

/// State machine behind the booking wizard. Owns every piece of wizard state
/// so transitions can be driven and asserted without a document; the Leptos
/// component keeps one of these in a signal and renders from it.
///
/// Availability responses carry the sequence number handed out by
/// [`BookingFlow::begin_availability`]; anything but the latest number is
/// dropped, so a slow fetch can never overwrite the slots of a newer date.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: Step,
    date: String,
    identity_missing: bool,
    error: Option<String>,
    owner_email: Option<String>,
    loading: bool,
    loaded: bool,
    slots: Vec<Slot>,
    selected: Option<Slot>,
    submitting: bool,
    confirmation: Option<BookingConfirmation>,
    fetch_seq: u64,
}

impl BookingFlow {
    pub fn new(date: String) -> Self {
        Self {
            step: Step::Date,
            date,
            identity_missing: false,
            error: None,
            owner_email: None,
            loading: false,
            loaded: false,
            slots: Vec::new(),
            selected: None,
            submitting: false,
            confirmation: None,
            fetch_seq: 0,
        }
    }

    /// Wizard for a page whose URL resolved no identity: the date picker is
    /// disabled, the hint stays up as the error, and no fetch ever runs.
    pub fn missing_identity(date: String, hint: &str) -> Self {
        let mut flow = Self::new(date);
        flow.identity_missing = true;
        flow.error = Some(hint.to_string());
        flow
    }

    // --- transitions --------------------------------------------------------

    /// Date picked: reveal the slots panel, clear everything downstream of it
    /// and mark a fresh fetch. Returns the sequence number the response must
    /// echo back, or None once the wizard is confirmed, so no fetch is ever
    /// issued for a finished session.
    pub fn begin_availability(&mut self, date: &str) -> Option<u64> {
        if self.step == Step::Confirm {
            return None;
        }
        self.error = None;
        self.step = Step::Slots;
        self.date = date.to_string();
        self.slots.clear();
        self.selected = None;
        self.loading = true;
        self.loaded = false;
        self.fetch_seq += 1;
        Some(self.fetch_seq)
    }

    /// Availability response arrived. Returns false (and changes nothing)
    /// when a newer fetch has been issued since `seq`.
    pub fn availability_loaded(
        &mut self,
        seq: u64,
        owner_email: Option<String>,
        slots: Vec<Slot>,
    ) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        self.loaded = true;
        // The label sticks once known; later responses without one keep it.
        if let Some(email) = owner_email.filter(|email| !email.is_empty()) {
            self.owner_email = Some(email);
        }
        self.slots = slots;
        true
    }

    /// Availability fetch failed; same staleness gate as a success.
    pub fn availability_failed(&mut self, seq: u64, message: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    /// Slot button clicked: it becomes the single selection and the form
    /// panel opens. Ignored once the wizard is confirmed.
    pub fn select_slot(&mut self, slot: Slot) {
        if self.step == Step::Confirm {
            return;
        }
        self.selected = Some(slot);
        self.step = Step::Form;
    }

    /// Book action fired. Trims the fields and either returns the payload to
    /// submit (marking the submission in flight) or sets the validation
    /// error and returns None, in which case no request may be sent. Once
    /// confirmed, or while a submission is already in flight, it refuses
    /// without side effects.
    pub fn begin_booking(&mut self, name: &str, email: &str) -> Option<(Slot, String, String)> {
        if self.step == Step::Confirm || self.submitting {
            return None;
        }
        self.error = None;
        let name = name.trim();
        let email = email.trim();
        let slot = match self.selected {
            Some(slot) if !name.is_empty() && !email.is_empty() => slot,
            _ => {
                self.error = Some(VALIDATION_MESSAGE.to_string());
                return None;
            }
        };
        self.submitting = true;
        Some((slot, name.to_string(), email.to_string()))
    }

    /// Booking accepted: everything folds away behind the confirmation.
    pub fn booking_confirmed(&mut self, confirmation: BookingConfirmation) {
        self.submitting = false;
        self.step = Step::Confirm;
        self.confirmation = Some(confirmation);
    }

    /// Booking rejected or the request died: surface the message and hand
    /// the book action back.
    pub fn booking_failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    fn is_current(&self, seq: u64) -> bool {
        if seq != self.fetch_seq {
            warn!("dropping availability response for superseded fetch #{seq}");
            return false;
        }
        true
    }

    // --- view state ---------------------------------------------------------

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn identity_missing(&self) -> bool {
        self.identity_missing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }

    pub fn loading_slots(&self) -> bool {
        self.loading
    }

    /// True once a fetch came back empty; distinct from "still loading".
    pub fn no_slots(&self) -> bool {
        self.loaded && self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_selected(&self, slot: &Slot) -> bool {
        self.selected.as_ref() == Some(slot)
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_book(&self) -> bool {
        self.selected.is_some() && !self.submitting
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn shows_date(&self) -> bool {
        self.step != Step::Confirm
    }

    pub fn shows_slots(&self) -> bool {
        matches!(self.step, Step::Slots | Step::Form)
    }

    pub fn shows_form(&self) -> bool {
        self.step == Step::Form
    }

    pub fn shows_confirmation(&self) -> bool {
        self.step == Step::Confirm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start_time: i64) -> Slot {
        Slot {
            start_time,
            end_time: start_time + 3600,
        }
    }

    fn confirmation() -> BookingConfirmation {
        BookingConfirmation {
            start_time: 1717230000,
            end_time: 1717233600,
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
        }
    }

    fn loaded_flow(slots: Vec<Slot>) -> BookingFlow {
        let mut flow = BookingFlow::new("2024-06-01".to_string());
        let seq = flow.begin_availability("2024-06-01").unwrap();
        assert!(flow.availability_loaded(seq, None, slots));
        flow
    }

    #[test]
    fn test_date_change_resets_everything_downstream() {
        let mut flow = loaded_flow(vec![slot(1717230000)]);
        flow.select_slot(slot(1717230000));
        flow.booking_failed("Booking failed".to_string());
        assert!(flow.shows_form());
        assert!(flow.error().is_some());

        flow.begin_availability("2024-06-02");

        assert!(flow.shows_slots());
        assert!(!flow.shows_form());
        assert!(!flow.shows_confirmation());
        assert!(flow.shows_date());
        assert!(flow.loading_slots());
        assert!(!flow.no_slots());
        assert!(flow.slots().is_empty());
        assert!(!flow.can_book());
        assert_eq!(flow.error(), None);
        assert_eq!(flow.date(), "2024-06-02");
    }

    #[test]
    fn test_zero_slots_shows_the_notice() {
        let flow = loaded_flow(Vec::new());
        assert!(!flow.loading_slots());
        assert!(flow.no_slots());
        assert!(flow.slots().is_empty());
    }

    #[test]
    fn test_slots_come_back_in_api_order() {
        let flow = loaded_flow(vec![slot(200), slot(100), slot(300)]);
        assert!(!flow.no_slots());
        let starts: Vec<i64> = flow.slots().iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![200, 100, 300]);
    }

    #[test]
    fn test_stale_availability_response_is_dropped() {
        let mut flow = BookingFlow::new("2024-06-01".to_string());
        let first = flow.begin_availability("2024-06-01").unwrap();
        let second = flow.begin_availability("2024-06-02").unwrap();

        // The older fetch resolving late must not win.
        assert!(!flow.availability_loaded(first, None, vec![slot(1)]));
        assert!(flow.loading_slots());
        assert!(flow.slots().is_empty());

        assert!(!flow.availability_failed(first, "boom".to_string()));
        assert_eq!(flow.error(), None);

        assert!(flow.availability_loaded(second, None, vec![slot(2)]));
        assert_eq!(flow.slots(), &[slot(2)]);
        assert!(!flow.loading_slots());
    }

    #[test]
    fn test_owner_label_sticks_across_fetches() {
        let mut flow = BookingFlow::new("2024-06-01".to_string());
        let seq = flow.begin_availability("2024-06-01").unwrap();
        flow.availability_loaded(seq, Some("owner@example.com".to_string()), Vec::new());
        assert_eq!(flow.owner_email(), Some("owner@example.com"));

        let seq = flow.begin_availability("2024-06-02").unwrap();
        flow.availability_loaded(seq, None, Vec::new());
        assert_eq!(flow.owner_email(), Some("owner@example.com"));

        // An empty string is no label either.
        let seq = flow.begin_availability("2024-06-03").unwrap();
        flow.availability_loaded(seq, Some(String::new()), Vec::new());
        assert_eq!(flow.owner_email(), Some("owner@example.com"));
    }

    #[test]
    fn test_failed_fetch_surfaces_the_message() {
        let mut flow = BookingFlow::new("2024-06-01".to_string());
        let seq = flow.begin_availability("2024-06-01").unwrap();
        assert!(flow.availability_failed(seq, "Error 502".to_string()));
        assert!(!flow.loading_slots());
        assert_eq!(flow.error(), Some("Error 502"));
        // Still recoverable: picking a new date clears the banner.
        flow.begin_availability("2024-06-02");
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_one_slot_selected_at_a_time() {
        let mut flow = loaded_flow(vec![slot(100), slot(200)]);
        assert!(!flow.can_book());

        flow.select_slot(slot(100));
        assert!(flow.is_selected(&slot(100)));
        assert!(!flow.is_selected(&slot(200)));
        assert!(flow.shows_form());
        assert!(flow.can_book());

        flow.select_slot(slot(200));
        assert!(!flow.is_selected(&slot(100)));
        assert!(flow.is_selected(&slot(200)));
    }

    #[test]
    fn test_validation_blocks_the_request() {
        let mut flow = loaded_flow(vec![slot(100)]);

        // No slot selected yet.
        assert_eq!(flow.begin_booking("Ada", "ada@example.com"), None);
        assert_eq!(flow.error(), Some(VALIDATION_MESSAGE));

        flow.select_slot(slot(100));
        assert_eq!(flow.begin_booking("   ", "ada@example.com"), None);
        assert_eq!(flow.begin_booking("Ada", ""), None);
        assert_eq!(flow.error(), Some(VALIDATION_MESSAGE));
        assert!(!flow.submitting());
    }

    #[test]
    fn test_begin_booking_trims_and_locks_the_button() {
        let mut flow = loaded_flow(vec![slot(100)]);
        flow.select_slot(slot(100));

        let payload = flow.begin_booking("  Ada  ", " ada@example.com ");
        assert_eq!(
            payload,
            Some((slot(100), "Ada".to_string(), "ada@example.com".to_string()))
        );
        assert!(flow.submitting());
        assert!(!flow.can_book());
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_no_second_submission_while_one_is_in_flight() {
        let mut flow = loaded_flow(vec![slot(100)]);
        flow.select_slot(slot(100));
        assert!(flow.begin_booking("Ada", "ada@example.com").is_some());

        // The button is disabled for the duration; the machine refuses too,
        // and without raising the validation message.
        assert_eq!(flow.begin_booking("Ada", "ada@example.com"), None);
        assert!(flow.submitting());
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_booking_failure_reenables_the_button() {
        let mut flow = loaded_flow(vec![slot(100)]);
        flow.select_slot(slot(100));
        flow.begin_booking("Ada", "ada@example.com").unwrap();

        flow.booking_failed("Slot no longer available".to_string());

        assert_eq!(flow.error(), Some("Slot no longer available"));
        assert!(!flow.submitting());
        assert!(flow.can_book());
        assert!(flow.shows_form());
        assert!(flow.confirmation().is_none());
    }

    #[test]
    fn test_confirmation_is_terminal_and_verbatim() {
        let mut flow = loaded_flow(vec![slot(1717230000)]);
        flow.select_slot(slot(1717230000));
        flow.begin_booking("Ada", "ada@example.com").unwrap();

        let mut confirmed = confirmation();
        confirmed.customer_name = "<script>alert(1)</script>".to_string();
        flow.booking_confirmed(confirmed.clone());

        assert!(flow.shows_confirmation());
        assert!(!flow.shows_date());
        assert!(!flow.shows_slots());
        assert!(!flow.shows_form());
        // Stored verbatim; the view renders it as a text node, never markup.
        assert_eq!(
            flow.confirmation().unwrap().customer_name,
            "<script>alert(1)</script>"
        );
    }

    #[test]
    fn test_confirmed_flow_rejects_further_transitions() {
        let mut flow = loaded_flow(vec![slot(1717230000), slot(1717233600)]);
        flow.select_slot(slot(1717230000));
        flow.begin_booking("Ada", "ada@example.com").unwrap();
        flow.booking_confirmed(confirmation());

        // No new fetch may be issued for a finished session.
        assert_eq!(flow.begin_availability("2024-06-02"), None);
        assert!(flow.shows_confirmation());
        assert!(!flow.loading_slots());
        assert_eq!(flow.date(), "2024-06-01");

        // No other slot may be picked.
        flow.select_slot(slot(1717233600));
        assert!(flow.shows_confirmation());
        assert!(!flow.shows_form());

        // And no further booking may start.
        assert_eq!(flow.begin_booking("Ada", "ada@example.com"), None);
        assert!(!flow.submitting());
        assert_eq!(flow.confirmation(), Some(&confirmation()));
    }

    #[test]
    fn test_missing_identity_disables_the_wizard() {
        let flow =
            BookingFlow::missing_identity("2024-06-01".to_string(), "Missing owner_id in URL.");
        assert!(flow.identity_missing());
        assert_eq!(flow.error(), Some("Missing owner_id in URL."));
        assert!(flow.shows_date());
        assert!(!flow.shows_slots());
        assert!(!flow.can_book());
    }
}
