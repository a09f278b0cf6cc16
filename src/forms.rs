use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Subject must be at least 3 characters long")]
    SubjectTooShort,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Checks a raw input value. Surrounding whitespace is ignored.
    pub fn validate(self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        let len = value.chars().count();
        match self {
            Field::Name if len < 2 => Err(FieldError::NameTooShort),
            Field::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
            Field::Subject if len < 3 => Err(FieldError::SubjectTooShort),
            Field::Message if len < 10 => Err(FieldError::MessageTooShort),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    /// Every failing field. Empty means the form can be sent.
    pub fn validate(&self) -> BTreeMap<Field, FieldError> {
        Field::ALL
            .into_iter()
            .filter_map(|field| field.validate(self.value(field)).err().map(|e| (field, e)))
            .collect()
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Network error")]
    Network,
}

/// Stand-in for a backend: waits, then succeeds unless the roll lands under the
/// failure rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedSubmission {
    pub delay: Duration,
    pub failure_rate: f64,
}

impl SimulatedSubmission {
    pub const CONTACT: Self = Self {
        delay: Duration::from_millis(2000),
        failure_rate: 0.1,
    };
    pub const NEWSLETTER: Self = Self {
        delay: Duration::from_millis(2000),
        failure_rate: 0.05,
    };
    pub const QUICK: Self = Self {
        delay: Duration::from_millis(1500),
        failure_rate: 0.05,
    };

    /// `roll` is a uniform sample from `[0, 1)`.
    pub fn resolve(&self, roll: f64) -> Result<(), SubmitError> {
        if roll >= self.failure_rate {
            Ok(())
        } else {
            Err(SubmitError::Network)
        }
    }
}

/// How long a status message stays up before fading.
pub const STATUS_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn invalid() -> Self {
        FormStatus::Error("Please fix the errors above".to_string())
    }

    pub fn contact(outcome: Result<(), SubmitError>) -> Self {
        match outcome {
            Ok(()) => FormStatus::Success(
                "Message sent successfully! I'll get back to you soon.".to_string(),
            ),
            Err(_) => FormStatus::Error("Failed to send message. Please try again.".to_string()),
        }
    }

    pub fn newsletter(outcome: Result<(), SubmitError>) -> Self {
        match outcome {
            Ok(()) => FormStatus::Success(
                "Successfully subscribed! Welcome to the newsletter.".to_string(),
            ),
            Err(_) => {
                FormStatus::Error("Subscription failed. Please try again later.".to_string())
            }
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormStatus::Success(s) | FormStatus::Error(s) => Some(s),
            FormStatus::Idle | FormStatus::Sending => None,
        }
    }

    pub fn class_attr(&self) -> &'static str {
        match self {
            FormStatus::Success(_) => "form-status success",
            FormStatus::Error(_) => "form-status error",
            FormStatus::Idle | FormStatus::Sending => "form-status",
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, FormStatus::Sending)
    }
}

/// A form status plus a ticket for the timer that will clear it. Setting a new
/// status issues a new ticket, so an older clear timer finds nothing to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSlot {
    status: FormStatus,
    ticket: u64,
}

impl StatusSlot {
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Shows `status` and returns the ticket a clear timer should carry.
    pub fn show(&mut self, status: FormStatus) -> u64 {
        self.status = status;
        self.ticket += 1;
        self.ticket
    }

    /// Clears the status if `ticket` is still the latest one.
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.status.is_sending() {
            return false;
        }
        self.status = FormStatus::Idle;
        true
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFormError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 5 characters")]
    MessageTooShort,
}

/// The short form behind the "quick message" button. Checks stop at the first
/// failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl QuickMessage {
    pub fn validate(&self) -> Result<(), QuickFormError> {
        Field::Name
            .validate(&self.name)
            .map_err(|_| QuickFormError::NameTooShort)?;
        Field::Email
            .validate(&self.email)
            .map_err(|_| QuickFormError::InvalidEmail)?;
        if self.message.trim().chars().count() < 5 {
            return Err(QuickFormError::MessageTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("alex@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("alex@example"));
        assert!(!is_valid_email("alex example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_field_rules() {
        assert_eq!(Field::Name.validate(" A "), Err(FieldError::NameTooShort));
        assert!(Field::Name.validate("Al").is_ok());
        assert_eq!(Field::Subject.validate("Hi"), Err(FieldError::SubjectTooShort));
        assert_eq!(
            Field::Message.validate("too short"),
            Err(FieldError::MessageTooShort)
        );
        assert!(Field::Message.validate("long enough now").is_ok());
        assert_eq!(
            Field::Email.validate("not-an-email").unwrap_err().to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_contact_form_collects_all_errors() {
        let mut form = ContactForm::default();
        assert_eq!(form.validate().len(), 4);

        form.set(Field::Name, "Jo".to_string());
        form.set(Field::Email, "jo@example.com".to_string());
        form.set(Field::Subject, "Hey".to_string());
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Message), Some(&FieldError::MessageTooShort));

        form.set(Field::Message, "Let's build something".to_string());
        assert!(form.validate().is_empty());
        assert_eq!(form.value(Field::Subject), "Hey");
    }

    #[test]
    fn test_submission_roll() {
        let sim = SimulatedSubmission::CONTACT;
        assert_eq!(sim.resolve(0.1), Ok(()));
        assert_eq!(sim.resolve(0.73), Ok(()));
        assert_eq!(sim.resolve(0.09), Err(SubmitError::Network));
        assert_eq!(sim.resolve(0.0), Err(SubmitError::Network));

        assert_eq!(SimulatedSubmission::NEWSLETTER.resolve(0.07), Ok(()));
    }

    #[test]
    fn test_network_error_surfaces_as_status() {
        let status = FormStatus::contact(SimulatedSubmission::CONTACT.resolve(0.05));
        assert_eq!(status.class_attr(), "form-status error");
        assert_eq!(
            status.message(),
            Some("Failed to send message. Please try again.")
        );

        let status = FormStatus::contact(SimulatedSubmission::CONTACT.resolve(0.5));
        assert_eq!(status.class_attr(), "form-status success");

        let status = FormStatus::newsletter(Err(SubmitError::Network));
        assert_eq!(
            status.message(),
            Some("Subscription failed. Please try again later.")
        );
    }

    #[test]
    fn test_idle_status_has_no_message() {
        assert_eq!(FormStatus::Idle.message(), None);
        assert!(FormStatus::Sending.is_sending());
        assert_eq!(FormStatus::invalid().class_attr(), "form-status error");
    }

    #[test]
    fn test_quick_message_first_error_wins() {
        let mut quick = QuickMessage::default();
        assert_eq!(quick.validate(), Err(QuickFormError::NameTooShort));

        quick.name = "Sam".to_string();
        quick.email = "sam@".to_string();
        quick.message = "hi".to_string();
        assert_eq!(quick.validate(), Err(QuickFormError::InvalidEmail));

        quick.email = "sam@example.com".to_string();
        assert_eq!(
            quick.validate().unwrap_err().to_string(),
            "Message must be at least 5 characters"
        );

        quick.message = " hello ".to_string();
        assert_eq!(quick.validate(), Ok(()));
    }

    #[test]
    fn test_quick_submission_rate() {
        let quick = SimulatedSubmission::QUICK;
        assert_eq!(quick.delay, Duration::from_millis(1500));
        assert_eq!(quick.resolve(0.04), Err(SubmitError::Network));
        assert_eq!(quick.resolve(0.05), Ok(()));
    }

    #[test]
    fn test_status_slot_ignores_older_clear() {
        let mut slot = StatusSlot::default();
        let first = slot.show(FormStatus::Error("Please enter a valid email address".into()));
        slot.show(FormStatus::Sending);
        let second = slot.show(FormStatus::newsletter(Ok(())));

        // the first clear timer fires while the success message is up
        assert!(!slot.expire(first));
        assert!(matches!(slot.status(), FormStatus::Success(_)));

        assert!(slot.expire(second));
        assert_eq!(slot.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_status_slot_keeps_sending() {
        let mut slot = StatusSlot::default();
        let ticket = slot.show(FormStatus::Sending);
        assert!(!slot.expire(ticket));
        assert!(slot.status().is_sending());
    }
}
