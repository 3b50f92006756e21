//! Enrollment form submission flow.
//!
//! DESIGN
//! ======
//! The flow is written against two seams: [`EnrollmentForm`] (the page's
//! form and its submit button) and [`EnrollmentSink`] (where the record
//! goes). The browser wires the real form to [`crate::net::api::RestTable`];
//! tests drive it with in-memory doubles.
//!
//! ERROR HANDLING
//! ==============
//! A failed insert is logged and reported to the visitor with a localized
//! alert. The submit button is re-enabled on every path.

use prefs::Language;
use serde::Serialize;

#[cfg(test)]
#[path = "enroll_test.rs"]
mod enroll_test;

/// One row for the enrollments table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentRecord {
    pub full_name: String,
    pub email: String,
    pub path_preference: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrollError {
    #[error("enrollment backend is not configured")]
    NotConfigured,
    #[error("enrollment request failed: {0}")]
    Request(String),
    #[error("enrollment rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("enrollment is only available in the browser")]
    Unavailable,
}

/// Destination for submitted enrollments.
#[async_trait::async_trait(?Send)]
pub trait EnrollmentSink {
    /// Store one record.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollError`] if the record was not accepted.
    async fn insert(&self, record: &EnrollmentRecord) -> Result<(), EnrollError>;
}

/// The page-side form the flow reads from and reports through.
pub trait EnrollmentForm {
    fn read_record(&self) -> EnrollmentRecord;
    fn submit_label(&self) -> String;
    fn set_submitting(&mut self, busy: bool, label: &str);
    fn alert(&mut self, message: &str);
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Failed,
}

#[must_use]
pub fn submitting_label(lang: Language) -> &'static str {
    match lang {
        Language::Ar => "جاري الإرسال...",
        Language::En => "Submitting...",
    }
}

#[must_use]
pub fn success_message(lang: Language) -> &'static str {
    match lang {
        Language::Ar => "تم استلام طلب الالتحاق! سنتواصل معك قريباً.",
        Language::En => "Enrollment received! We will contact you soon.",
    }
}

#[must_use]
pub fn failure_message(lang: Language) -> &'static str {
    match lang {
        Language::Ar => "حدث خطأ أثناء الإرسال. يرجى المحاولة مرة أخرى.",
        Language::En => "An error occurred. Please try again.",
    }
}

/// Language of the form messages, taken from the root `lang` attribute.
#[must_use]
pub fn form_language(lang_attr: Option<&str>) -> Language {
    lang_attr.and_then(Language::parse).unwrap_or_default()
}

/// Run one submission: disable the button, insert, alert, restore the button.
///
/// A missing sink is reported like any other failed insert.
pub async fn submit<F, S>(form: &mut F, sink: Option<&S>, lang: Language) -> Outcome
where
    F: EnrollmentForm,
    S: EnrollmentSink + ?Sized,
{
    let record = form.read_record();
    let original_label = form.submit_label();
    form.set_submitting(true, submitting_label(lang));

    let result = match sink {
        Some(sink) => sink.insert(&record).await,
        None => Err(EnrollError::NotConfigured),
    };

    let outcome = match result {
        Ok(()) => {
            log::info!("enrollment submitted for path {:?}", record.path_preference);
            form.alert(success_message(lang));
            form.reset();
            Outcome::Accepted
        }
        Err(e) => {
            log::error!("enrollment submit failed: {e}");
            form.alert(failure_message(lang));
            Outcome::Failed
        }
    };

    form.set_submitting(false, &original_label);
    outcome
}
