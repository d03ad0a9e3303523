//! Modal notification shown over the wizard

/// Follow-up points listed under every successful submission
pub const SUCCESS_POINTS: [&str; 4] = [
    "A copy of your application will be emailed within 60 seconds. Please check your inbox.",
    "After reviewing your application, you will receive an invoice shortly.",
    "Please complete the payment and share proof of payment.",
    "Your application will remain on hold until the payment is confirmed.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message that blocks the wizard until acknowledged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "Form submitted successfully!",
            NotificationKind::Error => "Please Check",
        }
    }

    /// Extra lines rendered beneath the message
    pub fn details(&self) -> &'static [&'static str] {
        match self.kind {
            NotificationKind::Success => &SUCCESS_POINTS,
            NotificationKind::Error => &[],
        }
    }
}
