use serde::{Deserialize, Serialize};

use crate::submission::SubmissionInput;

pub const DEFAULT_SENDER: &str = "coach@careerpivoting.com";
pub const DEFAULT_RECIPIENT: &str = "coach@careerpivoting.com";
pub const MAIL_CHARSET: &str = "UTF-8";
pub const PHONE_NOT_PROVIDED: &str = "Not provided";

const HEADLINE: &str = "New Contact Form Submission from CareerPivoting.com";
const FOOTER: &str = "This message was sent from the contact form on careerpivoting.com";

/// Plain-text notification rendered from a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    text: String,
}

impl NotificationMessage {
    pub fn render(submission: &SubmissionInput) -> Self {
        let phone = submission.phone.as_deref().unwrap_or(PHONE_NOT_PROVIDED);
        let text = format!(
            "{HEADLINE}\n\
             \n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Subject: {subject}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             {FOOTER}\n",
            name = submission.name,
            email = submission.email,
            subject = submission.subject,
            message = submission.message,
        );
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Addresses the relay sends from and to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub sender: String,
    pub recipient: String,
}

impl Default for MailRoute {
    fn default() -> Self {
        Self {
            sender: DEFAULT_SENDER.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

/// Everything a mail transport needs to deliver one notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundEmail {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub text_body: String,
    pub charset: String,
}

impl OutboundEmail {
    pub fn for_submission(submission: &SubmissionInput, route: &MailRoute) -> Self {
        Self {
            sender: route.sender.clone(),
            recipient: route.recipient.clone(),
            subject: subject_line(submission),
            text_body: NotificationMessage::render(submission).into_text(),
            charset: MAIL_CHARSET.to_string(),
        }
    }
}

pub fn subject_line(submission: &SubmissionInput) -> String {
    format!(
        "New Contact Form: {} - {}",
        submission.subject, submission.name
    )
}
