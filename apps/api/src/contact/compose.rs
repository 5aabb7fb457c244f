use crate::contact::models::ContactSubmission;
use crate::mailer::OutgoingMail;

const SUBJECT_PREFIX: &str = "New Contact Form Submission";

/// Formats a validated submission into the message relayed to the site owner.
pub fn compose_mail(submission: &ContactSubmission) -> OutgoingMail {
    let subject = submission.subject().unwrap_or("No Subject");

    let html_body = format!(
        "<p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Message:</strong> {}</p>\n",
        escape_html(submission.name()),
        escape_html(submission.email()),
        escape_html(submission.subject().unwrap_or("N/A")),
        escape_html(submission.message()),
    );

    OutgoingMail {
        subject: format!("{SUBJECT_PREFIX}: {subject}"),
        html_body,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::models::ContactInput;
    use crate::contact::validation::validate;

    fn submission(subject: Option<&str>, message: &str) -> ContactSubmission {
        validate(&ContactInput {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            subject: subject.map(String::from),
            message: message.into(),
        })
        .unwrap()
    }

    #[test]
    fn test_subject_carries_form_subject() {
        let mail = compose_mail(&submission(Some("Hi"), "Hello there, testing."));
        assert_eq!(mail.subject, "New Contact Form Submission: Hi");
        assert!(mail.html_body.contains("<strong>Subject:</strong> Hi"));
    }

    #[test]
    fn test_missing_subject_placeholders() {
        let mail = compose_mail(&submission(None, "Hello there, testing."));
        assert_eq!(mail.subject, "New Contact Form Submission: No Subject");
        assert!(mail.html_body.contains("<strong>Subject:</strong> N/A"));
    }

    #[test]
    fn test_body_embeds_all_fields() {
        let mail = compose_mail(&submission(Some("Hi"), "Hello there, testing."));
        assert!(mail.html_body.contains("<strong>Name:</strong> Jo"));
        assert!(mail.html_body.contains("<strong>Email:</strong> jo@example.com"));
        assert!(mail.html_body.contains("<strong>Message:</strong> Hello there, testing."));
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let mail = compose_mail(&submission(None, "<script>alert('x')</script> & more"));
        assert!(!mail.html_body.contains("<script>"));
        assert!(mail
            .html_body
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }
}
