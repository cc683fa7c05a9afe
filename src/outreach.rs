//! Pure derivations for an outreach draft: guessed email, draft body, links.
//!
//! Nothing here touches the network or the terminal, so the wizard can call
//! these again whenever its context changes.
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

/// Fixed subject line for the mailto link.
pub const MAIL_SUBJECT: &str = "Quick coffee chat?";

const LINKEDIN_SEARCH_BASE: &str = "https://www.linkedin.com/search/results/all/";

/// Inputs needed to (re)compose a draft body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftContext {
    pub sender_name: String,
    pub recipient_first_name: String,
    pub role: String,
    pub company: String,
    pub include_signature: bool,
}

/// Best-guess address: lowercase first name, last initial, `@company.com`.
///
/// The initial is the first user-perceived character (grapheme cluster) of
/// the lowercased last name, so combining marks stay attached. Only ASCII
/// spaces are removed from the company; other punctuation is kept as typed.
pub fn guess_email(first: &str, last: &str, company: &str) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    let last_initial = last.graphemes(true).next().unwrap_or("");
    let company = company.to_lowercase().replace(' ', "");
    format!("{first}{last_initial}@{company}.com")
}

/// Render the outreach body. Inputs are interpolated verbatim.
pub fn compose_draft(ctx: &DraftContext) -> String {
    let mut lines = vec![
        format!("Hi {},", ctx.recipient_first_name),
        String::new(),
        format!(
            "I'm {}, and I'm really interested in {} work at {}. I'd love to learn a bit more about your experience and what skills are most valuable on your team.",
            ctx.sender_name, ctx.role, ctx.company
        ),
        String::new(),
        "If you're open to it, I'd appreciate a quick 15\u{2013}20 minute chat sometime this week or next."
            .to_string(),
    ];
    if ctx.include_signature {
        lines.push(String::new());
        lines.push("Best,".to_string());
        lines.push(ctx.sender_name.clone());
    }
    lines.join("\n")
}

/// `mailto:` link with the fixed subject and the encoded draft body.
pub fn mailto_link(to_email: &str, body: &str) -> Option<String> {
    let link = format!(
        "mailto:{to_email}?subject={}&body={}",
        urlencoding::encode(MAIL_SUBJECT),
        urlencoding::encode(body)
    );
    checked(link)
}

/// LinkedIn people search for `"{first} {last}"`.
pub fn linkedin_search_link(first: &str, last: &str) -> Option<String> {
    let name = format!("{first} {last}");
    let link = format!(
        "{LINKEDIN_SEARCH_BASE}?keywords={}&origin=GLOBAL_SEARCH_HEADER",
        urlencoding::encode(&name)
    );
    checked(link)
}

fn checked(link: String) -> Option<String> {
    match Url::parse(&link) {
        Ok(_) => Some(link),
        Err(err) => {
            tracing::debug!(%link, error = %err, "rejected malformed link");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WITH_SIGNATURE: &str = "Hi Alex,\n\nI'm Sam, and I'm really interested in Engineer work at Acme. I'd love to learn a bit more about your experience and what skills are most valuable on your team.\n\nIf you're open to it, I'd appreciate a quick 15–20 minute chat sometime this week or next.\n\nBest,\nSam";

    fn ctx(include_signature: bool) -> DraftContext {
        DraftContext {
            sender_name: "Sam".to_string(),
            recipient_first_name: "Alex".to_string(),
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            include_signature,
        }
    }

    fn query_param(link: &str, key: &str) -> Option<String> {
        let url = Url::parse(link).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn guesses_email_from_names_and_company() {
        assert_eq!(guess_email("Jane", "Doe", "Acme Corp"), "janed@acmecorp.com");
    }

    #[test]
    fn guess_keeps_punctuation_in_company() {
        assert_eq!(
            guess_email("Pat", "Lee", "O'Reilly & Sons"),
            "patl@o'reilly&sons.com"
        );
    }

    #[test]
    fn guess_tolerates_empty_parts() {
        assert_eq!(guess_email("Jane", "", "Acme"), "jane@acme.com");
        assert_eq!(guess_email("Jane", "Doe", ""), "janed@.com");
    }

    #[test]
    fn guess_uses_first_character_of_non_ascii_last_name() {
        assert_eq!(guess_email("Zoë", "Émile", "Ça Va"), "zoëé@çava.com");
    }

    #[test]
    fn initial_keeps_combining_marks_with_their_base() {
        // "E" followed by U+0301 COMBINING ACUTE ACCENT is one visible letter.
        assert_eq!(
            guess_email("Zoe", "E\u{301}mile", "Acme"),
            "zoee\u{301}@acme.com"
        );
        assert_eq!(
            guess_email("Ana", "N\u{303}\u{301}ez", "Acme"),
            "anan\u{303}\u{301}@acme.com"
        );
    }

    #[test]
    fn empty_last_name_has_no_initial() {
        assert_eq!(guess_email("Alex", "", "Acme"), "alex@acme.com");
    }

    #[test]
    fn draft_matches_template_with_signature() {
        assert_eq!(compose_draft(&ctx(true)), WITH_SIGNATURE);
    }

    #[test]
    fn draft_without_signature_drops_trailing_block() {
        let expected = WITH_SIGNATURE
            .strip_suffix("\n\nBest,\nSam")
            .expect("template suffix");
        let draft = compose_draft(&ctx(false));
        assert_eq!(draft, expected);
        assert!(draft.ends_with("this week or next."));
    }

    #[test]
    fn draft_accepts_empty_inputs() {
        let draft = compose_draft(&DraftContext {
            sender_name: String::new(),
            recipient_first_name: String::new(),
            role: String::new(),
            company: String::new(),
            include_signature: true,
        });
        assert!(draft.starts_with("Hi ,\n\nI'm , and I'm really interested in  work at ."));
        assert!(draft.ends_with("\n\nBest,\n"));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let body = "Hi & welcome?\nLine two = 100%+ sure";
        let link = mailto_link("janed@acme.com", body).expect("mailto link");
        assert!(link.starts_with("mailto:janed@acme.com?subject=Quick%20coffee%20chat%3F&body="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert_eq!(query_param(&link, "subject").as_deref(), Some(MAIL_SUBJECT));
        assert_eq!(query_param(&link, "body").as_deref(), Some(body));
    }

    #[test]
    fn mailto_round_trips_full_draft() {
        let draft = compose_draft(&ctx(true));
        let link = mailto_link("alexd@acme.com", &draft).expect("mailto link");
        assert_eq!(query_param(&link, "body").as_deref(), Some(draft.as_str()));
    }

    #[test]
    fn linkedin_link_encodes_name() {
        let link = linkedin_search_link("Jane", "Doe").expect("linkedin link");
        assert_eq!(
            link,
            "https://www.linkedin.com/search/results/all/?keywords=Jane%20Doe&origin=GLOBAL_SEARCH_HEADER"
        );
        assert_eq!(query_param(&link, "keywords").as_deref(), Some("Jane Doe"));
        assert_eq!(
            query_param(&link, "origin").as_deref(),
            Some("GLOBAL_SEARCH_HEADER")
        );
    }

    proptest! {
        #[test]
        fn guessed_email_shape(
            first in "[A-Za-z][A-Za-z' -]{0,12}",
            last in "[A-Za-z' -]{0,12}",
            company in "[A-Za-z0-9&' .-]{0,20}",
        ) {
            let email = guess_email(&first, &last, &company);
            prop_assert_eq!(email.clone(), email.to_lowercase());
            prop_assert_eq!(email.matches('@').count(), 1);
            let domain = email.split_once('@').map(|(_, d)| d).unwrap_or_default();
            prop_assert!(!domain.contains(' '));
        }

        #[test]
        fn mailto_body_round_trips(body in "[ -~\n\t]{0,80}") {
            let link = mailto_link("someone@example.com", &body).expect("mailto link");
            prop_assert_eq!(query_param(&link, "body"), Some(body));
        }
    }
}
