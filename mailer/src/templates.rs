/// Plain-text and HTML bodies for the verification mail.
pub fn verification(first_name: &str, link: &str) -> (String, String) {
    let text = format!(
        "Hi {},\n\n\
         Welcome to Textopsy. Confirm your email address by opening the link \
         below. It expires in 24 hours.\n\n\
         {}\n\n\
         If you didn't create this account, you can ignore this email.\n",
        first_name, link
    );
    let html = format!(
        "<p>Hi {},</p>\
         <p>Welcome to Textopsy. Confirm your email address by clicking the \
         button below. The link expires in 24 hours.</p>\
         <p><a href=\"{}\" style=\"background:#7c3aed;color:#fff;padding:12px 24px;\
         border-radius:8px;text-decoration:none\">Verify email</a></p>\
         <p>If you didn't create this account, you can ignore this email.</p>",
        first_name, link
    );
    (text, html)
}

/// Plain-text and HTML bodies for the Pro payment receipt.
pub fn receipt(first_name: &str, amount_kobo: i64) -> (String, String) {
    let naira = amount_kobo as f64 / 100.0;
    let text = format!(
        "Hi {},\n\n\
         Thanks for going Pro! We received your payment of NGN {:.2}. Your Pro \
         plan is active and your monthly analysis ceiling has been raised.\n\n\
         — The Textopsy team\n",
        first_name, naira
    );
    let html = format!(
        "<p>Hi {},</p>\
         <p>Thanks for going Pro! We received your payment of \
         <strong>NGN {:.2}</strong>. Your Pro plan is active and your monthly \
         analysis ceiling has been raised.</p>\
         <p>— The Textopsy team</p>",
        first_name, naira
    );
    (text, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_bodies_carry_the_link() {
        let (text, html) = verification("Ada", "https://app.textopsy.com/verify?token=abc");
        assert!(text.contains("https://app.textopsy.com/verify?token=abc"));
        assert!(html.contains("href=\"https://app.textopsy.com/verify?token=abc\""));
        assert!(text.contains("Ada"));
    }

    #[test]
    fn receipt_formats_kobo_as_naira() {
        let (text, _) = receipt("Ada", 2_500_000);
        assert!(text.contains("NGN 25000.00"));
    }
}
