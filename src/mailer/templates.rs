//! Plain string-interpolation templates for donor email.

pub fn format_amount(amount_minor: i64, currency: &str) -> String {
    format!("{} {}", amount_minor, currency)
}

pub fn payment_initiated(recipient: &str, amount_minor: i64, currency: &str, reference: &str) -> String {
    format!(
        "<p>Hello {recipient},</p>\
         <p>Your donation of <strong>{amount}</strong> has been initiated.</p>\
         <p>Reference: {reference}</p>\
         <p>You will receive a confirmation once the payment completes.</p>\
         <p>— The HopeBridge team</p>",
        recipient = recipient,
        amount = format_amount(amount_minor, currency),
        reference = reference,
    )
}

pub fn payment_confirmed(recipient: &str, amount_minor: i64, currency: &str, reference: &str) -> String {
    format!(
        "<p>Hello {recipient},</p>\
         <p>Your donation of <strong>{amount}</strong> was received. Thank you!</p>\
         <p>Reference: {reference}</p>\
         <p>— The HopeBridge team</p>",
        recipient = recipient,
        amount = format_amount(amount_minor, currency),
        reference = reference,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiated_template_carries_amount_and_reference() {
        let html = payment_initiated("donor@example.org", 5000, "XAF", "tx-17");
        assert!(html.contains("5000 XAF"));
        assert!(html.contains("tx-17"));
        assert!(html.contains("donor@example.org"));
    }

    #[test]
    fn confirmed_template_carries_amount_and_reference() {
        let html = payment_confirmed("donor@example.org", 5000, "XAF", "tx-17");
        assert!(html.contains("5000 XAF"));
        assert!(html.contains("tx-17"));
    }
}
