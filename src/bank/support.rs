//! Scripted customer-service desk
//!
//! The chat bot is a keyword table, the virtual queue draws its
//! numbers from the injected RNG, and the callback scheduler and
//! feedback form are gated by pure predicates on the draft.

use rand::Rng;

use crate::util::money::format_balance;

/// Scripted reply to a chat message
///
/// Keywords are checked in the source's order; the first match wins.
/// `usd_rate` is the configured GHS-per-USD rate used for the
/// exchange-rate answer.
pub fn chat_reply(input: &str, currency: &str, usd_rate: f64) -> String {
    let text = input.to_lowercase();

    if text.contains("balance") || text.contains("account") {
        format!(
            "Your current account balance is {} {}. Would you like to see your recent transactions?",
            currency,
            format_balance(12_456.78),
        )
    } else if text.contains("loan") || text.contains("borrow") {
        "We offer personal loans with rates starting at 18% per annum. Would you like to \
         apply or learn more about our loan products?"
            .to_string()
    } else if text.contains("transfer") || text.contains("send money") {
        "You can transfer money through our mobile app, internet banking, or by visiting \
         any branch. What method would you prefer?"
            .to_string()
    } else if text.contains("branch") || text.contains("location") {
        "We have branches across Ghana. Please share your current location, and I can \
         find the nearest branch for you."
            .to_string()
    } else if text.contains("card") || text.contains("atm") {
        "For card-related services, you can visit any branch or call our dedicated card \
         services line at 0302-123-456. Would you like me to help you with a specific \
         card issue?"
            .to_string()
    } else if text.contains("exchange") || text.contains("rate") || text.contains("dollar") {
        format!(
            "Today's exchange rate is 1 USD = {currency} {:.2}, 1 EUR = {currency} {:.2}, \
             1 GBP = {currency} {:.2}.",
            usd_rate,
            usd_rate * 1.08,
            usd_rate * 1.27,
        )
    } else if text.contains("thank") {
        "You're welcome! Is there anything else I can assist you with today?".to_string()
    } else if text.contains("agent") || text.contains("human") || text.contains("representative") {
        "I'm connecting you with a customer service representative. Would you like to \
         join a virtual queue or schedule a callback?"
            .to_string()
    } else {
        "Thank you for your message. How else can I assist you with your banking needs \
         today?"
            .to_string()
    }
}

/// Whether the chat message asks for a human agent
pub fn wants_agent(input: &str) -> bool {
    let text = input.to_lowercase();
    text.contains("agent") || text.contains("human") || text.contains("representative")
}

/// Assigned virtual-queue slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSlot {
    pub position: u32,
    pub wait_minutes: u32,
}

/// Draw a queue position (1-5) and wait estimate (5-14 minutes)
pub fn draw_queue_slot<R: Rng>(rng: &mut R) -> QueueSlot {
    QueueSlot {
        position: rng.gen_range(1..=5),
        wait_minutes: rng.gen_range(5..=14),
    }
}

/// Whether the feedback form may be submitted
pub fn can_submit_feedback(rating: u8) -> bool {
    (1..=5).contains(&rating)
}

/// Whether the callback scheduler may be submitted
pub fn can_schedule_call(date: Option<usize>, time: Option<usize>) -> bool {
    date.is_some() && time.is_some()
}

/// A callback date offered by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDate {
    pub date: &'static str,
    pub display: &'static str,
}

const AVAILABLE_DATES: [ScheduleDate; 5] = [
    ScheduleDate {
        date: "2025-05-10",
        display: "Tomorrow, May 10",
    },
    ScheduleDate {
        date: "2025-05-11",
        display: "Sunday, May 11",
    },
    ScheduleDate {
        date: "2025-05-12",
        display: "Monday, May 12",
    },
    ScheduleDate {
        date: "2025-05-13",
        display: "Tuesday, May 13",
    },
    ScheduleDate {
        date: "2025-05-14",
        display: "Wednesday, May 14",
    },
];

const AVAILABLE_TIMES: [&str; 6] = [
    "9:00 AM", "10:30 AM", "11:15 AM", "1:00 PM", "2:30 PM", "3:45 PM",
];

/// Dates offered by the callback scheduler
pub fn available_dates() -> &'static [ScheduleDate] {
    &AVAILABLE_DATES
}

/// Times offered by the callback scheduler
pub fn available_times() -> &'static [&'static str] {
    &AVAILABLE_TIMES
}

/// Confirmation message appended to the chat after scheduling
pub fn schedule_confirmation(date: &ScheduleDate, time: &str) -> String {
    format!(
        "Great! I've scheduled a callback for you on {} at {}. Our representative will \
         call you at your registered number.",
        date.display, time,
    )
}

/// One branch of the demo branch directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub hours: &'static str,
}

const BRANCHES: [Branch; 4] = [
    Branch {
        name: "Accra Main Branch",
        address: "25 Independence Ave, Accra",
        phone: "030-277-3365",
        hours: "8:00 AM - 4:00 PM",
    },
    Branch {
        name: "Kumasi City Branch",
        address: "15 Harper Road, Kumasi",
        phone: "032-220-1189",
        hours: "8:30 AM - 3:30 PM",
    },
    Branch {
        name: "Takoradi Harbor Branch",
        address: "7 Harbor Street, Takoradi",
        phone: "031-204-6652",
        hours: "8:00 AM - 4:00 PM",
    },
    Branch {
        name: "Tamale Central Branch",
        address: "33 Bolgatanga Rd, Tamale",
        phone: "037-202-5511",
        hours: "8:30 AM - 3:30 PM",
    },
];

/// The demo branch directory
pub fn branches() -> &'static [Branch] {
    &BRANCHES
}

/// One entry of the FAQ tab
#[derive(Debug, Clone)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: String,
}

/// FAQ entries; the exchange-rate answer reflects the configured rate
pub fn faq_items(currency: &str, usd_rate: f64) -> Vec<FaqItem> {
    vec![
        FaqItem {
            question: "How do I check my account balance?",
            answer: "You can check your balance through our mobile app, internet banking, \
                     by visiting any branch, or by using our USSD code *422#. You can also \
                     request balance information via our ATMs nationwide."
                .to_string(),
        },
        FaqItem {
            question: "What are the current exchange rates?",
            answer: format!(
                "Our current exchange rates are: 1 USD = {:.2} {currency}, 1 EUR = {:.2} \
                 {currency}, 1 GBP = {:.2} {currency}. Rates are updated daily.",
                usd_rate,
                usd_rate * 1.08,
                usd_rate * 1.27,
            ),
        },
        FaqItem {
            question: "How do I activate mobile banking?",
            answer: "To activate mobile banking, download our app from the App Store or \
                     Google Play Store, register with your account number and BVN, create \
                     a username and password, and complete the verification process."
                .to_string(),
        },
        FaqItem {
            question: "What are the requirements for opening an account?",
            answer: "To open an account, you need a valid Ghana Card or passport, proof \
                     of address (utility bill), passport photograph, and minimum deposit \
                     of 50 GHS for savings accounts."
                .to_string(),
        },
        FaqItem {
            question: "How do I report a lost ATM card?",
            answer: "Immediately call our 24/7 contact center at 0302-123-456 to report a \
                     lost card. You can also block your card through our mobile app under \
                     Card Management or visit any branch."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_chat_reply_keywords() {
        let reply = chat_reply("what is my account balance?", "GHC", 14.5);
        assert!(reply.contains("12,456.78"));

        let reply = chat_reply("I want to BORROW some money", "GHC", 14.5);
        assert!(reply.contains("18% per annum"));

        let reply = chat_reply("dollar rate today?", "GHC", 14.5);
        assert!(reply.contains("1 USD = GHC 14.50"));
        assert!(reply.contains("1 EUR = GHC 15.66"));
        assert!(reply.contains("1 GBP = GHC 18.42"));

        let reply = chat_reply("thank you", "GHC", 14.5);
        assert!(reply.starts_with("You're welcome"));
    }

    #[test]
    fn test_chat_reply_fallback() {
        let reply = chat_reply("weather forecast", "GHC", 14.5);
        assert!(reply.starts_with("Thank you for your message"));
    }

    #[test]
    fn test_wants_agent() {
        assert!(wants_agent("get me a HUMAN please"));
        assert!(wants_agent("connect me to an agent"));
        assert!(!wants_agent("check my balance"));
    }

    #[test]
    fn test_queue_slot_ranges() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..64 {
            let slot = draw_queue_slot(&mut rng);
            assert!((1..=5).contains(&slot.position));
            assert!((5..=14).contains(&slot.wait_minutes));
        }
    }

    #[test]
    fn test_feedback_gating() {
        assert!(!can_submit_feedback(0));
        for rating in 1..=5 {
            assert!(can_submit_feedback(rating));
        }
        assert!(!can_submit_feedback(6));
    }

    #[test]
    fn test_schedule_gating() {
        assert!(!can_schedule_call(None, None));
        assert!(!can_schedule_call(Some(0), None));
        assert!(!can_schedule_call(None, Some(2)));
        assert!(can_schedule_call(Some(0), Some(2)));
    }

    #[test]
    fn test_static_tables() {
        assert_eq!(branches().len(), 4);
        assert_eq!(available_dates().len(), 5);
        assert_eq!(available_times().len(), 6);
        assert_eq!(faq_items("GHC", 14.5).len(), 5);
    }

    #[test]
    fn test_schedule_confirmation_mentions_slot() {
        let date = available_dates()[0];
        let message = schedule_confirmation(&date, available_times()[1]);
        assert!(message.contains("Tomorrow, May 10"));
        assert!(message.contains("10:30 AM"));
    }
}
