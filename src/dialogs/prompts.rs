pub const HELLO: &str = "Hello there ! What can I help you with today?";
pub const ANOTHER_TRIP: &str = "OK, want to book another trip ? 🤩";
pub const DIDNT_UNDERSTAND: &str = "Sorry, I didn't get that. Please try asking in a different way";
pub const PACK_YOUR_BAGS: &str = "Alright, pack your bags baby 🚀";
pub const NLU_NOT_CONFIGURED: &str = "NOTE: LUIS is not configured. To enable all capabilities, add 'LuisAppId', 'LuisAPIKey' and 'LuisAPIHostName' to the appsettings.json file.";

pub const ORIGIN: &str = "🛫 Where do you want to leave from ?";
pub const DESTINATION: &str = "🛬 Where do you want to go to ?";
pub const BUDGET: &str = "💸 How much do you want to spend on this trip ?";

pub const DEPARTURE_DATE: &str = "When do you want to leave 🥳 ?";
pub const RETURN_DATE: &str = "When will you be coming back 😮‍💨 ?";
pub const DATE_RETRY: &str =
    "I'm sorry, for best results, please enter your travel date including the month, day and year.";

pub const CONFIRM_CHOICES: &str = " (1) Yes or (2) No";
pub const CONFIRM_RETRY: &str = "Please answer (1) Yes or (2) No";
pub const REPORT_UNAVAILABLE: &str = "Sorry, I couldn't reach the CO2 impact services 😕 Say anything to try again, or 'cancel' to start over.";

pub const CANCELLED: &str = "It's OK to change your mind 🧘";
pub const HELP: &str = "
🏙️ Just tell me **where** you want to travel to (cities of origin and destination).
Ex. : _'I want to travel from Seattle to San Francisco'_


📅 I will also need to know **when** you want to travel (dates of departure and return).
Ex. : _'I want to travel on May 1, 2020 and return on May 5, 2020'_


💸 Finally, you can give me a **budget** for your trip.
Ex. : _'I want to travel for $500'_


🪃 We can start over from scratch anytime if you just say _'Cancel'_";

/// Reads a yes/no answer to the confirmation prompt.
pub fn recognize_choice(text: &str) -> Option<bool> {
    let normalized = text
        .trim()
        .trim_end_matches(['.', '!'])
        .to_lowercase();

    match normalized.as_str() {
        "yes" | "y" | "1" | "(1)" | "(1) yes" | "yeah" | "yep" | "sure" | "ok" | "okay" => {
            Some(true)
        }
        "no" | "n" | "2" | "(2)" | "(2) no" | "nope" | "nah" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_choice() {
        assert_eq!(recognize_choice("Yes"), Some(true));
        assert_eq!(recognize_choice(" (1) Yes "), Some(true));
        assert_eq!(recognize_choice("ok!"), Some(true));
        assert_eq!(recognize_choice("No."), Some(false));
        assert_eq!(recognize_choice("2"), Some(false));
        assert_eq!(recognize_choice("maybe later"), None);
    }
}
