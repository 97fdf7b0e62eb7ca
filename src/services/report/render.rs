use std::fmt::Write;

use crate::models::{BookingDetails, Equivalent, TransportEmission};

pub const ANNUAL_BUDGET_KG: f64 = 2000.0;

const SOURCES: &str =
    "_sources : https://monimpacttransport.fr/ and https://monconvertisseurco2.fr/_";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders the trip summary shown before the yes/no confirmation. Emissions
/// are doubled to cover the return flight.
pub fn render_confirmation(
    details: &BookingDetails,
    flight: &[TransportEmission],
    comparison: &[TransportEmission],
    equivalents: &[Equivalent],
) -> anyhow::Result<String> {
    let flight = flight
        .first()
        .ok_or_else(|| anyhow::anyhow!("no flight emissions returned"))?;
    let trip_kg = flight.kgco2e * 2.0;

    let field = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut msg = format!(
        "Please confirm your trip details :
- 🛫 from : **{}**
- 🛬 to : **{}**
- 🥳 departure date : **{}**
- 😮‍💨 return date : **{}**
- 💸 for a budget of : **{}**

🏭 This trip will produce **{} kg of CO2eq** ({} % of your annual budget of {} kg)

---

As a comparison for the same distance :",
        field(&details.origin_city),
        field(&details.destination_city),
        field(&details.departure_date),
        field(&details.return_date),
        field(&details.budget),
        round2(trip_kg),
        round2(trip_kg / ANNUAL_BUDGET_KG * 100.0),
        ANNUAL_BUDGET_KG,
    );

    for mode in comparison {
        let label = match &mode.emoji {
            Some(emoji) => format!("{emoji} {}", mode.name),
            None => mode.name.clone(),
        };
        let _ = write!(msg, "\n- {label} : {} kg of CO2eq", round2(mode.kgco2e * 2.0));
    }

    msg.push_str("\n\nThis is the equivalent of (one of) :");

    for eq in equivalents.iter().filter(|eq| eq.unit_kgco2e > 0.0) {
        let count = (trip_kg / eq.unit_kgco2e).round() as i64;
        let _ = write!(msg, "\n- {} {count} {}", eq.emoji, eq.label);
    }

    msg.push_str("\n---\n\n");
    msg.push_str(SOURCES);

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> BookingDetails {
        BookingDetails {
            origin_city: Some("Paris".to_string()),
            destination_city: Some("London".to_string()),
            departure_date: Some("2023-01-01".to_string()),
            return_date: Some("2023-01-17".to_string()),
            budget: Some("$100".to_string()),
        }
    }

    fn emission(name: &str, emoji: Option<&str>, kg: f64) -> TransportEmission {
        TransportEmission {
            name: name.to_string(),
            emoji: emoji.map(str::to_string),
            kgco2e: kg,
        }
    }

    #[test]
    fn test_render_full_report() {
        let flight = [emission("Avion", Some("✈️"), 79.12)];
        let comparison = [
            emission("TGV", Some("🚄"), 0.595),
            emission("Autocar", None, 12.11),
        ];
        let equivalents = [
            Equivalent {
                emoji: "🥩".to_string(),
                label: "Repas avec du boeuf".to_string(),
                unit_kgco2e: 7.26,
            },
            Equivalent {
                emoji: "📺".to_string(),
                label: "Télévision[s] 45 pouces".to_string(),
                unit_kgco2e: 0.0,
            },
        ];

        let msg = render_confirmation(&details(), &flight, &comparison, &equivalents).unwrap();

        assert!(msg.starts_with("Please confirm your trip details :\n- 🛫 from : **Paris**"));
        assert!(msg.contains("- 💸 for a budget of : **$100**"));
        assert!(msg.contains(
            "**158.24 kg of CO2eq** (7.91 % of your annual budget of 2000 kg)"
        ));
        assert!(msg.contains("\n- 🚄 TGV : 1.19 kg of CO2eq"));
        assert!(msg.contains("\n- Autocar : 24.22 kg of CO2eq"));
        assert!(msg.contains("\n- 🥩 22 Repas avec du boeuf"));
        assert!(!msg.contains("Télévision"));
        assert!(msg.ends_with("---\n\n_sources : https://monimpacttransport.fr/ and https://monconvertisseurco2.fr/_"));
    }

    #[test]
    fn test_render_requires_flight_emissions() {
        assert!(render_confirmation(&details(), &[], &[], &[]).is_err());
    }
}
