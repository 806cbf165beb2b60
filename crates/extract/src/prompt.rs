//! Extraction prompt construction.

use chrono::NaiveDate;

pub const SYSTEM_PROMPT: &str = "You are a data extraction expert. You ONLY return valid JSON, \
nothing else. No markdown, no explanations, just pure JSON.";

/// Build the user prompt for one inbound email. `today` anchors relative
/// pickup dates like "next Tuesday".
pub fn extraction_prompt(email_body: &str, today: NaiveDate) -> String {
    format!(
        r#"Extract freight shipment details from this email and return ONLY valid JSON.

Email:
{email_body}

Extract the following information and return as JSON:
{{
  "origin": {{
    "city": "string",
    "state": "string (2-letter code)",
    "zip": "string (5 digits)",
    "address": "string or null"
  }},
  "destination": {{
    "city": "string",
    "state": "string (2-letter code)",
    "zip": "string (5 digits)",
    "address": "string or null"
  }},
  "cargo": {{
    "weight_lbs": number,
    "pieces": number,
    "piece_type": "string (pallets/boxes/crates)",
    "dimensions": {{
      "length": number,
      "width": number,
      "height": number,
      "unit": "inches"
    }},
    "commodity": "string (what is being shipped)"
  }},
  "special_services": ["array of strings like liftgate, climate_control, etc"],
  "pickup_date": "YYYY-MM-DD format or null",
  "additional_notes": "string"
}}

Rules:
- Convert all weights to lbs
- Convert all dimensions to inches
- Use 5-digit zip codes
- If pickup date is relative (like "next Tuesday"), calculate the actual date from today ({today})
- If information is missing, use null
- Infer special services (e.g., "electronics" might need "climate_control")
- Return ONLY the JSON object, no other text, no markdown, no explanations

CRITICAL: Your response must be ONLY valid JSON. Do not include any text before or after the JSON."#
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::extraction_prompt;

    #[test]
    fn prompt_embeds_email_and_anchor_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).expect("date");
        let prompt = extraction_prompt("Need 2 pallets moved from 90021 to 60601.", today);

        assert!(prompt.contains("Need 2 pallets moved from 90021 to 60601."));
        assert!(prompt.contains("from today (2026-08-24)"));
        assert!(prompt.contains("\"special_services\""));
    }
}
