use serde::{Deserialize, Serialize};

/// One suggestion from the address autocomplete service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressCandidate {
    pub id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub highlight: String,
    pub description: String,
}

impl AddressCandidate {
    pub fn label(&self) -> String {
        format!("{}, {}", self.text, self.description)
    }
}

/// The address the customer picked, split for display.
///
/// Splitting is best effort and never validated: the postcode is the last
/// two words of the description, the house number the first word of the
/// text, and the city the first word of the description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedAddress {
    pub candidate_id: String,
    pub postcode: String,
    pub full_address: String,
    pub house_number: String,
    pub street: String,
    pub city: String,
}

impl SelectedAddress {
    pub fn from_candidate(candidate: &AddressCandidate) -> Self {
        let description: Vec<&str> = candidate.description.split_whitespace().collect();
        let postcode = description[description.len().saturating_sub(2)..].join(" ");
        let city = description.first().copied().unwrap_or_default().to_string();

        let mut text = candidate.text.split_whitespace();
        let house_number = text.next().unwrap_or_default().to_string();
        let street = text.collect::<Vec<_>>().join(" ");

        Self {
            candidate_id: candidate.id.clone(),
            postcode,
            full_address: candidate.label(),
            house_number,
            street,
            city,
        }
    }

    /// Outward code of the postcode (`"NR32 1AB"` → `"NR32"`), which keys
    /// the skip catalog lookup.
    pub fn postcode_prefix(&self) -> String {
        postcode_prefix(&self.postcode)
    }
}

pub fn postcode_prefix(postcode: &str) -> String {
    postcode
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}
