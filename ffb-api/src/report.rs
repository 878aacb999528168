use std::fmt;

use crate::derive_api_data;

derive_api_data! {
    /// A line of the game log.
    #[derive(PartialEq, Eq)]
    #[serde(tag = "reportId", rename_all = "camelCase")]
    pub enum Report {
        /// Free text produced by the client itself.
        RawString(RawString),
        InducementsBought(InducementsBought),
        #[serde(other)]
        Unknown,
    }

    #[derive(PartialEq, Eq)]
    pub struct RawString {
        pub text: String,
    }

    #[derive(PartialEq, Eq, Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct InducementsBought {
        pub team_id: String,
        pub nr_of_inducements: i32,
        pub nr_of_stars: i32,
        pub nr_of_mercenaries: i32,
        pub gold: i32,
    }
}

impl Report {
    pub fn raw(text: impl Into<String>) -> Self {
        Report::RawString(RawString { text: text.into() })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Report::RawString(raw) => write!(f, "{}", raw.text),
            Report::InducementsBought(bought) => write!(
                f,
                "Team {} buys {} inducements, {} star players and {} mercenaries for {} gold",
                bought.team_id,
                bought.nr_of_inducements,
                bought.nr_of_stars,
                bought.nr_of_mercenaries,
                bought.gold,
            ),
            Report::Unknown => write!(f, "(unsupported report)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn decodes_inducements_bought() {
        let json = r#"{"reportId":"inducementsBought","teamId":"ta","nrOfInducements":2,"nrOfStars":1,"nrOfMercenaries":0,"gold":150000}"#;
        let report: Report = serde_json::from_str(json).expect("valid report");
        let_assert!(Report::InducementsBought(bought) = &report);
        check!(bought.team_id == "ta");
        check!(bought.gold == 150000);
        check!(report.to_string().contains("150000 gold"));
    }

    #[test]
    fn raw_string_displays_text() {
        check!(Report::raw("Kick-off!").to_string() == "Kick-off!");
    }
}
