use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: CompactString,
    pub number: CompactString,
    pub classification: CompactString,
    pub height: Vec<CompactString>,
    pub weight: Vec<CompactString>,
    pub hit_points: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(flatten)]
    pub special: Special,
    pub speed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_values: Option<String>,
}

/// Older pages have one special stat, newer ones split it in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Special {
    Split { sp_att: u32, sp_def: u32 },
    Combined { special: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur(special: Special) -> Record {
        Record {
            name: "Bulbasaur".into(),
            number: "#001".into(),
            classification: "Seed Pokémon".into(),
            height: vec!["2'04\"".into(), "0.7m".into()],
            weight: vec!["15.2lbs".into(), "6.9kg".into()],
            hit_points: 45,
            attack: 49,
            defense: 49,
            special,
            speed: 45,
            effort_values: None,
        }
    }

    #[test]
    fn special_stats_are_flattened() {
        let json = serde_json::to_value(bulbasaur(Special::Combined { special: 65 })).unwrap();
        assert_eq!(json["special"], 65);
        assert!(json.get("effort_values").is_none());

        let json = serde_json::to_value(bulbasaur(Special::Split { sp_att: 65, sp_def: 65 })).unwrap();
        assert_eq!(json["sp_att"], 65);
        assert_eq!(json["sp_def"], 65);
        assert!(json.get("special").is_none());
    }

    #[test]
    fn both_layouts_read_back() {
        for special in [Special::Combined { special: 65 }, Special::Split { sp_att: 65, sp_def: 80 }] {
            let mut record = bulbasaur(special);
            record.effort_values = Some("1 Sp. Attack Point(s)".to_owned());
            let text = serde_json::to_string(&record).unwrap();
            assert_eq!(serde_json::from_str::<Record>(&text).unwrap(), record);
        }
    }
}
