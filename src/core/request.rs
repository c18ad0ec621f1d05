//! Prompt text and response schemas for the two assistant calls.

use crate::domain::model::StageMode;
use crate::domain::schema::SchemaNode;
use chrono::NaiveDate;

pub const PRIMARY_SOURCE: &str = "24baby.nl";
pub const MIDWIFE_TIPS_URL: &str = "https://www.verloskundigenpraktijkutrecht.nl/tips.html";
const MIDWIFE_DOMAIN: &str = "verloskundigenpraktijkutrecht.nl";

pub const FALLBACK_ANSWER: &str = "Er is een fout opgetreden bij het ophalen van de informatie.";

pub fn system_instruction(mode: StageMode) -> String {
    let (topic, focus) = match mode {
        StageMode::Prenatal => (
            "zwangerschap en voorbereiding op de baby",
            "Focus op zwangerschapssymptomen, voorbereiding op de bevalling en prenatale zorg.",
        ),
        StageMode::Postnatal => (
            "baby-informatie en kraamtijd",
            "Focus op babyontwikkeling, voeding, slaap en herstel van de moeder.",
        ),
    };

    format!(
        "Je bent een gespecialiseerde AI-assistent voor {topic}.\n\
         Je gebruikt UITSLUITEND betrouwbare Nederlandse bronnen, met name {PRIMARY_SOURCE} en {MIDWIFE_TIPS_URL}.\n\
         Geef ALTIJD bronvermeldingen met titels en directe linkjes.\n\
         Antwoord altijd in het Nederlands.\n\
         {focus}\n\
         Als je een vraag krijgt waarvoor geen informatie beschikbaar is bij deze bronnen, geef dat dan eerlijk aan \
         en adviseer contact op te nemen met een verloskundige of consultatiebureau."
    )
}

/// Agenda prompt for weeks `anchor_week + 1 ..= anchor_week + num_weeks`.
pub fn agenda_prompt(
    mode: StageMode,
    anchor_week: i64,
    reference_date: NaiveDate,
    num_weeks: u32,
) -> String {
    let first = anchor_week + 1;
    let last = anchor_week + i64::from(num_weeks);
    let date = reference_date.format("%Y-%m-%d");

    match mode {
        StageMode::Prenatal => format!(
            "De gebruiker is momenteel in week {anchor_week} van de zwangerschap (uitgerekend op {date}).\n\
             Genereer een agenda voor de KOMENDE {num_weeks} WEKEN.\n\
             Lijst de weken op van week {first} tot en met week {last}.\n\
             Geef per week de belangrijkste ontwikkelingen van de baby, symptomen voor de moeder en to-do's \
             gebaseerd op de Nederlandse richtlijnen.\n\
             Bronnen: {PRIMARY_SOURCE} en {MIDWIFE_DOMAIN}."
        ),
        StageMode::Postnatal => format!(
            "De baby is momenteel {anchor_week} weken oud (geboren op {date}).\n\
             Genereer een agenda voor de KOMENDE {num_weeks} WEKEN (wanneer de baby {first} tot {last} weken oud is).\n\
             Geef per week tips over voeding, slaapritme, mijlpalen en zorg voor de baby en het herstel van de moeder.\n\
             Bronnen: {PRIMARY_SOURCE} en {MIDWIFE_DOMAIN}."
        ),
    }
}

pub fn answer_schema() -> SchemaNode {
    SchemaNode::object([
        ("answer", SchemaNode::string()),
        (
            "sources",
            SchemaNode::array(SchemaNode::object([
                ("title", SchemaNode::string()),
                ("url", SchemaNode::string()),
            ])),
        ),
    ])
}

pub fn agenda_schema(mode: StageMode) -> SchemaNode {
    let week_description = match mode {
        StageMode::Prenatal => "De week van de zwangerschap",
        StageMode::Postnatal => "De leeftijd van de baby in weken",
    };

    SchemaNode::array(SchemaNode::object([
        ("week", SchemaNode::number().with_description(week_description)),
        ("title", SchemaNode::string()),
        ("description", SchemaNode::string()),
        ("source", SchemaNode::string()),
        ("sourceUrl", SchemaNode::string()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()
    }

    #[test]
    fn test_system_instruction_depends_only_on_mode() {
        let prenatal = system_instruction(StageMode::Prenatal);
        let postnatal = system_instruction(StageMode::Postnatal);

        assert!(prenatal.contains("zwangerschap en voorbereiding op de baby"));
        assert!(prenatal.contains("prenatale zorg"));
        assert!(postnatal.contains("baby-informatie en kraamtijd"));
        assert!(postnatal.contains("herstel van de moeder"));

        for text in [&prenatal, &postnatal] {
            assert!(text.contains("24baby.nl"));
            assert!(text.contains(MIDWIFE_TIPS_URL));
            assert!(text.contains("Antwoord altijd in het Nederlands."));
            assert!(text.contains("bronvermeldingen"));
        }
        assert_eq!(prenatal, system_instruction(StageMode::Prenatal));
    }

    #[test]
    fn test_prenatal_agenda_prompt_lists_inclusive_range() {
        let prompt = agenda_prompt(StageMode::Prenatal, 30, date(), 4);
        assert!(prompt.contains("in week 30 van de zwangerschap"));
        assert!(prompt.contains("uitgerekend op 2026-12-25"));
        assert!(prompt.contains("KOMENDE 4 WEKEN"));
        assert!(prompt.contains("van week 31 tot en met week 34"));
    }

    #[test]
    fn test_postnatal_agenda_prompt_lists_age_range() {
        let prompt = agenda_prompt(StageMode::Postnatal, 3, date(), 6);
        assert!(prompt.contains("3 weken oud (geboren op 2026-12-25)"));
        assert!(prompt.contains("wanneer de baby 4 tot 9 weken oud is"));
        assert!(prompt.contains("verloskundigenpraktijkutrecht.nl"));
    }

    #[test]
    fn test_agenda_schema_describes_week_by_mode() {
        let prenatal = serde_json::to_value(agenda_schema(StageMode::Prenatal)).unwrap();
        assert_eq!(
            prenatal["items"]["properties"]["week"]["description"],
            "De week van de zwangerschap"
        );
        assert_eq!(
            prenatal["items"]["required"],
            serde_json::json!(["week", "title", "description", "source", "sourceUrl"])
        );

        let postnatal = serde_json::to_value(agenda_schema(StageMode::Postnatal)).unwrap();
        assert_eq!(
            postnatal["items"]["properties"]["week"]["description"],
            "De leeftijd van de baby in weken"
        );
    }

    #[test]
    fn test_answer_schema_requires_answer_and_sources() {
        let schema = serde_json::to_value(answer_schema()).unwrap();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], serde_json::json!(["answer", "sources"]));
        assert_eq!(
            schema["properties"]["sources"]["items"]["required"],
            serde_json::json!(["title", "url"])
        );
    }
}
