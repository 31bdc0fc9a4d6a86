use bindue_core::{CollectionCheck, CollectionSchedule, CouncilMeta, DueReport};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'check> {
    council: &'check str,
    reference_date: NaiveDate,
    schedule: &'check CollectionSchedule,
    due: &'check DueReport,
}

pub(crate) fn render_text(check: &CollectionCheck, upcoming: bool) -> String {
    let mut lines: Vec<String> = check
        .due
        .due_categories()
        .map(|category| format!("Bin today: {category}"))
        .collect();

    if lines.is_empty() {
        lines.push("No bins due today!".to_owned());
    }

    if upcoming {
        let today = check.due.reference();
        lines.push(String::new());
        lines.push("Next collections:".to_owned());
        lines.extend(check.schedule.categories().map(|category| {
            match check.schedule.next_collection(category, today) {
                Some(date) => format!(
                    "  {category}: {} ({})",
                    date.format("%d.%m.%Y"),
                    relative_day_label(date, today)
                ),
                None => format!("  {category}: none scheduled"),
            }
        }));
    }

    lines.join("\n")
}

pub(crate) fn render_json(
    council: &CouncilMeta,
    check: &CollectionCheck,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        council: &council.name,
        reference_date: check.due.reference(),
        schedule: &check.schedule,
        due: &check.due,
    })
}

// `date` comes from `next_collection`, so it is never before `today`.
fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days => format!("in {days} days"),
    }
}

#[cfg(test)]
mod tests {
    use bindue_core::{Category, CouncilId, extract};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn check_on(reference: NaiveDate) -> CollectionCheck {
        let categories = [
            Category::from("General Waste"),
            Category::from("Food and Garden"),
            Category::from("Glass"),
        ];
        let text = "General Waste\n31 October 2024\n14 November 2024\n\n\
                    Food and Garden\n01 November 2024";
        let schedule = extract(text, &categories).expect("valid text");
        let due = schedule.due_on(&reference);
        CollectionCheck { schedule, due }
    }

    #[test]
    fn lists_due_bins() {
        let output = render_text(&check_on(date(2024, 10, 31)), false);
        assert_eq!(output, "Bin today: General Waste");
    }

    #[test]
    fn says_when_nothing_is_due() {
        let output = render_text(&check_on(date(2024, 10, 30)), false);
        assert_eq!(output, "No bins due today!");
    }

    #[test]
    fn upcoming_block_uses_relative_labels() {
        let output = render_text(&check_on(date(2024, 10, 31)), true);
        let expected = [
            "Bin today: General Waste",
            "",
            "Next collections:",
            "  General Waste: 31.10.2024 (today)",
            "  Food and Garden: 01.11.2024 (tomorrow)",
            "  Glass: none scheduled",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn json_report_keeps_category_order() {
        let council = CouncilMeta {
            id: CouncilId("north-lanarkshire".to_owned()),
            name: "North Lanarkshire Council".to_owned(),
        };
        let json = render_json(&council, &check_on(date(2024, 11, 1))).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["reference_date"], "2024-11-01");
        assert_eq!(value["due"]["Food and Garden"], true);
        assert_eq!(value["due"]["General Waste"], false);
        assert_eq!(
            value["schedule"]["General Waste"],
            serde_json::json!(["2024-10-31", "2024-11-14"])
        );
        let first_key = json.find("\"General Waste\"");
        let second_key = json.find("\"Food and Garden\"");
        assert!(first_key < second_key, "categories must stay in input order");
    }

    #[test]
    fn relative_labels() {
        let today = date(2024, 10, 31);
        assert_eq!(relative_day_label(today, today), "today");
        assert_eq!(relative_day_label(date(2024, 11, 1), today), "tomorrow");
        assert_eq!(relative_day_label(date(2024, 11, 5), today), "in 5 days");
    }
}
