use chrono::{DateTime, TimeZone};
use people_core::PersonRowView;

use super::constants::*;

pub fn render_list<Tz>(rows: &[PersonRowView], empty_state_visible: bool, now: DateTime<Tz>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "== People ({}) | updated {} ==",
        rows.len(),
        now.format("%H:%M:%S")
    ));
    if empty_state_visible {
        lines.push(EMPTY_STATE_TEXT.to_string());
    }
    lines.extend(rows.iter().enumerate().map(|(index, row)| {
        format!("{:>4}. {}", index + 1, format_row(row))
    }));
    lines
}

pub fn format_row(row: &PersonRowView) -> String {
    format!("{} ({})", row.full_name, row.id)
}

pub fn render_alert(message: &str) -> Vec<String> {
    vec![
        format!("!! {message}"),
        format!("!! Type '{}' to try again.", RETRY_ACTION.to_lowercase()),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(id: i64, name: &str) -> PersonRowView {
        PersonRowView {
            id,
            full_name: name.to_string(),
        }
    }

    #[test]
    fn rows_show_name_then_id() {
        assert_eq!(format_row(&row(7, "Grace Hopper")), "Grace Hopper (7)");
    }

    #[test]
    fn list_has_header_and_numbered_rows() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let lines = render_list(&[row(1, "A"), row(2, "B")], false, now);

        assert_eq!(
            lines,
            vec![
                "== People (2) | updated 09:30:00 ==".to_string(),
                "   1. A (1)".to_string(),
                "   2. B (2)".to_string(),
            ]
        );
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let lines = render_list(&[], true, now);

        assert_eq!(lines[1], EMPTY_STATE_TEXT);
    }

    #[test]
    fn alert_offers_retry() {
        let lines = render_alert("timeout");
        assert_eq!(lines[0], "!! timeout");
        assert!(lines[1].contains("retry"));
    }
}
