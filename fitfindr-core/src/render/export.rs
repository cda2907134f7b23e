use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::model::GymResult;

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "gym_recommendations.csv";

const HEADER: [&str; 7] =
    ["Gym Name", "Tailored Rating", "Address", "Phone", "Website", "Latitude", "Longitude"];

/// Serialize every gym, not just the visible ones, to CSV.
///
/// Column order is fixed. String fields are quoted; absent phone or website
/// become empty strings.
pub fn to_csv(gyms: &[GymResult]) -> String {
    let mut lines = Vec::with_capacity(gyms.len() + 1);
    lines.push(HEADER.join(","));

    for gym in gyms {
        let row = [
            quote(&gym.gym_name),
            gym.tailored_rating.to_string(),
            quote(&gym.address),
            quote(gym.phone.as_deref().unwrap_or_default()),
            quote(gym.website.as_deref().unwrap_or_default()),
            gym.latitude.to_string(),
            gym.longitude.to_string(),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Write [`to_csv`] output to `path`.
pub fn write_csv(gyms: &[GymResult], path: &Path) -> Result<()> {
    fs::write(path, to_csv(gyms))
        .with_context(|| format!("Failed to write CSV export: {}", path.display()))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::gym;

    #[test]
    fn header_only_for_empty_input() {
        assert_eq!(
            to_csv(&[]),
            "Gym Name,Tailored Rating,Address,Phone,Website,Latitude,Longitude"
        );
    }

    #[test]
    fn one_line_per_gym_in_input_order() {
        let mut first = gym("Iron Temple", 8.5);
        first.phone = Some("(512) 555-0100".into());
        first.website = Some("https://irontemple.example".into());
        first.latitude = 30.25;
        first.longitude = -97.75;

        let mut second = gym("Budget Barbell", 4.0);
        second.address = "2 Side St, Austin".into();
        second.latitude = 30.3;
        second.longitude = -97.7;

        let csv = to_csv(&[first, second]);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#""Iron Temple",8.5,"1 Main St","(512) 555-0100","https://irontemple.example",30.25,-97.75"#
        );
        assert_eq!(lines[2], r#""Budget Barbell",4,"2 Side St, Austin","","",30.3,-97.7"#);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = to_csv(&[gym(r#"The "Pit""#, 6.0)]);
        assert!(csv.lines().nth(1).unwrap().starts_with(r#""The ""Pit""",6,"#));
    }

    #[test]
    fn export_covers_more_than_the_chart() {
        let gyms: Vec<_> = (0..15).map(|i| gym(&format!("Gym {i}"), 5.0)).collect();
        assert_eq!(to_csv(&gyms).lines().count(), 16);
    }

    #[test]
    fn write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        write_csv(&[gym("Iron Temple", 8.5)], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Gym Name,"));
        assert_eq!(contents.lines().count(), 2);
    }
}
