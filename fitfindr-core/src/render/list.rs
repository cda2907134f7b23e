use crate::model::GymResult;

use super::format_rating;

/// A row of the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry<'a> {
    /// 1-based position in server order.
    pub rank: usize,
    pub name: &'a str,
    /// Rating badge, one decimal.
    pub badge: String,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
}

/// Every gym in input order; no re-sorting.
pub fn list_entries(gyms: &[GymResult]) -> Vec<ListEntry<'_>> {
    gyms.iter()
        .enumerate()
        .map(|(i, gym)| ListEntry {
            rank: i + 1,
            name: &gym.gym_name,
            badge: format_rating(gym.tailored_rating),
            address: &gym.address,
            phone: gym.phone.as_deref(),
            website: gym.website.as_deref(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::gym;

    #[test]
    fn keeps_input_order_even_when_unsorted() {
        let gyms = vec![gym("Low", 2.0), gym("High", 9.0), gym("Mid", 5.55)];
        let rows = list_entries(&gyms);

        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, ["Low", "High", "Mid"]);
        assert_eq!(rows[2].rank, 3);
        assert_eq!(rows[1].badge, "9.0");
    }

    #[test]
    fn contact_fields_pass_through() {
        let mut with_phone = gym("Iron", 6.0);
        with_phone.phone = Some("(512) 555-0100".into());

        let rows = list_entries(std::slice::from_ref(&with_phone));
        assert_eq!(rows[0].phone, Some("(512) 555-0100"));
        assert_eq!(rows[0].website, None);
    }
}
