//! Live suggestion filter over the loaded location dataset.
//!
//! Matching is a case-insensitive substring test against each record's country
//! name and primary capital. Results keep dataset order and the scan stops as
//! soon as `limit` options have been accepted, so a later exact match can be
//! left out when earlier partial matches already fill the list.

use std::collections::HashSet;

use crate::model::{LocationOption, LocationRecord};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 15;

/// Result of running a query through [`match_locations`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query was empty or whitespace; nothing is being searched.
    Inactive,
    /// A search ran. The list may be empty.
    Matches(Vec<LocationOption>),
}

impl SearchOutcome {
    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Matches(_))
    }

    pub fn options(&self) -> &[LocationOption] {
        match self {
            SearchOutcome::Inactive => &[],
            SearchOutcome::Matches(opts) => opts,
        }
    }

    pub fn into_options(self) -> Vec<LocationOption> {
        match self {
            SearchOutcome::Inactive => Vec::new(),
            SearchOutcome::Matches(opts) => opts,
        }
    }
}

struct Collector {
    seen: HashSet<(String, Option<String>)>,
    out: Vec<LocationOption>,
    limit: usize,
}

impl Collector {
    fn full(&self) -> bool {
        self.out.len() >= self.limit
    }

    /// First occurrence of a `(display_name, sub_label)` pair wins.
    fn push(&mut self, opt: LocationOption) {
        let key = (opt.display_name.clone(), opt.sub_label.clone());
        if self.seen.insert(key) {
            self.out.push(opt);
        }
    }
}

pub fn match_locations(query: &str, dataset: &[LocationRecord], limit: usize) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::Inactive;
    }

    let needle = query.to_lowercase();
    let mut acc = Collector { seen: HashSet::new(), out: Vec::new(), limit };

    for rec in dataset {
        if acc.full() {
            break;
        }

        if rec.country_name.to_lowercase().contains(&needle) {
            acc.push(LocationOption {
                display_name: rec.country_name.clone(),
                sub_label: rec.capital.as_ref().map(|c| format!("Capital: {c}")),
                coord: rec.country_coord,
                flag_url: rec.flag_url.clone(),
            });
            if acc.full() {
                break;
            }
        }

        if let Some(capital) = &rec.capital {
            if capital.to_lowercase().contains(&needle) {
                acc.push(LocationOption {
                    display_name: capital.clone(),
                    sub_label: Some(rec.country_name.clone()),
                    coord: rec.capital_or_centroid(),
                    flag_url: rec.flag_url.clone(),
                });
            }
        }
    }

    SearchOutcome::Matches(acc.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    fn country(name: &str, capital: Option<&str>) -> LocationRecord {
        LocationRecord {
            country_name: name.to_string(),
            official_name: None,
            country_code: None,
            capital: capital.map(str::to_string),
            country_coord: Coordinates::new(10.0, 20.0),
            capital_coord: None,
            flag_url: format!("https://flags.test/{name}.svg"),
        }
    }

    #[test]
    fn blank_query_is_inactive() {
        let data = vec![country("France", Some("Paris"))];
        assert_eq!(match_locations("", &data, 15), SearchOutcome::Inactive);
        assert_eq!(match_locations("   ", &data, 15), SearchOutcome::Inactive);
        assert_eq!(match_locations("\t\n", &[], 15), SearchOutcome::Inactive);
    }

    #[test]
    fn no_hits_is_an_active_empty_search() {
        let data = vec![country("France", Some("Paris"))];
        let out = match_locations("zzz", &data, 15);
        assert!(out.is_active());
        assert!(out.options().is_empty());
    }

    #[test]
    fn country_match_labels_capital() {
        let data = vec![country("France", Some("Paris")), country("Antarctica", None)];

        let out = match_locations("FRA", &data, 15).into_options();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_name, "France");
        assert_eq!(out[0].sub_label.as_deref(), Some("Capital: Paris"));
        assert_eq!(out[0].coord, Coordinates::new(10.0, 20.0));
        assert_eq!(out[0].flag_url, "https://flags.test/France.svg");

        let out = match_locations("arct", &data, 15).into_options();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sub_label, None);
    }

    #[test]
    fn capital_match_uses_precise_coordinates_when_known() {
        let mut rec = country("Japan", Some("Tokyo"));
        rec.capital_coord = Some(Coordinates::new(35.68, 139.75));

        let out = match_locations("tok", &[rec], 15).into_options();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_name, "Tokyo");
        assert_eq!(out[0].sub_label.as_deref(), Some("Japan"));
        assert_eq!(out[0].coord, Coordinates::new(35.68, 139.75));
    }

    #[test]
    fn capital_without_precise_location_uses_centroid_exactly() {
        let rec = country("Japan", Some("Tokyo"));
        let centroid = rec.country_coord;

        let out = match_locations("tokyo", &[rec], 15).into_options();
        assert_eq!(out[0].coord, centroid);
    }

    #[test]
    fn one_record_can_yield_both_candidates() {
        // "Mexico" / "Mexico City" both contain "mexico".
        let data = vec![country("Mexico", Some("Mexico City"))];
        let out = match_locations("mexico", &data, 15).into_options();

        let names: Vec<_> = out.iter().map(|o| o.display_name.as_str()).collect();
        assert_eq!(names, ["Mexico", "Mexico City"]);
    }

    #[test]
    fn duplicate_pairs_are_dropped_first_wins() {
        let mut first = country("Singapore", Some("Singapore"));
        first.flag_url = "first".into();
        let mut second = country("Singapore", Some("Singapore"));
        second.flag_url = "second".into();

        let out = match_locations("singapore", &[first, second], 15).into_options();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].sub_label.as_deref(), Some("Capital: Singapore"));
        assert_eq!(out[1].sub_label.as_deref(), Some("Singapore"));
        assert!(out.iter().all(|o| o.flag_url == "first"));
    }

    #[test]
    fn twenty_land_countries_capped_at_fifteen_in_order() {
        let data: Vec<_> = (0..20).map(|i| country(&format!("Land {i:02}"), None)).collect();

        let out = match_locations("land", &data, DEFAULT_SUGGESTION_LIMIT).into_options();
        assert_eq!(out.len(), 15);

        let expected: Vec<_> = (0..15).map(|i| format!("Land {i:02}")).collect();
        let got: Vec<_> = out.iter().map(|o| o.display_name.clone()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn early_exit_can_skip_a_later_exact_match() {
        let mut data = vec![country("Iceland", None), country("Finland", None)];
        data.push(country("Land", None));

        let out = match_locations("land", &data, 2).into_options();
        let names: Vec<_> = out.iter().map(|o| o.display_name.as_str()).collect();
        assert_eq!(names, ["Iceland", "Finland"]);
    }

    #[test]
    fn limit_holds_between_country_and_capital_candidates() {
        let data = vec![country("Mexico", Some("Mexico City"))];
        let out = match_locations("mexico", &data, 1).into_options();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_name, "Mexico");
    }

    #[test]
    fn zero_limit_yields_active_empty_result() {
        let data = vec![country("France", Some("Paris"))];
        assert_eq!(match_locations("fr", &data, 0), SearchOutcome::Matches(vec![]));
    }

    #[test]
    fn results_always_contain_query() {
        let data = vec![
            country("Switzerland", Some("Bern")),
            country("Bermuda", Some("Hamilton")),
            country("Germany", Some("Berlin")),
            country("Ireland", Some("Dublin")),
        ];
        for q in ["ber", "LAND", "in", "a"] {
            let lower = q.to_lowercase();
            for opt in match_locations(q, &data, 15).options() {
                assert!(
                    opt.display_name.to_lowercase().contains(&lower),
                    "{opt} does not contain {q}"
                );
            }
        }
    }
}
