/// Two-digit FIPS code for each USPS state abbreviation (50 states).
const STATE_FIPS: [(&str, &str); 50] = [
    ("AL", "01"), ("AK", "02"), ("AZ", "04"), ("AR", "05"), ("CA", "06"),
    ("CO", "08"), ("CT", "09"), ("DE", "10"), ("FL", "12"), ("GA", "13"),
    ("HI", "15"), ("ID", "16"), ("IL", "17"), ("IN", "18"), ("IA", "19"),
    ("KS", "20"), ("KY", "21"), ("LA", "22"), ("ME", "23"), ("MD", "24"),
    ("MA", "25"), ("MI", "26"), ("MN", "27"), ("MS", "28"), ("MO", "29"),
    ("MT", "30"), ("NE", "31"), ("NV", "32"), ("NH", "33"), ("NJ", "34"),
    ("NM", "35"), ("NY", "36"), ("NC", "37"), ("ND", "38"), ("OH", "39"),
    ("OK", "40"), ("OR", "41"), ("PA", "42"), ("RI", "44"), ("SC", "45"),
    ("SD", "46"), ("TN", "47"), ("TX", "48"), ("UT", "49"), ("VT", "50"),
    ("VA", "51"), ("WA", "53"), ("WV", "54"), ("WI", "55"), ("WY", "56"),
];

/// Return the two-digit FIPS code string for a USPS postal code (case-insensitive).
pub fn state_fips(abbr: &str) -> Option<&'static str> {
    let abbr = abbr.trim().to_ascii_uppercase();
    STATE_FIPS.iter()
        .find(|(code, _)| *code == abbr)
        .map(|&(_, fips)| fips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_resolve() {
        assert_eq!(state_fips("NE"), Some("31"));
        assert_eq!(state_fips("wa"), Some("53"));
        assert_eq!(state_fips(" AK "), Some("02"));
    }

    #[test]
    fn unknown_codes_are_none() {
        assert_eq!(state_fips("DC"), None);
        assert_eq!(state_fips(""), None);
    }

    #[test]
    fn codes_are_unique() {
        let mut fips = STATE_FIPS.iter().map(|&(_, f)| f).collect::<Vec<_>>();
        fips.sort_unstable();
        fips.dedup();
        assert_eq!(fips.len(), STATE_FIPS.len());
    }
}
