//! Defines the county reference entry used to resolve FIPS place codes into
//! display names and coordinates.

/// A single row of the county reference table.
///
/// Entries are keyed by their numeric FIPS place code (`geoid`) and never
/// change once the table has been loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct County {
    /// Numeric FIPS place code, e.g. `6037` for Los Angeles County, CA.
    pub geoid: u32,
    /// County name as listed in the reference table (e.g. "Los Angeles County").
    pub name: String,
    /// Two-letter USPS state abbreviation (e.g. "CA").
    pub usps: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl County {
    /// Text shown in the map popup: `"<county name>, <state abbreviation>"`.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.usps)
    }
}

/// Formats a place code as a CDO `locationid`.
///
/// County codes are zero-padded to five digits (`1001` becomes `FIPS:01001`),
/// state codes to two (`6` becomes `FIPS:06`).
pub fn fips_location_id(place: u32) -> String {
    if place < 100 {
        format!("FIPS:{:02}", place)
    } else {
        format!("FIPS:{:05}", place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_is_zero_padded() {
        assert_eq!(fips_location_id(1001), "FIPS:01001");
        assert_eq!(fips_location_id(48201), "FIPS:48201");
        assert_eq!(fips_location_id(6), "FIPS:06");
    }

    #[test]
    fn display_name_joins_name_and_state() {
        let county = County {
            geoid: 8013,
            name: "Boulder County".to_string(),
            usps: "CO".to_string(),
            latitude: 40.09,
            longitude: -105.36,
        };
        assert_eq!(county.display_name(), "Boulder County, CO");
    }
}
