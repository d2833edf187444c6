//! Form decoding and display formatting for catalog records.

use std::collections::{BTreeMap, HashMap};

use super::model::{BeerFull, BreweryFull};

/// Submitted form fields, name to raw value
pub type FormFields = HashMap<String, String>;

/// Parse a numeric form value; anything unparsable or non-finite is 0.
pub fn parse_float(value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Shortest decimal form of `value`, never in exponent notation
pub fn format_float(value: f64) -> String {
    value.to_string()
}

fn field<'a>(form: &'a FormFields, name: &str) -> &'a str {
    form.get(name).map(String::as_str).unwrap_or("")
}

/// Build a beer from the create/edit form.
///
/// The id and type are left empty; the caller decides both.
pub fn beer_from_form(form: &FormFields) -> BeerFull {
    BeerFull {
        doc_type: String::new(),
        id: String::new(),
        brewery_id: field(form, "beer_brewery_id").to_string(),
        name: field(form, "beer_name").to_string(),
        description: field(form, "beer_description").to_string(),
        style: field(form, "beer_style").to_string(),
        category: field(form, "beer_category").to_string(),
        abv: parse_float(field(form, "beer_abv")),
        ibu: parse_float(field(form, "beer_ibu")),
        srm: parse_float(field(form, "beer_srm")),
        upc: parse_float(field(form, "beer_upc")),
    }
}

/// Display fields of a beer, keyed by field name
pub fn beer_fields(beer: &BeerFull) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("name", beer.name.clone()),
        ("description", beer.description.clone()),
        ("style", beer.style.clone()),
        ("category", beer.category.clone()),
        ("abv", format_float(beer.abv)),
        ("ibu", format_float(beer.ibu)),
        ("srm", format_float(beer.srm)),
        ("upc", format_float(beer.upc)),
    ])
}

/// Display fields of a brewery, keyed by field name
pub fn brewery_fields(brewery: &BreweryFull) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("name", brewery.name.clone()),
        ("description", brewery.description.clone()),
        ("city", brewery.city.clone()),
        ("state", brewery.state.clone()),
        ("code", brewery.code.clone()),
        ("country", brewery.country.clone()),
        ("phone", brewery.phone.clone()),
        ("website", brewery.website.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("5.5"), 5.5);
        assert_eq!(parse_float("12"), 12.0);
        assert_eq!(parse_float("-1e2"), -100.0);
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float(" 5.5"), 0.0);
        assert_eq!(parse_float("NaN"), 0.0);
        assert_eq!(parse_float("1e400"), 0.0);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(5.5), "5.5");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(12.0), "12");
        assert_eq!(format_float(724153412514.0), "724153412514");
    }

    #[test]
    fn test_beer_from_form() {
        let beer = beer_from_form(&form(&[
            ("beer_brewery_id", "sierra_nevada"),
            ("beer_name", " Pale Ale "),
            ("beer_style", "American-Style Pale Ale"),
            ("beer_abv", "5.6"),
            ("beer_ibu", "abc"),
        ]));

        assert_eq!(beer.brewery_id, "sierra_nevada");
        assert_eq!(beer.name, " Pale Ale ");
        assert_eq!(beer.style, "American-Style Pale Ale");
        assert_eq!(beer.description, "");
        assert_eq!(beer.abv, 5.6);
        assert_eq!(beer.ibu, 0.0);
        assert_eq!(beer.upc, 0.0);
        assert!(beer.id.is_empty());
        assert!(beer.doc_type.is_empty());
    }

    #[test]
    fn test_beer_fields() {
        let beer = BeerFull {
            name: "Stout".into(),
            abv: 5.5,
            ..Default::default()
        };
        let fields = beer_fields(&beer);
        assert_eq!(fields["name"], "Stout");
        assert_eq!(fields["abv"], "5.5");
        assert_eq!(fields["upc"], "0");
        assert_eq!(fields.len(), 8);
    }

    #[test]
    fn test_brewery_fields() {
        let brewery = BreweryFull {
            id: "anchor".into(),
            name: "Anchor".into(),
            website: "http://www.anchorbrewing.com/".into(),
            ..Default::default()
        };
        let fields = brewery_fields(&brewery);
        assert_eq!(fields["website"], "http://www.anchorbrewing.com/");
        assert!(!fields.contains_key("id"));
    }
}
