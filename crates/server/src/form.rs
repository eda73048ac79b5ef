//! Ticket form submission and the HTML form page

use serde::Deserialize;
use ticket::{Deck, TicketError, TicketRecord};

/// Url-encoded form body; every field may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketForm {
    pub passenger_name: Option<String>,
    pub date: Option<String>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub dep_time: Option<String>,
    pub deck: Option<String>,
    pub seat_no: Option<String>,
    pub price: Option<String>,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, TicketError> {
    value.ok_or(TicketError::MissingField(name))
}

impl TicketForm {
    /// Convert to a record, failing on the first absent field
    pub fn into_record(self) -> Result<TicketRecord, TicketError> {
        Ok(TicketRecord {
            passenger_name: required(self.passenger_name, "passenger_name")?,
            date: required(self.date, "date")?,
            from_location: required(self.from_location, "from_location")?,
            to_location: required(self.to_location, "to_location")?,
            dep_time: required(self.dep_time, "dep_time")?,
            deck: required(self.deck, "deck")?,
            seat_no: required(self.seat_no, "seat_no")?,
            price: required(self.price, "price")?,
        })
    }

    /// Pre-fill values from the cookies saved by the last successful submission
    pub fn from_last_submission(
        date: Option<String>,
        from_location: Option<String>,
        to_location: Option<String>,
        dep_time: Option<String>,
    ) -> Self {
        Self {
            date,
            from_location,
            to_location,
            dep_time,
            ..Default::default()
        }
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn input(name: &str, label: &str, kind: &str, value: Option<&str>) -> String {
    format!(
        r#"      <label for="{name}">{label}</label>
      <input type="{kind}" id="{name}" name="{name}" value="{value}" required>
"#,
        value = escape_html(value.unwrap_or_default()),
    )
}

fn deck_select(selected: Option<&str>) -> String {
    let selected = selected.and_then(Deck::parse);
    let options: String = Deck::ALL
        .iter()
        .map(|deck| {
            let attr = if Some(*deck) == selected { " selected" } else { "" };
            format!("        <option value=\"{deck}\"{attr}>{deck}</option>\n")
        })
        .collect();
    format!(
        "      <label for=\"deck\">Deck</label>\n      <select id=\"deck\" name=\"deck\">\n{options}      </select>\n"
    )
}

/// Full form page, optionally with an error message above the form
pub fn render_page(values: &TicketForm, error: Option<&str>) -> String {
    let alert = error
        .map(|message| {
            format!(
                "    <div class=\"alert alert-danger\" role=\"alert\">{}</div>\n",
                escape_html(message)
            )
        })
        .unwrap_or_default();

    let fields = [
        input("passenger_name", "Name of passenger", "text", values.passenger_name.as_deref()),
        input("date", "Date", "date", values.date.as_deref()),
        input("from_location", "From", "text", values.from_location.as_deref()),
        input("to_location", "To", "text", values.to_location.as_deref()),
        input("dep_time", "Departure time", "time", values.dep_time.as_deref()),
        deck_select(values.deck.as_deref()),
        input("seat_no", "Seat no", "text", values.seat_no.as_deref()),
        input("price", "Price (MVR)", "text", values.price.as_deref()),
    ]
    .concat();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sea Queen Ticket Generator</title>
</head>
<body>
  <main>
    <h1>Sea Queen Ticket Generator</h1>
{alert}    <form method="post" action="/">
{fields}      <button type="submit">Generate ticket</button>
    </form>
  </main>
</body>
</html>
"#
    )
}
