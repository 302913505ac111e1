//! Plain-text rendering of the listing screen for the terminal.

use crate::models::{DraftField, DraftForm, Property};
use crate::session::ViewModel;
use std::fmt::Write;

pub const HELP: &str = "\
Commands:
  list                  show the listing cards
  search <text>         filter by name or location (empty to clear)
  type [label]          filter by type (no label for all types)
  view <id>             open the detail view
  close                 close the detail view
  set <field> <value>   edit the Add Property form
  form                  show the Add Property form
  submit                send the form
  refresh               reload from the server
  help                  show this text
  quit                  exit";

pub fn price(value: f64) -> String {
    format!("₹{value}")
}

/// One listing card
pub fn card(property: &Property) -> String {
    format!(
        "[{}] {}\n   📍 {}\n   {}\n   {}",
        property.id,
        property.name,
        property.location,
        price(property.price),
        property.image_or_placeholder(),
    )
}

pub fn listing(view: &ViewModel<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Property Listings");

    let mut types = String::from("All Types");
    for label in &view.projection.type_labels {
        types.push_str(" | ");
        types.push_str(label);
    }
    let _ = writeln!(out, "Types: {types}");

    if !view.filters.search.is_empty() || !view.filters.type_filter.is_empty() {
        let _ = writeln!(
            out,
            "Filter: search={:?} type={:?}",
            view.filters.search, view.filters.type_filter
        );
    }

    if view.projection.displayed.is_empty() {
        let _ = writeln!(out, "(no properties)");
    }
    for property in &view.projection.displayed {
        let _ = writeln!(out, "{}", card(property));
    }

    if let (true, Some(selected)) = (view.modal_open, view.selected) {
        let _ = writeln!(out, "Viewing [{}] {} (`close` to dismiss)", selected.id, selected.name);
    }

    match view.last_refreshed_at {
        Some(at) => {
            let _ = write!(out, "Last updated {}", at.format("%H:%M:%S"));
        }
        None => {
            let _ = write!(out, "Not loaded yet");
        }
    }
    if view.in_flight > 0 {
        let _ = write!(out, " ({} request(s) pending)", view.in_flight);
    }
    out
}

/// Contents of the detail modal
pub fn detail(property: &Property) -> String {
    let mut out = format!(
        "{}\n{}\nType: {}\nLocation: {}\nPrice: {}\n{}",
        property.name,
        property.image_or_placeholder(),
        property.kind,
        property.location,
        price(property.price),
        property.description,
    );
    if let Some(url) = property.map_embed_url() {
        let _ = write!(out, "\nMap: {url}");
    }
    out
}

pub fn form(draft: &DraftForm) -> String {
    let mut out = String::from("Add Property");
    if draft.is_empty() {
        out.push_str(" (empty)");
    }
    for field in DraftField::ALL {
        let suffix = if field.is_optional() { " (optional)" } else { "" };
        let _ = write!(out, "\n  {field}{suffix}: {}", draft.get(field));
    }
    out
}
