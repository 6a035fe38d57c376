//! Plain-text rendering of views for the terminal.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::domain::views::DashboardView;
use crate::domain::{FieldErrors, UserRecord};

const MISSING: &str = "-";

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| MISSING.to_owned(), |at| at.format("%b %-d, %Y").to_string())
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || MISSING.to_owned(),
        |at| at.format("%b %-d, %Y %H:%M UTC").to_string(),
    )
}

/// The dashboard table followed by its summary line.
pub fn dashboard(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    let Some(users) = view.users().ready() else {
        return Ok(());
    };
    if users.is_empty() {
        writeln!(out, "No users found")?;
        return writeln!(out, "Get started by adding your first user.");
    }

    let header = ["ID", "Name", "Email", "Phone", "Company", "Location", "Created"];
    let rows: Vec<[String; 7]> = users
        .iter()
        .map(|user| {
            let draft = user.draft();
            [
                user.id().to_string(),
                draft.name.clone(),
                draft.email.clone(),
                draft.phone.clone(),
                draft.company.clone(),
                draft.address.locality(),
                date(user.created_at()),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &widths, header)?;
    for row in &rows {
        write_row(out, &widths, row.iter().map(String::as_str))?;
    }
    if let Some(summary) = view.summary() {
        writeln!(out)?;
        writeln!(out, "{summary}")?;
    }
    Ok(())
}

fn write_row<'a>(
    out: &mut impl Write,
    widths: &[usize],
    cells: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    let line = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Every field of one record, grouped as on the details page.
pub fn user_details(out: &mut impl Write, user: &UserRecord) -> io::Result<()> {
    let draft = user.draft();
    let geo = &draft.address.geo;
    writeln!(out, "Personal Information")?;
    writeln!(out, "  Name:            {}", draft.name)?;
    writeln!(out, "  Email:           {}", draft.email)?;
    writeln!(out, "  Phone:           {}", draft.phone)?;
    writeln!(out, "  Company:         {}", draft.company)?;
    writeln!(out)?;
    writeln!(out, "Address Information")?;
    writeln!(out, "  Street Address:  {}", draft.address.street)?;
    writeln!(out, "  City:            {}", draft.address.city)?;
    writeln!(out, "  Zip Code:        {}", draft.address.zip)?;
    writeln!(out, "  Coordinates:     Lat: {}, Lng: {}", geo.lat, geo.lng)?;
    writeln!(out, "  Location on Map: {}", geo.maps_url())?;
    writeln!(out)?;
    writeln!(out, "Account Information")?;
    writeln!(out, "  User ID:         {}", user.id())?;
    writeln!(out, "  Created:         {}", timestamp(user.created_at()))?;
    writeln!(out, "  Last Updated:    {}", timestamp(user.updated_at()))
}

/// Field errors, one per line, in form order.
pub fn field_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (key, message) in errors.iter() {
        writeln!(out, "  {}: {message}", key.label())?;
    }
    Ok(())
}
