//! Row codec for the lunch CSV files.
//!
//! The files have no header row and rows of varying length:
//!
//! | file            | row                                                   |
//! |-----------------|-------------------------------------------------------|
//! | apprentices.csv | `name`                                                |
//! | restaurants.csv | `name,menuLink`                                       |
//! | employees.csv   | `name[,order]`                                        |
//! | guests.csv      | `name[,order]`                                        |
//! | schedule.csv    | `apprentice,yyyy-MM-dd[,restaurant,menuLink]`         |
//!
//! Restaurant fields are only read from, and only written to, the first
//! schedule row. Optional fields are left off the row entirely when absent.
//! Writers refuse blank names before emitting any row, since such a row
//! could not be read back.

use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
use crate::utils::error::{LunchError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::io::{Read, Write};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

enum RowError {
    Malformed(String),
    Date {
        value: String,
        source: chrono::ParseError,
    },
}

impl RowError {
    fn malformed(reason: impl Into<String>) -> Self {
        RowError::Malformed(reason.into())
    }

    fn at(self, file: &str, line: u64) -> LunchError {
        match self {
            RowError::Malformed(reason) => LunchError::MalformedRow {
                file: file.to_string(),
                line,
                reason,
            },
            RowError::Date { value, source } => LunchError::DateParseError { value, source },
        }
    }
}

type RowResult<T> = std::result::Result<T, RowError>;

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source)
}

fn csv_writer<W: Write>(sink: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink)
}

/// Reads every row of `source`, handing each one with its zero-based index
/// to `parse`. The first bad row aborts the whole read.
fn parse_rows<R, T, F>(source: R, file: &str, mut parse: F) -> Result<Vec<T>>
where
    R: Read,
    F: FnMut(usize, &StringRecord) -> RowResult<T>,
{
    let mut reader = csv_reader(source);
    let mut parsed = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        let item = parse(index, &record).map_err(|e| e.at(file, line))?;
        parsed.push(item);
    }

    tracing::debug!("Parsed {} rows from {}", parsed.len(), file);
    Ok(parsed)
}

fn required_name<'a>(record: &'a StringRecord, index: usize, what: &str) -> RowResult<&'a str> {
    match record.get(index) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RowError::malformed(format!("missing {}", what))),
    }
}

fn optional_field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|value| !value.is_empty())
}

/// Strict `yyyy-MM-dd`. Unpadded forms such as `2020-1-3` are rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    parse_date_field(value).map_err(|e| match e {
        RowError::Date { value, source } => LunchError::DateParseError { value, source },
        RowError::Malformed(_) => LunchError::InvalidDate {
            value: value.to_string(),
        },
    })
}

fn parse_date_field(value: &str) -> RowResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| RowError::Date {
        value: value.to_string(),
        source,
    })?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(RowError::malformed(format!(
            "date '{}' is not in yyyy-MM-dd form",
            value
        )));
    }
    Ok(date)
}

pub fn read_apprentices<R: Read>(source: R, file: &str) -> Result<Vec<Apprentice>> {
    parse_rows(source, file, |_, record| {
        Ok(Apprentice::new(required_name(record, 0, "apprentice name")?))
    })
}

pub fn read_restaurants<R: Read>(source: R, file: &str) -> Result<Vec<Restaurant>> {
    parse_rows(source, file, |_, record| {
        let name = required_name(record, 0, "restaurant name")?;
        let menu_link = record
            .get(1)
            .ok_or_else(|| RowError::malformed(format!("restaurant '{}' has no menu link", name)))?;
        Ok(Restaurant::new(name, menu_link))
    })
}

fn parse_order_row(record: &StringRecord) -> RowResult<(&str, Option<&str>)> {
    let name = required_name(record, 0, "name")?;
    Ok((name, optional_field(record, 1)))
}

pub fn read_employees<R: Read>(source: R, file: &str) -> Result<Vec<Employee>> {
    parse_rows(source, file, |_, record| {
        let (name, order) = parse_order_row(record)?;
        let mut employee = Employee::new(name);
        if let Some(order) = order {
            employee.add_order(order);
        }
        Ok(employee)
    })
}

pub fn read_guests<R: Read>(source: R, file: &str) -> Result<Vec<Guest>> {
    parse_rows(source, file, |_, record| {
        let (name, order) = parse_order_row(record)?;
        let mut guest = Guest::new(name);
        if let Some(order) = order {
            guest.add_order(order);
        }
        Ok(guest)
    })
}

pub fn read_schedule<R: Read>(source: R, file: &str) -> Result<Vec<FridayLunch>> {
    parse_rows(source, file, |index, record| {
        let date = record
            .get(1)
            .ok_or_else(|| RowError::malformed("missing date"))?;
        let mut lunch = FridayLunch::new(parse_date_field(date)?);

        if let Some(name) = optional_field(record, 0) {
            lunch.assign_apprentice(Apprentice::new(name));
        }

        if index == 0 {
            match (optional_field(record, 2), optional_field(record, 3)) {
                (Some(restaurant), _) => {
                    let menu_link = record.get(3).ok_or_else(|| {
                        RowError::malformed(format!(
                            "restaurant '{}' has no menu link",
                            restaurant
                        ))
                    })?;
                    lunch.assign_restaurant(Restaurant::new(restaurant, menu_link));
                }
                (None, Some(menu_link)) => {
                    return Err(RowError::malformed(format!(
                        "menu link '{}' has no restaurant name",
                        menu_link
                    )));
                }
                (None, None) => {}
            }
        } else if record.len() > 2 {
            tracing::debug!(
                "Ignoring restaurant fields on schedule row {} of {}",
                index + 1,
                file
            );
        }

        Ok(lunch)
    })
}

/// Fields for one schedule row. Restaurant fields are emitted only when
/// `first` is set and the lunch has a restaurant.
pub fn lunch_fields(lunch: &FridayLunch, first: bool) -> Vec<String> {
    let mut fields = vec![
        lunch
            .apprentice()
            .map(|a| a.name().to_string())
            .unwrap_or_default(),
        lunch.date().format(DATE_FORMAT).to_string(),
    ];
    if first {
        if let Some(restaurant) = lunch.restaurant() {
            fields.push(restaurant.name().to_string());
            fields.push(restaurant.menu_link().to_string());
        }
    }
    fields
}

fn order_fields<'a>(name: &'a str, order: Option<&'a str>) -> Vec<&'a str> {
    let mut fields = vec![name];
    fields.extend(order);
    fields
}

fn ensure_named(what: &str, name: &str) -> Result<()> {
    validate_non_empty_string(what, name)
}

pub fn write_schedule<W: Write>(sink: W, schedule: &[FridayLunch]) -> Result<()> {
    for lunch in schedule {
        if let Some(apprentice) = lunch.apprentice() {
            ensure_named("apprentice name", apprentice.name())?;
        }
    }
    if let Some(restaurant) = schedule.first().and_then(FridayLunch::restaurant) {
        ensure_named("restaurant name", restaurant.name())?;
    }

    let mut writer = csv_writer(sink);
    for (index, lunch) in schedule.iter().enumerate() {
        if index > 0 && lunch.restaurant().is_some() {
            tracing::warn!(
                "Restaurant for {} is not persisted; only the first lunch carries one",
                lunch.date()
            );
        }
        writer.write_record(lunch_fields(lunch, index == 0))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_restaurants<W: Write>(sink: W, restaurants: &[Restaurant]) -> Result<()> {
    for restaurant in restaurants {
        ensure_named("restaurant name", restaurant.name())?;
    }

    let mut writer = csv_writer(sink);
    for restaurant in restaurants {
        writer.write_record([restaurant.name(), restaurant.menu_link()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_employees<W: Write>(sink: W, employees: &[Employee]) -> Result<()> {
    for employee in employees {
        ensure_named("employee name", employee.name())?;
    }

    let mut writer = csv_writer(sink);
    for employee in employees {
        writer.write_record(order_fields(employee.name(), employee.order()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_guests<W: Write>(sink: W, guests: &[Guest]) -> Result<()> {
    for guest in guests {
        ensure_named("guest name", guest.name())?;
    }

    let mut writer = csv_writer(sink);
    for guest in guests {
        writer.write_record(order_fields(guest.name(), guest.order()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn written<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_read_apprentice_row() {
        let apprentices = read_apprentices("Priya".as_bytes(), "apprentices.csv").unwrap();
        assert_eq!(apprentices, vec![Apprentice::new("Priya")]);
    }

    #[test]
    fn test_read_employee_with_and_without_order() {
        let employees =
            read_employees("Nick,Peri Peri Chicken\nNick\n".as_bytes(), "employees.csv").unwrap();

        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].name(), "Nick");
        assert_eq!(employees[0].order(), Some("Peri Peri Chicken"));
        assert_eq!(employees[1].order(), None);
    }

    #[test]
    fn test_empty_order_field_means_no_order() {
        let employees = read_employees("\"Nick\",\"\"\n".as_bytes(), "employees.csv").unwrap();
        assert_eq!(employees[0].order(), None);
    }

    #[test]
    fn test_read_schedule_restaurant_on_first_row_only() {
        let input = "Priya,2020-01-03,Deliveroo,http://menu\nNick,2020-01-10\n";
        let schedule = read_schedule(input.as_bytes(), "schedule.csv").unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].apprentice().map(Apprentice::name), Some("Priya"));
        assert_eq!(schedule[0].date(), date(2020, 1, 3));
        let restaurant = schedule[0].restaurant().unwrap();
        assert_eq!(restaurant.name(), "Deliveroo");
        assert_eq!(restaurant.menu_link(), "http://menu");

        assert_eq!(schedule[1].apprentice().map(Apprentice::name), Some("Nick"));
        assert!(schedule[1].restaurant().is_none());
    }

    #[test]
    fn test_restaurant_fields_on_later_rows_are_ignored() {
        let input = "Priya,2020-01-03\nNick,2020-01-10,Nandos,http://nandos\n";
        let schedule = read_schedule(input.as_bytes(), "schedule.csv").unwrap();

        assert!(schedule[0].restaurant().is_none());
        assert!(schedule[1].restaurant().is_none());
    }

    #[test]
    fn test_malformed_date_fails() {
        let err = read_schedule("Priya,2020/01/03\n".as_bytes(), "schedule.csv").unwrap_err();
        assert!(matches!(err, LunchError::DateParseError { ref value, .. } if value == "2020/01/03"));
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[test]
    fn test_unpadded_date_is_rejected() {
        let err = read_schedule("Priya,2020-1-3\n".as_bytes(), "schedule.csv").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[test]
    fn test_schedule_row_without_date_is_malformed() {
        let err = read_schedule("Priya\n".as_bytes(), "schedule.csv").unwrap_err();
        assert!(matches!(err, LunchError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn test_restaurant_without_menu_link_is_malformed() {
        let err =
            read_restaurants("Nandos,http://nandos\nDeliveroo\n".as_bytes(), "restaurants.csv")
                .unwrap_err();
        match err {
            LunchError::MalformedRow { file, line, .. } => {
                assert_eq!(file, "restaurants.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_schedule_row_with_half_a_restaurant_is_malformed() {
        let err = read_schedule("Priya,2020-01-03,Deliveroo\n".as_bytes(), "schedule.csv")
            .unwrap_err();
        assert!(matches!(err, LunchError::MalformedRow { .. }));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let apprentices =
            read_apprentices("Priya\n\nMollie\n".as_bytes(), "apprentices.csv").unwrap();
        assert_eq!(apprentices.len(), 2);
    }

    #[test]
    fn test_write_lunch_without_restaurant_has_no_trailing_delimiter() {
        let mut lunch = FridayLunch::new(date(2020, 1, 3));
        lunch.assign_apprentice(Apprentice::new("Ced"));

        let out = written(|buf| write_schedule(buf, &[lunch]));
        assert_eq!(out, "Ced,2020-01-03\n");
    }

    #[test]
    fn test_write_schedule_only_persists_first_restaurant() {
        let mut first = FridayLunch::new(date(2020, 1, 3));
        first.assign_apprentice(Apprentice::new("Priya"));
        first.assign_restaurant(Restaurant::new("Deliveroo", "http://menu"));
        let mut second = FridayLunch::new(date(2020, 1, 10));
        second.assign_apprentice(Apprentice::new("Nick"));
        second.assign_restaurant(Restaurant::new("Nandos", "http://nandos"));

        let out = written(|buf| write_schedule(buf, &[first, second]));
        assert_eq!(out, "Priya,2020-01-03,Deliveroo,http://menu\nNick,2020-01-10\n");
    }

    #[test]
    fn test_unassigned_lunch_round_trips() {
        let lunch = FridayLunch::new(date(2020, 1, 17));
        let out = written(|buf| write_schedule(buf, std::slice::from_ref(&lunch)));
        assert_eq!(out, ",2020-01-17\n");

        let back = read_schedule(out.as_bytes(), "schedule.csv").unwrap();
        assert_eq!(back, vec![lunch]);
    }

    #[test]
    fn test_employee_rows_survive_reparse() {
        for row in ["Nick,Peri Peri Chicken", "Nick", "Mollie,Halloumi wrap"] {
            let parsed = read_employees(row.as_bytes(), "employees.csv").unwrap();
            let out = written(|buf| write_employees(buf, &parsed));
            let reparsed = read_employees(out.as_bytes(), "employees.csv").unwrap();
            assert_eq!(reparsed, parsed, "row {row:?}");
        }
    }

    #[test]
    fn test_fields_containing_commas_are_quoted() {
        let restaurants = vec![Restaurant::new("Café, Paris", "http://cafe/menu")];
        let out = written(|buf| write_restaurants(buf, &restaurants));
        assert_eq!(out, "\"Café, Paris\",http://cafe/menu\n");

        let back = read_restaurants(out.as_bytes(), "restaurants.csv").unwrap();
        assert_eq!(back, restaurants);
    }

    #[test]
    fn test_guest_without_order_writes_single_field() {
        let guests = vec![Guest::with_order("Gary", "Tuna Melt"), Guest::new("Ann")];
        let out = written(|buf| write_guests(buf, &guests));
        assert_eq!(out, "Gary,Tuna Melt\nAnn\n");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2020-01-03").unwrap(), date(2020, 1, 3));
        assert!(parse_date("03-01-2020").is_err());
    }

    #[test]
    fn test_parse_unpadded_date_has_no_row_context() {
        let err = parse_date("2020-1-3").unwrap_err();
        assert!(matches!(err, LunchError::InvalidDate { ref value } if value == "2020-1-3"));
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert!(!err.to_string().contains("row"));
    }

    #[test]
    fn test_menu_link_without_restaurant_name_is_malformed() {
        let err = read_schedule("Priya,2020-01-03,,http://menu\n".as_bytes(), "schedule.csv")
            .unwrap_err();
        assert!(matches!(err, LunchError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn test_empty_restaurant_fields_on_first_row_mean_no_restaurant() {
        let schedule =
            read_schedule("Priya,2020-01-03,,\n".as_bytes(), "schedule.csv").unwrap();
        assert!(schedule[0].restaurant().is_none());
    }

    #[test]
    fn test_write_rejects_blank_restaurant_name() {
        let mut lunch = FridayLunch::new(date(2020, 1, 3));
        lunch.assign_apprentice(Apprentice::new("Priya"));
        lunch.assign_restaurant(Restaurant::new("", "http://menu"));

        let mut buf = Vec::new();
        let err = write_schedule(&mut buf, &[lunch]).unwrap_err();
        assert!(matches!(err, LunchError::ValidationError { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_rejects_blank_names_before_any_row() {
        let employees = vec![Employee::new("Nick"), Employee::new("")];
        let mut buf = Vec::new();
        let err = write_employees(&mut buf, &employees).unwrap_err();
        assert!(matches!(err, LunchError::ValidationError { .. }));
        assert!(buf.is_empty());

        let mut buf = Vec::new();
        assert!(write_guests(&mut buf, &[Guest::with_order("  ", "Tuna Melt")]).is_err());

        let mut lunch = FridayLunch::new(date(2020, 1, 3));
        lunch.assign_apprentice(Apprentice::new(""));
        let mut buf = Vec::new();
        assert!(write_schedule(&mut buf, &[lunch]).is_err());
    }
}
