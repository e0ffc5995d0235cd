#![allow(dead_code)]

use access2excel::convert::{ConvertOptions, Converter, MemoryProgress};
use access2excel::database::{ColumnType, MemoryDatabase, Money, Value};
use access2excel::sheet::{OutputFormat, Workbook};
use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_from_rs};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

/// Two tables covering every mapped column type.
pub fn sample_database() -> MemoryDatabase {
    MemoryDatabase::builder()
        .table(
            "Customers",
            [
                ("Id", ColumnType::Int32),
                ("Name", ColumnType::Text),
                ("Active", ColumnType::Boolean),
                ("Joined", ColumnType::DateTime),
                ("Balance", ColumnType::Money),
            ],
            vec![
                vec![
                    Some(Value::Int32(1)),
                    Some(Value::Text("Ada".into())),
                    Some(Value::Bool(true)),
                    Some(Value::DateTime(datetime(2020, 1, 2, 0, 0, 0))),
                    Some(Value::Money(Money::from_ten_thousandths(1_234_500))),
                ],
                vec![
                    Some(Value::Int32(2)),
                    Some(Value::Text("Grace".into())),
                    Some(Value::Bool(false)),
                    None,
                    None,
                ],
            ],
        )
        .table(
            "Misc/Stuff",
            [
                ("Ratio", ColumnType::Double),
                ("Small", ColumnType::Byte),
                ("Attachment", ColumnType::Ole),
                ("Parts", ColumnType::Other("COMPLEX_TYPE".into())),
            ],
            vec![vec![
                Some(Value::Double(0.25)),
                Some(Value::Byte(9)),
                Some(Value::Binary(vec![1, 2, 3])),
                Some(Value::Text("ignored".into())),
            ]],
        )
        .build()
        .expect("valid database")
}

/// Convert `database` in memory and return the workbook bytes and progress.
pub fn convert(database: &mut MemoryDatabase, options: ConvertOptions) -> (Vec<u8>, MemoryProgress) {
    let mut workbook = Workbook::create(options.format, options.date_system);
    let mut progress = MemoryProgress::new();
    let mut out = Cursor::new(Vec::new());
    Converter::new(options)
        .convert(database, &mut workbook, &mut out, &mut progress)
        .expect("conversion succeeds");
    (out.into_inner(), progress)
}

pub fn options(format: OutputFormat) -> ConvertOptions {
    ConvertOptions {
        format,
        ..ConvertOptions::default()
    }
}

/// Sheet names and ranges of a written workbook.
pub fn read_back(format: OutputFormat, bytes: Vec<u8>) -> Vec<(String, Range<Data>)> {
    match format {
        OutputFormat::Xls => {
            let mut workbook: Xls<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open xls");
            let names = workbook.sheet_names();
            names
                .into_iter()
                .map(|name| {
                    let range = workbook.worksheet_range(&name).expect("read sheet");
                    (name, range)
                })
                .collect()
        },
        OutputFormat::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open xlsx");
            let names = workbook.sheet_names();
            names
                .into_iter()
                .map(|name| {
                    let range = workbook.worksheet_range(&name).expect("read sheet");
                    (name, range)
                })
                .collect()
        },
    }
}

/// Numeric content of a cell, whether stored as a number or a date.
pub fn number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col))? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    }
}

pub fn text(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col))? {
        Data::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub fn is_empty(range: &Range<Data>, row: u32, col: u32) -> bool {
    matches!(range.get_value((row, col)), None | Some(Data::Empty))
}
